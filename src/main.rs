use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

use neurofleetx_backend::config::environment::EnvironmentConfig;
use neurofleetx_backend::create_app;
use neurofleetx_backend::state::AppState;
use neurofleetx_backend::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env();

    // Configurar logging
    let level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚛 NeuroFleetX - Fleet Management Backend");
    info!("=========================================");

    // Inicializar el store de documentos
    let store = match config.database_url.as_deref() {
        Some(url) => {
            info!("🗄️  Conectando a Postgres...");
            let store = Store::connect(url).await?;
            info!("✅ Store Postgres listo");
            store
        }
        None => {
            warn!("⚠️  DATABASE_URL no definida, usando store en memoria (los datos no persisten)");
            Store::in_memory()
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::new(store, config);
    let app = create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("🔐 Autenticación:");
    info!("   POST /api/auth/fleet-manager/signup - Registrar fleet manager");
    info!("   POST /api/auth/driver/signup - Registrar driver");
    info!("   POST /api/auth/fleet-manager/login - Login fleet manager");
    info!("   POST /api/auth/driver/login - Login driver");
    info!("   POST /api/auth/change-password - Cambiar contraseña");
    info!("   GET  /api/auth/fleet-managers - Listar fleet managers");
    info!("   GET  /api/auth/drivers - Listar cuentas driver");
    info!("🚗 Drivers:");
    info!("   GET|POST /api/drivers - Listar / crear");
    info!("   GET|PUT|DELETE /api/drivers/:id - Obtener / actualizar / borrar");
    info!("🔧 Mantenimiento:");
    info!("   GET  /api/maintenance - Todos los registros");
    info!("   GET  /api/maintenance/vehicle/:vehicleId - Por vehículo");
    info!("   GET  /api/maintenance/health-status/:s - Por estado de salud");
    info!("   GET  /api/maintenance/risk-level/:r - Por nivel de riesgo");
    info!("   GET  /api/maintenance/urgent - Mantenimiento urgente");
    info!("   GET  /api/maintenance/statistics - Estadísticas de flota");
    info!("   POST /api/maintenance - Upsert por vehicleId");
    info!("   PUT|DELETE /api/maintenance/:id - Actualizar / borrar");
    info!("🗺️  Optimización de rutas:");
    info!("   GET|POST /api/route-optimization - Listar / crear");
    info!("   GET  /api/route-optimization/statistics - Estadísticas");
    info!("   GET  /api/route-optimization/route/:rid - Por ruta");
    info!("   GET  /api/route-optimization/vehicle/:vid - Por vehículo");
    info!("   GET  /api/route-optimization/driver/:did - Por conductor");
    info!("   GET  /api/route-optimization/status/:s - Por estado");
    info!("   GET|PUT|DELETE /api/route-optimization/:id - Por id");
    info!("📡 Telemetría:");
    info!("   GET|POST /api/telemetry - Listar / ingestar");
    info!("   GET  /api/telemetry/vehicle/:vehicleId - Por vehículo");
    #[cfg(feature = "mock-data")]
    {
        info!("🧪 Datos mock:");
        info!("   POST /api/maintenance/generate-mock/:count");
        info!("   POST /api/route-optimization/generate-mock/:count");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
