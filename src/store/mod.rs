//! Store de documentos
//!
//! Abstracción de colecciones de documentos con clave opaca: una colección
//! por entidad (`users`, `drivers`, `vehicle_maintenance`,
//! `route_optimizations`, `telemetry`). Dos backends: PostgreSQL (tabla
//! JSONB) y memoria (tests y ejecución sin DATABASE_URL).

pub mod memory;
pub mod postgres;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::models::maintenance::VehicleMaintenance;
use crate::models::route_optimization::RouteOptimization;
use crate::models::telemetry::Telemetry;
use crate::models::user::User;

/// Errores del store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Backend de persistencia: colecciones de documentos JSON con clave `id`.
/// `put` es un upsert; `delete` es idempotente.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(&self, collection: &str, id: &str, doc: serde_json::Value)
        -> Result<(), StoreError>;
    async fn get(&self, collection: &str, id: &str)
        -> Result<Option<serde_json::Value>, StoreError>;
    async fn all(&self, collection: &str) -> Result<Vec<serde_json::Value>, StoreError>;
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Entidad almacenable: expone su id opaco, asignado en el primer insert.
pub trait Document {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
}

/// Colección tipada sobre un backend de documentos
pub struct Collection<T> {
    backend: Arc<dyn DocumentStore>,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            name: self.name,
            _marker: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Document + Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(backend: Arc<dyn DocumentStore>, name: &'static str) -> Self {
        Self {
            backend,
            name,
            _marker: PhantomData,
        }
    }

    /// Inserta (o sobreescribe) la entidad. Si no trae id se asigna uno
    /// nuevo; devuelve la copia almacenada.
    pub async fn insert(&self, mut entity: T) -> Result<T, StoreError> {
        if entity.id().is_none() {
            entity.set_id(Uuid::new_v4().to_string());
        }
        let id = entity.id().unwrap_or_default().to_string();
        let doc = serde_json::to_value(&entity)?;
        self.backend.put(self.name, &id, doc).await?;
        Ok(entity)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(self.name, id).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    /// Todos los documentos de la colección; el orden no está especificado.
    pub async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let docs = self.backend.all(self.name).await?;
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }

    /// Borrado idempotente: tiene éxito exista o no el id.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.backend.delete(self.name, id).await
    }

    pub async fn find_where<F>(&self, predicate: F) -> Result<Vec<T>, StoreError>
    where
        F: Fn(&T) -> bool,
    {
        let mut all = self.find_all().await?;
        all.retain(|entity| predicate(entity));
        Ok(all)
    }

    pub async fn find_one<F>(&self, predicate: F) -> Result<Option<T>, StoreError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.find_where(predicate).await?.into_iter().next())
    }
}

/// Las cinco colecciones del servicio
#[derive(Clone)]
pub struct Store {
    pub users: Collection<User>,
    pub drivers: Collection<Driver>,
    pub maintenance: Collection<VehicleMaintenance>,
    pub route_optimizations: Collection<RouteOptimization>,
    pub telemetry: Collection<Telemetry>,
}

impl Store {
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: Collection::new(backend.clone(), "users"),
            drivers: Collection::new(backend.clone(), "drivers"),
            maintenance: Collection::new(backend.clone(), "vehicle_maintenance"),
            route_optimizations: Collection::new(backend.clone(), "route_optimizations"),
            telemetry: Collection::new(backend, "telemetry"),
        }
    }

    /// Store en memoria, para tests y para correr sin base de datos
    pub fn in_memory() -> Self {
        Self::new(Arc::new(memory::MemoryStore::new()))
    }

    /// Store respaldado por PostgreSQL (tabla `documents` JSONB)
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let backend = postgres::PostgresStore::connect(database_url).await?;
        Ok(Self::new(Arc::new(backend)))
    }
}
