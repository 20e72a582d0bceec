use crate::models::user::{User, UserRole};
use crate::store::Collection;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct UserRepository {
    users: Collection<User>,
}

impl UserRepository {
    pub fn new(users: Collection<User>) -> Self {
        Self { users }
    }

    /// Inserta o sobreescribe; asigna id en el primer insert
    pub async fn save(&self, user: User) -> AppResult<User> {
        Ok(self.users.insert(user).await?)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.find_one(|u| u.email == email).await?)
    }

    pub async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    pub async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        Ok(self.users.find_where(|u| u.role == role).await?)
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        Ok(self.users.delete_by_id(id).await?)
    }
}
