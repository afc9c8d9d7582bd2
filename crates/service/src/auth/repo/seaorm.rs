use sea_orm::DatabaseConnection;

use crate::auth::domain::{Credentials, OwnerAccount, RegisterInput};
use crate::auth::errors::AuthError;
use crate::auth::repository::OwnerRepository;

pub struct SeaOrmOwnerRepository {
    pub db: DatabaseConnection,
}

fn to_account(m: models::owner::Model) -> OwnerAccount {
    OwnerAccount {
        id: m.id,
        email: m.email,
        first_name: m.first_name,
        last_name: m.last_name,
        telephone: m.telephone,
    }
}

#[async_trait::async_trait]
impl OwnerRepository for SeaOrmOwnerRepository {
    async fn find_owner_by_email(&self, email: &str) -> Result<Option<OwnerAccount>, AuthError> {
        let res = models::owner::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_account))
    }

    async fn create_owner(&self, input: &RegisterInput) -> Result<OwnerAccount, AuthError> {
        let created = models::owner::create(
            &self.db,
            &input.email,
            &input.first_name,
            &input.last_name,
            &input.telephone,
            &input.address,
            &input.city,
        )
        .await
        .map_err(|e| AuthError::Validation(e.to_string()))?;
        Ok(to_account(created))
    }

    async fn get_credentials(&self, owner_id: i64) -> Result<Option<Credentials>, AuthError> {
        let res = models::owner_credentials::find_by_owner(&self.db, owner_id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|c| Credentials {
            owner_id: c.owner_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        }))
    }

    async fn upsert_password(&self, owner_id: i64, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = models::owner_credentials::upsert_password(&self.db, owner_id, password_hash, &password_algorithm)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(Credentials {
            owner_id: c.owner_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        })
    }
}
