use async_trait::async_trait;

use super::domain::{Credentials, OwnerAccount, RegisterInput};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    async fn find_owner_by_email(&self, email: &str) -> Result<Option<OwnerAccount>, AuthError>;
    async fn create_owner(&self, input: &RegisterInput) -> Result<OwnerAccount, AuthError>;

    async fn get_credentials(&self, owner_id: i64) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, owner_id: i64, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockOwnerRepository {
        next_id: AtomicI64,
        owners: Mutex<HashMap<String, OwnerAccount>>, // key: email
        creds: Mutex<HashMap<i64, Credentials>>,      // key: owner_id
    }

    #[async_trait]
    impl OwnerRepository for MockOwnerRepository {
        async fn find_owner_by_email(&self, email: &str) -> Result<Option<OwnerAccount>, AuthError> {
            let owners = self.owners.lock().unwrap();
            Ok(owners.get(email).cloned())
        }

        async fn create_owner(&self, input: &RegisterInput) -> Result<OwnerAccount, AuthError> {
            let mut owners = self.owners.lock().unwrap();
            if owners.contains_key(&input.email) {
                return Err(AuthError::Conflict);
            }
            let owner = OwnerAccount {
                id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                email: input.email.clone(),
                first_name: input.first_name.clone(),
                last_name: input.last_name.clone(),
                telephone: input.telephone.clone(),
            };
            owners.insert(input.email.clone(), owner.clone());
            Ok(owner)
        }

        async fn get_credentials(&self, owner_id: i64) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&owner_id).cloned())
        }

        async fn upsert_password(&self, owner_id: i64, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
            let mut creds = self.creds.lock().unwrap();
            let c = Credentials { owner_id, password_hash, password_algorithm };
            creds.insert(owner_id, c.clone());
            Ok(c)
        }
    }
}
