use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::pet::repository::PetRepository;

/// Application service for pets. Every operation is scoped to the owner
/// taken from the request's authenticated identity; a pet belonging to
/// someone else is never returned or touched.
pub struct PetService<R: PetRepository> {
    repo: Arc<R>,
}

impl<R: PetRepository> PetService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self, owner_id: i64) -> Result<Vec<models::pet::Model>, ServiceError> {
        self.repo.list_by_owner(owner_id).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, owner_id: i64, name: &str, species: &str, birth_date: Option<NaiveDate>) -> Result<models::pet::Model, ServiceError> {
        let created = self.repo.create(owner_id, name, species, birth_date).await?;
        info!(pet_id = created.id, owner_id, "pet_registered");
        Ok(created)
    }

    /// Fetch a pet, enforcing that it belongs to the requesting owner.
    pub async fn get_owned(&self, owner_id: i64, pet_id: i64) -> Result<models::pet::Model, ServiceError> {
        let pet = self.repo.get(pet_id).await?.ok_or_else(|| ServiceError::not_found("pet"))?;
        if pet.owner_id != owner_id {
            return Err(ServiceError::Forbidden("pet belongs to another owner".into()));
        }
        Ok(pet)
    }

    pub async fn update(
        &self,
        owner_id: i64,
        pet_id: i64,
        name: Option<&str>,
        species: Option<&str>,
        birth_date: Option<NaiveDate>,
    ) -> Result<models::pet::Model, ServiceError> {
        self.get_owned(owner_id, pet_id).await?;
        self.repo.update(pet_id, name, species, birth_date).await
    }

    pub async fn delete(&self, owner_id: i64, pet_id: i64) -> Result<bool, ServiceError> {
        self.get_owned(owner_id, pet_id).await?;
        self.repo.delete(pet_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockPetRepository {
        pets: Mutex<HashMap<i64, models::pet::Model>>,
        next_id: Mutex<i64>,
    }

    #[async_trait]
    impl PetRepository for MockPetRepository {
        async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<models::pet::Model>, ServiceError> {
            let pets = self.pets.lock().unwrap();
            Ok(pets.values().filter(|p| p.owner_id == owner_id).cloned().collect())
        }

        async fn create(&self, owner_id: i64, name: &str, species: &str, birth_date: Option<NaiveDate>) -> Result<models::pet::Model, ServiceError> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let now = Utc::now().into();
            let pet = models::pet::Model {
                id: *next,
                owner_id,
                name: name.into(),
                species: species.into(),
                birth_date,
                created_at: now,
                updated_at: now,
            };
            self.pets.lock().unwrap().insert(pet.id, pet.clone());
            Ok(pet)
        }

        async fn get(&self, id: i64) -> Result<Option<models::pet::Model>, ServiceError> {
            Ok(self.pets.lock().unwrap().get(&id).cloned())
        }

        async fn update(&self, id: i64, name: Option<&str>, _species: Option<&str>, _birth_date: Option<NaiveDate>) -> Result<models::pet::Model, ServiceError> {
            let mut pets = self.pets.lock().unwrap();
            let pet = pets.get_mut(&id).ok_or_else(|| ServiceError::not_found("pet"))?;
            if let Some(name) = name {
                pet.name = name.into();
            }
            Ok(pet.clone())
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.pets.lock().unwrap().remove(&id).is_some())
        }
    }

    fn service() -> PetService<MockPetRepository> {
        PetService::new(Arc::new(MockPetRepository::default()))
    }

    #[tokio::test]
    async fn owner_sees_only_their_pets() {
        let svc = service();
        svc.create(1, "Rex", "dog", None).await.unwrap();
        svc.create(2, "Mia", "cat", None).await.unwrap();
        let mine = svc.list(1).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Rex");
    }

    #[tokio::test]
    async fn foreign_pet_is_forbidden() {
        let svc = service();
        let pet = svc.create(1, "Rex", "dog", None).await.unwrap();
        let err = svc.get_owned(2, pet.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        let err = svc.delete(2, pet.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn update_scoped_to_owner() {
        let svc = service();
        let pet = svc.create(1, "Rex", "dog", None).await.unwrap();
        let updated = svc.update(1, pet.id, Some("Rexy"), None, None).await.unwrap();
        assert_eq!(updated.name, "Rexy");
        assert!(matches!(
            svc.update(2, pet.id, Some("Nope"), None, None).await.unwrap_err(),
            ServiceError::Forbidden(_)
        ));
    }

    #[tokio::test]
    async fn missing_pet_is_not_found() {
        let svc = service();
        assert!(matches!(svc.get_owned(1, 99).await.unwrap_err(), ServiceError::NotFound(_)));
    }
}
