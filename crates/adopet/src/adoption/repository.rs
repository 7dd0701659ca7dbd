use serde::{Deserialize, Serialize};

use super::domain::{
    AdoptionRequest, AdoptionStatus, Pet, PetId, RequestId, Shelter, ShelterId, Tutor, TutorId,
};

/// Pet storage consulted during validation and scoring.
pub trait PetRepository: Send + Sync {
    fn fetch(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError>;
    fn available(&self) -> Result<Vec<Pet>, RepositoryError>;
    fn mark_adopted(&self, id: &PetId) -> Result<(), RepositoryError>;
}

pub trait TutorRepository: Send + Sync {
    fn fetch(&self, id: &TutorId) -> Result<Option<Tutor>, RepositoryError>;
}

pub trait ShelterRepository: Send + Sync {
    fn fetch(&self, id: &ShelterId) -> Result<Option<Shelter>, RepositoryError>;
}

/// Storage abstraction for adoption requests so the service can be exercised in isolation.
pub trait AdoptionRequestRepository: Send + Sync {
    fn insert(&self, request: AdoptionRequest) -> Result<AdoptionRequest, RepositoryError>;
    fn update(&self, request: AdoptionRequest) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RequestId) -> Result<Option<AdoptionRequest>, RepositoryError>;
    fn list_all(&self) -> Result<Vec<AdoptionRequest>, RepositoryError>;

    fn exists_for_pet_with_status(
        &self,
        pet_id: &PetId,
        status: AdoptionStatus,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .list_all()?
            .iter()
            .any(|request| request.pet_id() == pet_id && request.status() == status))
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook (e.g. an e-mail adapter). Delivery and redelivery belong to
/// the implementation.
pub trait Notifier: Send + Sync {
    fn send(&self, notice: ShelterNotice) -> Result<(), NotificationError>;
}

/// Message addressed to the shelter that owns the pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelterNotice {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
