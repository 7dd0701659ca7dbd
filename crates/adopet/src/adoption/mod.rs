//! Adoption decision engine: admission rules, request lifecycle, adoptability scoring, and
//! the service that orchestrates them.
//!
//! Storage and notification delivery are collaborators behind the traits in [`repository`];
//! the service only decides whether a request is admissible, how it moves through review,
//! and what the owning shelter is told at each step.

pub mod domain;
pub mod error;
mod lifecycle;
pub mod notices;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AdoptionApproval, AdoptionRejection, AdoptionRequest, AdoptionRequestView, AdoptionStatus,
    AdoptionSubmission, Pet, PetId, RequestId, Shelter, ShelterId, Species, Tutor, TutorId,
};
pub use error::{AdoptionError, DomainViolation, RecordKind};
pub use lifecycle::TransitionError;
pub use repository::{
    AdoptionRequestRepository, NotificationError, Notifier, PetRepository, RepositoryError,
    ShelterNotice, ShelterRepository, TutorRepository,
};
pub use router::adoption_router;
pub use scoring::{AdoptabilityAssessment, AdoptabilityTier, ScoringRule};
pub use service::{AdoptionPolicy, AdoptionService, AdoptionStores, AvailablePet};
pub use validation::{AdmissionRule, AdmissionSources, ValidationPipeline};
