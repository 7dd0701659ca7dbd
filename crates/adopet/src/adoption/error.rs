use std::fmt;

use super::lifecycle::TransitionError;
use super::repository::RepositoryError;

/// Kinds of records the engine resolves through its collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Pet,
    Tutor,
    Shelter,
    AdoptionRequest,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Pet => "pet",
            RecordKind::Tutor => "tutor",
            RecordKind::Shelter => "shelter",
            RecordKind::AdoptionRequest => "adoption request",
        };
        f.write_str(label)
    }
}

/// Business-rule failures that block a submission from being created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainViolation {
    #[error("pet has already been adopted")]
    PetAlreadyAdopted,
    #[error("pet already has an adoption request awaiting review")]
    PetRequestInProgress,
    #[error("tutor already has an adoption request awaiting review")]
    CaretakerRequestInProgress,
    #[error("tutor has reached the limit of {limit} approved adoptions")]
    CaretakerLimitReached { limit: usize },
}

/// Error raised by the validation pipeline and the adoption service.
#[derive(Debug, thiserror::Error)]
pub enum AdoptionError {
    #[error("{entity} {id} not found")]
    NotFound { entity: RecordKind, id: String },
    #[error(transparent)]
    Violation(#[from] DomainViolation),
    #[error(transparent)]
    InvalidState(#[from] TransitionError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AdoptionError {
    pub(crate) fn not_found(entity: RecordKind, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
