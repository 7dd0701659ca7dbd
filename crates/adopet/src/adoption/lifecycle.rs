use chrono::{DateTime, Utc};

use super::domain::{AdoptionRequest, AdoptionStatus, PetId, RequestId, TutorId};

/// Raised when a transition is attempted from a terminal status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("adoption request {} is already {} and cannot become {}", .id.0, .current.label(), .attempted.label())]
pub struct TransitionError {
    pub id: RequestId,
    pub current: AdoptionStatus,
    pub attempted: AdoptionStatus,
}

impl AdoptionRequest {
    /// Open a new request awaiting shelter review.
    pub fn open(
        id: RequestId,
        pet_id: PetId,
        tutor_id: TutorId,
        reason: impl Into<String>,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            pet_id,
            tutor_id,
            reason: reason.into(),
            requested_at,
            status: AdoptionStatus::AwaitingReview,
            justification: None,
        }
    }

    pub fn approve(&mut self) -> Result<(), TransitionError> {
        self.ensure_awaiting(AdoptionStatus::Approved)?;
        self.status = AdoptionStatus::Approved;
        self.justification = None;
        Ok(())
    }

    /// Reject the request, storing the justification verbatim.
    pub fn reject(&mut self, justification: impl Into<String>) -> Result<(), TransitionError> {
        self.ensure_awaiting(AdoptionStatus::Rejected)?;
        self.status = AdoptionStatus::Rejected;
        self.justification = Some(justification.into());
        Ok(())
    }

    fn ensure_awaiting(&self, attempted: AdoptionStatus) -> Result<(), TransitionError> {
        if self.status.is_terminal() {
            return Err(TransitionError {
                id: self.id.clone(),
                current: self.status,
                attempted,
            });
        }
        Ok(())
    }
}
