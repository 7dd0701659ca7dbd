use super::super::domain::{AdoptionStatus, AdoptionSubmission, Pet, Tutor};
use super::super::error::{AdoptionError, DomainViolation, RecordKind};
use super::AdmissionSources;

/// Single admissibility precondition checked against existing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionRule {
    PetAvailable,
    PetNotAlreadyInReview,
    CaretakerNotAlreadyInReview,
    CaretakerBelowAdoptionLimit { limit: usize },
}

impl AdmissionRule {
    pub const fn name(&self) -> &'static str {
        match self {
            AdmissionRule::PetAvailable => "pet_available",
            AdmissionRule::PetNotAlreadyInReview => "pet_not_already_in_review",
            AdmissionRule::CaretakerNotAlreadyInReview => "caretaker_not_already_in_review",
            AdmissionRule::CaretakerBelowAdoptionLimit { .. } => "caretaker_below_adoption_limit",
        }
    }

    pub fn check(
        &self,
        submission: &AdoptionSubmission,
        sources: AdmissionSources<'_>,
    ) -> Result<(), AdoptionError> {
        match *self {
            AdmissionRule::PetAvailable => {
                let pet = load_pet(submission, sources)?;
                if pet.adopted {
                    return Err(DomainViolation::PetAlreadyAdopted.into());
                }
            }
            AdmissionRule::PetNotAlreadyInReview => {
                if sources
                    .requests
                    .exists_for_pet_with_status(&submission.pet_id, AdoptionStatus::AwaitingReview)?
                {
                    return Err(DomainViolation::PetRequestInProgress.into());
                }
            }
            AdmissionRule::CaretakerNotAlreadyInReview => {
                let awaiting =
                    count_tutor_requests(submission, sources, AdoptionStatus::AwaitingReview)?;
                if awaiting > 0 {
                    return Err(DomainViolation::CaretakerRequestInProgress.into());
                }
            }
            AdmissionRule::CaretakerBelowAdoptionLimit { limit } => {
                let approved = count_tutor_requests(submission, sources, AdoptionStatus::Approved)?;
                if approved >= limit {
                    return Err(DomainViolation::CaretakerLimitReached { limit }.into());
                }
            }
        }
        Ok(())
    }
}

fn load_pet(
    submission: &AdoptionSubmission,
    sources: AdmissionSources<'_>,
) -> Result<Pet, AdoptionError> {
    sources
        .pets
        .fetch(&submission.pet_id)?
        .ok_or_else(|| AdoptionError::not_found(RecordKind::Pet, &submission.pet_id.0))
}

fn load_tutor(
    submission: &AdoptionSubmission,
    sources: AdmissionSources<'_>,
) -> Result<Tutor, AdoptionError> {
    sources
        .tutors
        .fetch(&submission.tutor_id)?
        .ok_or_else(|| AdoptionError::not_found(RecordKind::Tutor, &submission.tutor_id.0))
}

/// Count existing requests with `status` whose tutor resolves to the submitting tutor's record.
fn count_tutor_requests(
    submission: &AdoptionSubmission,
    sources: AdmissionSources<'_>,
    status: AdoptionStatus,
) -> Result<usize, AdoptionError> {
    let tutor = load_tutor(submission, sources)?;
    let mut count = 0;
    for request in sources.requests.list_all()? {
        if request.status() != status {
            continue;
        }
        // Requests pointing at a tutor that no longer resolves cannot belong to this one.
        if let Some(owner) = sources.tutors.fetch(request.tutor_id())? {
            if owner == tutor {
                count += 1;
            }
        }
    }
    Ok(count)
}
