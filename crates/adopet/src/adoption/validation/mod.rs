mod rules;

pub use rules::AdmissionRule;

use super::domain::AdoptionSubmission;
use super::error::AdoptionError;
use super::repository::{AdoptionRequestRepository, PetRepository, TutorRepository};
use tracing::debug;

/// Default cap on approved adoptions per tutor.
pub const DEFAULT_ADOPTION_LIMIT: usize = 5;

/// Read-only view over the collaborators consulted by admission rules.
#[derive(Clone, Copy)]
pub struct AdmissionSources<'a> {
    pub pets: &'a dyn PetRepository,
    pub tutors: &'a dyn TutorRepository,
    pub requests: &'a dyn AdoptionRequestRepository,
}

/// Ordered, fail-fast set of admission rules run before a request is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPipeline {
    rules: Vec<AdmissionRule>,
}

impl ValidationPipeline {
    pub fn new(rules: Vec<AdmissionRule>) -> Self {
        Self { rules }
    }

    /// Pipeline without rules; every submission is admissible.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Standard rule set, in registration order.
    pub fn standard(adoption_limit: usize) -> Self {
        Self::new(vec![
            AdmissionRule::PetAvailable,
            AdmissionRule::PetNotAlreadyInReview,
            AdmissionRule::CaretakerNotAlreadyInReview,
            AdmissionRule::CaretakerBelowAdoptionLimit {
                limit: adoption_limit,
            },
        ])
    }

    pub fn rules(&self) -> &[AdmissionRule] {
        &self.rules
    }

    pub fn validate(
        &self,
        submission: &AdoptionSubmission,
        sources: AdmissionSources<'_>,
    ) -> Result<(), AdoptionError> {
        for rule in &self.rules {
            debug!(rule = rule.name(), pet = %submission.pet_id.0, "checking admission rule");
            rule.check(submission, sources)?;
        }
        Ok(())
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::standard(DEFAULT_ADOPTION_LIMIT)
    }
}
