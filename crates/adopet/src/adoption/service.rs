use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    AdoptionApproval, AdoptionRejection, AdoptionRequest, AdoptionSubmission, Pet, PetId,
    RequestId, Shelter, Tutor,
};
use super::error::{AdoptionError, RecordKind};
use super::notices;
use super::repository::{
    AdoptionRequestRepository, Notifier, PetRepository, RepositoryError, ShelterNotice,
    ShelterRepository, TutorRepository,
};
use super::scoring::{AdoptabilityAssessment, AdoptabilityTier, ScoringRule};
use super::validation::{AdmissionSources, ValidationPipeline, DEFAULT_ADOPTION_LIMIT};

const REQUEST_ID_PREFIX: &str = "adoption-";
const MAX_ID_ATTEMPTS: u32 = 4;

/// Policy dials for the adoption service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdoptionPolicy {
    pub adoption_limit: usize,
    pub mark_pet_adopted_on_approval: bool,
}

impl Default for AdoptionPolicy {
    fn default() -> Self {
        Self {
            adoption_limit: DEFAULT_ADOPTION_LIMIT,
            mark_pet_adopted_on_approval: true,
        }
    }
}

/// Storage collaborators injected into the service.
#[derive(Clone)]
pub struct AdoptionStores {
    pub pets: Arc<dyn PetRepository>,
    pub tutors: Arc<dyn TutorRepository>,
    pub shelters: Arc<dyn ShelterRepository>,
    pub requests: Arc<dyn AdoptionRequestRepository>,
}

/// Pet still waiting for a caretaker, paired with its adoptability tier.
#[derive(Debug, Clone, Serialize)]
pub struct AvailablePet {
    #[serde(flatten)]
    pub pet: Pet,
    pub tier: AdoptabilityTier,
}

/// Service composing the validation pipeline, request lifecycle, scoring rule, and
/// shelter notifications.
pub struct AdoptionService {
    stores: AdoptionStores,
    notifier: Arc<dyn Notifier>,
    pipeline: ValidationPipeline,
    scoring: ScoringRule,
    policy: AdoptionPolicy,
    sequence: AtomicU64,
}

impl AdoptionService {
    pub fn new(stores: AdoptionStores, notifier: Arc<dyn Notifier>, policy: AdoptionPolicy) -> Self {
        let pipeline = ValidationPipeline::standard(policy.adoption_limit);
        Self::with_pipeline(stores, notifier, policy, pipeline)
    }

    pub fn with_pipeline(
        stores: AdoptionStores,
        notifier: Arc<dyn Notifier>,
        policy: AdoptionPolicy,
        pipeline: ValidationPipeline,
    ) -> Self {
        Self {
            stores,
            notifier,
            pipeline,
            scoring: ScoringRule::default(),
            policy,
            sequence: AtomicU64::new(1),
        }
    }

    pub fn policy(&self) -> &AdoptionPolicy {
        &self.policy
    }

    pub fn pipeline(&self) -> &ValidationPipeline {
        &self.pipeline
    }

    /// Validate and persist a new request, then notify the pet's shelter.
    pub fn submit(
        &self,
        submission: AdoptionSubmission,
    ) -> Result<AdoptionRequest, AdoptionError> {
        if submission.reason.trim().is_empty() {
            return Err(AdoptionError::InvalidInput(
                "reason must not be blank".to_string(),
            ));
        }

        let pet = self.load_pet(&submission.pet_id)?;
        let tutor = self
            .stores
            .tutors
            .fetch(&submission.tutor_id)?
            .ok_or_else(|| AdoptionError::not_found(RecordKind::Tutor, &submission.tutor_id.0))?;

        self.pipeline.validate(&submission, self.sources())?;

        let shelter = self.load_shelter(&pet)?;
        let requested_at = Utc::now();
        let mut attempt = 1;
        let stored = loop {
            let request = AdoptionRequest::open(
                self.next_request_id(),
                submission.pet_id.clone(),
                submission.tutor_id.clone(),
                submission.reason.clone(),
                requested_at,
            );
            match self.stores.requests.insert(request) {
                Err(RepositoryError::Conflict) if attempt < MAX_ID_ATTEMPTS => {
                    // Another writer issued this id; continue past the highest stored one.
                    self.resync_sequence()?;
                    attempt += 1;
                }
                outcome => break outcome?,
            }
        };

        info!(
            request = %stored.id().0,
            pet = %pet.id.0,
            tutor = %tutor.id.0,
            "adoption request awaiting review"
        );
        self.notify(
            stored.id(),
            notices::requested(&shelter, &pet, &tutor, stored.reason()),
        );

        Ok(stored)
    }

    /// Approve a request awaiting review.
    pub fn approve(&self, approval: AdoptionApproval) -> Result<AdoptionRequest, AdoptionError> {
        let mut request = self.load_request(&approval.request_id)?;
        request.approve()?;

        let (pet, tutor, shelter) = self.parties(&request)?;
        // Pet first: a failed flag leaves the request awaiting review and safe to retry.
        if self.policy.mark_pet_adopted_on_approval {
            self.stores.pets.mark_adopted(request.pet_id())?;
        }
        self.stores.requests.update(request.clone())?;

        info!(request = %request.id().0, pet = %pet.id.0, "adoption request approved");
        self.notify(
            request.id(),
            notices::approved(&shelter, &pet, &tutor, &request),
        );

        Ok(request)
    }

    /// Reject a request awaiting review, recording the justification verbatim.
    pub fn reject(&self, rejection: AdoptionRejection) -> Result<AdoptionRequest, AdoptionError> {
        if rejection.justification.trim().is_empty() {
            return Err(AdoptionError::InvalidInput(
                "justification must not be blank".to_string(),
            ));
        }

        let mut request = self.load_request(&rejection.request_id)?;
        request.reject(rejection.justification.as_str())?;

        let (pet, tutor, shelter) = self.parties(&request)?;
        self.stores.requests.update(request.clone())?;

        info!(request = %request.id().0, pet = %pet.id.0, "adoption request rejected");
        self.notify(
            request.id(),
            notices::rejected(&shelter, &pet, &tutor, &request, &rejection.justification),
        );

        Ok(request)
    }

    /// Fetch a request for API responses.
    pub fn get(&self, request_id: &RequestId) -> Result<AdoptionRequest, AdoptionError> {
        self.load_request(request_id)
    }

    /// Score a pet's adoptability without touching storage beyond the lookup.
    pub fn score(&self, pet_id: &PetId) -> Result<AdoptabilityAssessment, AdoptionError> {
        let pet = self.load_pet(pet_id)?;
        Ok(self.scoring.assess(&pet))
    }

    pub fn available_pets(&self) -> Result<Vec<AvailablePet>, AdoptionError> {
        let pets = self.stores.pets.available()?;
        Ok(pets
            .into_iter()
            .filter(|pet| !pet.adopted)
            .map(|pet| {
                let tier = self.scoring.tier(&pet);
                AvailablePet { pet, tier }
            })
            .collect())
    }

    fn sources(&self) -> AdmissionSources<'_> {
        AdmissionSources {
            pets: self.stores.pets.as_ref(),
            tutors: self.stores.tutors.as_ref(),
            requests: self.stores.requests.as_ref(),
        }
    }

    fn next_request_id(&self) -> RequestId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        RequestId(format!("{REQUEST_ID_PREFIX}{id:06}"))
    }

    /// Move the sequence past every id already held by the request store.
    fn resync_sequence(&self) -> Result<(), AdoptionError> {
        let highest = self
            .stores
            .requests
            .list_all()?
            .iter()
            .filter_map(|request| {
                request
                    .id()
                    .0
                    .strip_prefix(REQUEST_ID_PREFIX)?
                    .parse::<u64>()
                    .ok()
            })
            .max()
            .unwrap_or(0);
        self.sequence.fetch_max(highest + 1, Ordering::Relaxed);
        Ok(())
    }

    fn load_request(&self, request_id: &RequestId) -> Result<AdoptionRequest, AdoptionError> {
        self.stores
            .requests
            .fetch(request_id)?
            .ok_or_else(|| AdoptionError::not_found(RecordKind::AdoptionRequest, &request_id.0))
    }

    fn load_pet(&self, pet_id: &PetId) -> Result<Pet, AdoptionError> {
        self.stores
            .pets
            .fetch(pet_id)?
            .ok_or_else(|| AdoptionError::not_found(RecordKind::Pet, &pet_id.0))
    }

    fn load_shelter(&self, pet: &Pet) -> Result<Shelter, AdoptionError> {
        self.stores
            .shelters
            .fetch(&pet.shelter_id)?
            .ok_or_else(|| AdoptionError::not_found(RecordKind::Shelter, &pet.shelter_id.0))
    }

    fn parties(&self, request: &AdoptionRequest) -> Result<(Pet, Tutor, Shelter), AdoptionError> {
        let pet = self.load_pet(request.pet_id())?;
        let tutor = self
            .stores
            .tutors
            .fetch(request.tutor_id())?
            .ok_or_else(|| AdoptionError::not_found(RecordKind::Tutor, &request.tutor_id().0))?;
        let shelter = self.load_shelter(&pet)?;
        Ok((pet, tutor, shelter))
    }

    // The transition is already persisted here; a failed send is logged, never rolled back.
    fn notify(&self, request_id: &RequestId, notice: ShelterNotice) {
        let subject = notice.subject.clone();
        if let Err(error) = self.notifier.send(notice) {
            warn!(request = %request_id.0, %subject, %error, "shelter notification failed");
        }
    }
}
