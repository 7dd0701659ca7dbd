use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::adoption::domain::{
    AdoptionRequest, AdoptionStatus, AdoptionSubmission, Pet, PetId, RequestId, Shelter,
    ShelterId, Species, Tutor, TutorId,
};
use crate::adoption::repository::{
    AdoptionRequestRepository, NotificationError, Notifier, PetRepository, RepositoryError,
    ShelterNotice, ShelterRepository, TutorRepository,
};
use crate::adoption::service::{AdoptionPolicy, AdoptionService, AdoptionStores};
use crate::adoption::validation::AdmissionSources;

pub(super) const SHELTER: &str = "shelter-happy-paws";
pub(super) const REX: &str = "pet-rex";
pub(super) const MIMI: &str = "pet-mimi";
pub(super) const BOB: &str = "pet-bob";
pub(super) const ANA: &str = "tutor-ana";
pub(super) const JOAO: &str = "tutor-joao";

pub(super) fn shelter() -> Shelter {
    Shelter {
        id: ShelterId(SHELTER.to_string()),
        name: "Happy Paws".to_string(),
        phone: "(11)99999-9999".to_string(),
        email: "shelter@happypaws.org".to_string(),
    }
}

pub(super) fn pet(id: &str, name: &str, species: Species, age: u8, weight_kg: f32) -> Pet {
    Pet {
        id: PetId(id.to_string()),
        species,
        name: name.to_string(),
        breed: "Mixed".to_string(),
        age,
        color: "Brown".to_string(),
        weight_kg,
        adopted: false,
        shelter_id: ShelterId(SHELTER.to_string()),
    }
}

pub(super) fn tutor(id: &str, name: &str) -> Tutor {
    Tutor {
        id: TutorId(id.to_string()),
        name: name.to_string(),
        phone: "(21)98888-7777".to_string(),
        email: format!("{id}@example.com"),
    }
}

pub(super) fn submission(pet_id: &str, tutor_id: &str) -> AdoptionSubmission {
    AdoptionSubmission {
        pet_id: PetId(pet_id.to_string()),
        tutor_id: TutorId(tutor_id.to_string()),
        reason: "Large backyard and plenty of time for walks".to_string(),
    }
}

#[derive(Default)]
pub(super) struct MemoryPets {
    records: Mutex<BTreeMap<PetId, Pet>>,
}

impl MemoryPets {
    pub(super) fn put(&self, pet: Pet) {
        self.records
            .lock()
            .expect("pet mutex poisoned")
            .insert(pet.id.clone(), pet);
    }

    pub(super) fn get(&self, id: &str) -> Pet {
        self.records
            .lock()
            .expect("pet mutex poisoned")
            .get(&PetId(id.to_string()))
            .cloned()
            .expect("pet seeded")
    }
}

impl PetRepository for MemoryPets {
    fn fetch(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError> {
        Ok(self.records.lock().expect("pet mutex poisoned").get(id).cloned())
    }

    fn available(&self) -> Result<Vec<Pet>, RepositoryError> {
        let guard = self.records.lock().expect("pet mutex poisoned");
        Ok(guard.values().filter(|pet| !pet.adopted).cloned().collect())
    }

    fn mark_adopted(&self, id: &PetId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("pet mutex poisoned");
        let pet = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        pet.adopted = true;
        Ok(())
    }
}

/// Reads through to the seeded pets but cannot flag adoptions.
pub(super) struct ReadOnlyPets(pub(super) Arc<MemoryPets>);

impl PetRepository for ReadOnlyPets {
    fn fetch(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError> {
        self.0.fetch(id)
    }

    fn available(&self) -> Result<Vec<Pet>, RepositoryError> {
        self.0.available()
    }

    fn mark_adopted(&self, _id: &PetId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("pet catalog is read-only".to_string()))
    }
}

/// Tutor store that can resolve several ids to one record, as a deduplicating backend would.
#[derive(Default)]
pub(super) struct MemoryTutors {
    records: Mutex<HashMap<TutorId, Tutor>>,
    aliases: Mutex<HashMap<TutorId, TutorId>>,
}

impl MemoryTutors {
    pub(super) fn put(&self, tutor: Tutor) {
        self.records
            .lock()
            .expect("tutor mutex poisoned")
            .insert(tutor.id.clone(), tutor);
    }

    pub(super) fn alias(&self, alias: &str, canonical: &str) {
        self.aliases
            .lock()
            .expect("alias mutex poisoned")
            .insert(TutorId(alias.to_string()), TutorId(canonical.to_string()));
    }
}

impl TutorRepository for MemoryTutors {
    fn fetch(&self, id: &TutorId) -> Result<Option<Tutor>, RepositoryError> {
        let canonical = self
            .aliases
            .lock()
            .expect("alias mutex poisoned")
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.clone());
        let guard = self.records.lock().expect("tutor mutex poisoned");
        Ok(guard.get(&canonical).cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryShelters {
    records: Mutex<HashMap<ShelterId, Shelter>>,
}

impl MemoryShelters {
    pub(super) fn put(&self, shelter: Shelter) {
        self.records
            .lock()
            .expect("shelter mutex poisoned")
            .insert(shelter.id.clone(), shelter);
    }
}

impl ShelterRepository for MemoryShelters {
    fn fetch(&self, id: &ShelterId) -> Result<Option<Shelter>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("shelter mutex poisoned")
            .get(id)
            .cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryRequests {
    records: Mutex<BTreeMap<RequestId, AdoptionRequest>>,
}

impl MemoryRequests {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("request mutex poisoned").len()
    }

    pub(super) fn get(&self, id: &RequestId) -> AdoptionRequest {
        self.records
            .lock()
            .expect("request mutex poisoned")
            .get(id)
            .cloned()
            .expect("request stored")
    }
}

impl AdoptionRequestRepository for MemoryRequests {
    fn insert(&self, request: AdoptionRequest) -> Result<AdoptionRequest, RepositoryError> {
        let mut guard = self.records.lock().expect("request mutex poisoned");
        if guard.contains_key(request.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(request.id().clone(), request.clone());
        Ok(request)
    }

    fn update(&self, request: AdoptionRequest) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("request mutex poisoned");
        if !guard.contains_key(request.id()) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(request.id().clone(), request);
        Ok(())
    }

    fn fetch(&self, id: &RequestId) -> Result<Option<AdoptionRequest>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("request mutex poisoned")
            .get(id)
            .cloned())
    }

    fn list_all(&self) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("request mutex poisoned")
            .values()
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRequests;

impl AdoptionRequestRepository for UnavailableRequests {
    fn insert(&self, _request: AdoptionRequest) -> Result<AdoptionRequest, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _request: AdoptionRequest) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RequestId) -> Result<Option<AdoptionRequest>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_all(&self) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    sent: Mutex<Vec<ShelterNotice>>,
}

impl MemoryNotifier {
    pub(super) fn sent(&self) -> Vec<ShelterNotice> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn send(&self, notice: ShelterNotice) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send(&self, _notice: ShelterNotice) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp relay refused".to_string()))
    }
}

/// In-memory collaborators seeded with one shelter, three pets (Bob already adopted), and two
/// tutors.
pub(super) struct Harness {
    pub(super) pets: Arc<MemoryPets>,
    pub(super) tutors: Arc<MemoryTutors>,
    pub(super) shelters: Arc<MemoryShelters>,
    pub(super) requests: Arc<MemoryRequests>,
    pub(super) notifier: Arc<MemoryNotifier>,
}

impl Harness {
    pub(super) fn seeded() -> Self {
        let harness = Self {
            pets: Arc::new(MemoryPets::default()),
            tutors: Arc::new(MemoryTutors::default()),
            shelters: Arc::new(MemoryShelters::default()),
            requests: Arc::new(MemoryRequests::default()),
            notifier: Arc::new(MemoryNotifier::default()),
        };

        harness.shelters.put(shelter());
        harness.pets.put(pet(REX, "Rex", Species::Dog, 3, 12.0));
        harness.pets.put(pet(MIMI, "Mimi", Species::Cat, 16, 12.0));
        let mut bob = pet(BOB, "Bob", Species::Dog, 7, 20.0);
        bob.adopted = true;
        harness.pets.put(bob);
        harness.tutors.put(tutor(ANA, "Ana Souza"));
        harness.tutors.put(tutor(JOAO, "Joao Silva"));
        harness
    }

    pub(super) fn stores(&self) -> AdoptionStores {
        AdoptionStores {
            pets: self.pets.clone(),
            tutors: self.tutors.clone(),
            shelters: self.shelters.clone(),
            requests: self.requests.clone(),
        }
    }

    pub(super) fn sources(&self) -> AdmissionSources<'_> {
        AdmissionSources {
            pets: self.pets.as_ref(),
            tutors: self.tutors.as_ref(),
            requests: self.requests.as_ref(),
        }
    }

    pub(super) fn service(&self) -> AdoptionService {
        self.service_with(AdoptionPolicy::default())
    }

    pub(super) fn service_with(&self, policy: AdoptionPolicy) -> AdoptionService {
        AdoptionService::new(self.stores(), self.notifier.clone(), policy)
    }

    /// Store a request directly, bypassing the service, already moved to `status`.
    pub(super) fn seed_request(
        &self,
        id: &str,
        pet_id: &str,
        tutor_id: &str,
        status: AdoptionStatus,
    ) -> AdoptionRequest {
        let mut request = AdoptionRequest::open(
            RequestId(id.to_string()),
            PetId(pet_id.to_string()),
            TutorId(tutor_id.to_string()),
            "seeded",
            Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
        );
        match status {
            AdoptionStatus::AwaitingReview => {}
            AdoptionStatus::Approved => request.approve().expect("approve seeded request"),
            AdoptionStatus::Rejected => request
                .reject("seeded rejection")
                .expect("reject seeded request"),
        }
        self.requests
            .insert(request.clone())
            .expect("seed request stored");
        request
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
