use adopet::adoption::{
    AdoptionRequest, AdoptionRequestRepository, AdoptionStores, NotificationError, Notifier, Pet,
    PetId, PetRepository, RepositoryError, RequestId, Shelter, ShelterId, ShelterNotice,
    ShelterRepository, Species, Tutor, TutorId, TutorRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPets {
    records: Arc<Mutex<HashMap<PetId, Pet>>>,
}

impl InMemoryPets {
    pub(crate) fn put(&self, pet: Pet) -> Result<(), RepositoryError> {
        lock(&self.records)?.insert(pet.id.clone(), pet);
        Ok(())
    }
}

impl PetRepository for InMemoryPets {
    fn fetch(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn available(&self) -> Result<Vec<Pet>, RepositoryError> {
        let mut pets: Vec<Pet> = lock(&self.records)?
            .values()
            .filter(|pet| !pet.adopted)
            .cloned()
            .collect();
        pets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pets)
    }

    fn mark_adopted(&self, id: &PetId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        let pet = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        pet.adopted = true;
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTutors {
    records: Arc<Mutex<HashMap<TutorId, Tutor>>>,
}

impl InMemoryTutors {
    pub(crate) fn put(&self, tutor: Tutor) -> Result<(), RepositoryError> {
        lock(&self.records)?.insert(tutor.id.clone(), tutor);
        Ok(())
    }
}

impl TutorRepository for InMemoryTutors {
    fn fetch(&self, id: &TutorId) -> Result<Option<Tutor>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryShelters {
    records: Arc<Mutex<HashMap<ShelterId, Shelter>>>,
}

impl InMemoryShelters {
    pub(crate) fn put(&self, shelter: Shelter) -> Result<(), RepositoryError> {
        lock(&self.records)?.insert(shelter.id.clone(), shelter);
        Ok(())
    }
}

impl ShelterRepository for InMemoryShelters {
    fn fetch(&self, id: &ShelterId) -> Result<Option<Shelter>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRequests {
    records: Arc<Mutex<HashMap<RequestId, AdoptionRequest>>>,
}

impl AdoptionRequestRepository for InMemoryRequests {
    fn insert(&self, request: AdoptionRequest) -> Result<AdoptionRequest, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(request.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(request.id().clone(), request.clone());
        Ok(request)
    }

    fn update(&self, request: AdoptionRequest) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(request.id()) {
            guard.insert(request.id().clone(), request);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &RequestId) -> Result<Option<AdoptionRequest>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn list_all(&self) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        let mut requests: Vec<AdoptionRequest> = lock(&self.records)?.values().cloned().collect();
        requests.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(requests)
    }
}

/// Delivers shelter notices to the log and keeps a copy in an outbox.
#[derive(Clone)]
pub(crate) struct TracingNotifier {
    from: String,
    outbox: Arc<Mutex<Vec<ShelterNotice>>>,
}

impl TracingNotifier {
    pub(crate) fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            outbox: Arc::default(),
        }
    }

    pub(crate) fn sent(&self) -> Vec<ShelterNotice> {
        self.outbox
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Notifier for TracingNotifier {
    fn send(&self, notice: ShelterNotice) -> Result<(), NotificationError> {
        info!(
            from = %self.from,
            to = %notice.to,
            subject = %notice.subject,
            body = %notice.body,
            "shelter notice dispatched"
        );
        self.outbox
            .lock()
            .map_err(|_| NotificationError::Transport("outbox mutex poisoned".to_string()))?
            .push(notice);
        Ok(())
    }
}

/// In-memory stores behind the adoption service, kept typed so callers can seed them.
#[derive(Default, Clone)]
pub(crate) struct Catalog {
    pub(crate) pets: InMemoryPets,
    pub(crate) tutors: InMemoryTutors,
    pub(crate) shelters: InMemoryShelters,
    pub(crate) requests: InMemoryRequests,
}

impl Catalog {
    pub(crate) fn stores(&self) -> AdoptionStores {
        AdoptionStores {
            pets: Arc::new(self.pets.clone()),
            tutors: Arc::new(self.tutors.clone()),
            shelters: Arc::new(self.shelters.clone()),
            requests: Arc::new(self.requests.clone()),
        }
    }
}

pub(crate) const DEMO_SHELTER: &str = "shelter-abrigo-feliz";

/// One shelter, four pets spanning every tier, and two tutors.
pub(crate) fn seed_catalog() -> Result<Catalog, RepositoryError> {
    let catalog = Catalog::default();

    catalog.shelters.put(Shelter {
        id: ShelterId(DEMO_SHELTER.to_string()),
        name: "Abrigo Feliz".to_string(),
        phone: "(94)99999-9999".to_string(),
        email: "abrigofeliz@email.com.br".to_string(),
    })?;

    let pets = [
        ("pet-thor", Species::Dog, "Thor", "Vira-lata", 3, "Caramelo", 12.5),
        ("pet-luna", Species::Cat, "Luna", "Siamês", 11, "Creme", 4.2),
        ("pet-rex", Species::Dog, "Rex", "Pastor Alemão", 16, "Preto", 32.0),
        ("pet-mia", Species::Cat, "Mia", "Persa", 1, "Branco", 3.1),
    ];
    for (id, species, name, breed, age, color, weight_kg) in pets {
        catalog.pets.put(Pet {
            id: PetId(id.to_string()),
            species,
            name: name.to_string(),
            breed: breed.to_string(),
            age,
            color: color.to_string(),
            weight_kg,
            adopted: false,
            shelter_id: ShelterId(DEMO_SHELTER.to_string()),
        })?;
    }

    let tutors = [
        ("tutor-maria", "Maria Santos", "(21)98888-7777", "maria@email.com"),
        ("tutor-carlos", "Carlos Oliveira", "(11)97777-6666", "carlos@email.com"),
    ];
    for (id, name, phone, email) in tutors {
        catalog.tutors.put(Tutor {
            id: TutorId(id.to_string()),
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        })?;
    }

    Ok(catalog)
}
