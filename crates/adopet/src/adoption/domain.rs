use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for pets listed by a shelter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PetId(pub String);

/// Identifier wrapper for registered caretakers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TutorId(pub String);

/// Identifier wrapper for shelters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShelterId(pub String);

/// Identifier wrapper for adoption requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    pub const fn label(self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
        }
    }
}

/// Pet listed for adoption by a shelter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub species: Species,
    pub name: String,
    pub breed: String,
    pub age: u8,
    pub color: String,
    pub weight_kg: f32,
    pub adopted: bool,
    pub shelter_id: ShelterId,
}

/// Individual requesting to adopt a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutor {
    pub id: TutorId,
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Organization owning pets pending adoption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelter {
    pub id: ShelterId,
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Inbound request to adopt a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionSubmission {
    pub pet_id: PetId,
    pub tutor_id: TutorId,
    pub reason: String,
}

/// Inbound approval of a request awaiting review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionApproval {
    pub request_id: RequestId,
}

/// Inbound rejection of a request awaiting review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionRejection {
    pub request_id: RequestId,
    pub justification: String,
}

/// Status tracked throughout the adoption request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionStatus {
    AwaitingReview,
    Approved,
    Rejected,
}

impl AdoptionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AdoptionStatus::AwaitingReview => "awaiting_review",
            AdoptionStatus::Approved => "approved",
            AdoptionStatus::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, AdoptionStatus::Approved | AdoptionStatus::Rejected)
    }
}

/// One caretaker's intent to adopt one pet, tracked from review to a final outcome.
///
/// Pet and tutor references are fixed at creation. Status and justification only change
/// through the transitions in [`super::lifecycle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdoptionRequest {
    pub(crate) id: RequestId,
    pub(crate) pet_id: PetId,
    pub(crate) tutor_id: TutorId,
    pub(crate) reason: String,
    pub(crate) requested_at: DateTime<Utc>,
    pub(crate) status: AdoptionStatus,
    pub(crate) justification: Option<String>,
}

impl AdoptionRequest {
    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub fn pet_id(&self) -> &PetId {
        &self.pet_id
    }

    pub fn tutor_id(&self) -> &TutorId {
        &self.tutor_id
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    pub fn status(&self) -> AdoptionStatus {
        self.status
    }

    pub fn justification(&self) -> Option<&str> {
        self.justification.as_deref()
    }

    pub fn view(&self) -> AdoptionRequestView {
        AdoptionRequestView {
            request_id: self.id.clone(),
            pet_id: self.pet_id.clone(),
            tutor_id: self.tutor_id.clone(),
            status: self.status.label(),
            requested_at: self.requested_at,
            justification: self.justification.clone(),
        }
    }
}

/// Serialized representation of a request exposed to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct AdoptionRequestView {
    pub request_id: RequestId,
    pub pet_id: PetId,
    pub tutor_id: TutorId,
    pub status: &'static str,
    pub requested_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}
