use super::domain::{AdoptionRequest, Pet, Shelter, Tutor};
use super::repository::ShelterNotice;

pub const REQUESTED_SUBJECT: &str = "Adoption requested";
pub const APPROVED_SUBJECT: &str = "Adoption approved";
pub const REJECTED_SUBJECT: &str = "Adoption rejected";

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

pub(crate) fn requested(
    shelter: &Shelter,
    pet: &Pet,
    tutor: &Tutor,
    reason: &str,
) -> ShelterNotice {
    ShelterNotice {
        to: shelter.email.clone(),
        subject: REQUESTED_SUBJECT.to_string(),
        body: format!(
            "Hello {}!\n\n{} submitted an adoption request today for the pet {}.\nReason given: {}\nPlease review it for approval or rejection.",
            shelter.name, tutor.name, pet.name, reason
        ),
    }
}

pub(crate) fn approved(
    shelter: &Shelter,
    pet: &Pet,
    tutor: &Tutor,
    request: &AdoptionRequest,
) -> ShelterNotice {
    ShelterNotice {
        to: shelter.email.clone(),
        subject: APPROVED_SUBJECT.to_string(),
        body: format!(
            "Congratulations {}!\n\nYour adoption of the pet {}, requested on {}, has been approved.\nPlease contact the shelter {} to schedule the pickup.",
            tutor.name,
            pet.name,
            format_requested_at(request),
            shelter.name
        ),
    }
}

pub(crate) fn rejected(
    shelter: &Shelter,
    pet: &Pet,
    tutor: &Tutor,
    request: &AdoptionRequest,
    justification: &str,
) -> ShelterNotice {
    ShelterNotice {
        to: shelter.email.clone(),
        subject: REJECTED_SUBJECT.to_string(),
        body: format!(
            "Hello {}!\n\nUnfortunately your adoption of the pet {}, requested on {}, was rejected by the shelter {} with the following justification: {}",
            tutor.name,
            pet.name,
            format_requested_at(request),
            shelter.name,
            justification
        ),
    }
}

pub fn format_requested_at(request: &AdoptionRequest) -> String {
    request.requested_at().format(DATE_FORMAT).to_string()
}
