use crate::infra::{seed_catalog, TracingNotifier};
use adopet::adoption::notices::format_requested_at;
use adopet::adoption::{
    AdoptionApproval, AdoptionError, AdoptionPolicy, AdoptionRejection, AdoptionRequest,
    AdoptionService, AdoptionSubmission, Pet, PetId, ScoringRule, ShelterId, Species, TutorId,
};
use adopet::error::AppError;
use chrono::Local;
use clap::Args;
use std::sync::Arc;

const DEMO_SENDER: &str = "adopet@email.com.br";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Approved adoptions a tutor may hold before new submissions are refused.
    #[arg(long)]
    pub(crate) adoption_limit: Option<usize>,
    /// Leave approved pets listed as available.
    #[arg(long)]
    pub(crate) keep_pets_listed: bool,
    /// Print request payloads as JSON instead of one-line summaries.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Species of the pet (dog or cat)
    #[arg(long, value_parser = parse_species)]
    pub(crate) species: Species,
    /// Age in whole years
    #[arg(long)]
    pub(crate) age: u8,
    /// Weight in kilograms
    #[arg(long)]
    pub(crate) weight: f32,
    /// Name used in the output
    #[arg(long, default_value = "pet")]
    pub(crate) name: String,
}

pub(crate) fn parse_species(raw: &str) -> Result<Species, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "dog" | "cachorro" => Ok(Species::Dog),
        "cat" | "gato" => Ok(Species::Cat),
        other => Err(format!("unknown species '{other}' (expected dog or cat)")),
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    if !args.weight.is_finite() || args.weight < 0.0 {
        let err = AdoptionError::InvalidInput("weight must be a non-negative number".into());
        return Err(err.into());
    }

    let pet = Pet {
        id: PetId("cli".to_string()),
        species: args.species,
        name: args.name,
        breed: String::new(),
        age: args.age,
        color: String::new(),
        weight_kg: args.weight,
        adopted: false,
        shelter_id: ShelterId(String::new()),
    };
    let assessment = ScoringRule::default().assess(&pet);

    println!(
        "{} ({}, {} years, {:.1} kg): score {} -> {}",
        pet.name,
        pet.species.label(),
        pet.age,
        pet.weight_kg,
        assessment.score,
        assessment.tier.label()
    );
    for adjustment in &assessment.adjustments {
        println!(
            "  - {:?}: {} ({})",
            adjustment.factor, adjustment.score, adjustment.notes
        );
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        adoption_limit,
        keep_pets_listed,
        json,
    } = args;

    let mut policy = AdoptionPolicy::default();
    if let Some(limit) = adoption_limit {
        policy.adoption_limit = limit;
    }
    policy.mark_pet_adopted_on_approval = !keep_pets_listed;

    let catalog = seed_catalog().map_err(AdoptionError::from)?;
    let notifier = Arc::new(TracingNotifier::new(DEMO_SENDER));
    let service = AdoptionService::new(catalog.stores(), notifier.clone(), policy);

    println!("Adopet demo ({})", Local::now().format("%d/%m/%Y %H:%M"));
    print_available(&service)?;

    println!("\nSubmissions");
    let maria_thor = service.submit(submission(
        "pet-thor",
        "tutor-maria",
        "Casa com quintal grande",
    ))?;
    print_request("Maria asks for Thor", &maria_thor, json);

    report_refusal(
        "Carlos asks for Thor",
        service.submit(submission("pet-thor", "tutor-carlos", "Quero um companheiro")),
    );

    let carlos_luna = service.submit(submission(
        "pet-luna",
        "tutor-carlos",
        "Apartamento tranquilo",
    ))?;
    print_request("Carlos asks for Luna", &carlos_luna, json);

    report_refusal(
        "Carlos asks for Mia while Luna is pending",
        service.submit(submission("pet-mia", "tutor-carlos", "Gosto de gatos")),
    );

    println!("\nReview");
    let approved = service.approve(AdoptionApproval {
        request_id: maria_thor.id().clone(),
    })?;
    print_request("Shelter approves Maria", &approved, json);

    let rejected = service.reject(AdoptionRejection {
        request_id: carlos_luna.id().clone(),
        justification: "Luna precisa de acompanhamento veterinário diário".to_string(),
    })?;
    print_request("Shelter rejects Carlos", &rejected, json);

    report_refusal(
        "Shelter tries to approve Carlos afterwards",
        service.approve(AdoptionApproval {
            request_id: carlos_luna.id().clone(),
        }),
    );

    println!("\nShelter notices sent from {DEMO_SENDER}");
    for notice in notifier.sent() {
        println!("- [{}] to {}", notice.subject, notice.to);
        for line in notice.body.lines().filter(|line| !line.is_empty()) {
            println!("    {line}");
        }
    }

    print_available(&service)?;
    Ok(())
}

fn submission(pet: &str, tutor: &str, reason: &str) -> AdoptionSubmission {
    AdoptionSubmission {
        pet_id: PetId(pet.to_string()),
        tutor_id: TutorId(tutor.to_string()),
        reason: reason.to_string(),
    }
}

fn print_available(service: &AdoptionService) -> Result<(), AppError> {
    println!("\nAvailable pets");
    for entry in service.available_pets()? {
        println!(
            "- {} ({}, {} years, {:.1} kg) -> {}",
            entry.pet.name,
            entry.pet.species.label(),
            entry.pet.age,
            entry.pet.weight_kg,
            entry.tier.label()
        );
    }
    Ok(())
}

fn print_request(label: &str, request: &AdoptionRequest, json: bool) {
    if json {
        match serde_json::to_string_pretty(&request.view()) {
            Ok(payload) => println!("- {label}:\n{payload}"),
            Err(err) => println!("- {label}: payload unavailable ({err})"),
        }
        return;
    }

    let justification = request
        .justification()
        .map(|text| format!(" | justification: {text}"))
        .unwrap_or_default();
    println!(
        "- {label}: {} -> {} (requested {}){justification}",
        request.id().0,
        request.status().label(),
        format_requested_at(request)
    );
}

fn report_refusal(label: &str, outcome: Result<AdoptionRequest, AdoptionError>) {
    match outcome {
        Ok(request) => println!("- {label}: unexpectedly accepted as {}", request.id().0),
        Err(err) => println!("- {label}: refused ({err})"),
    }
}
