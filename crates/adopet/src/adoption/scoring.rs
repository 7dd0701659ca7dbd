use serde::{Deserialize, Serialize};

use super::domain::{Pet, PetId, Species};

const BASE_SCORE: i16 = 10;

/// Likelihood of a pet being adopted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdoptabilityTier {
    High,
    Medium,
    Low,
}

impl AdoptabilityTier {
    pub const fn label(self) -> &'static str {
        match self {
            AdoptabilityTier::High => "HIGH",
            AdoptabilityTier::Medium => "MEDIUM",
            AdoptabilityTier::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Age,
    Weight,
}

/// Discrete penalty applied to the base score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    pub factor: ScoreFactor,
    pub score: i16,
    pub notes: String,
}

/// Scoring output describing the final score and how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptabilityAssessment {
    pub pet_id: PetId,
    pub score: i16,
    pub tier: AdoptabilityTier,
    pub adjustments: Vec<ScoreAdjustment>,
}

/// Deterministic adoptability rule driven by age and weight.
///
/// Age thresholds are inclusive and mutually exclusive: only the senior penalty applies once
/// a pet reaches `senior_age`. Weight thresholds are exclusive, so a pet exactly at the limit
/// is not penalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub mature_age: u8,
    pub mature_penalty: i16,
    pub senior_age: u8,
    pub senior_penalty: i16,
    pub dog_weight_limit_kg: f32,
    pub cat_weight_limit_kg: f32,
    pub weight_penalty: i16,
    pub high_threshold: i16,
    pub medium_threshold: i16,
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self {
            mature_age: 10,
            mature_penalty: 4,
            senior_age: 15,
            senior_penalty: 5,
            dog_weight_limit_kg: 15.0,
            cat_weight_limit_kg: 10.0,
            weight_penalty: 2,
            high_threshold: 8,
            medium_threshold: 5,
        }
    }
}

impl ScoringRule {
    pub fn tier(&self, pet: &Pet) -> AdoptabilityTier {
        self.assess(pet).tier
    }

    pub fn assess(&self, pet: &Pet) -> AdoptabilityAssessment {
        let mut adjustments = Vec::new();

        if pet.age >= self.senior_age {
            adjustments.push(ScoreAdjustment {
                factor: ScoreFactor::Age,
                score: -self.senior_penalty,
                notes: format!("age {} at or above senior band {}", pet.age, self.senior_age),
            });
        } else if pet.age >= self.mature_age {
            adjustments.push(ScoreAdjustment {
                factor: ScoreFactor::Age,
                score: -self.mature_penalty,
                notes: format!("age {} at or above mature band {}", pet.age, self.mature_age),
            });
        }

        let weight_limit = match pet.species {
            Species::Dog => self.dog_weight_limit_kg,
            Species::Cat => self.cat_weight_limit_kg,
        };
        if pet.weight_kg > weight_limit {
            adjustments.push(ScoreAdjustment {
                factor: ScoreFactor::Weight,
                score: -self.weight_penalty,
                notes: format!(
                    "{} weighing {:.1} kg exceeds {:.1} kg",
                    pet.species.label(),
                    pet.weight_kg,
                    weight_limit
                ),
            });
        }

        let score = BASE_SCORE + adjustments.iter().map(|adj| adj.score).sum::<i16>();

        AdoptabilityAssessment {
            pet_id: pet.id.clone(),
            score,
            tier: self.tier_for(score),
            adjustments,
        }
    }

    fn tier_for(&self, score: i16) -> AdoptabilityTier {
        if score >= self.high_threshold {
            AdoptabilityTier::High
        } else if score >= self.medium_threshold {
            AdoptabilityTier::Medium
        } else {
            AdoptabilityTier::Low
        }
    }
}
