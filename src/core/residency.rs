//! Likelihood of being treated as a Spanish tax resident.
//!
//! Each answer adds a fixed weight when it points at a life centred in Spain.
//! Spending more than 183 days in Spain is sufficient on its own, so it forces
//! the high risk level whatever the rest of the score.

use super::bands::{BandTable, ScoreBand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use spaintax_derive::InputSchema;

/// Days after which residency follows from presence alone
pub const AUTOMATIC_RESIDENCY_DAYS: u16 = 183;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IncomeLocation {
    Spain,
    #[default]
    Abroad,
    Mixed,
}

form_values!(IncomeLocation, "income location" {
    Spain => "spain",
    Abroad => "abroad",
    Mixed => "mixed",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HomeStatus {
    Yes,
    #[default]
    No,
    Rented,
}

form_values!(HomeStatus, "permanent home" {
    Yes => "yes",
    No => "no",
    Rented => "rented",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FamilyLocation {
    Spain,
    Abroad,
    #[default]
    Na,
}

form_values!(FamilyLocation, "family location" {
    Spain => "spain",
    Abroad => "abroad",
    Na => "na",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EmployerLocation {
    Spain,
    #[default]
    Abroad,
}

form_values!(EmployerLocation, "employer location" {
    Spain => "spain",
    Abroad => "abroad",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

form_values!(YesNo, "yes/no answer" {
    Yes => "yes",
    No => "no",
});

/// Answers to the residency questionnaire
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, InputSchema,
)]
pub struct ResidencyInputs {
    /// Days spent in Spain during the calendar year (0-365)
    pub days_in_spain: u16,
    /// Where most income is earned (spain, abroad, mixed)
    #[serde(default)]
    pub primary_income_location: IncomeLocation,
    /// Owns (yes) or rents (rented) a permanent home in Spain
    #[serde(default)]
    pub permanent_home_spain: HomeStatus,
    /// Where the spouse lives (spain, abroad, na)
    #[serde(default)]
    pub spouse_location: FamilyLocation,
    /// Where dependent children live (spain, abroad, na)
    #[serde(default)]
    pub children_location: FamilyLocation,
    /// Where the employer is based (spain, abroad)
    #[serde(default)]
    pub employer_location: EmployerLocation,
    /// Main bank accounts held in Spain (yes, no)
    #[serde(default)]
    pub primary_bank_accounts: YesNo,
    /// Registered on a municipal padrón (yes, no)
    #[serde(default)]
    pub registered_padron: YesNo,
    /// Contributing to Spanish Social Security (yes, no)
    #[serde(default)]
    pub spanish_social_security: YesNo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Question an explanation refers to, in questionnaire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResidencyFactor {
    DaysInSpain,
    IncomeLocation,
    PermanentHome,
    Spouse,
    Children,
    Employer,
    BankAccounts,
    Padron,
    SocialSecurity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributingFactor {
    pub factor: ResidencyFactor,
    pub points: u32,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResidencyRiskResults {
    pub score: u32,
    pub risk_level: RiskLevel,
    pub automatic_resident: bool,
    pub contributing_factors: Vec<ContributingFactor>,
}

/// Highest attainable score
pub const MAX_RESIDENCY_SCORE: u32 = 108;

pub static RESIDENCY_RISK_BANDS: BandTable<RiskLevel> = BandTable(&[
    ScoreBand {
        min: 0,
        max: 24,
        value: RiskLevel::Low,
    },
    ScoreBand {
        min: 25,
        max: 49,
        value: RiskLevel::Medium,
    },
    ScoreBand {
        min: 50,
        max: MAX_RESIDENCY_SCORE,
        value: RiskLevel::High,
    },
]);

fn days_weight(days: u16) -> Option<(u32, &'static str)> {
    match days {
        d if d > AUTOMATIC_RESIDENCY_DAYS => Some((
            40,
            "More than 183 days in Spain makes you tax resident regardless of other ties",
        )),
        150..=AUTOMATIC_RESIDENCY_DAYS => Some((
            20,
            "Close to the 183-day limit; sporadic absences can be counted as days in Spain",
        )),
        90..=149 => Some((10, "A substantial part of the year is spent in Spain")),
        _ => None,
    }
}

/// Score every answer and classify the risk.
pub fn assess_residency_risk(inputs: &ResidencyInputs) -> ResidencyRiskResults {
    let automatic_resident = inputs.days_in_spain > AUTOMATIC_RESIDENCY_DAYS;

    let weights: [(ResidencyFactor, Option<(u32, &'static str)>); 9] = [
        (ResidencyFactor::DaysInSpain, days_weight(inputs.days_in_spain)),
        (
            ResidencyFactor::IncomeLocation,
            match inputs.primary_income_location {
                IncomeLocation::Spain => Some((
                    15,
                    "Your main source of income is in Spain (centre of economic interests)",
                )),
                IncomeLocation::Mixed => Some((8, "Part of your income is earned in Spain")),
                IncomeLocation::Abroad => None,
            },
        ),
        (
            ResidencyFactor::PermanentHome,
            match inputs.permanent_home_spain {
                HomeStatus::Yes => Some((10, "You own a permanent home in Spain")),
                HomeStatus::Rented => Some((6, "You rent a long-term home in Spain")),
                HomeStatus::No => None,
            },
        ),
        (
            ResidencyFactor::Spouse,
            (inputs.spouse_location == FamilyLocation::Spain).then_some((
                10,
                "Your spouse lives in Spain, which creates a presumption of residency",
            )),
        ),
        (
            ResidencyFactor::Children,
            (inputs.children_location == FamilyLocation::Spain).then_some((
                10,
                "Your dependent children live in Spain, which creates a presumption of residency",
            )),
        ),
        (
            ResidencyFactor::Employer,
            (inputs.employer_location == EmployerLocation::Spain)
                .then_some((8, "Your employer is based in Spain")),
        ),
        (
            ResidencyFactor::BankAccounts,
            (inputs.primary_bank_accounts == YesNo::Yes)
                .then_some((5, "Your main bank accounts are in Spain")),
        ),
        (
            ResidencyFactor::Padron,
            (inputs.registered_padron == YesNo::Yes)
                .then_some((5, "You are registered on a Spanish municipal padrón")),
        ),
        (
            ResidencyFactor::SocialSecurity,
            (inputs.spanish_social_security == YesNo::Yes)
                .then_some((5, "You contribute to Spanish Social Security")),
        ),
    ];

    let contributing_factors: Vec<ContributingFactor> = weights
        .into_iter()
        .filter_map(|(factor, weight)| {
            weight.map(|(points, explanation)| ContributingFactor {
                factor,
                points,
                explanation,
            })
        })
        .collect();

    let score = contributing_factors.iter().map(|f| f.points).sum();

    let risk_level = if automatic_resident {
        RiskLevel::High
    } else {
        RESIDENCY_RISK_BANDS.lookup(score).copied().unwrap_or_else(|| {
            log::warn!("Residency score {} outside risk bands", score);
            RiskLevel::High
        })
    };

    log::debug!(
        "Residency: {} days, score {}, risk {}",
        inputs.days_in_spain,
        score,
        risk_level
    );

    ResidencyRiskResults {
        score,
        risk_level,
        automatic_resident,
        contributing_factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn everything_in_spain(days: u16) -> ResidencyInputs {
        ResidencyInputs {
            days_in_spain: days,
            primary_income_location: IncomeLocation::Spain,
            permanent_home_spain: HomeStatus::Yes,
            spouse_location: FamilyLocation::Spain,
            children_location: FamilyLocation::Spain,
            employer_location: EmployerLocation::Spain,
            primary_bank_accounts: YesNo::Yes,
            registered_padron: YesNo::Yes,
            spanish_social_security: YesNo::Yes,
        }
    }

    fn nothing_in_spain(days: u16) -> ResidencyInputs {
        ResidencyInputs {
            days_in_spain: days,
            primary_income_location: IncomeLocation::Abroad,
            permanent_home_spain: HomeStatus::No,
            spouse_location: FamilyLocation::Abroad,
            children_location: FamilyLocation::Na,
            employer_location: EmployerLocation::Abroad,
            primary_bank_accounts: YesNo::No,
            registered_padron: YesNo::No,
            spanish_social_security: YesNo::No,
        }
    }

    #[test]
    fn risk_bands_cover_every_score() {
        assert_eq!(RESIDENCY_RISK_BANDS.validate(MAX_RESIDENCY_SCORE), Ok(()));
    }

    #[test]
    fn maximum_score_is_attainable() {
        let results = assess_residency_risk(&everything_in_spain(365));
        assert_eq!(results.score, MAX_RESIDENCY_SCORE);
        assert_eq!(results.contributing_factors.len(), 9);
    }

    #[test]
    fn day_count_overrides_other_factors() {
        let results = assess_residency_risk(&nothing_in_spain(200));
        assert!(results.automatic_resident);
        assert_eq!(results.risk_level, RiskLevel::High);
        assert_eq!(results.score, 40);
        assert_eq!(results.contributing_factors.len(), 1);
        assert_eq!(
            results.contributing_factors[0].factor,
            ResidencyFactor::DaysInSpain
        );
    }

    #[test]
    fn exactly_183_days_is_not_automatic() {
        let results = assess_residency_risk(&nothing_in_spain(183));
        assert!(!results.automatic_resident);
        assert_eq!(results.score, 20);
        assert_eq!(results.risk_level, RiskLevel::Low);

        let results = assess_residency_risk(&nothing_in_spain(184));
        assert!(results.automatic_resident);
    }

    #[test]
    fn no_ties_is_low_risk() {
        let results = assess_residency_risk(&nothing_in_spain(30));
        assert_eq!(results.score, 0);
        assert_eq!(results.risk_level, RiskLevel::Low);
        assert!(results.contributing_factors.is_empty());
    }

    #[test]
    fn ties_without_presence_raise_risk() {
        let results = assess_residency_risk(&everything_in_spain(60));
        assert!(!results.automatic_resident);
        assert_eq!(results.score, 68);
        assert_eq!(results.risk_level, RiskLevel::High);

        let results = assess_residency_risk(&ResidencyInputs {
            spouse_location: FamilyLocation::Spain,
            permanent_home_spain: HomeStatus::Rented,
            registered_padron: YesNo::Yes,
            ..nothing_in_spain(100)
        });
        assert_eq!(results.score, 10 + 6 + 10 + 5);
        assert_eq!(results.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn factors_follow_question_order() {
        let results = assess_residency_risk(&everything_in_spain(170));
        let order: Vec<_> = results.contributing_factors.iter().map(|f| f.factor).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
        assert!(results.contributing_factors.iter().all(|f| f.points > 0));
    }

    #[test]
    fn mixed_income_and_rented_home_weights() {
        let results = assess_residency_risk(&ResidencyInputs {
            primary_income_location: IncomeLocation::Mixed,
            ..nothing_in_spain(0)
        });
        assert_eq!(results.score, 8);
    }

    #[test]
    fn repeated_calls_are_equal() {
        let inputs = everything_in_spain(120);
        assert_eq!(
            assess_residency_risk(&inputs),
            assess_residency_risk(&inputs.clone())
        );
    }

    #[test]
    fn answers_parse_from_form_values() {
        assert_eq!("rented".parse::<HomeStatus>(), Ok(HomeStatus::Rented));
        assert_eq!("NA".parse::<FamilyLocation>(), Ok(FamilyLocation::Na));
        assert!("maybe".parse::<YesNo>().is_err());
    }
}
