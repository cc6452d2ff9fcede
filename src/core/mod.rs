/// Implements `as_str`, `Display`, `FromStr` and an `ALL` list for a fieldless
/// enum whose variants map to fixed form values.
macro_rules! form_values {
    ($name:ident, $field:literal { $($variant:ident => $value:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::core::InputError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| $crate::core::InputError::UnknownValue {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

pub mod bands;
pub mod beckham;
pub mod irpf;
pub mod labor;
pub mod lead;
pub mod money;
pub mod quiz;
pub mod residency;
pub mod rules;
pub mod year;

// Flat public surface for domain types and functions.
pub use beckham::{calculate_beckham_comparison, BeckhamInputs, BeckhamResults};
pub use irpf::Region;
pub use labor::{
    calculate_labor_costs, clamp_to_minimum_wage, ContractType, IndustryRisk, LaborCostInputs,
    LaborCostResults, NumberOfPayments, SalaryInputMode,
};
pub use lead::{BeckhamLead, LaborCostLead, LeadPayload, QuizLead, ResidencyLead};
pub use quiz::{calculate_result, calculate_score, get_score_percentage, QuizAnswerSet, ResultTier};
pub use residency::{assess_residency_risk, ResidencyInputs, ResidencyRiskResults, RiskLevel};
pub use rules::RuleSet;
pub use year::TaxYear;

/// One documented column of a calculator input, generated by `#[derive(InputSchema)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Input that could not be turned into a calculator value.
///
/// The calculators themselves never fail; these only arise while parsing
/// command-line flags and batch rows.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown {field} value: '{value}'")]
    UnknownValue { field: &'static str, value: String },
    #[error("number of payments must be 12 or 14, got {0}")]
    InvalidPayments(u8),
    #[error("expected QUESTION=OPTION, got '{0}'")]
    MalformedAnswer(String),
}
