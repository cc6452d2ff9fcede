//! Result subsets handed to the lead-capture workflow.
//!
//! Building a payload never fails and nothing here sends it anywhere.

use super::beckham::BeckhamResults;
use super::labor::LaborCostResults;
use super::quiz::{calculate_score, get_score_percentage, QuizAnswerSet, TierLevel};
use super::residency::{ResidencyRiskResults, RiskLevel};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum LeadPayload {
    Beckham(BeckhamLead),
    LaborCost(LaborCostLead),
    Residency(ResidencyLead),
    Quiz(QuizLead),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeckhamLead {
    pub total_income: Decimal,
    pub annual_savings: Decimal,
    pub savings_percentage: Decimal,
    pub six_year_savings: Decimal,
}

impl From<&BeckhamResults> for BeckhamLead {
    fn from(results: &BeckhamResults) -> Self {
        BeckhamLead {
            total_income: results.total_income,
            annual_savings: results.annual_savings,
            savings_percentage: results.savings_percentage,
            six_year_savings: results.six_year_savings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaborCostLead {
    pub number_of_employees: u32,
    pub gross_annual_salary: Decimal,
    pub team_annual_employer_cost: Decimal,
}

impl From<&LaborCostResults> for LaborCostLead {
    fn from(results: &LaborCostResults) -> Self {
        LaborCostLead {
            number_of_employees: results.team.number_of_employees,
            gross_annual_salary: results.gross_annual_salary,
            team_annual_employer_cost: results.team.total_annual_employer_cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResidencyLead {
    pub score: u32,
    pub risk_level: RiskLevel,
    pub automatic_resident: bool,
}

impl From<&ResidencyRiskResults> for ResidencyLead {
    fn from(results: &ResidencyRiskResults) -> Self {
        ResidencyLead {
            score: results.score,
            risk_level: results.risk_level,
            automatic_resident: results.automatic_resident,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizLead {
    pub score: u32,
    pub score_percentage: u32,
    pub tier: TierLevel,
}

impl QuizLead {
    pub fn new(answers: &QuizAnswerSet, tier: TierLevel) -> Self {
        QuizLead {
            score: calculate_score(answers),
            score_percentage: get_score_percentage(answers),
            tier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::beckham::{calculate_beckham_comparison, BeckhamInputs};
    use crate::core::irpf::Region;
    use crate::core::quiz::calculate_result;
    use rust_decimal_macros::dec;

    #[test]
    fn beckham_lead_carries_savings() {
        let results = calculate_beckham_comparison(&BeckhamInputs {
            gross_annual_salary: dec!(150000),
            additional_income: Decimal::ZERO,
            autonomous_community: Region::Other,
        });
        let lead = BeckhamLead::from(&results);
        assert_eq!(lead.annual_savings, results.annual_savings);
        assert_eq!(lead.savings_percentage, results.savings_percentage);

        let json = serde_json::to_value(LeadPayload::Beckham(lead)).unwrap();
        assert_eq!(json["calculator"], "beckham");
        assert!(json.get("annual_savings").is_some());
    }

    #[test]
    fn quiz_lead_from_answers() {
        let answers: QuizAnswerSet = [("nie".to_string(), "obtained".to_string())]
            .into_iter()
            .collect();
        let lead = QuizLead::new(&answers, calculate_result(&answers).level);
        assert_eq!(lead.score, 5);
        assert_eq!(lead.score_percentage, 17);
        assert_eq!(lead.tier, TierLevel::Low);
    }
}
