//! The full rule set for a tax year, serialised and fingerprinted for audit.

use super::bands::ScoreBand;
use super::irpf::{Bracket, IrpfSchedule, Region};
use super::labor::SocialSecurityRates;
use super::residency::{RiskLevel, RESIDENCY_RISK_BANDS};
use super::year::TaxYear;
use rust_decimal::Decimal;
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Serialize)]
pub struct RegionSchedule {
    pub region: Region,
    pub brackets: &'static [Bracket],
}

#[derive(Debug, Clone, Serialize)]
pub struct BeckhamRules {
    pub flat_rate: Decimal,
    pub excess_rate: Decimal,
    pub threshold: Decimal,
    pub regime_years: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PayrollRules {
    pub minimum_wage_monthly: Decimal,
    pub minimum_wage_annual: Decimal,
    pub max_contribution_base_monthly: Decimal,
    pub personal_minimum: Decimal,
    pub work_expense_reduction: Decimal,
    pub social_security: &'static SocialSecurityRates,
}

/// Every table and constant the calculators use for one year
#[derive(Debug, Clone, Serialize)]
pub struct RuleSet {
    pub year: TaxYear,
    pub irpf: Vec<RegionSchedule>,
    pub beckham: BeckhamRules,
    pub payroll: PayrollRules,
    pub residency_bands: &'static [ScoreBand<RiskLevel>],
}

impl RuleSet {
    pub fn for_year(year: TaxYear) -> Self {
        let rules_year = year.rules_year();
        RuleSet {
            year: rules_year,
            irpf: Region::ALL
                .iter()
                .map(|region| RegionSchedule {
                    region: *region,
                    brackets: IrpfSchedule::for_region(rules_year, *region).brackets,
                })
                .collect(),
            beckham: BeckhamRules {
                flat_rate: year.beckham_flat_rate(),
                excess_rate: year.beckham_excess_rate(),
                threshold: year.beckham_threshold(),
                regime_years: year.beckham_regime_years(),
            },
            payroll: PayrollRules {
                minimum_wage_monthly: year.minimum_wage_monthly(),
                minimum_wage_annual: year.minimum_wage_annual(),
                max_contribution_base_monthly: year.max_contribution_base_monthly(),
                personal_minimum: year.personal_minimum(),
                work_expense_reduction: year.work_expense_reduction(),
                social_security: SocialSecurityRates::for_year(rules_year),
            },
            residency_bands: RESIDENCY_RISK_BANDS.bands(),
        }
    }

    /// Hex SHA-256 of the JSON serialisation.
    ///
    /// Changes whenever any rate, threshold or band changes.
    pub fn digest(&self) -> anyhow::Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable() {
        let a = RuleSet::for_year(TaxYear(2025)).digest().unwrap();
        let b = RuleSet::for_year(TaxYear(2025)).digest().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn digest_changes_with_rules() {
        let current = RuleSet::for_year(TaxYear(2025));
        let mut changed = current.clone();
        changed.beckham.threshold = Decimal::from(700000);
        assert_ne!(current.digest().unwrap(), changed.digest().unwrap());
    }

    #[test]
    fn covers_every_region() {
        let rules = RuleSet::for_year(TaxYear(2025));
        assert_eq!(rules.irpf.len(), Region::ALL.len());
        assert!(rules.irpf.iter().all(|s| !s.brackets.is_empty()));
    }
}
