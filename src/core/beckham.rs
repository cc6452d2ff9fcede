//! Progressive IRPF versus the flat impatriate (Beckham) regime.

use super::irpf::{BracketSlice, IrpfSchedule, Region};
use super::money::{percentage, round_cents};
use super::year::TaxYear;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use spaintax_derive::InputSchema;

/// One taxpayer-year scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, InputSchema)]
pub struct BeckhamInputs {
    /// Gross annual employment income in euros
    #[schemars(with = "f64")]
    pub gross_annual_salary: Decimal,
    /// Other annual income in euros (rentals, dividends, bonuses)
    #[serde(default)]
    #[schemars(with = "f64")]
    pub additional_income: Decimal,
    /// Autonomous community of residence (madrid, catalonia, andalusia, valencia, balearic-islands, canary-islands, other)
    #[serde(default)]
    pub autonomous_community: Region,
}

/// Side-by-side comparison of the two regimes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeckhamResults {
    pub tax_year: TaxYear,
    pub total_income: Decimal,
    pub standard_irpf: Decimal,
    /// Percentage 0-100
    pub standard_effective_rate: Decimal,
    pub standard_net_salary: Decimal,
    pub beckham_tax: Decimal,
    /// Percentage 0-100
    pub beckham_effective_rate: Decimal,
    pub beckham_net_salary: Decimal,
    /// Negative when the flat regime costs more
    pub annual_savings: Decimal,
    /// Savings as a percentage of the standard IRPF
    pub savings_percentage: Decimal,
    /// Annual savings over the maximum duration of the regime
    pub six_year_savings: Decimal,
    pub exceeds_threshold: bool,
    pub irpf_breakdown: Vec<BracketSlice>,
}

/// Compare both regimes using the latest published tables.
pub fn calculate_beckham_comparison(inputs: &BeckhamInputs) -> BeckhamResults {
    calculate_beckham_comparison_for_year(inputs, TaxYear::LATEST_RULES)
}

/// Compare both regimes under the rules of `year`.
///
/// Inputs are assumed validated (non-negative amounts); the function never
/// fails and rates fall back to zero when there is no income.
pub fn calculate_beckham_comparison_for_year(
    inputs: &BeckhamInputs,
    year: TaxYear,
) -> BeckhamResults {
    let total_income = inputs.gross_annual_salary + inputs.additional_income;

    let schedule = IrpfSchedule::for_region(year, inputs.autonomous_community);
    let irpf_breakdown = schedule.apply(total_income);
    let standard_irpf: Decimal = irpf_breakdown.iter().map(|s| s.tax).sum();

    let threshold = year.beckham_threshold();
    let exceeds_threshold = total_income > threshold;
    let beckham_tax = if exceeds_threshold {
        round_cents(
            threshold * year.beckham_flat_rate()
                + (total_income - threshold) * year.beckham_excess_rate(),
        )
    } else {
        round_cents(total_income * year.beckham_flat_rate())
    };

    let annual_savings = standard_irpf - beckham_tax;

    log::debug!(
        "Beckham {}: income {}, IRPF {}, flat {}, savings {}",
        inputs.autonomous_community,
        total_income,
        standard_irpf,
        beckham_tax,
        annual_savings
    );

    BeckhamResults {
        tax_year: schedule.year,
        total_income,
        standard_irpf,
        standard_effective_rate: percentage(standard_irpf, total_income),
        standard_net_salary: total_income - standard_irpf,
        beckham_tax,
        beckham_effective_rate: percentage(beckham_tax, total_income),
        beckham_net_salary: total_income - beckham_tax,
        annual_savings,
        savings_percentage: percentage(annual_savings, standard_irpf),
        six_year_savings: annual_savings * year.beckham_regime_years(),
        exceeds_threshold,
        irpf_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn inputs(salary: Decimal) -> BeckhamInputs {
        BeckhamInputs {
            gross_annual_salary: salary,
            additional_income: Decimal::ZERO,
            autonomous_community: Region::Other,
        }
    }

    #[test]
    fn zero_income_has_zero_rates() {
        let results = calculate_beckham_comparison(&inputs(Decimal::ZERO));
        assert_eq!(results.standard_irpf, Decimal::ZERO);
        assert_eq!(results.beckham_tax, Decimal::ZERO);
        assert_eq!(results.standard_effective_rate, Decimal::ZERO);
        assert_eq!(results.beckham_effective_rate, Decimal::ZERO);
        assert_eq!(results.savings_percentage, Decimal::ZERO);
        assert!(results.irpf_breakdown.is_empty());
        assert!(!results.exceeds_threshold);
    }

    #[test]
    fn additional_income_is_added() {
        let results = calculate_beckham_comparison(&BeckhamInputs {
            gross_annual_salary: dec!(50000),
            additional_income: dec!(10000),
            autonomous_community: Region::Madrid,
        });
        assert_eq!(results.total_income, dec!(60000));
    }

    #[test]
    fn breakdown_covers_income_and_tax() {
        for region in Region::ALL {
            for income in [dec!(9999.99), dec!(35200), dec!(123456.78), dec!(2500000)] {
                let results = calculate_beckham_comparison(&BeckhamInputs {
                    gross_annual_salary: income,
                    additional_income: Decimal::ZERO,
                    autonomous_community: *region,
                });
                let taxable: Decimal = results.irpf_breakdown.iter().map(|s| s.taxable).sum();
                let tax: Decimal = results.irpf_breakdown.iter().map(|s| s.tax).sum();
                assert_eq!(taxable, results.total_income);
                assert_eq!(tax, results.standard_irpf);
            }
        }
    }

    #[test]
    fn threshold_exactly_uses_flat_rate() {
        let results = calculate_beckham_comparison(&inputs(dec!(600000)));
        assert!(!results.exceeds_threshold);
        assert_eq!(results.beckham_tax, dec!(144000));
    }

    #[test]
    fn one_euro_over_threshold_uses_excess_rate() {
        let results = calculate_beckham_comparison(&inputs(dec!(600001)));
        assert!(results.exceeds_threshold);
        assert_eq!(results.beckham_tax, dec!(144000.47));
    }

    #[test]
    fn savings_match_closed_form() {
        for income in [dec!(20000), dec!(60000), dec!(150000), dec!(400000), dec!(700000)] {
            let results = calculate_beckham_comparison(&inputs(income));
            assert_eq!(
                results.annual_savings,
                results.standard_irpf - results.beckham_tax
            );
            assert_eq!(results.six_year_savings, results.annual_savings * dec!(6));
            assert_eq!(
                results.standard_net_salary,
                results.total_income - results.standard_irpf
            );
            assert_eq!(
                results.beckham_net_salary,
                results.total_income - results.beckham_tax
            );
        }
    }

    #[test]
    fn low_income_loses_under_flat_rate() {
        // 20000: 12450*0.19 + 7550*0.24 = 2365.50 + 1812 = 4177.50; flat = 4800
        let results = calculate_beckham_comparison(&inputs(dec!(20000)));
        assert_eq!(results.standard_irpf, dec!(4177.50));
        assert_eq!(results.beckham_tax, dec!(4800));
        assert_eq!(results.annual_savings, dec!(-622.50));
        assert!(results.savings_percentage < Decimal::ZERO);
    }

    #[test]
    fn high_income_saves_under_flat_rate() {
        let results = calculate_beckham_comparison(&inputs(dec!(150000)));
        // 2365.50 + 1860 + 4500 + 9176 + 90000*0.45
        assert_eq!(results.standard_irpf, dec!(58401.50));
        assert_eq!(results.beckham_tax, dec!(36000));
        assert_eq!(results.annual_savings, dec!(22401.50));
        assert_eq!(results.savings_percentage, dec!(38.36));
        assert_eq!(results.standard_effective_rate, dec!(38.93));
        assert_eq!(results.beckham_effective_rate, dec!(24));
    }

    #[test]
    fn standard_irpf_is_monotonic_in_salary() {
        for region in Region::ALL {
            let mut previous = Decimal::ZERO;
            let mut salary = Decimal::ZERO;
            while salary <= dec!(1000000) {
                let results = calculate_beckham_comparison(&BeckhamInputs {
                    gross_annual_salary: salary,
                    additional_income: dec!(1500),
                    autonomous_community: *region,
                });
                assert!(results.standard_irpf >= previous, "{region} at {salary}");
                previous = results.standard_irpf;
                salary += dec!(2499.99);
            }
        }
    }

    #[test]
    fn regional_scales_differ() {
        let madrid = calculate_beckham_comparison(&BeckhamInputs {
            gross_annual_salary: dec!(400000),
            additional_income: Decimal::ZERO,
            autonomous_community: Region::Madrid,
        });
        let catalonia = calculate_beckham_comparison(&BeckhamInputs {
            gross_annual_salary: dec!(400000),
            additional_income: Decimal::ZERO,
            autonomous_community: Region::Catalonia,
        });
        assert!(madrid.standard_irpf < catalonia.standard_irpf);
        assert_eq!(madrid.beckham_tax, catalonia.beckham_tax);
    }

    #[test]
    fn repeated_calls_are_equal() {
        let inputs = BeckhamInputs {
            gross_annual_salary: dec!(87654.32),
            additional_income: dec!(1234.56),
            autonomous_community: Region::Valencia,
        };
        assert_eq!(
            calculate_beckham_comparison(&inputs),
            calculate_beckham_comparison(&inputs.clone())
        );
    }

    #[test]
    fn later_years_use_latest_tables() {
        let results = calculate_beckham_comparison_for_year(&inputs(dec!(60000)), TaxYear(2027));
        assert_eq!(results.tax_year, TaxYear(2025));
    }
}
