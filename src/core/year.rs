use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Spanish tax year (IRPF runs 1 January to 31 December)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Most recent year with published rate tables
    pub const LATEST_RULES: TaxYear = TaxYear(2025);

    /// Create a tax year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        TaxYear(date.year())
    }

    /// Tax year of today's local date
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Year whose IRPF and Social Security tables apply to this year.
    ///
    /// Only the 2025 tables are carried, so every year maps onto them.
    pub fn rules_year(&self) -> TaxYear {
        Self::LATEST_RULES
    }

    /// Whether this year has its own rate tables (no fallback)
    pub fn has_own_rules(&self) -> bool {
        self.rules_year() == *self
    }

    /// Display as "2025"
    pub fn display(&self) -> String {
        self.0.to_string()
    }

    /// Flat Beckham rate on income up to the threshold
    pub fn beckham_flat_rate(&self) -> Decimal {
        // Unchanged since the 2015 reform of the impatriate regime
        dec!(0.24)
    }

    /// Beckham rate on the excess above the threshold
    pub fn beckham_excess_rate(&self) -> Decimal {
        match self.0 {
            2016.. => dec!(0.47),
            // 2015 transitional rate
            _ => dec!(0.45),
        }
    }

    /// Income above which the Beckham excess rate applies
    pub fn beckham_threshold(&self) -> Decimal {
        dec!(600000)
    }

    /// Number of tax years the regime can be claimed (year of arrival plus five)
    pub fn beckham_regime_years(&self) -> Decimal {
        dec!(6)
    }

    /// Statutory minimum wage (SMI) per payment, based on 14 payments
    pub fn minimum_wage_monthly(&self) -> Decimal {
        match self.0 {
            2025.. => dec!(1184),
            2024 => dec!(1134),
            2023 => dec!(1080),
            _ => dec!(1000),
        }
    }

    /// Statutory minimum wage (SMI) per year
    pub fn minimum_wage_annual(&self) -> Decimal {
        self.minimum_wage_monthly() * dec!(14)
    }

    /// Maximum monthly Social Security contribution base
    pub fn max_contribution_base_monthly(&self) -> Decimal {
        match self.0 {
            2025.. => dec!(4909.50),
            2024 => dec!(4720.50),
            2023 => dec!(4495.50),
            _ => dec!(4139.40),
        }
    }

    /// Personal and family minimum for a single taxpayer without dependants
    pub fn personal_minimum(&self) -> Decimal {
        dec!(5550)
    }

    /// Fixed reduction on net employment income for general expenses
    pub fn work_expense_reduction(&self) -> Decimal {
        dec!(2000)
    }

    /// Reduction for low earned income (LIRPF art. 20) on `net_income`,
    /// employment income after Social Security.
    ///
    /// Full reduction up to the first threshold, tapering linearly to zero.
    pub fn earned_income_reduction(&self, net_income: Decimal) -> Decimal {
        match self.0 {
            2024.. => {
                if net_income <= dec!(14852) {
                    dec!(7302)
                } else if net_income <= dec!(17673.52) {
                    dec!(7302) - dec!(1.75) * (net_income - dec!(14852))
                } else if net_income <= dec!(19747.5) {
                    dec!(2364.34) - dec!(1.14) * (net_income - dec!(17673.52))
                } else {
                    Decimal::ZERO
                }
            }
            _ => {
                if net_income <= dec!(14047.5) {
                    dec!(6498)
                } else if net_income <= dec!(19747.5) {
                    dec!(6498) - dec!(1.14) * (net_income - dec!(14047.5))
                } else {
                    Decimal::ZERO
                }
            }
        }
        .max(Decimal::ZERO)
    }

    /// Annual employment income below which nothing is withheld
    pub fn withholding_exempt_limit(&self) -> Decimal {
        self.minimum_wage_annual()
    }

    /// Withholding never exceeds this share of income above the exempt limit
    pub fn withholding_cap_rate(&self) -> Decimal {
        dec!(0.43)
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
