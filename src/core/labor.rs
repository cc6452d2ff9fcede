//! Employer cost of a Spanish hire.
//!
//! Contributions are computed on the gross salary per payment, capped at the
//! maximum contribution base spread over the number of payments. All
//! intermediate arithmetic is unrounded; only the reported figures are rounded
//! to whole euros.

use super::irpf::IrpfSchedule;
use super::money::{percentage, round_euros};
use super::year::TaxYear;
use super::InputError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use spaintax_derive::InputSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SalaryInputMode {
    #[default]
    Monthly,
    Annual,
}

form_values!(SalaryInputMode, "salary input mode" {
    Monthly => "monthly",
    Annual => "annual",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ContractType {
    #[default]
    Permanent,
    FixedTerm,
}

form_values!(ContractType, "contract type" {
    Permanent => "permanent",
    FixedTerm => "fixed-term",
});

/// Work-accident (AT/EP) risk class of the activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum IndustryRisk {
    #[default]
    Low,
    Medium,
    High,
}

form_values!(IndustryRisk, "industry risk" {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// Salary payments per year: twelve, or twelve plus two extra payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NumberOfPayments {
    Twelve,
    #[default]
    Fourteen,
}

impl NumberOfPayments {
    pub fn count(&self) -> u8 {
        match self {
            NumberOfPayments::Twelve => 12,
            NumberOfPayments::Fourteen => 14,
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.count())
    }
}

impl TryFrom<u8> for NumberOfPayments {
    type Error = InputError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(NumberOfPayments::Twelve),
            14 => Ok(NumberOfPayments::Fourteen),
            other => Err(InputError::InvalidPayments(other)),
        }
    }
}

impl From<NumberOfPayments> for u8 {
    fn from(payments: NumberOfPayments) -> u8 {
        payments.count()
    }
}

impl std::str::FromStr for NumberOfPayments {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s
            .trim()
            .parse::<u8>()
            .map_err(|_| InputError::UnknownValue {
                field: "number of payments",
                value: s.to_string(),
            })?;
        NumberOfPayments::try_from(count)
    }
}

impl std::fmt::Display for NumberOfPayments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// A hire to be costed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, InputSchema)]
pub struct LaborCostInputs {
    /// Gross salary in euros, per payment or per year depending on salary_input_mode
    #[schemars(with = "f64")]
    pub gross_salary: Decimal,
    /// Whether gross_salary is per payment (monthly) or per year (annual)
    #[serde(default)]
    pub salary_input_mode: SalaryInputMode,
    /// Salary payments per year (12 or 14)
    #[serde(default)]
    #[schemars(with = "u8")]
    pub number_of_payments: NumberOfPayments,
    /// permanent or fixed-term
    #[serde(default)]
    pub contract_type: ContractType,
    /// Head count for aggregate team figures (at least 1)
    #[serde(default = "one_employee")]
    pub number_of_employees: u32,
    /// Work-accident risk class (low, medium, high)
    #[serde(default)]
    pub industry_risk: IndustryRisk,
}

fn one_employee() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionCategory {
    CommonContingencies,
    Unemployment,
    Fogasa,
    VocationalTraining,
    IntergenerationalEquity,
    WorkAccident,
}

impl ContributionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ContributionCategory::CommonContingencies => "Common contingencies",
            ContributionCategory::Unemployment => "Unemployment",
            ContributionCategory::Fogasa => "FOGASA",
            ContributionCategory::VocationalTraining => "Vocational training",
            ContributionCategory::IntergenerationalEquity => "Intergenerational equity (MEI)",
            ContributionCategory::WorkAccident => "Work accident (AT/EP)",
        }
    }
}

/// Employer and employee rates for one category, as fractions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContributionRate {
    pub category: ContributionCategory,
    pub employer: Decimal,
    pub employee: Decimal,
}

/// Social Security contribution rates for one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SocialSecurityRates {
    pub common_contingencies: ContributionRate,
    pub unemployment_permanent: ContributionRate,
    pub unemployment_fixed_term: ContributionRate,
    pub fogasa: ContributionRate,
    pub vocational_training: ContributionRate,
    pub intergenerational_equity: ContributionRate,
    pub work_accident_low: ContributionRate,
    pub work_accident_medium: ContributionRate,
    pub work_accident_high: ContributionRate,
}

const fn rate(
    category: ContributionCategory,
    employer: Decimal,
    employee: Decimal,
) -> ContributionRate {
    ContributionRate {
        category,
        employer,
        employee,
    }
}

pub const SOCIAL_SECURITY_RATES_2025: SocialSecurityRates = SocialSecurityRates {
    common_contingencies: rate(
        ContributionCategory::CommonContingencies,
        dec!(0.2360),
        dec!(0.0470),
    ),
    unemployment_permanent: rate(ContributionCategory::Unemployment, dec!(0.0550), dec!(0.0155)),
    unemployment_fixed_term: rate(ContributionCategory::Unemployment, dec!(0.0670), dec!(0.0160)),
    fogasa: rate(ContributionCategory::Fogasa, dec!(0.0020), dec!(0)),
    vocational_training: rate(
        ContributionCategory::VocationalTraining,
        dec!(0.0060),
        dec!(0.0010),
    ),
    intergenerational_equity: rate(
        ContributionCategory::IntergenerationalEquity,
        dec!(0.0067),
        dec!(0.0013),
    ),
    work_accident_low: rate(ContributionCategory::WorkAccident, dec!(0.0150), dec!(0)),
    work_accident_medium: rate(ContributionCategory::WorkAccident, dec!(0.0370), dec!(0)),
    work_accident_high: rate(ContributionCategory::WorkAccident, dec!(0.0670), dec!(0)),
};

impl SocialSecurityRates {
    /// Rates for `year`; only the 2025 table is carried.
    pub fn for_year(_year: TaxYear) -> &'static SocialSecurityRates {
        &SOCIAL_SECURITY_RATES_2025
    }

    /// Rates applying to one contract, in breakdown order
    pub fn applicable(&self, contract: ContractType, risk: IndustryRisk) -> [ContributionRate; 6] {
        let unemployment = match contract {
            ContractType::Permanent => self.unemployment_permanent,
            ContractType::FixedTerm => self.unemployment_fixed_term,
        };
        let work_accident = match risk {
            IndustryRisk::Low => self.work_accident_low,
            IndustryRisk::Medium => self.work_accident_medium,
            IndustryRisk::High => self.work_accident_high,
        };
        [
            self.common_contingencies,
            unemployment,
            self.fogasa,
            self.vocational_training,
            self.intergenerational_equity,
            work_accident,
        ]
    }
}

/// Monthly contribution for one category, rounded to whole euros
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionLine {
    pub category: ContributionCategory,
    pub label: &'static str,
    pub employer_rate: Decimal,
    pub employee_rate: Decimal,
    pub employer_amount: Decimal,
    pub employee_amount: Decimal,
}

/// Aggregates over `number_of_employees`
///
/// Each figure is the rounded per-employee figure times the head count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamTotals {
    pub number_of_employees: u32,
    pub total_monthly_employer_cost: Decimal,
    pub total_annual_employer_cost: Decimal,
    pub annual_employer_social_security_contribution: Decimal,
}

/// Cost of one hire. Top-level figures are per employee and per payment
/// unless named annual; `team` holds the aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaborCostResults {
    pub tax_year: TaxYear,
    pub number_of_payments: NumberOfPayments,
    pub gross_monthly_salary: Decimal,
    pub gross_annual_salary: Decimal,
    pub employee_social_security_contribution: Decimal,
    pub irpf_withholding: Decimal,
    pub net_salary: Decimal,
    pub employer_social_security_contribution: Decimal,
    /// Employer contribution rate as a percentage of gross salary
    pub employer_contribution_rate: Decimal,
    pub total_monthly_employer_cost: Decimal,
    /// `total_monthly_employer_cost * number_of_payments`
    pub total_annual_employer_cost: Decimal,
    pub breakdown: Vec<ContributionLine>,
    pub team: TeamTotals,
}

/// Cost a hire under the latest published rates.
pub fn calculate_labor_costs(inputs: &LaborCostInputs) -> LaborCostResults {
    calculate_labor_costs_for_year(inputs, TaxYear::LATEST_RULES)
}

/// Cost a hire under the rates of `year`.
///
/// The salary is assumed to be at least the statutory minimum; see
/// [`clamp_to_minimum_wage`].
pub fn calculate_labor_costs_for_year(inputs: &LaborCostInputs, year: TaxYear) -> LaborCostResults {
    let payments = inputs.number_of_payments.as_decimal();
    let gross_monthly = match inputs.salary_input_mode {
        SalaryInputMode::Monthly => inputs.gross_salary,
        SalaryInputMode::Annual => inputs.gross_salary / payments,
    };
    let gross_annual = gross_monthly * payments;

    let max_base = year.max_contribution_base_monthly() * dec!(12) / payments;
    let contribution_base = gross_monthly.min(max_base);

    let rates = SocialSecurityRates::for_year(year)
        .applicable(inputs.contract_type, inputs.industry_risk);

    let mut employer_ss = Decimal::ZERO;
    let mut employee_ss = Decimal::ZERO;
    let mut employer_rate = Decimal::ZERO;
    let breakdown: Vec<ContributionLine> = rates
        .iter()
        .map(|r| {
            let employer_amount = contribution_base * r.employer;
            let employee_amount = contribution_base * r.employee;
            employer_ss += employer_amount;
            employee_ss += employee_amount;
            employer_rate += r.employer;
            log::debug!(
                "{}: employer {} employee {}",
                r.category.label(),
                employer_amount,
                employee_amount
            );
            ContributionLine {
                category: r.category,
                label: r.category.label(),
                employer_rate: r.employer,
                employee_rate: r.employee,
                employer_amount: round_euros(employer_amount),
                employee_amount: round_euros(employee_amount),
            }
        })
        .collect();

    let withholding = estimate_withholding(gross_annual, employee_ss * payments, year) / payments;
    let net_monthly = gross_monthly - employee_ss - withholding;

    let total_monthly = round_euros(gross_monthly + employer_ss);
    let total_annual = total_monthly * payments;
    let employer_ss_rounded = round_euros(employer_ss);
    let employees = Decimal::from(inputs.number_of_employees);

    LaborCostResults {
        tax_year: year.rules_year(),
        number_of_payments: inputs.number_of_payments,
        gross_monthly_salary: round_euros(gross_monthly),
        gross_annual_salary: round_euros(gross_annual),
        employee_social_security_contribution: round_euros(employee_ss),
        irpf_withholding: round_euros(withholding),
        net_salary: round_euros(net_monthly),
        employer_social_security_contribution: employer_ss_rounded,
        employer_contribution_rate: percentage(employer_rate, Decimal::ONE),
        total_monthly_employer_cost: total_monthly,
        total_annual_employer_cost: total_annual,
        breakdown,
        team: TeamTotals {
            number_of_employees: inputs.number_of_employees,
            total_monthly_employer_cost: total_monthly * employees,
            total_annual_employer_cost: total_annual * employees,
            annual_employer_social_security_contribution: employer_ss_rounded
                * payments
                * employees,
        },
    }
}

/// Annual IRPF withholding on employment income under the general scale.
///
/// Net income gets the expense and earned-income reductions; the result is
/// capped at a share of the income above the exempt limit, so nothing is
/// withheld at the minimum wage and withholding grows slower than pay.
fn estimate_withholding(
    gross_annual: Decimal,
    employee_ss_annual: Decimal,
    year: TaxYear,
) -> Decimal {
    let above_limit = gross_annual - year.withholding_exempt_limit();
    if above_limit <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let schedule = IrpfSchedule::general(year);
    let net_income = (gross_annual - employee_ss_annual).max(Decimal::ZERO);
    let taxable = (net_income
        - year.work_expense_reduction()
        - year.earned_income_reduction(net_income))
    .max(Decimal::ZERO);
    let personal_minimum = year.personal_minimum().min(taxable);
    let tax = (schedule.tax(taxable) - schedule.tax(personal_minimum)).max(Decimal::ZERO);
    tax.min(above_limit * year.withholding_cap_rate())
}

/// Raise a salary to the statutory minimum wage for its input mode.
///
/// Returns the salary to use and whether it was raised.
pub fn clamp_to_minimum_wage(
    gross_salary: Decimal,
    mode: SalaryInputMode,
    payments: NumberOfPayments,
    year: TaxYear,
) -> (Decimal, bool) {
    let minimum = match mode {
        SalaryInputMode::Annual => year.minimum_wage_annual(),
        SalaryInputMode::Monthly => year.minimum_wage_annual() / payments.as_decimal(),
    };
    if gross_salary < minimum {
        (minimum, true)
    } else {
        (gross_salary, false)
    }
}
