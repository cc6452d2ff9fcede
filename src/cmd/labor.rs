//! Labor cost command - employer cost of a hire

use crate::cmd::{print_json, print_table, resolve_year};
use crate::core::labor::calculate_labor_costs_for_year;
use crate::core::money::{format_eur, format_pct, format_rate};
use crate::core::{
    calculate_labor_costs, clamp_to_minimum_wage, ContractType, IndustryRisk, LaborCostInputs,
    LaborCostLead, LaborCostResults, LeadPayload, NumberOfPayments, SalaryInputMode,
};
use clap::Args;
use rust_decimal::Decimal;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct LaborCostCommand {
    /// Gross salary in euros (per payment, or per year with --mode annual)
    #[arg(short, long)]
    salary: Decimal,

    /// Whether --salary is per payment or per year
    #[arg(short, long, default_value_t = SalaryInputMode::Monthly)]
    mode: SalaryInputMode,

    /// Salary payments per year (12 or 14)
    #[arg(short, long, default_value_t = NumberOfPayments::Fourteen)]
    payments: NumberOfPayments,

    /// Contract type (permanent, fixed-term)
    #[arg(short, long, default_value_t = ContractType::Permanent)]
    contract: ContractType,

    /// Number of employees on these terms
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    employees: u32,

    /// Work-accident risk class (low, medium, high)
    #[arg(short, long, default_value_t = IndustryRisk::Low)]
    risk: IndustryRisk,

    /// Tax year (defaults to the latest year with published tables)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Output only the lead-capture payload as JSON
    #[arg(long, conflicts_with = "json")]
    lead: bool,
}

#[derive(Tabled)]
struct ContributionRow {
    #[tabled(rename = "Contribution")]
    category: &'static str,
    #[tabled(rename = "Employer rate")]
    employer_rate: String,
    #[tabled(rename = "Employer")]
    employer: String,
    #[tabled(rename = "Employee rate")]
    employee_rate: String,
    #[tabled(rename = "Employee")]
    employee: String,
}

#[derive(Tabled)]
struct CostRow {
    #[tabled(rename = "")]
    label: &'static str,
    #[tabled(rename = "Per employee")]
    per_employee: String,
    #[tabled(rename = "Team")]
    team: String,
}

impl LaborCostCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = resolve_year(self.year);
        let (gross_salary, clamped) =
            clamp_to_minimum_wage(self.salary, self.mode, self.payments, year);
        if clamped {
            log::warn!(
                "Salary {} is below the {} minimum wage, using {}",
                format_eur(self.salary),
                year.rules_year(),
                format_eur(gross_salary)
            );
        }

        let inputs = LaborCostInputs {
            gross_salary,
            salary_input_mode: self.mode,
            number_of_payments: self.payments,
            contract_type: self.contract,
            number_of_employees: self.employees,
            industry_risk: self.risk,
        };
        let results = match self.year {
            Some(_) => calculate_labor_costs_for_year(&inputs, year),
            None => calculate_labor_costs(&inputs),
        };

        if self.lead {
            print_json(&LeadPayload::LaborCost(LaborCostLead::from(&results)))
        } else if self.json {
            print_json(&results)
        } else {
            print_costs(&results, &inputs);
            Ok(())
        }
    }
}

fn print_costs(results: &LaborCostResults, inputs: &LaborCostInputs) {
    println!();
    println!(
        "EMPLOYER COST ({}, {} contract, {} risk, {} payments)",
        results.tax_year, inputs.contract_type, inputs.industry_risk, results.number_of_payments
    );
    println!();
    println!(
        "Gross salary: {} per payment, {} per year",
        format_eur(results.gross_monthly_salary),
        format_eur(results.gross_annual_salary)
    );
    println!(
        "Net salary: {} per payment (Social Security {}, IRPF withholding {})",
        format_eur(results.net_salary),
        format_eur(results.employee_social_security_contribution),
        format_eur(results.irpf_withholding)
    );
    println!();

    let rows = results
        .breakdown
        .iter()
        .map(|line| ContributionRow {
            category: line.label,
            employer_rate: format_rate(line.employer_rate),
            employer: format_eur(line.employer_amount),
            employee_rate: format_rate(line.employee_rate),
            employee: format_eur(line.employee_amount),
        })
        .collect();
    println!("SOCIAL SECURITY PER PAYMENT");
    print_table(rows, 1);
    println!(
        "Employer contribution: {} ({} of gross)",
        format_eur(results.employer_social_security_contribution),
        format_pct(results.employer_contribution_rate)
    );
    println!();

    let employees = Decimal::from(results.team.number_of_employees);
    println!(
        "TOTAL EMPLOYER COST ({} employee{})",
        results.team.number_of_employees,
        if results.team.number_of_employees == 1 { "" } else { "s" }
    );
    print_table(
        vec![
            CostRow {
                label: "Per payment",
                per_employee: format_eur(results.total_monthly_employer_cost),
                team: format_eur(results.team.total_monthly_employer_cost),
            },
            CostRow {
                label: "Per year",
                per_employee: format_eur(results.total_annual_employer_cost),
                team: format_eur(results.team.total_annual_employer_cost),
            },
            CostRow {
                label: "Social Security per year",
                per_employee: format_eur(
                    results.team.annual_employer_social_security_contribution / employees,
                ),
                team: format_eur(results.team.annual_employer_social_security_contribution),
            },
        ],
        1,
    );
    println!();
}
