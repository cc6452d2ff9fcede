//! Batch command - run many scenarios from CSV and write CSV results

use crate::cmd::open_input;
use crate::cmd::resolve_year;
use crate::core::beckham::calculate_beckham_comparison_for_year;
use crate::core::labor::calculate_labor_costs_for_year;
use crate::core::{clamp_to_minimum_wage, BeckhamInputs, LaborCostInputs, Region, TaxYear};
use crate::utils::{read_csv, write_csv};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// Calculator to run for every row
    #[arg(value_enum)]
    calculator: BatchCalculator,

    /// CSV file with one scenario per row (or "-" for stdin)
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Tax year (defaults to the latest year with published tables)
    #[arg(short, long)]
    year: Option<i32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BatchCalculator {
    /// Rows of BeckhamInputs (see `schema beckham csv-fields`)
    Beckham,
    /// Rows of LaborCostInputs (see `schema labor-cost csv-fields`)
    LaborCost,
}

#[derive(Debug, Serialize)]
struct BeckhamRecord {
    row: usize,
    region: Region,
    total_income: Decimal,
    standard_irpf: Decimal,
    standard_effective_rate: Decimal,
    beckham_tax: Decimal,
    beckham_effective_rate: Decimal,
    annual_savings: Decimal,
    savings_percentage: Decimal,
    six_year_savings: Decimal,
    exceeds_threshold: bool,
}

#[derive(Debug, Serialize)]
struct LaborCostRecord {
    row: usize,
    clamped_to_minimum_wage: bool,
    gross_monthly_salary: Decimal,
    net_salary: Decimal,
    employer_social_security_contribution: Decimal,
    total_monthly_employer_cost: Decimal,
    total_annual_employer_cost: Decimal,
    number_of_employees: u32,
    team_total_annual_employer_cost: Decimal,
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = resolve_year(self.year);
        let reader = open_input(&self.file)?;
        let written = match self.calculator {
            BatchCalculator::Beckham => run_beckham(read_csv(reader)?, year)?,
            BatchCalculator::LaborCost => run_labor_cost(read_csv(reader)?, year)?,
        };
        log::info!("Wrote {} result rows", written);
        Ok(())
    }
}

fn run_beckham(rows: Vec<BeckhamInputs>, year: TaxYear) -> anyhow::Result<usize> {
    log::info!("Read {} Beckham scenarios", rows.len());
    if let Some(i) = rows
        .iter()
        .position(|r| r.gross_annual_salary < Decimal::ZERO || r.additional_income < Decimal::ZERO)
    {
        anyhow::bail!("row {}: income amounts must not be negative", i + 1);
    }
    let records = rows.iter().enumerate().map(|(i, inputs)| {
        let results = calculate_beckham_comparison_for_year(inputs, year);
        BeckhamRecord {
            row: i + 1,
            region: inputs.autonomous_community,
            total_income: results.total_income,
            standard_irpf: results.standard_irpf,
            standard_effective_rate: results.standard_effective_rate,
            beckham_tax: results.beckham_tax,
            beckham_effective_rate: results.beckham_effective_rate,
            annual_savings: results.annual_savings,
            savings_percentage: results.savings_percentage,
            six_year_savings: results.six_year_savings,
            exceeds_threshold: results.exceeds_threshold,
        }
    });
    write_csv(records, io::stdout())
}

fn run_labor_cost(rows: Vec<LaborCostInputs>, year: TaxYear) -> anyhow::Result<usize> {
    log::info!("Read {} labor cost scenarios", rows.len());
    if let Some(i) = rows.iter().position(|r| r.number_of_employees == 0) {
        anyhow::bail!("row {}: number_of_employees must be at least 1", i + 1);
    }
    let records = rows.into_iter().enumerate().map(|(i, mut inputs)| {
        let (gross_salary, clamped) = clamp_to_minimum_wage(
            inputs.gross_salary,
            inputs.salary_input_mode,
            inputs.number_of_payments,
            year,
        );
        if clamped {
            log::warn!("row {}: salary raised to the minimum wage", i + 1);
        }
        inputs.gross_salary = gross_salary;
        let results = calculate_labor_costs_for_year(&inputs, year);
        LaborCostRecord {
            row: i + 1,
            clamped_to_minimum_wage: clamped,
            gross_monthly_salary: results.gross_monthly_salary,
            net_salary: results.net_salary,
            employer_social_security_contribution: results.employer_social_security_contribution,
            total_monthly_employer_cost: results.total_monthly_employer_cost,
            total_annual_employer_cost: results.total_annual_employer_cost,
            number_of_employees: results.team.number_of_employees,
            team_total_annual_employer_cost: results.team.total_annual_employer_cost,
        }
    });
    write_csv(records, io::stdout())
}
