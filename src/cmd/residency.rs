//! Residency command - tax-residency risk assessment

use crate::cmd::{print_json, print_table, read_json};
use crate::core::residency::{
    EmployerLocation, FamilyLocation, HomeStatus, IncomeLocation, YesNo, MAX_RESIDENCY_SCORE,
    RESIDENCY_RISK_BANDS,
};
use crate::core::{
    assess_residency_risk, LeadPayload, ResidencyInputs, ResidencyLead, ResidencyRiskResults,
    RiskLevel,
};
use clap::Args;
use std::path::PathBuf;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct ResidencyCommand {
    /// JSON file with the answers (or "-" for stdin); replaces the answer flags
    #[arg(short, long, conflicts_with = "days")]
    input: Option<PathBuf>,

    /// Days spent in Spain this year (0-366, one more than 365 to allow for leap years)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(0..=366))]
    days: Option<u16>,

    /// Where most income is earned (spain, abroad, mixed)
    #[arg(long, default_value_t = IncomeLocation::Abroad)]
    income: IncomeLocation,

    /// Permanent home in Spain (yes, no, rented)
    #[arg(long, default_value_t = HomeStatus::No)]
    home: HomeStatus,

    /// Where the spouse lives (spain, abroad, na)
    #[arg(long, default_value_t = FamilyLocation::Na)]
    spouse: FamilyLocation,

    /// Where dependent children live (spain, abroad, na)
    #[arg(long, default_value_t = FamilyLocation::Na)]
    children: FamilyLocation,

    /// Where the employer is based (spain, abroad)
    #[arg(long, default_value_t = EmployerLocation::Abroad)]
    employer: EmployerLocation,

    /// Main bank accounts in Spain (yes, no)
    #[arg(long, default_value_t = YesNo::No)]
    bank: YesNo,

    /// Registered on a municipal padrón (yes, no)
    #[arg(long, default_value_t = YesNo::No)]
    padron: YesNo,

    /// Contributing to Spanish Social Security (yes, no)
    #[arg(long, default_value_t = YesNo::No)]
    social_security: YesNo,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Output only the lead-capture payload as JSON
    #[arg(long, conflicts_with = "json")]
    lead: bool,
}

#[derive(Tabled)]
struct FactorRow {
    #[tabled(rename = "Factor")]
    explanation: &'static str,
    #[tabled(rename = "Points")]
    points: u32,
}

impl ResidencyCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        RESIDENCY_RISK_BANDS.validate(MAX_RESIDENCY_SCORE)?;

        let inputs = self.inputs()?;
        let results = assess_residency_risk(&inputs);

        if self.lead {
            print_json(&LeadPayload::Residency(ResidencyLead::from(&results)))
        } else if self.json {
            print_json(&results)
        } else {
            print_assessment(&results, &inputs);
            Ok(())
        }
    }

    fn inputs(&self) -> anyhow::Result<ResidencyInputs> {
        if let Some(path) = &self.input {
            let inputs: ResidencyInputs = read_json(path)?;
            if inputs.days_in_spain > 366 {
                anyhow::bail!("days_in_spain must be at most 366, got {}", inputs.days_in_spain);
            }
            return Ok(inputs);
        }
        let Some(days) = self.days else {
            anyhow::bail!("Provide --days or an --input answers file");
        };
        Ok(ResidencyInputs {
            days_in_spain: days,
            primary_income_location: self.income,
            permanent_home_spain: self.home,
            spouse_location: self.spouse,
            children_location: self.children,
            employer_location: self.employer,
            primary_bank_accounts: self.bank,
            registered_padron: self.padron,
            spanish_social_security: self.social_security,
        })
    }
}

fn print_assessment(results: &ResidencyRiskResults, inputs: &ResidencyInputs) {
    println!();
    println!("TAX RESIDENCY RISK ({} days in Spain)", inputs.days_in_spain);
    println!();
    println!(
        "Risk level: {} (score {})",
        results.risk_level.as_str().to_uppercase(),
        results.score
    );
    if results.automatic_resident {
        println!("More than 183 days in Spain: you are tax resident by presence alone.");
    }
    println!();

    if results.contributing_factors.is_empty() {
        println!("No factors point to Spanish tax residency.");
    } else {
        let rows = results
            .contributing_factors
            .iter()
            .map(|f| FactorRow {
                explanation: f.explanation,
                points: f.points,
            })
            .collect();
        print_table(rows, 1);
    }

    if results.risk_level == RiskLevel::High {
        println!();
        println!("Consider a residency review before filing for the year.");
    }
    println!();
}
