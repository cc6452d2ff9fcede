//! Beckham command - compare progressive IRPF with the impatriate regime

use crate::cmd::{print_json, print_table, resolve_year};
use crate::core::beckham::calculate_beckham_comparison_for_year;
use crate::core::money::{format_eur, format_eur_whole, format_pct, format_rate};
use crate::core::{
    calculate_beckham_comparison, BeckhamInputs, BeckhamLead, BeckhamResults, LeadPayload, Region,
};
use clap::Args;
use rust_decimal::Decimal;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct BeckhamCommand {
    /// Gross annual salary in euros
    #[arg(short, long)]
    salary: Decimal,

    /// Other annual income in euros
    #[arg(short, long, default_value_t = Decimal::ZERO)]
    additional: Decimal,

    /// Autonomous community (madrid, catalonia, andalusia, valencia, balearic-islands, canary-islands, other)
    #[arg(short, long, default_value_t = Region::Other)]
    region: Region,

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
struct RegimeRow {
    #[tabled(rename = "Regime")]
    regime: &'static str,
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Effective rate")]
    effective_rate: String,
    #[tabled(rename = "Net income")]
    net: String,
}

#[derive(Tabled)]
struct BracketRow {
    #[tabled(rename = "Bracket")]
    bracket: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl BeckhamCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if self.salary < Decimal::ZERO || self.additional < Decimal::ZERO {
            anyhow::bail!("Income amounts must not be negative");
        }
        let inputs = BeckhamInputs {
            gross_annual_salary: self.salary,
            additional_income: self.additional,
            autonomous_community: self.region,
        };
        let results = match self.year {
            Some(_) => calculate_beckham_comparison_for_year(&inputs, resolve_year(self.year)),
            None => calculate_beckham_comparison(&inputs),
        };

        if self.lead {
            print_json(&LeadPayload::Beckham(BeckhamLead::from(&results)))
        } else if self.json {
            print_json(&results)
        } else {
            print_comparison(&results, self.region);
            Ok(())
        }
    }
}

fn print_comparison(results: &BeckhamResults, region: Region) {
    println!();
    println!(
        "BECKHAM LAW COMPARISON ({}, {})",
        results.tax_year,
        region.name()
    );
    println!();
    println!("Total income: {}", format_eur(results.total_income));
    println!();

    print_table(
        vec![
            RegimeRow {
                regime: "Standard IRPF",
                tax: format_eur(results.standard_irpf),
                effective_rate: format_pct(results.standard_effective_rate),
                net: format_eur(results.standard_net_salary),
            },
            RegimeRow {
                regime: "Beckham regime",
                tax: format_eur(results.beckham_tax),
                effective_rate: format_pct(results.beckham_effective_rate),
                net: format_eur(results.beckham_net_salary),
            },
        ],
        1,
    );
    if results.exceeds_threshold {
        println!(
            "Income above {} is taxed at {} under the Beckham regime.",
            format_eur_whole(results.tax_year.beckham_threshold()),
            format_rate(results.tax_year.beckham_excess_rate())
        );
    }
    println!();

    if !results.irpf_breakdown.is_empty() {
        println!("IRPF BREAKDOWN");
        let rows = results
            .irpf_breakdown
            .iter()
            .map(|s| BracketRow {
                bracket: s.label.clone(),
                income: format_eur(s.taxable),
                rate: format_rate(s.rate),
                tax: format_eur(s.tax),
            })
            .collect();
        print_table(rows, 1);
        println!();
    }

    if results.annual_savings >= Decimal::ZERO {
        println!(
            "Annual savings: {} ({} of standard IRPF)",
            format_eur(results.annual_savings),
            format_pct(results.savings_percentage)
        );
        println!(
            "Savings over 6 years: {}",
            format_eur(results.six_year_savings)
        );
    } else {
        println!(
            "The Beckham regime costs {} more per year at this income.",
            format_eur(-results.annual_savings)
        );
    }
    println!();
}
