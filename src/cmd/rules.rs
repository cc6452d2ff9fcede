//! Rules command - show the rate tables a tax year uses

use crate::cmd::{print_json, print_table, resolve_year};
use crate::core::labor::SocialSecurityRates;
use crate::core::money::{format_eur, format_eur_whole, format_rate};
use crate::core::{Region, RuleSet};
use clap::Args;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct RulesCommand {
    /// Tax year (defaults to the latest year with published tables)
    #[arg(short, long)]
    year: Option<i32>,

    /// Only show the IRPF scale of this autonomous community
    #[arg(short, long)]
    region: Option<Region>,

    /// Print only the SHA-256 fingerprint of the rule set
    #[arg(long)]
    digest: bool,

    /// Output the full rule set as JSON
    #[arg(long, conflicts_with = "digest")]
    json: bool,
}

#[derive(Tabled)]
struct BracketRow {
    #[tabled(rename = "Taxable income")]
    bracket: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

#[derive(Tabled)]
struct RateRow {
    #[tabled(rename = "Contribution")]
    category: &'static str,
    #[tabled(rename = "Employer")]
    employer: String,
    #[tabled(rename = "Employee")]
    employee: String,
}

impl RulesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rules = RuleSet::for_year(resolve_year(self.year));

        if self.digest {
            println!("{}", rules.digest()?);
            return Ok(());
        }
        if self.json {
            return print_json(&rules);
        }

        println!();
        println!("TAX RULES {}", rules.year);
        for schedule in rules
            .irpf
            .iter()
            .filter(|s| self.region.map_or(true, |r| r == s.region))
        {
            println!();
            println!("IRPF: {}", schedule.region.name());
            let rows = schedule
                .brackets
                .iter()
                .map(|b| BracketRow {
                    bracket: b.label(),
                    rate: format_rate(b.rate),
                })
                .collect();
            print_table(rows, 1);
        }

        println!();
        println!("BECKHAM REGIME");
        println!(
            "  {} up to {}, {} above, for {} years",
            format_rate(rules.beckham.flat_rate),
            format_eur_whole(rules.beckham.threshold),
            format_rate(rules.beckham.excess_rate),
            rules.beckham.regime_years
        );

        println!();
        println!("SOCIAL SECURITY");
        print_table(rate_rows(rules.payroll.social_security), 1);
        println!(
            "  Minimum wage: {} per payment ({} per year)",
            format_eur(rules.payroll.minimum_wage_monthly),
            format_eur(rules.payroll.minimum_wage_annual)
        );
        println!(
            "  Maximum contribution base: {} per month",
            format_eur(rules.payroll.max_contribution_base_monthly)
        );
        println!();
        println!("Digest: {}", rules.digest()?);
        println!();
        Ok(())
    }
}

fn rate_rows(rates: &SocialSecurityRates) -> Vec<RateRow> {
    [
        (rates.common_contingencies.category.label(), rates.common_contingencies),
        ("Unemployment (permanent)", rates.unemployment_permanent),
        ("Unemployment (fixed-term)", rates.unemployment_fixed_term),
        (rates.fogasa.category.label(), rates.fogasa),
        (rates.vocational_training.category.label(), rates.vocational_training),
        (rates.intergenerational_equity.category.label(), rates.intergenerational_equity),
        ("Work accident (low risk)", rates.work_accident_low),
        ("Work accident (medium risk)", rates.work_accident_medium),
        ("Work accident (high risk)", rates.work_accident_high),
    ]
    .into_iter()
    .map(|(category, r)| RateRow {
        category,
        employer: format_rate(r.employer),
        employee: format_rate(r.employee),
    })
    .collect()
}
