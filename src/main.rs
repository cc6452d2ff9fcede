mod cmd;
mod core;
mod utils;

use clap::{Parser, Subcommand};

/// Spanish tax, payroll and residency calculators
#[derive(Parser, Debug)]
#[command(name = "spaintax", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare standard IRPF with the Beckham impatriate regime
    Beckham(cmd::beckham::BeckhamCommand),
    /// Employer cost of a hire, with Social Security breakdown
    LaborCost(cmd::labor::LaborCostCommand),
    /// Assess the risk of becoming Spanish tax resident
    Residency(cmd::residency::ResidencyCommand),
    /// Score the company-setup readiness quiz
    Quiz(cmd::quiz::QuizCommand),
    /// Run a calculator over every row of a CSV file
    Batch(cmd::batch::BatchCommand),
    /// Print the expected input format of a calculator
    Schema(cmd::schema::SchemaCommand),
    /// Show the rate tables used for a tax year
    Rules(cmd::rules::RulesCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Beckham(cmd) => cmd.exec(),
        Command::LaborCost(cmd) => cmd.exec(),
        Command::Residency(cmd) => cmd.exec(),
        Command::Quiz(cmd) => cmd.exec(),
        Command::Batch(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
        Command::Rules(cmd) => cmd.exec(),
    }
}
