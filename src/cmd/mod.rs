pub mod batch;
pub mod beckham;
pub mod labor;
pub mod quiz;
pub mod residency;
pub mod rules;
pub mod schema;

use crate::core::TaxYear;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Open a file for reading, or stdin with "-"
pub fn open_input(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
        }
        Ok(Box::new(io::Cursor::new(buffer)))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Read a JSON document from a file (or stdin with "-")
pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let reader = open_input(path)?;
    let value = serde_json::from_reader(reader)?;
    Ok(value)
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print rows as a rounded table, numbers right-aligned from `numeric_from` onwards
pub fn print_table<R: Tabled>(rows: Vec<R>, numeric_from: usize) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(numeric_from..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

/// Resolve the `--year` flag.
///
/// Without a year the latest published tables apply. A requested year without
/// tables of its own is warned about.
pub fn resolve_year(year: Option<i32>) -> TaxYear {
    let Some(year) = year.map(TaxYear) else {
        log::debug!(
            "Using {} tables (current year {})",
            TaxYear::LATEST_RULES,
            TaxYear::current()
        );
        return TaxYear::LATEST_RULES;
    };
    if !year.has_own_rules() {
        log::warn!(
            "No rate tables published for {}, using {} tables",
            year,
            year.rules_year()
        );
    }
    year
}
