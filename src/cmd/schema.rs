//! Schema command - print expected input formats

use crate::core::{BeckhamInputs, InputField, LaborCostInputs, QuizAnswerSet, ResidencyInputs};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Calculator whose input to describe
    #[arg(value_enum)]
    calculator: SchemaCalculator,

    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaCalculator {
    Beckham,
    LaborCost,
    Residency,
    Quiz,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the input format
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => {
                let fields = self.fields()?;
                let names: Vec<_> = fields.iter().map(|f| f.name).collect();
                println!("{}", names.join(","));
                Ok(())
            }
            SchemaFormat::CsvFields => {
                print_fields(self.fields()?);
                Ok(())
            }
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = match self.calculator {
            SchemaCalculator::Beckham => schema_for!(BeckhamInputs),
            SchemaCalculator::LaborCost => schema_for!(LaborCostInputs),
            SchemaCalculator::Residency => schema_for!(ResidencyInputs),
            SchemaCalculator::Quiz => schema_for!(QuizAnswerSet),
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn fields(&self) -> anyhow::Result<&'static [InputField]> {
        match self.calculator {
            SchemaCalculator::Beckham => Ok(BeckhamInputs::input_schema()),
            SchemaCalculator::LaborCost => Ok(LaborCostInputs::input_schema()),
            SchemaCalculator::Residency => Ok(ResidencyInputs::input_schema()),
            SchemaCalculator::Quiz => anyhow::bail!(
                "Quiz answers are a JSON object of question id to option id; use json-schema, or `quiz --questions` to list the ids"
            ),
        }
    }
}

fn print_fields(fields: &[InputField]) {
    println!("CSV Input Format");
    println!("================");
    println!();
    for field in fields {
        let req = if field.required { "required" } else { "optional" };
        println!("{:24} ({:8})  {}", field.name, req, field.description);
    }
    println!();
    println!("Amounts are euros with up to two decimals; enum columns take the lowercase values shown by json-schema.");
}
