//! Schema command - print expected input formats

use clap::{Args, ValueEnum};
use fedtax::core::DatasetInput;
use fedtax::tax::TaxProfile;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// What to describe
    #[arg(value_enum, default_value = "dataset")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for a year's dataset
    Dataset,
    /// JSON Schema for a single return
    Profile,
    /// CSV header row for the batch command
    CsvHeader,
    /// CSV column descriptions for the batch command
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::Dataset => {
                let schema = schema_for!(DatasetInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::Profile => {
                let schema = schema_for!(TaxProfile);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => println!("{}", TaxProfile::csv_header().join(",")),
            SchemaFormat::CsvFields => print_csv_fields(),
        }
        Ok(())
    }
}

fn print_csv_fields() {
    println!("Batch CSV Input Format");
    println!("======================");
    println!();
    for field in TaxProfile::csv_schema() {
        let req = if field.required { "required" } else { "optional" };
        println!("{:24} ({:8})  {}", field.name, req, field.description);
    }
    println!();
    println!("filing_status is one of S, MFJ, MFS, HOH, W; amounts are in dollars");
}
