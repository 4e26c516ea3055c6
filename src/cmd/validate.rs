//! Validate command - load a dataset file and report problems loudly

use super::read_dataset;
use clap::Args;
use fedtax::core::{DatasetError, TaxYear};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Dataset JSON file. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Tax year the file must contain
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tax_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let output = match self.check() {
            Ok((year, fingerprint)) => ValidationOutput {
                valid: true,
                tax_year: Some(year.display()),
                fingerprint: Some(fingerprint),
                error: None,
            },
            Err(err) => ValidationOutput {
                valid: false,
                tax_year: None,
                fingerprint: None,
                error: Some(match err.downcast_ref::<DatasetError>() {
                    Some(err) => err.to_string(),
                    None => format!("{:#}", err),
                }),
            },
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_text(&output);
        }

        // Exit with code 1 if the dataset is unusable
        if !output.valid {
            std::process::exit(1);
        }
        Ok(())
    }

    fn check(&self) -> anyhow::Result<(TaxYear, String)> {
        let dataset = read_dataset(&self.file)?;
        if let Some(expected) = self.year.map(TaxYear).filter(|y| *y != dataset.year) {
            return Err(DatasetError::YearMismatch {
                expected,
                found: dataset.year,
            }
            .into());
        }
        Ok((dataset.year, dataset.fingerprint()?))
    }
}

fn print_text(output: &ValidationOutput) {
    println!();
    match (&output.tax_year, &output.fingerprint, &output.error) {
        (Some(year), Some(fingerprint), _) => {
            println!("\u{2713} Tax year {} dataset is valid", year);
            println!("  fingerprint: {}", fingerprint);
        }
        (_, _, Some(error)) => {
            println!("\u{2717} Invalid dataset");
            println!("  {}", error);
        }
        _ => {}
    }
}
