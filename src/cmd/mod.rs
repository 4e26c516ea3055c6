pub mod batch;
pub mod brackets;
pub mod eic;
pub mod export;
pub mod liability;
pub mod limits;
pub mod schema;
pub mod validate;

use anyhow::Context;
use clap::{Args, ValueEnum};
use fedtax::core::{read_dataset_json, DatasetError, FilingStatus, TaxYear, YearDataset};
use fedtax::tax;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::path::PathBuf;

/// Which year's tables to use
#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// Tax year (defaults to the current year, or the newest built-in year before it)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Dataset JSON file to use instead of the built-in tables
    #[arg(long)]
    pub dataset: Option<PathBuf>,
}

impl DatasetArgs {
    pub fn load(&self) -> anyhow::Result<YearDataset> {
        let requested = self.year.map(TaxYear);
        match &self.dataset {
            Some(path) => {
                let dataset = read_dataset(path)?;
                if let Some(expected) = requested.filter(|y| *y != dataset.year) {
                    return Err(DatasetError::YearMismatch {
                        expected,
                        found: dataset.year,
                    }
                    .into());
                }
                log::info!(
                    "Using tax year {} dataset from {}",
                    dataset.year,
                    path.display()
                );
                Ok(dataset)
            }
            None => {
                let year = tax::resolve_year(requested)?;
                Ok(tax::dataset_for(year)?)
            }
        }
    }
}

/// Read and validate a dataset JSON file (or stdin with "-")
pub fn read_dataset(path: &Path) -> anyhow::Result<YearDataset> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        BufReader::new(io::stdin().lock()).read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
        }
        Ok(read_dataset_json(io::Cursor::new(buffer))?)
    } else {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(read_dataset_json(BufReader::new(file))?)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    /// Single
    S,
    /// Married filing jointly
    Mfj,
    /// Married filing separately
    Mfs,
    /// Head of household
    Hoh,
    /// Qualifying surviving spouse
    W,
}

impl From<StatusArg> for FilingStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::S => FilingStatus::Single,
            StatusArg::Mfj => FilingStatus::MarriedFilingJointly,
            StatusArg::Mfs => FilingStatus::MarriedFilingSeparately,
            StatusArg::Hoh => FilingStatus::HeadOfHousehold,
            StatusArg::W => FilingStatus::Widowed,
        }
    }
}

pub fn format_usd(amount: Decimal) -> String {
    let amount = amount.round_dp(2);
    if amount < Decimal::ZERO {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

pub fn format_pct(percent: Decimal) -> String {
    format!("{}%", percent.normalize())
}
