//! Batch command - liabilities for a CSV of returns

use super::format_amount;
use super::liability::warning_message;
use super::DatasetArgs;
use anyhow::Context;
use clap::Args;
use fedtax::core::YearDataset;
use fedtax::tax::{calculate_liability, TaxProfile};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BatchCommand {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// CSV file of returns (see `fedtax schema csv-fields`). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,
}

/// One output row per input row
#[derive(Debug, Serialize)]
struct BatchRow {
    row: usize,
    filing_status: &'static str,
    taxable_income: String,
    ordinary_tax: String,
    capital_gains_tax: String,
    alternative_minimum_tax: String,
    additional_medicare_tax: String,
    net_investment_income_tax: String,
    earned_income_credit: String,
    total_tax: String,
    net_liability: String,
    warnings: String,
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let dataset = self.dataset.load()?;
        if self.file.as_os_str() == "-" {
            run_batch(&dataset, io::stdin().lock(), io::stdout().lock())
        } else {
            let file = File::open(&self.file)
                .with_context(|| format!("Failed to open {}", self.file.display()))?;
            run_batch(&dataset, file, io::stdout().lock())
        }
    }
}

fn run_batch<R: Read, W: Write>(dataset: &YearDataset, input: R, output: W) -> anyhow::Result<()> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    let mut count = 0;

    for (index, record) in reader.deserialize::<TaxProfile>().enumerate() {
        let row = index + 1;
        let profile = record.with_context(|| format!("Invalid CSV row {}", row))?;
        let report = calculate_liability(dataset, &profile)
            .with_context(|| format!("Row {}", row))?;
        let warnings = report
            .warnings
            .iter()
            .map(warning_message)
            .collect::<Vec<_>>()
            .join("; ");
        writer.serialize(BatchRow {
            row,
            filing_status: report.filing_status.code(),
            taxable_income: format_amount(report.taxable_income),
            ordinary_tax: format_amount(report.ordinary_tax),
            capital_gains_tax: format_amount(report.capital_gains_tax),
            alternative_minimum_tax: format_amount(report.alternative_minimum_tax),
            additional_medicare_tax: format_amount(report.additional_medicare_tax),
            net_investment_income_tax: format_amount(report.net_investment_income_tax),
            earned_income_credit: format_amount(report.earned_income_credit),
            total_tax: format_amount(report.total_tax),
            net_liability: format_amount(report.net_liability),
            warnings,
        })?;
        count += 1;
    }
    writer.flush()?;
    log::info!("Calculated {} return(s) for tax year {}", count, dataset.year);
    Ok(())
}
