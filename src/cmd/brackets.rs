//! Brackets command - a rate schedule with the tax due through each bracket

use super::{format_pct, format_usd, DatasetArgs, StatusArg};
use clap::{Args, ValueEnum};
use fedtax::core::{BracketTable, FilingStatus, YearDataset};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BracketsCommand {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Filing status
    #[arg(short, long, value_enum, ignore_case = true)]
    status: StatusArg,

    /// Which schedule to show
    #[arg(long, value_enum, default_value_t = ScheduleArg::Ordinary)]
    schedule: ScheduleArg,

    /// Also show the tax and marginal rate at this income
    #[arg(short, long)]
    income: Option<Decimal>,

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ScheduleArg {
    #[default]
    Ordinary,
    CapitalGains,
    Amt,
}

impl ScheduleArg {
    fn table(self, dataset: &YearDataset, status: FilingStatus) -> &BracketTable {
        match self {
            ScheduleArg::Ordinary => dataset.ordinary_brackets(status),
            ScheduleArg::CapitalGains => dataset.capital_gains_brackets(status),
            ScheduleArg::Amt => dataset.amt.schedule.get(status),
        }
    }

    fn title(self) -> &'static str {
        match self {
            ScheduleArg::Ordinary => "ORDINARY INCOME",
            ScheduleArg::CapitalGains => "LONG-TERM CAPITAL GAINS",
            ScheduleArg::Amt => "ALTERNATIVE MINIMUM TAX",
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct BracketRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Tax in bracket")]
    bracket_tax: String,
    #[tabled(rename = "Tax at top")]
    cumulative_tax: String,
}

#[derive(Debug, Serialize)]
struct IncomeTax {
    income: String,
    tax: String,
    marginal_rate: String,
}

#[derive(Debug, Serialize)]
struct BracketsOutput {
    tax_year: String,
    filing_status: &'static str,
    brackets: Vec<BracketRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    at_income: Option<IncomeTax>,
}

impl BracketsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let dataset = self.dataset.load()?;
        let status: FilingStatus = self.status.into();
        let table = self.schedule.table(&dataset, status);
        let rows = bracket_rows(table);
        let at_income = self.income.map(|income| IncomeTax {
            income: format_usd(income),
            tax: format_usd(table.tax_on(income)),
            marginal_rate: format_pct(table.marginal_rate(income).percent()),
        });

        if self.json {
            let output = BracketsOutput {
                tax_year: dataset.year.display(),
                filing_status: status.code(),
                brackets: rows,
                at_income,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!();
        println!(
            "{} ({}, {})",
            self.schedule.title(),
            dataset.year.display(),
            status
        );
        println!();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        if let Some(at) = at_income {
            println!(
                "Tax on {}: {} (marginal rate {})",
                at.income, at.tax, at.marginal_rate
            );
        }
        Ok(())
    }
}

fn bracket_rows(table: &BracketTable) -> Vec<BracketRow> {
    table
        .brackets()
        .map(|bracket| {
            let bracket_tax = bracket
                .upper
                .map(|upper| bracket.rate.of(upper - bracket.lower));
            let cumulative_tax = bracket.upper.map(|upper| table.tax_on(upper));
            BracketRow {
                from: format_usd(bracket.lower),
                to: bracket.upper.map_or("and over".to_string(), format_usd),
                rate: bracket.rate.to_string(),
                bracket_tax: bracket_tax.map_or("-".to_string(), format_usd),
                cumulative_tax: cumulative_tax.map_or("-".to_string(), format_usd),
            }
        })
        .collect()
}
