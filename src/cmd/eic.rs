//! EIC command - the earned income credit curve for a status and child count

use super::liability::warning_message;
use super::{format_usd, DatasetArgs, StatusArg};
use clap::Args;
use fedtax::core::FilingStatus;
use fedtax::tax::liability::{earned_income_credit, EicClaim};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct EicCommand {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Filing status
    #[arg(short, long, value_enum, ignore_case = true)]
    status: StatusArg,

    /// Number of qualifying children (3 or more share a table)
    #[arg(short, long, default_value_t = 0)]
    children: u8,

    /// Earned income
    #[arg(short, long)]
    income: Decimal,

    /// Adjusted gross income, when different from earned income
    #[arg(long)]
    agi: Option<Decimal>,

    /// Investment income
    #[arg(long, default_value_t = Decimal::ZERO)]
    investment_income: Decimal,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct PointRow {
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Credit")]
    credit: String,
}

#[derive(Debug, Serialize)]
struct EicOutput {
    tax_year: String,
    filing_status: &'static str,
    qualifying_children: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    income_cap: Option<String>,
    points: Vec<PointRow>,
    credit: String,
    warnings: Vec<String>,
}

impl EicCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let dataset = self.dataset.load()?;
        let status: FilingStatus = self.status.into();
        let claim = EicClaim {
            filing_status: status,
            qualifying_children: self.children,
            earned_income: self.income,
            agi: self.agi.unwrap_or(self.income),
            investment_income: self.investment_income,
        };
        let mut warnings = Vec::new();
        let credit = earned_income_credit(&dataset, &claim, &mut warnings);

        let schedule = dataset.eic.schedules.get(status).as_ref();
        let (income_cap, points) = match schedule {
            Some(schedule) => {
                let (cap, curve) = schedule.for_children(self.children);
                let points = curve
                    .points()
                    .into_iter()
                    .map(|p| PointRow {
                        income: format_usd(p.x),
                        credit: format_usd(p.y),
                    })
                    .collect();
                (Some(format_usd(cap)), points)
            }
            None => (None, Vec::new()),
        };

        let output = EicOutput {
            tax_year: dataset.year.display(),
            filing_status: status.code(),
            qualifying_children: self.children,
            income_cap,
            points,
            credit: format_usd(credit),
            warnings: warnings.iter().map(warning_message).collect(),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_text(&output, status);
        }
        Ok(())
    }
}

fn print_text(output: &EicOutput, status: FilingStatus) {
    println!();
    println!(
        "EARNED INCOME CREDIT ({}, {}, {} qualifying children)",
        output.tax_year, status, output.qualifying_children
    );
    println!();
    if let Some(cap) = &output.income_cap {
        println!("Income cap: {}", cap);
        let table = Table::new(&output.points)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
    println!("Credit: {}", output.credit);
    for warning in &output.warnings {
        println!("\u{26A0} {}", warning);
    }
}
