//! Limits command - the year's single-value limits and thresholds

use super::{format_pct, format_usd, DatasetArgs};
use clap::Args;
use fedtax::core::{FilingStatus, HsaCoverage, YearDataset};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct LimitsCommand {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct LimitRow {
    #[tabled(rename = "Limit")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl LimitsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let dataset = self.dataset.load()?;
        let rows = limit_rows(&dataset);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        println!();
        println!("LIMITS ({})", dataset.year.display());
        println!();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        Ok(())
    }
}

fn limit_rows(dataset: &YearDataset) -> Vec<LimitRow> {
    let row = |name: &str, value: String| LimitRow {
        name: name.to_string(),
        value,
    };
    let fica = &dataset.fica;
    let deps = &dataset.qualifying_dependents;
    let mut rows = vec![
        row(
            "Social Security wage base",
            format_usd(fica.social_security_wage_base),
        ),
        row(
            "Social Security tax rate",
            format_pct(fica.social_security_rate.percent()),
        ),
        row(
            "Maximum Social Security tax",
            format_usd(fica.max_social_security_tax),
        ),
        row(
            "Medicare tax rate",
            format_pct(fica.regular_medicare_rate.percent()),
        ),
        row(
            "Additional Medicare tax rate",
            format_pct(fica.additional_medicare_rate.percent()),
        ),
        row(
            "Net investment income tax rate",
            format_pct(dataset.net_investment_income_tax.rate.percent()),
        ),
        row(
            "HSA limit (self-only)",
            format_usd(dataset.hsa_limit(HsaCoverage::SelfOnly)),
        ),
        row(
            "HSA limit (family)",
            format_usd(dataset.hsa_limit(HsaCoverage::Family)),
        ),
        row(
            "EIC investment income limit",
            format_usd(dataset.eic.max_investment_income),
        ),
        row("Child under age", deps.child_max_age.to_string()),
        row(
            "Qualifying dependent under age",
            deps.qualifying_dependent_max_age.to_string(),
        ),
        row(
            "Qualifying student under age",
            deps.qualifying_student_max_age.to_string(),
        ),
    ];
    for status in FilingStatus::ALL {
        rows.push(row(
            &format!("Additional Medicare threshold ({})", status.code()),
            format_usd(*fica.additional_medicare_threshold.get(status)),
        ));
    }
    for status in FilingStatus::ALL {
        rows.push(row(
            &format!("NIIT threshold ({})", status.code()),
            format_usd(*dataset.net_investment_income_tax.threshold.get(status)),
        ));
    }
    rows
}
