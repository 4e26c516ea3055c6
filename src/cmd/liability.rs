//! Liability command - one return given by flags

use super::{format_pct, format_usd, DatasetArgs, StatusArg};
use clap::Args;
use fedtax::core::{QualifyingDependents, Warning};
use fedtax::tax::{calculate_liability, LiabilityReport, TaxProfile};
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct LiabilityCommand {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Filing status
    #[arg(short, long, value_enum, ignore_case = true)]
    status: StatusArg,

    /// Wages and other earned income
    #[arg(short, long, default_value_t = Decimal::ZERO)]
    wages: Decimal,

    /// Other ordinary income (interest, non-qualified dividends)
    #[arg(long, default_value_t = Decimal::ZERO)]
    other_income: Decimal,

    /// Qualified dividends plus net long-term capital gains
    #[arg(long, default_value_t = Decimal::ZERO)]
    qualified_income: Decimal,

    /// Net investment income
    #[arg(long, default_value_t = Decimal::ZERO)]
    investment_income: Decimal,

    /// Social Security benefits received
    #[arg(long, default_value_t = Decimal::ZERO)]
    social_security: Decimal,

    /// Age 65+ or blindness allowances
    #[arg(long, default_value_t = 0)]
    allowances: u8,

    /// Number of qualifying children for the earned income credit
    #[arg(long, default_value_t = 0)]
    children: u8,

    /// Age of a dependent, counted if young enough to qualify (repeatable)
    #[arg(long = "child-age")]
    child_ages: Vec<u8>,

    /// Age of a full-time student dependent (repeatable)
    #[arg(long = "student-age")]
    student_ages: Vec<u8>,

    /// Alternative minimum taxable income
    #[arg(long)]
    amt_income: Option<Decimal>,

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

impl LiabilityCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let dataset = self.dataset.load()?;
        let profile = self.profile(&dataset.qualifying_dependents);
        let report = calculate_liability(&dataset, &profile)?.rounded();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(())
    }

    fn profile(&self, dependents: &QualifyingDependents) -> TaxProfile {
        let by_age = self
            .child_ages
            .iter()
            .filter(|age| dependents.counts_for_eic(**age, false))
            .count();
        let students = self
            .student_ages
            .iter()
            .filter(|age| dependents.counts_for_eic(**age, true))
            .count();
        let counted = u8::try_from(by_age + students).unwrap_or(u8::MAX);

        TaxProfile {
            filing_status: self.status.into(),
            wages: self.wages,
            other_income: self.other_income,
            qualified_income: self.qualified_income,
            net_investment_income: self.investment_income,
            social_security_benefits: self.social_security,
            allowances: self.allowances,
            qualifying_children: self.children.saturating_add(counted),
            amt_income: self.amt_income,
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct LineRow {
    #[tabled(rename = "Line")]
    line: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn line(line: &'static str, amount: Decimal) -> LineRow {
    LineRow {
        line,
        amount: format_usd(amount),
    }
}

fn print_report(report: &LiabilityReport) {
    println!();
    println!(
        "TAX LIABILITY ({}, {})",
        report.year.display(),
        report.filing_status
    );
    println!();

    let mut rows = vec![
        line("Taxable Social Security", report.taxable_social_security),
        line("Gross income", report.gross_income),
        line("Standard deduction", report.standard_deduction.amount),
        line("Exemptions", report.exemptions),
        line("Taxable income", report.taxable_income),
        line("  Ordinary", report.ordinary_taxable_income),
        line("  Qualified", report.preferential_income),
        line("Ordinary tax", report.ordinary_tax),
        line("Capital gains tax", report.capital_gains_tax),
    ];
    if let Some(tmt) = report.tentative_minimum_tax {
        rows.push(line("Tentative minimum tax", tmt));
    }
    rows.extend([
        line("Alternative minimum tax", report.alternative_minimum_tax),
        line("Additional Medicare tax", report.additional_medicare_tax),
        line("Net investment income tax", report.net_investment_income_tax),
        line("Total tax", report.total_tax),
        line("Earned income credit", report.earned_income_credit),
        line("Net liability", report.net_liability),
    ]);

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!(
        "Marginal rate {} | Payroll: Social Security {}, Medicare {}",
        format_pct(report.marginal_rate),
        format_usd(report.social_security_tax),
        format_usd(report.medicare_tax)
    );

    if !report.warnings.is_empty() {
        println!();
        println!("\u{26A0} {} warning(s):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {}", warning_message(warning));
        }
    }
}

pub fn warning_message(warning: &Warning) -> String {
    match warning {
        Warning::AmtExemptionWorksheetRequired { status, amt_income } => format!(
            "AMT income {} is above every exemption tier for {}; use the exemption worksheet",
            format_usd(*amt_income),
            status
        ),
        Warning::EicNotAvailable { status } => {
            format!("The earned income credit cannot be claimed as {}", status)
        }
        Warning::EicInvestmentIncomeExceeded { limit, actual } => format!(
            "Investment income {} exceeds the earned income credit limit of {}",
            format_usd(*actual),
            format_usd(*limit)
        ),
        Warning::NegativeCreditClamped { curve_value } => format!(
            "Credit curve gave {}, clamped to zero",
            format_usd(*curve_value)
        ),
    }
}
