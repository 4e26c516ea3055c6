//! Liability-relevant figures for one taxpayer and one tax year.
//!
//! Everything here is composed from the bracket, tier and curve evaluators over
//! a `YearDataset`; no year-specific number appears in this module.

use crate::core::{
    FilingStatus, Rate, SocialSecurityBase, TaggedAmount, TaxYear, Warning, YearDataset,
};
use fedtax_derive::CsvSchema;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// CSV column description, generated by `#[derive(CsvSchema)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LiabilityError {
    #[error("no standard deduction for {status} with {allowances} allowances (at most {max})")]
    NoStandardDeduction {
        status: FilingStatus,
        allowances: u8,
        max: usize,
    },
    #[error("{field} must not be negative: {value}")]
    NegativeAmount { field: &'static str, value: Decimal },
}

/// Income figures for one return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, CsvSchema)]
pub struct TaxProfile {
    /// Filing status (S, MFJ, MFS, HOH, W)
    pub filing_status: FilingStatus,
    /// Wages, salaries and other earned income
    #[schemars(with = "String")]
    pub wages: Decimal,
    /// Other ordinary income such as interest and non-qualified dividends
    #[serde(default)]
    #[schemars(with = "String")]
    pub other_income: Decimal,
    /// Qualified dividends plus net long-term capital gains
    #[serde(default)]
    #[schemars(with = "String")]
    pub qualified_income: Decimal,
    /// Net investment income for the NIIT and the credit investment limit
    #[serde(default)]
    #[schemars(with = "String")]
    pub net_investment_income: Decimal,
    /// Social Security benefits received
    #[serde(default)]
    #[schemars(with = "String")]
    pub social_security_benefits: Decimal,
    /// Age 65+ or blindness allowances for the standard deduction
    #[serde(default)]
    pub allowances: u8,
    /// Qualifying children for the earned income credit
    #[serde(default)]
    pub qualifying_children: u8,
    /// Alternative minimum taxable income, when AMT applies
    #[serde(default)]
    #[schemars(with = "Option<String>")]
    pub amt_income: Option<Decimal>,
}

impl TaxProfile {
    pub fn new(filing_status: FilingStatus, wages: Decimal) -> Self {
        TaxProfile {
            filing_status,
            wages,
            other_income: Decimal::ZERO,
            qualified_income: Decimal::ZERO,
            net_investment_income: Decimal::ZERO,
            social_security_benefits: Decimal::ZERO,
            allowances: 0,
            qualifying_children: 0,
            amt_income: None,
        }
    }

    fn check_non_negative(&self) -> Result<(), LiabilityError> {
        let amounts = [
            ("wages", self.wages),
            ("other_income", self.other_income),
            ("qualified_income", self.qualified_income),
            ("net_investment_income", self.net_investment_income),
            ("social_security_benefits", self.social_security_benefits),
            ("amt_income", self.amt_income.unwrap_or(Decimal::ZERO)),
        ];
        match amounts.iter().find(|(_, value)| *value < Decimal::ZERO) {
            Some((field, value)) => Err(LiabilityError::NegativeAmount {
                field: *field,
                value: *value,
            }),
            None => Ok(()),
        }
    }
}

/// Calculated figures. Amounts are unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiabilityReport {
    pub year: TaxYear,
    pub filing_status: FilingStatus,
    pub taxable_social_security: Decimal,
    /// Adjusted gross income (no adjustments are modelled)
    pub gross_income: Decimal,
    pub standard_deduction: TaggedAmount,
    pub exemptions: Decimal,
    pub taxable_income: Decimal,
    pub ordinary_taxable_income: Decimal,
    /// Qualified income that made it into taxable income
    pub preferential_income: Decimal,
    pub ordinary_tax: Decimal,
    pub capital_gains_tax: Decimal,
    pub marginal_rate: Decimal,
    pub amt_exemption: Option<Decimal>,
    pub tentative_minimum_tax: Option<Decimal>,
    pub alternative_minimum_tax: Decimal,
    pub additional_medicare_tax: Decimal,
    pub net_investment_income_tax: Decimal,
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub earned_income_credit: Decimal,
    /// Income tax, capital gains tax, AMT and surtaxes
    pub total_tax: Decimal,
    /// `total_tax` less refundable credits
    pub net_liability: Decimal,
    pub warnings: Vec<Warning>,
}

impl LiabilityReport {
    /// Employee share of Social Security and regular Medicare
    pub fn payroll_tax(&self) -> Decimal {
        self.social_security_tax + self.medicare_tax
    }

    /// Copy with every amount rounded to cents
    pub fn rounded(&self) -> Self {
        let cents = |d: Decimal| {
            let mut d = d.round_dp(2);
            d.rescale(2);
            d
        };
        LiabilityReport {
            taxable_social_security: cents(self.taxable_social_security),
            gross_income: cents(self.gross_income),
            exemptions: cents(self.exemptions),
            taxable_income: cents(self.taxable_income),
            ordinary_taxable_income: cents(self.ordinary_taxable_income),
            preferential_income: cents(self.preferential_income),
            ordinary_tax: cents(self.ordinary_tax),
            capital_gains_tax: cents(self.capital_gains_tax),
            amt_exemption: self.amt_exemption.map(cents),
            tentative_minimum_tax: self.tentative_minimum_tax.map(cents),
            alternative_minimum_tax: cents(self.alternative_minimum_tax),
            additional_medicare_tax: cents(self.additional_medicare_tax),
            net_investment_income_tax: cents(self.net_investment_income_tax),
            social_security_tax: cents(self.social_security_tax),
            medicare_tax: cents(self.medicare_tax),
            earned_income_credit: cents(self.earned_income_credit),
            total_tax: cents(self.total_tax),
            net_liability: cents(self.net_liability),
            ..self.clone()
        }
    }
}

/// Share of Social Security benefits included in income above / within the
/// additional amount band
const BENEFITS_UPPER_INCLUSION: Decimal = dec!(0.85);
const BENEFITS_LOWER_INCLUSION: Decimal = dec!(0.5);

/// Calculate every liability figure of `profile` under `dataset`
pub fn calculate_liability(
    dataset: &YearDataset,
    profile: &TaxProfile,
) -> Result<LiabilityReport, LiabilityError> {
    profile.check_non_negative()?;
    let status = profile.filing_status;
    let mut warnings = Vec::new();

    let schedule = dataset.ordinary.get(status);
    let standard_deduction = dataset
        .standard_deduction(status, profile.allowances)
        .ok_or(LiabilityError::NoStandardDeduction {
            status,
            allowances: profile.allowances,
            max: schedule.deductions.len() - 1,
        })?
        .clone();
    let exemptions = schedule.exemption_total();

    let other_gross = profile.wages + profile.other_income + profile.qualified_income;
    let taxable_social_security = taxable_social_security(
        profile.social_security_benefits,
        other_gross,
        dataset.social_security_benefits.get(status),
    );
    let gross_income = other_gross + taxable_social_security;

    let taxable_income =
        (gross_income - standard_deduction.amount - exemptions).max(Decimal::ZERO);
    let preferential_income = profile.qualified_income.min(taxable_income);
    let ordinary_taxable_income = taxable_income - preferential_income;

    let ordinary = dataset.ordinary_brackets(status);
    let ordinary_tax = ordinary.tax_on(ordinary_taxable_income);
    let marginal_rate = ordinary.marginal_rate(ordinary_taxable_income);

    // gains sit on top of ordinary income in the capital gains schedule
    let gains = dataset.capital_gains_brackets(status);
    let capital_gains_tax = gains.tax_on(taxable_income) - gains.tax_on(ordinary_taxable_income);
    let regular_tax = ordinary_tax + capital_gains_tax;

    let amt = alternative_minimum_tax(dataset, status, profile.amt_income, &mut warnings);
    let alternative_minimum_tax = amt
        .tentative_minimum_tax
        .map_or(Decimal::ZERO, |tmt| (tmt - regular_tax).max(Decimal::ZERO));

    let fica = &dataset.fica;
    let social_security_tax = fica
        .social_security_rate
        .of(profile.wages.min(fica.social_security_wage_base));
    let medicare_tax = fica.regular_medicare_rate.of(profile.wages);
    let additional_medicare_tax = surtax(
        fica.additional_medicare_rate,
        profile.wages,
        *fica.additional_medicare_threshold.get(status),
    );

    let niit = &dataset.net_investment_income_tax;
    let over_threshold = (gross_income - *niit.threshold.get(status)).max(Decimal::ZERO);
    let net_investment_income_tax = niit
        .rate
        .of(profile.net_investment_income.min(over_threshold));

    let claim = EicClaim {
        filing_status: status,
        qualifying_children: profile.qualifying_children,
        earned_income: profile.wages,
        agi: gross_income,
        investment_income: profile.net_investment_income,
    };
    let earned_income_credit = earned_income_credit(dataset, &claim, &mut warnings);

    let total_tax = regular_tax
        + alternative_minimum_tax
        + additional_medicare_tax
        + net_investment_income_tax;

    log::debug!(
        "{} {}: taxable {} ordinary tax {} gains tax {} total {}",
        dataset.year,
        status.code(),
        taxable_income,
        ordinary_tax,
        capital_gains_tax,
        total_tax
    );

    Ok(LiabilityReport {
        year: dataset.year,
        filing_status: status,
        taxable_social_security,
        gross_income,
        standard_deduction,
        exemptions,
        taxable_income,
        ordinary_taxable_income,
        preferential_income,
        ordinary_tax,
        capital_gains_tax,
        marginal_rate: marginal_rate.percent(),
        amt_exemption: amt.exemption,
        tentative_minimum_tax: amt.tentative_minimum_tax,
        alternative_minimum_tax,
        additional_medicare_tax,
        net_investment_income_tax,
        social_security_tax,
        medicare_tax,
        earned_income_credit,
        total_tax,
        net_liability: total_tax - earned_income_credit,
        warnings,
    })
}

/// `rate` applied to the part of `amount` above `threshold`
fn surtax(rate: Rate, amount: Decimal, threshold: Decimal) -> Decimal {
    rate.of((amount - threshold).max(Decimal::ZERO))
}

/// Social Security benefits worksheet
pub fn taxable_social_security(
    benefits: Decimal,
    other_income: Decimal,
    base: &SocialSecurityBase,
) -> Decimal {
    if benefits <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let half = benefits * BENEFITS_LOWER_INCLUSION;
    let provisional = half + other_income;
    if provisional <= base.base_amount {
        return Decimal::ZERO;
    }
    let over_base = provisional - base.base_amount;
    let over_additional = (over_base - base.additional_amount).max(Decimal::ZERO);
    let within_additional = over_base.min(base.additional_amount);
    let lower = half.min(within_additional * BENEFITS_LOWER_INCLUSION);
    let taxable = lower + over_additional * BENEFITS_UPPER_INCLUSION;
    taxable.min(benefits * BENEFITS_UPPER_INCLUSION)
}

struct AmtOutcome {
    exemption: Option<Decimal>,
    tentative_minimum_tax: Option<Decimal>,
}

fn alternative_minimum_tax(
    dataset: &YearDataset,
    status: FilingStatus,
    amt_income: Option<Decimal>,
    warnings: &mut Vec<Warning>,
) -> AmtOutcome {
    let Some(amt_income) = amt_income else {
        return AmtOutcome {
            exemption: None,
            tentative_minimum_tax: None,
        };
    };
    match dataset.amt.exemption.get(status).select(amt_income) {
        Some(tier) => {
            let base = (amt_income - tier.amount).max(Decimal::ZERO);
            AmtOutcome {
                exemption: Some(tier.amount),
                tentative_minimum_tax: Some(dataset.amt.schedule.get(status).tax_on(base)),
            }
        }
        None => {
            log::warn!(
                "AMT income {} is above every exemption tier for {}; exemption worksheet required",
                amt_income,
                status
            );
            warnings.push(Warning::AmtExemptionWorksheetRequired { status, amt_income });
            AmtOutcome {
                exemption: None,
                tentative_minimum_tax: None,
            }
        }
    }
}

/// Inputs to the earned income credit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EicClaim {
    pub filing_status: FilingStatus,
    pub qualifying_children: u8,
    pub earned_income: Decimal,
    pub agi: Decimal,
    pub investment_income: Decimal,
}

/// Earned income credit, never negative
pub fn earned_income_credit(
    dataset: &YearDataset,
    claim: &EicClaim,
    warnings: &mut Vec<Warning>,
) -> Decimal {
    let status = claim.filing_status;
    let Some(schedule) = dataset.eic.schedules.get(status) else {
        if claim.earned_income > Decimal::ZERO {
            warnings.push(Warning::EicNotAvailable { status });
        }
        return Decimal::ZERO;
    };
    let limit = dataset.eic.max_investment_income;
    if claim.investment_income > limit {
        warnings.push(Warning::EicInvestmentIncomeExceeded {
            limit,
            actual: claim.investment_income,
        });
        return Decimal::ZERO;
    }

    let (cap, curve) = schedule.for_children(claim.qualifying_children);
    if claim.earned_income >= cap || claim.agi >= cap {
        return Decimal::ZERO;
    }
    let mut credit = curve.evaluate(claim.earned_income);
    if claim.agi > claim.earned_income {
        credit = credit.min(curve.evaluate(claim.agi));
    }
    if credit < Decimal::ZERO {
        log::warn!("Credit curve gave {} at {}, using zero", credit, claim.earned_income);
        warnings.push(Warning::NegativeCreditClamped {
            curve_value: credit,
        });
        credit = Decimal::ZERO;
    }
    credit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::dataset_for;
    use proptest::prelude::{prop_assert, proptest};

    fn ds() -> YearDataset {
        dataset_for(TaxYear(2024)).unwrap()
    }

    fn single(wages: Decimal) -> TaxProfile {
        TaxProfile::new(FilingStatus::Single, wages)
    }

    #[test]
    fn single_wage_earner() {
        let report = calculate_liability(&ds(), &single(dec!(60000))).unwrap();
        assert_eq!(report.standard_deduction.amount, dec!(14600));
        assert_eq!(report.taxable_income, dec!(45400));
        assert_eq!(report.ordinary_tax, dec!(5216));
        assert_eq!(report.marginal_rate, dec!(12));
        assert_eq!(report.capital_gains_tax, Decimal::ZERO);
        assert_eq!(report.social_security_tax, dec!(3720));
        assert_eq!(report.medicare_tax, dec!(870));
        assert_eq!(report.payroll_tax(), dec!(4590));
        assert_eq!(report.earned_income_credit, Decimal::ZERO);
        assert_eq!(report.total_tax, dec!(5216));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn income_below_deduction_is_untaxed() {
        let report = calculate_liability(&ds(), &single(dec!(10000))).unwrap();
        assert_eq!(report.taxable_income, Decimal::ZERO);
        assert_eq!(report.ordinary_tax, Decimal::ZERO);
    }

    #[test]
    fn qualified_income_in_zero_bracket() {
        let mut profile = TaxProfile::new(FilingStatus::MarriedFilingJointly, dec!(100000));
        profile.qualified_income = dec!(20000);
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.taxable_income, dec!(90800));
        assert_eq!(report.ordinary_taxable_income, dec!(70800));
        assert_eq!(report.preferential_income, dec!(20000));
        assert_eq!(report.ordinary_tax, dec!(8032));
        assert_eq!(report.capital_gains_tax, Decimal::ZERO);
    }

    #[test]
    fn qualified_income_stacked_over_ordinary() {
        let mut profile = TaxProfile::new(FilingStatus::MarriedFilingJointly, dec!(100000));
        profile.qualified_income = dec!(40000);
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.taxable_income, dec!(110800));
        assert_eq!(report.capital_gains_tax, dec!(2512.5));
        assert_eq!(report.total_tax, dec!(10544.5));
    }

    #[test]
    fn qualified_income_larger_than_taxable_income() {
        let mut profile = single(Decimal::ZERO);
        profile.qualified_income = dec!(20000);
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.taxable_income, dec!(5400));
        assert_eq!(report.preferential_income, dec!(5400));
        assert_eq!(report.ordinary_taxable_income, Decimal::ZERO);
        assert_eq!(report.total_tax, Decimal::ZERO);
    }

    #[test]
    fn allowances_raise_deduction() {
        let mut profile = single(dec!(60000));
        profile.allowances = 2;
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.standard_deduction.amount, dec!(18500));
    }

    #[test]
    fn too_many_allowances_is_an_error() {
        let mut profile = single(dec!(60000));
        profile.allowances = 3;
        assert_eq!(
            calculate_liability(&ds(), &profile),
            Err(LiabilityError::NoStandardDeduction {
                status: FilingStatus::Single,
                allowances: 3,
                max: 2,
            })
        );
    }

    #[test]
    fn negative_amounts_rejected() {
        let profile = single(dec!(-1));
        assert_eq!(
            calculate_liability(&ds(), &profile),
            Err(LiabilityError::NegativeAmount {
                field: "wages",
                value: dec!(-1)
            })
        );
    }

    #[test]
    fn additional_medicare_and_niit() {
        let mut profile = single(dec!(250000));
        profile.qualified_income = dec!(30000);
        profile.net_investment_income = dec!(30000);
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.additional_medicare_tax, dec!(450));
        assert_eq!(report.net_investment_income_tax, dec!(1140));
        assert_eq!(report.social_security_tax, dec!(10453.2));
    }

    #[test]
    fn niit_limited_by_income_over_threshold() {
        let mut profile = single(dec!(190000));
        profile.qualified_income = dec!(30000);
        profile.net_investment_income = dec!(30000);
        let report = calculate_liability(&ds(), &profile).unwrap();
        // 220000 - 200000
        assert_eq!(report.net_investment_income_tax, dec!(760));
    }

    #[test]
    fn eic_on_plateau() {
        let mut profile = single(dec!(20000));
        profile.qualifying_children = 1;
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.earned_income_credit, dec!(4168));
        assert_eq!(report.net_liability, report.total_tax - dec!(4168));
    }

    #[test]
    fn eic_phase_out_midpoint() {
        let mut profile = single(dec!(35913));
        profile.qualifying_children = 1;
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.earned_income_credit, dec!(2084));
    }

    #[test]
    fn eic_uses_smaller_of_earned_and_agi() {
        let mut profile = single(dec!(20000));
        profile.other_income = dec!(15913);
        profile.qualifying_children = 1;
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.earned_income_credit, dec!(2084));
    }

    #[test]
    fn eic_zero_at_cap() {
        let report = calculate_liability(&ds(), &single(dec!(19130))).unwrap();
        assert_eq!(report.earned_income_credit, Decimal::ZERO);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn eic_investment_income_limit() {
        let mut profile = single(dec!(20000));
        profile.qualifying_children = 2;
        profile.net_investment_income = dec!(11601);
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.earned_income_credit, Decimal::ZERO);
        assert_eq!(
            report.warnings,
            vec![Warning::EicInvestmentIncomeExceeded {
                limit: dec!(11600),
                actual: dec!(11601)
            }]
        );
    }

    #[test]
    fn eic_not_available_married_filing_separately() {
        let profile = TaxProfile::new(FilingStatus::MarriedFilingSeparately, dec!(15000));
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.earned_income_credit, Decimal::ZERO);
        assert_eq!(
            report.warnings,
            vec![Warning::EicNotAvailable {
                status: FilingStatus::MarriedFilingSeparately
            }]
        );
    }

    #[test]
    fn amt_within_exemption_tier() {
        let mut profile = single(dec!(300000));
        profile.amt_income = Some(dec!(300000));
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.amt_exemption, Some(dec!(85700)));
        assert_eq!(report.tentative_minimum_tax, Some(dec!(55718)));
        assert_eq!(report.ordinary_tax, dec!(70264.75));
        assert_eq!(report.alternative_minimum_tax, Decimal::ZERO);
    }

    #[test]
    fn amt_above_regular_tax() {
        let mut profile = single(dec!(100000));
        profile.amt_income = Some(dec!(400000));
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.tentative_minimum_tax, Some(dec!(83352)));
        assert_eq!(report.ordinary_tax, dec!(13841));
        assert_eq!(report.alternative_minimum_tax, dec!(69511));
        assert_eq!(report.total_tax, dec!(83352));
    }

    #[test]
    fn amt_exemption_worksheet_signalled() {
        let mut profile = single(dec!(100000));
        profile.amt_income = Some(dec!(700000));
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.amt_exemption, None);
        assert_eq!(report.tentative_minimum_tax, None);
        assert_eq!(report.alternative_minimum_tax, Decimal::ZERO);
        assert_eq!(
            report.warnings,
            vec![Warning::AmtExemptionWorksheetRequired {
                status: FilingStatus::Single,
                amt_income: dec!(700000)
            }]
        );
    }

    #[test]
    fn amt_head_of_household_has_no_tiers() {
        let mut profile = TaxProfile::new(FilingStatus::HeadOfHousehold, dec!(50000));
        profile.amt_income = Some(dec!(1));
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.tentative_minimum_tax, None);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn social_security_worksheet() {
        let base = SocialSecurityBase {
            base_amount: dec!(25000),
            additional_amount: dec!(9000),
        };
        assert_eq!(
            taxable_social_security(dec!(20000), dec!(30000), &base),
            dec!(9600)
        );
        assert_eq!(
            taxable_social_security(dec!(20000), dec!(10000), &base),
            Decimal::ZERO
        );
        // 85% ceiling
        assert_eq!(
            taxable_social_security(dec!(20000), dec!(500000), &base),
            dec!(17000)
        );
        assert_eq!(
            taxable_social_security(Decimal::ZERO, dec!(500000), &base),
            Decimal::ZERO
        );
    }

    #[test]
    fn social_security_benefits_added_to_income() {
        let mut profile = single(dec!(30000));
        profile.social_security_benefits = dec!(20000);
        let report = calculate_liability(&ds(), &profile).unwrap();
        assert_eq!(report.taxable_social_security, dec!(9600));
        assert_eq!(report.gross_income, dec!(39600));
    }

    #[test]
    fn eic_claim_without_a_report() {
        let claim = EicClaim {
            filing_status: FilingStatus::MarriedFilingJointly,
            qualifying_children: 0,
            earned_income: dec!(10000),
            agi: dec!(10000),
            investment_income: Decimal::ZERO,
        };
        let mut warnings = Vec::new();
        assert_eq!(earned_income_credit(&ds(), &claim, &mut warnings), dec!(600));
        assert!(warnings.is_empty());
    }

    #[test]
    fn rounded_report_keeps_cents() {
        let mut profile = single(dec!(30000));
        profile.qualifying_children = 1;
        let report = calculate_liability(&ds(), &profile).unwrap();
        let rounded = report.rounded();
        assert_eq!(rounded.earned_income_credit.scale(), 2);
        assert_eq!(rounded.earned_income_credit, dec!(3068.00));
        assert_eq!(rounded.standard_deduction, report.standard_deduction);
    }

    #[test]
    fn csv_schema_describes_columns() {
        let header = TaxProfile::csv_header();
        assert_eq!(header[0], "filing_status");
        let schema = TaxProfile::csv_schema();
        let wages = schema.iter().find(|f| f.name == "wages").unwrap();
        assert!(wages.required);
        let amt = schema.iter().find(|f| f.name == "amt_income").unwrap();
        assert!(!amt.required);
        let other = schema.iter().find(|f| f.name == "other_income").unwrap();
        assert!(!other.required);
        assert_eq!(schema.len(), header.len());
    }

    proptest! {
        #[test]
        fn income_tax_monotone_in_wages(
            wages in 0u32..800_000,
            raise in 0u32..50_000,
            qualified in 0u32..200_000,
        ) {
            let dataset = ds();
            for status in FilingStatus::ALL {
                let mut lower = TaxProfile::new(status, Decimal::from(wages));
                lower.qualified_income = Decimal::from(qualified);
                let mut higher = lower.clone();
                higher.wages += Decimal::from(raise);
                let a = calculate_liability(&dataset, &lower).unwrap();
                let b = calculate_liability(&dataset, &higher).unwrap();
                prop_assert!(a.ordinary_tax + a.capital_gains_tax <= b.ordinary_tax + b.capital_gains_tax);
            }
        }

        #[test]
        fn earned_income_credit_never_negative(wages in 0u32..100_000, children in 0u8..6) {
            let dataset = ds();
            for status in FilingStatus::ALL {
                let mut profile = TaxProfile::new(status, Decimal::from(wages));
                profile.qualifying_children = children;
                let report = calculate_liability(&dataset, &profile).unwrap();
                prop_assert!(report.earned_income_credit >= Decimal::ZERO);
            }
        }
    }
}
