//! Per-year tables.
//!
//! `DatasetInput` is the published shape of a year's numbers, as stored in
//! JSON and as written in the built-in year modules. `YearDataset` is the
//! validated form the calculators consume; it can only be obtained through
//! `TryFrom<DatasetInput>`, so every table it holds has already been checked.

use super::brackets::{BracketTable, StepTable, TaggedAmount, Tier, TierTable};
use super::curve::PiecewiseCurve;
use super::error::TableError;
use super::rate::Rate;
use super::status::{ByStatus, FilingStatus};
use super::year::TaxYear;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("{path}: {source}")]
    Table {
        path: String,
        #[source]
        source: TableError,
    },
    #[error("{path}: {message}")]
    Inconsistent { path: String, message: String },
    #[error("no dataset for tax year {year} (available: {available})")]
    UnsupportedYear { year: TaxYear, available: String },
    #[error("dataset is for tax year {found}, expected {expected}")]
    YearMismatch { expected: TaxYear, found: TaxYear },
    #[error("invalid dataset json: {0}")]
    Json(#[from] serde_json::Error),
}

fn table_error(path: impl Into<String>) -> impl FnOnce(TableError) -> DatasetError {
    let path = path.into();
    move |source| DatasetError::Table { path, source }
}

/// Input root for a year's dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DatasetInput {
    pub year: TaxYear,
    pub ordinary: OrdinaryInput,
    pub long_term_cap_gains: CapitalGainsInput,
    pub fica: FicaInput,
    pub net_investment_income_tax: NetInvestmentIncomeTaxInput,
    pub health_savings_accounts: HsaLimits,
    pub amt: AmtInput,
    pub eic: EicInput,
    pub qualifying_dependents: QualifyingDependents,
    pub social_security_benefits: ByStatus<SocialSecurityBase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OrdinaryInput {
    /// Whole-number percentages, one more than each status's breakpoints
    #[schemars(with = "Vec<String>")]
    pub rates: Vec<Decimal>,
    pub status: ByStatus<OrdinaryStatusInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OrdinaryStatusInput {
    #[schemars(with = "Vec<String>")]
    pub brackets: Vec<Decimal>,
    /// Standard deduction, indexed by number of age/blindness allowances
    pub deductions: Vec<TaggedAmount>,
    pub exemptions: Vec<TaggedAmount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CapitalGainsInput {
    #[schemars(with = "Vec<String>")]
    pub rates: Vec<Decimal>,
    pub status: ByStatus<BracketsInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BracketsInput {
    #[schemars(with = "Vec<String>")]
    pub brackets: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FicaInput {
    #[schemars(with = "String")]
    pub max_ss_tax: Decimal,
    #[schemars(with = "String")]
    pub max_income_ss_tax_applies: Decimal,
    /// Percent
    #[schemars(with = "String")]
    pub regular_medicare_tax_rate: Decimal,
    /// Percent
    #[schemars(with = "String")]
    pub additional_medicare_tax_rate: Decimal,
    #[schemars(with = "ByStatus<String>")]
    pub additional_medicare_tax_threshold: ByStatus<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NetInvestmentIncomeTaxInput {
    /// Percent
    #[schemars(with = "String")]
    pub tax_rate: Decimal,
    #[schemars(with = "ByStatus<String>")]
    pub tax_threshold: ByStatus<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HsaLimits {
    #[schemars(with = "String")]
    pub self_only: Decimal,
    #[schemars(with = "String")]
    pub family: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AmtInput {
    /// Percent below and above the cap
    #[schemars(with = "Vec<String>")]
    pub rates: Vec<Decimal>,
    /// Exemption tiers by AMT income; statuses without tiers always need the
    /// exemption worksheet
    pub exemption: ByStatus<Vec<Tier>>,
    /// AMT income at which the higher rate starts
    #[schemars(with = "ByStatus<String>")]
    pub cap: ByStatus<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EicInput {
    /// Income limits for 0, 1, 2 and 3+ qualifying children; `null` when the
    /// status cannot claim the credit
    #[schemars(with = "ByStatus<Option<Vec<String>>>")]
    pub caps: ByStatus<Option<Vec<Decimal>>>,
    #[schemars(with = "String")]
    pub max_investment_income: Decimal,
    /// Control points `[x, y]` of one curve per child count
    #[schemars(with = "ByStatus<Option<Vec<Vec<(String, String)>>>>")]
    pub formulas: ByStatus<Option<Vec<Vec<(Decimal, Decimal)>>>>,
}

/// Ages (exclusive) under which a dependent qualifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QualifyingDependents {
    pub child_max_age: u8,
    pub qualifying_dependent_max_age: u8,
    pub qualifying_student_max_age: u8,
}

impl QualifyingDependents {
    /// Counts as a qualifying child for the earned income credit
    pub fn counts_for_eic(&self, age: u8, student: bool) -> bool {
        age < self.qualifying_dependent_max_age
            || (student && age < self.qualifying_student_max_age)
    }

    /// Counts as a child for child-related credits
    pub fn is_child(&self, age: u8) -> bool {
        age < self.child_max_age
    }
}

/// Social Security benefits worksheet amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SocialSecurityBase {
    /// Provisional income above which benefits start to be taxable (line 8)
    #[schemars(with = "String")]
    pub base_amount: Decimal,
    /// Width of the 50% inclusion band (line 10)
    #[schemars(with = "String")]
    pub additional_amount: Decimal,
}

/// Validated tables for one tax year
#[derive(Debug, Clone)]
pub struct YearDataset {
    pub year: TaxYear,
    pub ordinary: ByStatus<OrdinarySchedule>,
    pub long_term_cap_gains: ByStatus<BracketTable>,
    pub fica: Fica,
    pub net_investment_income_tax: NetInvestmentIncomeTax,
    pub health_savings_accounts: HsaLimits,
    pub amt: Amt,
    pub eic: Eic,
    pub qualifying_dependents: QualifyingDependents,
    pub social_security_benefits: ByStatus<SocialSecurityBase>,
    input: DatasetInput,
}

#[derive(Debug, Clone)]
pub struct OrdinarySchedule {
    pub brackets: BracketTable,
    pub deductions: StepTable,
    pub exemptions: Vec<TaggedAmount>,
}

impl OrdinarySchedule {
    pub fn exemption_total(&self) -> Decimal {
        self.exemptions.iter().map(|e| e.amount).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Fica {
    pub social_security_wage_base: Decimal,
    pub max_social_security_tax: Decimal,
    pub social_security_rate: Rate,
    pub regular_medicare_rate: Rate,
    pub additional_medicare_rate: Rate,
    pub additional_medicare_threshold: ByStatus<Decimal>,
}

#[derive(Debug, Clone)]
pub struct NetInvestmentIncomeTax {
    pub rate: Rate,
    pub threshold: ByStatus<Decimal>,
}

#[derive(Debug, Clone)]
pub struct Amt {
    pub exemption: ByStatus<TierTable>,
    pub cap: ByStatus<Decimal>,
    /// Two-rate schedule with the cap as its breakpoint
    pub schedule: ByStatus<BracketTable>,
}

#[derive(Debug, Clone)]
pub struct Eic {
    pub max_investment_income: Decimal,
    pub schedules: ByStatus<Option<EicSchedule>>,
}

/// Credit curves for one filing status, by number of qualifying children
#[derive(Debug, Clone)]
pub struct EicSchedule {
    caps: Vec<Decimal>,
    curves: Vec<PiecewiseCurve>,
}

impl EicSchedule {
    /// Income cap and curve for `children`; counts past the last table use
    /// the last table ("3 or more")
    pub fn for_children(&self, children: u8) -> (Decimal, &PiecewiseCurve) {
        let index = usize::from(children).min(self.curves.len() - 1);
        (self.caps[index], &self.curves[index])
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

impl YearDataset {
    pub fn input(&self) -> &DatasetInput {
        &self.input
    }

    /// SHA-256 of the dataset's canonical JSON, for comparing transcriptions
    pub fn fingerprint(&self) -> anyhow::Result<String> {
        let bytes = serde_json::to_vec(&self.input)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }

    pub fn ordinary_brackets(&self, status: FilingStatus) -> &BracketTable {
        &self.ordinary.get(status).brackets
    }

    pub fn capital_gains_brackets(&self, status: FilingStatus) -> &BracketTable {
        self.long_term_cap_gains.get(status)
    }

    /// Standard deduction for the number of age/blindness allowances
    pub fn standard_deduction(&self, status: FilingStatus, allowances: u8) -> Option<&TaggedAmount> {
        self.ordinary.get(status).deductions.get(usize::from(allowances))
    }

    pub fn hsa_limit(&self, coverage: HsaCoverage) -> Decimal {
        match coverage {
            HsaCoverage::SelfOnly => self.health_savings_accounts.self_only,
            HsaCoverage::Family => self.health_savings_accounts.family,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum HsaCoverage {
    SelfOnly,
    Family,
}

impl TryFrom<DatasetInput> for YearDataset {
    type Error = DatasetError;

    fn try_from(input: DatasetInput) -> Result<Self, Self::Error> {
        let ordinary = input.ordinary.status.try_map(|status, s| {
            let brackets = BracketTable::new(s.brackets.clone(), &input.ordinary.rates)
                .map_err(table_error(format!("ordinary.{}.brackets", status.code())))?;
            let deductions = StepTable::new(s.deductions.clone())
                .map_err(table_error(format!("ordinary.{}.deductions", status.code())))?;
            Ok::<_, DatasetError>(OrdinarySchedule {
                brackets,
                deductions,
                exemptions: s.exemptions.clone(),
            })
        })?;

        let long_term_cap_gains = input.long_term_cap_gains.status.try_map(|status, s| {
            BracketTable::new(s.brackets.clone(), &input.long_term_cap_gains.rates).map_err(
                table_error(format!("long_term_cap_gains.{}.brackets", status.code())),
            )
        })?;

        let fica = validate_fica(&input.fica)?;

        let net_investment_income_tax = NetInvestmentIncomeTax {
            rate: Rate::from_percent(input.net_investment_income_tax.tax_rate),
            threshold: input.net_investment_income_tax.tax_threshold.clone(),
        };

        let amt = validate_amt(&input.amt)?;
        let eic = validate_eic(&input.eic)?;

        log::debug!("Validated dataset for tax year {}", input.year);

        Ok(YearDataset {
            year: input.year,
            ordinary,
            long_term_cap_gains,
            fica,
            net_investment_income_tax,
            health_savings_accounts: input.health_savings_accounts,
            amt,
            eic,
            qualifying_dependents: input.qualifying_dependents,
            social_security_benefits: input.social_security_benefits.clone(),
            input,
        })
    }
}

fn validate_fica(fica: &FicaInput) -> Result<Fica, DatasetError> {
    if fica.max_income_ss_tax_applies <= Decimal::ZERO {
        return Err(DatasetError::Inconsistent {
            path: "fica.max_income_ss_tax_applies".to_string(),
            message: "social security wage base must be greater than zero".to_string(),
        });
    }
    Ok(Fica {
        social_security_wage_base: fica.max_income_ss_tax_applies,
        max_social_security_tax: fica.max_ss_tax,
        social_security_rate: Rate::from_fraction(
            fica.max_ss_tax / fica.max_income_ss_tax_applies,
        ),
        regular_medicare_rate: Rate::from_percent(fica.regular_medicare_tax_rate),
        additional_medicare_rate: Rate::from_percent(fica.additional_medicare_tax_rate),
        additional_medicare_threshold: fica.additional_medicare_tax_threshold.clone(),
    })
}

fn validate_amt(amt: &AmtInput) -> Result<Amt, DatasetError> {
    let exemption = amt.exemption.try_map(|status, tiers| {
        TierTable::new(tiers.clone())
            .map_err(table_error(format!("amt.exemption.{}", status.code())))
    })?;
    let schedule = amt.cap.try_map(|status, cap| {
        BracketTable::new(vec![*cap], &amt.rates)
            .map_err(table_error(format!("amt.cap.{}", status.code())))
    })?;
    Ok(Amt {
        exemption,
        cap: amt.cap.clone(),
        schedule,
    })
}

fn validate_eic(eic: &EicInput) -> Result<Eic, DatasetError> {
    let schedules = eic.formulas.try_map(|status, formulas| {
        let caps = eic.caps.get(status);
        let path = format!("eic.{}", status.code());
        match (caps, formulas) {
            (None, None) => Ok(None),
            (Some(caps), Some(formulas)) => {
                if formulas.is_empty() {
                    return Err(DatasetError::Inconsistent {
                        path,
                        message: "at least one credit curve is required".to_string(),
                    });
                }
                if caps.len() != formulas.len() {
                    return Err(DatasetError::Inconsistent {
                        path,
                        message: format!(
                            "{} income caps for {} credit curves",
                            caps.len(),
                            formulas.len()
                        ),
                    });
                }
                let curves = formulas
                    .iter()
                    .enumerate()
                    .map(|(children, points)| {
                        PiecewiseCurve::new(points.iter().copied())
                            .map_err(table_error(format!("{path}.formulas[{children}]")))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(EicSchedule {
                    caps: caps.clone(),
                    curves,
                }))
            }
            _ => Err(DatasetError::Inconsistent {
                path,
                message: "caps and formulas must both be present or both be null".to_string(),
            }),
        }
    })?;
    Ok(Eic {
        max_investment_income: eic.max_investment_income,
        schedules,
    })
}

/// Read and validate a dataset from JSON
pub fn read_dataset_json<R: Read>(reader: R) -> Result<YearDataset, DatasetError> {
    let input: DatasetInput = serde_json::from_reader(reader)?;
    YearDataset::try_from(input)
}
