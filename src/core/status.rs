use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Household/marital category selecting which tables apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum FilingStatus {
    #[serde(rename = "S")]
    Single,
    #[serde(rename = "MFJ")]
    MarriedFilingJointly,
    #[serde(rename = "MFS")]
    MarriedFilingSeparately,
    #[serde(rename = "HOH")]
    HeadOfHousehold,
    #[serde(rename = "W")]
    Widowed,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 5] = [
        FilingStatus::Single,
        FilingStatus::MarriedFilingJointly,
        FilingStatus::MarriedFilingSeparately,
        FilingStatus::HeadOfHousehold,
        FilingStatus::Widowed,
    ];

    /// Short code used as the key in dataset files
    pub fn code(&self) -> &'static str {
        match self {
            FilingStatus::Single => "S",
            FilingStatus::MarriedFilingJointly => "MFJ",
            FilingStatus::MarriedFilingSeparately => "MFS",
            FilingStatus::HeadOfHousehold => "HOH",
            FilingStatus::Widowed => "W",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            FilingStatus::Single => "Single",
            FilingStatus::MarriedFilingJointly => "Married Filing Jointly",
            FilingStatus::MarriedFilingSeparately => "Married Filing Separately",
            FilingStatus::HeadOfHousehold => "Head of Household",
            FilingStatus::Widowed => "Qualifying Surviving Spouse",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// One value per filing status.
///
/// Every threshold function of the dataset is one of these, so lookups are a
/// match over a closed set rather than conditional logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ByStatus<T> {
    #[serde(rename = "S")]
    pub single: T,
    #[serde(rename = "MFJ")]
    pub married_filing_jointly: T,
    #[serde(rename = "MFS")]
    pub married_filing_separately: T,
    #[serde(rename = "HOH")]
    pub head_of_household: T,
    #[serde(rename = "W")]
    pub widowed: T,
}

impl<T> ByStatus<T> {
    pub fn get(&self, status: FilingStatus) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::MarriedFilingSeparately => &self.married_filing_separately,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
            FilingStatus::Widowed => &self.widowed,
        }
    }

    /// Build from a function of the status
    pub fn from_fn(mut f: impl FnMut(FilingStatus) -> T) -> Self {
        ByStatus {
            single: f(FilingStatus::Single),
            married_filing_jointly: f(FilingStatus::MarriedFilingJointly),
            married_filing_separately: f(FilingStatus::MarriedFilingSeparately),
            head_of_household: f(FilingStatus::HeadOfHousehold),
            widowed: f(FilingStatus::Widowed),
        }
    }

    /// Convert every entry, stopping at the first failure
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(FilingStatus, &T) -> Result<U, E>,
    ) -> Result<ByStatus<U>, E> {
        Ok(ByStatus {
            single: f(FilingStatus::Single, &self.single)?,
            married_filing_jointly: f(
                FilingStatus::MarriedFilingJointly,
                &self.married_filing_jointly,
            )?,
            married_filing_separately: f(
                FilingStatus::MarriedFilingSeparately,
                &self.married_filing_separately,
            )?,
            head_of_household: f(FilingStatus::HeadOfHousehold, &self.head_of_household)?,
            widowed: f(FilingStatus::Widowed, &self.widowed)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilingStatus, &T)> {
        FilingStatus::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}
