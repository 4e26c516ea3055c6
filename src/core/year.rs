use chrono::{Datelike, Local, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// US federal tax year (calendar year, 1 January to 31 December)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Tax year a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        TaxYear(date.year())
    }

    /// Tax year of today's date. The only place the clock is read.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn display(&self) -> String {
        self.0.to_string()
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
