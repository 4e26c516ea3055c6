use super::status::FilingStatus;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Conditions worth surfacing that do not stop a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// AMT income is above every exemption tier for the filing status; the
    /// exemption has to come from the AMT Exemption Worksheet, which is not
    /// implemented, so no tentative minimum tax was computed.
    AmtExemptionWorksheetRequired {
        status: FilingStatus,
        #[schemars(with = "String")]
        amt_income: Decimal,
    },
    /// The filing status cannot claim the earned income credit.
    EicNotAvailable { status: FilingStatus },
    /// Investment income above the limit disqualifies the earned income credit.
    EicInvestmentIncomeExceeded {
        #[schemars(with = "String")]
        limit: Decimal,
        #[schemars(with = "String")]
        actual: Decimal,
    },
    /// The credit curve extrapolated below zero and was floored.
    NegativeCreditClamped {
        #[schemars(with = "String")]
        curve_value: Decimal,
    },
}
