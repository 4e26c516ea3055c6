pub mod brackets;
pub mod curve;
pub mod dataset;
pub mod error;
pub mod rate;
pub mod status;
pub mod warnings;
pub mod year;

// Flat public surface for engine and domain types.
pub use brackets::{
    marginal_tax, select_tier, Bracket, BracketTable, StepTable, TaggedAmount, Tier, TierTable,
};
pub use curve::{ControlPoint, PiecewiseCurve, Segment};
pub use dataset::{
    read_dataset_json, AmtInput, BracketsInput, CapitalGainsInput, DatasetError, DatasetInput,
    EicInput, EicSchedule, FicaInput, HsaCoverage, HsaLimits, NetInvestmentIncomeTaxInput,
    OrdinaryInput, OrdinaryStatusInput, QualifyingDependents, SocialSecurityBase, YearDataset,
};
pub use error::TableError;
pub use rate::Rate;
pub use status::{ByStatus, FilingStatus};
pub use warnings::Warning;
pub use year::TaxYear;
