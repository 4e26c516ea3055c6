use rust_decimal::Decimal;

/// A bracket, tier or curve table that cannot be evaluated.
///
/// Raised when the table is constructed, never during evaluation.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TableError {
    #[error("expected {expected} rates for {breakpoints} breakpoints, found {rates}")]
    RateCountMismatch {
        breakpoints: usize,
        rates: usize,
        expected: usize,
    },
    #[error("first breakpoint ({value}) must not be negative")]
    NegativeBreakpoint { value: Decimal },
    #[error("breakpoint {index} ({value}) is not greater than the previous breakpoint ({previous})")]
    BreakpointsNotIncreasing {
        index: usize,
        previous: Decimal,
        value: Decimal,
    },
    #[error("tier {index} threshold ({value}) is not greater than the previous threshold ({previous})")]
    ThresholdsNotIncreasing {
        index: usize,
        previous: Decimal,
        value: Decimal,
    },
    #[error("a curve needs at least 2 control points, found {count}")]
    TooFewPoints { count: usize },
    #[error("control point {index} x ({value}) is not greater than the previous x ({previous})")]
    ControlPointsNotIncreasing {
        index: usize,
        previous: Decimal,
        value: Decimal,
    },
    #[error("step table is empty")]
    EmptySteps,
}
