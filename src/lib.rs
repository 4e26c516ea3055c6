//! US federal income tax tables and the calculations built on them.
//!
//! `core` holds the year-independent machinery: bracket schedules, tier
//! selection, piecewise-linear credit curves and the validated per-year
//! dataset. `tax` holds the built-in years and the liability calculation.

pub mod core;
pub mod tax;
