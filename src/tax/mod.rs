pub mod liability;
pub mod y2024;

pub use liability::{calculate_liability, LiabilityError, LiabilityReport, TaxProfile};

use crate::core::{DatasetError, DatasetInput, TaxYear, YearDataset};

/// Tax years with a built-in dataset, oldest first
pub fn available_years() -> Vec<TaxYear> {
    vec![TaxYear(2024)]
}

/// Raw built-in tables for `year`
pub fn dataset_input_for(year: TaxYear) -> Option<DatasetInput> {
    match year.0 {
        2024 => Some(y2024::dataset()),
        _ => None,
    }
}

/// Validated built-in dataset for `year`
pub fn dataset_for(year: TaxYear) -> Result<YearDataset, DatasetError> {
    let input = dataset_input_for(year).ok_or_else(|| unsupported(year))?;
    YearDataset::try_from(input)
}

/// Pick the tax year to use.
///
/// An explicit year must have a dataset. Without one, the current calendar
/// year is used, falling back to the newest dataset not after it.
pub fn resolve_year(requested: Option<TaxYear>) -> Result<TaxYear, DatasetError> {
    resolve_year_at(requested, TaxYear::current())
}

pub fn resolve_year_at(
    requested: Option<TaxYear>,
    today: TaxYear,
) -> Result<TaxYear, DatasetError> {
    let available = available_years();
    match requested {
        Some(year) if available.contains(&year) => Ok(year),
        Some(year) => Err(unsupported(year)),
        None => {
            let year = available
                .iter()
                .rev()
                .find(|y| **y <= today)
                .copied()
                .ok_or_else(|| unsupported(today))?;
            if year == today {
                log::info!("Using tax year {}", year);
            } else {
                log::warn!("No dataset for tax year {}, using {}", today, year);
            }
            Ok(year)
        }
    }
}

fn unsupported(year: TaxYear) -> DatasetError {
    let available = available_years()
        .iter()
        .map(|y| y.display())
        .collect::<Vec<_>>()
        .join(", ");
    DatasetError::UnsupportedYear { year, available }
}
