use super::error::TableError;
use super::rate::Rate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Progressive rate schedule: `N` ascending breakpoints and `N + 1` rates.
///
/// The first rate applies from zero to the first breakpoint, the last rate to
/// everything above the final breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTable {
    breakpoints: Vec<Decimal>,
    rates: Vec<Rate>,
}

/// A single bracket of a schedule, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub lower: Decimal,
    /// `None` for the top bracket
    pub upper: Option<Decimal>,
    pub rate: Rate,
}

impl BracketTable {
    /// Build a schedule from breakpoints and whole-number percentages
    pub fn new(breakpoints: Vec<Decimal>, percents: &[Decimal]) -> Result<Self, TableError> {
        let rates = percents.iter().copied().map(Rate::from_percent).collect();
        Self::from_rates(breakpoints, rates)
    }

    pub fn from_rates(breakpoints: Vec<Decimal>, rates: Vec<Rate>) -> Result<Self, TableError> {
        if rates.len() != breakpoints.len() + 1 {
            return Err(TableError::RateCountMismatch {
                breakpoints: breakpoints.len(),
                rates: rates.len(),
                expected: breakpoints.len() + 1,
            });
        }
        if let Some(first) = breakpoints.first() {
            if *first < Decimal::ZERO {
                return Err(TableError::NegativeBreakpoint { value: *first });
            }
        }
        for (index, pair) in breakpoints.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(TableError::BreakpointsNotIncreasing {
                    index: index + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }
        Ok(BracketTable { breakpoints, rates })
    }

    pub fn breakpoints(&self) -> &[Decimal] {
        &self.breakpoints
    }

    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// Tax owed on `income` under progressive-bracket semantics.
    ///
    /// Negative income is clamped to zero.
    pub fn tax_on(&self, income: Decimal) -> Decimal {
        let income = income.max(Decimal::ZERO);
        let mut tax = Decimal::ZERO;
        for bracket in self.brackets() {
            if income <= bracket.lower {
                break;
            }
            let top = bracket.upper.map_or(income, |upper| income.min(upper));
            let portion = bracket.rate.of(top - bracket.lower);
            log::debug!(
                "Bracket {}..{} @ {}: taxed {} -> {}",
                bracket.lower,
                bracket.upper.map_or("".to_string(), |u| u.to_string()),
                bracket.rate,
                top - bracket.lower,
                portion
            );
            tax += portion;
        }
        tax
    }

    /// Rate applied to the next unit of income above `income`
    pub fn marginal_rate(&self, income: Decimal) -> Rate {
        let index = self.breakpoints.partition_point(|bp| *bp <= income);
        self.rates[index]
    }

    pub fn brackets(&self) -> impl Iterator<Item = Bracket> + '_ {
        self.rates.iter().enumerate().map(move |(i, rate)| Bracket {
            lower: if i == 0 {
                Decimal::ZERO
            } else {
                self.breakpoints[i - 1]
            },
            upper: self.breakpoints.get(i).copied(),
            rate: *rate,
        })
    }
}

/// Validate a raw schedule and compute the tax on `income` in one step.
///
/// `rates` are whole-number percentages.
pub fn marginal_tax(
    income: Decimal,
    breakpoints: &[Decimal],
    rates: &[Decimal],
) -> Result<Decimal, TableError> {
    let table = BracketTable::new(breakpoints.to_vec(), rates)?;
    Ok(table.tax_on(income))
}

/// Threshold-selected amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Tier {
    #[schemars(with = "String")]
    pub threshold: Decimal,
    #[schemars(with = "String")]
    pub amount: Decimal,
}

/// Tiers ordered from most to least restrictive (ascending thresholds).
///
/// An empty table is valid: it has no applicable tier for any income.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    pub fn new(tiers: Vec<Tier>) -> Result<Self, TableError> {
        for (index, pair) in tiers.windows(2).enumerate() {
            if pair[1].threshold <= pair[0].threshold {
                return Err(TableError::ThresholdsNotIncreasing {
                    index: index + 1,
                    previous: pair[0].threshold,
                    value: pair[1].threshold,
                });
            }
        }
        Ok(TierTable { tiers })
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// First tier whose threshold is not exceeded by `income`.
    ///
    /// `None` means income is above every threshold and the caller has to
    /// fall back to whatever worksheet covers that range.
    pub fn select(&self, income: Decimal) -> Option<&Tier> {
        self.tiers.iter().find(|tier| income <= tier.threshold)
    }
}

/// Validate raw tiers and select the applicable amount in one step
pub fn select_tier(income: Decimal, tiers: &[Tier]) -> Result<Option<Decimal>, TableError> {
    let table = TierTable::new(tiers.to_vec())?;
    Ok(table.select(income).map(|tier| tier.amount))
}

/// Named amount, e.g. a deduction or exemption line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaggedAmount {
    pub name: String,
    #[schemars(with = "String")]
    pub amount: Decimal,
}

/// Amounts selected by exact position, e.g. the standard deduction for a
/// given number of age/blindness allowances
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTable {
    steps: Vec<TaggedAmount>,
}

impl StepTable {
    pub fn new(steps: Vec<TaggedAmount>) -> Result<Self, TableError> {
        if steps.is_empty() {
            return Err(TableError::EmptySteps);
        }
        Ok(StepTable { steps })
    }

    pub fn get(&self, index: usize) -> Option<&TaggedAmount> {
        self.steps.get(index)
    }

    pub fn base(&self) -> &TaggedAmount {
        &self.steps[0]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[TaggedAmount] {
        &self.steps
    }
}
