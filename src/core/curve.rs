//! Piecewise-linear curves through ordered control points.
//!
//! Used for credits that phase in, plateau and phase out as income rises, but
//! nothing here limits the number of points or the shape.

use super::error::TableError;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPoint {
    pub x: Decimal,
    pub y: Decimal,
}

impl From<(Decimal, Decimal)> for ControlPoint {
    fn from((x, y): (Decimal, Decimal)) -> Self {
        ControlPoint { x, y }
    }
}

/// Straight line between two consecutive control points, covering
/// `[lower_bound, upper_bound)`.
///
/// Rise and run are taken once, when the curve is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    start: ControlPoint,
    end: ControlPoint,
    rise: Decimal,
    run: Decimal,
}

impl Segment {
    fn between(start: ControlPoint, end: ControlPoint) -> Self {
        Segment {
            start,
            end,
            rise: end.y - start.y,
            run: end.x - start.x,
        }
    }

    pub fn lower_bound(&self) -> Decimal {
        self.start.x
    }

    pub fn upper_bound(&self) -> Decimal {
        self.end.x
    }

    pub fn slope(&self) -> Decimal {
        self.rise / self.run
    }

    pub fn intercept(&self) -> Decimal {
        self.start.y - self.start.x * self.slope()
    }

    /// Value of the segment's line at `x`, inside or outside its range.
    ///
    /// Point-slope form over the stored rise and run, so both end points
    /// reproduce their `y` exactly. Same line as `slope * x + intercept`.
    pub fn value_at(&self, x: Decimal) -> Decimal {
        self.start.y + (x - self.start.x) * self.rise / self.run
    }
}

/// Continuous piecewise-linear function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiecewiseCurve {
    segments: Vec<Segment>,
}

impl PiecewiseCurve {
    /// Build the `N - 1` segments through `points`.
    ///
    /// Requires at least two points with strictly increasing `x`.
    pub fn new<P>(points: impl IntoIterator<Item = P>) -> Result<Self, TableError>
    where
        P: Into<ControlPoint>,
    {
        let points: Vec<ControlPoint> = points.into_iter().map(Into::into).collect();
        if points.len() < 2 {
            return Err(TableError::TooFewPoints {
                count: points.len(),
            });
        }
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].x <= pair[0].x {
                return Err(TableError::ControlPointsNotIncreasing {
                    index: index + 1,
                    previous: pair[0].x,
                    value: pair[1].x,
                });
            }
        }
        let segments = points
            .windows(2)
            .map(|pair| Segment::between(pair[0], pair[1]))
            .collect();
        Ok(PiecewiseCurve { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Control points the curve was built from
    pub fn points(&self) -> Vec<ControlPoint> {
        let mut points: Vec<_> = self.segments.iter().map(|s| s.start).collect();
        if let Some(last) = self.segments.last() {
            points.push(last.end);
        }
        points
    }

    /// Evaluate at `x`.
    ///
    /// The last segment whose lower bound is `<= x` is used. Below the first
    /// point the first segment is extrapolated, beyond the last point the last
    /// segment is. Extrapolation can go negative; clamping is up to the caller.
    pub fn evaluate(&self, x: Decimal) -> Decimal {
        let segment = self
            .segments
            .iter()
            .rev()
            .find(|s| s.lower_bound() <= x)
            .unwrap_or(&self.segments[0]);
        segment.value_at(x)
    }
}
