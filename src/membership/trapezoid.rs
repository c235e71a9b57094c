//! Trapezoid membership shape
//!
//! A trapezoid of height 1: zero below `from_low`, a linear ramp up to
//! `from_high`, a plateau until `to_high`, a linear ramp down to `to_low`,
//! zero after. A triangle is the degenerate case `from_high == to_high`;
//! equal ramp breakpoints produce an instant step.

use std::any::Any;

use crate::error::{ErrorCode, FuzzyError, FuzzyResult};
use crate::geometry::{Line, LineSegment, Point};
use crate::membership::{kind, MembershipFunction};

/// A trapezoid shape of height 1
///
/// lower base = `to_low - from_low`, upper base = `to_high - from_high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidShape {
    from_low: f64,
    from_high: f64,
    to_high: f64,
    to_low: f64,
    left_most: Point,
    right_most: Point,
}

impl TrapezoidShape {
    /// Creates a trapezoid, failing unless
    /// `from_low <= from_high <= to_high <= to_low`.
    pub fn new(from_low: f64, from_high: f64, to_high: f64, to_low: f64) -> FuzzyResult<Self> {
        if !(from_low <= from_high && from_high <= to_high && to_high <= to_low) {
            return Err(FuzzyError::new(
                ErrorCode::InvalidTrapezoid,
                format!(
                    "trapezoid breakpoints must be ordered: {} <= {} <= {} <= {} does not hold",
                    from_low, from_high, to_high, to_low
                ),
            ));
        }

        let left_most = if from_high > from_low {
            // Has a ramp
            Point::new(from_low, 0.0)
        } else {
            // Instant jump to 1
            Point::new(from_low, 1.0)
        };

        let right_most = if to_low > to_high {
            Point::new(to_low, 0.0)
        } else {
            Point::new(to_low, 1.0)
        };

        Ok(TrapezoidShape {
            from_low,
            from_high,
            to_high,
            to_low,
            left_most,
            right_most,
        })
    }

    pub fn from_low(&self) -> f64 {
        self.from_low
    }

    pub fn from_high(&self) -> f64 {
        self.from_high
    }

    pub fn to_high(&self) -> f64 {
        self.to_high
    }

    pub fn to_low(&self) -> f64 {
        self.to_low
    }

    /// Decomposes the shape cut at `cutoff_height` into exactly 5 ordered
    /// segments: floor before, rising edge, flat at the cutoff, falling
    /// edge, floor after.
    ///
    /// Degenerate ramps become vertical edge segments spanning
    /// y in [0, cutoff]. Used by the stitching walk to find where two cut
    /// trapezoids cross.
    pub fn line_segments(&self, cutoff_height: f64) -> FuzzyResult<Vec<LineSegment>> {
        let rising_slope = if self.from_low == self.from_high {
            f64::INFINITY
        } else {
            1.0 / (self.from_high - self.from_low)
        };

        let falling_slope = if self.to_high == self.to_low {
            f64::NEG_INFINITY
        } else {
            1.0 / (self.to_high - self.to_low)
        };

        Ok(vec![
            // Floor before
            LineSegment::horizontal(0.0, f64::NEG_INFINITY, self.from_low),
            // Rising edge
            LineSegment::restrict_y_domain(
                Line::from_point_and_slope(Point::new(self.from_low, 0.0), rising_slope),
                0.0,
                cutoff_height,
            )?,
            // Const
            LineSegment::horizontal(cutoff_height, self.from_high, self.to_high),
            // Falling edge
            LineSegment::restrict_y_domain(
                Line::from_point_and_slope(Point::new(self.to_low, 0.0), falling_slope),
                0.0,
                cutoff_height,
            )?,
            // Floor after
            LineSegment::horizontal(0.0, self.to_low, f64::INFINITY),
        ])
    }

    /// X coordinates where the cutoff line crosses the shape, clipped to the
    /// caller's range: `(x1, x2, x3, x4)` = range-clipped feet and the two
    /// cutoff crossings interpolated along the ramps.
    fn cutoff_crossings(&self, from: f64, to: f64, cutoff_height: f64) -> (f64, f64, f64, f64) {
        let x1 = self.from_low.max(from);
        let x4 = self.to_low.min(to);

        let cutoff_inv = 1.0 - cutoff_height;
        let x2 = cutoff_height * self.from_high + cutoff_inv * self.from_low;
        let x3 = cutoff_height * self.to_high + cutoff_inv * self.to_low;

        (x1, x2, x3, x4)
    }
}

impl MembershipFunction for TrapezoidShape {
    fn kind(&self) -> &'static str {
        kind::TRAPEZOID
    }

    fn evaluate(&self, x: f64) -> f64 {
        if x < self.from_low {
            return 0.0;
        }
        if x < self.from_high {
            return (x - self.from_low) / (self.from_high - self.from_low);
        }
        if x < self.to_high {
            return 1.0;
        }
        if x < self.to_low {
            return 1.0 - (x - self.to_high) / (self.to_low - self.to_high);
        }

        0.0
    }

    /// Closed-form trapezoid-of-trapezoid area: left-ramp trapezoidal rule,
    /// flat middle rectangle, symmetric right ramp. When `[from, to]` clips
    /// into the shape the overshooting terms turn negative and cancel, as
    /// long as each clipped stretch stays within one linear piece - which is
    /// how the stitching walk sections the shape.
    fn area(&self, from: f64, to: f64, cutoff_height: f64) -> f64 {
        let cutoff_height = cutoff_height.min(1.0);
        let (x1, x2, x3, x4) = self.cutoff_crossings(from, to, cutoff_height);

        let left_area = (self.evaluate(x1) + cutoff_height) * (x2 - x1) / 2.0;
        let right_area = (self.evaluate(x4) + cutoff_height) * (x4 - x3) / 2.0;
        let middle_area = (x3 - x2) * cutoff_height;

        left_area + middle_area + right_area
    }

    /// Closed-form integral of `x * y(x)`: the ramps use the antiderivative
    /// of a linear function times x evaluated at both bounds, the flat region
    /// contributes `(cutoff / 2) * (x3^2 - x2^2)`.
    fn centroid_times_area(&self, from: f64, to: f64, cutoff_height: f64) -> f64 {
        let cutoff_height = cutoff_height.min(1.0);
        let (x1, x2, x3, x4) = self.cutoff_crossings(from, to, cutoff_height);

        let y1 = self.evaluate(x1);
        let y3 = cutoff_height;
        let y4 = self.evaluate(x4);

        let mut left = 0.0;
        if x2 > x1 {
            let left_slope = (cutoff_height - y1) / (x2 - x1);

            left = (x2 * x2) * (y1 / 2.0 + left_slope / 3.0 * x2 - left_slope / 2.0 * x1)
                - (x1 * x1) * (y1 / 2.0 + left_slope / 3.0 * x1 - left_slope / 2.0 * x1);
        }

        let mut right = 0.0;
        if x4 > x3 {
            let right_slope = (y4 - y3) / (x4 - x3);

            right = (x4 * x4) * (y3 / 2.0 + right_slope / 3.0 * x4 - right_slope / 2.0 * x3)
                - (x3 * x3) * (y3 / 2.0 + right_slope / 3.0 * x3 - right_slope / 2.0 * x3);
        }

        left + right + (cutoff_height / 2.0) * (x3 * x3 - x2 * x2)
    }

    fn left_most_non_zero(&self) -> Point {
        self.left_most
    }

    fn right_most_non_zero(&self) -> Point {
        self.right_most
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Builder for [`TrapezoidShape`]
///
/// Unset edges default to infinity, producing the one-sided shapes a
/// variable's outermost labels typically use. `build` validates the
/// breakpoint ordering and fails fast on misconfiguration.
#[derive(Debug, Clone, Copy)]
pub struct Trapezoid {
    from_low: f64,
    from_high: f64,
    to_high: f64,
    to_low: f64,
}

impl Trapezoid {
    pub fn new() -> Self {
        Trapezoid {
            from_low: f64::NEG_INFINITY,
            from_high: f64::NEG_INFINITY,
            to_high: f64::INFINITY,
            to_low: f64::INFINITY,
        }
    }

    /// Sets the rising ramp: zero at `low`, one at `high`.
    pub fn from(mut self, low: f64, high: f64) -> Self {
        self.from_low = low;
        self.from_high = high;
        self
    }

    /// Sets an instant rising step at `x`.
    pub fn from_step(mut self, x: f64) -> Self {
        self.from_low = x;
        self.from_high = x;
        self
    }

    /// Sets the falling ramp: one at `high`, zero at `low`.
    pub fn to(mut self, high: f64, low: f64) -> Self {
        self.to_high = high;
        self.to_low = low;
        self
    }

    /// Sets an instant falling step at `x`.
    pub fn to_step(mut self, x: f64) -> Self {
        self.to_high = x;
        self.to_low = x;
        self
    }

    pub fn build(self) -> FuzzyResult<TrapezoidShape> {
        TrapezoidShape::new(self.from_low, self.from_high, self.to_high, self.to_low)
    }
}

impl Default for Trapezoid {
    fn default() -> Self {
        Self::new()
    }
}
