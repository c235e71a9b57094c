//! Infinite lines in slope/intercept form
//!
//! Vertical lines are encoded with a signed infinite slope; for those the
//! `intercept` field holds the line's x coordinate instead of the y intercept.

use crate::error::{FuzzyError, FuzzyResult};

/// A 2D point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// An infinite line
///
/// Either non-vertical (finite slope, `intercept` = y at x = 0) or vertical
/// (infinite slope, `intercept` = x).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Slope; `+inf` / `-inf` denote a vertical line
    pub slope: f64,
    /// Y coordinate where the line crosses the y axis, or the x coordinate
    /// for vertical lines
    pub intercept: f64,
}

impl Line {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Line { slope, intercept }
    }

    /// The line through two points.
    ///
    /// Equal x coordinates yield a vertical line whose slope sign follows the
    /// direction from `p1` to `p2`; otherwise the points are ordered by x to
    /// get a canonical slope and intercept.
    pub fn between_points(p1: Point, p2: Point) -> Self {
        if p1.x == p2.x {
            // Vertical
            let slope = if p1.y < p2.y {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
            return Line::new(slope, p1.x);
        }

        let (l, r) = if p1.x < p2.x { (p1, p2) } else { (p2, p1) };

        let slope = (r.y - l.y) / (r.x - l.x);
        let intercept = l.y - slope * l.x;

        Line::new(slope, intercept)
    }

    /// The line through `p` with the given slope (infinite slopes allowed).
    pub fn from_point_and_slope(p: Point, slope: f64) -> Self {
        if slope.is_infinite() {
            return Line::new(slope, p.x);
        }

        Line::new(slope, p.y - slope * p.x)
    }

    /// The vertical line at `x`.
    pub fn vertical(x: f64) -> Self {
        Line::new(f64::INFINITY, x)
    }

    pub fn is_horizontal(&self) -> bool {
        self.slope == 0.0
    }

    pub fn is_vertical(&self) -> bool {
        self.slope.is_infinite()
    }

    /// Evaluates the line's y at a given x.
    ///
    /// Fails for vertical lines, which have no single y per x.
    pub fn evaluate_at_x(&self, x: f64) -> FuzzyResult<f64> {
        if self.is_vertical() {
            return Err(FuzzyError::vertical_evaluation());
        }

        Ok(self.slope * x + self.intercept)
    }

    /// Evaluates the line's x at a given y.
    ///
    /// Fails for horizontal lines, which have no single x per y.
    pub fn evaluate_at_y(&self, y: f64) -> FuzzyResult<f64> {
        if self.is_horizontal() {
            return Err(FuzzyError::horizontal_evaluation());
        }

        Ok((y - self.intercept) / self.slope)
    }

    /// Computes the point of intersection between two infinite lines.
    ///
    /// Non-vertical lines with equal slopes never intersect here, coincident
    /// ones included; this is a deliberate simplification, not a general
    /// line-intersection routine. Two coincident vertical lines return the
    /// sentinel `(intercept, 0)`, which callers must special-case.
    pub fn intersect(&self, other: &Line) -> Option<Point> {
        if self.is_vertical() && other.is_vertical() {
            if self.intercept == other.intercept {
                return Some(Point::new(self.intercept, 0.0));
            }
            return None;
        }

        if self.is_vertical() || other.is_vertical() {
            let (vertical, sloped) = if self.is_vertical() {
                (self, other)
            } else {
                (other, self)
            };

            let x = vertical.intercept;
            return Some(Point::new(x, sloped.slope * x + sloped.intercept));
        }

        if self.slope == other.slope {
            // Parallel (coincident included)
            return None;
        }

        let x = (other.intercept - self.intercept) / (self.slope - other.slope);
        let y = self.slope * x + self.intercept;

        Some(Point::new(x, y))
    }
}
