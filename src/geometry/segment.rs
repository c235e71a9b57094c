//! Bounded line segments
//!
//! A segment is a `Line` plus a `[from, to]` bound interval. For non-vertical
//! segments the bounds run along x; for vertical segments they run along y.

use crate::error::FuzzyResult;
use crate::geometry::line::{Line, Point};

/// A bounded line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub line: Line,
    /// Smaller bound (y if vertical, x otherwise)
    pub from: f64,
    /// Bigger bound (y if vertical, x otherwise)
    pub to: f64,
}

impl LineSegment {
    /// The segment between two points.
    pub fn between_points(p1: Point, p2: Point) -> Self {
        if p1.x == p2.x {
            // Vertical; bounds run along y
            let (y_from, y_to) = if p1.y < p2.y { (p1.y, p2.y) } else { (p2.y, p1.y) };
            return LineSegment {
                line: Line::between_points(p1, p2),
                from: y_from,
                to: y_to,
            };
        }

        Self::restrict_x_domain(Line::between_points(p1, p2), p1.x, p2.x)
    }

    /// The horizontal segment at height `y` spanning `[x_from, x_to]`.
    pub fn horizontal(y: f64, x_from: f64, x_to: f64) -> Self {
        LineSegment {
            line: Line::new(0.0, y),
            from: x_from,
            to: x_to,
        }
    }

    /// The vertical segment at `x` spanning `[y_from, y_to]`.
    pub fn vertical(x: f64, y_from: f64, y_to: f64) -> Self {
        LineSegment {
            line: Line::vertical(x),
            from: y_from,
            to: y_to,
        }
    }

    /// A segment on `line` bounded to the given x range.
    pub fn restrict_x_domain(line: Line, x1: f64, x2: f64) -> Self {
        LineSegment {
            line,
            from: x1.min(x2),
            to: x1.max(x2),
        }
    }

    /// A segment on `line` bounded to the given y range.
    ///
    /// For non-vertical lines the bounds are re-derived through the inverse
    /// evaluation and min/max'd, since the slope sign determines which comes
    /// first along x. Vertical lines take the y range as bounds directly.
    /// Fails for horizontal lines, whose inverse is undefined.
    pub fn restrict_y_domain(line: Line, y1: f64, y2: f64) -> FuzzyResult<Self> {
        if line.is_vertical() {
            return Ok(LineSegment {
                line,
                from: y1.min(y2),
                to: y1.max(y2),
            });
        }

        let x1 = line.evaluate_at_y(y1)?;
        let x2 = line.evaluate_at_y(y2)?;

        Ok(LineSegment {
            line,
            from: x1.min(x2),
            to: x1.max(x2),
        })
    }

    /// Evaluates the segment's y at a given x.
    ///
    /// Fails for vertical segments; returns `None` when x lies outside the
    /// bounds (ends inclusive).
    pub fn evaluate_at_x(&self, x: f64) -> FuzzyResult<Option<f64>> {
        let y = self.line.evaluate_at_x(x)?;

        if x < self.from || x > self.to {
            return Ok(None);
        }

        Ok(Some(y))
    }

    /// Evaluates the segment's x at a given y.
    ///
    /// Fails for horizontal segments; returns `None` when the resulting x lies
    /// outside the bounds (ends inclusive).
    pub fn evaluate_at_y(&self, y: f64) -> FuzzyResult<Option<f64>> {
        let x = self.line.evaluate_at_y(y)?;

        if x < self.from || x > self.to {
            return Ok(None);
        }

        Ok(Some(x))
    }

    /// Computes the point of intersection between two segments, end points
    /// included.
    ///
    /// The underlying line intersection is clipped against both segments'
    /// bound intervals. Coincident overlapping vertical segments return the
    /// sentinel `(x, 0)` inherited from `Line::intersect`.
    pub fn intersect(&self, other: &LineSegment) -> Option<Point> {
        if self.line.is_vertical() && other.line.is_vertical() {
            let overlapping = self.line.intercept == other.line.intercept
                && other.to >= self.from
                && other.from <= self.to;
            return if overlapping {
                Some(Point::new(self.line.intercept, 0.0))
            } else {
                None
            };
        }

        if self.line.is_vertical() || other.line.is_vertical() {
            let (vertical, sloped) = if self.line.is_vertical() {
                (self, other)
            } else {
                (other, self)
            };

            let x = vertical.line.intercept;
            if x < sloped.from || x > sloped.to {
                return None;
            }

            let y = sloped.line.slope * x + sloped.line.intercept;
            if y < vertical.from || y > vertical.to {
                return None;
            }

            return Some(Point::new(x, y));
        }

        // Both segments are non-vertical
        let point = self.line.intersect(&other.line)?;

        // Checking bounds inclusion.
        if point.x < self.from || point.x > self.to || point.x < other.from || point.x > other.to {
            return None;
        }

        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_respects_bounds() {
        let seg = LineSegment {
            line: Line::new(1.0, 0.0),
            from: -1.0,
            to: 5.0,
        };

        assert!((seg.evaluate_at_x(3.0).unwrap().unwrap() - 3.0).abs() < 1e-9);
        assert!((seg.evaluate_at_x(-1.0).unwrap().unwrap() - (-1.0)).abs() < 1e-9);

        assert_eq!(seg.evaluate_at_x(-2.0).unwrap(), None);
        assert_eq!(seg.evaluate_at_x(6.0).unwrap(), None);
    }

    #[test]
    fn test_crossing_segments_intersect() {
        let a = LineSegment::between_points(Point::new(1.0, 1.0), Point::new(3.0, 3.0));
        let b = LineSegment::between_points(Point::new(3.0, 1.0), Point::new(1.0, 3.0));

        let p = a.intersect(&b).unwrap();
        assert!((p.x - 2.0).abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_sloped_and_vertical_intersect() {
        let a = LineSegment::between_points(Point::new(1.0, 1.0), Point::new(3.0, 3.0));
        let b = LineSegment::vertical(2.0, -3.0, 3.0);

        let p = a.intersect(&b).unwrap();
        assert!((p.x - 2.0).abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_out_of_y_range_misses() {
        let a = LineSegment::between_points(Point::new(1.0, 1.0), Point::new(3.0, 3.0));
        let b = LineSegment::vertical(2.0, -2.0, 0.0);

        assert_eq!(a.intersect(&b), None);
    }

    #[test]
    fn test_non_overlapping_segments_miss() {
        let a = LineSegment::between_points(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = LineSegment::between_points(Point::new(3.0, 0.0), Point::new(4.0, -1.0));

        assert_eq!(a.intersect(&b), None);
    }

    #[test]
    fn test_coincident_vertical_segments() {
        let a = LineSegment::vertical(2.0, 0.0, 2.0);
        let b = LineSegment::vertical(2.0, 1.0, 3.0);
        let c = LineSegment::vertical(2.0, 5.0, 6.0);

        assert_eq!(a.intersect(&b), Some(Point::new(2.0, 0.0)));
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn test_restrict_y_domain_negative_slope() {
        let line = Line::new(-1.0, 0.0);
        let seg = LineSegment::restrict_y_domain(line, 0.0, 1.0).unwrap();

        // y in [0, 1] maps to x in [-1, 0]
        assert!((seg.from - (-1.0)).abs() < 1e-9);
        assert!((seg.to - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_restrict_y_domain_vertical() {
        let seg = LineSegment::restrict_y_domain(Line::vertical(4.0), 0.0, 0.5).unwrap();

        assert_eq!(seg.from, 0.0);
        assert_eq!(seg.to, 0.5);
        assert_eq!(seg.line.intercept, 4.0);
    }

    #[test]
    fn test_between_points_vertical_bounds_are_y() {
        let seg = LineSegment::between_points(Point::new(1.0, 4.0), Point::new(1.0, -2.0));

        assert_eq!(seg.from, -2.0);
        assert_eq!(seg.to, 4.0);
        assert!(seg.line.is_vertical());
    }
}
