//! Breakpoint-partitioned compound shape
//!
//! The final "winning" envelope produced by the stitching walk: each
//! breakpoint interval is owned by exactly one shape, and area/centroid
//! queries clip every sub-interval to the caller's range before delegating
//! to the owning shape.

use std::any::Any;

use crate::error::{ErrorCode, FuzzyError, FuzzyResult};
use crate::geometry::Point;
use crate::membership::{kind, MembershipFunction, ShapeRef};

/// Where a shape starts to take responsibility, until the next breakpoint
#[derive(Clone)]
pub struct Breakpoint {
    pub from: f64,
    pub shape: ShapeRef,
}

/// A shape made up of multiple shapes, each responsible for a slice of the
/// x domain
///
/// The breakpoints partition the full real line: the first `from` is negative
/// infinity and the `from` values increase strictly. Violating this would
/// silently produce wrong areas, so construction validates it.
#[derive(Clone)]
pub struct CompoundShape {
    breakpoints: Vec<Breakpoint>,
}

impl CompoundShape {
    pub fn new(breakpoints: Vec<Breakpoint>) -> FuzzyResult<Self> {
        if breakpoints.is_empty() {
            return Err(FuzzyError::new(
                ErrorCode::InvalidBreakpoints,
                "a compound shape requires at least one breakpoint",
            ));
        }

        if breakpoints[0].from != f64::NEG_INFINITY {
            return Err(FuzzyError::new(
                ErrorCode::InvalidBreakpoints,
                "the first breakpoint must start at negative infinity",
            ));
        }

        for pair in breakpoints.windows(2) {
            if pair[1].from <= pair[0].from {
                return Err(FuzzyError::new(
                    ErrorCode::InvalidBreakpoints,
                    format!(
                        "breakpoints must strictly increase: {} follows {}",
                        pair[1].from, pair[0].from
                    ),
                ));
            }
        }

        Ok(CompoundShape { breakpoints })
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Index of the breakpoint owning `x`: a linear scan from the first
    /// breakpoint while `x` exceeds the next breakpoint's start.
    fn index_containing(&self, x: f64) -> usize {
        let mut idx = 0;

        while let Some(next) = self.breakpoints.get(idx + 1) {
            if x < next.from {
                break;
            }
            idx += 1;
        }

        idx
    }

    /// Calls `callback(owning breakpoint, start, end)` for every sub-interval
    /// of `[from, to]`, clipped to the owning breakpoint's slice.
    fn for_each_section(&self, from: f64, to: f64, mut callback: impl FnMut(&Breakpoint, f64, f64)) {
        let mut idx = self.index_containing(from);
        let mut section_from = from;

        while section_from < to {
            let section_to = match self.breakpoints.get(idx + 1) {
                Some(next) => next.from.min(to),
                None => to,
            };

            callback(&self.breakpoints[idx], section_from, section_to);

            idx += 1;
            section_from = match self.breakpoints.get(idx) {
                Some(bp) => bp.from,
                None => f64::INFINITY,
            };
        }
    }
}

impl MembershipFunction for CompoundShape {
    fn kind(&self) -> &'static str {
        kind::COMPOUND
    }

    fn evaluate(&self, x: f64) -> f64 {
        self.breakpoints[self.index_containing(x)].shape.evaluate(x)
    }

    fn area(&self, from: f64, to: f64, cutoff_height: f64) -> f64 {
        let mut total = 0.0;

        self.for_each_section(from, to, |bp, start, end| {
            total += bp.shape.area(start, end, cutoff_height);
        });

        total
    }

    fn centroid_times_area(&self, from: f64, to: f64, cutoff_height: f64) -> f64 {
        let mut comta = 0.0;

        self.for_each_section(from, to, |bp, start, end| {
            comta += bp.shape.centroid_times_area(start, end, cutoff_height);
        });

        comta
    }

    fn left_most_non_zero(&self) -> Point {
        self.breakpoints
            .iter()
            .map(|bp| bp.shape.left_most_non_zero())
            .reduce(|a, b| if b.x < a.x { b } else { a })
            .unwrap_or(Point::new(f64::NEG_INFINITY, 0.0))
    }

    fn right_most_non_zero(&self) -> Point {
        self.breakpoints
            .iter()
            .map(|bp| bp.shape.right_most_non_zero())
            .reduce(|a, b| if b.x > a.x { b } else { a })
            .unwrap_or(Point::new(f64::INFINITY, 0.0))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::trapezoid::Trapezoid;
    use std::sync::Arc;

    fn close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    fn two_part_compound() -> (CompoundShape, ShapeRef, ShapeRef) {
        // Two adjacent trapezoids handing over at x = 5
        let left: ShapeRef =
            Arc::new(Trapezoid::new().from(0.0, 1.0).to(4.0, 6.0).build().unwrap());
        let right: ShapeRef =
            Arc::new(Trapezoid::new().from(4.0, 6.0).to(9.0, 10.0).build().unwrap());

        let compound = CompoundShape::new(vec![
            Breakpoint {
                from: f64::NEG_INFINITY,
                shape: left.clone(),
            },
            Breakpoint {
                from: 5.0,
                shape: right.clone(),
            },
        ])
        .unwrap();

        (compound, left, right)
    }

    #[test]
    fn test_rejects_bad_breakpoints() {
        let shape: ShapeRef =
            Arc::new(Trapezoid::new().from(0.0, 1.0).to(2.0, 3.0).build().unwrap());

        // Must start at negative infinity
        assert!(CompoundShape::new(vec![Breakpoint {
            from: 0.0,
            shape: shape.clone(),
        }])
        .is_err());

        // Must strictly increase
        assert!(CompoundShape::new(vec![
            Breakpoint {
                from: f64::NEG_INFINITY,
                shape: shape.clone(),
            },
            Breakpoint {
                from: 2.0,
                shape: shape.clone(),
            },
            Breakpoint {
                from: 2.0,
                shape: shape.clone(),
            },
        ])
        .is_err());

        assert!(CompoundShape::new(vec![]).is_err());
    }

    #[test]
    fn test_evaluates_owning_shape() {
        let (compound, left, right) = two_part_compound();

        close(compound.evaluate(2.0), left.evaluate(2.0));
        close(compound.evaluate(4.9), left.evaluate(4.9));
        close(compound.evaluate(5.0), right.evaluate(5.0));
        close(compound.evaluate(8.0), right.evaluate(8.0));
    }

    #[test]
    fn test_area_splits_at_breakpoints() {
        let (compound, left, right) = two_part_compound();

        let area = compound.area(f64::NEG_INFINITY, f64::INFINITY, 1.0);
        let expected = left.area(f64::NEG_INFINITY, 5.0, 1.0) + right.area(5.0, f64::INFINITY, 1.0);

        close(area, expected);
    }

    #[test]
    fn test_area_clips_to_requested_range() {
        let (compound, left, right) = two_part_compound();

        let area = compound.area(3.0, 7.0, 1.0);
        let expected = left.area(3.0, 5.0, 1.0) + right.area(5.0, 7.0, 1.0);

        close(area, expected);
    }

    #[test]
    fn test_centroid_splits_at_breakpoints() {
        let (compound, left, right) = two_part_compound();

        let comta = compound.centroid_times_area(f64::NEG_INFINITY, f64::INFINITY, 1.0);
        let expected = left.centroid_times_area(f64::NEG_INFINITY, 5.0, 1.0)
            + right.centroid_times_area(5.0, f64::INFINITY, 1.0);

        close(comta, expected);
    }

    #[test]
    fn test_non_zero_endpoints_aggregate() {
        let (compound, left, right) = two_part_compound();

        assert_eq!(compound.left_most_non_zero(), left.left_most_non_zero());
        assert_eq!(compound.right_most_non_zero(), right.right_most_non_zero());
    }
}
