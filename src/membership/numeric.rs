//! Numerically integrated envelope shape
//!
//! The always-correct fallback to the stitched compound: a pointwise maximum
//! over several shapes, integrated by fixed-slice quadrature instead of in
//! closed form. Infinite bounds are resolved to the outermost non-zero x
//! coordinates of the wrapped shapes.

use std::any::Any;

use crate::error::{FuzzyError, FuzzyResult};
use crate::geometry::Point;
use crate::membership::{kind, MembershipFunction, ShapeRef};

/// Default number of quadrature slices
pub const DEFAULT_SLICES: usize = 25;

/// A pointwise-max envelope over several shapes
#[derive(Clone)]
pub struct NumericCompoundShape {
    shapes: Vec<ShapeRef>,
    slices: usize,
}

impl NumericCompoundShape {
    pub fn new(shapes: Vec<ShapeRef>) -> FuzzyResult<Self> {
        if shapes.is_empty() {
            return Err(FuzzyError::invalid_shape(
                "a numeric compound requires at least one shape",
            ));
        }

        Ok(NumericCompoundShape {
            shapes,
            slices: DEFAULT_SLICES,
        })
    }

    /// Overrides the quadrature slice count. The default of 25 carries no
    /// error-bound guarantee; raise it when the envelope has many narrow
    /// features.
    pub fn with_slices(mut self, slices: usize) -> Self {
        self.slices = slices.max(1);
        self
    }

    pub fn slices(&self) -> usize {
        self.slices
    }

    /// Resolves infinite integration bounds to the envelope's support.
    fn resolve_bounds(&self, from: f64, to: f64) -> (f64, f64) {
        let from = if from == f64::NEG_INFINITY {
            self.shapes
                .iter()
                .fold(f64::INFINITY, |f, s| f.min(s.left_most_non_zero().x))
        } else {
            from
        };

        let to = if to == f64::INFINITY {
            self.shapes
                .iter()
                .fold(f64::NEG_INFINITY, |t, s| t.max(s.right_most_non_zero().x))
        } else {
            to
        };

        (from, to)
    }
}

impl MembershipFunction for NumericCompoundShape {
    fn kind(&self) -> &'static str {
        kind::NUMERIC_COMPOUND
    }

    fn evaluate(&self, x: f64) -> f64 {
        self.shapes
            .iter()
            .map(|s| s.evaluate(x))
            .fold(0.0, f64::max)
    }

    /// Trapezoidal-rule quadrature over the resolved range.
    fn area(&self, from: f64, to: f64, cutoff_height: f64) -> f64 {
        let (from, to) = self.resolve_bounds(from, to);
        let delta_x = (to - from) / self.slices as f64;

        let mut area = 0.0;

        for i in 0..self.slices {
            let x1 = from + delta_x * i as f64;
            let x2 = from + delta_x * (i + 1) as f64;

            let y1 = self.evaluate(x1).min(cutoff_height);
            let y2 = self.evaluate(x2).min(cutoff_height);

            area += delta_x * (y1 + y2) / 2.0;
        }

        area
    }

    /// Per-slice centroid accumulation: each slice's two sampled heights are
    /// treated as a straight line and `x * y` is integrated exactly over it.
    fn centroid_times_area(&self, from: f64, to: f64, cutoff_height: f64) -> f64 {
        let (from, to) = self.resolve_bounds(from, to);
        let delta_x = (to - from) / self.slices as f64;

        let mut comta = 0.0;

        for i in 0..self.slices {
            let x1 = from + delta_x * i as f64;
            let x2 = from + delta_x * (i + 1) as f64;

            let y1 = self.evaluate(x1).min(cutoff_height);
            let y2 = self.evaluate(x2).min(cutoff_height);

            comta += 1.0 / 6.0
                * (y1 * (x2 * x2 + x1 * x2 - 2.0 * x1 * x1)
                    - y2 * (x1 * x1 + x1 * x2 - 2.0 * x2 * x2));
        }

        comta
    }

    fn left_most_non_zero(&self) -> Point {
        self.shapes
            .iter()
            .map(|s| s.left_most_non_zero())
            .reduce(|a, b| if b.x < a.x { b } else { a })
            .unwrap_or(Point::new(f64::NEG_INFINITY, 0.0))
    }

    fn right_most_non_zero(&self) -> Point {
        self.shapes
            .iter()
            .map(|s| s.right_most_non_zero())
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
    use crate::membership::cutoff::CutoffShape;
    use crate::membership::trapezoid::Trapezoid;
    use std::sync::Arc;

    #[test]
    fn test_evaluates_pointwise_max() {
        let a: ShapeRef = Arc::new(Trapezoid::new().from(0.0, 2.0).to(4.0, 6.0).build().unwrap());
        let b: ShapeRef = Arc::new(Trapezoid::new().from(3.0, 5.0).to(7.0, 9.0).build().unwrap());
        let envelope = NumericCompoundShape::new(vec![a.clone(), b.clone()]).unwrap();

        for x in [-1.0, 1.0, 3.5, 4.5, 6.5, 8.0, 10.0] {
            let expected = a.evaluate(x).max(b.evaluate(x));
            assert!((envelope.evaluate(x) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_area_approximates_closed_form() {
        let trapezoid = Trapezoid::new().from(0.0, 5.0).to(10.0, 15.0).build().unwrap();
        let envelope = NumericCompoundShape::new(vec![Arc::new(trapezoid) as ShapeRef])
            .unwrap()
            .with_slices(1000);

        let numeric = envelope.area(f64::NEG_INFINITY, f64::INFINITY, 1.0);
        let exact = trapezoid.area(f64::NEG_INFINITY, f64::INFINITY, 1.0);

        assert!((numeric - exact).abs() < 1e-6);
    }

    #[test]
    fn test_area_is_exact_for_aligned_slices() {
        // 25 slices over [0, 25] align with the trapezoid's breakpoints, so
        // the trapezoidal rule is exact even at the default resolution.
        let trapezoid = Trapezoid::new().from(0.0, 5.0).to(20.0, 25.0).build().unwrap();
        let envelope = NumericCompoundShape::new(vec![Arc::new(trapezoid) as ShapeRef]).unwrap();

        let numeric = envelope.area(f64::NEG_INFINITY, f64::INFINITY, 1.0);
        let exact = trapezoid.area(f64::NEG_INFINITY, f64::INFINITY, 1.0);

        assert_eq!(envelope.slices(), DEFAULT_SLICES);
        assert!((numeric - exact).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_matches_closed_form_for_symmetric_shape() {
        let trapezoid = Trapezoid::new().from(-10.0, -5.0).to(5.0, 10.0).build().unwrap();
        let envelope = NumericCompoundShape::new(vec![Arc::new(trapezoid) as ShapeRef])
            .unwrap()
            .with_slices(2000);

        let comta = envelope.centroid_times_area(f64::NEG_INFINITY, f64::INFINITY, 1.0);
        let area = envelope.area(f64::NEG_INFINITY, f64::INFINITY, 1.0);

        // Symmetric around zero
        assert!((comta / area).abs() < 1e-6);
    }

    #[test]
    fn test_envelope_of_cutoffs() {
        let low: ShapeRef = Arc::new(Trapezoid::new().from(0.0, 2.0).to(4.0, 6.0).build().unwrap());
        let high: ShapeRef =
            Arc::new(Trapezoid::new().from(4.0, 6.0).to(8.0, 10.0).build().unwrap());

        let envelope = NumericCompoundShape::new(vec![
            Arc::new(CutoffShape::new(low, 1.0)) as ShapeRef,
            Arc::new(CutoffShape::new(high, 0.0)) as ShapeRef,
        ])
        .unwrap();

        // The fully suppressed shape contributes nothing
        assert!((envelope.evaluate(9.0) - 0.0).abs() < 1e-9);
        assert!((envelope.evaluate(3.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_empty_shape_list() {
        assert!(NumericCompoundShape::new(vec![]).is_err());
    }
}
