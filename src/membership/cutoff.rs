//! Height-clamping decorator
//!
//! Wraps another shape and clamps its height to `min(inner(x), height)`.
//! A rule's certainty limits its output contribution through this shape;
//! it carries no geometry of its own.

use std::any::Any;

use crate::geometry::Point;
use crate::membership::{kind, MembershipFunction, ShapeRef};

/// A shape clamped to a maximum height
#[derive(Clone)]
pub struct CutoffShape {
    inner: ShapeRef,
    cutoff_height: f64,
}

impl CutoffShape {
    pub fn new(inner: ShapeRef, cutoff_height: f64) -> Self {
        CutoffShape {
            inner,
            cutoff_height,
        }
    }

    pub fn cutoff_height(&self) -> f64 {
        self.cutoff_height
    }

    pub fn inner(&self) -> &ShapeRef {
        &self.inner
    }
}

impl MembershipFunction for CutoffShape {
    fn kind(&self) -> &'static str {
        kind::CUTOFF
    }

    fn evaluate(&self, x: f64) -> f64 {
        self.inner.evaluate(x).min(self.cutoff_height)
    }

    fn area(&self, from: f64, to: f64, cutoff_height: f64) -> f64 {
        self.inner
            .area(from, to, self.cutoff_height.min(cutoff_height))
    }

    fn centroid_times_area(&self, from: f64, to: f64, cutoff_height: f64) -> f64 {
        self.inner
            .centroid_times_area(from, to, self.cutoff_height.min(cutoff_height))
    }

    fn left_most_non_zero(&self) -> Point {
        self.inner.left_most_non_zero()
    }

    fn right_most_non_zero(&self) -> Point {
        self.inner.right_most_non_zero()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
