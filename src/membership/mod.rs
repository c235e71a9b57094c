//! Membership function shapes
//!
//! All shapes share one contract: evaluate a height at x, and compute area
//! and area-weighted x-centroid over an x range under a height cutoff.
//!
//! # Available Shapes
//!
//! - `TrapezoidShape`: closed-form trapezoid (triangle as the degenerate case)
//! - `CutoffShape`: height-clamping decorator around another shape
//! - `CompoundShape`: a partition of the x axis, one owning shape per interval
//! - `NumericCompoundShape`: pointwise-max envelope, numerically integrated

pub mod compound;
pub mod cutoff;
pub mod numeric;
pub mod trapezoid;

use std::any::Any;
use std::sync::Arc;

use crate::geometry::Point;

/// Well-known shape kind tags, used as resolver-registry keys
pub mod kind {
    pub const TRAPEZOID: &str = "trapezoid";
    pub const CUTOFF: &str = "cutoff";
    pub const COMPOUND: &str = "compound";
    pub const NUMERIC_COMPOUND: &str = "numeric_compound";
}

/// The shared contract of all membership shapes
///
/// `area` and `centroid_times_area` integrate the shape clamped to
/// `cutoff_height` over `[from, to]`; both bounds may be infinite.
pub trait MembershipFunction: Send + Sync {
    /// Kind tag of this shape, used to key the intersection-resolver registry
    fn kind(&self) -> &'static str;

    /// Membership degree at x, in [0, 1]
    fn evaluate(&self, x: f64) -> f64;

    /// Area of the shape within the `[from, to] x [0, cutoff_height]`
    /// bounding box
    fn area(&self, from: f64, to: f64, cutoff_height: f64) -> f64;

    /// Integral of `x * y(x)` over the same bounding box; divided by `area`
    /// this yields the x center of mass
    fn centroid_times_area(&self, from: f64, to: f64, cutoff_height: f64) -> f64;

    /// The first non-zero point going from negative infinity
    fn left_most_non_zero(&self) -> Point;

    /// The last non-zero point going towards positive infinity
    fn right_most_non_zero(&self) -> Point;

    /// Downcast support for intersection resolvers
    fn as_any(&self) -> &dyn Any;
}

/// A shared, immutable membership shape
pub type ShapeRef = Arc<dyn MembershipFunction>;
