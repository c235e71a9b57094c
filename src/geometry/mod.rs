//! Piecewise-linear geometry for membership shapes
//!
//! This module provides:
//! - `line`: infinite lines with vertical-line handling via signed infinite slope
//! - `segment`: bounded line segments and pairwise intersection

pub mod line;
pub mod segment;

pub use line::{Line, Point};
pub use segment::LineSegment;
