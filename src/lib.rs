//! mamdani - fuzzy inference and centroid defuzzification
//!
//! A Mamdani-style fuzzy logic engine built on piecewise-linear geometry:
//! crisp inputs are fuzzified through labeled trapezoid membership functions,
//! rules combine the resulting certainties with fuzzy AND/OR, and the output
//! shapes - each cut at its rule's certainty - are stitched into one envelope
//! whose area-weighted centroid is the crisp result.
//!
//! # Architecture
//!
//! The crate is organized around a small set of abstractions:
//!
//! - [`MembershipFunction`] - Interface all shapes implement: pointwise
//!   evaluation plus closed-form area and centroid integrals
//! - [`Fuzzifier`] - Ordered label-to-shape map for one linguistic variable
//! - [`Condition`] - Certainty-computing rule predicate over crisp inputs
//! - [`FuzzyLogic`] - The engine: rule evaluation, shape stitching,
//!   defuzzification, and the shape-intersection resolver registry
//!
//! # Features
//!
//! - Trapezoid shapes with open sides, instant steps, and a builder API
//! - Exact integration: closed-form area and center-of-mass, no quadrature
//!   on the main path
//! - A numeric pointwise-max fallback for shapes the stitcher cannot handle
//! - `all`/`any` rule combinators (min/max semantics)
//! - Declarative TOML configuration of fuzzifiers, variables, and rules
//!
//! # Example
//!
//! ```rust,ignore
//! use mamdani::{all, Fuzzifier, FuzzyLogic, FuzzyVar, Inputs, Trapezoid};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let distance = Arc::new(Fuzzifier::new(vec![
//!     ("close", Arc::new(Trapezoid::new().from(-1.0, 0.0).to(1.0, 3.0).build()?) as _),
//!     ("far", Arc::new(Trapezoid::new().from(1.0, 3.0).build()?) as _),
//! ])?);
//!
//! let action = Fuzzifier::new(vec![
//!     ("brake", Arc::new(Trapezoid::new().from(-1.0, -0.7).to(-0.7, -0.4).build()?) as _),
//!     ("accelerate", Arc::new(Trapezoid::new().from(0.4, 0.7).to(0.7, 1.0).build()?) as _),
//! ])?;
//!
//! let var = FuzzyVar::new("distance", distance);
//! let mut rules = HashMap::new();
//! rules.insert("brake".to_string(), var.is("close")?);
//! rules.insert("accelerate".to_string(), var.is("far")?);
//!
//! let engine = FuzzyLogic::new(action, rules)?;
//!
//! let mut inputs = Inputs::new();
//! inputs.insert("distance".to_string(), 0.5);
//! let crisp = engine.determine(&inputs)?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fuzzifier;
pub mod geometry;
pub mod membership;
pub mod rules;

// Re-export geometry types
pub use geometry::{Line, LineSegment, Point};

// Re-export membership shapes
pub use membership::compound::{Breakpoint, CompoundShape};
pub use membership::cutoff::CutoffShape;
pub use membership::numeric::NumericCompoundShape;
pub use membership::trapezoid::{Trapezoid, TrapezoidShape};
pub use membership::{kind, MembershipFunction, ShapeRef};

// Re-export fuzzifier and rule types
pub use fuzzifier::Fuzzifier;
pub use rules::{all, any, Condition, FuzzyVar, Inputs};

// Re-export engine types
pub use engine::{FuzzyLogic, IntersectionResolver};

// Re-export configuration types
pub use config::{
    ConditionConfig, EngineConfig, FuzzifierConfig, LabelConfig, OutputConfig, TrapezoidEdge,
};

// Re-export error types
pub use error::{ErrorCode, FuzzyError, FuzzyResult};
