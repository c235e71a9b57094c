//! Rule conditions and combinators
//!
//! A `Condition` turns a crisp input map into a certainty in [0, 1].
//! `FuzzyVar::is` binds an input variable to one label of its fuzzifier;
//! `all` and `any` aggregate certainties via min and max. These are the only
//! two aggregation operators; there is no negation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{FuzzyError, FuzzyResult};
use crate::fuzzifier::Fuzzifier;
use crate::membership::ShapeRef;

/// Crisp inputs: variable name to a finite real number
pub type Inputs = HashMap<String, f64>;

/// A certainty-computing predicate over the crisp inputs
pub trait Condition: Send + Sync {
    /// The degree to which this condition holds, in [0, 1]
    fn certainty(&self, inputs: &Inputs) -> f64;
}

impl std::fmt::Debug for dyn Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Condition")
    }
}

/// An input variable bound to a fuzzifier
#[derive(Clone)]
pub struct FuzzyVar {
    key: String,
    fuzzifier: Arc<Fuzzifier>,
}

impl FuzzyVar {
    pub fn new(key: impl Into<String>, fuzzifier: Arc<Fuzzifier>) -> Self {
        FuzzyVar {
            key: key.into(),
            fuzzifier,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn fuzzifier(&self) -> &Arc<Fuzzifier> {
        &self.fuzzifier
    }

    /// The condition "this variable is `label`", whose certainty is the
    /// label's membership degree at the variable's crisp value.
    ///
    /// Fails if `label` is not part of the bound fuzzifier.
    pub fn is(&self, label: &str) -> FuzzyResult<Box<dyn Condition>> {
        let shape = self
            .fuzzifier
            .get(label)
            .ok_or_else(|| FuzzyError::unknown_label(label))?
            .clone();

        Ok(Box::new(IsCondition {
            key: self.key.clone(),
            shape,
        }))
    }
}

struct IsCondition {
    key: String,
    shape: ShapeRef,
}

impl Condition for IsCondition {
    fn certainty(&self, inputs: &Inputs) -> f64 {
        match inputs.get(&self.key) {
            Some(&x) => self.shape.evaluate(x),
            // Absent variables hold with certainty zero
            None => 0.0,
        }
    }
}

struct AllCondition(Vec<Box<dyn Condition>>);

impl Condition for AllCondition {
    fn certainty(&self, inputs: &Inputs) -> f64 {
        self.0
            .iter()
            .fold(1.0, |acc, cond| acc.min(cond.certainty(inputs)))
    }
}

struct AnyCondition(Vec<Box<dyn Condition>>);

impl Condition for AnyCondition {
    fn certainty(&self, inputs: &Inputs) -> f64 {
        self.0
            .iter()
            .fold(0.0, |acc, cond| acc.max(cond.certainty(inputs)))
    }
}

/// Fuzzy AND: the minimum of all certainties; 1 when empty (the AND identity)
pub fn all(conditions: Vec<Box<dyn Condition>>) -> Box<dyn Condition> {
    Box::new(AllCondition(conditions))
}

/// Fuzzy OR: the maximum of all certainties; 0 when empty (the OR identity)
pub fn any(conditions: Vec<Box<dyn Condition>>) -> Box<dyn Condition> {
    Box::new(AnyCondition(conditions))
}
