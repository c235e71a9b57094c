//! Named membership function collections
//!
//! A `Fuzzifier` maps the labels of one linguistic variable (e.g. "distance"
//! to {very close, close, far}) to their membership functions. Label order is
//! preserved and matters: the stitching walk assumes the first label's shape
//! is the left-most one on the x axis.

use indexmap::IndexMap;

use crate::error::{ErrorCode, FuzzyError, FuzzyResult};
use crate::membership::ShapeRef;

/// An ordered collection of labeled membership functions
#[derive(Clone, Default)]
pub struct Fuzzifier {
    functions: IndexMap<String, ShapeRef>,
}

impl std::fmt::Debug for Fuzzifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fuzzifier")
            .field("labels", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Fuzzifier {
    /// Builds a fuzzifier from ordered `(label, shape)` pairs, failing on
    /// duplicate labels.
    pub fn new(fuzzy_values: Vec<(impl Into<String>, ShapeRef)>) -> FuzzyResult<Self> {
        let mut functions = IndexMap::with_capacity(fuzzy_values.len());

        for (label, shape) in fuzzy_values {
            let label = label.into();
            if functions.insert(label.clone(), shape).is_some() {
                return Err(FuzzyError::new(
                    ErrorCode::DuplicateLabel,
                    format!("duplicate fuzzy value label: {}", label),
                ));
            }
        }

        Ok(Fuzzifier { functions })
    }

    /// The membership function registered under `label`.
    pub fn get(&self, label: &str) -> Option<&ShapeRef> {
        self.functions.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.functions.contains_key(label)
    }

    /// Labels in registration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// `(label, shape)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShapeRef)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
