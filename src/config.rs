//! TOML Configuration
//!
//! Declarative engine setup: fuzzifiers with their labeled trapezoids, input
//! variable bindings, the output fuzzifier, and the rule tree per output
//! label. `EngineConfig::from_toml` parses, `EngineConfig::build` resolves
//! all cross-references and yields a ready `FuzzyLogic`.
//!
//! ```toml
//! [fuzzifiers.distance]
//! labels = [
//!     { name = "close", from = [-1.0, 0.0], to = [1.0, 3.0] },
//!     { name = "far", from = [1.0, 3.0] },
//! ]
//!
//! [fuzzifiers.action]
//! labels = [
//!     { name = "brake", from = [-1.0, -0.7], to = [-0.7, -0.4] },
//!     { name = "accelerate", from = [0.4, 0.7], to = [0.7, 1.0] },
//! ]
//!
//! [variables]
//! distance = "distance"
//!
//! [output]
//! fuzzifier = "action"
//!
//! [rules]
//! brake = { is = { var = "distance", label = "close" } }
//! accelerate = { is = { var = "distance", label = "far" } }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::engine::FuzzyLogic;
use crate::error::{ErrorCode, FuzzyError, FuzzyResult};
use crate::fuzzifier::Fuzzifier;
use crate::membership::trapezoid::Trapezoid;
use crate::membership::ShapeRef;
use crate::rules::{all, any, Condition, FuzzyVar};

/// One edge of a trapezoid: `x` for an instant step, `[low, high]` for a ramp
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum TrapezoidEdge {
    Step(f64),
    Ramp(f64, f64),
}

/// One labeled trapezoid inside a fuzzifier
///
/// A missing edge leaves the shape open on that side.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelConfig {
    pub name: String,
    pub from: Option<TrapezoidEdge>,
    pub to: Option<TrapezoidEdge>,
}

/// A fuzzifier: ordered labels, left-most shape first
#[derive(Debug, Clone, Deserialize)]
pub struct FuzzifierConfig {
    pub labels: Vec<LabelConfig>,
}

/// The output side: which fuzzifier the crisp result is defuzzified from
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub fuzzifier: String,
}

/// A rule condition tree
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionConfig {
    /// `{ is = { var = "distance", label = "close" } }`
    Is { var: String, label: String },
    /// Fuzzy AND over sub-conditions
    All(Vec<ConditionConfig>),
    /// Fuzzy OR over sub-conditions
    Any(Vec<ConditionConfig>),
}

/// Complete engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub fuzzifiers: HashMap<String, FuzzifierConfig>,
    /// Input variable name to the fuzzifier describing its labels
    #[serde(default)]
    pub variables: HashMap<String, String>,
    pub output: OutputConfig,
    /// Output label to its condition tree
    #[serde(default)]
    pub rules: HashMap<String, ConditionConfig>,
}

impl EngineConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> FuzzyResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Resolves all references and builds the engine.
    pub fn build(&self) -> FuzzyResult<FuzzyLogic> {
        let mut fuzzifiers: HashMap<String, Arc<Fuzzifier>> = HashMap::new();
        for (name, config) in &self.fuzzifiers {
            fuzzifiers.insert(name.clone(), Arc::new(build_fuzzifier(config)?));
        }

        let mut variables: HashMap<String, FuzzyVar> = HashMap::new();
        for (var, fuzzifier_name) in &self.variables {
            let fuzzifier = fuzzifiers.get(fuzzifier_name).ok_or_else(|| {
                dangling(format!(
                    "variable '{}' references unknown fuzzifier '{}'",
                    var, fuzzifier_name
                ))
            })?;
            variables.insert(var.clone(), FuzzyVar::new(var.clone(), fuzzifier.clone()));
        }

        let output = fuzzifiers
            .get(&self.output.fuzzifier)
            .ok_or_else(|| {
                dangling(format!(
                    "output references unknown fuzzifier '{}'",
                    self.output.fuzzifier
                ))
            })?
            .as_ref()
            .clone();

        let mut rules: HashMap<String, Box<dyn Condition>> = HashMap::new();
        for (label, condition) in &self.rules {
            rules.insert(label.clone(), build_condition(condition, &variables)?);
        }

        FuzzyLogic::new(output, rules)
    }
}

fn build_fuzzifier(config: &FuzzifierConfig) -> FuzzyResult<Fuzzifier> {
    let mut values: Vec<(String, ShapeRef)> = Vec::with_capacity(config.labels.len());

    for label in &config.labels {
        let mut builder = Trapezoid::new();

        if let Some(from) = label.from {
            builder = match from {
                TrapezoidEdge::Step(x) => builder.from_step(x),
                TrapezoidEdge::Ramp(low, high) => builder.from(low, high),
            };
        }

        if let Some(to) = label.to {
            builder = match to {
                TrapezoidEdge::Step(x) => builder.to_step(x),
                TrapezoidEdge::Ramp(high, low) => builder.to(high, low),
            };
        }

        values.push((label.name.clone(), Arc::new(builder.build()?)));
    }

    Fuzzifier::new(values)
}

fn build_condition(
    config: &ConditionConfig,
    variables: &HashMap<String, FuzzyVar>,
) -> FuzzyResult<Box<dyn Condition>> {
    match config {
        ConditionConfig::Is { var, label } => {
            let fuzzy_var = variables.get(var).ok_or_else(|| {
                dangling(format!("rule references unknown variable '{}'", var))
            })?;
            fuzzy_var.is(label)
        }
        ConditionConfig::All(children) => Ok(all(build_conditions(children, variables)?)),
        ConditionConfig::Any(children) => Ok(any(build_conditions(children, variables)?)),
    }
}

fn build_conditions(
    configs: &[ConditionConfig],
    variables: &HashMap<String, FuzzyVar>,
) -> FuzzyResult<Vec<Box<dyn Condition>>> {
    configs
        .iter()
        .map(|c| build_condition(c, variables))
        .collect()
}

fn dangling(message: String) -> FuzzyError {
    FuzzyError::new(ErrorCode::InvalidConfigValue, message)
        .with_hint("check the [fuzzifiers] and [variables] sections for the referenced name")
}
