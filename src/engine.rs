//! Fuzzy inference engine
//!
//! `FuzzyLogic` owns the output fuzzifier, the rule map (output label to
//! condition), and a registry of pairwise shape-intersection resolvers. Per
//! call it:
//!
//! 1. computes one certainty per output label,
//! 2. stitches the output shapes, each cut at its own certainty, into one
//!    compound envelope,
//! 3. reduces that envelope to a crisp value via the area-weighted x
//!    centroid.
//!
//! Everything is pure and synchronous; the resolver registry is write-once
//! at setup, so sharing one engine between threads is safe.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{ErrorCode, FuzzyError, FuzzyResult};
use crate::fuzzifier::Fuzzifier;
use crate::geometry::Point;
use crate::membership::compound::{Breakpoint, CompoundShape};
use crate::membership::cutoff::CutoffShape;
use crate::membership::numeric::NumericCompoundShape;
use crate::membership::trapezoid::TrapezoidShape;
use crate::membership::{kind, MembershipFunction, ShapeRef};
use crate::rules::{Condition, Inputs};

/// Computes the set of intersection points between `primary` cut at
/// `certainty_a` and `replacement` cut at `certainty_b`
///
/// A resolver is registered per ordered pair of shape kinds; the default
/// registry only covers trapezoid pairs.
pub type IntersectionResolver = Arc<
    dyn Fn(&dyn MembershipFunction, f64, &dyn MembershipFunction, f64) -> FuzzyResult<Vec<Point>>
        + Send
        + Sync,
>;

/// The fuzzy inference and defuzzification engine
pub struct FuzzyLogic {
    output: Fuzzifier,
    rules: HashMap<String, Box<dyn Condition>>,
    resolvers: HashMap<(String, String), IntersectionResolver>,
}

impl std::fmt::Debug for FuzzyLogic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyLogic")
            .field("output", &self.output)
            .field("rules", &self.rules)
            .finish()
    }
}

impl FuzzyLogic {
    /// Creates an engine from an output fuzzifier and a rule map whose keys
    /// must exactly match the fuzzifier's labels.
    ///
    /// The trapezoid-trapezoid intersection resolver is pre-registered.
    pub fn new(output: Fuzzifier, rules: HashMap<String, Box<dyn Condition>>) -> FuzzyResult<Self> {
        for label in output.labels() {
            if !rules.contains_key(label) {
                return Err(FuzzyError::new(
                    ErrorCode::RuleMapMismatch,
                    format!("no rule for output label: {}", label),
                ));
            }
        }
        for key in rules.keys() {
            if !output.contains(key) {
                return Err(FuzzyError::new(
                    ErrorCode::RuleMapMismatch,
                    format!("rule references a label the output fuzzifier lacks: {}", key),
                ));
            }
        }

        if let Some((_, first)) = output.iter().next() {
            let first_left = first.left_most_non_zero().x;
            debug_assert!(
                output.iter().all(|(_, s)| s.left_most_non_zero().x >= first_left),
                "stitching assumes the first output label owns the left-most shape"
            );
        }

        let mut engine = FuzzyLogic {
            output,
            rules,
            resolvers: HashMap::new(),
        };

        engine.register_intersection_resolver(kind::TRAPEZOID, kind::TRAPEZOID, |a, ca, b, cb| {
            resolve_two_trapezoids(a, ca, b, cb)
        });

        Ok(engine)
    }

    /// The output fuzzifier, e.g. for plotting the membership functions.
    pub fn output(&self) -> &Fuzzifier {
        &self.output
    }

    /// Registers `resolver` for the shape-kind pair, under both key orders.
    pub fn register_intersection_resolver(
        &mut self,
        kind_a: &str,
        kind_b: &str,
        resolver: impl Fn(
                &dyn MembershipFunction,
                f64,
                &dyn MembershipFunction,
                f64,
            ) -> FuzzyResult<Vec<Point>>
            + Send
            + Sync
            + 'static,
    ) {
        let resolver: IntersectionResolver = Arc::new(resolver);
        self.resolvers
            .insert((kind_a.to_string(), kind_b.to_string()), resolver.clone());
        self.resolvers
            .insert((kind_b.to_string(), kind_a.to_string()), resolver);
    }

    fn resolver(&self, kind_a: &str, kind_b: &str) -> FuzzyResult<&IntersectionResolver> {
        self.resolvers
            .get(&(kind_a.to_string(), kind_b.to_string()))
            .ok_or_else(|| FuzzyError::no_resolver(kind_a, kind_b))
    }

    /// One certainty per output label, in fuzzifier order.
    fn certainties(&self, inputs: &Inputs) -> FuzzyResult<Vec<f64>> {
        let mut certainties = Vec::with_capacity(self.output.len());

        for label in self.output.labels() {
            let condition = self.rules.get(label).ok_or_else(|| {
                // Unreachable after the constructor check
                FuzzyError::internal(format!("rule map lost label: {}", label))
            })?;
            let certainty = condition.certainty(inputs);
            trace!(label, certainty, "rule certainty");
            certainties.push(certainty);
        }

        Ok(certainties)
    }

    /// Builds the envelope of all output shapes, each cut at its own
    /// certainty, by walking intersection points left to right.
    ///
    /// The walk assumes the fuzzifier's first label is the left-most shape on
    /// the x axis; the shape currently owning the envelope is switched at the
    /// first forward intersection that takes the envelope higher. Shapes that
    /// never produce a forward intersection are skipped. The approach only
    /// needs a bounded number of crossings per shape pair, which trapezoid
    /// cutoffs satisfy; for shape kinds without that property use
    /// [`construct_numeric_compound_shape`](Self::construct_numeric_compound_shape).
    pub fn construct_compound_shape(&self, inputs: &Inputs) -> FuzzyResult<CompoundShape> {
        let functions: Vec<(&str, &ShapeRef)> = self.output.iter().collect();
        let certainties = self.certainties(inputs)?;

        // (from, shape index); the first shape owns everything until the
        // first accepted intersection
        let mut breakpoints: Vec<(f64, usize)> = vec![(f64::NEG_INFINITY, 0)];
        let mut current = 0;
        let mut last_accepted: Option<Point> = None;

        while current < functions.len() {
            let (_, shape_a) = functions[current];

            let mut next_step: Option<(Point, usize)> = None;

            for (i, (_, shape_b)) in functions.iter().enumerate() {
                // Skipping self-intersection
                if i == current {
                    continue;
                }

                let resolver = self.resolver(shape_a.kind(), shape_b.kind())?;
                let mut points = resolver(
                    shape_a.as_ref(),
                    certainties[current],
                    shape_b.as_ref(),
                    certainties[i],
                )?;

                // Never move backward along x
                if let Some(last) = last_accepted {
                    points.retain(|p| p.x >= last.x);
                }

                if let Some(&point) = points.first() {
                    next_step = Some((point, i));
                    break;
                }
            }

            let Some((point, next_idx)) = next_step else {
                break;
            };

            trace!(
                x = point.x,
                from_label = functions[current].0,
                to_label = functions[next_idx].0,
                "envelope handover"
            );

            match breakpoints.last_mut() {
                // An intersection exactly on the previous handover point
                // transfers ownership in place instead of emitting a
                // zero-width interval.
                Some(last_bp) if last_bp.0 == point.x => last_bp.1 = next_idx,
                _ => breakpoints.push((point.x, next_idx)),
            }

            last_accepted = Some(point);
            current = next_idx;
        }

        debug!(
            breakpoints = breakpoints.len(),
            shapes = functions.len(),
            "stitched compound shape"
        );

        CompoundShape::new(
            breakpoints
                .into_iter()
                .map(|(from, idx)| {
                    let (_, shape) = functions[idx];
                    Breakpoint {
                        from,
                        shape: Arc::new(CutoffShape::new(shape.clone(), certainties[idx])),
                    }
                })
                .collect(),
        )
    }

    /// Numeric fallback to [`construct_compound_shape`](Self::construct_compound_shape):
    /// a pointwise-max envelope over the cut shapes, with no stitching and no
    /// left-most-first assumption, at the cost of quadrature-based
    /// integration.
    pub fn construct_numeric_compound_shape(
        &self,
        inputs: &Inputs,
    ) -> FuzzyResult<NumericCompoundShape> {
        let certainties = self.certainties(inputs)?;

        NumericCompoundShape::new(
            self.output
                .iter()
                .zip(certainties)
                .map(|((_, shape), certainty)| {
                    Arc::new(CutoffShape::new(shape.clone(), certainty)) as ShapeRef
                })
                .collect(),
        )
    }

    /// Defuzzifies: builds the composite shape and reduces it to its
    /// area-weighted x centroid over the whole real line.
    ///
    /// Returns `Ok(None)` when the total area is zero, i.e. every rule
    /// certainty was zero for these inputs.
    pub fn determine(&self, inputs: &Inputs) -> FuzzyResult<Option<f64>> {
        let compound = self.construct_compound_shape(inputs)?;

        let comta = compound.centroid_times_area(f64::NEG_INFINITY, f64::INFINITY, 1.0);
        let area = compound.area(f64::NEG_INFINITY, f64::INFINITY, 1.0);

        if area == 0.0 {
            debug!("total certainty area is zero, no crisp result");
            return Ok(None);
        }

        Ok(Some(comta / area))
    }
}

/// Intersections between two trapezoids cut at their certainties, computed
/// from the shapes' 5-segment decompositions.
///
/// Going along the first shape's curve, we only switch at crossings where
/// the second segment's slope is at least as big (it takes the envelope
/// higher); for equal slopes the second segment must reach strictly further
/// right, which breaks ties on coincident segments and prevents handover
/// loops.
fn resolve_two_trapezoids(
    primary: &dyn MembershipFunction,
    certainty_a: f64,
    replacement: &dyn MembershipFunction,
    certainty_b: f64,
) -> FuzzyResult<Vec<Point>> {
    let a = downcast_trapezoid(primary)?;
    let b = downcast_trapezoid(replacement)?;

    let a_lines = a.line_segments(certainty_a)?;
    let b_lines = b.line_segments(certainty_b)?;

    let mut points = Vec::new();

    for a_line in &a_lines {
        for b_line in &b_lines {
            if b_line.line.slope < a_line.line.slope {
                continue;
            }

            if b_line.line.slope == a_line.line.slope && b_line.to <= a_line.to {
                continue;
            }

            if let Some(point) = a_line.intersect(b_line) {
                points.push(point);
            }
        }
    }

    Ok(points)
}

fn downcast_trapezoid(shape: &dyn MembershipFunction) -> FuzzyResult<&TrapezoidShape> {
    shape
        .as_any()
        .downcast_ref::<TrapezoidShape>()
        .ok_or_else(|| {
            FuzzyError::internal(format!(
                "trapezoid resolver invoked on a '{}' shape",
                shape.kind()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzifier::Fuzzifier;
    use crate::membership::trapezoid::Trapezoid;
    use crate::rules::{all, any, FuzzyVar};

    fn close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    fn trapezoid(from_low: f64, from_high: f64, to_high: f64, to_low: f64) -> ShapeRef {
        Arc::new(
            Trapezoid::new()
                .from(from_low, from_high)
                .to(to_high, to_low)
                .build()
                .unwrap(),
        )
    }

    /// Two adjacent output labels and a pass-through rule per label, driven
    /// directly by input variables named after the labels.
    fn two_label_engine() -> FuzzyLogic {
        let output = Fuzzifier::new(vec![
            ("low", trapezoid(-1.0, -0.7, -0.7, -0.4)),
            ("high", trapezoid(0.4, 0.7, 0.7, 1.0)),
        ])
        .unwrap();

        let gate = Fuzzifier::new(vec![("on", trapezoid(0.5, 1.0, 2.0, 2.5))]).unwrap();
        let gate = Arc::new(gate);

        let mut rules: HashMap<String, Box<dyn Condition>> = HashMap::new();
        rules.insert(
            "low".to_string(),
            FuzzyVar::new("low_gate", gate.clone()).is("on").unwrap(),
        );
        rules.insert(
            "high".to_string(),
            FuzzyVar::new("high_gate", gate.clone()).is("on").unwrap(),
        );

        FuzzyLogic::new(output, rules).unwrap()
    }

    fn gate_inputs(low: f64, high: f64) -> Inputs {
        // The "on" gate maps 1.0..2.0 to certainty 1 and 0.0 to certainty 0
        let mut inputs = Inputs::new();
        inputs.insert("low_gate".to_string(), if low > 0.5 { 1.5 } else { 0.0 });
        inputs.insert("high_gate".to_string(), if high > 0.5 { 1.5 } else { 0.0 });
        inputs
    }

    #[test]
    fn test_rule_map_must_match_output_labels() {
        let output = Fuzzifier::new(vec![("low", trapezoid(-1.0, -0.7, -0.7, -0.4))]).unwrap();

        let err = FuzzyLogic::new(output, HashMap::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::RuleMapMismatch);
    }

    #[test]
    fn test_rule_map_rejects_extra_keys() {
        let output = Fuzzifier::new(vec![("low", trapezoid(-1.0, -0.7, -0.7, -0.4))]).unwrap();
        let gate = Arc::new(Fuzzifier::new(vec![("on", trapezoid(0.5, 1.0, 2.0, 2.5))]).unwrap());

        let mut rules: HashMap<String, Box<dyn Condition>> = HashMap::new();
        rules.insert(
            "low".to_string(),
            FuzzyVar::new("g", gate.clone()).is("on").unwrap(),
        );
        rules.insert(
            "stray".to_string(),
            FuzzyVar::new("g", gate).is("on").unwrap(),
        );

        let err = FuzzyLogic::new(output, rules).unwrap_err();
        assert_eq!(err.code, ErrorCode::RuleMapMismatch);
    }

    #[test]
    fn test_determine_returns_none_for_zero_area() {
        let engine = two_label_engine();

        let result = engine.determine(&gate_inputs(0.0, 0.0)).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_determine_centers_on_active_label() {
        let engine = two_label_engine();

        // Only "low" fires; the result is the centroid of the symmetric
        // "low" triangle at -0.7
        let result = engine.determine(&gate_inputs(1.0, 0.0)).unwrap().unwrap();
        close(result, -0.7);
    }

    #[test]
    fn test_determine_mirrors_when_certainties_swap() {
        let engine = two_label_engine();

        let low_only = engine.determine(&gate_inputs(1.0, 0.0)).unwrap().unwrap();
        let high_only = engine.determine(&gate_inputs(0.0, 1.0)).unwrap().unwrap();

        close(low_only, -high_only);
    }

    #[test]
    fn test_determine_balances_between_labels() {
        let engine = two_label_engine();

        // Both fire fully; the envelope is symmetric around zero
        let result = engine.determine(&gate_inputs(1.0, 1.0)).unwrap().unwrap();
        assert!(result.abs() < 1e-9);
    }

    #[test]
    fn test_compound_matches_numeric_fallback() {
        let engine = two_label_engine();
        let inputs = gate_inputs(1.0, 1.0);

        let compound = engine.construct_compound_shape(&inputs).unwrap();
        let numeric = engine
            .construct_numeric_compound_shape(&inputs)
            .unwrap()
            .with_slices(5000);

        let exact = compound.area(f64::NEG_INFINITY, f64::INFINITY, 1.0);
        let approx = numeric.area(f64::NEG_INFINITY, f64::INFINITY, 1.0);

        assert!((exact - approx).abs() < 1e-3, "{} != {}", exact, approx);
    }

    #[test]
    fn test_compound_envelope_matches_pointwise_max() {
        let engine = two_label_engine();
        let inputs = gate_inputs(1.0, 1.0);

        let compound = engine.construct_compound_shape(&inputs).unwrap();
        let numeric = engine.construct_numeric_compound_shape(&inputs).unwrap();

        for i in 0..=60 {
            let x = -1.2 + 0.04 * i as f64;
            assert!(
                (compound.evaluate(x) - numeric.evaluate(x)).abs() < 1e-9,
                "mismatch at x = {}",
                x
            );
        }
    }

    #[test]
    fn test_missing_resolver_is_reported() {
        // A single output shape never needs a resolver; two do.
        let output = Fuzzifier::new(vec![
            ("low", trapezoid(-1.0, -0.7, -0.7, -0.4)),
            ("high", trapezoid(0.4, 0.7, 0.7, 1.0)),
        ])
        .unwrap();
        let gate = Arc::new(Fuzzifier::new(vec![("on", trapezoid(0.5, 1.0, 2.0, 2.5))]).unwrap());

        let mut rules: HashMap<String, Box<dyn Condition>> = HashMap::new();
        rules.insert(
            "low".to_string(),
            FuzzyVar::new("g", gate.clone()).is("on").unwrap(),
        );
        rules.insert(
            "high".to_string(),
            FuzzyVar::new("g", gate).is("on").unwrap(),
        );

        let mut engine = FuzzyLogic::new(output, rules).unwrap();
        engine.resolvers.clear();

        let mut inputs = Inputs::new();
        inputs.insert("g".to_string(), 1.5);

        let err = engine.determine(&inputs).unwrap_err();
        assert_eq!(err.code, ErrorCode::NoResolver);
    }

    #[test]
    fn test_combinators_drive_certainties() {
        let output = Fuzzifier::new(vec![
            ("low", trapezoid(-1.0, -0.7, -0.7, -0.4)),
            ("high", trapezoid(0.4, 0.7, 0.7, 1.0)),
        ])
        .unwrap();

        let gate = Arc::new(Fuzzifier::new(vec![("on", trapezoid(0.5, 1.0, 2.0, 2.5))]).unwrap());
        let a = FuzzyVar::new("a", gate.clone());
        let b = FuzzyVar::new("b", gate.clone());

        let mut rules: HashMap<String, Box<dyn Condition>> = HashMap::new();
        rules.insert(
            "low".to_string(),
            all(vec![a.is("on").unwrap(), b.is("on").unwrap()]),
        );
        rules.insert(
            "high".to_string(),
            any(vec![a.is("on").unwrap(), b.is("on").unwrap()]),
        );

        let engine = FuzzyLogic::new(output, rules).unwrap();

        // a on, b off: all() = 0, any() = 1; only "high" fires
        let mut inputs = Inputs::new();
        inputs.insert("a".to_string(), 1.5);
        inputs.insert("b".to_string(), 0.0);

        let result = engine.determine(&inputs).unwrap().unwrap();
        close(result, 0.7);
    }
}
