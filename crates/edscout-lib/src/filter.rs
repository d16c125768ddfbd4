//! Candidate filtering against user-supplied constraints.
//!
//! Filtering is pure: whether a candidate survives depends only on its own
//! attributes versus the constraints, never on other candidates. An empty
//! result is a normal outcome, not an error.

use tracing::debug;

use crate::candidate::{Candidate, PadSize, RingType};

/// Constraints supplied once per run, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConstraints {
    /// Maximum straight-line distance from the origin, in light years.
    pub max_distance_ly: f64,
    /// Minimum value metric (ring density floor for mining; selling has no
    /// price floor by default).
    pub min_value: Option<f64>,
    /// Required ring composition, exact match.
    pub ring_type: Option<RingType>,
    /// Acceptable landing pad sizes; a candidate without a known pad size
    /// fails this constraint.
    pub pad_sizes: Option<Vec<PadSize>>,
}

impl Default for SearchConstraints {
    fn default() -> Self {
        Self {
            max_distance_ly: 100.0,
            min_value: None,
            ring_type: None,
            pad_sizes: None,
        }
    }
}

impl SearchConstraints {
    fn admits(&self, candidate: &Candidate) -> bool {
        if !candidate.is_well_formed() {
            return false;
        }
        if candidate.distance_ly > self.max_distance_ly {
            return false;
        }
        if let Some(min_value) = self.min_value {
            if candidate.value < min_value {
                return false;
            }
        }
        if let Some(ring_type) = self.ring_type {
            // A missing attribute disqualifies; it is never treated as a
            // wildcard match.
            if candidate.ring_type != Some(ring_type) {
                return false;
            }
        }
        if let Some(pads) = &self.pad_sizes {
            match candidate.pad_size {
                Some(pad) if pads.contains(&pad) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Keep the candidates that satisfy every constraint.
pub fn filter(candidates: Vec<Candidate>, constraints: &SearchConstraints) -> Vec<Candidate> {
    let before = candidates.len();
    let survivors: Vec<Candidate> = candidates
        .into_iter()
        .filter(|candidate| constraints.admits(candidate))
        .collect();
    debug!(before, after = survivors.len(), "filtered candidates");
    survivors
}
