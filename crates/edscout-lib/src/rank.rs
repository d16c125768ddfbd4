//! Distance/value trade-off ranking.
//!
//! A pure distance sort sends the player to a thin ring next door; a pure
//! value sort sends them halfway across the bubble for a marginally better
//! price. The composite score here prefers the closer candidate unless a
//! farther one offers enough extra value to justify the travel.

use std::cmp::Ordering;

use serde::Serialize;

use crate::candidate::Candidate;

/// Score comparisons within this tolerance count as ties.
const SCORE_EPSILON: f64 = 1e-9;

/// Tuning for the distance/value trade-off.
///
/// `close_band_ly` is the distance band (beyond the closest survivor)
/// inside which the distance penalty stays below one `improvement_bar`, so
/// ordering is driven by value. Outside the band the penalty grows
/// linearly: a candidate one extra band out must bring one extra bar of
/// value to keep its rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankPolicy {
    pub close_band_ly: f64,
    pub improvement_bar: f64,
}

impl RankPolicy {
    /// Defaults for hotspot ranking: ring densities move in single units.
    pub fn mining() -> Self {
        Self {
            close_band_ly: 10.0,
            improvement_bar: 1.0,
        }
    }

    /// Defaults for sell ranking: prices move in 50k steps, and a station
    /// 20 ly closer is worth giving up 100k per unit.
    pub fn selling() -> Self {
        Self {
            close_band_ly: 20.0,
            improvement_bar: 100_000.0,
        }
    }
}

/// A candidate annotated with its composite score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked {
    pub candidate: Candidate,
    pub score: f64,
}

/// Order candidates by desirability.
///
/// Every input candidate appears exactly once in the output; the head is
/// the recommendation, the tail the alternates. Ties within floating-point
/// tolerance break by smaller distance, then name, so identical inputs
/// always produce identical output.
pub fn rank(candidates: Vec<Candidate>, policy: &RankPolicy) -> Vec<Ranked> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let band = policy.close_band_ly.max(f64::MIN_POSITIVE);
    let closest = candidates
        .iter()
        .map(|c| c.distance_ly)
        .fold(f64::INFINITY, f64::min);

    let mut ranked: Vec<Ranked> = candidates
        .into_iter()
        .map(|candidate| {
            let excess = (candidate.distance_ly - closest).max(0.0);
            let score = candidate.value - policy.improvement_bar * excess / band;
            Ranked { candidate, score }
        })
        .collect();

    ranked.sort_by(|a, b| compare(a, b));
    ranked
}

fn compare(a: &Ranked, b: &Ranked) -> Ordering {
    if (a.score - b.score).abs() > SCORE_EPSILON {
        // Higher score first.
        return b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal);
    }
    a.candidate
        .distance_ly
        .partial_cmp(&b.candidate.distance_ly)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.candidate.name.cmp(&b.candidate.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, distance_ly: f64, value: f64) -> Candidate {
        Candidate {
            name: name.to_string(),
            system: name.to_string(),
            distance_ly,
            value,
            ring_type: None,
            pad_size: None,
            hotspot_count: None,
            arrival_ls: None,
            populated: None,
            freshness_days: None,
        }
    }

    fn names(ranked: &[Ranked]) -> Vec<&str> {
        ranked.iter().map(|r| r.candidate.name.as_str()).collect()
    }

    #[test]
    fn high_bar_keeps_the_closest_candidate_on_top() {
        let policy = RankPolicy {
            close_band_ly: 10.0,
            improvement_bar: 1_000.0,
        };
        let ranked = rank(
            vec![
                candidate("A", 5.0, 10.0),
                candidate("B", 6.0, 10.5),
                candidate("C", 50.0, 11.0),
            ],
            &policy,
        );
        assert_eq!(names(&ranked), vec!["A", "B", "C"]);
    }

    #[test]
    fn within_band_small_bar_orders_by_value() {
        let policy = RankPolicy {
            close_band_ly: 10.0,
            improvement_bar: 0.1,
        };
        let ranked = rank(
            vec![
                candidate("thin", 2.0, 5.0),
                candidate("rich", 9.0, 9.0),
                candidate("middling", 4.0, 7.0),
            ],
            &policy,
        );
        assert_eq!(names(&ranked), vec!["rich", "middling", "thin"]);
    }

    #[test]
    fn beyond_band_requires_clearing_the_bar() {
        let policy = RankPolicy {
            close_band_ly: 10.0,
            improvement_bar: 2.0,
        };
        // 25 ly past the closest: the penalty is 5.0, so +1 of value loses
        // and +6 wins.
        let ranked = rank(
            vec![candidate("near", 5.0, 10.0), candidate("far", 30.0, 11.0)],
            &policy,
        );
        assert_eq!(names(&ranked), vec!["near", "far"]);

        let ranked = rank(
            vec![candidate("near", 5.0, 10.0), candidate("far", 30.0, 16.0)],
            &policy,
        );
        assert_eq!(names(&ranked), vec!["far", "near"]);
    }

    #[test]
    fn ranking_preserves_the_candidate_set() {
        let policy = RankPolicy::mining();
        let input = vec![
            candidate("a", 1.0, 2.0),
            candidate("b", 30.0, 9.0),
            candidate("c", 70.0, 7.5),
        ];
        let ranked = rank(input.clone(), &policy);
        assert_eq!(ranked.len(), input.len());
        for original in &input {
            assert!(ranked.iter().any(|r| &r.candidate == original));
        }
    }

    #[test]
    fn ranking_is_deterministic_with_equal_scores() {
        let policy = RankPolicy::mining();
        let twins = vec![
            candidate("beta", 5.0, 8.0),
            candidate("alpha", 5.0, 8.0),
        ];
        let first = rank(twins.clone(), &policy);
        let second = rank(twins, &policy);
        assert_eq!(first, second);
        assert_eq!(names(&first), vec!["alpha", "beta"]);
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        assert!(rank(Vec::new(), &RankPolicy::mining()).is_empty());
    }
}
