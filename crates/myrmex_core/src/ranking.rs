//! Trail-following marker selection.
//!
//! A forager following a trail picks one marker in range to head for. Which
//! one is "best" is a policy. Carried strength drops more slowly per deposit
//! than markers decay between deposits, so within one trail the newest
//! markers are the strongest. The weakest marker in range is then the oldest,
//! which sits nearer the end the trail was laid from. The policy is injected
//! wherever a trail is followed so callers can supply their own.

use myrmex_data::ScentMarker;
use serde::{Deserialize, Serialize};

/// Strengths closer than this rank as equal.
const STRENGTH_TIE: f64 = 1e-9;

/// Chooses the marker a trail follower heads for.
pub trait MarkerRanking {
    /// Returns the preferred marker, or `None` if `candidates` is empty.
    ///
    /// Among equally ranked markers the one with the smallest `tie_key` wins;
    /// a remaining tie keeps the first candidate seen.
    fn best<'a, I, K>(&self, candidates: I, tie_key: K) -> Option<&'a ScentMarker>
    where
        I: IntoIterator<Item = &'a ScentMarker>,
        K: Fn(&ScentMarker) -> f64;
}

/// Built-in ranking policies, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingPolicy {
    Strongest,
    #[default]
    Weakest,
}

impl RankingPolicy {
    /// Signed strength score; higher ranks better.
    fn score(self, marker: &ScentMarker) -> f64 {
        match self {
            RankingPolicy::Strongest => marker.strength,
            RankingPolicy::Weakest => -marker.strength,
        }
    }
}

impl MarkerRanking for RankingPolicy {
    fn best<'a, I, K>(&self, candidates: I, tie_key: K) -> Option<&'a ScentMarker>
    where
        I: IntoIterator<Item = &'a ScentMarker>,
        K: Fn(&ScentMarker) -> f64,
    {
        let mut best: Option<(&'a ScentMarker, f64, f64)> = None;
        for m in candidates {
            let score = self.score(m);
            let key = tie_key(m);
            let better = match best {
                None => true,
                Some((_, best_score, best_key)) => {
                    if (score - best_score).abs() <= STRENGTH_TIE {
                        key < best_key
                    } else {
                        score > best_score
                    }
                }
            };
            if better {
                best = Some((m, score, key));
            }
        }
        best.map(|(m, _, _)| m)
    }
}
