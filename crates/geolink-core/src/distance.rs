// crates/geolink-core/src/distance.rs

//! Edit distance and the per-needle distance summary.

use serde::{Deserialize, Serialize};

/// Classic Levenshtein distance over Unicode scalar values.
///
/// Symmetric: `edit_distance(a, b) == edit_distance(b, a)`.
#[inline]
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Min / max / count / mean over the distances computed during one scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceSummary {
    pub min: usize,
    pub max: usize,
    pub count: usize,
    pub mean: f64,
}

/// Running accumulator behind [`DistanceSummary`].
///
/// Keeps only the aggregates, not the full distance list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceTally {
    min: usize,
    max: usize,
    count: usize,
    sum: u64,
}

impl DistanceTally {
    pub fn record(&mut self, distance: usize) {
        if self.count == 0 {
            self.min = distance;
            self.max = distance;
        } else {
            self.min = self.min.min(distance);
            self.max = self.max.max(distance);
        }
        self.count += 1;
        self.sum += distance as u64;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `None` when no distance was recorded (e.g. an empty haystack).
    pub fn summary(&self) -> Option<DistanceSummary> {
        if self.count == 0 {
            return None;
        }
        Some(DistanceSummary {
            min: self.min,
            max: self.max,
            count: self.count,
            mean: self.sum as f64 / self.count as f64,
        })
    }
}
