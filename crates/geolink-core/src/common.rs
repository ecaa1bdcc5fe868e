// crates/geolink-core/src/common.rs
use crate::distance::DistanceSummary;
use crate::record::KeyedRecord;
use serde::{Deserialize, Serialize};

/// One accepted haystack row for a needle.
///
/// Field order is the column order of the matched output set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub distance: usize,
    pub needle_id: String,
    pub needle_key: String,
    pub haystack_id: String,
    pub haystack_key: String,
}

impl CandidateMatch {
    pub fn between(distance: usize, needle: &KeyedRecord, hay: &KeyedRecord) -> Self {
        Self {
            distance,
            needle_id: needle.id().to_owned(),
            needle_key: needle.key.raw().to_owned(),
            haystack_id: hay.id().to_owned(),
            haystack_key: hay.key.raw().to_owned(),
        }
    }
}

/// The single output row for a needle that accepted no candidates.
///
/// `min_distance` / `max_distance` are only filled in extended mode, and
/// only when at least one distance was computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoMatchRecord {
    pub needle_id: String,
    pub country: String,
    pub province: String,
    pub city: String,
    pub min_distance: Option<usize>,
    pub max_distance: Option<usize>,
}

impl NoMatchRecord {
    pub fn new(needle: &KeyedRecord, diagnostics: Option<&DistanceSummary>) -> Self {
        let r = &needle.record;
        Self {
            needle_id: r.id.clone(),
            country: r.country.clone(),
            province: r.province.clone(),
            city: r.city.clone(),
            min_distance: diagnostics.map(|d| d.min),
            max_distance: diagnostics.map(|d| d.max),
        }
    }
}

/// Aggregate counts for one linkage run.
///
/// Returned by [`Linker::run`](crate::run::Linker::run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub needles: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub candidates: usize,
    pub haystack: usize,
}
