// crates/geolink-core/src/matcher.rs

//! # Matcher
//!
//! Scans the whole haystack for one needle and decides between
//! [`MatchOutcome::Matched`] and [`MatchOutcome::Unmatched`].
//!
//! Both operating modes share one scan; the [`ComparisonPolicy`] decides
//! whether non-identical keys are ever measured:
//!
//! - [`ComparisonPolicy::ExactOnly`]: first case-insensitive exact match wins,
//!   no edit distance is computed.
//! - [`ComparisonPolicy::WithinDistance`]: every non-identical key is
//!   measured, keys within `threshold` are kept, and an exact match ends the
//!   scan with everything queued so far plus the exact hit.

use crate::common::CandidateMatch;
use crate::distance::{edit_distance, DistanceSummary, DistanceTally};
use crate::haystack::Haystack;
use crate::record::KeyedRecord;
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

/// Maximum accepted edit distance unless configured otherwise.
pub const DEFAULT_THRESHOLD: usize = 4;

/// Which of the two historical modes to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Exact match, else every key within the threshold.
    #[default]
    Extended,
    /// Exact match only.
    Simple,
}

/// How a needle key is compared with each haystack key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonPolicy {
    ExactOnly,
    WithinDistance { threshold: usize },
}

impl ComparisonPolicy {
    pub fn for_mode(mode: MatchMode, threshold: usize) -> Self {
        match mode {
            MatchMode::Extended => ComparisonPolicy::WithinDistance { threshold },
            MatchMode::Simple => ComparisonPolicy::ExactOnly,
        }
    }
}

/// Result of scanning the haystack for one needle.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// At least one candidate, in discovery order.
    Matched(Vec<CandidateMatch>),
    /// No candidate. Carries the distance summary when any distance was computed.
    Unmatched(Option<DistanceSummary>),
}

impl MatchOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

#[derive(Default)]
struct Scan {
    candidates: Vec<CandidateMatch>,
    tally: DistanceTally,
}

#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    policy: ComparisonPolicy,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(ComparisonPolicy::WithinDistance {
            threshold: DEFAULT_THRESHOLD,
        })
    }
}

impl Matcher {
    pub fn new(policy: ComparisonPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ComparisonPolicy {
        self.policy
    }

    /// Scans `haystack` in order for `needle`.
    ///
    /// The scan is a short-circuiting fold: an exact (folded) key match breaks
    /// out with everything accumulated so far, the exact hit last.
    pub fn match_needle(&self, needle: &KeyedRecord, haystack: &Haystack) -> MatchOutcome {
        let needle_key = needle.key.folded();

        let flow = haystack.iter().try_fold(Scan::default(), |mut scan, hay| {
            if hay.key.folded() == needle_key {
                if let ComparisonPolicy::WithinDistance { .. } = self.policy {
                    scan.tally.record(0);
                }
                scan.candidates.push(CandidateMatch::between(0, needle, hay));
                return ControlFlow::Break(scan);
            }

            if let ComparisonPolicy::WithinDistance { threshold } = self.policy {
                let distance = edit_distance(needle_key, hay.key.folded());
                scan.tally.record(distance);
                if distance <= threshold {
                    scan.candidates
                        .push(CandidateMatch::between(distance, needle, hay));
                }
            }
            ControlFlow::Continue(scan)
        });

        let (ControlFlow::Break(scan) | ControlFlow::Continue(scan)) = flow;

        if let Some(s) = scan.tally.summary() {
            log::trace!(
                "{}: Min:{} Max:{} Len:{} Avg:{:.2}",
                needle.id(),
                s.min,
                s.max,
                s.count,
                s.mean
            );
        }

        if scan.candidates.is_empty() {
            MatchOutcome::Unmatched(scan.tally.summary())
        } else {
            MatchOutcome::Matched(scan.candidates)
        }
    }
}
