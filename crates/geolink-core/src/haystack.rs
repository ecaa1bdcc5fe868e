// crates/geolink-core/src/haystack.rs
use crate::error::Result;
use crate::record::{KeyedRecord, LocalityRecord};
use crate::text::FoldMode;

/// The candidate pool, materialized once and shared read-only by every scan.
///
/// A forward-only source must be drained into this before the needle loop
/// starts; otherwise only the first needle would see any candidates.
#[derive(Debug, Clone, Default)]
pub struct Haystack {
    entries: Vec<KeyedRecord>,
    fold: FoldMode,
}

impl Haystack {
    /// Builds the haystack from infallible records.
    pub fn from_records<I>(records: I, fold: FoldMode) -> Self
    where
        I: IntoIterator<Item = LocalityRecord>,
    {
        let entries = records
            .into_iter()
            .map(|r| KeyedRecord::new(r, fold))
            .collect();
        Self { entries, fold }
    }

    /// Builds the haystack from a fallible stream, stopping at the first error.
    pub fn try_from_records<I>(records: I, fold: FoldMode) -> Result<Self>
    where
        I: IntoIterator<Item = Result<LocalityRecord>>,
    {
        let entries = records
            .into_iter()
            .map(|r| r.map(|r| KeyedRecord::new(r, fold)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries, fold })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyedRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fold the keys were built with. Needles must use the same one.
    pub fn fold(&self) -> FoldMode {
        self.fold
    }
}

impl<'a> IntoIterator for &'a Haystack {
    type Item = &'a KeyedRecord;
    type IntoIter = std::slice::Iter<'a, KeyedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
