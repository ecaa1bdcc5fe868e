// crates/geolink-core/src/record.rs

//! # Key Builder
//!
//! Turns a raw `(id, country, province, city)` row into a [`ComparisonKey`].
//! The key is a literal single-space join of the three locality fields;
//! nothing is escaped, so `"A B" + "C"` and `"A" + "B C"` collide.

use crate::error::{LinkError, RecordSet, Result};
use crate::text::FoldMode;
use serde::{Deserialize, Serialize};

/// Number of fields every input row must carry.
pub const FIELD_COUNT: usize = 4;

/// One input row: an identifier plus three locality fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalityRecord {
    pub id: String,
    pub country: String,
    pub province: String,
    pub city: String,
}

impl LocalityRecord {
    pub fn new(
        id: impl Into<String>,
        country: impl Into<String>,
        province: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            country: country.into(),
            province: province.into(),
            city: city.into(),
        }
    }

    /// Builds a record from an already-split row.
    ///
    /// `row` is the 1-based data row number used in the error when the
    /// field count is not exactly [`FIELD_COUNT`].
    pub fn from_fields<I, S>(fields: I, set: RecordSet, row: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.len() != FIELD_COUNT {
            return Err(LinkError::MalformedRecord {
                set,
                row,
                found: fields.len(),
            });
        }
        let city = fields.pop().unwrap_or_default();
        let province = fields.pop().unwrap_or_default();
        let country = fields.pop().unwrap_or_default();
        let id = fields.pop().unwrap_or_default();
        Ok(Self {
            id,
            country,
            province,
            city,
        })
    }
}

/// The space-joined locality key, kept in raw and folded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonKey {
    raw: String,
    folded: String,
}

impl ComparisonKey {
    /// Text written to the output sets.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Text used for equality and distance checks.
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

/// Joins `country province city` with single spaces and folds the result.
pub fn build_key(record: &LocalityRecord, fold: FoldMode) -> ComparisonKey {
    let raw = format!("{} {} {}", record.country, record.province, record.city);
    let folded = fold.fold(&raw);
    ComparisonKey { raw, folded }
}

/// A record paired with its key, so the fold runs once per record.
#[derive(Debug, Clone)]
pub struct KeyedRecord {
    pub record: LocalityRecord,
    pub key: ComparisonKey,
}

impl KeyedRecord {
    pub fn new(record: LocalityRecord, fold: FoldMode) -> Self {
        let key = build_key(&record, fold);
        Self { record, key }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.record.id
    }
}
