// crates/geolink-core/src/text.rs

//! # Key Folding
//!
//! Comparison keys are stored verbatim and folded only when compared.

use serde::{Deserialize, Serialize};

/// How a comparison key is normalized before equality and distance checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldMode {
    /// Unicode lowercase only. Accents and punctuation are left alone.
    #[default]
    Lowercase,
    /// Transliterate to ASCII, then lowercase (`Zürich` -> `zurich`).
    Transliterate,
}

impl FoldMode {
    /// Apply this fold to `s`.
    #[inline]
    pub fn fold(self, s: &str) -> String {
        match self {
            FoldMode::Lowercase => s.to_lowercase(),
            FoldMode::Transliterate => fold_key(s),
        }
    }
}

/// Convert a string into a folded key suitable for accent-insensitive comparison.
///
/// Uses `deunicode` for a best-effort Unicode → ASCII transliteration,
/// followed by lowercasing.
///
/// ```rust
/// use geolink_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("Straße"), "strasse");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}
