//! Workspace umbrella crate: re-exports [`geolink_core`] so the demos can
//! `use geolink_rs::prelude::*`.
pub use geolink_core::*;
