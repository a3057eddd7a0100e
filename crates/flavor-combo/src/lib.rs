//! Combo flavor plugin.
//!
//! A combo flavor chains multiple flavor plugins in a configured sequence so
//! that one logical flavor is the deterministic composition of its members
//! applied to a single instance spec. Each operation applies the aggregation
//! policy appropriate to it: validate, prepare and healthy fail fast, drain
//! is best-effort and reports every failure it encountered.

#![warn(missing_docs)]

mod aggregate;
mod combo;
mod config;
mod merge;

pub use aggregate::DrainFailures;
pub use combo::ComboFlavor;
pub use config::{ComboSpec, FlavorReference};
pub use merge::{clone_spec, merge_specs};
