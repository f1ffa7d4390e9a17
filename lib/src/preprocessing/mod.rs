//! Feature preprocessing applied before the linear model.
//!
//! The only transformation is per-feature standardization; see [`standard`].

pub mod standard;

pub use standard::{StandardizationStats, EPSILON};
