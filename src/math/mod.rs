//! Blade-level combinatorics.
//!
//! This module provides:
//! - [`frame`]: grade, sign and non-zero tests over blade identifiers
//! - [`blade_map`]: per-product mapping of blade pairs to target terms

pub mod blade_map;
pub mod frame;

pub use blade_map::{map_to_term, Metric, ProductKind};
pub use frame::{grade, has_negative_reverse, is_negative_gp, MAX_VSPACE_DIM};
