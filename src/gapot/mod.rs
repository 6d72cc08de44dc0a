//! Geometric algebra power theory (GAPoT) layer.
//!
//! This module provides:
//! - [`vector`]: multi-phase signals as grade-1 vectors
//! - [`biversor`]: scalar plus bivector products of two vectors (power)
//! - [`phasor`]: rectangular and polar views of consecutive term pairs
//! - [`rotor`]: rotor derivation, application and composition
//! - [`utils`]: pairwise list operations and rotation matrices

pub mod biversor;
pub mod phasor;
pub mod rotor;
pub mod utils;
pub mod vector;

pub use biversor::{Biversor, BiversorTerm};
pub use phasor::{PolarPhasor, RectPhasor};
pub use rotor::{apply_rotor, apply_rotors, compose_rotors, rotor_between};
pub use vector::Vector;
