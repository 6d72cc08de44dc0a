//! Invariant checks for rotors and sandwich products.
//!
//! A rotor `R` must satisfy `R * Reverse(R) = 1` and contain only even
//! grades. These helpers measure how far a multivector is from that, and how
//! much of a sandwich product result falls outside grade 1.

use crate::error::Result;
use crate::math::frame;
use crate::multivector::Multivector;
use crate::scalar::{RealScalar, Scalar};

/// Largest coefficient of a residue that is still treated as round-off when
/// reporting rotor violations.
pub const RESIDUE_TOLERANCE: f64 = 1e-9;

/// `rotor * Reverse(rotor) - 1`.
///
/// # Errors
///
/// Propagates product errors; none occur for a well-formed multivector.
pub fn rotor_residue<S: Scalar>(rotor: &Multivector<S>) -> Result<Multivector<S>> {
    Ok(rotor.gp(&rotor.reverse())?.subtract_scalar(&S::one()))
}

/// Whether `rotor` is even and its residue is exactly zero under its own
/// normalizer.
///
/// # Errors
///
/// Propagates product errors; none occur for a well-formed multivector.
pub fn is_rotor<S: Scalar>(rotor: &Multivector<S>) -> Result<bool> {
    Ok(is_even(rotor) && rotor_residue(rotor)?.is_zero())
}

/// Like [`is_rotor`], accepting residue coefficients up to `tolerance`.
///
/// # Errors
///
/// Propagates product errors; none occur for a well-formed multivector.
pub fn is_rotor_within<S: RealScalar>(rotor: &Multivector<S>, tolerance: f64) -> Result<bool> {
    Ok(is_even(rotor) && max_abs_coefficient(&rotor_residue(rotor)?) <= tolerance)
}

fn is_even<S: Scalar>(mv: &Multivector<S>) -> bool {
    mv.terms().all(|(id, _)| frame::grade(id) % 2 == 0)
}

/// Every part of `mv` outside grade 1.
#[must_use]
pub fn non_vector_residue<S: Scalar>(mv: &Multivector<S>) -> Multivector<S> {
    mv.subtract(&mv.grade_part(1))
}

/// Largest absolute coefficient, `0.0` for the zero multivector.
#[must_use]
pub fn max_abs_coefficient<S: RealScalar>(mv: &Multivector<S>) -> f64 {
    mv.terms()
        .map(|(_, value)| value.abs().to_f64())
        .fold(0.0, f64::max)
}
