//! Rotor derivation and application.
//!
//! A rotor is an even multivector `R` with `R * Reverse(R) = 1`. It rotates a
//! vector `v` by the sandwich product `R v Reverse(R)`.

use tracing::{debug, warn};

use crate::error::{GaError, Result};
use crate::gapot::vector::Vector;
use crate::multivector::Multivector;
use crate::scalar::{Normalizer, RealScalar, Scalar};
use crate::validation;

/// Rotor turning the direction of `v1` into the direction of `v2`, in the
/// plane `v1 ^ v2`.
///
/// The rotor lives in the smallest space holding both vectors and carries
/// the normalizer of `v1`.
///
/// # Errors
///
/// - [`GaError::DivisionByZero`] if either vector is zero.
/// - [`GaError::UndefinedRotor`] if the vectors point in opposite directions.
/// - [`GaError::NonFinite`] if the angle cosine is not a finite number.
pub fn rotor_between<S: RealScalar>(v1: &Vector<S>, v2: &Vector<S>) -> Result<Multivector<S>> {
    let normalizer = v1.normalizer().clone();
    let vspace_dim = v1.max_id().max(v2.max_id());

    let norms = normalizer.apply(v1.norm2() * v2.norm2());
    if norms.is_zero() {
        return Err(GaError::division_by_zero("rotor between zero vectors"));
    }

    let cos_angle = normalizer.apply(v1.dot(v2) / norms.sqrt());
    if !cos_angle.to_f64().is_finite() {
        return Err(GaError::non_finite("cosine of the rotation angle"));
    }
    debug!(cos_angle = cos_angle.to_f64(), vspace_dim, "deriving rotor");

    let one = S::one();
    if cos_angle >= one {
        debug!("vectors are parallel, using identity rotor");
        return Ok(identity(vspace_dim, &normalizer));
    }
    if cos_angle <= -one.clone() {
        return Err(GaError::UndefinedRotor);
    }

    let two = S::from_i64(2);
    let cos_half = normalizer.apply(((one.clone() + cos_angle.clone()) / two.clone()).sqrt());
    let sin_half = normalizer.apply(((one - cos_angle.clone()) / two).sqrt());

    let blade = v1.op(v2)?;
    let blade_norm2 = blade.norm2().abs();
    if blade_norm2.is_zero() {
        // Numerically parallel or antipodal.
        if cos_angle > S::zero() {
            debug!("rotation plane vanished, using identity rotor");
            return Ok(identity(vspace_dim, &normalizer));
        }
        return Err(GaError::UndefinedRotor);
    }

    let scale = normalizer.apply(sin_half / blade_norm2.sqrt());
    Ok(blade.scale_by(&scale).negative().add_scalar(&cos_half))
}

fn identity<S: Scalar>(vspace_dim: u32, normalizer: &Normalizer<S>) -> Multivector<S> {
    Multivector::scalar(vspace_dim, S::one()).with_normalizer(normalizer.clone())
}

/// Sandwich product `rotor * v * Reverse(rotor)`, projected to grade 1.
///
/// Components outside grade 1 mean `rotor` is not a rotor; they are dropped
/// and reported with a warning.
///
/// # Errors
///
/// Propagates product errors; none occur for valid operands.
pub fn apply_rotor<S: RealScalar>(rotor: &Multivector<S>, v: &Vector<S>) -> Result<Vector<S>> {
    let vspace_dim = rotor.vspace_dim().max(v.max_id());
    let rotor = rotor.embed(vspace_dim)?;
    let sandwich = rotor
        .gp(&v.to_multivector(vspace_dim)?)?
        .gp(&rotor.reverse())?;

    let residue = validation::non_vector_residue(&sandwich);
    let magnitude = validation::max_abs_coefficient(&residue);
    if magnitude > validation::RESIDUE_TOLERANCE {
        warn!(
            residue = magnitude,
            terms = residue.active_count(),
            "sandwich product left non-vector terms"
        );
    }

    Ok(sandwich.vector_part())
}

/// Single rotor equivalent to applying `rotors` in order, i.e.
/// `rotors[n-1] * ... * rotors[1] * rotors[0]`.
///
/// An empty slice yields the scalar `1` in a zero-dimensional space.
///
/// # Errors
///
/// Propagates product errors; none occur for valid rotors.
pub fn compose_rotors<S: Scalar>(rotors: &[Multivector<S>]) -> Result<Multivector<S>> {
    let Some(first) = rotors.first() else {
        return Ok(Multivector::scalar(0, S::one()));
    };
    let vspace_dim = rotors.iter().map(Multivector::vspace_dim).max().unwrap_or(0);
    rotors[1..]
        .iter()
        .try_fold(first.embed(vspace_dim)?, |acc, rotor| {
            rotor.embed(vspace_dim)?.gp(&acc)
        })
}

/// Apply `rotors` one after another.
///
/// # Errors
///
/// Propagates product errors; none occur for valid rotors.
pub fn apply_rotors<S: RealScalar>(rotors: &[Multivector<S>], v: &Vector<S>) -> Result<Vector<S>> {
    rotors
        .iter()
        .try_fold(v.clone(), |acc, rotor| apply_rotor(rotor, &acc))
}
