//! Helpers over lists of GAPoT values.
//!
//! Pairwise functions combine the `k`-th element of two equally long slices,
//! as needed when a signal is split into per-phase or per-harmonic segments.

use nalgebra::DMatrix;
use num_traits::One;

use crate::error::{GaError, Result};
use crate::gapot::biversor::Biversor;
use crate::gapot::rotor;
use crate::gapot::vector::Vector;
use crate::multivector::Multivector;
use crate::ops::GaElement;
use crate::scalar::{RealScalar, Scalar};

fn check_lengths<A, B>(left: &[A], right: &[B]) -> Result<()> {
    if left.len() == right.len() {
        Ok(())
    } else {
        Err(GaError::length_mismatch(left.len(), right.len()))
    }
}

/// # Errors
///
/// Returns [`GaError::LengthMismatch`] if the slices differ in length.
pub fn add_pairwise<T: GaElement>(left: &[T], right: &[T]) -> Result<Vec<T>> {
    check_lengths(left, right)?;
    Ok(left.iter().zip(right).map(|(a, b)| a.add(b)).collect())
}

/// # Errors
///
/// Returns [`GaError::LengthMismatch`] if the slices differ in length.
pub fn subtract_pairwise<T: GaElement>(left: &[T], right: &[T]) -> Result<Vec<T>> {
    check_lengths(left, right)?;
    Ok(left.iter().zip(right).map(|(a, b)| a.subtract(b)).collect())
}

/// Pairwise vector products, each a [`Biversor`].
///
/// # Errors
///
/// Returns [`GaError::LengthMismatch`] if the slices differ in length.
pub fn gp_pairwise<S: Scalar>(left: &[Vector<S>], right: &[Vector<S>]) -> Result<Vec<Biversor<S>>> {
    check_lengths(left, right)?;
    Ok(left.iter().zip(right).map(|(a, b)| a.gp(b)).collect())
}

/// Pairwise `left[k] * inverse(right[k])`.
///
/// # Errors
///
/// Returns [`GaError::LengthMismatch`] if the slices differ in length and
/// [`GaError::DivisionByZero`] if a divisor is zero.
pub fn divide_pairwise<S: Scalar>(
    left: &[Vector<S>],
    right: &[Vector<S>],
) -> Result<Vec<Biversor<S>>> {
    check_lengths(left, right)?;
    left.iter()
        .zip(right)
        .map(|(a, b)| Ok(a.gp(&b.inverse()?)))
        .collect()
}

#[must_use]
pub fn negate_all<T: GaElement>(values: &[T]) -> Vec<T> {
    values.iter().map(GaElement::negative).collect()
}

/// # Errors
///
/// Returns [`GaError::DivisionByZero`] if any element has zero norm.
pub fn inverse_all<T: GaElement>(values: &[T]) -> Result<Vec<T>> {
    values.iter().map(GaElement::inverse).collect()
}

#[must_use]
pub fn norm2_all<T: GaElement>(values: &[T]) -> Vec<T::Scalar> {
    values.iter().map(GaElement::norm2).collect()
}

#[must_use]
pub fn norm_all<S: RealScalar>(values: &[Vector<S>]) -> Vec<S> {
    values.iter().map(Vector::norm).collect()
}

/// Outer product `values[0] ^ values[1] ^ ...` in the smallest common space.
///
/// An empty slice yields the scalar `1`.
///
/// # Errors
///
/// Propagates product errors; none occur for valid operands.
pub fn outer_product<T: GaElement>(values: &[T]) -> Result<Multivector<T::Scalar>> {
    let dim = values.iter().map(GaElement::ambient_dim).max().unwrap_or(0);
    values
        .iter()
        .try_fold(Multivector::scalar(dim, <T::Scalar as One>::one()), |acc, value| {
            acc.op(&value.to_multivector(dim)?)
        })
}

/// Matrix whose column `j` is the image of basis vector `e(j+1)` under
/// `rotor`, in a space of dimension `vspace_dim`.
///
/// # Errors
///
/// Returns [`GaError::DimensionMismatch`] if the rotor does not fit in
/// `vspace_dim`.
pub fn rotation_matrix(rotor: &Multivector<f64>, vspace_dim: u32) -> Result<DMatrix<f64>> {
    let rotor = rotor.embed(vspace_dim)?;
    let n = vspace_dim as usize;
    let mut matrix = DMatrix::zeros(n, n);
    for column in 1..=vspace_dim {
        let mut basis = Vector::new();
        basis.set_term(column, 1.0)?;
        let image = rotor::apply_rotor(&rotor, &basis)?;
        for (row, value) in image.terms() {
            matrix[(row as usize - 1, column as usize - 1)] = *value;
        }
    }
    Ok(matrix)
}
