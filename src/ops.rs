//! Operations shared by every multivector-family type.
//!
//! [`GaElement`] is implemented by [`Multivector`], [`Vector`] and
//! [`Biversor`]. Generic code (pairwise list operations, n-ary outer
//! products) is written against it. Mixed products go through the general
//! multivector in the smallest space holding both operands.

use crate::error::Result;
use crate::gapot::{Biversor, Vector};
use crate::multivector::Multivector;
use crate::scalar::Scalar;

/// Common arithmetic of multivector-family values.
///
/// All methods leave `self` untouched and build a fresh value.
pub trait GaElement: Clone {
    type Scalar: Scalar;

    fn add(&self, rhs: &Self) -> Self;
    fn subtract(&self, rhs: &Self) -> Self;
    fn negative(&self) -> Self;
    fn scale_by(&self, factor: &Self::Scalar) -> Self;
    fn reverse(&self) -> Self;
    fn norm2(&self) -> Self::Scalar;

    /// # Errors
    ///
    /// Returns [`crate::GaError::DivisionByZero`] for a zero-norm value.
    fn inverse(&self) -> Result<Self>;

    fn is_zero(&self) -> bool;

    /// Dimension of the space the value is declared in, or the smallest one
    /// holding it for types without a declared space.
    fn ambient_dim(&self) -> u32;

    /// # Errors
    ///
    /// Returns [`crate::GaError::DimensionMismatch`] if the value does not fit
    /// in `vspace_dim`.
    fn to_multivector(&self, vspace_dim: u32) -> Result<Multivector<Self::Scalar>>;

    /// Geometric product in the smallest space holding both operands.
    ///
    /// # Errors
    ///
    /// Propagates product errors; none occur for valid operands.
    fn geometric_product<T>(&self, rhs: &T) -> Result<Multivector<Self::Scalar>>
    where
        T: GaElement<Scalar = Self::Scalar>,
    {
        let dim = self.ambient_dim().max(rhs.ambient_dim());
        self.to_multivector(dim)?.gp(&rhs.to_multivector(dim)?)
    }

    /// Outer product in the smallest space holding both operands.
    ///
    /// # Errors
    ///
    /// Propagates product errors; none occur for valid operands.
    fn outer_product<T>(&self, rhs: &T) -> Result<Multivector<Self::Scalar>>
    where
        T: GaElement<Scalar = Self::Scalar>,
    {
        let dim = self.ambient_dim().max(rhs.ambient_dim());
        self.to_multivector(dim)?.op(&rhs.to_multivector(dim)?)
    }
}

impl<S: Scalar> GaElement for Multivector<S> {
    type Scalar = S;

    fn add(&self, rhs: &Self) -> Self {
        Multivector::add(self, rhs)
    }

    fn subtract(&self, rhs: &Self) -> Self {
        Multivector::subtract(self, rhs)
    }

    fn negative(&self) -> Self {
        Multivector::negative(self)
    }

    fn scale_by(&self, factor: &S) -> Self {
        Multivector::scale_by(self, factor)
    }

    fn reverse(&self) -> Self {
        Multivector::reverse(self)
    }

    fn norm2(&self) -> S {
        Multivector::norm2(self)
    }

    fn inverse(&self) -> Result<Self> {
        Multivector::inverse(self)
    }

    fn is_zero(&self) -> bool {
        Multivector::is_zero(self)
    }

    fn ambient_dim(&self) -> u32 {
        self.vspace_dim()
    }

    fn to_multivector(&self, vspace_dim: u32) -> Result<Self> {
        self.embed(vspace_dim)
    }
}

impl<S: Scalar> GaElement for Vector<S> {
    type Scalar = S;

    fn add(&self, rhs: &Self) -> Self {
        Vector::add(self, rhs)
    }

    fn subtract(&self, rhs: &Self) -> Self {
        Vector::subtract(self, rhs)
    }

    fn negative(&self) -> Self {
        Vector::negative(self)
    }

    fn scale_by(&self, factor: &S) -> Self {
        Vector::scale_by(self, factor)
    }

    fn reverse(&self) -> Self {
        Vector::reverse(self)
    }

    fn norm2(&self) -> S {
        Vector::norm2(self)
    }

    fn inverse(&self) -> Result<Self> {
        Vector::inverse(self)
    }

    fn is_zero(&self) -> bool {
        Vector::is_zero(self)
    }

    fn ambient_dim(&self) -> u32 {
        self.max_id()
    }

    fn to_multivector(&self, vspace_dim: u32) -> Result<Multivector<S>> {
        Vector::to_multivector(self, vspace_dim)
    }
}

impl<S: Scalar> GaElement for Biversor<S> {
    type Scalar = S;

    fn add(&self, rhs: &Self) -> Self {
        Biversor::add(self, rhs)
    }

    fn subtract(&self, rhs: &Self) -> Self {
        Biversor::subtract(self, rhs)
    }

    fn negative(&self) -> Self {
        Biversor::negative(self)
    }

    fn scale_by(&self, factor: &S) -> Self {
        Biversor::scale_by(self, factor)
    }

    fn reverse(&self) -> Self {
        Biversor::reverse(self)
    }

    fn norm2(&self) -> S {
        Biversor::norm2(self)
    }

    fn inverse(&self) -> Result<Self> {
        Biversor::inverse(self)
    }

    fn is_zero(&self) -> bool {
        Biversor::is_zero(self)
    }

    fn ambient_dim(&self) -> u32 {
        self.max_id()
    }

    fn to_multivector(&self, vspace_dim: u32) -> Result<Multivector<S>> {
        Biversor::to_multivector(self, vspace_dim)
    }
}
