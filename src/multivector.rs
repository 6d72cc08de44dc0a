//! Sparse multivectors.
//!
//! A [`Multivector`] maps blade identifiers to scalar coefficients, ordered by
//! identifier. Inserting onto an occupied identifier sums the coefficients and
//! normalizes the result, so the stored value converges regardless of
//! insertion order. Zero coefficients may stay stored until filtered by
//! enumeration: [`Multivector::count`] includes them, [`Multivector::terms`]
//! and [`Multivector::active_count`] do not.
//!
//! Mutators (`set_term`, `add_term`, ...) work on an owned instance, reject
//! blades outside the declared space and return `&mut Self` for chaining. Arithmetic methods and operators never touch their
//! operands and always build a fresh value.
//!
//! # Example
//!
//! ```
//! use gapot_algebra::Multivector;
//!
//! let mut e1 = Multivector::<f64>::new(3);
//! e1.set_term(0b001, 1.0)?;
//! let mut e2 = Multivector::<f64>::new(3);
//! e2.set_term(0b010, 1.0)?;
//!
//! let e12 = e1.op(&e2)?;
//! assert_eq!(e12.term_value(0b011), 1.0);
//! # Ok::<(), gapot_algebra::GaError>(())
//! ```

use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::Zero;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GaError, Result};
use crate::gapot::Vector;
use crate::math::blade_map::ProductKind;
use crate::math::frame;
use crate::products::BilinearProduct;
use crate::scalar::{Normalizer, RealScalar, Scalar};

/// Most basis vectors a non-versor may use and still be inverted.
pub const MAX_INVERSE_GENERATORS: u32 = 10;

/// A single `(blade identifier, coefficient)` pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultivectorTerm<S> {
    /// Blade identifier.
    pub id: u64,
    /// Coefficient.
    pub value: S,
}

impl<S: Scalar> MultivectorTerm<S> {
    #[must_use]
    pub const fn new(id: u64, value: S) -> Self {
        Self { id, value }
    }

    /// Grade of the blade.
    #[must_use]
    pub const fn grade(&self) -> u32 {
        frame::grade(self.id)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// The reversed term.
    #[must_use]
    pub fn reverse(&self) -> Self {
        if frame::has_negative_reverse(self.id) {
            Self::new(self.id, -self.value.clone())
        } else {
            self.clone()
        }
    }
}

/// Sparse linear combination of basis blades.
#[derive(Debug, Clone)]
pub struct Multivector<S> {
    vspace_dim: u32,
    terms: BTreeMap<u64, S>,
    normalizer: Normalizer<S>,
}

impl<S: Scalar> Multivector<S> {
    /// Create a zero multivector in a vector space of dimension `vspace_dim`.
    ///
    /// Products reject dimensions above [`frame::MAX_VSPACE_DIM`].
    #[must_use]
    pub fn new(vspace_dim: u32) -> Self {
        Self {
            vspace_dim,
            terms: BTreeMap::new(),
            normalizer: Normalizer::identity(),
        }
    }

    /// Replace the normalization hook.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer<S>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Scalar multivector.
    #[must_use]
    pub fn scalar(vspace_dim: u32, value: S) -> Self {
        let mut mv = Self::new(vspace_dim);
        mv.insert_term(0, value);
        mv
    }

    /// Single scaled basis blade.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] when `id` does not fit the space.
    pub fn basis_blade(vspace_dim: u32, id: u64, value: S) -> Result<Self> {
        Self::from_terms(vspace_dim, std::iter::once((id, value)))
    }

    /// Build from `(identifier, value)` pairs, summing repeated identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] when an identifier does not fit the
    /// space, or the dimension exceeds [`frame::MAX_VSPACE_DIM`].
    pub fn from_terms(vspace_dim: u32, terms: impl IntoIterator<Item = (u64, S)>) -> Result<Self> {
        if vspace_dim > frame::MAX_VSPACE_DIM {
            return Err(GaError::malformed(format!(
                "vector space dimension {vspace_dim} exceeds {}",
                frame::MAX_VSPACE_DIM
            )));
        }
        let mut mv = Self::new(vspace_dim);
        for (id, value) in terms {
            mv.add_term(id, value)?;
        }
        Ok(mv)
    }

    /// Empty multivector sharing dimension and normalizer with `self`.
    pub(crate) fn empty_like(&self) -> Self {
        Self {
            vspace_dim: self.vspace_dim,
            terms: BTreeMap::new(),
            normalizer: self.normalizer.clone(),
        }
    }

    /// Declared dimension of the underlying vector space.
    #[must_use]
    pub const fn vspace_dim(&self) -> u32 {
        self.vspace_dim
    }

    /// Normalization hook carried by this value.
    #[must_use]
    pub const fn normalizer(&self) -> &Normalizer<S> {
        &self.normalizer
    }

    /// Number of stored terms, including zero-valued ones.
    #[must_use]
    pub fn count(&self) -> usize {
        self.terms.len()
    }

    /// Number of non-zero terms.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.terms.values().filter(|v| !v.is_zero()).count()
    }

    /// Whether every stored coefficient is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.values().all(Zero::is_zero)
    }

    /// Remove all terms.
    pub fn set_to_zero(&mut self) -> &mut Self {
        self.terms.clear();
        self
    }

    fn check_blade(&self, id: u64) -> Result<()> {
        if frame::fits_in(id, self.vspace_dim) {
            Ok(())
        } else {
            Err(GaError::malformed(format!(
                "blade {id:#b} does not fit in dimension {}",
                self.vspace_dim
            )))
        }
    }

    fn insert_term(&mut self, id: u64, value: S) {
        let value = self.normalizer.apply(value);
        self.terms.insert(id, value);
    }

    /// Collision-merge insert for identifiers already known to fit.
    pub(crate) fn merge_term(&mut self, id: u64, value: S) {
        let merged = match self.terms.remove(&id) {
            Some(old) => old + value,
            None => value,
        };
        let merged = self.normalizer.apply(merged);
        self.terms.insert(id, merged);
    }

    /// Store `value` at `id`, replacing any previous coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] when `id` does not fit the space.
    pub fn set_term(&mut self, id: u64, value: S) -> Result<&mut Self> {
        self.check_blade(id)?;
        self.insert_term(id, value);
        Ok(self)
    }

    /// Add `value` to the coefficient at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] when `id` does not fit the space.
    pub fn add_term(&mut self, id: u64, value: S) -> Result<&mut Self> {
        self.check_blade(id)?;
        self.merge_term(id, value);
        Ok(self)
    }

    /// Add several terms. Terms before the first rejected one stay added.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] when a term does not fit the space.
    pub fn add_terms(
        &mut self,
        terms: impl IntoIterator<Item = MultivectorTerm<S>>,
    ) -> Result<&mut Self> {
        for term in terms {
            self.add_term(term.id, term.value)?;
        }
        Ok(self)
    }

    /// Coefficient at `id`, zero when absent.
    #[must_use]
    pub fn term_value(&self, id: u64) -> S {
        self.terms.get(&id).cloned().unwrap_or_else(S::zero)
    }

    #[must_use]
    pub fn term(&self, id: u64) -> MultivectorTerm<S> {
        MultivectorTerm::new(id, self.term_value(id))
    }

    /// Coefficient of the scalar blade.
    #[must_use]
    pub fn scalar_part(&self) -> S {
        self.term_value(0)
    }

    /// Non-zero terms in ascending identifier order.
    pub fn terms(&self) -> impl Iterator<Item = (u64, &S)> + '_ {
        self.terms
            .iter()
            .filter(|(_, v)| !v.is_zero())
            .map(|(&id, v)| (id, v))
    }

    /// Owned copy of the non-zero terms.
    #[must_use]
    pub fn to_terms(&self) -> Vec<MultivectorTerm<S>> {
        self.terms()
            .map(|(id, v)| MultivectorTerm::new(id, v.clone()))
            .collect()
    }

    /// Non-zero terms of the given grade.
    pub fn terms_of_grade(&self, grade: u32) -> impl Iterator<Item = (u64, &S)> + '_ {
        self.terms().filter(move |(id, _)| frame::grade(*id) == grade)
    }

    /// Grade projection.
    #[must_use]
    pub fn grade_part(&self, grade: u32) -> Self {
        let mut result = self.empty_like();
        for (id, value) in self.terms_of_grade(grade) {
            result.terms.insert(id, value.clone());
        }
        result
    }

    /// Grade-1 part as a GAPoT vector (blade bit `i` becomes vector id `i + 1`).
    #[must_use]
    pub fn vector_part(&self) -> Vector<S> {
        let terms = self
            .terms_of_grade(1)
            .map(|(id, value)| (id.trailing_zeros() + 1, value.clone()))
            .collect();
        Vector::from_map(terms, self.normalizer.clone())
    }

    /// Apply `func` to every coefficient.
    #[must_use]
    pub fn map_scalars(&self, func: impl Fn(&S) -> S) -> Self {
        self.map_terms(|_, value| func(value))
    }

    fn map_terms(&self, func: impl Fn(u64, &S) -> S) -> Self {
        let mut result = self.empty_like();
        for (&id, value) in &self.terms {
            let mapped = self.normalizer.apply(func(id, value));
            result.terms.insert(id, mapped);
        }
        result
    }

    /// Re-declare in a space of dimension `vspace_dim`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DimensionMismatch`] when a non-zero term does not fit
    /// the new space.
    pub fn embed(&self, vspace_dim: u32) -> Result<Self> {
        if vspace_dim > frame::MAX_VSPACE_DIM {
            return Err(GaError::dimension_mismatch(frame::MAX_VSPACE_DIM, vspace_dim));
        }
        if let Some((id, _)) = self.terms().find(|(id, _)| !frame::fits_in(*id, vspace_dim)) {
            return Err(GaError::dimension_mismatch(vspace_dim, frame::min_vspace_dim(id)));
        }
        let mut result = self.clone();
        result.vspace_dim = vspace_dim;
        Ok(result)
    }

    /// Smallest dimension holding every non-zero term.
    #[must_use]
    pub fn min_vspace_dim(&self) -> u32 {
        self.terms()
            .map(|(id, _)| frame::min_vspace_dim(id))
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn negative(&self) -> Self {
        self.map_scalars(|v| -v.clone())
    }

    /// Termwise sum. The result lives in the larger of the two spaces.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, rhs: &Self) -> Self {
        let mut result = self.clone();
        result.vspace_dim = self.vspace_dim.max(rhs.vspace_dim);
        for (&id, value) in &rhs.terms {
            result.merge_term(id, value.clone());
        }
        result
    }

    #[must_use]
    pub fn subtract(&self, rhs: &Self) -> Self {
        let mut result = self.clone();
        result.vspace_dim = self.vspace_dim.max(rhs.vspace_dim);
        for (&id, value) in &rhs.terms {
            result.merge_term(id, -value.clone());
        }
        result
    }

    #[must_use]
    pub fn add_scalar(&self, value: &S) -> Self {
        let mut result = self.clone();
        result.merge_term(0, value.clone());
        result
    }

    #[must_use]
    pub fn subtract_scalar(&self, value: &S) -> Self {
        let mut result = self.clone();
        result.merge_term(0, -value.clone());
        result
    }

    #[must_use]
    pub fn scale_by(&self, factor: &S) -> Self {
        self.map_scalars(|v| v.clone() * factor.clone())
    }

    /// Divide every coefficient by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DivisionByZero`] when `divisor` is zero.
    pub fn divide_by(&self, divisor: &S) -> Result<Self> {
        if divisor.is_zero() {
            return Err(GaError::division_by_zero("multivector divided by zero scalar"));
        }
        Ok(self.map_scalars(|v| v.clone() / divisor.clone()))
    }

    /// Reversion: negates blades of grade 2 or 3 modulo 4.
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.map_terms(|id, v| {
            if frame::has_negative_reverse(id) {
                -v.clone()
            } else {
                v.clone()
            }
        })
    }

    /// Reversion followed by scaling by `factor`.
    #[must_use]
    pub fn scaled_reverse(&self, factor: &S) -> Self {
        self.map_terms(|id, v| {
            let scaled = v.clone() * factor.clone();
            if frame::has_negative_reverse(id) {
                -scaled
            } else {
                scaled
            }
        })
    }

    /// Grade involution: negates odd blades.
    #[must_use]
    pub fn grade_involution(&self) -> Self {
        self.map_terms(|id, v| {
            if frame::has_negative_grade_involution(id) {
                -v.clone()
            } else {
                v.clone()
            }
        })
    }

    /// Clifford conjugate: reversion composed with grade involution.
    #[must_use]
    pub fn clifford_conjugate(&self) -> Self {
        self.map_terms(|id, v| {
            if frame::has_negative_clifford_conjugate(id) {
                -v.clone()
            } else {
                v.clone()
            }
        })
    }

    /// Squared norm `<M Reverse(M)>_0` under the Euclidean metric.
    ///
    /// A Euclidean blade squares to its reversion sign, so every term
    /// contributes `value^2`. [`BilinearProduct::norm2`] covers other metrics.
    #[must_use]
    pub fn norm2(&self) -> S {
        let sum = self
            .terms
            .values()
            .fold(S::zero(), |acc, value| acc + value.clone() * value.clone());
        self.normalizer.apply(sum)
    }

    /// Two-sided inverse under the Euclidean metric.
    ///
    /// When `M Reverse(M)` is a scalar (blades, versors) the inverse is
    /// `Reverse(M) / (M Reverse(M))`. Any other multivector is inverted through
    /// its characteristic polynomial in the subalgebra of the basis vectors it
    /// uses, which costs `2^ceil(k/2)` geometric products for `k` of them.
    ///
    /// # Errors
    ///
    /// - [`GaError::DivisionByZero`] when `M` is zero or singular.
    /// - [`GaError::Unsupported`] when a non-versor uses more than
    ///   [`MAX_INVERSE_GENERATORS`] basis vectors.
    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(GaError::division_by_zero("inverse of zero multivector"));
        }
        let reverse = self.reverse();
        let square = self.gp(&reverse)?;
        if square.terms().all(|(id, _)| id == 0) {
            let norm2 = square.scalar_part();
            if norm2.is_zero() {
                return Err(GaError::division_by_zero("inverse of null multivector"));
            }
            return reverse.divide_by(&norm2);
        }
        self.characteristic_inverse()
    }

    /// Faddeev-LeVerrier recurrence on left multiplication by `self`, whose
    /// trace over the `2^ceil(k/2)`-dimensional representation is that
    /// dimension times the scalar part.
    fn characteristic_inverse(&self) -> Result<Self> {
        let generators = frame::grade(self.terms().fold(0, |acc, (id, _)| acc | id));
        if generators > MAX_INVERSE_GENERATORS {
            return Err(GaError::unsupported(format!(
                "inverse of a non-versor over {generators} basis vectors (at most {MAX_INVERSE_GENERATORS})"
            )));
        }
        let degree: i64 = 1 << generators.div_ceil(2);
        let trace_scale = S::from_i64(degree);
        let characteristic = |power: &Self, step: i64| {
            self.normalizer
                .apply(trace_scale.clone() * power.scalar_part() / S::from_i64(step))
        };

        // B_1 = M, B_(k+1) = M (B_k - c_k), c_k = degree <B_k>_0 / k
        let mut adjugate =
            Self::scalar(self.vspace_dim, S::one()).with_normalizer(self.normalizer.clone());
        let mut power = self.clone();
        for step in 1..degree {
            adjugate = power.subtract_scalar(&characteristic(&power, step));
            power = self.gp(&adjugate)?;
        }
        let determinant = characteristic(&power, degree);
        if determinant.is_zero() {
            return Err(GaError::division_by_zero("inverse of singular multivector"));
        }
        adjugate.divide_by(&determinant)
    }

    /// Euclidean product of the given kind, declared in `self`'s space.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DimensionMismatch`] when `rhs` lives in another space.
    pub fn product(&self, kind: ProductKind, rhs: &Self) -> Result<Self> {
        BilinearProduct::euclidean(kind, self.vspace_dim)?.apply(self, rhs)
    }

    /// Outer product.
    ///
    /// # Errors
    ///
    /// See [`Multivector::product`].
    pub fn op(&self, rhs: &Self) -> Result<Self> {
        self.product(ProductKind::Outer, rhs)
    }

    /// Geometric product.
    ///
    /// # Errors
    ///
    /// See [`Multivector::product`].
    pub fn gp(&self, rhs: &Self) -> Result<Self> {
        self.product(ProductKind::Geometric, rhs)
    }

    /// Scalar product.
    ///
    /// # Errors
    ///
    /// See [`Multivector::product`].
    pub fn sp(&self, rhs: &Self) -> Result<Self> {
        self.product(ProductKind::Scalar, rhs)
    }

    /// Left contraction.
    ///
    /// # Errors
    ///
    /// See [`Multivector::product`].
    pub fn lcp(&self, rhs: &Self) -> Result<Self> {
        self.product(ProductKind::LeftContraction, rhs)
    }

    /// Right contraction.
    ///
    /// # Errors
    ///
    /// See [`Multivector::product`].
    pub fn rcp(&self, rhs: &Self) -> Result<Self> {
        self.product(ProductKind::RightContraction, rhs)
    }

    /// Hestenes inner product.
    ///
    /// # Errors
    ///
    /// See [`Multivector::product`].
    pub fn hip(&self, rhs: &Self) -> Result<Self> {
        self.product(ProductKind::HestenesInner, rhs)
    }

    /// Commutator product.
    ///
    /// # Errors
    ///
    /// See [`Multivector::product`].
    pub fn cp(&self, rhs: &Self) -> Result<Self> {
        self.product(ProductKind::Commutator, rhs)
    }

    /// Anti-commutator product.
    ///
    /// # Errors
    ///
    /// See [`Multivector::product`].
    pub fn acp(&self, rhs: &Self) -> Result<Self> {
        self.product(ProductKind::AntiCommutator, rhs)
    }
}

impl<S: RealScalar> Multivector<S> {
    /// Square root of [`Multivector::norm2`].
    #[must_use]
    pub fn norm(&self) -> S {
        self.normalizer.apply(self.norm2().sqrt())
    }
}

/// Equality over non-zero terms; dimension and normalizer are ignored.
impl<S: Scalar> PartialEq for Multivector<S> {
    fn eq(&self, other: &Self) -> bool {
        self.terms().eq(other.terms())
    }
}

impl approx::AbsDiffEq for Multivector<f64> {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-10
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.terms
            .keys()
            .chain(other.terms.keys())
            .all(|&id| (self.term_value(id) - other.term_value(id)).abs() <= epsilon)
    }
}

impl<S: Scalar> Add for &Multivector<S> {
    type Output = Multivector<S>;

    fn add(self, rhs: Self) -> Self::Output {
        Multivector::add(self, rhs)
    }
}

impl<S: Scalar> Sub for &Multivector<S> {
    type Output = Multivector<S>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

impl<S: Scalar> Neg for &Multivector<S> {
    type Output = Multivector<S>;

    fn neg(self) -> Self::Output {
        self.negative()
    }
}

impl<S: Scalar> Neg for Multivector<S> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negative()
    }
}

/// Euclidean geometric product. Fails on a dimension mismatch.
impl<S: Scalar> Mul for &Multivector<S> {
    type Output = Result<Multivector<S>>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.gp(rhs)
    }
}

impl<S: Scalar> Mul<S> for &Multivector<S> {
    type Output = Multivector<S>;

    fn mul(self, rhs: S) -> Self::Output {
        self.scale_by(&rhs)
    }
}
