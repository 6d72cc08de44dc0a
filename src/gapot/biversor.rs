//! Biversors: scalar plus bivector.
//!
//! The geometric product of two GAPoT vectors has only grade 0 and grade 2
//! parts. A [`Biversor`] stores those parts keyed by a pair of vector term
//! identifiers. The scalar part sits on the pair `(1, 1)`; bivector terms are
//! stored with the smaller identifier first.
//!
//! In power terms, for voltage `u` and current `i` the biversor `u * i`
//! splits into active power (the scalar) and reactive or non-active power
//! (the bivector terms).

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GaError, Result};
use crate::gapot::vector::{validate_vector_id, Vector};
use crate::math::frame;
use crate::multivector::Multivector;
use crate::scalar::{Normalizer, RealScalar, Scalar};

/// One biversor term in canonical form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BiversorTerm<S> {
    pub id1: u32,
    pub id2: u32,
    pub value: S,
}

impl<S: Scalar> BiversorTerm<S> {
    /// Canonical term for the product `e_id1 e_id2` scaled by `value`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] if either identifier is invalid.
    pub fn new(id1: u32, id2: u32, value: S) -> Result<Self> {
        validate_vector_id(id1)?;
        validate_vector_id(id2)?;
        Ok(Self::canonical(id1, id2, value))
    }

    /// Equal identifiers collapse to `(1, 1)`; swapped ones negate `value`.
    pub(crate) fn canonical(id1: u32, id2: u32, value: S) -> Self {
        match id1.cmp(&id2) {
            std::cmp::Ordering::Equal => Self {
                id1: 1,
                id2: 1,
                value,
            },
            std::cmp::Ordering::Less => Self { id1, id2, value },
            std::cmp::Ordering::Greater => Self {
                id1: id2,
                id2: id1,
                value: -value,
            },
        }
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.id1 == self.id2
    }

    /// Pair `(2k - 1, 2k)` produced by the two components of one phasor.
    #[must_use]
    pub const fn is_phasor(&self) -> bool {
        self.id1 % 2 == 1 && self.id2 == self.id1 + 1
    }

    /// The pair `(1, 2)`.
    #[must_use]
    pub const fn is_fundamental_phasor(&self) -> bool {
        self.id1 == 1 && self.id2 == 2
    }

    /// Blade identifier of the term in the full algebra.
    #[must_use]
    pub const fn blade_id(&self) -> u64 {
        if self.is_scalar() {
            0
        } else {
            frame::basis_vector_id(self.id1) | frame::basis_vector_id(self.id2)
        }
    }
}

/// Scalar plus bivector, keyed by canonical identifier pairs.
#[derive(Debug, Clone)]
pub struct Biversor<S> {
    terms: BTreeMap<(u32, u32), S>,
    normalizer: Normalizer<S>,
}

impl<S: Scalar> Default for Biversor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar> Biversor<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            terms: BTreeMap::new(),
            normalizer: Normalizer::identity(),
        }
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer<S>) -> Self {
        self.normalizer = normalizer;
        self
    }

    #[must_use]
    pub fn scalar(value: S) -> Self {
        let mut bv = Self::new();
        bv.add_canonical(BiversorTerm::canonical(1, 1, value));
        bv
    }

    /// Build from `(id1, id2, value)` triples.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] if an identifier is invalid.
    pub fn from_terms(terms: impl IntoIterator<Item = (u32, u32, S)>) -> Result<Self> {
        let mut bv = Self::new();
        for (id1, id2, value) in terms {
            bv.add_term(id1, id2, value)?;
        }
        Ok(bv)
    }

    fn empty_like(&self) -> Self {
        Self {
            terms: BTreeMap::new(),
            normalizer: self.normalizer.clone(),
        }
    }

    #[must_use]
    pub const fn normalizer(&self) -> &Normalizer<S> {
        &self.normalizer
    }

    /// Number of stored terms, including zero-valued ones.
    #[must_use]
    pub fn count(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.terms().count()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms().next().is_none()
    }

    /// Largest identifier with a non-zero coefficient.
    #[must_use]
    pub fn max_id(&self) -> u32 {
        self.terms()
            .filter(|((id1, id2), _)| id1 != id2)
            .map(|((_, id2), _)| id2)
            .max()
            .unwrap_or(0)
    }

    /// Coefficient of `e_id1 e_id2`, taking the swap sign into account.
    #[must_use]
    pub fn term_value(&self, id1: u32, id2: u32) -> S {
        let key = BiversorTerm::canonical(id1, id2, S::one());
        let value = self
            .terms
            .get(&(key.id1, key.id2))
            .cloned()
            .unwrap_or_else(S::zero);
        value * key.value
    }

    /// Scalar part.
    #[must_use]
    pub fn scalar_part(&self) -> S {
        self.term_value(1, 1)
    }

    /// Non-zero terms keyed by canonical pair, in ascending order.
    pub fn terms(&self) -> impl Iterator<Item = ((u32, u32), &S)> + '_ {
        self.terms
            .iter()
            .filter(|(_, v)| !v.is_zero())
            .map(|(&key, v)| (key, v))
    }

    #[must_use]
    pub fn to_terms(&self) -> Vec<BiversorTerm<S>> {
        self.terms()
            .map(|((id1, id2), value)| BiversorTerm {
                id1,
                id2,
                value: value.clone(),
            })
            .collect()
    }

    pub fn set_to_zero(&mut self) -> &mut Self {
        self.terms.clear();
        self
    }

    /// Add `value * e_id1 e_id2`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] if an identifier is invalid.
    pub fn add_term(&mut self, id1: u32, id2: u32, value: S) -> Result<&mut Self> {
        let term = BiversorTerm::new(id1, id2, value)?;
        self.add_canonical(term);
        Ok(self)
    }

    /// Replace the coefficient of `e_id1 e_id2`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] if an identifier is invalid.
    pub fn set_term(&mut self, id1: u32, id2: u32, value: S) -> Result<&mut Self> {
        let term = BiversorTerm::new(id1, id2, value)?;
        let value = self.normalizer.apply(term.value);
        self.terms.insert((term.id1, term.id2), value);
        Ok(self)
    }

    pub(crate) fn add_canonical(&mut self, term: BiversorTerm<S>) {
        let key = (term.id1, term.id2);
        let merged = match self.terms.remove(&key) {
            Some(old) => old + term.value,
            None => term.value,
        };
        let merged = self.normalizer.apply(merged);
        self.terms.insert(key, merged);
    }

    fn filtered(&self, keep: impl Fn(&BiversorTerm<S>) -> bool) -> Self {
        let mut result = self.empty_like();
        for term in self.to_terms().into_iter().filter(|t| keep(t)) {
            result.terms.insert((term.id1, term.id2), term.value);
        }
        result
    }

    fn total(&self, keep: impl Fn(&BiversorTerm<S>) -> bool) -> S {
        let sum = self
            .to_terms()
            .into_iter()
            .filter(|t| keep(t))
            .fold(S::zero(), |acc, t| acc + t.value);
        self.normalizer.apply(sum)
    }

    /// Sum of every coefficient.
    #[must_use]
    pub fn term_values_sum(&self) -> S {
        self.total(|_| true)
    }

    /// Scalar part as a biversor.
    #[must_use]
    pub fn active_part(&self) -> Self {
        self.filtered(BiversorTerm::is_scalar)
    }

    #[must_use]
    pub fn active_total(&self) -> S {
        self.total(BiversorTerm::is_scalar)
    }

    /// Terms on phasor pairs `(2k - 1, 2k)`.
    #[must_use]
    pub fn reactive_part(&self) -> Self {
        self.filtered(BiversorTerm::is_phasor)
    }

    #[must_use]
    pub fn reactive_total(&self) -> S {
        self.total(BiversorTerm::is_phasor)
    }

    /// All bivector terms.
    #[must_use]
    pub fn non_active_part(&self) -> Self {
        self.filtered(|t| !t.is_scalar())
    }

    #[must_use]
    pub fn non_active_total(&self) -> S {
        self.total(|t| !t.is_scalar())
    }

    /// The `(1, 2)` term.
    #[must_use]
    pub fn fundamental_reactive_part(&self) -> Self {
        self.filtered(BiversorTerm::is_fundamental_phasor)
    }

    #[must_use]
    pub fn fundamental_reactive_total(&self) -> S {
        self.total(BiversorTerm::is_fundamental_phasor)
    }

    /// Bivector terms other than `(1, 2)`.
    #[must_use]
    pub fn harmonic_part(&self) -> Self {
        self.filtered(|t| !t.is_scalar() && !t.is_fundamental_phasor())
    }

    #[must_use]
    pub fn harmonic_total(&self) -> S {
        self.total(|t| !t.is_scalar() && !t.is_fundamental_phasor())
    }

    fn map_terms(&self, func: impl Fn(bool, &S) -> S) -> Self {
        let mut result = self.empty_like();
        for (&(id1, id2), value) in &self.terms {
            let mapped = self.normalizer.apply(func(id1 == id2, value));
            result.terms.insert((id1, id2), mapped);
        }
        result
    }

    #[must_use]
    pub fn negative(&self) -> Self {
        self.map_terms(|_, v| -v.clone())
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, rhs: &Self) -> Self {
        let mut result = self.clone();
        for term in rhs.to_terms() {
            result.add_canonical(term);
        }
        result
    }

    #[must_use]
    pub fn subtract(&self, rhs: &Self) -> Self {
        self.add(&rhs.negative())
    }

    #[must_use]
    pub fn scale_by(&self, factor: &S) -> Self {
        self.map_terms(|_, v| v.clone() * factor.clone())
    }

    /// Negates the bivector terms.
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.map_terms(|is_scalar, v| if is_scalar { v.clone() } else { -v.clone() })
    }

    /// Negates the scalar term.
    #[must_use]
    pub fn negative_reverse(&self) -> Self {
        self.map_terms(|is_scalar, v| if is_scalar { -v.clone() } else { v.clone() })
    }

    #[must_use]
    pub fn scaled_reverse(&self, factor: &S) -> Self {
        self.map_terms(|is_scalar, v| {
            let scaled = v.clone() * factor.clone();
            if is_scalar {
                scaled
            } else {
                -scaled
            }
        })
    }

    /// Sum of squared coefficients.
    #[must_use]
    pub fn norm2(&self) -> S {
        let sum = self
            .terms
            .values()
            .fold(S::zero(), |acc, v| acc + v.clone() * v.clone());
        self.normalizer.apply(sum)
    }

    /// `scaled_reverse(1 / norm2)`.
    ///
    /// This is the inverse when all bivector terms share a plane, which holds
    /// for the product of two single-phase vectors.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DivisionByZero`] if the norm is zero.
    pub fn inverse(&self) -> Result<Self> {
        let norm2 = self.norm2();
        if norm2.is_zero() {
            return Err(GaError::division_by_zero("inverse of zero biversor"));
        }
        Ok(self.scaled_reverse(&(S::one() / norm2)))
    }

    /// Grade-1 part of `self * v`.
    #[must_use]
    pub fn gp_vector(&self, v: &Vector<S>) -> Vector<S> {
        let mut result = BTreeMap::new();
        for term in self.to_terms() {
            for (id, value) in v.terms() {
                let product = term.value.clone() * value.clone();
                let (target, product) = if term.is_scalar() {
                    (id, product)
                } else if id == term.id1 {
                    // e_i e_j e_i = -e_j
                    (term.id2, -product)
                } else if id == term.id2 {
                    // e_i e_j e_j = e_i
                    (term.id1, product)
                } else {
                    continue;
                };
                let merged = match result.remove(&target) {
                    Some(old) => old + product,
                    None => product,
                };
                result.insert(target, self.normalizer.apply(merged));
            }
        }
        Vector::from_map(result, self.normalizer.clone())
    }

    /// Multivector in a space of dimension `vspace_dim`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DimensionMismatch`] if a term lies outside the
    /// space.
    pub fn to_multivector(&self, vspace_dim: u32) -> Result<Multivector<S>> {
        let max_id = self.max_id();
        if max_id > vspace_dim {
            return Err(GaError::dimension_mismatch(vspace_dim, max_id));
        }
        let mut mv = Multivector::new(vspace_dim).with_normalizer(self.normalizer.clone());
        for term in self.to_terms() {
            mv.add_term(term.blade_id(), term.value)?;
        }
        Ok(mv)
    }
}

impl<S: RealScalar> Biversor<S> {
    #[must_use]
    pub fn norm(&self) -> S {
        self.normalizer.apply(self.norm2().sqrt())
    }
}

/// Equality over non-zero terms; the normalizer is ignored.
impl<S: Scalar> PartialEq for Biversor<S> {
    fn eq(&self, other: &Self) -> bool {
        self.terms().eq(other.terms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::BigRational;
    use approx::assert_relative_eq;

    fn biversor(terms: &[(u32, u32, f64)]) -> Biversor<f64> {
        Biversor::from_terms(terms.iter().copied()).unwrap()
    }

    #[test]
    fn test_term_canonical_form() {
        let t = BiversorTerm::new(3, 3, 2.0).unwrap();
        assert_eq!((t.id1, t.id2), (1, 1));
        assert!(t.is_scalar());

        let t = BiversorTerm::new(4, 2, 2.0).unwrap();
        assert_eq!((t.id1, t.id2, t.value), (2, 4, -2.0));
        assert!(!t.is_phasor());

        let t = BiversorTerm::new(3, 4, 1.0).unwrap();
        assert!(t.is_phasor());
        assert_eq!(t.blade_id(), 0b1100);

        assert!(BiversorTerm::new(0, 1, 1.0).is_err());
    }

    #[test]
    fn test_swapped_lookup() {
        let bv = biversor(&[(1, 2, 3.0)]);
        assert_eq!(bv.term_value(1, 2), 3.0);
        assert_eq!(bv.term_value(2, 1), -3.0);
        assert_eq!(bv.term_value(1, 3), 0.0);
    }

    #[test]
    fn test_power_decomposition() {
        let bv = biversor(&[(1, 1, 10.0), (1, 2, 2.0), (3, 4, 3.0), (1, 3, 5.0)]);
        assert_eq!(bv.active_total(), 10.0);
        assert_eq!(bv.reactive_total(), 5.0);
        assert_eq!(bv.non_active_total(), 10.0);
        assert_eq!(bv.fundamental_reactive_total(), 2.0);
        assert_eq!(bv.harmonic_total(), 8.0);
        assert_eq!(bv.term_values_sum(), 20.0);

        assert_eq!(bv.active_part(), Biversor::scalar(10.0));
        assert_eq!(bv.reactive_part().active_count(), 2);
        assert_eq!(bv.harmonic_part().active_count(), 2);
        assert_eq!(bv.fundamental_reactive_part(), biversor(&[(1, 2, 2.0)]));
        assert_eq!(bv.non_active_part().active_count(), 3);
    }

    #[test]
    fn test_reverse_and_inverse() {
        let bv = biversor(&[(1, 1, 3.0), (1, 2, 4.0)]);
        assert_eq!(bv.reverse(), biversor(&[(1, 1, 3.0), (1, 2, -4.0)]));
        assert_eq!(bv.negative_reverse(), biversor(&[(1, 1, -3.0), (1, 2, 4.0)]));
        assert_eq!(bv.norm2(), 25.0);
        assert_relative_eq!(bv.norm(), 5.0);

        let inv = bv.inverse().unwrap();
        let product = bv
            .to_multivector(2)
            .unwrap()
            .gp(&inv.to_multivector(2).unwrap())
            .unwrap();
        assert_relative_eq!(product.scalar_part(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(product.term_value(0b11), 0.0, epsilon = 1e-12);

        assert!(Biversor::<f64>::new().inverse().is_err());
    }

    #[test]
    fn test_exact_inverse_rational() {
        let half = BigRational::new(1.into(), 2.into());
        let mut bv = Biversor::<BigRational>::new();
        bv.add_term(1, 1, half.clone())
            .unwrap()
            .add_term(2, 1, BigRational::from_i64(3))
            .unwrap();
        let product = bv
            .to_multivector(2)
            .unwrap()
            .gp(&bv.inverse().unwrap().to_multivector(2).unwrap())
            .unwrap();
        assert_eq!(product, Multivector::scalar(2, BigRational::from_i64(1)));
    }

    #[test]
    fn test_gp_vector_matches_engine() {
        let bv = biversor(&[(1, 1, 2.0), (1, 2, -1.5)]);
        let v = Vector::from_terms([(1, 1.0), (2, 4.0)]).unwrap();
        let fast = bv.gp_vector(&v).to_multivector(2).unwrap();
        let engine = bv
            .to_multivector(2)
            .unwrap()
            .gp(&v.to_multivector(2).unwrap())
            .unwrap();
        approx::assert_abs_diff_eq!(fast, engine, epsilon = 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = biversor(&[(1, 1, 1.0), (1, 2, 2.0)]);
        let b = biversor(&[(2, 1, 2.0)]);
        assert_eq!(a.add(&b), Biversor::scalar(1.0));
        assert_eq!(a.subtract(&b), biversor(&[(1, 1, 1.0), (1, 2, 4.0)]));
        assert_eq!(a.scale_by(&2.0).scalar_part(), 2.0);
        assert_eq!(a.negative().term_value(1, 2), -2.0);
        assert_eq!(a.max_id(), 2);
        assert!(a.to_multivector(1).is_err());
    }
}
