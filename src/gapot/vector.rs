//! GAPoT vectors.
//!
//! A [`Vector`] is a grade-1 sparse multivector keyed by 1-based basis
//! vector index. Index `k` corresponds to multivector blade `1 << (k - 1)`.
//! Consecutive index pairs `(2k - 1, 2k)` hold phasors, so a vector
//! describes a multi-phase, multi-harmonic voltage or current signal.

use std::collections::BTreeMap;

use crate::error::{GaError, Result};
use crate::gapot::biversor::{Biversor, BiversorTerm};
use crate::gapot::phasor::{validate_phasor_id, PolarPhasor, RectPhasor};
use crate::gapot::rotor;
use crate::math::frame;
use crate::multivector::Multivector;
use crate::scalar::{Normalizer, RealScalar, Scalar};

/// Check that `id` names a basis vector.
///
/// # Errors
///
/// Returns [`GaError::MalformedInput`] for `0` or indices beyond the largest
/// supported space.
pub fn validate_vector_id(id: u32) -> Result<()> {
    if id == 0 || id > frame::MAX_VSPACE_DIM {
        return Err(GaError::malformed(format!(
            "vector term identifier must be in 1..={}, got {id}",
            frame::MAX_VSPACE_DIM
        )));
    }
    Ok(())
}

/// Sparse grade-1 multivector with 1-based term identifiers.
#[derive(Debug, Clone)]
pub struct Vector<S> {
    terms: BTreeMap<u32, S>,
    normalizer: Normalizer<S>,
}

impl<S: Scalar> Default for Vector<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar> Vector<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
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

    /// Build from `(id, value)` pairs, summing repeated identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] for an invalid identifier.
    pub fn from_terms(terms: impl IntoIterator<Item = (u32, S)>) -> Result<Self> {
        let mut v = Self::new();
        for (id, value) in terms {
            v.add_term(id, value)?;
        }
        Ok(v)
    }

    /// Build from rectangular phasors.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] for an invalid phasor identifier.
    pub fn from_rect_phasors<'a>(phasors: impl IntoIterator<Item = &'a RectPhasor<S>>) -> Result<Self>
    where
        S: 'a,
    {
        let mut v = Self::new();
        for phasor in phasors {
            v.add_rect_phasor(phasor)?;
        }
        Ok(v)
    }

    /// Identifiers must already be valid.
    pub(crate) fn from_map(terms: BTreeMap<u32, S>, normalizer: Normalizer<S>) -> Self {
        Self { terms, normalizer }
    }

    fn empty_like(&self) -> Self {
        Self::from_map(BTreeMap::new(), self.normalizer.clone())
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

    /// Largest identifier with a non-zero coefficient, `0` for the zero vector.
    ///
    /// This is the smallest vector space dimension holding the vector.
    #[must_use]
    pub fn max_id(&self) -> u32 {
        self.terms().next_back().map_or(0, |(id, _)| id)
    }

    /// Coefficient at `id`, zero when absent.
    #[must_use]
    pub fn term_value(&self, id: u32) -> S {
        self.terms.get(&id).cloned().unwrap_or_else(S::zero)
    }

    /// Non-zero terms in ascending identifier order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (u32, &S)> + '_ {
        self.terms
            .iter()
            .filter(|(_, v)| !v.is_zero())
            .map(|(&id, v)| (id, v))
    }

    pub fn set_to_zero(&mut self) -> &mut Self {
        self.terms.clear();
        self
    }

    /// Store `value` at `id`, replacing any previous coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] for an invalid identifier.
    pub fn set_term(&mut self, id: u32, value: S) -> Result<&mut Self> {
        validate_vector_id(id)?;
        let value = self.normalizer.apply(value);
        self.terms.insert(id, value);
        Ok(self)
    }

    /// Add `value` to the coefficient at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] for an invalid identifier.
    pub fn add_term(&mut self, id: u32, value: S) -> Result<&mut Self> {
        validate_vector_id(id)?;
        self.merge(id, value);
        Ok(self)
    }

    fn merge(&mut self, id: u32, value: S) {
        let merged = match self.terms.remove(&id) {
            Some(old) => old + value,
            None => value,
        };
        let merged = self.normalizer.apply(merged);
        self.terms.insert(id, merged);
    }

    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] for an invalid phasor identifier.
    pub fn set_rect_phasor(&mut self, phasor: &RectPhasor<S>) -> Result<&mut Self> {
        validate_phasor_id(phasor.id)?;
        for (id, value) in phasor.to_terms() {
            self.set_term(id, value)?;
        }
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] for an invalid phasor identifier.
    pub fn add_rect_phasor(&mut self, phasor: &RectPhasor<S>) -> Result<&mut Self> {
        validate_phasor_id(phasor.id)?;
        for (id, value) in phasor.to_terms() {
            self.add_term(id, value)?;
        }
        Ok(self)
    }

    /// Rectangular phasor at the pair `(id, id + 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] if `id` is even.
    pub fn rect_phasor(&self, id: u32) -> Result<RectPhasor<S>> {
        validate_phasor_id(id)?;
        Ok(RectPhasor {
            id,
            x: self.term_value(id),
            y: self.normalizer.apply(-self.term_value(id + 1)),
        })
    }

    /// All phasors with at least one non-zero component, by ascending pair.
    #[must_use]
    pub fn rect_phasors(&self) -> Vec<RectPhasor<S>> {
        let mut pairs: Vec<u32> = self.terms().map(|(id, _)| id - (1 - id % 2)).collect();
        pairs.dedup();
        pairs
            .into_iter()
            .map(|id| RectPhasor {
                id,
                x: self.term_value(id),
                y: self.normalizer.apply(-self.term_value(id + 1)),
            })
            .collect()
    }

    #[must_use]
    pub fn negative(&self) -> Self {
        self.map_values(|v| -v.clone())
    }

    fn map_values(&self, func: impl Fn(&S) -> S) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(&id, v)| (id, self.normalizer.apply(func(v))))
            .collect();
        Self::from_map(terms, self.normalizer.clone())
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, rhs: &Self) -> Self {
        let mut result = self.clone();
        for (&id, value) in &rhs.terms {
            result.merge(id, value.clone());
        }
        result
    }

    #[must_use]
    pub fn subtract(&self, rhs: &Self) -> Self {
        let mut result = self.clone();
        for (&id, value) in &rhs.terms {
            result.merge(id, -value.clone());
        }
        result
    }

    #[must_use]
    pub fn scale_by(&self, factor: &S) -> Self {
        self.map_values(|v| v.clone() * factor.clone())
    }

    /// # Errors
    ///
    /// Returns [`GaError::DivisionByZero`] when `divisor` is zero.
    pub fn divide_by(&self, divisor: &S) -> Result<Self> {
        if divisor.is_zero() {
            return Err(GaError::division_by_zero("vector divided by zero scalar"));
        }
        Ok(self.map_values(|v| v.clone() / divisor.clone()))
    }

    /// Reversion leaves vectors unchanged.
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.clone()
    }

    /// Euclidean inner product.
    #[must_use]
    pub fn dot(&self, rhs: &Self) -> S {
        let sum = self.terms().fold(S::zero(), |acc, (id, value)| {
            acc + value.clone() * rhs.term_value(id)
        });
        self.normalizer.apply(sum)
    }

    #[must_use]
    pub fn norm2(&self) -> S {
        self.dot(self)
    }

    /// `v / norm2(v)`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DivisionByZero`] for the zero vector.
    pub fn inverse(&self) -> Result<Self> {
        let norm2 = self.norm2();
        if norm2.is_zero() {
            return Err(GaError::division_by_zero("inverse of zero vector"));
        }
        self.divide_by(&norm2)
    }

    /// Shift every identifier by `delta`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] if a shifted identifier leaves
    /// `1..=63`.
    pub fn offset_ids(&self, delta: i32) -> Result<Self> {
        let mut result = self.empty_like();
        for (&id, value) in &self.terms {
            let shifted = i64::from(id) + i64::from(delta);
            let shifted = u32::try_from(shifted).map_err(|_| {
                GaError::malformed(format!("identifier {id} offset by {delta} is negative"))
            })?;
            result.set_term(shifted, value.clone())?;
        }
        Ok(result)
    }

    /// Terms whose identifier appears in `ids`.
    #[must_use]
    pub fn parts_by_ids(&self, ids: &[u32]) -> Self {
        self.filtered(|id| ids.contains(&id))
    }

    /// Terms with identifier in `min_id..=max_id`.
    #[must_use]
    pub fn part_by_range(&self, min_id: u32, max_id: u32) -> Self {
        self.filtered(|id| (min_id..=max_id).contains(&id))
    }

    /// Terms in `min_id..=max_id`, renumbered so `min_id` becomes `1`.
    #[must_use]
    pub fn offset_part_by_range(&self, min_id: u32, max_id: u32) -> Self {
        let terms = self
            .terms()
            .filter(|(id, _)| (min_id..=max_id).contains(id))
            .map(|(id, v)| (id - min_id + 1, v.clone()))
            .collect();
        Self::from_map(terms, self.normalizer.clone())
    }

    fn filtered(&self, keep: impl Fn(u32) -> bool) -> Self {
        let terms = self
            .terms()
            .filter(|(id, _)| keep(*id))
            .map(|(id, v)| (id, v.clone()))
            .collect();
        Self::from_map(terms, self.normalizer.clone())
    }

    /// Split into consecutive identifier segments of the given lengths,
    /// starting at identifier 1.
    #[must_use]
    pub fn parts(&self, lengths: &[u32]) -> Vec<Self> {
        segment_ranges(lengths)
            .map(|(first, last)| self.part_by_range(first, last))
            .collect()
    }

    /// Like [`Vector::parts`], with every segment renumbered to start at 1.
    #[must_use]
    pub fn offset_parts(&self, lengths: &[u32]) -> Vec<Self> {
        segment_ranges(lengths)
            .map(|(first, last)| self.offset_part_by_range(first, last))
            .collect()
    }

    /// Per-segment impedance `U_k * inverse(I_k)` with `self` as voltage.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DivisionByZero`] if a current segment is zero.
    pub fn parts_impedance(&self, current: &Self, lengths: &[u32]) -> Result<Vec<Biversor<S>>> {
        self.parts(lengths)
            .iter()
            .zip(current.parts(lengths))
            .map(|(voltage, current)| Ok(voltage.gp(&current.inverse()?)))
            .collect()
    }

    /// Geometric product of two vectors: scalar plus bivector.
    #[must_use]
    pub fn gp(&self, rhs: &Self) -> Biversor<S> {
        let mut result = Biversor::new().with_normalizer(self.normalizer.clone());
        for (id1, value1) in self.terms() {
            for (id2, value2) in rhs.terms() {
                let value = self.normalizer.apply(value1.clone() * value2.clone());
                result.add_canonical(BiversorTerm::canonical(id1, id2, value));
            }
        }
        result
    }

    /// Grade-1 part of `self * bv`.
    #[must_use]
    pub fn gp_biversor(&self, bv: &Biversor<S>) -> Self {
        let mut result = self.empty_like();
        for (id, value) in self.terms() {
            for term in bv.to_terms() {
                let product = value.clone() * term.value.clone();
                if term.is_scalar() {
                    result.merge(id, product);
                } else if id == term.id1 {
                    // e_i e_i e_j = e_j
                    result.merge(term.id2, product);
                } else if id == term.id2 {
                    // e_j e_i e_j = -e_i
                    result.merge(term.id1, -product);
                }
            }
        }
        result
    }

    /// Outer product as a general multivector.
    ///
    /// # Errors
    ///
    /// Propagates product errors; none occur for valid vectors.
    pub fn op(&self, rhs: &Self) -> Result<Multivector<S>> {
        let dim = self.max_id().max(rhs.max_id());
        self.to_multivector(dim)?.op(&rhs.to_multivector(dim)?)
    }

    /// Geometric product with a general multivector, in the larger space.
    ///
    /// # Errors
    ///
    /// Propagates product errors; none occur for valid operands.
    pub fn gp_multivector(&self, mv: &Multivector<S>) -> Result<Multivector<S>> {
        let dim = self.max_id().max(mv.vspace_dim());
        self.to_multivector(dim)?.gp(&mv.embed(dim)?)
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
        for (id, value) in self.terms() {
            mv.set_term(frame::basis_vector_id(id), value.clone())?;
        }
        Ok(mv)
    }
}

impl<S: RealScalar> Vector<S> {
    #[must_use]
    pub fn norm(&self) -> S {
        self.normalizer.apply(self.norm2().sqrt())
    }

    /// Angle between two vectors, in radians.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DivisionByZero`] if either vector is zero.
    pub fn angle(&self, rhs: &Self) -> Result<S> {
        let denominator = (self.norm2() * rhs.norm2()).sqrt();
        if denominator.is_zero() {
            return Err(GaError::division_by_zero("angle with zero vector"));
        }
        Ok((self.dot(rhs) / denominator).acos())
    }

    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] for an invalid phasor identifier.
    pub fn set_polar_phasor(&mut self, phasor: &PolarPhasor<S>) -> Result<&mut Self> {
        self.set_rect_phasor(&phasor.to_rect())
    }

    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] for an invalid phasor identifier.
    pub fn add_polar_phasor(&mut self, phasor: &PolarPhasor<S>) -> Result<&mut Self> {
        self.add_rect_phasor(&phasor.to_rect())
    }

    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] if `id` is even.
    pub fn polar_phasor(&self, id: u32) -> Result<PolarPhasor<S>> {
        Ok(self.rect_phasor(id)?.to_polar())
    }

    #[must_use]
    pub fn polar_phasors(&self) -> Vec<PolarPhasor<S>> {
        self.rect_phasors().iter().map(RectPhasor::to_polar).collect()
    }

    /// Rotor taking the direction of `self` to the direction of `target`.
    ///
    /// # Errors
    ///
    /// See [`rotor::rotor_between`].
    pub fn rotor_to(&self, target: &Self) -> Result<Multivector<S>> {
        rotor::rotor_between(self, target)
    }

    /// Rotate by the sandwich product with `rotor`.
    ///
    /// # Errors
    ///
    /// See [`rotor::apply_rotor`].
    pub fn apply_rotor(&self, rotor: &Multivector<S>) -> Result<Self> {
        rotor::apply_rotor(rotor, self)
    }
}

/// Inclusive `(first, last)` identifier ranges of consecutive segments
/// starting at 1. Ranges past `u32::MAX` saturate, which leaves them empty
/// of valid ids.
fn segment_ranges(lengths: &[u32]) -> impl Iterator<Item = (u32, u32)> + '_ {
    lengths.iter().scan(1u32, |first, &length| {
        let range = (*first, first.saturating_add(length).saturating_sub(1));
        *first = first.saturating_add(length);
        Some(range)
    })
}

/// Equality over non-zero terms; the normalizer is ignored.
impl<S: Scalar> PartialEq for Vector<S> {
    fn eq(&self, other: &Self) -> bool {
        self.terms().eq(other.terms())
    }
}

impl approx::AbsDiffEq for Vector<f64> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

    fn vector(terms: &[(u32, f64)]) -> Vector<f64> {
        Vector::from_terms(terms.iter().copied()).unwrap()
    }

    #[test]
    fn test_id_validation() {
        let mut v = Vector::<f64>::new();
        assert!(v.set_term(0, 1.0).is_err());
        assert!(v.add_term(64, 1.0).is_err());
        assert!(v.set_term(63, 1.0).is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let mut v = Vector::<f64>::new();
        v.set_term(1, 1.0).unwrap().add_term(1, 2.0).unwrap();
        assert_eq!(v.term_value(1), 3.0);
        assert_eq!(v.term_value(2), 0.0);
    }

    #[test]
    fn test_norm_dot_angle() {
        let u = vector(&[(1, 1.0), (2, 1.0), (3, 1.0)]);
        assert_eq!(u.norm2(), 3.0);
        assert_relative_eq!(u.norm(), 3.0_f64.sqrt());

        let a = vector(&[(1, 1.0)]);
        let b = vector(&[(2, 2.0)]);
        assert_eq!(a.dot(&b), 0.0);
        assert_relative_eq!(a.angle(&b).unwrap(), FRAC_PI_2);
        assert!(a.angle(&Vector::new()).is_err());
    }

    #[test]
    fn test_inverse() {
        let u = vector(&[(1, 1.0), (2, 1.0), (3, 1.0)]);
        let inv = u.inverse().unwrap();
        assert_relative_eq!(inv.term_value(2), 1.0 / 3.0);
        let product = u.gp(&inv);
        assert_relative_eq!(product.term_value(1, 1), 1.0, epsilon = 1e-12);
        assert!(product.non_active_part().is_zero());
        assert!(matches!(
            Vector::<f64>::new().inverse(),
            Err(GaError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_phasor_storage() {
        let mut v = Vector::<f64>::new();
        v.set_rect_phasor(&RectPhasor::new(1, 3.0, 4.0).unwrap()).unwrap();
        assert_eq!(v.term_value(1), 3.0);
        assert_eq!(v.term_value(2), -4.0);
        assert_eq!(v.rect_phasor(1).unwrap(), RectPhasor::new(1, 3.0, 4.0).unwrap());
        assert!(v.rect_phasor(2).is_err());
    }

    #[test]
    fn test_polar_phasor_round_trip() {
        let mut v = Vector::<f64>::new();
        v.set_polar_phasor(&PolarPhasor::new(1, 2.0, FRAC_PI_3).unwrap())
            .unwrap();
        let polar = v.polar_phasor(1).unwrap();
        assert_relative_eq!(polar.magnitude, 2.0, epsilon = 1e-12);
        assert_relative_eq!(polar.phase, FRAC_PI_3, epsilon = 1e-12);

        let mut w = Vector::<f64>::new();
        w.set_polar_phasor(&polar).unwrap();
        assert_abs_diff_eq!(v, w, epsilon = 1e-12);
    }

    #[test]
    fn test_rect_phasors_group_pairs() {
        let v = vector(&[(1, 1.0), (2, -2.0), (4, 5.0), (5, 7.0)]);
        let phasors = v.rect_phasors();
        assert_eq!(phasors.len(), 3);
        assert_eq!(phasors[0], RectPhasor::new(1, 1.0, 2.0).unwrap());
        assert_eq!(phasors[1], RectPhasor::new(3, 0.0, -5.0).unwrap());
        assert_eq!(phasors[2], RectPhasor::new(5, 7.0, 0.0).unwrap());
        assert_eq!(v.polar_phasors().len(), 3);
    }

    #[test]
    fn test_gp_matches_engine() {
        let a = vector(&[(1, 2.0), (2, -1.0), (3, 0.5)]);
        let b = vector(&[(1, 1.0), (3, 4.0)]);
        let fast = a.gp(&b).to_multivector(3).unwrap();
        let engine = a
            .to_multivector(3)
            .unwrap()
            .gp(&b.to_multivector(3).unwrap())
            .unwrap();
        assert_abs_diff_eq!(fast, engine, epsilon = 1e-12);
    }

    #[test]
    fn test_gp_single_phase_antisymmetric() {
        let v1 = vector(&[(1, 3.0)]);
        let v2 = vector(&[(2, -2.0)]);
        let v12 = v1.gp(&v2);
        assert_eq!(v12.term_value(1, 2), -6.0);
        assert_eq!(v12, v2.gp(&v1).negative());
    }

    #[test]
    fn test_gp_biversor_matches_engine() {
        let v = vector(&[(1, 2.0), (2, -1.0)]);
        let w = vector(&[(1, 1.0), (2, 3.0)]);
        let bv = v.gp(&w);
        let left = w.gp_biversor(&bv).to_multivector(2).unwrap();
        let right = bv.gp_vector(&w).to_multivector(2).unwrap();
        let bv_mv = bv.to_multivector(2).unwrap();
        let w_mv = w.to_multivector(2).unwrap();
        assert_abs_diff_eq!(left, w_mv.gp(&bv_mv).unwrap(), epsilon = 1e-12);
        assert_abs_diff_eq!(right, bv_mv.gp(&w_mv).unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_op() {
        let e1 = vector(&[(1, 1.0)]);
        let e2 = vector(&[(2, 1.0)]);
        let e12 = e1.op(&e2).unwrap();
        assert_eq!(e12.term_value(0b11), 1.0);
        assert!(e1.op(&e1).unwrap().is_zero());
    }

    #[test]
    fn test_offset_ids() {
        let v = vector(&[(1, 1.0), (3, 2.0)]);
        let shifted = v.offset_ids(2).unwrap();
        assert_eq!(shifted, vector(&[(3, 1.0), (5, 2.0)]));
        assert!(v.offset_ids(-1).is_err());
    }

    #[test]
    fn test_parts() {
        let v = vector(&[(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0), (5, 5.0), (6, 6.0)]);
        let parts = v.parts(&[2, 4]);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], vector(&[(1, 1.0), (2, 2.0)]));
        assert_eq!(parts[1], vector(&[(3, 3.0), (4, 4.0), (5, 5.0), (6, 6.0)]));

        let offset = v.offset_parts(&[2, 4]);
        assert_eq!(offset[1], vector(&[(1, 3.0), (2, 4.0), (3, 5.0), (4, 6.0)]));

        assert_eq!(v.parts_by_ids(&[2, 5]), vector(&[(2, 2.0), (5, 5.0)]));
        assert_eq!(v.offset_part_by_range(5, 6), vector(&[(1, 5.0), (2, 6.0)]));
    }

    #[test]
    fn test_parts_with_extreme_lengths() {
        let v = vector(&[(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0)]);

        let parts = v.parts(&[2, u32::MAX, 3]);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], vector(&[(1, 1.0), (2, 2.0)]));
        assert_eq!(parts[1], vector(&[(3, 3.0), (4, 4.0)]));
        assert!(parts[2].is_zero());

        let offset = v.offset_parts(&[u32::MAX, u32::MAX]);
        assert_eq!(offset[0], v);
        assert!(offset[1].is_zero());

        let empty_first = v.parts(&[0, 2]);
        assert!(empty_first[0].is_zero());
        assert_eq!(empty_first[1], vector(&[(1, 1.0), (2, 2.0)]));
    }

    #[test]
    fn test_parts_impedance() {
        // Same voltage and current per segment gives unit impedance
        let u = vector(&[(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0)]);
        let z = u.parts_impedance(&u, &[2, 2]).unwrap();
        assert_eq!(z.len(), 2);
        for segment in &z {
            assert_relative_eq!(segment.active_total(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(segment.non_active_total(), 0.0, epsilon = 1e-12);
        }

        let zero_current = vector(&[(1, 1.0)]);
        assert!(u.parts_impedance(&zero_current, &[2, 2]).is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = vector(&[(1, 1.0), (2, 2.0)]);
        let b = vector(&[(2, -2.0), (3, 1.0)]);
        let sum = a.add(&b);
        assert_eq!(sum, vector(&[(1, 1.0), (3, 1.0)]));
        assert_eq!(sum.subtract(&b), a);
        assert_eq!(a.negative().term_value(2), -2.0);
        assert_eq!(a.scale_by(&2.0).term_value(1), 2.0);
        assert!(a.divide_by(&0.0).is_err());
        assert_eq!(a.reverse(), a);
        assert_eq!(sum.max_id(), 3);
    }

    #[test]
    fn test_to_multivector() {
        let v = vector(&[(1, 1.0), (3, 2.0)]);
        let mv = v.to_multivector(3).unwrap();
        assert_eq!(mv.term_value(0b100), 2.0);
        assert!(v.to_multivector(2).is_err());
        assert_eq!(mv.vector_part(), v);
    }
}
