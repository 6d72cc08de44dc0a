//! Product operator façade.
//!
//! A [`BilinearProduct`] fixes a product kind, a vector space dimension and a
//! metric. [`BilinearProduct::apply`] validates both operands against the
//! declared dimension, then folds the basis blade product map over the full
//! cross product of their non-zero terms.

use tracing::{trace, warn};

use crate::config::AlgebraConfig;
use crate::error::{GaError, Result};
use crate::math::blade_map::{map_to_term, Metric, ProductKind};
use crate::math::frame;
use crate::multivector::Multivector;
use crate::scalar::Scalar;

/// One bilinear product bound to a space and metric.
#[derive(Debug, Clone, PartialEq)]
pub struct BilinearProduct<S> {
    kind: ProductKind,
    vspace_dim: u32,
    metric: Metric<S>,
}

impl<S: Scalar> BilinearProduct<S> {
    /// Product under the Euclidean metric.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidConfig`] if `vspace_dim` exceeds
    /// [`frame::MAX_VSPACE_DIM`].
    pub fn euclidean(kind: ProductKind, vspace_dim: u32) -> Result<Self> {
        Self::with_metric(kind, vspace_dim, Metric::Euclidean)
    }

    /// Product under an arbitrary orthogonal metric.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidConfig`] if the dimension is too large or the
    /// metric does not cover it.
    pub fn with_metric(kind: ProductKind, vspace_dim: u32, metric: Metric<S>) -> Result<Self> {
        if vspace_dim > frame::MAX_VSPACE_DIM {
            return Err(GaError::invalid_config(format!(
                "vector space dimension {vspace_dim} exceeds {}",
                frame::MAX_VSPACE_DIM
            )));
        }
        metric.validate(vspace_dim)?;
        Ok(Self {
            kind,
            vspace_dim,
            metric,
        })
    }

    /// Product described by a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidConfig`] if the configuration is invalid.
    pub fn from_config(kind: ProductKind, config: &AlgebraConfig) -> Result<Self> {
        config.validate()?;
        Self::with_metric(kind, config.vspace_dim, config.metric())
    }

    #[must_use]
    pub const fn kind(&self) -> ProductKind {
        self.kind
    }

    #[must_use]
    pub const fn vspace_dim(&self) -> u32 {
        self.vspace_dim
    }

    #[must_use]
    pub const fn metric(&self) -> &Metric<S> {
        &self.metric
    }

    /// Map a pair of basis blades to its target term.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] when either blade lies outside the
    /// product's space.
    pub fn map_to_term(&self, id1: u64, id2: u64) -> Result<Option<(u64, S)>> {
        for id in [id1, id2] {
            if !frame::fits_in(id, self.vspace_dim) {
                return Err(GaError::malformed(format!(
                    "blade {id:#b} does not fit in dimension {}",
                    self.vspace_dim
                )));
            }
        }
        map_to_term(self.kind, &self.metric, id1, id2)
    }

    fn check_dim(&self, mv: &Multivector<S>) -> Result<()> {
        if mv.vspace_dim() == self.vspace_dim {
            return Ok(());
        }
        warn!(
            product = self.kind.name(),
            expected = self.vspace_dim,
            actual = mv.vspace_dim(),
            "operand dimension mismatch"
        );
        Err(GaError::dimension_mismatch(self.vspace_dim, mv.vspace_dim()))
    }

    /// Apply the product to two multivectors.
    ///
    /// The result carries the normalizer of `mv1`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DimensionMismatch`] if either operand is declared in
    /// a different space.
    pub fn apply(&self, mv1: &Multivector<S>, mv2: &Multivector<S>) -> Result<Multivector<S>> {
        self.check_dim(mv1)?;
        self.check_dim(mv2)?;

        let normalizer = mv1.normalizer();
        let mut result = mv1.empty_like();
        for (id1, value1) in mv1.terms() {
            for (id2, value2) in mv2.terms() {
                let Some((target, coefficient)) = map_to_term(self.kind, &self.metric, id1, id2)?
                else {
                    continue;
                };
                let value = normalizer.apply(coefficient * value1.clone() * value2.clone());
                if !value.is_zero() {
                    result.merge_term(target, value);
                }
            }
        }

        trace!(
            product = self.kind.name(),
            lhs_terms = mv1.active_count(),
            rhs_terms = mv2.active_count(),
            result_terms = result.active_count(),
            "applied product"
        );
        Ok(result)
    }

    /// Squared norm `<M Reverse(M)>_0` under this product's metric.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DimensionMismatch`] if `mv` is declared in another
    /// space.
    pub fn norm2(&self, mv: &Multivector<S>) -> Result<S> {
        let scalar = Self::with_metric(ProductKind::Scalar, self.vspace_dim, self.metric.clone())?;
        Ok(scalar.apply(mv, &mv.reverse())?.scalar_part())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::Normalizer;
    use approx::assert_abs_diff_eq;

    fn vector(dim: u32, coefficients: &[f64]) -> Multivector<f64> {
        Multivector::from_terms(
            dim,
            coefficients
                .iter()
                .enumerate()
                .map(|(i, &v)| (frame::basis_vector_id(i as u32 + 1), v)),
        )
        .unwrap()
    }

    #[test]
    fn test_outer_e1_e2() {
        let e1 = vector(3, &[1.0]);
        let e2 = vector(3, &[0.0, 1.0]);
        let op = BilinearProduct::euclidean(ProductKind::Outer, 3).unwrap();
        let result = op.apply(&e1, &e2).unwrap();
        assert_eq!(result.to_terms().len(), 1);
        assert_eq!(result.term_value(3), 1.0);
        assert!(op.apply(&e1, &e1).unwrap().is_zero());
    }

    #[test]
    fn test_gp_antisymmetric() {
        let (a, b) = (2.5, -1.5);
        let v1 = vector(2, &[a]);
        let v2 = vector(2, &[0.0, b]);
        let gp = BilinearProduct::euclidean(ProductKind::Geometric, 2).unwrap();
        let v12 = gp.apply(&v1, &v2).unwrap();
        let v21 = gp.apply(&v2, &v1).unwrap();
        assert_eq!(v12.active_count(), 1);
        assert_eq!(v12.term_value(0b11), a * b);
        assert_eq!(v12, v21.negative());
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vector(2, &[1.0]);
        let b = vector(3, &[1.0]);
        let gp = BilinearProduct::euclidean(ProductKind::Geometric, 3).unwrap();
        assert_eq!(
            gp.apply(&a, &b),
            Err(GaError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert!(BilinearProduct::<f64>::euclidean(ProductKind::Outer, 64).is_err());
    }

    #[test]
    fn test_vector_gp_splits_into_dot_and_wedge() {
        let a = vector(3, &[1.0, 2.0, 3.0]);
        let b = vector(3, &[-1.0, 0.5, 2.0]);
        let gp = BilinearProduct::euclidean(ProductKind::Geometric, 3).unwrap();
        let op = BilinearProduct::euclidean(ProductKind::Outer, 3).unwrap();
        let lcp = BilinearProduct::euclidean(ProductKind::LeftContraction, 3).unwrap();
        let sum = lcp.apply(&a, &b).unwrap().add(&op.apply(&a, &b).unwrap());
        assert_abs_diff_eq!(gp.apply(&a, &b).unwrap(), sum, epsilon = 1e-12);
    }

    #[test]
    fn test_commutator_products() {
        let a = vector(3, &[1.0, 2.0, 0.0]);
        let b = vector(3, &[0.0, 1.0, 3.0]);
        let gp = BilinearProduct::euclidean(ProductKind::Geometric, 3).unwrap();
        let ab = gp.apply(&a, &b).unwrap();
        let ba = gp.apply(&b, &a).unwrap();
        let cp = a.cp(&b).unwrap();
        let acp = a.acp(&b).unwrap();
        assert_abs_diff_eq!(cp, ab.subtract(&ba).scale_by(&0.5), epsilon = 1e-12);
        assert_abs_diff_eq!(acp, ab.add(&ba).scale_by(&0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_signature_metric_norm() {
        // Minkowski plane: e1^2 = 1, e2^2 = -1
        let metric = Metric::signature(1, 1);
        let gp = BilinearProduct::with_metric(ProductKind::Geometric, 2, metric).unwrap();
        let v = vector(2, &[2.0, 1.0]);
        let square = gp.apply(&v, &v).unwrap();
        assert_eq!(square.scalar_part(), 3.0);
        assert_eq!(square.active_count(), 1);
        assert_eq!(gp.norm2(&v).unwrap(), 3.0);
    }

    #[test]
    fn test_from_config() {
        let config = AlgebraConfig::signature(2, 1);
        let gp = BilinearProduct::<f64>::from_config(ProductKind::Geometric, &config).unwrap();
        assert_eq!(gp.vspace_dim(), 3);
        assert_eq!(gp.metric(), &Metric::Signature { negative_mask: 0b100 });
        assert!(BilinearProduct::<f64>::from_config(
            ProductKind::Geometric,
            &AlgebraConfig::default().with_vspace_dim(0)
        )
        .is_err());
    }

    #[test]
    fn test_result_inherits_normalizer() {
        let a = vector(2, &[0.1, 0.2]).with_normalizer(Normalizer::snap_to_zero(1e-9));
        let b = vector(2, &[1.0, 1.0]);
        let gp = BilinearProduct::euclidean(ProductKind::Geometric, 2).unwrap();
        let result = gp.apply(&a, &b).unwrap();
        assert!(!result.normalizer().is_identity());
    }

    #[test]
    fn test_scalar_operand_hestenes_inner_vanishes() {
        let s = Multivector::scalar(2, 2.0);
        let v = vector(2, &[1.0, 1.0]);
        assert!(s.hip(&v).unwrap().is_zero());
        assert_eq!(s.lcp(&v).unwrap(), v.scale_by(&2.0));
    }

    #[test]
    fn test_map_to_term_rejects_foreign_blades() {
        let gp = BilinearProduct::<f64>::euclidean(ProductKind::Geometric, 2).unwrap();
        assert_eq!(gp.map_to_term(0b01, 0b11).unwrap(), Some((0b10, 1.0)));
        assert!(matches!(
            gp.map_to_term(0b100, 0b01),
            Err(GaError::MalformedInput(_))
        ));
    }
}
