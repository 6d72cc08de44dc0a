//! Basis blade product map.
//!
//! For a product kind and a metric, [`map_to_term`] sends a pair of blade
//! identifiers to the target identifier and its coefficient. This is the only
//! place where product-specific combinatorics live; sparse multivector
//! arithmetic folds this map over term pairs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GaError, Result};
use crate::math::frame;
use crate::scalar::Scalar;

/// Bilinear product kinds supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProductKind {
    /// Outer (wedge) product.
    Outer,
    /// Geometric product.
    Geometric,
    /// Scalar product (grade-0 part of the geometric product).
    Scalar,
    /// Left contraction.
    LeftContraction,
    /// Right contraction.
    RightContraction,
    /// Hestenes inner product.
    HestenesInner,
    /// Commutator product `(ab - ba)/2`.
    Commutator,
    /// Anti-commutator product `(ab + ba)/2`.
    AntiCommutator,
}

impl ProductKind {
    /// All product kinds.
    pub const ALL: [Self; 8] = [
        Self::Outer,
        Self::Geometric,
        Self::Scalar,
        Self::LeftContraction,
        Self::RightContraction,
        Self::HestenesInner,
        Self::Commutator,
        Self::AntiCommutator,
    ];

    /// Whether the product of the two basis blades can be non-zero.
    #[must_use]
    pub const fn is_non_zero(self, id1: u64, id2: u64) -> bool {
        match self {
            Self::Outer => frame::is_non_zero_outer(id1, id2),
            Self::Geometric => true,
            Self::Scalar => frame::is_non_zero_scalar_product(id1, id2),
            Self::LeftContraction => frame::is_non_zero_left_contraction(id1, id2),
            Self::RightContraction => frame::is_non_zero_right_contraction(id1, id2),
            Self::HestenesInner => frame::is_non_zero_hestenes_inner(id1, id2),
            Self::Commutator => frame::is_non_zero_commutator(id1, id2),
            Self::AntiCommutator => frame::is_non_zero_anti_commutator(id1, id2),
        }
    }

    /// Short conventional name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Outer => "op",
            Self::Geometric => "gp",
            Self::Scalar => "sp",
            Self::LeftContraction => "lcp",
            Self::RightContraction => "rcp",
            Self::HestenesInner => "hip",
            Self::Commutator => "cp",
            Self::AntiCommutator => "acp",
        }
    }
}

/// Metric of an orthogonal frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric<S> {
    /// Every basis vector squares to `+1`.
    Euclidean,
    /// Basis vectors flagged in `negative_mask` square to `-1`, the rest to `+1`.
    Signature { negative_mask: u64 },
    /// Basis vector `e(i+1)` squares to `weights[i]`.
    Orthogonal(Vec<S>),
}

impl<S> Default for Metric<S> {
    fn default() -> Self {
        Self::Euclidean
    }
}

impl<S: Scalar> Metric<S> {
    /// Diagonal signature with `p` positive then `q` negative basis vectors.
    #[must_use]
    pub const fn signature(p: u32, q: u32) -> Self {
        Self::Signature {
            negative_mask: frame::pseudoscalar_id(p + q) & !frame::pseudoscalar_id(p),
        }
    }

    /// Check that the metric covers every basis vector of the space.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidConfig`] when an orthogonal weight table is
    /// shorter than `vspace_dim` or a signature flags vectors outside it.
    pub fn validate(&self, vspace_dim: u32) -> Result<()> {
        match self {
            Self::Euclidean => Ok(()),
            Self::Signature { negative_mask } => {
                if frame::fits_in(*negative_mask, vspace_dim) {
                    Ok(())
                } else {
                    Err(GaError::invalid_config(format!(
                        "signature mask {negative_mask:#b} exceeds dimension {vspace_dim}"
                    )))
                }
            }
            Self::Orthogonal(weights) => {
                if weights.len() >= vspace_dim as usize {
                    Ok(())
                } else {
                    Err(GaError::invalid_config(format!(
                        "orthogonal metric has {} weights for dimension {vspace_dim}",
                        weights.len()
                    )))
                }
            }
        }
    }

    /// Signed factor contributed by the basis vectors shared by both blades,
    /// combined with the reordering sign.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidConfig`] when an orthogonal weight table has
    /// no entry for one of the shared basis vectors.
    pub fn gp_coefficient(&self, id1: u64, id2: u64) -> Result<S> {
        match self {
            Self::Euclidean => Ok(S::sign(frame::is_negative_gp(id1, id2))),
            Self::Signature { negative_mask } => Ok(S::sign(frame::is_negative_gp_signature(
                id1,
                id2,
                *negative_mask,
            ))),
            Self::Orthogonal(weights) => {
                let sign = S::sign(frame::is_negative_gp(id1, id2));
                frame::basis_vector_indices(id1 & id2).try_fold(sign, |acc, index| {
                    let weight = weights.get(index as usize - 1).ok_or_else(|| {
                        GaError::invalid_config(format!(
                            "orthogonal metric has no weight for basis vector {index}"
                        ))
                    })?;
                    Ok(acc * weight.clone())
                })
            }
        }
    }
}

/// Map a pair of basis blades through a product kind.
///
/// Returns `None` when the product of the two blades is zero. The target
/// identifier is `id1 ^ id2` for every kind except the scalar product, whose
/// target is always the scalar blade.
///
/// # Errors
///
/// Returns [`GaError::InvalidConfig`] when `metric` does not cover a basis
/// vector shared by the two blades.
pub fn map_to_term<S: Scalar>(
    kind: ProductKind,
    metric: &Metric<S>,
    id1: u64,
    id2: u64,
) -> Result<Option<(u64, S)>> {
    if !kind.is_non_zero(id1, id2) {
        return Ok(None);
    }

    let coefficient = metric.gp_coefficient(id1, id2)?;
    if coefficient.is_zero() {
        return Ok(None);
    }

    let target = match kind {
        ProductKind::Scalar => 0,
        _ => id1 ^ id2,
    };

    Ok(Some((target, coefficient)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const E1: u64 = 0b001;
    const E2: u64 = 0b010;
    const E3: u64 = 0b100;

    fn euclid(kind: ProductKind, id1: u64, id2: u64) -> Option<(u64, f64)> {
        map_to_term(kind, &Metric::Euclidean, id1, id2).unwrap()
    }

    #[test]
    fn test_outer_product_map() {
        assert_eq!(euclid(ProductKind::Outer, E1, E2), Some((E1 | E2, 1.0)));
        assert_eq!(euclid(ProductKind::Outer, E2, E1), Some((E1 | E2, -1.0)));
        assert_eq!(euclid(ProductKind::Outer, E1, E1), None);
        assert_eq!(euclid(ProductKind::Outer, 0, E3), Some((E3, 1.0)));
    }

    #[test]
    fn test_geometric_product_map() {
        assert_eq!(euclid(ProductKind::Geometric, E1, E1), Some((0, 1.0)));
        assert_eq!(
            euclid(ProductKind::Geometric, E1 | E2, E1 | E2),
            Some((0, -1.0))
        );
        // e12 e2 = e1
        assert_eq!(euclid(ProductKind::Geometric, E1 | E2, E2), Some((E1, 1.0)));
        // e12 e1 = -e2
        assert_eq!(
            euclid(ProductKind::Geometric, E1 | E2, E1),
            Some((E2, -1.0))
        );
    }

    #[test]
    fn test_scalar_product_map() {
        assert_eq!(
            euclid(ProductKind::Scalar, E1 | E3, E1 | E3),
            Some((0, -1.0))
        );
        assert_eq!(euclid(ProductKind::Scalar, E1, E2), None);
    }

    #[test]
    fn test_contraction_maps() {
        // e1 _| e12 = e2
        assert_eq!(
            euclid(ProductKind::LeftContraction, E1, E1 | E2),
            Some((E2, 1.0))
        );
        assert_eq!(euclid(ProductKind::LeftContraction, E1 | E2, E1), None);
        // e12 |_ e2 = e1
        assert_eq!(
            euclid(ProductKind::RightContraction, E1 | E2, E2),
            Some((E1, 1.0))
        );
        assert_eq!(euclid(ProductKind::HestenesInner, 0, E1), None);
        assert_eq!(
            euclid(ProductKind::HestenesInner, E2, E1 | E2),
            Some((E1, -1.0))
        );
    }

    #[test]
    fn test_commutator_maps() {
        assert_eq!(
            euclid(ProductKind::Commutator, E1, E2),
            Some((E1 | E2, 1.0))
        );
        assert_eq!(euclid(ProductKind::Commutator, E1, E1), None);
        assert_eq!(euclid(ProductKind::AntiCommutator, E1, E1), Some((0, 1.0)));
    }

    #[test]
    fn test_signature_metric() {
        let metric = Metric::<f64>::signature(1, 1);
        assert_eq!(metric, Metric::Signature { negative_mask: E2 });
        assert_eq!(
            map_to_term(ProductKind::Geometric, &metric, E2, E2).unwrap(),
            Some((0, -1.0))
        );
        assert_eq!(
            map_to_term(ProductKind::Geometric, &metric, E1, E1).unwrap(),
            Some((0, 1.0))
        );
        assert!(metric.validate(2).is_ok());
        assert!(metric.validate(1).is_err());
    }

    #[test]
    fn test_orthogonal_metric() {
        let metric = Metric::Orthogonal(vec![2.0, -3.0, 1.0]);
        assert_eq!(
            map_to_term(ProductKind::Geometric, &metric, E1, E1).unwrap(),
            Some((0, 2.0))
        );
        // e12 e12 = -e1 e1 e2 e2 = -(2)(-3)
        assert_eq!(
            map_to_term(ProductKind::Geometric, &metric, E1 | E2, E1 | E2).unwrap(),
            Some((0, 6.0))
        );
        // Outer product ignores the metric: nothing is shared
        assert_eq!(
            map_to_term(ProductKind::Outer, &metric, E1, E2).unwrap(),
            Some((E1 | E2, 1.0))
        );
        assert!(metric.validate(3).is_ok());
        assert!(metric.validate(4).is_err());
    }

    #[test]
    fn test_degenerate_metric_vanishes() {
        let metric = Metric::Orthogonal(vec![1.0, 0.0]);
        assert_eq!(map_to_term(ProductKind::Geometric, &metric, E2, E2).unwrap(), None);
        assert_eq!(
            map_to_term(ProductKind::Geometric, &metric, E1, E2).unwrap(),
            Some((E1 | E2, 1.0))
        );
    }

    #[test]
    fn test_short_weight_table_is_an_error() {
        let metric = Metric::Orthogonal(vec![2.0]);
        assert_eq!(
            map_to_term(ProductKind::Geometric, &metric, E1, E1).unwrap(),
            Some((0, 2.0))
        );
        // e2 has no weight; only shared basis vectors consult the table
        assert!(matches!(
            map_to_term(ProductKind::Geometric, &metric, E2, E2),
            Err(GaError::InvalidConfig(_))
        ));
        assert!(map_to_term(ProductKind::Outer, &metric, E1, E2).unwrap().is_some());
    }
}
