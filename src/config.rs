//! Algebra configuration.
//!
//! [`AlgebraConfig`] fixes the vector space an application works in: its
//! dimension, which basis vectors square to `-1`, and the tolerance used to
//! flush floating-point round-off to exact zero.
//!
//! # Example
//!
//! ```
//! use gapot_algebra::{AlgebraConfig, ProductKind};
//!
//! // Three-phase signal with fundamental and 2nd harmonic
//! let config = AlgebraConfig::gapot(2, 3);
//! assert_eq!(config.vspace_dim, 12);
//!
//! let gp = config.product::<f64>(ProductKind::Geometric)?;
//! assert_eq!(gp.vspace_dim(), 12);
//! # Ok::<(), gapot_algebra::GaError>(())
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GaError, Result};
use crate::math::blade_map::{Metric, ProductKind};
use crate::math::frame;
use crate::multivector::Multivector;
use crate::products::BilinearProduct;
use crate::scalar::{Normalizer, Scalar};

/// Vector space and numeric settings.
///
/// # Parameters
///
/// - `vspace_dim`: number of basis vectors, `1..=63`.
/// - `negative_signature`: bitmask of basis vectors squaring to `-1`.
/// - `zero_epsilon`: magnitude at or below which `f64` coefficients become zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlgebraConfig {
    /// Dimension of the underlying vector space.
    pub vspace_dim: u32,

    /// Basis vectors whose square is `-1` (bit `i` is `e(i+1)`).
    /// Zero means Euclidean.
    pub negative_signature: u64,

    /// Tolerance of the floating-point normalizer.
    /// - 0.0: exact, nothing is flushed
    /// - 1e-12: typical for phasor work in `f64`
    pub zero_epsilon: f64,
}

impl Default for AlgebraConfig {
    fn default() -> Self {
        Self {
            vspace_dim: 3,
            negative_signature: 0,
            zero_epsilon: 0.0,
        }
    }
}

impl AlgebraConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.vspace_dim == 0 {
            return Err(GaError::invalid_config("vspace_dim must be at least 1"));
        }
        if self.vspace_dim > frame::MAX_VSPACE_DIM {
            return Err(GaError::invalid_config(format!(
                "vspace_dim must be at most {}",
                frame::MAX_VSPACE_DIM
            )));
        }
        if !self.zero_epsilon.is_finite() || self.zero_epsilon < 0.0 {
            return Err(GaError::invalid_config(
                "zero_epsilon must be finite and non-negative",
            ));
        }
        if !frame::fits_in(self.negative_signature, self.vspace_dim) {
            return Err(GaError::invalid_config(
                "negative_signature flags basis vectors outside vspace_dim",
            ));
        }
        Ok(())
    }

    /// Euclidean space of dimension `n`.
    #[must_use]
    pub fn euclidean(n: u32) -> Self {
        Self {
            vspace_dim: n,
            ..Self::default()
        }
    }

    /// Space with `p` positive then `q` negative basis vectors.
    #[must_use]
    pub fn signature(p: u32, q: u32) -> Self {
        Self {
            vspace_dim: p + q,
            negative_signature: frame::pseudoscalar_id(p + q) & !frame::pseudoscalar_id(p),
            ..Self::default()
        }
    }

    /// Preset for power-system signals.
    ///
    /// Each phase of each harmonic takes one phasor, i.e. two basis vectors.
    #[must_use]
    pub fn gapot(harmonics: u32, phases: u32) -> Self {
        Self {
            vspace_dim: 2 * harmonics * phases,
            negative_signature: 0,
            zero_epsilon: 1e-12,
        }
    }

    /// Set the vector space dimension.
    #[must_use]
    pub const fn with_vspace_dim(mut self, vspace_dim: u32) -> Self {
        self.vspace_dim = vspace_dim;
        self
    }

    /// Set the normalizer tolerance.
    #[must_use]
    pub const fn with_zero_epsilon(mut self, zero_epsilon: f64) -> Self {
        self.zero_epsilon = zero_epsilon;
        self
    }

    /// Set the negative signature mask.
    #[must_use]
    pub const fn with_negative_signature(mut self, mask: u64) -> Self {
        self.negative_signature = mask;
        self
    }

    /// Metric described by this configuration.
    #[must_use]
    pub fn metric<S: Scalar>(&self) -> Metric<S> {
        if self.negative_signature == 0 {
            Metric::Euclidean
        } else {
            Metric::Signature {
                negative_mask: self.negative_signature,
            }
        }
    }

    /// Floating-point normalizer flushing values within `zero_epsilon`.
    #[must_use]
    pub fn normalizer(&self) -> Normalizer<f64> {
        Normalizer::snap_to_zero(self.zero_epsilon)
    }

    /// Zero multivector in this space, carrying [`AlgebraConfig::normalizer`].
    #[must_use]
    pub fn zero_multivector(&self) -> Multivector<f64> {
        Multivector::new(self.vspace_dim).with_normalizer(self.normalizer())
    }

    /// Product façade of the given kind in this space.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidConfig`] if the configuration is invalid.
    pub fn product<S: Scalar>(&self, kind: ProductKind) -> Result<BilinearProduct<S>> {
        BilinearProduct::from_config(kind, self)
    }
}
