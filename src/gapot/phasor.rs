//! Phasor views over pairs of vector terms.
//!
//! A phasor at odd identifier `id` occupies vector terms `id` and `id + 1`.
//! The rectangular form `(x, y)` is stored as `x` on `id` and `-y` on
//! `id + 1`; the polar form satisfies `x = magnitude * cos(phase)` and
//! `y = magnitude * sin(phase)`.

use num_complex::Complex64;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GaError, Result};
use crate::math::frame;
use crate::scalar::{RealScalar, Scalar};

/// Check that `id` can start a phasor pair.
///
/// # Errors
///
/// Returns [`GaError::MalformedInput`] if `id` is even or the pair does not
/// fit in the largest supported space.
pub fn validate_phasor_id(id: u32) -> Result<()> {
    if id % 2 == 0 {
        return Err(GaError::malformed(format!(
            "phasor identifier must be odd, got {id}"
        )));
    }
    if id >= frame::MAX_VSPACE_DIM {
        return Err(GaError::malformed(format!(
            "phasor pair ({id}, {}) exceeds dimension {}",
            id + 1,
            frame::MAX_VSPACE_DIM
        )));
    }
    Ok(())
}

/// Rectangular phasor `x + j y`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RectPhasor<S> {
    /// Odd identifier of the first term of the pair.
    pub id: u32,
    /// In-phase component.
    pub x: S,
    /// Quadrature component.
    pub y: S,
}

/// Polar phasor `magnitude ∠ phase` (phase in radians).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolarPhasor<S> {
    /// Odd identifier of the first term of the pair.
    pub id: u32,
    pub magnitude: S,
    pub phase: S,
}

impl<S: Scalar> RectPhasor<S> {
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] for an invalid identifier.
    pub fn new(id: u32, x: S, y: S) -> Result<Self> {
        validate_phasor_id(id)?;
        Ok(Self { id, x, y })
    }

    /// The two stored vector terms `(id, x)` and `(id + 1, -y)`.
    #[must_use]
    pub fn to_terms(&self) -> [(u32, S); 2] {
        [(self.id, self.x.clone()), (self.id + 1, -self.y.clone())]
    }
}

impl<S: RealScalar> RectPhasor<S> {
    #[must_use]
    pub fn to_polar(&self) -> PolarPhasor<S> {
        let magnitude = (self.x.clone() * self.x.clone() + self.y.clone() * self.y.clone()).sqrt();
        PolarPhasor {
            id: self.id,
            magnitude,
            phase: self.y.atan2(&self.x),
        }
    }
}

impl<S: RealScalar> PolarPhasor<S> {
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] for an invalid identifier.
    pub fn new(id: u32, magnitude: S, phase: S) -> Result<Self> {
        validate_phasor_id(id)?;
        Ok(Self {
            id,
            magnitude,
            phase,
        })
    }

    #[must_use]
    pub fn to_rect(&self) -> RectPhasor<S> {
        RectPhasor {
            id: self.id,
            x: self.magnitude.clone() * self.phase.cos(),
            y: self.magnitude.clone() * self.phase.sin(),
        }
    }
}

impl RectPhasor<f64> {
    /// Phasor from a complex number.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::MalformedInput`] for an invalid identifier and
    /// [`GaError::NonFinite`] if either component is NaN or infinite.
    pub fn from_complex(id: u32, value: Complex64) -> Result<Self> {
        if !value.re.is_finite() || !value.im.is_finite() {
            return Err(GaError::non_finite(format!("phasor {id} from {value}")));
        }
        Self::new(id, value.re, value.im)
    }

    #[must_use]
    pub fn to_complex(&self) -> Complex64 {
        Complex64::new(self.x, self.y)
    }
}

impl PolarPhasor<f64> {
    #[must_use]
    pub fn to_complex(&self) -> Complex64 {
        Complex64::from_polar(self.magnitude, self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_3, PI};

    #[test]
    fn test_id_validation() {
        assert!(validate_phasor_id(1).is_ok());
        assert!(validate_phasor_id(61).is_ok());
        assert!(validate_phasor_id(2).is_err());
        assert!(validate_phasor_id(0).is_err());
        assert!(validate_phasor_id(63).is_err());
        assert!(RectPhasor::new(4, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_stored_terms_negate_y() {
        let p = RectPhasor::new(3, 2.0, 5.0).unwrap();
        assert_eq!(p.to_terms(), [(3, 2.0), (4, -5.0)]);
    }

    #[test]
    fn test_polar_rect_round_trip() {
        let polar = PolarPhasor::new(1, 2.0, FRAC_PI_3).unwrap();
        let rect = polar.to_rect();
        assert_relative_eq!(rect.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(rect.y, 3.0_f64.sqrt(), epsilon = 1e-12);

        let back = rect.to_polar();
        assert_eq!(back.id, 1);
        assert_relative_eq!(back.magnitude, 2.0, epsilon = 1e-12);
        assert_relative_eq!(back.phase, FRAC_PI_3, epsilon = 1e-12);

        let again = back.to_rect();
        assert_relative_eq!(again.x, rect.x, epsilon = 1e-12);
        assert_relative_eq!(again.y, rect.y, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_quadrant_phase() {
        let rect = RectPhasor::new(1, -1.0, -1.0).unwrap();
        let polar = rect.to_polar();
        assert_relative_eq!(polar.phase, -3.0 * PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_complex_conversion() {
        let c = Complex64::new(3.0, -4.0);
        let rect = RectPhasor::from_complex(5, c).unwrap();
        assert_eq!(rect.to_complex(), c);
        let polar = rect.to_polar();
        assert_relative_eq!(polar.magnitude, 5.0);
        let back = polar.to_complex();
        assert_relative_eq!(back.re, 3.0, epsilon = 1e-12);
        assert_relative_eq!(back.im, -4.0, epsilon = 1e-12);

        assert!(matches!(
            RectPhasor::from_complex(1, Complex64::new(f64::NAN, 0.0)),
            Err(GaError::NonFinite { .. })
        ));
    }
}
