//! GAPoT Algebra Library
//!
//! Sparse geometric algebra over an orthonormal frame, with a power-system
//! layer built on top of it (geometric algebra power theory, GAPoT).
//!
//! Multivectors are sparse sums of basis blades. A blade is identified by a
//! bitmask of the basis vectors it contains, so the grade is the population
//! count and the sign of any blade product reduces to integer bit counting.
//!
//! # Features
//!
//! - **Generic scalars**: `f64`, or exact `BigRational` for sign-sensitive work
//! - **Product kinds**: outer, geometric, scalar, contractions, Hestenes inner,
//!   commutator and anti-commutator, under Euclidean or diagonal metrics
//! - **Injectable normalization**: every value carries its own coefficient
//!   normalizer instead of relying on global state
//! - **Power-system layer**: phasor-encoded vectors, power biversors, rotors
//!   between reference frames, per-phase impedance
//!
//! # Quick Start
//!
//! ```
//! use gapot_algebra::{PolarPhasor, Vector};
//!
//! // Single-phase voltage 2∠60° and the same signal shifted to 2∠0°
//! let mut u = Vector::<f64>::new();
//! u.set_polar_phasor(&PolarPhasor::new(1, 2.0, std::f64::consts::FRAC_PI_3)?)?;
//! let mut reference = Vector::<f64>::new();
//! reference.set_polar_phasor(&PolarPhasor::new(1, 2.0, 0.0)?)?;
//!
//! // Rotor from the reference to u, applied to the reference
//! let rotor = reference.rotor_to(&u)?;
//! let rotated = reference.apply_rotor(&rotor)?;
//! assert!((rotated.term_value(1) - u.term_value(1)).abs() < 1e-12);
//! assert!((rotated.term_value(2) - u.term_value(2)).abs() < 1e-12);
//! # Ok::<(), gapot_algebra::GaError>(())
//! ```
//!
//! # Products
//!
//! | Method | Product | Non-zero for blades `a`, `b` when |
//! |--------|---------|-----------------------------------|
//! | `op` | outer | `a & b == 0` |
//! | `gp` | geometric | always (Euclidean) |
//! | `sp` | scalar | `a == b` |
//! | `lcp` | left contraction | `a ⊆ b` |
//! | `rcp` | right contraction | `b ⊆ a` |
//! | `hip` | Hestenes inner | neither scalar, grade is `|ga - gb|` |
//! | `cp` | commutator | `a`, `b` anticommute |
//! | `acp` | anti-commutator | `a`, `b` commute |
//!
//! Non-Euclidean metrics go through [`BilinearProduct`]:
//!
//! ```
//! use gapot_algebra::{AlgebraConfig, Multivector, ProductKind};
//!
//! let config = AlgebraConfig::signature(1, 1);
//! let gp = config.product::<f64>(ProductKind::Geometric)?;
//!
//! let e2 = Multivector::basis_blade(2, 0b10, 1.0)?;
//! assert_eq!(gp.apply(&e2, &e2)?.scalar_part(), -1.0);
//! # Ok::<(), gapot_algebra::GaError>(())
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod error;
pub mod gapot;
pub mod math;
pub mod multivector;
pub mod ops;
pub mod products;
pub mod scalar;
pub mod validation;

// Re-exports for convenient access
pub use config::AlgebraConfig;
pub use error::{GaError, Result};
pub use gapot::{Biversor, BiversorTerm, PolarPhasor, RectPhasor, Vector};
pub use math::{Metric, ProductKind};
pub use multivector::{Multivector, MultivectorTerm};
pub use ops::GaElement;
pub use products::BilinearProduct;
pub use scalar::{BigRational, Normalizer, RealScalar, Scalar};
pub use validation::{is_rotor, non_vector_residue, rotor_residue};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_3;

    fn three_phase(magnitude: f64, phase: f64) -> Vector<f64> {
        let mut v = Vector::new().with_normalizer(Normalizer::snap_to_zero(1e-12));
        for (k, shift) in [0.0, -2.0, 2.0].iter().enumerate() {
            let id = 2 * k as u32 + 1;
            v.set_polar_phasor(
                &PolarPhasor::new(id, magnitude, phase + shift * FRAC_PI_3).unwrap(),
            )
            .unwrap();
        }
        v
    }

    #[test]
    fn test_unit_vector_inverse_scenario() {
        let u = Vector::from_terms([(1, 1.0), (2, 1.0), (3, 1.0)]).unwrap();
        assert_eq!(u.norm2(), 3.0);
        let product = u.gp(&u.inverse().unwrap());
        assert_relative_eq!(product.scalar_part(), 1.0, epsilon = 1e-12);
        assert!(product.non_active_part().is_zero());
    }

    #[test]
    fn test_three_phase_power() {
        let voltage = three_phase(230.0, 0.0);
        let current = three_phase(10.0, -0.5);

        let power = voltage.gp(&current);
        // Balanced system: active power is the sum of per-phase U I cos(phi)
        assert_relative_eq!(
            power.active_total(),
            3.0 * 230.0 * 10.0 * 0.5_f64.cos(),
            max_relative = 1e-12
        );
        let apparent2 = voltage.norm2() * current.norm2();
        assert_relative_eq!(power.norm2(), apparent2, max_relative = 1e-12);
    }

    #[test]
    fn test_rotor_between_phase_frames() {
        let u = three_phase(1.0, 0.0);
        let w = three_phase(1.0, 0.3);
        let rotor = u.rotor_to(&w).unwrap();
        assert!(validation::is_rotor_within(&rotor, 1e-12).unwrap());
        assert_abs_diff_eq!(u.apply_rotor(&rotor).unwrap(), w, epsilon = 1e-10);
    }

    #[test]
    fn test_rational_and_float_agree() {
        // (2 e1 - 3 e23)^2 = 4 - 9 - 12 e123
        let mut exact = Multivector::<BigRational>::new(3);
        exact
            .set_term(0b001, BigRational::from_i64(2))
            .unwrap()
            .set_term(0b110, BigRational::from_i64(-3))
            .unwrap();
        let exact_square = exact.gp(&exact).unwrap();
        assert_eq!(exact_square.scalar_part(), BigRational::from_i64(-5));
        assert_eq!(exact_square.term_value(0b111), BigRational::from_i64(-12));
        assert_eq!(exact_square.active_count(), 2);

        let float = Multivector::from_terms(3, [(0b001, 2.0), (0b110, -3.0)]).unwrap();
        let float_square = float.gp(&float).unwrap();
        assert_eq!(float_square.scalar_part(), -5.0);
        assert_eq!(float_square.term_value(0b111), -12.0);
        assert_eq!(float_square.active_count(), 2);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
