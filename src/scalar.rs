//! Scalar field contracts and the normalization hook.
//!
//! The product engine only needs ring operations, division and an exact zero
//! test. Anything that also needs square roots or trigonometry (norms, rotors,
//! polar phasors) asks for [`RealScalar`] instead.
//!
//! Two backends ship with the crate:
//! - `f64` implements both traits.
//! - [`BigRational`] implements [`Scalar`] only, giving exact arithmetic for
//!   products, sums, reversion and inverses.

use std::fmt;
use std::ops::{Div, Neg, Sub};
use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::{One, Zero};

pub use num_rational::BigRational;

/// Opaque field element used as multivector coefficient.
///
/// `is_zero` (from [`Zero`]) must be exact: the collision-merge rule relies on
/// it to prune cancelled terms.
pub trait Scalar:
    Zero
    + One
    + Clone
    + PartialEq
    + fmt::Debug
    + Sub<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Embed a small integer.
    fn from_i64(value: i64) -> Self;

    /// Returns `-1` or `1`.
    #[must_use]
    fn sign(negative: bool) -> Self {
        if negative {
            -Self::one()
        } else {
            Self::one()
        }
    }
}

/// Scalars that support the analytic operations used by norms, rotors and
/// polar phasors.
pub trait RealScalar: Scalar + PartialOrd {
    fn sqrt(&self) -> Self;
    fn abs(&self) -> Self;
    fn sin(&self) -> Self;
    fn cos(&self) -> Self;
    fn acos(&self) -> Self;
    /// Four-quadrant arctangent of `self / x`.
    fn atan2(&self, x: &Self) -> Self;
    fn from_f64(value: f64) -> Self;
    fn to_f64(&self) -> f64;
}

impl Scalar for f64 {
    fn from_i64(value: i64) -> Self {
        value as f64
    }
}

impl RealScalar for f64 {
    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    fn sin(&self) -> Self {
        f64::sin(*self)
    }

    fn cos(&self) -> Self {
        f64::cos(*self)
    }

    fn acos(&self) -> Self {
        // Rounding can push a cosine just outside [-1, 1].
        f64::acos(f64::clamp(*self, -1.0, 1.0))
    }

    fn atan2(&self, x: &Self) -> Self {
        f64::atan2(*self, *x)
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(&self) -> f64 {
        *self
    }
}

impl Scalar for BigRational {
    fn from_i64(value: i64) -> Self {
        Self::from_integer(BigInt::from(value))
    }
}

/// Normalization hook applied to every coefficient before it is stored.
///
/// Carried explicitly by each multivector-family value; binary operations
/// reuse the normalizer of their left operand. The default is the identity,
/// which is exact for rational coefficients.
pub struct Normalizer<S> {
    func: Option<Arc<dyn Fn(S) -> S + Send + Sync>>,
}

impl<S> Normalizer<S> {
    /// Normalizer that leaves values untouched.
    #[must_use]
    pub const fn identity() -> Self {
        Self { func: None }
    }

    /// Wrap an arbitrary simplification function.
    ///
    /// The function must be idempotent.
    pub fn new(func: impl Fn(S) -> S + Send + Sync + 'static) -> Self {
        Self {
            func: Some(Arc::new(func)),
        }
    }

    /// Apply the hook.
    #[inline]
    pub fn apply(&self, value: S) -> S {
        match &self.func {
            Some(func) => func(value),
            None => value,
        }
    }

    /// Whether this is the identity normalizer.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.func.is_none()
    }
}

impl<S: RealScalar + Send + Sync + 'static> Normalizer<S> {
    /// Flush values with magnitude at or below `epsilon` to exact zero.
    ///
    /// With `epsilon == 0` this is the identity.
    #[must_use]
    pub fn snap_to_zero(epsilon: f64) -> Self {
        if epsilon <= 0.0 {
            return Self::identity();
        }
        let eps = S::from_f64(epsilon);
        Self::new(move |value: S| {
            if value.abs() <= eps {
                S::zero()
            } else {
                value
            }
        })
    }
}

impl<S> Clone for Normalizer<S> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
        }
    }
}

impl<S> Default for Normalizer<S> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<S> fmt::Debug for Normalizer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            f.write_str("Normalizer(identity)")
        } else {
            f.write_str("Normalizer(custom)")
        }
    }
}
