//! Algebraic structure traits.
//!
//! This module defines the coefficient contracts the series engine is generic
//! over: plain ring arithmetic, division, roots of unity for block transforms,
//! and an optional square-root oracle.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// A commutative ring with identity.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative and commutative with identity `one()`
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`neg`)
pub trait Ring:
    Clone + Eq + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// The image of a natural number under the canonical map `Z -> R`.
    ///
    /// The default uses double-and-add; concrete rings should override it.
    fn from_u64(n: u64) -> Self {
        let mut result = Self::zero();
        let mut addend = Self::one();
        let mut n = n;

        while n > 0 {
            if n & 1 == 1 {
                result = result + addend.clone();
            }
            addend = addend.clone() + addend;
            n >>= 1;
        }

        result
    }

    /// The image of a signed integer under the canonical map `Z -> R`.
    fn from_i64(n: i64) -> Self {
        let magnitude = Self::from_u64(n.unsigned_abs());
        if n < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Computes self^n for non-negative n.
    fn pow(&self, n: u64) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base.clone();
            }
            base = base.clone() * base;
            exp >>= 1;
        }

        result
    }
}

/// A field is a ring where every non-zero element has a multiplicative inverse.
pub trait Field: Ring {
    /// Computes the multiplicative inverse.
    ///
    /// Returns `None` if the element is zero.
    fn inv(&self) -> Option<Self>;

    /// Divides by another element.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    fn field_div(&self, other: &Self) -> Self {
        self.clone() * other.inv().expect("division by zero")
    }
}

/// A field with power-of-two roots of unity, as needed by block transforms.
pub trait TwoAdicField: Field {
    /// The largest `k` such that the field holds a primitive `2^k`-th root of unity.
    fn two_adicity() -> u32;

    /// A primitive `2^log_order`-th root of unity.
    ///
    /// Returns `None` when `log_order` exceeds [`TwoAdicField::two_adicity`].
    fn root_of_unity(log_order: u32) -> Option<Self>;
}

/// A field equipped with a square-root oracle.
pub trait SqrtField: Field {
    /// Returns true if this element is a square (zero included).
    fn is_square(&self) -> bool;

    /// Returns some `r` with `r * r == self`, or `None` for non-squares.
    fn sqrt(&self) -> Option<Self>;
}
