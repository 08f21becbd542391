//! Prime fields Z_p.

use crate::traits::{Field, Ring, SqrtField, TwoAdicField};
use relaxed_integers::ModInt;

/// A finite field Z_p for prime p.
///
/// This wraps `ModInt<P>` and implements the algebraic traits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct FiniteField<const P: u64>(pub ModInt<P>);

impl<const P: u64> FiniteField<P> {
    /// Creates a new field element.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(ModInt::new(value))
    }

    /// Creates a field element from a signed value.
    #[must_use]
    pub const fn from_signed(value: i64) -> Self {
        Self(ModInt::from_signed(value))
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0.value()
    }

    /// Returns the characteristic (the prime p).
    #[must_use]
    pub const fn characteristic() -> u64 {
        P
    }
}

impl<const P: u64> Ring for FiniteField<P> {
    fn zero() -> Self {
        Self(ModInt::new(0))
    }

    fn one() -> Self {
        Self(ModInt::new(1))
    }

    fn is_zero(&self) -> bool {
        self.0.value() == 0
    }

    fn is_one(&self) -> bool {
        self.0.value() == 1
    }

    fn from_u64(n: u64) -> Self {
        Self::new(n)
    }

    fn from_i64(n: i64) -> Self {
        Self::from_signed(n)
    }

    fn pow(&self, n: u64) -> Self {
        Self(self.0.pow(n))
    }
}

impl<const P: u64> Field for FiniteField<P> {
    fn inv(&self) -> Option<Self> {
        self.0.inv().map(Self)
    }
}

impl<const P: u64> TwoAdicField for FiniteField<P> {
    fn two_adicity() -> u32 {
        ModInt::<P>::two_adicity()
    }

    fn root_of_unity(log_order: u32) -> Option<Self> {
        let adicity = Self::two_adicity();
        if log_order > adicity {
            return None;
        }
        if log_order == 0 {
            return Some(Self::one());
        }

        // z^((p-1)/2^s) has order exactly 2^s for any non-residue z.
        let z = ModInt::<P>::non_residue()?;
        let generator = z.pow((P - 1) >> adicity);
        Some(Self(generator.pow(1u64 << (adicity - log_order))))
    }
}

impl<const P: u64> SqrtField for FiniteField<P> {
    fn is_square(&self) -> bool {
        self.0.is_square()
    }

    fn sqrt(&self) -> Option<Self> {
        self.0.sqrt().map(Self)
    }
}

impl<const P: u64> std::ops::Add for FiniteField<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<const P: u64> std::ops::Sub for FiniteField<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<const P: u64> std::ops::Mul for FiniteField<P> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<const P: u64> std::ops::Neg for FiniteField<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl<const P: u64> From<u64> for FiniteField<P> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<const P: u64> From<i64> for FiniteField<P> {
    fn from(value: i64) -> Self {
        Self::from_signed(value)
    }
}

impl<const P: u64> std::fmt::Display for FiniteField<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type alias for the common NTT prime field.
pub type GF998244353 = FiniteField<998_244_353>;
