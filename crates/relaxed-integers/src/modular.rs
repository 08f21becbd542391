//! Modular arithmetic.
//!
//! This module provides integers modulo a prime, the coefficient arithmetic
//! underneath the prime fields used by the online series engine.

use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A modular integer with a compile-time prime modulus.
///
/// `P` must be a prime below 2^63. All operations are performed modulo `P`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ModInt<const P: u64>(u64);

impl<const P: u64> ModInt<P> {
    /// Creates a new modular integer.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value % P)
    }

    /// Creates a modular integer from a signed value.
    #[must_use]
    pub const fn from_signed(value: i64) -> Self {
        let r = value.unsigned_abs() % P;
        if value >= 0 || r == 0 {
            Self(r)
        } else {
            Self(P - r)
        }
    }

    /// Returns the value as a u64.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the modulus.
    #[must_use]
    pub const fn modulus() -> u64 {
        P
    }

    /// Returns the exponent of the largest power of two dividing `P - 1`.
    #[must_use]
    pub const fn two_adicity() -> u32 {
        (P - 1).trailing_zeros()
    }

    /// Computes the modular inverse using extended Euclidean algorithm.
    ///
    /// Returns `None` if the inverse doesn't exist (when gcd(self, P) != 1).
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn inv(self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }

        let mut t = 0i64;
        let mut new_t = 1i64;
        let mut r = P as i64;
        let mut new_r = self.0 as i64;

        while new_r != 0 {
            let quotient = r / new_r;
            (t, new_t) = (new_t, t - quotient * new_t);
            (r, new_r) = (new_r, r - quotient * new_r);
        }

        if r > 1 {
            return None;
        }

        Some(Self::from_signed(t))
    }

    /// Computes self^exp using binary exponentiation.
    #[must_use]
    pub fn pow(self, mut exp: u64) -> Self {
        let mut base = self;
        let mut result = Self::one();

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            exp >>= 1;
        }

        result
    }

    /// Returns true if this is a quadratic residue (zero included).
    ///
    /// Uses Euler's criterion: a^((p-1)/2) = 1 for nonzero squares.
    #[must_use]
    pub fn is_square(self) -> bool {
        if self.0 == 0 || P == 2 {
            return true;
        }
        self.pow((P - 1) / 2).0 == 1
    }

    /// Returns the smallest quadratic non-residue, or `None` when `P = 2`.
    #[must_use]
    pub fn non_residue() -> Option<Self> {
        if P == 2 {
            return None;
        }
        (2..P).map(Self::new).find(|z| !z.is_square())
    }

    /// Computes a square root with the Tonelli–Shanks algorithm.
    ///
    /// Of the two roots the one with the smaller representative is returned.
    /// Returns `None` for non-residues.
    #[must_use]
    pub fn sqrt(self) -> Option<Self> {
        if self.0 == 0 || P == 2 {
            return Some(self);
        }
        if !self.is_square() {
            return None;
        }

        let s = Self::two_adicity();
        let q = (P - 1) >> s;
        let z = Self::non_residue()?;

        let mut m = s;
        let mut c = z.pow(q);
        let mut t = self.pow(q);
        let mut r = self.pow((q + 1) / 2);

        while t.0 != 1 {
            // Least i with t^(2^i) = 1; always below m for residues.
            let mut i = 0;
            let mut t2 = t;
            while t2.0 != 1 {
                t2 = t2 * t2;
                i += 1;
            }

            let b = c.pow(1u64 << (m - i - 1));
            m = i;
            c = b * b;
            t = t * c;
            r = r * b;
        }

        Some(r.min(-r))
    }
}

impl<const P: u64> Zero for ModInt<P> {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const P: u64> One for ModInt<P> {
    fn one() -> Self {
        Self(1 % P)
    }

    fn is_one(&self) -> bool {
        self.0 == 1
    }
}

impl<const P: u64> fmt::Debug for ModInt<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.0, P)
    }
}

impl<const P: u64> fmt::Display for ModInt<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<const P: u64> Add for ModInt<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let sum = self.0 + rhs.0;
        Self(if sum >= P { sum - P } else { sum })
    }
}

impl<const P: u64> Sub for ModInt<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.0 >= rhs.0 {
            Self(self.0 - rhs.0)
        } else {
            Self(self.0 + P - rhs.0)
        }
    }
}

impl<const P: u64> Mul for ModInt<P> {
    type Output = Self;

    #[allow(clippy::cast_possible_truncation)]
    fn mul(self, rhs: Self) -> Self::Output {
        // Use u128 to avoid overflow
        Self((u128::from(self.0) * u128::from(rhs.0) % u128::from(P)) as u64)
    }
}

impl<const P: u64> Div for ModInt<P> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.inv().expect("division by non-invertible element")
    }
}

impl<const P: u64> Neg for ModInt<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.0 == 0 {
            Self(0)
        } else {
            Self(P - self.0)
        }
    }
}

impl<const P: u64> From<u64> for ModInt<P> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<const P: u64> From<i64> for ModInt<P> {
    fn from(value: i64) -> Self {
        Self::from_signed(value)
    }
}

/// Common NTT-friendly primes.
pub mod primes {
    /// 2^23 * 7 * 17 + 1 = 998244353, two-adicity 23.
    pub const P998244353: u64 = 998_244_353;

    /// 2^26 * 7 + 1 = 469762049, two-adicity 26.
    pub const P469762049: u64 = 469_762_049;

    /// 2^24 * 73 + 1 = 1224736769, two-adicity 24.
    pub const P1224736769: u64 = 1_224_736_769;

    /// 2^25 * 59 + 1 = 1977716737, two-adicity 25.
    pub const P1977716737: u64 = 1_977_716_737;
}

/// Type alias for the common NTT prime.
pub type Mod998244353 = ModInt<{ primes::P998244353 }>;
