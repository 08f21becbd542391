//! Series defined by functional equations.
//!
//! Each operation allocates a placeholder `g`, builds an expression that
//! reads `g` only at indices below the one being produced, and binds `g` to
//! it. Preconditions on the constant term are checked here, at construction,
//! so that evaluation never starts on a series it cannot finish.

use relaxed_rings::SqrtField;
use tracing::debug;

use crate::error::{Result, SeriesError};
use crate::series::{Series, SeriesCoeff};

impl<F: SeriesCoeff> Series<F> {
    /// Binds a fresh placeholder to `body(placeholder)` and returns it.
    fn fixpoint(&self, body: impl FnOnce(&Self) -> Self) -> Result<Self> {
        let g = self.arena().placeholder();
        let expr = body(&g);
        g.bind(&expr)?;
        Ok(g)
    }

    /// The multiplicative inverse `1 / self`.
    ///
    /// With `c = self[0]`, the inverse satisfies
    /// `g = c⁻¹ - c⁻¹ (self - c) g`, which reads `g` strictly below `n`
    /// because `self - c` has no constant term.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NonInvertibleConstant`] if `self[0]` is zero.
    pub fn inv(&self) -> Result<Self> {
        let c_inv = self.coeff(0).inv().ok_or(SeriesError::NonInvertibleConstant)?;
        let tail = self.ignore(1).scale(-c_inv.clone());
        self.fixpoint(|g| tail.mul(g).corner([c_inv]))
    }

    /// The quotient `self / other`.
    ///
    /// # Errors
    ///
    /// Fails if `other[0]` is zero or the series live in different arenas.
    pub fn div(&self, other: &Self) -> Result<Self> {
        if !self.arena().same(other.arena()) {
            return Err(SeriesError::ArenaMismatch);
        }
        Ok(self.mul(&other.inv()?))
    }

    /// The natural logarithm `∫ self' / self`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LogConstantNotOne`] unless `self[0] == 1`.
    pub fn ln(&self) -> Result<Self> {
        if !self.coeff(0).is_one() {
            return Err(SeriesError::LogConstantNotOne);
        }
        Ok(self.derivative().mul(&self.inv()?).integral(F::zero()))
    }

    /// The exponential, the solution of `g' = g self'` with `g[0] = 1`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::ExpConstantNotZero`] unless `self[0] == 0`.
    pub fn exp(&self) -> Result<Self> {
        if !self.coeff(0).is_zero() {
            return Err(SeriesError::ExpConstantNotZero);
        }
        let d = self.derivative();
        self.fixpoint(|g| g.mul(&d).integral(F::one()))
    }

    /// Raises the series to an integer power.
    ///
    /// The series is split as `c x^v t` with `t[0] = 1`, and
    /// `self^k = c^k x^(kv) exp(k ln t)`. A series with no nonzero
    /// coefficient within the valuation scan window is treated as zero.
    ///
    /// # Errors
    ///
    /// Negative powers fail with [`SeriesError::NonInvertibleConstant`] on
    /// the zero series and [`SeriesError::NegativePowerOfNonUnit`] when the
    /// valuation is positive.
    pub fn pow(&self, k: i64) -> Result<Self> {
        let arena = self.arena();
        if k == 0 {
            return Ok(arena.constant(F::one()));
        }

        let Some(v) = self.valuation() else {
            debug!(series = %self.id(), k, "power of a series with no nonzero coefficient in the scan window");
            return if k > 0 {
                Ok(arena.zero())
            } else {
                Err(SeriesError::NonInvertibleConstant)
            };
        };
        if k < 0 && v > 0 {
            return Err(SeriesError::NegativePowerOfNonUnit { valuation: v });
        }

        let lead = self.coeff(v);
        let lead_inv = lead.inv().ok_or(SeriesError::NonInvertibleConstant)?;
        let lead_pow = if k > 0 {
            lead.pow(k.unsigned_abs())
        } else {
            lead_inv.pow(k.unsigned_abs())
        };

        let unit = self.shl(v).scale(lead_inv);
        let powered = unit.ln()?.scale(F::from_i64(k)).exp()?.scale(lead_pow);

        // Negative k reached this point only with v == 0.
        let shift = if v == 0 {
            Some(0)
        } else {
            usize::try_from(k).ok().and_then(|k| k.checked_mul(v))
        };
        match shift {
            Some(shift) => Ok(powered.shr(shift)),
            None => Ok(arena.zero()),
        }
    }
}

impl<F: SeriesCoeff + SqrtField> Series<F> {
    /// A square root of the series.
    ///
    /// For a series `x^(2m) u` with `u[0] = s²`, returns `x^m g` where
    /// `g = s + (u - (g - s)²) / (2s)`. The root of `u[0]` is whichever one
    /// the field's oracle returns.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NonSquareConstant`] if the valuation is odd or
    /// the leading coefficient is not a square, and
    /// [`SeriesError::CharacteristicTwo`] if `2` is not invertible.
    pub fn sqrt(&self) -> Result<Self> {
        let Some(v) = self.valuation() else {
            return Ok(self.arena().zero());
        };
        if v % 2 == 1 {
            return Err(SeriesError::NonSquareConstant);
        }

        let s = self.coeff(v).sqrt().ok_or(SeriesError::NonSquareConstant)?;
        let inv_2s = (s.clone() + s.clone())
            .inv()
            .ok_or(SeriesError::CharacteristicTwo)?;

        let unit = self.shl(v);
        let root = self.fixpoint(|g| {
            let tail = g.ignore(1);
            (&unit - &tail.square()).scale(inv_2s).corner([s])
        })?;
        Ok(root.shr(v / 2))
    }
}
