//! Operator overloads for series.
//!
//! Operators take both borrowed and owned handles. Combining series from
//! different arenas panics, as does dividing by a series with zero constant
//! term or by a zero scalar. Use the named methods on [`Series`] when the
//! operands are not known to be valid statically.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::node::NodeKind;
use crate::series::{Series, SeriesCoeff};

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl<F: SeriesCoeff> $trait<&Series<F>> for &Series<F> {
            type Output = Series<F>;

            fn $method(self, rhs: &Series<F>) -> Series<F> {
                let ($a, $b) = (self, rhs);
                $body
            }
        }

        impl<F: SeriesCoeff> $trait<Series<F>> for Series<F> {
            type Output = Series<F>;

            fn $method(self, rhs: Series<F>) -> Series<F> {
                <&Series<F> as $trait<&Series<F>>>::$method(&self, &rhs)
            }
        }

        impl<F: SeriesCoeff> $trait<&Series<F>> for Series<F> {
            type Output = Series<F>;

            fn $method(self, rhs: &Series<F>) -> Series<F> {
                <&Series<F> as $trait<&Series<F>>>::$method(&self, rhs)
            }
        }

        impl<F: SeriesCoeff> $trait<Series<F>> for &Series<F> {
            type Output = Series<F>;

            fn $method(self, rhs: Series<F>) -> Series<F> {
                <&Series<F> as $trait<&Series<F>>>::$method(self, &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, |a, b| a.binary(b, NodeKind::Add));
impl_binary_op!(Sub, sub, |a, b| a.binary(b, NodeKind::Sub));
impl_binary_op!(Mul, mul, |a, b| Series::mul(a, b));
impl_binary_op!(Div, div, |a, b| Series::div(a, b).unwrap_or_else(|err| panic!("{err}")));

impl<F: SeriesCoeff> Mul<F> for &Series<F> {
    type Output = Series<F>;

    fn mul(self, rhs: F) -> Series<F> {
        self.scale(rhs)
    }
}

impl<F: SeriesCoeff> Mul<F> for Series<F> {
    type Output = Series<F>;

    fn mul(self, rhs: F) -> Series<F> {
        self.scale(rhs)
    }
}

impl<F: SeriesCoeff> Div<F> for &Series<F> {
    type Output = Series<F>;

    fn div(self, rhs: F) -> Series<F> {
        self.div_scalar(&rhs).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl<F: SeriesCoeff> Div<F> for Series<F> {
    type Output = Series<F>;

    fn div(self, rhs: F) -> Series<F> {
        &self / rhs
    }
}

impl<F: SeriesCoeff> Neg for &Series<F> {
    type Output = Series<F>;

    fn neg(self) -> Series<F> {
        self.scale(-F::one())
    }
}

impl<F: SeriesCoeff> Neg for Series<F> {
    type Output = Series<F>;

    fn neg(self) -> Series<F> {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use crate::SeriesArena;
    use relaxed_rings::{Ring, GF998244353 as F};

    fn fs(values: &[i64]) -> Vec<F> {
        values.iter().copied().map(F::from_i64).collect()
    }

    #[test]
    fn test_owned_and_borrowed_operands() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[1, 1]));
        let b = arena.fixed(fs(&[2, 3]));

        let sum = a.clone() + &b;
        let diff = &a - b.clone();
        let prod = a.clone() * b.clone();
        assert_eq!(sum.range(0, 2), fs(&[3, 4]));
        assert_eq!(diff.range(0, 2), fs(&[-1, -2]));
        assert_eq!(prod.range(0, 3), fs(&[2, 5, 3]));
    }

    #[test]
    fn test_scalar_and_negation() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[1, 2]));
        assert_eq!((&a * F::from_i64(3)).range(0, 2), fs(&[3, 6]));
        assert_eq!((-a).range(0, 2), fs(&[-1, -2]));
    }

    #[test]
    fn test_series_quotient() {
        let arena = SeriesArena::new();
        let num = arena.fixed(fs(&[1, 0, -1]));
        let den = arena.fixed(fs(&[1, -1]));
        assert_eq!((&num / &den).range(0, 5), fs(&[1, 1, 0, 0, 0]));
        assert_eq!((num / den).range(0, 3), fs(&[1, 1, 0]));
    }

    #[test]
    fn test_scalar_quotient() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[4, 6]));
        assert_eq!((&a / F::from_i64(2)).range(0, 3), fs(&[2, 3, 0]));
        assert_eq!((a / F::from_i64(-1)).range(0, 2), fs(&[-4, -6]));
    }

    #[test]
    #[should_panic(expected = "not invertible")]
    fn test_quotient_by_series_without_constant_term() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[1]));
        let x = arena.monomial(F::one(), 1);
        let _ = &a / &x;
    }

    #[test]
    #[should_panic(expected = "scalar divisor is zero")]
    fn test_quotient_by_zero_scalar() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[1, 2]));
        let _ = a / F::zero();
    }
}
