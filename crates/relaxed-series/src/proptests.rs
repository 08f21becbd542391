//! Property-based tests for series operations.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{EngineConfig, Series, SeriesArena};
    use relaxed_rings::{Ring, GF998244353 as F};

    const N: usize = 48;

    // Strategy for generating leading coefficients
    fn coeffs(max_len: usize) -> impl Strategy<Value = Vec<F>> {
        proptest::collection::vec(any::<u64>().prop_map(F::new), 1..=max_len)
    }

    // Coefficients with constant term 1
    fn unit_coeffs(max_len: usize) -> impl Strategy<Value = Vec<F>> {
        coeffs(max_len).prop_map(|mut c| {
            c[0] = F::one();
            c
        })
    }

    fn naive_product(a: &[F], b: &[F], n: usize) -> Vec<F> {
        (0..n)
            .map(|k| {
                (0..=k).fold(F::zero(), |sum, i| {
                    let x = a.get(i).copied().unwrap_or_else(F::zero);
                    let y = b.get(k - i).copied().unwrap_or_else(F::zero);
                    sum + x * y
                })
            })
            .collect()
    }

    fn one_then_zeros(n: usize) -> Vec<F> {
        let mut v = vec![F::zero(); n];
        v[0] = F::one();
        v
    }

    fn repeated_product(s: &Series<F>, k: usize) -> Series<F> {
        let mut acc = s.arena().constant(F::one());
        for _ in 0..k {
            acc = &acc * s;
        }
        acc
    }

    proptest! {
        #[test]
        fn product_matches_convolution(a in coeffs(80), b in coeffs(80), threshold in 0usize..=8) {
            let arena = SeriesArena::with_config(EngineConfig::default().with_naive_threshold(threshold));
            let product = &arena.fixed(a.clone()) * &arena.fixed(b.clone());
            prop_assert_eq!(product.range(0, 160), naive_product(&a, &b, 160));
        }

        #[test]
        fn repeated_reads_are_stable(a in coeffs(40), b in coeffs(40), k in 0usize..N) {
            let arena = SeriesArena::new();
            let product = &arena.fixed(a) * &arena.fixed(b);
            let first = product.range(0, N);
            prop_assert_eq!(product.coeff(k), first[k]);
            prop_assert_eq!(product.range(0, N), first);
        }

        #[test]
        fn inverse_times_self_is_one(a in coeffs(N), c in 1u64..1000) {
            let arena = SeriesArena::new();
            let mut a = a;
            a[0] = F::new(c);
            let s = arena.fixed(a);
            let check = &s * &s.inv().unwrap();
            prop_assert_eq!(check.range(0, N), one_then_zeros(N));
        }

        #[test]
        fn exp_inverts_ln(a in unit_coeffs(N)) {
            let arena = SeriesArena::new();
            let s = arena.fixed(a);
            let back = s.ln().unwrap().exp().unwrap();
            prop_assert_eq!(back.range(0, N), s.range(0, N));
        }

        #[test]
        fn integral_inverts_derivative(a in coeffs(N)) {
            let arena = SeriesArena::new();
            let s = arena.fixed(a);
            let back = s.derivative().integral(s.coeff(0));
            prop_assert_eq!(back.range(0, N), s.range(0, N));
        }

        #[test]
        fn shift_right_pads_with_zeros(a in coeffs(N), k in 0usize..16, n in 0usize..64) {
            let arena = SeriesArena::new();
            let s = arena.fixed(a);
            let expected = if n >= k { s.coeff(n - k) } else { F::zero() };
            prop_assert_eq!(s.shr(k).coeff(n), expected);
        }

        #[test]
        fn shift_left_undoes_shift_right(a in coeffs(N), k in 0usize..16) {
            let arena = SeriesArena::new();
            let s = arena.fixed(a);
            prop_assert_eq!(s.shr(k).shl(k).range(0, N), s.range(0, N));
        }

        #[test]
        fn sqrt_squares_back(a in unit_coeffs(N), v in 0usize..4) {
            let arena = SeriesArena::new();
            let s = arena.fixed(a).shr(2 * v);
            let root = s.sqrt().unwrap();
            prop_assert_eq!(root.square().range(0, N), s.range(0, N));
        }

        #[test]
        fn pow_matches_repeated_product(a in coeffs(24), k in 1usize..6, v in 0usize..3) {
            let arena = SeriesArena::new();
            let mut a = a;
            if a[0].is_zero() {
                a[0] = F::one();
            }
            let s = arena.fixed(a).shr(v);
            let expected = repeated_product(&s, k);
            prop_assert_eq!(s.pow(k as i64).unwrap().range(0, N), expected.range(0, N));
        }

        #[test]
        fn negative_pow_is_inverse_of_pow(a in coeffs(24), k in 1i64..5, c in 1u64..1000) {
            let arena = SeriesArena::new();
            let mut a = a;
            a[0] = F::new(c);
            let s = arena.fixed(a);
            let check = &s.pow(k).unwrap() * &s.pow(-k).unwrap();
            prop_assert_eq!(check.range(0, N), one_then_zeros(N));
        }
    }
}
