//! Property-based tests for the field traits.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::finite_field::GF998244353 as F;
    use crate::traits::{Field, Ring, SqrtField};

    fn element() -> impl Strategy<Value = F> {
        any::<u64>().prop_map(F::new)
    }

    proptest! {
        #[test]
        fn field_div_inverts_mul(a in element(), b in element()) {
            prop_assume!(!b.is_zero());
            prop_assert_eq!((a * b).field_div(&b), a);
        }

        #[test]
        fn field_pow_adds_exponents(a in element(), m in 0u64..1000, n in 0u64..1000) {
            prop_assert_eq!(a.pow(m) * a.pow(n), a.pow(m + n));
        }

        #[test]
        fn field_from_i64_is_additive(m in -100_000i64..100_000, n in -100_000i64..100_000) {
            prop_assert_eq!(F::from_i64(m) + F::from_i64(n), F::from_i64(m + n));
        }

        #[test]
        fn field_sqrt_agrees_with_oracle(a in element()) {
            match a.sqrt() {
                Some(r) => prop_assert_eq!(r * r, a),
                None => prop_assert!(!a.is_square()),
            }
        }
    }
}
