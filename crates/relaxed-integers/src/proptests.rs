//! Property-based tests for modular arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::Mod998244353 as M;

    fn residue() -> impl Strategy<Value = M> {
        any::<u64>().prop_map(M::new)
    }

    fn nonzero_residue() -> impl Strategy<Value = M> {
        residue().prop_filter("residue must be non-zero", |a| !a.is_zero())
    }

    proptest! {
        #[test]
        fn mod_add_commutative(a in residue(), b in residue()) {
            prop_assert_eq!(a + b, b + a);
        }

        #[test]
        fn mod_distributive(a in residue(), b in residue(), c in residue()) {
            prop_assert_eq!(a * (b + c), a * b + a * c);
        }

        #[test]
        fn mod_sub_is_add_neg(a in residue(), b in residue()) {
            prop_assert_eq!(a - b, a + (-b));
        }

        #[test]
        fn mod_inverse(a in nonzero_residue()) {
            let inv = a.inv().unwrap();
            prop_assert!((a * inv).is_one());
        }

        #[test]
        fn mod_signed_matches_negation(x in -1_000_000_000i64..1_000_000_000i64) {
            prop_assert_eq!(M::from_signed(x), -M::from_signed(-x));
        }

        #[test]
        fn mod_sqrt_of_square(a in residue()) {
            let sq = a * a;
            prop_assert!(sq.is_square());
            let root = sq.sqrt().unwrap();
            prop_assert_eq!(root * root, sq);
        }

        #[test]
        fn mod_fermat(a in nonzero_residue()) {
            prop_assert!(a.pow(M::modulus() - 1).is_one());
        }
    }
}
