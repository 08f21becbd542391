//! Property-based tests for block transforms.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::BlockTransform;
    use relaxed_rings::{Ring, GF998244353 as F};

    // Strategy for generating a block of length 2^log
    fn block(log: u32) -> impl Strategy<Value = Vec<F>> {
        proptest::collection::vec(any::<u64>().prop_map(F::new), 1usize << log)
    }

    fn sized_block() -> impl Strategy<Value = Vec<F>> {
        (0u32..=7).prop_flat_map(block)
    }

    fn linear_naive(a: &[F], b: &[F]) -> Vec<F> {
        let mut out = vec![F::zero(); a.len() + b.len()];
        for (i, x) in a.iter().enumerate() {
            for (j, y) in b.iter().enumerate() {
                out[i + j] = out[i + j] + *x * *y;
            }
        }
        out
    }

    proptest! {
        #[test]
        fn transform_roundtrip(a in sized_block()) {
            let transform = BlockTransform::new();
            let mut b = a.clone();
            transform.forward(&mut b);
            transform.inverse(&mut b);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn transform_is_linear(a in block(5), b in block(5), c in any::<u64>()) {
            let transform = BlockTransform::new();
            let c = F::new(c);

            let mut combined: Vec<F> = a.iter().zip(&b).map(|(x, y)| *x * c + *y).collect();
            let mut fa = a.clone();
            let mut fb = b.clone();
            transform.forward(&mut combined);
            transform.forward(&mut fa);
            transform.forward(&mut fb);

            let expected: Vec<F> = fa.iter().zip(&fb).map(|(x, y)| *x * c + *y).collect();
            prop_assert_eq!(combined, expected);
        }

        #[test]
        fn zero_padded_product_is_linear_convolution(a in block(4), b in block(4)) {
            let transform = BlockTransform::new();
            let len = a.len() * 2;

            let mut fa = a.clone();
            let mut fb = b.clone();
            fa.resize(len, F::zero());
            fb.resize(len, F::zero());
            transform.forward(&mut fa);
            transform.forward(&mut fb);
            let mut prod: Vec<F> = fa.iter().zip(&fb).map(|(x, y)| *x * *y).collect();
            transform.inverse(&mut prod);

            prop_assert_eq!(prod, linear_naive(&a, &b));
        }
    }
}
