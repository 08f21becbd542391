//! Number Theoretic Transform (NTT) over power-of-two blocks.
//!
//! NTT is the finite field analog of FFT, enabling exact O(n log n)
//! block multiplication without floating-point errors.
//!
//! The forward transform is decimation-in-frequency (natural order in,
//! bit-reversed order out) and the inverse is decimation-in-time on
//! bit-reversed input. Spectra are therefore only meaningful to each other:
//! multiply them pointwise and invert, never index them as evaluations.

use std::cell::RefCell;

use relaxed_rings::TwoAdicField;
use tracing::trace;

/// In-place forward/inverse transform with an owned root-of-unity table.
///
/// The table is grow-only: entry `s + i` holds `ω_s^i` for every power of
/// two `s` reached so far, where `ω_s` is a primitive `s`-th root of unity.
/// Requests for a shorter block reuse the existing entries.
#[derive(Debug)]
pub struct BlockTransform<F> {
    roots: RefCell<Vec<F>>,
}

impl<F: TwoAdicField> Default for BlockTransform<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: TwoAdicField> BlockTransform<F> {
    /// Creates a transform with an empty root table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roots: RefCell::new(vec![F::zero(), F::one()]),
        }
    }

    /// Returns true if blocks of length `len` can be transformed.
    #[must_use]
    pub fn supports(len: usize) -> bool {
        len.is_power_of_two() && len.trailing_zeros() <= F::two_adicity()
    }

    /// Largest supported block length.
    #[must_use]
    pub fn max_len() -> usize {
        let log = F::two_adicity().min(usize::BITS - 1);
        1 << log
    }

    /// Number of cached root entries.
    #[must_use]
    pub fn table_len(&self) -> usize {
        self.roots.borrow().len()
    }

    /// Computes the forward transform in place.
    ///
    /// The output is in bit-reversed order.
    ///
    /// # Panics
    ///
    /// Panics if the length is not a power of two or exceeds the field's
    /// two-adic capacity.
    pub fn forward(&self, a: &mut [F]) {
        let n = a.len();
        self.reserve(n);
        let roots = self.roots.borrow();

        let mut half = n / 2;
        while half >= 1 {
            let twiddles = &roots[2 * half..3 * half];
            for block in a.chunks_exact_mut(2 * half) {
                let (lo, hi) = block.split_at_mut(half);
                for ((x, y), w) in lo.iter_mut().zip(hi.iter_mut()).zip(twiddles) {
                    let u = x.clone();
                    let v = y.clone();
                    *x = u.clone() + v.clone();
                    *y = (u - v) * w.clone();
                }
            }
            half /= 2;
        }
    }

    /// Computes the inverse transform in place.
    ///
    /// Expects bit-reversed input as produced by [`BlockTransform::forward`].
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`BlockTransform::forward`].
    pub fn inverse(&self, a: &mut [F]) {
        let n = a.len();
        self.reserve(n);

        {
            let roots = self.roots.borrow();
            let mut half = 1;
            while half < n {
                let twiddles = &roots[2 * half..3 * half];
                for block in a.chunks_exact_mut(2 * half) {
                    let (lo, hi) = block.split_at_mut(half);
                    for ((x, y), w) in lo.iter_mut().zip(hi.iter_mut()).zip(twiddles) {
                        let u = x.clone();
                        let v = y.clone() * w.clone();
                        *x = u.clone() + v.clone();
                        *y = u - v;
                    }
                }
                half *= 2;
            }
        }

        // Two forward passes give n * a[-k]; undo the reflection and the scale.
        a[1..].reverse();
        let n_inv = F::from_u64(n as u64)
            .inv()
            .expect("block length is invertible below the characteristic");
        for x in a.iter_mut() {
            *x = x.clone() * n_inv.clone();
        }
    }

    /// Makes sure the root table covers blocks of length `len`.
    fn reserve(&self, len: usize) {
        assert!(
            len.is_power_of_two(),
            "transform length {len} is not a power of two"
        );
        assert!(
            len.trailing_zeros() <= F::two_adicity(),
            "transform length {len} exceeds the field's two-adic capacity 2^{}",
            F::two_adicity()
        );

        let mut roots = self.roots.borrow_mut();
        while roots.len() < 2 * len {
            let s = roots.len();
            let w = F::root_of_unity(s.trailing_zeros())
                .expect("root order was checked against the two-adicity");

            roots.reserve(s);
            for i in s..2 * s {
                let next = if i & 1 == 1 {
                    roots[i / 2].clone() * w.clone()
                } else {
                    roots[i / 2].clone()
                };
                roots.push(next);
            }
            trace!(entries = 2 * s, "grew root-of-unity table");
        }
    }
}
