//! Relaxed (online) multiplication.
//!
//! Coefficient `n` of `A * B` is produced after reading `A` and `B` only up
//! to index `n`, in O(N log² N) total work for the first N coefficients.
//!
//! Every pair `(i, j)` with `i, j >= 1` is charged to exactly one dyadic block
//! product, scheduled so that the block lands in the accumulator no later
//! than when index `i + j` is produced:
//!
//! - at step `n`, for `L = 1, 2, 4, ...` while `2L < n`, the window
//!   `A[n-L, n)` meets `B[L, 2L)` and `A[L, 2L)` meets `B[n-L, n)`, stopping
//!   after the first `L` that divides into `n` at an odd multiple;
//! - when `n > 1` is a power of two, `A[n/2, n)` meets `B[n/2, n)`.
//!
//! The pairs with `i = 0` or `j = 0` are added directly when `n` is produced.
//! A zero constant term on one side means the other side is never read at
//! index `n`, which is what lets a product feed back into its own operand.
//! Index 0 reads the left operand first and skips the right one when the
//! left constant term is zero.
//!
//! # References
//!
//! - van der Hoeven, "Relax, but don't be too lazy" (2002)

use std::cell::RefCell;

use crate::arena::Arena;
use crate::handle::NodeId;
use crate::series::SeriesCoeff;

/// State of one product node.
pub(crate) struct Product<F> {
    pub(crate) lhs: NodeId,
    pub(crate) rhs: NodeId,
    /// Partial sums of `A[i] B[j]` over `i, j >= 1`, indexed by `i + j`.
    acc: RefCell<Vec<F>>,
}

impl<F: SeriesCoeff> Product<F> {
    pub(crate) fn new(lhs: NodeId, rhs: NodeId) -> Self {
        Self {
            lhs,
            rhs,
            acc: RefCell::new(Vec::new()),
        }
    }

    /// Adds `block` into the accumulator starting at index `offset`.
    fn accumulate(&self, offset: usize, block: &[F]) {
        let mut acc = self.acc.borrow_mut();
        let needed = offset + block.len();
        if acc.len() < needed {
            acc.resize(needed.next_power_of_two(), F::zero());
        }
        for (slot, value) in acc[offset..needed].iter_mut().zip(block) {
            *slot = slot.clone() + value.clone();
        }
    }

    fn accumulated(&self, n: usize) -> F {
        self.acc.borrow().get(n).cloned().unwrap_or_else(F::zero)
    }
}

impl<F: SeriesCoeff> Arena<F> {
    /// Coefficient `n` of a product node.
    pub(crate) fn produce_product(&self, product: &Product<F>, n: usize) -> F {
        self.absorb_blocks(product, n);

        let (a, b) = (product.lhs, product.rhs);
        let mut direct = F::zero();
        let a0 = self.coeff(a, 0);
        if !a0.is_zero() {
            direct = direct + a0 * self.coeff(b, n);
        }
        // At n = 0 the term above is the whole product.
        if n > 0 {
            let b0 = self.coeff(b, 0);
            if !b0.is_zero() {
                direct = direct + b0 * self.coeff(a, n);
            }
        }

        product.accumulated(n) + direct
    }

    /// Runs the block products scheduled at step `n`.
    fn absorb_blocks(&self, product: &Product<F>, n: usize) {
        let threshold = self.config.naive_threshold;

        let mut len = 1;
        while 2 * len < n {
            let block = if len <= threshold {
                self.naive_block(product, n, len)
            } else {
                self.transformed_block(product, n, len)
            };
            product.accumulate(n, &block);
            if n & len != 0 {
                break;
            }
            len <<= 1;
        }

        if n > 1 && n.is_power_of_two() {
            let da = self.dif_block(product.lhs, n);
            let db = self.dif_block(product.rhs, n);
            let mut block: Vec<F> = da.iter().zip(db.iter()).map(|(x, y)| x.clone() * y.clone()).collect();
            self.transform.inverse(&mut block);
            product.accumulate(n, &block);
        }
    }

    /// `A[n-L, n) * B[L, 2L) + A[L, 2L) * B[n-L, n)` by schoolbook.
    fn naive_block(&self, product: &Product<F>, n: usize, len: usize) -> Vec<F> {
        let (a, b) = (product.lhs, product.rhs);
        let a_tail = self.range(a, n - len, n);
        let b_tail = self.range(b, n - len, n);
        let a_head = self.range(a, len, 2 * len);
        let b_head = self.range(b, len, 2 * len);

        let mut block = vec![F::zero(); 2 * len - 1];
        for i in 0..len {
            for j in 0..len {
                block[i + j] = block[i + j].clone()
                    + a_tail[i].clone() * b_head[j].clone()
                    + a_head[i].clone() * b_tail[j].clone();
            }
        }
        block
    }

    /// Same block product as [`Arena::naive_block`], through the transform.
    ///
    /// The head blocks come from the operands' dif caches, so only the two
    /// windows are transformed and a single inverse covers both products.
    fn transformed_block(&self, product: &Product<F>, n: usize, len: usize) -> Vec<F> {
        let (a, b) = (product.lhs, product.rhs);

        let mut ta = self.range(a, n - len, n);
        let mut tb = self.range(b, n - len, n);
        ta.resize(2 * len, F::zero());
        tb.resize(2 * len, F::zero());
        self.transform.forward(&mut ta);
        self.transform.forward(&mut tb);

        let da = self.dif_block(a, 2 * len);
        let db = self.dif_block(b, 2 * len);

        let mut block: Vec<F> = (0..2 * len)
            .map(|i| da[i].clone() * tb[i].clone() + db[i].clone() * ta[i].clone())
            .collect();
        self.transform.inverse(&mut block);
        block
    }
}
