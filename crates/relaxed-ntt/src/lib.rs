//! # relaxed-ntt
//!
//! Power-of-two block transforms for the relaxed series engine.
//!
//! This crate provides [`BlockTransform`], an in-place forward/inverse
//! number theoretic transform over any [`relaxed_rings::TwoAdicField`],
//! together with the grow-only root-of-unity table it owns.
//!
//! ## Usage
//!
//! Multiplying two blocks of length `L` means zero-extending both to `2L`,
//! transforming, multiplying pointwise, and inverting:
//!
//! ```rust,ignore
//! let t = BlockTransform::new();
//! t.forward(&mut a);
//! t.forward(&mut b);
//! let mut c: Vec<_> = a.iter().zip(&b).map(|(x, y)| *x * *y).collect();
//! t.inverse(&mut c);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ntt;

#[cfg(test)]
mod proptests;

pub use ntt::BlockTransform;
