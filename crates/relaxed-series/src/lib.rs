//! # relaxed-series
//!
//! Online (relaxed) formal power series over finite fields.
//!
//! This crate provides:
//! - [`SeriesArena`]: owner of a graph of lazily evaluated coefficient streams
//! - [`Series`]: a handle to one stream, with combinators and operators
//! - Relaxed multiplication: coefficient `n` of a product reads its operands
//!   only up to index `n`, in O(N log² N) total
//! - Self-referential definitions through placeholders, and the operations
//!   built on them: inverse, square root, logarithm, exponential, powers
//! - Reclamation of nodes no handle can reach, cycles included
//!
//! ## Example
//!
//! ```rust,ignore
//! use relaxed_rings::{Ring, GF998244353 as F};
//! use relaxed_series::SeriesArena;
//!
//! let arena = SeriesArena::<F>::new();
//! let x = arena.monomial(F::one(), 1);
//!
//! // Catalan numbers: C = 1 + x C²
//! let c = arena.placeholder();
//! c.bind(&(&arena.constant(F::one()) + &(&x * &c.square())))?;
//! assert_eq!(c.coeff(4), F::new(14));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod algebra;
pub mod arena;
pub mod config;
pub mod error;
pub mod handle;
mod mul;
mod node;
mod ops;
pub mod series;

#[cfg(test)]
mod proptests;

pub use arena::SeriesArena;
pub use config::EngineConfig;
pub use error::{ErrorKind, Result, SeriesError};
pub use handle::NodeId;
pub use series::{Series, SeriesCoeff};
