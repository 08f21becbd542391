//! # relaxed
//!
//! Online formal power series over prime fields.
//!
//! Series are built as lazy coefficient streams inside an arena and
//! evaluated one coefficient at a time. Products are computed with relaxed
//! multiplication, so a series may be defined by an equation that refers to
//! itself, as long as each coefficient depends only on earlier ones.
//!
//! ## Features
//!
//! - **Modular Arithmetic**: word-sized `ModInt<P>` with Tonelli–Shanks roots
//! - **Field Traits**: `Ring`, `Field`, `TwoAdicField`, `SqrtField`
//! - **Block Transforms**: NTT over power-of-two blocks with a shared root table
//! - **Relaxed Series**: inverse, square root, log, exp and integer powers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relaxed::prelude::*;
//!
//! let arena = SeriesArena::<GF998244353>::new();
//! let x = arena.fixed(vec![GF998244353::zero(), GF998244353::one()]);
//! let e = x.exp()?;
//! assert_eq!(e.coeff(2), GF998244353::new(2).inv().unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use relaxed_integers as integers;
pub use relaxed_ntt as ntt;
pub use relaxed_rings as rings;
pub use relaxed_series as series;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use relaxed_integers::{primes, ModInt};
    pub use relaxed_rings::{Field, FiniteField, Ring, SqrtField, TwoAdicField, GF998244353};
    pub use relaxed_series::{EngineConfig, Series, SeriesArena, SeriesError};
}
