//! # relaxed-rings
//!
//! Coefficient structures for the relaxed series engine.
//!
//! This crate provides:
//! - Abstract traits: `Ring`, `Field`, `TwoAdicField`, `SqrtField`
//! - A concrete prime field `FiniteField<P>` implementing all of them
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Ring
//!  └── Field
//!       ├── TwoAdicField   (roots of unity for block transforms)
//!       └── SqrtField      (square-root oracle)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod finite_field;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use finite_field::{FiniteField, GF998244353};
pub use traits::{Field, Ring, SqrtField, TwoAdicField};
