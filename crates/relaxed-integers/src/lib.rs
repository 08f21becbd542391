//! # relaxed-integers
//!
//! Word-sized modular arithmetic for the relaxed series workspace.
//!
//! This crate provides:
//! - Modular integers with a compile-time prime modulus (`ModInt`)
//! - Quadratic residuosity and Tonelli–Shanks square roots
//! - A table of NTT-friendly primes
//!
//! ## Performance Notes
//!
//! - Products go through a `u128` intermediate, so any prime below 2^63 works
//! - Block transforms need a prime whose `p - 1` has a large power-of-two factor

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod modular;

#[cfg(test)]
mod proptests;

pub use modular::{primes, Mod998244353, ModInt};
