//! Errors raised by the series engine.
//!
//! Every variant is a caller-contract violation. Operations that can detect
//! a violation while a series is being *constructed* return it as an `Err`;
//! violations discovered while coefficients are being *evaluated* panic with
//! the variant's message, since a half-finished evaluation would leave stale
//! entries in the memoized caches of every dependent series.

use thiserror::Error;

use crate::handle::NodeId;

/// The three families of contract violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An algebraic operation was applied outside its domain.
    PreconditionViolation,
    /// A coefficient was requested that can never be resolved.
    UnresolvedReference,
    /// The shape of the series graph or of an input was misused.
    StructuralViolation,
}

/// Errors that can occur while building or driving series.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("constant term is not invertible")]
    NonInvertibleConstant,

    #[error("leading coefficient is not a square in the coefficient field")]
    NonSquareConstant,

    #[error("logarithm requires constant term 1")]
    LogConstantNotOne,

    #[error("exponential requires constant term 0")]
    ExpConstantNotZero,

    #[error("negative power of a series with valuation {valuation}")]
    NegativePowerOfNonUnit { valuation: usize },

    #[error("square root needs 2 to be invertible in the coefficient field")]
    CharacteristicTwo,

    #[error("scalar divisor is zero")]
    ZeroDivisor,

    #[error("placeholder {node} read before being bound")]
    UnboundPlaceholder { node: NodeId },

    #[error("coefficient {index} of {node} depends on itself")]
    Cycle { node: NodeId, index: usize },

    #[error("placeholder {node} is already bound")]
    AlreadyBound { node: NodeId },

    #[error("placeholder {node} cannot be bound to itself")]
    SelfBinding { node: NodeId },

    #[error("{node} is a {kind} stream, not a placeholder")]
    NotAPlaceholder { node: NodeId, kind: &'static str },

    #[error("{node} is a {kind} stream, not an input")]
    NotAnInput { node: NodeId, kind: &'static str },

    #[error("index {index} is outside the {len} slots of input {node}")]
    InputOutOfRange { node: NodeId, index: usize, len: usize },

    #[error("coefficient {index} of input {node} is already materialized")]
    AlreadyMaterialized { node: NodeId, index: usize },

    #[error("series belong to different arenas")]
    ArenaMismatch,
}

impl SeriesError {
    /// Classifies the violation.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NonInvertibleConstant
            | Self::NonSquareConstant
            | Self::LogConstantNotOne
            | Self::ExpConstantNotZero
            | Self::NegativePowerOfNonUnit { .. }
            | Self::CharacteristicTwo
            | Self::ZeroDivisor => ErrorKind::PreconditionViolation,
            Self::UnboundPlaceholder { .. } | Self::Cycle { .. } => ErrorKind::UnresolvedReference,
            Self::AlreadyBound { .. }
            | Self::SelfBinding { .. }
            | Self::NotAPlaceholder { .. }
            | Self::NotAnInput { .. }
            | Self::InputOutOfRange { .. }
            | Self::AlreadyMaterialized { .. }
            | Self::ArenaMismatch => ErrorKind::StructuralViolation,
        }
    }
}

/// Result alias for series operations.
pub type Result<T> = std::result::Result<T, SeriesError>;
