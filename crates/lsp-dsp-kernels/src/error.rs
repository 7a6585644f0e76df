// SPDX-License-Identifier: LGPL-3.0-or-later

//! Error types.
//!
//! Kernels themselves never fail. Errors only surface while binding the
//! dispatch table, parsing configuration, or building bitmap views.

use thiserror::Error;

/// Failure to bind the dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No variant of the primitive, not even the reference, qualifies.
    #[error("no qualifying implementation for primitive `{primitive}`")]
    NoVariant { primitive: &'static str },

    /// The process-wide table has already been bound.
    #[error("dispatch table is already initialized")]
    AlreadyInitialized,
}

/// Invalid dispatch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown CPU feature name `{0}`")]
    UnknownFeature(String),
}

/// Invalid bitmap geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitmapError {
    #[error("row stride {stride} is smaller than the {needed} bytes a row needs")]
    StrideTooSmall { stride: usize, needed: usize },

    #[error("bitmap needs {needed} bytes but the buffer holds {len}")]
    BufferTooSmall { len: usize, needed: usize },
}
