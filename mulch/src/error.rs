//! Error type shared across the crate.
//!
//! Every failure is a returned value. Parsing recovers from any markup that
//! decodes as UTF-8 (html5ever's error recovery), so the only parse failure
//! mode is undecodable input.

use std::collections::TryReserveError;
use thiserror::Error;

/// Result type alias for mulch operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Markup input was not valid UTF-8.
    #[error("markup is not valid UTF-8 (error at byte {valid_up_to})")]
    InvalidUtf8 {
        /// Length of the valid prefix.
        valid_up_to: usize,
    },

    /// A checked downcast or a kind-specific operation was handed the
    /// wrong node kind.
    #[error("node is not a {expected}")]
    TypeMismatch { expected: &'static str },

    /// Template content materialization is not available in this build
    /// (the `template-content` feature is disabled). Template detection
    /// via tag identity still works.
    #[error("template content materialization is unavailable")]
    TemplateContentUnavailable,

    /// Out of memory while growing a collection. The collection is left
    /// in its prior state.
    #[error("allocation failed")]
    Alloc(#[from] TryReserveError),
}
