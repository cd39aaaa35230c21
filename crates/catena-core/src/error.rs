//! Error types for core parsing operations.

use thiserror::Error;

/// Errors produced while parsing style input.
///
/// Builders never return these; they only surface from explicit parsing
/// entry points such as [`Color::new`](crate::color::Color::new), which the
/// configuration layer uses to validate user input up front.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid color `{input}`: {reason}")]
    InvalidColor { input: String, reason: String },
}
