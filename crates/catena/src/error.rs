//! Error types for Catena operations.
//!
//! Only setup can fail. Once an [`Orchestration`](crate::Orchestration)
//! exists, every event handler is presentation-safe: missing optional
//! elements are skipped and malformed values degrade visually.

use thiserror::Error;

/// The main error type for Catena operations.
#[derive(Debug, Error)]
pub enum CatenaError {
    /// No animation engine was supplied; diagrams stay static.
    #[error("animation engine is not available, diagrams will stay static")]
    MissingEngine,

    /// The supplied engine cannot provide everything orchestration needs.
    #[error("animation engine lacks required capabilities: {}", .0.join(", "))]
    MissingCapability(Vec<&'static str>),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<catena_core::Error> for CatenaError {
    fn from(error: catena_core::Error) -> Self {
        Self::Config(error.to_string())
    }
}
