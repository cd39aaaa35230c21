//! Errors reported by the CLI.

use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use catena::{CatenaError, selector::DiagramKind};

/// Anything that can stop the CLI.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(catena::io))]
    Io(#[from] io::Error),

    #[error("Missing configuration file: {}", .0.display())]
    #[diagnostic(
        code(catena::config::missing),
        help("check the path passed to --config")
    )]
    MissingConfig(PathBuf),

    #[error("Failed to parse TOML configuration {}: {message}", path.display())]
    #[diagnostic(code(catena::config::parse))]
    ConfigParse { path: PathBuf, message: String },

    #[error(transparent)]
    #[diagnostic(code(catena::setup))]
    Catena(#[from] CatenaError),

    #[error("`{part}` is not an optional part of a {kind} diagram")]
    #[diagnostic(code(catena::plan::part), help("{expected}"))]
    UnknownPart {
        kind: DiagramKind,
        part: String,
        expected: String,
    },
}
