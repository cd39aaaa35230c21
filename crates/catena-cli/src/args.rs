//! Command-line argument definitions for the Catena CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global arguments control the output path, configuration
//! file selection, and logging verbosity; the [`Command`] selects what to
//! build.

use clap::{Parser, Subcommand};

use catena::selector::DiagramKind;
use catena_core::geometry::Point;

/// Command-line arguments for the Catena diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Write to this file instead of standard output
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// What to build.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Build a morphism arrow as an SVG fragment
    Arrow {
        /// Start point as `X,Y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Point,

        /// End point as `X,Y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point,

        /// Label drawn beside the arrow
        #[arg(long)]
        label: Option<String>,

        /// Draw a quadratic curve instead of a straight line
        #[arg(long)]
        curved: bool,

        /// Bend of a curved arrow, relative to its length
        #[arg(long, allow_hyphen_values = true)]
        curvature: Option<f32>,
    },

    /// Build a category object node as an SVG fragment
    Node {
        /// Center as `X,Y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        at: Point,

        /// Object label
        #[arg(long)]
        label: String,
    },

    /// Build the shared arrowhead marker definition
    Marker,

    /// Print the animation schedule composed for a sample diagram
    Plan {
        /// Diagram kind (commutative, functor, natural-transformation, monad,
        /// adjunction, composition)
        kind: DiagramKind,

        /// Number of paths (commutative) or components (natural
        /// transformation) in the sample
        #[arg(long, default_value_t = 3)]
        paths: usize,

        /// Number of labels in a commutative sample
        #[arg(long, default_value_t = 2)]
        labels: usize,

        /// Leave out an optional part, by its class name
        #[arg(long = "missing", value_name = "PART")]
        missing: Vec<String>,
    },
}

/// Parses a point written as `X,Y`.
pub fn parse_point(input: &str) -> Result<Point, String> {
    let (x, y) = input
        .split_once(',')
        .ok_or_else(|| format!("expected `X,Y`, got `{input}`"))?;
    let coordinate = |value: &str| {
        value
            .trim()
            .parse::<f32>()
            .map_err(|err| format!("invalid coordinate `{}`: {err}", value.trim()))
    };
    Ok(Point::new(coordinate(x)?, coordinate(y)?))
}
