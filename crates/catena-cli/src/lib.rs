//! CLI logic for the Catena diagram tool.
//!
//! The binary builds diagram fragments as SVG and previews the animation
//! schedules the orchestrator composes for each diagram kind.

pub mod plan;

mod args;
mod config;
mod error;

pub use args::{Args, Command, parse_point};
pub use config::load_config;
pub use error::CliError;

use std::{
    fs,
    io::{self, Write},
};

use log::{debug, info};

use catena::config::AppConfig;
use catena_core::draw::{
    ArrowStyle, ArrowStyleOverrides, build_arrow, build_arrowhead_marker, build_object_node,
};

use plan::Sample;

/// Run the Catena CLI application
///
/// Loads the configuration, renders the requested command, and writes the
/// result to the output file or standard output.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unknown parts named in a plan request
pub fn run(args: &Args) -> Result<(), CliError> {
    let app_config = config::load_config(args.config.as_ref())?;

    let rendered = render(&args.command, &app_config)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(output_file:% = path; "Output written");
        }
        None => io::stdout().write_all(rendered.as_bytes())?,
    }

    Ok(())
}

/// Renders `command` with the styles from `app_config`.
///
/// # Errors
///
/// Returns error if a plan request names an unknown part.
pub fn render(command: &Command, app_config: &AppConfig) -> Result<String, CliError> {
    debug!(command:?; "Rendering");

    let rendered = match command {
        Command::Arrow {
            from,
            to,
            label,
            curved,
            curvature,
        } => {
            let mut overrides = ArrowStyleOverrides::new();
            if *curved || curvature.is_some() {
                overrides = overrides.with_curved(true);
            }
            if let Some(curvature) = curvature {
                overrides = overrides.with_curvature(*curvature);
            }
            let style =
                ArrowStyle::merged(&app_config.style().arrow_overrides().clone().layered(&overrides));

            let arrow = build_arrow(*from, *to, label.as_deref(), &style);
            info!(
                length = arrow.geometry().arc_length(),
                curved = style.curved();
                "Built arrow"
            );
            arrow.into_group().to_string()
        }
        Command::Node { at, label } => {
            build_object_node(*at, label, &app_config.style().node())
                .into_group()
                .to_string()
        }
        Command::Marker => build_arrowhead_marker().into_definitions().to_string(),
        Command::Plan {
            kind,
            paths,
            labels,
            missing,
        } => {
            let sample = Sample::new(*kind)
                .with_paths(*paths)
                .with_labels(*labels)
                .with_missing(missing.clone());
            return plan::render_plan(&sample);
        }
    };

    Ok(rendered + "\n")
}
