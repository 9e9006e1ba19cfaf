//! CLI logic for the Sociogram diagram tool.
//!
//! Builds the social-network schema and renders it to the output file in
//! one shot. There is no watch mode and no retry: the export either
//! succeeds or the error propagates to the process.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use sociogram::{DiagramBuilder, SociogramError, social_network};

/// Run the Sociogram CLI application
///
/// This function builds the social-network schema and exports its diagram
/// to the output file, with the format chosen by extension.
///
/// # Errors
///
/// Returns `SociogramError` for:
/// - Configuration loading errors
/// - Schema validation errors
/// - Layout or rendering errors
/// - File I/O errors (including a missing Graphviz `dot` binary for PNG output)
pub fn run(args: &Args) -> Result<(), SociogramError> {
    info!(output_path = args.output; "Rendering social-network schema");

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Declare the schema and export its diagram
    let schema = social_network();
    let builder = DiagramBuilder::new(app_config);
    builder.render_to_file(&schema, &args.output)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}
