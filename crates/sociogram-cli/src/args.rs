//! Command-line argument definitions for the Sociogram CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the output path, configuration file
//! selection, and logging verbosity. There is no input argument: the
//! schema being rendered is the built-in social-network model.

use clap::Parser;

/// Command-line arguments for the Sociogram diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output diagram file (.png, .svg, or .dot)
    #[arg(short, long, default_value = "diagram.png")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_is_diagram_png() {
        let args = Args::parse_from(["sociogram"]);

        assert_eq!(args.output, "diagram.png");
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
    }

    #[test]
    fn test_output_override() {
        let args = Args::parse_from(["sociogram", "--output", "schema.svg"]);

        assert_eq!(args.output, "schema.svg");
    }
}
