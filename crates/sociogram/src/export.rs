//! Diagram exporters.
//!
//! The SVG exporter renders the calculated [`Layout`](crate::layout::Layout)
//! directly. The Graphviz exporter (feature `graphviz`) hands the schema
//! graph to the system `dot` binary instead, which does its own layout.

pub mod svg;

#[cfg(feature = "graphviz")]
pub mod graphviz;

use std::path::Path;

use crate::layout::Layout;

/// An exporter that consumes a calculated layout.
pub trait Exporter {
    fn export_layout(&self, layout: &Layout<'_>) -> Result<(), Error>;
}

/// Output formats selectable by target-file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Dot,
}

impl OutputFormat {
    /// Infers the output format from a file path's extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?;

        match extension.to_ascii_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "png" => Some(OutputFormat::Png),
            "dot" | "gv" => Some(OutputFormat::Dot),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path("diagram.svg"), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_path("diagram.png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_path("diagram.DOT"), Some(OutputFormat::Dot));
        assert_eq!(OutputFormat::from_path("out/diagram.gv"), Some(OutputFormat::Dot));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        assert_eq!(OutputFormat::from_path("diagram.pdf"), None);
        assert_eq!(OutputFormat::from_path("diagram"), None);
    }
}
