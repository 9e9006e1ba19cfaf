//! Error types for Sociogram operations.
//!
//! This module provides the main error type [`SociogramError`] which wraps
//! the error conditions that can occur while building the schema graph,
//! calculating the layout, or exporting the diagram.

use std::io;

use thiserror::Error;

use sociogram_core::error::SchemaError;

/// The main error type for Sociogram operations.
#[derive(Debug, Error)]
pub enum SociogramError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported output format `{0}`")]
    UnsupportedFormat(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for SociogramError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
