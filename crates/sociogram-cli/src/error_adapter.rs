//! Adapts library errors into reportable diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use sociogram::SociogramError;

/// Wrapper giving [`SociogramError`] a [`Diagnostic`] implementation so
/// the CLI can render it with miette's graphical report handler.
#[derive(Debug, Error, Diagnostic)]
#[error("{0}")]
pub struct Reportable(SociogramError);

/// Converts an error into its reportable form.
pub fn to_reportable(err: SociogramError) -> Reportable {
    Reportable(err)
}
