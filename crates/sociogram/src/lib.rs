//! Sociogram - a social-network relational schema with ER diagram export.
//!
//! The crate declares a minimal social-network schema (users, followers,
//! posts, media, comments) as explicit metadata and renders it as an
//! entity-relationship diagram: graph construction, table layout, and
//! SVG or Graphviz export.

pub mod config;
pub mod export;
pub mod layout;
pub mod model;
pub mod structure;

mod error;

pub use sociogram_core::{color, error as schema_error, geometry, identifier, schema};

pub use error::SociogramError;
pub use model::{MediaType, social_network};

use log::{debug, info};

use sociogram_core::schema::Schema;

use config::AppConfig;
use export::Exporter;
use structure::SchemaGraph;

/// Builder for validating and rendering schema diagrams.
///
/// This provides an API for processing a [`Schema`] through validation,
/// graph construction, layout, and rendering stages.
///
/// # Examples
///
/// ```rust,no_run
/// use sociogram::{DiagramBuilder, config::AppConfig, social_network};
///
/// let schema = social_network();
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = DiagramBuilder::new(config);
///
/// // Render the schema to an SVG string
/// let svg = builder.render_svg(&schema)
///     .expect("Failed to render");
///
/// // Or write a file, format chosen by extension
/// builder.render_to_file(&schema, "diagram.svg")
///     .expect("Failed to export");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Validate a schema and build its graph.
    ///
    /// # Errors
    ///
    /// Returns [`SociogramError`] for validation or graph-construction
    /// errors.
    pub fn graph<'a>(&self, schema: &'a Schema) -> Result<SchemaGraph<'a>, SociogramError> {
        info!(schema = schema.name().resolve(); "Building schema graph");

        let graph = SchemaGraph::from_schema(schema)?;

        debug!("Schema graph built successfully");
        Ok(graph)
    }

    /// Render a schema to an SVG string.
    ///
    /// This runs the full pipeline - validation, graph construction,
    /// layout, and SVG rendering - without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`SociogramError`] for validation, layout, or rendering
    /// errors.
    pub fn render_svg(&self, schema: &Schema) -> Result<String, SociogramError> {
        let graph = self.graph(schema)?;
        let layout = self.layout(&graph);

        let document = export::svg::render_document(&layout, self.config.style())?;

        info!("SVG rendered successfully");
        Ok(document.to_string())
    }

    /// Render a schema to the given output file.
    ///
    /// The format is chosen by extension: `.svg` renders the built-in
    /// layout, `.png` and `.dot`/`.gv` go through Graphviz (feature
    /// `graphviz`).
    ///
    /// # Errors
    ///
    /// Returns [`SociogramError::UnsupportedFormat`] for unknown
    /// extensions and propagates validation, layout, and export errors.
    pub fn render_to_file(&self, schema: &Schema, path: &str) -> Result<(), SociogramError> {
        let format = export::OutputFormat::from_path(path)
            .ok_or_else(|| SociogramError::UnsupportedFormat(path.to_string()))?;
        info!(output_path = path, format:? = format; "Exporting diagram");

        let graph = self.graph(schema)?;

        match format {
            export::OutputFormat::Svg => {
                let layout = self.layout(&graph);
                export::svg::Svg::new(path, self.config.style()).export_layout(&layout)?;
            }
            #[cfg(feature = "graphviz")]
            export::OutputFormat::Png => {
                export::graphviz::Graphviz::new(path).export_png(&graph)?;
            }
            #[cfg(feature = "graphviz")]
            export::OutputFormat::Dot => {
                export::graphviz::Graphviz::new(path).export_dot(&graph)?;
            }
            #[cfg(not(feature = "graphviz"))]
            export::OutputFormat::Png | export::OutputFormat::Dot => {
                return Err(SociogramError::Export(Box::new(export::Error::Render(
                    format!("{format:?} output requires the `graphviz` feature"),
                ))));
            }
        }

        info!(output_file = path; "Diagram exported successfully");
        Ok(())
    }

    fn layout<'a>(&self, graph: &SchemaGraph<'a>) -> layout::Layout<'a> {
        info!("Calculating layout");
        let mut engine = layout::Engine::new(&self.config);
        let layout = engine.calculate(graph);
        debug!(
            tables = layout.tables().len(),
            edges = layout.edges().len();
            "Layout calculated"
        );

        layout
    }
}
