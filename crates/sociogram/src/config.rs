//! Configuration types for diagram rendering.
//!
//! This module provides configuration structures that control how the
//! schema diagram is laid out and styled. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Grid placement and spacing of table boxes.
//! - [`StyleConfig`] - Visual styling options such as colors and font sizes.
//!
//! # Example
//!
//! ```
//! # use sociogram::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use sociogram_core::color::Color;

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Grid placement and spacing options for table boxes.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// How many table boxes to place per grid row.
    #[serde(default = "default_tables_per_row")]
    tables_per_row: usize,

    /// Horizontal gap between adjacent table boxes.
    #[serde(default = "default_spacing")]
    horizontal_spacing: f32,

    /// Vertical gap between grid rows.
    #[serde(default = "default_spacing")]
    vertical_spacing: f32,
}

fn default_tables_per_row() -> usize {
    3
}

fn default_spacing() -> f32 {
    70.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tables_per_row: default_tables_per_row(),
            horizontal_spacing: default_spacing(),
            vertical_spacing: default_spacing(),
        }
    }
}

impl LayoutConfig {
    /// Returns how many table boxes are placed per grid row.
    ///
    /// Always at least one, regardless of what the configuration said.
    pub fn tables_per_row(&self) -> usize {
        self.tables_per_row.max(1)
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors that are not set fall back to renderer defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for the diagram, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Fill [`Color`] for the table header band, as a color string.
    #[serde(default)]
    header_color: Option<String>,

    /// Font size for table titles.
    #[serde(default = "default_title_font_size")]
    title_font_size: usize,

    /// Font size for column rows.
    #[serde(default = "default_row_font_size")]
    row_font_size: usize,
}

fn default_title_font_size() -> usize {
    14
}

fn default_row_font_size() -> usize {
    12
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            header_color: None,
            title_font_size: default_title_font_size(),
            row_font_size: default_row_font_size(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        Self::parse_color(self.background_color.as_deref(), "background")
    }

    /// Returns the parsed header [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn header_color(&self) -> Result<Option<Color>, String> {
        Self::parse_color(self.header_color.as_deref(), "header")
    }

    pub fn title_font_size(&self) -> usize {
        self.title_font_size
    }

    pub fn row_font_size(&self) -> usize {
        self.row_font_size
    }

    fn parse_color(value: Option<&str>, which: &str) -> Result<Option<Color>, String> {
        value
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid {which} color in config: {err}"))
    }
}
