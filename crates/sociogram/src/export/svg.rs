//! SVG rendering of the diagram layout.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{
    Document,
    node::element::{Definitions, Group, Marker, Path, Rectangle, Text},
};

use sociogram_core::{
    color::Color,
    geometry::{Point, Size},
};

use crate::{
    config::StyleConfig,
    export,
    layout::{EdgeRoute, EdgeShape, Layout, TableBox},
};

const MARGIN: f32 = 50.0;
const ARROW_MARKER_ID: &str = "fk-arrow";
const ROW_TEXT_INSET: f32 = 8.0;
const CARDINALITY_OFFSET: f32 = 10.0;
const LOOP_EXTENT: f32 = 42.0;

/// SVG exporter writing to a single output file.
pub struct Svg {
    file_name: String,
    style: StyleConfig,
}

/// Renders the layout into an SVG document.
///
/// # Errors
///
/// Returns [`export::Error::Render`] when a configured color string
/// cannot be parsed.
pub fn render_document(
    layout: &Layout<'_>,
    style: &StyleConfig,
) -> Result<Document, export::Error> {
    let background = style.background_color().map_err(export::Error::Render)?;
    let header = style
        .header_color()
        .map_err(export::Error::Render)?
        .unwrap_or_else(|| Color::new("lightsteelblue").expect("named CSS color parses"));

    let dimensions = svg_dimensions(layout.size());
    debug!(
        width = dimensions.width(),
        height = dimensions.height();
        "SVG dimensions calculated"
    );

    let mut doc = Document::new()
        .set("viewBox", (0.0, 0.0, dimensions.width(), dimensions.height()))
        .set("width", dimensions.width())
        .set("height", dimensions.height())
        .add(arrow_definitions());

    if let Some(background) = background {
        doc = doc.add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", background.to_string()),
        );
    }

    let mut root = Group::new()
        .set("transform", format!("translate({MARGIN}, {MARGIN})"))
        .set("font-family", "Arial, Helvetica, sans-serif");

    for edge in layout.edges() {
        root = root.add(render_edge(edge, style));
    }
    for table in layout.tables() {
        root = root.add(render_table(table, &header, style));
    }

    Ok(doc.add(root))
}

impl Svg {
    pub fn new(file_name: &str, style: &StyleConfig) -> Self {
        Self {
            file_name: file_name.to_string(),
            style: style.clone(),
        }
    }

    /// Writes an SVG document to the output file.
    pub fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Creating SVG file");
        let f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_layout(&self, layout: &Layout<'_>) -> Result<(), export::Error> {
        let doc = render_document(layout, &self.style)?;
        debug!("SVG document rendered");

        self.write_document(doc)
    }
}

/// Renders one entity as a bordered box with a title band and one row per
/// column.
fn render_table(table: &TableBox<'_>, header: &Color, style: &StyleConfig) -> Group {
    let bounds = table.bounds();
    let title_px = font_px(style.title_font_size());
    let row_px = font_px(style.row_font_size());

    let mut group = Group::new()
        .add(
            Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("fill", "white")
                .set("stroke", "#333")
                .set("stroke-width", 1),
        )
        .add(
            Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", table.header_height())
                .set("fill", header.to_string())
                .set("stroke", "#333")
                .set("stroke-width", 1),
        )
        .add(
            Text::new(table.entity().name().resolve())
                .set("x", bounds.center().x())
                .set("y", bounds.min_y() + table.header_height() / 2.0)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "central")
                .set("font-size", title_px)
                .set("font-weight", "bold"),
        );

    for (row_index, row) in table.rows().enumerate() {
        let row_top =
            bounds.min_y() + table.header_height() + row_index as f32 * table.row_height();

        group = group.add(
            Text::new(row)
                .set("x", bounds.min_x() + ROW_TEXT_INSET)
                .set("y", row_top + table.row_height() / 2.0)
                .set("dominant-baseline", "central")
                .set("font-size", row_px),
        );
    }

    group
}

/// Renders one foreign-key edge: the path, its cardinality markers, and
/// the column-name label.
fn render_edge(edge: &EdgeRoute, style: &StyleConfig) -> Group {
    let data = match edge.shape() {
        EdgeShape::Straight => straight_path_data(edge.from(), edge.to()),
        EdgeShape::Loop => loop_path_data(edge.from(), edge.to()),
    };

    let label_anchor = match edge.shape() {
        EdgeShape::Straight => edge.from().midpoint(edge.to()),
        EdgeShape::Loop => Point::new(
            edge.from().x() + LOOP_EXTENT,
            edge.from().midpoint(edge.to()).y(),
        ),
    };
    let row_px = font_px(style.row_font_size());

    Group::new()
        .add(
            Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke", "#333")
                .set("stroke-width", 1)
                .set("marker-end", format!("url(#{ARROW_MARKER_ID})")),
        )
        .add(
            Text::new(edge.source_cardinality())
                .set("x", toward(edge.from(), edge.to(), CARDINALITY_OFFSET).x())
                .set("y", toward(edge.from(), edge.to(), CARDINALITY_OFFSET).y() - 3.0)
                .set("font-size", row_px),
        )
        .add(
            Text::new(edge.target_cardinality())
                .set("x", toward(edge.to(), edge.from(), CARDINALITY_OFFSET).x())
                .set("y", toward(edge.to(), edge.from(), CARDINALITY_OFFSET).y() - 3.0)
                .set("font-size", row_px),
        )
        .add(
            Text::new(edge.label().to_string())
                .set("x", label_anchor.x() + 4.0)
                .set("y", label_anchor.y() - 4.0)
                .set("font-size", row_px)
                .set("fill", "#555"),
        )
}

/// Optimal document size for the given content size, with a margin on all
/// sides.
fn svg_dimensions(content: Size) -> Size {
    Size::new(
        MARGIN.mul_add(2.0, content.width()),
        MARGIN.mul_add(2.0, content.height()),
    )
}

/// Arrowhead marker referenced by every edge path.
fn arrow_definitions() -> Definitions {
    Definitions::new().add(
        Marker::new()
            .set("id", ARROW_MARKER_ID)
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 7)
            .set("markerHeight", 7)
            .set("orient", "auto-start-reverse")
            .add(Path::new().set("d", "M 0 0 L 10 5 L 0 10 z").set("fill", "#333")),
    )
}

fn font_px(font_size: usize) -> f32 {
    font_size as f32 * 1.33
}

/// Create a path data string from two points
fn straight_path_data(start: Point, end: Point) -> String {
    format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
}

/// Create a cubic path bulging to the right of the border, for
/// self-referential edges
fn loop_path_data(start: Point, end: Point) -> String {
    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        start.x(),
        start.y(),
        start.x() + LOOP_EXTENT,
        start.y(),
        end.x() + LOOP_EXTENT,
        end.y(),
        end.x(),
        end.y()
    )
}

/// A point `distance` along the segment from `a` toward `b`.
fn toward(a: Point, b: Point, distance: f32) -> Point {
    let delta = b.sub_point(a);
    let length = delta.hypot();
    if length < 0.001 {
        return a;
    }

    Point::new(
        a.x() + delta.x() / length * distance,
        a.y() + delta.y() / length * distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_path_data() {
        let data = straight_path_data(Point::new(0.0, 1.0), Point::new(2.0, 3.0));

        assert_eq!(data, "M 0 1 L 2 3");
    }

    #[test]
    fn test_loop_path_bulges_right() {
        let data = loop_path_data(Point::new(10.0, 0.0), Point::new(10.0, 20.0));

        assert!(data.starts_with("M 10 0 C 52 0"));
    }

    #[test]
    fn test_toward_walks_along_segment() {
        let point = toward(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 3.0);

        assert_eq!(point, Point::new(3.0, 0.0));
    }

    #[test]
    fn test_svg_dimensions_add_margins() {
        let dims = svg_dimensions(Size::new(100.0, 40.0));

        assert_eq!(dims, Size::new(200.0, 140.0));
    }
}
