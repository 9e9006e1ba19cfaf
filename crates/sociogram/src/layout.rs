//! Table-box layout for the schema diagram.
//!
//! The engine sizes one box per entity (a title band plus one row per
//! column, measured with real font metrics), places the boxes on a grid in
//! declaration order, and routes each foreign-key edge between box
//! borders. Output is deterministic for a given schema and configuration.

mod text;

pub use text::TextMeasurer;

use std::collections::HashMap;

use log::debug;

use sociogram_core::{
    geometry::{Bounds, Insets, Point, Size},
    schema::{Column, Entity},
};

use crate::{
    config::{AppConfig, LayoutConfig, StyleConfig},
    structure::SchemaGraph,
};

const BOX_H_PADDING: f32 = 12.0;
const BOX_V_PADDING: f32 = 6.0;
const ROW_GAP: f32 = 4.0;
const MIN_BOX_WIDTH: f32 = 90.0;
const PARALLEL_EDGE_GAP: f32 = 16.0;
const SELF_LOOP_SPREAD: f32 = 9.0;

/// A positioned table box for one entity.
#[derive(Debug, Clone)]
pub struct TableBox<'a> {
    entity: &'a Entity,
    bounds: Bounds,
    header_height: f32,
    row_height: f32,
    rows: Vec<String>,
}

impl<'a> TableBox<'a> {
    pub fn entity(&self) -> &'a Entity {
        self.entity
    }

    /// Absolute bounds of the whole box.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Height of the title band at the top of the box.
    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    /// Height of one column row.
    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Pre-formatted row labels, one per column, in declaration order.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(String::as_str)
    }
}

/// How an edge should be drawn between its clipped endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeShape {
    Straight,
    /// Self-referential edge looping off one border.
    Loop,
}

/// A routed foreign-key edge with positional information.
#[derive(Debug, Clone)]
pub struct EdgeRoute {
    source_index: usize,
    target_index: usize,
    from: Point,
    to: Point,
    shape: EdgeShape,
    label: String,
}

impl EdgeRoute {
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// Clipped endpoint on the source (child) box border.
    pub fn from(&self) -> Point {
        self.from
    }

    /// Clipped endpoint on the target (parent) box border.
    pub fn to(&self) -> Point {
        self.to
    }

    pub fn shape(&self) -> EdgeShape {
        self.shape
    }

    /// The foreign-key column name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Cardinality marker on the child end.
    pub fn source_cardinality(&self) -> &'static str {
        "*"
    }

    /// Cardinality marker on the parent end.
    pub fn target_cardinality(&self) -> &'static str {
        "1"
    }
}

/// A complete diagram layout: positioned tables plus routed edges.
#[derive(Debug, Clone)]
pub struct Layout<'a> {
    tables: Vec<TableBox<'a>>,
    edges: Vec<EdgeRoute>,
}

impl<'a> Layout<'a> {
    pub fn tables(&self) -> &[TableBox<'a>] {
        &self.tables
    }

    pub fn edges(&self) -> &[EdgeRoute] {
        &self.edges
    }

    pub fn source(&self, edge: &EdgeRoute) -> &TableBox<'a> {
        &self.tables[edge.source_index]
    }

    pub fn target(&self, edge: &EdgeRoute) -> &TableBox<'a> {
        &self.tables[edge.target_index]
    }

    /// Bounding size of all table boxes.
    pub fn size(&self) -> Size {
        let mut tables = self.tables.iter();
        let Some(first) = tables.next() else {
            return Size::default();
        };

        tables
            .fold(first.bounds(), |acc, table| acc.merge(&table.bounds()))
            .to_size()
    }
}

/// Measured dimensions for one table box before placement.
struct SizedTable {
    size: Size,
    header_height: f32,
    row_height: f32,
    rows: Vec<String>,
}

/// Grid layout engine for schema diagrams.
pub struct Engine {
    layout: LayoutConfig,
    style: StyleConfig,
    measurer: TextMeasurer,
}

impl Engine {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            layout: config.layout().clone(),
            style: config.style().clone(),
            measurer: TextMeasurer::new(),
        }
    }

    /// Calculates the diagram layout for a schema graph.
    pub fn calculate<'a>(&mut self, graph: &SchemaGraph<'a>) -> Layout<'a> {
        let tables = self.place_tables(graph);
        let edges = self.route_edges(graph, &tables);

        debug!(
            tables = tables.len(),
            edges = edges.len();
            "Layout calculated"
        );

        Layout { tables, edges }
    }

    /// Sizes each table box and places boxes on the grid in declaration order.
    fn place_tables<'a>(&mut self, graph: &SchemaGraph<'a>) -> Vec<TableBox<'a>> {
        let entities: Vec<&'a Entity> = graph
            .entities_with_indices()
            .map(|(_, entity)| entity)
            .collect();
        let sized: Vec<SizedTable> = entities
            .iter()
            .map(|entity| self.size_table(entity))
            .collect();

        let per_row = self.layout.tables_per_row();
        let mut tables = Vec::with_capacity(sized.len());
        let mut y = 0.0;

        for (grid_row, chunk) in sized.chunks(per_row).enumerate() {
            let grid_row_height = chunk
                .iter()
                .map(|sized| sized.size.height())
                .fold(0.0, f32::max);

            let mut x = 0.0;
            for (offset, sized) in chunk.iter().enumerate() {
                let entity = entities[grid_row * per_row + offset];

                tables.push(TableBox {
                    entity,
                    bounds: Bounds::new(x, y, x + sized.size.width(), y + sized.size.height()),
                    header_height: sized.header_height,
                    row_height: sized.row_height,
                    rows: sized.rows.clone(),
                });

                x += sized.size.width() + self.layout.horizontal_spacing();
            }

            y += grid_row_height + self.layout.vertical_spacing();
        }

        tables
    }

    /// Measures one entity's title and rows and sizes its box.
    fn size_table(&mut self, entity: &Entity) -> SizedTable {
        let padding = Insets::new(BOX_V_PADDING, BOX_H_PADDING, BOX_V_PADDING, BOX_H_PADDING);

        let title = entity.name().resolve();
        let title_size = self
            .measurer
            .measure(&title, self.style.title_font_size());

        let rows: Vec<String> = entity.columns().map(column_row_label).collect();

        let mut max_row_width: f32 = 0.0;
        let mut max_row_height: f32 = 0.0;
        for row in &rows {
            let size = self.measurer.measure(row, self.style.row_font_size());
            max_row_width = max_row_width.max(size.width());
            max_row_height = max_row_height.max(size.height());
        }

        let row_height = max_row_height + ROW_GAP;
        let content = Size::new(
            title_size.width().max(max_row_width),
            title_size.height() + rows.len() as f32 * row_height,
        );
        let padded = content.add_padding(padding);

        SizedTable {
            size: Size::new(padded.width().max(MIN_BOX_WIDTH), padded.height()),
            header_height: title_size.height() + padding.vertical_sum(),
            row_height,
            rows,
        }
    }

    /// Routes each foreign-key edge between clipped box borders.
    ///
    /// Parallel edges between the same pair of tables are fanned out
    /// perpendicular to the connecting line so they stay distinguishable.
    fn route_edges<'a>(
        &self,
        graph: &SchemaGraph<'a>,
        tables: &[TableBox<'a>],
    ) -> Vec<EdgeRoute> {
        let mut pair_totals: HashMap<(usize, usize), usize> = HashMap::new();
        for (source, target, _) in graph.edges_with_endpoints() {
            *pair_totals.entry((source.index(), target.index())).or_default() += 1;
        }

        let mut pair_seen: HashMap<(usize, usize), usize> = HashMap::new();
        graph
            .edges_with_endpoints()
            .map(|(source, target, edge)| {
                // Nodes are added in declaration order and never removed, so
                // the petgraph index doubles as the table index.
                let source_index = source.index();
                let target_index = target.index();
                let ordinal = {
                    let seen = pair_seen.entry((source_index, target_index)).or_default();
                    let ordinal = *seen;
                    *seen += 1;
                    ordinal
                };
                let total = pair_totals[&(source_index, target_index)];

                let label = edge.column().name().resolve();
                if source_index == target_index {
                    return self_loop_route(&tables[source_index], source_index, ordinal, label);
                }

                let source_box = &tables[source_index];
                let target_box = &tables[target_index];
                let offset = fan_offset(
                    source_box.center(),
                    target_box.center(),
                    ordinal,
                    total,
                );

                let from_center = source_box.center().add_point(offset);
                let to_center = target_box.center().add_point(offset);
                let from = clip_to_border(from_center, to_center, source_box.bounds().to_size());
                let to = clip_to_border(to_center, from_center, target_box.bounds().to_size());

                EdgeRoute {
                    source_index,
                    target_index,
                    from,
                    to,
                    shape: EdgeShape::Straight,
                    label,
                }
            })
            .collect()
    }
}

/// Formats a column declaration into a single diagram row.
fn column_row_label(column: &Column) -> String {
    let mut label = format!("{}: {}", column.name(), column.column_type());

    if column.is_primary_key() {
        label.push_str(" [PK]");
    }
    if let Some(fk) = column.foreign_key_ref() {
        label.push_str(&format!(" [FK -> {fk}]"));
    }
    if column.is_nullable() {
        label.push_str(" [NULL]");
    }

    label
}

/// Perpendicular offset that spreads `total` parallel edges around the
/// direct line between two centers.
fn fan_offset(a: Point, b: Point, ordinal: usize, total: usize) -> Point {
    if total <= 1 {
        return Point::default();
    }

    let delta = b.sub_point(a);
    let length = delta.hypot();
    if length < 0.001 {
        return Point::default();
    }

    // Unit normal to the connecting line
    let nx = -delta.y() / length;
    let ny = delta.x() / length;
    let spread = (ordinal as f32 - (total as f32 - 1.0) / 2.0) * PARALLEL_EDGE_GAP;

    Point::new(nx * spread, ny * spread)
}

/// Routes a self-referential edge as a loop off the right border.
fn self_loop_route(table: &TableBox<'_>, index: usize, ordinal: usize, label: String) -> EdgeRoute {
    let bounds = table.bounds();
    let cy = bounds.center().y() + ordinal as f32 * PARALLEL_EDGE_GAP;

    EdgeRoute {
        source_index: index,
        target_index: index,
        from: Point::new(bounds.max_x(), cy - SELF_LOOP_SPREAD),
        to: Point::new(bounds.max_x(), cy + SELF_LOOP_SPREAD),
        shape: EdgeShape::Loop,
        label,
    }
}

/// Finds where the ray from `center` toward `toward` crosses the border of
/// a rectangle of `size` centered at `center`.
///
/// Falls back to `toward` for degenerate inputs (coincident points or a
/// zero-sized rectangle).
fn clip_to_border(center: Point, toward: Point, size: Size) -> Point {
    let delta = toward.sub_point(center);
    let length = delta.hypot();
    if length < 0.001 {
        return toward;
    }

    let dx = delta.x() / length;
    let dy = delta.y() / length;
    let half_w = size.width() / 2.0;
    let half_h = size.height() / 2.0;

    let mut best = f32::INFINITY;

    if dx != 0.0 {
        for edge_x in [half_w, -half_w] {
            let t = edge_x / dx;
            if t > 0.0 && (dy * t).abs() <= half_h {
                best = best.min(t);
            }
        }
    }
    if dy != 0.0 {
        for edge_y in [half_h, -half_h] {
            let t = edge_y / dy;
            if t > 0.0 && (dx * t).abs() <= half_w {
                best = best.min(t);
            }
        }
    }

    if !best.is_finite() {
        return toward;
    }

    Point::new(center.x() + dx * best, center.y() + dy * best)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use sociogram_core::schema::{Column, ColumnType, Schema};

    use super::*;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert_approx_eq!(f32, actual.x(), expected.x());
        assert_approx_eq!(f32, actual.y(), expected.y());
    }

    fn engine() -> Engine {
        Engine::new(&AppConfig::default())
    }

    fn two_table_schema() -> Schema {
        Schema::new("pair")
            .entity(
                Entity::new("user")
                    .column(Column::new("id", ColumnType::Integer).primary_key())
                    .column(Column::new("username", ColumnType::text(30))),
            )
            .entity(
                Entity::new("post")
                    .column(Column::new("id", ColumnType::Integer).primary_key())
                    .column(Column::new("user_id", ColumnType::Integer).foreign_key("user", "id")),
            )
    }

    #[test]
    fn test_clip_toward_right() {
        // Ray from center (100,100) going right should cross the right edge
        let result = clip_to_border(
            Point::new(100.0, 100.0),
            Point::new(200.0, 100.0),
            Size::new(40.0, 40.0),
        );

        assert_point_eq(result, Point::new(120.0, 100.0));
    }

    #[test]
    fn test_clip_toward_top() {
        let result = clip_to_border(
            Point::new(100.0, 100.0),
            Point::new(100.0, 0.0),
            Size::new(40.0, 40.0),
        );

        assert_point_eq(result, Point::new(100.0, 80.0));
    }

    #[test]
    fn test_clip_diagonal_hits_corner() {
        // A 45-degree ray from the center of a square exits at the corner
        let result = clip_to_border(
            Point::new(100.0, 100.0),
            Point::new(200.0, 200.0),
            Size::new(40.0, 40.0),
        );

        assert_point_eq(result, Point::new(120.0, 120.0));
    }

    #[test]
    fn test_clip_coincident_points_falls_back() {
        let b = Point::new(100.0, 100.0);

        let result = clip_to_border(Point::new(100.0, 100.0), b, Size::new(40.0, 40.0));

        assert_point_eq(result, b);
    }

    #[test]
    fn test_clip_zero_size_falls_back() {
        let b = Point::new(200.0, 100.0);

        let result = clip_to_border(Point::new(100.0, 100.0), b, Size::new(0.0, 0.0));

        assert_point_eq(result, b);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let schema = two_table_schema();
        let graph = SchemaGraph::from_schema(&schema).expect("schema is valid");

        let first = engine().calculate(&graph);
        let second = engine().calculate(&graph);

        assert_eq!(first.tables().len(), second.tables().len());
        for (a, b) in first.tables().iter().zip(second.tables()) {
            assert_point_eq(a.center(), b.center());
        }
    }

    #[test]
    fn test_tables_do_not_overlap() {
        let schema = two_table_schema();
        let graph = SchemaGraph::from_schema(&schema).expect("schema is valid");

        let layout = engine().calculate(&graph);
        let [user, post] = layout.tables() else {
            panic!("expected two tables");
        };

        // Same grid row, laid out left to right with a gap.
        assert!(post.bounds().min_x() > user.bounds().max_x());
    }

    #[test]
    fn test_edge_endpoints_sit_between_boxes() {
        let schema = two_table_schema();
        let graph = SchemaGraph::from_schema(&schema).expect("schema is valid");

        let layout = engine().calculate(&graph);
        let [edge] = layout.edges() else {
            panic!("expected one edge");
        };

        assert_eq!(edge.shape(), EdgeShape::Straight);
        assert_eq!(edge.label(), "user_id");
        // Child endpoint on the post box border, parent endpoint on user.
        let source = layout.source(edge).bounds();
        let target = layout.target(edge).bounds();
        assert_approx_eq!(f32, edge.from().x(), source.min_x());
        assert_approx_eq!(f32, edge.to().x(), target.max_x());
    }

    #[test]
    fn test_empty_layout_has_zero_size() {
        let schema = Schema::new("empty");
        let graph = SchemaGraph::from_schema(&schema).expect("schema is valid");

        let layout = engine().calculate(&graph);

        assert!(layout.size().is_zero());
        assert!(layout.tables().is_empty());
        assert!(layout.edges().is_empty());
    }

    #[test]
    fn test_parallel_edges_are_fanned_apart() {
        let schema = Schema::new("social")
            .entity(Entity::new("user").column(Column::new("id", ColumnType::Integer).primary_key()))
            .entity(
                Entity::new("followers")
                    .column(Column::new("id", ColumnType::Integer).primary_key())
                    .column(
                        Column::new("follower_id", ColumnType::Integer).foreign_key("user", "id"),
                    )
                    .column(
                        Column::new("followee_id", ColumnType::Integer).foreign_key("user", "id"),
                    ),
            );
        let graph = SchemaGraph::from_schema(&schema).expect("schema is valid");

        let layout = engine().calculate(&graph);
        let [first, second] = layout.edges() else {
            panic!("expected two edges");
        };

        // Two foreign keys into the same table must not collapse onto one line.
        assert!(first.from() != second.from());
        assert!(first.to() != second.to());
    }

    #[test]
    fn test_column_row_label_markers() {
        let pk = Column::new("id", ColumnType::Integer).primary_key();
        let fk = Column::new("user_id", ColumnType::Integer).foreign_key("user", "id");
        let plain = Column::new("email", ColumnType::text(320));

        assert_eq!(column_row_label(&pk), "id: integer [PK]");
        assert_eq!(column_row_label(&fk), "user_id: integer [FK -> user.id]");
        assert_eq!(column_row_label(&plain), "email: text(320)");
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (0.0f32..1000.0, 0.0f32..1000.0).prop_map(|(w, h)| Size::new(w, h))
    }

    /// The clipped point always has finite coordinates (no NaN or infinity).
    fn check_clip_result_is_finite(
        center: Point,
        toward: Point,
        size: Size,
    ) -> Result<(), TestCaseError> {
        let result = clip_to_border(center, toward, size);

        prop_assert!(result.x().is_finite(), "x is not finite: {}", result.x());
        prop_assert!(result.y().is_finite(), "y is not finite: {}", result.y());
        Ok(())
    }

    /// The clipped point is either on the rectangle border or equal to the
    /// far point (fallback).
    fn check_clip_on_border_or_fallback(
        center: Point,
        toward: Point,
        size: Size,
    ) -> Result<(), TestCaseError> {
        let result = clip_to_border(center, toward, size);

        let half_w = size.width() / 2.0;
        let half_h = size.height() / 2.0;

        let on_left = approx_eq!(f32, result.x(), center.x() - half_w, epsilon = 0.1);
        let on_right = approx_eq!(f32, result.x(), center.x() + half_w, epsilon = 0.1);
        let on_top = approx_eq!(f32, result.y(), center.y() - half_h, epsilon = 0.1);
        let on_bottom = approx_eq!(f32, result.y(), center.y() + half_h, epsilon = 0.1);

        let is_fallback = approx_eq!(f32, result.x(), toward.x(), epsilon = 0.1)
            && approx_eq!(f32, result.y(), toward.y(), epsilon = 0.1);

        prop_assert!(
            on_left || on_right || on_top || on_bottom || is_fallback,
            "Result {result:?} is neither on the border of rect at {center:?} with size {size:?} nor fallback to {toward:?}"
        );
        Ok(())
    }

    proptest! {
        #[test]
        fn clip_result_is_finite(center in point_strategy(), toward in point_strategy(), size in size_strategy()) {
            check_clip_result_is_finite(center, toward, size)?;
        }

        #[test]
        fn clip_on_border_or_fallback(center in point_strategy(), toward in point_strategy(), size in size_strategy()) {
            check_clip_on_border_or_fallback(center, toward, size)?;
        }
    }
}
