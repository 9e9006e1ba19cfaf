//! DOT translation and Graphviz-backed export.
//!
//! Available behind the `graphviz` feature. PNG output shells out to the
//! system `dot` binary; a missing binary surfaces as an I/O export error.

use std::fs;

use dot_generator::*;
use dot_structures::*;
use graphviz_rust::{
    cmd::{CommandArg, Format},
    exec, print,
    printer::PrinterContext,
};
use log::{debug, error, info};

use sociogram_core::schema::Entity;

use crate::{export, structure::SchemaGraph};

/// Graphviz exporter writing to a single output file.
pub struct Graphviz {
    file_name: String,
}

impl Graphviz {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
        }
    }

    /// Renders the schema graph to PNG through the system `dot` binary.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Io`] when `dot` is missing or fails, and
    /// propagates the underlying error unchanged.
    pub fn export_png(&self, graph: &SchemaGraph<'_>) -> Result<(), export::Error> {
        let dot_graph = to_dot_graph(graph);
        info!(file_name = self.file_name; "Invoking Graphviz");

        if let Err(err) = exec(
            dot_graph,
            &mut PrinterContext::default(),
            vec![
                CommandArg::Format(Format::Png),
                CommandArg::Output(self.file_name.clone()),
            ],
        ) {
            error!(file_name = self.file_name, err:err; "Graphviz invocation failed");
            return Err(export::Error::Io(err));
        }

        debug!("Graphviz rendered PNG");
        Ok(())
    }

    /// Writes the DOT source of the schema graph to the output file.
    pub fn export_dot(&self, graph: &SchemaGraph<'_>) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Writing DOT file");

        if let Err(err) = fs::write(&self.file_name, to_dot_source(graph)) {
            error!(file_name = self.file_name, err:err; "Failed to write DOT file");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

/// Prints the schema graph as DOT source.
pub fn to_dot_source(graph: &SchemaGraph<'_>) -> String {
    print(to_dot_graph(graph), &mut PrinterContext::default())
}

/// Translates the schema graph into a DOT digraph with one record-shaped
/// node per entity and one labeled edge per foreign key.
fn to_dot_graph(graph: &SchemaGraph<'_>) -> Graph {
    let mut stmts = vec![
        Stmt::Attribute(attr!("rankdir", "LR")),
        Stmt::GAttribute(GraphAttributes::Node(vec![
            attr!("shape", "record"),
            attr!("fontname", "Helvetica"),
        ])),
        Stmt::GAttribute(GraphAttributes::Edge(vec![attr!("fontname", "Helvetica")])),
    ];

    for (_, entity) in graph.entities_with_indices() {
        stmts.push(Stmt::Node(Node {
            id: entity_node_id(&entity.name().resolve()),
            attributes: vec![quoted_attr("label", &record_label(entity))],
        }));
    }

    for (source, target, edge) in graph.edges_with_endpoints() {
        stmts.push(Stmt::Edge(Edge {
            ty: EdgeTy::Pair(
                Vertex::N(entity_node_id(&graph.entity_from_idx(source).name().resolve())),
                Vertex::N(entity_node_id(&graph.entity_from_idx(target).name().resolve())),
            ),
            attributes: vec![
                quoted_attr("label", &edge.column().name().resolve()),
                quoted_attr("taillabel", "*"),
                quoted_attr("headlabel", "1"),
            ],
        }));
    }

    Graph::DiGraph {
        id: quoted_id(&graph.schema().name().resolve()),
        strict: false,
        stmts,
    }
}

/// Record label for one entity: title cell plus one line per column.
fn record_label(entity: &Entity) -> String {
    let mut label = format!("{{{}", escape_record(&entity.name().resolve()));
    label.push('|');

    for column in entity.columns() {
        let mut row = format!("{}: {}", column.name(), column.column_type());
        if column.is_primary_key() {
            row.push_str(" [PK]");
        }
        if let Some(fk) = column.foreign_key_ref() {
            row.push_str(&format!(" [FK: {fk}]"));
        }
        label.push_str(&escape_record(&row));
        // Left-align each row within the record cell
        label.push_str("\\l");
    }

    label.push('}');
    label
}

/// Escapes record-label metacharacters.
fn escape_record(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn entity_node_id(name: &str) -> NodeId {
    NodeId(quoted_id(name), None)
}

fn quoted_id(name: &str) -> Id {
    Id::Escaped(format!("\"{name}\""))
}

/// Attribute whose value is a quoted string.
fn quoted_attr(key: &str, value: &str) -> Attribute {
    Attribute(
        Id::Plain(key.to_string()),
        Id::Escaped(format!("\"{value}\"")),
    )
}
