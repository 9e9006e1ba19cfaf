//! The schema graph: entities as nodes, foreign keys as edges.
//!
//! [`SchemaGraph`] is the in-memory registry the rest of the pipeline
//! consumes. Construction validates the schema first, so a graph in hand
//! is always referentially well-formed. Edges run child → parent (from the
//! foreign-key column's entity to the referenced entity); self-loops and
//! parallel edges are both meaningful here — a join table with two foreign
//! keys into the same entity produces two parallel edges.

use std::collections::HashMap;

use log::{debug, trace};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use sociogram_core::{
    identifier::Id,
    schema::{Column, Entity, ForeignKey, Schema},
};

use crate::error::SociogramError;

/// One foreign-key edge of the schema graph.
#[derive(Debug, Clone, Copy)]
pub struct ForeignKeyEdge<'a> {
    column: &'a Column,
    foreign_key: ForeignKey,
}

impl<'a> ForeignKeyEdge<'a> {
    /// The column carrying the foreign key.
    pub fn column(&self) -> &'a Column {
        self.column
    }

    /// The referenced entity and column.
    pub fn foreign_key(&self) -> ForeignKey {
        self.foreign_key
    }
}

/// Graph representation of a validated schema.
#[derive(Debug)]
pub struct SchemaGraph<'a> {
    schema: &'a Schema,
    graph: DiGraph<&'a Entity, ForeignKeyEdge<'a>>,
    entity_indices: HashMap<Id, NodeIndex>,
}

impl<'a> SchemaGraph<'a> {
    /// Validates the schema and builds its graph.
    ///
    /// # Errors
    ///
    /// Returns [`SociogramError::Schema`] when validation fails and
    /// [`SociogramError::Graph`] if an edge endpoint cannot be resolved.
    pub fn from_schema(schema: &'a Schema) -> Result<Self, SociogramError> {
        schema.validate()?;

        let mut graph = DiGraph::new();
        let mut entity_indices = HashMap::new();

        for entity in schema.entities() {
            let idx = graph.add_node(entity);
            entity_indices.insert(entity.name(), idx);
        }

        for entity in schema.entities() {
            for (column, foreign_key) in entity.foreign_keys() {
                let (Some(&source), Some(&target)) = (
                    entity_indices.get(&entity.name()),
                    entity_indices.get(&foreign_key.entity()),
                ) else {
                    return Err(SociogramError::Graph(format!(
                        "Foreign key refers to undefined entities: {} -> {}",
                        entity.name(),
                        foreign_key.entity()
                    )));
                };
                graph.add_edge(
                    source,
                    target,
                    ForeignKeyEdge {
                        column,
                        foreign_key,
                    },
                );
            }
        }

        debug!(
            entities = graph.node_count(),
            foreign_keys = graph.edge_count();
            "Schema graph built"
        );
        trace!(entity_indices:?; "Entity index map");

        Ok(Self {
            schema,
            graph,
            entity_indices,
        })
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn entity_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the node index for an entity name.
    pub fn entity_index(&self, name: Id) -> Option<NodeIndex> {
        self.entity_indices.get(&name).copied()
    }

    pub fn entity_from_idx(&self, idx: NodeIndex) -> &'a Entity {
        self.graph
            .node_weight(idx)
            .copied()
            .expect("node index should exist")
    }

    /// Returns an iterator over all entities with their indices, in
    /// declaration order.
    pub fn entities_with_indices(&self) -> impl Iterator<Item = (NodeIndex, &'a Entity)> + '_ {
        self.graph
            .node_indices()
            .map(|idx| (idx, self.entity_from_idx(idx)))
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn edge_weight(&self, idx: EdgeIndex) -> Option<&ForeignKeyEdge<'a>> {
        self.graph.edge_weight(idx)
    }

    pub fn edge_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// Returns each foreign-key edge with its endpoint indices.
    pub fn edges_with_endpoints(
        &self,
    ) -> impl Iterator<Item = (NodeIndex, NodeIndex, &ForeignKeyEdge<'a>)> + '_ {
        self.graph.edge_indices().map(|idx| {
            let (source, target) = self
                .graph
                .edge_endpoints(idx)
                .expect("edge index should exist");
            (
                source,
                target,
                self.graph
                    .edge_weight(idx)
                    .expect("edge index should exist"),
            )
        })
    }

    /// Reconstructs the declared relationship set as (child, parent) name
    /// pairs, one per foreign key, in declaration order.
    pub fn relationship_pairs(&self) -> Vec<(Id, Id)> {
        self.edges_with_endpoints()
            .map(|(source, target, _)| {
                (
                    self.entity_from_idx(source).name(),
                    self.entity_from_idx(target).name(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociogram_core::schema::{Column, ColumnType, Entity};

    fn social_pair() -> Schema {
        Schema::new("pair")
            .entity(
                Entity::new("user")
                    .column(Column::new("id", ColumnType::Integer).primary_key()),
            )
            .entity(
                Entity::new("followers")
                    .column(Column::new("id", ColumnType::Integer).primary_key())
                    .column(
                        Column::new("follower_id", ColumnType::Integer).foreign_key("user", "id"),
                    )
                    .column(
                        Column::new("followee_id", ColumnType::Integer).foreign_key("user", "id"),
                    ),
            )
    }

    #[test]
    fn test_empty_schema_builds_empty_graph() {
        let schema = Schema::new("empty");

        let graph = SchemaGraph::from_schema(&schema).expect("empty schema is valid");

        assert_eq!(graph.entity_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.relationship_pairs().is_empty());
    }

    #[test]
    fn test_parallel_edges_from_double_foreign_key() {
        let schema = social_pair();

        let graph = SchemaGraph::from_schema(&schema).expect("schema is valid");

        // Two distinct foreign keys into user yield two parallel edges.
        assert_eq!(graph.entity_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.relationship_pairs(),
            vec![
                (Id::new("followers"), Id::new("user")),
                (Id::new("followers"), Id::new("user")),
            ]
        );
    }

    #[test]
    fn test_edge_columns_are_reachable() {
        let schema = social_pair();

        let graph = SchemaGraph::from_schema(&schema).expect("schema is valid");

        let columns: Vec<String> = graph
            .edges_with_endpoints()
            .map(|(_, _, edge)| edge.column().name().to_string())
            .collect();
        assert_eq!(columns, ["follower_id", "followee_id"]);
    }

    #[test]
    fn test_invalid_schema_is_rejected() {
        let schema = Schema::new("broken").entity(
            Entity::new("post")
                .column(Column::new("id", ColumnType::Integer).primary_key())
                .column(Column::new("user_id", ColumnType::Integer).foreign_key("user", "id")),
        );

        let result = SchemaGraph::from_schema(&schema);

        assert!(matches!(result, Err(SociogramError::Schema(_))));
    }

    #[test]
    fn test_entity_index_lookup() {
        let schema = social_pair();

        let graph = SchemaGraph::from_schema(&schema).expect("schema is valid");

        let idx = graph.entity_index(Id::new("user")).expect("user exists");
        assert_eq!(graph.entity_from_idx(idx).name(), Id::new("user"));
        assert!(graph.entity_index(Id::new("missing")).is_none());
    }
}
