//! Entity (table) declarations.

use crate::identifier::Id;

use super::{Column, ForeignKey, Relation};

/// A named record type: ordered columns plus relationship roles.
///
/// Entities are assembled with a consuming builder and hold declaration
/// order, which downstream layout relies on for deterministic output.
/// Duplicate column names are representable here and rejected by
/// [`Schema::validate`](super::Schema::validate).
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: Id,
    columns: Vec<Column>,
    relations: Vec<Relation>,
}

impl Entity {
    /// Creates an empty entity with the given table name.
    pub fn new(name: &str) -> Self {
        Self {
            name: Id::new(name),
            columns: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Appends a column declaration.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends a relationship role.
    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    /// Returns the columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Looks up a column by name.
    pub fn column_named(&self, name: Id) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    /// Returns the primary key column, if one is declared.
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|column| column.is_primary_key())
    }

    /// Returns the declared relationship roles in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }

    /// Returns each foreign-key column together with its target.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&Column, ForeignKey)> {
        self.columns
            .iter()
            .filter_map(|column| column.foreign_key_ref().map(|fk| (column, fk)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    fn post() -> Entity {
        Entity::new("post")
            .column(
                Column::new("id", ColumnType::Integer)
                    .primary_key()
                    .indexed()
                    .unique(),
            )
            .column(Column::new("user_id", ColumnType::Integer).foreign_key("user", "id"))
            .relation(Relation::has_many("comments", "comments"))
    }

    #[test]
    fn test_columns_keep_declaration_order() {
        let names: Vec<String> = post().columns().map(|c| c.name().to_string()).collect();

        assert_eq!(names, ["id", "user_id"]);
    }

    #[test]
    fn test_primary_key_lookup() {
        let entity = post();

        let pk = entity.primary_key().expect("post has a primary key");
        assert_eq!(pk.name(), Id::new("id"));
    }

    #[test]
    fn test_column_named() {
        let entity = post();

        assert!(entity.column_named(Id::new("user_id")).is_some());
        assert!(entity.column_named(Id::new("missing")).is_none());
    }

    #[test]
    fn test_foreign_keys_iterator() {
        let entity = post();

        let fks: Vec<(Id, Id)> = entity
            .foreign_keys()
            .map(|(column, fk)| (column.name(), fk.entity()))
            .collect();
        assert_eq!(fks, [(Id::new("user_id"), Id::new("user"))]);
    }
}
