//! The relational schema metadata model.
//!
//! A [`Schema`] is an explicitly constructed, in-memory description of a
//! set of entities: their columns, foreign keys, closed enumerations, and
//! named relationship roles. It carries no data rows and exposes no CRUD
//! surface; consumers (the diagram pipeline, or an eventual persistence
//! layer) read the metadata and act on it.
//!
//! [`Schema::validate`] checks structural well-formedness: every foreign
//! key lands on an existing primary key, every enumeration column names a
//! declared enumeration, every relationship role resolves, and names are
//! unique per namespace. An empty schema is valid.

mod column;
mod entity;
mod enumeration;
mod relation;

pub use column::{Column, ColumnType, ForeignKey};
pub use entity::Entity;
pub use enumeration::Enumeration;
pub use relation::{Cardinality, Relation};

use std::collections::HashSet;

use log::debug;

use crate::{error::SchemaError, identifier::Id};

/// A complete schema: ordered entities plus enumerations.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: Id,
    entities: Vec<Entity>,
    enumerations: Vec<Enumeration>,
}

impl Schema {
    /// Creates an empty schema with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: Id::new(name),
            entities: Vec::new(),
            enumerations: Vec::new(),
        }
    }

    /// Appends an entity declaration.
    pub fn entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Appends an enumeration declaration.
    pub fn enumeration(mut self, enumeration: Enumeration) -> Self {
        self.enumerations.push(enumeration);
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    /// Returns the entities in declaration order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Looks up an entity by name.
    pub fn entity_named(&self, name: Id) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name() == name)
    }

    /// Returns the enumerations in declaration order.
    pub fn enumerations(&self) -> impl Iterator<Item = &Enumeration> {
        self.enumerations.iter()
    }

    /// Looks up an enumeration by name.
    pub fn enumeration_named(&self, name: Id) -> Option<&Enumeration> {
        self.enumerations
            .iter()
            .find(|enumeration| enumeration.name() == name)
    }

    /// Checks structural well-formedness of the whole schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found: duplicate names, dangling
    /// or non-primary foreign-key targets, undeclared enumerations, or
    /// unresolvable relationship roles.
    pub fn validate(&self) -> Result<(), SchemaError> {
        debug!(
            schema = self.name.resolve(),
            entities = self.entities.len(),
            enumerations = self.enumerations.len();
            "Validating schema"
        );

        self.check_unique_names()?;
        for enumeration in &self.enumerations {
            if enumeration.is_empty() {
                return Err(SchemaError::EmptyEnumeration(enumeration.name()));
            }
        }
        for entity in &self.entities {
            self.check_columns(entity)?;
            self.check_relations(entity)?;
        }

        Ok(())
    }

    fn check_unique_names(&self) -> Result<(), SchemaError> {
        let mut entity_names = HashSet::new();
        for entity in &self.entities {
            if !entity_names.insert(entity.name()) {
                return Err(SchemaError::DuplicateEntity(entity.name()));
            }

            let mut column_names = HashSet::new();
            for column in entity.columns() {
                if !column_names.insert(column.name()) {
                    return Err(SchemaError::DuplicateColumn {
                        entity: entity.name(),
                        column: column.name(),
                    });
                }
            }
        }

        let mut enumeration_names = HashSet::new();
        for enumeration in &self.enumerations {
            if !enumeration_names.insert(enumeration.name()) {
                return Err(SchemaError::DuplicateEnumeration(enumeration.name()));
            }
        }

        Ok(())
    }

    fn check_columns(&self, entity: &Entity) -> Result<(), SchemaError> {
        for column in entity.columns() {
            if let ColumnType::Enumeration(enumeration) = *column.column_type() {
                if self.enumeration_named(enumeration).is_none() {
                    return Err(SchemaError::UndeclaredEnumeration {
                        entity: entity.name(),
                        column: column.name(),
                        enumeration,
                    });
                }
            }

            let Some(fk) = column.foreign_key_ref() else {
                continue;
            };
            let Some(target) = self.entity_named(fk.entity()) else {
                return Err(SchemaError::UnknownForeignEntity {
                    entity: entity.name(),
                    column: column.name(),
                    target: fk.entity(),
                });
            };
            let Some(target_column) = target.column_named(fk.column()) else {
                return Err(SchemaError::UnknownForeignColumn {
                    entity: entity.name(),
                    column: column.name(),
                    target: fk.entity(),
                    target_column: fk.column(),
                });
            };
            if !target_column.is_primary_key() {
                return Err(SchemaError::ForeignKeyNotPrimary {
                    entity: entity.name(),
                    column: column.name(),
                    target: fk.entity(),
                    target_column: fk.column(),
                });
            }
        }

        Ok(())
    }

    fn check_relations(&self, entity: &Entity) -> Result<(), SchemaError> {
        for relation in entity.relations() {
            if self.entity_named(relation.target()).is_none() {
                return Err(SchemaError::UnknownRelationTarget {
                    entity: entity.name(),
                    relation: relation.name(),
                    target: relation.target(),
                });
            }

            let Some(via) = relation.via() else {
                continue;
            };
            let Some(join) = self.entity_named(via) else {
                return Err(SchemaError::UnknownJoinEntity {
                    entity: entity.name(),
                    relation: relation.name(),
                    via,
                });
            };

            // The join entity must reach both endpoints through its own
            // foreign keys. For self-referential roles both checks land on
            // the same entity, which the two-FK join table satisfies.
            for endpoint in [entity.name(), relation.target()] {
                let reaches = join.foreign_keys().any(|(_, fk)| fk.entity() == endpoint);
                if !reaches {
                    return Err(SchemaError::MalformedJoin {
                        entity: entity.name(),
                        relation: relation.name(),
                        via,
                        missing: endpoint,
                    });
                }
            }
        }

        Ok(())
    }
}
