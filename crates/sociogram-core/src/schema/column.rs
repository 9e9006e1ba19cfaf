//! Column and column-type definitions.

use std::fmt;

use crate::identifier::Id;

/// The declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// An integer column, used for identifiers and foreign keys.
    Integer,

    /// A text column with an optional maximum character count.
    Text { max_chars: Option<u32> },

    /// A column constrained to a declared [`Enumeration`](super::Enumeration),
    /// referenced by name.
    Enumeration(Id),
}

impl ColumnType {
    /// A text column capped at `max_chars` characters.
    pub fn text(max_chars: u32) -> Self {
        ColumnType::Text {
            max_chars: Some(max_chars),
        }
    }

    /// An enumeration column over the named enumeration.
    pub fn enumeration(name: &str) -> Self {
        ColumnType::Enumeration(Id::new(name))
    }

    /// Returns the declared character cap for text columns, if any.
    pub fn max_chars(&self) -> Option<u32> {
        match self {
            ColumnType::Text { max_chars } => *max_chars,
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Text { max_chars: None } => write!(f, "text"),
            ColumnType::Text {
                max_chars: Some(max),
            } => write!(f, "text({max})"),
            ColumnType::Enumeration(name) => write!(f, "enum({name})"),
        }
    }
}

/// A reference from a column to another entity's primary identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForeignKey {
    entity: Id,
    column: Id,
}

impl ForeignKey {
    /// Creates a foreign key targeting `entity.column`.
    pub fn new(entity: &str, column: &str) -> Self {
        Self {
            entity: Id::new(entity),
            column: Id::new(column),
        }
    }

    /// The referenced entity.
    pub fn entity(self) -> Id {
        self.entity
    }

    /// The referenced column within the target entity.
    pub fn column(self) -> Id {
        self.column
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity, self.column)
    }
}

/// A single column declaration.
///
/// Columns are non-nullable unless marked otherwise, matching the usual
/// relational default for declared record types.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: Id,
    column_type: ColumnType,
    primary_key: bool,
    nullable: bool,
    unique: bool,
    indexed: bool,
    foreign_key: Option<ForeignKey>,
}

impl Column {
    /// Creates a new required (non-nullable) column.
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: Id::new(name),
            column_type,
            primary_key: false,
            nullable: false,
            unique: false,
            indexed: false,
            foreign_key: None,
        }
    }

    /// Marks this column as the entity's primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks this column as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks this column as unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks this column as indexed.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Declares a foreign key from this column to `entity.column`.
    pub fn foreign_key(mut self, entity: &str, column: &str) -> Self {
        self.foreign_key = Some(ForeignKey::new(entity, column));
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Returns the foreign key declared on this column, if any.
    pub fn foreign_key_ref(&self) -> Option<ForeignKey> {
        self.foreign_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_required_by_default() {
        let column = Column::new("email", ColumnType::text(320));

        assert!(!column.is_nullable());
        assert!(!column.is_primary_key());
        assert!(column.foreign_key_ref().is_none());
    }

    #[test]
    fn test_primary_key_flags() {
        let column = Column::new("id", ColumnType::Integer)
            .primary_key()
            .indexed()
            .unique();

        assert!(column.is_primary_key());
        assert!(column.is_indexed());
        assert!(column.is_unique());
    }

    #[test]
    fn test_declared_text_cap() {
        let column = Column::new("comment_text", ColumnType::text(600));

        assert_eq!(column.column_type().max_chars(), Some(600));
    }

    #[test]
    fn test_foreign_key_target() {
        let column = Column::new("user_id", ColumnType::Integer).foreign_key("user", "id");

        let fk = column.foreign_key_ref().expect("foreign key declared");
        assert_eq!(fk.entity(), Id::new("user"));
        assert_eq!(fk.column(), Id::new("id"));
    }

    #[test]
    fn test_column_type_display() {
        assert_eq!(ColumnType::Integer.to_string(), "integer");
        assert_eq!(ColumnType::text(30).to_string(), "text(30)");
        assert_eq!(
            ColumnType::enumeration("media_type").to_string(),
            "enum(media_type)"
        );
    }
}
