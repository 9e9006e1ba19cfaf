//! Schema validation errors.

use thiserror::Error;

use crate::identifier::Id;

/// Errors raised while validating a schema definition.
///
/// These surface at schema-construction time, before any diagram work
/// happens. They describe malformed metadata, never malformed data rows —
/// the schema model carries no row values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate entity `{0}`")]
    DuplicateEntity(Id),

    #[error("duplicate column `{column}` on entity `{entity}`")]
    DuplicateColumn { entity: Id, column: Id },

    #[error("duplicate enumeration `{0}`")]
    DuplicateEnumeration(Id),

    #[error("enumeration `{0}` declares no variants")]
    EmptyEnumeration(Id),

    #[error("`{value}` is not a variant of enumeration `{enumeration}`")]
    UnknownEnumVariant { enumeration: Id, value: String },

    #[error("foreign key `{entity}.{column}` references unknown entity `{target}`")]
    UnknownForeignEntity { entity: Id, column: Id, target: Id },

    #[error("foreign key `{entity}.{column}` references unknown column `{target}.{target_column}`")]
    UnknownForeignColumn {
        entity: Id,
        column: Id,
        target: Id,
        target_column: Id,
    },

    #[error(
        "foreign key `{entity}.{column}` references `{target}.{target_column}`, which is not a primary key"
    )]
    ForeignKeyNotPrimary {
        entity: Id,
        column: Id,
        target: Id,
        target_column: Id,
    },

    #[error("column `{entity}.{column}` uses undeclared enumeration `{enumeration}`")]
    UndeclaredEnumeration {
        entity: Id,
        column: Id,
        enumeration: Id,
    },

    #[error("relation `{entity}.{relation}` targets unknown entity `{target}`")]
    UnknownRelationTarget {
        entity: Id,
        relation: Id,
        target: Id,
    },

    #[error("relation `{entity}.{relation}` joins through unknown entity `{via}`")]
    UnknownJoinEntity { entity: Id, relation: Id, via: Id },

    #[error(
        "relation `{entity}.{relation}` joins through `{via}`, which has no foreign key to `{missing}`"
    )]
    MalformedJoin {
        entity: Id,
        relation: Id,
        via: Id,
        missing: Id,
    },
}
