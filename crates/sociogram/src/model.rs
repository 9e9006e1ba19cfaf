//! The built-in social-network schema.
//!
//! Five entities: `user`, the `followers` join table for the directed
//! follow edge between users, `post`, `media` (typed attachments), and
//! `comments`. This is the schema the CLI renders; everything else in the
//! crate is machinery for describing and drawing it.

use std::str::FromStr;

use sociogram_core::{
    error::SchemaError,
    identifier::Id,
    schema::{Column, ColumnType, Entity, Enumeration, Relation, Schema},
};

/// The kind of a media attachment.
///
/// Closed to exactly these three variants; anything else is rejected at
/// the boundary by [`MediaType::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
    Gif,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Image, MediaType::Video, MediaType::Gif];

    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Gif => "gif",
        }
    }
}

impl FromStr for MediaType {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MediaType::ALL
            .into_iter()
            .find(|media_type| media_type.as_str() == value)
            .ok_or_else(|| SchemaError::UnknownEnumVariant {
                enumeration: Id::new("media_type"),
                value: value.to_string(),
            })
    }
}

/// Builds the social-network schema.
///
/// The follower edge is directed: `follower_id` follows `followee_id`.
/// Both land on `user.id`, and nothing here prevents a row from following
/// itself. No uniqueness is declared on the pair either; the schema
/// mirrors the declarations, not a policy layer.
pub fn social_network() -> Schema {
    Schema::new("social_network")
        .enumeration(Enumeration::new(
            "media_type",
            MediaType::ALL.map(MediaType::as_str),
        ))
        .entity(
            Entity::new("user")
                .column(
                    Column::new("id", ColumnType::Integer)
                        .primary_key()
                        .indexed()
                        .unique(),
                )
                .column(Column::new("email", ColumnType::text(320)))
                .column(Column::new("username", ColumnType::text(30)))
                .column(Column::new("password", ColumnType::text(100)))
                .column(Column::new("first_name", ColumnType::text(30)))
                .column(Column::new("last_name", ColumnType::text(30)))
                .relation(Relation::many_to_many("following", "user", "followers"))
                .relation(Relation::many_to_many("followers", "user", "followers"))
                .relation(Relation::has_many("posts", "post"))
                .relation(Relation::has_many("comments", "comments")),
        )
        .entity(
            Entity::new("followers")
                .column(
                    Column::new("id", ColumnType::Integer)
                        .primary_key()
                        .indexed()
                        .unique(),
                )
                .column(Column::new("follower_id", ColumnType::Integer).foreign_key("user", "id"))
                .column(Column::new("followee_id", ColumnType::Integer).foreign_key("user", "id")),
        )
        .entity(
            Entity::new("post")
                .column(
                    Column::new("id", ColumnType::Integer)
                        .primary_key()
                        .indexed()
                        .unique(),
                )
                .column(Column::new("user_id", ColumnType::Integer).foreign_key("user", "id"))
                .relation(Relation::belongs_to("user", "user"))
                .relation(Relation::has_many("comments", "comments"))
                .relation(Relation::has_many("media", "media")),
        )
        .entity(
            Entity::new("media")
                .column(
                    Column::new("id", ColumnType::Integer)
                        .primary_key()
                        .indexed()
                        .unique(),
                )
                .column(Column::new("post_id", ColumnType::Integer).foreign_key("post", "id"))
                .column(Column::new("media_type", ColumnType::enumeration("media_type")))
                .relation(Relation::belongs_to("post", "post")),
        )
        .entity(
            Entity::new("comments")
                .column(
                    Column::new("id", ColumnType::Integer)
                        .primary_key()
                        .indexed()
                        .unique(),
                )
                .column(Column::new("comment_text", ColumnType::text(600)))
                .column(Column::new("user_id", ColumnType::Integer).foreign_key("user", "id"))
                .column(Column::new("post_id", ColumnType::Integer).foreign_key("post", "id"))
                .relation(Relation::belongs_to("user", "user"))
                .relation(Relation::belongs_to("post", "post")),
        )
}

#[cfg(test)]
mod tests {
    use sociogram_core::schema::Cardinality;

    use super::*;

    #[test]
    fn test_schema_validates() {
        assert_eq!(social_network().validate(), Ok(()));
    }

    #[test]
    fn test_five_entities_declared() {
        let schema = social_network();

        let names: Vec<String> = schema.entities().map(|e| e.name().to_string()).collect();
        assert_eq!(names, ["user", "followers", "post", "media", "comments"]);
    }

    #[test]
    fn test_declared_text_caps() {
        let schema = social_network();
        let user = schema.entity_named(Id::new("user")).expect("user exists");
        let comments = schema
            .entity_named(Id::new("comments"))
            .expect("comments exists");

        let cap = |entity: &Entity, column: &str| {
            entity
                .column_named(Id::new(column))
                .expect("column exists")
                .column_type()
                .max_chars()
        };

        assert_eq!(cap(user, "email"), Some(320));
        assert_eq!(cap(user, "username"), Some(30));
        assert_eq!(cap(user, "password"), Some(100));
        assert_eq!(cap(user, "first_name"), Some(30));
        assert_eq!(cap(user, "last_name"), Some(30));
        assert_eq!(cap(comments, "comment_text"), Some(600));
    }

    #[test]
    fn test_required_columns_are_non_nullable() {
        let schema = social_network();

        for entity in schema.entities() {
            for column in entity.columns() {
                assert!(
                    !column.is_nullable(),
                    "{}.{} should be required",
                    entity.name(),
                    column.name()
                );
            }
        }
    }

    #[test]
    fn test_media_type_round_trip() {
        for media_type in MediaType::ALL {
            assert_eq!(
                media_type.as_str().parse::<MediaType>(),
                Ok(media_type),
                "{media_type:?} should round-trip"
            );
        }
    }

    #[test]
    fn test_media_type_rejects_unknown_values() {
        for value in ["audio", "IMAGE", "", "jpeg"] {
            assert!(value.parse::<MediaType>().is_err(), "{value:?} should be rejected");
        }
    }

    #[test]
    fn test_media_type_enumeration_matches_rust_enum() {
        let schema = social_network();
        let media_type = schema
            .enumeration_named(Id::new("media_type"))
            .expect("enumeration declared");

        let declared: Vec<&str> = media_type.variants().collect();
        assert_eq!(declared, ["image", "video", "gif"]);
        assert!(media_type.accepts("gif"));
        assert!(!media_type.accepts("audio"));
    }

    #[test]
    fn test_follower_join_is_directed_and_unconstrained() {
        let schema = social_network();
        let followers = schema
            .entity_named(Id::new("followers"))
            .expect("followers exists");

        let fk_columns: Vec<String> = followers
            .foreign_keys()
            .map(|(column, _)| column.name().to_string())
            .collect();
        assert_eq!(fk_columns, ["follower_id", "followee_id"]);

        // No uniqueness on the pair, by declaration.
        for name in ["follower_id", "followee_id"] {
            let column = followers
                .column_named(Id::new(name))
                .expect("column exists");
            assert!(!column.is_unique());
        }
    }

    #[test]
    fn test_user_relation_roles() {
        let schema = social_network();
        let user = schema.entity_named(Id::new("user")).expect("user exists");

        let roles: Vec<(String, Option<Id>, Cardinality)> = user
            .relations()
            .map(|r| (r.name().to_string(), r.via(), r.cardinality()))
            .collect();

        assert_eq!(roles.len(), 4);
        assert_eq!(roles[0].0, "following");
        assert_eq!(roles[0].1, Some(Id::new("followers")));
        assert_eq!(roles[0].2, Cardinality::Many);
        assert_eq!(roles[1].0, "followers");
        assert_eq!(roles[2].0, "posts");
        assert_eq!(roles[3].0, "comments");
    }
}
