//! Relationship role declarations.

use crate::identifier::Id;

/// How many rows of the target an entity row relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// A named relationship role declared on an entity.
///
/// Roles are navigational metadata layered over the foreign keys: `posts`
/// on the user entity, the `following`/`followers` pair joined through the
/// follower entity, and so on. Validation resolves each role against the
/// declared entities and, for joined roles, against the join entity's
/// foreign keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    name: Id,
    target: Id,
    via: Option<Id>,
    cardinality: Cardinality,
}

impl Relation {
    /// A one-to-many role: each row relates to many `target` rows.
    pub fn has_many(name: &str, target: &str) -> Self {
        Self {
            name: Id::new(name),
            target: Id::new(target),
            via: None,
            cardinality: Cardinality::Many,
        }
    }

    /// A many-to-one role: each row relates to one `target` row.
    pub fn belongs_to(name: &str, target: &str) -> Self {
        Self {
            name: Id::new(name),
            target: Id::new(target),
            via: None,
            cardinality: Cardinality::One,
        }
    }

    /// A many-to-many role joined through the `via` entity.
    ///
    /// The join entity must carry foreign keys to both endpoints. Nothing
    /// prevents `target` from being the declaring entity itself; the
    /// follower relation is exactly that shape.
    pub fn many_to_many(name: &str, target: &str, via: &str) -> Self {
        Self {
            name: Id::new(name),
            target: Id::new(target),
            via: Some(Id::new(via)),
            cardinality: Cardinality::Many,
        }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn target(&self) -> Id {
        self.target
    }

    /// The join entity for many-to-many roles.
    pub fn via(&self) -> Option<Id> {
        self.via
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_many_shape() {
        let posts = Relation::has_many("posts", "post");

        assert_eq!(posts.name(), Id::new("posts"));
        assert_eq!(posts.target(), Id::new("post"));
        assert_eq!(posts.via(), None);
        assert_eq!(posts.cardinality(), Cardinality::Many);
    }

    #[test]
    fn test_self_referential_many_to_many() {
        let following = Relation::many_to_many("following", "user", "followers");

        assert_eq!(following.target(), Id::new("user"));
        assert_eq!(following.via(), Some(Id::new("followers")));
    }
}
