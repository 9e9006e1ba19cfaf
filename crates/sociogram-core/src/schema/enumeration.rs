//! Closed enumeration definitions.

use indexmap::IndexSet;

use crate::{error::SchemaError, identifier::Id};

/// A closed, named set of string values.
///
/// Columns typed as [`ColumnType::Enumeration`](super::ColumnType::Enumeration)
/// admit exactly the variants declared here; anything else is rejected at
/// the boundary via [`Enumeration::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    name: Id,
    variants: IndexSet<String>,
}

impl Enumeration {
    /// Declares an enumeration with the given variants, in order.
    pub fn new<'a>(name: &str, variants: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            name: Id::new(name),
            variants: variants.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    /// Returns the declared variants in declaration order.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Membership test: is `value` one of the declared variants?
    pub fn accepts(&self, value: &str) -> bool {
        self.variants.contains(value)
    }

    /// Checks `value` against the closed variant set.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownEnumVariant`] for any value outside
    /// the declared set.
    pub fn parse<'v>(&self, value: &'v str) -> Result<&'v str, SchemaError> {
        if self.accepts(value) {
            Ok(value)
        } else {
            Err(SchemaError::UnknownEnumVariant {
                enumeration: self.name,
                value: value.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_type() -> Enumeration {
        Enumeration::new("media_type", ["image", "video", "gif"])
    }

    #[test]
    fn test_accepts_declared_variants_only() {
        let media = media_type();

        assert!(media.accepts("image"));
        assert!(media.accepts("video"));
        assert!(media.accepts("gif"));
        assert!(!media.accepts("audio"));
        assert!(!media.accepts("IMAGE"));
        assert!(!media.accepts(""));
    }

    #[test]
    fn test_parse_rejects_unknown_value() {
        let media = media_type();

        assert_eq!(media.parse("gif"), Ok("gif"));
        assert_eq!(
            media.parse("webm"),
            Err(SchemaError::UnknownEnumVariant {
                enumeration: Id::new("media_type"),
                value: "webm".to_string(),
            })
        );
    }

    #[test]
    fn test_variant_order_is_declaration_order() {
        let media = media_type();

        let variants: Vec<&str> = media.variants().collect();
        assert_eq!(variants, ["image", "video", "gif"]);
    }

    #[test]
    fn test_duplicate_variants_collapse() {
        let dup = Enumeration::new("flag", ["on", "off", "on"]);

        assert_eq!(dup.len(), 2);
    }
}
