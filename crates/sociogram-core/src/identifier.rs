//! String-interned identifiers.
//!
//! Entity, column, enumeration, and relation names are referenced all over
//! the schema model and the diagram pipeline. Interning them once gives a
//! copyable, cheaply comparable [`Id`] that still prints as the original
//! string.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

fn interner() -> &'static Mutex<DefaultStringInterner> {
    static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::default()))
}

/// An interned name.
///
/// `Id` is `Copy` and compares by symbol, so two `Id`s created from the
/// same string are equal. [`fmt::Display`] resolves back to the original
/// string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns the given string and returns its identifier.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("identifier interner poisoned");
        Id(interner.get_or_intern(name))
    }

    /// Resolves the identifier back to an owned string.
    pub fn resolve(self) -> String {
        let interner = interner().lock().expect("identifier interner poisoned");
        interner
            .resolve(self.0)
            .expect("symbol was created by this interner")
            .to_string()
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Id::new(name)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve())
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({:?})", self.resolve())
    }
}
