//! The database: a name-keyed collection of relations.

use std::collections::HashMap;

use crate::relation::Relation;

/// Owns every relation for the lifetime of an interpretation.
///
/// No persistence, no transactions: schema evaluation inserts empty
/// relations, fact loading and rule application mutate them in place.
#[derive(Debug, Default)]
pub struct Database {
    relations: HashMap<String, Relation>,
}

impl Database {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a relation under a name, replacing any existing entry.
    pub fn add_relation(&mut self, name: impl Into<String>, relation: Relation) {
        self.relations.insert(name.into(), relation);
    }

    /// Looks up a relation by name.
    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }

    /// Returns a mutable reference to the named relation, creating a
    /// default empty one if absent.
    ///
    /// Callers assume every referenced name was pre-declared by a schema;
    /// the create-on-miss default mirrors that assumption instead of
    /// panicking on a bad program.
    pub fn relation_mut(&mut self, name: &str) -> &mut Relation {
        self.relations.entry(name.to_string()).or_default()
    }
}
