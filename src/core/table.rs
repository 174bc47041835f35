//! Ordered state table.
//!
//! States are enumerated in the order they were declared (document order
//! for JSON input), while lookups by name stay O(1).

use super::config::StateDefinition;
use super::ids::StateId;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Insertion-ordered mapping from state identifier to its definition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateTable {
    entries: Vec<(StateId, StateDefinition)>,
    index: HashMap<StateId, usize>,
}

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a state, returning the definition it replaced.
    ///
    /// A replaced state keeps its original position.
    pub fn insert(
        &mut self,
        state: impl Into<StateId>,
        definition: StateDefinition,
    ) -> Option<StateDefinition> {
        let state = state.into();
        match self.index.get(&state) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, definition)),
            None => {
                self.index.insert(state.clone(), self.entries.len());
                self.entries.push((state, definition));
                None
            }
        }
    }

    pub fn get(&self, state: &str) -> Option<&StateDefinition> {
        self.index.get(state).map(|&slot| &self.entries[slot].1)
    }

    pub(crate) fn get_mut(&mut self, state: &str) -> Option<&mut StateDefinition> {
        match self.index.get(state) {
            Some(&slot) => Some(&mut self.entries[slot].1),
            None => None,
        }
    }

    pub fn contains(&self, state: &str) -> bool {
        self.index.contains_key(state)
    }

    /// Canonical identifier stored in the table for `state`.
    pub fn key(&self, state: &str) -> Option<&StateId> {
        self.index.get(state).map(|&slot| &self.entries[slot].0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State identifiers in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &StateId> {
        self.entries.iter().map(|(state, _)| state)
    }

    /// `(state, definition)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateId, &StateDefinition)> {
        self.entries.iter().map(|(state, def)| (state, def))
    }
}

impl Serialize for StateTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (state, definition) in &self.entries {
            map.serialize_entry(state, definition)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StateTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = StateTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of state names to state definitions")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut table = StateTable::new();
                while let Some((state, definition)) =
                    access.next_entry::<StateId, StateDefinition>()?
                {
                    if table.contains(state.as_str()) {
                        return Err(de::Error::custom(format!(
                            "duplicate state '{}'",
                            state
                        )));
                    }
                    table.insert(state, definition);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

impl<'a> IntoIterator for &'a StateTable {
    type Item = (&'a StateId, &'a StateDefinition);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
