//! The auxiliary property bag: an insertion-ordered string-to-value map.

use indexmap::IndexMap;

use crate::value::Value;

/// Ordered key/value store owned by one dynamic object.
///
/// Keys are exact-case (unlike instance-property lookup, which folds case) and
/// enumerate in insertion order; removing an entry preserves the order of the
/// rest. The bag's own serialization is a collaborator concern - all this library
/// relies on is the ordered-map contract.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PropertyBag {
    entries: IndexMap<String, Value>,
}

impl PropertyBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        PropertyBag {
            entries: IndexMap::new(),
        }
    }

    /// Borrows the value stored under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Stores `value` under `name`, creating or replacing the entry.
    ///
    /// A replaced entry keeps its original position.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Removes the entry under `name`, preserving the order of the remaining
    /// entries, and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.shift_remove(name)
    }

    /// Returns `true` if an entry with exactly this key exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns `true` if any key matches `name` case-insensitively.
    #[must_use]
    pub fn shadows(&self, name: &str) -> bool {
        self.entries
            .keys()
            .any(|key| key.eq_ignore_ascii_case(name))
    }

    /// The keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the bag holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
