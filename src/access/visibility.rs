//! Effective property maps with hidden-member exclusion.
//!
//! The described object model has member hiding: when a derived class redeclares a
//! property that also exists on a base class, only the most-derived declaration is
//! visible. The visible set of a class is therefore computed by walking the chain
//! from the most-derived class upward and letting the first declaration of each
//! (case-folded) name win. The result is computed once per class and cached by the
//! accessor cache.

use std::collections::HashMap;
use std::sync::Arc;

use crate::access::PropertyAccessor;
use crate::schema::ClassSchema;

/// The effective (visible) properties of one class, with hiding applied.
///
/// Holds both a case-folded name index for lookup and the declaration order
/// (most-derived class first) for enumeration.
pub struct VisibleProperties {
    by_name: HashMap<String, Arc<PropertyAccessor>>,
    order: Vec<Arc<PropertyAccessor>>,
}

impl VisibleProperties {
    pub(crate) fn compute(schema: &'static ClassSchema) -> Self {
        let mut by_name = HashMap::new();
        let mut order = Vec::new();
        let mut level = Some(schema);
        let mut depth = 0usize;
        while let Some(current) = level {
            for prop in current.properties() {
                let key = prop.name().to_ascii_lowercase();
                if by_name.contains_key(&key) {
                    // redeclared below: the base member is hidden
                    continue;
                }
                let accessor = Arc::new(PropertyAccessor::compile(current, prop, depth));
                by_name.insert(key, accessor.clone());
                order.push(accessor);
            }
            level = current.base_schema();
            depth += 1;
        }
        VisibleProperties { by_name, order }
    }

    /// Looks up a visible property by name, case-insensitively.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Arc<PropertyAccessor>> {
        self.by_name.get(&name.to_ascii_lowercase())
    }

    /// Looks up a visible property by an already case-folded key.
    #[must_use]
    pub fn find_folded(&self, key: &str) -> Option<&Arc<PropertyAccessor>> {
        self.by_name.get(key)
    }

    /// Returns `true` if a property with the given name is visible.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_ascii_lowercase())
    }

    /// Iterates the visible properties in declaration order, most-derived class
    /// first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PropertyAccessor>> {
        self.order.iter()
    }

    /// The visible property names (declaring spelling), in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().map(|accessor| accessor.name())
    }

    /// The number of visible properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the class has no visible properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl std::fmt::Debug for VisibleProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
