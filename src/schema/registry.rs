//! Shared directory of class schemas.
//!
//! The registry gives the library a way from a `TypeId` (or a class name) back to a
//! schema when no instance is at hand - most importantly when the mapper has to
//! construct a fresh instance of a nested destination property's declared class.
//!
//! # Registry Architecture
//!
//! Two indices over the same `&'static` schema references:
//!
//! - **Id-based lookup**: primary index from `TypeId`, used on hot paths
//! - **Name-based lookup**: lexicographically ordered secondary index, used for
//!   diagnostics and enumeration
//!
//! # Thread Safety
//!
//! Both indices are lock-free concurrent structures (`DashMap`, `SkipMap`);
//! registration and lookup are safe from any thread, and re-registering a class is
//! an idempotent no-op.

use std::any::TypeId;

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::schema::{ClassSchema, ReflectClass};

/// Directory of class schemas, indexed by `TypeId` and by class name.
///
/// Explicitly constructed and shared by `Arc` with the components that need it
/// (rather than living in global state), so tests can build a fresh one per run.
#[derive(Default)]
pub struct SchemaRegistry {
    by_id: DashMap<TypeId, &'static ClassSchema>,
    by_name: SkipMap<String, &'static ClassSchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        SchemaRegistry {
            by_id: DashMap::new(),
            by_name: SkipMap::new(),
        }
    }

    /// Registers a class and its whole base chain.
    ///
    /// Registering the same class again is a no-op.
    pub fn register<T: ReflectClass>(&self) {
        self.register_schema(T::class_of());
    }

    /// Registers a schema (and its base chain) by reference.
    pub fn register_schema(&self, schema: &'static ClassSchema) {
        let mut level = Some(schema);
        while let Some(current) = level {
            self.by_id.insert(current.type_id(), current);
            self.by_name.insert(current.name().to_string(), current);
            level = current.base_schema();
        }
    }

    /// Looks up a schema by the `TypeId` of its class.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&'static ClassSchema> {
        self.by_id.get(&id).map(|entry| *entry.value())
    }

    /// Looks up a schema by class name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&'static ClassSchema> {
        self.by_name.get(name).map(|entry| *entry.value())
    }

    /// Returns `true` if the class is registered.
    #[must_use]
    pub fn contains<T: ReflectClass>(&self) -> bool {
        self.by_id.contains_key(&TypeId::of::<T>())
    }

    /// The number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns `true` if no class is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// The registered class names in lexicographic order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.by_name
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("classes", &self.len())
            .finish()
    }
}
