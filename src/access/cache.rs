//! The process-wide accessor cache.
//!
//! The cache is the memoization layer between schemas and everything that performs
//! dynamic member access: the first request for a member walks the schema chain (the
//! "reflection lookup"), compiles an immutable accessor and publishes it; every
//! subsequent request for the same [`MemberKey`] is a lock-free map hit. Nothing is
//! ever evicted - the cache is bounded only by the set of classes the process
//! touches and lives as long as the process does.
//!
//! # Thread Safety
//!
//! All maps are concurrent (`DashMap`) and reads never block. Get-or-compute races
//! are benign by design: two threads may compile the same accessor concurrently,
//! both results are functionally equivalent, and whichever insert loses is simply
//! dropped. No correctness depends on deduplicating the compilation work, only the
//! externally observed result.
//!
//! # Statistics
//!
//! Atomic counters record cache hits, slow-path schema scans and the number of
//! compiled accessors. The bounded-lookup guarantee - any number of requests for the
//! same member performs O(1) schema scans - is observable through
//! [`AccessorCache::stats`].

use std::any::TypeId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use rayon::prelude::*;
use tracing::debug;

use crate::access::{ConstructorAccessor, MemberKey, MethodAccessor, PropertyAccessor, VisibleProperties};
use crate::schema::{ClassSchema, Reflect};
use crate::value::{Value, ValueTy};
use crate::{Error, Result};

/// Atomic counters tracking cache behavior.
#[derive(Default)]
struct CacheStats {
    hits: AtomicU64,
    schema_scans: AtomicU64,
    compiled: AtomicU64,
}

/// A point-in-time copy of the cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
    /// Number of requests answered from an already-published accessor.
    pub hits: u64,
    /// Number of slow-path schema scans (member resolutions and visible-map builds).
    pub schema_scans: u64,
    /// Number of accessors compiled so far.
    pub compiled: u64,
}

/// Process-wide, thread-safe memoization of compiled accessors.
///
/// Explicitly constructed and shared by `Arc` with every facade and mapper that
/// needs it (rather than living in global state), so tests can build a fresh cache
/// per run. Populated lazily on first use; never evicted; reset only by dropping
/// the cache.
#[derive(Default)]
pub struct AccessorCache {
    properties: DashMap<MemberKey, Arc<PropertyAccessor>>,
    methods: DashMap<MemberKey, Arc<MethodAccessor>>,
    method_groups: DashMap<MemberKey, Arc<Vec<Arc<MethodAccessor>>>>,
    constructors: DashMap<TypeId, Arc<Vec<ConstructorAccessor>>>,
    visible: DashMap<TypeId, Arc<VisibleProperties>>,
    stats: CacheStats,
}

impl AccessorCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        AccessorCache::default()
    }

    /// The effective property map of a class, with member hiding applied.
    ///
    /// Computed once per class; subsequent calls return the shared map.
    #[must_use]
    pub fn visible_properties(&self, schema: &'static ClassSchema) -> Arc<VisibleProperties> {
        if let Some(existing) = self.visible.get(&schema.type_id()) {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            return existing.value().clone();
        }
        self.stats.schema_scans.fetch_add(1, Ordering::Relaxed);
        debug!(class = schema.name(), "compiling visible property map");
        let computed = Arc::new(VisibleProperties::compute(schema));
        self.stats
            .compiled
            .fetch_add(computed.len() as u64, Ordering::Relaxed);
        self.visible
            .entry(schema.type_id())
            .or_insert(computed)
            .value()
            .clone()
    }

    /// Resolves a property getter, case-insensitively, walking the base chain.
    ///
    /// Returns `None` when no visible property carries the name. The first call for
    /// a given (class, name) pair performs the schema scan; later calls hit the
    /// member table.
    #[must_use]
    pub fn try_getter(
        &self,
        schema: &'static ClassSchema,
        name: &str,
    ) -> Option<Arc<PropertyAccessor>> {
        let key = MemberKey::property(schema.type_id(), name);
        if let Some(existing) = self.properties.get(&key) {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            return Some(existing.value().clone());
        }
        let visible = self.visible_properties(schema);
        let accessor = visible.find(name)?.clone();
        self.properties.insert(key, accessor.clone());
        Some(accessor)
    }

    /// Resolves a property getter or reports [`Error::PropertyNotFound`].
    pub fn getter(
        &self,
        schema: &'static ClassSchema,
        name: &str,
    ) -> Result<Arc<PropertyAccessor>> {
        self.try_getter(schema, name)
            .ok_or_else(|| Error::PropertyNotFound {
                class: schema.name(),
                name: name.to_string(),
            })
    }

    /// Resolves a property setter, or `None` when the property is missing or
    /// read-only.
    #[must_use]
    pub fn try_setter(
        &self,
        schema: &'static ClassSchema,
        name: &str,
    ) -> Option<Arc<PropertyAccessor>> {
        self.try_getter(schema, name)
            .filter(|accessor| accessor.is_settable())
    }

    /// Resolves a property setter.
    ///
    /// # Errors
    ///
    /// [`Error::PropertyNotFound`] when the name does not resolve;
    /// [`Error::ReadOnlyProperty`] when it resolves to a read-only property -
    /// signaled here, at the point of first use, not at write time.
    pub fn setter(
        &self,
        schema: &'static ClassSchema,
        name: &str,
    ) -> Result<Arc<PropertyAccessor>> {
        let accessor = self.getter(schema, name)?;
        if !accessor.is_settable() {
            return Err(Error::ReadOnlyProperty {
                class: schema.name(),
                name: name.to_string(),
            });
        }
        Ok(accessor)
    }

    /// The parameterized-constructor list of a class, in declaration order.
    ///
    /// The zero-argument constructor is intentionally absent: callers needing a
    /// default instance use [`ClassSchema::new_default`], which is cheap without
    /// caching.
    #[must_use]
    pub fn constructors(&self, schema: &'static ClassSchema) -> Arc<Vec<ConstructorAccessor>> {
        if let Some(existing) = self.constructors.get(&schema.type_id()) {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            return existing.value().clone();
        }
        self.stats.schema_scans.fetch_add(1, Ordering::Relaxed);
        debug!(class = schema.name(), "compiling constructor list");
        let compiled: Vec<ConstructorAccessor> = schema
            .constructors()
            .iter()
            .map(|ctor| ConstructorAccessor::compile(schema, ctor))
            .collect();
        self.stats
            .compiled
            .fetch_add(compiled.len() as u64, Ordering::Relaxed);
        self.constructors
            .entry(schema.type_id())
            .or_insert(Arc::new(compiled))
            .value()
            .clone()
    }

    /// Constructs an instance through the class's parameterized constructors.
    ///
    /// Overload selection: with exactly one candidate, it is always chosen and the
    /// arguments are coerced to its parameter types - the common case pays no
    /// matching cost. With several candidates, the first whose declared parameter
    /// types the arguments fit exactly is chosen; no fuzzy fallback.
    ///
    /// # Errors
    ///
    /// [`Error::NoMatchingConstructor`] when the class declares no parameterized
    /// constructor or none matches; argument coercion failures propagate from the
    /// chosen candidate.
    pub fn construct(&self, schema: &'static ClassSchema, args: &[Value]) -> Result<Box<dyn Reflect>> {
        let candidates = self.constructors(schema);
        match candidates.len() {
            0 => Err(Error::NoMatchingConstructor {
                class: schema.name(),
                argc: args.len(),
            }),
            1 => candidates[0].invoke(args),
            _ => candidates
                .iter()
                .find(|candidate| candidate.matches(args))
                .ok_or(Error::NoMatchingConstructor {
                    class: schema.name(),
                    argc: args.len(),
                })?
                .invoke(args),
        }
    }

    /// Resolves a method by exact name and exact parameter signature.
    ///
    /// Method names are case-sensitive, unlike property names. The base chain is
    /// walked most-derived first, so a derived redeclaration hides the base method
    /// with the same signature.
    ///
    /// # Errors
    ///
    /// [`Error::MethodNotFound`] when nothing matches.
    pub fn method(
        &self,
        schema: &'static ClassSchema,
        name: &str,
        params: &[ValueTy],
    ) -> Result<Arc<MethodAccessor>> {
        let key = MemberKey::method(schema.type_id(), name, params);
        if let Some(existing) = self.methods.get(&key) {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(existing.value().clone());
        }
        self.stats.schema_scans.fetch_add(1, Ordering::Relaxed);
        let mut level = Some(schema);
        let mut depth = 0usize;
        while let Some(current) = level {
            for method in current.methods() {
                if method.name() == name && method.params() == params {
                    let accessor = Arc::new(MethodAccessor::compile(current, method, depth));
                    self.stats.compiled.fetch_add(1, Ordering::Relaxed);
                    self.methods.insert(key, accessor.clone());
                    return Ok(accessor);
                }
            }
            level = current.base_schema();
            depth += 1;
        }
        Err(Error::MethodNotFound {
            class: schema.name(),
            name: name.to_string(),
        })
    }

    /// All visible overloads of a method name, most-derived first.
    ///
    /// A derived declaration hides a base declaration with the same parameter
    /// signature; distinct signatures coexist as overloads.
    #[must_use]
    pub fn methods_named(
        &self,
        schema: &'static ClassSchema,
        name: &str,
    ) -> Arc<Vec<Arc<MethodAccessor>>> {
        let key = MemberKey::method_group(schema.type_id(), name);
        if let Some(existing) = self.method_groups.get(&key) {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            return existing.value().clone();
        }
        self.stats.schema_scans.fetch_add(1, Ordering::Relaxed);
        let mut group: Vec<Arc<MethodAccessor>> = Vec::new();
        let mut level = Some(schema);
        let mut depth = 0usize;
        while let Some(current) = level {
            for method in current.methods() {
                if method.name() != name {
                    continue;
                }
                if group.iter().any(|seen| seen.params() == method.params()) {
                    // redeclared below: the base overload is hidden
                    continue;
                }
                group.push(Arc::new(MethodAccessor::compile(current, method, depth)));
            }
            level = current.base_schema();
            depth += 1;
        }
        self.stats
            .compiled
            .fetch_add(group.len() as u64, Ordering::Relaxed);
        self.method_groups
            .entry(key)
            .or_insert(Arc::new(group))
            .value()
            .clone()
    }

    /// Resolves the method to invoke for a name and a concrete argument list.
    ///
    /// Selection mirrors constructor selection: a single same-named candidate is
    /// always chosen (its accessor coerces the arguments); several candidates
    /// require one whose signature the arguments fit exactly.
    ///
    /// # Errors
    ///
    /// [`Error::MethodNotFound`] when the name resolves to nothing;
    /// [`Error::NoMatchingOverload`] when candidates exist but none fits.
    pub fn resolve_method(
        &self,
        schema: &'static ClassSchema,
        name: &str,
        args: &[Value],
    ) -> Result<Arc<MethodAccessor>> {
        let group = self.methods_named(schema, name);
        match group.len() {
            0 => Err(Error::MethodNotFound {
                class: schema.name(),
                name: name.to_string(),
            }),
            1 => Ok(group[0].clone()),
            _ => group
                .iter()
                .find(|candidate| candidate.matches(args))
                .cloned()
                .ok_or(Error::NoMatchingOverload {
                    class: schema.name(),
                    name: name.to_string(),
                }),
        }
    }

    /// Precompiles the visible-property maps and constructor lists of many classes
    /// in parallel.
    ///
    /// Useful at host startup so the first real request on any worker thread pays
    /// no compilation cost.
    pub fn prewarm(&self, schemas: &[&'static ClassSchema]) {
        schemas.par_iter().for_each(|schema| {
            self.visible_properties(schema);
            self.constructors(schema);
        });
    }

    /// A point-in-time copy of the cache counters.
    #[must_use]
    pub fn stats(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.stats.hits.load(Ordering::Relaxed),
            schema_scans: self.stats.schema_scans.load(Ordering::Relaxed),
            compiled: self.stats.compiled.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for AccessorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessorCache")
            .field("properties", &self.properties.len())
            .field("methods", &self.methods.len())
            .field("constructors", &self.constructors.len())
            .field("visible", &self.visible.len())
            .field("stats", &self.stats())
            .finish()
    }
}
