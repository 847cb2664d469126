//! The hybrid dynamic object: a typed backing instance merged with an ordered
//! key/value bag under deterministic member-resolution rules.
//!
//! A [`HybridExpando`] composes up to three things:
//!
//! 1. its own [`PropertyBag`] (always present),
//! 2. an optional backing instance, accessed through the shared
//!    [`AccessorCache`](crate::access::AccessorCache),
//! 3. an optional [`MemberFilter`] restricting which instance properties are
//!    visible.
//!
//! # Resolution Order
//!
//! **Get**: the bag wins - a bag entry shadows a same-named instance property, so
//! user overrides show through. Only when the bag misses is the (filtered) instance
//! probed, case-insensitively.
//!
//! **Set**: the instance wins - a write that matches a visible, settable instance
//! property goes through to the real object; everything else lands in the bag. The
//! priorities are deliberately opposite: reads must surface overrides, writes must
//! not orphan real object state while a real property exists.
//!
//! Any failure while *probing* the instance (missing member, failed conversion) is
//! swallowed and falls through to the next source; a set never fails and a get
//! fails only with "not found". The one exception is an internal accessor fault
//! ([`TypeMismatch`](crate::Error::TypeMismatch)), which always propagates.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::{Arc, OnceLock};
//! use protean::access::AccessorCache;
//! use protean::expando::HybridExpando;
//! use protean::schema::{ClassSchema, ReflectClass};
//! use protean::value::Value;
//! use protean::impl_reflect;
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct Customer {
//!     name: String,
//! }
//!
//! impl ReflectClass for Customer {
//!     const NAME: &'static str = "Customer";
//!
//!     fn class_of() -> &'static ClassSchema {
//!         static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
//!         SCHEMA.get_or_init(|| {
//!             ClassSchema::builder::<Customer>(Self::NAME)
//!                 .with_default()
//!                 .property_rw("Name", |c: &Customer| c.name.clone(), |c, v| c.name = v)
//!                 .build()
//!         })
//!     }
//! }
//!
//! impl_reflect!(Customer);
//!
//! let cache = Arc::new(AccessorCache::new());
//! let customer = Customer { name: "Ada".into() };
//! let mut expando = HybridExpando::wrap(cache, Box::new(customer));
//!
//! // instance property, resolved case-insensitively
//! assert_eq!(expando.get("name").unwrap(), Value::Str("Ada".into()));
//!
//! // a bag override shadows the instance on get
//! expando.bag_set("Name", Value::Str("Grace".into()));
//! assert_eq!(expando.get("Name").unwrap(), Value::Str("Grace".into()));
//!
//! // set writes through to the real property when one exists
//! expando.remove("Name");
//! expando.set("Name", Value::Str("Lin".into()));
//! assert_eq!(expando.get("Name").unwrap(), Value::Str("Lin".into()));
//! ```

mod bag;
mod filter;

pub use bag::PropertyBag;
pub use filter::{FilterMode, MemberFilter};

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::trace;

use crate::access::{AccessorCache, PropertyAccessor};
use crate::schema::Reflect;
use crate::value::{convert, ConvertOptions, Value};
use crate::{Error, Result};

/// A caller-supplied truthiness predicate for the falsy-to-null display mode.
pub type TruthyFn = fn(&Value) -> bool;

/// The facade's private, filtered view of the backing instance's properties.
#[derive(Default)]
struct EffectiveMembers {
    by_name: HashMap<String, Arc<PropertyAccessor>>,
    order: Vec<Arc<PropertyAccessor>>,
}

impl EffectiveMembers {
    fn find(&self, name: &str) -> Option<&Arc<PropertyAccessor>> {
        self.by_name.get(&name.to_ascii_lowercase())
    }
}

/// A dynamic object over an ordered bag, an optional backing instance and an
/// optional member filter.
///
/// Not internally synchronized: a facade has a single logical owner. The shared
/// [`AccessorCache`] it delegates to remains safe under concurrent use from any
/// number of facades.
pub struct HybridExpando {
    cache: Arc<AccessorCache>,
    instance: Option<Box<dyn Reflect>>,
    filter: Option<MemberFilter>,
    bag: PropertyBag,
    truthy: Option<TruthyFn>,
    members: OnceLock<Arc<EffectiveMembers>>,
}

impl HybridExpando {
    /// Creates a bag-only dynamic object with no backing instance.
    #[must_use]
    pub fn new(cache: Arc<AccessorCache>) -> Self {
        HybridExpando {
            cache,
            instance: None,
            filter: None,
            bag: PropertyBag::new(),
            truthy: None,
            members: OnceLock::new(),
        }
    }

    /// Wraps a backing instance; all of its visible properties are exposed.
    #[must_use]
    pub fn wrap(cache: Arc<AccessorCache>, instance: Box<dyn Reflect>) -> Self {
        HybridExpando {
            cache,
            instance: Some(instance),
            filter: None,
            bag: PropertyBag::new(),
            truthy: None,
            members: OnceLock::new(),
        }
    }

    /// Wraps a backing instance behind a member filter.
    #[must_use]
    pub fn wrap_filtered(
        cache: Arc<AccessorCache>,
        instance: Box<dyn Reflect>,
        filter: MemberFilter,
    ) -> Self {
        HybridExpando {
            cache,
            instance: Some(instance),
            filter: Some(filter),
            bag: PropertyBag::new(),
            truthy: None,
            members: OnceLock::new(),
        }
    }

    /// Enables the falsy-to-null display mode with the default truthiness
    /// predicate ([`Value::is_truthy`]).
    ///
    /// When enabled, a resolved value that is non-null but falsy (empty string,
    /// zero, `false`, empty sequence) reads back as null - uniformly for bag and
    /// instance sources. Display-oriented normalization, not a type coercion;
    /// stored values are untouched.
    #[must_use]
    pub fn falsy_returns_null(mut self) -> Self {
        self.truthy = Some(Value::is_truthy as TruthyFn);
        self
    }

    /// Enables the falsy-to-null display mode with a caller-supplied truthiness
    /// predicate.
    #[must_use]
    pub fn with_truthiness(mut self, predicate: TruthyFn) -> Self {
        self.truthy = Some(predicate);
        self
    }

    /// Reads a member by name.
    ///
    /// Resolution order: bag entry (exact key) first, then a filter-permitted
    /// instance property (case-insensitive).
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when neither source carries the name; an internal
    /// accessor fault propagates as [`Error::TypeMismatch`].
    pub fn get(&self, name: &str) -> Result<Value> {
        if let Some(value) = self.bag.get(name) {
            return Ok(self.normalize(value.clone()));
        }
        if let Some(instance) = &self.instance {
            if let Some(accessor) = self.members().find(name) {
                let value = accessor.get(instance.as_ref())?;
                return Ok(self.normalize(value));
            }
        }
        Err(Error::KeyNotFound(name.to_string()))
    }

    /// Reads a member by name without erroring; `None` means "not found".
    #[must_use]
    pub fn try_get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bag.get(name) {
            return Some(self.normalize(value.clone()));
        }
        let instance = self.instance.as_ref()?;
        let accessor = self.members().find(name)?.clone();
        let value = accessor.get(instance.as_ref()).ok()?;
        Some(self.normalize(value))
    }

    /// Writes a member by name. Never fails.
    ///
    /// If the backing instance exposes a filter-permitted, settable property with
    /// this name, the write goes through to the instance (converting the value when
    /// the declared type differs). Any probing or conversion failure falls through
    /// silently, and the value lands in the bag instead.
    pub fn set(&mut self, name: &str, value: Value) {
        if self.instance.is_some() {
            let accessor = self.members().find(name).cloned();
            if let Some(accessor) = accessor {
                if accessor.is_settable() {
                    if let Some(instance) = self.instance.as_mut() {
                        let attempt = if accessor.ty().accepts(&value) {
                            accessor.set(instance.as_mut(), value.clone())
                        } else {
                            convert(&value, accessor.ty(), &ConvertOptions::default())
                                .and_then(|converted| accessor.set(instance.as_mut(), converted))
                        };
                        match attempt {
                            Ok(()) => return,
                            Err(error) => {
                                trace!(name, %error, "instance write failed, falling through to bag");
                            }
                        }
                    }
                }
            }
        }
        self.bag.set(name, value);
    }

    /// Writes directly into the bag, bypassing the instance-first rule.
    ///
    /// This is how a caller deliberately shadows an instance property for reads.
    pub fn bag_set(&mut self, name: impl Into<String>, value: Value) {
        self.bag.set(name, value);
    }

    /// Removes a bag entry (un-shadowing a same-named instance property) and
    /// returns its value. Instance properties cannot be removed.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bag.remove(name)
    }

    /// Returns `true` if the name resolves - always against the bag, and against
    /// the visible instance properties when `include_instance` is set.
    #[must_use]
    pub fn contains(&self, name: &str, include_instance: bool) -> bool {
        if self.bag.contains(name) {
            return true;
        }
        include_instance && self.members().find(name).is_some()
    }

    /// The effective member names at this moment: bag keys in insertion order,
    /// then visible instance properties not shadowed (case-insensitively) by a bag
    /// key. No name appears twice.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bag.keys().map(str::to_string).collect();
        for accessor in &self.members().order {
            if !self.bag.shadows(accessor.name()) {
                names.push(accessor.name().to_string());
            }
        }
        names
    }

    /// Invokes a method on the backing instance.
    ///
    /// Methods resolve by exact, case-sensitive name; with several overloads the
    /// arguments must fit one signature exactly. The bag never stores callables.
    ///
    /// # Errors
    ///
    /// [`Error::MethodNotFound`] when there is no backing instance or the name
    /// resolves to nothing; [`Error::NoMatchingOverload`] when overloads exist but
    /// none fits the arguments.
    pub fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        let Some(instance) = self.instance.as_mut() else {
            return Err(Error::MethodNotFound {
                class: "untyped expando",
                name: name.to_string(),
            });
        };
        let schema = instance.class();
        let method = self.cache.resolve_method(schema, name, args)?;
        method.invoke(instance.as_mut(), args)
    }

    /// Borrows the backing instance, if any.
    #[must_use]
    pub fn instance(&self) -> Option<&dyn Reflect> {
        self.instance.as_deref()
    }

    /// Mutably borrows the backing instance, if any.
    #[must_use]
    pub fn instance_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.instance.as_deref_mut()
    }

    /// Consumes the facade and returns the backing instance, if any.
    #[must_use]
    pub fn into_instance(self) -> Option<Box<dyn Reflect>> {
        self.instance
    }

    /// The auxiliary bag, read-only. All mutation goes through [`set`](Self::set),
    /// [`bag_set`](Self::bag_set) and [`remove`](Self::remove).
    #[must_use]
    pub fn bag(&self) -> &PropertyBag {
        &self.bag
    }

    /// The member filter, if one was set at construction.
    #[must_use]
    pub fn filter(&self) -> Option<&MemberFilter> {
        self.filter.as_ref()
    }

    fn normalize(&self, value: Value) -> Value {
        if let Some(truthy) = self.truthy {
            if !value.is_null() && !truthy(&value) {
                return Value::Null;
            }
        }
        value
    }

    /// The filtered instance-member map, resolved once per facade and cached.
    fn members(&self) -> &Arc<EffectiveMembers> {
        self.members.get_or_init(|| {
            let Some(instance) = &self.instance else {
                return Arc::new(EffectiveMembers::default());
            };
            let visible = self.cache.visible_properties(instance.class());
            let mut by_name = HashMap::new();
            let mut order = Vec::new();
            for accessor in visible.iter() {
                if let Some(filter) = &self.filter {
                    if !filter.permits(accessor.name()) {
                        continue;
                    }
                }
                by_name.insert(accessor.name().to_ascii_lowercase(), accessor.clone());
                order.push(accessor.clone());
            }
            Arc::new(EffectiveMembers { by_name, order })
        })
    }
}

impl std::fmt::Debug for HybridExpando {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridExpando")
            .field("bag", &self.bag.len())
            .field(
                "instance",
                &self.instance.as_ref().map(|i| i.class().name()),
            )
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}
