//! Class schemas - the explicit reflection metadata this library operates on.
//!
//! Rust has no ambient runtime reflection, so every type that participates in dynamic
//! member access describes itself through a [`ClassSchema`]: its properties (with
//! erased getter/setter delegates), methods, parameterized constructors, an optional
//! default factory, class flags, and an optional link to a base class. The schema is
//! built once per type behind a `OnceLock` and shared as a `&'static` reference for
//! the lifetime of the process.
//!
//! # Key Components
//!
//! - [`Reflect`] - the object-safe trait every schema-described instance implements
//! - [`ReflectClass`] - the sized companion giving static access to a type's schema
//! - [`ClassSchema`] - the per-type member directory
//! - [`SchemaBuilder`] - fluent construction of a schema from typed accessors
//! - [`SchemaRegistry`] - a shared directory of schemas, indexed by `TypeId` and name
//!
//! # Inheritance
//!
//! The described object model has single inheritance. On the Rust side a derived
//! class embeds its base as a field and reports it through [`Reflect::base`]; the
//! schema mirrors the link via [`ClassSchema::base_schema`]. Compiled accessors
//! record how many base hops separate the most-derived class from the member's
//! declaring class, so inherited members work on derived instances without a
//! downcast per call.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::OnceLock;
//! use protean::schema::{ClassSchema, ReflectClass};
//! use protean::impl_reflect;
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct Address {
//!     city: String,
//! }
//!
//! impl ReflectClass for Address {
//!     const NAME: &'static str = "Address";
//!
//!     fn class_of() -> &'static ClassSchema {
//!         static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
//!         SCHEMA.get_or_init(|| {
//!             ClassSchema::builder::<Address>(Self::NAME)
//!                 .with_default()
//!                 .property_rw("City", |a: &Address| a.city.clone(), |a, v| a.city = v)
//!                 .build()
//!         })
//!     }
//! }
//!
//! impl_reflect!(Address);
//!
//! let schema = Address::class_of();
//! assert_eq!(schema.name(), "Address");
//! assert_eq!(schema.properties().len(), 1);
//! ```

mod builder;
mod class_macro;
mod constructor;
mod method;
mod property;
mod registry;

pub use builder::SchemaBuilder;
pub use constructor::{ConstructorSchema, CtorFn};
pub use method::{MethodFn, MethodSchema};
pub use property::{GetFn, PropertySchema, SetFn};
pub use registry::SchemaRegistry;

use std::any::{Any, TypeId};
use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Class-level traits a schema can carry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClassFlags: u8 {
        /// The class models a persisted entity; the mapper's foreign-key
        /// zero-to-null rule applies only to entity destinations.
        const ENTITY = 0b0000_0001;
    }
}

/// The object-safe trait implemented by every schema-described instance.
///
/// Implementations are generated by [`impl_reflect!`](crate::impl_reflect), which
/// requires `Clone` and `PartialEq` on the type. The trait is what accessors,
/// dynamic objects and mappers operate on; user code rarely calls it directly.
pub trait Reflect: Any + Send + Sync {
    /// The schema of this instance's runtime class.
    fn class(&self) -> &'static ClassSchema;

    /// Borrows the instance as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrows the instance as [`Any`] for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clones the instance behind a fresh box.
    fn clone_boxed(&self) -> Box<dyn Reflect>;

    /// Structural equality against another instance; `false` across classes.
    fn reflect_eq(&self, other: &dyn Reflect) -> bool;

    /// The embedded base-class instance, for derived classes.
    fn base(&self) -> Option<&dyn Reflect> {
        None
    }

    /// The embedded base-class instance, mutably.
    fn base_mut(&mut self) -> Option<&mut dyn Reflect> {
        None
    }
}

impl dyn Reflect {
    /// Returns `true` if the instance is of class `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts the instance to a concrete class reference.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcasts the instance to a mutable concrete class reference.
    #[must_use]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class().name())
    }
}

/// Static schema access for a concrete schema-described class.
///
/// Implemented by hand next to the type definition; the body is a `OnceLock`-guarded
/// [`SchemaBuilder`] run, so the schema is constructed at most once per process.
pub trait ReflectClass: Reflect + Sized {
    /// The declared class name, as it appears in schemas and diagnostics.
    const NAME: &'static str;

    /// The schema of this class.
    fn class_of() -> &'static ClassSchema;
}

/// The member directory of one schema-described class.
///
/// Immutable after construction and shared as `&'static` for the process lifetime.
/// Holds the class identity, its declared members in declaration order, the optional
/// default factory and the optional base-class link.
pub struct ClassSchema {
    name: &'static str,
    type_id: TypeId,
    flags: ClassFlags,
    properties: Vec<PropertySchema>,
    methods: Vec<MethodSchema>,
    constructors: Vec<ConstructorSchema>,
    new_default: Option<fn() -> Box<dyn Reflect>>,
    base: Option<fn() -> &'static ClassSchema>,
}

impl ClassSchema {
    pub(crate) fn new(
        name: &'static str,
        type_id: TypeId,
        flags: ClassFlags,
        properties: Vec<PropertySchema>,
        methods: Vec<MethodSchema>,
        constructors: Vec<ConstructorSchema>,
        new_default: Option<fn() -> Box<dyn Reflect>>,
        base: Option<fn() -> &'static ClassSchema>,
    ) -> Self {
        ClassSchema {
            name,
            type_id,
            flags,
            properties,
            methods,
            constructors,
            new_default,
            base,
        }
    }

    /// Starts a builder for the schema of class `T`.
    #[must_use]
    pub fn builder<T: Reflect>(name: &'static str) -> SchemaBuilder<T> {
        SchemaBuilder::new(name)
    }

    /// The declared class name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The `TypeId` of the described class.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The class-level flags.
    #[must_use]
    pub fn flags(&self) -> ClassFlags {
        self.flags
    }

    /// Returns `true` if the class models a persisted entity.
    #[must_use]
    pub fn is_entity(&self) -> bool {
        self.flags.contains(ClassFlags::ENTITY)
    }

    /// The properties declared directly on this class, in declaration order.
    ///
    /// Inherited properties live on the base schemas; the accessor cache's
    /// visible-property computation merges the chain.
    #[must_use]
    pub fn properties(&self) -> &[PropertySchema] {
        &self.properties
    }

    /// The methods declared directly on this class, in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodSchema] {
        &self.methods
    }

    /// The parameterized constructors of this class, in declaration order.
    ///
    /// The zero-argument constructor is deliberately not listed here: default
    /// construction goes through [`ClassSchema::new_default`], which is cheap
    /// without caching.
    #[must_use]
    pub fn constructors(&self) -> &[ConstructorSchema] {
        &self.constructors
    }

    /// Default-constructs a fresh instance, if the class registered a default
    /// factory.
    #[must_use]
    pub fn new_default(&self) -> Option<Box<dyn Reflect>> {
        self.new_default.map(|factory| factory())
    }

    /// Returns `true` if the class registered a default factory.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.new_default.is_some()
    }

    /// The schema of the base class, for derived classes.
    #[must_use]
    pub fn base_schema(&self) -> Option<&'static ClassSchema> {
        self.base.map(|link| link())
    }
}

impl fmt::Debug for ClassSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassSchema")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("properties", &self.properties.len())
            .field("methods", &self.methods.len())
            .field("constructors", &self.constructors.len())
            .field("base", &self.base_schema().map(ClassSchema::name))
            .finish()
    }
}
