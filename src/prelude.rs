//! # protean Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! traits from the protean library. Import this module to get quick access to the
//! essential types for dynamic member access and mapping.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all protean operations
pub use crate::Error;

/// The result type used throughout protean
pub use crate::Result;

// ================================================================================================
// Value Model
// ================================================================================================

/// Dynamic values, declared types and the field bridge
pub use crate::value::{convert, ConvertOptions, FieldValue, ObjectTy, Value, ValueKind, ValueTy};

// ================================================================================================
// Schemas
// ================================================================================================

/// Class schemas and the traits describing reflectable classes
pub use crate::schema::{
    ClassFlags, ClassSchema, Reflect, ReflectClass, SchemaBuilder, SchemaRegistry,
};

// ================================================================================================
// Accessors and Caching
// ================================================================================================

/// The accessor cache and its compiled accessor records
pub use crate::access::{
    AccessorCache, AccessorFlags, CacheStatsSnapshot, ConstructorAccessor, MemberKey,
    MethodAccessor, PropertyAccessor, VisibleProperties,
};

// ================================================================================================
// Dynamic Objects
// ================================================================================================

/// The hybrid dynamic object and its collaborators
pub use crate::expando::{FilterMode, HybridExpando, MemberFilter, PropertyBag};

// ================================================================================================
// Mapping
// ================================================================================================

/// The convention mapper and the typed mapper registry
pub use crate::mapping::{Mapper, MapperProvider, MapperRegistry, MapperSet, ObjectMapper};
