//! The convention-based object mapper.
//!
//! Copies same-named, settable properties from a source instance to a destination
//! instance, converting values when the declared types differ and recursing into
//! nested plain data objects. Mapping is best-effort per property: a property that
//! cannot be carried over is left at its prior value and never fails the whole
//! operation.
//!
//! All member access goes through the shared
//! [`AccessorCache`](crate::access::AccessorCache) - the mapper performs no schema
//! scans of its own on the hot path.

use std::sync::Arc;

use tracing::trace;

use crate::access::{AccessorCache, PropertyAccessor};
use crate::schema::{ClassSchema, Reflect, ReflectClass, SchemaRegistry};
use crate::value::{convert, ConvertOptions, Value, ValueTy};

/// Convention-based, best-effort property copier.
///
/// For every public, settable property on the destination's runtime class the
/// mapper:
///
/// 1. looks up a same-named (case-insensitive) readable source property - absent
///    means skip;
/// 2. applies the entity foreign-key rule (see below);
/// 3. assigns directly when the value already fits the declared destination type;
/// 4. otherwise attempts a best-effort conversion honouring the mapper's
///    [`ConvertOptions`];
/// 5. otherwise, when both declared types are plain data classes, constructs a
///    fresh nested destination instance and maps into it recursively;
/// 6. otherwise leaves the property untouched.
///
/// # The Foreign-Key Rule
///
/// When the destination class is a persisted entity, the destination property is a
/// nullable 32-bit integer whose name ends in `"Id"`, the source property is a
/// (possibly nullable) 32-bit integer, and the source value is zero, the mapper
/// writes null instead of zero. This keeps model-to-entity mapping from planting
/// spurious zero foreign keys.
///
/// # Cycles
///
/// Recursive mapping is bounded only by the object graph being finite; cyclic
/// plain-object graphs are not defended against.
pub struct ObjectMapper {
    cache: Arc<AccessorCache>,
    schemas: Arc<SchemaRegistry>,
    options: ConvertOptions,
}

impl ObjectMapper {
    /// Creates a mapper over the given accessor cache and schema registry.
    ///
    /// The registry is consulted only for nested destination construction; classes
    /// that never appear as nested destinations need not be registered.
    #[must_use]
    pub fn new(cache: Arc<AccessorCache>, schemas: Arc<SchemaRegistry>) -> Self {
        ObjectMapper {
            cache,
            schemas,
            options: ConvertOptions::default(),
        }
    }

    /// Replaces the conversion options used for mismatched property types.
    #[must_use]
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Maps `source` onto `destination` in place.
    ///
    /// Best-effort per property; the call itself never fails.
    pub fn map(&self, source: &dyn Reflect, destination: &mut dyn Reflect) {
        let dest_schema = destination.class();
        let dest_visible = self.cache.visible_properties(dest_schema);
        let source_visible = self.cache.visible_properties(source.class());

        for dest_prop in dest_visible.iter() {
            if !dest_prop.is_settable() {
                continue;
            }
            let Some(source_prop) = source_visible.find(dest_prop.name()) else {
                continue;
            };
            let Ok(value) = source_prop.get(source) else {
                continue;
            };

            if fk_zero_to_null(dest_schema, dest_prop, source_prop.ty(), &value) {
                let _ = dest_prop.set(destination, Value::Null);
                continue;
            }

            if dest_prop.ty().accepts(&value) && dest_prop.set(destination, value.clone()).is_ok()
            {
                continue;
            }

            if let Ok(converted) = convert(&value, dest_prop.ty(), &self.options) {
                if dest_prop.set(destination, converted).is_ok() {
                    continue;
                }
            }

            self.map_nested(dest_prop, source_prop, &value, destination);
        }
    }

    /// Default-constructs a destination, maps `source` into it and returns it.
    #[must_use]
    pub fn map_into<T: ReflectClass + Default>(&self, source: &dyn Reflect) -> T {
        let mut destination = T::default();
        self.map(source, &mut destination);
        destination
    }

    /// Step 5: both sides are plain data classes of different types - construct a
    /// fresh nested destination and recurse.
    fn map_nested(
        &self,
        dest_prop: &PropertyAccessor,
        source_prop: &PropertyAccessor,
        value: &Value,
        destination: &mut dyn Reflect,
    ) {
        let Some(dest_obj) = dest_prop.ty().object_ty() else {
            return;
        };
        if source_prop.ty().object_ty().is_none() {
            return;
        }
        let Value::Object(nested_source) = value else {
            return;
        };
        let Some(nested_schema) = self.schemas.get(dest_obj.id()) else {
            trace!(
                class = dest_obj.name(),
                "nested destination class not registered, property skipped"
            );
            return;
        };
        let Some(mut nested) = nested_schema.new_default() else {
            trace!(
                class = nested_schema.name(),
                "nested destination class has no default factory, property skipped"
            );
            return;
        };
        self.map(nested_source.as_ref(), nested.as_mut());
        if dest_prop.set(destination, Value::Object(nested)).is_err() {
            trace!(
                property = dest_prop.name(),
                "nested destination write failed, property skipped"
            );
        }
    }
}

impl std::fmt::Debug for ObjectMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectMapper")
            .field("options", &self.options)
            .finish()
    }
}

fn fk_zero_to_null(
    dest_schema: &ClassSchema,
    dest_prop: &PropertyAccessor,
    source_ty: &ValueTy,
    value: &Value,
) -> bool {
    dest_schema.is_entity()
        && dest_prop.name().ends_with("Id")
        && matches!(dest_prop.ty(), ValueTy::Nullable(inner) if **inner == ValueTy::I32)
        && (*source_ty == ValueTy::I32
            || matches!(source_ty, ValueTy::Nullable(inner) if **inner == ValueTy::I32))
        && matches!(value, Value::I32(0))
}
