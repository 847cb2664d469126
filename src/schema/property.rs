//! Property descriptors: a declared slot type plus erased get/set delegates.

use std::sync::Arc;

use crate::schema::Reflect;
use crate::value::{Value, ValueTy};
use crate::Result;

/// Erased property getter delegate: `instance -> value`.
pub type GetFn = Arc<dyn Fn(&dyn Reflect) -> Result<Value> + Send + Sync>;

/// Erased property setter delegate: `(instance, value) -> ()`.
pub type SetFn = Arc<dyn Fn(&mut dyn Reflect, Value) -> Result<()> + Send + Sync>;

/// One property as declared on a class schema.
///
/// The delegates are strict: they expect an instance of the declaring class (the
/// accessor layer handles base hops for derived instances) and, on the setter side,
/// a value the field type accepts. Cross-type conversion happens above, never here.
pub struct PropertySchema {
    name: &'static str,
    ty: ValueTy,
    get: GetFn,
    set: Option<SetFn>,
}

impl PropertySchema {
    pub(crate) fn new(name: &'static str, ty: ValueTy, get: GetFn, set: Option<SetFn>) -> Self {
        PropertySchema { name, ty, get, set }
    }

    /// The declared property name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared slot type.
    #[must_use]
    pub fn ty(&self) -> &ValueTy {
        &self.ty
    }

    /// Returns `true` if the property has a setter.
    #[must_use]
    pub fn is_settable(&self) -> bool {
        self.set.is_some()
    }

    /// The getter delegate.
    #[must_use]
    pub fn getter(&self) -> &GetFn {
        &self.get
    }

    /// The setter delegate, if the property is writable.
    #[must_use]
    pub fn setter(&self) -> Option<&SetFn> {
        self.set.as_ref()
    }
}

impl std::fmt::Debug for PropertySchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertySchema")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("settable", &self.is_settable())
            .finish()
    }
}
