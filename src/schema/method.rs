//! Method descriptors: a parameter signature plus an erased invoker delegate.

use std::sync::Arc;

use crate::schema::Reflect;
use crate::value::{Value, ValueTy};
use crate::Result;

/// Erased method invoker delegate: `(instance, args) -> value`.
pub type MethodFn = Arc<dyn Fn(&mut dyn Reflect, &[Value]) -> Result<Value> + Send + Sync>;

/// One method as declared on a class schema.
///
/// Methods resolve by exact, case-sensitive name (unlike properties) and are
/// distinguished from overloads by their parameter signature. The invoker expects
/// arguments already coerced to the declared parameter types.
pub struct MethodSchema {
    name: &'static str,
    params: Vec<ValueTy>,
    invoke: MethodFn,
}

impl MethodSchema {
    pub(crate) fn new(name: &'static str, params: Vec<ValueTy>, invoke: MethodFn) -> Self {
        MethodSchema {
            name,
            params,
            invoke,
        }
    }

    /// The declared method name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared parameter types, in order.
    #[must_use]
    pub fn params(&self) -> &[ValueTy] {
        &self.params
    }

    /// The invoker delegate.
    #[must_use]
    pub fn invoker(&self) -> &MethodFn {
        &self.invoke
    }
}

impl std::fmt::Debug for MethodSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodSchema")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}
