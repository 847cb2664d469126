//! Constructor descriptors: a parameter signature plus an erased factory delegate.

use std::sync::Arc;

use crate::schema::Reflect;
use crate::value::{Value, ValueTy};
use crate::Result;

/// Erased constructor delegate: `args -> boxed instance`.
pub type CtorFn = Arc<dyn Fn(&[Value]) -> Result<Box<dyn Reflect>> + Send + Sync>;

/// One parameterized constructor as declared on a class schema.
///
/// The parameter list is never empty: default construction is the language's own
/// cheap path ([`ClassSchema::new_default`](crate::schema::ClassSchema::new_default))
/// and is intentionally excluded from the overload list.
pub struct ConstructorSchema {
    params: Vec<ValueTy>,
    invoke: CtorFn,
}

impl ConstructorSchema {
    pub(crate) fn new(params: Vec<ValueTy>, invoke: CtorFn) -> Self {
        ConstructorSchema { params, invoke }
    }

    /// The declared parameter types, in order.
    #[must_use]
    pub fn params(&self) -> &[ValueTy] {
        &self.params
    }

    /// The factory delegate.
    #[must_use]
    pub fn invoker(&self) -> &CtorFn {
        &self.invoke
    }
}

impl std::fmt::Debug for ConstructorSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorSchema")
            .field("params", &self.params)
            .finish()
    }
}
