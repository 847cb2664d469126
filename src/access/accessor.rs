//! Compiled member accessors.
//!
//! An accessor is the cached product of one slow-path member resolution: the erased
//! delegate taken from the declaring schema, plus everything needed to apply it to a
//! most-derived instance without touching the schema again - the base-hop depth, the
//! declared slot type, and the member's flags. Accessors are immutable after
//! construction and shared read-only (`Arc`) by every caller that hits the cache.

use bitflags::bitflags;

use crate::schema::{
    ClassSchema, ConstructorSchema, CtorFn, GetFn, MethodFn, MethodSchema, PropertySchema,
    Reflect, SetFn,
};
use crate::value::{coerce_argument, Value, ValueTy};
use crate::{Error, Result};

bitflags! {
    /// Metadata flags carried by a compiled property accessor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessorFlags: u8 {
        /// The property has a public setter.
        const SETTABLE = 0b0000_0001;
        /// The declared slot type is a sequence.
        const SEQUENCE = 0b0000_0010;
    }
}

/// A compiled property accessor: getter, optional setter, and member metadata.
pub struct PropertyAccessor {
    class: &'static str,
    name: &'static str,
    ty: ValueTy,
    flags: AccessorFlags,
    depth: usize,
    get: GetFn,
    set: Option<SetFn>,
}

impl PropertyAccessor {
    pub(crate) fn compile(owner: &'static ClassSchema, prop: &PropertySchema, depth: usize) -> Self {
        let mut flags = AccessorFlags::empty();
        if prop.is_settable() {
            flags |= AccessorFlags::SETTABLE;
        }
        if prop.ty().is_sequence() {
            flags |= AccessorFlags::SEQUENCE;
        }
        PropertyAccessor {
            class: owner.name(),
            name: prop.name(),
            ty: prop.ty().clone(),
            flags,
            depth,
            get: prop.getter().clone(),
            set: prop.setter().cloned(),
        }
    }

    /// Name of the class declaring the property.
    #[must_use]
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// The declared property name (declaring spelling, not the folded lookup key).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared slot type.
    #[must_use]
    pub fn ty(&self) -> &ValueTy {
        &self.ty
    }

    /// The accessor metadata flags.
    #[must_use]
    pub fn flags(&self) -> AccessorFlags {
        self.flags
    }

    /// Returns `true` if the property has a setter.
    #[must_use]
    pub fn is_settable(&self) -> bool {
        self.flags.contains(AccessorFlags::SETTABLE)
    }

    /// Returns `true` if the declared slot type is a sequence.
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        self.flags.contains(AccessorFlags::SEQUENCE)
    }

    /// Number of base hops from the most-derived class to the declaring class.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Reads the property from an instance.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when the instance is not of (or derived from) the
    /// class this accessor was compiled for.
    pub fn get(&self, instance: &dyn Reflect) -> Result<Value> {
        let target = self.target(instance)?;
        (self.get)(target)
    }

    /// Writes the property on an instance.
    ///
    /// # Errors
    ///
    /// [`Error::ReadOnlyProperty`] when the property has no setter;
    /// [`Error::ConversionFailed`] when the value does not fit the declared slot;
    /// [`Error::TypeMismatch`] on an instance of the wrong class.
    pub fn set(&self, instance: &mut dyn Reflect, value: Value) -> Result<()> {
        let Some(set) = &self.set else {
            return Err(Error::ReadOnlyProperty {
                class: self.class,
                name: self.name.to_string(),
            });
        };
        let target = self.target_mut(instance)?;
        set(target, value)
    }

    fn target<'a>(&self, instance: &'a dyn Reflect) -> Result<&'a dyn Reflect> {
        let mut current = instance;
        for _ in 0..self.depth {
            current = current.base().ok_or(Error::TypeMismatch {
                expected: self.class,
            })?;
        }
        Ok(current)
    }

    fn target_mut<'a>(&self, instance: &'a mut dyn Reflect) -> Result<&'a mut dyn Reflect> {
        let mut current = instance;
        for _ in 0..self.depth {
            current = current.base_mut().ok_or(Error::TypeMismatch {
                expected: self.class,
            })?;
        }
        Ok(current)
    }
}

impl std::fmt::Debug for PropertyAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyAccessor")
            .field("class", &self.class)
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("flags", &self.flags)
            .field("depth", &self.depth)
            .finish()
    }
}

/// A compiled method invoker with its declared parameter signature.
pub struct MethodAccessor {
    class: &'static str,
    name: &'static str,
    params: Vec<ValueTy>,
    depth: usize,
    invoke: MethodFn,
}

impl MethodAccessor {
    pub(crate) fn compile(owner: &'static ClassSchema, method: &MethodSchema, depth: usize) -> Self {
        MethodAccessor {
            class: owner.name(),
            name: method.name(),
            params: method.params().to_vec(),
            depth,
            invoke: method.invoker().clone(),
        }
    }

    /// Name of the class declaring the method.
    #[must_use]
    pub fn class(&self) -> &'static str {
        self.class
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

    /// Returns `true` if every supplied argument fits the declared signature as-is.
    #[must_use]
    pub fn matches(&self, args: &[Value]) -> bool {
        self.params.len() == args.len()
            && self
                .params
                .iter()
                .zip(args)
                .all(|(param, arg)| param.accepts(arg))
    }

    /// Invokes the method on an instance.
    ///
    /// Arguments are coerced one by one to the declared parameter types before the
    /// call: a null argument to a non-nullable parameter materializes as that
    /// type's default, and convertible mismatches are converted.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentCount`] on arity mismatch, [`Error::ConversionFailed`] when
    /// an argument cannot be coerced, [`Error::TypeMismatch`] on an instance of the
    /// wrong class.
    pub fn invoke(&self, instance: &mut dyn Reflect, args: &[Value]) -> Result<Value> {
        if args.len() != self.params.len() {
            return Err(Error::ArgumentCount {
                expected: self.params.len(),
                actual: args.len(),
            });
        }
        let coerced = self.coerce(args)?;
        let mut current: &mut dyn Reflect = instance;
        for _ in 0..self.depth {
            current = current.base_mut().ok_or(Error::TypeMismatch {
                expected: self.class,
            })?;
        }
        (self.invoke)(current, &coerced)
    }

    fn coerce(&self, args: &[Value]) -> Result<Vec<Value>> {
        self.params
            .iter()
            .zip(args)
            .map(|(param, arg)| coerce_argument(arg, param))
            .collect()
    }
}

impl std::fmt::Debug for MethodAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodAccessor")
            .field("class", &self.class)
            .field("name", &self.name)
            .field("params", &self.params)
            .field("depth", &self.depth)
            .finish()
    }
}

/// A compiled constructor invoker with its declared parameter signature.
pub struct ConstructorAccessor {
    class: &'static str,
    params: Vec<ValueTy>,
    invoke: CtorFn,
}

impl ConstructorAccessor {
    pub(crate) fn compile(owner: &'static ClassSchema, ctor: &ConstructorSchema) -> Self {
        ConstructorAccessor {
            class: owner.name(),
            params: ctor.params().to_vec(),
            invoke: ctor.invoker().clone(),
        }
    }

    /// Name of the constructed class.
    #[must_use]
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// The declared parameter types, in order.
    #[must_use]
    pub fn params(&self) -> &[ValueTy] {
        &self.params
    }

    /// Returns `true` if every supplied argument fits the declared signature as-is.
    #[must_use]
    pub fn matches(&self, args: &[Value]) -> bool {
        self.params.len() == args.len()
            && self
                .params
                .iter()
                .zip(args)
                .all(|(param, arg)| param.accepts(arg))
    }

    /// Constructs a fresh instance from the supplied arguments.
    ///
    /// Arguments are coerced to the declared parameter types first, the same way
    /// method arguments are.
    ///
    /// # Errors
    ///
    /// [`Error::NoMatchingConstructor`] on arity mismatch,
    /// [`Error::ConversionFailed`] when an argument cannot be coerced.
    pub fn invoke(&self, args: &[Value]) -> Result<Box<dyn Reflect>> {
        if args.len() != self.params.len() {
            return Err(Error::NoMatchingConstructor {
                class: self.class,
                argc: args.len(),
            });
        }
        let coerced: Vec<Value> = self
            .params
            .iter()
            .zip(args)
            .map(|(param, arg)| coerce_argument(arg, param))
            .collect::<Result<_>>()?;
        (self.invoke)(&coerced)
    }
}

impl std::fmt::Debug for ConstructorAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorAccessor")
            .field("class", &self.class)
            .field("params", &self.params)
            .finish()
    }
}
