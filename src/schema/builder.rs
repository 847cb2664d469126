//! Fluent construction of a [`ClassSchema`] from typed accessors.
//!
//! The builder is where typed Rust code meets the erased member model: getters,
//! setters, method bodies and constructors are supplied as plain `fn` pointers over
//! the concrete class, and the builder wraps each in an erased delegate that
//! downcasts the incoming [`Reflect`] instance and bridges values through
//! [`FieldValue`]. A failed downcast surfaces as [`Error::TypeMismatch`] - the one
//! accessor error that is never swallowed by the soft-fail resolution paths.
//!
//! # Examples
//!
//! ```rust,ignore
//! ClassSchema::builder::<Money>("Money")
//!     .with_default()
//!     .property_rw("Amount", |m: &Money| m.amount, |m, v| m.amount = v)
//!     .property("Currency", |m: &Money| m.currency.clone())
//!     .constructor2(|amount: f64, currency: String| Money { amount, currency })
//!     .build()
//! ```

use std::any::TypeId;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::schema::{
    ClassFlags, ClassSchema, ConstructorSchema, CtorFn, GetFn, MethodFn, MethodSchema,
    PropertySchema, Reflect, ReflectClass, SetFn,
};
use crate::value::{FieldValue, Value};
use crate::Error;

/// Accumulates the members of a class schema before the one-time build.
///
/// Obtained from [`ClassSchema::builder`]; consumed by [`SchemaBuilder::build`].
pub struct SchemaBuilder<T> {
    name: &'static str,
    flags: ClassFlags,
    properties: Vec<PropertySchema>,
    methods: Vec<MethodSchema>,
    constructors: Vec<ConstructorSchema>,
    new_default: Option<fn() -> Box<dyn Reflect>>,
    base: Option<fn() -> &'static ClassSchema>,
    _class: PhantomData<fn() -> T>,
}

impl<T: Reflect> SchemaBuilder<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        SchemaBuilder {
            name,
            flags: ClassFlags::empty(),
            properties: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            new_default: None,
            base: None,
            _class: PhantomData,
        }
    }

    /// Marks the class as a persisted entity (see [`ClassFlags::ENTITY`]).
    #[must_use]
    pub fn entity(mut self) -> Self {
        self.flags |= ClassFlags::ENTITY;
        self
    }

    /// Replaces the class flags wholesale.
    #[must_use]
    pub fn flags(mut self, flags: ClassFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Links the schema to a base class; the type must embed a base instance and
    /// report it through [`Reflect::base`].
    #[must_use]
    pub fn extends<B: ReflectClass>(mut self) -> Self {
        self.base = Some(B::class_of);
        self
    }

    /// Registers the default factory, enabling
    /// [`ClassSchema::new_default`] and recursive mapping into this class.
    #[must_use]
    pub fn with_default(mut self) -> Self
    where
        T: Default,
    {
        fn factory<T: Reflect + Default>() -> Box<dyn Reflect> {
            Box::new(T::default())
        }
        self.new_default = Some(factory::<T>);
        self
    }

    /// Declares a read-only property.
    #[must_use]
    pub fn property<F: FieldValue>(mut self, name: &'static str, get: fn(&T) -> F) -> Self {
        let getter = Self::erase_getter(self.name, get);
        self.properties
            .push(PropertySchema::new(name, F::value_ty(), getter, None));
        self
    }

    /// Declares a readable and writable property.
    #[must_use]
    pub fn property_rw<F: FieldValue>(
        mut self,
        name: &'static str,
        get: fn(&T) -> F,
        set: fn(&mut T, F),
    ) -> Self {
        let class_name = self.name;
        let getter = Self::erase_getter(class_name, get);
        let setter: SetFn = Arc::new(move |obj: &mut dyn Reflect, value: Value| {
            let this = obj
                .downcast_mut::<T>()
                .ok_or(Error::TypeMismatch {
                    expected: class_name,
                })?;
            set(this, F::from_value(value)?);
            Ok(())
        });
        self.properties
            .push(PropertySchema::new(name, F::value_ty(), getter, Some(setter)));
        self
    }

    /// Declares a zero-parameter method.
    #[must_use]
    pub fn method0<R: FieldValue>(mut self, name: &'static str, invoke: fn(&mut T) -> R) -> Self {
        let class_name = self.name;
        let invoker: MethodFn = Arc::new(move |obj: &mut dyn Reflect, args: &[Value]| {
            expect_arity(0, args)?;
            let this = downcast_target::<T>(obj, class_name)?;
            Ok(invoke(this).into_value())
        });
        self.methods.push(MethodSchema::new(name, Vec::new(), invoker));
        self
    }

    /// Declares a one-parameter method.
    #[must_use]
    pub fn method1<A: FieldValue, R: FieldValue>(
        mut self,
        name: &'static str,
        invoke: fn(&mut T, A) -> R,
    ) -> Self {
        let class_name = self.name;
        let invoker: MethodFn = Arc::new(move |obj: &mut dyn Reflect, args: &[Value]| {
            expect_arity(1, args)?;
            let a0 = A::from_value(args[0].clone())?;
            let this = downcast_target::<T>(obj, class_name)?;
            Ok(invoke(this, a0).into_value())
        });
        self.methods
            .push(MethodSchema::new(name, vec![A::value_ty()], invoker));
        self
    }

    /// Declares a two-parameter method.
    #[must_use]
    pub fn method2<A: FieldValue, B: FieldValue, R: FieldValue>(
        mut self,
        name: &'static str,
        invoke: fn(&mut T, A, B) -> R,
    ) -> Self {
        let class_name = self.name;
        let invoker: MethodFn = Arc::new(move |obj: &mut dyn Reflect, args: &[Value]| {
            expect_arity(2, args)?;
            let a0 = A::from_value(args[0].clone())?;
            let a1 = B::from_value(args[1].clone())?;
            let this = downcast_target::<T>(obj, class_name)?;
            Ok(invoke(this, a0, a1).into_value())
        });
        self.methods.push(MethodSchema::new(
            name,
            vec![A::value_ty(), B::value_ty()],
            invoker,
        ));
        self
    }

    /// Declares a one-parameter constructor.
    #[must_use]
    pub fn constructor1<A: FieldValue>(mut self, invoke: fn(A) -> T) -> Self {
        let invoker: CtorFn = Arc::new(move |args: &[Value]| {
            expect_arity(1, args)?;
            let a0 = A::from_value(args[0].clone())?;
            Ok(Box::new(invoke(a0)) as Box<dyn Reflect>)
        });
        self.constructors
            .push(ConstructorSchema::new(vec![A::value_ty()], invoker));
        self
    }

    /// Declares a two-parameter constructor.
    #[must_use]
    pub fn constructor2<A: FieldValue, B: FieldValue>(mut self, invoke: fn(A, B) -> T) -> Self {
        let invoker: CtorFn = Arc::new(move |args: &[Value]| {
            expect_arity(2, args)?;
            let a0 = A::from_value(args[0].clone())?;
            let a1 = B::from_value(args[1].clone())?;
            Ok(Box::new(invoke(a0, a1)) as Box<dyn Reflect>)
        });
        self.constructors.push(ConstructorSchema::new(
            vec![A::value_ty(), B::value_ty()],
            invoker,
        ));
        self
    }

    /// Declares a three-parameter constructor.
    #[must_use]
    pub fn constructor3<A: FieldValue, B: FieldValue, C: FieldValue>(
        mut self,
        invoke: fn(A, B, C) -> T,
    ) -> Self {
        let invoker: CtorFn = Arc::new(move |args: &[Value]| {
            expect_arity(3, args)?;
            let a0 = A::from_value(args[0].clone())?;
            let a1 = B::from_value(args[1].clone())?;
            let a2 = C::from_value(args[2].clone())?;
            Ok(Box::new(invoke(a0, a1, a2)) as Box<dyn Reflect>)
        });
        self.constructors.push(ConstructorSchema::new(
            vec![A::value_ty(), B::value_ty(), C::value_ty()],
            invoker,
        ));
        self
    }

    /// Finalizes the schema.
    #[must_use]
    pub fn build(self) -> ClassSchema {
        ClassSchema::new(
            self.name,
            TypeId::of::<T>(),
            self.flags,
            self.properties,
            self.methods,
            self.constructors,
            self.new_default,
            self.base,
        )
    }

    fn erase_getter<F: FieldValue>(class_name: &'static str, get: fn(&T) -> F) -> GetFn {
        Arc::new(move |obj: &dyn Reflect| {
            let this = obj
                .downcast_ref::<T>()
                .ok_or(Error::TypeMismatch {
                    expected: class_name,
                })?;
            Ok(get(this).into_value())
        })
    }
}

fn expect_arity(expected: usize, args: &[Value]) -> crate::Result<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(Error::ArgumentCount {
            expected,
            actual: args.len(),
        })
    }
}

fn downcast_target<'a, T: Reflect>(
    obj: &'a mut dyn Reflect,
    class_name: &'static str,
) -> crate::Result<&'a mut T> {
    obj.downcast_mut::<T>().ok_or(Error::TypeMismatch {
        expected: class_name,
    })
}
