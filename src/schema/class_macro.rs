//! The [`impl_reflect!`](crate::impl_reflect) implementation macro.

/// Generates the [`Reflect`](crate::schema::Reflect) and
/// [`FieldValue`](crate::value::FieldValue) implementations for a schema-described
/// class.
///
/// The type must implement `Clone` and `PartialEq`, and must carry a hand-written
/// [`ReflectClass`](crate::schema::ReflectClass) implementation supplying its name
/// and schema. For derived classes, name the field embedding the base instance:
///
/// ```rust,ignore
/// impl_reflect!(Address);
/// impl_reflect!(SpecialOffer, base = offer);
/// ```
#[macro_export]
macro_rules! impl_reflect {
    ($ty:ty) => {
        $crate::impl_reflect!(@impl $ty,);
    };
    ($ty:ty, base = $base_field:ident) => {
        $crate::impl_reflect!(
            @impl $ty,
            fn base(&self) -> ::core::option::Option<&dyn $crate::schema::Reflect> {
                ::core::option::Option::Some(&self.$base_field)
            }
            fn base_mut(&mut self) -> ::core::option::Option<&mut dyn $crate::schema::Reflect> {
                ::core::option::Option::Some(&mut self.$base_field)
            }
        );
    };
    (@impl $ty:ty, $($base_fns:tt)*) => {
        impl $crate::schema::Reflect for $ty {
            fn class(&self) -> &'static $crate::schema::ClassSchema {
                <$ty as $crate::schema::ReflectClass>::class_of()
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            fn clone_boxed(&self) -> ::std::boxed::Box<dyn $crate::schema::Reflect> {
                ::std::boxed::Box::new(::core::clone::Clone::clone(self))
            }

            fn reflect_eq(&self, other: &dyn $crate::schema::Reflect) -> bool {
                other
                    .as_any()
                    .downcast_ref::<$ty>()
                    .is_some_and(|other| other == self)
            }

            $($base_fns)*
        }

        impl $crate::value::FieldValue for $ty {
            fn value_ty() -> $crate::value::ValueTy {
                $crate::value::ValueTy::Object($crate::value::ObjectTy::of::<$ty>())
            }

            fn into_value(self) -> $crate::value::Value {
                $crate::value::Value::Object(::std::boxed::Box::new(self))
            }

            fn from_value(value: $crate::value::Value) -> $crate::Result<Self> {
                match value {
                    $crate::value::Value::Object(obj) => obj
                        .as_any()
                        .downcast_ref::<$ty>()
                        .cloned()
                        .ok_or_else(|| $crate::Error::ConversionFailed {
                            from: "Object",
                            to: <$ty as $crate::schema::ReflectClass>::NAME.to_string(),
                        }),
                    other => ::core::result::Result::Err($crate::Error::ConversionFailed {
                        from: other.kind().as_str(),
                        to: <$ty as $crate::schema::ReflectClass>::NAME.to_string(),
                    }),
                }
            }
        }
    };
}
