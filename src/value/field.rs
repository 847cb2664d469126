//! Bridge between concrete Rust field types and the dynamic [`Value`] model.
//!
//! Every type that can sit behind a schema property, method parameter or constructor
//! parameter implements [`FieldValue`]. The schema builder uses the trait in both
//! directions: getters lift a field into a [`Value`], setters and invokers lower a
//! [`Value`] back into the field type, and `value_ty` supplies the declared
//! [`ValueTy`] without the caller spelling it out.
//!
//! Implementations exist for the scalar types (`bool`, `i32`, `i64`, `f64`,
//! `String`), for `Option<T>` (nullable slots), for `Vec<T>` (sequence slots), for
//! [`Value`] itself (untyped slots) and - generated by `impl_reflect!` - for every
//! schema-described class.

use crate::value::{Value, ValueTy};
use crate::{Error, Result};

/// Conversion contract between a concrete field type and the dynamic value model.
///
/// `from_value` is strict by design: it accepts the exactly matching [`Value`]
/// variant plus null (which materializes as the type's default for non-nullable
/// scalars). Cross-type conversion is a separate, explicit concern handled by
/// [`convert`](crate::value::convert).
pub trait FieldValue: Sized + Send + Sync + 'static {
    /// The declared slot type of this field.
    fn value_ty() -> ValueTy;

    /// Lifts the field into a dynamic value.
    fn into_value(self) -> Value;

    /// Lowers a dynamic value back into the field type.
    ///
    /// # Errors
    ///
    /// [`Error::ConversionFailed`] when `value` is neither the matching variant nor
    /// null.
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T: FieldValue>(value: &Value) -> Error {
    Error::ConversionFailed {
        from: value.kind().as_str(),
        to: T::value_ty().to_string(),
    }
}

impl FieldValue for bool {
    fn value_ty() -> ValueTy {
        ValueTy::Bool
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::Null => Ok(false),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FieldValue for i32 {
    fn value_ty() -> ValueTy {
        ValueTy::I32
    }

    fn into_value(self) -> Value {
        Value::I32(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I32(v) => Ok(v),
            Value::Null => Ok(0),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FieldValue for i64 {
    fn value_ty() -> ValueTy {
        ValueTy::I64
    }

    fn into_value(self) -> Value {
        Value::I64(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => Ok(v),
            Value::Null => Ok(0),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FieldValue for f64 {
    fn value_ty() -> ValueTy {
        ValueTy::F64
    }

    fn into_value(self) -> Value {
        Value::F64(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::Null => Ok(0.0),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FieldValue for String {
    fn value_ty() -> ValueTy {
        ValueTy::Str
    }

    fn into_value(self) -> Value {
        Value::Str(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Str(v) => Ok(v),
            Value::Null => Ok(String::new()),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn value_ty() -> ValueTy {
        ValueTy::Nullable(Box::new(T::value_ty()))
    }

    fn into_value(self) -> Value {
        match self {
            Some(inner) => inner.into_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => Ok(Some(T::from_value(other)?)),
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn value_ty() -> ValueTy {
        ValueTy::Seq(Box::new(T::value_ty()))
    }

    fn into_value(self) -> Value {
        Value::Seq(self.into_iter().map(FieldValue::into_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Seq(items) => items.into_iter().map(T::from_value).collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FieldValue for () {
    fn value_ty() -> ValueTy {
        ValueTy::Any
    }

    fn into_value(self) -> Value {
        Value::Null
    }

    fn from_value(_: Value) -> Result<Self> {
        Ok(())
    }
}

impl FieldValue for Value {
    fn value_ty() -> ValueTy {
        ValueTy::Any
    }

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_round_trip() {
        assert_eq!(i32::from_value(42i32.into_value()).unwrap(), 42);
        assert_eq!(f64::from_value(2.5f64.into_value()).unwrap(), 2.5);
        assert_eq!(
            String::from_value("abc".to_string().into_value()).unwrap(),
            "abc"
        );
    }

    #[test]
    fn test_null_materializes_defaults() {
        assert_eq!(i32::from_value(Value::Null).unwrap(), 0);
        assert_eq!(i64::from_value(Value::Null).unwrap(), 0);
        assert!(!bool::from_value(Value::Null).unwrap());
        assert_eq!(String::from_value(Value::Null).unwrap(), "");
        assert_eq!(Vec::<i32>::from_value(Value::Null).unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn test_option_round_trip() {
        assert_eq!(Option::<i32>::from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i32>::from_value(Value::I32(7)).unwrap(), Some(7));
        assert_eq!(Some(7i32).into_value(), Value::I32(7));
        assert_eq!(None::<i32>.into_value(), Value::Null);
    }

    #[test]
    fn test_strictness() {
        assert!(i32::from_value(Value::I64(1)).is_err());
        assert!(i32::from_value(Value::Str("1".into())).is_err());
        assert!(bool::from_value(Value::I32(1)).is_err());
    }

    #[test]
    fn test_vec_elements() {
        let v = vec![1i32, 2, 3].into_value();
        assert_eq!(
            v,
            Value::Seq(vec![Value::I32(1), Value::I32(2), Value::I32(3)])
        );
        assert_eq!(Vec::<i32>::from_value(v).unwrap(), vec![1, 2, 3]);
        assert!(Vec::<i32>::from_value(Value::Seq(vec![Value::Str("x".into())])).is_err());
    }

    #[test]
    fn test_declared_types() {
        assert_eq!(i32::value_ty(), ValueTy::I32);
        assert_eq!(
            Option::<i32>::value_ty(),
            ValueTy::Nullable(Box::new(ValueTy::I32))
        );
        assert_eq!(
            Vec::<String>::value_ty(),
            ValueTy::Seq(Box::new(ValueTy::Str))
        );
        assert_eq!(Value::value_ty(), ValueTy::Any);
    }
}
