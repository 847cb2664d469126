//! Best-effort conversion between a [`Value`] and a target [`ValueTy`].
//!
//! This is the cross-type half of the value model: where [`FieldValue`] is strict,
//! [`convert`] tries - numeric widening and checked narrowing, number/string
//! round-trips honouring a configurable decimal separator, boolean parsing, and
//! element-wise sequence conversion. Object targets are never converted here; copying
//! between mismatched object types is the mapper's recursion case.
//!
//! [`FieldValue`]: crate::value::FieldValue

use crate::value::{Value, ValueTy};
use crate::{Error, Result};

/// Formatting and parsing knobs for number/string conversion.
///
/// The stand-in for a culture/format provider: a decimal separator used when
/// formatting and parsing floats, and an optional thousands separator stripped
/// before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Separator between the integral and fractional part of a formatted float
    pub decimal_separator: char,
    /// Grouping separator tolerated (and stripped) when parsing numbers
    pub thousands_separator: Option<char>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            decimal_separator: '.',
            thousands_separator: None,
        }
    }
}

fn failed(value: &Value, target: &ValueTy) -> Error {
    Error::ConversionFailed {
        from: value.kind().as_str(),
        to: target.to_string(),
    }
}

/// Converts `value` to fit the `target` slot type, best-effort.
///
/// Conversion rules:
/// - `Any` is the identity; a nullable target passes null through and otherwise
///   converts to its inner type.
/// - Integers widen implicitly and narrow with a range check.
/// - Floats become integers by rounding when the result is in range.
/// - Numbers and booleans format to strings; strings parse back honouring
///   [`ConvertOptions`].
/// - Booleans accept `"true"`/`"false"`/`"1"`/`"0"` (case-insensitive) and treat
///   any non-zero number as `true`.
/// - Sequences convert element-wise to the target element type.
/// - Object targets always fail here - recursive object mapping is the caller's
///   concern.
///
/// # Errors
///
/// [`Error::ConversionFailed`] when no rule applies or a numeric check fails.
pub fn convert(value: &Value, target: &ValueTy, opts: &ConvertOptions) -> Result<Value> {
    match target {
        ValueTy::Any => Ok(value.clone()),
        ValueTy::Nullable(inner) => match value {
            Value::Null => Ok(Value::Null),
            other => convert(other, inner, opts),
        },
        ValueTy::Bool => convert_bool(value).ok_or_else(|| failed(value, target)),
        ValueTy::I32 => convert_i64(value, opts)
            .and_then(|v| i32::try_from(v).ok())
            .map(Value::I32)
            .ok_or_else(|| failed(value, target)),
        ValueTy::I64 => convert_i64(value, opts)
            .map(Value::I64)
            .ok_or_else(|| failed(value, target)),
        ValueTy::F64 => convert_f64(value, opts)
            .map(Value::F64)
            .ok_or_else(|| failed(value, target)),
        ValueTy::Str => convert_str(value, opts)
            .map(Value::Str)
            .ok_or_else(|| failed(value, target)),
        ValueTy::Seq(element) => match value {
            Value::Seq(items) => items
                .iter()
                .map(|item| convert(item, element, opts))
                .collect::<Result<Vec<_>>>()
                .map(Value::Seq),
            _ => Err(failed(value, target)),
        },
        ValueTy::Object(_) => Err(failed(value, target)),
    }
}

fn convert_bool(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(b) => Some(Value::Bool(*b)),
        Value::I32(v) => Some(Value::Bool(*v != 0)),
        Value::I64(v) => Some(Value::Bool(*v != 0)),
        Value::F64(v) => Some(Value::Bool(*v != 0.0)),
        Value::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

fn convert_i64(value: &Value, opts: &ConvertOptions) -> Option<i64> {
    match value {
        Value::I32(v) => Some(i64::from(*v)),
        Value::I64(v) => Some(*v),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::F64(v) => {
            let rounded = v.round();
            if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded <= i64::MAX as f64 {
                Some(rounded as i64)
            } else {
                None
            }
        }
        Value::Str(s) => normalize_numeric(s, opts).parse::<i64>().ok(),
        _ => None,
    }
}

fn convert_f64(value: &Value, opts: &ConvertOptions) -> Option<f64> {
    match value {
        Value::F64(v) => Some(*v),
        Value::I32(v) => Some(f64::from(*v)),
        Value::I64(v) => Some(*v as f64),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Str(s) => normalize_numeric(s, opts).parse::<f64>().ok(),
        _ => None,
    }
}

fn convert_str(value: &Value, opts: &ConvertOptions) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::I32(v) => Some(v.to_string()),
        Value::I64(v) => Some(v.to_string()),
        Value::F64(v) => {
            let formatted = v.to_string();
            if opts.decimal_separator == '.' {
                Some(formatted)
            } else {
                Some(formatted.replace('.', &opts.decimal_separator.to_string()))
            }
        }
        _ => None,
    }
}

fn normalize_numeric(raw: &str, opts: &ConvertOptions) -> String {
    let mut s = raw.trim().to_string();
    if let Some(thousands) = opts.thousands_separator {
        s = s.replace(thousands, "");
    }
    if opts.decimal_separator != '.' {
        s = s.replace(opts.decimal_separator, ".");
    }
    s
}

/// Coerces an argument value into a declared parameter slot.
///
/// The invocation-boundary rule: an exactly matching value passes through, a null
/// argument to a non-nullable slot materializes as the slot's default, and anything
/// else goes through [`convert`] with default options.
pub(crate) fn coerce_argument(value: &Value, target: &ValueTy) -> Result<Value> {
    if target.accepts(value) {
        return Ok(value.clone());
    }
    if value.is_null() {
        return Ok(target.default_value());
    }
    convert(value, target, &ConvertOptions::default())
}
