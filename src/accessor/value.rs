//! Runtime argument coercion for dynamic lookups.

use std::borrow::Cow;

use serde_json::Value;

use crate::core::{ParamType, TypeKind};

/// Checks `value` against `ty` and returns the value to substitute.
///
/// A missing argument and an explicit `null` are both accepted by nullable
/// types and normalized to `null`. On failure, returns a short description
/// of what was found instead.
pub fn coerce(value: Option<&Value>, ty: &ParamType) -> Result<Value, String> {
    let value = match value {
        None | Some(Value::Null) if ty.nullable => return Ok(Value::Null),
        None => return Err("nothing".to_string()),
        Some(value) => value,
    };

    let accepted = match (&ty.kind, value) {
        (_, Value::Null) => false,
        (TypeKind::Integer, Value::Number(n)) => n.is_i64(),
        (TypeKind::Float, Value::Number(_)) => true,
        (TypeKind::Boolean, Value::Bool(_)) => true,
        (TypeKind::Text, Value::String(_)) => true,
        (TypeKind::Any | TypeKind::Named { .. }, _) => true,
        _ => false,
    };

    if accepted {
        Ok(value.clone())
    } else {
        Err(describe(value).to_string())
    }
}

/// Short type description used in error messages.
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(n) if !n.is_i64() => "out-of-range integer",
        Value::Number(_) => "integer",
        Value::String(_) => "text",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Text substituted for a value. Strings are inserted without quotes.
pub fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
