//! Literal-to-native coercion.
//!
//! Plans carry override values as text. Before an override can be installed
//! the text is coerced to the declared type of the field or return slot.
//! Only primitives, `char` and text are coercible; reference types are
//! populated through templates instead.

use std::str::FromStr;

use log::debug;

use crate::value::{Value, ValueType};

/// Coerces `literal` to `value_type`.
///
/// Returns `None` when the type is not literal-coercible or the literal is
/// malformed for it. Booleans never fail: a case-insensitive `"true"` is
/// `true` and anything else is `false`.
///
/// # Examples
///
/// ```rust
/// use mockwire_core::{coerce, Value, ValueType};
///
/// assert_eq!(coerce("true", &ValueType::Bool), Some(Value::Bool(true)));
/// assert_eq!(coerce("123", &ValueType::I32), Some(Value::I32(123)));
/// assert_eq!(coerce("abc", &ValueType::I32), None);
/// ```
pub fn coerce(literal: &str, value_type: &ValueType) -> Option<Value> {
    let coerced = match value_type {
        ValueType::Bool => Some(Value::Bool(literal.eq_ignore_ascii_case("true"))),
        ValueType::I8 => parse(literal).map(Value::I8),
        ValueType::I16 => parse(literal).map(Value::I16),
        ValueType::I32 => parse(literal).map(Value::I32),
        ValueType::I64 => parse(literal).map(Value::I64),
        ValueType::F32 => parse(literal.trim()).map(Value::F32),
        ValueType::F64 => parse(literal.trim()).map(Value::F64),
        ValueType::Char => literal.chars().next().map(Value::Char),
        ValueType::Text => Some(Value::Text(literal.to_string())),
        ValueType::Void | ValueType::Object(_) | ValueType::Array(_) => None,
    };
    if coerced.is_none() {
        debug!("Cannot coerce '{literal}' to {value_type}");
    }
    coerced
}

/// Coerces a method return literal. A `void` return accepts any literal
/// and yields [`Value::Unit`].
pub fn coerce_return(literal: &str, return_type: &ValueType) -> Option<Value> {
    match return_type {
        ValueType::Void => Some(Value::Unit),
        other => coerce(literal, other),
    }
}

fn parse<T: FromStr>(literal: &str) -> Option<T> {
    literal.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_literals() {
        assert_eq!(coerce("true", &ValueType::Bool), Some(Value::Bool(true)));
        assert_eq!(coerce("TRUE", &ValueType::Bool), Some(Value::Bool(true)));
        assert_eq!(coerce("yes", &ValueType::Bool), Some(Value::Bool(false)));
    }

    #[test]
    fn test_integer_widths() {
        assert_eq!(coerce("123", &ValueType::I32), Some(Value::I32(123)));
        assert_eq!(coerce("-7", &ValueType::I8), Some(Value::I8(-7)));
        assert_eq!(coerce("40000", &ValueType::I16), None);
        assert_eq!(
            coerce("9000000000", &ValueType::I64),
            Some(Value::I64(9_000_000_000))
        );
        assert_eq!(coerce("abc", &ValueType::I32), None);
        assert_eq!(coerce(" 1", &ValueType::I32), None);
    }

    #[test]
    fn test_floats_and_text() {
        assert_eq!(coerce("1.5", &ValueType::F64), Some(Value::F64(1.5)));
        assert_eq!(coerce(" 2.5 ", &ValueType::F32), Some(Value::F32(2.5)));
        assert_eq!(coerce("x", &ValueType::F32), None);
        assert_eq!(coerce("hello", &ValueType::Text), Some(Value::Text("hello".into())));
    }

    #[test]
    fn test_char_takes_first() {
        assert_eq!(coerce("xyz", &ValueType::Char), Some(Value::Char('x')));
        assert_eq!(coerce("", &ValueType::Char), None);
    }

    #[test]
    fn test_reference_types_not_coercible() {
        assert_eq!(coerce("x", &ValueType::Object("app.Address".into())), None);
        assert_eq!(coerce("x", &ValueType::Array(Box::new(ValueType::I32))), None);
    }

    #[test]
    fn test_void_return() {
        assert_eq!(coerce_return("anything", &ValueType::Void), Some(Value::Unit));
        assert_eq!(coerce_return("5", &ValueType::I64), Some(Value::I64(5)));
    }
}
