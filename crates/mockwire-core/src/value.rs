//! Declared type descriptors and native runtime values.
//!
//! [`ValueType`] is what a plan or a [`crate::TypeDescriptor`] says a field or
//! return slot holds. [`Value`] is what actually flows through the dispatch
//! layer at runtime. Typed wrappers convert between [`Value`] and native Rust
//! types with [`FromValue`] and the `From<T> for Value` impls.

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::object::ObjectRef;

/// Declared type of a field, parameter or method return.
///
/// Serialized as its textual form (`"i32"`, `"String"`, `"app.Address"`,
/// `"app.Address[]"`). Any name that is not a known primitive alias names an
/// object type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    #[default]
    Text,
    Void,
    /// Reference to another mockable type, by type identifier
    Object(String),
    /// Array of the element type
    Array(Box<ValueType>),
}

impl ValueType {
    /// Whether literal coercion can produce a value of this type.
    pub fn is_literal(&self) -> bool {
        !matches!(self, ValueType::Object(_) | ValueType::Array(_))
    }

    /// Whether values of this type are references (objects or arrays).
    pub fn is_reference(&self) -> bool {
        matches!(self, ValueType::Object(_) | ValueType::Array(_))
    }

    /// Type identifier used to look up templates for reference types.
    pub fn reference_id(&self) -> Option<String> {
        match self {
            ValueType::Object(type_id) => Some(type_id.clone()),
            ValueType::Array(_) => Some(self.to_string()),
            _ => None,
        }
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(element) = s.strip_suffix("[]") {
            return element
                .parse()
                .map(|element| ValueType::Array(Box::new(element)));
        }
        let value_type = match s {
            "" => return Err("Empty type descriptor".to_string()),
            "bool" | "boolean" => ValueType::Bool,
            "i8" | "byte" => ValueType::I8,
            "i16" | "short" => ValueType::I16,
            "i32" | "int" | "integer" => ValueType::I32,
            "i64" | "long" => ValueType::I64,
            "f32" | "float" => ValueType::F32,
            "f64" | "double" => ValueType::F64,
            "char" => ValueType::Char,
            "String" | "string" | "str" | "text" => ValueType::Text,
            "void" | "()" | "unit" => ValueType::Void,
            other => ValueType::Object(other.to_string()),
        };
        Ok(value_type)
    }
}

impl TryFrom<String> for ValueType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => write!(f, "bool"),
            ValueType::I8 => write!(f, "i8"),
            ValueType::I16 => write!(f, "i16"),
            ValueType::I32 => write!(f, "i32"),
            ValueType::I64 => write!(f, "i64"),
            ValueType::F32 => write!(f, "f32"),
            ValueType::F64 => write!(f, "f64"),
            ValueType::Char => write!(f, "char"),
            ValueType::Text => write!(f, "String"),
            ValueType::Void => write!(f, "void"),
            ValueType::Object(type_id) => write!(f, "{type_id}"),
            ValueType::Array(element) => write!(f, "{element}[]"),
        }
    }
}

/// A native runtime value.
#[derive(Clone)]
pub enum Value {
    Unit,
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    Text(String),
    Object(ObjectRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Converts into a native type, `None` when the variant does not fit.
    pub fn into_native<T: FromValue>(self) -> Option<T> {
        T::from_value(self)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "Unit"),
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({v})"),
            Value::I8(v) => write!(f, "I8({v})"),
            Value::I16(v) => write!(f, "I16({v})"),
            Value::I32(v) => write!(f, "I32({v})"),
            Value::I64(v) => write!(f, "I64({v})"),
            Value::F32(v) => write!(f, "F32({v})"),
            Value::F64(v) => write!(f, "F64({v})"),
            Value::Char(v) => write!(f, "Char({v:?})"),
            Value::Text(v) => write!(f, "Text({v:?})"),
            // try_read: Debug may run while the instance is write-locked
            Value::Object(obj) => match obj.try_read() {
                Some(guard) => write!(f, "Object({})", guard.type_ident()),
                None => write!(f, "Object(<locked>)"),
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
            Value::Object(_) => write!(f, "{self:?}"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Conversion from a runtime [`Value`] into a native Rust type.
pub trait FromValue: Sized {
    /// Returns `None` when the value's variant does not fit `Self`.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! native_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

native_value! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => Text,
    ObjectRef => Object,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<Option<ObjectRef>> for Value {
    fn from(value: Option<ObjectRef>) -> Self {
        value.map_or(Value::Null, Value::Object)
    }
}

impl FromValue for () {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Unit | Value::Null => Some(()),
            _ => None,
        }
    }
}

impl FromValue for Option<ObjectRef> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(obj) => Some(Some(obj)),
            Value::Null => Some(None),
            _ => None,
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitive_aliases() {
        assert_eq!("int".parse::<ValueType>().unwrap(), ValueType::I32);
        assert_eq!("i32".parse::<ValueType>().unwrap(), ValueType::I32);
        assert_eq!("boolean".parse::<ValueType>().unwrap(), ValueType::Bool);
        assert_eq!("long".parse::<ValueType>().unwrap(), ValueType::I64);
        assert_eq!("String".parse::<ValueType>().unwrap(), ValueType::Text);
        assert_eq!("void".parse::<ValueType>().unwrap(), ValueType::Void);
    }

    #[test]
    fn test_parse_reference_types() {
        assert_eq!(
            "app.Address".parse::<ValueType>().unwrap(),
            ValueType::Object("app.Address".to_string())
        );
        assert_eq!(
            "int[]".parse::<ValueType>().unwrap(),
            ValueType::Array(Box::new(ValueType::I32))
        );
        assert!("".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_display_is_canonical() {
        let array = ValueType::Array(Box::new(ValueType::Object("app.Item".to_string())));
        assert_eq!(array.to_string(), "app.Item[]");
        assert_eq!(array.reference_id().as_deref(), Some("app.Item[]"));
        assert_eq!(ValueType::Text.to_string(), "String");
    }

    #[test]
    fn test_serde_as_text() {
        let json = serde_json::to_string(&ValueType::I64).unwrap();
        assert_eq!(json, "\"i64\"");
        let parsed: ValueType = serde_json::from_str("\"app.Address\"").unwrap();
        assert_eq!(parsed, ValueType::Object("app.Address".to_string()));
    }

    #[test]
    fn test_native_conversions() {
        assert_eq!(Value::from(42).into_native::<i32>(), Some(42));
        assert_eq!(Value::from("hi").into_native::<String>(), Some("hi".to_string()));
        assert_eq!(Value::from(42).into_native::<i64>(), None);
        assert_eq!(Value::Null.into_native::<Option<ObjectRef>>().map(|o| o.is_none()), Some(true));
        assert_eq!(Value::Unit.into_native::<()>(), Some(()));
    }
}
