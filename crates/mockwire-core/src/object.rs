//! Dynamic member access for mockable types.
//!
//! A type takes part in interception by implementing [`MockObject`]: it names
//! its type identifier and lets fields be read and assigned by name. This is
//! the only reflective capability the rest of the crate relies on.

use std::{any::Any, sync::Arc};

use parking_lot::RwLock;

use crate::{error::FieldError, value::{FromValue, Value}};

/// Shared handle to a live instance of some mockable type.
pub type ObjectRef = Arc<RwLock<dyn MockObject>>;

/// Name-based field access for a mockable type.
///
/// # Examples
///
/// ```rust
/// use std::any::Any;
/// use mockwire_core::{field_value, FieldError, MockObject, Value};
///
/// #[derive(Default)]
/// struct Counter {
///     count: i32,
/// }
///
/// impl MockObject for Counter {
///     fn type_ident(&self) -> &str {
///         "app.Counter"
///     }
///
///     fn get_field(&self, name: &str) -> Option<Value> {
///         match name {
///             "count" => Some(self.count.into()),
///             _ => None,
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
///         match name {
///             "count" => self.count = field_value(name, value)?,
///             _ => return Err(FieldError::UnknownField(name.to_string())),
///         }
///         Ok(())
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let mut counter = Counter::default();
/// counter.set_field("count", Value::I32(7)).unwrap();
/// assert_eq!(counter.count, 7);
/// ```
pub trait MockObject: Any + Send + Sync {
    /// Identifier of this object's type, as used in plans and the registry.
    fn type_ident(&self) -> &str;

    /// Current stored value of a field, `None` if there is no such field.
    fn get_field(&self, name: &str) -> Option<Value>;

    /// Assigns a field.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError>;

    fn as_any(&self) -> &dyn Any;
}

/// Converts a value for assignment to `field`, reporting a type mismatch
/// with the expected native type name.
pub fn field_value<T: FromValue>(field: &str, value: Value) -> Result<T, FieldError> {
    T::from_value(value).ok_or_else(|| FieldError::TypeMismatch {
        field: field.to_string(),
        expected: std::any::type_name::<T>().to_string(),
    })
}

/// Wraps a value into the shared handle form used for tracking.
pub fn share<T: MockObject>(value: T) -> Arc<RwLock<T>> {
    Arc::new(RwLock::new(value))
}

/// Reads a field of a shared instance, `None` if the field is unknown.
pub fn read_field(obj: &ObjectRef, name: &str) -> Option<Value> {
    obj.read().get_field(name)
}

/// Returns the type identifier of a shared instance.
pub fn type_of(obj: &ObjectRef) -> String {
    obj.read().type_ident().to_string()
}
