//! Registry of mockable type shapes.
//!
//! The registry records, per type identifier, which fields and methods a type
//! declares and how to construct a fresh default instance. Coercion reads the
//! declared types from here; the template resolver constructs instances
//! through it.

use std::{fmt, sync::Arc};

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::{
    error::{MockError, Result},
    object::{MockObject, ObjectRef},
    value::ValueType,
};

type Constructor = Arc<dyn Fn() -> ObjectRef + Send + Sync>;

/// A declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub value_type: ValueType,
}

/// A declared method. Methods are matched by name only.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    pub name: String,
    pub parameter_types: Vec<ValueType>,
    pub return_type: ValueType,
}

impl MethodDescriptor {
    /// Accessor-style methods are named with a `get` or `is` prefix.
    pub fn is_accessor(&self) -> bool {
        is_accessor_name(&self.name)
    }
}

/// Returns true for accessor-style method names (`get...`, `is...`).
pub fn is_accessor_name(name: &str) -> bool {
    name.starts_with("get") || name.starts_with("is")
}

/// Shape of a mockable type.
#[derive(Clone)]
pub struct TypeDescriptor {
    type_id: String,
    fields: Vec<FieldDescriptor>,
    methods: Vec<MethodDescriptor>,
    constructor: Option<Constructor>,
}

impl TypeDescriptor {
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructor: None,
        }
    }

    /// Declares a field.
    pub fn field(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            value_type,
        });
        self
    }

    /// Declares a method.
    pub fn method(
        mut self,
        name: impl Into<String>,
        parameter_types: Vec<ValueType>,
        return_type: ValueType,
    ) -> Self {
        self.methods.push(MethodDescriptor {
            name: name.into(),
            parameter_types,
            return_type,
        });
        self
    }

    /// Makes the type constructible from its `Default` implementation.
    pub fn constructible<T: MockObject + Default>(self) -> Self {
        self.with_constructor(|| Arc::new(RwLock::new(T::default())) as ObjectRef)
    }

    /// Makes the type constructible with a custom parameterless constructor.
    pub fn with_constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> ObjectRef + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    pub fn field_type(&self, name: &str) -> Option<&ValueType> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value_type)
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// Constructs a fresh default instance, `None` if the type has no
    /// parameterless constructor.
    pub fn instantiate(&self) -> Option<ObjectRef> {
        self.constructor.as_ref().map(|construct| construct())
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_id", &self.type_id)
            .field("fields", &self.fields)
            .field("methods", &self.methods)
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

/// Concurrent map from type identifier to [`TypeDescriptor`].
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: DashMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type, replacing any earlier descriptor with the same id.
    pub fn register(&self, descriptor: TypeDescriptor) -> Option<Arc<TypeDescriptor>> {
        self.types
            .insert(descriptor.type_id.clone(), Arc::new(descriptor))
    }

    pub fn get(&self, type_id: &str) -> Option<Arc<TypeDescriptor>> {
        self.types.get(type_id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.types.contains_key(type_id)
    }

    /// Registered type identifiers, sorted.
    pub fn type_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.types.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn field_type(&self, type_id: &str, field: &str) -> Option<ValueType> {
        self.get(type_id)?.field_type(field).cloned()
    }

    pub fn method(&self, type_id: &str, method: &str) -> Option<MethodDescriptor> {
        self.get(type_id)?.find_method(method).cloned()
    }

    /// Constructs a default instance of `type_id`.
    ///
    /// # Errors
    ///
    /// Returns `MockError::Build` if the type is unknown or has no
    /// parameterless constructor.
    pub fn instantiate(&self, type_id: &str) -> Result<ObjectRef> {
        let descriptor = self
            .get(type_id)
            .ok_or_else(|| MockError::build(type_id).with_reason("type is not registered"))?;
        descriptor.instantiate().ok_or_else(|| {
            MockError::build(type_id).with_reason("type has no parameterless constructor")
        })
    }
}
