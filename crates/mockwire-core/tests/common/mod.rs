#![allow(dead_code)]

use std::{any::Any, sync::Arc};

use mockwire_core::{
    field_value, Engine, EngineBuilder, FieldError, Interceptor, MockObject, ObjectRef,
    TypeDescriptor, TypeRegistry, Value, ValueType,
};
use tempfile::TempDir;

pub const COUNTER: &str = "app.Counter";
pub const PERSON: &str = "app.Person";
pub const ADDRESS: &str = "app.Address";

/// A counter whose accessor and `label` method go through the interceptor.
#[derive(Default)]
pub struct Counter {
    pub count: i32,
    pub label: String,
}

impl Counter {
    pub fn new(count: i32, label: &str) -> Self {
        Self {
            count,
            label: label.to_string(),
        }
    }

    pub fn get_count(&self, interceptor: &Interceptor) -> i32 {
        interceptor.read_field(COUNTER, "getCount", "count", self.count)
    }

    pub fn label(&self, interceptor: &Interceptor) -> String {
        interceptor.invoke(COUNTER, "label", || format!("{} #{}", self.label, self.count))
    }
}

impl MockObject for Counter {
    fn type_ident(&self) -> &str {
        COUNTER
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        match name {
            "count" => Some(self.count.into()),
            "label" => Some(self.label.clone().into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        match name {
            "count" => self.count = field_value(name, value)?,
            "label" => self.label = field_value(name, value)?,
            _ => return Err(FieldError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Default)]
pub struct Person {
    pub name: String,
    pub age: i32,
    pub address: Option<ObjectRef>,
}

impl Person {
    pub fn get_address(&self, interceptor: &Interceptor) -> Option<ObjectRef> {
        interceptor.invoke(PERSON, "getAddress", || self.address.clone())
    }
}

impl MockObject for Person {
    fn type_ident(&self) -> &str {
        PERSON
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(self.name.clone().into()),
            "age" => Some(self.age.into()),
            "address" => Some(self.address.clone().into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        match name {
            "name" => self.name = field_value(name, value)?,
            "age" => self.age = field_value(name, value)?,
            "address" => self.address = field_value(name, value)?,
            _ => return Err(FieldError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Default)]
pub struct Address {
    pub city: String,
    pub resident: Option<ObjectRef>,
}

impl MockObject for Address {
    fn type_ident(&self) -> &str {
        ADDRESS
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        match name {
            "city" => Some(self.city.clone().into()),
            "resident" => Some(self.resident.clone().into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        match name {
            "city" => self.city = field_value(name, value)?,
            "resident" => self.resident = field_value(name, value)?,
            _ => return Err(FieldError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registry with the fixture types.
pub fn fixture_registry() -> Arc<TypeRegistry> {
    let registry = TypeRegistry::new();
    registry.register(
        TypeDescriptor::new(COUNTER)
            .field("count", ValueType::I32)
            .field("label", ValueType::Text)
            .method("getCount", vec![], ValueType::I32)
            .method("label", vec![], ValueType::Text)
            .constructible::<Counter>(),
    );
    registry.register(
        TypeDescriptor::new(PERSON)
            .field("name", ValueType::Text)
            .field("age", ValueType::I32)
            .field("address", ValueType::Object(ADDRESS.to_string()))
            .method("getAddress", vec![], ValueType::Object(ADDRESS.to_string()))
            .constructible::<Person>(),
    );
    registry.register(
        TypeDescriptor::new(ADDRESS)
            .field("city", ValueType::Text)
            .field("resident", ValueType::Object(PERSON.to_string()))
            .constructible::<Address>(),
    );
    Arc::new(registry)
}

/// Helper function to create a test engine over a fresh storage directory
pub fn create_test_engine() -> (TempDir, Engine) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let engine = open_engine(&temp_dir);
    (temp_dir, engine)
}

/// Opens an engine over an existing storage directory
pub fn open_engine(temp_dir: &TempDir) -> Engine {
    EngineBuilder::new()
        .with_storage_dir(Some(temp_dir.path()))
        .with_registry(fixture_registry())
        .build()
        .expect("Failed to create engine")
}

/// Reads an object-valued field.
pub fn object_field(obj: &ObjectRef, name: &str) -> Option<ObjectRef> {
    obj.read()
        .get_field(name)
        .and_then(|v| v.into_native::<Option<ObjectRef>>())
        .flatten()
}
