//! Override entries for a single type.

use serde::{Deserialize, Serialize};

use super::literal;
use crate::value::ValueType;

/// One override entry for a named program type.
///
/// A plan may hold several entries for the same type, told apart by their
/// template names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MockType {
    /// Identifier of the overridden type
    pub type_id: String,

    /// Field overrides
    #[serde(default)]
    pub fields: Vec<MockField>,

    /// Method return overrides
    #[serde(default)]
    pub methods: Vec<MockMethod>,

    #[serde(default)]
    pub active: bool,

    /// Name under which this entry can be used as a template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
}

impl MockType {
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            ..Default::default()
        }
    }

    pub fn with_template_name(mut self, template_name: impl Into<String>) -> Self {
        self.template_name = Some(template_name.into());
        self
    }

    pub fn with_field(mut self, field: MockField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MockMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// The template name, treating blank names as absent.
    pub fn template(&self) -> Option<&str> {
        non_blank(self.template_name.as_deref())
    }

    /// Whether this entry is the one identified by `type_id` and `template`.
    pub fn matches(&self, type_id: &str, template: Option<&str>) -> bool {
        self.type_id == type_id && self.template() == non_blank(template)
    }

    pub fn field(&self, name: &str) -> Option<&MockField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MockMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Inserts or replaces the field with the same name.
    pub fn set_field(&mut self, field: MockField) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Inserts or replaces the method with the same name.
    pub fn set_method(&mut self, method: MockMethod) {
        match self.methods.iter_mut().find(|m| m.name == method.name) {
            Some(existing) => *existing = method,
            None => self.methods.push(method),
        }
    }
}

/// Override of one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MockField {
    pub name: String,

    /// Declared type of the field
    #[serde(default)]
    pub field_type: ValueType,

    /// Literal override value
    #[serde(
        default,
        deserialize_with = "literal::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,

    /// Template name of the field's type to build the value from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Snapshot of the value before overriding, informational only
    #[serde(
        default,
        deserialize_with = "literal::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_value: Option<String>,
}

impl MockField {
    pub fn new(name: impl Into<String>, field_type: ValueType) -> Self {
        Self {
            name: name.into(),
            field_type,
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// The referenced template name, treating blank names as absent.
    pub fn template(&self) -> Option<&str> {
        non_blank(self.template.as_deref())
    }

    /// Whether the field carries a literal or a template override.
    pub fn has_override(&self) -> bool {
        self.value.is_some() || self.template().is_some()
    }
}

fn default_return_type() -> ValueType {
    ValueType::Void
}

/// Override of one method's return value.
///
/// When both a literal and a template are present the literal wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MockMethod {
    pub name: String,

    /// Parameter type names, for display and matching
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_types: Vec<String>,

    /// Declared return type
    #[serde(default = "default_return_type")]
    pub return_type: ValueType,

    /// Literal return value
    #[serde(
        default,
        deserialize_with = "literal::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub return_value: Option<String>,

    /// Template name of the return type to build the result from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_template: Option<String>,

    /// Whether the override applies
    #[serde(default)]
    pub active: bool,
}

impl MockMethod {
    pub fn new(name: impl Into<String>, return_type: ValueType) -> Self {
        Self {
            name: name.into(),
            parameter_types: Vec::new(),
            return_type,
            return_value: None,
            return_template: None,
            active: true,
        }
    }

    pub fn returning(mut self, value: impl Into<String>) -> Self {
        self.return_value = Some(value.into());
        self
    }

    pub fn returning_template(mut self, template: impl Into<String>) -> Self {
        self.return_template = Some(template.into());
        self
    }

    pub fn with_parameters(mut self, parameter_types: Vec<String>) -> Self {
        self.parameter_types = parameter_types;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// The return template name, treating blank names as absent.
    pub fn return_template(&self) -> Option<&str> {
        non_blank(self.return_template.as_deref())
    }

    /// Display signature such as `label(i32, String) -> String`.
    pub fn signature(&self) -> String {
        format!(
            "{}({}) -> {}",
            self.name,
            self.parameter_types.join(", "),
            self.return_type
        )
    }
}

fn non_blank(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.trim().is_empty())
}
