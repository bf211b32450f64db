//! Parameter structures for store operations.
//!
//! These are plain structures without framework derives. Interface layers
//! define their own argument types (clap derives in the CLI) and convert
//! into these with `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │
//! │  (clap derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘
//! ```

use crate::{models::PlanKey, value::ValueType};

/// Identifies one mock type entry: a type within a plan, optionally one of
/// its named template variants.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTarget {
    pub key: PlanKey,
    pub type_id: String,
    /// Template variant; `None` addresses the untemplated entry
    pub template: Option<String>,
}

impl TypeTarget {
    pub fn new(key: PlanKey, type_id: impl Into<String>) -> Self {
        Self {
            key,
            type_id: type_id.into(),
            template: None,
        }
    }

    pub fn with_template(mut self, template: Option<String>) -> Self {
        self.template = template;
        self
    }
}

/// Parameters for overriding one field of an entry.
#[derive(Debug, Clone)]
pub struct SetField {
    pub target: TypeTarget,
    pub name: String,
    pub field_type: ValueType,
    /// Literal value
    pub value: Option<String>,
    /// Template of the field's type to build the value from
    pub template: Option<String>,
}

/// Parameters for overriding one method's return value.
#[derive(Debug, Clone)]
pub struct SetMethod {
    pub target: TypeTarget,
    pub name: String,
    pub return_type: ValueType,
    pub parameter_types: Vec<String>,
    /// Literal return value
    pub return_value: Option<String>,
    /// Template of the return type to build the result from
    pub return_template: Option<String>,
    pub active: bool,
}
