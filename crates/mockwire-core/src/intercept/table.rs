//! Per-type dispatch tables derived from a plan entry.

use std::{collections::HashMap, sync::Arc};

use log::{debug, warn};

use crate::{
    coerce::{coerce, coerce_return},
    models::MockType,
    registry::TypeRegistry,
    value::Value,
};

/// How an intercepted method produces its result.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodOverride {
    /// Always return this value
    Literal(Value),
    /// Build an instance of `type_id` from `template` in the active plan at
    /// call time
    Template { type_id: String, template: String },
}

/// Interception decision for one type.
#[derive(Debug, Clone)]
pub enum InterceptionState {
    /// No active plan entry when the type was last derived
    Unmodified,
    Intercepted(Arc<DispatchTable>),
}

impl InterceptionState {
    pub fn is_intercepted(&self) -> bool {
        matches!(self, InterceptionState::Intercepted(_))
    }

    pub fn table(&self) -> Option<Arc<DispatchTable>> {
        match self {
            InterceptionState::Unmodified => None,
            InterceptionState::Intercepted(table) => Some(Arc::clone(table)),
        }
    }
}

/// Overrides installed for an intercepted type.
///
/// An empty table still means the type is intercepted: its new instances
/// are tracked.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    type_id: String,
    fields: HashMap<String, Value>,
    methods: HashMap<String, MethodOverride>,
}

impl DispatchTable {
    /// Derives the table for `type_id` from its plan entry.
    ///
    /// Declared types come from the registry when the type is registered,
    /// and from the entry otherwise. Overrides whose literal does not coerce
    /// are left out.
    pub fn derive(type_id: &str, entry: &MockType, registry: &TypeRegistry) -> Self {
        let mut table = Self {
            type_id: type_id.to_string(),
            ..Default::default()
        };

        for field in &entry.fields {
            let Some(literal) = &field.value else {
                continue;
            };
            let declared = registry
                .field_type(type_id, &field.name)
                .unwrap_or_else(|| field.field_type.clone());
            match coerce(literal, &declared) {
                Some(value) => {
                    table.fields.insert(field.name.clone(), value);
                }
                None => warn!(
                    "Field override {type_id}.{} = '{literal}' does not fit {declared}, not installed",
                    field.name
                ),
            }
        }

        for method in entry.methods.iter().filter(|m| m.active) {
            let return_type = registry
                .method(type_id, &method.name)
                .map(|m| m.return_type)
                .unwrap_or_else(|| method.return_type.clone());

            let installed = if let Some(literal) = &method.return_value {
                let value = coerce_return(literal, &return_type);
                if value.is_none() {
                    warn!(
                        "Return override {type_id}.{}() = '{literal}' does not fit {return_type}, not installed",
                        method.name
                    );
                }
                value.map(MethodOverride::Literal)
            } else if let Some(template) = method.return_template() {
                let nested = return_type.reference_id();
                if nested.is_none() {
                    debug!(
                        "Ignoring return template on {type_id}.{}(): {return_type} is not a reference type",
                        method.name
                    );
                }
                nested.map(|nested| MethodOverride::Template {
                    type_id: nested,
                    template: template.to_string(),
                })
            } else {
                None
            };

            if let Some(installed) = installed {
                table.methods.insert(method.name.clone(), installed);
            }
        }

        debug!(
            "Derived dispatch for {type_id}: {} field(s), {} method(s)",
            table.fields.len(),
            table.methods.len()
        );
        table
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn field_override(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn method_override(&self, method: &str) -> Option<&MethodOverride> {
        self.methods.get(method)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.methods.is_empty()
    }
}
