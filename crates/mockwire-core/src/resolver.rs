//! Construction of substitute object graphs from named templates.

use std::{collections::HashSet, sync::Arc};

use log::{debug, warn};

use crate::{
    coerce::coerce,
    error::Result,
    models::{MockField, MockType, Plan},
    object::ObjectRef,
    registry::TypeRegistry,
    tracker::InstanceTracker,
    value::{Value, ValueType},
};

/// `(type_id, template_name)` pairs already entered during one build.
type Visited = HashSet<(String, String)>;

/// Builds fresh instances populated from [`MockType`] templates.
///
/// Field values come from literal overrides, or from nested templates
/// looked up in the same plan. A nested template that was already entered
/// during the current build is not entered again; the field that refers to
/// it keeps its default value.
///
/// Built instances of types with an entry in the active plan are registered
/// with the tracker, like any other construction of those types.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    registry: Arc<TypeRegistry>,
    tracker: Arc<InstanceTracker>,
}

impl TemplateResolver {
    pub fn new(registry: Arc<TypeRegistry>, tracker: Arc<InstanceTracker>) -> Self {
        Self { registry, tracker }
    }

    /// Builds an instance of `type_id` from `template`, resolving nested
    /// templates against `plan`.
    ///
    /// # Errors
    ///
    /// Returns `MockError::Build` if `type_id` is not registered or cannot
    /// be default-constructed. Problems with individual fields are logged
    /// and leave that field at its default.
    pub fn build(&self, type_id: &str, template: &MockType, plan: &Plan) -> Result<ObjectRef> {
        let mut visited = Visited::new();
        if let Some(name) = template.template() {
            visited.insert((type_id.to_string(), name.to_string()));
        }
        self.build_with(type_id, template, plan, &mut visited)
    }

    fn build_with(
        &self,
        type_id: &str,
        template: &MockType,
        plan: &Plan,
        visited: &mut Visited,
    ) -> Result<ObjectRef> {
        let instance = self.registry.instantiate(type_id)?;
        if plan.active && plan.interception_entry(type_id).is_some() {
            self.tracker.register(type_id, &instance);
        }

        for field in &template.fields {
            let declared = self
                .registry
                .field_type(type_id, &field.name)
                .unwrap_or_else(|| field.field_type.clone());

            let Some(value) = self.field_value(field, &declared, plan, visited) else {
                continue;
            };
            if let Err(e) = instance.write().set_field(&field.name, value) {
                warn!("Skipping {type_id}.{} while building template: {e}", field.name);
            }
        }

        Ok(instance)
    }

    fn field_value(
        &self,
        field: &MockField,
        declared: &ValueType,
        plan: &Plan,
        visited: &mut Visited,
    ) -> Option<Value> {
        if let Some(literal) = &field.value {
            if let Some(value) = coerce(literal, declared) {
                return Some(value);
            }
        }

        let name = field.template()?;
        let nested_type = declared.reference_id()?;

        let key = (nested_type.clone(), name.to_string());
        if visited.contains(&key) {
            debug!(
                "Template {nested_type}/{name} already entered, leaving {} unset",
                field.name
            );
            return None;
        }

        let Some(nested) = plan.find_template(&nested_type, name) else {
            warn!(
                "Template {nested_type}/{name} not found in plan {}, leaving {} unset",
                plan.key(),
                field.name
            );
            return None;
        };

        visited.insert(key);
        match self.build_with(&nested_type, nested, plan, visited) {
            Ok(instance) => Some(Value::Object(instance)),
            Err(e) => {
                warn!("Leaving {} unset: {e}", field.name);
                None
            }
        }
    }
}
