//! Mock type operations for the PlanStore.

use log::{debug, info, warn};

use super::PlanStore;
use crate::{
    coerce::coerce,
    error::{MockError, Result},
    models::{MockField, MockType, Plan, PlanKey},
    value::Value,
};

impl PlanStore {
    /// Appends an empty entry for `type_id`. Returns false if the plan does
    /// not exist.
    pub fn add_type_to_plan(&self, key: &PlanKey, type_id: &str) -> bool {
        let plan = {
            let Some(mut plan) = self.plans.get_mut(key) else {
                return false;
            };
            let mut mock_type = MockType::new(type_id);
            mock_type.active = true;
            plan.mock_types.push(mock_type);
            plan.clone()
        };

        self.persist(&plan);
        info!("Added {type_id} to plan {key}");
        true
    }

    /// Replaces the entry with the same type and template name, or appends
    /// `mock_type` as a new entry.
    ///
    /// When the plan is active, field overrides are pushed to live instances
    /// of the type and the type is re-derived by the interception layer.
    /// Returns false if the plan does not exist.
    ///
    /// # Errors
    ///
    /// Returns `MockError::DuplicateTemplateName` if another entry already
    /// uses the template name. The plan is left unchanged.
    pub fn update_mock_type(&self, key: &PlanKey, mock_type: MockType) -> Result<bool> {
        let type_id = mock_type.type_id.clone();
        let plan = {
            let Some(mut plan) = self.plans.get_mut(key) else {
                return Ok(false);
            };
            if !plan.is_template_name_available(mock_type.template(), &type_id) {
                return Err(MockError::DuplicateTemplateName {
                    template: mock_type.template().unwrap_or_default().to_string(),
                    key: key.clone(),
                });
            }
            plan.upsert_mock_type(mock_type.clone());
            plan.clone()
        };

        self.persist(&plan);
        info!("Updated {type_id} in plan {key}");

        if plan.active {
            self.apply_to_live(&plan, &mock_type);
        }
        Ok(true)
    }

    /// Removes every entry for `type_id`. Returns false if the plan does not
    /// exist or had no such entry.
    pub fn delete_mock_type(&self, key: &PlanKey, type_id: &str) -> bool {
        let plan = {
            let Some(mut plan) = self.plans.get_mut(key) else {
                return false;
            };
            if plan.remove_mock_types(type_id) == 0 {
                return false;
            }
            plan.clone()
        };

        self.persist(&plan);
        info!("Removed {type_id} from plan {key}");
        true
    }

    /// The entry for `type_id` with the given template name (`None` or blank
    /// for the untemplated entry).
    pub fn get_mock_type(
        &self,
        key: &PlanKey,
        type_id: &str,
        template: Option<&str>,
    ) -> Option<MockType> {
        self.plans
            .get(key)?
            .mock_types
            .iter()
            .find(|mt| mt.matches(type_id, template))
            .cloned()
    }

    /// Pushes the entry's field overrides to tracked instances, then asks
    /// for the type to be re-derived.
    fn apply_to_live(&self, plan: &Plan, mock_type: &MockType) {
        let type_id = &mock_type.type_id;
        for field in mock_type.fields.iter().filter(|f| f.has_override()) {
            match self.live_field_value(plan, type_id, field) {
                Some(value) => {
                    self.tracker.overwrite_field(type_id, &field.name, &value);
                }
                None => debug!("No value to push for {type_id}.{}", field.name),
            }
        }
        self.request_reinterception(type_id);
    }

    /// Resolves a field override to the value pushed into live instances:
    /// a template-built instance for reference fields, otherwise the coerced
    /// literal.
    fn live_field_value(&self, plan: &Plan, type_id: &str, field: &MockField) -> Option<Value> {
        let declared = self
            .registry
            .field_type(type_id, &field.name)
            .unwrap_or_else(|| field.field_type.clone());

        if let (Some(name), Some(nested_type)) = (field.template(), declared.reference_id()) {
            match plan.find_template(&nested_type, name) {
                Some(template) => match self.resolver.build(&nested_type, template, plan) {
                    Ok(instance) => return Some(Value::Object(instance)),
                    Err(e) => warn!("Cannot build {nested_type}/{name} for {type_id}.{}: {e}", field.name),
                },
                None => warn!("Template {nested_type}/{name} not found in plan {}", plan.key()),
            }
        }

        let literal = field.value.as_deref()?;
        let value = coerce(literal, &declared);
        if value.is_none() {
            warn!(
                "Override '{literal}' for {type_id}.{} does not fit {declared}, not pushed",
                field.name
            );
        }
        value
    }
}
