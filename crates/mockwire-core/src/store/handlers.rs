//! Store operations that take parameter structures and return display
//! wrappers, for use by interface layers.

use super::PlanStore;
use crate::{
    display::{CreateResult, DeleteResult, MockTypes, OperationStatus, PlanSummaries, UpdateResult},
    error::Result,
    models::{MockField, MockMethod, MockType, Plan, PlanKey, PlanSummary},
    params::{SetField, SetMethod, TypeTarget},
};

impl PlanStore {
    /// Handle creating a new plan.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`PlanStore::create_plan`].
    pub fn create_plan_result(&self, key: &PlanKey) -> Result<CreateResult<Plan>> {
        self.create_plan(key).map(CreateResult::new)
    }

    /// Handle listing plans as summaries.
    pub fn list_plans_summary(&self) -> PlanSummaries {
        PlanSummaries(self.list_plans().iter().map(PlanSummary::from).collect())
    }

    /// Handle deleting a plan. `None` if the plan does not exist.
    pub fn delete_plan_result(&self, key: &PlanKey) -> Option<DeleteResult<PlanKey>> {
        self.delete_plan(key)
            .then(|| DeleteResult::new(key.clone()))
    }

    /// Handle activating a plan.
    pub fn activate_plan_status(&self, key: &PlanKey) -> OperationStatus {
        OperationStatus::found_or(
            self.activate_plan(key),
            format!("Plan {key} is now active"),
            format!("Plan {key} not found, no plan is active"),
        )
    }

    /// Handle adding an empty entry for a type.
    pub fn add_type_status(&self, target: &TypeTarget) -> OperationStatus {
        OperationStatus::found_or(
            self.add_type_to_plan(&target.key, &target.type_id),
            format!("Added {} to plan {}", target.type_id, target.key),
            format!("Plan {} not found", target.key),
        )
    }

    /// Handle removing every entry for a type. `None` if nothing was removed.
    pub fn remove_type_result(&self, target: &TypeTarget) -> Option<DeleteResult<(PlanKey, String)>> {
        self.delete_mock_type(&target.key, &target.type_id)
            .then(|| DeleteResult::new((target.key.clone(), target.type_id.clone())))
    }

    /// Handle showing the entries for a type, narrowed to one template
    /// variant when the target names one. `None` if the plan does not exist.
    pub fn show_mock_types(&self, target: &TypeTarget) -> Option<MockTypes> {
        let plan = self.get_plan(&target.key)?;
        let entries = plan
            .mock_types_for(&target.type_id)
            .filter(|mt| {
                target.template.is_none() || mt.matches(&target.type_id, target.template.as_deref())
            })
            .cloned()
            .collect();
        Some(MockTypes(entries))
    }

    /// Handle overriding one field of an entry, creating the entry if
    /// needed.
    ///
    /// The first time a field is overridden, its current value on a live
    /// instance (if any) is kept as the field's original value.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`PlanStore::update_mock_type`].
    pub fn set_field(&self, params: &SetField) -> Result<Option<UpdateResult<MockType>>> {
        let target = &params.target;
        let Some(mut entry) = self.entry_or_new(target) else {
            return Ok(None);
        };

        let original_value = entry
            .field(&params.name)
            .and_then(|f| f.original_value.clone())
            .or_else(|| self.snapshot_field(&target.type_id, &params.name));

        let mut field = MockField::new(&params.name, params.field_type.clone());
        field.value = params.value.clone();
        field.template = params.template.clone();
        field.original_value = original_value;

        let change = match (&field.value, field.template()) {
            (Some(value), _) => format!("{} = {value}", field.name),
            (None, Some(template)) => format!("{} ← template {template}", field.name),
            (None, None) => format!("{} override cleared", field.name),
        };
        entry.set_field(field);

        self.save_entry(target, entry, change)
    }

    /// Handle overriding one method's return value, creating the entry if
    /// needed.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`PlanStore::update_mock_type`].
    pub fn set_method(&self, params: &SetMethod) -> Result<Option<UpdateResult<MockType>>> {
        let target = &params.target;
        let Some(mut entry) = self.entry_or_new(target) else {
            return Ok(None);
        };

        let mut method = MockMethod::new(&params.name, params.return_type.clone())
            .with_parameters(params.parameter_types.clone());
        method.return_value = params.return_value.clone();
        method.return_template = params.return_template.clone();
        method.active = params.active;

        let state = if method.active { "active" } else { "inactive" };
        let change = format!("{} ({state})", method.signature());
        entry.set_method(method);

        self.save_entry(target, entry, change)
    }

    fn entry_or_new(&self, target: &TypeTarget) -> Option<MockType> {
        if !self.plans.contains_key(&target.key) {
            return None;
        }
        let entry = self
            .get_mock_type(&target.key, &target.type_id, target.template.as_deref())
            .unwrap_or_else(|| {
                let mut entry = MockType::new(&target.type_id);
                entry.template_name = target.template.clone();
                entry.active = true;
                entry
            });
        Some(entry)
    }

    fn save_entry(
        &self,
        target: &TypeTarget,
        entry: MockType,
        change: String,
    ) -> Result<Option<UpdateResult<MockType>>> {
        if !self.update_mock_type(&target.key, entry.clone())? {
            return Ok(None);
        }
        Ok(Some(UpdateResult::with_changes(entry, vec![change])))
    }

    fn snapshot_field(&self, type_id: &str, field: &str) -> Option<String> {
        let instance = self.tracker.list(type_id).into_iter().next()?;
        let value = instance.read().get_field(field)?;
        Some(value.to_string())
    }
}
