//! Plan operations for the PlanStore.

use dashmap::mapref::entry::Entry;
use jiff::Timestamp;
use log::{info, warn};

use super::PlanStore;
use crate::{
    error::{MockError, Result},
    models::{Plan, PlanKey},
};

impl PlanStore {
    /// Creates an empty, inactive plan and persists it.
    ///
    /// # Errors
    ///
    /// Returns `MockError::InvalidInput` for unusable names and
    /// `MockError::AlreadyExists` if the key is taken. The store is left
    /// unchanged in both cases.
    pub fn create_plan(&self, key: &PlanKey) -> Result<Plan> {
        key.validate()?;

        let plan = match self.plans.entry(key.clone()) {
            Entry::Occupied(_) => return Err(MockError::AlreadyExists { key: key.clone() }),
            Entry::Vacant(slot) => slot.insert(Plan::new(key, Timestamp::now())).clone(),
        };

        self.persist(&plan);
        info!("Created plan {key}");
        Ok(plan)
    }

    /// All plans, oldest first.
    pub fn list_plans(&self) -> Vec<Plan> {
        let mut plans: Vec<Plan> = self.plans.iter().map(|e| e.value().clone()).collect();
        plans.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.key().cmp(&b.key()))
        });
        plans
    }

    pub fn get_plan(&self, key: &PlanKey) -> Option<Plan> {
        self.plans.get(key).map(|plan| plan.clone())
    }

    /// Removes a plan and its document. Returns false if there was no such
    /// plan.
    pub fn delete_plan(&self, key: &PlanKey) -> bool {
        let Some((_, plan)) = self.plans.remove(key) else {
            return false;
        };

        if let Err(e) = self.documents.delete(&plan) {
            warn!("Failed to delete document of plan {key}: {e}");
        }
        info!("Deleted plan {key}");
        true
    }

    /// Makes `key` the only active plan.
    ///
    /// Every other plan is deactivated even when `key` does not exist.
    /// Each plan whose flag changed is persisted. Returns whether the target
    /// plan was found.
    pub fn activate_plan(&self, key: &PlanKey) -> bool {
        let _activation = self.activation.lock();

        let mut changed = Vec::new();
        for mut entry in self.plans.iter_mut() {
            let target = entry.key() == key;
            if entry.active != target {
                entry.active = target;
                changed.push(entry.value().clone());
            }
        }
        let found = self.plans.contains_key(key);

        for plan in &changed {
            self.persist(plan);
        }
        if found {
            info!("Activated plan {key}");
        }
        found
    }

    /// The active plan, if any.
    pub fn get_active_plan(&self) -> Option<Plan> {
        self.plans
            .iter()
            .find(|entry| entry.active)
            .map(|entry| entry.value().clone())
    }
}
