//! Dispatch of parsed commands to the plan store.

use anyhow::{Context, Result};
use mockwire_core::{OperationStatus, PlanKey, PlanStore, SetField, SetMethod, TypeTarget};

use crate::{
    cli::{PlanCommands, TypeCommands},
    renderer::TerminalRenderer,
};

/// Runs commands against a store and renders their outcome.
///
/// Each handler returns whether the command found its target, so the binary
/// can exit non-zero when it did not.
pub struct Cli<'a> {
    store: &'a PlanStore,
    renderer: TerminalRenderer,
}

impl<'a> Cli<'a> {
    pub fn new(store: &'a PlanStore, renderer: TerminalRenderer) -> Self {
        Self { store, renderer }
    }

    pub fn handle_plan_command(&self, command: PlanCommands) -> Result<bool> {
        match command {
            PlanCommands::Create(args) => {
                let key = PlanKey::from(args);
                let created = self
                    .store
                    .create_plan_result(&key)
                    .with_context(|| format!("Failed to create plan {key}"))?;
                self.renderer.render(&created)?;
                Ok(true)
            }
            PlanCommands::List => self.list_plans(),
            PlanCommands::Show(args) => {
                let key = PlanKey::from(args);
                match self.store.get_plan(&key) {
                    Some(plan) => {
                        self.renderer.render(&plan)?;
                        Ok(true)
                    }
                    None => self.not_found(format!("Plan {key} not found")),
                }
            }
            PlanCommands::Delete(args) => {
                let key = PlanKey::from(args);
                match self.store.delete_plan_result(&key) {
                    Some(deleted) => {
                        self.renderer.render(&deleted)?;
                        Ok(true)
                    }
                    None => self.not_found(format!("Plan {key} not found")),
                }
            }
            PlanCommands::Activate(args) => {
                let status = self.store.activate_plan_status(&PlanKey::from(args));
                self.renderer.render_status(&status)?;
                Ok(status.success)
            }
            PlanCommands::Active => {
                match self.store.get_active_plan() {
                    Some(plan) => self.renderer.render(&plan)?,
                    None => self
                        .renderer
                        .render_status(&OperationStatus::success("No plan is active".into()))?,
                }
                Ok(true)
            }
        }
    }

    pub fn handle_type_command(&self, command: TypeCommands) -> Result<bool> {
        match command {
            TypeCommands::Add(args) => {
                let status = self.store.add_type_status(&TypeTarget::from(args));
                self.renderer.render_status(&status)?;
                Ok(status.success)
            }
            TypeCommands::Remove(args) => {
                let target = TypeTarget::from(args);
                match self.store.remove_type_result(&target) {
                    Some(removed) => {
                        self.renderer.render(&removed)?;
                        Ok(true)
                    }
                    None => self.not_found(format!(
                        "Type {} not found in plan {}",
                        target.type_id, target.key
                    )),
                }
            }
            TypeCommands::Show(args) => {
                let target = TypeTarget::from(args);
                match self.store.show_mock_types(&target) {
                    Some(types) => {
                        self.renderer.render(&types)?;
                        Ok(true)
                    }
                    None => self.not_found(format!("Plan {} not found", target.key)),
                }
            }
            TypeCommands::SetField(args) => {
                let params = SetField::from(args);
                let updated = self.store.set_field(&params).with_context(|| {
                    format!("Failed to set field {} on {}", params.name, params.target.type_id)
                })?;
                self.render_update(updated, &params.target)
            }
            TypeCommands::SetMethod(args) => {
                let params = SetMethod::from(args);
                let updated = self.store.set_method(&params).with_context(|| {
                    format!("Failed to set method {} on {}", params.name, params.target.type_id)
                })?;
                self.render_update(updated, &params.target)
            }
        }
    }

    pub fn list_plans(&self) -> Result<bool> {
        self.renderer.render(&self.store.list_plans_summary())?;
        Ok(true)
    }

    fn render_update<T: std::fmt::Display>(
        &self,
        updated: Option<T>,
        target: &TypeTarget,
    ) -> Result<bool> {
        match updated {
            Some(result) => {
                self.renderer.render(&result)?;
                Ok(true)
            }
            None => self.not_found(format!("Plan {} not found", target.key)),
        }
    }

    fn not_found(&self, message: String) -> Result<bool> {
        self.renderer
            .render_status(&OperationStatus::failure(message))?;
        Ok(false)
    }
}
