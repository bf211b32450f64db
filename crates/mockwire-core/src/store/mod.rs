//! The plan store: source of truth for override plans.
//!
//! [`PlanStore`] keeps every plan in a concurrent map keyed by
//! [`PlanKey`], mirrors each one to its own JSON document, and enforces the
//! two store-wide invariants: at most one plan is active, and a non-blank
//! template name is unique within a plan.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │  DocumentStore  │
//! │ (params in,     │───▶│ (plan_ops,      │───▶│  one JSON file  │
//! │  wrappers out)  │    │  type_ops)      │    │  per plan       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                 │
//!                                 ▼
//!                  InstanceTracker + Reinterception hook
//!                  (only when the mutated plan is active)
//! ```
//!
//! ## Submodules
//!
//! - [`plan_ops`]: create, list, get, delete, activate
//! - [`type_ops`]: add, update, delete and look up mock type entries
//! - [`handlers`]: parameter-driven operations returning display wrappers
//!
//! Lock discipline: a map entry is only held while the in-memory plan is
//! mutated. Persistence, template building and pushes to live instances
//! run on a cloned snapshot after the entry is released.

use std::sync::{Arc, Weak};

use dashmap::DashMap;
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};

use crate::{
    error::Result,
    models::{Plan, PlanKey},
    object::ObjectRef,
    registry::TypeRegistry,
    resolver::TemplateResolver,
    storage::DocumentStore,
    tracker::InstanceTracker,
};

pub mod handlers;
pub mod plan_ops;
pub mod type_ops;

#[cfg(test)]
mod tests;

/// Receiver of re-derivation requests for a type whose overrides changed.
///
/// Implemented by the interception layer; the store holds it weakly.
pub trait Reinterception: Send + Sync {
    fn reload_type(&self, type_id: &str);
}

/// Durable, concurrent collection of plans.
pub struct PlanStore {
    plans: DashMap<PlanKey, Plan>,
    documents: DocumentStore,
    tracker: Arc<InstanceTracker>,
    resolver: Arc<TemplateResolver>,
    registry: Arc<TypeRegistry>,
    /// Serialises activation so concurrent calls cannot both win.
    activation: Mutex<()>,
    reinterception: RwLock<Option<Weak<dyn Reinterception>>>,
}

impl PlanStore {
    /// Opens a store over `documents`, loading every readable plan document.
    ///
    /// If more than one loaded plan claims to be active, only the first by
    /// key stays active.
    ///
    /// # Errors
    ///
    /// Returns `MockError::FileSystem` if the document directory cannot be
    /// read.
    pub fn open(
        documents: DocumentStore,
        tracker: Arc<InstanceTracker>,
        resolver: Arc<TemplateResolver>,
        registry: Arc<TypeRegistry>,
    ) -> Result<Self> {
        let mut loaded = documents.load_all()?;
        loaded.sort_by_key(Plan::key);

        let plans = DashMap::new();
        let mut seen_active = false;
        for mut plan in loaded {
            if plan.active {
                if seen_active {
                    warn!("Plan {} was also marked active, deactivating it", plan.key());
                    plan.active = false;
                }
                seen_active = true;
            }
            plans.insert(plan.key(), plan);
        }
        info!(
            "Loaded {} plan(s) from {}",
            plans.len(),
            documents.root().display()
        );

        Ok(Self {
            plans,
            documents,
            tracker,
            resolver,
            registry,
            activation: Mutex::new(()),
            reinterception: RwLock::new(None),
        })
    }

    /// Registers the receiver of re-derivation requests.
    pub fn attach_reinterception(&self, hook: Weak<dyn Reinterception>) {
        *self.reinterception.write() = Some(hook);
    }

    /// Builds an instance from a template of the active plan.
    ///
    /// Returns `None` if no plan is active, the template does not exist, or
    /// the instance cannot be built.
    pub fn resolve_active_template(&self, type_id: &str, template: &str) -> Option<ObjectRef> {
        let plan = self.get_active_plan()?;
        let Some(mock_type) = plan.find_template(type_id, template) else {
            debug!("No template {type_id}/{template} in active plan {}", plan.key());
            return None;
        };
        match self.resolver.build(type_id, mock_type, &plan) {
            Ok(instance) => Some(instance),
            Err(e) => {
                warn!("Cannot build template {type_id}/{template}: {e}");
                None
            }
        }
    }

    /// Writes a plan's document, logging instead of failing.
    fn persist(&self, plan: &Plan) {
        if let Err(e) = self.documents.save(plan) {
            warn!("Failed to persist plan {}: {e}", plan.key());
        }
    }

    fn request_reinterception(&self, type_id: &str) {
        let hook = self.reinterception.read().as_ref().and_then(Weak::upgrade);
        match hook {
            Some(hook) => hook.reload_type(type_id),
            None => debug!("No interception layer attached, {type_id} not re-derived"),
        }
    }
}
