//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{MockType, PlanKey};

/// A named, persisted collection of type-level overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Project the plan belongs to
    pub project: String,

    /// Name of the plan within the project
    pub name: String,

    /// File name of the plan's durable document
    pub document: String,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Override entries, in insertion order
    #[serde(default)]
    pub mock_types: Vec<MockType>,

    /// Whether this plan governs interception
    #[serde(default)]
    pub active: bool,
}

impl Plan {
    /// Creates an empty, inactive plan.
    pub fn new(key: &PlanKey, created_at: Timestamp) -> Self {
        Self {
            project: key.project.clone(),
            name: key.plan.clone(),
            document: Self::document_name(key),
            created_at,
            mock_types: Vec::new(),
            active: false,
        }
    }

    /// Deterministic document path for a plan, relative to the storage
    /// root: one directory per project, one file per plan.
    pub fn document_name(key: &PlanKey) -> String {
        format!("{}/{}.json", key.project, key.plan)
    }

    pub fn key(&self) -> PlanKey {
        PlanKey::new(&self.project, &self.name)
    }

    /// All entries for `type_id`, in plan order.
    pub fn mock_types_for<'a, 'b>(
        &'a self,
        type_id: &'b str,
    ) -> impl Iterator<Item = &'a MockType> + 'b
    where
        'a: 'b,
    {
        self.mock_types.iter().filter(move |mt| mt.type_id == type_id)
    }

    /// The entry governing interception of `type_id`: the first one in plan
    /// order.
    pub fn interception_entry(&self, type_id: &str) -> Option<&MockType> {
        self.mock_types.iter().find(|mt| mt.type_id == type_id)
    }

    /// Finds the entry for `type_id` named `template`.
    pub fn find_template(&self, type_id: &str, template: &str) -> Option<&MockType> {
        self.mock_types
            .iter()
            .find(|mt| mt.type_id == type_id && mt.template() == Some(template))
    }

    /// Whether `template` may be saved on an entry for `type_id`.
    ///
    /// Blank names are always available. Otherwise exactly one existing
    /// entry with the same name is tolerated if it belongs to `type_id`, so
    /// the same entry can be saved again.
    pub fn is_template_name_available(&self, template: Option<&str>, type_id: &str) -> bool {
        let Some(template) = template.filter(|t| !t.trim().is_empty()) else {
            return true;
        };

        let mut skipped_current = false;
        for mock_type in &self.mock_types {
            if mock_type.template() != Some(template) {
                continue;
            }
            if !skipped_current && mock_type.type_id == type_id {
                skipped_current = true;
                continue;
            }
            return false;
        }
        true
    }

    /// Replaces the fields, methods and template of the entry matching
    /// `mock_type`'s type and template name, or appends it.
    ///
    /// Returns true when an existing entry was replaced.
    pub fn upsert_mock_type(&mut self, mock_type: MockType) -> bool {
        let template = mock_type.template().map(str::to_string);
        match self
            .mock_types
            .iter_mut()
            .find(|mt| mt.matches(&mock_type.type_id, template.as_deref()))
        {
            Some(existing) => {
                existing.fields = mock_type.fields;
                existing.methods = mock_type.methods;
                existing.template_name = mock_type.template_name;
                true
            }
            None => {
                self.mock_types.push(mock_type);
                false
            }
        }
    }

    /// Removes every entry for `type_id`, returning how many were removed.
    pub fn remove_mock_types(&mut self, type_id: &str) -> usize {
        let before = self.mock_types.len();
        self.mock_types.retain(|mt| mt.type_id != type_id);
        before - self.mock_types.len()
    }
}
