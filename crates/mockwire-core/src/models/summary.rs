//! Plan summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Plan;

/// Summary information about a plan with entry statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    pub project: String,
    pub name: String,
    pub active: bool,
    pub created_at: Timestamp,
    /// Number of mock type entries
    pub total_types: u32,
    /// Number of entries usable as templates
    pub templates: u32,
    /// Number of field overrides across all entries
    pub field_overrides: u32,
    /// Number of active method overrides across all entries
    pub method_overrides: u32,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        let templates = plan
            .mock_types
            .iter()
            .filter(|mt| mt.template().is_some())
            .count() as u32;
        let field_overrides = plan
            .mock_types
            .iter()
            .flat_map(|mt| &mt.fields)
            .filter(|f| f.has_override())
            .count() as u32;
        let method_overrides = plan
            .mock_types
            .iter()
            .flat_map(|mt| &mt.methods)
            .filter(|m| m.active && (m.return_value.is_some() || m.return_template().is_some()))
            .count() as u32;

        Self {
            project: plan.project.clone(),
            name: plan.name.clone(),
            active: plan.active,
            created_at: plan.created_at,
            total_types: plan.mock_types.len() as u32,
            templates,
            field_overrides,
            method_overrides,
        }
    }
}
