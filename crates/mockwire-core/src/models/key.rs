//! Plan identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MockError, Result};

/// Identifies a plan by project name and plan name.
///
/// Displays as the storage key `project::plan`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanKey {
    /// Project the plan belongs to
    pub project: String,

    /// Name of the plan within the project
    pub plan: String,
}

impl PlanKey {
    pub fn new(project: impl Into<String>, plan: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            plan: plan.into(),
        }
    }

    /// Checks that both names are usable as storage identifiers.
    ///
    /// The project name becomes a directory and the plan name a document
    /// file name, so neither may be empty or contain path separators.
    ///
    /// # Errors
    ///
    /// Returns `MockError::InvalidInput` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        validate_name("project", &self.project)?;
        validate_name("plan", &self.plan)
    }
}

fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MockError::invalid_input(field).with_reason("must not be empty"));
    }
    if value.contains(['/', '\\']) || value.contains("..") {
        return Err(MockError::invalid_input(field)
            .with_reason("must not contain path separators or '..'"));
    }
    Ok(())
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.project, self.plan)
    }
}
