//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create, update,
//! and delete operations with consistent messaging and resource display.

use std::fmt;

use crate::models::{MockType, Plan, PlanKey};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use mockwire_core::{display::CreateResult, models::{Plan, PlanKey}};
///
/// let plan = Plan::new(&PlanKey::new("shop", "happy-path"), Timestamp::now());
/// let output = CreateResult::new(plan).to_string();
/// assert!(output.contains("Created plan shop::happy-path"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan {}", self.resource.key())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// The wrapper can track and display specific changes made during the update,
/// providing users with clear feedback about what was modified.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<MockType> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated type {}", self.resource.type_id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<PlanKey> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted plan {}", self.resource)
    }
}

impl fmt::Display for DeleteResult<(PlanKey, String)> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (key, type_id) = &self.resource;
        writeln!(f, "Removed type {type_id} from plan {key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::MockField, value::ValueType};

    #[test]
    fn test_update_result_lists_changes() {
        let mock_type = MockType::new("app.Badge")
            .with_field(MockField::new("level", ValueType::I32).with_value("3"));
        let output = UpdateResult::with_changes(mock_type, vec!["level = 3".to_string()])
            .to_string();

        assert!(output.starts_with("Updated type app.Badge\n"));
        assert!(output.contains("Changes made:\n- level = 3\n"));
        assert!(output.contains("### app.Badge"));
    }

    #[test]
    fn test_update_result_without_changes() {
        let output = UpdateResult::new(MockType::new("app.Badge")).to_string();
        assert!(!output.contains("Changes made:"));
        assert!(output.contains("No overrides."));
    }

    #[test]
    fn test_delete_results() {
        let key = PlanKey::new("shop", "checkout");
        assert_eq!(
            DeleteResult::new(key.clone()).to_string(),
            "Deleted plan shop::checkout\n"
        );
        assert_eq!(
            DeleteResult::new((key, "app.Cart".to_string())).to_string(),
            "Removed type app.Cart from plan shop::checkout\n"
        );
    }
}
