//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use crate::models::{MockType, PlanSummary};

/// Newtype wrapper for displaying collections of plan summaries.
///
/// Handles empty collections gracefully.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use mockwire_core::{
///     display::PlanSummaries,
///     models::{Plan, PlanKey, PlanSummary},
/// };
///
/// let plan = Plan::new(&PlanKey::new("shop", "happy-path"), Timestamp::now());
/// let summaries = PlanSummaries(vec![PlanSummary::from(&plan)]);
/// let output = format!("{}", summaries);
/// assert!(output.contains("shop::happy-path"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the plan summary at the given index.
    pub fn get(&self, index: usize) -> Option<&PlanSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{}", plan)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the entries of one type in a plan.
pub struct MockTypes(pub Vec<MockType>);

impl MockTypes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for MockTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No matching types found.")
        } else {
            for mock_type in &self.0 {
                write!(f, "{}", mock_type)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{
        models::{MockField, Plan, PlanKey},
        value::ValueType,
    };

    #[test]
    fn test_plan_summaries_display() {
        let mut plan = Plan::new(
            &PlanKey::new("shop", "happy-path"),
            Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
        );
        plan.active = true;
        plan.mock_types.push(MockType::new("app.Cart"));
        let summaries = PlanSummaries(vec![PlanSummary::from(&plan)]);

        let output = format!("{}", summaries);
        assert!(output.contains("## shop::happy-path ●"));
        assert!(output.contains("- **Types**: 1 (0 templates)"));
        assert_eq!(summaries.len(), 1);

        let empty = PlanSummaries(vec![]);
        assert_eq!(format!("{}", empty), "No plans found.\n");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_mock_types_display() {
        let types = MockTypes(vec![
            MockType::new("app.Badge")
                .with_field(MockField::new("level", ValueType::I32).with_value("3")),
            MockType::new("app.Badge").with_template_name("gold"),
        ]);

        let output = format!("{}", types);
        assert!(output.contains("### app.Badge\n"));
        assert!(output.contains("- `level: i32` = `3`"));
        assert!(output.contains("### app.Badge (template: gold)"));
        assert!(output.contains("No overrides."));
        assert_eq!(types.len(), 2);

        let empty = MockTypes(vec![]);
        assert_eq!(format!("{}", empty), "No matching types found.\n");
    }
}
