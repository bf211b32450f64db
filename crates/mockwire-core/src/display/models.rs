//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core domain
//! models, separated from the model definitions to maintain clean separation of
//! concerns.
//!
//! The Display implementations provide:
//! - Markdown-formatted output for rich terminal display
//! - An active marker on plans and method overrides
//! - The same entry layout standalone and nested inside a plan

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{MockField, MockMethod, MockType, Plan, PlanKey, PlanSummary};

fn active_marker(active: bool) -> &'static str {
    if active {
        "● active"
    } else {
        "○ inactive"
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.key())?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", active_marker(self.active))?;
        writeln!(f, "- Document: {}", self.document)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;

        if self.mock_types.is_empty() {
            writeln!(f, "\nNo types in this plan.")?;
        } else {
            writeln!(f, "\n## Types")?;
            writeln!(f)?;
            for mock_type in &self.mock_types {
                write!(f, "{mock_type}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for MockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.template() {
            Some(template) => writeln!(f, "### {} (template: {template})", self.type_id)?,
            None => writeln!(f, "### {}", self.type_id)?,
        }
        writeln!(f)?;

        if !self.fields.is_empty() {
            writeln!(f, "#### Fields")?;
            writeln!(f)?;
            for field in &self.fields {
                writeln!(f, "{field}")?;
            }
            writeln!(f)?;
        }

        if !self.methods.is_empty() {
            writeln!(f, "#### Methods")?;
            writeln!(f)?;
            for method in &self.methods {
                writeln!(f, "{method}")?;
            }
            writeln!(f)?;
        }

        if self.fields.is_empty() && self.methods.is_empty() {
            writeln!(f, "No overrides.")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for MockField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- `{}: {}`", self.name, self.field_type)?;
        if let Some(value) = &self.value {
            write!(f, " = `{value}`")?;
        }
        if let Some(template) = self.template() {
            write!(f, " ← template `{template}`")?;
        }
        if !self.has_override() {
            write!(f, " (unchanged)")?;
        }
        Ok(())
    }
}

impl fmt::Display for MockMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- `{}`", self.signature())?;
        if let Some(value) = &self.return_value {
            write!(f, " returns `{value}`")?;
        } else if let Some(template) = self.return_template() {
            write!(f, " returns template `{template}`")?;
        }
        write!(f, " ({})", active_marker(self.active))
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.active { " ●" } else { "" };
        writeln!(
            f,
            "## {}{marker}",
            PlanKey::new(&self.project, &self.name)
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Types**: {} ({} templates)",
            self.total_types, self.templates
        )?;
        writeln!(
            f,
            "- **Overrides**: {} fields, {} methods",
            self.field_overrides, self.method_overrides
        )?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}
