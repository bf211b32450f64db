//! Command-line argument structures.
//!
//! Each command's arguments are a clap wrapper converted into the core
//! parameter type with `From`, so core types stay free of clap attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → PlanStore
//! ```

use clap::{Args, Subcommand};
use mockwire_core::{PlanKey, SetField, SetMethod, TypeTarget, ValueType};

/// Identifies a plan by project and plan name
#[derive(Args)]
pub struct PlanKeyArgs {
    /// Project the plan belongs to
    pub project: String,
    /// Name of the plan within the project
    pub plan: String,
}

impl From<PlanKeyArgs> for PlanKey {
    fn from(val: PlanKeyArgs) -> Self {
        PlanKey::new(val.project, val.plan)
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new, inactive plan
    #[command(alias = "c")]
    Create(PlanKeyArgs),
    /// List all plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plan with all its mock types
    #[command(alias = "s")]
    Show(PlanKeyArgs),
    /// Delete a plan and its document
    #[command(aliases = ["d", "rm"])]
    Delete(PlanKeyArgs),
    /// Make a plan the only active plan
    #[command(alias = "a")]
    Activate(PlanKeyArgs),
    /// Show the active plan
    Active,
}

/// Identifies a mock type entry within a plan
#[derive(Args)]
pub struct TypeTargetArgs {
    #[command(flatten)]
    pub plan: PlanKeyArgs,
    /// Identifier of the overridden type
    pub type_id: String,
    /// Template variant of the entry; omit for the untemplated entry
    #[arg(long)]
    pub template: Option<String>,
}

impl From<TypeTargetArgs> for TypeTarget {
    fn from(val: TypeTargetArgs) -> Self {
        TypeTarget::new(val.plan.into(), val.type_id).with_template(val.template)
    }
}

/// Override one field of a mock type
#[derive(Args)]
pub struct SetFieldArgs {
    #[command(flatten)]
    pub target: TypeTargetArgs,
    /// Field name
    pub field: String,
    /// Declared type of the field (e.g. int, String, app.Address)
    #[arg(long, value_parser = parse_value_type)]
    pub field_type: ValueType,
    /// Literal value to report
    #[arg(long)]
    pub value: Option<String>,
    /// Template of the field's type to build the value from
    #[arg(long)]
    pub template_ref: Option<String>,
}

impl From<SetFieldArgs> for SetField {
    fn from(val: SetFieldArgs) -> Self {
        SetField {
            target: val.target.into(),
            name: val.field,
            field_type: val.field_type,
            value: val.value,
            template: val.template_ref,
        }
    }
}

/// Override one method's return value
#[derive(Args)]
pub struct SetMethodArgs {
    #[command(flatten)]
    pub target: TypeTargetArgs,
    /// Method name
    pub method: String,
    /// Declared return type (e.g. void, int, app.Address)
    #[arg(long, value_parser = parse_value_type)]
    pub returns: ValueType,
    /// Literal return value
    #[arg(long)]
    pub value: Option<String>,
    /// Template of the return type to build the result from
    #[arg(long)]
    pub return_template: Option<String>,
    /// Parameter type, repeated per parameter
    #[arg(long = "param")]
    pub params: Vec<String>,
    /// Store the override without applying it
    #[arg(long)]
    pub inactive: bool,
}

impl From<SetMethodArgs> for SetMethod {
    fn from(val: SetMethodArgs) -> Self {
        SetMethod {
            target: val.target.into(),
            name: val.method,
            return_type: val.returns,
            parameter_types: val.params,
            return_value: val.value,
            return_template: val.return_template,
            active: !val.inactive,
        }
    }
}

#[derive(Subcommand)]
pub enum TypeCommands {
    /// Add an empty mock type entry to a plan
    #[command(alias = "a")]
    Add(TypeTargetArgs),
    /// Remove every entry of a type from a plan
    #[command(aliases = ["r", "rm"])]
    Remove(TypeTargetArgs),
    /// Show the entries of a type
    #[command(alias = "s")]
    Show(TypeTargetArgs),
    /// Override a field value
    #[command(alias = "f")]
    SetField(SetFieldArgs),
    /// Override a method return value
    #[command(alias = "m")]
    SetMethod(SetMethodArgs),
}

fn parse_value_type(s: &str) -> Result<ValueType, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_method_args_into_params() {
        let args = SetMethodArgs {
            target: TypeTargetArgs {
                plan: PlanKeyArgs {
                    project: "shop".to_string(),
                    plan: "checkout".to_string(),
                },
                type_id: "app.Cart".to_string(),
                template: None,
            },
            method: "total".to_string(),
            returns: ValueType::I64,
            value: Some("42".to_string()),
            return_template: None,
            params: vec!["int".to_string()],
            inactive: true,
        };

        let params = SetMethod::from(args);
        assert_eq!(params.target.key, PlanKey::new("shop", "checkout"));
        assert_eq!(params.return_type, ValueType::I64);
        assert!(!params.active);
    }

    #[test]
    fn test_parse_value_type() {
        assert_eq!(parse_value_type("int"), Ok(ValueType::I32));
        assert!(parse_value_type("").is_err());
    }
}
