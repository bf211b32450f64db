use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{PlanCommands, TypeCommands};

/// Edit live behavior override plans.
///
/// A plan holds substitute field values and method return values for types
/// of a running program. Exactly one plan can be active at a time; programs
/// built against mockwire report the active plan's overrides.
#[derive(Parser)]
#[command(version, about, name = "mockwire")]
pub struct Args {
    /// Directory holding plan documents. Defaults to
    /// $XDG_DATA_HOME/mockwire/plans
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the mockwire CLI
///
/// - `plan`: create, list, show, delete and activate plans
/// - `type`: edit the mock type entries of a plan
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage mock types within plans
    #[command(alias = "t")]
    Type {
        #[command(subcommand)]
        command: TypeCommands,
    },
}
