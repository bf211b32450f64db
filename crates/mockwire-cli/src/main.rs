//! Mockwire CLI Application
//!
//! Command-line editor for the override plans that mockwire-enabled
//! programs read at runtime.

mod args;
mod cli;
mod commands;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use commands::Cli;
use log::info;
use mockwire_core::EngineBuilder;
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<ExitCode> {
    env_logger::init();

    let Args {
        storage_dir,
        no_color,
        command,
    } = Args::parse();

    let engine = EngineBuilder::new()
        .with_storage_dir(storage_dir)
        .build()
        .context("Failed to open plan storage")?;

    info!("Plans loaded from {}", engine.storage_dir().display());

    let cli = Cli::new(engine.store(), TerminalRenderer::new(!no_color));
    let found = match command {
        Some(Plan { command }) => cli.handle_plan_command(command)?,
        Some(Type { command }) => cli.handle_type_command(command)?,
        None => cli.list_plans()?,
    };

    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
