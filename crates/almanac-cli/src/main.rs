//! Almanac CLI Application
//!
//! Command-line interface and MCP server for the almanac garden scheduler.

mod args;
mod cli;
mod mcp;
mod renderer;

use almanac_core::SchedulerBuilder;
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{Cli, ListTasksArgs};
use log::info;
use mcp::{AlmanacMcpServer, run_stdio_server};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        owner,
        no_color,
        command,
    } = Args::parse();

    let scheduler = SchedulerBuilder::new()
        .with_database_path(database_file)
        .with_owner(owner)
        .build()
        .await
        .context("Failed to initialize scheduler")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Almanac started for owner '{}'", scheduler.owner());

    match command {
        Some(Plant { command }) => {
            Cli::new(scheduler, renderer)
                .handle_plant_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(scheduler, renderer)
                .handle_task_command(command)
                .await
        }
        Some(Frost { command }) => {
            Cli::new(scheduler, renderer)
                .handle_frost_command(command)
                .await
        }
        Some(Journal { command }) => {
            Cli::new(scheduler, renderer)
                .handle_journal_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Almanac MCP server");
            run_stdio_server(AlmanacMcpServer::new(scheduler))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(scheduler, renderer)
                .list_tasks(&ListTasksArgs::default(), "Upcoming tasks")
                .await
        }
    }
}
