use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{FrostCommands, JournalCommands, PlantCommands, TaskCommands};

/// Garden task scheduler keyed to your last frost date
///
/// Almanac records the plants you grow and when, relative to the last spring
/// frost, each one should be sown, hardened off and transplanted. It turns
/// that into a dated task calendar and reschedules everything when the frost
/// date moves. Run without a command to see upcoming tasks, or use `serve` to
/// expose the same operations to AI assistants over MCP (Model Context
/// Protocol).
#[derive(Parser)]
#[command(version, about, name = "almanac")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/almanac/almanac.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Garden whose plants and tasks to work with
    #[arg(long, global = true, env = "ALMANAC_OWNER", default_value = "default")]
    pub owner: String,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Almanac CLI
///
/// - `plant`: record plants and their sowing offsets
/// - `task`: the task calendar and task status
/// - `frost`: show or move the last frost date
/// - `journal`: dated garden notes
/// - `serve`: start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plants and their schedules
    #[command(alias = "p")]
    Plant {
        #[command(subcommand)]
        command: PlantCommands,
    },
    /// Work with the task calendar
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show or change the last frost date
    #[command(alias = "f")]
    Frost {
        #[command(subcommand)]
        command: FrostCommands,
    },
    /// Keep a garden journal
    #[command(alias = "j")]
    Journal {
        #[command(subcommand)]
        command: JournalCommands,
    },
    /// Start the MCP server
    Serve,
}
