//! Integration tests comparing CLI and direct Display implementations
//!
//! The CLI in plain mode prints exactly the markdown the core's `Display`
//! implementations produce, which is also what the MCP tools return. These
//! tests drive the binary and a scheduler against the same database and
//! compare the two.

use std::{path::Path, process::Command};

use almanac_core::{
    Scheduler, SchedulerBuilder,
    display::{JournalEntries, Plants, ScheduledTasks},
    params::{Id, ListEntries, ListPlants, ListTasks},
};
use tempfile::TempDir;

/// Helper function to create a scheduler over the database the CLI uses
async fn create_test_scheduler(db_path: &Path) -> Scheduler {
    SchedulerBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create scheduler")
}

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &Path, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_almanac"))
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to run CLI command");

    assert!(
        output.status.success(),
        "almanac {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

fn add_plants(db_path: &Path) {
    run_cli_command(
        db_path,
        &[
            "plant",
            "add",
            "Tomato",
            "-v",
            "Sungold",
            "-m",
            "indoor-start",
            "-s",
            "6 weeks before",
            "--hardening",
            "1 week before",
            "-t",
            "1 week after",
            "--days-to-sprout",
            "7-14",
            "--seed-depth",
            "1/4",
        ],
    );
    run_cli_command(
        db_path,
        &["plant", "add", "Carrot", "-m", "direct-sow", "-s", "2 weeks before"],
    );
}

#[tokio::test]
async fn test_plant_show_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    add_plants(&db_path);

    let cli_output = run_cli_command(&db_path, &["plant", "show", "1"]);

    let scheduler = create_test_scheduler(&db_path).await;
    let schedule = scheduler
        .get_plant(&Id { id: 1 })
        .await
        .expect("Failed to get plant")
        .expect("Plant 1 should exist");

    assert_eq!(cli_output, schedule.to_string());
    assert!(cli_output.contains("- Seed depth: 1/4"));
}

#[tokio::test]
async fn test_plant_list_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    add_plants(&db_path);

    let cli_output = run_cli_command(&db_path, &["plant", "list"]);

    let scheduler = create_test_scheduler(&db_path).await;
    let plants = scheduler
        .list_plants(&ListPlants::default())
        .await
        .expect("Failed to list plants");
    let direct_output = format!("# Plants\n\n{}", Plants(plants));

    assert_eq!(cli_output, direct_output);
    // Sorted by name
    let carrot = cli_output.find("Carrot").expect("carrot listed");
    let tomato = cli_output.find("Tomato").expect("tomato listed");
    assert!(carrot < tomato);
}

#[tokio::test]
async fn test_task_calendar_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    add_plants(&db_path);
    run_cli_command(&db_path, &["task", "done", "1"]);

    let cli_output = run_cli_command(&db_path, &["task", "list", "--all"]);

    let scheduler = create_test_scheduler(&db_path).await;
    let rows = scheduler
        .list_tasks(&ListTasks {
            all: true,
            ..Default::default()
        })
        .await
        .expect("Failed to list tasks");
    let calendar = ScheduledTasks::new(rows, Scheduler::today());

    assert!(cli_output.starts_with("# Tasks\n\n"));
    assert!(cli_output.contains(&calendar.to_string()));
    assert!(cli_output.contains("- [x] Plant seeds: Tomato (Sungold) (ID: 1)"));
}

#[tokio::test]
async fn test_frost_update_is_visible_to_scheduler() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    add_plants(&db_path);

    let cli_output = run_cli_command(&db_path, &["frost", "set", "2026-04-20"]);
    assert!(cli_output.contains("Rescheduled tasks for 2 plants."));

    let scheduler = create_test_scheduler(&db_path).await;
    let frost = scheduler.frost_date().await.expect("Failed to read frost date");
    assert_eq!(frost.date, jiff::civil::date(2026, 4, 20));
    assert!(frost.explicit);

    let shown = run_cli_command(&db_path, &["frost", "show"]);
    assert_eq!(shown, frost.to_string());

    let carrot = scheduler
        .get_plant(&Id { id: 2 })
        .await
        .expect("Failed to get plant")
        .expect("Plant 2 should exist");
    assert_eq!(carrot.tasks[0].due_date, jiff::civil::date(2026, 4, 6));
}

#[tokio::test]
async fn test_journal_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    run_cli_command(&db_path, &["journal", "add", "Soil is workable", "-d", "2026-03-28"]);
    run_cli_command(&db_path, &["journal", "add", "Garlic is up", "-d", "2026-04-02"]);

    let cli_output = run_cli_command(&db_path, &["journal", "list"]);

    let scheduler = create_test_scheduler(&db_path).await;
    let entries = scheduler
        .list_entries(&ListEntries::default())
        .await
        .expect("Failed to list journal entries");
    let direct_output = format!("# Journal\n\n{}", JournalEntries(entries));

    assert_eq!(cli_output, direct_output);
}
