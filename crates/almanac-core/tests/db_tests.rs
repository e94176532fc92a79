use almanac_core::{
    AlmanacError, Database, TaskFilter, TaskStatus, TaskType,
    engine,
    models::{NewTask, PlantConfig},
    params::CreatePlant,
    validation,
};
use jiff::{Timestamp, civil::date};
use tempfile::NamedTempFile;

mod common;

const OWNER: &str = "default";

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn config(input: &CreatePlant) -> PlantConfig {
    validation::validate_plant(input).expect("Plant input should be valid")
}

/// Inserts a plant scheduled against a May 15 frost date.
fn insert_plant(db: &mut Database, owner: &str, input: &CreatePlant) -> u64 {
    let config = config(input);
    let tasks = engine::generate(&config, date(2026, 5, 15)).expect("Failed to generate");
    db.insert_plant_with_tasks(owner, &config, &tasks)
        .expect("Failed to insert plant")
        .id
}

fn garden_task(due: jiff::civil::Date, notes: &str) -> NewTask {
    NewTask {
        task_type: TaskType::GardenTask,
        due_date: due,
        end_date: None,
        notes: Some(notes.to_string()),
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());
}

#[test]
fn test_reopening_database_keeps_data() {
    let (temp_file, mut db) = create_test_db();
    let id = insert_plant(&mut db, OWNER, &common::tomato());
    drop(db);

    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    let plant = db
        .get_plant(id, OWNER)
        .expect("Failed to get plant")
        .expect("Plant should exist");
    assert_eq!(plant.config.name, "Tomato");
}

#[test]
fn test_plant_config_round_trips() {
    let (_temp_file, mut db) = create_test_db();
    let input = common::tomato();
    let id = insert_plant(&mut db, OWNER, &input);

    let plant = db
        .get_plant(id, OWNER)
        .expect("Failed to get plant")
        .expect("Plant should exist");

    assert_eq!(plant.config, config(&input));
    assert!(!plant.is_muted());
    assert_eq!(db.tasks_for_plant(id).expect("Failed to list tasks").len(), 4);
}

#[test]
fn test_get_plant_is_owner_scoped() {
    let (_temp_file, mut db) = create_test_db();
    let id = insert_plant(&mut db, "alex", &common::carrot());

    assert!(db.get_plant(id, "sam").expect("Query failed").is_none());
    assert!(db.list_plants("sam", true).expect("Query failed").is_empty());
    assert_eq!(db.list_plants("alex", true).expect("Query failed").len(), 1);
}

#[test]
fn test_list_plants_sorted_by_name_and_hides_muted() {
    let (_temp_file, mut db) = create_test_db();
    let tomato = insert_plant(&mut db, OWNER, &common::tomato());
    insert_plant(&mut db, OWNER, &common::carrot());

    let names: Vec<_> = db
        .list_plants(OWNER, false)
        .expect("Failed to list plants")
        .into_iter()
        .map(|p| p.config.name)
        .collect();
    assert_eq!(names, ["Carrot", "Tomato"]);

    db.set_plant_muted(tomato, OWNER, Some(Timestamp::now()))
        .expect("Failed to mute");
    assert_eq!(db.list_plants(OWNER, false).expect("Query failed").len(), 1);
    assert_eq!(db.list_plants(OWNER, true).expect("Query failed").len(), 2);

    let muted = db.set_plant_muted(999, OWNER, None);
    assert!(matches!(muted, Err(AlmanacError::PlantNotFound { id: 999 })));
}

#[test]
fn test_replace_generated_tasks_keeps_general_tasks() {
    let (_temp_file, mut db) = create_test_db();
    let id = insert_plant(&mut db, OWNER, &common::carrot());
    db.add_general_task(OWNER, &garden_task(date(2026, 4, 20), "Turn compost"))
        .expect("Failed to add task");

    let tasks = engine::generate(&config(&common::carrot()), date(2026, 6, 1))
        .expect("Failed to generate");
    let replaced = db
        .replace_generated_tasks(id, OWNER, &tasks)
        .expect("Failed to replace");

    assert_eq!(replaced.len(), tasks.len());
    assert!(replaced.iter().all(|t| t.status == TaskStatus::Pending));
    assert_eq!(replaced[0].due_date, date(2026, 5, 18));

    let all = TaskFilter {
        include_muted: true,
        ..Default::default()
    };
    let rows = db.list_tasks(OWNER, &all).expect("Failed to list tasks");
    assert_eq!(rows.len(), tasks.len() + 1);
    assert!(
        rows.iter()
            .any(|r| r.task.plant_id.is_none() && r.subject() == "Garden task")
    );
}

#[test]
fn test_replace_generated_tasks_for_missing_plant() {
    let (_temp_file, mut db) = create_test_db();
    let result = db.replace_generated_tasks(42, OWNER, &[]);
    assert!(matches!(result, Err(AlmanacError::PlantNotFound { id: 42 })));

    let id = insert_plant(&mut db, "alex", &common::carrot());
    let result = db.replace_generated_tasks(id, "sam", &[]);
    assert!(matches!(result, Err(AlmanacError::PlantNotFound { .. })));
    assert_eq!(db.tasks_for_plant(id).expect("Query failed").len(), 2);
}

#[test]
fn test_list_tasks_orders_and_filters() {
    let (_temp_file, mut db) = create_test_db();
    let tomato = insert_plant(&mut db, OWNER, &common::tomato());
    insert_plant(&mut db, OWNER, &common::carrot());

    let all = TaskFilter {
        include_muted: true,
        ..Default::default()
    };
    let rows = db.list_tasks(OWNER, &all).expect("Failed to list tasks");
    let dates: Vec<_> = rows.iter().map(|r| r.task.due_date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert_eq!(rows[0].subject(), "Tomato (Sungold)");

    let window = TaskFilter {
        from: Some(date(2026, 5, 1)),
        to: Some(date(2026, 5, 15)),
        ..Default::default()
    };
    let rows = db.list_tasks(OWNER, &window).expect("Failed to list tasks");
    assert!(
        rows.iter()
            .all(|r| r.task.due_date >= date(2026, 5, 1) && r.task.due_date <= date(2026, 5, 15))
    );
    assert!(!rows.is_empty());

    let since = TaskFilter {
        since: Some(date(2026, 5, 20)),
        ..Default::default()
    };
    let rows = db.list_tasks(OWNER, &since).expect("Failed to list tasks");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].task.task_type, TaskType::PlantSeedlings);

    let by_plant = TaskFilter {
        plant_id: Some(tomato),
        status: Some(TaskStatus::Pending),
        ..Default::default()
    };
    assert_eq!(db.list_tasks(OWNER, &by_plant).expect("Query failed").len(), 4);
}

#[test]
fn test_list_tasks_excludes_muted_plants() {
    let (_temp_file, mut db) = create_test_db();
    let tomato = insert_plant(&mut db, OWNER, &common::tomato());
    db.add_general_task(OWNER, &garden_task(date(2026, 4, 20), "Turn compost"))
        .expect("Failed to add task");
    db.set_plant_muted(tomato, OWNER, Some(Timestamp::now()))
        .expect("Failed to mute");

    let rows = db
        .list_tasks(OWNER, &TaskFilter::default())
        .expect("Failed to list tasks");
    assert_eq!(rows.len(), 1);
    assert!(rows[0].task.plant_id.is_none());
}

#[test]
fn test_task_status_and_override() {
    let (_temp_file, mut db) = create_test_db();
    let task = db
        .add_general_task(OWNER, &garden_task(date(2026, 4, 20), "Turn compost"))
        .expect("Failed to add task");
    assert_eq!(task.status, TaskStatus::Pending);

    let done = db
        .set_task_status(task.id, OWNER, TaskStatus::Done)
        .expect("Failed to set status");
    assert_eq!(done.status, TaskStatus::Done);

    let result = db.set_task_status(task.id, "someone-else", TaskStatus::Done);
    assert!(matches!(result, Err(AlmanacError::TaskNotFound { .. })));

    let update = almanac_core::models::TaskUpdate {
        end_date: Some(Some(date(2026, 4, 10))),
        ..Default::default()
    };
    let result = db.update_task(task.id, OWNER, &update);
    assert!(matches!(result, Err(AlmanacError::InvalidInput { .. })));

    db.delete_task(task.id, OWNER).expect("Failed to delete task");
    assert!(db.get_task(task.id, OWNER).expect("Query failed").is_none());
    assert!(matches!(
        db.delete_task(task.id, OWNER),
        Err(AlmanacError::TaskNotFound { .. })
    ));
}

#[test]
fn test_delete_plant_cascades_tasks() {
    let (_temp_file, mut db) = create_test_db();
    let id = insert_plant(&mut db, OWNER, &common::tomato());

    db.delete_plant(id, OWNER).expect("Failed to delete plant");

    assert!(db.get_plant(id, OWNER).expect("Query failed").is_none());
    assert!(db.tasks_for_plant(id).expect("Query failed").is_empty());
    assert!(matches!(
        db.delete_plant(id, OWNER),
        Err(AlmanacError::PlantNotFound { .. })
    ));
}

#[test]
fn test_frost_date_setting_is_per_owner() {
    let (_temp_file, mut db) = create_test_db();
    assert_eq!(db.get_frost_date(OWNER).expect("Query failed"), None);

    db.set_frost_date(OWNER, date(2026, 4, 30))
        .expect("Failed to set frost date");
    db.set_frost_date(OWNER, date(2026, 5, 2))
        .expect("Failed to overwrite frost date");

    assert_eq!(
        db.get_frost_date(OWNER).expect("Query failed"),
        Some(date(2026, 5, 2))
    );
    assert_eq!(db.get_frost_date("sam").expect("Query failed"), None);
}

#[test]
fn test_journal_entries_newest_first() {
    let (_temp_file, mut db) = create_test_db();
    let first = db
        .add_entry(OWNER, date(2026, 4, 1), "Seeds arrived")
        .expect("Failed to add entry");
    db.add_entry(OWNER, date(2026, 4, 9), "First sprouts")
        .expect("Failed to add entry");
    db.add_entry("sam", date(2026, 4, 5), "Not mine")
        .expect("Failed to add entry");

    let entries = db.list_entries(OWNER, None).expect("Failed to list");
    let bodies: Vec<_> = entries.iter().map(|e| e.body.as_str()).collect();
    assert_eq!(bodies, ["First sprouts", "Seeds arrived"]);
    assert_eq!(db.list_entries(OWNER, Some(1)).expect("Query failed").len(), 1);

    let edited = db
        .update_entry(first.id, OWNER, None, Some("Seeds arrived, all packets"))
        .expect("Failed to update entry");
    assert_eq!(edited.entry_date, date(2026, 4, 1));
    assert_eq!(edited.body, "Seeds arrived, all packets");

    db.delete_entry(first.id, OWNER).expect("Failed to delete");
    assert!(matches!(
        db.delete_entry(first.id, OWNER),
        Err(AlmanacError::EntryNotFound { .. })
    ));
}
