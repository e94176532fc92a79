//! Tests for the scheduler module.

use jiff::civil::date;
use tempfile::TempDir;

use super::*;
use crate::{
    models::{NewTask, OffsetDirection, OffsetInput, OffsetUnit, TaskStatus, TaskType},
    params::{
        CreatePlant, CreateTask, DeletePlant, Id, ListPlants, ListTasks, SetFrostDate,
        UpdatePlant, UpdateTask,
    },
};

/// Helper function to create a test scheduler
async fn create_test_scheduler() -> (TempDir, Scheduler) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let scheduler = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create scheduler");
    (temp_dir, scheduler)
}

fn tomato() -> CreatePlant {
    CreatePlant {
        name: "Tomato".to_string(),
        variety: Some("Sungold".to_string()),
        sowing_method: "indoor_start".to_string(),
        seed_start: Some(OffsetInput::new(6, OffsetUnit::Weeks, OffsetDirection::Before)),
        hardening: Some(OffsetInput::new(1, OffsetUnit::Weeks, OffsetDirection::Before)),
        transplant: Some(OffsetInput::new(1, OffsetUnit::Weeks, OffsetDirection::After)),
        days_to_sprout: Some("7-14".to_string()),
        ..Default::default()
    }
}

fn all_tasks() -> ListTasks {
    ListTasks {
        all: true,
        include_muted: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_plant_schedules_against_default_frost_date() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;

    let schedule = scheduler
        .create_plant(&tomato())
        .await
        .expect("Failed to create plant");

    let due: Vec<_> = schedule
        .tasks
        .iter()
        .map(|t| (t.task_type, t.due_date))
        .collect();
    assert_eq!(
        due,
        vec![
            (TaskType::PlantSeeds, date(2026, 4, 3)),
            (TaskType::ObserveSprouts, date(2026, 4, 10)),
            (TaskType::BeginHardeningOff, date(2026, 5, 8)),
            (TaskType::PlantSeedlings, date(2026, 5, 22)),
        ]
    );
    assert!(schedule.tasks.iter().all(|t| t.status == TaskStatus::Pending));
    assert_eq!(schedule.tasks[1].end_date, Some(date(2026, 4, 17)));
}

#[tokio::test]
async fn test_validation_gate_writes_nothing() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;

    let result = scheduler
        .create_plant(&CreatePlant {
            transplant: None,
            ..tomato()
        })
        .await;
    assert!(matches!(
        result,
        Err(AlmanacError::ConfigurationInvalid { .. })
    ));

    let plants = scheduler
        .list_plants(&ListPlants {
            include_muted: true,
        })
        .await
        .unwrap();
    assert!(plants.is_empty());
    assert!(scheduler.list_tasks(&all_tasks()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_regeneration_replaces_rather_than_appends() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let schedule = scheduler.create_plant(&tomato()).await.unwrap();
    let first_id = schedule.tasks[0].id;

    scheduler
        .mark_task_done(&Id { id: first_id })
        .await
        .unwrap();

    let regenerated = scheduler
        .regenerate_tasks(&Id {
            id: schedule.plant.id,
        })
        .await
        .unwrap();
    assert_eq!(regenerated.tasks.len(), 4);
    assert!(regenerated.tasks.iter().all(|t| t.status == TaskStatus::Pending));
    assert!(regenerated.tasks.iter().all(|t| t.id != first_id));

    let again = scheduler
        .regenerate_tasks(&Id {
            id: schedule.plant.id,
        })
        .await
        .unwrap();
    assert_eq!(scheduler.list_tasks(&all_tasks()).await.unwrap().len(), 4);
    let dates = |tasks: &[crate::models::Task]| {
        tasks.iter().map(|t| (t.task_type, t.due_date)).collect::<Vec<_>>()
    };
    assert_eq!(dates(&regenerated.tasks), dates(&again.tasks));
}

#[tokio::test]
async fn test_frost_date_change_moves_every_task() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plant = scheduler.create_plant(&tomato()).await.unwrap();

    let update = scheduler
        .set_frost_date(&SetFrostDate {
            date: " 2026-05-01 ".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(update.frost_date, date(2026, 5, 1));
    assert_eq!(update.regenerated, vec![plant.plant.id]);
    assert!(update.failed.is_empty());

    let frost = scheduler.frost_date().await.unwrap();
    assert_eq!(frost.date, date(2026, 5, 1));
    assert!(frost.explicit);

    let tasks = scheduler.list_tasks(&all_tasks()).await.unwrap();
    assert_eq!(tasks[0].task.due_date, date(2026, 3, 20));
    assert_eq!(tasks[3].task.due_date, date(2026, 5, 8));
}

#[tokio::test]
async fn test_unparsable_frost_date_changes_nothing() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    scheduler.create_plant(&tomato()).await.unwrap();
    let before = scheduler.list_tasks(&all_tasks()).await.unwrap();

    let result = scheduler
        .set_frost_date(&SetFrostDate {
            date: "next spring".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AlmanacError::DateParse { .. })));

    let frost = scheduler.frost_date().await.unwrap();
    assert_eq!(frost.date, date(2026, 5, 15));
    assert!(!frost.explicit);
    assert_eq!(scheduler.list_tasks(&all_tasks()).await.unwrap(), before);
}

#[tokio::test]
async fn test_frost_date_scope_is_per_owner() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("shared.db");
    let alex = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_owner("alex")
        .build()
        .await
        .unwrap();
    let sam = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_owner("sam")
        .build()
        .await
        .unwrap();

    alex.create_plant(&tomato()).await.unwrap();
    let sams_plant = sam.create_plant(&tomato()).await.unwrap();
    let sams_tasks = sam.list_tasks(&all_tasks()).await.unwrap();

    let update = alex
        .set_frost_date(&SetFrostDate {
            date: "2026-04-20".to_string(),
        })
        .await
        .unwrap();
    assert!(!update.regenerated.contains(&sams_plant.plant.id));

    assert_eq!(sam.list_tasks(&all_tasks()).await.unwrap(), sams_tasks);
    assert_eq!(sam.frost_date().await.unwrap().date, date(2026, 5, 15));
    assert!(
        alex.get_plant(&Id {
            id: sams_plant.plant.id
        })
        .await
        .unwrap()
        .is_none()
    );
}

#[tokio::test]
async fn test_failed_batch_keeps_previous_tasks() {
    let (temp_dir, scheduler) = create_test_scheduler().await;
    let schedule = scheduler.create_plant(&tomato()).await.unwrap();

    let mut db = Database::new(temp_dir.path().join("test.db")).unwrap();
    let broken = vec![
        NewTask {
            task_type: TaskType::PlantSeeds,
            due_date: date(2026, 4, 1),
            end_date: None,
            notes: None,
        },
        NewTask {
            task_type: TaskType::ObserveSprouts,
            due_date: date(2026, 4, 10),
            end_date: Some(date(2026, 4, 2)),
            notes: None,
        },
    ];
    assert!(
        db.replace_generated_tasks(schedule.plant.id, "default", &broken)
            .is_err()
    );

    let tasks = db.tasks_for_plant(schedule.plant.id).unwrap();
    assert_eq!(tasks, schedule.tasks);
}

#[tokio::test]
async fn test_failing_plant_does_not_block_siblings() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let late = scheduler
        .create_plant(&CreatePlant {
            name: "Late Squash".to_string(),
            sowing_method: "indoor_start".to_string(),
            seed_start: Some(OffsetInput::new(4, OffsetUnit::Weeks, OffsetDirection::Before)),
            transplant: Some(OffsetInput::new(10, OffsetUnit::Weeks, OffsetDirection::After)),
            ..Default::default()
        })
        .await
        .unwrap();
    let carrot = scheduler
        .create_plant(&CreatePlant {
            name: "Carrot".to_string(),
            sowing_method: "direct_sow".to_string(),
            seed_start: Some(OffsetInput::new(2, OffsetUnit::Weeks, OffsetDirection::Before)),
            ..Default::default()
        })
        .await
        .unwrap();

    // Ten weeks after this date is past the last representable day.
    let update = scheduler
        .set_frost_date(&SetFrostDate {
            date: "9999-12-01".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(update.regenerated, vec![carrot.plant.id]);
    assert_eq!(update.failed.len(), 1);
    assert_eq!(update.failed[0].plant_id, late.plant.id);

    let late_after = scheduler
        .get_plant(&Id { id: late.plant.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(late_after.tasks, late.tasks);

    let carrot_after = scheduler
        .get_plant(&Id {
            id: carrot.plant.id,
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(carrot_after.tasks[0].due_date, date(9999, 11, 17));
    assert_eq!(
        scheduler.frost_date().await.unwrap().date,
        date(9999, 12, 1)
    );
}

#[tokio::test]
async fn test_general_tasks_survive_regeneration() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plant = scheduler.create_plant(&tomato()).await.unwrap();

    let chore = scheduler
        .add_task(&CreateTask {
            due_date: "2026-04-05".to_string(),
            end_date: None,
            notes: Some("Turn the compost".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(chore.task_type, TaskType::GardenTask);
    assert_eq!(chore.plant_id, None);

    scheduler
        .regenerate_tasks(&Id {
            id: plant.plant.id,
        })
        .await
        .unwrap();
    scheduler
        .set_frost_date(&SetFrostDate {
            date: "2026-05-20".to_string(),
        })
        .await
        .unwrap();

    let kept = scheduler
        .get_task(&Id { id: chore.id })
        .await
        .unwrap()
        .expect("general task should remain");
    assert_eq!(kept.due_date, date(2026, 4, 5));
}

#[tokio::test]
async fn test_lifecycle_transitions() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let schedule = scheduler.create_plant(&tomato()).await.unwrap();
    let id = Id {
        id: schedule.tasks[0].id,
    };

    assert_eq!(
        scheduler.mark_task_done(&id).await.unwrap().status,
        TaskStatus::Done
    );
    assert_eq!(
        scheduler.mark_task_skipped(&id).await.unwrap().status,
        TaskStatus::Skipped
    );
    assert_eq!(
        scheduler.reset_task(&id).await.unwrap().status,
        TaskStatus::Pending
    );

    let others = scheduler.list_tasks(&all_tasks()).await.unwrap();
    assert!(others.iter().all(|t| t.task.status == TaskStatus::Pending));

    let missing = scheduler.mark_task_done(&Id { id: 9999 }).await;
    assert!(matches!(
        missing,
        Err(AlmanacError::TaskNotFound { id: 9999 })
    ));
}

#[tokio::test]
async fn test_other_owners_task_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("shared.db");
    let alex = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_owner("alex")
        .build()
        .await
        .unwrap();
    let sam = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_owner("sam")
        .build()
        .await
        .unwrap();

    let schedule = alex.create_plant(&tomato()).await.unwrap();
    let result = sam
        .mark_task_done(&Id {
            id: schedule.tasks[0].id,
        })
        .await;
    assert!(matches!(result, Err(AlmanacError::TaskNotFound { .. })));
}

#[tokio::test]
async fn test_muted_plants_hidden_from_task_views() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plant = scheduler.create_plant(&tomato()).await.unwrap();
    let plant_id = Id {
        id: plant.plant.id,
    };

    let muted = scheduler.mute_plant(&plant_id).await.unwrap();
    assert!(muted.is_muted());

    let visible = ListTasks {
        all: true,
        ..Default::default()
    };
    assert!(scheduler.list_tasks(&visible).await.unwrap().is_empty());
    assert_eq!(scheduler.list_tasks(&all_tasks()).await.unwrap().len(), 4);
    assert!(
        scheduler
            .list_plants(&ListPlants::default())
            .await
            .unwrap()
            .is_empty()
    );

    scheduler.unmute_plant(&plant_id).await.unwrap();
    assert_eq!(scheduler.list_tasks(&visible).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_update_plant_merges_and_regenerates() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plant = scheduler.create_plant(&tomato()).await.unwrap();

    let updated = scheduler
        .update_plant(&UpdatePlant {
            id: plant.plant.id,
            sowing_method: Some("direct_sow".to_string()),
            days_to_sprout: Some(String::new()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.plant.config.variety.as_deref(), Some("Sungold"));
    assert_eq!(updated.plant.config.days_to_sprout, None);
    assert_eq!(updated.tasks.len(), 1);
    assert_eq!(updated.tasks[0].task_type, TaskType::PlantSeeds);
    assert_eq!(
        updated.tasks[0].notes.as_deref(),
        Some("Plant Tomato seeds outdoors")
    );

    let invalid = scheduler
        .update_plant(&UpdatePlant {
            id: plant.plant.id,
            seed_start: Some(OffsetInput::absent()),
            ..Default::default()
        })
        .await;
    assert!(matches!(
        invalid,
        Err(AlmanacError::ConfigurationInvalid { .. })
    ));
    assert_eq!(scheduler.list_tasks(&all_tasks()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_manual_override_is_discarded_by_regeneration() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plant = scheduler.create_plant(&tomato()).await.unwrap();

    let moved = scheduler
        .update_task(&UpdateTask {
            id: plant.tasks[0].id,
            due_date: Some("2026-04-06".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(moved.due_date, date(2026, 4, 6));

    let rejected = scheduler
        .update_task(&UpdateTask {
            id: plant.tasks[1].id,
            due_date: Some("2026-04-30".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(rejected, Err(AlmanacError::InvalidInput { .. })));

    let regenerated = scheduler
        .regenerate_tasks(&Id {
            id: plant.plant.id,
        })
        .await
        .unwrap();
    assert_eq!(regenerated.tasks[0].due_date, date(2026, 4, 3));
}

#[tokio::test]
async fn test_delete_plant_requires_confirmation_and_cascades() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plant = scheduler.create_plant(&tomato()).await.unwrap();

    let unconfirmed = scheduler
        .delete_plant(&DeletePlant {
            id: plant.plant.id,
            confirmed: false,
        })
        .await;
    assert!(matches!(
        unconfirmed,
        Err(AlmanacError::InvalidInput { .. })
    ));

    scheduler
        .delete_plant(&DeletePlant {
            id: plant.plant.id,
            confirmed: true,
        })
        .await
        .unwrap();
    assert!(scheduler.list_tasks(&all_tasks()).await.unwrap().is_empty());

    let again = scheduler
        .delete_plant(&DeletePlant {
            id: plant.plant.id,
            confirmed: true,
        })
        .await;
    assert!(matches!(again, Err(AlmanacError::PlantNotFound { .. })));
}

#[tokio::test]
async fn test_blank_owner_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let result = SchedulerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_owner("  ")
        .build()
        .await;
    assert!(matches!(result, Err(AlmanacError::InvalidInput { .. })));
}
