use almanac_core::{
    Scheduler, SchedulerBuilder,
    models::{OffsetDirection, OffsetInput, OffsetUnit},
    params::CreatePlant,
};
use tempfile::TempDir;

/// Helper function to create a test scheduler for `owner`
#[allow(dead_code)]
pub async fn create_test_scheduler(owner: &str) -> (TempDir, Scheduler) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let scheduler = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_owner(owner)
        .build()
        .await
        .expect("Failed to create scheduler");
    (temp_dir, scheduler)
}

/// Indoor-started tomato: seeds 6 weeks before, hardening 1 week before,
/// transplant 1 week after frost.
#[allow(dead_code)]
pub fn tomato() -> CreatePlant {
    CreatePlant {
        name: "Tomato".to_string(),
        variety: Some("Sungold".to_string()),
        sowing_method: "indoor_start".to_string(),
        seed_start: Some(OffsetInput::new(6, OffsetUnit::Weeks, OffsetDirection::Before)),
        hardening: Some(OffsetInput::new(1, OffsetUnit::Weeks, OffsetDirection::Before)),
        transplant: Some(OffsetInput::new(1, OffsetUnit::Weeks, OffsetDirection::After)),
        days_to_sprout: Some("7-14".to_string()),
        seed_depth: Some("1/4".to_string()),
        plant_spacing: Some("24 inches".to_string()),
        ..Default::default()
    }
}

/// Direct-sown carrot: seeds 2 weeks before frost.
#[allow(dead_code)]
pub fn carrot() -> CreatePlant {
    CreatePlant {
        name: "Carrot".to_string(),
        sowing_method: "direct_sow".to_string(),
        seed_start: Some(OffsetInput::new(2, OffsetUnit::Weeks, OffsetDirection::Before)),
        days_to_sprout: Some("14-21".to_string()),
        ..Default::default()
    }
}
