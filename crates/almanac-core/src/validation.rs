//! Validation of raw plant input into a [`PlantConfig`].
//!
//! Every rule runs and all failures are reported together, so a caller can
//! show the complete list at once. Nothing reaches the engine or the database
//! unless validation passed.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::{
    error::{AlmanacError, Result},
    models::{OffsetDays, OffsetInput, PlantConfig, SowingMethod},
    params::{CreatePlant, non_blank},
};

pub const SEED_START_LABEL: &str = "Plant seeds";
pub const HARDENING_LABEL: &str = "Begin hardening off";
pub const TRANSPLANT_LABEL: &str = "Transplant seedlings";

static CONTAINS_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));
static SEED_DEPTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+/\d+|0|surface sow)$").expect("valid regex"));

/// Checks a plant's input and normalizes it.
///
/// Blank optional strings become `None`. On failure the returned
/// [`AlmanacError::ConfigurationInvalid`] carries every message.
///
/// ```rust
/// use almanac_core::{params::CreatePlant, validation::validate_plant, AlmanacError};
///
/// let input = CreatePlant {
///     name: "Basil".to_string(),
///     sowing_method: "indoor_start".to_string(),
///     ..Default::default()
/// };
/// match validate_plant(&input) {
///     Err(AlmanacError::ConfigurationInvalid { errors }) => assert_eq!(errors.len(), 2),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
pub fn validate_plant(input: &CreatePlant) -> Result<PlantConfig> {
    let mut errors = Vec::new();

    let name = non_blank(Some(&input.name));
    if name.is_none() {
        errors.push("Name can't be blank".to_string());
    }

    let sowing_method = match input.sowing_method.parse::<SowingMethod>() {
        Ok(method) => Some(method),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let seed_start = resolve_offset(input.seed_start.as_ref(), SEED_START_LABEL, &mut errors);
    let hardening = resolve_offset(input.hardening.as_ref(), HARDENING_LABEL, &mut errors);
    let transplant = resolve_offset(input.transplant.as_ref(), TRANSPLANT_LABEL, &mut errors);

    if seed_start == Ok(None) {
        errors.push(format!("Please fill out the '{SEED_START_LABEL}' field"));
    }
    if sowing_method.is_some_and(|m| m.transplants()) && transplant == Ok(None) {
        errors.push(format!(
            "Please fill out the '{TRANSPLANT_LABEL}' field for this sowing method"
        ));
    }

    let days_to_sprout = non_blank(input.days_to_sprout.as_deref());
    if days_to_sprout
        .as_deref()
        .is_some_and(|d| !CONTAINS_INTEGER.is_match(d))
    {
        errors.push("Days to sprout must include a number of days".to_string());
    } else if days_to_sprout.as_deref().is_some_and(|d| {
        CONTAINS_INTEGER
            .find_iter(d)
            .any(|m| m.as_str().parse::<u32>().is_err())
    }) {
        errors.push("Days to sprout is too large".to_string());
    }

    let seed_depth = non_blank(input.seed_depth.as_deref());
    if seed_depth.as_deref().is_some_and(|d| !SEED_DEPTH.is_match(d)) {
        errors.push("Seed depth must be a fraction like 1/4, 0, or 'surface sow'".to_string());
    }

    let plant_spacing = non_blank(input.plant_spacing.as_deref());
    if plant_spacing
        .as_deref()
        .is_some_and(|s| !CONTAINS_INTEGER.is_match(s))
    {
        errors.push("Plant spacing must include a number".to_string());
    }

    match (name, sowing_method, seed_start, hardening, transplant) {
        (Some(name), Some(sowing_method), Ok(seed_start), Ok(hardening), Ok(transplant))
            if errors.is_empty() =>
        {
            Ok(PlantConfig {
                name,
                variety: non_blank(input.variety.as_deref()),
                sowing_method,
                seed_start_offset_days: seed_start,
                hardening_offset_days: hardening,
                transplant_offset_days: transplant,
                days_to_sprout,
                seed_depth,
                plant_spacing,
                notes: non_blank(input.notes.as_deref()),
            })
        }
        _ => Err(AlmanacError::ConfigurationInvalid { errors }),
    }
}

/// Resolves one offset, recording a parse failure as `Err(())`.
fn resolve_offset(
    input: Option<&OffsetInput>,
    label: &str,
    errors: &mut Vec<String>,
) -> std::result::Result<Option<OffsetDays>, ()> {
    match input.map(|i| i.resolve(label)).transpose() {
        Ok(offset) => Ok(offset.flatten()),
        Err(message) => {
            errors.push(message);
            Err(())
        }
    }
}
