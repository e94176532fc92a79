//! Sowing methods and the capabilities each one implies.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a plant is started.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SowingMethod {
    /// Seeds started indoors, hardened off, then transplanted
    IndoorStart,

    /// Seeds sown straight into the final bed
    DirectSow,

    /// Seeds started outdoors in containers, then transplanted
    OutdoorStart,

    /// Seeds cold-stratified in the fridge, then transplanted
    FridgeStratify,
}

impl SowingMethod {
    pub const ALL: [SowingMethod; 4] = [
        SowingMethod::IndoorStart,
        SowingMethod::DirectSow,
        SowingMethod::OutdoorStart,
        SowingMethod::FridgeStratify,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SowingMethod::IndoorStart => "indoor_start",
            SowingMethod::DirectSow => "direct_sow",
            SowingMethod::OutdoorStart => "outdoor_start",
            SowingMethod::FridgeStratify => "fridge_stratify",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SowingMethod::IndoorStart => "Indoor Start",
            SowingMethod::DirectSow => "Direct Sow",
            SowingMethod::OutdoorStart => "Outdoor Start",
            SowingMethod::FridgeStratify => "Fridge Stratify",
        }
    }

    /// Only indoor starts need a hardening-off period.
    pub fn hardens_off(&self) -> bool {
        match self {
            SowingMethod::IndoorStart => true,
            SowingMethod::DirectSow | SowingMethod::OutdoorStart | SowingMethod::FridgeStratify => {
                false
            }
        }
    }

    /// Every method except direct sowing ends in a transplant.
    pub fn transplants(&self) -> bool {
        match self {
            SowingMethod::DirectSow => false,
            SowingMethod::IndoorStart | SowingMethod::OutdoorStart | SowingMethod::FridgeStratify => {
                true
            }
        }
    }
}

impl FromStr for SowingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        SowingMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid sowing method: {s}. Must be one of indoor_start, direct_sow, outdoor_start, fridge_stratify"
                )
            })
    }
}
