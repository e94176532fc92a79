//! Signed day offsets relative to the last frost date.
//!
//! Offsets are stored as a single signed day count: negative values fall
//! before the frost date, positive values after, and zero lands on the frost
//! date itself. Users enter them as a `(magnitude, unit, direction)` triple
//! such as "6 weeks before"; [`OffsetInput`] is that boundary shape and
//! [`OffsetDays`] the normalized one.
//!
//! An absent offset means "not configured" and is always `None`, never zero.

use std::{fmt, str::FromStr};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const DAYS_PER_WEEK: u32 = 7;

/// Signed number of days from the reference frost date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct OffsetDays(pub i32);

/// Unit a user entered an offset magnitude in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    #[default]
    Days,
    Weeks,
}

/// Which side of the frost date an offset falls on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum OffsetDirection {
    Before,
    #[default]
    After,
}

/// Converts a user-facing triple into a signed day offset.
///
/// Returns `None` only when the result does not fit in an `i32`.
///
/// ```rust
/// use almanac_core::models::offset::{to_days, OffsetDays, OffsetDirection, OffsetUnit};
///
/// assert_eq!(
///     to_days(2, OffsetUnit::Weeks, OffsetDirection::Before),
///     Some(OffsetDays(-14))
/// );
/// assert_eq!(
///     to_days(0, OffsetUnit::Days, OffsetDirection::Before),
///     Some(OffsetDays(0))
/// );
/// ```
pub fn to_days(magnitude: u32, unit: OffsetUnit, direction: OffsetDirection) -> Option<OffsetDays> {
    let days = match unit {
        OffsetUnit::Days => i64::from(magnitude),
        OffsetUnit::Weeks => i64::from(magnitude) * i64::from(DAYS_PER_WEEK),
    };
    let signed = match direction {
        OffsetDirection::Before => -days,
        OffsetDirection::After => days,
    };
    i32::try_from(signed).ok().map(OffsetDays)
}

/// Formats an optional offset for display; an absent offset is empty.
pub fn format_offset(offset: Option<OffsetDays>) -> String {
    offset.map(|o| o.to_string()).unwrap_or_default()
}

impl OffsetDays {
    /// Number of days as a signed integer.
    pub fn days(self) -> i32 {
        self.0
    }

    /// Splits the offset back into the triple a user would have typed.
    ///
    /// Weeks are used whenever the day count is a non-zero multiple of seven.
    pub fn to_input(self) -> OffsetInput {
        let days = self.0.unsigned_abs();
        let (magnitude, unit) = if days != 0 && days % DAYS_PER_WEEK == 0 {
            (days / DAYS_PER_WEEK, OffsetUnit::Weeks)
        } else {
            (days, OffsetUnit::Days)
        };
        OffsetInput {
            magnitude: Some(magnitude.to_string()),
            unit,
            direction: if self.0 < 0 {
                OffsetDirection::Before
            } else {
                OffsetDirection::After
            },
        }
    }
}

impl From<i32> for OffsetDays {
    fn from(days: i32) -> Self {
        Self(days)
    }
}

impl fmt::Display for OffsetDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.0.unsigned_abs();
        let direction = if self.0 < 0 {
            "before frost"
        } else {
            "after frost"
        };

        if days % DAYS_PER_WEEK == 0 {
            let weeks = days / DAYS_PER_WEEK;
            let unit = if weeks == 1 { "week" } else { "weeks" };
            write!(f, "{weeks} {unit} {direction}")
        } else {
            let unit = if days == 1 { "day" } else { "days" };
            write!(f, "{days} {unit} {direction}")
        }
    }
}

impl OffsetUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetUnit::Days => "days",
            OffsetUnit::Weeks => "weeks",
        }
    }
}

impl FromStr for OffsetUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" | "d" => Ok(OffsetUnit::Days),
            "week" | "weeks" | "w" => Ok(OffsetUnit::Weeks),
            _ => Err(format!("Invalid offset unit: {s}. Must be 'days' or 'weeks'")),
        }
    }
}

impl OffsetDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetDirection::Before => "before",
            OffsetDirection::After => "after",
        }
    }
}

impl FromStr for OffsetDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "before" => Ok(OffsetDirection::Before),
            "after" => Ok(OffsetDirection::After),
            _ => Err(format!(
                "Invalid offset direction: {s}. Must be 'before' or 'after'"
            )),
        }
    }
}

/// Offset exactly as entered at the boundary, before validation.
///
/// `magnitude` stays a string so that a blank field can be told apart from a
/// zero and so that a malformed number is reported by validation rather than
/// by deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OffsetInput {
    /// Whole number of days or weeks; blank or absent means "not configured"
    #[serde(default)]
    pub magnitude: Option<String>,
    /// Unit of the magnitude ('days' or 'weeks', default 'days')
    #[serde(default)]
    pub unit: OffsetUnit,
    /// 'before' or 'after' the frost date (default 'after')
    #[serde(default)]
    pub direction: OffsetDirection,
}

impl OffsetInput {
    /// Builds an input from a magnitude and its qualifiers.
    pub fn new(magnitude: u32, unit: OffsetUnit, direction: OffsetDirection) -> Self {
        Self {
            magnitude: Some(magnitude.to_string()),
            unit,
            direction,
        }
    }

    /// An input with no magnitude, i.e. an offset that is not configured.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Returns true when the magnitude is missing or blank.
    pub fn is_blank(&self) -> bool {
        self.magnitude
            .as_deref()
            .is_none_or(|m| m.trim().is_empty())
    }

    /// Normalizes the input into a signed offset.
    ///
    /// A blank magnitude resolves to `Ok(None)`. The error is a user-facing
    /// message naming `label`.
    pub fn resolve(&self, label: &str) -> Result<Option<OffsetDays>, String> {
        let Some(raw) = self.magnitude.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }

        let magnitude = raw.parse::<u32>().map_err(|_| {
            format!("'{label}' must be a whole number of days or weeks (got '{raw}')")
        })?;

        to_days(magnitude, self.unit, self.direction)
            .map(Some)
            .ok_or_else(|| format!("'{label}' is too far from the frost date"))
    }
}

impl FromStr for OffsetInput {
    type Err = String;

    /// Parses phrases such as `"6 weeks before"`, `"10 days after frost"`,
    /// `"0"` or a bare signed day count like `"-42"`. An empty string is an
    /// absent offset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();

        match tokens.as_slice() {
            [] => Ok(Self::absent()),
            [single] => {
                let days = single
                    .parse::<i64>()
                    .map_err(|_| format!("Invalid offset: {s}. Try '6 weeks before'"))?;
                let magnitude = u32::try_from(days.unsigned_abs())
                    .map_err(|_| format!("Offset out of range: {s}"))?;
                let direction = if days < 0 {
                    OffsetDirection::Before
                } else {
                    OffsetDirection::After
                };
                Ok(Self::new(magnitude, OffsetUnit::Days, direction))
            }
            [magnitude, unit, rest @ ..] => {
                let magnitude = magnitude
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid offset magnitude in '{s}'"))?;
                let unit = unit.parse::<OffsetUnit>()?;
                let (direction, trailer) = match rest.split_first() {
                    Some((direction, trailer)) => (direction.parse::<OffsetDirection>()?, trailer),
                    None => (OffsetDirection::After, &[][..]),
                };
                match trailer {
                    [] | ["frost"] | ["last", "frost"] => {
                        Ok(Self::new(magnitude, unit, direction))
                    }
                    _ => Err(format!("Unexpected words in offset '{s}'")),
                }
            }
        }
    }
}

impl fmt::Display for OffsetInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.magnitude.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => write!(
                f,
                "{m} {} {}",
                self.unit.as_str(),
                self.direction.as_str()
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_days_applies_unit_and_direction() {
        assert_eq!(
            to_days(2, OffsetUnit::Weeks, OffsetDirection::Before),
            Some(OffsetDays(-14))
        );
        assert_eq!(
            to_days(10, OffsetUnit::Days, OffsetDirection::Before),
            Some(OffsetDays(-10))
        );
        assert_eq!(
            to_days(3, OffsetUnit::Weeks, OffsetDirection::After),
            Some(OffsetDays(21))
        );
        assert_eq!(
            to_days(u32::MAX, OffsetUnit::Weeks, OffsetDirection::After),
            None
        );
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(OffsetDays(-14).to_string(), "2 weeks before frost");
        assert_eq!(OffsetDays(-10).to_string(), "10 days before frost");
        assert_eq!(OffsetDays(5).to_string(), "5 days after frost");
        assert_eq!(OffsetDays(21).to_string(), "3 weeks after frost");
        assert_eq!(OffsetDays(-7).to_string(), "1 week before frost");
        assert_eq!(OffsetDays(1).to_string(), "1 day after frost");
        assert_eq!(format_offset(None), "");
        assert_eq!(format_offset(Some(OffsetDays(-42))), "6 weeks before frost");
    }

    #[test]
    fn test_format_round_trips_through_phrase() {
        for (magnitude, unit, direction) in [
            (2, OffsetUnit::Weeks, OffsetDirection::Before),
            (10, OffsetUnit::Days, OffsetDirection::Before),
            (1, OffsetUnit::Weeks, OffsetDirection::After),
            (3, OffsetUnit::Days, OffsetDirection::After),
        ] {
            let days = to_days(magnitude, unit, direction).unwrap();
            let phrase = days.to_string();
            let parsed: OffsetInput = phrase.parse().unwrap();
            assert_eq!(parsed.resolve("offset").unwrap(), Some(days));
        }
    }

    #[test]
    fn test_blank_magnitude_is_absent_not_zero() {
        let blank = OffsetInput {
            magnitude: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.is_blank());
        assert_eq!(blank.resolve("Plant seeds"), Ok(None));
        assert_eq!(OffsetInput::absent().resolve("Plant seeds"), Ok(None));

        let zero = OffsetInput::new(0, OffsetUnit::Days, OffsetDirection::After);
        assert!(!zero.is_blank());
        assert_eq!(zero.resolve("Plant seeds"), Ok(Some(OffsetDays(0))));
    }

    #[test]
    fn test_resolve_rejects_non_integer_magnitude() {
        let input = OffsetInput {
            magnitude: Some("six".to_string()),
            unit: OffsetUnit::Weeks,
            direction: OffsetDirection::Before,
        };
        let err = input.resolve("Plant seeds").unwrap_err();
        assert!(err.contains("'Plant seeds'"));
        assert!(err.contains("six"));

        let negative = OffsetInput {
            magnitude: Some("-3".to_string()),
            ..Default::default()
        };
        assert!(negative.resolve("Hardening").is_err());
    }

    #[test]
    fn test_parse_phrases() {
        let input: OffsetInput = "6 weeks before".parse().unwrap();
        assert_eq!(input.resolve("x"), Ok(Some(OffsetDays(-42))));

        let input: OffsetInput = "1 Week After Last Frost".parse().unwrap();
        assert_eq!(input.resolve("x"), Ok(Some(OffsetDays(7))));

        let input: OffsetInput = "10 days".parse().unwrap();
        assert_eq!(input.resolve("x"), Ok(Some(OffsetDays(10))));

        let input: OffsetInput = "-42".parse().unwrap();
        assert_eq!(input.resolve("x"), Ok(Some(OffsetDays(-42))));

        let input: OffsetInput = "0".parse().unwrap();
        assert_eq!(input.resolve("x"), Ok(Some(OffsetDays(0))));

        let input: OffsetInput = "".parse().unwrap();
        assert_eq!(input.resolve("x"), Ok(None));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("soon".parse::<OffsetInput>().is_err());
        assert!("6 fortnights before".parse::<OffsetInput>().is_err());
        assert!("6 weeks around".parse::<OffsetInput>().is_err());
        assert!("6 weeks before the solstice".parse::<OffsetInput>().is_err());
    }

    #[test]
    fn test_to_input_prefers_weeks() {
        assert_eq!(
            OffsetDays(-42).to_input(),
            OffsetInput::new(6, OffsetUnit::Weeks, OffsetDirection::Before)
        );
        assert_eq!(
            OffsetDays(10).to_input(),
            OffsetInput::new(10, OffsetUnit::Days, OffsetDirection::After)
        );
        assert_eq!(
            OffsetDays(0).to_input(),
            OffsetInput::new(0, OffsetUnit::Days, OffsetDirection::After)
        );
        assert_eq!(OffsetDays(-9).to_input().to_string(), "9 days before");
    }
}
