//! Germination window parsed out of free-text "days to sprout".

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Range of days after sowing in which sprouts are expected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SproutWindow {
    pub earliest: u32,
    pub latest: u32,
}

impl SproutWindow {
    /// Extracts every integer from `text`; the smallest is the earliest day
    /// and the largest the latest.
    ///
    /// Integers that do not fit in a `u32` are ignored; plant validation
    /// rejects such text before it is stored. Returns `None` when the text
    /// holds no usable integer.
    ///
    /// ```rust
    /// use almanac_core::models::SproutWindow;
    ///
    /// let window = SproutWindow::parse("7-14 days").unwrap();
    /// assert_eq!((window.earliest, window.latest), (7, 14));
    /// assert_eq!(SproutWindow::parse("10"), Some(SproutWindow { earliest: 10, latest: 10 }));
    /// assert_eq!(SproutWindow::parse("unknown"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let mut numbers = INTEGER
            .find_iter(text)
            .filter_map(|m| m.as_str().parse::<u32>().ok());

        let first = numbers.next()?;
        let (earliest, latest) = numbers.fold((first, first), |(lo, hi), n| (lo.min(n), hi.max(n)));
        Some(Self { earliest, latest })
    }
}
