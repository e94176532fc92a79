//! Filter types for querying tasks.

use jiff::{Span, civil::Date};

use super::TaskStatus;
use crate::{
    error::{AlmanacError, Result},
    params::{ListTasks, parse_date},
};

/// Days of past tasks shown when no explicit range is requested.
pub const HISTORY_DAYS: u32 = 7;

/// Filter options for querying tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Inclusive lower bound on the due date
    pub from: Option<Date>,

    /// Inclusive upper bound on the due date
    pub to: Option<Date>,

    /// Hide tasks due before this date
    pub since: Option<Date>,

    /// Restrict to one plant
    pub plant_id: Option<u64>,

    /// Restrict to one status
    pub status: Option<TaskStatus>,

    /// Include tasks of muted plants
    pub include_muted: bool,
}

impl TaskFilter {
    /// Tasks due no earlier than `days` before `today`.
    ///
    /// ```rust
    /// use almanac_core::models::TaskFilter;
    /// use jiff::civil::date;
    ///
    /// let filter = TaskFilter::recent(date(2026, 5, 15), 7).unwrap();
    /// assert_eq!(filter.since, Some(date(2026, 5, 8)));
    /// assert!(!filter.include_muted);
    /// ```
    pub fn recent(today: Date, days: u32) -> Result<Self> {
        Ok(Self {
            since: Some(days_before(today, days)?),
            ..Default::default()
        })
    }

    /// Builds a filter from list parameters.
    ///
    /// Without `all` and without an explicit range, only the last
    /// [`HISTORY_DAYS`] of past tasks are kept. An explicit `history_days`
    /// always applies unless `all` is set.
    pub fn from_params(params: &ListTasks, today: Date) -> Result<Self> {
        let from = params.from.as_deref().map(parse_date).transpose()?;
        let to = params.to.as_deref().map(parse_date).transpose()?;

        if let (Some(from), Some(to)) = (from, to)
            && to < from
        {
            return Err(AlmanacError::invalid_input("to")
                .with_reason(format!("Range end {to} is before range start {from}")));
        }

        let status = params
            .status
            .as_deref()
            .map(|s| {
                s.parse::<TaskStatus>()
                    .map_err(|e| AlmanacError::invalid_input("status").with_reason(e))
            })
            .transpose()?;

        let since = match (params.all, params.history_days) {
            (true, _) => None,
            (false, Some(days)) => Some(days_before(today, days)?),
            (false, None) if from.is_none() && to.is_none() => {
                Some(days_before(today, HISTORY_DAYS)?)
            }
            (false, None) => None,
        };

        Ok(Self {
            from,
            to,
            since,
            plant_id: params.plant_id,
            status,
            include_muted: params.include_muted,
        })
    }
}

fn days_before(today: Date, days: u32) -> Result<Date> {
    Span::new()
        .try_days(i64::from(days))
        .and_then(|span| today.checked_sub(span))
        .map_err(|e| AlmanacError::invalid_input("history_days").with_reason(e.to_string()))
}
