use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

/// A dated garden journal entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: u64,
    pub owner: String,
    pub entry_date: Date,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
