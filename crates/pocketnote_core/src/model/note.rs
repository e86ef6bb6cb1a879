//! Note domain model.
//!
//! # Invariants
//! - `id`, `text` and `created_at` are fixed at creation.
//! - `created_at` is a display label, not a sortable timestamp.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Note identifier, unique within the owning group only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Wraps an existing id value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw id string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short text entry owned by exactly one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Text as entered by the user.
    pub text: String,
    /// Human-readable creation time. Serialized as `createdAt`.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Note {
    pub fn new(id: NoteId, text: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            created_at: created_at.into(),
        }
    }
}

/// Formats a creation timestamp as `M/D/YYYY, h:mm:ss AM|PM`.
pub fn created_at_label<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::created_at_label;
    use chrono::{TimeZone, Utc};

    #[test]
    fn created_at_label_uses_twelve_hour_clock_without_padding() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 2).unwrap();
        assert_eq!(created_at_label(&morning), "3/5/2024, 9:07:02 AM");

        let evening = Utc.with_ymd_and_hms(2024, 12, 25, 21, 30, 0).unwrap();
        assert_eq!(created_at_label(&evening), "12/25/2024, 9:30:00 PM");
    }

    #[test]
    fn created_at_label_maps_midnight_to_twelve() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(created_at_label(&midnight), "1/1/2024, 12:00:00 AM");
    }
}
