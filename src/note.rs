//! Core data structures for the notestack application.
//!
//! This module contains the note record, its id-assignment rule, and
//! the save-time validation gate the UI applies before notes reach the
//! store.

use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timestamp format notes are stored with, local time, second precision.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Maximum content length accepted by the validation gate, in characters.
pub const MAX_CONTENT_LENGTH: usize = 5000;

/// Represents a single note in the collection.
///
/// Deserialization tolerates missing fields: `title` and `content`
/// default to empty, `id` to unset (the caller assigns one before
/// persisting), and `date` to the current timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier within a collection; `None` until assigned.
    #[serde(default)]
    pub id: Option<u64>,
    /// Note title, may be empty.
    #[serde(default)]
    pub title: String,
    /// Note content.
    #[serde(default)]
    pub content: String,
    /// Creation or last-edit timestamp, `YYYY-MM-DD HH:MM:SS`.
    #[serde(default = "timestamp_now")]
    pub date: String,
}

impl Note {
    /// Creates a new unsaved note stamped with the current time.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Note {
            id: None,
            title: title.into(),
            content: content.into(),
            date: timestamp_now(),
        }
    }

    /// Refreshes the timestamp after a title or content edit.
    pub fn touch(&mut self) {
        self.date = timestamp_now();
    }

    /// Next id for a collection: one past the largest assigned id.
    pub fn next_id(notes: &[Note]) -> u64 {
        notes.iter().filter_map(|note| note.id).max().unwrap_or(0) + 1
    }
}

/// Assigns the next free id to `note` and appends it to the collection.
pub fn append_note(notes: &mut Vec<Note>, mut note: Note) {
    note.id = Some(Note::next_id(notes));
    notes.push(note);
}

/// Current local time in the stored timestamp format.
pub(crate) fn timestamp_now() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// Reformats a stored timestamp for display, e.g. `03 Mar 2025, 14:05`.
/// Returns the input unchanged when it does not parse.
pub fn format_date(date: &str) -> String {
    match chrono::NaiveDateTime::parse_from_str(date, DATE_FORMAT) {
        Ok(parsed) => parsed.format("%d %b %Y, %H:%M").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Rejection reasons from the save-time content gate.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("note content is empty")]
    Empty,

    #[error("note content is too long (max {MAX_CONTENT_LENGTH} characters)")]
    TooLong,
}

/// Save-time gate applied by the UI before a note reaches the store.
/// The store itself persists whatever it is given.
pub fn validate_content(content: &str) -> std::result::Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(ValidationError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_has_no_id_and_a_formatted_date() {
        let note = Note::new("Groceries", "milk, eggs");
        assert_eq!(note.id, None);
        assert!(chrono::NaiveDateTime::parse_from_str(&note.date, DATE_FORMAT).is_ok());
    }

    #[test]
    fn from_plain_tolerates_missing_fields() {
        let note: Note = serde_json::from_str(r#"{"content":"just content"}"#).unwrap();
        assert_eq!(note.id, None);
        assert_eq!(note.title, "");
        assert_eq!(note.content, "just content");
        assert!(!note.date.is_empty());

        let bare: Note = serde_json::from_str("{}").unwrap();
        assert_eq!(bare.content, "");
    }

    #[test]
    fn ids_count_up_from_the_largest_assigned() {
        let mut notes = Vec::new();
        assert_eq!(Note::next_id(&notes), 1);

        append_note(&mut notes, Note::new("A", "alpha"));
        append_note(&mut notes, Note::new("B", "beta"));
        assert_eq!(notes[0].id, Some(1));
        assert_eq!(notes[1].id, Some(2));

        notes.remove(0);
        assert_eq!(Note::next_id(&notes), 3);
    }

    #[test]
    fn validation_rejects_empty_and_oversized_content() {
        assert_eq!(validate_content(""), Err(ValidationError::Empty));
        assert_eq!(validate_content("   \n "), Err(ValidationError::Empty));
        assert_eq!(validate_content("fine"), Ok(()));

        let long = "x".repeat(MAX_CONTENT_LENGTH);
        assert_eq!(validate_content(&long), Ok(()));
        let too_long = "x".repeat(MAX_CONTENT_LENGTH + 1);
        assert_eq!(validate_content(&too_long), Err(ValidationError::TooLong));
    }

    #[test]
    fn format_date_round_trips_unparseable_input() {
        assert_eq!(format_date("2025-03-03 14:05:09"), "03 Mar 2025, 14:05");
        assert_eq!(format_date("not a date"), "not a date");
    }
}
