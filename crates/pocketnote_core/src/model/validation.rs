//! Input validation shared by engine mutations.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-facing input fields subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    GroupName,
    NoteText,
}

impl InputField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GroupName => "group name",
            Self::NoteText => "note text",
        }
    }
}

/// Validation failure for a required text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankInputError {
    pub field: InputField,
}

impl Display for BlankInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} must not be blank", self.field.as_str())
    }
}

impl Error for BlankInputError {}

/// Checks that `value` has content once surrounding whitespace is ignored.
///
/// A byte order mark counts as whitespace here, as it does for text pasted
/// from web forms. The value itself is returned untouched; only the check
/// uses the trimmed form.
pub fn require_text(field: InputField, value: String) -> Result<String, BlankInputError> {
    if is_blank(value.as_str()) {
        return Err(BlankInputError { field });
    }
    Ok(value)
}

fn is_blank(value: &str) -> bool {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .is_empty()
}

#[cfg(test)]
mod tests {
    use super::{require_text, InputField};

    #[test]
    fn require_text_rejects_empty_and_whitespace() {
        for value in ["", "   ", "\t\n", "\u{feff}", " \u{feff}\u{a0}"] {
            let err = require_text(InputField::GroupName, value.to_string()).unwrap_err();
            assert_eq!(err.field, InputField::GroupName);
        }
    }

    #[test]
    fn require_text_keeps_original_spacing() {
        let value = require_text(InputField::NoteText, "  buy milk ".to_string()).unwrap();
        assert_eq!(value, "  buy milk ");
    }
}
