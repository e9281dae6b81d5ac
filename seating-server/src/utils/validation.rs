//! Input validation helpers
//!
//! Guest names are the primary key of the guest list, so they are
//! normalized (trimmed) and checked here before anything touches storage.
//!
//! | Rule | Limit |
//! |------|-------|
//! | Length (after trim) | 1..=100 chars |
//! | Characters | letters (incl. Latin-1 accents), space, `-`, `'` |
//! | Separators | no `--`, `''` or double spaces |

use thiserror::Error;

// ── Text length limits ──────────────────────────────────────────────

/// Guest names
pub const MAX_GUEST_NAME_LEN: usize = 100;

/// Why a guest name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name must not be empty")]
    Empty,

    #[error("name is too long ({len} chars, max {MAX_GUEST_NAME_LEN})")]
    TooLong { len: usize },

    #[error("name contains invalid character '{0}', only letters, spaces, hyphens and apostrophes are allowed")]
    InvalidCharacter(char),

    #[error("name contains consecutive special characters")]
    ConsecutiveSeparators,
}

fn is_name_char(c: char) -> bool {
    // À-ÿ covers the Latin-1 accented letters
    c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{00FF}').contains(&c) || matches!(c, ' ' | '-' | '\'')
}

/// Validate a guest name and return it trimmed.
pub fn validate_guest_name(name: &str) -> Result<String, NameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    let len = name.chars().count();
    if len > MAX_GUEST_NAME_LEN {
        return Err(NameError::TooLong { len });
    }

    if let Some(c) = name.chars().find(|c| !is_name_char(*c)) {
        return Err(NameError::InvalidCharacter(c));
    }

    if name.contains("--") || name.contains("''") || name.contains("  ") {
        return Err(NameError::ConsecutiveSeparators);
    }

    Ok(name.to_string())
}
