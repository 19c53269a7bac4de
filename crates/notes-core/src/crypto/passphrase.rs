//! Input validation for note operations.

use crate::error::{NotesError, Result};

/// Validate that a passphrase was supplied.
///
/// Any non-empty string is accepted, including whitespace. There is no
/// minimum length; existing notes may have been written with short keys.
///
/// # Examples
///
/// ```
/// use notes_core::crypto::validate_passphrase;
///
/// assert!(validate_passphrase("abc").is_ok());
/// assert!(validate_passphrase("").is_err());
/// ```
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.is_empty() {
        return Err(NotesError::Validation(
            "Passphrase cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_passphrase() {
        assert!(validate_passphrase("abc").is_ok());
        assert!(validate_passphrase("longer passphrase with spaces and symbols!@#").is_ok());
    }

    #[test]
    fn test_passphrase_empty() {
        let result = validate_passphrase("");
        assert!(matches!(result, Err(NotesError::Validation(_))));
    }

    #[test]
    fn test_whitespace_passphrase_allowed() {
        assert!(validate_passphrase("   ").is_ok());
    }
}
