//! Input validation for dialogue steps.
//!
//! Every failure here is recoverable: the flow re-prompts in the same
//! state and nothing else changes.

use station_roster_core::ChatUserId;

/// Why a piece of dialogue input was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Full name has fewer than three whitespace-separated words.
    NameTooShort,
    /// Personnel code is not exactly five decimal digits.
    BadTabel,
    /// Not an image attachment and not an http(s) URL.
    BadPhoto,
    /// Platform user id is not 9-10 decimal digits.
    BadHeadId,
    /// Roster pick is not a number within the listed range.
    BadRosterChoice { max: usize },
}

/// Validates a worker's full name: at least three words.
pub fn full_name(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.split_whitespace().count() < 3 {
        return Err(ValidationError::NameTooShort);
    }
    Ok(trimmed.to_string())
}

/// Validates a personnel code: exactly five decimal digits.
///
/// Kept as text so codes like "01000" survive verbatim.
pub fn tabel(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.len() == 5 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::BadTabel)
    }
}

/// Validates a photo given as text: must be an http(s) URL.
pub fn photo_url(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::BadPhoto)
    }
}

/// Validates a platform user id entered as text: 9-10 decimal digits.
pub fn head_id(text: &str) -> Result<ChatUserId, ValidationError> {
    let trimmed = text.trim();
    if !(9..=10).contains(&trimmed.len()) || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::BadHeadId);
    }
    trimmed
        .parse::<i64>()
        .map(ChatUserId::new)
        .map_err(|_| ValidationError::BadHeadId)
}

/// Validates a numbered roster pick, returning the zero-based index.
pub fn roster_choice(text: &str, len: usize) -> Result<usize, ValidationError> {
    let number: usize = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::BadRosterChoice { max: len })?;
    if (1..=len).contains(&number) {
        Ok(number - 1)
    } else {
        Err(ValidationError::BadRosterChoice { max: len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_needs_three_words() {
        assert_eq!(full_name("Aziz"), Err(ValidationError::NameTooShort));
        assert_eq!(full_name("Aziz Karimov"), Err(ValidationError::NameTooShort));
        assert_eq!(
            full_name("  Aziz   Karimov  Baxtiyorovich "),
            Ok("Aziz   Karimov  Baxtiyorovich".to_string())
        );
    }

    #[test]
    fn tabel_must_be_exactly_five_digits() {
        assert_eq!(tabel("1234"), Err(ValidationError::BadTabel));
        assert_eq!(tabel("123456"), Err(ValidationError::BadTabel));
        assert_eq!(tabel("12a45"), Err(ValidationError::BadTabel));
        assert_eq!(tabel("01000"), Ok("01000".to_string()));
    }

    #[test]
    fn photo_text_must_be_an_http_url() {
        assert_eq!(photo_url("example.com/x.jpg"), Err(ValidationError::BadPhoto));
        assert_eq!(
            photo_url("https://example.com/x.jpg"),
            Ok("https://example.com/x.jpg".to_string())
        );
        assert_eq!(
            photo_url("http://example.com/x.jpg"),
            Ok("http://example.com/x.jpg".to_string())
        );
        assert_eq!(photo_url("ftp://example.com/x.jpg"), Err(ValidationError::BadPhoto));
    }

    #[test]
    fn head_id_is_nine_or_ten_digits() {
        assert_eq!(head_id("12345678"), Err(ValidationError::BadHeadId));
        assert_eq!(head_id("12345678901"), Err(ValidationError::BadHeadId));
        assert_eq!(head_id("12345678a"), Err(ValidationError::BadHeadId));
        assert_eq!(head_id("123456789"), Ok(ChatUserId::new(123_456_789)));
        assert_eq!(head_id("1234567890"), Ok(ChatUserId::new(1_234_567_890)));
    }

    #[test]
    fn roster_choice_is_one_based_and_bounded() {
        assert_eq!(roster_choice("1", 3), Ok(0));
        assert_eq!(roster_choice(" 3 ", 3), Ok(2));
        assert_eq!(
            roster_choice("0", 3),
            Err(ValidationError::BadRosterChoice { max: 3 })
        );
        assert_eq!(
            roster_choice("4", 3),
            Err(ValidationError::BadRosterChoice { max: 3 })
        );
        assert_eq!(
            roster_choice("ikki", 3),
            Err(ValidationError::BadRosterChoice { max: 3 })
        );
    }
}
