//! Rate extraction and trigger-word matching.

use lazy_regex::regex;

/// The word that triggers a rate reply in the group chat.
/// Matched case-insensitively anywhere in the message.
pub const TRIGGER_WORD: &str = "курс";

/// Extracts the first decimal number from the text.
///
/// Both `.` and `,` are accepted as the decimal separator (`,` is
/// normalized to `.` before matching). No signs, no exponents, no
/// thousands separators. A parse that does not produce a finite value
/// counts as no match, so a stored rate is always finite.
///
/// # Examples
///
/// ```
/// use kurs_bot::bot::rate::extract_rate;
///
/// assert_eq!(extract_rate("курс 94,5"), Some(94.5));
/// assert_eq!(extract_rate("сегодня без числа"), None);
/// ```
#[must_use]
pub fn extract_rate(text: &str) -> Option<f64> {
    let normalized = text.replace(',', ".");
    let found = regex!(r"\d+(?:\.\d+)?").find(&normalized)?;
    found.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether the text mentions the trigger word (substring, any case).
#[must_use]
pub fn mentions_rate(text: &str) -> bool {
    text.to_lowercase().contains(TRIGGER_WORD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_and_dot_equivalent() {
        assert_eq!(extract_rate("94,5"), Some(94.5));
        assert_eq!(extract_rate("94.5"), Some(94.5));
    }

    #[test]
    fn test_integer_rate() {
        assert_eq!(extract_rate("курс 100"), Some(100.0));
    }

    #[test]
    fn test_first_number_wins() {
        assert_eq!(extract_rate("было 90, стало 95"), Some(90.0));
        assert_eq!(extract_rate("курс 94.5 или 95.5"), Some(94.5));
    }

    #[test]
    fn test_no_digits_no_match() {
        assert_eq!(extract_rate(""), None);
        assert_eq!(extract_rate("какой курс?"), None);
        assert_eq!(extract_rate("сто два"), None);
    }

    #[test]
    fn test_number_embedded_in_text() {
        assert_eq!(extract_rate("Введи 94,5 пожалуйста"), Some(94.5));
    }

    #[test]
    fn test_overflowing_digits_rejected() {
        // f64 parse of a 400-digit run overflows to infinity; such input
        // must not become a stored rate.
        let huge = "9".repeat(400);
        assert_eq!(extract_rate(&huge), None);
    }

    #[test]
    fn test_trigger_word_any_case_substring() {
        assert!(mentions_rate("какой курс?"));
        assert!(mentions_rate("КУРС"));
        assert!(mentions_rate("подскажите Курсы валют"));
        assert!(!mentions_rate("привет"));
    }
}
