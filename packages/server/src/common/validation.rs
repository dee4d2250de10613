//! Field checks shared by the domain input types that `validator` attributes
//! do not cover.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WEB_URL: Regex = Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap();
    static ref TEN_DIGITS: Regex = Regex::new(r"^\d{10}$").unwrap();
    static ref PERSON_NAME: Regex = Regex::new(r"^[A-Za-z ]+$").unwrap();
}

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub fn is_web_url(value: &str) -> bool {
    WEB_URL.is_match(value)
}

pub fn is_ten_digit_phone(value: &str) -> bool {
    TEN_DIGITS.is_match(value)
}

/// ASCII letters and spaces only.
pub fn is_person_name(value: &str) -> bool {
    PERSON_NAME.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_need_http_scheme() {
        assert!(is_web_url("https://acme.example/about"));
        assert!(is_web_url("http://localhost:3000"));
        assert!(!is_web_url("acme.example"));
        assert!(!is_web_url("https://has space.example"));
    }

    #[test]
    fn phone_must_be_exactly_ten_digits() {
        assert!(is_ten_digit_phone("0241234567"));
        assert!(!is_ten_digit_phone("024123456"));
        assert!(!is_ten_digit_phone("024-123-4567"));
    }

    #[test]
    fn names_are_letters_and_spaces() {
        assert!(is_person_name("Ama Serwaa"));
        assert!(!is_person_name("R2D2"));
        assert!(!is_person_name("O'Neil"));
    }
}
