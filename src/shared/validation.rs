use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating phone numbers (international format, digits with optional
    /// leading + and separators)
    /// - Valid: "+21612345678", "0612345678", "06 12 34 56 78"
    /// - Invalid: "phone", "12-34a"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 .-]{5,19}$").unwrap();

    /// Regex for stage reference codes attached to ratings (e.g. "STG-2024-0042")
    pub static ref STAGE_REFERENCE_REGEX: Regex = Regex::new(r"^STG-\d{4}-\d{4}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("+21612345678"));
        assert!(PHONE_REGEX.is_match("0612345678"));
        assert!(PHONE_REGEX.is_match("06 12 34 56 78"));
        assert!(!PHONE_REGEX.is_match("phone"));
        assert!(!PHONE_REGEX.is_match("12-34a"));
    }

    #[test]
    fn test_stage_reference_regex() {
        assert!(STAGE_REFERENCE_REGEX.is_match("STG-2024-0042"));
        assert!(!STAGE_REFERENCE_REGEX.is_match("STG-24-42"));
        assert!(!STAGE_REFERENCE_REGEX.is_match("stg-2024-0042"));
    }
}
