use std::sync::LazyLock;

use regex::Regex;

use super::{parse_number, ExtractError};

static AGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+years?\s+and\s+(\d+)\s+days?").unwrap());

/// `(years, days)` from a `23 years and 67 days` phrase.
pub fn extract_age(text: &str) -> Result<(u32, u32), ExtractError> {
    let caps = AGE_RE.captures(text).ok_or(ExtractError::AgeNotFound)?;
    Ok((parse_number(&caps[1])?, parse_number(&caps[2])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_years_and_days() {
        assert_eq!(extract_age("23 years and 67 days").unwrap(), (23, 67));
        assert_eq!(
            extract_age("Kalle, 17 years and 1 day, Speciality: none").unwrap(),
            (17, 1)
        );
    }

    #[test]
    fn phrase_missing() {
        assert!(matches!(extract_age("23 years old"), Err(ExtractError::AgeNotFound)));
    }
}
