use std::sync::LazyLock;

use regex::Regex;

use super::{parse_number, ExtractError};
use crate::parser::digits_only;

// Thousands may be grouped with plain, tab, no-break or narrow no-break spaces.
// After the leading run only whole groups of three digits are taken, so a
// number further along the line is not glued on.
static TSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"TSI\s*(?::|\[/th\]\s*\[td\])?[ \t\x{a0}\x{202f}]*([0-9]+(?:[ \t\x{a0}\x{202f}][0-9]{3}\b)*)")
        .unwrap()
});

/// TSI value following its label, with any digit grouping removed.
pub fn extract_tsi(text: &str) -> Result<u64, ExtractError> {
    let caps = TSI_RE.captures(text).ok_or(ExtractError::TsiNotFound)?;
    parse_number(&digits_only(&caps[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_does_not_matter() {
        assert_eq!(extract_tsi("TSI: 76 670").unwrap(), 76670);
        assert_eq!(extract_tsi("TSI:76670").unwrap(), 76670);
        assert_eq!(extract_tsi("TSI: 76\u{a0}670").unwrap(), 76670);
        assert_eq!(extract_tsi("TSI 1 076 670").unwrap(), 1_076_670);
    }

    #[test]
    fn table_cell_label() {
        assert_eq!(extract_tsi("[tr][th]TSI[/th][td]3 120[/td][/tr]").unwrap(), 3120);
    }

    #[test]
    fn stops_at_line_end() {
        let text = "TSI: 76 670\n23 years and 67 days";
        assert_eq!(extract_tsi(text).unwrap(), 76670);
    }

    #[test]
    fn following_number_on_same_line_is_not_taken() {
        assert_eq!(extract_tsi("TSI: 1 250 23 years and 67 days").unwrap(), 1250);
        assert_eq!(extract_tsi("TSI: 76 670 1234").unwrap(), 76670);
        assert_eq!(extract_tsi("TSI: 76 6701").unwrap(), 76);
    }

    #[test]
    fn missing_label_fails() {
        assert!(matches!(extract_tsi("Form: 7"), Err(ExtractError::TsiNotFound)));
        assert!(matches!(extract_tsi("TSI: unknown"), Err(ExtractError::TsiNotFound)));
    }
}
