use std::sync::LazyLock;

use regex::Regex;

use super::ExtractError;

static SPECIALITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Speciality:(?:\s|\[/?t[hd]\])*\[b\](.*?)\[/b\]").unwrap()
});

/// Bold value after the `Speciality:` label, trimmed.
pub fn extract_speciality(text: &str) -> Result<String, ExtractError> {
    SPECIALITY_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .ok_or(ExtractError::SpecialityNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_value() {
        assert_eq!(extract_speciality("Speciality: [b] Head [/b]").unwrap(), "Head");
        assert_eq!(extract_speciality("Speciality:[b]Quick[/b]").unwrap(), "Quick");
    }

    #[test]
    fn value_in_next_cell() {
        let text = "[tr][th]Speciality:[/th][td][b]Technical[/b][/td][/tr]";
        assert_eq!(extract_speciality(text).unwrap(), "Technical");
    }

    #[test]
    fn label_missing() {
        assert!(matches!(
            extract_speciality("[b]Head[/b]"),
            Err(ExtractError::SpecialityNotFound)
        ));
    }
}
