//! Experience and leadership adjectives.
//!
//! Both follow the profile sentence "Has <word> experience and <word>
//! leadership". Only that template is recognised: the conjunction must come
//! right before the adjective and the adjective right before the keyword.

use std::sync::LazyLock;

use regex::Regex;

use super::ExtractError;

static EXPERIENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bHas\s+(\S+)\s+(?i:experience)\b").unwrap());
static LEADERSHIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\band\s+(\S+)\s+(?i:leadership)\b").unwrap());

pub fn extract_experience(text: &str) -> Result<String, ExtractError> {
    adjective_before(&EXPERIENCE_RE, text, "experience")
}

pub fn extract_leadership(text: &str) -> Result<String, ExtractError> {
    adjective_before(&LEADERSHIP_RE, text, "leadership")
}

fn adjective_before(re: &Regex, text: &str, keyword: &'static str) -> Result<String, ExtractError> {
    re.captures(text)
        .map(|caps| caps[1].to_string())
        .ok_or(ExtractError::DescriptorNotFound { keyword })
}
