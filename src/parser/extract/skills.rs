use regex::Regex;

use super::{parse_number, ExtractError};

/// Skill rows shown on a player page, in display order.
pub const DEFAULT_SKILLS: &[&str] = &[
    "Keeper",
    "Defending",
    "Playmaking",
    "Passing",
    "Scoring",
    "Winger",
];

/// Level of one skill from a `[th]<skill>[/th][td]<label> (<n>)` row.
/// Only the parenthesized number is kept.
pub fn extract_skill(text: &str, skill: &str) -> Result<u32, ExtractError> {
    let pattern = format!(
        r"\[th\]\s*{}\s*\[/th\]\s*\[td\]([^()]*?)\((\d+)\)",
        regex::escape(skill)
    );
    let not_found = || ExtractError::SkillNotFound(skill.to_string());
    let re = Regex::new(&pattern).map_err(|_| not_found())?;
    let caps = re.captures(text).ok_or_else(not_found)?;

    // A row without a number must not borrow the level of the next cell.
    if caps[1].contains("[/td]") {
        return Err(not_found());
    }
    parse_number(&caps[2])
}

/// Runs [`extract_skill`] for every name in `skills`, in the given order; one
/// miss never hides the others.
pub fn extract_all_skills(text: &str, skills: &[String]) -> Vec<(String, Result<u32, ExtractError>)> {
    skills
        .iter()
        .map(|name| (name.clone(), extract_skill(text, name)))
        .collect()
}
