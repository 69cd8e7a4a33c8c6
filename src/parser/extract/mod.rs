pub mod age;
pub mod descriptors;
pub mod identity;
pub mod rating;
pub mod skills;
pub mod speciality;

use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::records::{ProfileRecord, NO_SPECIALITY};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("skill `{0}` not found")]
    SkillNotFound(String),
    #[error("TSI label not found")]
    TsiNotFound,
    #[error("no `<years> years and <days> days` phrase")]
    AgeNotFound,
    #[error("`Speciality:` label with a bold value not found")]
    SpecialityNotFound,
    #[error("no adjective before `{keyword}`")]
    DescriptorNotFound { keyword: &'static str },
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
}

/// Builds a [`ProfileRecord`] from one copied profile page.
///
/// Each field is read on its own. A field that cannot be read gets its
/// default and a warning; the record is always produced.
#[derive(Debug, Clone)]
pub struct ProfileAssembler {
    skills: Vec<String>,
}

impl ProfileAssembler {
    pub fn new(skills: Vec<String>) -> Self {
        ProfileAssembler { skills }
    }

    pub fn assemble(&self, text: &str) -> ProfileRecord {
        let player_id = identity::extract_player_id(text);
        if player_id.is_none() {
            warn!(field = "PlayerID", "no [playerid=..] tag; record has no identity");
        }

        let skills = skills::extract_all_skills(text, &self.skills)
            .into_iter()
            .map(|(name, level)| {
                let level = level
                    .map_err(|e| warn!(field = %name, error = %e, "skill not read"))
                    .ok();
                (name, level)
            })
            .collect();

        let tsi = field("TSI", rating::extract_tsi(text));
        let (age_years, age_days) = field("Age", age::extract_age(text)).unzip();
        let speciality = field("Speciality", speciality::extract_speciality(text))
            .unwrap_or_else(|| NO_SPECIALITY.to_string());
        let experience = field("Experience", descriptors::extract_experience(text));
        let leadership = field("Leadership", descriptors::extract_leadership(text));

        ProfileRecord {
            player_id,
            skills,
            tsi,
            age_years,
            age_days,
            speciality,
            experience,
            leadership,
        }
    }
}

impl Default for ProfileAssembler {
    fn default() -> Self {
        ProfileAssembler::new(skills::DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect())
    }
}

fn field<T>(name: &str, result: Result<T, ExtractError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(field = name, error = %e, "field not read; using default");
            None
        }
    }
}

pub(crate) fn parse_number<T: FromStr>(raw: &str) -> Result<T, ExtractError> {
    raw.parse::<T>()
        .map_err(|_| ExtractError::InvalidNumber(raw.to_string()))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.txt", name)).unwrap()
    }

    #[test]
    fn full_profile() {
        let record = ProfileAssembler::default().assemble(&fixture("profile_full"));
        assert_eq!(record.player_id, Some(456789012));
        assert_eq!(record.tsi, Some(76670));
        assert_eq!(record.age_years, Some(23));
        assert_eq!(record.age_days, Some(67));
        assert_eq!(record.speciality, "Quick");
        assert_eq!(record.experience.as_deref(), Some("excellent"));
        assert_eq!(record.leadership.as_deref(), Some("passable"));
        assert_eq!(record.skills.len(), 6);
        assert_eq!(record.skills["Keeper"], Some(1));
        assert_eq!(record.skills["Defending"], Some(8));
        assert_eq!(record.skills["Playmaking"], Some(4));
        assert_eq!(record.skills["Passing"], Some(7));
        assert_eq!(record.skills["Scoring"], Some(5));
        assert_eq!(record.skills["Winger"], Some(3));
    }

    #[test]
    fn sparse_profile_gets_defaults() {
        let record = ProfileAssembler::default().assemble(&fixture("profile_sparse"));
        assert_eq!(record.player_id, None);
        assert_eq!(record.tsi, Some(1250));
        assert_eq!(record.age_years, None);
        assert_eq!(record.age_days, None);
        assert_eq!(record.speciality, NO_SPECIALITY);
        assert_eq!(record.experience, None);
        assert_eq!(record.leadership, None);
        assert_eq!(record.skills.len(), 6);
        assert_eq!(record.skills["Keeper"], Some(6));
        assert_eq!(record.skills["Scoring"], None);
    }

    #[test]
    fn empty_text_never_fails() {
        let record = ProfileAssembler::default().assemble("");
        assert_eq!(record.player_id, None);
        assert_eq!(record.speciality, NO_SPECIALITY);
        assert!(record.skills.values().all(|v| v.is_none()));
    }

    #[test]
    fn custom_skill_set() {
        let assembler = ProfileAssembler::new(vec!["Stamina".to_string(), "Set pieces".to_string()]);
        let record = assembler.assemble("[th]Stamina[/th][td]good (6)[/td] [th]Set pieces[/th][td]weak (3)[/td]");
        assert_eq!(record.skills.len(), 2);
        assert_eq!(record.skills["Stamina"], Some(6));
        assert_eq!(record.skills["Set pieces"], Some(3));
    }

    #[test]
    fn same_text_same_json() {
        let text = fixture("profile_full");
        let assembler = ProfileAssembler::default();
        let a = serde_json::to_string(&assembler.assemble(&text)).unwrap();
        let b = serde_json::to_string(&assembler.assemble(&text)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn skills_serialize_in_configured_order() {
        let json = serde_json::to_string(&ProfileAssembler::default().assemble(&fixture("profile_full"))).unwrap();
        let positions: Vec<usize> = skills::DEFAULT_SKILLS
            .iter()
            .map(|name| json.find(&format!("\"{}\":", name)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
    }

    #[test]
    fn oversized_number_is_invalid() {
        assert_eq!(
            parse_number::<u32>("99999999999"),
            Err::<u32, _>(ExtractError::InvalidNumber("99999999999".to_string()))
        );
    }
}
