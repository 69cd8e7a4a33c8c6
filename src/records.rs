#[cfg(test)]
use std::ops::Index;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Specialty written when the profile text carries none we can read.
pub const NO_SPECIALITY: &str = "None";

/// Top-level keys owned by profile and listing records. A skill may not use
/// one of these names.
pub const RECORD_KEYS: [&str; 10] = [
    "PlayerID",
    "TSI",
    "AgeYears",
    "AgeDays",
    "Speciality",
    "Experience",
    "Leadership",
    "Season",
    "SeasonWeek",
    "Price",
];

/// Skill levels in the order the skills were configured. Serializes as a map
/// that keeps that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillLevels(Vec<(String, Option<u32>)>);

// Lookups are only needed to inspect records in tests.
#[cfg(test)]
impl SkillLevels {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<Option<u32>> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| *v)
    }

    pub fn values(&self) -> impl Iterator<Item = &Option<u32>> {
        self.0.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(String, Option<u32>)> for SkillLevels {
    fn from_iter<I: IntoIterator<Item = (String, Option<u32>)>>(iter: I) -> Self {
        SkillLevels(iter.into_iter().collect())
    }
}

#[cfg(test)]
impl<'a> Index<&'a str> for SkillLevels {
    type Output = Option<u32>;

    fn index(&self, name: &'a str) -> &Option<u32> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
            .unwrap_or_else(|| panic!("no skill named {}", name))
    }
}

impl Serialize for SkillLevels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, level) in &self.0 {
            map.serialize_entry(name, level)?;
        }
        map.end()
    }
}

/// One player profile as assembled from a copied profile page.
///
/// Every field is optional on its own; a missing attribute never invalidates
/// the record. Skills are flattened into the top-level JSON object, keyed by
/// skill name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    #[serde(rename = "PlayerID")]
    pub player_id: Option<u64>,
    #[serde(flatten)]
    pub skills: SkillLevels,
    #[serde(rename = "TSI")]
    pub tsi: Option<u64>,
    #[serde(rename = "AgeYears")]
    pub age_years: Option<u32>,
    #[serde(rename = "AgeDays")]
    pub age_days: Option<u32>,
    #[serde(rename = "Speciality")]
    pub speciality: String,
    #[serde(rename = "Experience")]
    pub experience: Option<String>,
    #[serde(rename = "Leadership")]
    pub leadership: Option<String>,
}

/// Season, TSI, age and price read from a transfer listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    #[serde(rename = "Season")]
    pub season: u32,
    #[serde(rename = "SeasonWeek")]
    pub season_week: u32,
    #[serde(rename = "TSI")]
    pub tsi: u64,
    #[serde(rename = "AgeYears")]
    pub age_years: u32,
    #[serde(rename = "AgeDays")]
    pub age_days: u32,
    #[serde(rename = "Price")]
    pub price: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_flat_with_nulls() {
        let skills: SkillLevels = vec![("Keeper".to_string(), Some(3)), ("Winger".to_string(), None)]
            .into_iter()
            .collect();
        let record = ProfileRecord {
            player_id: Some(42),
            skills,
            tsi: None,
            age_years: Some(19),
            age_days: Some(4),
            speciality: NO_SPECIALITY.to_string(),
            experience: None,
            leadership: Some("solid".to_string()),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["PlayerID"], 42);
        assert_eq!(value["Keeper"], 3);
        assert!(value["Winger"].is_null());
        assert!(value["TSI"].is_null());
        assert_eq!(value["Speciality"], "None");
        assert_eq!(value["Leadership"], "solid");
    }

    #[test]
    fn skills_keep_configured_order() {
        let skills: SkillLevels = ["Winger", "Keeper", "Defending"]
            .iter()
            .map(|name| (name.to_string(), Some(1)))
            .collect();
        let json = serde_json::to_string(&skills).unwrap();
        assert_eq!(json, r#"{"Winger":1,"Keeper":1,"Defending":1}"#);
        assert_eq!(skills.get("Keeper"), Some(Some(1)));
        assert_eq!(skills.get("Stamina"), None);
    }

    #[test]
    fn listing_uses_fixed_field_names() {
        let listing = ListingRecord {
            season: 89,
            season_week: 3,
            tsi: 76670,
            age_years: 23,
            age_days: 67,
            price: 5000,
        };
        let value = serde_json::to_value(listing).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["AgeDays", "AgeYears", "Price", "Season", "SeasonWeek", "TSI"]
        );
    }
}
