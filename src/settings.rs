use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::calendar::Calendar;
use crate::parser::extract::skills::DEFAULT_SKILLS;
use crate::parser::extract::ProfileAssembler;
use crate::parser::listing::{ListingParser, DEFAULT_CURRENCY};
use crate::records::RECORD_KEYS;

const CONFIG_FILE: &str = "scout_ledger";
const ENV_PREFIX: &str = "SCOUT";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Assembled profiles, one `<PlayerID>.json` each.
    pub profiles_dir: PathBuf,
    /// Raw profile text files waiting for `batch`.
    pub inbox_dir: PathBuf,
    /// Raw listing text files, one `<PlayerID>.txt` each.
    pub listings_dir: PathBuf,
    pub merged_dir: PathBuf,
    pub currency: String,
    pub skills: Vec<String>,
    pub calendar: Calendar,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            profiles_dir: PathBuf::from("data/profiles"),
            inbox_dir: PathBuf::from("data/inbox"),
            listings_dir: PathBuf::from("data/listings"),
            merged_dir: PathBuf::from("data/merged"),
            currency: DEFAULT_CURRENCY.to_string(),
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            calendar: Calendar::default(),
        }
    }
}

impl Settings {
    /// `scout_ledger.{toml,json,..}` in the working directory if present, then
    /// `SCOUT_*` environment variables (`SCOUT_CALENDAR__ANCHOR_WEEK=9`,
    /// `SCOUT_SKILLS=Keeper,Stamina`).
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("skills"),
            )
            .build()
            .context("reading configuration")?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let settings: Settings = config.try_deserialize().context("invalid configuration")?;
        settings.validate().context("invalid configuration")?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        // An empty currency would end the price scan at the first token.
        ensure!(!self.currency.trim().is_empty(), "currency must not be empty");

        for (i, skill) in self.skills.iter().enumerate() {
            ensure!(!skill.trim().is_empty(), "skill names must not be empty");
            if RECORD_KEYS.contains(&skill.as_str()) {
                bail!("skill `{}` collides with a record field", skill);
            }
            if self.skills[..i].contains(skill) {
                bail!("skill `{}` is listed twice", skill);
            }
        }
        Ok(())
    }

    pub fn assembler(&self) -> ProfileAssembler {
        ProfileAssembler::new(self.skills.clone())
    }

    pub fn listing_parser(&self) -> ListingParser {
        ListingParser::new(self.currency.clone())
    }
}
