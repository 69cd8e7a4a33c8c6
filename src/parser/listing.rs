//! Transfer listing scanner.
//!
//! Listing text wraps and spaces numbers unpredictably, so nothing is read at
//! a fixed offset. The scan anchors on the `<number> (<number>)` motif, which
//! appears twice (deadline season/week, then age years/days), and reads TSI
//! and price relative to those anchors.

use std::fmt;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use thiserror::Error;

use super::digits_only;
use crate::records::ListingRecord;

static PAREN_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\((\d+)\)$").unwrap());

pub const DEFAULT_CURRENCY: &str = "€";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStage {
    SeasonWeek,
    Tsi,
    Age,
    Price,
}

impl fmt::Display for ListingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListingStage::SeasonWeek => "season/week",
            ListingStage::Tsi => "TSI",
            ListingStage::Age => "age",
            ListingStage::Price => "price",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("season/week: no `<season> (<week>)` pair in listing")]
    SeasonNotFound,
    #[error("age: no `<years> (<days>)` pair after the season/week")]
    AgeNotFound,
    #[error("TSI: nothing between the season/week and the age")]
    EmptyTsiSpan,
    #[error("TSI: no digits between the season/week and the age")]
    TsiWithoutDigits,
    #[error("price: reached end of listing without `{0}`")]
    UnterminatedPrice(String),
    #[error("price: no digits before `{0}`")]
    EmptyPrice(String),
    #[error("{stage}: `{raw}` is not a valid number")]
    InvalidNumber { stage: ListingStage, raw: String },
}

impl ListingError {
    /// Which part of the listing could not be read.
    pub fn stage(&self) -> ListingStage {
        match self {
            ListingError::SeasonNotFound => ListingStage::SeasonWeek,
            ListingError::AgeNotFound => ListingStage::Age,
            ListingError::EmptyTsiSpan | ListingError::TsiWithoutDigits => ListingStage::Tsi,
            ListingError::UnterminatedPrice(_) | ListingError::EmptyPrice(_) => ListingStage::Price,
            ListingError::InvalidNumber { stage, .. } => *stage,
        }
    }
}

/// Where the scan is and what it has collected so far.
#[derive(Debug)]
enum ScanState {
    SeekingSeason,
    SeekingAge {
        season: u32,
        season_week: u32,
        from: usize,
    },
    AccumulatingPrice {
        season: u32,
        season_week: u32,
        tsi: u64,
        age_years: u32,
        age_days: u32,
        from: usize,
    },
    Done(ListingRecord),
}

#[derive(Debug, Clone)]
pub struct ListingParser {
    currency: String,
}

impl ListingParser {
    pub fn new(currency: impl Into<String>) -> Self {
        ListingParser {
            currency: currency.into(),
        }
    }

    /// Reads all six listing fields, or fails naming the stage that broke.
    pub fn parse(&self, text: &str) -> Result<ListingRecord, ListingError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut state = ScanState::SeekingSeason;
        loop {
            state = match state {
                ScanState::SeekingSeason => seek_season(&tokens)?,
                ScanState::SeekingAge {
                    season,
                    season_week,
                    from,
                } => seek_age(&tokens, season, season_week, from)?,
                ScanState::AccumulatingPrice {
                    season,
                    season_week,
                    tsi,
                    age_years,
                    age_days,
                    from,
                } => {
                    let price = self.accumulate_price(&tokens, from)?;
                    ScanState::Done(ListingRecord {
                        season,
                        season_week,
                        tsi,
                        age_years,
                        age_days,
                        price,
                    })
                }
                ScanState::Done(record) => return Ok(record),
            };
        }
    }

    fn accumulate_price(&self, tokens: &[&str], from: usize) -> Result<u64, ListingError> {
        let mut digits = String::new();
        tokens
            .iter()
            .skip(from)
            .position(|token| {
                digits.push_str(&digits_only(token));
                token.contains(self.currency.as_str())
            })
            .ok_or_else(|| ListingError::UnterminatedPrice(self.currency.clone()))?;
        if digits.is_empty() {
            return Err(ListingError::EmptyPrice(self.currency.clone()));
        }
        parse(ListingStage::Price, &digits)
    }
}

impl Default for ListingParser {
    fn default() -> Self {
        ListingParser::new(DEFAULT_CURRENCY)
    }
}

fn seek_season(tokens: &[&str]) -> Result<ScanState, ListingError> {
    let (at, season, week) = find_pair(tokens, 0).ok_or(ListingError::SeasonNotFound)?;
    Ok(ScanState::SeekingAge {
        season: parse(ListingStage::SeasonWeek, season)?,
        season_week: parse(ListingStage::SeasonWeek, week)?,
        from: at + 2,
    })
}

fn seek_age(
    tokens: &[&str],
    season: u32,
    season_week: u32,
    from: usize,
) -> Result<ScanState, ListingError> {
    let (at, years, days) = find_pair(tokens, from).ok_or(ListingError::AgeNotFound)?;
    let span = &tokens[from..at];
    if span.is_empty() {
        return Err(ListingError::EmptyTsiSpan);
    }
    let tsi_digits = span.iter().map(|token| digits_only(token)).join("");
    if tsi_digits.is_empty() {
        return Err(ListingError::TsiWithoutDigits);
    }
    Ok(ScanState::AccumulatingPrice {
        season,
        season_week,
        tsi: parse(ListingStage::Tsi, &tsi_digits)?,
        age_years: parse(ListingStage::Age, years)?,
        age_days: parse(ListingStage::Age, days)?,
        from: at + 2,
    })
}

/// First `i >= from` where `tokens[i]` is all digits and `tokens[i + 1]` is
/// `(<digits>)`. Returns the index and both numbers as text.
fn find_pair<'a>(tokens: &[&'a str], from: usize) -> Option<(usize, &'a str, &'a str)> {
    (from..tokens.len().saturating_sub(1)).find_map(|i| {
        let head = tokens[i];
        if head.is_empty() || !head.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let caps = PAREN_NUMBER_RE.captures(tokens[i + 1])?;
        let inner = caps.get(1)?.as_str();
        Some((i, head, inner))
    })
}

fn parse<T: std::str::FromStr>(stage: ListingStage, raw: &str) -> Result<T, ListingError> {
    raw.parse::<T>().map_err(|_| ListingError::InvalidNumber {
        stage,
        raw: raw.to_string(),
    })
}
