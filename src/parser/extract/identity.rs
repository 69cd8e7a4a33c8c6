use std::sync::LazyLock;

use regex::Regex;

static PLAYER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[playerid=(\d+)\]").unwrap());

/// Player id from a `[playerid=N]` tag. A missing tag is not an error: the
/// id may simply be unknown.
pub fn extract_player_id(text: &str) -> Option<u64> {
    PLAYER_ID_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_tag() {
        assert_eq!(extract_player_id("Kalle [playerid=456789012]"), Some(456789012));
        assert_eq!(extract_player_id("[playerid=7]"), Some(7));
    }

    #[test]
    fn missing_tag() {
        assert_eq!(extract_player_id("Kalle Andersson"), None);
        assert_eq!(extract_player_id("[playerid=]"), None);
    }
}
