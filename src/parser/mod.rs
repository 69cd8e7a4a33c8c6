pub mod extract;
pub mod listing;

/// ASCII digits of `s`, everything else dropped.
pub(crate) fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}
