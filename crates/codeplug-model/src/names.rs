//! Display-name munging: channels and zones must fit a radio's name field,
//! and well-known overlong tokens are abbreviated before truncating.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

/// Display-name length limit shared by most supported radios.
pub const NAME_MAX: usize = 16;

/// Long tokens replaced before truncation when generating channel names.
const NAME_REPLACEMENTS: &[(&str, &str)] = &[
    ("Audio Test", "A.Test"),
    ("California", "CA"),
    ("English", "Eng"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Montana", "MT"),
    ("Oregon", "OR"),
    ("Utah", "UT"),
    ("Washington", "WA"),
    ("Worldwide", "WW"),
];

// Trailing "<timeslot> <site code>" pattern worth preserving through
// truncation, e.g. "1 ABC" in "WA Regional 1 ABC".
static TAIL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[12]?\s[A-Z]+$").expect("tail code pattern"));

/// Abbreviate and truncate a channel name to `max_length` characters.
///
/// When the name ends in a timeslot/site-code suffix, characters are excised
/// immediately before the suffix instead of from the end, so the suffix
/// survives truncation.
pub fn channel_name(name: &str, max_length: usize) -> String {
    let mut munged = name.to_string();
    for (find, repl) in NAME_REPLACEMENTS {
        munged = munged.replace(find, repl);
    }

    let total = munged.chars().count();
    if total > max_length {
        if let Some(tail) = TAIL_CODE.find(&munged) {
            let tail_len = tail.as_str().chars().count();
            if max_length > tail_len + 1 {
                let head: String = munged.chars().take(max_length - tail_len).collect();
                let tail: String = munged.chars().skip(total - tail_len).collect();
                munged = head + &tail;
            }
        }
    }

    munged.chars().take(max_length).collect()
}

/// Truncate a zone name to the radio's limit.
pub fn zone_name(name: &str, max_length: usize) -> String {
    name.chars().take(max_length).collect()
}

/// Create a name not present in `existing` by appending the smallest unused
/// number.
pub fn unique_name(name: &str, existing: &HashSet<String>) -> String {
    if !existing.contains(name) {
        return name.to_string();
    }
    let mut ix = 0u32;
    let mut candidate = format!("{name} {ix}");
    while existing.contains(&candidate) {
        ix += 1;
        candidate = format!("{name} {ix}");
    }
    warn!(
        "deduping name {:?} -> {:?}; consider using unique names for clarity",
        name, candidate
    );
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_timeslot_suffix_through_truncation() {
        let short = channel_name("Washington Regional 1 ABC", NAME_MAX);
        assert_eq!(short.chars().count(), 16);
        assert!(short.ends_with("1 ABC"), "got {short:?}");
    }

    #[test]
    fn replaces_known_tokens() {
        assert_eq!(channel_name("Oregon Statewide", NAME_MAX), "OR Statewide");
        assert_eq!(channel_name("Worldwide Eng", NAME_MAX), "WW Eng");
    }

    #[test]
    fn plain_truncation_without_suffix() {
        assert_eq!(
            channel_name("A very long channel title", 10),
            "A very lon"
        );
        assert_eq!(channel_name("Short", NAME_MAX), "Short");
    }

    #[test]
    fn unique_name_appends_smallest_free_number() {
        let mut existing: HashSet<String> = ["Z".to_string(), "Z 0".to_string()].into();
        assert_eq!(unique_name("Y", &existing), "Y");
        assert_eq!(unique_name("Z", &existing), "Z 1");
        existing.insert("Z 1".to_string());
        assert_eq!(unique_name("Z", &existing), "Z 2");
    }
}
