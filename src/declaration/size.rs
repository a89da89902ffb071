//! Size shorthand parsing.
//!
//! Configuration values such as memory limits are commonly written with a
//! unit suffix (`"64M"`, `"1G"`). These helpers normalize them to a byte
//! count so they can be compared with an integer expectation.

use regex::Regex;
use std::sync::LazyLock;

/// Integer with an optional `K`/`M`/`G` suffix and optional trailing `B`.
static SIZE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+)\s*(?:([kKmMgG])[bB]?)?\s*$").expect("SIZE_REGEX must compile")
});

/// Whether the value ends in a non-numeric unit suffix.
pub fn has_unit_suffix(value: &str) -> bool {
    value
        .trim_end()
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_alphabetic())
}

/// Parse a plain integer or a size shorthand into a byte count.
///
/// Returns `None` for anything that is neither, and on overflow.
pub fn parse_size(value: &str) -> Option<i64> {
    let caps = SIZE_REGEX.captures(value)?;
    let number: i64 = caps.get(1)?.as_str().parse().ok()?;
    let multiplier: i64 = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        None => 1,
        Some(unit) => match unit.as_str() {
            "k" => 1024,
            "m" => 1024 * 1024,
            "g" => 1024 * 1024 * 1024,
            _ => return None,
        },
    };
    number.checked_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integers_parse() {
        assert_eq!(parse_size("134217728"), Some(134_217_728));
        assert_eq!(parse_size(" 42 "), Some(42));
        assert_eq!(parse_size("-1"), Some(-1));
    }

    #[test]
    fn suffixes_are_binary_multiples() {
        assert_eq!(parse_size("1K"), Some(1024));
        assert_eq!(parse_size("64M"), Some(67_108_864));
        assert_eq!(parse_size("128m"), Some(134_217_728));
        assert_eq!(parse_size("2G"), Some(2_147_483_648));
        assert_eq!(parse_size("256MB"), Some(268_435_456));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_size(""), None);
        assert_eq!(parse_size("lots"), None);
        assert_eq!(parse_size("12T"), None);
        assert_eq!(parse_size("1.5M"), None);
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(parse_size("9223372036854775807G"), None);
    }

    #[test]
    fn unit_suffix_detection() {
        assert!(has_unit_suffix("64M"));
        assert!(has_unit_suffix("1g "));
        assert!(!has_unit_suffix("1024"));
        assert!(!has_unit_suffix(""));
    }
}
