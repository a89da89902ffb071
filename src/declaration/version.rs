//! Dotted-version ordering.
//!
//! Versions are compared component by component. Missing trailing
//! components count as zero (`"2.0" == "2.0.0"`), a pre-release tag after
//! `-` sorts before the plain release, and `+build` metadata is ignored.
//! Pre-release tags are ordered per dot-separated identifier, numerically
//! where both identifiers are numbers.

use std::cmp::Ordering;

/// Version assumed when the installed version cannot be determined.
pub const DEFAULT_VERSION: &str = "0.0.0";

#[derive(Debug, PartialEq, Eq)]
struct ParsedVersion {
    release: Vec<u64>,
    pre: Option<String>,
}

fn parse(version: &str) -> Option<ParsedVersion> {
    let version = version.trim().trim_start_matches(['v', 'V']);
    let version = version.split('+').next().unwrap_or_default();
    let (release, pre) = match version.split_once('-') {
        Some((release, pre)) => (release, Some(pre.to_string())),
        None => (version, None),
    };

    let release = release
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    Some(ParsedVersion { release, pre })
}

/// Whether the string is a version this module can order.
pub fn is_valid_version(version: &str) -> bool {
    parse(version).is_some()
}

/// Compare two versions. Unparseable input is treated as [`DEFAULT_VERSION`].
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let fallback = || ParsedVersion {
        release: vec![0, 0, 0],
        pre: None,
    };
    let a = parse(a).unwrap_or_else(fallback);
    let b = parse(b).unwrap_or_else(fallback);

    let len = a.release.len().max(b.release.len());
    for i in 0..len {
        let l = a.release.get(i).copied().unwrap_or(0);
        let r = b.release.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    match (&a.pre, &b.pre) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(l), Some(r)) => compare_pre_release(l, r),
    }
}

/// Order pre-release tags identifier by identifier.
///
/// Numeric identifiers compare numerically and sort before alphanumeric
/// ones; a tag that is a prefix of another sorts first.
fn compare_pre_release(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => match (l.parse::<u64>(), r.parse::<u64>()) {
                (Ok(l), Ok(r)) => l.cmp(&r),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => l.cmp(r),
            },
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

/// Whether `installed` is at least `minimum`.
pub fn satisfies_minimum(installed: &str, minimum: &str) -> bool {
    compare_versions(installed, minimum) != Ordering::Less
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_ordering() {
        assert_eq!(compare_versions("0.2.0", "0.1.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.0.0", "0.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("0.1.0", "0.1.0"), Ordering::Equal);
        assert_eq!(compare_versions("0.1.0", "0.2.0"), Ordering::Less);
    }

    #[test]
    fn numeric_not_lexical() {
        assert_eq!(compare_versions("10.0.0", "9.99.99"), Ordering::Greater);
        assert_eq!(compare_versions("1.10", "1.9"), Ordering::Greater);
    }

    #[test]
    fn missing_components_are_zero() {
        assert_eq!(compare_versions("2.0", "2.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("2", "1.9.9"), Ordering::Greater);
    }

    #[test]
    fn pre_release_sorts_before_release() {
        assert_eq!(compare_versions("2.0.0-beta", "2.0.0"), Ordering::Less);
        assert_eq!(compare_versions("2.0.0-beta", "2.0.0-alpha"), Ordering::Greater);
        assert_eq!(compare_versions("2.0.1-beta", "2.0.0"), Ordering::Greater);
    }

    #[test]
    fn pre_release_identifiers_compare_numerically() {
        assert_eq!(
            compare_versions("2.0.0-beta.10", "2.0.0-beta.9"),
            Ordering::Greater
        );
        assert_eq!(compare_versions("2.0.0-beta.2", "2.0.0-beta.2"), Ordering::Equal);
        assert_eq!(compare_versions("2.0.0-beta", "2.0.0-beta.1"), Ordering::Less);
        assert_eq!(compare_versions("2.0.0-1", "2.0.0-alpha"), Ordering::Less);
        assert!(satisfies_minimum("2.0.0-rc.11", "2.0.0-rc.2"));
    }

    #[test]
    fn build_metadata_and_prefix_are_ignored() {
        assert_eq!(compare_versions("v1.2.3+abc", "1.2.3"), Ordering::Equal);
    }

    #[test]
    fn unparseable_counts_as_default() {
        assert_eq!(compare_versions("garbage", "0.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("", "0.0.1"), Ordering::Less);
        assert!(!is_valid_version("garbage"));
        assert!(!is_valid_version(""));
        assert!(is_valid_version("1.2.3-rc1"));
    }

    #[test]
    fn minimum_is_inclusive() {
        assert!(satisfies_minimum("2.0.0", "2.0.0"));
        assert!(satisfies_minimum("2.0.1", "2.0.0"));
        assert!(!satisfies_minimum("1.9.9", "2.0.0"));
    }
}
