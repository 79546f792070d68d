//! Semantic version handling for repository tags
//!
//! Tags follow the Go module convention used by most GitHub-hosted projects:
//! - a leading `v` is required: `v1.2.3`
//! - shorthand `v1` and `v1.2` mean `v1.0.0` and `v1.2.0`, and cannot carry
//!   a pre-release or build suffix
//! - build metadata (`v1.2.3+meta`) is accepted and ignored for precedence

use std::cmp::Ordering;

use semver::{BuildMetadata, Version};

/// Parse a tag into a semver::Version, or None if the tag is not a valid
/// semantic version under the tagging convention.
///
/// Examples:
/// - "v1" -> Version(1, 0, 0)
/// - "v1.2" -> Version(1, 2, 0)
/// - "v1.2.3-rc.1" -> Version(1, 2, 3, pre: "rc.1")
/// - "1.2.3" -> None (missing `v`)
pub fn parse_tag(tag: &str) -> Option<Version> {
    let version = tag.strip_prefix('v')?;

    let core_end = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(core_end);

    let normalized = match core.split('.').count() {
        1 if suffix.is_empty() => format!("{core}.0.0"),
        2 if suffix.is_empty() => format!("{core}.0"),
        3 => version.to_string(),
        _ => return None,
    };

    Version::parse(&normalized).ok()
}

/// Returns true if the tag is a valid semantic version.
pub fn is_valid(tag: &str) -> bool {
    parse_tag(tag).is_some()
}

/// Returns the pre-release label of a valid tag without the leading `-`
/// (e.g. "rc.1" for "v1.2.3-rc.1"), an empty string for a final release,
/// or None if the tag is invalid.
pub fn prerelease(tag: &str) -> Option<String> {
    parse_tag(tag).map(|version| version.pre.as_str().to_string())
}

/// Compare two tags by semantic version precedence.
///
/// An invalid (or empty) tag is considered smaller than any valid tag, and
/// two invalid tags compare equal. Build metadata does not take part.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (parse_tag(a), parse_tag(b)) {
        (Some(a), Some(b)) => without_build(a).cmp(&without_build(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn without_build(mut version: Version) -> Version {
    version.build = BuildMetadata::EMPTY;
    version
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("v1.2.3", Some("1.2.3"))]
    #[case("v1.2", Some("1.2.0"))]
    #[case("v1", Some("1.0.0"))]
    #[case("v1.20.0-rc.1", Some("1.20.0-rc.1"))]
    #[case("v1.2.3+build.5", Some("1.2.3+build.5"))]
    #[case("v1.2.3-beta.2+build", Some("1.2.3-beta.2+build"))]
    #[case("1.2.3", None)] // missing v prefix
    #[case("V1.2.3", None)] // uppercase prefix
    #[case("v1.2-rc.1", None)] // shorthand with pre-release
    #[case("v1+build", None)] // shorthand with build metadata
    #[case("v01.2.3", None)] // leading zero
    #[case("v1.2.3-rc.01", None)] // leading zero in numeric pre-release
    #[case("v1.2.3.4", None)]
    #[case("v1..3", None)]
    #[case("v", None)]
    #[case("", None)]
    #[case("latest", None)]
    #[case("release-1.2.3", None)]
    fn parse_tag_returns_expected(#[case] tag: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            parse_tag(tag).map(|v| v.to_string()),
            expected.map(|s| s.to_string())
        );
    }

    #[rstest]
    #[case("v1.19.2", Some(""))]
    #[case("v1.19.3-rc.0", Some("rc.0"))]
    #[case("v1.19.0-beta.2", Some("beta.2"))]
    #[case("v1.19.0-alpha.0+meta", Some("alpha.0"))]
    #[case("v1.19", Some(""))]
    #[case("nightly", None)]
    fn prerelease_returns_label_without_separator(
        #[case] tag: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(prerelease(tag), expected.map(|s| s.to_string()));
    }

    #[rstest]
    #[case("v1.10.0", "v1.9.0", Ordering::Greater)] // numeric, not lexicographic
    #[case("v1.20.0-rc.1", "v1.20.0", Ordering::Less)] // pre-release below release
    #[case("v1.20.0-rc.1", "v1.19.9", Ordering::Greater)]
    #[case("v1.20.0-rc.2", "v1.20.0-rc.10", Ordering::Less)]
    #[case("v1.20.0-alpha.1", "v1.20.0-beta.1", Ordering::Less)]
    #[case("v1.20.0-beta.1", "v1.20.0-rc.1", Ordering::Less)]
    #[case("v1.2", "v1.2.0", Ordering::Equal)]
    #[case("v1.2.3+a", "v1.2.3+b", Ordering::Equal)] // build metadata ignored
    #[case("v0.0.1", "", Ordering::Greater)] // anything valid beats empty
    #[case("", "v0.0.1", Ordering::Less)]
    #[case("", "", Ordering::Equal)]
    #[case("garbage", "", Ordering::Equal)] // invalid tags are all equal
    fn compare_returns_expected(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(compare(a, b), expected);
    }

    #[test]
    fn is_valid_matches_parse_tag() {
        assert!(is_valid("v1.0.0"));
        assert!(!is_valid("1.0.0"));
        assert!(!is_valid(""));
    }
}
