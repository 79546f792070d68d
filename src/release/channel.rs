//! Release channels and pre-release label classification

use std::fmt;

use serde::Serialize;

/// A release channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Final releases (no pre-release label)
    Stable,
    /// Release candidates and betas
    Latest,
    /// Alpha builds
    Edge,
}

impl Channel {
    /// All channels, ordered from the most to the least conservative
    pub const ALL: [Channel; 3] = [Channel::Stable, Channel::Latest, Channel::Edge];

    /// Classify a pre-release label (the part after `-`, without the `-`).
    ///
    /// - "" -> Stable
    /// - "rc.1", "beta.2" -> Latest
    /// - "alpha.0", "pre-alpha" -> Edge
    /// - anything else -> None
    pub fn classify(prerelease: &str) -> Option<Self> {
        if prerelease.is_empty() {
            Some(Channel::Stable)
        } else if prerelease.starts_with("rc") || prerelease.starts_with("beta") {
            Some(Channel::Latest)
        } else if prerelease.contains("alpha") {
            Some(Channel::Edge)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Stable => "stable",
            Channel::Latest => "latest",
            Channel::Edge => "edge",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", Some(Channel::Stable))]
    #[case("rc.1", Some(Channel::Latest))]
    #[case("rc1", Some(Channel::Latest))]
    #[case("beta.2", Some(Channel::Latest))]
    #[case("beta", Some(Channel::Latest))]
    #[case("alpha.0", Some(Channel::Edge))]
    #[case("pre-alpha.3", Some(Channel::Edge))]
    #[case("dev.1", None)]
    #[case("preview", None)]
    #[case("0.20240101", None)]
    #[case("xrc.1", None)] // rc must be a prefix
    fn classify_returns_expected(#[case] label: &str, #[case] expected: Option<Channel>) {
        assert_eq!(Channel::classify(label), expected);
    }

    #[test]
    fn display_uses_lowercase_names() {
        let names: Vec<String> = Channel::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["stable", "latest", "edge"]);
    }
}
