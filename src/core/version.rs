//! # Version Tiers
//!
//! Serialization policy is keyed to five buckets of Minecraft versions rather
//! than to raw version strings. Thresholds are checked from newest to oldest:
//!
//! | tier      | versions          |
//! |-----------|-------------------|
//! | `1.21.5+` | 1.21.5 and later  |
//! | `1.20+`   | 1.20 – 1.21.4     |
//! | `1.16+`   | 1.16 – 1.19.x     |
//! | `1.13+`   | 1.13 – 1.15.x     |
//! | `1.12-`   | 1.12.x and older  |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum VersionTier {
    Pre1_13,
    V1_13,
    V1_16,
    V1_20,
    #[default]
    V1_21_5,
}

/// Threshold table, newest first.
const THRESHOLDS: [((u32, u32, u32), VersionTier); 4] = [
    ((1, 21, 5), VersionTier::V1_21_5),
    ((1, 20, 0), VersionTier::V1_20),
    ((1, 16, 0), VersionTier::V1_16),
    ((1, 13, 0), VersionTier::V1_13),
];

impl VersionTier {
    /// All tiers, newest first.
    pub const ALL: [VersionTier; 5] = [
        VersionTier::V1_21_5,
        VersionTier::V1_20,
        VersionTier::V1_16,
        VersionTier::V1_13,
        VersionTier::Pre1_13,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VersionTier::V1_21_5 => "1.21.5+",
            VersionTier::V1_20 => "1.20+",
            VersionTier::V1_16 => "1.16+",
            VersionTier::V1_13 => "1.13+",
            VersionTier::Pre1_13 => "1.12-",
        }
    }

    /// Whether events use the snake_case keys and reshaped payloads.
    pub fn uses_new_event_format(self) -> bool {
        self == VersionTier::V1_21_5
    }

    /// Next tier in newest-to-oldest order, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.label() == s)
    }
}

impl fmt::Display for VersionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    Invalid(String),
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionError::Invalid(s) => write!(f, "not a Minecraft version or tier: '{s}'"),
        }
    }
}

impl std::error::Error for VersionError {}

/// Parses `major[.minor[.patch]]`; missing parts are zero.
fn parse_semver(version: &str) -> Result<(u32, u32, u32), VersionError> {
    let invalid = || VersionError::Invalid(version.to_string());
    let mut parts = version.trim().split('.');
    let mut next = |required: bool| -> Result<u32, VersionError> {
        match parts.next() {
            Some(p) => p.parse::<u32>().map_err(|_| invalid()),
            None if required => Err(invalid()),
            None => Ok(0),
        }
    };
    let major = next(true)?;
    let minor = next(false)?;
    let patch = next(false)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok((major, minor, patch))
}

/// Maps a semantic Minecraft version (`"1.20.4"`) to its serialization tier.
pub fn version_to_tier(version: &str) -> Result<VersionTier, VersionError> {
    let parsed = parse_semver(version)?;
    Ok(THRESHOLDS
        .iter()
        .find(|(threshold, _)| parsed >= *threshold)
        .map(|(_, tier)| *tier)
        .unwrap_or(VersionTier::Pre1_13))
}

/// Accepts a tier literal (`"1.20+"`) or a semantic version (`"1.20.4"`).
impl FromStr for VersionTier {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_label(s.trim()) {
            Some(tier) => Ok(tier),
            None => version_to_tier(s),
        }
    }
}

impl TryFrom<String> for VersionTier {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionTier> for String {
    fn from(tier: VersionTier) -> Self {
        tier.label().to_string()
    }
}
