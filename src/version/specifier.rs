//! Version specifier parsing
//!
//! A specifier is what the caller asks for:
//! - the default branch name (e.g. `master`): the newest release
//! - `v1.8.0` / `1.8.0`: exactly that release
//! - `1.6.x` / `1.6`: the newest `1.6.*` release
//! - `1.x` / `1`: the newest `1.*.*` release

use semver::Version;

use crate::version::error::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSpecifier {
    DefaultBranch,
    Exact { major: u64, minor: u64, patch: u64 },
    MinorWildcard { major: u64, minor: u64 },
    MajorWildcard { major: u64 },
}

enum Segment {
    Number(u64),
    Wildcard,
}

fn parse_segment(segment: &str) -> Option<Segment> {
    if segment.eq_ignore_ascii_case("x") {
        return Some(Segment::Wildcard);
    }
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok().map(Segment::Number)
}

impl VersionSpecifier {
    /// Parse a specifier string.
    ///
    /// `default_branch` is compared case-sensitively against the raw input
    /// before any version parsing happens.
    pub fn parse(input: &str, default_branch: &str) -> Result<Self, ResolveError> {
        let invalid = || ResolveError::InvalidSpecifier(input.to_string());

        if input.is_empty() {
            return Err(invalid());
        }
        if input == default_branch {
            return Ok(VersionSpecifier::DefaultBranch);
        }

        let stripped = input.strip_prefix('v').unwrap_or(input);
        if stripped.is_empty() {
            return Err(invalid());
        }

        let raw: Vec<&str> = stripped.split('.').collect();
        if raw.len() > 3 {
            return Err(invalid());
        }

        let mut numbers = Vec::with_capacity(3);
        let mut seen_wildcard = false;
        for part in raw {
            if seen_wildcard {
                return Err(invalid());
            }
            match parse_segment(part).ok_or_else(invalid)? {
                Segment::Number(n) => numbers.push(n),
                Segment::Wildcard => seen_wildcard = true,
            }
        }

        match numbers[..] {
            [major, minor, patch] => Ok(VersionSpecifier::Exact {
                major,
                minor,
                patch,
            }),
            [major, minor] => Ok(VersionSpecifier::MinorWildcard { major, minor }),
            [major] => Ok(VersionSpecifier::MajorWildcard { major }),
            _ => Err(invalid()),
        }
    }

    /// Whether `version` satisfies this specifier's fixed segments
    pub fn matches(&self, version: &Version) -> bool {
        match *self {
            VersionSpecifier::DefaultBranch => true,
            VersionSpecifier::Exact {
                major,
                minor,
                patch,
            } => version.major == major && version.minor == minor && version.patch == patch,
            VersionSpecifier::MinorWildcard { major, minor } => {
                version.major == major && version.minor == minor
            }
            VersionSpecifier::MajorWildcard { major } => version.major == major,
        }
    }
}
