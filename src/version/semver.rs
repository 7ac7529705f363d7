use semver::Version;
use tracing::debug;

/// Parse a published tag into a release version.
///
/// Strips an optional `v` prefix. Tags that are not a full `major.minor.patch`
/// triple, or that carry pre-release or build metadata, are not releases and
/// yield `None`.
///
/// Examples:
/// - "v1.8.0" -> Version(1, 8, 0)
/// - "1.8.0" -> Version(1, 8, 0)
/// - "v1.8" -> None
/// - "v2.0.0-rc.1" -> None
/// - "nightly" -> None
pub fn parse_tag(tag: &str) -> Option<Version> {
    let stripped = tag.strip_prefix('v').unwrap_or(tag);
    let version = Version::parse(stripped).ok()?;

    if !version.pre.is_empty() || !version.build.is_empty() {
        return None;
    }

    Some(version)
}

/// Parse every tag that is a release, dropping the rest.
pub fn parse_tags(tags: &[String]) -> Vec<Version> {
    tags.iter()
        .filter_map(|tag| {
            let parsed = parse_tag(tag);
            if parsed.is_none() {
                debug!("Ignoring non-release tag '{}'", tag);
            }
            parsed
        })
        .collect()
}

/// Render a version in canonical tag form: `v<major>.<minor>.<patch>`
pub fn canonical_tag(version: &Version) -> String {
    format!("v{}.{}.{}", version.major, version.minor, version.patch)
}

/// Find the numerically greatest version among those matching `predicate`
pub fn max_matching<'a, F>(versions: &'a [Version], predicate: F) -> Option<&'a Version>
where
    F: Fn(&Version) -> bool,
{
    versions.iter().filter(|&v| predicate(v)).max()
}
