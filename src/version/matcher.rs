//! Selection of the release a specifier refers to

use semver::Version;

use crate::version::semver::max_matching;
use crate::version::specifier::VersionSpecifier;

/// Select the release `specifier` refers to among `versions`.
///
/// - Default branch: the greatest release overall
/// - Exact: the release with the same triple
/// - Wildcards: the greatest release sharing the fixed segments
///
/// Input order is irrelevant; comparison is numeric per segment.
pub fn select_version<'a>(
    specifier: &VersionSpecifier,
    versions: &'a [Version],
) -> Option<&'a Version> {
    match specifier {
        VersionSpecifier::DefaultBranch => latest_version(versions),
        VersionSpecifier::Exact { .. } => versions.iter().find(|v| specifier.matches(v)),
        VersionSpecifier::MinorWildcard { .. } | VersionSpecifier::MajorWildcard { .. } => {
            max_matching(versions, |v| specifier.matches(v))
        }
    }
}

/// The greatest release, with no constraint on any segment
pub fn latest_version(versions: &[Version]) -> Option<&Version> {
    versions.iter().max()
}
