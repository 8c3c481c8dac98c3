/// Leading character stripped from tags such as `v1.2.3`.
pub const VERSION_PREFIX: char = 'v';

/// Display version for a tag: at most one leading [`VERSION_PREFIX`] removed.
pub fn display_version(tag: &str) -> &str {
    tag.strip_prefix(VERSION_PREFIX).unwrap_or(tag)
}

/// Numeric-only version token for `sparkle:version` (`2.3.1` -> `231`).
pub fn numeric_version(version: &str) -> String {
    version.replace('.', "")
}
