use chrono::{DateTime, NaiveDateTime, Utc};

use crate::ExtractError;

/// Shape of `published_at` as reported by the release API.
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// RFC 822 style date used by the feed's `pubDate`.
pub const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Parse `published_at` strictly against [`PUBLISHED_AT_FORMAT`] as UTC.
pub fn parse_published_at(value: &str) -> Result<DateTime<Utc>, ExtractError> {
    NaiveDateTime::parse_from_str(value, PUBLISHED_AT_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| ExtractError::InvalidTimestamp {
            value: value.to_string(),
            expected: PUBLISHED_AT_FORMAT,
            source,
        })
}

/// Render a publish time for `pubDate`. Never consults the host timezone.
pub fn format_pub_date(published_at: &DateTime<Utc>) -> String {
    published_at.format(PUB_DATE_FORMAT).to_string()
}
