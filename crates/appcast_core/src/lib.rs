//! Appcast core: pure release-record shaping with no IO.
mod asset;
mod config;
mod date;
mod error;
mod release;
mod version;

pub use asset::select_asset;
pub use config::{
    ChannelInfo, GeneratorConfig, ReleaseSelector, DEFAULT_API_BASE_URL, DEFAULT_ASSET_SUFFIX,
    DEFAULT_FEED_DIR, DEFAULT_NOTES_DIR, DEFAULT_SITE_URL, FEED_FILENAME,
};
pub use date::{format_pub_date, parse_published_at, PUBLISHED_AT_FORMAT, PUB_DATE_FORMAT};
pub use error::ExtractError;
pub use release::{
    extract_release_info, parse_release, Asset, AssetResponse, ExtractedRelease, ReleaseInfo,
    ReleaseResponse, NO_RELEASE_NOTES,
};
pub use version::{display_version, numeric_version, VERSION_PREFIX};
