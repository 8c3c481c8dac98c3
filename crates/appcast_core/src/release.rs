use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::{display_version, format_pub_date, parse_published_at, select_asset, ExtractError};

/// Body used when a release carries no notes.
pub const NO_RELEASE_NOTES: &str = "No release notes provided.";

/// Release record as returned by the hosting API. Only the fields the feed needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseResponse {
    pub tag_name: String,
    pub published_at: String,
    pub assets: Vec<AssetResponse>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetResponse {
    pub name: String,
    pub browser_download_url: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub download_url: String,
    pub size_bytes: u64,
}

impl From<AssetResponse> for Asset {
    fn from(asset: AssetResponse) -> Self {
        Self {
            name: asset.name,
            download_url: asset.browser_download_url,
            size_bytes: asset.size,
        }
    }
}

/// Release metadata after validation. `version` is the single source for every
/// version string written to the notes page and the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub version: String,
    pub published_at: DateTime<Utc>,
    pub pub_date: String,
    pub assets: Vec<Asset>,
    pub body_markdown: String,
}

/// A release together with the asset the feed points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRelease {
    pub info: ReleaseInfo,
    pub asset: Asset,
}

/// Validate a raw API body and deserialize it into a [`ReleaseResponse`].
///
/// Anything that is not a JSON object with a string `tag_name` is reported as
/// [`ExtractError::NotARelease`]; error payloads such as `{"message": "Not Found"}`
/// land here.
pub fn parse_release(raw: &[u8]) -> Result<ReleaseResponse, ExtractError> {
    let value: Value = serde_json::from_slice(raw).map_err(|_| ExtractError::NotARelease)?;
    let has_tag = value
        .as_object()
        .and_then(|record| record.get("tag_name"))
        .is_some_and(Value::is_string);
    if !has_tag {
        return Err(ExtractError::NotARelease);
    }
    Ok(serde_json::from_value(value)?)
}

/// Derive feed metadata from a release record and pick the asset ending in `asset_suffix`.
pub fn extract_release_info(
    response: ReleaseResponse,
    asset_suffix: &str,
) -> Result<ExtractedRelease, ExtractError> {
    let version = display_version(&response.tag_name).to_string();
    let published_at = parse_published_at(&response.published_at)?;
    let pub_date = format_pub_date(&published_at);
    let assets: Vec<Asset> = response.assets.into_iter().map(Asset::from).collect();
    let asset = select_asset(&assets, asset_suffix)?.clone();

    let info = ReleaseInfo {
        tag_name: response.tag_name,
        version,
        published_at,
        pub_date,
        assets,
        body_markdown: response
            .body
            .unwrap_or_else(|| NO_RELEASE_NOTES.to_string()),
    };
    Ok(ExtractedRelease { info, asset })
}
