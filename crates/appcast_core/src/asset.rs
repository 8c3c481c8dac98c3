use crate::{Asset, ExtractError};

/// First asset, in API order, whose name ends with `suffix`.
pub fn select_asset<'a>(assets: &'a [Asset], suffix: &str) -> Result<&'a Asset, ExtractError> {
    assets
        .iter()
        .find(|asset| asset.name.ends_with(suffix))
        .ok_or_else(|| ExtractError::AssetNotFound {
            suffix: suffix.to_string(),
            available: assets.iter().map(|asset| asset.name.clone()).collect(),
        })
}
