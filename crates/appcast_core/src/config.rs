use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_ASSET_SUFFIX: &str = ".zip";
pub const DEFAULT_SITE_URL: &str = "https://hyperlink.colddev.dev";
pub const DEFAULT_NOTES_DIR: &str = "website/updates/releasenotes";
pub const DEFAULT_FEED_DIR: &str = "website/updates";
pub const FEED_FILENAME: &str = "appcast.xml";

/// Which release of the repository to describe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReleaseSelector {
    #[default]
    Latest,
    Tag(String),
}

impl ReleaseSelector {
    /// An absent or empty tag means the most recently published release. Any other
    /// value, whitespace included, is used as given.
    pub fn from_optional(tag: Option<String>) -> Self {
        match tag {
            Some(tag) if !tag.is_empty() => Self::Tag(tag),
            _ => Self::Latest,
        }
    }
}

/// Fixed metadata of the feed's `channel` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
}

impl Default for ChannelInfo {
    fn default() -> Self {
        Self {
            title: "Hyperlink Updates".to_string(),
            link: DEFAULT_SITE_URL.to_string(),
            description: "Update feed for Hyperlink".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Everything one generator run needs. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// `owner/name` of the repository. Not validated locally.
    pub repository: String,
    pub release: ReleaseSelector,
    pub api_base_url: String,
    pub asset_suffix: String,
    /// Public base URL the website is served from.
    pub site_url: String,
    pub notes_dir: PathBuf,
    pub feed_dir: PathBuf,
    pub channel: ChannelInfo,
}

impl GeneratorConfig {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            release: ReleaseSelector::Latest,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            asset_suffix: DEFAULT_ASSET_SUFFIX.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            notes_dir: PathBuf::from(DEFAULT_NOTES_DIR),
            feed_dir: PathBuf::from(DEFAULT_FEED_DIR),
            channel: ChannelInfo::default(),
        }
    }

    pub fn release_api_url(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        match &self.release {
            ReleaseSelector::Tag(tag) => {
                format!("{base}/repos/{}/releases/tags/{tag}", self.repository)
            }
            ReleaseSelector::Latest => format!("{base}/repos/{}/releases/latest", self.repository),
        }
    }

    /// `<notes_dir>/<version>.html`. The version is joined verbatim, so a `/` in the
    /// tag nests the page in a subdirectory, mirroring [`Self::release_notes_link`].
    pub fn notes_path(&self, version: &str) -> PathBuf {
        self.notes_dir.join(format!("{version}.html"))
    }

    pub fn feed_path(&self) -> PathBuf {
        self.feed_dir.join(FEED_FILENAME)
    }

    pub fn release_notes_link(&self, version: &str) -> String {
        format!(
            "{}/updates/releasenotes/{version}.html",
            self.site_url.trim_end_matches('/')
        )
    }
}
