//! Command-line and environment configuration for `appcast-gen`.
//!
//! Every option can come from a flag or from the environment variable the CI job
//! already exports; flags win.

use std::path::PathBuf;

use appcast_core::{
    ChannelInfo, GeneratorConfig, ReleaseSelector, DEFAULT_API_BASE_URL, DEFAULT_ASSET_SUFFIX,
    DEFAULT_FEED_DIR, DEFAULT_NOTES_DIR, DEFAULT_SITE_URL,
};
use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "appcast-gen",
    version,
    about = "Generate a Sparkle appcast and release notes page from a GitHub release"
)]
pub struct Cli {
    /// Repository in `owner/name` form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Release tag to describe; the latest release when absent or empty.
    #[arg(long, env = "RELEASE_TAG")]
    pub tag: Option<String>,

    #[arg(
        long = "api-url",
        env = "APPCAST_API_URL",
        default_value = DEFAULT_API_BASE_URL,
        value_hint = clap::ValueHint::Url,
    )]
    pub api_url: String,

    /// File-name suffix of the asset the enclosure points at.
    #[arg(long, env = "APPCAST_ASSET_SUFFIX", default_value = DEFAULT_ASSET_SUFFIX)]
    pub asset_suffix: String,

    /// Public URL the website is served from.
    #[arg(
        long,
        env = "APPCAST_SITE_URL",
        default_value = DEFAULT_SITE_URL,
        value_hint = clap::ValueHint::Url,
    )]
    pub site_url: String,

    #[arg(
        long,
        env = "APPCAST_NOTES_DIR",
        default_value = DEFAULT_NOTES_DIR,
        value_hint = clap::ValueHint::DirPath,
    )]
    pub notes_dir: PathBuf,

    #[arg(
        long,
        env = "APPCAST_FEED_DIR",
        default_value = DEFAULT_FEED_DIR,
        value_hint = clap::ValueHint::DirPath,
    )]
    pub feed_dir: PathBuf,

    #[arg(long)]
    pub channel_title: Option<String>,

    #[arg(long)]
    pub channel_link: Option<String>,

    #[arg(long)]
    pub channel_description: Option<String>,

    #[arg(long)]
    pub channel_language: Option<String>,

    /// More log output (`-vv` for trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn into_config(self) -> GeneratorConfig {
        let defaults = ChannelInfo::default();
        let channel = ChannelInfo {
            title: self.channel_title.unwrap_or(defaults.title),
            link: self.channel_link.unwrap_or(defaults.link),
            description: self.channel_description.unwrap_or(defaults.description),
            language: self.channel_language.unwrap_or(defaults.language),
        };

        GeneratorConfig {
            repository: self.repository,
            release: ReleaseSelector::from_optional(self.tag),
            api_base_url: self.api_url,
            asset_suffix: self.asset_suffix,
            site_url: self.site_url,
            notes_dir: self.notes_dir,
            feed_dir: self.feed_dir,
            channel,
        }
    }
}
