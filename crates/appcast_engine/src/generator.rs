use std::path::{Path, PathBuf};

use appcast_core::{
    extract_release_info, parse_release, Asset, ExtractError, GeneratorConfig, ReleaseInfo,
};
use appcast_logging::{appcast_debug, appcast_info};
use thiserror::Error;

use crate::appcast::{build_appcast_document, FeedError};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::notes::{render_notes_document, NotesRenderer, PulldownNotesRenderer};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::{FetchError, Stage};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch release")]
    Fetch(#[from] FetchError),
    #[error("unusable release data")]
    Release {
        /// Response body as received, for diagnosis.
        raw: String,
        #[source]
        source: ExtractError,
    },
    #[error("failed to write {}", path.display())]
    Persist {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: PersistError,
    },
    #[error("failed to build appcast")]
    Feed(#[from] FeedError),
    #[error("failed to start runtime")]
    Runtime(#[source] std::io::Error),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Fetch(_) | PipelineError::Runtime(_) => Stage::Fetching,
            PipelineError::Release { .. } => Stage::Extracting,
            PipelineError::Persist { stage, .. } => *stage,
            PipelineError::Feed(_) => Stage::BuildingFeed,
        }
    }

    /// Raw API response, when the failure was caused by its content.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            PipelineError::Release { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    pub info: ReleaseInfo,
    pub asset: Asset,
    pub notes_path: PathBuf,
    pub feed_path: PathBuf,
    pub feed_xml: String,
}

/// Runs fetch, extraction, rendering and both writes strictly in sequence.
///
/// Every check on the release data happens before the first file is touched, so a
/// failed run leaves earlier artifacts as they were.
pub struct FeedGenerator {
    fetcher: Box<dyn Fetcher>,
    renderer: Box<dyn NotesRenderer>,
}

impl FeedGenerator {
    pub fn new(settings: FetchSettings) -> Self {
        Self::with_parts(
            Box::new(ReqwestFetcher::new(settings)),
            Box::new(PulldownNotesRenderer),
        )
    }

    pub fn with_parts(fetcher: Box<dyn Fetcher>, renderer: Box<dyn NotesRenderer>) -> Self {
        Self { fetcher, renderer }
    }

    /// Drive [`FeedGenerator::generate`] to completion on a private runtime.
    pub fn generate_blocking(
        &self,
        config: &GeneratorConfig,
    ) -> Result<GeneratedArtifacts, PipelineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(PipelineError::Runtime)?;
        runtime.block_on(self.generate(config))
    }

    pub async fn generate(
        &self,
        config: &GeneratorConfig,
    ) -> Result<GeneratedArtifacts, PipelineError> {
        appcast_debug!("stage={}", Stage::Fetching);
        let url = config.release_api_url();
        let output = self.fetcher.fetch(&url).await?;
        appcast_info!(
            "Fetched release metadata from {} ({} bytes, status {}, {})",
            output.metadata.final_url,
            output.bytes.len(),
            output.status,
            output.metadata.content_type.as_deref().unwrap_or("no content type")
        );

        appcast_debug!("stage={}", Stage::Extracting);
        let extracted = parse_release(&output.bytes)
            .and_then(|response| extract_release_info(response, &config.asset_suffix))
            .map_err(|source| PipelineError::Release {
                raw: output.body_text(),
                source,
            })?;
        let info = extracted.info;
        let asset = extracted.asset;
        appcast_info!(
            "Release {} (version {}), asset {} ({} bytes)",
            info.tag_name,
            info.version,
            asset.name,
            asset.size_bytes
        );

        appcast_debug!("stage={}", Stage::Rendering);
        let notes_html =
            render_notes_document(self.renderer.as_ref(), &info.body_markdown, &info.version);

        appcast_debug!("stage={}", Stage::WritingNotes);
        let notes_path = write(
            Stage::WritingNotes,
            &config.notes_path(&info.version),
            &notes_html,
        )?;
        appcast_info!("Wrote release notes to {}", notes_path.display());

        appcast_debug!("stage={}", Stage::BuildingFeed);
        let feed_xml = build_appcast_document(
            &config.channel,
            &info,
            &asset,
            &config.release_notes_link(&info.version),
        )?;

        appcast_debug!("stage={}", Stage::WritingFeed);
        let feed_path = write(Stage::WritingFeed, &config.feed_path(), &feed_xml)?;
        appcast_info!("Wrote appcast to {}", feed_path.display());

        appcast_debug!("stage={}", Stage::Done);
        Ok(GeneratedArtifacts {
            info,
            asset,
            notes_path,
            feed_path,
            feed_xml,
        })
    }
}

fn write(stage: Stage, path: &Path, content: &str) -> Result<PathBuf, PipelineError> {
    AtomicFileWriter::write_path(path, content).map_err(|source| PipelineError::Persist {
        stage,
        path: path.to_path_buf(),
        source,
    })
}
