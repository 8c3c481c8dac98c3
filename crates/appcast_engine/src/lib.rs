//! Appcast engine: release fetch, rendering and file output.
mod appcast;
mod fetch;
mod generator;
mod notes;
mod persist;
mod types;

pub use appcast::{
    build_appcast_document, FeedError, DC_NAMESPACE, ENCLOSURE_TYPE, SPARKLE_NAMESPACE,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use generator::{FeedGenerator, GeneratedArtifacts, PipelineError};
pub use notes::{render_notes_document, NotesRenderer, PulldownNotesRenderer};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, Stage};
