mod cli;

use std::process::ExitCode;

use appcast_core::GeneratorConfig;
use appcast_engine::{FeedGenerator, FetchSettings, GeneratedArtifacts, PipelineError};
use appcast_logging::{appcast_error, appcast_info, level_from_verbosity};
use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    appcast_logging::initialize(level_from_verbosity(cli.verbose, cli.quiet));
    let config = cli.into_config();

    match run(&config) {
        Ok(artifacts) => {
            report(&artifacts);
            ExitCode::SUCCESS
        }
        Err(err) => Failure::from_error(err).emit(),
    }
}

fn run(config: &GeneratorConfig) -> Result<GeneratedArtifacts, PipelineError> {
    appcast_info!(
        "Generating appcast for {} ({:?})",
        config.repository,
        config.release
    );
    let generator = FeedGenerator::new(FetchSettings::default());
    generator.generate_blocking(config)
}

fn report(artifacts: &GeneratedArtifacts) {
    println!("Release notes: {}", artifacts.notes_path.display());
    println!("Appcast: {}", artifacts.feed_path.display());
    println!();
    print!("{}", artifacts.feed_xml);
}

/// What a failed run tells the operator before exiting.
#[derive(Debug)]
struct Failure {
    /// Release API body, printed verbatim when the data itself was the problem.
    raw_response: Option<String>,
    error: anyhow::Error,
}

impl Failure {
    fn from_error(err: PipelineError) -> Self {
        let raw_response = err.raw_response().map(str::to_string);
        let stage = err.stage();
        let error =
            anyhow::Error::new(err).context(format!("appcast generation failed while {stage}"));
        Self {
            raw_response,
            error,
        }
    }

    fn message(&self) -> String {
        format!("{:#}", self.error)
    }

    fn emit(&self) -> ExitCode {
        if let Some(raw) = &self.raw_response {
            eprintln!("Release API response:\n{raw}");
        }
        appcast_error!("{}", self.message());
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appcast_core::ExtractError;
    use appcast_engine::{FailureKind, FetchError};
    use pretty_assertions::assert_eq;

    #[test]
    fn not_found_response_is_reported_and_fails() {
        let err = PipelineError::Release {
            raw: r#"{"message":"Not Found"}"#.to_string(),
            source: ExtractError::NotARelease,
        };

        let failure = Failure::from_error(err);
        assert_eq!(
            failure.raw_response.as_deref(),
            Some(r#"{"message":"Not Found"}"#)
        );
        assert_eq!(
            failure.message(),
            "appcast generation failed while extracting release info: unusable release data: \
             response is not a release record (missing `tag_name`)"
        );
        assert_eq!(failure.emit(), ExitCode::FAILURE);
    }

    #[test]
    fn transport_failure_has_no_raw_response() {
        let err = PipelineError::Fetch(FetchError {
            kind: FailureKind::Timeout,
            message: "operation timed out".to_string(),
        });

        let failure = Failure::from_error(err);
        assert_eq!(failure.raw_response, None);
        assert_eq!(
            failure.message(),
            "appcast generation failed while fetching release: failed to fetch release: \
             timeout: operation timed out"
        );
        assert_eq!(failure.emit(), ExitCode::FAILURE);
    }
}
