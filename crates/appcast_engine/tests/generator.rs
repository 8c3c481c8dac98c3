use std::fs;
use std::path::Path;

use appcast_core::{ExtractError, GeneratorConfig, ReleaseSelector};
use appcast_engine::{FeedGenerator, FetchSettings, PipelineError, Stage};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    appcast_logging::initialize_for_tests();
}

fn scenario_release() -> Value {
    json!({
        "tag_name": "v2.3.1",
        "published_at": "2024-05-01T10:15:00Z",
        "assets": [
            {"name": "App-2.3.1.dmg", "browser_download_url": "https://x/App.dmg", "size": 99},
            {"name": "App-2.3.1.zip", "browser_download_url": "https://x/App.zip", "size": 12345},
            {"name": "App-2.3.1-alt.zip", "browser_download_url": "https://x/Alt.zip", "size": 1}
        ],
        "body": "## Fixes\n- bug fix"
    })
}

async fn serve(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

fn config_for(server: &MockServer, root: &Path, tag: Option<&str>) -> GeneratorConfig {
    let mut config = GeneratorConfig::new("padrewin/Hyperlink");
    config.release = ReleaseSelector::from_optional(tag.map(str::to_string));
    config.api_base_url = server.uri();
    config.notes_dir = root.join("website/updates/releasenotes");
    config.feed_dir = root.join("website/updates");
    config
}

fn generator() -> FeedGenerator {
    FeedGenerator::new(FetchSettings::default())
}

#[tokio::test]
async fn tagged_release_produces_notes_and_appcast() {
    init_logging();
    let server = MockServer::start().await;
    serve(&server, "/repos/padrewin/Hyperlink/releases/tags/v2.3.1", 200, scenario_release()).await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, temp.path(), Some("v2.3.1"));

    let artifacts = generator().generate(&config).await.unwrap();

    assert_eq!(artifacts.info.version, "2.3.1");
    assert_eq!(artifacts.asset.name, "App-2.3.1.zip");
    assert_eq!(
        artifacts.notes_path,
        temp.path().join("website/updates/releasenotes/2.3.1.html")
    );
    assert_eq!(artifacts.feed_path, temp.path().join("website/updates/appcast.xml"));

    let notes = fs::read_to_string(&artifacts.notes_path).unwrap();
    assert!(notes.contains("<h1>Version 2.3.1</h1>"));
    assert!(notes.contains("<h2>Fixes</h2>"));
    assert!(notes.contains("<li>bug fix</li>"));

    let feed = fs::read_to_string(&artifacts.feed_path).unwrap();
    assert_eq!(feed, artifacts.feed_xml);
    assert!(feed.contains("<title>Version 2.3.1</title>"));
    assert!(feed.contains("<pubDate>Wed, 01 May 2024 10:15:00 +0000</pubDate>"));
    assert!(feed.contains("url=\"https://x/App.zip\""));
    assert!(feed.contains("sparkle:version=\"231\""));
    assert!(feed.contains("sparkle:shortVersionString=\"2.3.1\""));
    assert!(feed.contains("length=\"12345\""));
    assert!(feed.contains(
        "<sparkle:releaseNotesLink>https://hyperlink.colddev.dev/updates/releasenotes/2.3.1.html</sparkle:releaseNotesLink>"
    ));
}

#[tokio::test]
async fn empty_tag_uses_latest_release() {
    let server = MockServer::start().await;
    serve(&server, "/repos/padrewin/Hyperlink/releases/latest", 200, scenario_release()).await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, temp.path(), Some(""));

    let artifacts = generator().generate(&config).await.unwrap();
    assert_eq!(artifacts.info.tag_name, "v2.3.1");
}

#[tokio::test]
async fn configured_suffix_selects_other_asset() {
    let server = MockServer::start().await;
    serve(&server, "/repos/padrewin/Hyperlink/releases/latest", 200, scenario_release()).await;
    let temp = TempDir::new().unwrap();
    let mut config = config_for(&server, temp.path(), None);
    config.asset_suffix = ".dmg".to_string();

    let artifacts = generator().generate(&config).await.unwrap();
    assert_eq!(artifacts.asset.download_url, "https://x/App.dmg");
    assert!(artifacts.feed_xml.contains("length=\"99\""));
}

#[tokio::test]
async fn rerun_is_byte_identical() {
    let server = MockServer::start().await;
    serve(&server, "/repos/padrewin/Hyperlink/releases/latest", 200, scenario_release()).await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, temp.path(), None);
    let generator = generator();

    let first = generator.generate(&config).await.unwrap();
    let notes_before = fs::read(&first.notes_path).unwrap();
    let feed_before = fs::read(&first.feed_path).unwrap();

    let second = generator.generate(&config).await.unwrap();
    assert_eq!(fs::read(&second.notes_path).unwrap(), notes_before);
    assert_eq!(fs::read(&second.feed_path).unwrap(), feed_before);
}

#[tokio::test]
async fn missing_tag_name_writes_nothing() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/repos/padrewin/Hyperlink/releases/tags/v9.9.9",
        404,
        json!({"message": "Not Found"}),
    )
    .await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, temp.path(), Some("v9.9.9"));

    let err = generator().generate(&config).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Release {
            source: ExtractError::NotARelease,
            ..
        }
    ));
    assert_eq!(err.stage(), Stage::Extracting);
    assert!(err.raw_response().unwrap().contains("Not Found"));
    assert!(!temp.path().join("website").exists());
}

#[tokio::test]
async fn missing_asset_leaves_previous_appcast_untouched() {
    let server = MockServer::start().await;
    let mut release = scenario_release();
    release["assets"] = json!([
        {"name": "App.dmg", "browser_download_url": "https://x/App.dmg", "size": 1}
    ]);
    serve(&server, "/repos/padrewin/Hyperlink/releases/latest", 200, release).await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, temp.path(), None);

    fs::create_dir_all(&config.feed_dir).unwrap();
    fs::write(config.feed_path(), "previous feed").unwrap();

    let err = generator().generate(&config).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Release {
            source: ExtractError::AssetNotFound { .. },
            ..
        }
    ));
    assert_eq!(fs::read_to_string(config.feed_path()).unwrap(), "previous feed");
    assert!(!config.notes_dir.exists());
}

#[tokio::test]
async fn malformed_timestamp_is_reported_with_raw_response() {
    let server = MockServer::start().await;
    let mut release = scenario_release();
    release["published_at"] = json!("2024-05-01 10:15");
    serve(&server, "/repos/padrewin/Hyperlink/releases/latest", 200, release).await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, temp.path(), None);

    let err = generator().generate(&config).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Release {
            source: ExtractError::InvalidTimestamp { .. },
            ..
        }
    ));
    assert!(err.raw_response().unwrap().contains("2024-05-01 10:15"));
    assert!(!temp.path().join("website").exists());
}

#[tokio::test]
async fn unwritable_output_is_fatal() {
    let server = MockServer::start().await;
    serve(&server, "/repos/padrewin/Hyperlink/releases/latest", 200, scenario_release()).await;
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "file, not a directory").unwrap();
    let mut config = config_for(&server, temp.path(), None);
    config.notes_dir = blocker.join("releasenotes");

    let err = generator().generate(&config).await.unwrap_err();
    assert_eq!(err.stage(), Stage::WritingNotes);
    assert!(!config.feed_path().exists());
}

#[test]
fn blocking_entry_point_runs_the_pipeline() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        serve(&server, "/repos/padrewin/Hyperlink/releases/latest", 200, scenario_release()).await;
        server
    });
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, temp.path(), None);

    let artifacts = generator().generate_blocking(&config).unwrap();
    assert!(artifacts.feed_path.exists());
}
