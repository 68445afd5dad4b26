//! Integration tests for the export flows (card-export).
//!
//! Covers downloads to disk, QR export through mock and HTTP uploaders,
//! and failure handling at every stage.

use async_trait::async_trait;
use card_core::{CardEditor, CardSurface, Command, EditorEvent, StatusChannel, StatusLevel};
use card_export::{
    Bitmap, DirectorySaver, ExportError, ExportPipeline, ExportResult, ExportStage, ExportStatus,
    HttpUploader, MockUploader, QrCodeEncoder, QrContainer, QrEncoder, Rasterizer, Uploader,
    DOWNLOAD_FILE_NAME,
};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Rasterizer that always rejects the card.
struct BrokenRasterizer;

#[async_trait]
impl Rasterizer for BrokenRasterizer {
    async fn rasterize(&self, _surface: &CardSurface) -> ExportResult<Bitmap> {
        Err(ExportError::Raster("unsupported content".to_string()))
    }
}

/// Uploader that always fails.
struct OfflineUploader;

#[async_trait]
impl Uploader for OfflineUploader {
    async fn upload(&self, _image_data_uri: &str) -> ExportResult<Url> {
        Err(ExportError::UnexpectedResponse("offline".to_string()))
    }
}

fn pipeline() -> ExportPipeline {
    ExportPipeline::new().with_uploader(MockUploader::immediate(
        "https://example.com/path/to/your/uploaded/image.png",
    ))
}

fn existing_symbol() -> QrContainer {
    let mut container = QrContainer::new();
    container.replace(QrCodeEncoder.encode("previous", 64).expect("symbol"));
    container
}

// ==========================================================================
// Download
// ==========================================================================

#[tokio::test]
async fn download_writes_png_to_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = pipeline().with_saver(DirectorySaver::new(dir.path()));
    let mut status = StatusChannel::new();

    let result = pipeline.download(&CardSurface::template(), &mut status).await;
    assert!(result.is_completed(), "{result:?}");

    assert!(result.download_link().is_none());
    let png = std::fs::read(dir.path().join(DOWNLOAD_FILE_NAME)).expect("png");
    assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    assert_eq!(status.latest().map(|e| e.level), Some(StatusLevel::Info));
}

#[tokio::test]
async fn download_reports_rasterize_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = pipeline()
        .with_rasterizer(BrokenRasterizer)
        .with_saver(DirectorySaver::new(dir.path()));
    let mut status = StatusChannel::new();

    let result = pipeline.download(&CardSurface::template(), &mut status).await;
    assert!(matches!(
        result,
        ExportStatus::Failed {
            stage: ExportStage::Rasterize,
            ..
        }
    ));
    assert!(!dir.path().join(DOWNLOAD_FILE_NAME).exists());
    assert_eq!(status.latest().map(|e| e.level), Some(StatusLevel::Error));
}

// ==========================================================================
// QR export
// ==========================================================================

#[tokio::test]
async fn qr_export_draws_uploaded_url() {
    let mut container = existing_symbol();
    let mut status = StatusChannel::new();

    let result = pipeline()
        .export_qr(&CardSurface::template(), &mut container, &mut status)
        .await;
    assert_eq!(
        result,
        ExportStatus::Completed {
            detail: "https://example.com/path/to/your/uploaded/image.png".to_string(),
            link: None,
        }
    );
    let symbol = container.symbol().expect("symbol");
    assert_eq!(
        symbol.payload,
        "https://example.com/path/to/your/uploaded/image.png"
    );
    assert_eq!(symbol.size_px, 128);
}

#[tokio::test]
async fn upload_failure_leaves_container_untouched() {
    let mut container = existing_symbol();
    let before = container.clone();
    let mut status = StatusChannel::new();

    let result = pipeline()
        .with_uploader(OfflineUploader)
        .export_qr(&CardSurface::template(), &mut container, &mut status)
        .await;
    assert!(matches!(
        result,
        ExportStatus::Failed {
            stage: ExportStage::Upload,
            ..
        }
    ));
    assert_eq!(container, before);
    assert!(status
        .latest()
        .is_some_and(|e| e.message.contains("offline")));
}

#[tokio::test]
async fn rasterize_failure_skips_upload() {
    let mut container = QrContainer::new();
    let mut status = StatusChannel::new();

    let result = pipeline()
        .with_rasterizer(BrokenRasterizer)
        .export_qr(&CardSurface::template(), &mut container, &mut status)
        .await;
    assert!(!result.is_completed());
    assert!(container.is_empty());
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn qr_export_through_http_uploader() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "url": "https://cdn.example.com/c.png" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let uploader = HttpUploader::new(&format!("{}/images", server.uri())).expect("uploader");
    let mut container = QrContainer::new();
    let mut status = StatusChannel::new();
    let result = ExportPipeline::new()
        .with_uploader(uploader)
        .with_qr_size(256)
        .export_qr(&CardSurface::template(), &mut container, &mut status)
        .await;

    assert!(result.is_completed(), "{result:?}");
    let symbol = container.symbol().expect("symbol");
    assert_eq!(symbol.payload, "https://cdn.example.com/c.png");
    assert_eq!(symbol.size_px, 256);
}

// ==========================================================================
// Editor hand-off
// ==========================================================================

#[tokio::test]
async fn edited_card_exports_and_reports_on_editor_channel() {
    let mut editor = CardEditor::new(CardSurface::template()).expect("editor");
    editor
        .handle(EditorEvent::Command(Command::SelectTheme {
            theme: "theme-gradient-3".to_string(),
        }))
        .expect("theme");
    editor
        .handle(EditorEvent::Command(Command::AddText {
            text: "www.example.com".to_string(),
        }))
        .expect("text");

    let surface = editor.surface().clone();
    let mut container = QrContainer::new();
    let result = pipeline()
        .export_qr(&surface, &mut container, editor.status_mut())
        .await;

    assert!(result.is_completed());
    let messages = editor.drain_status();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, StatusLevel::Info);
}
