//! Loading cards, replaying scripted sessions and running exports.

use std::path::{Path, PathBuf};

use anyhow::Context;
use card_core::{
    CardEditor, CardSurface, Command, DataUri, EditorEvent, ElementKind, ElementRef, Outcome,
};
use card_export::{
    CardExporter, DirectorySaver, ExportConfig, ExportPipeline, ExportStatus, HttpUploader,
    MockUploader, QrContainer, SvgRasterizer,
};

use crate::EditorConfig;

/// File the QR symbol is written to.
pub const QR_FILE_NAME: &str = "business_card_qr.svg";

/// File the edited surface is written to after a replay.
pub const SURFACE_FILE_NAME: &str = "business_card.json";

/// Read a surface from JSON, or start from the template.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a surface.
pub fn load_surface(path: Option<&Path>) -> anyhow::Result<CardSurface> {
    let Some(path) = path else {
        return Ok(CardSurface::template());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading surface {}", path.display()))?;
    CardSurface::from_json(&json).with_context(|| format!("parsing surface {}", path.display()))
}

/// Read a JSON array of editor events.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<EditorEvent>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing script {}", path.display()))
}

/// Encode image file contents as a data URI, detecting the MIME type from
/// the bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a recognised image format.
pub fn image_data_uri(bytes: Vec<u8>) -> anyhow::Result<String> {
    let format = image::guess_format(&bytes).context("file is not an image")?;
    Ok(DataUri::new(format.to_mime_type(), bytes).to_string())
}

/// Replace the first profile picture on the card with an image file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the editor fails.
pub fn replace_profile_image(editor: &mut CardEditor, path: &Path) -> anyhow::Result<Outcome> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let data_uri = image_data_uri(bytes)?;
    let Some(target) = editor
        .surface()
        .elements()
        .iter()
        .find(|e| matches!(e.kind, ElementKind::ProfileImage { .. }))
        .map(|e| ElementRef::Id(e.id))
    else {
        anyhow::bail!("card has no profile image");
    };
    Ok(editor.execute(Command::ReplaceProfileImage { target, data_uri })?)
}

/// Apply every event in order, returning each outcome.
///
/// # Errors
///
/// Returns an error if the editor cannot record or restore history.
pub fn replay(editor: &mut CardEditor, events: Vec<EditorEvent>) -> anyhow::Result<Vec<Outcome>> {
    let mut outcomes = Vec::with_capacity(events.len());
    for (index, event) in events.into_iter().enumerate() {
        let outcome = editor
            .handle(event)
            .with_context(|| format!("event #{index}"))?;
        if let Outcome::Skipped(reason) = outcome {
            tracing::debug!("Event #{index} skipped: {reason}");
        }
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Build the export pipeline described by `config`.
///
/// # Errors
///
/// Returns an error if the upload URL is invalid.
pub fn build_pipeline(config: &EditorConfig) -> anyhow::Result<ExportPipeline> {
    let exporter = CardExporter::new(ExportConfig {
        scale: config.scale,
        ..ExportConfig::default()
    });
    let pipeline = ExportPipeline::new()
        .with_rasterizer(SvgRasterizer::new(exporter))
        .with_saver(DirectorySaver::new(config.output_dir.clone()))
        .with_qr_size(config.qr_size);
    Ok(match &config.upload_url {
        Some(url) => pipeline.with_uploader(HttpUploader::new(url)?),
        None => pipeline.with_uploader(MockUploader::default()),
    })
}

/// Write the SVG rendering of a card.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_svg(config: &EditorConfig, surface: &CardSurface) -> anyhow::Result<PathBuf> {
    let exporter = CardExporter::new(ExportConfig {
        scale: config.scale,
        ..ExportConfig::default()
    });
    std::fs::create_dir_all(&config.output_dir)?;
    let path = config.output_dir.join("business_card.svg");
    std::fs::write(&path, exporter.render_svg(surface))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Save the card as PNG through the editor's status channel.
///
/// # Errors
///
/// Returns an error if the pipeline cannot be built or the export fails.
pub async fn download(config: &EditorConfig, editor: &mut CardEditor) -> anyhow::Result<String> {
    let pipeline = build_pipeline(config)?;
    let surface = editor.surface().clone();
    match pipeline.download(&surface, editor.status_mut()).await {
        ExportStatus::Completed { detail, .. } => Ok(detail),
        ExportStatus::Failed { stage, reason } => {
            anyhow::bail!("download failed during {stage}: {reason}")
        }
    }
}

/// Upload the card and write its QR symbol next to the other exports.
///
/// # Errors
///
/// Returns an error if the pipeline cannot be built, the export fails or
/// the symbol cannot be written.
pub async fn export_qr(config: &EditorConfig, editor: &mut CardEditor) -> anyhow::Result<PathBuf> {
    let pipeline = build_pipeline(config)?;
    let surface = editor.surface().clone();
    let mut container = QrContainer::new();
    if let ExportStatus::Failed { stage, reason } = pipeline
        .export_qr(&surface, &mut container, editor.status_mut())
        .await
    {
        anyhow::bail!("QR export failed during {stage}: {reason}");
    }
    let symbol = container
        .symbol()
        .context("QR export completed without a symbol")?;
    std::fs::create_dir_all(&config.output_dir)?;
    let path = config.output_dir.join(QR_FILE_NAME);
    std::fs::write(&path, &symbol.svg).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Write the edited surface as JSON.
///
/// # Errors
///
/// Returns an error if the surface cannot be serialized or written.
pub fn write_surface(config: &EditorConfig, surface: &CardSurface) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(&config.output_dir)?;
    let path = config.output_dir.join(SURFACE_FILE_NAME);
    std::fs::write(&path, surface.to_json()?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_core::SkipReason;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn config(dir: &Path) -> EditorConfig {
        EditorConfig {
            output_dir: dir.to_path_buf(),
            ..EditorConfig::default()
        }
    }

    #[test]
    fn missing_surface_path_uses_template() {
        let surface = load_surface(None).expect("surface");
        assert_eq!(surface.element_count(), 5);
    }

    #[test]
    fn png_bytes_become_png_data_uri() {
        let uri = image_data_uri(PNG_SIGNATURE.to_vec()).expect("uri");
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(image_data_uri(b"just text".to_vec()).is_err());
    }

    #[test]
    fn profile_image_is_replaced_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let photo = dir.path().join("me.png");
        std::fs::write(&photo, PNG_SIGNATURE).expect("write");

        let mut editor = CardEditor::new(CardSurface::template()).expect("editor");
        let outcome = replace_profile_image(&mut editor, &photo).expect("replace");
        assert_eq!(outcome, Outcome::Applied);
        assert!(matches!(
            &editor.surface().elements()[0].kind,
            ElementKind::ProfileImage { src } if src.starts_with("data:image/png")
        ));
    }

    #[test]
    fn replay_collects_outcomes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = dir.path().join("session.json");
        std::fs::write(
            &script,
            r#"[
                {"type":"command","data":{"command":"toggle_bold"}},
                {"type":"command","data":{"command":"add_text","args":{"text":"hi"}}}
            ]"#,
        )
        .expect("write");

        let mut editor = CardEditor::new(CardSurface::template()).expect("editor");
        let events = load_script(&script).expect("script");
        let outcomes = replay(&mut editor, events).expect("replay");
        assert_eq!(
            outcomes,
            vec![Outcome::Skipped(SkipReason::NoSelection), Outcome::Applied]
        );
        assert_eq!(editor.surface().element_count(), 6);
    }

    #[test]
    fn invalid_upload_url_is_rejected() {
        let config = EditorConfig {
            upload_url: Some("::not a url::".to_string()),
            ..EditorConfig::default()
        };
        assert!(build_pipeline(&config).is_err());
    }

    #[tokio::test]
    async fn download_and_surface_land_in_output_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config(dir.path());
        let mut editor = CardEditor::new(CardSurface::template()).expect("editor");

        let detail = download(&config, &mut editor).await.expect("download");
        assert!(detail.ends_with("business_card.png"));
        let json = write_surface(&config, editor.surface()).expect("surface");
        let svg = write_svg(&config, editor.surface()).expect("svg");

        assert!(dir.path().join("business_card.png").exists());
        assert!(load_surface(Some(json.as_path())).is_ok());
        assert!(std::fs::read_to_string(svg).expect("svg").starts_with("<svg"));
    }
}
