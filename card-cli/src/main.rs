//! # Cardsmith CLI
//!
//! Renders, edits and exports business cards from the command line.

use card_cli::session;
use card_cli::{CliArgs, CliCommand, EditorConfig};
use card_core::{CardEditor, StatusLevel};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,card_core=debug,card_export=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format in production (RUST_LOG_FORMAT=json)
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = EditorConfig::from(&args);
    tracing::info!(
        "Writing exports to {} (QR size {}px)",
        config.output_dir.display(),
        config.qr_size
    );

    match args.command {
        CliCommand::Render { surface, svg } => {
            let mut editor = CardEditor::new(session::load_surface(surface.as_deref())?)?;
            if svg {
                let path = session::write_svg(&config, editor.surface())?;
                tracing::info!("SVG written to {}", path.display());
            }
            session::download(&config, &mut editor).await?;
            report(&mut editor);
        }
        CliCommand::Replay {
            script,
            surface,
            profile_image,
            download,
            qr,
        } => {
            let mut editor = CardEditor::new(session::load_surface(surface.as_deref())?)?;
            if let Some(path) = profile_image {
                let outcome = session::replace_profile_image(&mut editor, &path)?;
                tracing::info!("Profile image from {}: {outcome:?}", path.display());
            }

            let events = session::load_script(&script)?;
            let outcomes = session::replay(&mut editor, events)?;
            let applied = outcomes.iter().filter(|o| o.is_applied()).count();
            tracing::info!(
                "Replayed {} events ({applied} applied, {} snapshots in history)",
                outcomes.len(),
                editor.history().len()
            );

            let path = session::write_surface(&config, editor.surface())?;
            tracing::info!("Edited card written to {}", path.display());
            if download {
                session::download(&config, &mut editor).await?;
            }
            if qr {
                let path = session::export_qr(&config, &mut editor).await?;
                tracing::info!("QR code written to {}", path.display());
            }
            report(&mut editor);
        }
        CliCommand::Qr { surface } => {
            let mut editor = CardEditor::new(session::load_surface(surface.as_deref())?)?;
            let path = session::export_qr(&config, &mut editor).await?;
            tracing::info!("QR code written to {}", path.display());
            report(&mut editor);
        }
    }

    Ok(())
}

/// Print status messages the way a page would flash them.
fn report(editor: &mut CardEditor) {
    for event in editor.drain_status() {
        match event.level {
            StatusLevel::Info => println!("{}", event.message),
            StatusLevel::Warning | StatusLevel::Error => eprintln!("{}", event.message),
        }
    }
}
