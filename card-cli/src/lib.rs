//! # Cardsmith CLI
//!
//! Command-line host for the card editor. Runs the same editing model a
//! browser page drives, fed from JSON files instead of DOM events.
//!
//! ## Usage
//!
//! ```bash
//! card-editor render --output-dir out
//! card-editor replay session.json --profile-image me.jpg --download
//! card-editor --upload-url https://img.example.com/upload qr
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `EditorConfig` - Output directory, upload endpoint and QR size
//! - `session` - Surface loading, script replay and export runs

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for card-editor.
#[derive(Debug, Clone, Parser)]
#[command(name = "card-editor")]
#[command(about = "Business card editor: render, replay and export cards")]
#[command(version)]
pub struct CliArgs {
    /// Directory exported files are written to
    #[arg(long, env = "CARD_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Upload endpoint for QR export (uses a mock uploader when unset)
    #[arg(long, env = "CARD_UPLOAD_URL")]
    pub upload_url: Option<String>,

    /// QR symbol size in pixels
    #[arg(long, env = "CARD_QR_SIZE", default_value = "128")]
    pub qr_size: u32,

    /// Raster scale factor (2.0 for retina)
    #[arg(long, default_value = "1.0")]
    pub scale: f32,

    /// What to do
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Render a card to `business_card.png`
    Render {
        /// Card surface JSON (defaults to the starter template)
        #[arg(long)]
        surface: Option<PathBuf>,
        /// Also write the SVG intermediate
        #[arg(long)]
        svg: bool,
    },
    /// Replay a JSON array of editor events against a card
    Replay {
        /// Event script
        script: PathBuf,
        /// Card surface JSON (defaults to the starter template)
        #[arg(long)]
        surface: Option<PathBuf>,
        /// Image file to use as the profile picture
        #[arg(long)]
        profile_image: Option<PathBuf>,
        /// Save the edited card as PNG
        #[arg(long)]
        download: bool,
        /// Upload the edited card and write its QR code
        #[arg(long)]
        qr: bool,
    },
    /// Upload a card and write a QR code pointing at it
    Qr {
        /// Card surface JSON (defaults to the starter template)
        #[arg(long)]
        surface: Option<PathBuf>,
    },
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Directory exported files are written to.
    pub output_dir: PathBuf,
    /// Upload endpoint; `None` selects the mock uploader.
    pub upload_url: Option<String>,
    /// QR symbol size in pixels.
    pub qr_size: u32,
    /// Raster scale factor.
    pub scale: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            upload_url: None,
            qr_size: card_export::DEFAULT_QR_SIZE,
            scale: 1.0,
        }
    }
}

impl From<&CliArgs> for EditorConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            output_dir: args.output_dir.clone(),
            upload_url: args.upload_url.clone(),
            qr_size: args.qr_size,
            scale: args.scale,
        }
    }
}
