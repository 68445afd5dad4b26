//! # Cardsmith Core
//!
//! Headless editing model for a single business card.
//! Compiles to WASM so a browser page can drive it with DOM events.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               card-core.wasm                │
//! ├─────────────────────────────────────────────┤
//! │  Card Surface    │  Gestures                │
//! │  - Elements      │  - Drag with inertia     │
//! │  - Styles        │  - Edge resizing         │
//! │  - Themes        │  - In-place text edit    │
//! ├─────────────────────────────────────────────┤
//! │  Menus           │  History                 │
//! │  - Context menu  │  - Bounded snapshots     │
//! │  - Resize menu   │  - Undo / reset          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! [`CardEditor`] owns the whole session. Hosts feed it [`EditorEvent`]s
//! and render [`CardSurface`] back.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod data_uri;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod factory;
pub mod history;
pub mod interaction;
pub mod menu;
pub mod status;
pub mod style;
pub mod surface;
pub mod text_edit;
pub mod theme;
pub mod transform;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use data_uri::DataUri;
pub use editor::{CardEditor, DoubleClickAction};
pub use element::{
    CardElement, DividerOrientation, ElementContent, ElementId, ElementKind, Frame, Gestures,
    Offset, Region,
};
pub use error::{CardError, CardResult};
pub use event::{
    now_ms, Command, CustomThemeControls, EditorEvent, ElementRef, FontControls, PointerTarget,
    ResizeControls,
};
pub use factory::SocialPreset;
pub use history::{HistoryTracker, MAX_HISTORY};
pub use interaction::{Edges, InteractionConfig, InteractionEngine};
pub use menu::{ClickTarget, MenuController, MenuKind, MenuPosition, MenuState, RightClick};
pub use status::{Outcome, SkipReason, StatusChannel, StatusEvent, StatusLevel};
pub use style::{Dimension, ElementStyle};
pub use surface::{CardSurface, Snapshot};
pub use text_edit::{TextEditSession, TextEditor};
pub use theme::{CustomColors, Palette, ResolvedColors, Theme, ThemeClass, UnknownTheme};
pub use transform::{translate, Translatable};

/// Card core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
