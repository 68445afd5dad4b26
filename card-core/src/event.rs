//! Input events and commands understood by the card editor.
//!
//! Hosts translate DOM events into [`EditorEvent`]s. Events serialize to
//! JSON, so a whole editing session can be recorded and replayed.

use serde::{Deserialize, Serialize};

use crate::element::{DividerOrientation, ElementId};
use crate::factory::SocialPreset;
use crate::interaction::Edges;

/// Reference to an element, by ID or by position in the element sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementRef {
    /// Zero-based index into the element sequence.
    Index(usize),
    /// Element ID.
    Id(ElementId),
}

impl From<ElementId> for ElementRef {
    fn from(id: ElementId) -> Self {
        Self::Id(id)
    }
}

/// What the pointer was over when a button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "on", content = "element", rename_all = "snake_case")]
pub enum PointerTarget {
    /// An element on the card.
    Element(ElementRef),
    /// The bare card surface.
    Surface,
    /// Somewhere outside the card.
    Outside,
}

/// Font controls of the context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontControls {
    /// Font family selector value.
    pub family: String,
    /// Font size field value, in pixels.
    pub size: String,
    /// Color picker value.
    pub color: String,
}

/// Width and height fields of the resize menu. Empty fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeControls {
    /// Width field value.
    #[serde(default)]
    pub width: String,
    /// Height field value.
    #[serde(default)]
    pub height: String,
}

/// Color pickers of the custom theme panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomThemeControls {
    /// Background color.
    pub background: String,
    /// Text color.
    pub text: String,
}

/// Toolbar and menu commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "snake_case")]
pub enum Command {
    /// Apply font family, size and color to the selection.
    ApplyFont(FontControls),
    /// Toggle bold on the selection.
    ToggleBold,
    /// Toggle italic on the selection.
    ToggleItalic,
    /// Toggle underline on the selection.
    ToggleUnderline,
    /// Remove the selection from the card.
    DeleteSelected,
    /// Resize the card from the resize menu fields.
    ResizeCard(ResizeControls),
    /// Switch theme class; an empty name removes the theme.
    SelectTheme {
        /// Theme class name, e.g. `theme-dark`.
        theme: String,
    },
    /// Apply custom background and text colors.
    ApplyCustomTheme(CustomThemeControls),
    /// Add a free-text element.
    AddText {
        /// Text input value.
        text: String,
    },
    /// Add a social network label.
    AddSocial {
        /// Which network.
        preset: SocialPreset,
    },
    /// Add a divider line.
    AddDivider {
        /// Line orientation.
        orientation: DividerOrientation,
    },
    /// Replace the profile picture with an image read from a file.
    ReplaceProfileImage {
        /// The profile image element.
        target: ElementRef,
        /// File contents as a data URI.
        data_uri: String,
    },
    /// Restore the card to its session-start state.
    Reset,
    /// Revert the most recent change.
    Undo,
}

/// All input the editor can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Right-click.
    ContextMenu {
        /// What was under the cursor.
        target: PointerTarget,
        /// Cursor X (`clientX`).
        x: f32,
        /// Cursor Y (`clientY`).
        y: f32,
    },
    /// Left-click anywhere.
    Click {
        /// Whether the click landed inside one of the floating menus.
        #[serde(default)]
        inside_menu: bool,
    },
    /// Double-click on an element.
    DoubleClick {
        /// Element under the cursor.
        target: ElementRef,
    },
    /// Pointer pressed on a draggable element.
    DragStart {
        /// Element under the cursor.
        target: ElementRef,
        /// Event time in milliseconds.
        timestamp_ms: u64,
    },
    /// Pointer moved while pressed.
    DragMove {
        /// Horizontal delta since the previous move.
        dx: f32,
        /// Vertical delta since the previous move.
        dy: f32,
        /// Event time in milliseconds.
        timestamp_ms: u64,
    },
    /// Pointer released.
    DragEnd {
        /// Event time in milliseconds.
        timestamp_ms: u64,
    },
    /// Card edge dragged.
    ResizeMove {
        /// Grabbed edges.
        edges: Edges,
        /// Horizontal delta.
        dx: f32,
        /// Vertical delta.
        dy: f32,
    },
    /// Card edge released.
    ResizeEnd,
    /// The in-place text input changed.
    TextInput {
        /// New input value.
        value: String,
    },
    /// The in-place text input lost focus.
    Blur,
    /// Animation frame.
    Tick {
        /// Frame time in milliseconds.
        timestamp_ms: u64,
    },
    /// A toolbar or menu command.
    Command(Command),
}

/// Current time in milliseconds since the Unix epoch.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Timestamps won't exceed u64 for billions of years
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_refs_accept_indices_and_ids() {
        let by_index: ElementRef = serde_json::from_str("2").expect("index");
        assert_eq!(by_index, ElementRef::Index(2));

        let id = ElementId::new();
        let json = serde_json::to_string(&ElementRef::Id(id)).expect("serialize");
        let by_id: ElementRef = serde_json::from_str(&json).expect("id");
        assert_eq!(by_id, ElementRef::Id(id));
    }

    #[test]
    fn script_events_parse() {
        let json = r#"[
            {"type":"context_menu","data":{"target":{"on":"element","element":3},"x":10.0,"y":20.0}},
            {"type":"command","data":{"command":"toggle_bold"}},
            {"type":"click","data":{}},
            {"type":"command","data":{"command":"resize_card","args":{"width":"300"}}},
            {"type":"command","data":{"command":"add_social","args":{"preset":"linkedin"}}},
            {"type":"resize_end"},
            {"type":"blur"}
        ]"#;
        let events: Vec<EditorEvent> = serde_json::from_str(json).expect("parse script");
        assert_eq!(events.len(), 7);
        assert_eq!(
            events[1],
            EditorEvent::Command(Command::ToggleBold)
        );
        assert!(matches!(
            &events[3],
            EditorEvent::Command(Command::ResizeCard(ResizeControls { width, height }))
                if width == "300" && height.is_empty()
        ));
    }

    #[test]
    fn surface_target_has_no_element() {
        let json = serde_json::to_string(&PointerTarget::Surface).expect("serialize");
        assert_eq!(json, r#"{"on":"surface"}"#);
    }
}
