//! WebAssembly bindings for card-core.
//!
//! The page translates DOM events into JSON [`EditorEvent`]s and re-renders
//! from the surface JSON after each call.

use wasm_bindgen::prelude::*;

use crate::{CardEditor, CardSurface, EditorEvent, MenuPosition, PointerTarget, StatusEvent};

/// Initialize the card editor WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Editing session handle for JavaScript.
#[wasm_bindgen]
pub struct WasmCardEditor {
    editor: CardEditor,
}

#[wasm_bindgen]
impl WasmCardEditor {
    /// Start a session on the starter template.
    ///
    /// # Errors
    ///
    /// Returns an error string if the initial snapshot fails.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmCardEditor, String> {
        let editor = CardEditor::new(CardSurface::template()).map_err(|e| e.to_string())?;
        Ok(Self { editor })
    }

    /// Start a session on a surface serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON is not a valid surface.
    #[wasm_bindgen(js_name = fromSurfaceJson)]
    pub fn from_surface_json(json: &str) -> Result<WasmCardEditor, String> {
        let surface = CardSurface::from_json(json).map_err(|e| e.to_string())?;
        let editor = CardEditor::new(surface).map_err(|e| e.to_string())?;
        Ok(Self { editor })
    }

    /// Get the current card as JSON.
    #[wasm_bindgen(js_name = getSurfaceJson)]
    #[must_use]
    pub fn get_surface_json(&self) -> String {
        self.editor.surface().to_json().unwrap_or_default()
    }

    /// Apply one event given as JSON and return the outcome as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the event cannot be parsed or applied.
    #[wasm_bindgen(js_name = handleEventJson)]
    pub fn handle_event_json(&mut self, json: &str) -> Result<String, String> {
        let event: EditorEvent = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let outcome = self.editor.handle(event).map_err(|e| e.to_string())?;
        serde_json::to_string(&outcome).map_err(|e| e.to_string())
    }

    /// Right-click. Returns `true` when the browser menu must be suppressed.
    ///
    /// # Errors
    ///
    /// Returns an error string if the target JSON is invalid.
    #[wasm_bindgen(js_name = contextMenu)]
    pub fn context_menu(&mut self, target_json: &str, x: f32, y: f32) -> Result<bool, String> {
        let target: PointerTarget =
            serde_json::from_str(target_json).map_err(|e| e.to_string())?;
        let click = self.editor.context_menu(target, MenuPosition::new(x, y));
        Ok(click.suppress_default)
    }

    /// Menu state as JSON, e.g. `{"menu":"idle"}`.
    #[wasm_bindgen(js_name = getMenuJson)]
    #[must_use]
    pub fn get_menu_json(&self) -> String {
        serde_json::to_string(&self.editor.menus().state()).unwrap_or_default()
    }

    /// Whether an element is being dragged or is still gliding.
    #[wasm_bindgen(js_name = isAnimating)]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.editor.engine().is_dragging() || self.editor.engine().is_gliding()
    }

    /// Number of undoable snapshots.
    #[wasm_bindgen(js_name = historyLength)]
    #[must_use]
    pub fn history_length(&self) -> usize {
        self.editor.history().len()
    }

    /// Take pending status messages as a JSON array.
    #[wasm_bindgen(js_name = drainStatusJson)]
    pub fn drain_status_json(&mut self) -> String {
        let events: Vec<StatusEvent> = self.editor.drain_status();
        serde_json::to_string(&events).unwrap_or_default()
    }
}
