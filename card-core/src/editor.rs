//! The editing session: one card, its menus, gestures and history.
//!
//! [`CardEditor`] owns every piece of mutable editing state and is created
//! once per session. Control values (font pickers, size fields, text
//! inputs) are passed into each action; the editor never looks anything up
//! on its own.

use crate::data_uri::DataUri;
use crate::element::{DividerOrientation, ElementId, ElementKind, Offset};
use crate::event::{
    Command, CustomThemeControls, EditorEvent, ElementRef, FontControls, PointerTarget,
    ResizeControls,
};
use crate::factory::{self, SocialPreset};
use crate::history::HistoryTracker;
use crate::interaction::{Edges, InteractionConfig, InteractionEngine};
use crate::menu::{ClickTarget, MenuController, MenuPosition, RightClick};
use crate::status::{Outcome, SkipReason, StatusChannel, StatusEvent};
use crate::style::{Dimension, ElementStyle};
use crate::surface::CardSurface;
use crate::text_edit::TextEditor;
use crate::theme::ThemeClass;
use crate::{CardError, CardResult};

/// What a double-click asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoubleClickAction {
    /// An input replaced the element's content; focus it.
    EditText(ElementId),
    /// Open an image-only file picker for this element.
    PickImage(ElementId),
    /// Nothing to do.
    Ignored,
}

/// Which emphasis flag a toggle flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Bold,
    Italic,
    Underline,
}

impl Emphasis {
    fn flag(self, style: &mut ElementStyle) -> &mut bool {
        match self {
            Self::Bold => &mut style.bold,
            Self::Italic => &mut style.italic,
            Self::Underline => &mut style.underline,
        }
    }
}

/// A business card editing session.
#[derive(Debug)]
pub struct CardEditor {
    surface: CardSurface,
    menus: MenuController,
    text: TextEditor,
    engine: InteractionEngine,
    history: HistoryTracker,
    status: StatusChannel,
}

impl CardEditor {
    /// Start a session on `surface`, capturing it as the initial state.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be serialized.
    pub fn new(surface: CardSurface) -> CardResult<Self> {
        Self::with_config(surface, InteractionConfig::default())
    }

    /// Start a session with custom gesture tunables.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be serialized.
    pub fn with_config(surface: CardSurface, config: InteractionConfig) -> CardResult<Self> {
        let history = HistoryTracker::new(&surface)?;
        Ok(Self {
            surface,
            menus: MenuController::new(),
            text: TextEditor::new(),
            engine: InteractionEngine::new(config),
            history,
            status: StatusChannel::new(),
        })
    }

    /// The card being edited.
    #[must_use]
    pub fn surface(&self) -> &CardSurface {
        &self.surface
    }

    /// Menu visibility and selection.
    #[must_use]
    pub fn menus(&self) -> &MenuController {
        &self.menus
    }

    /// Snapshot history.
    #[must_use]
    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    /// In-place text editor.
    #[must_use]
    pub fn text_editor(&self) -> &TextEditor {
        &self.text
    }

    /// Gesture engine.
    #[must_use]
    pub fn engine(&self) -> &InteractionEngine {
        &self.engine
    }

    /// Status messages waiting to be shown.
    #[must_use]
    pub fn status(&self) -> &StatusChannel {
        &self.status
    }

    /// Status channel for collaborators reporting on this session.
    pub fn status_mut(&mut self) -> &mut StatusChannel {
        &mut self.status
    }

    /// Take every pending status message.
    pub fn drain_status(&mut self) -> Vec<StatusEvent> {
        self.status.drain()
    }

    /// Resolve an element reference against the current card.
    #[must_use]
    pub fn resolve(&self, element: ElementRef) -> Option<ElementId> {
        match element {
            ElementRef::Index(index) => self.surface.elements().get(index).map(|e| e.id),
            ElementRef::Id(id) => self.surface.get_element(id).map(|e| e.id),
        }
    }

    /// Classify a pointer target for the menu state machine. Non-editable
    /// elements count as the card surface they sit on.
    #[must_use]
    pub fn classify(&self, target: PointerTarget) -> ClickTarget {
        match target {
            PointerTarget::Element(element) => self
                .resolve(element)
                .and_then(|id| self.surface.get_element(id))
                .map_or(ClickTarget::Surface, |e| {
                    if e.gestures().editable {
                        ClickTarget::Editable(e.id)
                    } else {
                        ClickTarget::Surface
                    }
                }),
            PointerTarget::Surface => ClickTarget::Surface,
            PointerTarget::Outside => ClickTarget::Outside,
        }
    }

    // ------------------------------------------------------------------
    // Menus
    // ------------------------------------------------------------------

    /// Right-click at viewport position `at`.
    pub fn context_menu(&mut self, target: PointerTarget, at: MenuPosition) -> RightClick {
        let target = self.classify(target);
        self.menus.right_click(target, at)
    }

    /// Left-click; closes both menus unless it landed inside one.
    pub fn click(&mut self, inside_menu: bool) {
        self.menus.left_click(inside_menu);
    }

    /// Apply family, size and color to the selected element.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn apply_font(&mut self, controls: &FontControls) -> CardResult<Outcome> {
        let Some(element) = self.selected_mut() else {
            return Ok(Outcome::Skipped(SkipReason::NoSelection));
        };
        let size = Dimension::parse(&controls.size);
        element.style.font_family = Some(controls.family.clone());
        element.style.font_size = Some(size.clone());
        element.style.color = Some(controls.color.clone());
        if !size.is_numeric() {
            self.status
                .warn(format!("Font size \"{}\" is not a number", controls.size));
        }
        self.menus.close_context_menu();
        self.record()?;
        Ok(Outcome::Applied)
    }

    /// Toggle bold on the selected element.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn toggle_bold(&mut self) -> CardResult<Outcome> {
        self.toggle(Emphasis::Bold)
    }

    /// Toggle italic on the selected element.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn toggle_italic(&mut self) -> CardResult<Outcome> {
        self.toggle(Emphasis::Italic)
    }

    /// Toggle underline on the selected element.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn toggle_underline(&mut self) -> CardResult<Outcome> {
        self.toggle(Emphasis::Underline)
    }

    fn toggle(&mut self, emphasis: Emphasis) -> CardResult<Outcome> {
        let Some(element) = self.selected_mut() else {
            return Ok(Outcome::Skipped(SkipReason::NoSelection));
        };
        let flag = emphasis.flag(&mut element.style);
        *flag = !*flag;
        tracing::debug!("{emphasis:?} now {} on {}", *flag, element.id);
        self.menus.close_context_menu();
        self.record()?;
        Ok(Outcome::Applied)
    }

    /// Remove the selected element from the card.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn delete_selected(&mut self) -> CardResult<Outcome> {
        let Some(id) = self.menus.selection() else {
            return Ok(Outcome::Skipped(SkipReason::NoSelection));
        };
        match self.surface.remove_element(&id) {
            Ok(_) => {}
            Err(CardError::ElementNotFound(_)) => {
                self.menus.forget(id);
                return Ok(Outcome::Skipped(SkipReason::NoSelection));
            }
            Err(e) => return Err(e),
        }
        if self.text.active().is_some_and(|s| s.target() == id) {
            self.text.abandon();
        }
        self.menus.forget(id);
        self.menus.close_context_menu();
        tracing::debug!("Deleted element {id}");
        self.record()?;
        Ok(Outcome::Applied)
    }

    /// Resize the card from the resize menu. Empty fields leave their
    /// dimension alone; other input is used without validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn resize_card(&mut self, controls: &ResizeControls) -> CardResult<Outcome> {
        if !controls.width.is_empty() {
            self.surface.width = self.parse_dimension("width", &controls.width);
        }
        if !controls.height.is_empty() {
            self.surface.height = self.parse_dimension("height", &controls.height);
        }
        self.menus.close_resize_menu();
        self.record()?;
        Ok(Outcome::Applied)
    }

    fn parse_dimension(&mut self, name: &str, input: &str) -> Dimension {
        let dimension = Dimension::parse(input);
        if !dimension.is_numeric() {
            self.status
                .warn(format!("Card {name} \"{input}\" is not a number"));
        }
        dimension
    }

    // ------------------------------------------------------------------
    // Themes
    // ------------------------------------------------------------------

    /// Switch the theme class. An empty name removes the theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn select_theme(&mut self, name: &str) -> CardResult<Outcome> {
        let class = if name.trim().is_empty() {
            None
        } else {
            match name.parse::<ThemeClass>() {
                Ok(class) => Some(class),
                Err(e) => {
                    self.status.warn(e.to_string());
                    return Ok(Outcome::Skipped(SkipReason::UnknownTheme));
                }
            }
        };
        self.surface.theme.select(class);
        self.record()?;
        Ok(Outcome::Applied)
    }

    /// Apply custom background and text colors to the card.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn apply_custom_theme(&mut self, controls: &CustomThemeControls) -> CardResult<Outcome> {
        self.surface
            .theme
            .set_custom(controls.background.clone(), controls.text.clone());
        self.record()?;
        Ok(Outcome::Applied)
    }

    // ------------------------------------------------------------------
    // New elements
    // ------------------------------------------------------------------

    /// Add a free-text element from the text input value.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn add_text(&mut self, input: &str) -> CardResult<Outcome> {
        let Some(element) = factory::text_element(&self.surface, input) else {
            return Ok(Outcome::Skipped(SkipReason::EmptyInput));
        };
        self.surface.add_element(element);
        self.record()?;
        Ok(Outcome::Applied)
    }

    /// Add a social network label.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn add_social(&mut self, preset: SocialPreset) -> CardResult<Outcome> {
        let element = factory::icon_label(&self.surface, preset);
        self.surface.add_element(element);
        self.record()?;
        Ok(Outcome::Applied)
    }

    /// Add a divider line.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn add_divider(&mut self, orientation: DividerOrientation) -> CardResult<Outcome> {
        let element = factory::divider(&self.surface, orientation);
        self.surface.add_element(element);
        self.record()?;
        Ok(Outcome::Applied)
    }

    // ------------------------------------------------------------------
    // Double-click editing
    // ------------------------------------------------------------------

    /// Double-click on an element. Any open text edit is committed first,
    /// as the click moves focus away from its input.
    ///
    /// # Errors
    ///
    /// Returns an error if committing the previous edit fails to record.
    pub fn double_click(&mut self, target: ElementId) -> CardResult<DoubleClickAction> {
        if self.text.active().is_some() {
            self.blur()?;
        }
        let Some(element) = self.surface.get_element_mut(target) else {
            return Ok(DoubleClickAction::Ignored);
        };
        let gestures = element.gestures();
        if gestures.text_editable {
            self.text.begin(element)?;
            Ok(DoubleClickAction::EditText(target))
        } else if gestures.image_replaceable {
            Ok(DoubleClickAction::PickImage(target))
        } else {
            Ok(DoubleClickAction::Ignored)
        }
    }

    /// The in-place input changed.
    pub fn text_input(&mut self, value: &str) -> Outcome {
        match self.text.set_input(value) {
            Ok(()) => Outcome::Applied,
            Err(_) => Outcome::Skipped(SkipReason::NoActiveEdit),
        }
    }

    /// The in-place input lost focus: commit it.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn blur(&mut self) -> CardResult<Outcome> {
        let Some(target) = self.text.active().map(|s| s.target()) else {
            return Ok(Outcome::Skipped(SkipReason::NoActiveEdit));
        };
        let Some(element) = self.surface.get_element_mut(target) else {
            self.text.abandon();
            return Ok(Outcome::Skipped(SkipReason::UnknownElement));
        };
        self.text.commit(element)?;
        self.record()?;
        Ok(Outcome::Applied)
    }

    /// Replace the profile picture with an image file read as a data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn replace_profile_image(
        &mut self,
        target: ElementId,
        data_uri: &str,
    ) -> CardResult<Outcome> {
        let Some(element) = self.surface.get_element_mut(target) else {
            return Ok(Outcome::Skipped(SkipReason::UnknownElement));
        };
        let ElementKind::ProfileImage { src } = &mut element.kind else {
            return Ok(Outcome::Skipped(SkipReason::Unsupported));
        };
        if let Err(e) = DataUri::parse_image(data_uri) {
            self.status.warn(format!("Profile image rejected: {e}"));
            return Ok(Outcome::Skipped(SkipReason::InvalidImage));
        }
        *src = data_uri.to_string();
        self.record()?;
        Ok(Outcome::Applied)
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    /// Pointer pressed on an element.
    pub fn drag_start(&mut self, target: ElementId, now_ms: u64) -> Outcome {
        if self.engine.begin_drag(&self.surface, target, now_ms) {
            Outcome::Applied
        } else {
            Outcome::Skipped(SkipReason::Unsupported)
        }
    }

    /// Pointer moved while pressed. Returns the dragged element's offset.
    pub fn drag_move(&mut self, dx: f32, dy: f32, now_ms: u64) -> Option<Offset> {
        self.engine.drag_move(&mut self.surface, dx, dy, now_ms)
    }

    /// Pointer released.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn drag_end(&mut self, now_ms: u64) -> CardResult<Outcome> {
        if !self.engine.end_drag(now_ms) {
            return Ok(Outcome::Skipped(SkipReason::NoMovement));
        }
        if !self.engine.is_gliding() {
            self.record()?;
        }
        Ok(Outcome::Applied)
    }

    /// Advance inertial motion. History is recorded once the motion stops.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn tick(&mut self, now_ms: u64) -> CardResult<Outcome> {
        let was_gliding = self.engine.is_gliding();
        let ended = self.engine.tick(&mut self.surface, now_ms);
        if ended > 0 && !self.engine.is_gliding() {
            self.record()?;
        }
        Ok(if was_gliding {
            Outcome::Applied
        } else {
            Outcome::Skipped(SkipReason::NoMovement)
        })
    }

    /// Card edges dragged.
    pub fn resize_move(&mut self, edges: Edges, dx: f32, dy: f32) -> Outcome {
        if edges.is_empty() {
            return Outcome::Skipped(SkipReason::NoMovement);
        }
        self.engine.resize_surface(&mut self.surface, edges, dx, dy);
        Outcome::Applied
    }

    /// Card edge released.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot fails.
    pub fn resize_end(&mut self) -> CardResult<Outcome> {
        self.record()?;
        Ok(Outcome::Applied)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Restore the session-start content and dimensions, clearing history.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial snapshot cannot be restored.
    pub fn reset(&mut self) -> CardResult<Outcome> {
        self.text.abandon();
        self.engine.cancel();
        self.menus.close_all();
        self.history.reset_to_initial(&mut self.surface)?;
        self.clear_editing_flags();
        Ok(Outcome::Applied)
    }

    /// Revert the most recent change.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot cannot be restored.
    pub fn undo(&mut self) -> CardResult<Outcome> {
        self.text.abandon();
        if self.history.undo_last_change(&mut self.surface)? {
            self.engine.cancel();
            self.clear_editing_flags();
            Ok(Outcome::Applied)
        } else {
            Ok(Outcome::Skipped(SkipReason::NothingToUndo))
        }
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Apply one input event.
    ///
    /// # Errors
    ///
    /// Returns an error if a history snapshot cannot be written or restored.
    pub fn handle(&mut self, event: EditorEvent) -> CardResult<Outcome> {
        match event {
            EditorEvent::ContextMenu { target, x, y } => {
                let click = self.context_menu(target, MenuPosition::new(x, y));
                Ok(if click.opened.is_some() {
                    Outcome::Applied
                } else {
                    Outcome::Skipped(SkipReason::Unsupported)
                })
            }
            EditorEvent::Click { inside_menu } => {
                self.click(inside_menu);
                Ok(Outcome::Applied)
            }
            EditorEvent::DoubleClick { target } => {
                let Some(id) = self.resolve(target) else {
                    return Ok(Outcome::Skipped(SkipReason::UnknownElement));
                };
                Ok(match self.double_click(id)? {
                    DoubleClickAction::EditText(_) | DoubleClickAction::PickImage(_) => {
                        Outcome::Applied
                    }
                    DoubleClickAction::Ignored => Outcome::Skipped(SkipReason::Unsupported),
                })
            }
            EditorEvent::DragStart {
                target,
                timestamp_ms,
            } => Ok(match self.resolve(target) {
                Some(id) => self.drag_start(id, timestamp_ms),
                None => Outcome::Skipped(SkipReason::UnknownElement),
            }),
            EditorEvent::DragMove {
                dx,
                dy,
                timestamp_ms,
            } => Ok(match self.drag_move(dx, dy, timestamp_ms) {
                Some(_) => Outcome::Applied,
                None => Outcome::Skipped(SkipReason::NoMovement),
            }),
            EditorEvent::DragEnd { timestamp_ms } => self.drag_end(timestamp_ms),
            EditorEvent::ResizeMove { edges, dx, dy } => Ok(self.resize_move(edges, dx, dy)),
            EditorEvent::ResizeEnd => self.resize_end(),
            EditorEvent::TextInput { value } => Ok(self.text_input(&value)),
            EditorEvent::Blur => self.blur(),
            EditorEvent::Tick { timestamp_ms } => self.tick(timestamp_ms),
            EditorEvent::Command(command) => self.execute(command),
        }
    }

    /// Run a toolbar or menu command.
    ///
    /// # Errors
    ///
    /// Returns an error if a history snapshot cannot be written or restored.
    pub fn execute(&mut self, command: Command) -> CardResult<Outcome> {
        match command {
            Command::ApplyFont(controls) => self.apply_font(&controls),
            Command::ToggleBold => self.toggle_bold(),
            Command::ToggleItalic => self.toggle_italic(),
            Command::ToggleUnderline => self.toggle_underline(),
            Command::DeleteSelected => self.delete_selected(),
            Command::ResizeCard(controls) => self.resize_card(&controls),
            Command::SelectTheme { theme } => self.select_theme(&theme),
            Command::ApplyCustomTheme(controls) => self.apply_custom_theme(&controls),
            Command::AddText { text } => self.add_text(&text),
            Command::AddSocial { preset } => self.add_social(preset),
            Command::AddDivider { orientation } => self.add_divider(orientation),
            Command::ReplaceProfileImage { target, data_uri } => match self.resolve(target) {
                Some(id) => self.replace_profile_image(id, &data_uri),
                None => Ok(Outcome::Skipped(SkipReason::UnknownElement)),
            },
            Command::Reset => self.reset(),
            Command::Undo => self.undo(),
        }
    }

    fn selected_mut(&mut self) -> Option<&mut crate::element::CardElement> {
        let id = self.menus.selection()?;
        self.surface.get_element_mut(id)
    }

    fn clear_editing_flags(&mut self) {
        for element in self.surface.elements_mut() {
            element.editing = false;
        }
    }

    fn record(&mut self) -> CardResult<()> {
        self.history.record(&self.surface)
    }
}
