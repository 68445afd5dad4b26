//! Context menus and the element selection they act on.
//!
//! Two floating menus exist: the element context menu (font, emphasis,
//! delete) and the card resize menu. At most one is visible at a time, and
//! both open at the cursor position of the right-click that opened them.

use serde::{Deserialize, Serialize};

use crate::element::ElementId;

/// Cursor position in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuPosition {
    /// Horizontal position (`clientX`).
    pub x: f32,
    /// Vertical position (`clientY`).
    pub y: f32,
}

impl MenuPosition {
    /// Create a position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What a right-click landed on, after classification by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "id", rename_all = "snake_case")]
pub enum ClickTarget {
    /// An element eligible for the context menu.
    Editable(ElementId),
    /// The card itself, or a non-editable element on it.
    Surface,
    /// Anything outside the card.
    Outside,
}

/// Which floating menu is shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "menu", rename_all = "snake_case")]
pub enum MenuState {
    /// No menu visible.
    Idle,
    /// Element context menu for `target`.
    ContextMenu {
        /// Element the menu was opened on.
        target: ElementId,
        /// Where the menu is drawn.
        at: MenuPosition,
    },
    /// Card resize menu.
    ResizeMenu {
        /// Where the menu is drawn.
        at: MenuPosition,
    },
}

/// The two menu kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuKind {
    /// Element context menu.
    Context,
    /// Card resize menu.
    Resize,
}

/// Result of a right-click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RightClick {
    /// Whether the browser's own menu must be suppressed.
    pub suppress_default: bool,
    /// Menu opened by the click, if any.
    pub opened: Option<MenuKind>,
}

/// Menu visibility plus the current selection.
///
/// Closing menus does not clear the selection: a formatting action issued
/// after an outside click still targets the element that was last
/// right-clicked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuController {
    state: MenuState,
    selection: Option<ElementId>,
}

impl Default for MenuController {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuController {
    /// Start idle with nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: MenuState::Idle,
            selection: None,
        }
    }

    /// Handle a right-click.
    pub fn right_click(&mut self, target: ClickTarget, at: MenuPosition) -> RightClick {
        match target {
            ClickTarget::Editable(id) => {
                self.selection = Some(id);
                self.state = MenuState::ContextMenu { target: id, at };
                tracing::debug!("Context menu opened on {id} at ({}, {})", at.x, at.y);
                RightClick {
                    suppress_default: true,
                    opened: Some(MenuKind::Context),
                }
            }
            ClickTarget::Surface => {
                self.state = MenuState::ResizeMenu { at };
                tracing::debug!("Resize menu opened at ({}, {})", at.x, at.y);
                RightClick {
                    suppress_default: true,
                    opened: Some(MenuKind::Resize),
                }
            }
            ClickTarget::Outside => RightClick {
                suppress_default: false,
                opened: None,
            },
        }
    }

    /// Handle a left-click. Clicks inside a menu leave it open.
    pub fn left_click(&mut self, inside_menu: bool) {
        if !inside_menu {
            self.close_all();
        }
    }

    /// Hide both menus.
    pub fn close_all(&mut self) {
        self.state = MenuState::Idle;
    }

    /// Hide the context menu if it is open.
    pub fn close_context_menu(&mut self) {
        if matches!(self.state, MenuState::ContextMenu { .. }) {
            self.state = MenuState::Idle;
        }
    }

    /// Hide the resize menu if it is open.
    pub fn close_resize_menu(&mut self) {
        if matches!(self.state, MenuState::ResizeMenu { .. }) {
            self.state = MenuState::Idle;
        }
    }

    /// Forget the selection if it refers to `id`.
    pub fn forget(&mut self, id: ElementId) {
        if self.selection == Some(id) {
            self.selection = None;
        }
        if matches!(self.state, MenuState::ContextMenu { target, .. } if target == id) {
            self.state = MenuState::Idle;
        }
    }

    /// Current menu state.
    #[must_use]
    pub const fn state(&self) -> MenuState {
        self.state
    }

    /// Visible menu, if any.
    #[must_use]
    pub const fn visible(&self) -> Option<MenuKind> {
        match self.state {
            MenuState::Idle => None,
            MenuState::ContextMenu { .. } => Some(MenuKind::Context),
            MenuState::ResizeMenu { .. } => Some(MenuKind::Resize),
        }
    }

    /// Position of the visible menu.
    #[must_use]
    pub const fn position(&self) -> Option<MenuPosition> {
        match self.state {
            MenuState::Idle => None,
            MenuState::ContextMenu { at, .. } | MenuState::ResizeMenu { at } => Some(at),
        }
    }

    /// Element the context menu actions apply to.
    #[must_use]
    pub const fn selection(&self) -> Option<ElementId> {
        self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn right_click_on_editable_opens_context_menu_at_cursor() {
        let mut menus = MenuController::new();
        let id = ElementId::new();
        let click = menus.right_click(ClickTarget::Editable(id), MenuPosition::new(120.0, 80.0));

        assert!(click.suppress_default);
        assert_eq!(click.opened, Some(MenuKind::Context));
        assert_eq!(menus.visible(), Some(MenuKind::Context));
        assert_eq!(menus.position(), Some(MenuPosition::new(120.0, 80.0)));
        assert_eq!(menus.selection(), Some(id));
    }

    #[test]
    fn right_click_on_surface_swaps_to_resize_menu() {
        let mut menus = MenuController::new();
        let id = ElementId::new();
        menus.right_click(ClickTarget::Editable(id), MenuPosition::default());
        menus.right_click(ClickTarget::Surface, MenuPosition::new(5.0, 6.0));

        assert_eq!(menus.visible(), Some(MenuKind::Resize));
        assert_eq!(menus.selection(), Some(id));
    }

    #[test]
    fn right_click_outside_keeps_browser_menu() {
        let mut menus = MenuController::new();
        let click = menus.right_click(ClickTarget::Outside, MenuPosition::default());
        assert!(!click.suppress_default);
        assert_eq!(menus.visible(), None);
    }

    #[test]
    fn outside_click_closes_menus_but_keeps_selection() {
        let mut menus = MenuController::new();
        let id = ElementId::new();
        menus.right_click(ClickTarget::Editable(id), MenuPosition::default());

        menus.left_click(true);
        assert_eq!(menus.visible(), Some(MenuKind::Context));

        menus.left_click(false);
        assert_eq!(menus.visible(), None);
        assert_eq!(menus.selection(), Some(id));
    }

    #[test]
    fn forgetting_selected_element_clears_selection() {
        let mut menus = MenuController::new();
        let id = ElementId::new();
        menus.right_click(ClickTarget::Editable(id), MenuPosition::default());
        menus.forget(id);
        assert_eq!(menus.selection(), None);
        assert_eq!(menus.visible(), None);
    }

    fn click_strategy() -> impl Strategy<Value = (u8, bool)> {
        (0u8..4, any::<bool>())
    }

    proptest! {
        #[test]
        fn visible_menu_always_matches_state(clicks in prop::collection::vec(click_strategy(), 0..50)) {
            let mut menus = MenuController::new();
            let id = ElementId::new();
            for (kind, inside) in clicks {
                match kind {
                    0 => { menus.right_click(ClickTarget::Editable(id), MenuPosition::default()); }
                    1 => { menus.right_click(ClickTarget::Surface, MenuPosition::default()); }
                    2 => { menus.right_click(ClickTarget::Outside, MenuPosition::default()); }
                    _ => menus.left_click(inside),
                }
                let context = matches!(menus.state(), MenuState::ContextMenu { .. });
                let resize = matches!(menus.state(), MenuState::ResizeMenu { .. });
                prop_assert!(!(context && resize));
                prop_assert_eq!(menus.visible().is_some(), context || resize);
            }
        }
    }
}
