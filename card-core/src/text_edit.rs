//! In-place text editing.
//!
//! Double-clicking a text-bearing element swaps its rendered content for a
//! single-line input seeded with the current text. Losing focus always
//! commits; there is no cancel path.

use crate::element::{CardElement, ElementContent, ElementId};
use crate::{CardError, CardResult};

/// An edit in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditSession {
    target: ElementId,
    icon: Option<String>,
    input: String,
}

impl TextEditSession {
    /// Element being edited.
    #[must_use]
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Leading icon captured when the edit began.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Current input value.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Drives the double-click / blur editing protocol.
#[derive(Debug, Default)]
pub struct TextEditor {
    active: Option<TextEditSession>,
}

impl TextEditor {
    /// Create an idle editor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an input on `element`, seeded with its trimmed text.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Unsupported`] if the element has no text to edit.
    pub fn begin(&mut self, element: &mut CardElement) -> CardResult<&TextEditSession> {
        if !element.gestures().text_editable {
            return Err(CardError::Unsupported {
                id: element.id.to_string(),
                operation: "text edit",
            });
        }
        element.editing = true;
        tracing::debug!("Editing text of {}", element.id);
        let session = self.active.insert(TextEditSession {
            target: element.id,
            icon: element.content.icon.clone(),
            input: element.content.text.trim().to_string(),
        });
        Ok(&*session)
    }

    /// Replace the input value. Line breaks are dropped: the input is
    /// single-line.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::NoActiveEdit`] if no edit is open.
    pub fn set_input(&mut self, value: &str) -> CardResult<()> {
        let session = self.active.as_mut().ok_or(CardError::NoActiveEdit)?;
        session.input = value.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        Ok(())
    }

    /// Focus left the input: write `{icon}{input}` back into the element.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::NoActiveEdit`] if no edit is open, or
    /// [`CardError::ElementNotFound`] if `element` is not the edited one.
    pub fn commit(&mut self, element: &mut CardElement) -> CardResult<ElementContent> {
        let session = self.active.take().ok_or(CardError::NoActiveEdit)?;
        if session.target != element.id {
            let target = session.target.to_string();
            self.active = Some(session);
            return Err(CardError::ElementNotFound(target));
        }
        element.content = ElementContent {
            icon: session.icon,
            text: session.input,
        };
        element.editing = false;
        Ok(element.content.clone())
    }

    /// Drop an edit whose element disappeared.
    pub fn abandon(&mut self) -> Option<TextEditSession> {
        self.active.take()
    }

    /// The open edit, if any.
    #[must_use]
    pub fn active(&self) -> Option<&TextEditSession> {
        self.active.as_ref()
    }
}
