//! Bounded snapshot history with reset and undo.

use std::collections::VecDeque;

use crate::surface::{CardSurface, Snapshot};
use crate::CardResult;

/// Snapshots kept before the oldest is evicted.
pub const MAX_HISTORY: usize = 20;

/// Records a snapshot after every mutating action.
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    /// Snapshots, oldest first. The newest reflects the current card.
    entries: VecDeque<Snapshot>,
    /// Card as it was when the session started.
    initial: Snapshot,
    capacity: usize,
    evicted: usize,
}

impl HistoryTracker {
    /// Capture the session-start state of `surface`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be serialized.
    pub fn new(surface: &CardSurface) -> CardResult<Self> {
        Self::with_capacity(surface, MAX_HISTORY)
    }

    /// Like [`new`](Self::new) with a custom bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be serialized.
    pub fn with_capacity(surface: &CardSurface, capacity: usize) -> CardResult<Self> {
        Ok(Self {
            entries: VecDeque::with_capacity(capacity + 1),
            initial: surface.snapshot()?,
            capacity: capacity.max(1),
            evicted: 0,
        })
    }

    /// Append a snapshot of the current card, evicting the oldest beyond
    /// the bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be serialized.
    pub fn record(&mut self, surface: &CardSurface) -> CardResult<()> {
        self.entries.push_back(surface.snapshot()?);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.evicted += 1;
        }
        Ok(())
    }

    /// Restore the session-start elements and dimensions and clear history.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial snapshot cannot be parsed.
    pub fn reset_to_initial(&mut self, surface: &mut CardSurface) -> CardResult<()> {
        surface.restore_content(&self.initial)?;
        self.entries.clear();
        self.evicted = 0;
        tracing::info!("Reset to initial state.");
        Ok(())
    }

    /// Undo the newest change. Returns `false` when there is nothing left to
    /// undo.
    ///
    /// The card goes back to the previous snapshot, or to the initial state
    /// once the first recorded change is undone. After evictions the oldest
    /// retained snapshot is the floor.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot cannot be parsed.
    pub fn undo_last_change(&mut self, surface: &mut CardSurface) -> CardResult<bool> {
        if self.entries.len() > 1 {
            self.entries.pop_back();
            if let Some(previous) = self.entries.back() {
                surface.restore(previous)?;
            }
            return Ok(true);
        }
        if self.entries.len() == 1 && self.evicted == 0 {
            self.entries.clear();
            surface.restore(&self.initial)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshot is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained snapshots, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }

    /// Snapshot captured at session start.
    #[must_use]
    pub fn initial(&self) -> &Snapshot {
        &self.initial
    }

    /// Maximum number of retained snapshots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{CardElement, ElementContent, ElementKind};
    use crate::style::Dimension;
    use proptest::prelude::*;

    fn add_text(surface: &mut CardSurface, text: &str) {
        surface.add_element(
            CardElement::new(ElementKind::Text).with_content(ElementContent::text(text)),
        );
    }

    #[test]
    fn record_appends_snapshots() {
        let mut surface = CardSurface::default();
        let mut history = HistoryTracker::new(&surface).expect("history");
        assert!(history.is_empty());

        add_text(&mut surface, "one");
        history.record(&surface).expect("record");
        assert_eq!(history.len(), 1);
        assert!(history
            .entries()
            .next()
            .is_some_and(|s| s.as_str().contains("one")));
    }

    #[test]
    fn reset_restores_initial_content_and_clears() {
        let mut surface = CardSurface::template();
        let original = surface.elements().to_vec();
        let mut history = HistoryTracker::new(&surface).expect("history");

        for i in 0..30 {
            add_text(&mut surface, &format!("row {i}"));
            surface.width = Dimension::Px(400.0 + i as f32);
            history.record(&surface).expect("record");
        }

        history.reset_to_initial(&mut surface).expect("reset");
        assert_eq!(surface.elements(), original.as_slice());
        assert_eq!(surface.width, Dimension::Px(350.0));
        assert!(history.is_empty());
    }

    #[test]
    fn undo_steps_back_through_snapshots() {
        let mut surface = CardSurface::default();
        let mut history = HistoryTracker::new(&surface).expect("history");

        add_text(&mut surface, "a");
        history.record(&surface).expect("record");
        add_text(&mut surface, "b");
        history.record(&surface).expect("record");

        assert!(history.undo_last_change(&mut surface).expect("undo"));
        assert_eq!(surface.element_count(), 1);
        assert!(history.undo_last_change(&mut surface).expect("undo"));
        assert!(surface.is_empty());
        assert!(!history.undo_last_change(&mut surface).expect("undo"));
    }

    #[test]
    fn undo_stops_at_oldest_retained_after_eviction() {
        let mut surface = CardSurface::default();
        let mut history = HistoryTracker::with_capacity(&surface, 2).expect("history");
        for text in ["a", "b", "c"] {
            add_text(&mut surface, text);
            history.record(&surface).expect("record");
        }

        assert!(history.undo_last_change(&mut surface).expect("undo"));
        assert_eq!(surface.element_count(), 2);
        assert!(!history.undo_last_change(&mut surface).expect("undo"));
        assert_eq!(surface.element_count(), 2);
    }

    proptest! {
        #[test]
        fn history_keeps_most_recent_twenty(actions in 0usize..60) {
            let mut surface = CardSurface::default();
            let mut history = HistoryTracker::new(&surface).expect("history");
            let mut all = Vec::new();
            for i in 0..actions {
                add_text(&mut surface, &format!("item {i}"));
                history.record(&surface).expect("record");
                all.push(surface.snapshot().expect("snapshot"));
                prop_assert!(history.len() <= MAX_HISTORY);
            }
            let expected: Vec<_> = all.iter().skip(all.len().saturating_sub(MAX_HISTORY)).collect();
            let retained: Vec<_> = history.entries().collect();
            prop_assert_eq!(retained, expected);
        }
    }
}
