//! Cumulative translation tracking.
//!
//! Drag and resize gestures deliver per-frame deltas. The running offset
//! lives on the translated item itself, so consecutive gestures compose
//! instead of restarting from the origin.

use crate::element::{CardElement, Offset};
use crate::surface::CardSurface;

/// Something carrying a cumulative translation.
pub trait Translatable {
    /// Current offset.
    fn offset(&self) -> Offset;

    /// Replace the offset.
    fn set_offset(&mut self, offset: Offset);
}

impl Translatable for CardElement {
    fn offset(&self) -> Offset {
        self.offset
    }

    fn set_offset(&mut self, offset: Offset) {
        self.offset = offset;
    }
}

impl Translatable for CardSurface {
    fn offset(&self) -> Offset {
        self.offset
    }

    fn set_offset(&mut self, offset: Offset) {
        self.offset = offset;
    }
}

/// Add a delta to the stored offset and return the new offset.
///
/// Offsets are unbounded; items may be moved off the visible card. The
/// CSS transform is derived from the stored offset, so the two can never
/// disagree.
pub fn translate<T: Translatable + ?Sized>(target: &mut T, dx: f32, dy: f32) -> Offset {
    let previous = target.offset();
    let next = Offset::new(previous.x + dx, previous.y + dy);
    target.set_offset(next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use proptest::prelude::*;

    #[test]
    fn starts_from_zero() {
        let mut element = CardElement::new(ElementKind::Text);
        let offset = translate(&mut element, 5.0, -2.0);
        assert_eq!(offset, Offset::new(5.0, -2.0));
        assert_eq!(element.offset.css_transform(), "translate(5px, -2px)");
    }

    #[test]
    fn surface_offsets_compose() {
        let mut surface = CardSurface::default();
        translate(&mut surface, 10.0, 0.0);
        translate(&mut surface, -4.0, 3.0);
        assert_eq!(surface.offset, Offset::new(6.0, 3.0));
    }

    #[test]
    fn offsets_are_not_clamped() {
        let mut element = CardElement::new(ElementKind::Text);
        translate(&mut element, -10_000.0, 10_000.0);
        assert_eq!(element.offset, Offset::new(-10_000.0, 10_000.0));
    }

    proptest! {
        #[test]
        fn offset_is_vector_sum_of_deltas(
            deltas in prop::collection::vec((-500i32..500, -500i32..500), 0..40)
        ) {
            let mut element = CardElement::new(ElementKind::Text);
            let (mut sum_x, mut sum_y) = (0i32, 0i32);
            for (dx, dy) in &deltas {
                #[allow(clippy::cast_precision_loss)]
                translate(&mut element, *dx as f32, *dy as f32);
                sum_x += dx;
                sum_y += dy;
            }
            #[allow(clippy::cast_precision_loss)]
            let expected = Offset::new(sum_x as f32, sum_y as f32);
            prop_assert_eq!(element.offset, expected);
        }
    }
}
