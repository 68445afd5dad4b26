//! Drag and edge-resize gestures.
//!
//! Elements are dragged by their own kind's [`Gestures`](crate::element::Gestures)
//! declaration; only the card surface itself is resizable. Pointer deltas
//! flow through [`translate`] so consecutive gestures compose.

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, Offset};
use crate::style::Dimension;
use crate::surface::CardSurface;
use crate::transform::translate;

/// Tunables for gesture handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    /// Pointer travel (px) before a press turns into a drag.
    pub drag_threshold: f32,
    /// Exponential decay rate of inertial motion, per second.
    pub inertia_resistance: f32,
    /// Release speed (px/s) required to start inertial motion.
    pub inertia_min_speed: f32,
    /// Speed (px/s) below which inertial motion stops.
    pub inertia_end_speed: f32,
    /// Upper bound on inertial motion after release.
    pub inertia_max_duration_ms: u64,
    /// Distance from a card edge (px) that still grabs that edge.
    pub edge_margin: f32,
    /// Smallest width or height a resize can produce.
    pub min_surface_size: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 3.0,
            inertia_resistance: 10.0,
            inertia_min_speed: 200.0,
            inertia_end_speed: 10.0,
            inertia_max_duration_ms: 1_000,
            edge_margin: 8.0,
            min_surface_size: 40.0,
        }
    }
}

/// Card edges taking part in a resize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Edges {
    /// Left edge.
    #[serde(default)]
    pub left: bool,
    /// Right edge.
    #[serde(default)]
    pub right: bool,
    /// Top edge.
    #[serde(default)]
    pub top: bool,
    /// Bottom edge.
    #[serde(default)]
    pub bottom: bool,
}

impl Edges {
    /// Whether no edge is grabbed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.left || self.right || self.top || self.bottom)
    }
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    target: ElementId,
    pending: (f32, f32),
    started: bool,
    velocity: (f32, f32),
    last_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct Glide {
    target: ElementId,
    velocity: (f32, f32),
    released_ms: u64,
    last_ms: u64,
}

/// Turns pointer deltas into element and card mutations.
#[derive(Debug, Default)]
pub struct InteractionEngine {
    config: InteractionConfig,
    drag: Option<DragSession>,
    glides: Vec<Glide>,
}

impl InteractionEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            drag: None,
            glides: Vec::new(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Press on an element. Returns `false` if it is missing or not draggable.
    pub fn begin_drag(&mut self, surface: &CardSurface, target: ElementId, now_ms: u64) -> bool {
        let draggable = surface
            .get_element(target)
            .is_some_and(|e| e.gestures().draggable);
        if !draggable {
            tracing::debug!("Ignoring drag on non-draggable target {target}");
            return false;
        }
        self.glides.retain(|g| g.target != target);
        self.drag = Some(DragSession {
            target,
            pending: (0.0, 0.0),
            started: false,
            velocity: (0.0, 0.0),
            last_ms: now_ms,
        });
        true
    }

    /// Pointer moved during a drag. Returns the new offset once the drag
    /// has passed the detection threshold.
    ///
    /// Travel accumulated below the threshold is applied in one step when
    /// the drag starts, so the offset always equals the sum of deltas for
    /// any drag that starts at all.
    #[allow(clippy::cast_precision_loss)]
    pub fn drag_move(
        &mut self,
        surface: &mut CardSurface,
        dx: f32,
        dy: f32,
        now_ms: u64,
    ) -> Option<Offset> {
        let threshold = self.config.drag_threshold;
        let session = self.drag.as_mut()?;

        let (step_x, step_y) = if session.started {
            (dx, dy)
        } else {
            session.pending.0 += dx;
            session.pending.1 += dy;
            if session.pending.0.hypot(session.pending.1) < threshold {
                return None;
            }
            session.started = true;
            tracing::debug!("Drag started on {}", session.target);
            std::mem::take(&mut session.pending)
        };

        let elapsed = now_ms.saturating_sub(session.last_ms);
        if elapsed > 0 {
            let seconds = elapsed as f32 / 1000.0;
            session.velocity = (step_x / seconds, step_y / seconds);
        }
        session.last_ms = now_ms;

        let element = surface.get_element_mut(session.target)?;
        Some(translate(element, step_x, step_y))
    }

    /// Pointer released. Returns `true` if a drag had actually started.
    ///
    /// A fast release keeps the element gliding; call [`tick`](Self::tick)
    /// to advance it.
    pub fn end_drag(&mut self, now_ms: u64) -> bool {
        let Some(session) = self.drag.take() else {
            return false;
        };
        if !session.started {
            return false;
        }
        let speed = session.velocity.0.hypot(session.velocity.1);
        if speed >= self.config.inertia_min_speed {
            tracing::debug!("Gliding {} at {speed:.0}px/s", session.target);
            self.glides.push(Glide {
                target: session.target,
                velocity: session.velocity,
                released_ms: now_ms,
                last_ms: now_ms,
            });
        }
        true
    }

    /// Advance inertial motion to `now_ms`. Returns how many glides ended.
    #[allow(clippy::cast_precision_loss)]
    pub fn tick(&mut self, surface: &mut CardSurface, now_ms: u64) -> usize {
        let resistance = self.config.inertia_resistance;
        let end_speed = self.config.inertia_end_speed;
        let max_duration = self.config.inertia_max_duration_ms;
        let before = self.glides.len();

        self.glides.retain_mut(|glide| {
            let Some(element) = surface.get_element_mut(glide.target) else {
                return false;
            };
            let elapsed = now_ms.saturating_sub(glide.last_ms);
            if elapsed > 0 {
                let seconds = elapsed as f32 / 1000.0;
                let decay = (-resistance * seconds).exp();
                // Distance covered while velocity decays exponentially.
                let travel = (1.0 - decay) / resistance;
                translate(
                    element,
                    glide.velocity.0 * travel,
                    glide.velocity.1 * travel,
                );
                glide.velocity = (glide.velocity.0 * decay, glide.velocity.1 * decay);
                glide.last_ms = now_ms;
            }
            let speed = glide.velocity.0.hypot(glide.velocity.1);
            speed >= end_speed && now_ms.saturating_sub(glide.released_ms) < max_duration
        });

        before - self.glides.len()
    }

    /// Whether a press is being tracked.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether any element is still moving after release.
    #[must_use]
    pub fn is_gliding(&self) -> bool {
        !self.glides.is_empty()
    }

    /// Drop the pressed drag and every glide; elements stay where they are.
    pub fn cancel(&mut self) {
        if self.drag.take().is_some() || !self.glides.is_empty() {
            tracing::debug!("Cancelled drag and {} glide(s)", self.glides.len());
        }
        self.glides.clear();
    }

    /// Which card edges lie under a point given in card-container coordinates.
    #[must_use]
    pub fn hit_edges(&self, surface: &CardSurface, x: f32, y: f32) -> Edges {
        let (width, height) = surface.size_px();
        let left = surface.offset.x;
        let top = surface.offset.y;
        let margin = self.config.edge_margin;
        let within_y = y >= top - margin && y <= top + height + margin;
        let within_x = x >= left - margin && x <= left + width + margin;
        Edges {
            left: within_y && (x - left).abs() <= margin,
            right: within_y && (x - (left + width)).abs() <= margin,
            top: within_x && (y - top).abs() <= margin,
            bottom: within_x && (y - (top + height)).abs() <= margin,
        }
    }

    /// Drag the grabbed card edges by a pointer delta.
    ///
    /// Moving the left or top edge also shifts the card so the opposite edge
    /// stays where it was. Returns the new `(width, height)`.
    pub fn resize_surface(
        &self,
        surface: &mut CardSurface,
        edges: Edges,
        dx: f32,
        dy: f32,
    ) -> (f32, f32) {
        let min = self.config.min_surface_size;
        let (width, height) = surface.size_px();
        let (mut new_width, mut new_height) = (width, height);
        let (mut shift_x, mut shift_y) = (0.0, 0.0);

        if edges.right {
            new_width = (width + dx).max(min);
        } else if edges.left {
            new_width = (width - dx).max(min);
            shift_x = width - new_width;
        }
        if edges.bottom {
            new_height = (height + dy).max(min);
        } else if edges.top {
            new_height = (height - dy).max(min);
            shift_y = height - new_height;
        }

        surface.width = Dimension::Px(new_width);
        surface.height = Dimension::Px(new_height);
        if shift_x != 0.0 || shift_y != 0.0 {
            translate(surface, shift_x, shift_y);
        }
        (new_width, new_height)
    }
}
