//! Pointer tracker: turns pointer events into stroke and persist commands.
//!
//! ```text
//!            Down
//!   Idle ───────────▶ Drawing { last } ◀──┐
//!    ▲                   │    │           │ Move: Stroke(last → pos)
//!    └───────────────────┘    └───────────┘
//!        Up: Persist
//! ```
//!
//! `Move` and `Up` while idle are no-ops.

use crate::input::{PointerEvent, TouchEvent, adapt_touch};
use kurbo::Point;
use scribble_core::{BufferSize, DisplayBox, PixelPos, Segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A gesture is in progress; `last` is the most recent buffer position.
    Drawing { last: PixelPos },
}

/// What the owner must do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCommand {
    /// Paint one segment with the pen.
    Stroke(Segment),
    /// A stroke completed; snapshot the surface.
    Persist,
}

/// Explicit pointer state: drawing flag, last position, cached display box.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    phase: Phase,
    display: DisplayBox,
    /// Touch contact followed by the current gesture.
    touch_id: Option<i32>,
}

impl PointerTracker {
    pub fn new(display: DisplayBox) -> Self {
        Self {
            phase: Phase::Idle,
            display,
            touch_id: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.phase, Phase::Drawing { .. })
    }

    pub fn display_box(&self) -> DisplayBox {
        self.display
    }

    /// Replace the cached display box after a layout change.
    pub fn set_display_box(&mut self, display: DisplayBox) {
        self.display = display;
    }

    /// Display-relative position → buffer pixel.
    pub fn normalize(&self, pos: Point, buffer: BufferSize) -> PixelPos {
        self.display.to_buffer(pos, buffer)
    }

    /// Adapt a touch event against the tracked contact.
    ///
    /// Touch positions are viewport-relative, so they are made local against
    /// `origin`, the box's current on-screen corner. Scrolling moves that
    /// corner without a resize; the cached extent still drives scaling.
    pub fn adapt_touch(&mut self, event: &TouchEvent, origin: Point) -> Option<PointerEvent> {
        self.display = self.display.with_origin(origin);
        adapt_touch(event, &mut self.touch_id, &self.display)
    }

    /// Advance the state machine by one event.
    pub fn handle(&mut self, event: &PointerEvent, buffer: BufferSize) -> Option<TrackerCommand> {
        match (*event, self.phase) {
            (PointerEvent::Down { pos }, _) => {
                let at = self.normalize(pos, buffer);
                log::debug!("pointer down at {at}");
                self.phase = Phase::Drawing { last: at };
                None
            }
            (PointerEvent::Move { pos }, Phase::Drawing { last }) => {
                let at = self.normalize(pos, buffer);
                self.phase = Phase::Drawing { last: at };
                Some(TrackerCommand::Stroke(Segment::new(last, at)))
            }
            (PointerEvent::Up { .. }, Phase::Drawing { .. }) => {
                log::debug!("pointer up; stroke complete");
                self.phase = Phase::Idle;
                Some(TrackerCommand::Persist)
            }
            (PointerEvent::Move { .. } | PointerEvent::Up { .. }, Phase::Idle) => None,
        }
    }
}
