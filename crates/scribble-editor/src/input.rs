//! Input abstraction layer.
//!
//! Mouse and touch events are adapted into one `PointerEvent` enum consumed
//! by the tracker. Positions are in display space, relative to the surface's
//! on-screen box.

use kurbo::Point;
use scribble_core::DisplayBox;

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed (mouse down, touch start).
    Down { pos: Point },

    /// Pointer moved (mouse move, touch move).
    Move { pos: Point },

    /// Pointer released or left the surface (mouse up/out, touch end).
    Up { pos: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            Self::Down { pos } | Self::Move { pos } | Self::Up { pos } => *pos,
        }
    }
}

// ─── Mouse ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Down,
    Move,
    Up,
    /// The pointer left the surface (`mouseout`).
    Leave,
}

/// A mouse event as the host reports it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub kind: MouseKind,
    /// Position relative to the surface's display box (`offsetX/Y`).
    pub offset: Point,
}

impl MouseEvent {
    pub fn new(kind: MouseKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            offset: Point::new(x, y),
        }
    }
}

impl From<MouseEvent> for PointerEvent {
    fn from(event: MouseEvent) -> Self {
        let pos = event.offset;
        match event.kind {
            MouseKind::Down => Self::Down { pos },
            MouseKind::Move => Self::Move { pos },
            MouseKind::Up | MouseKind::Leave => Self::Up { pos },
        }
    }
}

// ─── Touch ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    Start,
    Move,
    End,
    Cancel,
}

/// One contact point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Host-assigned identifier, stable for the life of the contact.
    pub id: i32,
    /// Viewport-relative position (`clientX/Y`).
    pub client: Point,
}

impl TouchPoint {
    pub fn new(id: i32, x: f64, y: f64) -> Self {
        Self {
            id,
            client: Point::new(x, y),
        }
    }
}

/// A touch event as the host reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub kind: TouchKind,
    /// Every contact currently on the surface.
    pub touches: Vec<TouchPoint>,
    /// Contacts that changed in this event (the lifted ones, for an end).
    pub changed: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn new(kind: TouchKind, touches: Vec<TouchPoint>, changed: Vec<TouchPoint>) -> Self {
        Self {
            kind,
            touches,
            changed,
        }
    }
}

/// Adapt a touch event into a pointer event, following a single contact.
///
/// `tracked` is the contact being followed, if a gesture is in progress. It
/// is updated in place: set on the starting touch, cleared when that touch
/// lifts. Events about any other contact yield `None`.
pub fn adapt_touch(
    event: &TouchEvent,
    tracked: &mut Option<i32>,
    display: &DisplayBox,
) -> Option<PointerEvent> {
    let local = |t: &TouchPoint| display.to_local(t.client);
    match event.kind {
        TouchKind::Start => {
            // A tracked contact missing from `touches` lost its end event.
            if let Some(id) = *tracked
                && event.touches.iter().any(|t| t.id == id)
            {
                return None;
            }
            let first = event.touches.first()?;
            *tracked = Some(first.id);
            Some(PointerEvent::Down { pos: local(first) })
        }
        TouchKind::Move => {
            let id = (*tracked)?;
            let touch = event.touches.iter().find(|t| t.id == id)?;
            Some(PointerEvent::Move { pos: local(touch) })
        }
        TouchKind::End | TouchKind::Cancel => {
            let id = (*tracked)?;
            let touch = event.changed.iter().find(|t| t.id == id)?;
            *tracked = None;
            Some(PointerEvent::Up { pos: local(touch) })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn display() -> DisplayBox {
        DisplayBox::new(100.0, 50.0, 400.0, 400.0)
    }

    #[test]
    fn mouse_leave_is_pointer_up() {
        let event = MouseEvent::new(MouseKind::Leave, 3.0, 4.0);
        assert_eq!(
            PointerEvent::from(event),
            PointerEvent::Up {
                pos: Point::new(3.0, 4.0)
            }
        );
    }

    #[test]
    fn touch_start_tracks_first_contact() {
        let mut tracked = None;
        let event = TouchEvent::new(
            TouchKind::Start,
            vec![TouchPoint::new(7, 110.0, 60.0), TouchPoint::new(8, 300.0, 300.0)],
            vec![],
        );
        let pointer = adapt_touch(&event, &mut tracked, &display());
        assert_eq!(
            pointer,
            Some(PointerEvent::Down {
                pos: Point::new(10.0, 10.0)
            })
        );
        assert_eq!(tracked, Some(7));
    }

    #[test]
    fn second_finger_is_ignored() {
        let mut tracked = Some(7);
        let start = TouchEvent::new(
            TouchKind::Start,
            vec![TouchPoint::new(7, 110.0, 60.0), TouchPoint::new(8, 300.0, 300.0)],
            vec![TouchPoint::new(8, 300.0, 300.0)],
        );
        assert_eq!(adapt_touch(&start, &mut tracked, &display()), None);

        let lift = TouchEvent::new(
            TouchKind::End,
            vec![TouchPoint::new(7, 110.0, 60.0)],
            vec![TouchPoint::new(8, 300.0, 300.0)],
        );
        assert_eq!(adapt_touch(&lift, &mut tracked, &display()), None);
        assert_eq!(tracked, Some(7));
    }

    #[test]
    fn move_follows_tracked_contact_regardless_of_order() {
        let mut tracked = Some(7);
        let event = TouchEvent::new(
            TouchKind::Move,
            vec![TouchPoint::new(8, 300.0, 300.0), TouchPoint::new(7, 120.0, 70.0)],
            vec![],
        );
        assert_eq!(
            adapt_touch(&event, &mut tracked, &display()),
            Some(PointerEvent::Move {
                pos: Point::new(20.0, 20.0)
            })
        );
    }

    #[test]
    fn lifting_tracked_contact_ends_gesture() {
        let mut tracked = Some(7);
        let event = TouchEvent::new(TouchKind::Cancel, vec![], vec![TouchPoint::new(7, 100.0, 50.0)]);
        assert_eq!(
            adapt_touch(&event, &mut tracked, &display()),
            Some(PointerEvent::Up {
                pos: Point::new(0.0, 0.0)
            })
        );
        assert_eq!(tracked, None);
    }

    #[test]
    fn stale_tracked_contact_is_replaced() {
        let mut tracked = Some(3);
        let event = TouchEvent::new(TouchKind::Start, vec![TouchPoint::new(9, 100.0, 50.0)], vec![]);
        assert!(adapt_touch(&event, &mut tracked, &display()).is_some());
        assert_eq!(tracked, Some(9));
    }

    #[test]
    fn move_without_gesture_is_ignored() {
        let mut tracked = None;
        let event = TouchEvent::new(TouchKind::Move, vec![TouchPoint::new(1, 0.0, 0.0)], vec![]);
        assert_eq!(adapt_touch(&event, &mut tracked, &display()), None);
    }
}
