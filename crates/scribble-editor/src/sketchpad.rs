//! The sketchpad: one surface, one tracker, one persistence bridge.
//!
//! Restore ordering: while a saved image is still being decoded, pointer
//! events are queued in arrival order. When the host reports the decode
//! result, the image is drawn first and the queued events are replayed on
//! top of it. Strokes therefore always land above the restored drawing, and
//! the first save after startup always contains it.

use crate::input::{MouseEvent, PointerEvent, TouchEvent, TouchKind};
use crate::persist::{PersistenceBridge, RestoreHandle, RestoreOutcome, SaveCallback};
use crate::tracker::{PointerTracker, TrackerCommand};
use futures::channel::oneshot;
use scribble_core::{EncodedImage, Result, StrokeStyle, Surface};
use std::collections::VecDeque;
use std::fmt;

/// Whether the host should cancel the platform's default handling of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Default,
    /// Cancel scrolling/zooming for this event.
    SuppressDefault,
}

enum Restore {
    Settled,
    Pending {
        encoded: EncodedImage,
        queued: VecDeque<PointerEvent>,
        notify: oneshot::Sender<RestoreOutcome>,
    },
}

/// A freehand drawing session bound to a host surface.
pub struct Sketchpad<S: Surface> {
    surface: S,
    tracker: PointerTracker,
    bridge: PersistenceBridge,
    restore: Restore,
}

impl<S: Surface> Sketchpad<S> {
    /// Bind to `surface`, schedule a restore of `saved`, and persist through
    /// `on_save`.
    ///
    /// Saved data that is not a well-formed encoded image is logged and
    /// treated as absent. The returned handle resolves when the restore
    /// finishes; immediately (`Skipped`) when there is nothing to restore.
    pub fn setup(
        surface: S,
        saved: Option<&str>,
        on_save: Option<SaveCallback>,
    ) -> (Self, RestoreHandle) {
        let tracker = PointerTracker::new(surface.display_box());
        let saved = saved.and_then(|raw| match EncodedImage::from_stored(raw) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                log::warn!("ignoring saved drawing: {e}");
                None
            }
        });

        let (restore, handle) = match saved {
            Some(encoded) => {
                log::debug!("restore scheduled for {encoded:?}");
                let (handle, notify) = RestoreHandle::new();
                let restore = Restore::Pending {
                    encoded,
                    queued: VecDeque::new(),
                    notify,
                };
                (restore, handle)
            }
            None => (
                Restore::Settled,
                RestoreHandle::resolved(RestoreOutcome::Skipped),
            ),
        };

        let pad = Self {
            surface,
            tracker,
            bridge: PersistenceBridge::new(on_save),
            restore,
        };
        (pad, handle)
    }

    // ─── Restore ─────────────────────────────────────────────────────────

    /// The saved image the host still has to decode, if any.
    pub fn pending_restore(&self) -> Option<&EncodedImage> {
        match &self.restore {
            Restore::Pending { encoded, .. } => Some(encoded),
            Restore::Settled => None,
        }
    }

    pub fn is_restore_pending(&self) -> bool {
        matches!(self.restore, Restore::Pending { .. })
    }

    /// Complete the pending restore with the host's decode result.
    ///
    /// On success the image is drawn at the origin. Either way, queued
    /// events are then replayed and the restore handle resolves.
    pub fn finish_restore(&mut self, decoded: Result<S::Image>) {
        let Restore::Pending { queued, notify, .. } =
            std::mem::replace(&mut self.restore, Restore::Settled)
        else {
            log::warn!("finish_restore called with no restore pending");
            return;
        };

        let outcome = match decoded.and_then(|image| self.surface.draw_image(&image)) {
            Ok(()) => {
                log::debug!("saved drawing restored");
                RestoreOutcome::Restored
            }
            Err(e) => {
                log::warn!("could not restore saved drawing: {e}");
                RestoreOutcome::Failed(e)
            }
        };

        if !queued.is_empty() {
            log::debug!("replaying {} events queued during restore", queued.len());
        }
        for event in queued {
            self.apply(event);
        }

        // Nobody may be waiting; that is fine.
        let _ = notify.send(outcome);
    }

    /// Decode and finish the pending restore in one step, for hosts whose
    /// decode is synchronous. Returns `false` when nothing was pending.
    pub fn restore_with<F>(&mut self, decode: F) -> bool
    where
        F: FnOnce(&EncodedImage) -> Result<S::Image>,
    {
        let Some(encoded) = self.pending_restore().cloned() else {
            return false;
        };
        let decoded = decode(&encoded);
        self.finish_restore(decoded);
        true
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Feed one normalized pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match &mut self.restore {
            Restore::Pending { queued, .. } => {
                log::trace!("restore pending; queueing {event:?}");
                queued.push_back(event);
            }
            Restore::Settled => self.apply(event),
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        self.handle_pointer(event.into());
    }

    /// Feed a touch event. Only the first contact of a gesture draws.
    ///
    /// The surface's on-screen origin is re-queried first, since scrolling
    /// moves it without any resize notification.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> EventDisposition {
        let origin = self.surface.display_box().origin();
        if let Some(pointer) = self.tracker.adapt_touch(event, origin) {
            self.handle_pointer(pointer);
        }
        match event.kind {
            TouchKind::Move => EventDisposition::SuppressDefault,
            _ => EventDisposition::Default,
        }
    }

    /// React to a change of the surface's displayed size.
    ///
    /// Re-queries the display box and resizes the buffer to match, which
    /// clears it. Nothing is redrawn afterwards.
    ///
    /// A notification whose rounded size equals the current buffer size is
    /// deliberately not treated as a change: only the cached box is
    /// refreshed and the contents are kept. Observers report the initial
    /// size once on attach, and clearing then would erase a restored drawing.
    ///
    /// While a restore is pending the resize still applies at once. The
    /// restored image is drawn into the resized buffer, and queued events
    /// are replayed against the new display box.
    pub fn handle_resize(&mut self) {
        let display = self.surface.display_box();
        self.tracker.set_display_box(display);
        let size = display.buffer_size();
        if size != self.surface.buffer_size() {
            log::debug!("display resized; buffer now {}x{}", size.width, size.height);
            self.surface.resize_buffer(size);
        }
    }

    fn apply(&mut self, event: PointerEvent) {
        match self.tracker.handle(&event, self.surface.buffer_size()) {
            Some(TrackerCommand::Stroke(segment)) => {
                log::trace!("stroke {segment}");
                self.surface.stroke_segment(segment, &StrokeStyle::PEN);
            }
            Some(TrackerCommand::Persist) => self.bridge.persist(&self.surface),
            None => {}
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn is_drawing(&self) -> bool {
        self.tracker.is_drawing()
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn persistence(&self) -> &PersistenceBridge {
        &self.bridge
    }

    pub fn last_persisted(&self) -> Option<&EncodedImage> {
        self.bridge.last_persisted()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tear down the session and give the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: Surface + fmt::Debug> fmt::Debug for Sketchpad<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sketchpad")
            .field("surface", &self.surface)
            .field("tracker", &self.tracker)
            .field("bridge", &self.bridge)
            .field("restore_pending", &self.is_restore_pending())
            .finish()
    }
}
