//! Scribble editor: pointer tracking, persistence, and the sketchpad that
//! wires them to a surface.
//!
//! The host supplies a [`Surface`](scribble_core::Surface), an optional saved
//! image, and an optional save callback to [`Sketchpad::setup`], then forwards
//! raw mouse, touch, and resize notifications. Everything else is internal.

pub mod input;
pub mod persist;
pub mod sketchpad;
pub mod tracker;

pub use input::{MouseEvent, MouseKind, PointerEvent, TouchEvent, TouchKind, TouchPoint};
pub use persist::{PersistenceBridge, RestoreHandle, RestoreOutcome, SaveCallback};
pub use sketchpad::{EventDisposition, Sketchpad};
pub use tracker::{Phase, PointerTracker, TrackerCommand};
