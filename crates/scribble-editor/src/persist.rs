//! Persistence bridge between the surface and the host's durable store.
//!
//! Saving is synchronous: one encode and one callback per completed stroke.
//! Restoring is not. Hosts decode images on a later turn of their event loop,
//! so completion is reported through a [`RestoreHandle`].

use futures::channel::oneshot;
use scribble_core::{EncodedImage, Error, Surface};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Receives every completed snapshot. Failures inside it are the host's concern.
pub type SaveCallback = Box<dyn FnMut(EncodedImage)>;

/// Encodes the surface and hands the snapshot to the host.
#[derive(Default)]
pub struct PersistenceBridge {
    on_save: Option<SaveCallback>,
    last: Option<EncodedImage>,
    saves: u64,
}

impl PersistenceBridge {
    pub fn new(on_save: Option<SaveCallback>) -> Self {
        Self {
            on_save,
            last: None,
            saves: 0,
        }
    }

    /// Snapshot `surface` and invoke the save callback, if any.
    ///
    /// An encode failure is logged and skips the callback.
    pub fn persist<S: Surface>(&mut self, surface: &S) {
        let encoded = match surface.encode() {
            Ok(encoded) => encoded,
            Err(e) => {
                log::warn!("skipping save: {e}");
                return;
            }
        };
        self.saves += 1;
        self.last = Some(encoded.clone());
        match self.on_save.as_mut() {
            Some(save) => {
                log::debug!("saving snapshot #{} ({encoded:?})", self.saves);
                save(encoded);
            }
            None => log::trace!("no save callback; snapshot #{} kept in memory", self.saves),
        }
    }

    /// The most recent snapshot, whether or not a callback consumed it.
    pub fn last_persisted(&self) -> Option<&EncodedImage> {
        self.last.as_ref()
    }

    /// Number of snapshots taken so far.
    pub fn save_count(&self) -> u64 {
        self.saves
    }

    pub fn has_callback(&self) -> bool {
        self.on_save.is_some()
    }
}

impl fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceBridge")
            .field("on_save", &self.on_save.is_some())
            .field("last", &self.last)
            .field("saves", &self.saves)
            .finish()
    }
}

// ─── Restore completion ─────────────────────────────────────────────────

/// How the startup restore ended.
#[derive(Debug)]
pub enum RestoreOutcome {
    /// No usable saved image was supplied; the surface starts blank.
    Skipped,
    /// The saved image was decoded and drawn.
    Restored,
    /// Decoding or drawing failed; the surface was left as it was.
    Failed(Error),
    /// The sketchpad was dropped before the restore completed.
    Abandoned,
}

impl RestoreOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored)
    }

    /// Lowercase name reported to hosts: `skipped`, `restored`, `failed`
    /// or `abandoned`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Restored => "restored",
            Self::Failed(_) => "failed",
            Self::Abandoned => "abandoned",
        }
    }
}

/// Resolves once the startup restore has finished, successfully or not.
#[derive(Debug)]
pub struct RestoreHandle {
    rx: oneshot::Receiver<RestoreOutcome>,
}

impl RestoreHandle {
    pub(crate) fn new() -> (Self, oneshot::Sender<RestoreOutcome>) {
        let (tx, rx) = oneshot::channel();
        (Self { rx }, tx)
    }

    /// A handle that is already resolved.
    pub(crate) fn resolved(outcome: RestoreOutcome) -> Self {
        let (handle, tx) = Self::new();
        // The receiver is alive in `handle`, so this cannot fail.
        let _ = tx.send(outcome);
        handle
    }

    /// Poll without a task context. `None` while the restore is pending.
    pub fn try_outcome(&mut self) -> Option<RestoreOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::Canceled) => Some(RestoreOutcome::Abandoned),
        }
    }
}

impl Future for RestoreHandle {
    type Output = RestoreOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(RestoreOutcome::Abandoned))
    }
}
