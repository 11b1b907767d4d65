//! WASM bridge for Scribble: binds the sketchpad to an HTML `<canvas>`.
//!
//! Compiled via `wasm-pack build --target web`. JavaScript either calls
//! `mount` with its own saved data and save callback, or
//! `mount_with_storage` to keep the drawing in `localStorage`.

mod console_log;
mod host;
pub mod options;
mod restore;
pub mod storage;
mod surface;

use host::{ImageLoad, Listener, ResizeWatch, SharedPad};
use options::MountOptions;
use restore::RestoreSignal;
use scribble_core::EncodedImage;
use scribble_editor::{SaveCallback, Sketchpad};
use std::cell::RefCell;
use std::rc::Rc;
use storage::DrawingStore;
use surface::CanvasSurface;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// A mounted drawing surface.
///
/// Dropping it (or calling `destroy`/`free` from JS) removes every listener
/// and stops observing the canvas.
#[wasm_bindgen]
pub struct Scribble {
    // Field order is drop order: detach from the DOM before the pad goes.
    _listeners: Vec<Listener>,
    _resize: ResizeWatch,
    _restore: Option<ImageLoad>,
    restored: Rc<RefCell<RestoreSignal>>,
    pad: SharedPad,
}

#[wasm_bindgen]
impl Scribble {
    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.pad.borrow().is_drawing()
    }

    /// Whether the saved drawing is still being decoded. Strokes made in the
    /// meantime are drawn on top of it once it arrives.
    pub fn restore_pending(&self) -> bool {
        self.pad.borrow().is_restore_pending()
    }

    /// A promise resolving once the saved drawing has been dealt with, to
    /// `"restored"`, `"failed"`, `"skipped"` (nothing saved) or `"abandoned"`
    /// (destroyed first).
    pub fn when_restored(&self) -> js_sys::Promise {
        let mut signal = self.restored.borrow_mut();
        if let Some(label) = signal.outcome() {
            return js_sys::Promise::resolve(&JsValue::from_str(label));
        }
        js_sys::Promise::new(&mut |resolve, _reject| signal.wait(resolve))
    }

    /// Detach from the canvas. The drawing stays on screen.
    pub fn destroy(self) {
        log::debug!("scribble destroyed");
    }
}

/// Mount on `canvas`, restoring `saved` (a data URL) and passing every
/// completed stroke's snapshot to `on_save`.
#[wasm_bindgen]
pub fn mount(
    canvas: HtmlCanvasElement,
    saved: Option<String>,
    on_save: Option<js_sys::Function>,
) -> Result<Scribble, JsValue> {
    console_log::init(log::LevelFilter::Warn);
    let on_save = on_save.map(|f| -> SaveCallback {
        Box::new(move |image: EncodedImage| {
            if let Err(e) = f.call1(&JsValue::NULL, &JsValue::from_str(image.as_str())) {
                log::warn!("save callback threw: {e:?}");
            }
        })
    });
    attach(canvas, saved.as_deref(), on_save)
}

/// Mount on `canvas`, keeping the drawing in `localStorage`.
///
/// `options_json` is an optional `MountOptions` object, e.g.
/// `{"storageKey":"drawing","logLevel":"debug"}`.
#[wasm_bindgen]
pub fn mount_with_storage(
    canvas: HtmlCanvasElement,
    options_json: Option<String>,
) -> Result<Scribble, JsValue> {
    let options = parse_options(options_json.as_deref())?;
    let store = DrawingStore::open(&options.storage_key)?;
    let saved = store.load();
    let on_save: SaveCallback = Box::new(move |image: EncodedImage| store.save(&image));
    attach(canvas, saved.as_deref(), Some(on_save))
}

/// Remove the drawing saved under the configured key.
#[wasm_bindgen]
pub fn clear_saved_drawing(options_json: Option<String>) -> Result<(), JsValue> {
    let options = parse_options(options_json.as_deref())?;
    DrawingStore::open(&options.storage_key)?.clear()?;
    log::info!("cleared saved drawing `{}`", options.storage_key);
    Ok(())
}

fn parse_options(json: Option<&str>) -> Result<MountOptions, JsValue> {
    let options = MountOptions::from_json(json).map_err(|e| JsValue::from_str(&e))?;
    let level = options.level_filter().map_err(|e| JsValue::from_str(&e))?;
    console_log::init(level);
    Ok(options)
}

fn attach(
    canvas: HtmlCanvasElement,
    saved: Option<&str>,
    on_save: Option<SaveCallback>,
) -> Result<Scribble, JsValue> {
    console_log::console_error_panic_hook_setup();

    let surface = CanvasSurface::new(canvas.clone())?;
    let (mut pad, handle) = Sketchpad::setup(surface, saved, on_save);
    let restored = Rc::new(RefCell::new(RestoreSignal::new(handle)));
    // Match the buffer to the layout size now, so the observer's first
    // notification finds nothing to clear under the restored image.
    pad.handle_resize();
    let pad: SharedPad = Rc::new(RefCell::new(pad));

    let listeners = host::attach_pointer_listeners(&pad, &canvas)?;
    let resize = ResizeWatch::observe(&pad, &canvas)?;
    let restore = ImageLoad::start(&pad, &restored)?;
    log::debug!(
        "mounted {}x{} canvas, restore pending: {}",
        canvas.width(),
        canvas.height(),
        restore.is_some()
    );

    Ok(Scribble {
        _listeners: listeners,
        _resize: resize,
        _restore: restore,
        restored,
        pad,
    })
}
