//! DOM wiring: pointer listeners, the resize observer and the image decode
//! that completes a restore.

use crate::restore::RestoreSignal;
use crate::surface::CanvasSurface;
use scribble_core::Error;
use scribble_editor::{
    EventDisposition, MouseEvent, MouseKind, Sketchpad, TouchEvent, TouchKind, TouchPoint,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, EventTarget, HtmlImageElement, ResizeObserver, TouchList,
};

pub type SharedPad = Rc<RefCell<Sketchpad<CanvasSurface>>>;

/// Run `f` on the pad unless it is already borrowed further up the stack
/// (a save callback dispatching events synchronously).
fn with_pad<R>(
    pad: &SharedPad,
    f: impl FnOnce(&mut Sketchpad<CanvasSurface>) -> R,
) -> Option<R> {
    match pad.try_borrow_mut() {
        Ok(mut pad) => Some(f(&mut pad)),
        Err(_) => {
            log::warn!("re-entrant event dropped");
            None
        }
    }
}

// ─── Event listeners ─────────────────────────────────────────────────────

/// A registered listener; removed again on drop.
pub struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn add<E, F>(
        target: &EventTarget,
        name: &'static str,
        passive: bool,
        mut handler: F,
    ) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            name,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.name, self.callback.as_ref().unchecked_ref());
    }
}

const MOUSE_EVENTS: [(&str, MouseKind); 4] = [
    ("mousedown", MouseKind::Down),
    ("mousemove", MouseKind::Move),
    ("mouseup", MouseKind::Up),
    ("mouseout", MouseKind::Leave),
];

const TOUCH_EVENTS: [(&str, TouchKind); 4] = [
    ("touchstart", TouchKind::Start),
    ("touchmove", TouchKind::Move),
    ("touchend", TouchKind::End),
    ("touchcancel", TouchKind::Cancel),
];

/// Attach mouse and touch listeners to `target`.
///
/// Touch listeners are registered non-passive so a touch-move can cancel
/// page scrolling.
pub fn attach_pointer_listeners(
    pad: &SharedPad,
    target: &EventTarget,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::with_capacity(MOUSE_EVENTS.len() + TOUCH_EVENTS.len());

    for (name, kind) in MOUSE_EVENTS {
        let pad = Rc::clone(pad);
        listeners.push(Listener::add(target, name, true, move |e: web_sys::MouseEvent| {
            let event = MouseEvent::new(kind, e.offset_x() as f64, e.offset_y() as f64);
            with_pad(&pad, |pad| pad.handle_mouse(event));
        })?);
    }

    for (name, kind) in TOUCH_EVENTS {
        let pad = Rc::clone(pad);
        listeners.push(Listener::add(target, name, false, move |e: web_sys::TouchEvent| {
            let touches = touch_points(&e.touches());
            let changed = touch_points(&e.changed_touches());
            let event = TouchEvent::new(kind, touches, changed);
            let disposition = with_pad(&pad, |pad| pad.handle_touch(&event));
            if disposition == Some(EventDisposition::SuppressDefault) {
                e.prevent_default();
            }
        })?);
    }

    Ok(listeners)
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| TouchPoint::new(t.identifier(), f64::from(t.client_x()), f64::from(t.client_y())))
        .collect()
}

// ─── Resize ──────────────────────────────────────────────────────────────

/// Observes the canvas element's layout size; disconnects on drop.
pub struct ResizeWatch {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut()>,
}

impl ResizeWatch {
    pub fn observe(pad: &SharedPad, element: &web_sys::Element) -> Result<Self, JsValue> {
        let pad = Rc::clone(pad);
        let callback = Closure::<dyn FnMut()>::new(move || {
            with_pad(&pad, |pad| pad.handle_resize());
        });
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(element);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

// ─── Restore ─────────────────────────────────────────────────────────────

/// An in-flight browser decode of the saved drawing.
pub struct ImageLoad {
    image: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl ImageLoad {
    /// Start decoding the pad's pending restore, if it has one. `signal`
    /// is settled after the decode callback completes the restore.
    pub fn start(
        pad: &SharedPad,
        signal: &Rc<RefCell<RestoreSignal>>,
    ) -> Result<Option<Self>, JsValue> {
        let Some(src) = pad.borrow().pending_restore().map(|e| e.as_str().to_string()) else {
            return Ok(None);
        };
        let image = HtmlImageElement::new()?;

        let onload = {
            let pad = Rc::clone(pad);
            let signal = Rc::clone(signal);
            let image = image.clone();
            Closure::<dyn FnMut()>::new(move || {
                with_pad(&pad, |pad| pad.finish_restore(Ok(image.clone())));
                signal.borrow_mut().settle();
            })
        };
        let onerror = {
            let pad = Rc::clone(pad);
            let signal = Rc::clone(signal);
            Closure::<dyn FnMut()>::new(move || {
                let err = Error::Surface("browser could not decode the saved drawing".to_string());
                with_pad(&pad, |pad| pad.finish_restore(Err(err)));
                signal.borrow_mut().settle();
            })
        };

        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        image.set_src(&src);

        Ok(Some(Self {
            image,
            _onload: onload,
            _onerror: onerror,
        }))
    }
}

impl Drop for ImageLoad {
    fn drop(&mut self) {
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}
