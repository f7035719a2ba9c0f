use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, MouseEvent, WheelEvent};

use crate::constants::{BUTTON_ZOOM_STEP, WHEEL_PAN_STEP, WHEEL_ZOOM_STEP};
use crate::dom::PageElements;
use crate::render::draw;
use crate::state::State;

type Handler = Closure<dyn FnMut(Event)>;

/// Owns every DOM listener the widget registers. `detach` (also run on drop)
/// removes the listeners from their targets instead of leaking the closures
/// for the page lifetime.
pub struct Listeners {
    registered: Vec<(EventTarget, &'static str, Handler)>,
}

impl Listeners {
    pub fn attach(state: Rc<RefCell<State>>, page: &PageElements) -> Result<Self, JsValue> {
        let mut listeners = Listeners {
            registered: Vec::new(),
        };
        let (window_target, canvas_target) = {
            let s = state.borrow();
            (
                EventTarget::from(s.window.clone()),
                EventTarget::from(s.canvas.clone()),
            )
        };

        // window resize re-renders with the live container size
        {
            let st = state.clone();
            listeners.add(window_target, "resize", move |_e| {
                draw(&mut st.borrow_mut());
            })?;
        }

        // wheel: Ctrl zooms, plain wheel pans
        {
            let st = state.clone();
            listeners.add(canvas_target.clone(), "wheel", move |e| {
                e.prevent_default();
                e.stop_propagation();
                let Some(wheel) = e.dyn_ref::<WheelEvent>() else {
                    return;
                };
                if wheel.ctrl_key() {
                    wheel_zoom(&st, wheel.delta_y());
                } else {
                    wheel_pan(&st, wheel.delta_x(), wheel.delta_y());
                }
            })?;
        }

        // zoom buttons step the zoom by a fixed increment
        for (button, step) in [
            (&page.zoom_in, BUTTON_ZOOM_STEP),
            (&page.zoom_out, -BUTTON_ZOOM_STEP),
        ] {
            let st = state.clone();
            listeners.add(EventTarget::from(button.clone()), "click", move |_e| {
                let mut s = st.borrow_mut();
                let zoom = s.viewport.zoom() + step;
                s.viewport.set_zoom(zoom);
                draw(&mut s);
            })?;
        }

        // drag-pan: the offset is replaced with the cursor delta from the
        // drag origin, so switching from wheel-pan to drag-pan keeps the
        // discontinuity the original had
        {
            let st = state.clone();
            listeners.add(canvas_target.clone(), "mousedown", move |e| {
                let Some(mouse) = e.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let mut s = st.borrow_mut();
                let offset = s.viewport.offset();
                s.drag_origin = Some((
                    mouse.client_x() as f64 - offset[0],
                    mouse.client_y() as f64 - offset[1],
                ));
            })?;
        }
        {
            let st = state.clone();
            listeners.add(canvas_target.clone(), "mousemove", move |e| {
                let Some(mouse) = e.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let target = {
                    let mut s = st.borrow_mut();
                    let Some((origin_x, origin_y)) = s.drag_origin else {
                        return;
                    };
                    if s.panning {
                        return;
                    }
                    s.panning = true;
                    [
                        mouse.client_x() as f64 - origin_x,
                        mouse.client_y() as f64 - origin_y,
                    ]
                };
                let st2 = st.clone();
                request_frame(&st, move || {
                    let mut s = st2.borrow_mut();
                    s.viewport.set_offset(target);
                    draw(&mut s);
                    s.panning = false;
                });
            })?;
        }
        {
            let st = state.clone();
            listeners.add(canvas_target, "mouseup", move |_e| {
                st.borrow_mut().drag_origin = None;
            })?;
        }

        Ok(listeners)
    }

    fn add(
        &mut self,
        target: EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.registered.push((target, kind, closure));
        Ok(())
    }

    /// Remove every registered listener from its target.
    pub fn detach(&mut self) {
        for (target, kind, closure) in self.registered.drain(..) {
            let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Zoom by a wheel delta, coalesced to one pending frame. Events arriving
/// while a frame is pending are dropped, not accumulated.
fn wheel_zoom(state: &Rc<RefCell<State>>, delta_y: f64) {
    {
        let mut s = state.borrow_mut();
        if s.zooming {
            return;
        }
        s.zooming = true;
    }
    let st = state.clone();
    request_frame(state, move || {
        let mut s = st.borrow_mut();
        let zoom = s.viewport.zoom() + delta_y * WHEEL_ZOOM_STEP;
        s.viewport.set_zoom(zoom);
        draw(&mut s);
        s.zooming = false;
    });
}

/// Pan by a wheel delta, coalesced like `wheel_zoom`. The offset is read at
/// frame time so the delta applies to whatever the offset is by then.
fn wheel_pan(state: &Rc<RefCell<State>>, delta_x: f64, delta_y: f64) {
    {
        let mut s = state.borrow_mut();
        if s.panning {
            return;
        }
        s.panning = true;
    }
    let st = state.clone();
    request_frame(state, move || {
        let mut s = st.borrow_mut();
        let mut offset = s.viewport.offset();
        offset[0] += delta_x * WHEEL_PAN_STEP;
        offset[1] += delta_y * WHEEL_PAN_STEP;
        s.viewport.set_offset(offset);
        draw(&mut s);
        s.panning = false;
    });
}

/// Schedule a one-shot animation frame callback. There is no cancellation: a
/// scheduled frame always runs.
fn request_frame(state: &Rc<RefCell<State>>, callback: impl FnOnce() + 'static) {
    let window = state.borrow().window.clone();
    let closure = Closure::once_into_js(move |_ts: f64| callback());
    let _ = window.request_animation_frame(closure.unchecked_ref());
}
