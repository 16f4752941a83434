// Frame scheduler: owns the requestAnimationFrame loop and the window and
// canvas event listeners. Two states, Running and Stopped; start() on a
// running scheduler and stop() on a stopped one are both no-ops, so a
// remounting host page can never end up with two loops or a leaked
// listener set.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::network::Network;
use crate::renderer::Renderer;

// Longest frame delta the simulation will integrate, in seconds. rAF stops
// firing in backgrounded tabs; without this a returning tab would teleport
// every particle across the surface in one tick.
const MAX_FRAME_DELTA: f64 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct FrameScheduler {
    canvas: HtmlCanvasElement,
    network: Rc<RefCell<Network>>,
    renderer: Rc<Renderer>,
    state: Rc<Cell<LoopState>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
    on_resize: Option<Closure<dyn FnMut()>>,
    on_mouse_move: Option<Closure<dyn FnMut(MouseEvent)>>,
    on_mouse_leave: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl FrameScheduler {
    pub fn new(
        canvas: HtmlCanvasElement,
        network: Rc<RefCell<Network>>,
        renderer: Rc<Renderer>,
    ) -> FrameScheduler {
        FrameScheduler {
            canvas,
            network,
            renderer,
            state: Rc::new(Cell::new(LoopState::Stopped)),
            raf_id: Rc::new(Cell::new(None)),
            tick: Rc::new(RefCell::new(None)),
            on_resize: None,
            on_mouse_move: None,
            on_mouse_leave: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.state.get() == LoopState::Running {
            return Ok(());
        }
        self.state.set(LoopState::Running);
        if let Err(err) = self.attach_listeners() {
            self.stop();
            return Err(err);
        }

        let network = self.network.clone();
        let renderer = self.renderer.clone();
        let state = self.state.clone();
        let raf_id = self.raf_id.clone();
        let tick_handle = self.tick.clone();
        let mut last_timestamp: Option<f64> = None;

        *self.tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            if state.get() != LoopState::Running {
                return;
            }
            let delta_secs = match last_timestamp {
                Some(last) => ((timestamp - last) / 1000.0).min(MAX_FRAME_DELTA),
                None => 0.0,
            };
            last_timestamp = Some(timestamp);

            {
                let mut network = network.borrow_mut();
                network.update(delta_secs);
                renderer.clear_screen(&network);
                let _ = renderer.render_particles(&network);
                renderer.render_connections(&network);
                let _ = renderer.render_effects(&network);
            }

            if let Some(tick) = tick_handle.borrow().as_ref() {
                if let Ok(id) = request_animation_frame(tick) {
                    raf_id.set(Some(id));
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let first_frame = {
            let tick = self.tick.borrow();
            match tick.as_ref() {
                Some(tick) => request_animation_frame(tick),
                None => Err(JsValue::from_str("tick closure missing")),
            }
        };
        match first_frame {
            Ok(id) => {
                self.raf_id.set(Some(id));
                Ok(())
            }
            // Never leave listeners attached with no loop scheduled
            Err(err) => {
                self.stop();
                Err(err)
            }
        }
    }

    // Cancel the pending frame and detach every listener in one step.
    // Idempotent: all handles are taken out of Options.
    pub fn stop(&mut self) {
        if self.state.get() == LoopState::Stopped {
            return;
        }
        self.state.set(LoopState::Stopped);

        if let Some(id) = self.raf_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Dropping the closure also breaks the Rc cycle the tick keeps with
        // itself for rescheduling
        self.tick.borrow_mut().take();
        self.detach_listeners();
    }

    fn attach_listeners(&mut self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        let canvas = self.canvas.clone();
        let network = self.network.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            if let Ok((width, height)) = viewport_extent() {
                canvas.set_width(width);
                canvas.set_height(height);
                network.borrow_mut().resize(width, height);
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        self.on_resize = Some(on_resize);

        let network = self.network.clone();
        let on_mouse_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            network
                .borrow_mut()
                .pointer_moved(event.offset_x() as f64, event.offset_y() as f64);
        }) as Box<dyn FnMut(MouseEvent)>);
        self.canvas
            .add_event_listener_with_callback("mousemove", on_mouse_move.as_ref().unchecked_ref())?;
        self.on_mouse_move = Some(on_mouse_move);

        let network = self.network.clone();
        let on_mouse_leave = Closure::wrap(Box::new(move |_: MouseEvent| {
            network.borrow_mut().pointer_left();
        }) as Box<dyn FnMut(MouseEvent)>);
        self.canvas.add_event_listener_with_callback(
            "mouseleave",
            on_mouse_leave.as_ref().unchecked_ref(),
        )?;
        self.on_mouse_leave = Some(on_mouse_leave);

        Ok(())
    }

    fn detach_listeners(&mut self) {
        if let Some(on_resize) = self.on_resize.take() {
            if let Some(window) = web_sys::window() {
                let _ = window
                    .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
            }
        }
        if let Some(on_mouse_move) = self.on_mouse_move.take() {
            let _ = self.canvas.remove_event_listener_with_callback(
                "mousemove",
                on_mouse_move.as_ref().unchecked_ref(),
            );
        }
        if let Some(on_mouse_leave) = self.on_mouse_leave.take() {
            let _ = self.canvas.remove_event_listener_with_callback(
                "mouseleave",
                on_mouse_leave.as_ref().unchecked_ref(),
            );
        }
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_animation_frame(tick: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or("no window")?
        .request_animation_frame(tick.as_ref().unchecked_ref())
}

// Current window inner size, floored to whole pixels
pub fn viewport_extent() -> Result<(u32, u32), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}
