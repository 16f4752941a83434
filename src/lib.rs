mod color;
mod effects;
mod network;
mod particle;
mod renderer;
mod scheduler;
mod utils;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement};

pub use crate::color::Color;
pub use crate::effects::{PacketEffect, RippleEffect};
pub use crate::network::{Connection, Network, HARD_POPULATION_CAP};
pub use crate::particle::{Particle, PALETTE};
pub use crate::renderer::Renderer;
pub use crate::scheduler::{FrameScheduler, LoopState};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// The full-viewport network background. Mount it on a canvas element and it
// sizes the canvas to the window, seeds the particle population, and runs
// its own frame loop until unmounted.
#[wasm_bindgen]
pub struct NetworkCanvas {
    network: Rc<RefCell<Network>>,
    scheduler: FrameScheduler,
}

#[wasm_bindgen]
impl NetworkCanvas {
    pub fn mount(canvas_id: &str) -> Result<NetworkCanvas, JsValue> {
        let _timer = Timer::new("NetworkCanvas::mount");

        let document = web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas element not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let (width, height) = scheduler::viewport_extent()?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let network = Rc::new(RefCell::new(Network::new(width, height)));
        let renderer = Rc::new(Renderer::new(context));
        let mut scheduler = FrameScheduler::new(canvas, network.clone(), renderer);
        scheduler.start()?;

        Ok(NetworkCanvas { network, scheduler })
    }

    // Stop the frame loop and detach all listeners. Safe to call more than
    // once; mount/unmount cycles from client-side navigation must not leak
    // timers or listeners.
    pub fn unmount(&mut self) {
        self.scheduler.stop();
    }

    // Resume after an unmount, reusing the existing particle population
    pub fn remount(&mut self) -> Result<(), JsValue> {
        self.scheduler.start()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.state() == LoopState::Running
    }

    pub fn particle_count(&self) -> usize {
        self.network.borrow().particle_count()
    }
}
