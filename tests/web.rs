//! Browser-level tests for mount/unmount hygiene.
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use rust_canvas_network_backend::NetworkCanvas;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn insert_canvas(id: &str) -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn mount_sizes_canvas_and_populates() {
    let canvas = insert_canvas("network-bg-populate");
    let mut background = NetworkCanvas::mount("network-bg-populate").unwrap();
    assert!(background.is_running());
    let window = web_sys::window().unwrap();
    let width = window.inner_width().unwrap().as_f64().unwrap() as u32;
    assert_eq!(canvas.width(), width);
    assert!(background.particle_count() <= 150);
    background.unmount();
}

#[wasm_bindgen_test]
fn unmount_is_idempotent_and_restartable() {
    insert_canvas("network-bg-restart");
    let mut background = NetworkCanvas::mount("network-bg-restart").unwrap();

    background.unmount();
    assert!(!background.is_running());
    // A second unmount must be a no-op, not a panic or double-free
    background.unmount();
    assert!(!background.is_running());

    background.remount().unwrap();
    assert!(background.is_running());
    // A second remount must not start a second loop
    background.remount().unwrap();
    assert!(background.is_running());
    background.unmount();
}

#[wasm_bindgen_test]
fn mount_fails_without_canvas() {
    assert!(NetworkCanvas::mount("no-such-element").is_err());
}
