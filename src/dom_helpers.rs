// Helper functions for finding things on the page: the window, the document,
// the canvas to draw on and the current viewport size

use crate::error::SurfaceError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

pub fn window() -> Result<Window, SurfaceError> {
    web_sys::window().ok_or(SurfaceError::NoWindow)
}

pub fn document() -> Result<Document, SurfaceError> {
    window()?.document().ok_or(SurfaceError::NoDocument)
}

pub fn canvas_by_id(document: &Document, id: &str) -> Result<HtmlCanvasElement, SurfaceError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SurfaceError::CanvasNotFound(id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SurfaceError::NotACanvas(id.to_owned()))
}

// innerWidth/innerHeight, or 0 when the browser won't say
pub fn viewport_size(window: &Window) -> (u32, u32) {
    let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

pub fn is_loading(document: &Document) -> bool {
    document.ready_state() == "loading"
}

pub fn request_animation_frame(
    window: &Window,
    callback: &Closure<dyn FnMut()>,
) -> Result<i32, SurfaceError> {
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|err| SurfaceError::Schedule(format!("{:?}", err)))
}
