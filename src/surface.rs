// Drawing seam between the simulation and the page. The simulation only
// needs a handful of 2d canvas calls, so they live behind a trait: the
// browser implementation wraps a CanvasRenderingContext2d, tests record calls.

use crate::error::SurfaceError;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Surface {
    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    /// Callers pass values already clamped to [0, 1].
    fn set_global_alpha(&mut self, alpha: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), SurfaceError>;
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2]);
}

pub struct CanvasSurface {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    // Grabs the 2d context from a canvas on the DOM. Fails instead of handing
    // back a surface with nothing to draw on.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| SurfaceError::ContextUnavailable)?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable)?;
        Ok(CanvasSurface { canvas, context })
    }

    // Setting the canvas size also wipes whatever was drawn on it
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Surface for CanvasSurface {
    fn set_fill_style(&mut self, style: &str) {
        self.context.set_fill_style(&JsValue::from_str(style));
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.context.set_stroke_style(&JsValue::from_str(style));
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.context.set_global_alpha(alpha);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), SurfaceError> {
        self.context.begin_path();
        // arc() throws on a negative radius
        self.context
            .arc(x, y, radius.max(0.0), 0.0, PI * 2.0)
            .map_err(SurfaceError::draw)?;
        self.context.fill();
        Ok(())
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2]) {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}
