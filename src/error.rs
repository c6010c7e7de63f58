use thiserror::Error;
use wasm_bindgen::JsValue;

/// Things which can go wrong while binding to or drawing on the canvas.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("No global `window` exists")]
    NoWindow,

    #[error("The window has no `document`")]
    NoDocument,

    #[error("No element with id '{0}' exists in the document")]
    CanvasNotFound(String),

    #[error("The element with id '{0}' is not a <canvas>")]
    NotACanvas(String),

    #[error("The canvas did not provide a 2d rendering context")]
    ContextUnavailable,

    #[error("A canvas draw call failed: {0}")]
    Draw(String),

    #[error("Unable to schedule an animation frame: {0}")]
    Schedule(String),

    #[error("Unable to add or remove the '{0}' listener")]
    Listener(String),
}

impl SurfaceError {
    pub(crate) fn draw(err: JsValue) -> Self {
        SurfaceError::Draw(format!("{:?}", err))
    }
}

impl From<SurfaceError> for JsValue {
    fn from(err: SurfaceError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
