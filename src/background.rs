// Binds a ParticleSystem to a <canvas> on the page: sizes it to the viewport,
// feeds it resize and mouse events, and drives it with requestAnimationFrame
// until stopped.

use crate::config::ParticleConfig;
use crate::dom_helpers;
use crate::error::SurfaceError;
use crate::surface::CanvasSurface;
use crate::system::ParticleSystem;
use crate::Timer;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, MouseEvent, Window};

struct Scene {
    system: ParticleSystem,
    surface: CanvasSurface,
    window: Window,
    document: Document,
}

// Closures hold a Weak back to this, so dropping the owning
// ParticleBackground tears everything down.
struct Inner {
    canvas_id: String,
    config: ParticleConfig,
    scene: Option<Scene>,
    stopped: bool,
    frame_id: Option<i32>,
    on_frame: Option<Closure<dyn FnMut()>>,
    on_resize: Option<Closure<dyn FnMut()>>,
    on_pointer: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl Inner {
    fn new(canvas_id: &str, config: ParticleConfig) -> Self {
        Inner {
            canvas_id: canvas_id.to_owned(),
            config,
            scene: None,
            stopped: false,
            frame_id: None,
            on_frame: None,
            on_resize: None,
            on_pointer: None,
        }
    }

    fn resize(&mut self) {
        if let Some(scene) = &mut self.scene {
            let (width, height) = dom_helpers::viewport_size(&scene.window);
            scene.surface.set_size(width, height);
            scene.system.resize(width, height);
        }
    }

    fn pointer_moved(&mut self, event: &MouseEvent) {
        if let Some(scene) = &mut self.scene {
            scene
                .system
                .apply_pointer_force(event.client_x() as f64, event.client_y() as f64);
        }
    }

    fn frame(&mut self) {
        self.frame_id = None;
        if self.stopped {
            return;
        }
        if let Some(scene) = &mut self.scene {
            let _timer = Timer::when_tracing("ParticleSystem::frame_tick");
            if let Err(err) = scene.system.frame_tick(&mut scene.surface) {
                log::warn!("{}", err);
            }
        }
        self.schedule();
    }

    fn schedule(&mut self) {
        if self.stopped {
            return;
        }
        if let (Some(scene), Some(on_frame)) = (&self.scene, &self.on_frame) {
            match dom_helpers::request_animation_frame(&scene.window, on_frame) {
                Ok(id) => self.frame_id = Some(id),
                Err(err) => log::error!("{}", err),
            }
        }
    }

    fn listen(&self) -> Result<(), SurfaceError> {
        let scene = match &self.scene {
            Some(scene) => scene,
            None => return Ok(()),
        };
        if let Some(on_resize) = &self.on_resize {
            scene
                .window
                .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
                .map_err(|_| SurfaceError::Listener("resize".to_owned()))?;
        }
        if let Some(on_pointer) = &self.on_pointer {
            scene
                .document
                .add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref())
                .map_err(|_| SurfaceError::Listener("mousemove".to_owned()))?;
        }
        Ok(())
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Some(scene) = &mut self.scene {
            scene.system.stop();
            if let Some(id) = self.frame_id.take() {
                if let Err(err) = scene.window.cancel_animation_frame(id) {
                    log::warn!("unable to cancel frame {}: {:?}", id, err);
                }
            }
            if let Some(on_resize) = &self.on_resize {
                if let Err(err) = scene
                    .window
                    .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
                {
                    log::warn!("{}: {:?}", SurfaceError::Listener("resize".to_owned()), err);
                }
            }
            if let Some(on_pointer) = &self.on_pointer {
                if let Err(err) = scene.document.remove_event_listener_with_callback(
                    "mousemove",
                    on_pointer.as_ref().unchecked_ref(),
                ) {
                    log::warn!("{}: {:?}", SurfaceError::Listener("mousemove".to_owned()), err);
                }
            }
        }
        self.on_frame = None;
        self.on_resize = None;
        self.on_pointer = None;
    }
}

// Looks up the canvas, starts the system and hooks up the page. Runs at most
// once per background; a missing canvas or context fails the whole start.
fn start(shared: &Rc<RefCell<Inner>>) -> Result<(), SurfaceError> {
    let mut inner = shared.borrow_mut();
    if inner.scene.is_some() || inner.stopped {
        return Ok(());
    }

    let window = dom_helpers::window()?;
    let document = dom_helpers::document()?;
    let canvas = dom_helpers::canvas_by_id(&document, &inner.canvas_id)?;
    let surface = CanvasSurface::new(canvas)?;

    let (width, height) = dom_helpers::viewport_size(&window);
    surface.set_size(width, height);
    let mut system = ParticleSystem::new(inner.config);
    system.initialize(width, height);

    let on_resize = {
        let weak = Rc::downgrade(shared);
        Closure::wrap(Box::new(move || {
            with_inner(&weak, |inner| inner.resize());
        }) as Box<dyn FnMut()>)
    };
    let on_pointer = {
        let weak = Rc::downgrade(shared);
        Closure::wrap(Box::new(move |event: MouseEvent| {
            with_inner(&weak, |inner| inner.pointer_moved(&event));
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    let on_frame = {
        let weak = Rc::downgrade(shared);
        Closure::wrap(Box::new(move || {
            with_inner(&weak, |inner| inner.frame());
        }) as Box<dyn FnMut()>)
    };

    // Every closure is owned by `inner` before it is attached, so a failed
    // attach can be undone by `stop` without dropping a live listener.
    inner.scene = Some(Scene {
        system,
        surface,
        window,
        document,
    });
    inner.on_resize = Some(on_resize);
    inner.on_pointer = Some(on_pointer);
    inner.on_frame = Some(on_frame);

    if let Err(err) = inner.listen() {
        inner.stop();
        return Err(err);
    }
    inner.schedule();
    Ok(())
}

fn with_inner<F: FnOnce(&mut Inner)>(weak: &Weak<RefCell<Inner>>, f: F) {
    if let Some(shared) = weak.upgrade() {
        f(&mut shared.borrow_mut());
    }
}

/// An animated particle background drawn on a `<canvas>`.
#[wasm_bindgen]
pub struct ParticleBackground {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Starts a background with the default configuration on the canvas with
    /// id `canvas_id`. If the document is still loading, starting waits for
    /// `DOMContentLoaded`.
    pub fn mount(canvas_id: &str) -> Result<ParticleBackground, JsValue> {
        ParticleBackground::mount_with_config(canvas_id, ParticleConfig::default())
    }

    #[wasm_bindgen(js_name = mountWithConfig)]
    pub fn mount_with_config(
        canvas_id: &str,
        config: ParticleConfig,
    ) -> Result<ParticleBackground, JsValue> {
        let background = ParticleBackground {
            inner: Rc::new(RefCell::new(Inner::new(canvas_id, config))),
        };

        let document = dom_helpers::document()?;
        if dom_helpers::is_loading(&document) {
            log::debug!("document still loading, deferring particle background");
            background.start_when_ready(&document)?;
        } else if let Err(err) = start(&background.inner) {
            log::error!("particle background failed to start: {}", err);
            return Err(err.into());
        }
        Ok(background)
    }

    /// Stops the animation and detaches from the page. Cannot be restarted.
    pub fn stop(&self) {
        self.inner.borrow_mut().stop();
    }

    pub fn reseed(&self) {
        if let Some(scene) = &mut self.inner.borrow_mut().scene {
            scene.system.reseed();
        }
    }

    /// Zero until the background has started.
    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.inner
            .borrow()
            .scene
            .as_ref()
            .map(|scene| scene.system.particle_count() as u32)
            .unwrap_or(0)
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner
            .borrow()
            .scene
            .as_ref()
            .map(|scene| scene.system.is_running())
            .unwrap_or(false)
    }
}

impl ParticleBackground {
    // One-shot DOMContentLoaded listener. Failures can only be logged since
    // the caller of `mount` has already returned.
    fn start_when_ready(&self, document: &Document) -> Result<(), JsValue> {
        let weak = Rc::downgrade(&self.inner);
        let on_ready = Closure::once_into_js(move || {
            if let Some(shared) = weak.upgrade() {
                if let Err(err) = start(&shared) {
                    log::error!("particle background failed to start: {}", err);
                }
            }
        });
        let mut options = AddEventListenerOptions::new();
        options.once(true);
        document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            on_ready.unchecked_ref(),
            &options,
        )
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.inner.borrow_mut().stop();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::{Event, HtmlCanvasElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn add_canvas(document: &Document, id: &str) -> HtmlCanvasElement {
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas.set_id(id);
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    #[wasm_bindgen_test]
    fn deferred_start_waits_for_dom_content_loaded() {
        let document = dom_helpers::document().unwrap();
        let canvas = add_canvas(&document, "deferred-canvas");
        let background = ParticleBackground {
            inner: Rc::new(RefCell::new(Inner::new("deferred-canvas", ParticleConfig::default()))),
        };

        background.start_when_ready(&document).unwrap();
        assert!(!background.is_running());
        assert_eq!(background.particle_count(), 0);

        document
            .dispatch_event(&Event::new("DOMContentLoaded").unwrap())
            .unwrap();
        assert!(background.is_running());
        assert_eq!(background.particle_count(), 50);

        // The listener was registered with `once`, so a second event is ignored
        document
            .dispatch_event(&Event::new("DOMContentLoaded").unwrap())
            .unwrap();
        assert_eq!(background.particle_count(), 50);

        background.stop();
        canvas.remove();
    }

    #[wasm_bindgen_test]
    fn stop_detaches_listeners_and_the_frame() {
        let document = dom_helpers::document().unwrap();
        let canvas = add_canvas(&document, "detach-canvas");
        let background = ParticleBackground::mount("detach-canvas").unwrap();
        background.stop();

        let inner = background.inner.borrow();
        assert!(inner.stopped);
        assert!(inner.frame_id.is_none());
        assert!(inner.on_frame.is_none());
        assert!(inner.on_resize.is_none());
        assert!(inner.on_pointer.is_none());
        drop(inner);
        canvas.remove();
    }
}
