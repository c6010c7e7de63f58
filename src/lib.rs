mod utils;

pub mod background;
pub mod color;
pub mod config;
pub mod connections;
pub mod dom_helpers;
pub mod error;
pub mod logger;
pub mod particle;
pub mod pointer;
pub mod surface;
pub mod system;

use wasm_bindgen::prelude::*;
use web_sys::console;

pub use background::ParticleBackground;
pub use config::{ParticleConfig, RadiusMode};
pub use error::SurfaceError;
pub use particle::Particle;
pub use surface::{CanvasSurface, Surface};
pub use system::{ParticleSystem, SystemState};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Call once from JS before mounting anything
#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    logger::setup(log::LevelFilter::Info);
}

// Times the enclosing scope in the browser's devtools under `name`
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }

    // Only times when trace logging is on, so per-frame timings stay out of
    // the console on a normal page
    pub fn when_tracing(name: &'a str) -> Option<Timer<'a>> {
        if log::log_enabled!(log::Level::Trace) {
            Some(Timer::new(name))
        } else {
            None
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_timer_is_off_without_trace_logging() {
        // No logger is installed in tests, so the max level stays below trace
        assert!(Timer::when_tracing("ParticleSystem::frame_tick").is_none());
    }
}
