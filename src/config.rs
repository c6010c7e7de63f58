use wasm_bindgen::prelude::*;

/// How a particle's radius follows its pulse.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RadiusMode {
    /// `size = size + sin(pulse) * 0.1` every tick. The stored radius is
    /// reassigned in place, so its base wanders over many cycles.
    Drift,
    /// `size = base_size + sin(pulse) * 0.1`, anchored to the creation radius.
    Anchored,
}

/// Tunables for a particle system.
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    particle_count: u32,
    connection_distance: f64,
    pointer_radius: f64,
    pointer_strength: f64,
    /// Per-axis speed limit applied after pointer impulses, `None` leaves
    /// accumulated velocity unbounded.
    max_speed: Option<f64>,
    radius_mode: RadiusMode,
    /// Particle count at which connections are found with a bucket grid
    /// instead of checking every pair.
    grid_threshold: u32,
}

#[wasm_bindgen]
impl ParticleConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ParticleConfig {
        ParticleConfig {
            particle_count: Self::DEFAULT_PARTICLE_COUNT,
            connection_distance: Self::DEFAULT_CONNECTION_DISTANCE,
            pointer_radius: Self::DEFAULT_POINTER_RADIUS,
            pointer_strength: Self::DEFAULT_POINTER_STRENGTH,
            max_speed: None,
            radius_mode: RadiusMode::Drift,
            grid_threshold: Self::DEFAULT_GRID_THRESHOLD,
        }
    }

    pub fn with_particle_count(mut self, count: u32) -> ParticleConfig {
        self.particle_count = count;
        self
    }

    pub fn with_connection_distance(mut self, distance: f64) -> ParticleConfig {
        self.connection_distance = distance;
        self
    }

    pub fn with_pointer(mut self, radius: f64, strength: f64) -> ParticleConfig {
        self.pointer_radius = radius;
        self.pointer_strength = strength;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> ParticleConfig {
        self.max_speed = Some(max_speed.abs());
        self
    }

    pub fn with_anchored_radius(mut self) -> ParticleConfig {
        self.radius_mode = RadiusMode::Anchored;
        self
    }

    pub fn with_grid_threshold(mut self, threshold: u32) -> ParticleConfig {
        self.grid_threshold = threshold;
        self
    }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 {
        self.particle_count
    }

    #[wasm_bindgen(getter)]
    pub fn connection_distance(&self) -> f64 {
        self.connection_distance
    }
}

impl ParticleConfig {
    pub const DEFAULT_PARTICLE_COUNT: u32 = 50;
    pub const DEFAULT_CONNECTION_DISTANCE: f64 = 150.0;
    pub const DEFAULT_POINTER_RADIUS: f64 = 100.0;
    pub const DEFAULT_POINTER_STRENGTH: f64 = 0.5;
    pub const DEFAULT_GRID_THRESHOLD: u32 = 300;

    pub fn pointer_radius(&self) -> f64 {
        self.pointer_radius
    }

    pub fn pointer_strength(&self) -> f64 {
        self.pointer_strength
    }

    pub fn max_speed(&self) -> Option<f64> {
        self.max_speed
    }

    pub fn radius_mode(&self) -> RadiusMode {
        self.radius_mode
    }

    pub fn grid_threshold(&self) -> u32 {
        self.grid_threshold
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig::new()
    }
}
