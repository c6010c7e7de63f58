//! The particle system: a population of [`Particle`]s on a fixed-size area,
//! advanced and drawn once per animation frame.
//!
//! The system knows nothing about the browser. It is sized and driven by
//! whoever owns it (see [`crate::background::ParticleBackground`]) and draws
//! through any [`Surface`]. Motion is per frame, not per second: each tick
//! moves every particle by its velocity once, whatever the frame rate.

use crate::color::{BACKGROUND, CONNECTION};
use crate::config::ParticleConfig;
use crate::connections;
use crate::error::SurfaceError;
use crate::particle::Particle;
use crate::pointer::PointerForce;
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Lifecycle of a [`ParticleSystem`]. Stopped is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemState {
    Uninitialized,
    Running,
    Stopped,
}

pub struct ParticleSystem {
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    config: ParticleConfig,
    pointer: PointerForce,
    state: SystemState,
    rng: StdRng,
}

impl ParticleSystem {
    /// Alpha of the background wash painted over each frame.
    pub const FADE_ALPHA: f64 = 0.05;
    pub const CONNECTION_ALPHA: f64 = 0.15;
    pub const CONNECTION_WIDTH: f64 = 1.0;

    pub fn new(config: ParticleConfig) -> ParticleSystem {
        ParticleSystem::with_rng(config, StdRng::from_entropy())
    }

    /// A system whose particles come from `rng`, for reproducible layouts.
    pub fn with_rng(config: ParticleConfig, rng: StdRng) -> ParticleSystem {
        ParticleSystem {
            width: 0,
            height: 0,
            particles: Vec::new(),
            pointer: PointerForce::new(config.pointer_radius(), config.pointer_strength()),
            config,
            state: SystemState::Uninitialized,
            rng,
        }
    }

    /// Sizes the area and seeds the population. Only the first call does
    /// anything; it returns whether this call started the system.
    pub fn initialize(&mut self, width: u32, height: u32) -> bool {
        if self.state != SystemState::Uninitialized {
            log::debug!("particle system already initialized, ignoring");
            return false;
        }
        self.resize(width, height);
        self.reseed();
        self.state = SystemState::Running;
        log::info!(
            "particle system running with {} particles on {}x{}",
            self.particles.len(),
            width,
            height
        );
        true
    }

    // Particles keep their positions. Any now outside the area come back on
    // their own through wraparound.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Replaces the whole population with fresh particles.
    pub fn reseed(&mut self) {
        let (width, height) = (self.width as f64, self.height as f64);
        let count = self.config.particle_count() as usize;
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::random(width, height, &mut self.rng));
        }
        self.particles = particles;
    }

    pub fn stop(&mut self) {
        if self.state == SystemState::Running {
            log::info!("particle system stopped");
        }
        self.state = SystemState::Stopped;
    }

    /// Pushes every particle within reach of the pointer away from it.
    pub fn apply_pointer_force(&mut self, pointer_x: f64, pointer_y: f64) {
        let pointer = [pointer_x, pointer_y];
        for particle in &mut self.particles {
            if let Some(push) = self.pointer.impulse(particle.pos, pointer) {
                particle.vel[0] += push[0];
                particle.vel[1] += push[1];
                if let Some(max_speed) = self.config.max_speed() {
                    particle.limit_speed(max_speed);
                }
            }
        }
    }

    /// Index pairs of particles close enough to be connected.
    pub fn connected_pairs(&self) -> Vec<(usize, usize)> {
        let points: Vec<[f64; 2]> = self.particles.iter().map(|p| p.pos).collect();
        let max_distance = self.config.connection_distance();
        if points.len() >= self.config.grid_threshold() as usize {
            connections::grid_pairs(&points, max_distance)
        } else {
            connections::brute_force_pairs(&points, max_distance)
        }
    }

    pub fn render_connections<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_stroke_style(&CONNECTION.to_rgba(Self::CONNECTION_ALPHA));
        surface.set_line_width(Self::CONNECTION_WIDTH);
        for (i, j) in self.connected_pairs() {
            surface.stroke_line(self.particles[i].pos, self.particles[j].pos);
        }
    }

    /// One animation frame: fade the previous frame, move and draw every
    /// particle, then draw the connections. Does nothing unless running.
    ///
    /// A particle that fails to draw is skipped; the first failure is
    /// returned once the whole frame has been drawn.
    pub fn frame_tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), SurfaceError> {
        if self.state != SystemState::Running {
            return Ok(());
        }

        surface.set_fill_style(&BACKGROUND.to_rgba(Self::FADE_ALPHA));
        surface.fill_rect(0.0, 0.0, self.width as f64, self.height as f64);

        let (width, height) = (self.width as f64, self.height as f64);
        let radius_mode = self.config.radius_mode();
        let mut result = Ok(());
        for particle in &mut self.particles {
            particle.advance(width, height, radius_mode);
            if let Err(err) = particle.render(surface) {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }

        self.render_connections(surface);
        result
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn state(&self) -> SystemState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SystemState::Running
    }
}
