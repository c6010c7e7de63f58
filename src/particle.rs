// Particle struct to keep track of individual position, velocity, color,
// and the pulse that drives its size and opacity

use crate::color::{Color, PALETTE};
use crate::config::RadiusMode;
use crate::error::SurfaceError;
use crate::surface::Surface;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    size: f64,
    base_size: f64,
    color: Color,
    opacity: f64,
    pulse: f64,
    pulse_speed: f64,
}

impl Particle {
    pub const MAX_START_SPEED: f64 = 0.25;
    pub const MIN_SIZE: f64 = 1.0;
    pub const MAX_SIZE: f64 = 3.0;
    pub const MIN_OPACITY: f64 = 0.3;
    pub const MAX_OPACITY: f64 = 0.8;
    pub const MIN_PULSE_SPEED: f64 = 0.01;
    pub const MAX_PULSE_SPEED: f64 = 0.03;
    pub const SIZE_PULSE: f64 = 0.1;
    pub const OPACITY_PULSE: f64 = 0.2;

    pub fn new(
        pos: [f64; 2],
        vel: [f64; 2],
        size: f64,
        color: Color,
        opacity: f64,
        pulse_speed: f64,
    ) -> Particle {
        Particle {
            pos,
            vel,
            size,
            base_size: size,
            color,
            opacity,
            pulse: 0.0,
            pulse_speed,
        }
    }

    // Random particle somewhere inside a width x height area
    pub fn random<R: Rng>(width: f64, height: f64, rng: &mut R) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = rng.gen_range(-Self::MAX_START_SPEED, Self::MAX_START_SPEED);
        let vel_y = rng.gen_range(-Self::MAX_START_SPEED, Self::MAX_START_SPEED);
        let size = rng.gen_range(Self::MIN_SIZE, Self::MAX_SIZE);
        let color = PALETTE[rng.gen_range(0, PALETTE.len())];
        let opacity = rng.gen_range(Self::MIN_OPACITY, Self::MAX_OPACITY);
        let pulse_speed = rng.gen_range(Self::MIN_PULSE_SPEED, Self::MAX_PULSE_SPEED);
        Particle::new([pos_x, pos_y], [vel_x, vel_y], size, color, opacity, pulse_speed)
    }

    // One tick: move, pulse, then wrap. Leaving an edge snaps the particle to
    // the opposite edge exactly rather than carrying the overshoot across.
    pub fn advance(&mut self, width: f64, height: f64, radius_mode: RadiusMode) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
        self.pulse += self.pulse_speed;

        if self.pos[0] > width {
            self.pos[0] = 0.0;
        }
        if self.pos[0] < 0.0 {
            self.pos[0] = width;
        }
        if self.pos[1] > height {
            self.pos[1] = 0.0;
        }
        if self.pos[1] < 0.0 {
            self.pos[1] = height;
        }

        let base = match radius_mode {
            RadiusMode::Drift => self.size,
            RadiusMode::Anchored => self.base_size,
        };
        self.size = base + self.pulse.sin() * Self::SIZE_PULSE;
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        surface.set_fill_style(&self.color.to_hex());
        surface.set_global_alpha(self.display_opacity().max(0.0).min(1.0));
        let drawn = surface.fill_circle(self.pos[0], self.pos[1], self.size);
        // Never leak the particle's alpha into later draws, even on failure
        surface.set_global_alpha(1.0);
        drawn
    }

    /// Opacity the particle is drawn with this tick, before clamping.
    pub fn display_opacity(&self) -> f64 {
        self.opacity + self.pulse.sin() * Self::OPACITY_PULSE
    }

    // Caps each velocity component to [-max_speed, max_speed]
    pub fn limit_speed(&mut self, max_speed: f64) {
        self.vel[0] = self.vel[0].max(-max_speed).min(max_speed);
        self.vel[1] = self.vel[1].max(-max_speed).min(max_speed);
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn base_size(&self) -> f64 {
        self.base_size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn pulse(&self) -> f64 {
        self.pulse
    }

    pub fn pulse_speed(&self) -> f64 {
        self.pulse_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{DrawCall, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_particle(pos: [f64; 2], vel: [f64; 2]) -> Particle {
        Particle::new(pos, vel, 2.0, PALETTE[0], 0.5, 0.02)
    }

    #[test]
    fn random_particles_stay_in_their_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = Particle::random(800.0, 600.0, &mut rng);
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 600.0);
            assert!(p.vel[0].abs() <= 0.25 && p.vel[1].abs() <= 0.25);
            assert!(p.size() >= 1.0 && p.size() <= 3.0);
            assert!(PALETTE.contains(&p.color()));
            assert!(p.opacity() >= 0.3 && p.opacity() <= 0.8);
            assert!(p.pulse_speed() >= 0.01 && p.pulse_speed() <= 0.03);
            assert_eq!(p.pulse(), 0.0);
        }
    }

    #[test]
    fn every_palette_color_gets_picked() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let color = Particle::random(10.0, 10.0, &mut rng).color();
            let idx = PALETTE.iter().position(|c| *c == color).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn advance_moves_and_pulses() {
        let mut p = still_particle([10.0, 20.0], [0.5, -0.25]);
        p.advance(100.0, 100.0, RadiusMode::Drift);
        assert_eq!(p.pos, [10.5, 19.75]);
        assert_eq!(p.pulse(), 0.02);
        assert_eq!(p.size(), 2.0 + 0.02f64.sin() * 0.1);
    }

    #[test]
    fn leaving_an_edge_snaps_to_the_other_edge() {
        let mut right = still_particle([99.9, 50.0], [0.5, 0.0]);
        right.advance(100.0, 80.0, RadiusMode::Drift);
        assert_eq!(right.pos, [0.0, 50.0]);

        let mut left = still_particle([0.1, 50.0], [-0.5, 0.0]);
        left.advance(100.0, 80.0, RadiusMode::Drift);
        assert_eq!(left.pos, [100.0, 50.0]);

        let mut bottom = still_particle([50.0, 79.9], [0.0, 0.5]);
        bottom.advance(100.0, 80.0, RadiusMode::Drift);
        assert_eq!(bottom.pos, [50.0, 0.0]);

        let mut top = still_particle([50.0, 0.1], [0.0, -0.5]);
        top.advance(100.0, 80.0, RadiusMode::Drift);
        assert_eq!(top.pos, [50.0, 80.0]);
    }

    #[test]
    fn position_is_in_bounds_after_every_tick() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut particles: Vec<Particle> = (0..50)
            .map(|_| Particle::random(300.0, 200.0, &mut rng))
            .collect();
        // Fast particles cross the area many times over
        for p in &mut particles {
            p.vel = [p.vel[0] * 40.0, p.vel[1] * 40.0];
        }
        for _ in 0..2000 {
            for p in &mut particles {
                p.advance(300.0, 200.0, RadiusMode::Drift);
                assert!(p.pos[0] >= 0.0 && p.pos[0] <= 300.0);
                assert!(p.pos[1] >= 0.0 && p.pos[1] <= 200.0);
            }
        }
    }

    #[test]
    fn drift_accumulates_while_anchored_does_not() {
        let mut drift = still_particle([0.0, 0.0], [0.0, 0.0]);
        let mut anchored = drift;
        for _ in 0..40 {
            drift.advance(10.0, 10.0, RadiusMode::Drift);
            anchored.advance(10.0, 10.0, RadiusMode::Anchored);
        }
        let expected_drift: f64 = 2.0 + (1..=40).map(|k| (k as f64 * 0.02).sin() * 0.1).sum::<f64>();
        assert!((drift.size() - expected_drift).abs() < 1e-9);
        assert!((anchored.size() - (2.0 + anchored.pulse().sin() * 0.1)).abs() < 1e-12);
        assert!(drift.size() > anchored.size());
        assert_eq!(anchored.base_size(), 2.0);
    }

    #[test]
    fn render_draws_one_disc_and_restores_alpha() {
        let mut p = still_particle([4.0, 5.0], [0.0, 0.0]);
        p.advance(10.0, 10.0, RadiusMode::Drift);
        let mut surface = RecordingSurface::new();
        p.render(&mut surface).unwrap();

        assert_eq!(surface.calls.len(), 1);
        match &surface.calls[0] {
            DrawCall::Circle {
                center,
                radius,
                style,
                alpha,
            } => {
                assert_eq!(*center, [4.0, 5.0]);
                assert_eq!(*radius, p.size());
                assert_eq!(style, "#3b82f6");
                assert_eq!(*alpha, p.display_opacity());
            }
            other => panic!("unexpected draw {:?}", other),
        }
        assert_eq!(surface.alpha, 1.0);
    }

    #[test]
    fn failed_render_still_restores_alpha() {
        let p = still_particle([1.0, 1.0], [0.0, 0.0]);
        let mut surface = RecordingSurface::failing();
        assert_eq!(
            p.render(&mut surface),
            Err(SurfaceError::Draw("IndexSizeError".to_owned()))
        );
        assert_eq!(surface.circles(), 1);
        assert_eq!(surface.alpha, 1.0);
    }

    #[test]
    fn render_clamps_alpha_into_range() {
        let mut p = Particle::new([0.0, 0.0], [0.0, 0.0], 1.0, PALETTE[1], 0.95, 1.5);
        // pulse = 1.5 puts sin near its peak, pushing opacity past 1
        p.advance(10.0, 10.0, RadiusMode::Anchored);
        assert!(p.display_opacity() > 1.0);

        let mut surface = RecordingSurface::new();
        p.render(&mut surface).unwrap();
        match &surface.calls[0] {
            DrawCall::Circle { alpha, .. } => assert_eq!(*alpha, 1.0),
            other => panic!("unexpected draw {:?}", other),
        }
    }

    #[test]
    fn limit_speed_caps_each_axis() {
        let mut p = still_particle([0.0, 0.0], [7.0, -9.0]);
        p.limit_speed(2.0);
        assert_eq!(p.vel, [2.0, -2.0]);
    }
}
