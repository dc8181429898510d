//! Decorative falling-light layer behind the chart.
//!
//! A fixed-capacity pool of beams drifts down the viewport while a handful of
//! static specks twinkle. Dead beams are recycled in place, so the layer
//! allocates once at startup and never grows, no matter how long the app runs.

use egui::{Color32, Painter, Rect, Stroke, pos2};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::constants::ambient::{
    BEAM_FADE_RATE, MAX_BEAMS, SPAWN_INTERVAL_MAX, SPAWN_INTERVAL_MIN, SPECK_COUNT,
};

#[derive(Debug, Clone, Copy)]
struct Beam {
    /// Horizontal position, fraction of viewport width
    x: f32,
    /// Head position, fraction of viewport height
    y: f32,
    /// Fall speed in viewport heights per second
    speed: f32,
    /// Trail length, fraction of viewport height
    length: f32,
    /// Remaining brightness, 1 at spawn, 0 when dead
    life: f32,
}

#[derive(Debug, Clone, Copy)]
struct Speck {
    x: f32,
    y: f32,
    /// Twinkle phase offset in seconds
    phase: f32,
}

/// Pool of ambient beams plus static background specks
pub struct BeamField {
    beams: Vec<Beam>,
    specks: Vec<Speck>,
    spawn_timer: f32,
    clock: f32,
    rng: StdRng,
}

impl BeamField {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let specks = (0..SPECK_COUNT)
            .map(|_| Speck {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                phase: rng.random_range(0.0..std::f32::consts::TAU),
            })
            .collect();

        Self {
            beams: Vec::with_capacity(MAX_BEAMS),
            specks,
            spawn_timer: 0.0,
            clock: 0.0,
            rng,
        }
    }

    /// Number of beams currently alive
    pub fn live_beams(&self) -> usize {
        self.beams.iter().filter(|b| b.life > 0.0).count()
    }

    /// Advance the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, 0.1);
        self.clock += dt;

        for beam in &mut self.beams {
            beam.y += beam.speed * dt;
            beam.life -= BEAM_FADE_RATE * dt / beam.speed.max(0.2);
            if beam.y - beam.length > 1.0 {
                beam.life = 0.0;
            }
        }

        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn_timer = self
                .rng
                .random_range(SPAWN_INTERVAL_MIN..SPAWN_INTERVAL_MAX);
            self.spawn();
        }
    }

    /// Revive a dead slot, or fill a free one. At capacity with every beam
    /// alive, the spawn is skipped rather than growing the pool.
    fn spawn(&mut self) {
        let beam = Beam {
            x: self.rng.random_range(0.02..0.98),
            y: -self.rng.random_range(0.05..0.25),
            speed: self.rng.random_range(0.25..0.6),
            length: self.rng.random_range(0.08..0.22),
            life: 1.0,
        };
        if let Some(slot) = self.beams.iter_mut().find(|b| b.life <= 0.0) {
            *slot = beam;
        } else if self.beams.len() < MAX_BEAMS {
            self.beams.push(beam);
        }
    }

    /// Paint beams and specks into `rect`.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        profiling::scope!("ambient_paint");

        for speck in &self.specks {
            let twinkle = 0.5 + 0.5 * (self.clock * 1.3 + speck.phase).sin();
            let alpha = (40.0 + 60.0 * twinkle) as u8;
            painter.circle_filled(
                pos2(
                    rect.left() + speck.x * rect.width(),
                    rect.top() + speck.y * rect.height(),
                ),
                1.0,
                Color32::from_rgba_unmultiplied(200, 210, 255, alpha),
            );
        }

        for beam in self.beams.iter().filter(|b| b.life > 0.0) {
            let x = rect.left() + beam.x * rect.width();
            let head = rect.top() + beam.y * rect.height();
            let tail = head - beam.length * rect.height();
            let alpha = (90.0 * beam.life.clamp(0.0, 1.0)) as u8;
            painter.line_segment(
                [pos2(x, tail), pos2(x, head)],
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(160, 180, 255, alpha)),
            );
        }
    }
}

impl Default for BeamField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_never_exceeds_capacity() {
        let mut field = BeamField::with_rng(StdRng::seed_from_u64(7));
        // Simulate a minute at 60 fps; far more spawn attempts than slots
        for _ in 0..3600 {
            field.update(1.0 / 60.0);
            assert!(field.live_beams() <= MAX_BEAMS);
            assert!(field.beams.len() <= MAX_BEAMS);
        }
    }

    #[test]
    fn test_beams_eventually_spawn_and_die() {
        let mut field = BeamField::with_rng(StdRng::seed_from_u64(42));
        for _ in 0..120 {
            field.update(1.0 / 60.0);
        }
        assert!(field.live_beams() > 0);

        // With no further spawns, every beam falls off screen and dies
        field.spawn_timer = f32::MAX;
        for _ in 0..6000 {
            field.update(1.0 / 60.0);
        }
        assert_eq!(field.live_beams(), 0);
    }

    #[test]
    fn test_update_tolerates_zero_dt() {
        let mut field = BeamField::with_rng(StdRng::seed_from_u64(1));
        field.update(0.0);
        field.update(-1.0); // clamped, must not panic or rewind
        assert!(field.live_beams() <= MAX_BEAMS);
    }
}
