//! Eel: a rigid head dragging a chain of body points.
//!
//! The head rides a sine path disturbed by several Perlin fields sampled by
//! animation time. Each body point chases the point in front of it (already
//! moved this tick), so the wave travels down the body with growing lag
//! toward the tail. The eel never wraps; once the tail has left the tank it
//! reports inactive and the scene drops it.

use super::{food::FoodId, pick, pick_count, pick_i32, swimmer::Motion, Direction, Swimmer, Tick};
use crate::{
    art::ArtGrid,
    assets::{EEL_COLOR, EEL_HEAD_BACKWARD, EEL_HEAD_FORWARD},
    config::SimConfig,
    palette::{adjust, Backdrop},
    render::{Bounds, Frame},
};
use noise::{NoiseFn, Perlin};
use rand::{rngs::SmallRng, Rng};
use std::f32::consts::TAU;

const WAVE_SPEED: f32 = 2.0;
const WAVELENGTH: f32 = 150.0;
const NECK_AMPLITUDE: f32 = 1.2;
const MAX_THICKNESS: f32 = 4.5;
/// Fraction of the spacing two neighbours may close to before being pushed apart.
const MIN_GAP: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Segment {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

/// Independent smooth noise sources, one per disturbance.
struct NoiseBank {
    amplitude: Perlin,
    frequency: Perlin,
    drift: Perlin,
    jitter: Perlin,
    body: Perlin,
}

impl NoiseBank {
    fn new(rng: &mut SmallRng) -> Self {
        Self {
            amplitude: Perlin::new(rng.gen()),
            frequency: Perlin::new(rng.gen()),
            drift: Perlin::new(rng.gen()),
            jitter: Perlin::new(rng.gen()),
            body: Perlin::new(rng.gen()),
        }
    }

    fn sample(field: &Perlin, t: f32, lane: f32) -> f32 {
        field.get([t as f64, lane as f64]) as f32
    }
}

/// Outline glyph for a body point given the vertical change from the point in
/// front of it.
pub(crate) fn slope_char(y_delta: f32, top: bool) -> char {
    match (top, y_delta) {
        (_, d) if d < -1.2 => '/',
        (true, d) if d < -0.3 => '\'',
        (false, d) if d < -0.3 => '-',
        (true, d) if d <= 0.3 => '-',
        (false, d) if d <= 0.3 => '_',
        (true, d) if d <= 1.2 => '"',
        (false, d) if d <= 1.2 => '/',
        _ => '\\',
    }
}

pub(crate) struct Eel {
    motion: Motion,
    base_y: f32,
    head_amplitude: f32,
    head_frequency: f32,
    time: f32,
    spacing: f32,
    segments: Vec<Segment>,
    noise: NoiseBank,
    forward: ArtGrid,
    backward: ArtGrid,
    width: f32,
    height: f32,
}

impl Eel {
    pub(crate) fn spawn(rng: &mut SmallRng, cfg: &SimConfig, bounds: Bounds) -> Self {
        let forward = ArtGrid::lines_or_placeholder(EEL_HEAD_FORWARD);
        let backward = ArtGrid::lines_or_placeholder(EEL_HEAD_BACKWARD);
        let head_w = forward.width() as i32;
        let head_h = forward.height() as i32;
        let h = bounds.height as i32;

        let x = pick_i32(rng, 0, bounds.width as i32 - head_w) as f32;
        let (mut lo, mut hi) = (5, h - head_h - 10);
        if lo >= hi {
            lo = 1;
            hi = (h - head_h - 2).max(1);
        }
        let base_y = pick_i32(rng, lo, hi) as f32;
        let direction = Direction::random(rng);
        let speed = pick(rng, cfg.eel_speed);

        let mut eel = Self {
            motion: Motion::new(x, base_y, direction, speed),
            base_y,
            head_amplitude: pick(rng, (0.2, 1.0)),
            head_frequency: pick(rng, (0.04, 0.08)),
            time: 0.0,
            spacing: cfg.eel_spacing.max(0.1),
            segments: Vec::new(),
            noise: NoiseBank::new(rng),
            forward,
            backward,
            width: bounds.w(),
            height: bounds.h(),
        };
        let n = pick_count(rng, cfg.eel_segments).max(2) as usize;
        eel.lay_out_body(n);
        eel
    }

    fn head(&self) -> &ArtGrid {
        match self.motion.direction() {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    /// Where the neck joins the head.
    fn anchor(&self) -> (f32, f32) {
        let y = self.motion.y + 3.0;
        match self.motion.direction() {
            Direction::Forward => (self.motion.x - 1.0, y),
            Direction::Backward => (self.motion.x + self.head().width() as f32, y),
        }
    }

    /// Unit step from the head toward the tail.
    fn trailing(&self) -> f32 {
        -self.motion.direction().sign()
    }

    fn lay_out_body(&mut self, n: usize) {
        let (ax, ay) = self.anchor();
        let back = self.trailing();
        self.segments = (0..n)
            .map(|i| Segment {
                x: ax + back * self.spacing * (i + 1) as f32,
                y: ay,
            })
            .collect();
    }

    #[cfg(test)]
    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn tail_x(&self) -> f32 {
        self.segments.last().map(|s| s.x).unwrap_or(self.motion.x)
    }

    fn progress(&self, i: usize) -> f32 {
        i as f32 / (self.segments.len().max(2) - 1) as f32
    }

    fn move_head(&mut self, dt: f32) {
        self.motion.step(dt, None);
        let t = self.time;
        let amp = self.head_amplitude
            * (1.0 + 0.5 * NoiseBank::sample(&self.noise.amplitude, t * 0.1, 0.5));
        let freq = self.head_frequency
            * (1.0 + 0.3 * NoiseBank::sample(&self.noise.frequency, t * 0.1, 1.5));
        let drift = 1.5 * NoiseBank::sample(&self.noise.drift, t * 0.05, 2.5);
        let jitter = 0.15 * NoiseBank::sample(&self.noise.jitter, t * 3.0, 3.5);
        let y = self.base_y + amp * (self.motion.x * freq).sin() + drift + jitter;
        let max_y = (self.height - self.head().height() as f32 - 2.0).max(1.0);
        self.motion.y = y.clamp(1.0, max_y);
    }

    fn wave(&self, i: usize) -> f32 {
        let amp = NECK_AMPLITUDE * (1.0 - self.progress(i)) + 0.05;
        let phase = self.time * WAVE_SPEED - i as f32 * (TAU / WAVELENGTH) * 4.0;
        amp * phase.sin()
    }

    fn flow_body(&mut self) {
        let (mut lx, mut ly) = self.anchor();
        let back = self.trailing();
        let min_gap = self.spacing * MIN_GAP;
        let mut prev_wave = 0.0;
        for i in 0..self.segments.len() {
            let p = self.progress(i);
            let wave = self.wave(i);
            let perturb = 0.1 * NoiseBank::sample(&self.noise.body, self.time * 0.5, i as f32 * 0.37);
            let ideal_x = lx + back * self.spacing;
            let ideal_y = ly + (wave - prev_wave) + perturb;
            prev_wave = wave;

            let lerp = 0.8 * (1.0 - p) + 0.35 * p;
            let seg = &mut self.segments[i];
            seg.x += (ideal_x - seg.x) * lerp;
            seg.y += (ideal_y - seg.y) * lerp;

            let (dx, dy) = (seg.x - lx, seg.y - ly);
            let d = (dx * dx + dy * dy).sqrt();
            if d < min_gap {
                if d > f32::EPSILON {
                    seg.x = lx + dx / d * min_gap;
                    seg.y = ly + dy / d * min_gap;
                } else {
                    seg.x = lx + back * min_gap;
                }
            }
            lx = seg.x;
            ly = seg.y;
        }
    }

    fn thickness(&self, i: usize) -> i32 {
        let base = MAX_THICKNESS * (1.0 - self.progress(i)).max(0.0).sqrt();
        let wobble = 0.4 * NoiseBank::sample(&self.noise.body, self.time * 0.2, 100.0 + i as f32 * 0.5);
        ((base + wobble) as i32).max(1)
    }
}

impl Swimmer for Eel {
    fn update(&mut self, tick: &mut Tick) {
        self.width = tick.bounds.w();
        self.height = tick.bounds.h();
        self.time += tick.dt();
        self.move_head(tick.dt());
        self.flow_body();
    }

    fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        let color = adjust(EEL_COLOR, backdrop);
        self.head()
            .draw(frame, self.motion.x as i32, self.motion.y as i32, |_| color);

        for (i, seg) in self.segments.iter().enumerate() {
            let x = seg.x as i32;
            let prev_y = if i > 0 { self.segments[i - 1].y } else { seg.y };
            let delta = seg.y - prev_y;
            let t = self.thickness(i);
            if t > 1 {
                let half = t as f32 / 2.0;
                let top = (seg.y - half + 0.5) as i32;
                let bottom = (seg.y + half - 0.5) as i32;
                frame.put(x, top, slope_char(delta, true), color);
                if bottom != top {
                    frame.put(x, bottom, slope_char(delta, false), color);
                }
            } else {
                frame.put(x, seg.y as i32, '.', color);
            }
        }
    }

    fn startle(&mut self, tick: &mut Tick) {
        let cfg = tick.cfg;
        self.motion
            .begin_startle(tick.rng, cfg.eel_startle_multiplier, cfg.eel_startle_duration);
    }

    /// Eels hold their course.
    fn turn_around(&mut self) {}

    fn seek_food(&mut self, _target: FoodId, _cfg: &SimConfig) {}

    fn center(&self) -> (f32, f32) {
        let head = self.head();
        (
            self.motion.x + head.width() as f32 / 2.0,
            self.motion.y + head.height() as f32 / 2.0,
        )
    }

    fn position(&self) -> (f32, f32) {
        (self.motion.x, self.motion.y)
    }

    fn direction(&self) -> Direction {
        self.motion.direction()
    }

    fn speed(&self) -> f32 {
        self.motion.speed()
    }

    /// Inactive once the tail has cleared the far edge.
    fn is_active(&self) -> bool {
        match self.motion.direction() {
            Direction::Forward => self.tail_x() <= self.width,
            Direction::Backward => self.tail_x() >= 0.0,
        }
    }

    fn wants_food(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::testing::Harness;

    fn eel_heading(h: &mut Harness, direction: Direction) -> Eel {
        let mut e = Eel::spawn(&mut h.rng, &h.cfg, h.bounds);
        if e.direction() != direction {
            e.motion.turn_around();
            let n = e.segments.len();
            e.lay_out_body(n);
        }
        e
    }

    #[test]
    fn body_is_laid_out_behind_the_head() {
        let mut h = Harness::new(120, 30);
        let e = eel_heading(&mut h, Direction::Forward);
        assert!((50..=75).contains(&e.segments().len()));
        let (ax, _) = e.anchor();
        assert!(e.segments()[0].x < ax);
        assert!(e.segments().windows(2).all(|w| w[1].x < w[0].x));
    }

    #[test]
    fn neighbours_never_bunch_up() {
        let mut h = Harness::new(120, 30);
        let mut e = eel_heading(&mut h, Direction::Backward);
        for _ in 0..300 {
            e.update(&mut h.tick());
            let min_gap = e.spacing * MIN_GAP - 1e-3;
            for w in e.segments().windows(2) {
                let d = ((w[1].x - w[0].x).powi(2) + (w[1].y - w[0].y).powi(2)).sqrt();
                assert!(d >= min_gap, "gap {d}");
            }
        }
    }

    #[test]
    fn tail_past_the_edge_means_inactive() {
        let mut h = Harness::new(120, 30);
        let mut e = eel_heading(&mut h, Direction::Forward);
        assert!(e.is_active());
        for s in e.segments.iter_mut() {
            s.x = 121.0;
        }
        assert!(!e.is_active());

        let mut e = eel_heading(&mut h, Direction::Backward);
        assert!(e.is_active());
        if let Some(tail) = e.segments.last_mut() {
            tail.x = -0.5;
        }
        assert!(!e.is_active());
    }

    #[test]
    fn eel_swims_off_and_goes_inactive() {
        let mut h = Harness::new(120, 30);
        let mut e = eel_heading(&mut h, Direction::Forward);
        let mut ticks = 0;
        while e.is_active() {
            e.update(&mut h.tick());
            ticks += 1;
            assert!(ticks < 5000);
        }
        assert!(e.tail_x() > 120.0);
    }

    #[test]
    fn eel_ignores_turn_and_food() {
        let mut h = Harness::new(120, 30);
        let mut e = Eel::spawn(&mut h.rng, &h.cfg, h.bounds);
        let d = e.direction();
        e.turn_around();
        let cfg = h.cfg.clone();
        e.seek_food(FoodId(1), &cfg);
        assert_eq!(e.direction(), d);
        assert!(!e.wants_food());
    }

    #[test]
    fn slope_table() {
        assert_eq!(slope_char(0.0, true), '-');
        assert_eq!(slope_char(0.0, false), '_');
        assert_eq!(slope_char(-2.0, true), '/');
        assert_eq!(slope_char(-0.5, true), '\'');
        assert_eq!(slope_char(-0.5, false), '-');
        assert_eq!(slope_char(1.0, true), '"');
        assert_eq!(slope_char(1.0, false), '/');
        assert_eq!(slope_char(2.0, false), '\\');
    }
}
