use super::{food::FoodId, pick, pick_color, pick_i32, Direction, Swimmer, Tick};
use crate::{
    art::ArtGrid,
    assets::{fallback_shark_frames, SHARK_COLORS},
    config::SimConfig,
    palette::{adjust, Backdrop},
    render::{Bounds, Frame},
};
use crossterm::style::Color;
use rand::rngs::SmallRng;
use tracing::debug;

/// Updates each animation frame is held for.
const TICKS_PER_FRAME: u32 = 2;

/// Startle broadcast from the shark's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Pulse {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) radius: f32,
}

/// One pass across the upper band, right to left, then gone for good.
pub(crate) struct Shark {
    x: f32,
    y: f32,
    speed: f32,
    frames: Vec<ArtGrid>,
    frame: usize,
    frame_ticks: u32,
    color: Color,
    startle_radius: f32,
    last_pulse_x: f32,
    pending_pulse: bool,
    active: bool,
}

impl Shark {
    pub(crate) fn spawn(
        frames: &[ArtGrid],
        rng: &mut SmallRng,
        cfg: &SimConfig,
        bounds: Bounds,
    ) -> Self {
        let frames = if frames.is_empty() {
            fallback_shark_frames()
        } else {
            frames.to_vec()
        };
        let x = bounds.w() + 5.0;
        let y = pick_i32(rng, 2, (bounds.height as i32 / 4).min(8)) as f32;
        Self {
            x,
            y,
            speed: pick(rng, cfg.shark_speed),
            frames,
            frame: 0,
            frame_ticks: 0,
            color: pick_color(rng, SHARK_COLORS),
            startle_radius: cfg.shark_startle_radius,
            last_pulse_x: x,
            pending_pulse: false,
            active: true,
        }
    }

    fn art(&self) -> &ArtGrid {
        &self.frames[self.frame % self.frames.len()]
    }

    /// Hands out the startle pulse raised by the last update, if any.
    pub(crate) fn take_pulse(&mut self) -> Option<Pulse> {
        if !std::mem::take(&mut self.pending_pulse) {
            return None;
        }
        let (x, y) = self.center();
        Some(Pulse {
            x,
            y,
            radius: self.startle_radius,
        })
    }
}

impl Swimmer for Shark {
    fn update(&mut self, _tick: &mut Tick) {
        if !self.active {
            return;
        }
        self.frame_ticks += 1;
        if self.frame_ticks >= TICKS_PER_FRAME {
            self.frame_ticks = 0;
            self.frame = (self.frame + 1) % self.frames.len();
        }
        self.x -= self.speed;
        if (self.x - self.last_pulse_x).abs() > 1.0 {
            self.pending_pulse = true;
            self.last_pulse_x = self.x;
        }
        if self.x + (self.art().width() as f32) < 0.0 {
            self.active = false;
            debug!("shark left the tank");
        }
    }

    fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        if !self.active {
            return;
        }
        let color = adjust(self.color, backdrop);
        self.art()
            .draw(frame, self.x as i32, self.y as i32, |_| color);
    }

    fn startle(&mut self, _tick: &mut Tick) {}

    fn turn_around(&mut self) {}

    fn seek_food(&mut self, _target: FoodId, _cfg: &SimConfig) {}

    fn center(&self) -> (f32, f32) {
        let art = self.art();
        (
            self.x + art.width() as f32 / 2.0,
            self.y + art.height() as f32 / 2.0,
        )
    }

    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn direction(&self) -> Direction {
        Direction::Backward
    }

    fn speed(&self) -> f32 {
        -self.speed
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn wants_food(&self) -> bool {
        false
    }
}
