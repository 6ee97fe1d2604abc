use super::{
    food::FoodId, pick, pick_count, pick_i32, swimmer::Motion, Direction, Livery, Swimmer, Tick,
};
use crate::{
    art::{ArtGrid, Tint},
    assets::{fish_styles, palette, FishCategory},
    config::SimConfig,
    palette::Backdrop,
    render::{Bounds, Frame},
};
use crossterm::style::Color;
use rand::{rngs::SmallRng, seq::SliceRandom};
use std::f32::consts::TAU;

/// A formation of identical small fish moving as one. Member offsets are
/// scattered in an ellipse once and never recomputed; only the anchor moves.
pub(crate) struct School {
    motion: Motion,
    offsets: Vec<(f32, f32)>,
    formation_width: f32,
    formation_height: f32,
    forward: ArtGrid,
    backward: ArtGrid,
    livery: Livery,
}

impl School {
    pub(crate) fn spawn(rng: &mut SmallRng, cfg: &SimConfig, bounds: Bounds) -> Self {
        let (forward, backward, livery) = match fish_styles(FishCategory::SingleLine).choose(rng)
        {
            Some(style) => (
                ArtGrid::normalize(&style.forward),
                ArtGrid::normalize(&style.backward),
                Livery::from_palette(rng, palette(style.palette)),
            ),
            None => (
                ArtGrid::placeholder(),
                ArtGrid::placeholder(),
                Livery::single(Color::White),
            ),
        };

        let size = pick_count(rng, cfg.school_size);
        let fw = pick(rng, cfg.school_width).round();
        let fh = pick(rng, cfg.school_height).round();
        let (cx, cy) = (fw / 2.0, fh / 2.0);
        let offsets = (0..size)
            .map(|_| {
                let angle = pick(rng, (0.0, TAU));
                let rx = pick(rng, (0.3, 1.0)) * (fw / 2.5);
                let ry = pick(rng, (0.3, 1.0)) * (fh / 2.5);
                let ox = cx + rx * angle.cos() + pick(rng, (-0.8, 0.8));
                let oy = cy + ry * angle.sin() + pick(rng, (-0.5, 0.5));
                (ox.clamp(0.0, fw - 1.0), oy.clamp(0.0, fh - 1.0))
            })
            .collect();

        let x = pick_i32(rng, 0, bounds.width as i32 - 1) as f32;
        let y = pick_i32(rng, 1, bounds.height as i32 - fh as i32 - 2) as f32;
        let speed = pick(rng, cfg.school_speed);
        Self {
            motion: Motion::new(x, y, Direction::random(rng), speed),
            offsets,
            formation_width: fw,
            formation_height: fh,
            forward,
            backward,
            livery,
        }
    }

    fn art(&self) -> &ArtGrid {
        match self.motion.direction() {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    pub(crate) fn member_positions(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.offsets
            .iter()
            .map(|(ox, oy)| (self.motion.x + ox, self.motion.y + oy))
    }
}

impl Swimmer for School {
    fn update(&mut self, tick: &mut Tick) {
        self.motion.step(tick.dt(), None);
        let total = self.formation_width + self.art().width() as f32;
        self.motion.wrap(tick.bounds.w(), total);
    }

    fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        let color = self.livery.paint(Tint::Base, backdrop);
        let art = self.art();
        for (x, y) in self.member_positions() {
            art.draw(frame, x as i32, y as i32, |_| color);
        }
    }

    fn startle(&mut self, tick: &mut Tick) {
        let cfg = tick.cfg;
        self.motion.begin_startle(
            tick.rng,
            cfg.school_startle_multiplier,
            cfg.school_startle_duration,
        );
    }

    fn turn_around(&mut self) {
        self.motion.turn_around();
    }

    /// Schools keep formation and never break off for food.
    fn seek_food(&mut self, _target: FoodId, _cfg: &SimConfig) {}

    fn center(&self) -> (f32, f32) {
        (
            self.motion.x + self.formation_width / 2.0,
            self.motion.y + self.formation_height / 2.0,
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

    fn wants_food(&self) -> bool {
        false
    }
}
