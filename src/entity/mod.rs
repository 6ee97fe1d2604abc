//! Everything that lives in the tank.
//!
//! Swimmers (fish and their relatives, schools, the shark) share the
//! [`Swimmer`] contract and the movement core in [`swimmer`]. The rest are
//! simple animators the scene owns directly.

pub(crate) mod bubble;
pub(crate) mod crab;
pub(crate) mod decoration;
pub(crate) mod eel;
pub(crate) mod fish;
pub(crate) mod floor;
pub(crate) mod food;
pub(crate) mod jellyfish;
pub(crate) mod puffer;
pub(crate) mod school;
pub(crate) mod seahorse;
pub(crate) mod seaweed;
pub(crate) mod shark;
pub(crate) mod swimmer;

use crate::{
    art::Tint,
    assets::Palette,
    config::{Count, SimConfig, Span},
    palette::{adjust, Backdrop},
    render::{Bounds, Frame},
    sound::Cue,
};
use crossterm::style::Color;
use rand::{rngs::SmallRng, seq::SliceRandom, Rng};

use self::{
    eel::Eel,
    fish::Fish,
    food::{FoodId, FoodPellet},
    puffer::Puffer,
    seahorse::{BabySeahorse, Seahorse},
    swimmer::Behavior,
};

/// Timers count down in `frame_interval` steps; anything this close to zero
/// has run out.
pub(crate) const TIMER_EPSILON: f32 = 1e-4;

pub(crate) fn expired(timer: f32) -> bool {
    timer <= TIMER_EPSILON
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub(crate) fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub(crate) fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    pub(crate) fn random(rng: &mut SmallRng) -> Self {
        if rng.gen_bool(0.5) {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Direction that heads from `from` toward `to` along x.
    pub(crate) fn toward(from: f32, to: f32) -> Self {
        if to >= from {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/* -----------------------------
   Random helpers that tolerate degenerate ranges (tiny terminals)
------------------------------ */

pub(crate) fn pick(rng: &mut SmallRng, (lo, hi): Span) -> f32 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

pub(crate) fn pick_count(rng: &mut SmallRng, (lo, hi): Count) -> u32 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Integer in `lo..=hi`, or `lo` when the range is empty.
pub(crate) fn pick_i32(rng: &mut SmallRng, lo: i32, hi: i32) -> i32 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

pub(crate) fn chance(rng: &mut SmallRng, p: f32) -> bool {
    rng.gen::<f32>() < p
}

pub(crate) fn pick_color(rng: &mut SmallRng, colors: &[Color]) -> Color {
    colors.choose(rng).copied().unwrap_or(Color::White)
}

/// Resolved colors for one creature, fixed at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Livery {
    body: Color,
    fin: Color,
}

impl Livery {
    pub(crate) fn single(color: Color) -> Self {
        Self {
            body: color,
            fin: color,
        }
    }

    pub(crate) fn from_palette(rng: &mut SmallRng, palette: Palette) -> Self {
        match palette {
            Palette::Single(colors) => Self::single(pick_color(rng, colors)),
            Palette::Keyed { body, fin } => Self {
                body: pick_color(rng, body),
                fin: pick_color(rng, fin),
            },
        }
    }

    pub(crate) fn paint(&self, tint: Tint, backdrop: Backdrop) -> Color {
        let c = match tint {
            Tint::Base | Tint::Body => self.body,
            Tint::Fin => self.fin,
        };
        adjust(c, backdrop)
    }
}

/// Everything an entity may touch while it advances one tick.
pub(crate) struct Tick<'a> {
    pub(crate) cfg: &'a SimConfig,
    pub(crate) rng: &'a mut SmallRng,
    pub(crate) bounds: Bounds,
    pub(crate) food: &'a [FoodPellet],
    pub(crate) cues: &'a mut Vec<Cue>,
}

impl Tick<'_> {
    pub(crate) fn dt(&self) -> f32 {
        self.cfg.frame_interval
    }

    pub(crate) fn food_x(&self, id: FoodId) -> Option<f32> {
        self.food.iter().find(|p| p.id() == id).map(|p| p.x())
    }
}

/// Shared contract of fish and kin.
pub(crate) trait Swimmer {
    fn update(&mut self, tick: &mut Tick);
    fn draw(&self, frame: &mut Frame, backdrop: Backdrop);
    fn startle(&mut self, tick: &mut Tick);
    /// The only sanctioned way to reverse; keeps speed sign and art in step.
    fn turn_around(&mut self);
    fn seek_food(&mut self, target: FoodId, cfg: &SimConfig);
    fn center(&self) -> (f32, f32);
    /// Top-left corner of the current art.
    fn position(&self) -> (f32, f32);
    fn direction(&self) -> Direction;
    /// Signed speed; zero while the creature is held in place.
    fn speed(&self) -> f32;

    fn is_active(&self) -> bool {
        true
    }

    /// Whether food drops should draw this swimmer's attention.
    fn wants_food(&self) -> bool {
        true
    }

    fn behavior(&self) -> Behavior {
        Behavior::Swimming
    }
}

pub(crate) fn within(swimmer: &dyn Swimmer, x: f32, y: f32, radius: f32) -> bool {
    let (cx, cy) = swimmer.center();
    let (dx, dy) = (cx - x, cy - y);
    dx * dx + dy * dy <= radius * radius
}

/// Identity of a creature within one scene; never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct CreatureId(pub(crate) u32);

/// Individual swimmers the scene keeps in one collection.
pub(crate) enum Creature {
    Fish(Fish),
    Puffer(Puffer),
    Seahorse(Seahorse),
    Baby(BabySeahorse),
    Eel(Eel),
}

impl Creature {
    pub(crate) fn as_swimmer(&self) -> &dyn Swimmer {
        match self {
            Creature::Fish(f) => f,
            Creature::Puffer(p) => p,
            Creature::Seahorse(s) => s,
            Creature::Baby(b) => b,
            Creature::Eel(e) => e,
        }
    }

    pub(crate) fn as_swimmer_mut(&mut self) -> &mut dyn Swimmer {
        match self {
            Creature::Fish(f) => f,
            Creature::Puffer(p) => p,
            Creature::Seahorse(s) => s,
            Creature::Baby(b) => b,
            Creature::Eel(e) => e,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Creature::Fish(_) => "fish",
            Creature::Puffer(_) => "puffer",
            Creature::Seahorse(_) => "seahorse",
            Creature::Baby(_) => "baby seahorse",
            Creature::Eel(_) => "eel",
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use rand::SeedableRng;

    /// Owns what a [`Tick`] borrows so tests can build one in a line.
    pub(crate) struct Harness {
        pub(crate) cfg: SimConfig,
        pub(crate) rng: SmallRng,
        pub(crate) bounds: Bounds,
        pub(crate) food: Vec<FoodPellet>,
        pub(crate) cues: Vec<Cue>,
    }

    impl Harness {
        pub(crate) fn new(width: u16, height: u16) -> Self {
            Self {
                cfg: SimConfig::default(),
                rng: SmallRng::seed_from_u64(7),
                bounds: Bounds::new(width, height),
                food: Vec::new(),
                cues: Vec::new(),
            }
        }

        pub(crate) fn tick(&mut self) -> Tick<'_> {
            Tick {
                cfg: &self.cfg,
                rng: &mut self.rng,
                bounds: self.bounds,
                food: &self.food,
                cues: &mut self.cues,
            }
        }
    }
}
