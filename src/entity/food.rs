use super::{expired, pick, pick_color, pick_count, Tick};
use crate::{
    assets::{FOOD_COLORS, FOOD_GLYPHS},
    config::SimConfig,
    render::Frame,
};
use crossterm::style::Color;
use rand::{rngs::SmallRng, seq::SliceRandom, Rng};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FoodId(pub(crate) u32);

#[derive(Clone, Copy, Debug)]
struct Particle {
    dx: f32,
    dy: f32,
    ch: char,
    color: Color,
}

/// A sinking target point dressed up as a cluster of crumbs. Fish only ever
/// look at the center; the crumbs are decoration with frozen offsets.
#[derive(Clone, Debug)]
pub(crate) struct FoodPellet {
    id: FoodId,
    x: f32,
    y: f32,
    lifetime: f32,
    particles: Vec<Particle>,
}

impl FoodPellet {
    pub(crate) fn new(id: FoodId, x: f32, y: f32, cfg: &SimConfig, rng: &mut SmallRng) -> Self {
        let n = pick_count(rng, cfg.food_particles);
        let particles = (0..n)
            .map(|_| Particle {
                dx: pick(rng, (-3.5, 3.5)),
                dy: pick(rng, (-2.5, 2.5)),
                ch: FOOD_GLYPHS.choose(rng).copied().unwrap_or('.'),
                color: pick_color(rng, FOOD_COLORS),
            })
            .collect();
        Self {
            id,
            x,
            y,
            lifetime: cfg.food_lifetime,
            particles,
        }
    }

    pub(crate) fn id(&self) -> FoodId {
        self.id
    }

    pub(crate) fn x(&self) -> f32 {
        self.x
    }

    pub(crate) fn y(&self) -> f32 {
        self.y
    }

    #[cfg(test)]
    pub(crate) fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Sinks, drifts and ages one tick. Returns whether the pellet is still
    /// in play.
    pub(crate) fn update(&mut self, tick: &mut Tick) -> bool {
        self.y += tick.cfg.food_sink_speed;
        self.x += tick.rng.gen_range(-0.4..=0.4);
        self.lifetime -= tick.dt();
        !expired(self.lifetime) && self.y < tick.bounds.floor_row() as f32
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        for p in &self.particles {
            let x = (self.x + p.dx) as i32;
            let y = (self.y + p.dy) as i32;
            frame.put(x, y, p.ch, p.color);
        }
    }
}
