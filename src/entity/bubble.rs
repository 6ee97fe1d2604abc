use super::{pick, pick_color, pick_count, pick_i32, Tick};
use crate::{
    assets::{BUBBLE_COLOR, BUBBLE_GLYPHS, CLICK_BUBBLE_COLORS},
    config::SimConfig,
    palette::{adjust, Backdrop},
    render::{Bounds, Frame},
};
use crossterm::style::Color;
use rand::{rngs::SmallRng, seq::SliceRandom};

fn glyph(rng: &mut SmallRng) -> char {
    BUBBLE_GLYPHS.choose(rng).copied().unwrap_or('o')
}

/// Ambient bubble that rises forever, restarting near the floor whenever it
/// reaches the surface.
pub(crate) struct Bubble {
    x: f32,
    y: f32,
    speed: f32,
    ch: char,
}

impl Bubble {
    pub(crate) fn spawn(rng: &mut SmallRng, cfg: &SimConfig, bounds: Bounds) -> Self {
        let mut b = Self {
            x: 0.0,
            y: 0.0,
            speed: 0.0,
            ch: glyph(rng),
        };
        b.reset(rng, cfg, bounds);
        b
    }

    fn reset(&mut self, rng: &mut SmallRng, cfg: &SimConfig, bounds: Bounds) {
        self.x = pick_i32(rng, 0, bounds.width as i32 - 1) as f32;
        self.y = pick(rng, (bounds.h() - 5.0, bounds.h() - 2.0));
        self.speed = pick(rng, cfg.bubble_speed);
    }

    pub(crate) fn update(&mut self, tick: &mut Tick) {
        self.y -= self.speed;
        if self.y <= 0.0 {
            self.reset(tick.rng, tick.cfg, tick.bounds);
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        frame.put_behind(
            self.x as i32,
            self.y as i32,
            self.ch,
            adjust(BUBBLE_COLOR, backdrop),
        );
    }
}

/// Short-lived bubble from a burst. Gone once it is old enough or reaches
/// the surface.
pub(crate) struct ClickBubble {
    x: f32,
    y: f32,
    speed: f32,
    lifetime: f32,
    age: f32,
    ch: char,
    color: Color,
}

impl ClickBubble {
    pub(crate) fn new(x: f32, y: f32, rng: &mut SmallRng, cfg: &SimConfig) -> Self {
        Self {
            x,
            y,
            speed: pick(rng, cfg.click_bubble_speed),
            lifetime: pick(rng, cfg.click_bubble_lifetime),
            age: 0.0,
            ch: glyph(rng),
            color: pick_color(rng, CLICK_BUBBLE_COLORS),
        }
    }

    /// Rises and ages one tick. Returns whether the bubble is still around.
    pub(crate) fn update(&mut self, tick: &mut Tick) -> bool {
        self.y -= self.speed;
        self.age += tick.dt();
        self.age < self.lifetime && self.y > 0.0
    }

    pub(crate) fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        frame.put_behind(
            self.x as i32,
            self.y as i32,
            self.ch,
            adjust(self.color, backdrop),
        );
    }
}

/// Scatters a burst of click-bubbles around (x, y), clamped inside the tank.
pub(crate) fn burst(
    x: f32,
    y: f32,
    rng: &mut SmallRng,
    cfg: &SimConfig,
    bounds: Bounds,
) -> Vec<ClickBubble> {
    let n = pick_count(rng, cfg.burst_count);
    let spread = cfg.burst_spread;
    let max_x = (bounds.w() - 1.0).max(0.0);
    let max_y = (bounds.h() - 2.0).max(1.0);
    (0..n)
        .map(|_| {
            let bx = (x + pick(rng, (-spread, spread))).clamp(0.0, max_x);
            let by = (y + pick(rng, (-5.0, 5.0))).clamp(1.0, max_y);
            ClickBubble::new(bx, by, rng, cfg)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::testing::Harness;

    #[test]
    fn ambient_bubbles_start_near_the_floor_and_recycle() {
        let mut h = Harness::new(60, 30);
        let mut b = Bubble::spawn(&mut h.rng, &h.cfg, h.bounds);
        assert!(b.y >= 25.0 && b.y <= 28.0);
        let mut recycled = false;
        for _ in 0..400 {
            let before = b.y;
            b.update(&mut h.tick());
            assert!(b.y > 0.0);
            if b.y > before {
                recycled = true;
                assert!(b.y >= 25.0);
            }
        }
        assert!(recycled);
    }

    #[test]
    fn bubbles_never_cover_anything() {
        let mut h = Harness::new(60, 30);
        let b = Bubble::spawn(&mut h.rng, &h.cfg, h.bounds);
        let mut frame = Frame::new(h.bounds);
        frame.put(b.x as i32, b.y as i32, '>', Color::Red);
        b.draw(&mut frame, Backdrop::Night);
        assert_eq!(frame.get(b.x as i32, b.y as i32).map(|c| c.ch), Some('>'));
    }

    #[test]
    fn burst_stays_inside_the_tank() {
        let mut h = Harness::new(60, 30);
        let bubbles = burst(2.0, 2.0, &mut h.rng, &h.cfg, h.bounds);
        assert!((30..=40).contains(&bubbles.len()));
        for b in &bubbles {
            assert!(b.x >= 0.0 && b.x <= 59.0);
            assert!(b.y >= 1.0 && b.y <= 28.0);
            assert!(b.lifetime >= 4.0 && b.lifetime <= 8.0);
        }
    }

    #[test]
    fn click_bubbles_expire() {
        let mut h = Harness::new(60, 300);
        let mut b = ClickBubble::new(10.0, 290.0, &mut h.rng, &h.cfg);
        let mut ticks = 0;
        while b.update(&mut h.tick()) {
            ticks += 1;
            assert!(ticks <= 80);
        }
        assert!(b.age >= b.lifetime || b.y <= 0.0);
    }
}
