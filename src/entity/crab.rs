use super::{pick, pick_i32, Direction, Tick, TIMER_EPSILON};
use crate::{
    art::ArtGrid,
    assets::{CRAB_COLOR, CRAB_FRAMES},
    config::SimConfig,
    palette::{adjust, Backdrop},
    render::{Bounds, Frame},
};
use rand::rngs::SmallRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Gait {
    Idle,
    Walking(Direction),
}

/// Bottom dweller that alternates between resting and short scuttles.
pub(crate) struct Crab {
    x: f32,
    y: i32,
    gait: Gait,
    frames: Vec<ArtGrid>,
    frame: usize,
    walk_speed: f32,
    idle_for: f32,
    walk_for: f32,
    timer: f32,
    anim_timer: f32,
}

impl Crab {
    pub(crate) fn spawn(rng: &mut SmallRng, cfg: &SimConfig, bounds: Bounds) -> Self {
        let frames: Vec<ArtGrid> = CRAB_FRAMES
            .iter()
            .map(|f| ArtGrid::lines_or_placeholder(f))
            .collect();
        let (w, h) = (frames[0].width() as i32, frames[0].height() as i32);
        Self {
            x: pick_i32(rng, 0, bounds.width as i32 - w) as f32,
            y: bounds.floor_row() - h,
            gait: Gait::Idle,
            frames,
            frame: 0,
            walk_speed: pick(rng, cfg.crab_speed),
            idle_for: pick(rng, cfg.crab_idle),
            walk_for: pick(rng, cfg.crab_walk),
            timer: 0.0,
            anim_timer: 0.0,
        }
    }

    #[cfg(test)]
    pub(crate) fn gait(&self) -> Gait {
        self.gait
    }

    #[cfg(test)]
    pub(crate) fn x(&self) -> f32 {
        self.x
    }

    fn art(&self) -> &ArtGrid {
        &self.frames[self.frame % self.frames.len()]
    }

    fn rest(&mut self, tick: &mut Tick, max_x: f32) {
        self.gait = Gait::Idle;
        self.timer = 0.0;
        self.frame = 0;
        self.idle_for = pick(tick.rng, tick.cfg.crab_idle);
        self.x = self.x.clamp(0.0, max_x);
    }

    pub(crate) fn update(&mut self, tick: &mut Tick) {
        let dt = tick.dt();
        let max_x = (tick.bounds.w() - self.art().width() as f32).max(0.0);
        match self.gait {
            Gait::Idle => {
                self.frame = 0;
                self.timer += dt;
                if self.timer + TIMER_EPSILON >= self.idle_for {
                    self.gait = Gait::Walking(Direction::random(tick.rng));
                    self.timer = 0.0;
                    self.walk_for = pick(tick.rng, tick.cfg.crab_walk);
                }
            }
            Gait::Walking(dir) => {
                self.anim_timer += dt;
                if self.anim_timer + TIMER_EPSILON >= tick.cfg.crab_frame_interval {
                    self.anim_timer = 0.0;
                    self.frame = 1 - self.frame.min(1);
                }
                self.x += self.walk_speed * dir.sign();
                self.timer += dt;
                if self.timer + TIMER_EPSILON >= self.walk_for || self.x <= 0.0 || self.x >= max_x
                {
                    self.rest(tick, max_x);
                }
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        let color = adjust(CRAB_COLOR, backdrop);
        self.art().draw(frame, self.x as i32, self.y, |_| color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::testing::Harness;

    #[test]
    fn sits_on_the_floor_and_stays_on_screen() {
        let mut h = Harness::new(40, 20);
        let mut c = Crab::spawn(&mut h.rng, &h.cfg, h.bounds);
        let art_w = c.art().width() as f32;
        assert_eq!(c.y + c.art().height() as i32, h.bounds.floor_row());
        let mut walked = false;
        for _ in 0..2000 {
            c.update(&mut h.tick());
            walked |= matches!(c.gait(), Gait::Walking(_));
            assert!(c.x() >= 0.0 - c.walk_speed && c.x() <= 40.0 - art_w + c.walk_speed);
            if c.gait() == Gait::Idle {
                assert!(c.x() >= 0.0 && c.x() <= 40.0 - art_w);
                assert_eq!(c.frame, 0);
            }
        }
        assert!(walked);
    }

    #[test]
    fn idles_for_the_rolled_duration_first() {
        let mut h = Harness::new(80, 20);
        let mut c = Crab::spawn(&mut h.rng, &h.cfg, h.bounds);
        c.idle_for = 3.45;
        for _ in 0..34 {
            c.update(&mut h.tick());
            assert_eq!(c.gait(), Gait::Idle);
        }
        c.update(&mut h.tick());
        assert!(matches!(c.gait(), Gait::Walking(_)));
    }
}
