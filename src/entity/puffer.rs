use super::{
    food::FoodId, pick, pick_color, pick_i32, swimmer::{Behavior, Motion}, Direction, Livery, Swimmer, Tick,
};
use crate::{
    art::ArtGrid,
    assets::{
        palette, Palette, PaletteId, PUFFER_BACKWARD, PUFFER_BACKWARD_SWIM, PUFFER_FORWARD,
        PUFFER_FORWARD_SWIM,
    },
    config::SimConfig,
    palette::Backdrop,
    render::{Bounds, Frame},
    sound::Cue,
};
use rand::rngs::SmallRng;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PuffState {
    Normal,
    Puffing,
    Puffed,
    Deflating,
}

struct FrameSet {
    puff: Vec<ArtGrid>,
    swim: Vec<ArtGrid>,
}

impl FrameSet {
    fn load(puff: &[&[&str]], swim: &[&[&str]]) -> Self {
        Self {
            puff: puff.iter().map(|f| ArtGrid::lines_or_placeholder(f)).collect(),
            swim: swim.iter().map(|f| ArtGrid::lines_or_placeholder(f)).collect(),
        }
    }
}

/// Slow bobbing fish that inflates instead of bolting when startled.
pub(crate) struct Puffer {
    motion: Motion,
    state: PuffState,
    frame: usize,
    anim_timer: f32,
    hold_timer: f32,
    center_y: f32,
    bob_amplitude: f32,
    bob_frequency: f32,
    livery: Livery,
    forward: FrameSet,
    backward: FrameSet,
}

impl Puffer {
    pub(crate) fn spawn(rng: &mut SmallRng, cfg: &SimConfig, bounds: Bounds) -> Self {
        let forward = FrameSet::load(&PUFFER_FORWARD, &PUFFER_FORWARD_SWIM);
        let backward = FrameSet::load(&PUFFER_BACKWARD, &PUFFER_BACKWARD_SWIM);
        let color = match palette(PaletteId::Puffer) {
            Palette::Single(colors) => pick_color(rng, colors),
            Palette::Keyed { body, .. } => pick_color(rng, body),
        };
        let bob_amplitude = pick(rng, cfg.puffer_bob_amplitude);
        let bob_frequency = pick(rng, cfg.puffer_bob_frequency);
        let tallest = forward
            .swim
            .iter()
            .chain(forward.puff.iter())
            .map(ArtGrid::height)
            .max()
            .unwrap_or(1) as i32;

        // Keep the bob clear of the surface and the floor.
        let h = bounds.height as i32;
        let (mut lo, mut hi) = (
            bob_amplitude as i32 + 1,
            h - (bob_amplitude as i32 + tallest + 2),
        );
        if lo >= hi {
            lo = h / 2;
            hi = h / 2;
        }
        let center_y = pick_i32(rng, lo, hi) as f32;
        let x = pick_i32(rng, 0, bounds.width as i32 - 1) as f32;
        let speed = pick(rng, cfg.puffer_speed);
        Self {
            motion: Motion::new(x, center_y, Direction::random(rng), speed),
            state: PuffState::Normal,
            frame: 0,
            anim_timer: 0.0,
            hold_timer: 0.0,
            center_y,
            bob_amplitude,
            bob_frequency,
            livery: Livery::single(color),
            forward,
            backward,
        }
    }

    pub(crate) fn state(&self) -> PuffState {
        self.state
    }

    fn frames(&self) -> &FrameSet {
        match self.motion.direction() {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    fn art(&self) -> &ArtGrid {
        let set = self.frames();
        let frames = match self.state {
            PuffState::Puffed => &set.swim,
            _ => &set.puff,
        };
        &frames[self.frame.min(frames.len() - 1)]
    }

    fn puff_len(&self) -> usize {
        self.frames().puff.len()
    }

    fn swim_len(&self) -> usize {
        self.frames().swim.len().max(1)
    }

    fn advance_state(&mut self, cfg: &SimConfig) {
        let dt = cfg.frame_interval;
        match self.state {
            PuffState::Normal => {}
            PuffState::Puffing => {
                self.anim_timer += dt;
                if self.anim_timer + super::TIMER_EPSILON >= cfg.puffer_frame_interval {
                    self.anim_timer = 0.0;
                    if self.frame + 1 < self.puff_len() {
                        self.frame += 1;
                    } else {
                        self.state = PuffState::Puffed;
                        self.hold_timer = cfg.puffer_hold;
                        self.frame = 0;
                        debug!("puffer fully inflated");
                    }
                }
            }
            PuffState::Puffed => {
                self.hold_timer -= dt;
                self.anim_timer += dt;
                if self.anim_timer + super::TIMER_EPSILON >= cfg.puffer_swim_interval {
                    self.anim_timer = 0.0;
                    self.frame = (self.frame + 1) % self.swim_len();
                }
                if super::expired(self.hold_timer) {
                    self.state = PuffState::Deflating;
                    self.anim_timer = 0.0;
                    self.frame = self.puff_len() - 1;
                }
            }
            PuffState::Deflating => {
                self.anim_timer += dt;
                if self.anim_timer + super::TIMER_EPSILON >= cfg.puffer_frame_interval {
                    self.anim_timer = 0.0;
                    if self.frame > 0 {
                        self.frame -= 1;
                    } else {
                        self.state = PuffState::Normal;
                    }
                }
            }
        }
    }

    fn moving(&self) -> bool {
        matches!(self.state, PuffState::Normal | PuffState::Puffed)
    }
}

impl Swimmer for Puffer {
    fn update(&mut self, tick: &mut Tick) {
        self.advance_state(tick.cfg);
        if self.moving() {
            if self.state == PuffState::Normal {
                let target = self.motion.target().and_then(|id| tick.food_x(id));
                self.motion.step(tick.dt(), target);
            } else {
                self.motion.step_cruise();
            }
            self.motion.y =
                self.center_y + self.bob_amplitude * (self.motion.x * self.bob_frequency).sin();
            let w = self.art().width() as f32;
            self.motion.wrap(tick.bounds.w(), w);
        }
    }

    fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        let livery = self.livery;
        self.art().draw(
            frame,
            self.motion.x as i32,
            self.motion.y as i32,
            |t| livery.paint(t, backdrop),
        );
    }

    /// Only a relaxed puffer reacts; it inflates and announces it.
    fn startle(&mut self, tick: &mut Tick) {
        if self.state != PuffState::Normal {
            return;
        }
        self.state = PuffState::Puffing;
        self.frame = 0;
        self.anim_timer = 0.0;
        tick.cues.push(Cue::PufferInflate);
    }

    fn turn_around(&mut self) {
        self.motion.turn_around();
    }

    fn seek_food(&mut self, target: FoodId, cfg: &SimConfig) {
        if self.state == PuffState::Normal {
            self.motion.begin_seek(target, cfg.food_seek_multiplier);
        }
    }

    fn center(&self) -> (f32, f32) {
        let art = self.art();
        (
            self.motion.x + art.width() as f32 / 2.0,
            self.motion.y + art.height() as f32 / 2.0,
        )
    }

    fn position(&self) -> (f32, f32) {
        (self.motion.x, self.motion.y)
    }

    fn direction(&self) -> Direction {
        self.motion.direction()
    }

    fn speed(&self) -> f32 {
        if self.moving() {
            self.motion.speed()
        } else {
            0.0
        }
    }

    fn wants_food(&self) -> bool {
        false
    }

    fn behavior(&self) -> Behavior {
        self.motion.behavior()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{art::Tint, entity::testing::Harness};
    use crossterm::style::Color;

    #[test]
    fn full_puff_cycle() {
        let mut h = Harness::new(120, 40);
        let mut p = Puffer::spawn(&mut h.rng, &h.cfg, h.bounds);
        assert!([Color::DarkYellow, Color::Yellow, Color::Grey].contains(&p.livery.paint(Tint::Base, Backdrop::Night)));

        p.startle(&mut h.tick());
        assert_eq!(p.state(), PuffState::Puffing);
        assert_eq!(h.cues, vec![Cue::PufferInflate]);
        assert_eq!(p.speed(), 0.0);

        // A second startle mid-puff changes nothing.
        p.startle(&mut h.tick());
        assert_eq!(h.cues.len(), 1);

        let x_before = p.motion.x;
        let mut ticks = 0;
        while p.state() == PuffState::Puffing {
            p.update(&mut h.tick());
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(p.motion.x, x_before);
        assert_eq!(p.state(), PuffState::Puffed);
        // five frames, each held for 0.6s at 0.1s per tick
        assert_eq!(ticks, 30);

        p.update(&mut h.tick());
        assert_ne!(p.motion.x, x_before);
        assert!(p.speed() != 0.0);

        let mut guard = 0;
        while p.state() != PuffState::Normal {
            p.update(&mut h.tick());
            guard += 1;
            assert!(guard < 1000);
        }
        assert!(p.motion.sign_consistent());
    }

    #[test]
    fn bob_stays_above_the_floor() {
        let mut h = Harness::new(120, 30);
        for _ in 0..50 {
            let mut p = Puffer::spawn(&mut h.rng, &h.cfg, h.bounds);
            for _ in 0..200 {
                p.update(&mut h.tick());
                let bottom = p.motion.y as i32 + p.art().height() as i32;
                assert!(bottom <= h.bounds.floor_row());
            }
        }
    }
}
