//! Seahorses drift on a gentle sine path. Babies trail a parent they only know
//! by id; the scene hands them the parent's pose each tick, and a missing pose
//! means the parent is gone.

use super::{
    chance,
    food::FoodId,
    pick, pick_color, pick_count, pick_i32,
    swimmer::{Behavior, Motion},
    CreatureId, Direction, Livery, Swimmer, Tick,
};
use crate::{
    art::ArtGrid,
    assets::{
        palette, Palette, PaletteId, BABY_SEAHORSE_BACKWARD, BABY_SEAHORSE_FORWARD,
        SEAHORSE_BACKWARD, SEAHORSE_FORWARD,
    },
    config::SimConfig,
    palette::Backdrop,
    render::{Bounds, Frame},
};
use crossterm::style::Color;
use rand::rngs::SmallRng;

const ADULT_SEQUENCE: [usize; 4] = [0, 1, 2, 1];
const BABY_SEQUENCE: [usize; 3] = [0, 1, 0];

fn seahorse_color(rng: &mut SmallRng) -> Color {
    match palette(PaletteId::Seahorse) {
        Palette::Single(colors) => pick_color(rng, colors),
        Palette::Keyed { body, .. } => pick_color(rng, body),
    }
}

/// Direction-specific frame lists walked through a fixed index sequence.
struct Cycle {
    forward: Vec<ArtGrid>,
    backward: Vec<ArtGrid>,
    sequence: &'static [usize],
    step: usize,
    timer: f32,
    interval: f32,
}

impl Cycle {
    fn new(
        forward: &[&[&str]],
        backward: &[&[&str]],
        sequence: &'static [usize],
        interval: f32,
    ) -> Self {
        Self {
            forward: forward.iter().map(|f| ArtGrid::lines_or_placeholder(f)).collect(),
            backward: backward.iter().map(|f| ArtGrid::lines_or_placeholder(f)).collect(),
            sequence,
            step: 0,
            timer: 0.0,
            interval,
        }
    }

    fn advance(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer + super::TIMER_EPSILON >= self.interval {
            self.timer = 0.0;
            self.step = (self.step + 1) % self.sequence.len();
        }
    }

    fn art(&self, direction: Direction) -> &ArtGrid {
        let frames = match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        };
        let idx = self.sequence[self.step];
        frames.get(idx).unwrap_or(&frames[0])
    }

    fn tallest(&self) -> usize {
        self.forward.iter().map(ArtGrid::height).max().unwrap_or(1)
    }
}

/// Where a parent is this tick, as seen by its babies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ParentPose {
    pub(crate) x: f32,
    pub(crate) center_y: f32,
}

pub(crate) struct Seahorse {
    id: CreatureId,
    motion: Motion,
    center_y: f32,
    wave_amplitude: f32,
    wave_frequency: f32,
    cycle: Cycle,
    livery: Livery,
}

impl Seahorse {
    pub(crate) fn spawn(id: CreatureId, rng: &mut SmallRng, cfg: &SimConfig, bounds: Bounds) -> Self {
        let cycle = Cycle::new(
            &SEAHORSE_FORWARD,
            &SEAHORSE_BACKWARD,
            &ADULT_SEQUENCE,
            cfg.seahorse_frame_interval,
        );
        let wave_amplitude = pick(rng, cfg.seahorse_wave_amplitude);
        let wave_frequency = pick(rng, cfg.seahorse_wave_frequency);
        let h = bounds.height as i32;
        let (mut lo, mut hi) = (
            wave_amplitude as i32 + 1,
            h - (wave_amplitude as i32 + cycle.tallest() as i32 + 5),
        );
        if lo >= hi {
            lo = h / 3;
            hi = h / 2;
        }
        let center_y = pick_i32(rng, lo, hi) as f32;
        let x = pick_i32(rng, 0, bounds.width as i32 - 1) as f32;
        let speed = pick(rng, cfg.seahorse_speed);
        Self {
            id,
            motion: Motion::new(x, center_y, Direction::random(rng), speed),
            center_y,
            wave_amplitude,
            wave_frequency,
            cycle,
            livery: Livery::single(seahorse_color(rng)),
        }
    }

    pub(crate) fn id(&self) -> CreatureId {
        self.id
    }

    pub(crate) fn pose(&self) -> ParentPose {
        ParentPose {
            x: self.motion.x,
            center_y: self.center_y,
        }
    }

    /// Babies for this parent, if the roll says it has any.
    pub(crate) fn spawn_babies(&self, rng: &mut SmallRng, cfg: &SimConfig) -> Vec<BabySeahorse> {
        if !chance(rng, cfg.baby_chance) {
            return Vec::new();
        }
        let n = pick_count(rng, cfg.baby_count);
        (0..n)
            .map(|_| BabySeahorse::spawn(self, rng, cfg))
            .collect()
    }
}

impl Swimmer for Seahorse {
    fn update(&mut self, tick: &mut Tick) {
        let w = self.cycle.art(self.motion.direction()).width() as f32;
        // A startled seahorse just darts; no bob, no frame change.
        if self.motion.is_startled() {
            self.motion.step(tick.dt(), None);
            self.motion.wrap(tick.bounds.w(), w);
            return;
        }
        let target = self.motion.target().and_then(|id| tick.food_x(id));
        self.motion.step(tick.dt(), target);
        self.motion.y =
            self.center_y + self.wave_amplitude * (self.motion.x * self.wave_frequency).sin();
        self.motion.wrap(tick.bounds.w(), w);
        self.cycle.advance(tick.dt());
    }

    fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        let livery = self.livery;
        self.cycle.art(self.motion.direction()).draw(
            frame,
            self.motion.x as i32,
            self.motion.y as i32,
            |t| livery.paint(t, backdrop),
        );
    }

    fn startle(&mut self, tick: &mut Tick) {
        let cfg = tick.cfg;
        self.motion
            .begin_startle(tick.rng, cfg.startle_multiplier, cfg.startle_duration);
    }

    fn turn_around(&mut self) {
        self.motion.turn_around();
    }

    fn seek_food(&mut self, target: FoodId, cfg: &SimConfig) {
        self.motion.begin_seek(target, cfg.food_seek_multiplier);
    }

    fn center(&self) -> (f32, f32) {
        let art = self.cycle.art(self.motion.direction());
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
        self.motion.speed()
    }

    /// Seahorses graze on their own; a food drop does not draw them in.
    fn wants_food(&self) -> bool {
        false
    }

    fn behavior(&self) -> Behavior {
        self.motion.behavior()
    }
}

pub(crate) struct BabySeahorse {
    motion: Motion,
    parent: Option<CreatureId>,
    parent_pose: Option<ParentPose>,
    offset_x: f32,
    offset_y: f32,
    center_y: f32,
    wave_amplitude: f32,
    wave_frequency: f32,
    cycle: Cycle,
    livery: Livery,
}

impl BabySeahorse {
    fn spawn(parent: &Seahorse, rng: &mut SmallRng, cfg: &SimConfig) -> Self {
        let follow = cfg.baby_follow_distance;
        let offset_x = pick(rng, (-follow, follow));
        let offset_y = pick(rng, (-follow / 2.0, follow / 2.0));
        let x = parent.motion.x + offset_x;
        let center_y = (parent.motion.y + offset_y).max(1.0);
        let speed = pick(rng, cfg.baby_speed);
        Self {
            motion: Motion::new(x, center_y, Direction::random(rng), speed),
            parent: Some(parent.id),
            parent_pose: Some(parent.pose()),
            offset_x,
            offset_y,
            center_y,
            wave_amplitude: pick(rng, cfg.baby_wave_amplitude),
            wave_frequency: pick(rng, (0.08, 0.2)),
            cycle: Cycle::new(
                &BABY_SEAHORSE_FORWARD,
                &BABY_SEAHORSE_BACKWARD,
                &BABY_SEQUENCE,
                cfg.seahorse_frame_interval * 0.7,
            ),
            livery: Livery::single(seahorse_color(rng)),
        }
    }

    pub(crate) fn parent(&self) -> Option<CreatureId> {
        self.parent
    }

    /// Feeds in the parent's current pose. `None` means the parent is no
    /// longer in the scene; the baby forgets it for good.
    pub(crate) fn observe_parent(&mut self, pose: Option<ParentPose>) {
        self.parent_pose = pose;
        if pose.is_none() {
            self.parent = None;
        }
    }

    fn follow(&mut self, pose: ParentPose, follow_distance: f32) {
        let target_x = pose.x + self.offset_x;
        let target_y = pose.center_y + self.offset_y;
        let x_diff = target_x - self.motion.x;
        if x_diff.abs() > follow_distance * 1.5 {
            self.motion.face(Direction::toward(self.motion.x, target_x));
        }
        self.motion.x += self.motion.speed() * 0.8;
        self.center_y += (target_y - self.center_y) * 0.1;
    }
}

impl Swimmer for BabySeahorse {
    fn update(&mut self, tick: &mut Tick) {
        let w = self.cycle.art(self.motion.direction()).width() as f32;
        if self.motion.is_startled() {
            self.motion.step(tick.dt(), None);
            self.motion.wrap(tick.bounds.w(), w);
            return;
        }
        if let Some(pose) = self.parent_pose {
            self.follow(pose, tick.cfg.baby_follow_distance);
        } else {
            self.motion.step_cruise();
        }
        self.motion.y =
            self.center_y + self.wave_amplitude * (self.motion.x * self.wave_frequency).sin();
        self.motion.wrap(tick.bounds.w(), w);
        self.cycle.advance(tick.dt());
    }

    fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        let livery = self.livery;
        self.cycle.art(self.motion.direction()).draw(
            frame,
            self.motion.x as i32,
            self.motion.y as i32,
            |t| livery.paint(t, backdrop),
        );
    }

    fn startle(&mut self, tick: &mut Tick) {
        let cfg = tick.cfg;
        self.motion.begin_startle(
            tick.rng,
            cfg.baby_startle_multiplier,
            cfg.baby_startle_duration,
        );
    }

    fn turn_around(&mut self) {
        self.motion.turn_around();
    }

    fn seek_food(&mut self, _target: FoodId, _cfg: &SimConfig) {}

    fn center(&self) -> (f32, f32) {
        let art = self.cycle.art(self.motion.direction());
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
        self.motion.speed()
    }

    fn wants_food(&self) -> bool {
        false
    }
}
