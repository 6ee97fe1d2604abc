use super::{expired, food::FoodId, pick, Direction};
use crate::config::Span;
use rand::rngs::SmallRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Behavior {
    Swimming,
    Seeking,
}

/// Temporary speed spike that decays linearly back to cruising speed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Startle {
    active: bool,
    timer: f32,
    duration: f32,
    peak: f32,
}

/// Position, heading and the swimming/seeking/startled state machine shared by
/// every fish-like creature.
///
/// `speed` is stored signed and is only ever written through helpers that
/// derive its sign from `direction`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Motion {
    pub(crate) x: f32,
    pub(crate) y: f32,
    direction: Direction,
    speed: f32,
    normal_speed: f32,
    behavior: Behavior,
    target: Option<FoodId>,
    startle: Startle,
}

impl Motion {
    pub(crate) fn new(x: f32, y: f32, direction: Direction, normal_speed: f32) -> Self {
        let normal_speed = normal_speed.abs();
        Self {
            x,
            y,
            direction,
            speed: direction.sign() * normal_speed,
            normal_speed,
            behavior: Behavior::Swimming,
            target: None,
            startle: Startle::default(),
        }
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn speed(&self) -> f32 {
        self.speed
    }

    pub(crate) fn normal_speed(&self) -> f32 {
        self.normal_speed
    }

    pub(crate) fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub(crate) fn target(&self) -> Option<FoodId> {
        self.target
    }

    pub(crate) fn is_startled(&self) -> bool {
        self.startle.active
    }

    fn set_magnitude(&mut self, magnitude: f32) {
        self.speed = self.direction.sign() * magnitude.abs();
    }

    pub(crate) fn turn_around(&mut self) {
        self.direction = self.direction.flipped();
        self.set_magnitude(self.speed);
    }

    pub(crate) fn face(&mut self, direction: Direction) {
        if self.direction != direction {
            self.turn_around();
        }
    }

    /// Locks onto a pellet and speeds up. Ignored while startled or already
    /// chasing something.
    pub(crate) fn begin_seek(&mut self, target: FoodId, multiplier: f32) {
        if self.startle.active || self.behavior == Behavior::Seeking {
            return;
        }
        self.behavior = Behavior::Seeking;
        self.target = Some(target);
        self.set_magnitude(self.normal_speed * multiplier);
    }

    fn stop_seeking(&mut self) {
        self.behavior = Behavior::Swimming;
        self.target = None;
        self.set_magnitude(self.normal_speed);
    }

    /// Starts a startle unless one is already running. Any chase is dropped.
    pub(crate) fn begin_startle(&mut self, rng: &mut SmallRng, multiplier: Span, duration: f32) {
        self.behavior = Behavior::Swimming;
        self.target = None;
        if self.startle.active {
            return;
        }
        let peak = self.normal_speed * pick(rng, multiplier).max(1.0);
        self.startle = Startle {
            active: true,
            timer: duration,
            duration,
            peak,
        };
        self.set_magnitude(peak);
    }

    /// Counts the startle down by `dt` and recomputes the decayed speed.
    pub(crate) fn step_startle(&mut self, dt: f32) {
        if !self.startle.active {
            return;
        }
        self.startle.timer -= dt;
        if expired(self.startle.timer) {
            self.startle = Startle::default();
            self.set_magnitude(self.normal_speed);
            return;
        }
        let progress = (self.startle.timer / self.startle.duration).clamp(0.0, 1.0);
        let span = self.startle.peak - self.normal_speed;
        self.set_magnitude(self.normal_speed + span * progress);
    }

    /// Plain cruise at normal speed.
    pub(crate) fn step_cruise(&mut self) {
        self.set_magnitude(self.normal_speed);
        self.x += self.speed;
    }

    /// One tick of chasing the pellet at `target_x`; `None` means the pellet is
    /// gone. Snaps onto the target rather than overshoot it.
    pub(crate) fn step_seek(&mut self, target_x: Option<f32>) {
        let Some(tx) = target_x else {
            self.stop_seeking();
            return;
        };
        let dist = tx - self.x;
        if dist != 0.0 {
            self.face(Direction::toward(self.x, tx));
        }
        if self.speed.abs() >= dist.abs() {
            self.x = tx;
            self.stop_seeking();
        } else {
            self.x += self.speed;
        }
    }

    /// Startle first, then seeking, then cruising.
    pub(crate) fn step(&mut self, dt: f32, target_x: Option<f32>) {
        if self.startle.active {
            self.step_startle(dt);
            self.x += self.speed;
        } else if self.behavior == Behavior::Seeking {
            self.step_seek(target_x);
        } else {
            self.step_cruise();
        }
    }

    /// Reappears past the opposite edge once fully off-screen.
    pub(crate) fn wrap(&mut self, width: f32, art_width: f32) {
        match self.direction {
            Direction::Forward if self.x >= width => self.x = -art_width,
            Direction::Backward if self.x <= -art_width => self.x = width - 1.0,
            _ => {}
        }
    }

    pub(crate) fn sign_consistent(&self) -> bool {
        self.speed == 0.0 || self.speed.signum() == self.direction.sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn seeking_snaps_onto_pellet_instead_of_overshooting() {
        let cfg = SimConfig::default();
        let mut m = Motion::new(90.0, 10.0, Direction::Forward, 5.0);
        m.begin_seek(FoodId(1), cfg.food_seek_multiplier);
        assert_eq!(m.behavior(), Behavior::Seeking);
        m.step(cfg.frame_interval, Some(100.0));
        assert_eq!(m.x, 100.0);
        assert_eq!(m.behavior(), Behavior::Swimming);
        assert_eq!(m.speed(), 5.0);
    }

    #[test]
    fn seeking_turns_toward_pellet() {
        let mut m = Motion::new(50.0, 10.0, Direction::Forward, 0.5);
        m.begin_seek(FoodId(1), 2.0);
        m.step(0.1, Some(10.0));
        assert_eq!(m.direction(), Direction::Backward);
        assert!(m.speed() < 0.0);
        assert_eq!(m.x, 49.0);
    }

    #[test]
    fn vanished_pellet_ends_the_chase() {
        let mut m = Motion::new(50.0, 10.0, Direction::Backward, 0.5);
        m.begin_seek(FoodId(2), 3.0);
        m.step(0.1, None);
        assert_eq!(m.behavior(), Behavior::Swimming);
        assert_eq!(m.target(), None);
        assert_eq!(m.speed(), -0.5);
    }

    #[test]
    fn startle_decays_monotonically_to_normal() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut m = Motion::new(0.0, 0.0, Direction::Backward, 0.8);
        m.begin_startle(&mut rng, (8.0, 11.0), 1.2);
        let peak = m.speed().abs();
        assert!(peak > m.normal_speed());

        let mut last = peak;
        while m.is_startled() {
            m.step_startle(0.1);
            let now = m.speed().abs();
            assert!(now <= last);
            assert!(m.speed() < 0.0);
            last = now;
        }
        assert_eq!(m.speed(), -0.8);
    }

    #[test]
    fn startle_drops_seek_and_blocks_new_ones() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut m = Motion::new(0.0, 0.0, Direction::Forward, 1.0);
        m.begin_seek(FoodId(9), 3.0);
        m.begin_startle(&mut rng, (8.0, 11.0), 1.2);
        assert_eq!(m.behavior(), Behavior::Swimming);
        m.begin_seek(FoodId(9), 3.0);
        assert_eq!(m.target(), None);
    }

    #[test]
    fn wrap_reenters_from_the_far_side() {
        let mut m = Motion::new(120.0, 0.0, Direction::Forward, 1.0);
        m.wrap(120.0, 5.0);
        assert_eq!(m.x, -5.0);

        let mut m = Motion::new(-5.0, 0.0, Direction::Backward, 1.0);
        m.wrap(120.0, 5.0);
        assert_eq!(m.x, 119.0);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Step,
        Turn,
        Startle,
        Seek(Option<f32>),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Step),
            Just(Op::Turn),
            Just(Op::Startle),
            proptest::option::of(-50.0f32..250.0).prop_map(Op::Seek),
        ]
    }

    proptest! {
        #[test]
        fn speed_sign_always_matches_direction(
            speed in 0.1f32..5.0,
            forward in any::<bool>(),
            ops in proptest::collection::vec(op(), 0..60),
        ) {
            let dir = if forward { Direction::Forward } else { Direction::Backward };
            let mut m = Motion::new(60.0, 5.0, dir, speed);
            let mut rng = SmallRng::seed_from_u64(1);
            for o in ops {
                match o {
                    Op::Step => m.step(0.1, None),
                    Op::Turn => m.turn_around(),
                    Op::Startle => m.begin_startle(&mut rng, (8.0, 11.0), 1.2),
                    Op::Seek(tx) => {
                        m.begin_seek(FoodId(1), 3.0);
                        m.step(0.1, tx);
                    }
                }
                prop_assert!(m.sign_consistent());
                prop_assert!(m.speed() != 0.0);
            }
        }
    }
}
