use super::{
    chance,
    food::FoodId,
    pick, pick_i32,
    swimmer::{Behavior, Motion},
    Direction, Livery, Swimmer, Tick,
};
use crate::{
    art::ArtGrid,
    assets::{fish_styles, palette, FishCategory},
    config::SimConfig,
    palette::Backdrop,
    render::{Bounds, Frame},
};
use rand::{rngs::SmallRng, seq::SliceRandom, Rng};

/// Picks an art category: mostly single-line, rarely the big ones.
fn roll_category(rng: &mut SmallRng) -> FishCategory {
    let roll: f32 = rng.gen();
    if roll < 0.02 {
        FishCategory::MultiLineLarge
    } else if roll < 0.30 {
        FishCategory::MultiLineSmall
    } else {
        FishCategory::SingleLine
    }
}

pub(crate) struct Fish {
    motion: Motion,
    forward: ArtGrid,
    backward: ArtGrid,
    livery: Livery,
}

impl Fish {
    pub(crate) fn spawn(rng: &mut SmallRng, cfg: &SimConfig, bounds: Bounds) -> Self {
        let styles = fish_styles(roll_category(rng));
        let (forward, backward, livery) = match styles.choose(rng) {
            Some(style) => (
                ArtGrid::normalize(&style.forward),
                ArtGrid::normalize(&style.backward),
                Livery::from_palette(rng, palette(style.palette)),
            ),
            None => (
                ArtGrid::placeholder(),
                ArtGrid::placeholder(),
                Livery::single(crossterm::style::Color::White),
            ),
        };
        let direction = Direction::random(rng);
        let art_h = forward.height().max(backward.height()) as i32;
        let x = pick_i32(rng, 0, bounds.width as i32 - 1) as f32;
        let y = pick_i32(rng, 1, bounds.height as i32 - art_h - 3) as f32;
        let speed = if chance(rng, cfg.fast_fish_chance) {
            pick(rng, cfg.fast_fish_speed)
        } else {
            pick(rng, cfg.fish_speed)
        };
        Self {
            motion: Motion::new(x, y, direction, speed),
            forward,
            backward,
            livery,
        }
    }

    #[cfg(test)]
    pub(crate) fn moved_to(mut self, x: f32, y: f32) -> Self {
        self.motion.x = x;
        self.motion.y = y;
        self
    }

    fn art(&self) -> &ArtGrid {
        match self.motion.direction() {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }
}

impl Swimmer for Fish {
    fn update(&mut self, tick: &mut Tick) {
        let target = self.motion.target().and_then(|id| tick.food_x(id));
        self.motion.step(tick.dt(), target);
        let w = self.art().width() as f32;
        self.motion.wrap(tick.bounds.w(), w);
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
        self.motion.speed()
    }

    fn behavior(&self) -> Behavior {
        self.motion.behavior()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{food::FoodPellet, testing::Harness};

    #[test]
    fn spawned_fish_sit_inside_the_tank() {
        let mut h = Harness::new(120, 30);
        for _ in 0..200 {
            let f = Fish::spawn(&mut h.rng, &h.cfg, h.bounds);
            assert!(f.motion.x >= 0.0 && f.motion.x < 120.0);
            assert!(f.motion.y >= 1.0);
            let s = f.speed().abs();
            assert!((0.5..=1.0).contains(&s) || (2.5..=4.5).contains(&s));
        }
    }

    #[test]
    fn turning_swaps_art_with_direction() {
        let mut h = Harness::new(120, 30);
        let mut f = Fish::spawn(&mut h.rng, &h.cfg, h.bounds);
        let before = f.direction();
        let art_before = f.art().clone();
        f.turn_around();
        assert_eq!(f.direction(), before.flipped());
        assert!(f.speed().signum() == f.direction().sign());
        let expected = match f.direction() {
            Direction::Forward => &f.forward,
            Direction::Backward => &f.backward,
        };
        assert_eq!(f.art(), expected);
        f.turn_around();
        assert_eq!(f.art(), &art_before);
    }

    #[test]
    fn fish_reaches_pellet_and_resumes_swimming() {
        let mut h = Harness::new(200, 30);
        let mut f = Fish::spawn(&mut h.rng, &h.cfg, h.bounds);
        f.motion = Motion::new(90.0, 5.0, Direction::Forward, 5.0);
        h.food.push(FoodPellet::new(FoodId(4), 100.0, 1.0, &h.cfg, &mut h.rng));
        let cfg = h.cfg.clone();
        f.seek_food(FoodId(4), &cfg);
        f.update(&mut h.tick());
        assert_eq!(f.motion.x, 100.0);
        assert_eq!(f.motion.behavior(), Behavior::Swimming);
    }
}
