//! The tank as a whole: owns every entity, turns commands into changes,
//! advances everything one tick at a time and composites the frame.

use crate::{
    art::ArtGrid,
    config::SimConfig,
    entity::{
        bubble::{self, Bubble, ClickBubble},
        chance,
        crab::Crab,
        decoration::{generate_decorations, Decoration},
        eel::Eel,
        expired,
        fish::Fish,
        floor::Floor,
        food::{FoodId, FoodPellet},
        jellyfish::Jellyfish,
        pick, pick_count, pick_i32,
        puffer::Puffer,
        school::School,
        seahorse::{ParentPose, Seahorse},
        seaweed::Seaweed,
        shark::Shark,
        within, Creature, CreatureId, Swimmer, Tick,
    },
    input::Command,
    palette::{Backdrop, PAUSED_BACKGROUND},
    render::{draw_help, Bounds, Frame},
    sound::Cue,
};
use crossterm::style::Color;
use rand::{rngs::SmallRng, seq::index};
use tracing::{debug, info};

/// Food is never dropped closer than this to either side wall.
const FOOD_MARGIN: i32 = 15;
/// Keeps a random burst point away from the edges.
const BURST_MARGIN: i32 = 5;

pub(crate) struct Scene {
    cfg: SimConfig,
    rng: SmallRng,
    bounds: Bounds,
    backdrop: Backdrop,
    paused: bool,
    time_step: u64,
    shark_frames: Vec<ArtGrid>,

    creatures: Vec<Creature>,
    schools: Vec<School>,
    bubbles: Vec<Bubble>,
    click_bubbles: Vec<ClickBubble>,
    jellyfish: Vec<Jellyfish>,
    crab: Option<Crab>,
    shark: Option<Shark>,
    shark_countdown: Option<u32>,
    seaweed: Vec<Seaweed>,
    decorations: Vec<Decoration>,
    floor: Floor,
    food: Vec<FoodPellet>,
    food_notice: f32,

    next_creature: u32,
    next_food: u32,
    cues: Vec<Cue>,
}

impl Scene {
    pub(crate) fn new(
        cfg: SimConfig,
        bounds: Bounds,
        backdrop: Backdrop,
        rng: SmallRng,
        shark_frames: Vec<ArtGrid>,
    ) -> Self {
        let mut scene = Self {
            cfg,
            rng,
            bounds,
            backdrop,
            paused: false,
            time_step: 0,
            shark_frames,
            creatures: Vec::new(),
            schools: Vec::new(),
            bubbles: Vec::new(),
            click_bubbles: Vec::new(),
            jellyfish: Vec::new(),
            crab: None,
            shark: None,
            shark_countdown: None,
            seaweed: Vec::new(),
            decorations: Vec::new(),
            floor: Floor::default(),
            food: Vec::new(),
            food_notice: 0.0,
            next_creature: 0,
            next_food: 0,
            cues: Vec::new(),
        };
        scene.regenerate();
        scene
    }

    #[cfg(test)]
    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(crate) fn backdrop(&self) -> Backdrop {
        self.backdrop
    }

    #[cfg(test)]
    pub(crate) fn is_paused(&self) -> bool {
        self.paused
    }

    /// Terminal background for this frame.
    pub(crate) fn background(&self) -> Color {
        if self.paused {
            PAUSED_BACKGROUND
        } else {
            self.backdrop.background()
        }
    }

    fn creature_id(&mut self) -> CreatureId {
        self.next_creature += 1;
        CreatureId(self.next_creature)
    }

    /// Throws the current tank away and rolls a new one at the current size.
    pub(crate) fn regenerate(&mut self) {
        let bounds = self.bounds;
        let mut budget = pick_count(&mut self.rng, self.cfg.fish_count);

        self.creatures.clear();
        self.shark = None;
        self.shark_countdown = chance(&mut self.rng, self.cfg.shark_chance)
            .then(|| pick_count(&mut self.rng, self.cfg.shark_delay_ticks));
        if let Some(ticks) = self.shark_countdown {
            info!(ticks, "shark will visit this scene");
        }

        if budget > 0 && chance(&mut self.rng, self.cfg.puffer_chance) {
            let p = Puffer::spawn(&mut self.rng, &self.cfg, bounds);
            self.creatures.push(Creature::Puffer(p));
            budget -= 1;
        }
        if budget > 0 && chance(&mut self.rng, self.cfg.seahorse_chance) {
            let id = self.creature_id();
            let adult = Seahorse::spawn(id, &mut self.rng, &self.cfg, bounds);
            let babies = adult.spawn_babies(&mut self.rng, &self.cfg);
            self.creatures.push(Creature::Seahorse(adult));
            budget -= 1;
            for baby in babies {
                if budget == 0 {
                    break;
                }
                self.creatures.push(Creature::Baby(baby));
                budget -= 1;
            }
        }
        for _ in 0..budget {
            let f = Fish::spawn(&mut self.rng, &self.cfg, bounds);
            self.creatures.push(Creature::Fish(f));
        }
        if chance(&mut self.rng, self.cfg.eel_chance) {
            let e = Eel::spawn(&mut self.rng, &self.cfg, bounds);
            self.creatures.push(Creature::Eel(e));
        }

        let n = pick_count(&mut self.rng, self.cfg.school_count);
        self.schools = (0..n)
            .map(|_| School::spawn(&mut self.rng, &self.cfg, bounds))
            .collect();
        let n = pick_count(&mut self.rng, self.cfg.bubble_count);
        self.bubbles = (0..n)
            .map(|_| Bubble::spawn(&mut self.rng, &self.cfg, bounds))
            .collect();
        self.click_bubbles.clear();
        let n = pick_count(&mut self.rng, self.cfg.jellyfish_count);
        self.jellyfish = (0..n)
            .map(|_| Jellyfish::spawn(&mut self.rng, &self.cfg, bounds))
            .collect();

        let crab_odds = pick(&mut self.rng, self.cfg.crab_chance);
        self.crab = chance(&mut self.rng, crab_odds)
            .then(|| Crab::spawn(&mut self.rng, &self.cfg, bounds));

        // Each stalk gets its own column.
        let columns = (bounds.width as usize).saturating_sub(3);
        let wanted = (pick_count(&mut self.rng, self.cfg.seaweed_count) as usize).min(columns);
        self.seaweed = if columns == 0 {
            Vec::new()
        } else {
            index::sample(&mut self.rng, columns, wanted)
                .into_iter()
                .map(|x| Seaweed::spawn(x as i32, &mut self.rng, &self.cfg))
                .collect()
        };

        self.decorations = generate_decorations(&mut self.rng, &self.cfg, bounds);
        self.floor = Floor::generate(bounds.width, &mut self.rng);
        self.food.clear();
        self.food_notice = 0.0;
        self.time_step = 0;

        info!(
            width = bounds.width,
            height = bounds.height,
            creatures = self.creatures.len(),
            schools = self.schools.len(),
            jellyfish = self.jellyfish.len(),
            seaweed = self.seaweed.len(),
            decorations = self.decorations.len(),
            crab = self.crab.is_some(),
            "scene generated"
        );
    }

    /// Rebuilds the scene when the terminal changed size. Returns whether it
    /// did.
    pub(crate) fn resize(&mut self, bounds: Bounds) -> bool {
        if bounds == self.bounds {
            return false;
        }
        info!(
            from_w = self.bounds.width,
            from_h = self.bounds.height,
            to_w = bounds.width,
            to_h = bounds.height,
            "terminal resized, rebuilding scene"
        );
        self.bounds = bounds;
        self.regenerate();
        true
    }

    /// Applies the commands the scene owns. Sound and quit belong to the
    /// caller and are ignored here.
    pub(crate) fn apply(&mut self, cmd: Command) {
        if self.paused && !cmd.works_while_paused() {
            return;
        }
        match cmd {
            Command::TogglePause => {
                self.paused = !self.paused;
                debug!(paused = self.paused, "pause toggled");
            }
            Command::ToggleBackground => {
                self.backdrop = self.backdrop.toggled();
                debug!(backdrop = ?self.backdrop, "backdrop toggled");
            }
            Command::Regenerate => self.regenerate(),
            Command::BubbleBurst => {
                let x = pick_i32(&mut self.rng, BURST_MARGIN, self.bounds.width as i32 - BURST_MARGIN);
                let y =
                    pick_i32(&mut self.rng, BURST_MARGIN, self.bounds.height as i32 - BURST_MARGIN);
                self.bubble_burst(x as f32, y as f32);
            }
            Command::DropFood => {
                self.drop_food();
            }
            Command::ToggleSound | Command::Quit => {}
        }
    }

    /// Advances the tank one tick unless paused.
    pub(crate) fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.update();
        self.time_step += 1;
    }

    fn update(&mut self) {
        let dt = self.cfg.frame_interval;

        {
            let mut tick = Tick {
                cfg: &self.cfg,
                rng: &mut self.rng,
                bounds: self.bounds,
                food: &[],
                cues: &mut self.cues,
            };
            self.food.retain_mut(|p| p.update(&mut tick));
        }

        if self.food_notice > 0.0 {
            self.food_notice -= dt;
            if expired(self.food_notice) {
                self.food_notice = 0.0;
                self.notify_food();
            }
        }

        let poses: Vec<(CreatureId, ParentPose)> = self
            .creatures
            .iter()
            .filter_map(|c| match c {
                Creature::Seahorse(s) => Some((s.id(), s.pose())),
                _ => None,
            })
            .collect();
        for c in &mut self.creatures {
            if let Creature::Baby(b) = c {
                if let Some(parent) = b.parent() {
                    let pose = poses.iter().find(|(id, _)| *id == parent).map(|(_, p)| *p);
                    if pose.is_none() {
                        debug!("baby seahorse lost its parent");
                    }
                    b.observe_parent(pose);
                }
            }
        }

        let mut tick = Tick {
            cfg: &self.cfg,
            rng: &mut self.rng,
            bounds: self.bounds,
            food: &self.food,
            cues: &mut self.cues,
        };
        for c in &mut self.creatures {
            c.as_swimmer_mut().update(&mut tick);
        }
        self.creatures.retain(|c| {
            let active = c.as_swimmer().is_active();
            if !active {
                info!(kind = c.kind(), "left the tank for good");
            }
            active
        });
        for s in &mut self.schools {
            s.update(&mut tick);
        }
        for b in &mut self.bubbles {
            b.update(&mut tick);
        }
        self.click_bubbles.retain_mut(|b| b.update(&mut tick));
        for j in &mut self.jellyfish {
            j.update(&mut tick);
        }
        if let Some(crab) = self.crab.as_mut() {
            crab.update(&mut tick);
        }

        let mut shark_gone = false;
        if let Some(shark) = self.shark.as_mut() {
            shark.update(&mut tick);
            if let Some(pulse) = shark.take_pulse() {
                startle_near(
                    &mut self.creatures,
                    &mut self.schools,
                    (pulse.x, pulse.y),
                    pulse.radius,
                    &mut tick,
                );
            }
            shark_gone = !shark.is_active();
        }
        if shark_gone {
            self.shark = None;
            info!("shark gone");
        }

        if self.shark.is_none() {
            if let Some(left) = self.shark_countdown.as_mut() {
                *left = left.saturating_sub(1);
                if *left == 0 {
                    self.shark_countdown = None;
                    self.shark = Some(Shark::spawn(
                        &self.shark_frames,
                        &mut self.rng,
                        &self.cfg,
                        self.bounds,
                    ));
                    self.cues.push(Cue::SharkArrival);
                    info!("shark arrived");
                }
            }
        }
    }

    /// Points every hungry swimmer near the oldest pellet at it. Distance is
    /// taken from the swimmer's top-left corner, not its center.
    fn notify_food(&mut self) {
        let Some(pellet) = self.food.first() else {
            return;
        };
        let (id, x, y) = (pellet.id(), pellet.x(), pellet.y());
        let radius = self.cfg.food_notice_radius;
        let mut noticed = 0;
        for c in &mut self.creatures {
            let s = c.as_swimmer_mut();
            let (sx, sy) = s.position();
            if s.wants_food() && (sx - x).hypot(sy - y) < radius {
                s.seek_food(id, &self.cfg);
                noticed += 1;
            }
        }
        debug!(noticed, "food noticed");
    }

    /// Drops a pellet from the surface. Only one may be in the water at a
    /// time; returns whether one was dropped.
    pub(crate) fn drop_food(&mut self) -> bool {
        if !self.food.is_empty() {
            return false;
        }
        let w = self.bounds.width as i32;
        let x = pick_i32(&mut self.rng, FOOD_MARGIN, w - (FOOD_MARGIN + 1)).min(w - 1);
        self.next_food += 1;
        let pellet = FoodPellet::new(
            FoodId(self.next_food),
            x as f32,
            0.0,
            &self.cfg,
            &mut self.rng,
        );
        self.food.push(pellet);
        self.food_notice = self.cfg.food_notice_delay;
        debug!(x, "food dropped");
        true
    }

    /// Sends up a cloud of bubbles at (x, y), opens any chest close by and
    /// startles everything within the startle radius.
    pub(crate) fn bubble_burst(&mut self, x: f32, y: f32) {
        self.cues.push(Cue::Bubbles);
        let fresh = bubble::burst(x, y, &mut self.rng, &self.cfg, self.bounds);
        self.click_bubbles.extend(fresh);

        for d in &mut self.decorations {
            if d.is_near_point(x, y, self.cfg.chest_open_radius) {
                d.open_chest(self.bounds, &mut self.cues);
            }
        }

        let mut tick = Tick {
            cfg: &self.cfg,
            rng: &mut self.rng,
            bounds: self.bounds,
            food: &self.food,
            cues: &mut self.cues,
        };
        let startled = startle_near(
            &mut self.creatures,
            &mut self.schools,
            (x, y),
            self.cfg.startle_radius,
            &mut tick,
        );
        debug!(x, y, startled, "bubble burst");
    }

    pub(crate) fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Paints the whole tank back to front.
    pub(crate) fn compose(&self) -> Frame {
        let mut frame = Frame::new(self.bounds);
        let backdrop = self.backdrop;
        let t = self.time_step as f32;

        for s in &self.seaweed {
            s.draw(&mut frame, t, backdrop);
        }
        for d in &self.decorations {
            d.draw(&mut frame, backdrop);
        }
        for b in &self.bubbles {
            b.draw(&mut frame, backdrop);
        }
        for b in &self.click_bubbles {
            b.draw(&mut frame, backdrop);
        }
        for p in &self.food {
            p.draw(&mut frame);
        }
        for j in &self.jellyfish {
            j.draw(&mut frame, backdrop);
        }
        for s in &self.schools {
            s.draw(&mut frame, backdrop);
        }
        for c in &self.creatures {
            c.as_swimmer().draw(&mut frame, backdrop);
        }
        if let Some(shark) = &self.shark {
            shark.draw(&mut frame, backdrop);
        }
        if let Some(crab) = &self.crab {
            crab.draw(&mut frame, backdrop);
        }
        self.floor.draw(&mut frame, backdrop);
        if self.paused {
            draw_help(&mut frame);
        }
        frame
    }
}

/// Startles every creature and school whose center lies within `radius` of
/// `at`. Returns how many were hit.
fn startle_near(
    creatures: &mut [Creature],
    schools: &mut [School],
    (x, y): (f32, f32),
    radius: f32,
    tick: &mut Tick,
) -> usize {
    let mut hit = 0;
    for c in creatures.iter_mut() {
        let s = c.as_swimmer_mut();
        if within(s, x, y, radius) {
            s.startle(tick);
            hit += 1;
        }
    }
    for s in schools.iter_mut() {
        if within(s, x, y, radius) {
            s.startle(tick);
            hit += 1;
        }
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assets::{DecorCategory, CHEST_CLOSED},
        entity::{decoration::Chest, swimmer::Behavior},
    };
    use rand::SeedableRng;

    fn quiet_config() -> SimConfig {
        SimConfig {
            shark_chance: 0.0,
            eel_chance: 0.0,
            ..SimConfig::default()
        }
    }

    fn scene(cfg: SimConfig, w: u16, h: u16, seed: u64) -> Scene {
        Scene::new(
            cfg,
            Bounds::new(w, h),
            Backdrop::Night,
            SmallRng::seed_from_u64(seed),
            Vec::new(),
        )
    }

    fn seeking(scene: &Scene) -> usize {
        scene
            .creatures
            .iter()
            .filter(|c| c.as_swimmer().behavior() == Behavior::Seeking)
            .count()
    }

    #[test]
    fn dropped_food_draws_fish_in_and_then_runs_out() {
        let mut s = scene(quiet_config(), 120, 30, 42);
        assert!(s.creatures.iter().any(|c| matches!(c, Creature::Fish(_))));
        assert!(s.drop_food());
        assert!(!s.drop_food(), "only one pellet at a time");

        let mut saw_seeking = false;
        for _ in 0..20 {
            s.tick();
            saw_seeking |= seeking(&s) > 0;
        }
        assert!(saw_seeking);

        for _ in 20..40 {
            s.tick();
        }
        assert!(s.food.is_empty());
        s.tick();
        assert_eq!(seeking(&s), 0);
    }

    #[test]
    fn food_is_noticed_from_the_fish_corner() {
        let cfg = SimConfig {
            food_notice_radius: 1.0,
            ..quiet_config()
        };
        let mut s = scene(cfg, 120, 30, 6);
        s.creatures.clear();
        assert!(s.drop_food());
        let (px, py) = (s.food[0].x(), s.food[0].y());

        let corner = Fish::spawn(&mut s.rng, &s.cfg, s.bounds).moved_to(px, py);
        let centered = Fish::spawn(&mut s.rng, &s.cfg, s.bounds);
        let ((cx, cy), (ax, ay)) = (centered.center(), centered.position());
        let centered = centered.moved_to(px - (cx - ax), py - (cy - ay));
        s.creatures.push(Creature::Fish(corner));
        s.creatures.push(Creature::Fish(centered));

        s.notify_food();
        let states: Vec<Behavior> = s
            .creatures
            .iter()
            .map(|c| c.as_swimmer().behavior())
            .collect();
        assert_eq!(states, vec![Behavior::Seeking, Behavior::Swimming]);
    }

    #[test]
    fn bursting_near_a_chest_opens_it_once() {
        let mut s = scene(quiet_config(), 120, 30, 3);
        let chest = Decoration::new(
            DecorCategory::Chest,
            CHEST_CLOSED,
            Some(Chest::Closed),
            50,
            s.bounds,
            &mut s.rng,
        );
        s.decorations = vec![chest];
        let (x, y) = (55.0, 25.0);

        s.bubble_burst(x, y);
        assert_eq!(s.decorations[0].chest(), Some(Chest::Open));
        let cues = s.drain_cues();
        assert!(cues.contains(&Cue::Bubbles));
        assert!(cues.contains(&Cue::ChestOpen));
        assert!(!s.click_bubbles.is_empty());

        s.bubble_burst(x, y);
        assert_eq!(s.decorations[0].chest(), Some(Chest::Open));
        assert!(!s.drain_cues().contains(&Cue::ChestOpen));
    }

    #[test]
    fn far_bursts_leave_the_chest_shut() {
        let mut s = scene(quiet_config(), 200, 30, 3);
        let chest = Decoration::new(
            DecorCategory::Chest,
            CHEST_CLOSED,
            Some(Chest::Closed),
            10,
            s.bounds,
            &mut s.rng,
        );
        s.decorations = vec![chest];
        s.bubble_burst(150.0, 10.0);
        assert_eq!(s.decorations[0].chest(), Some(Chest::Closed));
    }

    #[test]
    fn an_eel_that_swims_off_is_dropped() {
        let mut s = scene(quiet_config(), 120, 30, 8);
        s.creatures.clear();
        let e = Eel::spawn(&mut s.rng, &s.cfg, s.bounds);
        s.creatures.push(Creature::Eel(e));
        let mut ticks = 0;
        while !s.creatures.is_empty() {
            s.tick();
            ticks += 1;
            assert!(ticks < 5000);
        }
    }

    #[test]
    fn the_shark_visits_once() {
        let cfg = SimConfig {
            shark_chance: 1.0,
            shark_delay_ticks: (3, 3),
            ..quiet_config()
        };
        let mut s = scene(cfg, 80, 30, 1);
        assert_eq!(s.shark_countdown, Some(3));
        s.tick();
        s.tick();
        assert!(s.shark.is_none());
        s.tick();
        assert!(s.shark.is_some());
        assert!(s.shark_countdown.is_none());
        assert!(s.drain_cues().contains(&Cue::SharkArrival));

        let mut ticks = 0;
        while s.shark.is_some() {
            s.tick();
            ticks += 1;
            assert!(ticks < 2000);
        }
        for _ in 0..500 {
            s.tick();
        }
        assert!(s.shark.is_none());
        assert!(!s.drain_cues().contains(&Cue::SharkArrival));
    }

    #[test]
    fn pause_freezes_the_tank_and_gates_commands() {
        let mut s = scene(quiet_config(), 120, 30, 5);
        let normal = s.background();
        s.apply(Command::TogglePause);
        assert!(s.is_paused());
        assert_eq!(s.background(), PAUSED_BACKGROUND);

        let before = s.time_step;
        s.tick();
        assert_eq!(s.time_step, before);

        s.apply(Command::DropFood);
        s.apply(Command::ToggleBackground);
        s.apply(Command::BubbleBurst);
        assert!(s.food.is_empty());
        assert!(s.click_bubbles.is_empty());
        assert_eq!(s.backdrop(), Backdrop::Night);

        s.apply(Command::TogglePause);
        assert_eq!(s.background(), normal);
        s.apply(Command::ToggleBackground);
        assert_eq!(s.backdrop(), Backdrop::Day);
        s.apply(Command::DropFood);
        assert_eq!(s.food.len(), 1);
    }

    #[test]
    fn help_is_drawn_only_while_paused() {
        let mut s = scene(quiet_config(), 120, 30, 5);
        let text = |f: &Frame| {
            (0..30)
                .map(|y| f.row(y).iter().map(|c| c.ch).collect::<String>())
                .collect::<Vec<_>>()
                .join("\n")
        };
        assert!(!text(&s.compose()).contains("AQUARIUM CONTROLS"));
        s.apply(Command::TogglePause);
        assert!(text(&s.compose()).contains("AQUARIUM CONTROLS"));
    }

    #[test]
    fn the_floor_row_is_always_the_floor() {
        let mut s = scene(quiet_config(), 120, 30, 9);
        for _ in 0..30 {
            s.tick();
            let frame = s.compose();
            let row: Vec<char> = frame.row(29).iter().map(|c| c.ch).collect();
            assert_eq!(row, s.floor.pattern());
        }
    }

    #[test]
    fn a_new_scene_is_one_regeneration_from_its_seed() {
        let built = scene(quiet_config(), 120, 30, 9);
        let mut rolled = scene(quiet_config(), 120, 30, 1);
        rolled.rng = SmallRng::seed_from_u64(9);
        rolled.regenerate();
        assert_eq!(built.floor.pattern(), rolled.floor.pattern());
        assert_eq!(built.creatures.len(), rolled.creatures.len());
        assert_eq!(built.seaweed.len(), rolled.seaweed.len());
    }

    #[test]
    fn resize_rebuilds_only_on_change() {
        let mut s = scene(quiet_config(), 120, 30, 2);
        assert!(!s.resize(Bounds::new(120, 30)));
        assert!(s.resize(Bounds::new(80, 20)));
        assert_eq!(s.bounds(), Bounds::new(80, 20));
        assert_eq!(s.floor.pattern().len(), 80);
        assert_eq!(s.compose().bounds(), Bounds::new(80, 20));
    }

    #[test]
    fn tiny_terminals_do_not_panic() {
        for (w, h) in [(1, 1), (5, 3), (12, 6), (30, 8)] {
            let cfg = SimConfig {
                shark_chance: 1.0,
                shark_delay_ticks: (1, 1),
                eel_chance: 1.0,
                ..SimConfig::default()
            };
            let mut s = scene(cfg, w, h, 77);
            s.apply(Command::DropFood);
            s.apply(Command::BubbleBurst);
            for _ in 0..60 {
                s.tick();
                let frame = s.compose();
                assert!(frame.to_ansi(s.background()).is_ok());
            }
        }
    }

    #[test]
    fn babies_outlive_their_parent() {
        let cfg = SimConfig {
            seahorse_chance: 1.0,
            baby_chance: 1.0,
            puffer_chance: 0.0,
            ..quiet_config()
        };
        let mut s = scene(cfg, 120, 30, 4);
        assert!(s.creatures.iter().any(|c| matches!(c, Creature::Baby(_))));
        s.creatures.retain(|c| !matches!(c, Creature::Seahorse(_)));
        s.tick();
        for c in &s.creatures {
            if let Creature::Baby(b) = c {
                assert!(b.parent().is_none());
            }
        }
        for _ in 0..50 {
            s.tick();
        }
    }
}
