use super::{pick, pick_count};
use crate::{
    assets::{SEAWEED, SEAWEED_COLOR},
    config::SimConfig,
    palette::{adjust, Backdrop},
    render::Frame,
};
use rand::{rngs::SmallRng, seq::SliceRandom};
use std::f32::consts::TAU;

/// A stalk rooted just above the floor, built bottom-up from base, mid and
/// top pieces. Sway is a pure function of the scene clock, so there is no
/// per-tick state to advance.
pub(crate) struct Seaweed {
    x: i32,
    segments: Vec<&'static str>,
    phase: f32,
    sway_speed: f32,
}

impl Seaweed {
    pub(crate) fn spawn(x: i32, rng: &mut SmallRng, cfg: &SimConfig) -> Self {
        let height = pick_count(rng, cfg.seaweed_height).max(1) as usize;
        let segments = (0..height)
            .map(|i| {
                let set = if i == 0 {
                    SEAWEED.base
                } else if i == height - 1 {
                    SEAWEED.top
                } else {
                    SEAWEED.mid
                };
                set.choose(rng).copied().unwrap_or("|")
            })
            .collect();
        Self {
            x,
            segments,
            phase: pick(rng, (0.0, TAU)),
            sway_speed: cfg.seaweed_sway_speed,
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.segments.len()
    }

    /// Column offset of segment `i` at scene time `t`; zero at the root and
    /// growing toward the tip.
    fn sway(&self, i: usize, t: f32) -> i32 {
        let wave = (t * self.sway_speed + self.phase + i as f32 * 0.5).sin();
        (wave * (i as f32 / 2.0)) as i32
    }

    pub(crate) fn draw(&self, frame: &mut Frame, t: f32, backdrop: Backdrop) {
        let color = adjust(SEAWEED_COLOR, backdrop);
        let root = frame.bounds().floor_row() - 1;
        for (i, piece) in self.segments.iter().enumerate() {
            let y = root - i as i32;
            frame.put_str(self.x + self.sway(i, t), y, piece, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Bounds;
    use rand::SeedableRng;

    #[test]
    fn stalk_is_built_base_to_top() {
        let mut rng = SmallRng::seed_from_u64(2);
        let cfg = SimConfig::default();
        for _ in 0..20 {
            let s = Seaweed::spawn(10, &mut rng, &cfg);
            assert!((2..=11).contains(&s.height()));
            assert!(SEAWEED.base.contains(&s.segments[0]));
            assert!(SEAWEED.top.contains(&s.segments[s.height() - 1]));
        }
    }

    #[test]
    fn root_never_sways_and_the_tip_stays_within_reach() {
        let mut rng = SmallRng::seed_from_u64(2);
        let s = Seaweed::spawn(10, &mut rng, &SimConfig::default());
        for step in 0..200 {
            let t = step as f32;
            assert_eq!(s.sway(0, t), 0);
            for i in 0..s.height() {
                assert!(s.sway(i, t).abs() as f32 <= i as f32 / 2.0);
            }
        }
    }

    #[test]
    fn drawn_upward_from_the_row_above_the_floor() {
        let mut rng = SmallRng::seed_from_u64(2);
        let s = Seaweed::spawn(10, &mut rng, &SimConfig::default());
        let mut frame = Frame::new(Bounds::new(40, 20));
        s.draw(&mut frame, 0.0, Backdrop::Night);
        let base = frame.row(18);
        assert!(base[10..13].iter().all(|c| !c.is_blank()));
        assert!(frame.row(19).iter().all(|c| c.is_blank()));
    }
}
