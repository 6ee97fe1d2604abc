use super::{pick, pick_color, pick_i32, Tick};
use crate::{
    art::ArtGrid,
    assets::{JELLYFISH_FRAMES, JELLY_BELL_ROWS, JELLY_COLORS},
    config::SimConfig,
    palette::{adjust, Backdrop},
    render::{Bounds, Frame},
};
use crossterm::style::Color;
use rand::rngs::SmallRng;

/// Drifts upward pulsing its tentacles, then wraps around to below the
/// floor. Painted behind everything else.
pub(crate) struct Jellyfish {
    x: f32,
    y: f32,
    speed: f32,
    frames: Vec<ArtGrid>,
    frame: usize,
    anim_rate: f32,
    anim_counter: f32,
    bell: Color,
    tentacles: Color,
}

impl Jellyfish {
    pub(crate) fn spawn(rng: &mut SmallRng, cfg: &SimConfig, bounds: Bounds) -> Self {
        let frames: Vec<ArtGrid> = JELLYFISH_FRAMES
            .iter()
            .map(|f| ArtGrid::lines_or_placeholder(f))
            .collect();
        let bell = pick_color(rng, JELLY_COLORS);
        let others: Vec<Color> = JELLY_COLORS
            .iter()
            .copied()
            .filter(|c| *c != bell)
            .collect();
        let tentacles = pick_color(rng, &others);
        let (w, h) = (frames[0].width() as i32, frames[0].height() as i32);
        Self {
            x: pick_i32(rng, 0, bounds.width as i32 - w) as f32,
            y: pick_i32(rng, 0, bounds.height as i32 - h) as f32,
            speed: pick(rng, cfg.jelly_speed),
            frame: pick_i32(rng, 0, frames.len() as i32 - 1) as usize,
            frames,
            anim_rate: pick(rng, cfg.jelly_frame_rate),
            anim_counter: 0.0,
            bell,
            tentacles,
        }
    }

    fn art(&self) -> &ArtGrid {
        &self.frames[self.frame % self.frames.len()]
    }

    pub(crate) fn update(&mut self, tick: &mut Tick) {
        self.anim_counter += self.anim_rate;
        if self.anim_counter >= 1.0 {
            self.frame = (self.frame + 1) % self.frames.len();
            self.anim_counter -= 1.0;
        }
        self.y -= self.speed;
        let h = self.art().height() as f32;
        if self.y < -h {
            self.y = tick.bounds.h();
            let w = self.art().width() as i32;
            self.x = pick_i32(tick.rng, 0, tick.bounds.width as i32 - w) as f32;
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        let bell = adjust(self.bell, backdrop);
        let tentacles = adjust(self.tentacles, backdrop);
        self.art().draw_behind(frame, self.x as i32, self.y as i32, |row, _| {
            if row < JELLY_BELL_ROWS {
                bell
            } else {
                tentacles
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::testing::Harness;

    #[test]
    fn bell_and_tentacles_never_share_a_color() {
        let mut h = Harness::new(100, 40);
        for _ in 0..100 {
            let j = Jellyfish::spawn(&mut h.rng, &h.cfg, h.bounds);
            assert_ne!(j.bell, j.tentacles);
        }
    }

    #[test]
    fn rises_and_comes_back_from_below() {
        let mut h = Harness::new(100, 40);
        let mut j = Jellyfish::spawn(&mut h.rng, &h.cfg, h.bounds);
        let mut wrapped = false;
        for _ in 0..2000 {
            let before = j.y;
            j.update(&mut h.tick());
            if j.y > before {
                wrapped = true;
                assert_eq!(j.y, 40.0);
            }
            assert!(j.y >= -(j.art().height() as f32));
        }
        assert!(wrapped);
    }

    #[test]
    fn frames_advance_at_a_fractional_rate() {
        let mut h = Harness::new(100, 400);
        let mut j = Jellyfish::spawn(&mut h.rng, &h.cfg, h.bounds);
        j.anim_rate = 0.25;
        j.frame = 0;
        for _ in 0..3 {
            j.update(&mut h.tick());
        }
        assert_eq!(j.frame, 0);
        j.update(&mut h.tick());
        assert_eq!(j.frame, 1);
    }

    #[test]
    fn painted_only_into_empty_cells() {
        let mut h = Harness::new(100, 40);
        let mut j = Jellyfish::spawn(&mut h.rng, &h.cfg, h.bounds);
        j.x = 0.0;
        j.y = 0.0;
        j.frame = 0;
        let mut frame = Frame::new(h.bounds);
        // top-left of the bell is at column 9 of the first row
        frame.put(9, 0, 'X', Color::Green);
        j.draw(&mut frame, Backdrop::Night);
        assert_eq!(frame.get(9, 0).map(|c| c.ch), Some('X'));
        assert_eq!(frame.get(10, 0).map(|c| c.fg), Some(j.bell));
        assert_eq!(frame.get(10, 4).map(|c| c.fg), Some(j.tentacles));
    }
}
