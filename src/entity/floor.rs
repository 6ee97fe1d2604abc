use super::{chance, pick_count};
use crate::{
    assets::{FLOOR_COLOR, FLOOR_RAMP},
    palette::{adjust, Backdrop},
    render::Frame,
};
use rand::rngs::SmallRng;

/// Static dune pattern along the bottom row, rolled once per scene.
#[derive(Default)]
pub(crate) struct Floor {
    pattern: Vec<char>,
}

impl Floor {
    pub(crate) fn generate(width: u16, rng: &mut SmallRng) -> Self {
        let width = width as usize;
        let mut pattern = Vec::with_capacity(width);
        let push = |pattern: &mut Vec<char>, ch: char, n: u32| {
            for _ in 0..n {
                if pattern.len() < width {
                    pattern.push(ch);
                }
            }
        };

        let top = FLOOR_RAMP.len();
        while pattern.len() < width {
            let amp = pick_count(rng, (2, top as u32)) as usize;
            let step = pick_count(rng, (1, 3));

            for &ch in &FLOOR_RAMP[..amp] {
                push(&mut pattern, ch, step);
            }
            // plateau
            push(&mut pattern, FLOOR_RAMP[amp - 1], pick_count(rng, (1, 5)));
            // The way down skips the crest glyph and starts level with the peak.
            for &ch in FLOOR_RAMP[..top - 1].iter().rev().skip(top - amp) {
                push(&mut pattern, ch, step);
            }
            if pattern.len() < width {
                for _ in 0..pick_count(rng, (2, 8)) {
                    let ch = if chance(rng, 0.1) { '.' } else { '_' };
                    push(&mut pattern, ch, 1);
                }
            }
        }
        Self { pattern }
    }

    #[cfg(test)]
    pub(crate) fn pattern(&self) -> &[char] {
        &self.pattern
    }

    /// Overwrites the whole bottom row; anything that dipped into it is
    /// clipped.
    pub(crate) fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        let color = adjust(FLOOR_COLOR, backdrop);
        let y = frame.bounds().floor_row();
        for (x, &ch) in self.pattern.iter().enumerate() {
            frame.put(x as i32, y, ch, color);
        }
    }
}
