use super::{chance, pick_color, pick_count, pick_i32};
use crate::{
    art::ArtGrid,
    assets::{decor_colors, DecorCategory, CHEST_CLOSED, CHEST_OPEN, SHELLS},
    config::SimConfig,
    palette::{adjust, Backdrop},
    render::{Bounds, Frame},
    sound::Cue,
};
use crossterm::style::Color;
use rand::{rngs::SmallRng, Rng};
use tracing::{debug, info};

/// Extra columns kept free between neighbouring decorations.
const SPACING: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Chest {
    Closed,
    Open,
}

/// Something resting on the sea floor. Only the treasure chest has a state,
/// and it only ever goes from closed to open.
pub(crate) struct Decoration {
    category: DecorCategory,
    chest: Option<Chest>,
    art: ArtGrid,
    x: i32,
    y: i32,
    color: Color,
}

impl Decoration {
    pub(crate) fn new(
        category: DecorCategory,
        lines: &[&str],
        chest: Option<Chest>,
        x: i32,
        bounds: Bounds,
        rng: &mut SmallRng,
    ) -> Self {
        let art = ArtGrid::lines_or_placeholder(lines);
        let y = resting_row(&art, bounds);
        Self {
            category,
            chest,
            art,
            x,
            y,
            color: pick_color(rng, decor_colors(category)),
        }
    }

    pub(crate) fn chest(&self) -> Option<Chest> {
        self.chest
    }

    #[cfg(test)]
    pub(crate) fn x(&self) -> i32 {
        self.x
    }

    #[cfg(test)]
    pub(crate) fn y(&self) -> i32 {
        self.y
    }

    pub(crate) fn width(&self) -> usize {
        self.art.width()
    }

    #[cfg(test)]
    pub(crate) fn category(&self) -> DecorCategory {
        self.category
    }

    pub(crate) fn is_near_point(&self, x: f32, y: f32, radius: f32) -> bool {
        let cx = self.x as f32 + self.art.width() as f32 / 2.0;
        let cy = self.y as f32 + self.art.height() as f32 / 2.0;
        let (dx, dy) = (cx - x, cy - y);
        (dx * dx + dy * dy).sqrt() <= radius
    }

    /// Flips a closed chest open and settles the taller art back on the
    /// floor. Returns whether anything changed.
    pub(crate) fn open_chest(&mut self, bounds: Bounds, cues: &mut Vec<Cue>) -> bool {
        if self.chest != Some(Chest::Closed) {
            return false;
        }
        self.chest = Some(Chest::Open);
        self.art = ArtGrid::lines_or_placeholder(CHEST_OPEN);
        self.y = resting_row(&self.art, bounds);
        cues.push(Cue::ChestOpen);
        info!(x = self.x, "treasure chest opened");
        true
    }

    /// Paints the art opaquely between the first and last glyph of each
    /// row, so whatever swims behind it is hidden.
    pub(crate) fn draw(&self, frame: &mut Frame, backdrop: Backdrop) {
        let color = adjust(self.color, backdrop);
        for (dy, row) in self.art.rows().iter().enumerate() {
            let Some(start) = row.iter().position(|g| g.ch != ' ') else {
                continue;
            };
            let end = row.iter().rposition(|g| g.ch != ' ').unwrap_or(start);
            let y = self.y + dy as i32;
            for (dx, g) in row.iter().enumerate().take(end + 1).skip(start) {
                let x = self.x + dx as i32;
                if g.ch == ' ' {
                    frame.put(x, y, ' ', Color::Reset);
                } else {
                    frame.put(x, y, g.ch, color);
                }
            }
        }
    }
}

fn resting_row(art: &ArtGrid, bounds: Bounds) -> i32 {
    bounds.floor_row() - art.height() as i32
}

/// A placeable piece: the closed chest or one of the shells.
struct Piece {
    category: DecorCategory,
    lines: &'static [&'static str],
    chest: bool,
}

fn catalogue() -> Vec<Piece> {
    let mut all = vec![Piece {
        category: DecorCategory::Chest,
        lines: CHEST_CLOSED,
        chest: true,
    }];
    all.extend(SHELLS.iter().map(|(category, lines)| Piece {
        category: *category,
        lines: *lines,
        chest: false,
    }));
    all
}

fn art_width(lines: &[&str]) -> i32 {
    lines.iter().map(|l| l.chars().count()).max().unwrap_or(1) as i32
}

/// Scatters up to `decoration_max` pieces along the floor without letting
/// any two crowd each other horizontally. Gives up after a fixed number of
/// attempts, so fewer may be placed on a narrow tank.
pub(crate) fn generate_decorations(
    rng: &mut SmallRng,
    cfg: &SimConfig,
    bounds: Bounds,
) -> Vec<Decoration> {
    let mut placed: Vec<Decoration> = Vec::new();
    if !chance(rng, cfg.decoration_chance) {
        return placed;
    }
    let wanted = pick_count(rng, (1, cfg.decoration_max)) as usize;
    let pieces = catalogue();
    let mut attempts = 0;
    while placed.len() < wanted && attempts < cfg.decoration_attempts {
        attempts += 1;
        let piece = &pieces[rng.gen_range(0..pieces.len())];
        let w = art_width(piece.lines);
        let x = pick_i32(rng, 0, bounds.width as i32 - w - 1);
        let crowded = placed
            .iter()
            .any(|d| (x - d.x).abs() < w + d.width() as i32 + SPACING);
        if crowded {
            continue;
        }
        let chest = piece.chest.then_some(Chest::Closed);
        placed.push(Decoration::new(
            piece.category,
            piece.lines,
            chest,
            x,
            bounds,
            rng,
        ));
    }
    for d in &placed {
        debug!(category = ?d.category, x = d.x, y = d.y, "decoration placed");
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn chest_at(x: i32, bounds: Bounds) -> Decoration {
        let mut rng = SmallRng::seed_from_u64(5);
        Decoration::new(
            DecorCategory::Chest,
            CHEST_CLOSED,
            Some(Chest::Closed),
            x,
            bounds,
            &mut rng,
        )
    }

    #[test]
    fn chest_opens_once() {
        let bounds = Bounds::new(120, 30);
        let mut d = chest_at(40, bounds);
        let mut cues = Vec::new();
        assert_eq!(d.y(), 29 - CHEST_CLOSED.len() as i32);

        assert!(d.open_chest(bounds, &mut cues));
        assert_eq!(d.chest(), Some(Chest::Open));
        assert_eq!(d.y(), 29 - CHEST_OPEN.len() as i32);
        assert_eq!(cues, vec![Cue::ChestOpen]);

        assert!(!d.open_chest(bounds, &mut cues));
        assert_eq!(d.chest(), Some(Chest::Open));
        assert_eq!(cues.len(), 1);
    }

    #[test]
    fn shells_have_no_chest_state() {
        let bounds = Bounds::new(120, 30);
        let mut rng = SmallRng::seed_from_u64(5);
        let (category, lines) = SHELLS[1];
        let mut d = Decoration::new(category, lines, None, 10, bounds, &mut rng);
        assert!(!d.open_chest(bounds, &mut Vec::new()));
        assert_eq!(d.chest(), None);
    }

    #[test]
    fn proximity_uses_the_art_center() {
        let bounds = Bounds::new(120, 30);
        let d = chest_at(40, bounds);
        let cx = 40.0 + d.width() as f32 / 2.0;
        let cy = d.y() as f32 + CHEST_CLOSED.len() as f32 / 2.0;
        assert!(d.is_near_point(cx + 19.0, cy, 20.0));
        assert!(!d.is_near_point(cx + 21.0, cy, 20.0));
    }

    #[test]
    fn drawing_occludes_inside_the_outline() {
        let bounds = Bounds::new(120, 30);
        let d = chest_at(0, bounds);
        let mut frame = Frame::new(bounds);
        for x in 0..20 {
            frame.put(x, d.y() + 3, '#', Color::Green);
        }
        d.draw(&mut frame, Backdrop::Night);
        // "        | |--------|": leading spaces stay, the gap after '|' is blanked
        assert_eq!(frame.get(0, d.y() + 3).map(|c| c.ch), Some('#'));
        assert_eq!(frame.get(8, d.y() + 3).map(|c| c.ch), Some('|'));
        assert_eq!(frame.get(9, d.y() + 3), Some(crate::render::Cell::BLANK));
    }

    #[test]
    fn generated_pieces_keep_their_distance() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut cfg = SimConfig::default();
        cfg.decoration_chance = 1.0;
        let bounds = Bounds::new(200, 40);
        for _ in 0..30 {
            let placed = generate_decorations(&mut rng, &cfg, bounds);
            assert!(!placed.is_empty() && placed.len() <= 4);
            for (i, a) in placed.iter().enumerate() {
                assert!(a.x() >= 0 && a.x() + a.width() as i32 <= 199);
                if a.chest().is_some() {
                    assert_eq!(a.chest(), Some(Chest::Closed));
                    assert_eq!(a.category(), DecorCategory::Chest);
                }
                for b in &placed[i + 1..] {
                    let gap = (a.x() - b.x()).abs();
                    assert!(gap >= a.width() as i32 + b.width() as i32 + SPACING);
                }
            }
        }
    }

    #[test]
    fn no_decorations_when_the_roll_fails() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut cfg = SimConfig::default();
        cfg.decoration_chance = 0.0;
        assert!(generate_decorations(&mut rng, &cfg, Bounds::new(120, 30)).is_empty());
    }
}
