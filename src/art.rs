//! Art templates come in three shapes in the static tables: a single line, a
//! block of lines, and rows of color-keyed runs. All of them are normalized once
//! into an [`ArtGrid`] so nothing downstream cares which shape it started as.

use crate::render::Frame;
use crossterm::style::Color;
use thiserror::Error;
use tracing::warn;

/// Which color of a creature's livery a glyph takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Tint {
    Base,
    Body,
    Fin,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum ArtTemplate {
    Line(&'static str),
    Block(&'static [&'static str]),
    Keyed(&'static [&'static [(Tint, &'static str)]]),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ArtError {
    #[error("art template has no rows")]
    Empty,
    #[error("art template has no visible glyphs")]
    Blank,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Glyph {
    pub(crate) ch: char,
    pub(crate) tint: Tint,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ArtGrid {
    rows: Vec<Vec<Glyph>>,
    width: usize,
}

impl ArtGrid {
    pub(crate) fn from_template(template: &ArtTemplate) -> Result<Self, ArtError> {
        match template {
            ArtTemplate::Line(line) => Self::from_lines(&[*line]),
            ArtTemplate::Block(lines) => Self::from_lines(lines),
            ArtTemplate::Keyed(rows) => {
                let rows = rows
                    .iter()
                    .map(|runs| {
                        runs.iter()
                            .flat_map(|(tint, run)| {
                                run.chars().map(move |ch| Glyph { ch, tint: *tint })
                            })
                            .collect()
                    })
                    .collect();
                Self::from_rows(rows)
            }
        }
    }

    pub(crate) fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, ArtError> {
        let rows = lines
            .iter()
            .map(|l| {
                l.as_ref()
                    .chars()
                    .map(|ch| Glyph {
                        ch,
                        tint: Tint::Base,
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(rows)
    }

    fn from_rows(rows: Vec<Vec<Glyph>>) -> Result<Self, ArtError> {
        if rows.is_empty() {
            return Err(ArtError::Empty);
        }
        if rows.iter().flatten().all(|g| g.ch == ' ') {
            return Err(ArtError::Blank);
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Ok(Self { rows, width })
    }

    /// Single visible glyph standing in for a broken table entry.
    pub(crate) fn placeholder() -> Self {
        Self {
            rows: vec![vec![Glyph {
                ch: '?',
                tint: Tint::Base,
            }]],
            width: 1,
        }
    }

    /// Normalizes a template, substituting the placeholder if it is malformed.
    pub(crate) fn normalize(template: &ArtTemplate) -> Self {
        Self::from_template(template).unwrap_or_else(|e| {
            warn!(error = %e, "bad art entry, using placeholder");
            Self::placeholder()
        })
    }

    pub(crate) fn lines_or_placeholder<S: AsRef<str>>(lines: &[S]) -> Self {
        Self::from_lines(lines).unwrap_or_else(|e| {
            warn!(error = %e, "bad art lines, using placeholder");
            Self::placeholder()
        })
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn rows(&self) -> &[Vec<Glyph>] {
        &self.rows
    }

    /// Paints every non-space glyph with its top-left corner at (x, y).
    pub(crate) fn draw(&self, frame: &mut Frame, x: i32, y: i32, paint: impl Fn(Tint) -> Color) {
        for (dy, row) in self.rows.iter().enumerate() {
            for (dx, g) in row.iter().enumerate() {
                if g.ch != ' ' {
                    frame.put(x + dx as i32, y + dy as i32, g.ch, paint(g.tint));
                }
            }
        }
    }

    /// Same as [`ArtGrid::draw`] but only into cells that are still empty.
    pub(crate) fn draw_behind(
        &self,
        frame: &mut Frame,
        x: i32,
        y: i32,
        paint: impl Fn(usize, Tint) -> Color,
    ) {
        for (dy, row) in self.rows.iter().enumerate() {
            for (dx, g) in row.iter().enumerate() {
                if g.ch != ' ' {
                    frame.put_behind(x + dx as i32, y + dy as i32, g.ch, paint(dy, g.tint));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Bounds;

    static TANG: &[&[(Tint, &str)]] = &[
        &[(Tint::Fin, "|\\")],
        &[(Tint::Fin, "> "), (Tint::Body, "_o<")],
    ];

    #[test]
    fn every_shape_normalizes_to_the_same_grid_kind() {
        let line = ArtGrid::from_template(&ArtTemplate::Line("><>")).unwrap();
        assert_eq!((line.width(), line.height()), (3, 1));

        let block = ArtGrid::from_template(&ArtTemplate::Block(&[" /", "/\\/", "\\/\\"])).unwrap();
        assert_eq!((block.width(), block.height()), (3, 3));

        let keyed = ArtGrid::from_template(&ArtTemplate::Keyed(TANG)).unwrap();
        assert_eq!((keyed.width(), keyed.height()), (5, 2));
        assert_eq!(keyed.rows()[1][0].tint, Tint::Fin);
        assert_eq!(keyed.rows()[1][3].tint, Tint::Body);
    }

    #[test]
    fn malformed_entries_become_a_placeholder() {
        assert_eq!(
            ArtGrid::from_template(&ArtTemplate::Block(&[])),
            Err(ArtError::Empty)
        );
        assert_eq!(
            ArtGrid::from_template(&ArtTemplate::Line("   ")),
            Err(ArtError::Blank)
        );
        let g = ArtGrid::normalize(&ArtTemplate::Block(&[]));
        assert_eq!(g, ArtGrid::placeholder());
        assert_eq!(g.rows()[0][0].ch, '?');
    }

    #[test]
    fn draw_skips_spaces_and_clips() {
        let g = ArtGrid::from_lines(&["a b"]).unwrap();
        let mut f = Frame::new(Bounds::new(3, 1));
        f.put(1, 0, 'z', Color::Blue);
        g.draw(&mut f, 0, 0, |_| Color::Red);
        assert_eq!(f.get(1, 0).map(|c| c.ch), Some('z'));
        assert_eq!(f.get(2, 0).map(|c| c.ch), Some('b'));

        g.draw(&mut f, -2, 0, |_| Color::Green);
        assert_eq!(f.get(0, 0), Some(crate::render::Cell::new('b', Color::Green)));
    }
}
