use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// Background shown while the scene is paused (help overlay visible).
pub(crate) const PAUSED_BACKGROUND: Color = Color::DarkBlue;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Backdrop {
    #[default]
    Night,
    Day,
}

impl Backdrop {
    pub(crate) fn toggled(self) -> Self {
        match self {
            Backdrop::Night => Backdrop::Day,
            Backdrop::Day => Backdrop::Night,
        }
    }

    pub(crate) fn background(self) -> Color {
        match self {
            Backdrop::Night => Color::Black,
            Backdrop::Day => Color::Cyan,
        }
    }

    pub(crate) fn is_light(self) -> bool {
        matches!(self, Backdrop::Day)
    }
}

/// Colors that wash out against the light backdrop, with their replacement.
fn light_remap(color: Color) -> Option<Color> {
    match color {
        Color::DarkYellow => Some(Color::DarkBlue),
        Color::Grey => Some(Color::Blue),
        Color::DarkCyan => Some(Color::DarkGrey),
        Color::Cyan => Some(Color::Black),
        Color::Yellow => Some(Color::DarkRed),
        Color::Blue => Some(Color::DarkBlue),
        Color::Magenta => Some(Color::DarkMagenta),
        _ => None,
    }
}

/// Color to paint for `color` under `backdrop`. Stored entity colors are never
/// rewritten; everything that adapts to the backdrop goes through here at draw time.
pub(crate) fn adjust(color: Color, backdrop: Backdrop) -> Color {
    if backdrop.is_light() {
        light_remap(color).unwrap_or(color)
    } else {
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REMAPPED: [Color; 7] = [
        Color::DarkYellow,
        Color::Grey,
        Color::DarkCyan,
        Color::Cyan,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
    ];

    #[test]
    fn night_leaves_colors_alone() {
        for c in REMAPPED {
            assert_eq!(adjust(c, Backdrop::Night), c);
        }
    }

    #[test]
    fn day_remaps_low_contrast_colors() {
        assert_eq!(adjust(Color::Cyan, Backdrop::Day), Color::Black);
        assert_eq!(adjust(Color::DarkYellow, Backdrop::Day), Color::DarkBlue);
        assert_eq!(adjust(Color::DarkRed, Backdrop::Day), Color::DarkRed);
    }

    #[test]
    fn toggling_twice_restores_every_adjusted_color() {
        let start = Backdrop::Night;
        for c in REMAPPED {
            let before = adjust(c, start);
            let after = adjust(c, start.toggled().toggled());
            assert_eq!(before, after);
            assert_ne!(adjust(c, start.toggled()), before);
        }
    }
}
