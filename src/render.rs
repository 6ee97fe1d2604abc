use crossterm::{
    cursor,
    style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    Command,
};
use std::fmt::{self, Write as _};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
}

impl Cell {
    pub(crate) const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::Reset,
    };

    pub(crate) fn new(ch: char, fg: Color) -> Self {
        Self { ch, fg }
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

/// Terminal extent in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Bounds {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub(crate) fn w(&self) -> f32 {
        self.width as f32
    }

    pub(crate) fn h(&self) -> f32 {
        self.height as f32
    }

    /// Row index of the sea floor.
    pub(crate) fn floor_row(&self) -> i32 {
        self.height as i32 - 1
    }
}

/// One frame worth of glyphs. Rebuilt from scratch every tick; nothing keeps a
/// reference to it past the draw pass.
pub(crate) struct Frame {
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl Frame {
    pub(crate) fn new(bounds: Bounds) -> Self {
        let n = bounds.width as usize * bounds.height as usize;
        Self {
            bounds,
            cells: vec![Cell::BLANK; n],
        }
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let (w, h) = (self.bounds.width as usize, self.bounds.height as usize);
        if x >= w || y >= h {
            return None;
        }
        Some(y * w + x)
    }

    pub(crate) fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Writes a cell; anything outside the frame is dropped.
    pub(crate) fn put(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = Cell::new(ch, fg);
        }
    }

    /// Writes a cell only where nothing has been painted yet.
    pub(crate) fn put_behind(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if let Some(i) = self.idx(x, y) {
            if self.cells[i].is_blank() {
                self.cells[i] = Cell::new(ch, fg);
            }
        }
    }

    pub(crate) fn put_str(&mut self, x: i32, y: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as i32, y, ch, fg);
        }
    }

    pub(crate) fn row(&self, y: u16) -> &[Cell] {
        let w = self.bounds.width as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }

    /// Serializes the frame for a raw-mode terminal: background, clear, home,
    /// then every row. A color code is emitted only where the foreground differs
    /// from the cell just before it.
    pub(crate) fn to_ansi(&self, background: Color) -> Result<String, fmt::Error> {
        let mut out = String::with_capacity(self.cells.len() * 2 + 64);
        SetBackgroundColor(background).write_ansi(&mut out)?;
        Clear(ClearType::All).write_ansi(&mut out)?;
        cursor::MoveTo(0, 0).write_ansi(&mut out)?;

        for y in 0..self.bounds.height {
            if y > 0 {
                out.write_str("\r\n")?;
            }
            let mut current: Option<Color> = None;
            for cell in self.row(y) {
                if current != Some(cell.fg) {
                    SetForegroundColor(cell.fg).write_ansi(&mut out)?;
                    current = Some(cell.fg);
                }
                out.write_char(cell.ch)?;
            }
        }
        ResetColor.write_ansi(&mut out)?;
        Ok(out)
    }
}

const HELP_LINES: [&str; 14] = [
    "╔══════════════════════════════╗",
    "║       AQUARIUM CONTROLS      ║",
    "╠══════════════════════════════╣",
    "║                              ║",
    "║   M - Toggle Day/Night Mode  ║",
    "║   R - Randomize New Scene    ║",
    "║   B - Create Bubble Burst    ║",
    "║   F - Drop Food Pellet       ║",
    "║   S - Toggle Sound On/Off    ║",
    "║   H - Toggle This Help Menu  ║",
    "║                              ║",
    "║    ESC/Q - Exit Aquarium     ║",
    "║                              ║",
    "╚══════════════════════════════╝",
];

/// Centered controls panel shown while paused. Skipped when the terminal is
/// too small to hold it.
pub(crate) fn draw_help(frame: &mut Frame) {
    let box_w = HELP_LINES[0].chars().count() as i32;
    let box_h = HELP_LINES.len() as i32;
    let b = frame.bounds();
    let x0 = (b.width as i32 - box_w) / 2;
    let y0 = (b.height as i32 - box_h) / 2;
    if x0 < 0 || y0 < 0 {
        return;
    }
    for (row, line) in HELP_LINES.iter().enumerate() {
        frame.put_str(x0, y0 + row as i32, line, Color::Yellow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(hay: &str, needle: &str) -> usize {
        hay.matches(needle).count()
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut f = Frame::new(Bounds::new(4, 3));
        f.put(-1, 0, 'x', Color::Red);
        f.put(0, -1, 'x', Color::Red);
        f.put(4, 0, 'x', Color::Red);
        f.put(0, 3, 'x', Color::Red);
        f.put(3, 2, 'y', Color::Red);
        assert_eq!(f.get(3, 2), Some(Cell::new('y', Color::Red)));
        assert!(f.cells.iter().filter(|c| !c.is_blank()).count() == 1);
    }

    #[test]
    fn put_behind_never_occludes() {
        let mut f = Frame::new(Bounds::new(3, 1));
        f.put(1, 0, 'a', Color::Red);
        f.put_behind(1, 0, 'b', Color::Blue);
        f.put_behind(2, 0, 'c', Color::Blue);
        assert_eq!(f.get(1, 0).map(|c| c.ch), Some('a'));
        assert_eq!(f.get(2, 0).map(|c| c.ch), Some('c'));
    }

    #[test]
    fn color_codes_only_on_change() {
        let mut f = Frame::new(Bounds::new(6, 1));
        f.put_str(0, 0, "aaa", Color::Red);
        f.put_str(3, 0, "bbb", Color::Green);
        let s = f.to_ansi(Color::Black).expect("serialize");

        let mut red = String::new();
        SetForegroundColor(Color::Red).write_ansi(&mut red).unwrap();
        let mut green = String::new();
        SetForegroundColor(Color::Green).write_ansi(&mut green).unwrap();

        assert_eq!(count(&s, &red), 1);
        assert_eq!(count(&s, &green), 1);
        assert!(s.contains("aaa"));
        assert!(s.contains("bbb"));
    }

    #[test]
    fn rows_are_separated_for_raw_mode() {
        let f = Frame::new(Bounds::new(2, 3));
        let s = f.to_ansi(Color::Black).unwrap();
        assert_eq!(count(&s, "\r\n"), 2);
    }

    #[test]
    fn help_fits_or_is_skipped() {
        let mut small = Frame::new(Bounds::new(10, 5));
        draw_help(&mut small);
        assert!(small.cells.iter().all(|c| c.is_blank()));

        let mut big = Frame::new(Bounds::new(80, 24));
        draw_help(&mut big);
        assert!(big.cells.iter().any(|c| c.ch == '╔'));
    }
}
