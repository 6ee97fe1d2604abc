use crate::render::Bounds;
use crossterm::{
    cursor, execute, queue,
    style::{Print, ResetColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Raw mode plus alternate screen for as long as this lives. Dropping it
/// puts the terminal back, whichever way the loop was left.
pub(crate) struct Session {
    out: io::Stdout,
}

impl Session {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;
        Ok(Self { out })
    }

    /// Writes one serialized frame inside a synchronized update.
    pub(crate) fn present(&mut self, frame: &str) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            Print(frame),
            EndSynchronizedUpdate
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = queue!(
            self.out,
            EndSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        );
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
        debug!("terminal restored");
    }
}

/// Reports the current terminal extent in (columns, rows).
pub(crate) trait Geometry {
    fn size(&self) -> io::Result<(u16, u16)>;
}

pub(crate) struct TerminalGeometry;

impl Geometry for TerminalGeometry {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

fn usable((w, h): (u16, u16)) -> Option<(u16, u16)> {
    (w > 0 && h > 0).then_some((w, h))
}

fn from_env(env: impl Fn(&str) -> Option<String>) -> Option<(u16, u16)> {
    let cols = env("COLUMNS")?.trim().parse().ok()?;
    let rows = env("LINES")?.trim().parse().ok()?;
    usable((cols, rows))
}

/// Asks the terminal first, then `COLUMNS`/`LINES`, then settles for the
/// configured default. Never fails.
pub(crate) fn resolve_size(
    geo: &dyn Geometry,
    env: impl Fn(&str) -> Option<String>,
    default: (u16, u16),
) -> Bounds {
    let (w, h) = match geo.size().ok().and_then(usable) {
        Some(size) => size,
        None => from_env(env).unwrap_or_else(|| {
            warn!(
                width = default.0,
                height = default.1,
                "could not detect terminal size, using default"
            );
            default
        }),
    };
    Bounds::new(w, h)
}

pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(io::Result<(u16, u16)>);

    impl Geometry for Fixed {
        fn size(&self) -> io::Result<(u16, u16)> {
            match &self.0 {
                Ok(s) => Ok(*s),
                Err(e) => Err(io::Error::new(e.kind(), "no tty")),
            }
        }
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_80x24(key: &str) -> Option<String> {
        match key {
            "COLUMNS" => Some("80".into()),
            "LINES" => Some(" 24 ".into()),
            _ => None,
        }
    }

    fn broken() -> Fixed {
        Fixed(Err(io::Error::new(io::ErrorKind::Other, "no tty")))
    }

    #[test]
    fn terminal_answer_wins() {
        let b = resolve_size(&Fixed(Ok((132, 43))), env_80x24, (120, 30));
        assert_eq!(b, Bounds::new(132, 43));
    }

    #[test]
    fn falls_back_to_the_environment() {
        assert_eq!(resolve_size(&broken(), env_80x24, (120, 30)), Bounds::new(80, 24));
        // a zero-sized answer counts as no answer
        assert_eq!(
            resolve_size(&Fixed(Ok((0, 0))), env_80x24, (120, 30)),
            Bounds::new(80, 24)
        );
    }

    #[test]
    fn falls_back_to_the_default() {
        assert_eq!(resolve_size(&broken(), no_env, (120, 30)), Bounds::new(120, 30));
        let junk = |k: &str| (k == "COLUMNS").then(|| "wide".to_string());
        assert_eq!(resolve_size(&broken(), junk, (120, 30)), Bounds::new(120, 30));
    }
}
