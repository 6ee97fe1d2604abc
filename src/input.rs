use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// A repeat of the same symbol inside this window is dropped.
const DEBOUNCE: Duration = Duration::from_millis(80);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Symbol {
    Char(char),
    Escape,
    Interrupt,
    Enter,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

/// Non-blocking source of at most one symbol per poll.
pub(crate) trait InputSource {
    fn poll(&mut self) -> anyhow::Result<Option<Symbol>>;
}

pub(crate) fn symbol_for(key: &KeyEvent) -> Option<Symbol> {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('d'))
    {
        return Some(Symbol::Interrupt);
    }
    match key.code {
        KeyCode::Char(ch) => Some(Symbol::Char(ch)),
        KeyCode::Esc => Some(Symbol::Escape),
        KeyCode::Enter => Some(Symbol::Enter),
        KeyCode::Backspace => Some(Symbol::Backspace),
        KeyCode::Up => Some(Symbol::Up),
        KeyCode::Down => Some(Symbol::Down),
        KeyCode::Left => Some(Symbol::Left),
        KeyCode::Right => Some(Symbol::Right),
        _ => None,
    }
}

/// Keyboard read through crossterm while the terminal is in raw mode.
#[derive(Default)]
pub(crate) struct Keyboard {
    last: Option<(Symbol, Instant)>,
}

impl Keyboard {
    fn debounced(&mut self, sym: Symbol, now: Instant) -> Option<Symbol> {
        if let Some((prev, at)) = self.last {
            if prev == sym && now.saturating_duration_since(at) < DEBOUNCE {
                return None;
            }
        }
        self.last = Some((sym, now));
        Some(sym)
    }
}

impl InputSource for Keyboard {
    fn poll(&mut self) -> anyhow::Result<Option<Symbol>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(sym) = symbol_for(&k) {
                    if let Some(sym) = self.debounced(sym, Instant::now()) {
                        return Ok(Some(sym));
                    }
                }
            }
        }
        Ok(None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    TogglePause,
    ToggleSound,
    ToggleBackground,
    Regenerate,
    BubbleBurst,
    DropFood,
    Quit,
}

impl Command {
    /// Commands that still work while the tank is paused.
    pub(crate) fn works_while_paused(self) -> bool {
        matches!(
            self,
            Command::TogglePause | Command::ToggleSound | Command::Quit
        )
    }
}

pub(crate) fn command_for(sym: Symbol) -> Option<Command> {
    match sym {
        Symbol::Escape | Symbol::Interrupt => Some(Command::Quit),
        Symbol::Char(ch) => match ch.to_ascii_lowercase() {
            'h' | 'p' => Some(Command::TogglePause),
            's' => Some(Command::ToggleSound),
            'm' => Some(Command::ToggleBackground),
            'r' => Some(Command::Regenerate),
            'b' => Some(Command::BubbleBurst),
            'f' => Some(Command::DropFood),
            'q' => Some(Command::Quit),
            _ => None,
        },
        _ => None,
    }
}
