use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Difficulty;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Decoded command consumed by the session state machine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Direction(Direction),
    SelectDifficulty(Difficulty),
    TogglePause,
    Quit,
    Reset,
    None,
}

/// How the command source waits for input.
///
/// Active play polls without blocking; menu, pause and game-over screens
/// block until a key arrives.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputMode {
    Blocking,
    NonBlocking,
}

/// Produces one decoded command per call.
pub trait CommandSource {
    fn next_command(&mut self, mode: InputMode) -> io::Result<Command>;
}

/// Crossterm-backed keyboard command source.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl CommandSource for TerminalInput {
    fn next_command(&mut self, mode: InputMode) -> io::Result<Command> {
        match mode {
            InputMode::NonBlocking => {
                while event::poll(Duration::ZERO)? {
                    let command = decode_event(&event::read()?);
                    if command != Command::None {
                        return Ok(command);
                    }
                }
                Ok(Command::None)
            }
            InputMode::Blocking => loop {
                let event = event::read()?;
                if matches!(event, Event::Resize(..)) {
                    // Let the caller redraw at the new size.
                    return Ok(Command::None);
                }
                let command = decode_event(&event);
                if command != Command::None {
                    return Ok(command);
                }
            },
        }
    }
}

fn decode_event(event: &Event) -> Command {
    match event {
        Event::Key(key) => decode_key(*key),
        _ => Command::None,
    }
}

/// Maps a key press to a command. Key releases decode to `None`.
#[must_use]
pub fn decode_key(key: KeyEvent) -> Command {
    if key.kind == KeyEventKind::Release {
        return Command::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Command::Quit,
            _ => Command::None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => Command::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => Command::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => Command::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => Command::Direction(Direction::Right),
        KeyCode::Char('p' | 'P') | KeyCode::Char(' ') => Command::TogglePause,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('r' | 'R') => Command::Reset,
        KeyCode::Char('1') => Command::SelectDifficulty(Difficulty::Easy),
        KeyCode::Char('2') => Command::SelectDifficulty(Difficulty::Medium),
        KeyCode::Char('3') => Command::SelectDifficulty(Difficulty::Hard),
        _ => Command::None,
    }
}
