use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use longcat::Direction;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Move(Direction),
    Restart,
    Quit,
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {}
        _ => return None,
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Move(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Move(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Move(Direction::Right)),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Blocks until the player picks restart (`true`) or quit (`false`).
pub fn wait_for_restart() -> io::Result<bool> {
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match command_for(key) {
                    Some(Command::Restart) => return Ok(true),
                    Some(Command::Quit) => return Ok(false),
                    _ => {}
                }
            }
        }
    }
}
