//! String commands, as a host binds them to keys.
//!
//! ```text
//! toggle [all|cursor]
//! move up|down|left|right
//! movewindow up|down|left|right
//! exit
//! ```

use std::str::FromStr;

use tracing::debug;

use crate::desktop::Desktop;
use crate::overview::{Direction, Manager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show every view (or only the cursor's), or hide them all if one is open.
    Toggle { all: bool },
    Move(Direction),
    /// Move to the neighboring workspace, taking the hovered or focused window along.
    MoveWindow(Direction),
    Exit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(name) = words.next() else {
            return Err(String::from("empty command"));
        };
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(format!("unexpected argument: {extra}"));
        }

        let direction = || -> Result<Direction, String> {
            arg.ok_or_else(|| format!("{name} needs a direction"))?
                .parse()
        };

        match name {
            "toggle" => match arg {
                None | Some("all") => Ok(Command::Toggle { all: true }),
                Some("cursor") => Ok(Command::Toggle { all: false }),
                Some(arg) => Err(format!("invalid toggle target: {arg}")),
            },
            "move" => Ok(Command::Move(direction()?)),
            "movewindow" => Ok(Command::MoveWindow(direction()?)),
            "exit" => match arg {
                None => Ok(Command::Exit),
                Some(arg) => Err(format!("unexpected argument: {arg}")),
            },
            _ => Err(format!("unknown command: {name}")),
        }
    }
}

/// Outcome reported back to whoever issued the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub success: bool,
    pub error: Option<String>,
}

impl DispatchResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

impl Command {
    pub fn run<D: Desktop + ?Sized>(self, manager: &mut Manager, desktop: &mut D) {
        let _span = tracy_client::span!("Command::run");

        match self {
            Command::Toggle { all } => manager.toggle(all, desktop),
            Command::Move(direction) => {
                manager.move_to(direction, false, desktop);
            }
            Command::MoveWindow(direction) => {
                manager.move_to(direction, true, desktop);
            }
            Command::Exit => manager.hide_all(false, desktop),
        }
    }
}

/// Parses and runs a command.
///
/// Commands that have nothing to act on still succeed; only malformed ones fail.
pub fn dispatch<D: Desktop + ?Sized>(
    manager: &mut Manager,
    command: &str,
    desktop: &mut D,
) -> DispatchResult {
    match command.parse::<Command>() {
        Ok(command) => {
            debug!("running {command:?}");
            command.run(manager, desktop);
            DispatchResult::ok()
        }
        Err(err) => {
            debug!("rejecting command {command:?}: {err}");
            DispatchResult::err(err)
        }
    }
}
