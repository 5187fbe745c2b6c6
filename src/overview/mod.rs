//! Per-monitor overview views and the manager that routes input to them.
//!
//! Every monitor gets one [`View`]. A view owns the monitor's layout and runs the
//! closed → opening → open → closing cycle, plus the navigating animation used to switch
//! workspaces without opening the overview. The [`Manager`] keeps the views in sync with the
//! host's monitors, owns the drag session and dispatches pointer, axis and gesture events.

use std::fmt;
use std::str::FromStr;

mod drag;
mod gesture;
mod manager;
mod render;
mod view;


pub use drag::DragSession;
pub use manager::Manager;
pub use render::ActiveWorkspaceGuard;
pub use view::{ExitTarget, View, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Slot offset in `(columns, rows)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(format!("invalid direction: {s}")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}
