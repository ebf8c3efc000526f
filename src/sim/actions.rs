//! Player commands
//!
//! Submitted by the input adapter between ticks. A rejected command leaves
//! the state untouched apart from the status line where noted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::{Cell, Direction};
use super::state::{GameState, MSG_DOOR_OPENED, MSG_NO_DOOR};

/// A command from the input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    OpenDoor,
    Restart,
}

/// What an accepted command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved { to: Cell },
    DoorOpened { from: Cell, to: Cell },
    Restarted,
}

/// Why a command was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("the round has ended")]
    RoundEnded,
    #[error("no passage {}", .0.as_str())]
    Blocked(Direction),
    #[error("no door found")]
    NoDoorFound,
}

impl GameState {
    /// Dispatch a command
    pub fn apply(&mut self, command: Command) -> Result<ActionOutcome, ActionRejected> {
        match command {
            Command::Move(dir) => self.move_player(dir).map(|to| ActionOutcome::Moved { to }),
            Command::OpenDoor => self
                .open_adjacent_door()
                .map(|(from, to)| ActionOutcome::DoorOpened { from, to }),
            Command::Restart => {
                self.restart();
                Ok(ActionOutcome::Restarted)
            }
        }
    }

    /// Step the player one cell if the passage allows it
    pub fn move_player(&mut self, dir: Direction) -> Result<Cell, ActionRejected> {
        if !self.is_running() {
            return Err(ActionRejected::RoundEnded);
        }

        let from = self.player.pos;
        let to = self
            .grid
            .step(from, dir)
            .filter(|&to| self.grid.is_passable(from, to))
            .ok_or(ActionRejected::Blocked(dir))?;

        self.player.pos = to;
        self.player.last_dir = Some(dir);
        self.check_collisions();
        Ok(to)
    }

    /// Open the first closed door next to the player.
    ///
    /// Looks in the last move direction first, then E, NE, N, W, SW, S.
    /// Opens at most one door.
    pub fn open_adjacent_door(&mut self) -> Result<(Cell, Cell), ActionRejected> {
        if !self.is_running() {
            return Err(ActionRejected::RoundEnded);
        }

        let from = self.player.pos;
        let target = door_search_order(self.player.last_dir)
            .into_iter()
            .filter_map(|dir| self.grid.step(from, dir))
            .find(|&to| self.grid.edge(from, to).is_some_and(|e| e.is_closed_door()));

        let Some(to) = target else {
            self.status = MSG_NO_DOOR.to_string();
            return Err(ActionRejected::NoDoorFound);
        };

        if let Some(edge) = self.grid.edge_mut(from, to) {
            edge.door_open = true;
        }
        self.status = MSG_DOOR_OPENED.to_string();
        log::debug!("Door opened {:?} -> {:?}", from.as_tuple(), to.as_tuple());
        Ok((from, to))
    }
}

/// Priority order for door search: `first` (if any), then 0..5 without repeats
fn door_search_order(first: Option<Direction>) -> Vec<Direction> {
    let mut order = Vec::with_capacity(Direction::ALL.len());
    order.extend(first);
    order.extend(Direction::ALL.iter().copied().filter(|&d| Some(d) != first));
    order
}
