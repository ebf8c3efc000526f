//! Host-facing session
//!
//! Owns the single game state, turns frame timestamps into clamped deltas
//! and routes commands. The wasm entry point and the native demo both drive
//! the game through this type.

use crate::config::{ConfigError, GameConfig};
use crate::consts::*;
use crate::sim::{ActionOutcome, ActionRejected, Command, Direction, GameState, Snapshot, tick};

/// Game session driven by a frame clock
pub struct Session {
    pub state: GameState,
    last_time_ms: Option<f64>,
}

impl Session {
    pub fn new(seed: u32) -> Self {
        Self {
            state: GameState::new(seed),
            last_time_ms: None,
        }
    }

    pub fn with_config(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::with_config(config, seed)?,
            last_time_ms: None,
        })
    }

    /// Advance to host time `now_ms` (e.g. a `requestAnimationFrame` timestamp).
    /// Returns the delta handed to the simulation.
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time_ms {
            Some(last) => (now_ms - last).max(0.0) as f32,
            None => FIRST_FRAME_DT_MS,
        };
        self.last_time_ms = Some(now_ms);
        self.advance(dt)
    }

    /// Tick by `dt_ms`, clamped so a stalled host cannot skip ghost moves
    /// or jump past the grace window in one step
    pub fn advance(&mut self, dt_ms: f32) -> f32 {
        let dt = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_FRAME_DT_MS)
        } else {
            0.0
        };
        tick(&mut self.state, dt);
        dt
    }

    /// Forget the last frame time (e.g. after the tab was hidden)
    pub fn reset_clock(&mut self) {
        self.last_time_ms = None;
    }

    pub fn command(&mut self, command: Command) -> Result<ActionOutcome, ActionRejected> {
        let result = self.state.apply(command);
        match &result {
            Ok(ActionOutcome::Restarted) => self.reset_clock(),
            Ok(_) => {}
            Err(reason) => log::debug!("{:?} rejected: {}", command, reason),
        }
        result
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}

/// Keyboard mapping used by the web host
///
/// ```text
///   w e        N  NE
///  a   d     W      E
///   z s        SW S
/// ```
/// Digits 0-5 select a direction by index, space or `f` opens a door, `r` restarts.
pub fn command_for_key(key: &str) -> Option<Command> {
    let dir = match key {
        "d" | "D" | "ArrowRight" => Direction::East,
        "e" | "E" => Direction::NorthEast,
        "w" | "W" | "ArrowUp" => Direction::North,
        "a" | "A" | "ArrowLeft" => Direction::West,
        "z" | "Z" => Direction::SouthWest,
        "s" | "S" | "ArrowDown" => Direction::South,
        " " | "f" | "F" => return Some(Command::OpenDoor),
        "r" | "R" => return Some(Command::Restart),
        _ => {
            let index = key.parse::<usize>().ok()?;
            return Direction::from_index(index).map(Command::Move);
        }
    };
    Some(Command::Move(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, LossCause, RoundOutcome};

    #[test]
    fn test_first_frame_uses_default_dt() {
        let mut session = Session::new(1);
        assert_eq!(session.frame(5_000.0), FIRST_FRAME_DT_MS);
        assert_eq!(session.frame(5_010.0), 10.0);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut session = Session::new(1);
        session.frame(0.0);
        let before = session.state.countdown_ms;
        let dt = session.frame(30_000.0);
        assert_eq!(dt, MAX_FRAME_DT_MS);
        assert_eq!(session.state.countdown_ms, before - MAX_FRAME_DT_MS);
    }

    #[test]
    fn test_non_finite_dt_is_ignored() {
        let mut session = Session::new(1);
        let countdown = session.state.countdown_ms;
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(session.advance(bad), 0.0);
        }
        assert_eq!(session.state.countdown_ms, countdown);
        assert_eq!(session.state.elapsed_ms, 0.0);
        assert!(session.state.is_running());
    }

    #[test]
    fn test_backwards_clock_is_zero_dt() {
        let mut session = Session::new(1);
        session.frame(1_000.0);
        assert_eq!(session.frame(900.0), 0.0);
    }

    #[test]
    fn test_clamped_frames_still_time_out() {
        let mut session = Session::new(2);
        session.state.ghosts.clear();
        // 60 s of countdown plus the grace window, in 100 ms frames
        let frames = ((ROUND_DURATION_MS + TIMEOUT_GRACE_MS) / MAX_FRAME_DT_MS) as usize + 2;
        for _ in 0..frames {
            session.advance(1_000.0);
        }
        assert_eq!(
            session.state.phase,
            GamePhase::Ended(RoundOutcome::Lost(LossCause::TimedOut))
        );
    }

    #[test]
    fn test_restart_command_resets_clock() {
        let mut session = Session::new(3);
        session.frame(100.0);
        session.state.end_round(RoundOutcome::Won);
        assert_eq!(session.command(Command::Restart), Ok(ActionOutcome::Restarted));
        assert!(session.state.is_running());
        assert_eq!(session.frame(50_000.0), FIRST_FRAME_DT_MS);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(command_for_key("d"), Some(Command::Move(Direction::East)));
        assert_eq!(command_for_key("ArrowUp"), Some(Command::Move(Direction::North)));
        assert_eq!(command_for_key("z"), Some(Command::Move(Direction::SouthWest)));
        assert_eq!(command_for_key("4"), Some(Command::Move(Direction::SouthWest)));
        assert_eq!(command_for_key("6"), None);
        assert_eq!(command_for_key(" "), Some(Command::OpenDoor));
        assert_eq!(command_for_key("R"), Some(Command::Restart));
        assert_eq!(command_for_key("Escape"), None);
    }
}
