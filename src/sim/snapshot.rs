//! Read-only view of a round for the renderer
//!
//! Owned data copied out of the game state, so the renderer never holds a
//! reference into state that the next tick will mutate.

use serde::{Deserialize, Serialize};

use super::grid::Cell;
use super::state::{GamePhase, GameState, LossCause, RoundOutcome};

/// Flat round status for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Running,
    Won,
    Lost,
}

/// One edge as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeView {
    pub a: Cell,
    pub b: Cell,
    pub open: bool,
    pub is_door: bool,
    pub door_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostView {
    pub id: u32,
    pub pos: Cell,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    /// Edge records in canonical key order
    pub edges: Vec<EdgeView>,
    pub player: Cell,
    pub home: Cell,
    pub ghosts: Vec<GhostView>,
    pub countdown_ms: f32,
    pub darken_ms: f32,
    /// `darken_ms` as a share of the grace window, 0..=1
    pub darkness: f32,
    pub status: RoundStatus,
    pub loss_cause: Option<LossCause>,
    pub message: String,
    pub round: u32,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let edges = state
            .grid
            .edges()
            .into_iter()
            .map(|(key, edge)| {
                let (a, b) = key.cells();
                EdgeView {
                    a,
                    b,
                    open: edge.open,
                    is_door: edge.is_door,
                    door_open: edge.door_open,
                }
            })
            .collect();

        let (status, loss_cause) = match state.phase {
            GamePhase::Running => (RoundStatus::Running, None),
            GamePhase::Ended(RoundOutcome::Won) => (RoundStatus::Won, None),
            GamePhase::Ended(RoundOutcome::Lost(cause)) => (RoundStatus::Lost, Some(cause)),
        };

        Self {
            width: state.grid.width,
            height: state.grid.height,
            edges,
            player: state.player.pos,
            home: state.home,
            ghosts: state
                .ghosts
                .iter()
                .map(|g| GhostView { id: g.id, pos: g.pos })
                .collect(),
            countdown_ms: state.countdown_ms,
            darken_ms: state.darken_ms,
            darkness: (state.darken_ms / state.config.timeout_grace_ms).clamp(0.0, 1.0),
            status,
            loss_cause,
            message: state.status.clone(),
            round: state.round,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;

    #[test]
    fn test_capture_mirrors_state() {
        let state = GameState::new(4);
        let snap = Snapshot::capture(&state);
        assert_eq!((snap.width, snap.height), (13, 11));
        assert_eq!(snap.edges.len(), state.grid.edges().len());
        assert_eq!(snap.player, state.player.pos);
        assert_eq!(snap.home, state.home);
        assert_eq!(snap.ghosts.len(), state.ghosts.len());
        assert_eq!(snap.status, RoundStatus::Running);
        assert_eq!(snap.darkness, 0.0);
        let doors = snap.edges.iter().filter(|e| e.is_door).count();
        assert_eq!(doors, state.maze_stats.doors);
    }

    #[test]
    fn test_capture_is_detached() {
        let mut state = GameState::new(4);
        let snap = Snapshot::capture(&state);
        state.ghosts.clear();
        tick(&mut state, 500.0);
        assert_eq!(snap.ghosts.len(), 3);
        assert_eq!(snap.countdown_ms, 60_000.0);
    }

    #[test]
    fn test_capture_loss() {
        let mut state = GameState::new(4);
        state.ghosts.clear();
        state.countdown_ms = 0.0;
        tick(&mut state, 2_000.0);
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.status, RoundStatus::Lost);
        assert_eq!(snap.loss_cause, Some(LossCause::TimedOut));
        assert_eq!(snap.darkness, 1.0);
    }

    #[test]
    fn test_json_shape() {
        let snap = Snapshot::capture(&GameState::new(4));
        let json = snap.to_json().expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["status"], "running");
        assert_eq!(value["width"], 13);
        assert_eq!(value["player"]["q"], 0);
        assert_eq!(value["player"]["r"], 5);
        assert!(value["edges"][0].get("door_open").is_some());

        let back: Snapshot = serde_json::from_str(&json).expect("round trip");
        assert_eq!(back, snap);
    }
}
