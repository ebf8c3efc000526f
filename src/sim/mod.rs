//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (row-major cells, ghosts by id, edges by key)
//! - No rendering or platform dependencies

pub mod actions;
pub mod grid;
pub mod maze;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use actions::{ActionOutcome, ActionRejected, Command};
pub use grid::{Cell, Direction, Edge, EdgeKey, HexGrid, Neighbor};
pub use maze::{MazeParams, MazeStats, generate};
pub use rng::MazeRng;
pub use snapshot::{EdgeView, GhostView, RoundStatus, Snapshot};
pub use state::{GamePhase, GameState, Ghost, LossCause, Player, RoundOutcome};
pub use tick::tick;
