//! Hex Haunt - a hex-grid maze chase
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hex grid, maze generation, round state machine)
//! - `config`: Validated game configuration
//! - `session`: Frame-driven host loop around a single game state

pub mod config;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use session::Session;

/// Game configuration constants
pub mod consts {
    /// Maze dimensions (axial q × r)
    pub const GRID_WIDTH: i32 = 13;
    pub const GRID_HEIGHT: i32 = 11;

    /// Fixed maze seed - every round plays the same layout
    pub const MAZE_SEED: u32 = 0x00C0_FFEE;
    /// Chance to open an extra passage where the spanning tree left a wall
    pub const BRAID_CHANCE: f64 = 0.15;
    /// Share of open passages that become doors
    pub const DOOR_FRACTION: f64 = 0.18;

    /// Ghosts per round
    pub const GHOST_COUNT: usize = 3;
    /// Ghost move cooldown range in ms [min, max)
    pub const GHOST_MOVE_MIN_MS: f32 = 220.0;
    pub const GHOST_MOVE_MAX_MS: f32 = 400.0;
    /// Ghosts never spawn closer than this (Manhattan, axial) to the player
    pub const GHOST_MIN_SPAWN_DISTANCE: i32 = 4;
    /// Rejection-sampling budget per ghost before accepting the last sample
    pub const GHOST_SPAWN_MAX_ATTEMPTS: u32 = 200;

    /// Round length in ms
    pub const ROUND_DURATION_MS: f32 = 60_000.0;
    /// Lights-out grace after the countdown hits zero, in ms
    pub const TIMEOUT_GRACE_MS: f32 = 1_200.0;

    /// Largest frame delta the host loop hands to the simulation
    pub const MAX_FRAME_DT_MS: f32 = 100.0;
    /// Frame delta assumed for the very first frame
    pub const FIRST_FRAME_DT_MS: f32 = 1000.0 / 60.0;
}

/// Manhattan distance between two axial coordinates
#[inline]
pub fn axial_manhattan(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// Hex (cube) distance between two axial coordinates
#[inline]
pub fn axial_hex_distance(a: (i32, i32), b: (i32, i32)) -> i32 {
    let dq = a.0 - b.0;
    let dr = a.1 - b.1;
    (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
}
