//! Game state and core simulation types
//!
//! One `GameState` owns everything a round touches: the maze, the entities,
//! the countdown and the gameplay RNG. Nothing lives in globals.

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, HexGrid};
use super::maze::{self, MazeStats};
use super::rng::MazeRng;
use crate::config::{ConfigError, GameConfig};

/// Status line shown when a round starts
pub const MSG_START: &str = "Reach home before the lights go out.";
pub const MSG_DOOR_OPENED: &str = "Door opened.";
pub const MSG_NO_DOOR: &str = "No door found.";
pub const MSG_CAUGHT: &str = "Caught by a ghost!";
pub const MSG_TIMED_OUT: &str = "Time's up. The lights went out.";
pub const MSG_WON: &str = "You made it home!";

/// Why a round was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    Caught,
    TimedOut,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Won,
    Lost(LossCause),
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Clock running, entities moving
    Running,
    /// Terminal until restart
    Ended(RoundOutcome),
}

/// The player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Cell,
    /// Direction of the most recent successful move
    pub last_dir: Option<Direction>,
}

/// A wandering ghost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ghost {
    pub id: u32,
    pub pos: Cell,
    /// Time until the next move attempt
    pub cooldown_ms: f32,
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Maze for the current round
    pub grid: HexGrid,
    pub maze_stats: MazeStats,
    /// Gameplay RNG (ghost placement and movement), separate from the maze seed
    pub rng: MazeRng,
    pub player: Player,
    pub home: Cell,
    /// Ghosts, in id order
    pub ghosts: Vec<Ghost>,
    pub phase: GamePhase,
    /// Time left on the clock
    pub countdown_ms: f32,
    /// Time spent in the dark after the countdown ran out
    pub darken_ms: f32,
    /// Round time elapsed
    pub elapsed_ms: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Rounds started since creation (1-based)
    pub round: u32,
    pub status: String,
}

impl GameState {
    /// Create a game with the default configuration.
    /// `seed` drives ghost placement and movement only; the maze uses the fixed maze seed.
    pub fn new(seed: u32) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    /// Create a game from a custom configuration
    pub fn with_config(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u32) -> Self {
        let mut state = Self {
            grid: HexGrid::new(config.width, config.height),
            maze_stats: MazeStats::default(),
            rng: MazeRng::new(seed),
            player: Player {
                pos: maze::start_cell(config.height),
                last_dir: None,
            },
            home: maze::home_cell(config.width, config.height),
            ghosts: Vec::new(),
            phase: GamePhase::Running,
            countdown_ms: config.round_duration_ms,
            darken_ms: 0.0,
            elapsed_ms: 0.0,
            time_ticks: 0,
            round: 0,
            status: String::new(),
            config,
        };
        state.restart();
        state
    }

    /// Reinitialise the round: same maze seed (so the same layout, doors closed
    /// again), player at start, home opposite, fresh ghosts, full clock.
    pub fn restart(&mut self) {
        let (grid, stats) = maze::generate(
            self.config.width,
            self.config.height,
            self.config.maze_seed,
            self.config.maze_params(),
        );
        self.grid = grid;
        self.maze_stats = stats;

        self.player = Player {
            pos: maze::start_cell(self.config.height),
            last_dir: None,
        };
        self.home = maze::home_cell(self.config.width, self.config.height);
        self.phase = GamePhase::Running;
        self.countdown_ms = self.config.round_duration_ms;
        self.darken_ms = 0.0;
        self.elapsed_ms = 0.0;
        self.time_ticks = 0;
        self.round += 1;
        self.status = MSG_START.to_string();

        self.spawn_ghosts();

        log::info!(
            "Round {} started: player {:?}, home {:?}, {} ghosts",
            self.round,
            self.player.pos.as_tuple(),
            self.home.as_tuple(),
            self.ghosts.len()
        );
    }

    /// Place ghosts by rejection sampling: retry while too close to the
    /// player or on the home cell, up to the configured attempt budget, then
    /// accept the last sample.
    fn spawn_ghosts(&mut self) {
        self.ghosts.clear();
        for id in (0u32..).take(self.config.ghost_count) {
            let pos = self.sample_ghost_position();
            let cooldown_ms = self
                .rng
                .range_f32(self.config.ghost_move_min_ms, self.config.ghost_move_max_ms);
            self.ghosts.push(Ghost {
                id,
                pos,
                cooldown_ms,
            });
        }
    }

    fn sample_ghost_position(&mut self) -> Cell {
        let attempts = self.config.ghost_spawn_max_attempts.max(1);
        let mut pos = self.random_cell();
        for _ in 1..attempts {
            if self.is_valid_ghost_spawn(pos) {
                return pos;
            }
            pos = self.random_cell();
        }
        if !self.is_valid_ghost_spawn(pos) {
            log::warn!(
                "Ghost spawn budget of {} exhausted, accepting {:?}",
                attempts,
                pos.as_tuple()
            );
        }
        pos
    }

    pub fn is_valid_ghost_spawn(&self, pos: Cell) -> bool {
        pos != self.home && pos.manhattan(self.player.pos) >= self.config.ghost_min_spawn_distance
    }

    fn random_cell(&mut self) -> Cell {
        let q = self.rng.index(self.config.width as usize) as i32;
        let r = self.rng.index(self.config.height as usize) as i32;
        Cell::new(q, r)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// End the round (no-op if already ended)
    pub fn end_round(&mut self, outcome: RoundOutcome) {
        if !self.is_running() {
            return;
        }
        self.phase = GamePhase::Ended(outcome);
        self.status = match outcome {
            RoundOutcome::Won => MSG_WON,
            RoundOutcome::Lost(LossCause::Caught) => MSG_CAUGHT,
            RoundOutcome::Lost(LossCause::TimedOut) => MSG_TIMED_OUT,
        }
        .to_string();
        log::info!(
            "Round {} ended: {:?} after {:.1}s",
            self.round,
            outcome,
            self.elapsed_ms / 1000.0
        );
    }

    pub fn ghost_on(&self, cell: Cell) -> bool {
        self.ghosts.iter().any(|g| g.pos == cell)
    }

    /// Caught beats home: a ghost on the player's cell ends the round first
    pub fn check_collisions(&mut self) {
        if !self.is_running() {
            return;
        }
        if self.ghost_on(self.player.pos) {
            self.end_round(RoundOutcome::Lost(LossCause::Caught));
        } else if self.player.pos == self.home {
            self.end_round(RoundOutcome::Won);
        }
    }
}
