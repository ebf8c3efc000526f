//! Maze generation over a hex grid
//!
//! Three phases share one RNG stream, always in this order:
//! 1. Carve a spanning tree with a randomized depth-first backtracker
//! 2. Braid: open some walls the tree left behind to create loops
//! 3. Turn a fixed share of the open passages into closed doors
//!
//! The result is a pure function of grid size, seed and [`MazeParams`].

use std::collections::HashSet;

use super::grid::{Cell, EdgeKey, HexGrid};
use super::rng::MazeRng;
use crate::consts::*;

/// Generation tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeParams {
    /// Probability of opening a wall that has no edge record
    pub braid_chance: f64,
    /// Share of open passages turned into doors
    pub door_fraction: f64,
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            braid_chance: BRAID_CHANCE,
            door_fraction: DOOR_FRACTION,
        }
    }
}

/// What each phase produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MazeStats {
    pub cells: usize,
    pub tree_edges: usize,
    pub braided_edges: usize,
    pub door_candidates: usize,
    pub doors: usize,
}

/// Cell the carve starts from: leftmost column, vertical centre
pub fn start_cell(height: i32) -> Cell {
    Cell::new(0, height / 2)
}

/// Home cell: rightmost column, vertical centre
pub fn home_cell(width: i32, height: i32) -> Cell {
    Cell::new(width - 1, height / 2)
}

/// Generate a complete maze
pub fn generate(width: i32, height: i32, seed: u32, params: MazeParams) -> (HexGrid, MazeStats) {
    let mut grid = HexGrid::new(width, height);
    let mut rng = MazeRng::new(seed);

    let tree_edges = carve(&mut grid, &mut rng, start_cell(height));
    let braided_edges = braid(&mut grid, &mut rng, params.braid_chance);
    let (door_candidates, doors) = place_doors(&mut grid, &mut rng, params.door_fraction);

    let stats = MazeStats {
        cells: grid.cell_count(),
        tree_edges,
        braided_edges,
        door_candidates,
        doors,
    };
    log::info!(
        "Maze {}x{} seed {:#x}: {} tree edges, {} braided, {} doors of {} passages",
        width,
        height,
        seed,
        stats.tree_edges,
        stats.braided_edges,
        stats.doors,
        stats.door_candidates
    );
    (grid, stats)
}

/// Randomized depth-first backtracker. Returns the number of passages carved.
pub fn carve(grid: &mut HexGrid, rng: &mut MazeRng, start: Cell) -> usize {
    if !grid.contains(start) {
        return 0;
    }

    let mut visited: HashSet<Cell> = HashSet::with_capacity(grid.cell_count());
    let mut stack = vec![start];
    visited.insert(start);
    let mut carved = 0;

    while let Some(&current) = stack.last() {
        let mut candidates: Vec<Cell> = grid
            .neighbors(current)
            .into_iter()
            .map(|n| n.cell)
            .filter(|c| !visited.contains(c))
            .collect();

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        rng.shuffle(&mut candidates);
        let next = candidates[0];
        grid.set_edge_open(current, next, true);
        visited.insert(next);
        stack.push(next);
        carved += 1;
    }

    carved
}

/// Open extra passages where no edge record exists.
///
/// One draw per (cell, neighbour) pair without a record, row-major scan.
/// A pair whose first draw fails is drawn again from its other endpoint.
pub fn braid(grid: &mut HexGrid, rng: &mut MazeRng, chance: f64) -> usize {
    let cells: Vec<Cell> = grid.cells().collect();
    let mut opened = 0;

    for cell in cells {
        for n in grid.neighbors(cell) {
            if grid.has_edge(cell, n.cell) {
                continue;
            }
            if rng.next_f64() < chance {
                grid.set_edge_open(cell, n.cell, true);
                opened += 1;
            }
        }
    }

    opened
}

/// Every open passage exactly once, in row-major scan order of its first endpoint
pub fn door_candidates(grid: &HexGrid) -> Vec<(Cell, Cell)> {
    let mut out = Vec::new();
    for cell in grid.cells() {
        for n in grid.neighbors(cell) {
            // Record from the endpoint that sorts first so each edge appears once
            if !EdgeKey::new(cell, n.cell).starts_at(cell) {
                continue;
            }
            if grid.edge(cell, n.cell).is_some_and(|e| e.open) {
                out.push((cell, n.cell));
            }
        }
    }
    out
}

/// Shuffle the open passages and close `floor(len * fraction)` of them behind doors.
/// Returns `(candidates, doors)`.
pub fn place_doors(grid: &mut HexGrid, rng: &mut MazeRng, fraction: f64) -> (usize, usize) {
    let mut candidates = door_candidates(grid);
    rng.shuffle(&mut candidates);

    let count = door_count_for(candidates.len(), fraction);
    for &(a, b) in candidates.iter().take(count) {
        if let Some(edge) = grid.edge_mut(a, b) {
            edge.is_door = true;
            edge.door_open = false;
        }
    }

    (candidates.len(), count)
}

/// `floor(candidates * fraction)`
pub fn door_count_for(candidates: usize, fraction: f64) -> usize {
    (candidates as f64 * fraction).floor() as usize
}
