//! Axial hex grid topology and edge storage
//!
//! Cells are addressed by axial `(q, r)` inside a `width × height` rectangle.
//! Edges between neighbouring cells live in a single map keyed by an
//! order-independent integer, so `(a, b)` and `(b, a)` always hit the same
//! record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Largest grid side whose coordinates fit the 8-bit lanes of an [`EdgeKey`]
pub const MAX_GRID_SIDE: i32 = 256;

/// A grid cell in axial coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub q: i32,
    pub r: i32,
}

impl Cell {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Neighbouring coordinate in `dir` (may be out of bounds)
    #[inline]
    pub fn offset(self, dir: Direction) -> Cell {
        let (dq, dr) = dir.delta();
        Cell::new(self.q + dq, self.r + dr)
    }

    #[inline]
    pub fn as_tuple(self) -> (i32, i32) {
        (self.q, self.r)
    }

    /// Manhattan distance in axial space
    pub fn manhattan(self, other: Cell) -> i32 {
        crate::axial_manhattan(self.as_tuple(), other.as_tuple())
    }

    /// True hex distance (minimum number of steps on an open plane)
    pub fn hex_distance(self, other: Cell) -> i32 {
        crate::axial_hex_distance(self.as_tuple(), other.as_tuple())
    }
}

/// The six axial directions, indexed 0..5 in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    NorthEast,
    North,
    West,
    SouthWest,
    South,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Axial (dq, dr) step
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, -1),
            Direction::North => (0, -1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, 1),
            Direction::South => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % 6]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::East => "E",
            Direction::NorthEast => "NE",
            Direction::North => "N",
            Direction::West => "W",
            Direction::SouthWest => "SW",
            Direction::South => "S",
        }
    }
}

/// An in-bounds neighbour and the direction that reaches it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub cell: Cell,
    pub direction: Direction,
}

/// Passage state between two adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Edge {
    /// A passage has been carved (false = wall)
    pub open: bool,
    /// The passage is gated by a door
    pub is_door: bool,
    /// Door state, only meaningful when `is_door`
    pub door_open: bool,
}

impl Edge {
    #[inline]
    pub fn is_passable(&self) -> bool {
        self.open && (!self.is_door || self.door_open)
    }

    /// A door that still needs opening
    #[inline]
    pub fn is_closed_door(&self) -> bool {
        self.open && self.is_door && !self.door_open
    }
}

/// Order-independent key for an edge: both cells packed into one `u32`,
/// lower packed cell in the high half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(u32);

impl EdgeKey {
    pub fn new(a: Cell, b: Cell) -> Self {
        let (pa, pb) = (Self::pack(a), Self::pack(b));
        let (lo, hi) = if pa <= pb { (pa, pb) } else { (pb, pa) };
        Self((lo << 16) | hi)
    }

    #[inline]
    fn pack(cell: Cell) -> u32 {
        ((cell.q as u32 & 0xFF) << 8) | (cell.r as u32 & 0xFF)
    }

    #[inline]
    fn unpack(packed: u32) -> Cell {
        Cell::new(((packed >> 8) & 0xFF) as i32, (packed & 0xFF) as i32)
    }

    /// Both endpoints, canonical order
    pub fn cells(self) -> (Cell, Cell) {
        (Self::unpack(self.0 >> 16), Self::unpack(self.0 & 0xFFFF))
    }

    /// Whether `cell` is the endpoint that sorts first
    pub fn starts_at(self, cell: Cell) -> bool {
        self.0 >> 16 == Self::pack(cell)
    }
}

/// Hex grid with its edge map
#[derive(Debug, Clone, PartialEq)]
pub struct HexGrid {
    pub width: i32,
    pub height: i32,
    edges: HashMap<EdgeKey, Edge>,
}

impl HexGrid {
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(
            (1..=MAX_GRID_SIDE).contains(&width) && (1..=MAX_GRID_SIDE).contains(&height),
            "grid {width}x{height} does not fit the edge key"
        );
        Self {
            width,
            height,
            edges: HashMap::new(),
        }
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.q) && (0..self.height).contains(&cell.r)
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// All cells in row-major order (r outer, q inner)
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |r| (0..self.width).map(move |q| Cell::new(q, r)))
    }

    /// In-bounds neighbours in direction order E, NE, N, W, SW, S
    pub fn neighbors(&self, cell: Cell) -> Vec<Neighbor> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| {
                let next = cell.offset(direction);
                self.contains(next).then_some(Neighbor {
                    cell: next,
                    direction,
                })
            })
            .collect()
    }

    /// Neighbour in `dir` if it is on the grid
    pub fn step(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let next = cell.offset(dir);
        (self.contains(cell) && self.contains(next)).then_some(next)
    }

    /// Direction from `a` to `b` when they are in-bounds neighbours
    pub fn direction_between(&self, a: Cell, b: Cell) -> Option<Direction> {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        Direction::ALL.iter().copied().find(|&d| a.offset(d) == b)
    }

    /// Create or update the edge between `a` and `b`.
    ///
    /// Returns `false` (and changes nothing) when the cells are not
    /// in-bounds neighbours.
    pub fn set_edge_open(&mut self, a: Cell, b: Cell, open: bool) -> bool {
        if self.direction_between(a, b).is_none() {
            return false;
        }
        self.edges.entry(EdgeKey::new(a, b)).or_default().open = open;
        true
    }

    /// Key for a pair of in-bounds cells; off-grid coordinates would alias
    /// real cells once masked into the key's 8-bit lanes
    fn key(&self, a: Cell, b: Cell) -> Option<EdgeKey> {
        (self.contains(a) && self.contains(b)).then(|| EdgeKey::new(a, b))
    }

    pub fn edge(&self, a: Cell, b: Cell) -> Option<&Edge> {
        self.key(a, b).and_then(|key| self.edges.get(&key))
    }

    pub fn edge_mut(&mut self, a: Cell, b: Cell) -> Option<&mut Edge> {
        let key = self.key(a, b)?;
        self.edges.get_mut(&key)
    }

    /// Whether any record (open or closed) exists for the pair
    pub fn has_edge(&self, a: Cell, b: Cell) -> bool {
        self.key(a, b).is_some_and(|key| self.edges.contains_key(&key))
    }

    /// Missing edges count as walls
    pub fn is_passable(&self, a: Cell, b: Cell) -> bool {
        self.edge(a, b).is_some_and(Edge::is_passable)
    }

    /// All edge records in canonical key order
    pub fn edges(&self) -> Vec<(EdgeKey, Edge)> {
        let mut out: Vec<_> = self.edges.iter().map(|(k, e)| (*k, *e)).collect();
        out.sort_unstable_by_key(|(k, _)| *k);
        out
    }

    pub fn open_edge_count(&self) -> usize {
        self.edges.values().filter(|e| e.open).count()
    }

    pub fn door_count(&self) -> usize {
        self.edges.values().filter(|e| e.is_door).count()
    }
}
