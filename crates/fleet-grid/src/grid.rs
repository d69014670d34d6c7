//! Static warehouse map: cell classification and 4-connected adjacency.
//!
//! # Data layout
//!
//! Cell kinds are stored in one row-major `Vec<CellKind>`; the index of
//! `(row, col)` is `row * width + col`.  The grid is constructed once from
//! the layout artifact and never mutated during simulation — dynamic
//! traversability (a shelf lifted off its anchor, a robot's own goal) is
//! layered on top by the planner's [`PlanContext`][crate::PlanContext].

use fleet_core::Cell;

use crate::{GridError, GridResult};

// ── CellKind ──────────────────────────────────────────────────────────────────

/// Static classification of one grid cell.
///
/// The discriminants are the layout artifact's integer type codes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CellKind {
    Free = 0,
    Shelf = 1,
    Station = 2,
    Spawn = 3,
    Obstacle = 4,
}

impl CellKind {
    /// Decode a layout type code.  Returns `None` for codes outside 0..=4.
    pub fn from_code(code: u8) -> Option<CellKind> {
        match code {
            0 => Some(CellKind::Free),
            1 => Some(CellKind::Shelf),
            2 => Some(CellKind::Station),
            3 => Some(CellKind::Spawn),
            4 => Some(CellKind::Obstacle),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Statically traversable kinds.  Shelf cells become traversable only
    /// through the planner's dynamic overlay.
    #[inline]
    pub fn is_traversable(self) -> bool {
        matches!(self, CellKind::Free | CellKind::Station | CellKind::Spawn)
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Immutable rectangular map of cell kinds.
///
/// Do not mutate after construction; the simulator shares it freely.
#[derive(Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    kinds: Vec<CellKind>,
}

impl Grid {
    /// Build a grid from row-major type codes.
    ///
    /// `codes.len()` must equal `width * height`; every code must be a
    /// valid [`CellKind`].
    pub fn from_codes(width: u32, height: u32, codes: &[u8]) -> GridResult<Grid> {
        let expected = width as usize * height as usize;
        if codes.len() != expected {
            return Err(GridError::Dimensions {
                width,
                height,
                expected,
                got: codes.len(),
            });
        }

        let mut kinds = Vec::with_capacity(expected);
        for (i, &code) in codes.iter().enumerate() {
            let cell = Cell::new(i as u32 / width, i as u32 % width);
            match CellKind::from_code(code) {
                Some(kind) => kinds.push(kind),
                None => return Err(GridError::UnknownCode { cell, code }),
            }
        }

        Ok(Grid {
            width,
            height,
            kinds,
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total cell count (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    // ── Cell access ───────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Row-major index of `cell`.  Caller must ensure `in_bounds`.
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        cell.row as usize * self.width as usize + cell.col as usize
    }

    /// Kind of `cell`.  Caller must ensure `in_bounds`.
    #[inline]
    pub fn kind(&self, cell: Cell) -> CellKind {
        self.kinds[self.index(cell)]
    }

    /// Static traversability of `cell` (false for out-of-bounds).
    #[inline]
    pub fn is_traversable(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.kind(cell).is_traversable()
    }

    /// The four edge-adjacent in-bounds neighbors of `cell`, in
    /// deterministic (row, col) order: north, west, east, south.
    pub fn neighbors4(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let Cell { row, col } = cell;
        [
            (row.checked_sub(1), Some(col)),
            (Some(row), col.checked_sub(1)),
            (Some(row), Some(col + 1)),
            (Some(row + 1), Some(col)),
        ]
        .into_iter()
        .filter_map(|(r, c)| Some(Cell::new(r?, c?)))
        .filter(|&c| self.in_bounds(c))
    }

    // ── Reachability ──────────────────────────────────────────────────────

    /// Flood-fill the statically traversable component containing `seeds`.
    ///
    /// Non-traversable seed cells contribute nothing.  Used for init-time
    /// connectivity checks and for classifying unreachable orders at the
    /// end of a run.
    pub fn reachable_from(&self, seeds: &[Cell]) -> CellSet {
        let mut seen = CellSet::with_capacity(self.len());
        let mut frontier: Vec<Cell> = Vec::new();

        for &seed in seeds {
            if self.is_traversable(seed) && seen.insert(self.index(seed)) {
                frontier.push(seed);
            }
        }

        while let Some(cell) = frontier.pop() {
            for next in self.neighbors4(cell) {
                if self.kind(next).is_traversable() && seen.insert(self.index(next)) {
                    frontier.push(next);
                }
            }
        }

        seen
    }
}

// ── CellSet ───────────────────────────────────────────────────────────────────

/// Fixed-capacity bitset over row-major cell indices.
///
/// Backs the A\* closed set and the flood fill above; one bit per grid
/// cell, so a 1000x1000 grid costs 125 KB.
pub struct CellSet {
    bits: Vec<u64>,
}

impl CellSet {
    pub fn with_capacity(cells: usize) -> Self {
        Self {
            bits: vec![0; cells.div_ceil(64)],
        }
    }

    /// Set the bit for `index`; returns `true` if it was newly set.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        let (word, bit) = (index / 64, 1u64 << (index % 64));
        let fresh = self.bits[word] & bit == 0;
        self.bits[word] |= bit;
        fresh
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.bits[index / 64] & (1 << (index % 64)) != 0
    }
}
