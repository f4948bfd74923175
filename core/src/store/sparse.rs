use hashbrown::HashMap;

use super::*;

/// Unbounded store keyed by coordinate. Only cells that differ from the default are kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparseStore {
    cells: HashMap<Coord2, Cell>,
}

impl SparseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells holding non-default state.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl CellStore for SparseStore {
    fn get(&self, coords: Coord2) -> Cell {
        self.cells.get(&coords).copied().unwrap_or_default()
    }

    fn put(&mut self, coords: Coord2, cell: Cell) {
        if cell.is_default() {
            self.cells.remove(&coords);
        } else {
            self.cells.insert(coords, cell);
        }
    }

    fn contains(&self, _coords: Coord2) -> bool {
        true
    }
}
