use crate::*;
pub use bounded::*;
pub use sparse::*;

mod bounded;
mod sparse;

/// Positional storage of cell state. Holds no game rules.
///
/// Reads of coordinates the store does not hold return the default (empty) cell, and writes to
/// coordinates it cannot hold are silently dropped, so callers iterating neighborhoods never have
/// to special-case the edge of the stored region.
pub trait CellStore {
    fn get(&self, coords: Coord2) -> Cell;

    /// Replaces the whole state at `coords`. A no-op where [`CellStore::contains`] is false.
    fn put(&mut self, coords: Coord2, cell: Cell);

    /// Whether writes at `coords` take effect.
    fn contains(&self, coords: Coord2) -> bool;

    fn write(&mut self, coords: Coord2, attribute: Cell, value: bool) {
        let mut cell = self.get(coords);
        cell.set(attribute, value);
        self.put(coords, cell);
    }

    fn set_mine(&mut self, coords: Coord2, value: bool) {
        self.write(coords, Cell::MINE, value);
    }

    fn set_uncovered(&mut self, coords: Coord2, value: bool) {
        self.write(coords, Cell::UNCOVERED, value);
    }

    fn set_flagged(&mut self, coords: Coord2, value: bool) {
        self.write(coords, Cell::FLAGGED, value);
    }
}

/// Storage model picked at runtime, usually from a [`GameConfig`].
#[derive(Clone, Debug, PartialEq)]
pub enum Grid {
    Bounded(BoundedStore),
    Sparse(SparseStore),
}

impl Grid {
    pub fn from_storage(storage: Storage) -> Result<Self> {
        Ok(match storage {
            Storage::Bounded(extent) => Self::Bounded(BoundedStore::new(extent)?),
            Storage::Unbounded => Self::Sparse(SparseStore::new()),
        })
    }

    /// Extent of the stored region, `None` when unbounded.
    pub fn extent(&self) -> Option<Extent> {
        match self {
            Self::Bounded(store) => Some(store.extent()),
            Self::Sparse(_) => None,
        }
    }
}

impl CellStore for Grid {
    fn get(&self, coords: Coord2) -> Cell {
        match self {
            Self::Bounded(store) => store.get(coords),
            Self::Sparse(store) => store.get(coords),
        }
    }

    fn put(&mut self, coords: Coord2, cell: Cell) {
        match self {
            Self::Bounded(store) => store.put(coords, cell),
            Self::Sparse(store) => store.put(coords, cell),
        }
    }

    fn contains(&self, coords: Coord2) -> bool {
        match self {
            Self::Bounded(store) => store.contains(coords),
            Self::Sparse(store) => store.contains(coords),
        }
    }
}

impl From<BoundedStore> for Grid {
    fn from(store: BoundedStore) -> Self {
        Self::Bounded(store)
    }
}

impl From<SparseStore> for Grid {
    fn from(store: SparseStore) -> Self {
        Self::Sparse(store)
    }
}
