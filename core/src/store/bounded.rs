use alloc::vec::Vec;
use core::ops::Range;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::*;

/// Half-open rectangle `[x_min, x_max) × [y_min, y_max)` of stored coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub x_min: Coord,
    pub x_max: Coord,
    pub y_min: Coord,
    pub y_max: Coord,
}

impl Extent {
    pub const DEFAULT_HALF_WIDTH: Coord = 128;

    pub fn new(x: Range<Coord>, y: Range<Coord>) -> Result<Self> {
        if x.is_empty() || y.is_empty() {
            return Err(GameError::InvalidExtent);
        }
        Ok(Self {
            x_min: x.start,
            x_max: x.end,
            y_min: y.start,
            y_max: y.end,
        })
    }

    /// Square `[-half_width, half_width)` on both axes. `half_width` must be positive.
    pub fn square(half_width: Coord) -> Result<Self> {
        if half_width <= 0 {
            return Err(GameError::InvalidExtent);
        }
        Self::new(-half_width..half_width, -half_width..half_width)
    }

    pub const fn contains(&self, (x, y): Coord2) -> bool {
        self.x_min <= x && x < self.x_max && self.y_min <= y && y < self.y_max
    }

    pub const fn width(&self) -> u64 {
        self.x_max.abs_diff(self.x_min)
    }

    pub const fn height(&self) -> u64 {
        self.y_max.abs_diff(self.y_min)
    }

    /// Table dimensions `(width, height)`, failing when they cannot be addressed in memory.
    pub fn dims(&self) -> Result<(usize, usize)> {
        let width = usize::try_from(self.width()).map_err(|_| GameError::ExtentTooLarge)?;
        let height = usize::try_from(self.height()).map_err(|_| GameError::ExtentTooLarge)?;
        match width.checked_mul(height) {
            Some(_) => Ok((width, height)),
            None => Err(GameError::ExtentTooLarge),
        }
    }

    fn to_nd_index(self, coords: Coord2) -> Option<[usize; 2]> {
        if !self.contains(coords) {
            return None;
        }
        let (x, y) = coords;
        // contained offsets are below width/height, which `dims` proved fit in usize
        Some([
            x.abs_diff(self.x_min) as usize,
            y.abs_diff(self.y_min) as usize,
        ])
    }
}

impl Default for Extent {
    fn default() -> Self {
        let half = Self::DEFAULT_HALF_WIDTH;
        Self {
            x_min: -half,
            x_max: half,
            y_min: -half,
            y_max: half,
        }
    }
}

/// Dense table over a fixed [`Extent`]. Everything outside reads as an untouched cell and
/// ignores writes.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedStore {
    extent: Extent,
    cells: Array2<Cell>,
}

impl BoundedStore {
    pub fn new(extent: Extent) -> Result<Self> {
        let (width, height) = extent.dims()?;
        let len = width * height;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GameError::AllocationFailed { cells: len })?;
        cells.resize(len, Cell::empty());

        let cells = Array2::from_shape_vec((width, height), cells)
            .map_err(|_| GameError::ExtentTooLarge)?;
        log::debug!("Allocated bounded store {width}x{height} for {extent:?}");

        Ok(Self { extent, cells })
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }
}

impl CellStore for BoundedStore {
    fn get(&self, coords: Coord2) -> Cell {
        self.extent
            .to_nd_index(coords)
            .map(|index| self.cells[index])
            .unwrap_or_default()
    }

    fn put(&mut self, coords: Coord2, cell: Cell) {
        if let Some(index) = self.extent.to_nd_index(coords) {
            self.cells[index] = cell;
        }
    }

    fn contains(&self, coords: Coord2) -> bool {
        self.extent.contains(coords)
    }
}
