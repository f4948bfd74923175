use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Stored state of a single cell. The empty set is a never-touched cell.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Cell: u8 {
        const MINE = 1 << 0;
        const UNCOVERED = 1 << 1;
        const FLAGGED = 1 << 2;
    }
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.contains(Self::MINE)
    }

    pub const fn is_uncovered(self) -> bool {
        self.contains(Self::UNCOVERED)
    }

    pub const fn is_flagged(self) -> bool {
        self.contains(Self::FLAGGED)
    }

    /// An uncovered mine.
    pub const fn is_detonated(self) -> bool {
        self.contains(Self::MINE.union(Self::UNCOVERED))
    }

    pub const fn is_default(self) -> bool {
        self.is_empty()
    }
}
