use serde::{Deserialize, Serialize};

/// Classification of a cell derived from its state and its neighborhood.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Uncovered safe cell showing its adjacent mine count. Always `0..=8`, a cell has no more
    /// neighbors than that.
    Number(u8),
    /// Covered, unflagged, safe.
    Plain,
    /// Covered, unflagged mine. Only for introspection, players see [`Tile::Plain`].
    Mine,
    /// Uncovered mine.
    Detonated,
    /// Flag on a mine.
    FlagRight,
    /// Flag on a safe cell.
    FlagWrong,
}

/// Glyphs in ordinal order: numbers `0..=8`, plain, mine, detonated, right flag, wrong flag.
const LEGEND: &[u8; Tile::COUNT] = b" 12345678-*@#X";

impl Tile {
    pub const COUNT: usize = 14;

    /// Position in the classic enumeration: numbers first, then the markers.
    pub const fn ordinal(self) -> usize {
        use Tile::*;
        match self {
            Number(n) => {
                debug_assert!(n <= 8, "mine count above 8");
                n as usize
            }
            Plain => 9,
            Mine => 10,
            Detonated => 11,
            FlagRight => 12,
            FlagWrong => 13,
        }
    }

    pub const fn from_ordinal(ordinal: usize) -> Option<Self> {
        use Tile::*;
        Some(match ordinal {
            0..=8 => Number(ordinal as u8),
            9 => Plain,
            10 => Mine,
            11 => Detonated,
            12 => FlagRight,
            13 => FlagWrong,
            _ => return None,
        })
    }

    pub fn glyph(self) -> char {
        char::from(LEGEND[self.ordinal()])
    }

    /// Whether the cell is still covered.
    pub const fn is_covered(self) -> bool {
        use Tile::*;
        match self {
            Number(_) => false,
            Plain => true,
            Mine => true,
            Detonated => false,
            FlagRight => true,
            FlagWrong => true,
        }
    }

    /// What the player may see during play: hidden mines look plain and every flag looks the same.
    pub const fn masked(self) -> Self {
        match self {
            Self::Mine => Self::Plain,
            Self::FlagWrong => Self::FlagRight,
            other => other,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Plain
    }
}
