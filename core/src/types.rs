/// Single coordinate axis, signed so the field extends in every direction.
pub type Coord = i64;

/// Count type used for uncover/detonation counters.
pub type MoveCount = u64;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait NeighborIterExt {
    fn iter_neighbors(self) -> NeighborIter;
}

impl NeighborIterExt for Coord2 {
    fn iter_neighbors(self) -> NeighborIter {
        NeighborIter::new(self)
    }
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it does not overflow.
fn apply_delta(coords: Coord2, delta: (Coord, Coord)) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    Some((x.checked_add(dx)?, y.checked_add(dy)?))
}

/// Moore neighborhood of a cell: the 8 surrounding coordinates, never the center.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2) -> Self {
        Self { center, index: 0 }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize]);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
