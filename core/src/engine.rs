use alloc::collections::VecDeque;
use core::num::Saturating;
use hashbrown::HashSet;

use crate::*;

/// An endless game of minesweeper. Mines are placed lazily as cells get uncovered, never next to
/// a cell that is already uncovered, so revealed numbers stay true for the rest of the game.
#[derive(Clone, Debug)]
pub struct Game<S, R> {
    store: S,
    density: Density,
    rng: R,
    uncovered_count: Saturating<MoveCount>,
    detonated_count: Saturating<MoveCount>,
}

impl<R: UniformSource> Game<BoundedStore, R> {
    /// Game over the default 256×256 extent around the origin.
    pub fn bounded(density: Density, rng: R) -> Result<Self> {
        Ok(Self::new(
            density,
            BoundedStore::new(Extent::default())?,
            rng,
        ))
    }
}

impl<R: UniformSource> Game<SparseStore, R> {
    pub fn unbounded(density: Density, rng: R) -> Self {
        Self::new(density, SparseStore::new(), rng)
    }
}

impl<R: UniformSource> Game<Grid, R> {
    pub fn from_config(config: &GameConfig, rng: R) -> Result<Self> {
        Ok(Self::new(
            config.density,
            Grid::from_storage(config.storage)?,
            rng,
        ))
    }
}

impl<S: CellStore, R: UniformSource> Game<S, R> {
    pub fn new(density: Density, store: S, rng: R) -> Self {
        log::debug!("New game with density {}", density.get());
        Self {
            store,
            density,
            rng,
            uncovered_count: Saturating(0),
            detonated_count: Saturating(0),
        }
    }

    pub fn density(&self) -> Density {
        self.density
    }

    /// Successful uncover moves so far, including the ones made by chords.
    pub fn uncovered_count(&self) -> MoveCount {
        self.uncovered_count.0
    }

    pub fn detonated_count(&self) -> MoveCount {
        self.detonated_count.0
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.store.get(coords)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Uncovers a covered, unflagged cell. Returns whether the move was legal.
    ///
    /// The first uncover of the game is always safe. Mine generation for the cell and its covered
    /// neighbors runs before the cell is marked uncovered.
    pub fn uncover(&mut self, coords: Coord2) -> bool {
        let cell = self.store.get(coords);
        if cell.is_uncovered() || cell.is_flagged() {
            return false;
        }

        if self.uncovered_count.0 > 0 {
            self.generate_mine_at(coords);
        }
        self.for_each_adjacent(coords, Some(not_uncovered), Self::generate_mine_at);

        self.store.set_uncovered(coords, true);
        self.uncovered_count += 1;
        if self.store.get(coords).is_mine() {
            self.detonated_count += 1;
            log::debug!("Detonated mine at {:?}", coords);
        } else {
            log::debug!("Uncovered {:?}", coords);
        }

        true
    }

    /// Toggles the flag on a covered cell. Returns whether the move was legal.
    pub fn flag(&mut self, coords: Coord2) -> bool {
        let cell = self.store.get(coords);
        if cell.is_uncovered() {
            return false;
        }

        self.store.set_flagged(coords, !cell.is_flagged());
        true
    }

    /// Whether [`Game::chord`] would be legal at `coords`: an uncovered safe cell whose adjacent
    /// mines are all either flagged or detonated.
    pub fn is_chordable(&self, coords: Coord2) -> bool {
        let cell = self.store.get(coords);
        cell.is_uncovered()
            && !cell.is_mine()
            && self.count_adjacent(coords, Cell::is_flagged)
                + self.count_adjacent(coords, Cell::is_detonated)
                == self.count_adjacent(coords, Cell::is_mine)
    }

    /// Uncovers every neighbor of a satisfied number. Returns whether the move was legal.
    pub fn chord(&mut self, coords: Coord2) -> bool {
        if !self.is_chordable(coords) {
            return false;
        }

        log::debug!("Chord at {:?}", coords);
        self.for_each_adjacent(coords, None, |game, pos| {
            game.uncover(pos);
        });
        true
    }

    /// Chords at `coords`, then keeps chording every cell the cascade reaches until none of them
    /// is chordable, which floods zero regions. A cell that was not chordable when first reached is
    /// looked at again after later chords next to it, so a mine detonated through a wrong flag
    /// still counts toward the cells around it. At most `limit` chords follow the first one, since
    /// a zero region has no end on unbounded storage.
    ///
    /// Returns whether the first chord was legal.
    pub fn auto_chord(&mut self, coords: Coord2, limit: usize) -> bool {
        if !self.chord(coords) {
            return false;
        }

        let mut performed = 0;
        let mut chorded = HashSet::new();
        chorded.insert(coords);
        let mut to_visit = VecDeque::new();
        self.queue_after_chord(coords, &mut to_visit);

        while let Some(visit_coords) = to_visit.pop_front() {
            if chorded.contains(&visit_coords) || !self.is_chordable(visit_coords) {
                continue;
            }

            if performed >= limit {
                log::warn!(
                    "Chord cascade from {:?} stopped after {} chords",
                    coords,
                    performed
                );
                break;
            }

            log::trace!("Cascading chord to {:?}", visit_coords);
            self.chord(visit_coords);
            chorded.insert(visit_coords);
            performed += 1;
            self.queue_after_chord(visit_coords, &mut to_visit);
        }

        true
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        let cell = self.store.get(coords);

        match (cell.is_mine(), cell.is_uncovered(), cell.is_flagged()) {
            (true, true, _) => Tile::Detonated,
            (true, false, true) => Tile::FlagRight,
            (true, false, false) => Tile::Mine,
            (false, true, _) => Tile::Number(self.count_adjacent(coords, Cell::is_mine)),
            (false, false, true) => Tile::FlagWrong,
            (false, false, false) => Tile::Plain,
        }
    }

    /// Queues every cell whose chord count a chord at `coords` can have changed: the neighbors it
    /// uncovered, plus the neighbors of each detonated mine among them.
    fn queue_after_chord(&self, coords: Coord2, to_visit: &mut VecDeque<Coord2>) {
        for pos in coords.iter_neighbors() {
            to_visit.push_back(pos);
            if self.store.get(pos).is_detonated() {
                to_visit.extend(pos.iter_neighbors());
            }
        }
    }

    /// Places a mine with probability `density`, unless a neighbor has already been uncovered.
    fn generate_mine_at(&mut self, coords: Coord2) {
        if !self.all_adjacent(coords, not_uncovered) {
            return;
        }

        if self.rng.next_uniform() < self.density.get() {
            self.store.set_mine(coords, true);
            log::trace!("Generated mine at {:?}", coords);
        }
    }

    fn all_adjacent(&self, coords: Coord2, predicate: impl Fn(Cell) -> bool) -> bool {
        coords
            .iter_neighbors()
            .all(|pos| predicate(self.store.get(pos)))
    }

    fn count_adjacent(&self, coords: Coord2, predicate: impl Fn(Cell) -> bool) -> u8 {
        // at most 8 neighbors
        coords
            .iter_neighbors()
            .filter(|&pos| predicate(self.store.get(pos)))
            .count() as u8
    }

    /// Applies `action` to every neighbor satisfying `predicate`, checked as each one is reached.
    fn for_each_adjacent(
        &mut self,
        coords: Coord2,
        predicate: Option<fn(Cell) -> bool>,
        mut action: impl FnMut(&mut Self, Coord2),
    ) {
        for pos in coords.iter_neighbors() {
            if predicate.is_none_or(|predicate| predicate(self.store.get(pos))) {
                action(self, pos);
            }
        }
    }
}

fn not_uncovered(cell: Cell) -> bool {
    !cell.is_uncovered()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn scripted(
        density: f64,
        mines: &[Coord2],
        source: ScriptedSource,
    ) -> Game<SparseStore, ScriptedSource> {
        let mut store = SparseStore::new();
        for &coords in mines {
            store.set_mine(coords, true);
        }
        Game::new(Density::new(density).unwrap(), store, source)
    }

    #[test]
    fn first_uncover_is_safe_even_at_full_density() {
        let mut game = scripted(1.0, &[], ScriptedSource::always());

        assert!(game.uncover((0, 0)));

        assert_eq!(game.tile_at((0, 0)), Tile::Number(8));
        assert_eq!(game.detonated_count(), 0);
        assert_eq!(game.uncovered_count(), 1);
    }

    #[test]
    fn later_uncover_can_detonate() {
        let mut game = scripted(1.0, &[], ScriptedSource::always());

        game.uncover((0, 0));
        assert!(game.uncover((10, 10)));

        assert_eq!(game.tile_at((10, 10)), Tile::Detonated);
        assert_eq!(game.detonated_count(), 1);
        assert_eq!(game.uncovered_count(), 2);
    }

    #[test]
    fn neighbors_of_revealed_cells_never_gain_mines() {
        // the first uncover draws for its 8 neighbors, every later draw places a mine
        let mut game = scripted(0.5, &[], ScriptedSource::new([1.0; 8], 0.0));

        game.uncover((0, 0));
        assert_eq!(game.tile_at((0, 0)), Tile::Number(0));

        game.uncover((1, 0));

        assert_eq!(game.tile_at((0, 0)), Tile::Number(0));
        assert_eq!(game.tile_at((1, 0)), Tile::Number(3));
        assert_eq!(game.tile_at((2, 0)), Tile::Mine);
        assert_eq!(game.tile_at((1, 1)), Tile::Plain);
        assert_eq!(game.rng.draws(), 11);
    }

    #[test]
    fn uncover_rejects_uncovered_and_flagged_cells() {
        let mut game = scripted(0.0, &[], ScriptedSource::never());

        assert!(game.uncover((0, 0)));
        assert!(!game.uncover((0, 0)));

        assert!(game.flag((4, 4)));
        assert!(!game.uncover((4, 4)));
        assert_eq!(game.uncovered_count(), 1);
    }

    #[test]
    fn flag_toggles_and_refuses_uncovered_cells() {
        let mut game = scripted(0.0, &[(2, 2)], ScriptedSource::never());

        assert!(game.flag((2, 2)));
        assert_eq!(game.tile_at((2, 2)), Tile::FlagRight);
        assert!(game.flag((2, 2)));
        assert_eq!(game.tile_at((2, 2)), Tile::Mine);

        assert!(game.flag((5, 5)));
        assert_eq!(game.tile_at((5, 5)), Tile::FlagWrong);
        assert!(game.flag((5, 5)));
        assert_eq!(game.tile_at((5, 5)), Tile::Plain);

        game.uncover((0, 0));
        assert!(!game.flag((0, 0)));
        assert_eq!(game.tile_at((0, 0)), Tile::Number(0));
    }

    #[test]
    fn chord_requires_adjacent_mines_to_be_flagged() {
        let mut game = scripted(0.0, &[(1, 0)], ScriptedSource::never());

        game.uncover((0, 0));
        assert_eq!(game.tile_at((0, 0)), Tile::Number(1));

        assert!(!game.chord((0, 0)));
        assert_eq!(game.uncovered_count(), 1);
        assert_eq!(game.tile_at((0, 1)), Tile::Plain);

        game.flag((1, 0));
        assert!(game.chord((0, 0)));

        assert_eq!(game.uncovered_count(), 8);
        assert_eq!(game.tile_at((1, 0)), Tile::FlagRight);
        assert_eq!(game.tile_at((-1, -1)), Tile::Number(0));
        assert_eq!(game.tile_at((1, 1)), Tile::Number(1));
        assert_eq!(game.detonated_count(), 0);
    }

    #[test]
    fn chord_counts_detonated_mines_as_accounted_for() {
        let mut game = scripted(0.0, &[(1, 0)], ScriptedSource::never());

        game.uncover((0, 0));
        game.uncover((1, 0));
        assert_eq!(game.tile_at((1, 0)), Tile::Detonated);

        assert!(game.chord((0, 0)));
        assert_eq!(game.uncovered_count(), 9);
        assert_eq!(game.detonated_count(), 1);
    }

    #[test]
    fn chord_rejects_covered_and_detonated_cells() {
        let mut game = scripted(0.0, &[(1, 0)], ScriptedSource::never());

        assert!(!game.chord((0, 0)));

        game.uncover((0, 0));
        game.uncover((1, 0));
        assert!(!game.chord((1, 0)));
    }

    #[test]
    fn wrong_flag_still_satisfies_chord_count() {
        let mut game = scripted(0.0, &[(1, 0)], ScriptedSource::never());

        game.uncover((0, 0));
        game.flag((-1, 0));
        assert!(game.chord((0, 0)));

        assert_eq!(game.tile_at((1, 0)), Tile::Detonated);
        assert_eq!(game.tile_at((-1, 0)), Tile::FlagWrong);
        assert_eq!(game.detonated_count(), 1);
    }

    #[test]
    fn out_of_extent_cells_stay_plain() {
        let store = BoundedStore::new(Extent::square(2).unwrap()).unwrap();
        let mut game = Game::new(Density::ONE, store, ScriptedSource::always());

        assert!(game.uncover((5, 5)));
        assert!(game.uncover((5, 5)));
        assert!(game.flag((5, 5)));

        assert_eq!(game.tile_at((5, 5)), Tile::Plain);
        assert_eq!(game.uncovered_count(), 2);
        assert_eq!(game.detonated_count(), 0);
    }

    #[test]
    fn density_zero_scenario() {
        let mut game = Game::unbounded(Density::ZERO, SmallRng::seed_from_u64(7));

        assert!(game.uncover((0, 0)));
        assert_eq!(game.tile_at((0, 0)), Tile::Number(0));
        assert!(game.uncover((1, 1)));
        assert_eq!(game.tile_at((1, 1)), Tile::Number(0));

        assert!(game.chord((0, 0)));
        for pos in (0, 0).iter_neighbors() {
            assert_eq!(game.tile_at(pos), Tile::Number(0));
        }
        assert_eq!(game.uncovered_count(), 9);
    }

    #[test]
    fn auto_chord_floods_bounded_zero_region() {
        let store = BoundedStore::new(Extent::square(4).unwrap()).unwrap();
        let mut game = Game::new(Density::ZERO, store, ScriptedSource::never());

        game.uncover((0, 0));
        assert!(game.auto_chord((0, 0), usize::MAX));

        for x in -4..4 {
            for y in -4..4 {
                assert_eq!(game.tile_at((x, y)), Tile::Number(0));
            }
        }
        assert_eq!(game.tile_at((4, 0)), Tile::Plain);
    }

    #[test]
    fn auto_chord_stops_at_limit_on_unbounded_storage() {
        let mut game = Game::unbounded(Density::ZERO, ScriptedSource::never());

        game.uncover((0, 0));
        assert!(game.auto_chord((0, 0), 10));

        // first chord plus ten cascaded ones, each uncovering at most 8 cells
        assert!(game.uncovered_count() <= 1 + 8 * 11);
        assert!(game.uncovered_count() > 9);
        assert_eq!(game.tile_at((100, 100)), Tile::Plain);
    }

    #[test]
    fn auto_chord_revisits_cells_next_to_mines_detonated_by_wrong_flag() {
        let mut store = BoundedStore::new(Extent::new(0..3, 0..3).unwrap()).unwrap();
        store.set_mine((0, 0), true);
        store.set_mine((0, 1), true);
        let mut game = Game::new(Density::ZERO, store, ScriptedSource::never());

        game.flag((0, 2));
        game.uncover((2, 1));
        assert!(game.auto_chord((2, 1), usize::MAX));

        // (1, 1) is reached first with only the wrong flag against its two mines, then the chord
        // at (1, 2) detonates (0, 1) and (1, 1) has to be chorded after all
        assert_eq!(game.tile_at((0, 2)), Tile::FlagWrong);
        assert_eq!(game.tile_at((0, 1)), Tile::Detonated);
        assert_eq!(game.tile_at((0, 0)), Tile::Detonated);
        assert_eq!(game.detonated_count(), 2);

        for x in 0..3 {
            for y in 0..3 {
                let center = (x, y);
                if !game.is_chordable(center) {
                    continue;
                }
                for pos in center.iter_neighbors() {
                    let cell = game.cell_at(pos);
                    assert!(
                        !game.store().contains(pos) || cell.is_uncovered() || cell.is_flagged(),
                        "{pos:?} left covered next to chordable {center:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn auto_chord_rejects_unsatisfied_cell() {
        let mut game = scripted(0.0, &[(1, 0)], ScriptedSource::never());

        game.uncover((0, 0));
        assert!(!game.auto_chord((0, 0), usize::MAX));
        assert_eq!(game.uncovered_count(), 1);
    }

    #[test]
    fn from_config_picks_storage_model() {
        let config = GameConfig::new(Density::ZERO, Storage::Unbounded);
        let mut game = Game::from_config(&config, ScriptedSource::never()).unwrap();

        assert!(game.uncover((1 << 50, 0)));
        assert_eq!(game.tile_at((1 << 50, 0)), Tile::Number(0));
        assert_eq!(game.store().extent(), None);
    }
}
