use std::collections::BTreeSet;

use super::TileId;

/// The tiles matched by one detection pass. Set semantics: a tile sitting
/// at the intersection of a row match and a column match appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    tiles: BTreeSet<TileId>,
}

impl MatchReport {
    pub fn insert(&mut self, tile: TileId) {
        self.tiles.insert(tile);
    }

    pub fn extend(&mut self, tiles: impl IntoIterator<Item = TileId>) {
        self.tiles.extend(tiles);
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains(&tile)
    }

    pub fn match_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().copied()
    }
}
