use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BoardPos;

/// Index of a kind within its `TileCatalog`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KindId(pub usize);

impl std::fmt::Debug for KindId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "k{}", self.0)
    }
}

/// Index of a tile within its board's arena. Identity is stable for the
/// life of the board; tiles are recolored in place, never recreated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub usize);

impl std::fmt::Debug for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Marks which board a tile currently belongs to. Inter-board transfer is
/// not implemented, but the ownership marker exists for it.
pub type BoardId = Uuid;

/// A tile category: symbolic name, an opaque display reference the core
/// never interprets, and a generation weight in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileKind {
    pub name: String,
    pub material: String,
    pub weight: f32,
}

impl TileKind {
    pub fn new(name: &str, material: &str, weight: f32) -> Self {
        Self {
            name: name.to_string(),
            material: material.to_string(),
            weight,
        }
    }
}

/// The set of kinds a board draws from, with one entry designated `air`:
/// the sentinel for a cleared cell. Air is never spawned by the generator
/// and never participates in a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileCatalog {
    kinds: Vec<TileKind>,
    air: KindId,
}

impl TileCatalog {
    pub fn new(kinds: Vec<TileKind>, air: KindId) -> Self {
        assert!(air.0 < kinds.len(), "air kind {:?} not in catalog", air);
        Self { kinds, air }
    }

    pub fn kind(&self, id: KindId) -> &TileKind {
        &self.kinds[id.0]
    }

    pub fn air(&self) -> KindId {
        self.air
    }

    pub fn is_air(&self, id: KindId) -> bool {
        id == self.air
    }

    pub fn id_of(&self, name: &str) -> Option<KindId> {
        self.kinds.iter().position(|k| k.name == name).map(KindId)
    }

    /// Kinds the generator may place: everything except air.
    pub fn spawnable(&self) -> impl Iterator<Item = (KindId, &TileKind)> {
        self.kinds
            .iter()
            .enumerate()
            .map(|(i, k)| (KindId(i), k))
            .filter(|(id, _)| *id != self.air)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// One tile instance on a board. The kind mutates when the tile is cleared
/// to air; the position mutates on swap; the id never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub kind: KindId,
    pub pos: BoardPos,
    pub board: BoardId,
}

impl Tile {
    pub fn new(id: TileId, kind: KindId, pos: BoardPos, board: BoardId) -> Self {
        Self {
            id,
            kind,
            pos,
            board,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TileCatalog {
        TileCatalog::new(
            vec![
                TileKind::new("grass", "mat_grass", 0.5),
                TileKind::new("stone", "mat_stone", 0.5),
                TileKind::new("air", "mat_air", 0.0),
            ],
            KindId(2),
        )
    }

    #[test]
    fn test_spawnable_excludes_air() {
        let catalog = catalog();
        let names: Vec<&str> = catalog
            .spawnable()
            .map(|(_, kind)| kind.name.as_str())
            .collect();
        assert_eq!(names, vec!["grass", "stone"]);
    }

    #[test]
    fn test_id_of() {
        let catalog = catalog();
        assert_eq!(catalog.id_of("stone"), Some(KindId(1)));
        assert_eq!(catalog.id_of("lava"), None);
        assert!(catalog.is_air(catalog.id_of("air").unwrap()));
    }

    #[test]
    #[should_panic(expected = "air kind")]
    fn test_air_must_be_in_catalog() {
        TileCatalog::new(vec![TileKind::new("grass", "mat_grass", 1.0)], KindId(3));
    }
}
