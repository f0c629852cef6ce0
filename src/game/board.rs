use log::trace;
use uuid::Uuid;

use crate::model::{BoardId, BoardPos, KindId, Tile, TileId};

/// Authoritative board state: an arena of tiles plus a `[column][row]`
/// position index, fixed in size after generation. Row and column views are
/// recomputed after every structural mutation so they can never go stale
/// relative to the tiles' own `pos` fields.
pub struct TileBoard {
    id: BoardId,
    columns: usize,
    rows: usize,
    seed: u64,
    tiles: Vec<Tile>,
    /// `TileId` per cell, column-major: index = x * rows + y.
    grid: Vec<TileId>,
    /// Per row, tile ids left to right.
    row_views: Vec<Vec<TileId>>,
    /// Per column, tile ids bottom to top.
    column_views: Vec<Vec<TileId>>,
}

impl TileBoard {
    /// Builds a board from kinds listed in column-major, low-to-high order.
    /// Tiles are created here once and live for the life of the board.
    pub fn from_kinds(columns: usize, rows: usize, seed: u64, kinds: Vec<KindId>) -> Self {
        assert_eq!(kinds.len(), columns * rows, "one kind per cell");
        let id = Uuid::new_v4();
        let mut tiles = Vec::with_capacity(kinds.len());
        let mut grid = Vec::with_capacity(kinds.len());
        for (i, kind) in kinds.into_iter().enumerate() {
            let pos = BoardPos::new((i / rows) as i32, (i % rows) as i32);
            let tile_id = TileId(i);
            tiles.push(Tile::new(tile_id, kind, pos, id));
            grid.push(tile_id);
        }
        let mut board = Self {
            id,
            columns,
            rows,
            seed,
            tiles,
            grid,
            row_views: vec![],
            column_views: vec![],
        };
        board.rebuild_views();
        board
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn in_bounds(&self, pos: BoardPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.columns && (pos.y as usize) < self.rows
    }

    fn cell_index(&self, pos: BoardPos) -> usize {
        pos.x as usize * self.rows + pos.y as usize
    }

    pub fn tile_id_at(&self, pos: BoardPos) -> Option<TileId> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.grid[self.cell_index(pos)])
    }

    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.0]
    }

    pub fn tile_at(&self, pos: BoardPos) -> Option<&Tile> {
        self.tile_id_at(pos).map(|id| self.tile(id))
    }

    pub fn kind_at(&self, pos: BoardPos) -> Option<KindId> {
        self.tile_at(pos).map(|tile| tile.kind)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Rows bottom to top, each left to right.
    pub fn row_views(&self) -> &[Vec<TileId>] {
        &self.row_views
    }

    /// Columns left to right, each bottom to top.
    pub fn column_views(&self) -> &[Vec<TileId>] {
        &self.column_views
    }

    /// Recolors a tile in place. Identity and position are untouched; this
    /// is how matched tiles become air.
    pub fn recolor(&mut self, id: TileId, kind: KindId) {
        let tile = &mut self.tiles[id.0];
        trace!(target: "board", "Recoloring {:?} at {} from {:?} to {:?}", id, tile.pos, tile.kind, kind);
        tile.kind = kind;
    }

    /// Exchanges the two tiles' board positions (swap, not copy) and
    /// refreshes the position index and line views.
    pub fn swap_positions(&mut self, a: TileId, b: TileId) {
        assert_ne!(a, b, "cannot swap a tile with itself");
        let pos_a = self.tiles[a.0].pos;
        let pos_b = self.tiles[b.0].pos;
        self.tiles[a.0].pos = pos_b;
        self.tiles[b.0].pos = pos_a;
        let idx_a = self.cell_index(pos_a);
        let idx_b = self.cell_index(pos_b);
        self.grid.swap(idx_a, idx_b);
        self.rebuild_views();
        trace!(target: "board", "Swapped {:?} {} <-> {:?} {}", a, pos_a, b, pos_b);
    }

    fn rebuild_views(&mut self) {
        self.row_views = (0..self.rows)
            .map(|y| {
                (0..self.columns)
                    .map(|x| self.grid[x * self.rows + y])
                    .collect()
            })
            .collect();
        self.column_views = (0..self.columns)
            .map(|x| (0..self.rows).map(|y| self.grid[x * self.rows + y]).collect())
            .collect();
    }

    /// Every valid coordinate maps to exactly one tile whose stored
    /// position matches the index it is filed under.
    pub fn occupancy_consistent(&self) -> bool {
        for x in 0..self.columns {
            for y in 0..self.rows {
                let pos = BoardPos::new(x as i32, y as i32);
                let tile = self.tile(self.grid[self.cell_index(pos)]);
                if tile.pos != pos {
                    return false;
                }
            }
        }
        let mut seen = vec![false; self.tiles.len()];
        for &id in &self.grid {
            if seen[id.0] {
                return false;
            }
            seen[id.0] = true;
        }
        true
    }
}

impl std::fmt::Debug for TileBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = String::new();
        output.push('\n');
        for y in (0..self.rows).rev() {
            output.push_str(&format!("{:>2}|", y));
            for x in 0..self.columns {
                let id = self.grid[x * self.rows + y];
                output.push_str(&format!("{:>4?}", self.tile(id).kind));
            }
            output.push('\n');
        }
        write!(f, "{}", output)
    }
}
