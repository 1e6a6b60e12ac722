use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::Category;

mod layout;

pub use layout::{BoardLayout, LayoutTile};

pub type TileId = u16;

pub const DEFAULT_DICE_MAX: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    category: Category,
    neighbors: SmallVec<[TileId; 6]>,
}

impl Tile {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            neighbors: SmallVec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn neighbors(&self) -> &[TileId] {
        &self.neighbors
    }

    /// Appends `tile` unless it is already a neighbor. Insertion order is kept.
    pub fn add_neighbor(&mut self, tile: TileId) {
        if !self.neighbors.contains(&tile) {
            self.neighbors.push(tile);
        }
    }

    pub fn is_neighbor(&self, tile: TileId) -> bool {
        self.neighbors.contains(&tile)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("board layout has no CENTRE tile")]
    Loading,
    #[error("tile {0} is not part of the board")]
    UnknownTile(u32),
    #[error("tile {0} is declared more than once")]
    DuplicateTile(u32),
    #[error("board is full")]
    Full,
    #[error("failed to read board layout: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse board layout: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Arena of tiles. Tiles refer to each other by [`TileId`], which is the
/// tile's index in the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    size: usize,
    first_tile: TileId,
    dice_max: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self::with_dice(DEFAULT_DICE_MAX)
    }

    /// Fresh board holding only its centre tile.
    pub fn with_dice(dice_max: u32) -> Self {
        Self {
            tiles: vec![Tile::new(Category::Centre)],
            size: 0,
            first_tile: 0,
            dice_max: dice_max.max(1),
        }
    }

    /// Builds a board from an adjacency description.
    ///
    /// Each layout entry becomes exactly one board tile. The first entry
    /// tagged [`Category::Centre`] takes the place of the board's own start
    /// tile, every other entry is added through [`Board::add_tile`]. Edges
    /// are wired in both directions.
    pub fn load_from_layout(layout: &BoardLayout, dice_max: u32) -> Result<Self, BoardError> {
        let centre_pos = layout
            .tiles
            .iter()
            .position(|tile| tile.category == Category::Centre)
            .ok_or(BoardError::Loading)?;

        let mut board = Board::with_dice(dice_max);
        let mut ids: HashMap<u32, TileId> = HashMap::with_capacity(layout.tiles.len());
        for (pos, entry) in layout.tiles.iter().enumerate() {
            if ids.contains_key(&entry.id) {
                return Err(BoardError::DuplicateTile(entry.id));
            }
            let tile_id = if pos == centre_pos {
                board.first_tile
            } else {
                board.add_tile(entry.category, &[])?
            };
            ids.insert(entry.id, tile_id);
        }

        let resolve = |layout_id: u32| {
            ids.get(&layout_id)
                .copied()
                .ok_or(BoardError::UnknownTile(layout_id))
        };
        for entry in &layout.tiles {
            let from = resolve(entry.id)?;
            for neighbor in &entry.neighbors {
                let to = resolve(*neighbor)?;
                board.link(from, to)?;
            }
        }
        Ok(board)
    }

    /// Creates a tile wired in both directions to every tile in `neighbors`.
    pub fn add_tile(&mut self, category: Category, neighbors: &[TileId]) -> Result<TileId, BoardError> {
        if let Some(unknown) = neighbors.iter().find(|id| !self.contains(**id)) {
            return Err(BoardError::UnknownTile(u32::from(*unknown)));
        }
        let id = TileId::try_from(self.tiles.len()).map_err(|_| BoardError::Full)?;
        let mut tile = Tile::new(category);
        for neighbor in neighbors {
            tile.add_neighbor(*neighbor);
        }
        self.tiles.push(tile);
        for neighbor in neighbors {
            self.tiles[*neighbor as usize].add_neighbor(id);
        }
        self.size += 1;
        Ok(id)
    }

    /// One-directional edge from `from` to `to`.
    pub fn add_neighbor(&mut self, from: TileId, to: TileId) -> Result<(), BoardError> {
        if !self.contains(to) {
            return Err(BoardError::UnknownTile(u32::from(to)));
        }
        self.tiles
            .get_mut(from as usize)
            .ok_or(BoardError::UnknownTile(u32::from(from)))?
            .add_neighbor(to);
        Ok(())
    }

    pub fn link(&mut self, a: TileId, b: TileId) -> Result<(), BoardError> {
        self.add_neighbor(a, b)?;
        self.add_neighbor(b, a)
    }

    /// Number of tiles added after the centre tile.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn first_tile(&self) -> TileId {
        self.first_tile
    }

    pub fn board_dice(&self) -> u32 {
        self.dice_max
    }

    pub fn contains(&self, id: TileId) -> bool {
        (id as usize) < self.tiles.len()
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id as usize)
    }

    pub fn category(&self, id: TileId) -> Option<Category> {
        self.tile(id).map(Tile::category)
    }

    pub fn neighbors(&self, id: TileId) -> &[TileId] {
        self.tile(id).map(Tile::neighbors).unwrap_or(&[])
    }

    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(idx, tile)| (idx as TileId, tile))
    }

    /// Adjacency description of this board, ids being arena indices.
    pub fn to_layout(&self) -> BoardLayout {
        let tiles = self
            .tiles()
            .map(|(id, tile)| LayoutTile {
                id: u32::from(id),
                category: tile.category(),
                neighbors: tile.neighbors().iter().map(|n| u32::from(*n)).collect(),
            })
            .collect();
        BoardLayout { tiles }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, tile) in self.tiles() {
            let marker = if id == self.first_tile { "*" } else { " " };
            let neighbors = tile
                .neighbors()
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "{marker}{id:>3} {:<15} -> [{neighbors}]", tile.category())?;
        }
        Ok(())
    }
}
