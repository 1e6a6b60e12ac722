use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::BoardError;
use crate::types::Category;

/// One tile of an adjacency description. `id` is only meaningful inside the
/// layout it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutTile {
    pub id: u32,
    pub category: Category,
    #[serde(default)]
    pub neighbors: Vec<u32>,
}

impl LayoutTile {
    pub fn new(id: u32, category: Category, neighbors: Vec<u32>) -> Self {
        Self {
            id,
            category,
            neighbors,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub tiles: Vec<LayoutTile>,
}

impl BoardLayout {
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BoardError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn has_centre(&self) -> bool {
        self.tiles
            .iter()
            .any(|tile| tile.category == Category::Centre)
    }

    /// Centre hub, an inner ring holding one tile per question category and
    /// an outer ring twice as long, each inner tile bridging to the outer ring.
    pub fn classic() -> &'static BoardLayout {
        &CLASSIC_LAYOUT
    }
}

const INNER_RING: u32 = 6;
const OUTER_RING: u32 = 12;

static CLASSIC_LAYOUT: Lazy<BoardLayout> = Lazy::new(|| {
    let inner = |i: u32| 1 + (i % INNER_RING);
    let outer = |i: u32| 1 + INNER_RING + (i % OUTER_RING);

    let mut tiles = vec![LayoutTile::new(
        0,
        Category::Centre,
        (0..INNER_RING).map(inner).collect(),
    )];
    for i in 0..INNER_RING {
        tiles.push(LayoutTile::new(
            inner(i),
            Category::QUESTION[i as usize],
            vec![0, inner(i + 1), outer(2 * i)],
        ));
    }
    for i in 0..OUTER_RING {
        // Offset by three so the outer ring does not mirror the inner one.
        let category = Category::QUESTION[((i + 3) % INNER_RING) as usize];
        tiles.push(LayoutTile::new(outer(i), category, vec![outer(i + 1)]));
    }
    BoardLayout { tiles }
});
