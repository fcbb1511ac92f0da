//! Layout parsing and per-piece metadata
//!
//! A layout is a block of text where each character is one cell. Recognized
//! tags anchor a piece at the first cell they are seen on (scanning rows top
//! to bottom, columns left to right); every cell the piece covers is marked
//! visited so the rest of its tag characters do not place it twice.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::grid::{Grid, GridError, PieceId, Shape};
use super::pos::Pos;

/// Tag of the immovable 1x1 wall
pub const WALL: char = '#';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("piece '{tag}' anchored at {anchor} overlaps cell {pos}")]
    Overlap { tag: char, anchor: Pos, pos: Pos },

    #[error("shape for tag '{0}' has no cells")]
    EmptyShape(char),
}

/// Tag character to shape table
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    shapes: HashMap<char, Shape>,
}

impl ShapeCatalog {
    /// The built-in tags: `#` wall, `o` single, `n` horizontal domino,
    /// `l` vertical domino, `g` 2x2 block
    pub fn standard() -> Self {
        let single = [Pos::ZERO];
        let shapes = HashMap::from([
            (WALL, Shape::new(single)),
            ('o', Shape::new(single)),
            ('n', Shape::new([Pos::ZERO, Pos::RIGHT])),
            ('l', Shape::new([Pos::ZERO, Pos::DOWN])),
            (
                'g',
                Shape::new([Pos::ZERO, Pos::RIGHT, Pos::DOWN, Pos::RIGHT + Pos::DOWN]),
            ),
        ]);
        Self { shapes }
    }

    /// Register (or replace) the shape for `tag`
    pub fn with_shape(mut self, tag: char, offsets: impl Into<Vec<Pos>>) -> Result<Self, LayoutError> {
        let shape = Shape::new(offsets);
        if shape.is_empty() {
            return Err(LayoutError::EmptyShape(tag));
        }
        self.shapes.insert(tag, shape);
        Ok(self)
    }

    pub fn get(&self, tag: char) -> Option<&Shape> {
        self.shapes.get(&tag)
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Descriptive metadata for one piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    pub tag: char,
    pub origin: Pos,
    pub shape: Shape,
}

impl GridItem {
    /// Walls never move
    pub fn is_fixed(&self) -> bool {
        self.tag == WALL
    }
}

/// A grid together with the metadata of every piece on it
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    grid: Grid,
    items: BTreeMap<PieceId, GridItem>,
}

impl GridBuilder {
    /// Parse a layout with the standard tag table
    pub fn from_layout(text: &str) -> Result<Self, LayoutError> {
        Self::from_layout_with(text, &ShapeCatalog::standard())
    }

    /// Parse a layout against a custom tag table
    ///
    /// Blank leading and trailing lines are dropped and either line ending
    /// is accepted. Unknown characters are empty cells.
    pub fn from_layout_with(text: &str, catalog: &ShapeCatalog) -> Result<Self, LayoutError> {
        let rows = layout_rows(text);
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Grid::new(width as i32, rows.len() as i32);
        let mut items = BTreeMap::new();
        let mut visited: HashSet<Pos> = HashSet::new();

        for (row, line) in rows.iter().enumerate() {
            for (col, tag) in line.chars().enumerate() {
                let anchor = Pos::new(col as i32, row as i32);
                if visited.contains(&anchor) {
                    continue;
                }
                let Some(shape) = catalog.get(tag) else {
                    continue;
                };

                let (id, claimed) = grid.place(anchor, shape.clone()).map_err(|e| match e {
                    GridError::Occupied { pos, .. } => LayoutError::Overlap { tag, anchor, pos },
                    GridError::EmptyShape => LayoutError::EmptyShape(tag),
                })?;
                visited.extend(claimed);
                items.insert(
                    id,
                    GridItem {
                        tag,
                        origin: anchor,
                        shape: shape.clone(),
                    },
                );
            }
        }

        log::debug!(
            "Parsed {}x{} layout with {} pieces",
            grid.width(),
            grid.height(),
            items.len()
        );
        Ok(Self { grid, items })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn item(&self, piece: PieceId) -> Option<&GridItem> {
        self.items.get(&piece)
    }

    /// Metadata of the piece covering `pos`
    pub fn item_at(&self, pos: Pos) -> Option<(PieceId, &GridItem)> {
        let id = self.grid.piece_at(pos)?;
        self.items.get(&id).map(|item| (id, item))
    }

    /// First piece carrying `tag`, in id order
    pub fn find(&self, tag: char) -> Option<PieceId> {
        self.items
            .iter()
            .find(|(_, item)| item.tag == tag)
            .map(|(&id, _)| id)
    }

    /// Every piece with its metadata and absolute cells
    pub fn bodies(&self) -> Vec<(PieceId, &GridItem, Vec<Pos>)> {
        self.items
            .iter()
            .map(|(&id, item)| (id, item, self.grid.cells(id)))
            .collect()
    }

    /// Rebind to `grid`, refreshing every origin from it
    ///
    /// Consumes the builder: once a move is committed the previous
    /// generation is gone.
    pub fn with_grid(self, grid: Grid) -> Self {
        let items = self
            .items
            .into_iter()
            .map(|(id, item)| {
                let origin = grid.origin(id).unwrap_or_else(|| {
                    log::warn!("Piece {:?} ('{}') missing from rebound grid", id, item.tag);
                    item.origin
                });
                (id, GridItem { origin, ..item })
            })
            .collect();
        Self { grid, items }
    }
}

/// Split layout text into rows, minus blank lines at either end
fn layout_rows(text: &str) -> Vec<&str> {
    let mut rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    let first = rows.iter().position(|r| !r.is_empty()).unwrap_or(rows.len());
    rows.split_off(first)
}
