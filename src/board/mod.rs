//! Board model
//!
//! The persistent occupancy grid, piece shapes and the layout parser that
//! builds a grid and its per-piece metadata from text.

pub mod builder;
pub mod grid;
pub mod pos;

pub use builder::{GridBuilder, GridItem, LayoutError, ShapeCatalog, WALL};
pub use grid::{Grid, GridError, PieceId, Shape};
pub use pos::{Pos, PosKeyError};
