//! Occupancy grid
//!
//! Maps cells to the piece covering them, and pieces to their origin.
//! A `Grid` is a snapshot: `try_move` never touches the receiver and hands
//! back an independent clone, so a move can be tested speculatively while
//! the committed board stays intact.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::pos::Pos;

/// Handle for a piece placed on a grid
///
/// Ids are allocated per grid lineage and never reused, so two pieces with
/// identical shapes are still told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

/// Immutable list of cell offsets relative to a piece origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape(Arc<[Pos]>);

impl Shape {
    pub fn new(offsets: impl Into<Vec<Pos>>) -> Self {
        Self(offsets.into().into())
    }

    pub fn offsets(&self) -> &[Pos] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Absolute cells covered when anchored at `origin`
    pub fn cells_at(&self, origin: Pos) -> impl Iterator<Item = Pos> + '_ {
        self.0.iter().map(move |&d| origin + d)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell {pos} is already claimed by {by:?}")]
    Occupied { pos: Pos, by: PieceId },

    #[error("shape has no cells")]
    EmptyShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Placement {
    origin: Pos,
    shape: Shape,
}

/// Cell occupancy and piece placement for one board state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: HashMap<Pos, PieceId>,
    /// Sorted by id for stable iteration
    pieces: BTreeMap<PieceId, Placement>,
    next_id: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: HashMap::new(),
            pieces: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `pos` lies inside the board rectangle
    pub fn contains(&self, pos: Pos) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Number of placed pieces
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Register a piece at `origin`, returning its id and the cells it claims
    ///
    /// Nothing is written if any target cell is taken.
    pub fn place(&mut self, origin: Pos, shape: Shape) -> Result<(PieceId, Vec<Pos>), GridError> {
        if shape.is_empty() {
            return Err(GridError::EmptyShape);
        }
        let claimed: Vec<Pos> = shape.cells_at(origin).collect();
        if let Some((&pos, &by)) = claimed
            .iter()
            .find_map(|pos| self.cells.get_key_value(pos))
        {
            return Err(GridError::Occupied { pos, by });
        }

        let id = PieceId(self.next_id);
        self.next_id += 1;
        for &pos in &claimed {
            self.cells.insert(pos, id);
        }
        self.pieces.insert(id, Placement { origin, shape });
        Ok((id, claimed))
    }

    /// Piece covering `pos`, if any
    pub fn piece_at(&self, pos: Pos) -> Option<PieceId> {
        self.cells.get(&pos).copied()
    }

    pub fn origin(&self, piece: PieceId) -> Option<Pos> {
        self.pieces.get(&piece).map(|p| p.origin)
    }

    pub fn shape(&self, piece: PieceId) -> Option<&Shape> {
        self.pieces.get(&piece).map(|p| &p.shape)
    }

    /// Absolute cells covered by `piece`
    pub fn cells(&self, piece: PieceId) -> Vec<Pos> {
        self.pieces
            .get(&piece)
            .map(|p| p.shape.cells_at(p.origin).collect())
            .unwrap_or_default()
    }

    /// Piece ids in placement order
    pub fn pieces(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.pieces.keys().copied()
    }

    /// Test a one-step translation of `piece` along `dir`
    ///
    /// Returns the resulting board, or `None` if a different piece stands in
    /// the way. The receiver is left as it was either way.
    pub fn try_move(&self, dir: Pos, piece: PieceId) -> Option<Grid> {
        let placement = self.pieces.get(&piece)?;
        let blocked = placement
            .shape
            .cells_at(placement.origin + dir)
            .any(|pos| matches!(self.cells.get(&pos), Some(&other) if other != piece));
        if blocked {
            return None;
        }

        let mut next = self.clone();
        next.relocate(piece, placement.origin + dir);
        Some(next)
    }

    fn relocate(&mut self, piece: PieceId, origin: Pos) {
        let Some(placement) = self.pieces.get_mut(&piece) else {
            return;
        };
        for pos in placement.shape.cells_at(placement.origin) {
            self.cells.remove(&pos);
        }
        placement.origin = origin;
        for pos in placement.shape.cells_at(origin) {
            self.cells.insert(pos, piece);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn domino_h() -> Shape {
        Shape::new([Pos::ZERO, Pos::RIGHT])
    }

    #[test]
    fn test_place_claims_cells() {
        let mut grid = Grid::new(4, 4);
        let (id, cells) = grid.place(Pos::new(1, 1), domino_h()).unwrap();
        assert_eq!(cells, vec![Pos::new(1, 1), Pos::new(2, 1)]);
        assert_eq!(grid.piece_at(Pos::new(2, 1)), Some(id));
        assert_eq!(grid.piece_at(Pos::new(3, 1)), None);
        assert_eq!(grid.origin(id), Some(Pos::new(1, 1)));
    }

    #[test]
    fn test_place_overlap_is_rejected_without_writes() {
        let mut grid = Grid::new(4, 4);
        let (first, _) = grid.place(Pos::new(1, 0), Shape::new([Pos::ZERO])).unwrap();
        let before = grid.clone();
        let err = grid.place(Pos::ZERO, domino_h()).unwrap_err();
        assert_eq!(err, GridError::Occupied { pos: Pos::new(1, 0), by: first });
        assert_eq!(grid, before);
        assert_eq!(grid.piece_at(Pos::ZERO), None);
    }

    #[test]
    fn test_place_empty_shape() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(grid.place(Pos::ZERO, Shape::new(Vec::new())), Err(GridError::EmptyShape));
    }

    #[test]
    fn test_identical_shapes_are_distinct_pieces() {
        let mut grid = Grid::new(4, 1);
        let single = Shape::new([Pos::ZERO]);
        let (a, _) = grid.place(Pos::new(0, 0), single.clone()).unwrap();
        let (b, _) = grid.place(Pos::new(2, 0), single).unwrap();
        assert_ne!(a, b);
        // A piece never collides with its own cells
        let moved = grid.try_move(Pos::RIGHT, a).unwrap();
        assert_eq!(moved.origin(a), Some(Pos::new(1, 0)));
        assert!(moved.try_move(Pos::RIGHT, a).is_none());
    }

    #[test]
    fn test_try_move_overlapping_own_footprint() {
        let mut grid = Grid::new(4, 1);
        let (id, _) = grid.place(Pos::ZERO, domino_h()).unwrap();
        let moved = grid.try_move(Pos::RIGHT, id).unwrap();
        assert_eq!(moved.cells(id), vec![Pos::new(1, 0), Pos::new(2, 0)]);
        assert_eq!(moved.piece_at(Pos::ZERO), None);
        // Original untouched
        assert_eq!(grid.cells(id), vec![Pos::ZERO, Pos::new(1, 0)]);
    }

    #[test]
    fn test_try_move_unknown_piece() {
        let grid = Grid::new(2, 2);
        assert!(grid.try_move(Pos::RIGHT, PieceId(42)).is_none());
    }

    #[test]
    fn test_contains() {
        let grid = Grid::new(3, 2);
        assert!(grid.contains(Pos::new(2, 1)));
        assert!(!grid.contains(Pos::new(3, 1)));
        assert!(!grid.contains(Pos::new(0, -1)));
    }

    fn dir_strategy() -> impl Strategy<Value = Pos> {
        prop_oneof![Just(Pos::LEFT), Just(Pos::RIGHT), Just(Pos::UP), Just(Pos::DOWN)]
    }

    fn shapes() -> [Shape; 4] {
        [
            Shape::new([Pos::ZERO]),
            domino_h(),
            Shape::new([Pos::ZERO, Pos::DOWN]),
            Shape::new([Pos::ZERO, Pos::RIGHT, Pos::DOWN, Pos::RIGHT + Pos::DOWN]),
        ]
    }

    /// A 6x6 board with mixed pieces; overlapping placements are skipped
    fn scattered(pieces: &[(i32, i32, usize)]) -> Grid {
        let shapes = shapes();
        let mut grid = Grid::new(6, 6);
        for &(x, y, kind) in pieces {
            let _ = grid.place(Pos::new(x, y), shapes[kind].clone());
        }
        grid
    }

    proptest! {
        #[test]
        fn prop_try_move_never_mutates(
            pieces in prop::collection::vec((0..6i32, 0..6i32, 0..4usize), 1..12),
            dir in dir_strategy(),
            pick in 0usize..12,
        ) {
            let grid = scattered(&pieces);
            let ids: Vec<PieceId> = grid.pieces().collect();
            let piece = ids[pick % ids.len()];
            let before = grid.clone();
            let _ = grid.try_move(dir, piece);
            prop_assert_eq!(grid, before);
        }

        #[test]
        fn prop_legal_move_shifts_only_the_mover(
            pieces in prop::collection::vec((0..6i32, 0..6i32, 0..4usize), 1..12),
            dir in dir_strategy(),
            pick in 0usize..12,
        ) {
            let grid = scattered(&pieces);
            let ids: Vec<PieceId> = grid.pieces().collect();
            let piece = ids[pick % ids.len()];
            if let Some(next) = grid.try_move(dir, piece) {
                let old = grid.origin(piece).unwrap();
                prop_assert_eq!(next.origin(piece), Some(old + dir));
                for &other in ids.iter().filter(|&&id| id != piece) {
                    prop_assert_eq!(next.origin(other), grid.origin(other));
                }
                let footprint: Vec<Pos> = grid.cells(piece).into_iter().chain(next.cells(piece)).collect();
                for x in -1..7 {
                    for y in -1..7 {
                        let pos = Pos::new(x, y);
                        if grid.piece_at(pos).is_none() && !footprint.contains(&pos) {
                            prop_assert_eq!(next.piece_at(pos), None);
                        }
                    }
                }
            }
        }
    }
}
