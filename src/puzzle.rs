//! Puzzle session
//!
//! Binds a `DragPiece` to a `GridBuilder`: the host answers the drag hooks
//! from the committed grid, holds the speculative grid between the legality
//! test and the pass, and commits it by rebinding the builder. After every
//! commit the win condition is checked against the new grid.

use glam::Vec2;

use crate::anim::Shake;
use crate::board::{Grid, GridBuilder, GridItem, LayoutError, PieceId, Pos};
use crate::drag::{DragHooks, DragPiece, DragStateType, PointerEvent};
use crate::settings::Settings;

/// Radians of tilt per unit of shake displacement
const SHAKE_TILT: f32 = 0.02;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("no piece tagged '{0}' to use as the target")]
    MissingTarget(char),
}

/// Win condition: a given piece resting at a given origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub piece: PieceId,
    pub cell: Pos,
}

impl Target {
    pub fn reached(&self, grid: &Grid) -> bool {
        grid.origin(self.piece) == Some(self.cell)
    }
}

/// Per-tick feedback for the piece being dragged
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub piece: Option<PieceId>,
    pub state: Option<DragStateType>,
    /// Offset from the piece's committed position, in world units
    pub offset: Vec2,
    pub shake: Vec2,
    pub rotation: f32,
}

/// Hook side of the session
#[derive(Debug, Clone)]
pub struct Host {
    builder: GridBuilder,
    dragged: Option<PieceId>,
    /// Result of the last legal `on_test_move`, committed on pass
    pending: Option<Grid>,
    target: Option<Target>,
    moves: u32,
    solved: bool,
    sample: Sample,
    shake_scale: f32,
}

impl Host {
    fn new(builder: GridBuilder, shake_scale: f32) -> Self {
        Self {
            builder,
            dragged: None,
            pending: None,
            target: None,
            moves: 0,
            solved: false,
            sample: Sample::default(),
            shake_scale,
        }
    }

    fn commit(&mut self, grid: Grid) {
        self.builder = std::mem::take(&mut self.builder).with_grid(grid);
        self.moves += 1;
        if let Some(piece) = self.dragged {
            log::info!(
                "Move {}: piece {:?} now at {:?}",
                self.moves,
                piece,
                self.builder.grid().origin(piece)
            );
        }

        if !self.solved && self.target.is_some_and(|t| t.reached(self.builder.grid())) {
            self.solved = true;
            log::info!("Puzzle solved in {} moves", self.moves);
        }
    }
}

impl DragHooks for Host {
    fn on_test_drag(&mut self, cell: Pos) -> bool {
        match self.builder.item_at(cell) {
            Some((id, item)) if !item.is_fixed() => {
                self.dragged = Some(id);
                self.sample.piece = Some(id);
                true
            }
            _ => false,
        }
    }

    fn on_test_move(&mut self, dir: Pos) -> bool {
        self.pending = None;
        let Some(piece) = self.dragged else {
            return false;
        };
        if dir == Pos::ZERO {
            return false;
        }

        let grid = self.builder.grid();
        self.pending = grid
            .try_move(dir, piece)
            .filter(|next| next.cells(piece).into_iter().all(|pos| grid.contains(pos)));
        self.pending.is_some()
    }

    fn on_move(&mut self, x: f32, y: f32) {
        self.sample.offset = Vec2::new(x, y);
    }

    fn on_shake(&mut self, shake: &Shake) {
        self.sample.shake = shake.value() * self.shake_scale;
        self.sample.rotation = self.sample.shake.x * SHAKE_TILT;
    }

    fn on_begin(&mut self, kind: DragStateType, _origin: Vec2) {
        self.sample.state = Some(kind);
        self.sample.shake = Vec2::ZERO;
        self.sample.rotation = 0.0;
    }

    fn on_end(&mut self) {
        self.dragged = None;
        self.pending = None;
        self.sample = Sample::default();
    }

    fn on_pass(&mut self) {
        if let Some(grid) = self.pending.take() {
            self.commit(grid);
        }
        // The piece now rests on its new origin
        self.sample.offset = Vec2::ZERO;
    }
}

/// A playable board driven by pointer input and a frame clock
#[derive(Debug, Clone)]
pub struct Puzzle {
    drag: DragPiece,
    host: Host,
}

impl Puzzle {
    pub fn new(builder: GridBuilder, settings: Settings, seed: u64) -> Self {
        let host = Host::new(builder, settings.effective_shake_scale());
        Self {
            drag: DragPiece::new(settings, seed),
            host,
        }
    }

    pub fn from_layout(text: &str, settings: Settings, seed: u64) -> Result<Self, PuzzleError> {
        Ok(Self::new(GridBuilder::from_layout(text)?, settings, seed))
    }

    /// Solve by bringing the first piece tagged `tag` to origin `cell`
    pub fn with_target(mut self, tag: char, cell: Pos) -> Result<Self, PuzzleError> {
        let piece = self
            .host
            .builder
            .find(tag)
            .ok_or(PuzzleError::MissingTarget(tag))?;
        self.host.target = Some(Target { piece, cell });
        Ok(self)
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        self.drag.pointer(event, &mut self.host);
    }

    pub fn update(&mut self, dt: f32) {
        self.drag.update(dt, &mut self.host);
    }

    pub fn settings(&self) -> &Settings {
        self.drag.settings()
    }

    pub fn builder(&self) -> &GridBuilder {
        &self.host.builder
    }

    pub fn grid(&self) -> &Grid {
        self.host.builder.grid()
    }

    /// Every piece with its metadata and current cells
    pub fn bodies(&self) -> Vec<(PieceId, &GridItem, Vec<Pos>)> {
        self.host.builder.bodies()
    }

    pub fn sample(&self) -> &Sample {
        &self.host.sample
    }

    pub fn target(&self) -> Option<Target> {
        self.host.target
    }

    pub fn moves(&self) -> u32 {
        self.host.moves
    }

    pub fn is_solved(&self) -> bool {
        self.host.solved
    }

    pub fn drag_state(&self) -> Option<DragStateType> {
        self.drag.state_type()
    }

    /// Text picture of the committed board, `.` for empty cells
    pub fn render_text(&self) -> String {
        let grid = self.grid();
        (0..grid.height())
            .map(|y| {
                (0..grid.width())
                    .map(|x| {
                        self.host
                            .builder
                            .item_at(Pos::new(x, y))
                            .map_or('.', |(_, item)| item.tag)
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
