//! Drag gesture state machine
//!
//! Turns raw pointer motion into a committed or rejected one-cell move:
//! - `Begin`: resolve the dominant axis, play an intent shake
//! - `SlideTest`: nudge toward the target cell, then ask the host
//! - `SlidePass`: slide through; repeat while the pointer stays down
//! - `SlideFail`: rejection shake and spring back
//!
//! The host observes and steers the gesture through `DragHooks`. All hooks
//! are called synchronously from `DragPiece::pointer` or `DragPiece::update`.

pub mod piece;
pub mod state;

pub use piece::DragPiece;
pub use state::{DragState, DragStateType, Gesture};

use glam::Vec2;

use crate::anim::Shake;
use crate::board::Pos;

/// Callbacks from the gesture machine to its host
pub trait DragHooks {
    /// The pointer landed on `cell`; return true to start a gesture there
    fn on_test_drag(&mut self, cell: Pos) -> bool;
    /// Attempt a one-cell move along the unit step `dir`; return legality
    fn on_test_move(&mut self, dir: Pos) -> bool;
    /// Relative offset of the dragged piece for this tick
    fn on_move(&mut self, x: f32, y: f32);
    /// Shake sample for this tick
    fn on_shake(&mut self, shake: &Shake);
    /// A state was entered; `origin` is where the gesture was pressed
    fn on_begin(&mut self, kind: DragStateType, origin: Vec2);
    /// The gesture finished
    fn on_end(&mut self);
    /// A slide passed; commit the tested move now
    fn on_pass(&mut self);
}

/// Pointer input, already mapped to world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}
