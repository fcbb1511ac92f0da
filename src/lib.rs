//! Slide Blocks - a sliding-block puzzle engine
//!
//! Core modules:
//! - `board`: Grid occupancy model, piece shapes and layout parsing
//! - `anim`: Keyframe tweens and procedural shake feedback
//! - `drag`: Pointer gesture state machine (begin, test, pass, fail)
//! - `puzzle`: Host session wiring the drag hooks to the board
//! - `settings`: Data-driven feedback tuning

pub mod anim;
pub mod board;
pub mod drag;
pub mod puzzle;
pub mod settings;

pub use board::{Grid, GridBuilder, GridItem, PieceId, Pos};
pub use puzzle::Puzzle;
pub use settings::Settings;

/// Timing and feedback constants
///
/// All durations are in milliseconds at a nominal 60 Hz frame.
pub mod consts {
    /// One frame at 60 Hz
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Frame-count durations used by the animation phases
    pub mod ticks {
        use super::FRAME_MS;

        pub const SECONDS: f32 = 60.0 * FRAME_MS;
        pub const HALF: f32 = 30.0 * FRAME_MS;
        pub const THIRDS: f32 = 20.0 * FRAME_MS;
        pub const LENGTHS: f32 = 15.0 * FRAME_MS;
        pub const SIXTH: f32 = 10.0 * FRAME_MS;
        pub const FIVE: f32 = 5.0 * FRAME_MS;
        pub const THREE: f32 = 3.0 * FRAME_MS;
        pub const ONE: f32 = FRAME_MS;
    }

    /// World units per grid cell
    pub const CELL_SIZE: f32 = 100.0;

    /// Offset clamp while testing or rejecting a slide
    pub const TEST_CLAMP: f32 = 30.0;
    /// Offset clamp while a slide is passing
    pub const PASS_CLAMP: f32 = 100.0;

    /// Bias length of the intent shake raised in Begin
    pub const BEGIN_SHAKE_BIAS: f32 = 2.0;
    /// Amplitude of the rejection shake raised in SlideFail
    pub const FAIL_SHAKE_AMPLITUDE: f32 = 3.0;
    /// Scale applied to the noise sample inside a shake
    pub const SHAKE_NOISE_SCALE: f32 = 2.0;
}

/// Clamp both components of an offset to `[-limit, limit]`
#[inline]
pub fn clamp_offset(x: f32, y: f32, limit: f32) -> (f32, f32) {
    (x.clamp(-limit, limit), y.clamp(-limit, limit))
}
