//! Slide Blocks entry point
//!
//! Runs a scripted session against the reference board and prints the result.

use glam::Vec2;

use slide_blocks::consts::FRAME_MS;
use slide_blocks::drag::PointerEvent;
use slide_blocks::{Pos, Puzzle, Settings};

const LAYOUT: &str = "
#####
#nn.#
#.l.#
#.l.#
#####
";

/// Frames to wait for a gesture to settle before giving up
const MAX_FRAMES: usize = 600;

fn main() {
    env_logger::init();
    log::info!("Slide Blocks (native) starting...");

    let settings = Settings::load();
    let mut puzzle = match Puzzle::from_layout(LAYOUT, settings, 0x5eed)
        .and_then(|p| p.with_target('n', Pos::new(2, 1)))
    {
        Ok(puzzle) => puzzle,
        Err(e) => {
            log::error!("Failed to build puzzle: {e}");
            std::process::exit(1);
        }
    };

    println!("Start:\n{}\n", puzzle.render_text());

    // Push the 'l' into the bottom wall, then slide the 'n' onto its target
    let script = [(Pos::new(2, 3), Vec2::new(0.0, 45.0)), (Pos::new(1, 1), Vec2::new(45.0, 5.0))];
    for (cell, delta) in script {
        gesture(&mut puzzle, cell, delta);
        println!("After dragging {cell} by {delta}:\n{}\n", puzzle.render_text());
    }

    println!("Moves: {}  Solved: {}", puzzle.moves(), puzzle.is_solved());
}

/// Press inside `cell`, drag by `delta`, release, and run until the gesture ends
fn gesture(puzzle: &mut Puzzle, cell: Pos, delta: Vec2) {
    let press = (cell.as_vec2() + Vec2::splat(0.5)) * puzzle.settings().cell_size;
    puzzle.pointer(PointerEvent::Down(press));
    puzzle.pointer(PointerEvent::Move(press + delta));
    puzzle.pointer(PointerEvent::Up);

    let mut last = None;
    for frame in 0..MAX_FRAMES {
        puzzle.update(FRAME_MS);
        let state = puzzle.drag_state();
        if state != last {
            log::info!("Frame {frame}: {:?}", state);
            last = state;
        }
        if state.is_none() {
            return;
        }
    }
    log::warn!("Gesture did not settle within {MAX_FRAMES} frames");
}
