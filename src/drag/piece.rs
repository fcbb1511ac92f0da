//! Gesture driver
//!
//! Buffers pointer state and owns at most one live `DragState`, advancing it
//! once per frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::state::{DragState, DragStateType, Tick};
use super::{DragHooks, PointerEvent};
use crate::board::Pos;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct DragPiece {
    settings: Settings,
    /// Seeds the noise field of every shake
    rng: Pcg32,
    is_down: bool,
    /// Where the pointer went down, in world space
    press: Option<Vec2>,
    state: Option<DragState>,
}

impl DragPiece {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            rng: Pcg32::seed_from_u64(seed),
            is_down: false,
            press: None,
            state: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_down(&self) -> bool {
        self.is_down
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    pub fn state_type(&self) -> Option<DragStateType> {
        self.state.as_ref().map(DragState::kind)
    }

    /// Feed one pointer event
    ///
    /// A move with no live gesture asks the host whether the cell under the
    /// pointer can be dragged; a move during a gesture only reaches Begin.
    /// Releasing never cancels animation in flight.
    pub fn pointer<H: DragHooks + ?Sized>(&mut self, event: PointerEvent, hooks: &mut H) {
        match event {
            PointerEvent::Down(pos) => {
                self.is_down = true;
                self.press = Some(pos);
            }
            PointerEvent::Move(pos) => {
                let Some(press) = self.press else {
                    return;
                };
                if self.state.is_none() {
                    let cell = Pos::from_world(pos, self.settings.cell_size);
                    if !hooks.on_test_drag(cell) {
                        return;
                    }
                    self.state = Some(DragState::begin(press, hooks));
                }
                if let Some(state) = self.state.as_mut() {
                    state.drag_move(pos, &self.settings, &mut self.rng);
                }
            }
            PointerEvent::Up => {
                self.is_down = false;
                self.press = None;
            }
        }
    }

    /// Advance the live state by `dt` ms
    pub fn update<H: DragHooks + ?Sized>(&mut self, dt: f32, hooks: &mut H) {
        let Some(state) = self.state.take() else {
            return;
        };

        let mut tick = Tick {
            hooks: &mut *hooks,
            settings: &self.settings,
            rng: &mut self.rng,
            is_down: self.is_down,
        };
        self.state = state.update(dt, &mut tick);

        if self.state.is_none() {
            log::debug!("Gesture ended");
            hooks.on_end();
        }
    }
}
