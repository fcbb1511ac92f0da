//! Drag states
//!
//! Each state owns its own tween and shake and carries the `Gesture` it was
//! spawned from. `update` consumes the state and returns the next one, or
//! `None` once the gesture is over.

use glam::Vec2;
use noise::Perlin;
use rand::Rng;
use rand_pcg::Pcg32;

use super::DragHooks;
use crate::anim::{Shake, Tween};
use crate::board::Pos;
use crate::clamp_offset;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragStateType {
    Begin,
    SlideTest,
    SlidePass,
    SlideFail,
}

/// Press point and the drag resolved onto its dominant axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub origin: Vec2,
    /// Horizontal drag, positive to the right; zero when vertical won
    pub h: f32,
    /// Vertical drag, positive downward; zero when horizontal won
    pub v: f32,
}

impl Gesture {
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            h: 0.0,
            v: 0.0,
        }
    }

    /// Project the drag to `pointer` onto the left and up axes and keep the
    /// larger one. Returns the unit bias for the intent shake.
    ///
    /// Ties go vertical: horizontal wins only on a strict majority.
    pub fn track(&mut self, pointer: Vec2) -> Vec2 {
        let delta = self.origin - pointer;
        let h = delta.dot(Vec2::NEG_X);
        let v = delta.dot(Vec2::NEG_Y);

        if h.abs() > v.abs() {
            self.h = h;
            self.v = 0.0;
            Vec2::NEG_X * sign(h)
        } else {
            self.v = v;
            self.h = 0.0;
            Vec2::NEG_Y * sign(v)
        }
    }

    /// Unit grid step along the drag
    pub fn step(&self) -> Pos {
        Pos::new(sign(self.h) as i32, sign(self.v) as i32)
    }
}

/// Sign with zero mapping to zero (unlike `f32::signum`)
fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Everything a state may touch during one update
pub(crate) struct Tick<'a, H: DragHooks + ?Sized> {
    pub hooks: &'a mut H,
    pub settings: &'a Settings,
    pub rng: &'a mut Pcg32,
    /// Live pointer state; only a passing slide consults it
    pub is_down: bool,
}

fn make_shake(rng: &mut Pcg32, max: f32, speed: f32, direction: Vec2, fade: f32) -> Shake {
    Shake::new(max, speed, direction, fade, Perlin::new(rng.random()))
}

#[derive(Debug, Clone)]
pub struct Begin {
    gesture: Gesture,
    /// Raised by the first pointer move, never replaced
    shake: Option<Shake>,
}

#[derive(Debug, Clone)]
pub struct SlideTest {
    gesture: Gesture,
    tween: Tween,
}

#[derive(Debug, Clone)]
pub struct SlidePass {
    gesture: Gesture,
    tween: Tween,
}

#[derive(Debug, Clone)]
pub struct SlideFail {
    gesture: Gesture,
    tween: Tween,
    shake: Shake,
}

#[derive(Debug, Clone)]
pub enum DragState {
    Begin(Begin),
    SlideTest(SlideTest),
    SlidePass(SlidePass),
    SlideFail(SlideFail),
}

impl DragState {
    pub fn kind(&self) -> DragStateType {
        match self {
            DragState::Begin(_) => DragStateType::Begin,
            DragState::SlideTest(_) => DragStateType::SlideTest,
            DragState::SlidePass(_) => DragStateType::SlidePass,
            DragState::SlideFail(_) => DragStateType::SlideFail,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        match self {
            DragState::Begin(s) => &s.gesture,
            DragState::SlideTest(s) => &s.gesture,
            DragState::SlidePass(s) => &s.gesture,
            DragState::SlideFail(s) => &s.gesture,
        }
    }

    /// Start a gesture pressed at `origin`
    pub(crate) fn begin<H: DragHooks + ?Sized>(origin: Vec2, hooks: &mut H) -> Self {
        DragState::Begin(Begin {
            gesture: Gesture::new(origin),
            shake: None,
        })
        .enter(hooks)
    }

    fn enter<H: DragHooks + ?Sized>(self, hooks: &mut H) -> Self {
        log::debug!("Drag state -> {:?}", self.kind());
        hooks.on_begin(self.kind(), self.gesture().origin);
        self
    }

    /// Feed a pointer move; only Begin listens
    pub(crate) fn drag_move(&mut self, pointer: Vec2, settings: &Settings, rng: &mut Pcg32) {
        if let DragState::Begin(begin) = self {
            let bias = begin.gesture.track(pointer);
            if begin.shake.is_none() {
                begin.shake = Some(make_shake(
                    rng,
                    1.0,
                    settings.shake_speed,
                    bias * settings.begin_shake_bias,
                    settings.begin_shake_ms,
                ));
            }
        }
    }

    pub(crate) fn update<H: DragHooks + ?Sized>(self, dt: f32, tick: &mut Tick<'_, H>) -> Option<DragState> {
        match self {
            DragState::Begin(s) => s.update(dt, tick),
            DragState::SlideTest(s) => s.update(dt, tick),
            DragState::SlidePass(s) => s.update(dt, tick),
            DragState::SlideFail(s) => s.update(dt, tick),
        }
    }
}

impl Begin {
    fn update<H: DragHooks + ?Sized>(mut self, dt: f32, tick: &mut Tick<'_, H>) -> Option<DragState> {
        let done = match self.shake.as_mut() {
            Some(shake) => {
                shake.update(dt);
                tick.hooks.on_shake(shake);
                shake.completed()
            }
            // No motion yet
            None => false,
        };

        if done {
            Some(SlideTest::enter(self.gesture, tick))
        } else {
            Some(DragState::Begin(self))
        }
    }
}

impl SlideTest {
    fn enter<H: DragHooks + ?Sized>(gesture: Gesture, tick: &mut Tick<'_, H>) -> DragState {
        DragState::SlideTest(SlideTest {
            gesture,
            tween: Tween::new([0.0, 1.0], tick.settings.slide_test_ms),
        })
        .enter(tick.hooks)
    }

    fn update<H: DragHooks + ?Sized>(mut self, dt: f32, tick: &mut Tick<'_, H>) -> Option<DragState> {
        self.tween.update(dt);
        let t = self.tween.value();
        let (x, y) = clamp_offset(self.gesture.h * t, self.gesture.v * t, tick.settings.test_clamp);
        tick.hooks.on_move(x, y);

        if !self.tween.completed() {
            return Some(DragState::SlideTest(self));
        }
        if tick.hooks.on_test_move(self.gesture.step()) {
            Some(SlidePass::enter(self.gesture, tick))
        } else {
            Some(SlideFail::enter(self.gesture, tick))
        }
    }
}

impl SlidePass {
    fn enter<H: DragHooks + ?Sized>(gesture: Gesture, tick: &mut Tick<'_, H>) -> DragState {
        DragState::SlidePass(SlidePass {
            gesture,
            tween: Tween::new([0.3, 0.8, 1.0, 1.0], tick.settings.slide_pass_ms),
        })
        .enter(tick.hooks)
    }

    fn update<H: DragHooks + ?Sized>(mut self, dt: f32, tick: &mut Tick<'_, H>) -> Option<DragState> {
        self.tween.update(dt);

        if !self.tween.completed() {
            let t = self.tween.value();
            let limit = tick.settings.pass_clamp;
            let (x, y) = clamp_offset(
                limit * sign(self.gesture.h) * t,
                limit * sign(self.gesture.v) * t,
                limit,
            );
            tick.hooks.on_move(x, y);
            return Some(DragState::SlidePass(self));
        }

        tick.hooks.on_pass();
        if tick.is_down {
            Some(SlideTest::enter(self.gesture, tick))
        } else {
            None
        }
    }
}

impl SlideFail {
    fn enter<H: DragHooks + ?Sized>(gesture: Gesture, tick: &mut Tick<'_, H>) -> DragState {
        let settings = tick.settings;
        let shake = make_shake(
            tick.rng,
            settings.fail_shake_amplitude,
            settings.shake_speed,
            Vec2::NEG_X,
            settings.slide_fail_ms,
        );
        DragState::SlideFail(SlideFail {
            gesture,
            tween: Tween::new([1.0, 1.0, 0.0], settings.slide_fail_ms),
            shake,
        })
        .enter(tick.hooks)
    }

    fn update<H: DragHooks + ?Sized>(mut self, dt: f32, tick: &mut Tick<'_, H>) -> Option<DragState> {
        self.shake.update(dt);
        self.tween.update(dt);

        if !self.shake.completed() {
            tick.hooks.on_shake(&self.shake);
        }

        if self.tween.completed() {
            return None;
        }
        let t = self.tween.value();
        let (x, y) = clamp_offset(self.gesture.h * t, self.gesture.v * t, tick.settings.test_clamp);
        tick.hooks.on_move(x, y);
        Some(DragState::SlideFail(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_horizontal_majority() {
        let mut g = Gesture::new(Vec2::new(150.0, 150.0));
        let bias = g.track(Vec2::new(190.0, 160.0));
        assert_eq!((g.h, g.v), (40.0, 0.0));
        assert_eq!(g.step(), Pos::RIGHT);
        assert_eq!(bias, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_track_vertical() {
        let mut g = Gesture::new(Vec2::new(150.0, 150.0));
        g.track(Vec2::new(140.0, 90.0));
        assert_eq!((g.h, g.v), (0.0, -60.0));
        assert_eq!(g.step(), Pos::UP);
    }

    #[test]
    fn test_track_diagonal_tie_goes_vertical() {
        let mut g = Gesture::new(Vec2::ZERO);
        g.track(Vec2::new(-25.0, 25.0));
        assert_eq!((g.h, g.v), (0.0, 25.0));
        assert_eq!(g.step(), Pos::DOWN);
    }

    #[test]
    fn test_track_follows_latest_move() {
        let mut g = Gesture::new(Vec2::ZERO);
        g.track(Vec2::new(30.0, 0.0));
        g.track(Vec2::new(0.0, -50.0));
        assert_eq!(g.step(), Pos::UP);
        assert_eq!(g.h, 0.0);
    }

    #[test]
    fn test_sign_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(-3.0), -1.0);
    }
}
