//! Keyframe tween
//!
//! Walks a list of scalar keyframes one segment at a time, easing within
//! each segment. A looping tween reverses its keyframes when it reaches the
//! end and plays back, ping-pong style.

use super::{ease, lerp};

#[derive(Debug, Clone)]
pub struct Tween {
    values: Vec<f32>,
    /// One shared segment duration; reversed alongside `values` when looping
    durations: Vec<f32>,
    looping: bool,
    segment: usize,
    elapsed: f32,
    value: f32,
    completed: bool,
}

impl Tween {
    /// One-shot tween over `values`, spending `duration` ms per segment
    ///
    /// # Panics
    /// If fewer than two keyframes are given.
    pub fn new(values: impl Into<Vec<f32>>, duration: f32) -> Self {
        Self::make(values.into(), duration, false)
    }

    /// Ping-pong tween that never completes on its own
    pub fn looping(values: impl Into<Vec<f32>>, duration: f32) -> Self {
        Self::make(values.into(), duration, true)
    }

    fn make(values: Vec<f32>, duration: f32, looping: bool) -> Self {
        assert!(values.len() >= 2, "a tween needs at least two keyframes");
        let value = values[0];
        Self {
            values,
            durations: vec![duration],
            looping,
            segment: 0,
            elapsed: 0.0,
            value,
            completed: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Normalized progress through the current segment
    pub fn progress(&self) -> f32 {
        let duration = self.durations[self.segment % self.durations.len()];
        (self.elapsed / duration).min(1.0)
    }

    /// Jump to the final keyframe and stop
    pub fn complete_now(&mut self) {
        if let Some(&last) = self.values.last() {
            self.value = last;
        }
        self.completed = true;
    }

    pub fn update(&mut self, dt: f32) {
        if self.completed {
            return;
        }

        self.elapsed += dt;
        let from = self.values[self.segment];
        let to = self.values[self.segment + 1];
        let i = self.progress();
        self.value = lerp(from, to, ease(i));

        if i >= 1.0 {
            self.segment += 1;
            self.elapsed = 0.0;
            if self.segment >= self.values.len() - 1 {
                if self.looping {
                    self.segment = 0;
                    self.values.reverse();
                    self.durations.reverse();
                } else {
                    self.completed = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seeded_with_first_keyframe() {
        let tween = Tween::new([0.3, 0.8, 1.0, 1.0], 80.0);
        assert_eq!(tween.value(), 0.3);
        assert!(!tween.completed());
    }

    #[test]
    fn test_single_large_step_completes() {
        let mut tween = Tween::new([2.0, 5.0], 100.0);
        tween.update(100.0);
        assert!(tween.completed());
        assert_eq!(tween.value(), 5.0);
    }

    #[test]
    fn test_two_half_steps() {
        let mut tween = Tween::new([0.0, 1.0], 100.0);
        tween.update(50.0);
        assert!(!tween.completed());
        assert!(tween.value() > 0.0 && tween.value() < 1.0);
        tween.update(50.0);
        assert!(tween.completed());
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn test_segments_advance_in_order() {
        let mut tween = Tween::new([1.0, 1.0, 0.0], 10.0);
        tween.update(10.0);
        assert!(!tween.completed());
        assert_eq!(tween.value(), 1.0);
        tween.update(5.0);
        assert!((tween.value() - 0.5).abs() < 1e-6);
        tween.update(5.0);
        assert!(tween.completed());
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_completed_is_sticky() {
        let mut tween = Tween::new([0.0, 1.0], 10.0);
        tween.update(20.0);
        tween.update(20.0);
        assert!(tween.completed());
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn test_complete_now() {
        let mut tween = Tween::new([0.0, 4.0, 9.0], 100.0);
        tween.update(10.0);
        tween.complete_now();
        assert!(tween.completed());
        assert_eq!(tween.value(), 9.0);
        tween.update(10.0);
        assert_eq!(tween.value(), 9.0);
    }

    #[test]
    fn test_looping_ping_pong() {
        let mut tween = Tween::looping([0.0, 10.0], 50.0);
        tween.update(50.0);
        assert_eq!(tween.value(), 10.0);
        assert!(!tween.completed());
        tween.update(25.0);
        assert!(tween.value() < 10.0 && tween.value() > 0.0);
        tween.update(25.0);
        assert_eq!(tween.value(), 0.0);
        assert!(!tween.completed());
    }

    #[test]
    #[should_panic]
    fn test_single_keyframe_rejected() {
        let _ = Tween::new([1.0], 10.0);
    }

    proptest! {
        #[test]
        fn prop_interior_strictly_between_endpoints(
            a in -100.0f32..100.0,
            gap in 1.0f32..100.0,
            duration in 10.0f32..500.0,
            frac in 0.05f32..0.95,
        ) {
            let b = a + gap;
            let mut tween = Tween::new([a, b], duration);
            tween.update(duration * frac);
            prop_assert!(!tween.completed());
            prop_assert!(tween.value() > a && tween.value() < b);
            tween.update(duration);
            prop_assert!(tween.completed());
            prop_assert_eq!(tween.value(), b);
        }
    }
}
