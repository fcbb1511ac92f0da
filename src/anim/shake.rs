//! Procedural shake
//!
//! A sine oscillation along a biased direction, perturbed by a 2D noise field
//! sampled on the unit circle, and faded linearly to zero.

use glam::Vec2;
use noise::{NoiseFn, Perlin};

use crate::consts::SHAKE_NOISE_SCALE;

#[derive(Debug, Clone)]
pub struct Shake {
    /// Peak amplitude
    max: f32,
    /// Angular speed of the oscillation (radians per ms)
    speed: f32,
    /// Bias direction the noise is added to
    direction: Vec2,
    max_fade: f32,
    life: f32,
    fade: f32,
    value: Vec2,
    noise: Perlin,
}

impl Shake {
    pub fn new(max: f32, speed: f32, direction: Vec2, max_fade: f32, noise: Perlin) -> Self {
        Self {
            max,
            speed,
            direction,
            max_fade,
            life: 0.0,
            fade: max_fade,
            value: Vec2::ZERO,
            noise,
        }
    }

    pub fn value(&self) -> Vec2 {
        self.value
    }

    pub fn x(&self) -> f32 {
        self.value.x
    }

    pub fn y(&self) -> f32 {
        self.value.y
    }

    /// True once the fade clock has run out
    pub fn completed(&self) -> bool {
        self.fade == 0.0
    }

    pub fn update(&mut self, dt: f32) {
        self.life += dt;
        self.fade = (self.fade - dt).max(0.0);

        let osc = (self.speed * self.life).sin();
        let (sin, cos) = self.life.sin_cos();
        let wobble = Vec2::new(self.sample(cos, sin), self.sample(sin, cos));
        let direction = self.direction + wobble * SHAKE_NOISE_SCALE;

        let envelope = if self.max_fade > 0.0 {
            self.fade / self.max_fade
        } else {
            0.0
        };
        self.value = direction * (osc * self.max * envelope);
    }

    fn sample(&self, x: f32, y: f32) -> f32 {
        self.noise.get([x as f64, y as f64]) as f32
    }
}
