//! Integer grid coordinates
//!
//! Cells are addressed with y growing downward, matching layout rows.

use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use glam::{IVec2, Vec2};

/// A cell coordinate on the puzzle grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

/// Failure to parse a `"x;y"` cell key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PosKeyError {
    #[error("cell key {0:?} is missing the ';' separator")]
    MissingSeparator(String),

    #[error("cell key {key:?} has a non-integer component")]
    BadComponent { key: String },
}

impl Pos {
    pub const ZERO: Pos = Pos::new(0, 0);
    pub const LEFT: Pos = Pos::new(-1, 0);
    pub const RIGHT: Pos = Pos::new(1, 0);
    pub const UP: Pos = Pos::new(0, -1);
    pub const DOWN: Pos = Pos::new(0, 1);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Canonical map key, `"x;y"`
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// The four orthogonal neighbours: up, down, left, right
    pub fn neighbours(&self) -> [Pos; 4] {
        [Pos::UP, Pos::DOWN, Pos::LEFT, Pos::RIGHT].map(|d| *self + d)
    }

    /// Component-wise sign, used to turn a drag delta into a unit step
    pub fn signum(&self) -> Pos {
        Pos::new(self.x.signum(), self.y.signum())
    }

    /// Cell containing a world-space point, given the cell edge length
    pub fn from_world(v: Vec2, cell: f32) -> Self {
        let cell = (v / cell).floor();
        Pos::new(cell.x as i32, cell.y as i32)
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.x, self.y)
    }
}

impl FromStr for Pos {
    type Err = PosKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(';')
            .ok_or_else(|| PosKeyError::MissingSeparator(s.to_string()))?;
        let bad = || PosKeyError::BadComponent { key: s.to_string() };
        Ok(Pos::new(
            x.trim().parse().map_err(|_| bad())?,
            y.trim().parse().map_err(|_| bad())?,
        ))
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Pos {
    type Output = Pos;

    fn neg(self) -> Pos {
        Pos::new(-self.x, -self.y)
    }
}

impl From<IVec2> for Pos {
    fn from(v: IVec2) -> Self {
        Pos::new(v.x, v.y)
    }
}

impl From<Pos> for IVec2 {
    fn from(p: Pos) -> Self {
        IVec2::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        let p = Pos::new(-3, 12);
        assert_eq!(p.key(), "-3;12");
        assert_eq!("-3;12".parse::<Pos>(), Ok(p));
    }

    #[test]
    fn test_key_rejects_garbage() {
        assert!(matches!("3".parse::<Pos>(), Err(PosKeyError::MissingSeparator(_))));
        assert!(matches!("a;1".parse::<Pos>(), Err(PosKeyError::BadComponent { .. })));
    }

    #[test]
    fn test_neighbours() {
        let n = Pos::new(2, 2).neighbours();
        assert_eq!(n, [Pos::new(2, 1), Pos::new(2, 3), Pos::new(1, 2), Pos::new(3, 2)]);
    }

    #[test]
    fn test_from_world_floors() {
        assert_eq!(Pos::from_world(Vec2::new(150.0, 99.9), 100.0), Pos::new(1, 0));
        assert_eq!(Pos::from_world(Vec2::new(-1.0, 0.0), 100.0), Pos::new(-1, 0));
    }

    #[test]
    fn test_signum() {
        assert_eq!(Pos::new(-40, 0).signum(), Pos::LEFT);
        assert_eq!(Pos::new(0, 7).signum(), Pos::DOWN);
    }
}
