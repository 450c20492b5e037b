use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A point or displacement in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians.
    #[inline]
    #[must_use]
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    #[inline]
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline]
    #[must_use]
    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).length()
    }

    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Vec2) -> f64 {
        (self - other).length_squared()
    }

    /// Unit-length copy, or zero when the length is zero or not finite.
    #[must_use]
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            self / len
        } else {
            Self::ZERO
        }
    }

    /// Same heading with magnitude `mag`. Zero stays zero.
    #[must_use]
    pub fn with_length(self, mag: f64) -> Self {
        self.normalize_or_zero() * mag
    }

    /// Caps the magnitude at `max` without changing the heading.
    #[must_use]
    pub fn clamp_length_max(self, max: f64) -> Self {
        let len_sq = self.length_squared();
        if len_sq > max * max {
            self.with_length(max)
        } else {
            self
        }
    }

    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Wraps the point into `[0, width) x [0, height)`.
    #[must_use]
    pub fn wrap(self, width: f64, height: f64) -> Self {
        Self::new(wrap_axis(self.x, width), wrap_axis(self.y, height))
    }
}

// rem_euclid can round a tiny negative value up to exactly `extent`.
fn wrap_axis(v: f64, extent: f64) -> f64 {
    let w = v.rem_euclid(extent);
    if w >= extent {
        0.0
    } else {
        w
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn test_with_length() {
        let v = Vec2::new(3.0, 4.0).with_length(10.0);
        assert!((v.length() - 10.0).abs() < 1e-9);
        assert!((v.x - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_length_max_keeps_short_vectors() {
        let v = Vec2::new(0.3, 0.4);
        assert_eq!(v.clamp_length_max(1.0), v);
        assert!((Vec2::new(30.0, 40.0).clamp_length_max(1.0).length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_negative() {
        let v = Vec2::new(-1.0, 105.0).wrap(100.0, 100.0);
        assert_eq!(v, Vec2::new(99.0, 5.0));
    }
}
