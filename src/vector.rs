use std::ops::{Add, AddAssign, Mul, Sub};

/// Position or velocity in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).magnitude()
    }

    /// Rescales to length `m`. A zero-length vector stays zero.
    pub fn set_magnitude(self, m: f64) -> Vec2 {
        let len = self.magnitude();
        if len == 0.0 || !len.is_finite() {
            return Vec2::ZERO;
        }
        self * (m / len)
    }

    /// Clamps the length to `max`, keeping direction.
    pub fn limit(self, max: f64) -> Vec2 {
        if self.magnitude() > max {
            self.set_magnitude(max)
        } else {
            self
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_magnitude_of_zero_is_zero() {
        let v = Vec2::ZERO.set_magnitude(0.5);
        assert_eq!(v, Vec2::ZERO);
        assert!(!v.x.is_nan() && !v.y.is_nan());
    }

    #[test]
    fn set_magnitude_keeps_direction() {
        let v = Vec2::new(3.0, 4.0).set_magnitude(10.0);
        assert!((v.x - 6.0).abs() < 1e-9);
        assert!((v.y - 8.0).abs() < 1e-9);
    }

    #[test]
    fn limit_only_shrinks() {
        let short = Vec2::new(0.3, 0.4);
        assert_eq!(short.limit(1.0), short);

        let long = Vec2::new(30.0, 40.0).limit(2.0);
        assert!((long.magnitude() - 2.0).abs() < 1e-9);
        assert!(long.x > 0.0 && long.y > 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }
}
