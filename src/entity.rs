use crate::vector::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Prey,
    Predator,
}

/// Rectangle the entities live in. Coordinates wrap at the edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Bounds { width, height }
    }

    /// Teleport wrap: past the far edge goes to 0, below 0 goes to the far edge.
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

fn wrap_axis(v: f64, bound: f64) -> f64 {
    if v > bound {
        0.0
    } else if v < 0.0 {
        bound
    } else {
        v
    }
}

/// State shared by prey and predators.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    /// Units per tick
    pub velocity: Vec2,
    pub size: f64,
    /// World clock, seconds
    pub born_at: f64,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2, size: f64, born_at: f64) -> Self {
        Body {
            position,
            velocity,
            size,
            born_at,
        }
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.born_at
    }

    /// Moves by one tick of velocity and wraps. Not scaled by frame time.
    pub fn integrate(&mut self, bounds: Bounds) {
        self.position += self.velocity;
        self.position = bounds.wrap(self.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_past_far_edge_to_zero() {
        let bounds = Bounds::new(100.0, 50.0);
        assert_eq!(bounds.wrap(Vec2::new(100.5, 51.0)), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn wraps_below_zero_to_far_edge() {
        let bounds = Bounds::new(100.0, 50.0);
        assert_eq!(bounds.wrap(Vec2::new(-0.1, -3.0)), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn edge_values_are_kept() {
        let bounds = Bounds::new(100.0, 50.0);
        assert_eq!(bounds.wrap(Vec2::new(100.0, 0.0)), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn integrate_moves_one_step_per_call() {
        let mut body = Body::new(Vec2::new(10.0, 10.0), Vec2::new(2.0, -1.0), 5.0, 0.0);
        body.integrate(Bounds::new(100.0, 100.0));
        body.integrate(Bounds::new(100.0, 100.0));
        assert_eq!(body.position, Vec2::new(14.0, 8.0));
    }

    #[test]
    fn integrate_stays_in_bounds() {
        let bounds = Bounds::new(20.0, 20.0);
        let mut body = Body::new(Vec2::new(19.0, 1.0), Vec2::new(7.3, -4.1), 5.0, 0.0);
        for _ in 0..500 {
            body.integrate(bounds);
            assert!(bounds.contains(body.position), "{:?}", body.position);
        }
    }
}
