use std::f32::consts::{FRAC_PI_3, PI};

use crate::math::Vec2;

/// Angular width of the visible scene.
pub const FOV: f32 = FRAC_PI_3;
/// Distance from the viewpoint to the projection segment.
pub const NEAR_CLIP: f32 = 0.1;
/// Cells per second while a move intent is held.
pub const MOVE_SPEED: f32 = 2.0;
/// Radians per second while a turn intent is held.
pub const TURN_SPEED: f32 = PI;

/// Latched movement intents. Set on a non-repeat key-down edge, cleared
/// on the matching key-up edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intents {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// The single controllable viewpoint: a real-valued position and an
/// unbounded facing angle in radians.
pub struct Camera {
    pub pos: Vec2,
    pub dir: f32,
}

impl Camera {
    pub fn new(pos: Vec2, dir: f32) -> Camera {
        Camera { pos, dir }
    }

    /// Unit vector along the facing direction.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.dir.cos(), self.dir.sin())
    }

    /// Endpoints of the near-plane segment. Screen columns interpolate
    /// between these points, not between angles; that keeps the
    /// projection perspective-correct.
    pub fn near_plane(&self) -> (Vec2, Vec2) {
        let center = self.pos + self.forward() * NEAR_CLIP;
        let half_width = (FOV * 0.5).tan() * NEAR_CLIP;
        let perp = (center - self.pos).normalize().rot90();
        (center + perp * half_width, center - perp * half_width)
    }

    /// Explicit Euler step: velocity uses the direction at frame start,
    /// opposing intents cancel to zero.
    pub fn advance(&mut self, intents: &Intents, dt: f32) {
        let thrust = (intents.forward as i32 - intents.backward as i32) as f32;
        let spin = (intents.turn_right as i32 - intents.turn_left as i32) as f32;
        let velocity = self.forward() * (thrust * MOVE_SPEED);
        self.dir += spin * TURN_SPEED * dt;
        self.pos = self.pos + velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-4;

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < TOL
    }

    #[test]
    fn near_plane_segment_spans_the_frustum() {
        let cam = Camera::new(Vec2::new(3.0, 2.0), 0.7);
        let (left, right) = cam.near_plane();
        let expected_width = 2.0 * (FOV * 0.5).tan() * NEAR_CLIP;
        assert!((left.distance(right) - expected_width).abs() < TOL);
        // Segment is centered on the forward axis at the near distance.
        let mid = left.lerp(right, 0.5);
        assert!(close(mid, cam.pos + cam.forward() * NEAR_CLIP));
        // Both endpoints sit at the same distance from the viewpoint.
        assert!((cam.pos.distance(left) - cam.pos.distance(right)).abs() < TOL);
    }

    #[test]
    fn forward_intent_moves_along_the_facing_direction() {
        let mut cam = Camera::new(Vec2::new(1.0, 1.0), 1.0);
        let before = cam.pos;
        let heading = cam.forward();
        let intents = Intents {
            forward: true,
            ..Intents::default()
        };
        cam.advance(&intents, 0.1);
        assert!(close(cam.pos, before + heading * (MOVE_SPEED * 0.1)));
        assert!((cam.dir - 1.0).abs() < TOL);
    }

    #[test]
    fn opposing_move_intents_cancel() {
        let mut cam = Camera::new(Vec2::new(1.0, 1.0), 0.3);
        let before = cam.pos;
        let intents = Intents {
            forward: true,
            backward: true,
            ..Intents::default()
        };
        cam.advance(&intents, 0.25);
        assert!(close(cam.pos, before));
    }

    #[test]
    fn turn_intents_rotate_at_the_turn_rate() {
        let mut cam = Camera::new(Vec2::ZERO, 0.0);
        let intents = Intents {
            turn_right: true,
            ..Intents::default()
        };
        cam.advance(&intents, 0.5);
        assert!((cam.dir - TURN_SPEED * 0.5).abs() < TOL);

        let both = Intents {
            turn_left: true,
            turn_right: true,
            ..Intents::default()
        };
        let before = cam.dir;
        cam.advance(&both, 0.5);
        assert!((cam.dir - before).abs() < TOL);
    }

    #[test]
    fn zero_dt_leaves_the_camera_unchanged() {
        let mut cam = Camera::new(Vec2::new(2.0, 3.0), 0.9);
        let intents = Intents {
            forward: true,
            turn_left: true,
            ..Intents::default()
        };
        cam.advance(&intents, 0.0);
        assert!(close(cam.pos, Vec2::new(2.0, 3.0)));
        assert!((cam.dir - 0.9).abs() < TOL);
    }
}
