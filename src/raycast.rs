use crate::math::{Color, Vec2};
use crate::scene::{Cell, Scene};

/// Rays past this distance from their origin give up and report a miss.
pub const FAR_CLIP: f32 = 10.0;

/// Bias applied before snapping to a grid line, so that rounding noise
/// cannot return the boundary we are already standing on.
const EPS: f32 = 1e-4;

/// Outcome of walking a ray through the grid. `Miss` carries the last
/// point reached so callers can still draw or inspect the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cast {
    Hit {
        point: Vec2,
        row: usize,
        col: usize,
        color: Color,
    },
    Miss {
        point: Vec2,
    },
}

#[inline]
fn snap(v: f32, delta: f32) -> f32 {
    if delta > 0.0 {
        (v + EPS).ceil()
    } else {
        (v - EPS).floor()
    }
}

/// Next point where the ray through `p1` and `p2` crosses an integer
/// grid line, `p2` being further along the travel direction than `p1`.
///
/// A degenerate zero-length ray returns `p2` unchanged; callers must not
/// rely on that making progress.
pub fn next_crossing(p1: Vec2, p2: Vec2) -> Vec2 {
    let delta = p2 - p1;
    if delta.x == 0.0 {
        if delta.y == 0.0 {
            return p2;
        }
        // Vertical ray: only horizontal grid lines ahead.
        return Vec2::new(p2.x, snap(p2.y, delta.y));
    }

    let k = delta.y / delta.x;
    let c = p1.y - k * p1.x;

    // Candidate A: snap x, derive y from the line equation.
    let ax = snap(p2.x, delta.x);
    let a = Vec2::new(ax, k * ax + c);
    if k == 0.0 {
        return a;
    }

    // Candidate B: snap y, derive x. Ties go to A.
    let by = snap(p2.y, delta.y);
    let b = Vec2::new((by - c) / k, by);
    if b.distance_sq(p2) < a.distance_sq(p2) { b } else { a }
}

/// Cell containing `p` while travelling along `delta`. The column index
/// is nudged past the boundary in the travel direction so a crossing
/// point counts toward the cell being entered; rows resolve by plain
/// floor.
fn cell_index(p: Vec2, delta: Vec2) -> (isize, isize) {
    let col = if delta.y > 0.0 {
        p.y + EPS
    } else if delta.y < 0.0 {
        p.y - EPS
    } else {
        p.y
    };
    (p.x.floor() as isize, col.floor() as isize)
}

/// Walk from `origin` toward `towards`, crossing one grid line per step,
/// until a wall cell is entered or the far clip distance is exceeded.
/// Out-of-bounds cells never hit; the ray just keeps going.
pub fn cast_ray(scene: &Scene, origin: Vec2, towards: Vec2) -> Cast {
    let mut p1 = origin;
    let mut p2 = towards;
    // One grid line per step bounds the walk: a ray inside the far clip
    // crosses at most 2 * FAR_CLIP of them.
    let cap = (2.0 * FAR_CLIP) as usize + 4;
    for _ in 0..cap {
        let (row, col) = cell_index(p2, p2 - p1);
        if let Some(Cell::Wall(color)) = scene.cell(row, col) {
            return Cast::Hit {
                point: p2,
                row: row as usize,
                col: col as usize,
                color,
            };
        }
        if origin.distance_sq(p1) > FAR_CLIP * FAR_CLIP {
            return Cast::Miss { point: p2 };
        }
        let next = next_crossing(p1, p2);
        p1 = p2;
        p2 = next;
    }
    Cast::Miss { point: p2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::starter_scene;
    use pretty_assertions::assert_eq;
    use std::f32::consts::FRAC_PI_4;

    const TOL: f32 = 1e-3;

    fn near_integer(v: f32) -> bool {
        (v - v.round()).abs() < 2.0 * EPS
    }

    #[test]
    fn crossing_lands_on_exactly_one_grid_line() {
        let cases = [
            (Vec2::new(0.2, 0.2), Vec2::new(0.6, 0.4)),
            (Vec2::new(5.0, 3.0), Vec2::new(4.6, 2.1)),
            (Vec2::new(0.5, 0.2), Vec2::new(0.5, 0.7)),
            (Vec2::new(0.2, 0.5), Vec2::new(0.7, 0.5)),
        ];
        for (p1, p2) in cases {
            let next = next_crossing(p1, p2);
            assert!(next != p2, "stalled at {p2:?}");
            assert!(
                near_integer(next.x) || near_integer(next.y),
                "no grid line at {next:?}"
            );
            // Still moving the same way.
            assert!((next - p2).dot(p2 - p1) > 0.0);
        }
    }

    #[test]
    fn slope_half_snaps_x_first() {
        let next = next_crossing(Vec2::new(0.2, 0.2), Vec2::new(0.6, 0.4));
        assert!((next.x - 1.0).abs() < TOL);
        assert!((next.y - 0.6).abs() < TOL);
    }

    #[test]
    fn vertical_ray_snaps_y_only() {
        let up = next_crossing(Vec2::new(0.5, 0.2), Vec2::new(0.5, 0.7));
        assert_eq!(up, Vec2::new(0.5, 1.0));
        let down = next_crossing(Vec2::new(0.5, 0.7), Vec2::new(0.5, 0.2));
        assert_eq!(down, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn zero_length_ray_returns_p2() {
        let p = Vec2::new(1.3, 2.7);
        assert_eq!(next_crossing(p, p), p);
    }

    #[test]
    fn repeated_stepping_never_stalls() {
        let mut p1 = Vec2::new(0.1, 0.1);
        let mut p2 = Vec2::new(0.35, 0.3);
        let dir = p2 - p1;
        for _ in 0..20 {
            let next = next_crossing(p1, p2);
            assert!((next - p2).dot(dir) > 0.0, "no progress past {p2:?}");
            p1 = p2;
            p2 = next;
        }
    }

    #[test]
    fn immediate_neighbor_wall_hits_at_towards() {
        let mut rows = vec![vec![Cell::Empty; 3]; 3];
        rows[1][1] = Cell::Wall(Color::RED);
        let scene = Scene::new(rows);
        let origin = Vec2::new(0.5, 1.5);
        let towards = Vec2::new(1.5, 1.5);
        match cast_ray(&scene, origin, towards) {
            Cast::Hit { point, row, col, .. } => {
                assert_eq!(point, towards);
                assert_eq!((row, col), (1, 1));
            }
            Cast::Miss { .. } => panic!("expected a hit"),
        }
    }

    #[test]
    fn empty_scene_misses_past_far_clip() {
        let scene = Scene::new(vec![vec![Cell::Empty; 3]; 3]);
        let origin = Vec2::new(1.5, 1.5);
        match cast_ray(&scene, origin, Vec2::new(2.5, 1.5)) {
            Cast::Miss { point } => {
                assert!(origin.distance(point) > FAR_CLIP);
            }
            Cast::Hit { .. } => panic!("nothing to hit"),
        }
    }

    #[test]
    fn perpendicular_depth_equals_distance_along_view_axis() {
        let mut rows = vec![vec![Cell::Empty; 3]; 4];
        rows[2][1] = Cell::Wall(Color::RED);
        let scene = Scene::new(rows);
        let origin = Vec2::new(0.5, 1.5);
        let forward = Vec2::new(1.0, 0.0);
        match cast_ray(&scene, origin, origin + forward) {
            Cast::Hit { point, .. } => {
                let v = point - origin;
                assert!((v.dot(forward) - v.length()).abs() < TOL);
                assert!((v.length() - 1.5).abs() < TOL);
            }
            Cast::Miss { .. } => panic!("expected a hit"),
        }
    }

    #[test]
    fn diagonal_cast_through_starter_layout_hits_red() {
        let scene = starter_scene();
        let origin = Vec2::new(8.0 * 0.63, 7.0 * 0.63);
        let angle = 5.0 * FRAC_PI_4;
        let towards = origin + Vec2::new(angle.cos(), angle.sin());
        match cast_ray(&scene, origin, towards) {
            Cast::Hit { point, row, col, color } => {
                assert_eq!((row, col), (2, 1));
                assert_eq!(color, Color::RED);
                assert!(origin.distance(point) < FAR_CLIP);
            }
            Cast::Miss { point } => panic!("missed at {point:?}"),
        }
    }
}
