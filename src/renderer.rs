use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::math::{Color, Vec2};
use crate::raycast::{Cast, cast_ray};
use crate::scene::Scene;

/// Number of rays per frame. Independent of the surface width; columns
/// are stretched to fill it.
pub const COLUMNS: usize = 320;

const SKY: Color = Color::new(0.12, 0.12, 0.27, 1.0);
const GROUND: Color = Color::new(0.16, 0.16, 0.16, 1.0);

/// First-person view: background halves, then one shaded wall slice per
/// column that hits something. Missed columns leave the background.
pub fn render_view(canvas: &mut Canvas, scene: &Scene, camera: &Camera) {
    let out_w = canvas.width() as f32;
    let out_h = canvas.height() as f32;

    canvas.fill_rect(Vec2::ZERO, Vec2::new(out_w, out_h * 0.5), SKY);
    canvas.fill_rect(Vec2::new(0.0, out_h * 0.5), Vec2::new(out_w, out_h * 0.5), GROUND);

    let (left, right) = camera.near_plane();
    let fwd = camera.forward();
    let col_w = out_w / COLUMNS as f32;

    for i in 0..COLUMNS {
        let target = left.lerp(right, i as f32 / COLUMNS as f32);
        let Cast::Hit { point, color, .. } = cast_ray(scene, camera.pos, target) else {
            continue;
        };

        // Depth along the view axis, not the ray; this is what keeps
        // columns at the FOV edges from bowing outward (fisheye).
        let depth = (point - camera.pos).dot(fwd);
        let slice_h = out_h / depth;
        let shaded = color.scale(1.0 / depth);

        canvas.fill_rect(
            Vec2::new(i as f32 * col_w, 0.5 * (out_h - slice_h)),
            Vec2::new(col_w, slice_h),
            shaded,
        );
    }
}
