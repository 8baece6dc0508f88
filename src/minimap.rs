use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::math::{Color, Vec2};
use crate::scene::{Cell, Scene};

const PANEL: Color = Color::new(0.05, 0.05, 0.08, 1.0);
const MARKER: Color = Color::WHITE;

/// How far the FOV wedge rays reach, in cells.
const WEDGE_REACH: f32 = 1.5;

/// Top-down draw of the scene into `origin`/`size` on the surface:
/// wall cells in their base colors, the viewpoint dot, and the FOV
/// wedge through the near-plane endpoints. The transform is saved and
/// restored around the whole block so later draws are unaffected.
pub fn draw(canvas: &mut Canvas, scene: &Scene, camera: &Camera, origin: Vec2, size: Vec2) {
    let rows = scene.height() as f32;
    let cols = scene.width() as f32;
    if rows == 0.0 || cols == 0.0 {
        return;
    }
    let s = (size.x / rows).min(size.y / cols);

    canvas.save();
    canvas.translate(origin.x, origin.y);
    canvas.scale(s, s);

    canvas.fill_rect(Vec2::ZERO, Vec2::new(rows, cols), PANEL);
    for (r, row) in scene.rows().iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if let Cell::Wall(color) = cell {
                canvas.fill_rect(Vec2::new(r as f32, c as f32), Vec2::new(1.0, 1.0), *color);
            }
        }
    }

    canvas.fill_circle(camera.pos, 0.25, MARKER);
    let (left, right) = camera.near_plane();
    for edge in [left, right] {
        let along = (edge - camera.pos).normalize();
        canvas.stroke_line(camera.pos, camera.pos + along * WEDGE_REACH, MARKER);
    }

    canvas.restore();
}
