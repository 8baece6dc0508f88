use crate::math::{Color, Vec2};

/// Translate-then-scale transform, composed the way a 2D canvas API
/// composes them.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    tx: f32,
    ty: f32,
    sx: f32,
    sy: f32,
}

impl Transform {
    const IDENTITY: Transform = Transform {
        tx: 0.0,
        ty: 0.0,
        sx: 1.0,
        sy: 1.0,
    };

    #[inline]
    fn apply(self, p: Vec2) -> Vec2 {
        Vec2::new(self.tx + self.sx * p.x, self.ty + self.sy * p.y)
    }
}

/// Software drawing surface over a BGRX pixel buffer: filled shapes,
/// lines, and a save/restore transform stack. All writes are clipped to
/// the buffer.
pub struct Canvas<'a> {
    buf: &'a mut [u32],
    width: usize,
    height: usize,
    xform: Transform,
    saved: Vec<Transform>,
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut [u32], width: usize, height: usize) -> Canvas<'a> {
        debug_assert_eq!(buf.len(), width * height);
        Canvas {
            buf,
            width,
            height,
            xform: Transform::IDENTITY,
            saved: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn save(&mut self) {
        self.saved.push(self.xform);
    }

    pub fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.xform = t;
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.xform.tx += self.xform.sx * dx;
        self.xform.ty += self.xform.sy * dy;
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.xform.sx *= sx;
        self.xform.sy *= sy;
    }

    pub fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        let a = self.xform.apply(pos);
        let b = self.xform.apply(pos + size);
        // Saturating float-to-int casts keep degenerate (huge or
        // non-finite) extents harmless.
        let x0 = (a.x.min(b.x).floor() as i64).clamp(0, self.width as i64) as usize;
        let x1 = (a.x.max(b.x).ceil() as i64).clamp(0, self.width as i64) as usize;
        let y0 = (a.y.min(b.y).floor() as i64).clamp(0, self.height as i64) as usize;
        let y1 = (a.y.max(b.y).ceil() as i64).clamp(0, self.height as i64) as usize;
        let px = color.to_pixel();
        for y in y0..y1 {
            let row = y * self.width;
            self.buf[row + x0..row + x1].fill(px);
        }
    }

    /// Filled circle; the radius scales with the transform's x factor,
    /// so it assumes a uniform scale.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let c = self.xform.apply(center);
        let r = radius * self.xform.sx.abs();
        let x0 = ((c.x - r).floor() as i64).clamp(0, self.width as i64) as usize;
        let x1 = ((c.x + r).ceil() as i64).clamp(0, self.width as i64) as usize;
        let y0 = ((c.y - r).floor() as i64).clamp(0, self.height as i64) as usize;
        let y1 = ((c.y + r).ceil() as i64).clamp(0, self.height as i64) as usize;
        let px = color.to_pixel();
        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - c;
                if d.length_sq() <= r * r {
                    self.buf[y * self.width + x] = px;
                }
            }
        }
    }

    /// One-pixel-wide line from `a` to `b`.
    pub fn stroke_line(&mut self, a: Vec2, b: Vec2, color: Color) {
        let p0 = self.xform.apply(a);
        let p1 = self.xform.apply(b);
        let span = p1 - p0;
        let steps = span.x.abs().max(span.y.abs()).ceil().max(1.0);
        let px = color.to_pixel();
        let mut i = 0.0;
        while i <= steps {
            let p = p0.lerp(p1, i / steps);
            self.set_pixel(p.x.round() as i64, p.y.round() as i64, px);
            i += 1.0;
        }
    }

    #[inline]
    fn set_pixel(&mut self, x: i64, y: i64, px: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = px;
        }
    }
}
