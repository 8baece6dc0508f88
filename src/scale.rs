use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Per-axis lookup entry: the two source indices bracketing a
/// destination pixel and their blend weight in 8.8 fixed point.
type Tap = (usize, usize, u32);

fn axis_taps(dst: usize, src: usize) -> Vec<Tap> {
    let ratio = src as f32 / dst as f32;
    (0..dst)
        .map(|i| {
            let pos = i as f32 * ratio;
            let lo = pos.floor() as isize;
            let hi = (lo + 1).clamp(0, src as isize - 1);
            let w = ((pos - lo as f32) * 256.0).round() as u32;
            (lo as usize, hi as usize, w)
        })
        .collect()
}

/// Stretches the fixed-size internal framebuffer onto a window surface
/// with a precomputed bilinear lookup; rows run in parallel.
pub struct Blitter {
    xs: Vec<Tap>,
    ys: Vec<Tap>,
    dst_w: usize,
    dst_h: usize,
}

impl Blitter {
    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Blitter {
        Blitter {
            xs: axis_taps(dst_w, src_w),
            ys: axis_taps(dst_h, src_h),
            dst_w,
            dst_h,
        }
    }

    pub fn dst_dims(&self) -> (usize, usize) {
        (self.dst_w, self.dst_h)
    }

    pub fn stretch(&self, dst: &mut [u32], src: &[u32], src_w: usize) {
        dst.par_chunks_mut(self.dst_w)
            .zip(&self.ys)
            .for_each(|(dst_row, &(y_lo, y_hi, wy))| {
                let row_lo = y_lo * src_w;
                let row_hi = y_hi * src_w;
                for (out, &(x_lo, x_hi, wx)) in dst_row.iter_mut().zip(&self.xs) {
                    let top = mix_px(src[row_lo + x_lo], src[row_lo + x_hi], wx);
                    let bot = mix_px(src[row_hi + x_lo], src[row_hi + x_hi], wx);
                    *out = mix_px(top, bot, wy);
                }
            });
    }
}

/// Blend two BGRX pixels with an 8.8 fixed-point weight, red and blue
/// interleaved in one multiply.
#[inline]
fn mix_px(a: u32, b: u32, w: u32) -> u32 {
    let inv = 256 - w;
    let rb = ((a & 0x00FF_00FF) * inv + (b & 0x00FF_00FF) * w) >> 8 & 0x00FF_00FF;
    let g = ((a & 0x0000_FF00) * inv + (b & 0x0000_FF00) * w) >> 8 & 0x0000_FF00;
    rb | g
}
