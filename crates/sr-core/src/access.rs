//! Format-agnostic pixel access for the generic resampler.
//!
//! Every pixel is exposed as four 16-bit channels (red, green, blue, alpha).
//! 8-bit channels widen by `v * 257` and narrow by `v / 257`, so a narrowed
//! weighted mean truncates the same way the 8-bit fast paths do. Gray rasters
//! read as `(v, v, v, max)` and store the first slot. YCbCr rasters expose
//! their planes channel-wise with opaque alpha; no color conversion happens.

use crate::format::PixelFormat;
use crate::raster::{RasterView, RasterViewMut};

/// Read side of the generic resampler. Coordinates are view-relative.
pub trait PixelSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn rgba16(&self, x: usize, y: usize) -> [u16; 4];
}

/// Write side of the generic resampler. Coordinates are view-relative; the
/// origin reported by `origin` selects filter-table rows and source rows.
pub trait PixelSink {
    fn origin(&self) -> (usize, usize);
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn put_rgba16(&mut self, x: usize, y: usize, px: [u16; 4]);
}

#[inline]
fn widen(v: u8) -> u16 {
    u16::from(v) * 257
}

#[inline]
fn narrow(v: u16) -> u8 {
    (v / 257) as u8
}

#[inline]
fn be16(p: &[u8], i: usize) -> u16 {
    u16::from_be_bytes([p[i], p[i + 1]])
}

impl PixelSource for RasterView<'_> {
    fn width(&self) -> usize {
        RasterView::width(self)
    }

    fn height(&self) -> usize {
        RasterView::height(self)
    }

    fn rgba16(&self, x: usize, y: usize) -> [u16; 4] {
        let p = self.pixel(x, y).expect("pixel index out of bounds");
        match self.format() {
            PixelFormat::Rgba8 => [widen(p[0]), widen(p[1]), widen(p[2]), widen(p[3])],
            PixelFormat::Rgba16 => [be16(p, 0), be16(p, 2), be16(p, 4), be16(p, 6)],
            PixelFormat::Gray8 => {
                let v = widen(p[0]);
                [v, v, v, u16::MAX]
            }
            PixelFormat::Gray16 => {
                let v = be16(p, 0);
                [v, v, v, u16::MAX]
            }
            PixelFormat::Ycc8 => [widen(p[0]), widen(p[1]), widen(p[2]), u16::MAX],
        }
    }
}

impl PixelSink for RasterViewMut<'_> {
    fn origin(&self) -> (usize, usize) {
        let r = self.rect();
        (r.x, r.y)
    }

    fn width(&self) -> usize {
        RasterViewMut::width(self)
    }

    fn height(&self) -> usize {
        RasterViewMut::height(self)
    }

    fn put_rgba16(&mut self, x: usize, y: usize, px: [u16; 4]) {
        let format = self.format();
        let p = self.pixel_mut(x, y).expect("pixel index out of bounds");
        match format {
            PixelFormat::Rgba8 => {
                for (dst, v) in p.iter_mut().zip(px) {
                    *dst = narrow(v);
                }
            }
            PixelFormat::Rgba16 => {
                for (dst, v) in p.chunks_exact_mut(2).zip(px) {
                    dst.copy_from_slice(&v.to_be_bytes());
                }
            }
            PixelFormat::Gray8 => p[0] = narrow(px[0]),
            PixelFormat::Gray16 => p.copy_from_slice(&px[0].to_be_bytes()),
            PixelFormat::Ycc8 => {
                p[0] = narrow(px[0]);
                p[1] = narrow(px[1]);
                p[2] = narrow(px[2]);
            }
        }
    }
}
