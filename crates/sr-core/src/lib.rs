//! Foundational primitives for separable resampling.
//!
//! ## Rasters and Stride
//! Rasters are packed byte buffers tagged with a [`PixelFormat`]. `stride` is
//! the distance, in bytes, between adjacent row starts and may be greater than
//! the packed row width. Views borrow the caller's buffer and never
//! reallocate it.
//!
//! ## Origins
//! A view's [`Rect`] carries an absolute origin. Splitting a destination into
//! bands keeps each band's origin so that filter tables can be indexed by the
//! absolute destination coordinate.
//!
//! ## Edges and Clamping
//! Out-of-range taps replicate the nearest edge pixel ([`edge_index`]).
//! Accumulated sums are narrowed with [`clamp_u8`] / [`clamp_u16`], and
//! nearest-neighbor means with [`round_u8`] / [`round_u16`].

mod access;
mod border;
mod clamp;
mod error;
mod format;
mod geom;
mod raster;

pub use access::{PixelSink, PixelSource};
pub use border::{edge_byte_offset, edge_index};
pub use clamp::{clamp_u8, clamp_u16, round_u8, round_u16};
pub use error::Error;
pub use format::PixelFormat;
pub use geom::Rect;
pub use raster::{Raster, RasterView, RasterViewMut};
