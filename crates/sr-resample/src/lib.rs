//! Separable filter passes over packed rasters.
//!
//! A pass applies a precomputed 1-D filter ([`FilterTable`]) along the
//! source's horizontal axis and writes the result transposed: destination
//! pixel `(x, y)` filters source row `x` with table row `y`. Two passes
//! (horizontal, then vertical on the transposed intermediate) resize both
//! axes and restore orientation.
//!
//! Fixed-format fast paths exist for RGBA8, RGBA16, Gray8, Gray16 and
//! interleaved YCbCr8, each with a nearest-neighbor twin. Anything else goes
//! through [`resample_generic`] via the `sr_core` access traits.
//!
//! Taps outside the source replicate the nearest edge pixel, independently
//! per tap. Rows whose taps are all zero divide by zero; tables are expected
//! to be checked once with [`FilterTable::check_weights`] when built.

mod convolve;
mod generic;
mod nearest;
mod pass;
mod table;

pub use convolve::{
    resample_gray8, resample_gray16, resample_rgba8, resample_rgba16, resample_ycc8,
};
pub use generic::{nearest_generic, resample_generic};
pub use nearest::{nearest_gray8, nearest_gray16, nearest_rgba8, nearest_rgba16, nearest_ycc8};
#[cfg(feature = "rayon")]
pub use pass::resample_pass_par;
pub use pass::{PassFilter, resample_pass};
pub use table::{FilterTable, Tap};
