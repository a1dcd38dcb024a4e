//! Format dispatch for a single filter pass.

use sr_core::{Error, PixelFormat, RasterView, RasterViewMut};

use crate::convolve::{
    resample_gray8, resample_gray16, resample_rgba8, resample_rgba16, resample_ycc8,
};
use crate::generic::{nearest_generic, resample_generic};
use crate::nearest::{
    nearest_gray8, nearest_gray16, nearest_rgba8, nearest_rgba16, nearest_ycc8,
};
use crate::table::FilterTable;

/// Filter applied by one pass. The coefficient width decides which family of
/// resamplers is eligible.
#[derive(Debug, Clone, Copy)]
pub enum PassFilter<'a> {
    /// `i16` weights for 8-bit formats.
    Convolve8(&'a FilterTable<i16>),
    /// `i32` weights for 16-bit formats.
    Convolve16(&'a FilterTable<i32>),
    /// `i32` weights through the format-agnostic path; any format.
    Generic(&'a FilterTable<i32>),
    /// Selected taps, averaged; any format.
    Nearest(&'a FilterTable<bool>),
}

impl PassFilter<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Convolve8(_) => "convolve8",
            Self::Convolve16(_) => "convolve16",
            Self::Generic(_) => "generic",
            Self::Nearest(_) => "nearest",
        }
    }

    /// Destination rows covered by the table.
    pub fn rows(&self) -> usize {
        match self {
            Self::Convolve8(t) => t.len(),
            Self::Convolve16(t) | Self::Generic(t) => t.len(),
            Self::Nearest(t) => t.len(),
        }
    }

    pub fn filter_length(&self) -> usize {
        match self {
            Self::Convolve8(t) => t.filter_length(),
            Self::Convolve16(t) | Self::Generic(t) => t.filter_length(),
            Self::Nearest(t) => t.filter_length(),
        }
    }

    pub fn scale(&self) -> f64 {
        match self {
            Self::Convolve8(t) => t.scale(),
            Self::Convolve16(t) | Self::Generic(t) => t.scale(),
            Self::Nearest(t) => t.scale(),
        }
    }
}

/// Runs one pass from `src` into `dst`, picking the fast path for the
/// raster format.
///
/// Geometry is validated once here; the per-pixel loops trust it. Tables
/// are expected to have passed [`FilterTable::check_weights`].
pub fn resample_pass(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    filter: PassFilter<'_>,
) -> Result<(), Error> {
    check_geometry(src, dst, &filter)?;
    if dst.rect().is_empty() {
        return Ok(());
    }

    log::trace!(
        "{} pass over {}: {}x{} -> {}x{} at ({}, {}), {} taps, scale {}",
        filter.name(),
        dst.format(),
        src.width(),
        src.height(),
        dst.width(),
        dst.height(),
        dst.rect().x,
        dst.rect().y,
        filter.filter_length(),
        filter.scale(),
    );

    match (dst.format(), filter) {
        (PixelFormat::Rgba8, PassFilter::Convolve8(t)) => resample_rgba8(src, dst, t),
        (PixelFormat::Gray8, PassFilter::Convolve8(t)) => resample_gray8(src, dst, t),
        (PixelFormat::Ycc8, PassFilter::Convolve8(t)) => resample_ycc8(src, dst, t),
        (PixelFormat::Rgba16, PassFilter::Convolve16(t)) => resample_rgba16(src, dst, t),
        (PixelFormat::Gray16, PassFilter::Convolve16(t)) => resample_gray16(src, dst, t),
        (PixelFormat::Rgba8, PassFilter::Nearest(t)) => nearest_rgba8(src, dst, t),
        (PixelFormat::Gray8, PassFilter::Nearest(t)) => nearest_gray8(src, dst, t),
        (PixelFormat::Ycc8, PassFilter::Nearest(t)) => nearest_ycc8(src, dst, t),
        (PixelFormat::Rgba16, PassFilter::Nearest(t)) => nearest_rgba16(src, dst, t),
        (PixelFormat::Gray16, PassFilter::Nearest(t)) => nearest_gray16(src, dst, t),
        (_, PassFilter::Generic(t)) => resample_generic(src, dst, t),
        (format, filter) => {
            return Err(Error::FilterMismatch {
                filter: filter.name(),
                format,
            });
        }
    }
    Ok(())
}

/// Splits `dst` into bands of `band_rows` rows and filters them in parallel.
/// Bands are disjoint, so no synchronization is involved.
#[cfg(feature = "rayon")]
pub fn resample_pass_par(
    src: &RasterView<'_>,
    dst: RasterViewMut<'_>,
    filter: PassFilter<'_>,
    band_rows: usize,
) -> Result<(), Error> {
    use rayon::prelude::*;

    check_geometry(src, &dst, &filter)?;
    dst.into_bands(band_rows.max(1))
        .into_par_iter()
        .try_for_each(|mut band| resample_pass(src, &mut band, filter))
}

fn check_geometry(
    src: &RasterView<'_>,
    dst: &RasterViewMut<'_>,
    filter: &PassFilter<'_>,
) -> Result<(), Error> {
    if src.format() != dst.format() {
        return Err(Error::FormatMismatch {
            expected: dst.format(),
            actual: src.format(),
        });
    }

    let rect = dst.rect();
    if rect.is_empty() {
        return Ok(());
    }
    if src.width() == 0 {
        return Err(Error::EmptySource);
    }
    if filter.rows() < rect.max_y() {
        return Err(Error::TableTooShort {
            required: rect.max_y(),
            actual: filter.rows(),
        });
    }
    if src.height() < rect.max_x() {
        return Err(Error::SourceTooShort {
            required: rect.max_x(),
            actual: src.height(),
        });
    }
    Ok(())
}
