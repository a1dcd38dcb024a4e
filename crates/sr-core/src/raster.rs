use crate::Error;
use crate::format::PixelFormat;
use crate::geom::Rect;

/// Owned packed raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    format: PixelFormat,
    rect: Rect,
    stride: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Allocates a zeroed raster with tightly packed rows.
    pub fn new(format: PixelFormat, rect: Rect) -> Self {
        let stride = rect.width * format.bytes_per_pixel();
        let len = stride.checked_mul(rect.height).expect("raster size overflow");
        Self {
            format,
            rect,
            stride,
            data: vec![0; len],
        }
    }

    /// Allocates a raster with every pixel set to `pixel` (packed bytes).
    pub fn new_fill(format: PixelFormat, rect: Rect, pixel: &[u8]) -> Self {
        assert_eq!(
            pixel.len(),
            format.bytes_per_pixel(),
            "fill pixel must match the format's pixel size"
        );
        let mut raster = Self::new(format, rect);
        for px in raster.data.chunks_exact_mut(pixel.len()) {
            px.copy_from_slice(pixel);
        }
        raster
    }

    pub fn from_vec(
        format: PixelFormat,
        rect: Rect,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, Error> {
        validate_layout(format, rect, stride, data.len())?;
        Ok(Self {
            format,
            rect,
            stride,
            data,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn width(&self) -> usize {
        self.rect.width
    }

    pub fn height(&self) -> usize {
        self.rect.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn as_view(&self) -> RasterView<'_> {
        RasterView {
            format: self.format,
            rect: self.rect,
            stride: self.stride,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> RasterViewMut<'_> {
        RasterViewMut {
            format: self.format,
            rect: self.rect,
            stride: self.stride,
            data: &mut self.data,
        }
    }
}

/// Borrowed read-only raster. `stride` is in bytes and may exceed the packed
/// row width.
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a> {
    format: PixelFormat,
    rect: Rect,
    stride: usize,
    data: &'a [u8],
}

impl<'a> RasterView<'a> {
    pub fn from_slice(
        format: PixelFormat,
        rect: Rect,
        stride: usize,
        data: &'a [u8],
    ) -> Result<Self, Error> {
        validate_layout(format, rect, stride, data.len())?;
        Ok(Self {
            format,
            rect,
            stride,
            data,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn width(&self) -> usize {
        self.rect.width
    }

    pub fn height(&self) -> usize {
        self.rect.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Packed bytes of row `y`, without stride padding.
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.rect.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Packed bytes of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [u8]> {
        if x >= self.rect.width || y >= self.rect.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = y * self.stride + x * bpp;
        self.data.get(start..start + bpp)
    }

    pub fn row_bytes(&self) -> usize {
        self.rect.width * self.format.bytes_per_pixel()
    }

    /// Sub-rectangle in view-relative coordinates; the origin of the result
    /// is shifted accordingly.
    pub fn subview(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<RasterView<'a>, Error> {
        let start = subview_start(self.format, self.rect, self.stride, x, y, width, height)?;
        let tail = self.data.get(start..).ok_or(Error::OutOfBounds)?;
        let rect = Rect::new(self.rect.x + x, self.rect.y + y, width, height);
        let min_len = min_required_len(self.format, rect, self.stride).ok_or(Error::OutOfBounds)?;
        if tail.len() < min_len {
            return Err(Error::OutOfBounds);
        }

        Ok(RasterView {
            format: self.format,
            rect,
            stride: self.stride,
            data: tail,
        })
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.row_bytes()
    }
}

/// Borrowed writable raster.
#[derive(Debug)]
pub struct RasterViewMut<'a> {
    format: PixelFormat,
    rect: Rect,
    stride: usize,
    data: &'a mut [u8],
}

impl<'a> RasterViewMut<'a> {
    pub fn from_slice_mut(
        format: PixelFormat,
        rect: Rect,
        stride: usize,
        data: &'a mut [u8],
    ) -> Result<Self, Error> {
        validate_layout(format, rect, stride, data.len())?;
        Ok(Self {
            format,
            rect,
            stride,
            data,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn width(&self) -> usize {
        self.rect.width
    }

    pub fn height(&self) -> usize {
        self.rect.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row_bytes(&self) -> usize {
        self.rect.width * self.format.bytes_per_pixel()
    }

    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.rect.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.rect.height, "row index out of bounds");
        let start = y * self.stride;
        let len = self.row_bytes();
        &mut self.data[start..start + len]
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [u8]> {
        if x >= self.rect.width || y >= self.rect.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = y * self.stride + x * bpp;
        self.data.get_mut(start..start + bpp)
    }

    pub fn as_view(&self) -> RasterView<'_> {
        RasterView {
            format: self.format,
            rect: self.rect,
            stride: self.stride,
            data: self.data,
        }
    }

    pub fn subview_mut(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<RasterViewMut<'_>, Error> {
        let start = subview_start(self.format, self.rect, self.stride, x, y, width, height)?;
        let rect = Rect::new(self.rect.x + x, self.rect.y + y, width, height);
        let min_len = min_required_len(self.format, rect, self.stride).ok_or(Error::OutOfBounds)?;

        let (_, tail) = self.data.split_at_mut(start.min(self.data.len()));
        if tail.len() < min_len {
            return Err(Error::OutOfBounds);
        }

        Ok(RasterViewMut {
            format: self.format,
            rect,
            stride: self.stride,
            data: tail,
        })
    }

    /// Splits into rows `[0, mid)` and `[mid, height)`. Each half keeps its
    /// absolute origin, so both can be filtered independently.
    pub fn split_rows_at(self, mid: usize) -> (RasterViewMut<'a>, RasterViewMut<'a>) {
        assert!(mid <= self.rect.height, "split row out of bounds");
        let at = (mid * self.stride).min(self.data.len());
        let (top, bottom) = self.data.split_at_mut(at);
        let r = self.rect;
        (
            RasterViewMut {
                format: self.format,
                rect: Rect::new(r.x, r.y, r.width, mid),
                stride: self.stride,
                data: top,
            },
            RasterViewMut {
                format: self.format,
                rect: Rect::new(r.x, r.y + mid, r.width, r.height - mid),
                stride: self.stride,
                data: bottom,
            },
        )
    }

    /// Partitions the view into consecutive bands of at most `rows` rows.
    pub fn into_bands(self, rows: usize) -> Vec<RasterViewMut<'a>> {
        assert!(rows > 0, "band height must be non-zero");
        let mut bands = Vec::with_capacity(self.rect.height.div_ceil(rows));
        let mut rest = self;
        while rest.rect.height > rows {
            let (band, tail) = rest.split_rows_at(rows);
            bands.push(band);
            rest = tail;
        }
        if rest.rect.height > 0 {
            bands.push(rest);
        }
        bands
    }
}

fn validate_layout(format: PixelFormat, rect: Rect, stride: usize, len: usize) -> Result<(), Error> {
    let row_bytes = rect
        .width
        .checked_mul(format.bytes_per_pixel())
        .ok_or(Error::InvalidStride)?;
    if stride < row_bytes {
        return Err(Error::InvalidStride);
    }

    let min_len = min_required_len(format, rect, stride).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual: len,
    })?;
    if len < min_len {
        return Err(Error::SizeMismatch {
            expected: min_len,
            actual: len,
        });
    }
    Ok(())
}

fn subview_start(
    format: PixelFormat,
    parent: Rect,
    stride: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> Result<usize, Error> {
    if x > parent.width
        || y > parent.height
        || width > (parent.width - x)
        || height > (parent.height - y)
    {
        return Err(Error::OutOfBounds);
    }

    y.checked_mul(stride)
        .and_then(|v| v.checked_add(x * format.bytes_per_pixel()))
        .ok_or(Error::OutOfBounds)
}

/// Bytes needed to hold `rect` when the last row carries no padding.
fn min_required_len(format: PixelFormat, rect: Rect, stride: usize) -> Option<usize> {
    if rect.is_empty() {
        return Some(0);
    }

    let rows_before_last = rect.height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(rect.width.checked_mul(format.bytes_per_pixel())?)
}

#[cfg(test)]
mod tests {
    use super::{Raster, RasterView, RasterViewMut};
    use crate::{Error, PixelFormat, Rect};

    #[test]
    fn view_indexing_with_stride() {
        let data = vec![1u8, 2, 3, 99, 4, 5, 6, 88];
        let view = RasterView::from_slice(PixelFormat::Gray8, Rect::from_size(3, 2), 4, &data)
            .expect("valid view");

        assert_eq!(view.row(0), &[1, 2, 3]);
        assert_eq!(view.row(1), &[4, 5, 6]);
        assert_eq!(view.pixel(0, 1), Some(&[4u8][..]));
        assert_eq!(view.pixel(3, 1), None);
        assert!(!view.is_contiguous());
    }

    #[test]
    fn last_row_may_omit_padding() {
        let data = vec![0u8; 2 * 10 + 8];
        let view = RasterView::from_slice(PixelFormat::Rgba8, Rect::from_size(2, 3), 10, &data)
            .expect("valid view");
        assert_eq!(view.row(2).len(), 8);
    }

    #[test]
    fn rejects_short_stride_and_buffer() {
        let data = vec![0u8; 16];
        assert_eq!(
            RasterView::from_slice(PixelFormat::Rgba16, Rect::from_size(2, 1), 8, &data)
                .unwrap_err(),
            Error::InvalidStride
        );
        assert_eq!(
            RasterView::from_slice(PixelFormat::Rgba8, Rect::from_size(2, 3), 8, &data)
                .unwrap_err(),
            Error::SizeMismatch {
                expected: 24,
                actual: 16
            }
        );
    }

    #[test]
    fn subview_shifts_origin() {
        let data: Vec<u8> = (0..15).collect();
        let parent = RasterView::from_slice(PixelFormat::Gray8, Rect::from_size(4, 3), 5, &data)
            .expect("valid parent");
        let sub = parent.subview(1, 1, 3, 2).expect("valid subview");

        assert_eq!(sub.rect(), Rect::new(1, 1, 3, 2));
        assert_eq!(sub.row(0), &[6, 7, 8]);
        assert_eq!(sub.row(1), &[11, 12, 13]);
        assert!(parent.subview(2, 0, 3, 1).is_err());
    }

    #[test]
    fn subview_mut_writes_through() {
        let mut data = vec![0u8; 3 * 8];
        let mut parent =
            RasterViewMut::from_slice_mut(PixelFormat::Ycc8, Rect::from_size(2, 3), 8, &mut data)
                .expect("valid parent");
        let mut sub = parent.subview_mut(1, 2, 1, 1).expect("valid subview");
        sub.pixel_mut(0, 0)
            .expect("in bounds")
            .copy_from_slice(&[7, 8, 9]);

        assert_eq!(&data[19..22], &[7, 8, 9]);
    }

    #[test]
    fn bands_partition_rows() {
        let mut raster = Raster::new(PixelFormat::Gray16, Rect::new(0, 10, 3, 7));
        let bands = raster.as_view_mut().into_bands(3);

        let rects: Vec<Rect> = bands.iter().map(|b| b.rect()).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 10, 3, 3),
                Rect::new(0, 13, 3, 3),
                Rect::new(0, 16, 3, 1),
            ]
        );
    }

    #[test]
    fn new_fill_repeats_pixel() {
        let raster = Raster::new_fill(PixelFormat::Rgba8, Rect::from_size(2, 2), &[1, 2, 3, 4]);
        assert_eq!(raster.data(), &[1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4]);
    }
}
