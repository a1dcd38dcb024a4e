//! Weighted fixed-format passes.
//!
//! Destination pixel `(x, y)` is the weighted sum over source row `dst.x + x`
//! at source columns `offset[dst.y + y] + i`, so every pass writes its result
//! transposed. Zero taps are skipped for both the sum and the normalization.
//! 8-bit formats accumulate in `i32`, 16-bit formats in `i64`.

use sr_core::{PixelFormat, RasterView, RasterViewMut, clamp_u8, clamp_u16, edge_byte_offset};

use crate::table::FilterTable;

pub fn resample_rgba8(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<i16>,
) {
    debug_assert_eq!(src.format(), PixelFormat::Rgba8);
    debug_assert_eq!(dst.format(), PixelFormat::Rgba8);
    convolve_u8::<4>(src, dst, table);
}

pub fn resample_gray8(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<i16>,
) {
    debug_assert_eq!(src.format(), PixelFormat::Gray8);
    debug_assert_eq!(dst.format(), PixelFormat::Gray8);
    convolve_u8::<1>(src, dst, table);
}

pub fn resample_ycc8(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<i16>,
) {
    debug_assert_eq!(src.format(), PixelFormat::Ycc8);
    debug_assert_eq!(dst.format(), PixelFormat::Ycc8);
    convolve_u8::<3>(src, dst, table);
}

pub fn resample_rgba16(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<i32>,
) {
    debug_assert_eq!(src.format(), PixelFormat::Rgba16);
    debug_assert_eq!(dst.format(), PixelFormat::Rgba16);
    convolve_u16::<4>(src, dst, table);
}

pub fn resample_gray16(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<i32>,
) {
    debug_assert_eq!(src.format(), PixelFormat::Gray16);
    debug_assert_eq!(dst.format(), PixelFormat::Gray16);
    convolve_u16::<1>(src, dst, table);
}

fn convolve_u8<const CH: usize>(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<i16>,
) {
    let src_len = src.width();
    let origin = dst.rect();

    for y in 0..origin.height {
        let start = table.start(origin.y + y);
        let taps = table.row(origin.y + y);
        let out_row = dst.row_mut(y);

        for (x, out) in out_row.chunks_exact_mut(CH).enumerate() {
            let row = src.row(origin.x + x);
            let mut acc = [0i32; CH];
            let mut sum = 0i32;

            for (i, &coeff) in taps.iter().enumerate() {
                if coeff == 0 {
                    continue;
                }
                let xi = edge_byte_offset(start.saturating_add(i as isize), src_len, CH);
                let c = i32::from(coeff);
                for (a, &v) in acc.iter_mut().zip(&row[xi..xi + CH]) {
                    *a += c * i32::from(v);
                }
                sum += c;
            }

            for (o, &a) in out.iter_mut().zip(&acc) {
                *o = clamp_u8(a / sum);
            }
        }
    }
}

fn convolve_u16<const CH: usize>(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<i32>,
) {
    let bpp = 2 * CH;
    let src_len = src.width();
    let origin = dst.rect();

    for y in 0..origin.height {
        let start = table.start(origin.y + y);
        let taps = table.row(origin.y + y);
        let out_row = dst.row_mut(y);

        for (x, out) in out_row.chunks_exact_mut(bpp).enumerate() {
            let row = src.row(origin.x + x);
            let mut acc = [0i64; CH];
            let mut sum = 0i64;

            for (i, &coeff) in taps.iter().enumerate() {
                if coeff == 0 {
                    continue;
                }
                let xi = edge_byte_offset(start.saturating_add(i as isize), src_len, bpp);
                let c = i64::from(coeff);
                for (a, v) in acc.iter_mut().zip(row[xi..xi + bpp].chunks_exact(2)) {
                    *a += c * i64::from(u16::from_be_bytes([v[0], v[1]]));
                }
                sum += c;
            }

            for (o, &a) in out.chunks_exact_mut(2).zip(&acc) {
                o.copy_from_slice(&clamp_u16(a / sum).to_be_bytes());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sr_core::{PixelFormat, Raster, Rect};

    use super::{resample_gray8, resample_gray16, resample_rgba8, resample_rgba16, resample_ycc8};
    use crate::table::FilterTable;

    #[test]
    fn identity_tap_transposes() {
        // 3x2 source, one tap per output: dst(x, y) = src(y, x).
        let src = Raster::from_vec(
            PixelFormat::Gray8,
            Rect::from_size(3, 2),
            3,
            vec![
                1, 2, 3, //
                4, 5, 6, //
            ],
        )
        .expect("valid raster");
        let table = FilterTable::new(vec![1i16; 3], vec![0, 1, 2], 1, 1.0).expect("valid table");
        let mut dst = Raster::new(PixelFormat::Gray8, Rect::from_size(2, 3));

        resample_gray8(&src.as_view(), &mut dst.as_view_mut(), &table);
        assert_eq!(dst.data(), &[1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn box_average_truncates_toward_zero() {
        let src = Raster::from_vec(PixelFormat::Gray8, Rect::from_size(2, 1), 2, vec![10, 13])
            .expect("valid raster");
        let table = FilterTable::new(vec![1i16, 1], vec![0], 2, 2.0).expect("valid table");
        let mut dst = Raster::new(PixelFormat::Gray8, Rect::from_size(1, 1));

        resample_gray8(&src.as_view(), &mut dst.as_view_mut(), &table);
        assert_eq!(dst.data(), &[11]);
    }

    #[test]
    fn offsets_at_index_limits_replicate_edges() {
        let src = Raster::from_vec(PixelFormat::Gray8, Rect::from_size(2, 1), 2, vec![3, 9])
            .expect("valid raster");
        let table = FilterTable::new(vec![1i16; 4], vec![isize::MAX, isize::MIN], 2, 1.0)
            .expect("valid table");
        let mut dst = Raster::new(PixelFormat::Gray8, Rect::from_size(1, 2));

        resample_gray8(&src.as_view(), &mut dst.as_view_mut(), &table);
        assert_eq!(dst.data(), &[9, 3]);
    }

    #[test]
    fn negative_lobes_are_clamped() {
        let src = Raster::from_vec(
            PixelFormat::Rgba8,
            Rect::from_size(3, 1),
            12,
            vec![0, 255, 0, 255, 255, 0, 255, 255, 0, 255, 0, 255],
        )
        .expect("valid raster");
        // Sharpening kernel [-1, 3, -1] centred on the middle pixel.
        let table = FilterTable::new(vec![-1i16, 3, -1], vec![0], 3, 1.0).expect("valid table");
        let mut dst = Raster::new(PixelFormat::Rgba8, Rect::from_size(1, 1));

        resample_rgba8(&src.as_view(), &mut dst.as_view_mut(), &table);
        assert_eq!(dst.data(), &[255, 0, 255, 255]);
    }

    #[test]
    fn sixteen_bit_overshoot_saturates() {
        let mut bytes = Vec::new();
        for v in [0u16, 65535, 0] {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
        let src = Raster::from_vec(PixelFormat::Gray16, Rect::from_size(3, 1), 6, bytes)
            .expect("valid raster");
        let table = FilterTable::new(vec![-1i32, 3, -1, 3, -1, 0], vec![0, 0], 3, 1.0)
            .expect("valid table");
        let mut dst = Raster::new(PixelFormat::Gray16, Rect::from_size(1, 2));

        resample_gray16(&src.as_view(), &mut dst.as_view_mut(), &table);
        assert_eq!(dst.data(), &[0xff, 0xff, 0, 0]);
    }

    #[test]
    fn sixteen_bit_channels_keep_full_precision() {
        let mut bytes = Vec::new();
        for v in [1000u16, 2000, 3000, 4000, 3000, 4000, 5000, 6001] {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
        let src = Raster::from_vec(PixelFormat::Rgba16, Rect::from_size(2, 1), 16, bytes)
            .expect("valid raster");
        let table = FilterTable::new(vec![1i32, 1], vec![0], 2, 2.0).expect("valid table");
        let mut dst = Raster::new(PixelFormat::Rgba16, Rect::from_size(1, 1));

        resample_rgba16(&src.as_view(), &mut dst.as_view_mut(), &table);
        let out: Vec<u16> = dst
            .data()
            .chunks_exact(2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
            .collect();
        assert_eq!(out, vec![2000, 3000, 4000, 5000]);
    }

    #[test]
    fn destination_padding_is_untouched() {
        let src = Raster::new_fill(PixelFormat::Ycc8, Rect::from_size(2, 2), &[10, 20, 30]);
        let table = FilterTable::new(vec![1i16, 1], vec![0], 2, 2.0).expect("valid table");
        let mut dst = Raster::from_vec(PixelFormat::Ycc8, Rect::from_size(2, 1), 8, vec![0xAA; 8])
            .expect("valid raster");

        resample_ycc8(&src.as_view(), &mut dst.as_view_mut(), &table);
        assert_eq!(dst.data(), &[10, 20, 30, 10, 20, 30, 0xAA, 0xAA]);
    }

    #[test]
    fn destination_origin_selects_table_rows() {
        let src = Raster::from_vec(PixelFormat::Gray8, Rect::from_size(4, 1), 4, vec![1, 2, 3, 4])
            .expect("valid raster");
        let table =
            FilterTable::new(vec![1i16; 4], vec![0, 1, 2, 3], 1, 1.0).expect("valid table");
        let mut full = Raster::new(PixelFormat::Gray8, Rect::from_size(1, 4));
        {
            let mut view = full.as_view_mut();
            let mut bottom = view.subview_mut(0, 2, 1, 2).expect("valid subview");
            resample_gray8(&src.as_view(), &mut bottom, &table);
        }
        assert_eq!(full.data(), &[0, 0, 3, 4]);
    }
}
