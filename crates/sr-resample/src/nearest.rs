//! Nearest-neighbor passes: taps are selected or not, selected samples are
//! averaged unweighted in `f32` and rounded half up.

use sr_core::{PixelFormat, RasterView, RasterViewMut, edge_byte_offset, round_u8, round_u16};

use crate::table::FilterTable;

pub fn nearest_ycc8(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<bool>,
) {
    debug_assert_eq!(src.format(), PixelFormat::Ycc8);
    debug_assert_eq!(dst.format(), PixelFormat::Ycc8);
    nearest_u8::<3>(src, dst, table);
}

pub fn nearest_rgba8(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<bool>,
) {
    debug_assert_eq!(src.format(), PixelFormat::Rgba8);
    debug_assert_eq!(dst.format(), PixelFormat::Rgba8);
    nearest_u8::<4>(src, dst, table);
}

pub fn nearest_gray8(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<bool>,
) {
    debug_assert_eq!(src.format(), PixelFormat::Gray8);
    debug_assert_eq!(dst.format(), PixelFormat::Gray8);
    nearest_u8::<1>(src, dst, table);
}

pub fn nearest_rgba16(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<bool>,
) {
    debug_assert_eq!(src.format(), PixelFormat::Rgba16);
    debug_assert_eq!(dst.format(), PixelFormat::Rgba16);
    nearest_u16::<4>(src, dst, table);
}

pub fn nearest_gray16(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<bool>,
) {
    debug_assert_eq!(src.format(), PixelFormat::Gray16);
    debug_assert_eq!(dst.format(), PixelFormat::Gray16);
    nearest_u16::<1>(src, dst, table);
}

fn nearest_u8<const CH: usize>(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<bool>,
) {
    let src_len = src.width();
    let origin = dst.rect();

    for y in 0..origin.height {
        let start = table.start(origin.y + y);
        let taps = table.row(origin.y + y);
        let out_row = dst.row_mut(y);

        for (x, out) in out_row.chunks_exact_mut(CH).enumerate() {
            let row = src.row(origin.x + x);
            let mut acc = [0f32; CH];
            let mut count = 0f32;

            for (i, _) in taps.iter().enumerate().filter(|(_, selected)| **selected) {
                let xi = edge_byte_offset(start.saturating_add(i as isize), src_len, CH);
                for (a, &v) in acc.iter_mut().zip(&row[xi..xi + CH]) {
                    *a += f32::from(v);
                }
                count += 1.0;
            }

            for (o, &a) in out.iter_mut().zip(&acc) {
                *o = round_u8(a / count);
            }
        }
    }
}

fn nearest_u16<const CH: usize>(
    src: &RasterView<'_>,
    dst: &mut RasterViewMut<'_>,
    table: &FilterTable<bool>,
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
            let mut acc = [0f32; CH];
            let mut count = 0f32;

            for (i, _) in taps.iter().enumerate().filter(|(_, selected)| **selected) {
                let xi = edge_byte_offset(start.saturating_add(i as isize), src_len, bpp);
                for (a, v) in acc.iter_mut().zip(row[xi..xi + bpp].chunks_exact(2)) {
                    *a += f32::from(u16::from_be_bytes([v[0], v[1]]));
                }
                count += 1.0;
            }

            for (o, &a) in out.chunks_exact_mut(2).zip(&acc) {
                o.copy_from_slice(&round_u16(a / count).to_be_bytes());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sr_core::{PixelFormat, Raster, Rect};

    use super::{nearest_gray8, nearest_gray16, nearest_rgba8, nearest_ycc8};
    use crate::table::FilterTable;

    fn ycc_row(pixels: &[[u8; 3]]) -> Raster {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        Raster::from_vec(
            PixelFormat::Ycc8,
            Rect::from_size(pixels.len(), 1),
            data.len(),
            data,
        )
        .expect("valid raster")
    }

    #[test]
    fn single_selected_tap_is_exact() {
        let src = ycc_row(&[[1, 2, 3], [17, 128, 251], [200, 201, 202]]);
        let table = FilterTable::new(
            vec![false, true, false, false, false, true, true, false, false],
            vec![0, 0, 0],
            3,
            1.0,
        )
        .expect("valid table");
        let mut dst = Raster::new(PixelFormat::Ycc8, Rect::from_size(1, 3));

        nearest_ycc8(&src.as_view(), &mut dst.as_view_mut(), &table);
        assert_eq!(
            dst.data(),
            &[17, 128, 251, 200, 201, 202, 1, 2, 3]
        );
    }

    #[test]
    fn halfway_means_round_up() {
        let src = ycc_row(&[[1, 10, 254], [2, 11, 255]]);
        let table = FilterTable::new(vec![true, true], vec![0], 2, 2.0).expect("valid table");
        let mut dst = Raster::new(PixelFormat::Ycc8, Rect::from_size(1, 1));

        nearest_ycc8(&src.as_view(), &mut dst.as_view_mut(), &table);
        assert_eq!(dst.data(), &[2, 11, 255]);
    }

    #[test]
    fn out_of_range_selection_replicates_edges() {
        let src = Raster::from_vec(PixelFormat::Gray8, Rect::from_size(3, 1), 3, vec![9, 50, 70])
            .expect("valid raster");
        let table =
            FilterTable::new(vec![true, false, false, true], vec![-5, 2], 2, 1.0).expect("valid");
        let mut dst = Raster::new(PixelFormat::Gray8, Rect::from_size(1, 2));

        nearest_gray8(&src.as_view(), &mut dst.as_view_mut(), &table);
        assert_eq!(dst.data(), &[9, 70]);
    }

    #[test]
    fn rgba_and_gray16_average_selected_taps() {
        let src = Raster::from_vec(
            PixelFormat::Rgba8,
            Rect::from_size(2, 1),
            8,
            vec![0, 100, 200, 255, 3, 101, 200, 255],
        )
        .expect("valid raster");
        let table = FilterTable::new(vec![true, true], vec![0], 2, 2.0).expect("valid table");
        let mut dst = Raster::new(PixelFormat::Rgba8, Rect::from_size(1, 1));
        nearest_rgba8(&src.as_view(), &mut dst.as_view_mut(), &table);
        assert_eq!(dst.data(), &[2, 101, 200, 255]);

        let mut bytes = Vec::new();
        for v in [1000u16, 1003] {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
        let src16 = Raster::from_vec(PixelFormat::Gray16, Rect::from_size(2, 1), 4, bytes)
            .expect("valid raster");
        let mut dst16 = Raster::new(PixelFormat::Gray16, Rect::from_size(1, 1));
        nearest_gray16(&src16.as_view(), &mut dst16.as_view_mut(), &table);
        assert_eq!(dst16.data(), &1002u16.to_be_bytes());
    }
}
