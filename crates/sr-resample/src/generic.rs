//! Format-agnostic passes over [`PixelSource`] / [`PixelSink`].
//!
//! Slower than the fixed-format paths but works for any encoding the access
//! traits cover. Channels are 16-bit; accumulation is `i64`.

use sr_core::{PixelSink, PixelSource, clamp_u16, edge_index, round_u16};

use crate::table::FilterTable;

/// Weighted pass. Each channel is normalized by the sum of the nonzero taps
/// actually visited and clamped to `[0, 65535]` before the sink packs it.
pub fn resample_generic<S, D>(src: &S, dst: &mut D, table: &FilterTable<i32>)
where
    S: PixelSource + ?Sized,
    D: PixelSink + ?Sized,
{
    let (ox, oy) = dst.origin();
    let src_len = src.width();

    for y in 0..dst.height() {
        let start = table.start(oy + y);
        let taps = table.row(oy + y);

        for x in 0..dst.width() {
            let mut acc = [0i64; 4];
            let mut sum = 0i64;

            for (i, &coeff) in taps.iter().enumerate() {
                if coeff == 0 {
                    continue;
                }
                let xi = edge_index(start.saturating_add(i as isize), src_len);
                let px = src.rgba16(xi, ox + x);
                let c = i64::from(coeff);
                for (a, v) in acc.iter_mut().zip(px) {
                    *a += c * i64::from(v);
                }
                sum += c;
            }

            dst.put_rgba16(x, y, acc.map(|a| clamp_u16(a / sum)));
        }
    }
}

/// Nearest-neighbor pass: unweighted mean of the selected taps.
pub fn nearest_generic<S, D>(src: &S, dst: &mut D, table: &FilterTable<bool>)
where
    S: PixelSource + ?Sized,
    D: PixelSink + ?Sized,
{
    let (ox, oy) = dst.origin();
    let src_len = src.width();

    for y in 0..dst.height() {
        let start = table.start(oy + y);
        let taps = table.row(oy + y);

        for x in 0..dst.width() {
            let mut acc = [0f32; 4];
            let mut count = 0f32;

            for (i, _) in taps.iter().enumerate().filter(|(_, selected)| **selected) {
                let xi = edge_index(start.saturating_add(i as isize), src_len);
                for (a, v) in acc.iter_mut().zip(src.rgba16(xi, ox + x)) {
                    *a += f32::from(v);
                }
                count += 1.0;
            }

            dst.put_rgba16(x, y, acc.map(|a| round_u16(a / count)));
        }
    }
}
