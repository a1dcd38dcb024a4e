/// Maps a tap coordinate onto `[0, len)` by replicating the nearest edge.
///
/// Each tap is resolved on its own: out-of-range taps keep their coefficient
/// but sample the first or last pixel.
#[inline]
pub fn edge_index(i: isize, len: usize) -> usize {
    debug_assert!(len > 0, "edge replication needs a non-empty axis");
    if i < 0 {
        0
    } else {
        (i as usize).min(len - 1)
    }
}

/// Byte offset of the replicated pixel for tap coordinate `i` in a packed row.
#[inline]
pub fn edge_byte_offset(i: isize, len: usize, bytes_per_pixel: usize) -> usize {
    edge_index(i, len) * bytes_per_pixel
}
