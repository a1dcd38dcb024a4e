use core::fmt;

/// Packed pixel encodings understood by the resamplers.
///
/// 16-bit channels are stored big-endian, two bytes per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit red, green, blue, alpha.
    Rgba8,
    /// 16-bit big-endian red, green, blue, alpha.
    Rgba16,
    /// 8-bit luminance.
    Gray8,
    /// 16-bit big-endian luminance.
    Gray16,
    /// 8-bit Y, Cb, Cr interleaved per pixel.
    Ycc8,
}

impl PixelFormat {
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgba8 | Self::Rgba16 => 4,
            Self::Gray8 | Self::Gray16 => 1,
            Self::Ycc8 => 3,
        }
    }

    pub const fn bytes_per_channel(self) -> usize {
        match self {
            Self::Rgba8 | Self::Gray8 | Self::Ycc8 => 1,
            Self::Rgba16 | Self::Gray16 => 2,
        }
    }

    pub const fn bytes_per_pixel(self) -> usize {
        self.channels() * self.bytes_per_channel()
    }

    pub const fn is_wide(self) -> bool {
        self.bytes_per_channel() == 2
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgba8 => f.write_str("RGBA8"),
            Self::Rgba16 => f.write_str("RGBA16"),
            Self::Gray8 => f.write_str("Gray8"),
            Self::Gray16 => f.write_str("Gray16"),
            Self::Ycc8 => f.write_str("YCbCr8"),
        }
    }
}
