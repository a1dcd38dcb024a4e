//! Example: two-pass separable resize of an image file.
//!
//! Decodes the input, converts it to the requested packed format, builds box,
//! triangle or nearest-neighbor tables for both axes, and runs a horizontal
//! then a vertical pass. Each pass writes its result transposed, so the second
//! pass restores orientation. The resized image and a JSON report are written
//! next to each other.
//!
//! Run from the workspace root:
//!   cargo run -p separable-resample --example resize_image -- --help
//!   cargo run -p separable-resample --example resize_image --features rayon -- \
//!       --input in.png --output out.png --width 320 --height 240 --kernel triangle

use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use image::{GrayImage, ImageBuffer, ImageReader, Luma, Rgba, RgbaImage};
use separable_resample::{FilterTable, PassFilter, PixelFormat, Raster, Rect};
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Kernel {
    /// Box filter (pixel averaging).
    Box,
    /// Triangle filter (bilinear).
    Triangle,
    /// Unweighted mean of the taps a box filter selects.
    Nearest,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Rgba8,
    Rgba16,
    Gray8,
    Gray16,
}

impl Format {
    fn pixel_format(self) -> PixelFormat {
        match self {
            Self::Rgba8 => PixelFormat::Rgba8,
            Self::Rgba16 => PixelFormat::Rgba16,
            Self::Gray8 => PixelFormat::Gray8,
            Self::Gray16 => PixelFormat::Gray16,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Resize an image with separable filter passes")]
struct Args {
    /// Input image path
    #[arg(long)]
    input: String,

    /// Output image path
    #[arg(long, default_value = "resized.png")]
    output: String,

    /// Output width in pixels
    #[arg(long)]
    width: usize,

    /// Output height in pixels
    #[arg(long)]
    height: usize,

    /// Resampling kernel
    #[arg(long, value_enum, default_value_t = Kernel::Triangle)]
    kernel: Kernel,

    /// Packed format the passes run in
    #[arg(long, value_enum, default_value_t = Format::Rgba8)]
    format: Format,

    /// Report JSON path (default: <output>.json)
    #[arg(long)]
    report: Option<String>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PassDto {
    filter: &'static str,
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
    taps: usize,
    scale: f64,
    /// Wall-clock time for this pass, in milliseconds.
    elapsed_ms: f64,
}

#[derive(Serialize)]
struct Report {
    input: String,
    output: String,
    format: String,
    kernel: Kernel,
    passes: Vec<PassDto>,
}

// ── Tables ────────────────────────────────────────────────────────────────────

/// Taps per output sample at unit scale; all three kernels span two pixels.
const KERNEL_TAPS: usize = 2;

impl Kernel {
    fn weight(self, x: f64) -> f64 {
        match self {
            Self::Box | Self::Nearest => {
                if (-0.5..0.5).contains(&x) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Triangle => (1.0 - x.abs()).max(0.0),
        }
    }
}

/// One axis worth of tables in the coefficient type the format needs.
enum AxisTable {
    Narrow(FilterTable<i16>),
    Wide(FilterTable<i32>),
    Select(FilterTable<bool>),
}

impl AxisTable {
    fn filter(&self) -> PassFilter<'_> {
        match self {
            Self::Narrow(t) => PassFilter::Convolve8(t),
            Self::Wide(t) => PassFilter::Convolve16(t),
            Self::Select(t) => PassFilter::Nearest(t),
        }
    }
}

fn build_axis(
    src_len: usize,
    dst_len: usize,
    kernel: Kernel,
    format: PixelFormat,
) -> Result<AxisTable> {
    if src_len == 0 || dst_len == 0 {
        bail!("cannot resample an axis of length {src_len} to {dst_len}");
    }

    let scale = src_len as f64 / dst_len as f64;
    let filter_length = KERNEL_TAPS * scale.ceil().max(1.0) as usize;
    let filter_factor = (1.0 / scale).min(1.0);

    let mut offset = Vec::with_capacity(dst_len);
    let mut weights = Vec::with_capacity(dst_len * filter_length);
    for d in 0..dst_len {
        let center = scale * (d as f64 + 0.5) - 0.5;
        let start = center.floor() as isize - filter_length as isize / 2 + 1;
        let rel = center - start as f64;
        offset.push(start);
        for i in 0..filter_length {
            weights.push(kernel.weight((rel - i as f64) * filter_factor));
        }
    }

    let table = match (kernel, format.is_wide()) {
        (Kernel::Nearest, _) => {
            let selected: Vec<bool> = weights.iter().map(|&w| w != 0.0).collect();
            let t = FilterTable::new(selected, offset, filter_length, scale)?;
            t.check_weights()?;
            AxisTable::Select(t)
        }
        (_, false) => {
            let coeffs: Vec<i16> = weights.iter().map(|&w| (w * 256.0) as i16).collect();
            let t = FilterTable::new(coeffs, offset, filter_length, scale)?;
            t.check_sums()?;
            AxisTable::Narrow(t)
        }
        (_, true) => {
            let coeffs: Vec<i32> = weights.iter().map(|&w| (w * 65536.0) as i32).collect();
            let t = FilterTable::new(coeffs, offset, filter_length, scale)?;
            t.check_sums()?;
            AxisTable::Wide(t)
        }
    };
    Ok(table)
}

// ── Image I/O ─────────────────────────────────────────────────────────────────

fn load(path: &str, format: Format) -> Result<Raster> {
    let img = ImageReader::open(path)
        .with_context(|| format!("opening {path}"))?
        .decode()
        .with_context(|| format!("decoding {path}"))?;

    let pixel_format = format.pixel_format();
    let rect = Rect::from_size(img.width() as usize, img.height() as usize);
    let data: Vec<u8> = match format {
        Format::Rgba8 => img.to_rgba8().into_raw(),
        Format::Gray8 => img.to_luma8().into_raw(),
        Format::Rgba16 => be_bytes(&img.to_rgba16().into_raw()),
        Format::Gray16 => be_bytes(&img.to_luma16().into_raw()),
    };

    Raster::from_vec(pixel_format, rect, rect.width * pixel_format.bytes_per_pixel(), data)
        .context("wrapping decoded pixels")
}

fn save(raster: Raster, path: &str) -> Result<()> {
    let (w, h) = (raster.width() as u32, raster.height() as u32);
    let format = raster.format();
    let bad_len = || format!("{format} buffer does not match {w}x{h}");

    let written = match format {
        PixelFormat::Rgba8 => RgbaImage::from_raw(w, h, raster.into_data())
            .with_context(bad_len)?
            .save(path),
        PixelFormat::Gray8 => GrayImage::from_raw(w, h, raster.into_data())
            .with_context(bad_len)?
            .save(path),
        PixelFormat::Rgba16 => {
            ImageBuffer::<Rgba<u16>, Vec<u16>>::from_raw(w, h, be_words(raster.data()))
                .with_context(bad_len)?
                .save(path)
        }
        PixelFormat::Gray16 => {
            ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w, h, be_words(raster.data()))
                .with_context(bad_len)?
                .save(path)
        }
        PixelFormat::Ycc8 => bail!("{format} rasters cannot be encoded directly"),
    };
    written.with_context(|| format!("writing {path}"))
}

fn be_bytes(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

fn be_words(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .collect()
}

// ── Passes ────────────────────────────────────────────────────────────────────

/// Filters `src` rows into a transposed raster with `rows` rows.
fn run_pass(src: &Raster, table: &AxisTable, rows: usize) -> Result<(Raster, PassDto)> {
    let filter = table.filter();
    let mut dst = Raster::new(src.format(), Rect::from_size(src.height(), rows));

    let t0 = Instant::now();
    #[cfg(feature = "rayon")]
    separable_resample::resample_pass_par(&src.as_view(), dst.as_view_mut(), filter, 32)?;
    #[cfg(not(feature = "rayon"))]
    separable_resample::resample_pass(&src.as_view(), &mut dst.as_view_mut(), filter)?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let dto = PassDto {
        filter: filter.name(),
        src_width: src.width(),
        src_height: src.height(),
        dst_width: dst.width(),
        dst_height: dst.height(),
        taps: filter.filter_length(),
        scale: filter.scale(),
        elapsed_ms,
    };
    Ok((dst, dto))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let src = load(&args.input, args.format)?;
    let format = src.format();
    println!(
        "{}: {}x{} {format} -> {}x{} ({:?})",
        args.input,
        src.width(),
        src.height(),
        args.width,
        args.height,
        args.kernel
    );

    let horizontal = build_axis(src.width(), args.width, args.kernel, format)
        .context("building horizontal table")?;
    let vertical = build_axis(src.height(), args.height, args.kernel, format)
        .context("building vertical table")?;

    let (tmp, first) = run_pass(&src, &horizontal, args.width)?;
    let (dst, second) = run_pass(&tmp, &vertical, args.height)?;
    println!(
        "passes: {:.2} ms + {:.2} ms",
        first.elapsed_ms, second.elapsed_ms
    );

    save(dst, &args.output)?;

    let report_path = args
        .report
        .clone()
        .unwrap_or_else(|| format!("{}.json", args.output));
    let report = Report {
        input: args.input,
        output: args.output,
        format: format.to_string(),
        kernel: args.kernel,
        passes: vec![first, second],
    };
    let out_file = std::fs::File::create(&report_path)
        .with_context(|| format!("creating {report_path}"))?;
    serde_json::to_writer_pretty(out_file, &report)
        .with_context(|| format!("writing {report_path}"))?;
    println!("report written to {report_path}");

    Ok(())
}
