//! Umbrella crate for the `separable-resample` workspace.
//!
//! Re-exports the raster primitives of `sr-core` and the filter passes of
//! `sr-resample`. Kernel choice and coefficient generation stay with the
//! caller; see the `resize_image` example for a minimal two-pass driver.

pub use sr_core::*;
pub use sr_resample::*;
