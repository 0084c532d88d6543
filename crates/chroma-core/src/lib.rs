//! # chroma-core
//!
//! Core types for chroma-key video processing.
//!
//! This crate provides the foundational types used throughout the CHROMA-RS
//! workspace:
//!
//! - [`Frame`] - packed RGBA f32 frame buffer with pixel-format intake
//! - [`Rgb`], [`Rgba`] - pixel value types
//! - [`KeyParams`], [`HueRange`] - the chroma-key parameter model
//!
//! ## Crate Structure
//!
//! This crate is the foundation of CHROMA-RS and has no internal dependencies.
//! All other workspace crates depend on `chroma-core`:
//!
//! ```text
//! chroma-core (this crate)
//!    ^
//!    |
//!    +-- chroma-math (hue derivation, classification rule)
//!    +-- chroma-lut (cube LUT generation)
//!    +-- chroma-compute (CPU/GPU keying backends)
//!    +-- chroma-pipeline (frame pipeline orchestration)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for the parameter model

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod frame;
pub mod params;
pub mod pixel;

// Re-exports for convenience
pub use error::*;
pub use frame::*;
pub use params::*;
pub use pixel::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use chroma_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::frame::{Frame, PixelLayout};
    pub use crate::params::{HueRange, KeyParams};
    pub use crate::pixel::{Rgb, Rgba};
}
