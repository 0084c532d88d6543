//! # chroma-lut
//!
//! Cube LUT generation for table-driven chroma keying.
//!
//! A [`CubeLut`] is a dense N x N x N table of premultiplied RGBA values
//! that bakes the binary chroma-key classification rule into a
//! discretized function from input RGB to output RGBA. Generation is an
//! `O(N^3)` precompute meant to run once per parameter change; application
//! is a cheap per-pixel lookup.
//!
//! # Usage
//!
//! ```rust
//! use chroma_core::HueRange;
//! use chroma_lut::CubeLut;
//!
//! // Key out the green band once, apply per pixel thereafter.
//! let lut = CubeLut::generate(HueRange::new(0.3, 0.4), 64).unwrap();
//! let rgba = lut.apply([0.1, 0.9, 0.1]);
//! assert_eq!(rgba[3], 0.0);
//! ```
//!
//! # Flattening order
//!
//! The table is flattened blue-major: blue varies slowest, then green,
//! then red. Consuming filter graphs interpret the flat buffer by this
//! exact order together with the cube size, so it is part of the public
//! contract ([`CubeLut::to_bytes`]).

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cube_lut;
mod error;

pub use cube_lut::{CubeLut, Interpolation};
pub use error::{LutError, LutResult};
