//! # chroma-math
//!
//! Color math for chroma-key classification.
//!
//! This crate provides the numerically precise leaves of the keying
//! pipeline:
//!
//! - Hue derivation from RGB ([`hue`]) - max-channel form, with the
//!   achromatic case made explicit in the type
//! - Interpolation utilities ([`lerp`], [`smoothstep`], [`saturate`])
//! - The chroma-key classification rule in both its variants
//!   ([`hue_key_alpha`], [`weighted_key_alpha`])
//!
//! # The two classification variants
//!
//! The table-driven and per-pixel keying strategies share one conceptual
//! contract but use *different* decision surfaces, and both are implemented
//! faithfully rather than unified:
//!
//! - [`hue_key_alpha`] - binary: alpha is 0 inside a keyed hue interval,
//!   1 outside. Hard edge; feeds cube LUT generation.
//! - [`weighted_key_alpha`] - continuous: a weighted score is compared
//!   against a threshold with a smoothing band. Soft edge; feeds the
//!   per-pixel compute kernel.
//!
//! Both are pure functions of their inputs.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod hue;
mod interp;
mod key;

pub use hue::*;
pub use interp::*;
pub use key::*;
