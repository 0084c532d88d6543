//! Pixel value types.
//!
//! Channel values are normalized f32 in [0, 1]. Both types use `#[repr(C)]`
//! for predictable memory layout against flat frame buffers.

/// An RGB color sample.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Creates an RGB sample.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Channel values as an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Attaches an alpha channel without premultiplying.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba { r: self.r, g: self.g, b: self.b, a }
    }

    /// Multiplies each channel by `alpha` and attaches it,
    /// producing a premultiplied sample.
    #[inline]
    pub fn premultiplied(self, alpha: f32) -> Rgba {
        Rgba {
            r: self.r * alpha,
            g: self.g * alpha,
            b: self.b * alpha,
            a: alpha,
        }
    }
}

impl From<[f32; 3]> for Rgb {
    #[inline]
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// An RGBA color sample.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel (1 = opaque).
    pub a: f32,
}

impl Rgba {
    /// Creates an RGBA sample.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Channel values as an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The color channels without alpha.
    #[inline]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl From<[f32; 4]> for Rgba {
    #[inline]
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}
