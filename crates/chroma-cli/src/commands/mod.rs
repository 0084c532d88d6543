//! CLI command implementations.

pub mod backends;
pub mod key;
pub mod lut;

use anyhow::{Context, Result, bail};
use std::path::Path;

use chroma_core::{Frame, PixelLayout};

/// Loads a packed RGBA8 frame from disk.
pub fn load_frame(path: &Path, width: u32, height: u32) -> Result<Frame> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let frame = Frame::from_bytes(&bytes, width, height, PixelLayout::Rgba8)
        .with_context(|| format!("{} is not a {width}x{height} RGBA8 frame", path.display()))?;
    Ok(frame)
}

/// Saves a frame as packed RGBA8, clamping each channel to [0, 1].
pub fn save_frame(path: &Path, frame: &Frame) -> Result<()> {
    let bytes: Vec<u8> = frame
        .data()
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Parses a backend name from the command line.
pub fn parse_backend(name: &str) -> Result<chroma_compute::Backend> {
    use chroma_compute::Backend;
    match name {
        "auto" => Ok(Backend::Auto),
        "cpu" => Ok(Backend::Cpu),
        "wgpu" => Ok(Backend::Wgpu),
        other => bail!("unknown backend '{other}' (expected auto, cpu, or wgpu)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_core::Rgba;

    #[test]
    fn test_frame_roundtrip_rgba8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.rgba");

        let frame = Frame::solid(4, 2, Rgba::new(1.0, 0.5, 0.0, 1.0)).unwrap();
        save_frame(&path, &frame).unwrap();

        let loaded = load_frame(&path, 4, 2).unwrap();
        let px = loaded.pixel(0, 0);
        assert_eq!(px.r, 1.0);
        assert!((px.g - 0.5).abs() < 1.0 / 255.0);
        assert_eq!(px.a, 1.0);
    }

    #[test]
    fn test_load_frame_size_checked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.rgba");
        std::fs::write(&path, [0u8; 16]).unwrap();
        assert!(load_frame(&path, 4, 4).is_err());
    }

    #[test]
    fn test_parse_backend_names() {
        assert!(parse_backend("cpu").is_ok());
        assert!(parse_backend("auto").is_ok());
        assert!(parse_backend("metal").is_err());
    }
}
