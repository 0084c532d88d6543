//! Backend tests for chroma-compute.

use chroma_compute::{
    Backend, DispatchGrid, KernelParams, create_backend, describe_backends, select_best_backend,
};
use chroma_core::{Frame, HueRange, KeyParams, Rgba};
use chroma_lut::CubeLut;

fn green_screen_params() -> KernelParams {
    KernelParams::from(&KeyParams::green_screen())
}

#[test]
fn test_cpu_backend_available() {
    assert!(Backend::Cpu.is_available());
}

#[test]
fn test_auto_backend() {
    let backend = create_backend(Backend::Auto).unwrap();
    println!("auto-selected backend: {}", backend.name());
}

#[test]
fn test_select_best_is_available() {
    assert!(select_best_backend().is_available());
}

#[test]
fn test_describe_backends() {
    let desc = describe_backends();
    assert!(desc.iter().any(|(b, avail)| *b == Backend::Cpu && *avail));
}

#[test]
fn test_green_keyed_red_kept() {
    let backend = create_backend(Backend::Cpu).unwrap();
    let grid = DispatchGrid::for_extent(64, 64);
    let mut dst = Frame::new(64, 64).unwrap();

    let green = Frame::solid(64, 64, Rgba::new(0.0, 1.0, 0.0, 1.0)).unwrap();
    backend
        .key_frame(&green, &mut dst, green_screen_params(), &grid)
        .unwrap();
    assert_eq!(dst.pixel(32, 32).a, 0.0);

    let red = Frame::solid(64, 64, Rgba::new(1.0, 0.0, 0.0, 1.0)).unwrap();
    backend
        .key_frame(&red, &mut dst, green_screen_params(), &grid)
        .unwrap();
    assert_eq!(dst.pixel(32, 32), Rgba::new(1.0, 0.0, 0.0, 1.0));
}

#[test]
fn test_alpha_continuous_across_threshold() {
    // Sweeping the green channel through the transition band must not
    // produce jumps: the band is 0.11 wide, so per 0.001 of score the
    // alpha moves at most ~0.014.
    let backend = create_backend(Backend::Cpu).unwrap();
    let grid = DispatchGrid::for_extent(1, 1);
    let mut dst = Frame::new(1, 1).unwrap();
    let params = green_screen_params();

    let mut prev: Option<f32> = None;
    let mut g = 0.38f32;
    while g <= 0.60 {
        let src = Frame::solid(1, 1, Rgba::new(0.0, g, 0.0, 1.0)).unwrap();
        backend.key_frame(&src, &mut dst, params, &grid).unwrap();
        let alpha = dst.pixel(0, 0).a;
        if let Some(p) = prev {
            let jump = (alpha - p).abs();
            assert!(jump < 0.02, "alpha jump {jump} at green={g}");
        }
        prev = Some(alpha);
        g += 0.001;
    }
}

#[test]
fn test_zero_smoothing_hard_edge() {
    let backend = create_backend(Backend::Cpu).unwrap();
    let grid = DispatchGrid::for_extent(1, 1);
    let mut dst = Frame::new(1, 1).unwrap();
    let params = KernelParams::from(&KeyParams::new([0.0, 1.0, 0.0], 0.5, 0.0));

    let below = Frame::solid(1, 1, Rgba::new(0.0, 0.5, 0.0, 1.0)).unwrap();
    backend.key_frame(&below, &mut dst, params, &grid).unwrap();
    assert_eq!(dst.pixel(0, 0).a, 1.0);

    let above = Frame::solid(1, 1, Rgba::new(0.0, 0.500001, 0.0, 1.0)).unwrap();
    backend.key_frame(&above, &mut dst, params, &grid).unwrap();
    assert_eq!(dst.pixel(0, 0).a, 0.0);
}

#[test]
fn test_stale_grid_after_resize() {
    let backend = create_backend(Backend::Cpu).unwrap();
    let src = Frame::solid(32, 32, Rgba::new(0.0, 1.0, 0.0, 1.0)).unwrap();

    let grid = DispatchGrid::for_extent(32, 32);
    let mut dst = Frame::new(32, 32).unwrap();
    backend
        .key_frame(&src, &mut dst, green_screen_params(), &grid)
        .unwrap();

    // Destination grew; the old grid no longer covers it.
    let mut grown = Frame::new(48, 48).unwrap();
    let err = backend.key_frame(&src, &mut grown, green_screen_params(), &grid);
    assert!(err.is_err());

    let fresh = DispatchGrid::for_extent(48, 48);
    backend
        .key_frame(&src, &mut grown, green_screen_params(), &fresh)
        .unwrap();
}

#[test]
fn test_lut_and_kernel_agree_on_pure_green() {
    // The two classification rules differ in general but agree on the
    // canonical cases: pure green keys out, pure red stays opaque.
    let backend = create_backend(Backend::Cpu).unwrap();
    let lut = CubeLut::generate(HueRange::new(0.3, 0.4), 33).unwrap();

    let green = Frame::solid(4, 4, Rgba::new(0.0, 1.0, 0.0, 1.0)).unwrap();
    let mut via_lut = Frame::new(4, 4).unwrap();
    backend.apply_lut(&green, &mut via_lut, &lut).unwrap();
    assert_eq!(via_lut.pixel(0, 0).a, 0.0);

    let red = Frame::solid(4, 4, Rgba::new(1.0, 0.0, 0.0, 1.0)).unwrap();
    let mut via_lut = Frame::new(4, 4).unwrap();
    backend.apply_lut(&red, &mut via_lut, &lut).unwrap();
    assert_eq!(via_lut.pixel(0, 0).a, 1.0);
}

#[test]
fn test_composite_keyed_frame_over_background() {
    let backend = create_backend(Backend::Cpu).unwrap();
    let grid = DispatchGrid::for_extent(8, 8);
    let params = green_screen_params();

    let src = Frame::solid(8, 8, Rgba::new(0.0, 1.0, 0.0, 1.0)).unwrap();
    let mut keyed = Frame::new(8, 8).unwrap();
    backend.key_frame(&src, &mut keyed, params, &grid).unwrap();
    keyed.premultiply_alpha();

    let mut bg = Frame::solid(8, 8, Rgba::new(0.2, 0.2, 0.8, 1.0)).unwrap();
    backend.composite_over(&keyed, &mut bg).unwrap();

    // Keyed-out foreground leaves the background untouched.
    assert_eq!(bg.pixel(4, 4), Rgba::new(0.2, 0.2, 0.8, 1.0));
}

#[cfg(feature = "wgpu")]
#[test]
fn test_wgpu_backend_check() {
    let available = Backend::Wgpu.is_available();
    println!("wgpu available: {available}");

    if available {
        let backend = create_backend(Backend::Wgpu).unwrap();
        assert_eq!(backend.name(), "wgpu");

        let grid = DispatchGrid::for_extent(64, 64);
        let src = Frame::solid(64, 64, Rgba::new(0.0, 1.0, 0.0, 1.0)).unwrap();
        let mut dst = Frame::new(64, 64).unwrap();
        backend
            .key_frame(&src, &mut dst, KernelParams::from(&KeyParams::green_screen()), &grid)
            .unwrap();
        assert_eq!(dst.pixel(0, 0).a, 0.0);
    }
}
