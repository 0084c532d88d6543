//! WGSL shader sources for the GPU keying pipelines.

#![cfg_attr(not(feature = "wgpu"), allow(dead_code))]

/// Per-pixel chroma-key kernel.
///
/// One invocation per destination pixel in 16x16 workgroups. Destination
/// pixels outside the source extent read transparent black; the alpha is
/// the continuous classification rule over `dot(rgb, weights)`.
/// Parameters arrive pre-clamped (see `KernelParams`).
pub const CHROMA_KEY: &str = r#"
struct KeyParams {
    weights: vec3<f32>,
    threshold: f32,
    smoothing: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
}

@group(0) @binding(0) var<storage, read> src: array<f32>;
@group(0) @binding(1) var<storage, read_write> dst: array<f32>;
@group(0) @binding(2) var<uniform> dims: vec4<u32>;  // src_w, src_h, dst_w, dst_h
@group(0) @binding(3) var<uniform> params: KeyParams;

@compute @workgroup_size(16, 16)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    if id.x >= dims.z || id.y >= dims.w { return; }

    var rgba = vec4<f32>(0.0, 0.0, 0.0, 0.0);
    if id.x < dims.x && id.y < dims.y {
        let si = (id.y * dims.x + id.x) * 4u;
        rgba = vec4<f32>(src[si], src[si + 1u], src[si + 2u], src[si + 3u]);
    }

    let score = dot(rgba.rgb, params.weights);
    var alpha: f32;
    if params.smoothing <= 0.0 {
        alpha = select(1.0, 0.0, score > params.threshold);
    } else {
        alpha = 1.0 - smoothstep(params.threshold, params.threshold + params.smoothing, score);
    }

    let di = (id.y * dims.z + id.x) * 4u;
    dst[di] = rgba.r;
    dst[di + 1u] = rgba.g;
    dst[di + 2u] = rgba.b;
    dst[di + 3u] = alpha;
}
"#;

/// Cube LUT application (trilinear, RGBA entries, blue-major layout).
pub const CUBE_LUT: &str = r#"
@group(0) @binding(0) var<storage, read> src: array<f32>;
@group(0) @binding(1) var<storage, read_write> dst: array<f32>;
@group(0) @binding(2) var<uniform> dims: vec4<u32>;  // w, h, cube_size, 0
@group(0) @binding(3) var<storage, read> lut: array<f32>;

fn entry(r: u32, g: u32, b: u32, s: u32, ch: u32) -> f32 {
    return lut[((b * s + g) * s + r) * 4u + ch];
}

@compute @workgroup_size(16, 16)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    if id.x >= dims.x || id.y >= dims.y { return; }

    let base = (id.y * dims.x + id.x) * 4u;
    let s = dims.z;
    let n = f32(s - 1u);

    let r = clamp(src[base], 0.0, 1.0) * n;
    let g = clamp(src[base + 1u], 0.0, 1.0) * n;
    let b = clamp(src[base + 2u], 0.0, 1.0) * n;

    let r0 = min(u32(floor(r)), s - 2u);
    let g0 = min(u32(floor(g)), s - 2u);
    let b0 = min(u32(floor(b)), s - 2u);

    let rf = r - f32(r0);
    let gf = g - f32(g0);
    let bf = b - f32(b0);

    for (var ch = 0u; ch < 4u; ch = ch + 1u) {
        let c000 = entry(r0, g0, b0, s, ch);
        let c100 = entry(r0 + 1u, g0, b0, s, ch);
        let c010 = entry(r0, g0 + 1u, b0, s, ch);
        let c110 = entry(r0 + 1u, g0 + 1u, b0, s, ch);
        let c001 = entry(r0, g0, b0 + 1u, s, ch);
        let c101 = entry(r0 + 1u, g0, b0 + 1u, s, ch);
        let c011 = entry(r0, g0 + 1u, b0 + 1u, s, ch);
        let c111 = entry(r0 + 1u, g0 + 1u, b0 + 1u, s, ch);

        let c00 = c000 + rf * (c100 - c000);
        let c10 = c010 + rf * (c110 - c010);
        let c01 = c001 + rf * (c101 - c001);
        let c11 = c011 + rf * (c111 - c011);

        let c0 = c00 + gf * (c10 - c00);
        let c1 = c01 + gf * (c11 - c01);

        dst[base + ch] = c0 + bf * (c1 - c0);
    }
}
"#;

/// Porter-Duff over with premultiplied inputs: bg = fg + bg * (1 - fg.a).
pub const COMPOSITE_OVER: &str = r#"
@group(0) @binding(0) var<storage, read> fg: array<f32>;
@group(0) @binding(1) var<storage, read_write> bg: array<f32>;
@group(0) @binding(2) var<uniform> dims: vec4<u32>;  // w, h, 0, 0

@compute @workgroup_size(16, 16)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    if id.x >= dims.x || id.y >= dims.y { return; }

    let i = (id.y * dims.x + id.x) * 4u;
    let inv = 1.0 - fg[i + 3u];

    bg[i] = fg[i] + bg[i] * inv;
    bg[i + 1u] = fg[i + 1u] + bg[i + 1u] * inv;
    bg[i + 2u] = fg[i + 2u] + bg[i + 2u] * inv;
    bg[i + 3u] = fg[i + 3u] + bg[i + 3u] * inv;
}
"#;
