//! wgpu compute backend.
//!
//! Dispatches the WGSL kernels over 16x16 workgroups and reads results
//! back through a staging buffer. Frames live in storage buffers as flat
//! f32 RGBA, the same layout the CPU backend iterates over, so the two
//! backends are interchangeable behind [`KeyCompute`].

use std::sync::Arc;

use wgpu::util::DeviceExt;

use chroma_core::Frame;
use chroma_lut::CubeLut;

use super::{KernelParams, KeyCompute, check_grid, check_same_extent};
use crate::grid::DispatchGrid;
use crate::shaders;
use crate::{ComputeError, ComputeResult};

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct DimsUniform {
    dims: [u32; 4],
}

/// GPU keying backend.
pub struct WgpuKernel {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    key_pipeline: wgpu::ComputePipeline,
    lut_pipeline: wgpu::ComputePipeline,
    over_pipeline: wgpu::ComputePipeline,
}

impl WgpuKernel {
    /// Creates the backend, compiling all kernels up front.
    pub fn new() -> ComputeResult<Self> {
        pollster::block_on(Self::new_async())
    }

    /// Checks whether a compute-capable adapter exists.
    pub fn is_available() -> bool {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .is_some()
    }

    async fn new_async() -> ComputeResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ComputeError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("chroma_key_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| ComputeError::DeviceCreation(e.to_string()))?;

        let key_pipeline = Self::create_pipeline(&device, shaders::CHROMA_KEY, "key_pipeline");
        let lut_pipeline = Self::create_pipeline(&device, shaders::CUBE_LUT, "lut_pipeline");
        let over_pipeline =
            Self::create_pipeline(&device, shaders::COMPOSITE_OVER, "over_pipeline");

        Ok(Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
            key_pipeline,
            lut_pipeline,
            over_pipeline,
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        source: &str,
        label: &str,
    ) -> wgpu::ComputePipeline {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some(label),
            layout: None, // auto layout
            module: &module,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        })
    }

    fn storage_buffer(&self, data: &[f32], label: &str) -> wgpu::Buffer {
        self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::COPY_SRC
                | wgpu::BufferUsages::COPY_DST,
        })
    }

    fn output_buffer(&self, len: usize, label: &str) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (len * 4) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        })
    }

    fn dims_buffer(&self, dims: [u32; 4]) -> wgpu::Buffer {
        let uniform = DimsUniform { dims };
        self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("dims_uniform"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM,
        })
    }

    fn dispatch(
        &self,
        pipeline: &wgpu::ComputePipeline,
        buffers: &[&wgpu::Buffer],
        groups: (u32, u32, u32),
    ) {
        let entries: Vec<wgpu::BindGroupEntry> = buffers
            .iter()
            .enumerate()
            .map(|(i, buf)| wgpu::BindGroupEntry {
                binding: i as u32,
                resource: buf.as_entire_binding(),
            })
            .collect();
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kernel_bind_group"),
            layout: &pipeline.get_bind_group_layout(0),
            entries: &entries,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("kernel_encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("kernel_pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(groups.0, groups.1, groups.2);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn readback(&self, buffer: &wgpu::Buffer, out: &mut [f32]) -> ComputeResult<()> {
        let size = (out.len() * 4) as u64;
        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("staging_buffer"),
            size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self.device.create_command_encoder(&Default::default());
        encoder.copy_buffer_to_buffer(buffer, 0, &staging, 0, size);
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |r| {
            let _ = tx.send(r);
        });
        self.device.poll(wgpu::Maintain::Wait);

        rx.recv()
            .map_err(|_| ComputeError::OperationFailed("map channel closed".into()))?
            .map_err(|e| ComputeError::OperationFailed(format!("buffer map failed: {e}")))?;

        let data = slice.get_mapped_range();
        out.copy_from_slice(bytemuck::cast_slice(&data));
        drop(data);
        staging.unmap();

        Ok(())
    }
}

impl std::fmt::Debug for WgpuKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuKernel").finish_non_exhaustive()
    }
}

impl KeyCompute for WgpuKernel {
    fn name(&self) -> &'static str {
        "wgpu"
    }

    fn key_frame(
        &self,
        src: &Frame,
        dst: &mut Frame,
        params: KernelParams,
        grid: &DispatchGrid,
    ) -> ComputeResult<()> {
        check_grid(grid, dst)?;

        let (sw, sh) = src.extent();
        let (dw, dh) = dst.extent();

        let src_buf = self.storage_buffer(src.data(), "key_src");
        let dst_buf = self.output_buffer(dst.data().len(), "key_dst");
        let dims = self.dims_buffer([sw, sh, dw, dh]);
        let params_buf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("key_params"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        self.dispatch(
            &self.key_pipeline,
            &[&src_buf, &dst_buf, &dims, &params_buf],
            grid.groups(),
        );
        self.readback(&dst_buf, dst.data_mut())
    }

    fn apply_lut(&self, src: &Frame, dst: &mut Frame, lut: &CubeLut) -> ComputeResult<()> {
        check_same_extent(src, dst)?;

        let (w, h) = src.extent();
        let grid = DispatchGrid::for_extent(w, h);

        let src_buf = self.storage_buffer(src.data(), "lut_src");
        let dst_buf = self.output_buffer(dst.data().len(), "lut_dst");
        let dims = self.dims_buffer([w, h, lut.size() as u32, 0]);
        let lut_buf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lut_table"),
            contents: bytemuck::cast_slice(lut.data()),
            usage: wgpu::BufferUsages::STORAGE,
        });

        self.dispatch(
            &self.lut_pipeline,
            &[&src_buf, &dst_buf, &dims, &lut_buf],
            grid.groups(),
        );
        self.readback(&dst_buf, dst.data_mut())
    }

    fn composite_over(&self, fg: &Frame, bg: &mut Frame) -> ComputeResult<()> {
        check_same_extent(fg, bg)?;

        let (w, h) = fg.extent();
        let grid = DispatchGrid::for_extent(w, h);

        let fg_buf = self.storage_buffer(fg.data(), "over_fg");
        let bg_buf = self.storage_buffer(bg.data(), "over_bg");
        let dims = self.dims_buffer([w, h, 0, 0]);

        self.dispatch(&self.over_pipeline, &[&fg_buf, &bg_buf, &dims], grid.groups());
        self.readback(&bg_buf, bg.data_mut())
    }
}
