//! Uniformバッファとバインドグループ
//!
//! group(0): 変換行列, group(1): シェーディング。オブジェクトと座標軸で共有する

use wgpu::util::DeviceExt;

use editor_core::TransformUniform;
use editor_renderer::ShadingUniform;
use glam::Vec3;

use super::gpu_context::GpuContext;

/// 1バインディングのUniformバッファ
pub struct UniformSlot {
    pub buffer: wgpu::Buffer,
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    fn new(ctx: &GpuContext, label: &str, contents: &[u8], visibility: wgpu::ShaderStages) -> Self {
        let buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Buffer")),
            contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} Bind Group Layout")),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }
}

/// 描画に使う2つのUniform
pub struct Bindings {
    pub transforms: UniformSlot,
    pub shading: UniformSlot,
}

impl Bindings {
    pub fn new(ctx: &GpuContext) -> Self {
        let transforms = UniformSlot::new(
            ctx,
            "Transforms",
            bytemuck::bytes_of(&TransformUniform::identity()),
            wgpu::ShaderStages::VERTEX,
        );
        let shading = UniformSlot::new(
            ctx,
            "Shading",
            bytemuck::bytes_of(&ShadingUniform::emissive(Vec3::ONE)),
            wgpu::ShaderStages::FRAGMENT,
        );

        Self {
            transforms,
            shading,
        }
    }

    /// パイプラインレイアウト（group 0, 1 の順）
    pub fn pipeline_layout(&self, ctx: &GpuContext) -> wgpu::PipelineLayout {
        ctx.device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Editor Pipeline Layout"),
                bind_group_layouts: &[&self.transforms.layout, &self.shading.layout],
                push_constant_ranges: &[],
            })
    }

    /// 次のsubmitで使う値を書き込む
    pub fn write(
        &self,
        queue: &wgpu::Queue,
        transforms: &TransformUniform,
        shading: &ShadingUniform,
    ) {
        queue.write_buffer(&self.transforms.buffer, 0, bytemuck::bytes_of(transforms));
        queue.write_buffer(&self.shading.buffer, 0, bytemuck::bytes_of(shading));
    }

    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.transforms.bind_group, &[]);
        pass.set_bind_group(1, &self.shading.bind_group, &[]);
    }
}
