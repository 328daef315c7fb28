//! シーン描画パイプラインモジュール
//!
//! 三角形リスト（オブジェクト）と線分リスト（座標軸）は同じシェーダー・レイアウトを使う

use super::bindings::Bindings;
use super::depth::DEPTH_FORMAT;
use super::gpu_context::GpuContext;

use editor_renderer::Vertex;

/// 描画パイプライン一式
pub struct ScenePipeline {
    /// オブジェクト用（三角形）
    pub triangles: wgpu::RenderPipeline,
    /// 座標軸用（線分）
    pub lines: wgpu::RenderPipeline,
    pub bindings: Bindings,
}

impl ScenePipeline {
    /// 新しいシーンパイプラインを作成
    ///
    /// シェーダーのエラーは呼び出し側のエラースコープで捕捉する
    pub fn new(ctx: &GpuContext, shader_source: &str) -> Self {
        let bindings = Bindings::new(ctx);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Editor Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let layout = bindings.pipeline_layout(ctx);

        // 元の立方体は巻き順が一定でないため、カリングは行わない
        let triangles = create_pipeline(
            ctx,
            &layout,
            &shader,
            "Object Render Pipeline",
            wgpu::PrimitiveTopology::TriangleList,
        );
        // 座標軸も深度テストあり（オブジェクトの背後では隠れる）
        let lines = create_pipeline(
            ctx,
            &layout,
            &shader,
            "Axis Render Pipeline",
            wgpu::PrimitiveTopology::LineList,
        );

        Self {
            triangles,
            lines,
            bindings,
        }
    }
}

fn create_pipeline(
    ctx: &GpuContext,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.config.format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}
