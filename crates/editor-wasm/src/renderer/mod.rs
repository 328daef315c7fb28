//! Rendererモジュール
//!
//! シーンの各オブジェクトと座標軸を1フレームに描画する

mod axes;
mod bindings;
mod depth;
mod gpu_context;
mod scene_pipeline;

use std::collections::HashMap;

use glam::Mat4;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use editor_core::{EditorSettings, ObjectId, ObjectMatrices, Scene};
use editor_renderer::{Camera, GpuMesh, Lighting, ShadingUniform};

use crate::shaders;
use crate::utils::js_error;

use axes::AxisResources;
use gpu_context::GpuContext;
use scene_pipeline::ScenePipeline;

/// Renderer構造体
pub struct Renderer {
    ctx: GpuContext,
    pipeline: ScenePipeline,
    axes: AxisResources,

    /// オブジェクトごとのGPUメッシュ（IDは再利用されない）
    meshes: HashMap<ObjectId, GpuMesh>,

    // Depth buffer
    #[allow(dead_code)]
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
}

/// 1パス分の描画内容
struct DrawCall<'a> {
    pipeline: &'a wgpu::RenderPipeline,
    mesh: &'a GpuMesh,
}

impl Renderer {
    /// 新しいRendererを作成（非同期）
    ///
    /// シェーダーのコンパイル・リンクに失敗した場合はエラーを返す
    pub async fn create(
        canvas: HtmlCanvasElement,
        settings: &EditorSettings,
    ) -> Result<Renderer, JsValue> {
        let ctx = GpuContext::new(canvas, settings.clear_color).await?;

        ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = ScenePipeline::new(&ctx, shaders::MAIN_SHADER);
        if let Some(err) = ctx.device.pop_error_scope().await {
            return Err(js_error("Shader compilation failed", err));
        }

        let axes = AxisResources::new(&ctx);
        let (depth_texture, depth_view) =
            depth::create_texture(&ctx.device, ctx.width(), ctx.height());

        tracing::info!("renderer initialized");

        Ok(Self {
            ctx,
            pipeline,
            axes,
            meshes: HashMap::new(),
            depth_texture,
            depth_view,
        })
    }

    /// Canvas サイズ変更。適用された場合 true
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.ctx.resize(width, height) {
            return false;
        }

        let (depth_texture, depth_view) = depth::create_texture(&self.ctx.device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;

        tracing::debug!(width, height, "renderer resized");
        true
    }

    pub fn width(&self) -> u32 {
        self.ctx.width()
    }

    pub fn height(&self) -> u32 {
        self.ctx.height()
    }

    pub fn aspect(&self) -> f32 {
        self.ctx.aspect()
    }

    /// シーンに存在するオブジェクトのメッシュをアップロードし、削除済みのものを破棄
    fn sync_meshes(&mut self, scene: &Scene) {
        self.meshes.retain(|id, _| scene.contains(*id));
        for (id, object) in scene.iter() {
            if !self.meshes.contains_key(&id) {
                let mesh = GpuMesh::from_mesh(&self.ctx.device, object.name.as_str(), &object.mesh);
                self.meshes.insert(id, mesh);
            }
        }
    }

    /// 1フレーム描画
    ///
    /// オブジェクトをシーン順に描いた後、座標軸を単位モデル行列・発光色で描く。
    /// Uniformを書き換えるたびにsubmitするので、1描画 = 1パス
    pub fn render_scene(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        lighting: &Lighting,
    ) -> Result<(), JsValue> {
        self.sync_meshes(scene);

        let output = match self.ctx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // 再設定して次のフレームで描く
                self.ctx.surface.configure(&self.ctx.device, &self.ctx.config);
                return Ok(());
            }
            Err(e) => return Err(js_error("Failed to get surface texture", e)),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_matrix = camera.view_matrix();
        let projection = camera.projection_matrix();

        let mut first = true;

        for (id, object) in scene.iter() {
            let Some(mesh) = self.meshes.get(&id) else {
                continue;
            };
            let matrices = ObjectMatrices::new(object.model_matrix(), view_matrix, projection);
            let shading = ShadingUniform::for_object(object.is_light, lighting, view_matrix);

            self.pipeline
                .bindings
                .write(&self.ctx.queue, &matrices.uniform(), &shading);
            self.submit_pass(
                &view,
                first,
                DrawCall {
                    pipeline: &self.pipeline.triangles,
                    mesh,
                },
            );
            first = false;
        }

        let axis_matrices = ObjectMatrices::new(Mat4::IDENTITY, view_matrix, projection).uniform();
        for axis in &self.axes.axes {
            self.pipeline
                .bindings
                .write(&self.ctx.queue, &axis_matrices, &axis.shading);
            self.submit_pass(
                &view,
                first,
                DrawCall {
                    pipeline: &self.pipeline.lines,
                    mesh: &axis.mesh,
                },
            );
            first = false;
        }

        output.present();

        Ok(())
    }

    /// 1つのメッシュを描画してsubmit（最初のパスのみClear）
    fn submit_pass(&self, view: &wgpu::TextureView, clear: bool, draw: DrawCall<'_>) {
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: if clear {
                            wgpu::LoadOp::Clear(self.ctx.clear_color)
                        } else {
                            wgpu::LoadOp::Load
                        },
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: if clear {
                            wgpu::LoadOp::Clear(1.0)
                        } else {
                            wgpu::LoadOp::Load
                        },
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(draw.pipeline);
            self.pipeline.bindings.bind(&mut render_pass);
            render_pass.set_vertex_buffer(0, draw.mesh.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(draw.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..draw.mesh.num_indices, 0, 0..1);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
    }
}
