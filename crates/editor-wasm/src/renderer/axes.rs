//! 座標軸の描画リソース
//!
//! 軸グリッドは変化しないので、初期化時に一度だけアップロードする

use editor_renderer::{AxisGrid, GpuMesh, ShadingUniform};
use glam::Vec3;

use super::gpu_context::GpuContext;

/// アップロード済みの1軸
pub struct AxisDraw {
    pub mesh: GpuMesh,
    pub shading: ShadingUniform,
}

/// 3軸分
pub struct AxisResources {
    pub axes: Vec<AxisDraw>,
}

impl AxisResources {
    pub fn new(ctx: &GpuContext) -> Self {
        let grid = AxisGrid::new();
        let axes = grid
            .iter()
            .map(|lines| AxisDraw {
                mesh: GpuMesh::new(
                    &ctx.device,
                    lines.axis.label(),
                    &lines.vertices,
                    &lines.indices,
                ),
                shading: ShadingUniform::emissive(Vec3::from_array(lines.axis.color())),
            })
            .collect();

        tracing::debug!("axis grid uploaded");
        Self { axes }
    }
}
