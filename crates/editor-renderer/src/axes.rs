//! 座標軸グリッド
//! X/Y/Z の主軸線と、整数座標ごとの目盛り線（原点を除く）

use editor_core::math::Vec3;

use crate::mesh::Vertex;

/// 主軸線の半分の長さ
pub const AXIS_HALF_LENGTH: i32 = 50;
/// 目盛り線の半分の長さ
pub const TICK_HALF_SIZE: f32 = 0.1;

/// 軸の色定数（発光色として描画）
pub const COLOR_X: [f32; 3] = [1.0, 0.0, 0.0]; // 赤
pub const COLOR_Y: [f32; 3] = [0.0, 0.7, 0.0]; // 緑
pub const COLOR_Z: [f32; 3] = [0.0, 0.0, 1.0]; // 青

/// 座標軸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// 単位ベクトル
    pub fn unit(&self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// 目盛りを伸ばす2方向（軸に垂直）
    fn tick_directions(&self) -> [Vec3; 2] {
        match self {
            Axis::X => [Vec3::Y, Vec3::Z],
            Axis::Y => [Vec3::X, Vec3::Z],
            Axis::Z => [Vec3::X, Vec3::Y],
        }
    }

    pub fn color(&self) -> [f32; 3] {
        match self {
            Axis::X => COLOR_X,
            Axis::Y => COLOR_Y,
            Axis::Z => COLOR_Z,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "X Axis",
            Axis::Y => "Y Axis",
            Axis::Z => "Z Axis",
        }
    }
}

/// 1軸分の線分リスト（インデックス2つで1本）
#[derive(Debug, Clone)]
pub struct AxisLines {
    pub axis: Axis,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl AxisLines {
    /// 主軸線 + 目盛り線を生成
    pub fn generate(axis: Axis) -> Self {
        let dir = axis.unit();
        let half = AXIS_HALF_LENGTH as f32;

        let mut lines = Self {
            axis,
            vertices: Vec::new(),
            indices: Vec::new(),
        };
        lines.push_line(dir * -half, dir * half);

        for i in -AXIS_HALF_LENGTH..=AXIS_HALF_LENGTH {
            if i == 0 {
                continue;
            }
            let center = dir * i as f32;
            for tick in axis.tick_directions() {
                lines.push_line(center - tick * TICK_HALF_SIZE, center + tick * TICK_HALF_SIZE);
            }
        }

        lines
    }

    fn push_line(&mut self, start: Vec3, end: Vec3) {
        let base = self.vertices.len() as u32;
        self.vertices.push(Vertex::line(start));
        self.vertices.push(Vertex::line(end));
        self.indices.extend_from_slice(&[base, base + 1]);
    }

    /// 線分の本数
    pub fn line_count(&self) -> usize {
        self.indices.len() / 2
    }
}

/// 3軸分のグリッド。初期化後は変更しない
#[derive(Debug, Clone)]
pub struct AxisGrid {
    pub lines: [AxisLines; 3],
}

impl AxisGrid {
    pub fn new() -> Self {
        Self {
            lines: Axis::ALL.map(AxisLines::generate),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AxisLines> {
        self.lines.iter()
    }
}

impl Default for AxisGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_counts() {
        let grid = AxisGrid::new();
        for lines in grid.iter() {
            // 主軸 1本 + 100座標 * 2方向
            assert_eq!(lines.line_count(), 1 + 100 * 2);
            assert_eq!(lines.vertices.len(), lines.indices.len());
        }
    }

    #[test]
    fn test_main_line_spans_half_length() {
        let x = AxisLines::generate(Axis::X);
        assert_eq!(x.vertices[0].position, [-50.0, 0.0, 0.0]);
        assert_eq!(x.vertices[1].position, [50.0, 0.0, 0.0]);
    }

    #[test]
    fn test_no_tick_at_origin() {
        for axis in Axis::ALL {
            let lines = AxisLines::generate(axis);
            // 主軸以外の頂点は軸方向の座標が0にならない
            for v in &lines.vertices[2..] {
                let along = Vec3::from_array(v.position).dot(axis.unit());
                assert_ne!(along, 0.0);
            }
        }
    }

    #[test]
    fn test_ticks_perpendicular() {
        let y = AxisLines::generate(Axis::Y);
        // y = -50 の最初の目盛りは X 方向
        assert_eq!(y.vertices[2].position, [-0.1, -50.0, 0.0]);
        assert_eq!(y.vertices[3].position, [0.1, -50.0, 0.0]);
        assert_eq!(y.vertices[4].position, [0.0, -50.0, -0.1]);
    }

    #[test]
    fn test_indices_valid() {
        for lines in AxisGrid::new().iter() {
            let n = lines.vertices.len() as u32;
            assert!(lines.indices.iter().all(|&i| i < n));
        }
    }

    #[test]
    fn test_colors() {
        assert_eq!(Axis::X.color(), [1.0, 0.0, 0.0]);
        assert_eq!(Axis::Y.color(), [0.0, 0.7, 0.0]);
        assert_eq!(Axis::Z.color(), [0.0, 0.0, 1.0]);
    }
}
