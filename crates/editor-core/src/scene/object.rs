use serde::Serialize;

use crate::components::{Name, ShapeKind, Transform};
use crate::geometry::Mesh;
use crate::math::{Mat4, Vec3};

use super::ObjectId;

/// シーンオブジェクト
/// メッシュ（ローカル空間）+ 変換 + メタデータ
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub kind: ShapeKind,
    pub name: Name,
    pub mesh: Mesh,
    pub transform: Transform,
    /// 発光扱い（ライティングを受けず固定色で描画）
    pub is_light: bool,
}

impl SceneObject {
    /// デフォルト形状・デフォルト配置で生成
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            name: Name::from_kind(kind),
            mesh: Mesh::for_kind(kind),
            transform: Transform::default(),
            is_light: false,
        }
    }

    /// 位置を指定して生成
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// 変換を指定して生成
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// モデル行列
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// ワールド空間に焼き込んだ頂点列
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.mesh
            .vertices
            .iter()
            .map(|&v| self.transform.transform_point(v))
    }
}

/// 新規オブジェクトのランダム配置
///
/// `r` は [0, 1) の一様乱数。カメラ前方 (z ≈ -10) を中心とする 10x10x10 の箱に置く
pub fn random_placement(r: [f32; 3]) -> Vec3 {
    Vec3::new(
        (r[0] - 0.5) * 10.0,
        (r[1] - 0.5) * 10.0,
        (r[2] - 0.5) * 10.0 - 10.0,
    )
}

/// UIの一覧表示用サマリ
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSummary {
    pub id: u32,
    pub name: String,
    pub kind: ShapeKind,
    pub selected: bool,
}

/// プロパティパネル用の値（回転は度）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectProperties {
    pub name: String,
    pub kind: ShapeKind,
    pub size: f32,
    pub position: [f32; 3],
    pub rotation_degrees: [f32; 3],
}

impl ObjectProperties {
    pub fn from_object(object: &SceneObject) -> Self {
        let r = object.transform.rotation;
        Self {
            name: object.name.as_str().to_string(),
            kind: object.kind,
            size: object.transform.size,
            position: object.transform.position.to_array(),
            rotation_degrees: [r.x.to_degrees(), r.y.to_degrees(), r.z.to_degrees()],
        }
    }
}

impl ObjectSummary {
    pub(crate) fn new(id: ObjectId, object: &SceneObject, selected: bool) -> Self {
        Self {
            id: id.to_u32(),
            name: object.name.as_str().to_string(),
            kind: object.kind,
            selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let obj = SceneObject::new(ShapeKind::Sphere);
        assert_eq!(obj.name.as_str(), "Sphere");
        assert_eq!(obj.transform.size, 1.0);
        assert_eq!(obj.transform.position, Vec3::new(0.0, 0.0, -5.0));
        assert!(!obj.is_light);
        assert!(obj.mesh.is_valid());
    }

    #[test]
    fn test_random_placement_bounds() {
        assert_eq!(random_placement([0.5, 0.5, 0.5]), Vec3::new(0.0, 0.0, -10.0));
        let low = random_placement([0.0, 0.0, 0.0]);
        assert_eq!(low, Vec3::new(-5.0, -5.0, -15.0));
    }

    #[test]
    fn test_world_vertices_follow_transform() {
        let obj = SceneObject::new(ShapeKind::Cube)
            .with_transform(Transform::new(2.0, Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO));
        let first = obj.world_vertices().next().unwrap();
        // (-1,-1,-1) * 2 + (1,0,0)
        assert_eq!(first, Vec3::new(-1.0, -2.0, -2.0));
        assert_eq!(obj.world_vertices().count(), 24);
    }

    #[test]
    fn test_properties_in_degrees() {
        let obj = SceneObject::new(ShapeKind::Cube).with_transform(Transform::new(
            1.0,
            Vec3::ZERO,
            Vec3::new(std::f32::consts::PI, 0.0, 0.0),
        ));
        let props = ObjectProperties::from_object(&obj);
        assert!((props.rotation_degrees[0] - 180.0).abs() < 1e-4);
    }
}
