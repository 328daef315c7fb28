use serde::{Deserialize, Serialize};

/// プリミティブ形状の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Cube,
    Sphere,
    Cylinder,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Cube, ShapeKind::Sphere, ShapeKind::Cylinder];

    /// プロジェクトファイルの `type` 文字列
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知の形状名
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape type: {0:?}")]
pub struct UnknownShape(pub String);

impl std::str::FromStr for ShapeKind {
    type Err = UnknownShape;

    /// 完全一致のみ（プロジェクトファイルは小文字）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cube" => Ok(ShapeKind::Cube),
            "sphere" => Ok(ShapeKind::Sphere),
            "cylinder" => Ok(ShapeKind::Cylinder),
            _ => Err(UnknownShape(s.to_string())),
        }
    }
}
