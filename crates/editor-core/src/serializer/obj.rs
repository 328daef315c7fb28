//! OBJ形式のメッシュエクスポートとウォーターマーク抽出

use crate::scene::Scene;

/// ウォーターマーク行のプレフィックス
pub const WATERMARK_PREFIX: &str = "# Watermark: ";

/// シーン全体をワールド空間に焼き込んだOBJテキストを生成
///
/// オブジェクトごとに `v` 行 → `f` 行を出力し、`f` のインデックスは
/// それまでに出力した頂点数だけオフセットした1始まり。末尾にウォーターマーク行を付ける
pub fn export_obj(scene: &Scene, watermark: &str) -> String {
    let mut out = String::new();
    let mut vertex_offset: u32 = 0;

    for (_, object) in scene.iter() {
        for v in object.world_vertices() {
            out.push_str(&format!("v {} {} {}\n", v.x, v.y, v.z));
        }

        for tri in object.mesh.indices.chunks_exact(3) {
            out.push_str(&format!(
                "f {} {} {}\n",
                tri[0] + 1 + vertex_offset,
                tri[1] + 1 + vertex_offset,
                tri[2] + 1 + vertex_offset,
            ));
        }

        vertex_offset += object.mesh.vertex_count() as u32;
    }

    out.push_str(WATERMARK_PREFIX);
    out.push_str(&sanitize_watermark(watermark));
    out.push('\n');

    tracing::info!(
        objects = scene.len(),
        vertices = vertex_offset,
        bytes = out.len(),
        "exported obj"
    );
    out
}

/// OBJテキストからウォーターマークを取り出す
///
/// 最初に見つかった `# Watermark: ` 以降、その行末までを返す。見つからなければNone
pub fn extract_watermark(content: &str) -> Option<&str> {
    content.lines().find_map(|line| {
        line.find(WATERMARK_PREFIX)
            .map(|start| &line[start + WATERMARK_PREFIX.len()..])
    })
}

/// 改行を含むとコメント行が壊れるので空白に置き換える
fn sanitize_watermark(watermark: &str) -> String {
    watermark.replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ShapeKind, Transform};
    use crate::math::Vec3;
    use crate::scene::SceneObject;

    fn lines_with<'a>(text: &'a str, prefix: &str) -> Vec<&'a str> {
        text.lines().filter(|l| l.starts_with(prefix)).collect()
    }

    #[test]
    fn test_empty_scene_only_watermark() {
        let text = export_obj(&Scene::new(), "me");
        assert_eq!(text, "# Watermark: me\n");
    }

    #[test]
    fn test_counts_and_trailing_watermark() {
        let mut scene = Scene::new();
        scene.add(SceneObject::new(ShapeKind::Cube));
        scene.add(SceneObject::new(ShapeKind::Cylinder));

        let text = export_obj(&scene, "hello-world");
        let cylinder = crate::geometry::Mesh::for_kind(ShapeKind::Cylinder);

        assert_eq!(lines_with(&text, "v ").len(), 24 + cylinder.vertex_count());
        assert_eq!(lines_with(&text, "f ").len(), 12 + cylinder.triangle_count());
        assert_eq!(text.lines().last(), Some("# Watermark: hello-world"));
    }

    #[test]
    fn test_face_indices_offset_per_object() {
        let mut scene = Scene::new();
        scene.add(SceneObject::new(ShapeKind::Cube));
        scene.add(SceneObject::new(ShapeKind::Cube));

        let text = export_obj(&scene, "");
        let faces = lines_with(&text, "f ");
        assert_eq!(faces[0], "f 1 2 3");
        // 2つ目のキューブは24頂点オフセット
        assert_eq!(faces[12], "f 25 26 27");
    }

    #[test]
    fn test_vertices_are_world_space() {
        let mut scene = Scene::new();
        scene.add(
            SceneObject::new(ShapeKind::Cube)
                .with_transform(Transform::new(2.0, Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO)),
        );
        let text = export_obj(&scene, "");
        assert_eq!(lines_with(&text, "v ")[0], "v 8 -2 -2");
    }

    #[test]
    fn test_extract_watermark() {
        let text = "v 0 0 0\nf 1 1 1\n# Watermark: hello-world\n";
        assert_eq!(extract_watermark(text), Some("hello-world"));
    }

    #[test]
    fn test_extract_watermark_missing() {
        assert_eq!(extract_watermark("v 0 0 0\nf 1 1 1\n"), None);
        assert_eq!(extract_watermark(""), None);
    }

    #[test]
    fn test_extract_watermark_crlf_and_first_match() {
        let text = "# Watermark: first\r\n# Watermark: second\r\n";
        assert_eq!(extract_watermark(text), Some("first"));
    }

    #[test]
    fn test_export_then_extract() {
        let mut scene = Scene::new();
        scene.add(SceneObject::new(ShapeKind::Sphere));
        let text = export_obj(&scene, "made by\nme");
        assert_eq!(extract_watermark(&text), Some("made by me"));
    }
}
