use super::shape::ShapeKind;

/// 表示名
/// ユーザーが自由に編集できる。一意である必要はない
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    value: String,
}

impl Name {
    /// 新しいNameを作成
    pub fn new(name: impl Into<String>) -> Self {
        Self { value: name.into() }
    }

    /// 形状名の先頭を大文字にした名前（"cube" -> "Cube"）
    pub fn from_kind(kind: ShapeKind) -> Self {
        Self::new(capitalize(kind.as_str()))
    }

    /// 名前を文字列スライスとして取得
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// 名前を変更
    pub fn set(&mut self, name: impl Into<String>) {
        self.value = name.into();
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::new("Object")
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// 先頭文字を大文字化
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let name = Name::new("My Cube");
        assert_eq!(name.as_str(), "My Cube");
    }

    #[test]
    fn test_from_kind() {
        assert_eq!(Name::from_kind(ShapeKind::Cube).as_str(), "Cube");
        assert_eq!(Name::from_kind(ShapeKind::Sphere).as_str(), "Sphere");
        assert_eq!(Name::from_kind(ShapeKind::Cylinder).as_str(), "Cylinder");
    }

    #[test]
    fn test_set() {
        let mut name = Name::from_kind(ShapeKind::Cube);
        name.set("");
        assert_eq!(name.as_str(), "");
    }

    #[test]
    fn test_capitalize_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("a"), "A");
    }

    #[test]
    fn test_display() {
        let name = Name::new("Camera");
        assert_eq!(format!("{}", name), "Camera");
    }
}
