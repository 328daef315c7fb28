use std::num::NonZeroU32;

/// シーンオブジェクト識別子
/// 単調増加で払い出し、削除後も再利用しない。
/// 選択状態はこのIDで保持するので、削除済みオブジェクトを指すことはない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(NonZeroU32);

impl ObjectId {
    /// 新しいObjectIdを作成（0は無効値として予約）
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// JS用の数値ID
    #[inline]
    pub fn to_u32(&self) -> u32 {
        self.0.get()
    }

    /// JS用IDからObjectIdを復元（0はNone）
    #[inline]
    pub fn from_u32(id: u32) -> Option<Self> {
        Self::new(id)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// IDの払い出し
#[derive(Debug, Clone)]
pub(crate) struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub(crate) fn new() -> Self {
        Self { next: 1 }
    }

    pub(crate) fn allocate(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next).unwrap_or(ObjectId(NonZeroU32::MIN));
        self.next = self.next.wrapping_add(1).max(1);
        id
    }
}
