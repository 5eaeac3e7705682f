use crate::domain::model::UserId;
use serde::{Deserialize, Serialize};

/// ログイン中の利用者
/// 認証の仕組みは扱わず、予約処理が必要とする属性のみを持つ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    phone: Option<String>,
}

impl User {
    pub fn new(id: UserId, name: String, phone: Option<String>) -> Self {
        Self { id, name, phone }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// プロフィールに登録された電話番号（空白のみの場合はNone）
    pub fn phone(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
    }
}
