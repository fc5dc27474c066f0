use serde::{Deserialize, Serialize};

/// コマンド：書籍を登録する
///
/// 値は呼び出し側から受け取ったままの形で保持し、
/// 検証はドメイン関数が行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub total_copies: u32,
}

/// コマンド：書籍を部分更新する
///
/// `None`のフィールドは変更しない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBook {
    pub isbn: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub total_copies: Option<u32>,
}

impl UpdateBook {
    /// 何も変更しない更新コマンド
    pub fn for_isbn(isbn: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            ..Self::default()
        }
    }
}

/// コマンド：会員を登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddMember {
    pub member_id: String,
    pub name: String,
    pub email: String,
}

/// コマンド：会員を部分更新する
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMember {
    pub member_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateMember {
    pub fn for_member(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            ..Self::default()
        }
    }
}
