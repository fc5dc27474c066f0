use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 値オブジェクトの生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// 必須項目が空（フィールド名）
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// 定義済みジャンルに含まれない
    #[error("unknown genre: {0}")]
    UnknownGenre(String),
    /// メールアドレスの形式が不正
    #[error("malformed email: {0}")]
    MalformedEmail(String),
}

/// 前後の空白を除去し、空文字列を拒否する
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String, ValueError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValueError::Empty(field));
    }
    Ok(trimmed.to_string())
}

/// ISBN - 書籍集約の識別子
///
/// 形式（ISBN-10/13のチェックディジット）は検証しない。
/// 空でない文字列であることのみを保証する。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    pub fn parse(value: &str) -> Result<Self, ValueError> {
        required_text("isbn", value).map(Self)
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 会員ID - 会員集約の識別子
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn parse(value: &str) -> Result<Self, ValueError> {
        required_text("member_id", value).map(Self)
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// メールアドレス
///
/// 不変条件：空でなく、`@`を含む
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(value: &str) -> Result<Self, ValueError> {
        let email = required_text("email", value)?;
        if !email.contains('@') {
            return Err(ValueError::MalformedEmail(email));
        }
        Ok(Self(email))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// ジャンル（固定の列挙）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Mystery,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Fantasy,
    Biography,
    History,
}

impl Genre {
    pub const ALL: [Genre; 7] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::SciFi,
        Genre::Fantasy,
        Genre::Biography,
        Genre::History,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Mystery => "Mystery",
            Genre::SciFi => "Sci-Fi",
            Genre::Fantasy => "Fantasy",
            Genre::Biography => "Biography",
            Genre::History => "History",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = ValueError;

    /// 大文字小文字と前後の空白を無視して解析する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValueError::UnknownGenre(s.to_string()))
    }
}
