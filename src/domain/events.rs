use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Genre, Isbn, MemberId};

/// イベント：書籍が登録された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAdded {
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub total_copies: u32,
    pub occurred_at: DateTime<Utc>,
}

/// イベント：書籍が更新された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookUpdated {
    pub isbn: Isbn,
    pub total_copies: u32,
    pub available_copies: u32,
    pub occurred_at: DateTime<Utc>,
}

/// イベント：書籍が削除された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDeleted {
    pub isbn: Isbn,
    pub occurred_at: DateTime<Utc>,
}

/// イベント：会員が登録された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAdded {
    pub member_id: MemberId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// イベント：会員情報が更新された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberUpdated {
    pub member_id: MemberId,
    pub occurred_at: DateTime<Utc>,
}

/// イベント：会員が削除された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDeleted {
    pub member_id: MemberId,
    pub occurred_at: DateTime<Utc>,
}

/// イベント：書籍が貸し出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookBorrowed {
    pub isbn: Isbn,
    pub member_id: MemberId,
    /// 貸出後の利用可能数
    pub available_copies: u32,
    pub occurred_at: DateTime<Utc>,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturned {
    pub isbn: Isbn,
    pub member_id: MemberId,
    /// 返却後の利用可能数
    pub available_copies: u32,
    pub occurred_at: DateTime<Utc>,
}

/// カタログイベント統合型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CatalogEvent {
    BookAdded(BookAdded),
    BookUpdated(BookUpdated),
    BookDeleted(BookDeleted),
    MemberAdded(MemberAdded),
    MemberUpdated(MemberUpdated),
    MemberDeleted(MemberDeleted),
    BookBorrowed(BookBorrowed),
    BookReturned(BookReturned),
}

impl CatalogEvent {
    /// イベント種別の識別子
    pub fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::BookAdded(_) => "BookAdded",
            CatalogEvent::BookUpdated(_) => "BookUpdated",
            CatalogEvent::BookDeleted(_) => "BookDeleted",
            CatalogEvent::MemberAdded(_) => "MemberAdded",
            CatalogEvent::MemberUpdated(_) => "MemberUpdated",
            CatalogEvent::MemberDeleted(_) => "MemberDeleted",
            CatalogEvent::BookBorrowed(_) => "BookBorrowed",
            CatalogEvent::BookReturned(_) => "BookReturned",
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::BookAdded(e) => e.occurred_at,
            CatalogEvent::BookUpdated(e) => e.occurred_at,
            CatalogEvent::BookDeleted(e) => e.occurred_at,
            CatalogEvent::MemberAdded(e) => e.occurred_at,
            CatalogEvent::MemberUpdated(e) => e.occurred_at,
            CatalogEvent::MemberDeleted(e) => e.occurred_at,
            CatalogEvent::BookBorrowed(e) => e.occurred_at,
            CatalogEvent::BookReturned(e) => e.occurred_at,
        }
    }
}
