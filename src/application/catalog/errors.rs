use thiserror::Error;

use crate::domain::{Isbn, MemberId, ValueError};

/// ポート層から返されるエラー
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// エラーの分類
///
/// 呼び出し側が「失敗したか」以上の区別を必要としない場合は
/// `Result::is_ok()`だけを見ればよい。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 識別子の重複
    Conflict,
    /// 対象が存在しない
    NotFound,
    /// 入力値の形式が不正
    Validation,
    /// ビジネスルール違反
    BusinessRule,
    /// ストレージ障害や不変条件違反
    Internal,
}

/// カタログアプリケーション層のエラー
#[derive(Debug, Error)]
pub enum CatalogError {
    /// ISBNが既に登録されている
    #[error("Book {0} already exists")]
    DuplicateIsbn(Isbn),

    /// 会員IDが既に登録されている
    #[error("Member {0} already exists")]
    DuplicateMember(MemberId),

    #[error("Book {0} not found")]
    BookNotFound(Isbn),

    #[error("Member {0} not found")]
    MemberNotFound(MemberId),

    /// 必須項目が空、メールアドレスが不正など
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 定義済みジャンルに含まれない
    #[error("Invalid genre: {0}")]
    InvalidGenre(String),

    /// 蔵書数が1未満
    #[error("Total copies must be a positive integer")]
    InvalidCopies,

    /// 利用可能な冊がない
    #[error("No copies of {0} are available")]
    BookUnavailable(Isbn),

    /// 貸出上限に達している
    #[error("Borrow limit reached (max {limit} books)")]
    BorrowLimitReached { limit: usize },

    /// 同じ書籍を既に借りている
    #[error("Member already holds a copy of {0}")]
    AlreadyBorrowed(Isbn),

    /// 借りていない書籍の返却
    #[error("Member has not borrowed {0}")]
    NotBorrowed(Isbn),

    /// 貸出中の冊があるため削除不可
    #[error("Book {isbn} has {borrowed} copies on loan")]
    OutstandingLoans { isbn: Isbn, borrowed: u32 },

    /// 新しい蔵書数が貸出中の冊数を下回る
    #[error("Cannot set total copies to {requested}: {borrowed} copies are on loan")]
    CopiesBelowBorrowed { borrowed: u32, requested: u32 },

    /// 貸出中の書籍があるため会員を削除不可
    #[error("Member {member_id} still holds {borrowed} books")]
    MemberHasLoans { member_id: MemberId, borrowed: usize },

    /// 書籍と会員の間の不変条件が崩れている
    #[error("Catalog is inconsistent: {0}")]
    Inconsistent(String),

    /// リポジトリのエラー
    #[error("Repository error")]
    Repository(#[source] PortError),

    /// イベントログのエラー
    #[error("Event log error")]
    EventLog(#[source] PortError),
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::DuplicateIsbn(_) | CatalogError::DuplicateMember(_) => {
                ErrorCategory::Conflict
            }
            CatalogError::BookNotFound(_) | CatalogError::MemberNotFound(_) => {
                ErrorCategory::NotFound
            }
            CatalogError::InvalidInput(_)
            | CatalogError::InvalidGenre(_)
            | CatalogError::InvalidCopies => ErrorCategory::Validation,
            CatalogError::BookUnavailable(_)
            | CatalogError::BorrowLimitReached { .. }
            | CatalogError::AlreadyBorrowed(_)
            | CatalogError::NotBorrowed(_)
            | CatalogError::OutstandingLoans { .. }
            | CatalogError::CopiesBelowBorrowed { .. }
            | CatalogError::MemberHasLoans { .. } => ErrorCategory::BusinessRule,
            CatalogError::Inconsistent(_)
            | CatalogError::Repository(_)
            | CatalogError::EventLog(_) => ErrorCategory::Internal,
        }
    }
}

impl From<ValueError> for CatalogError {
    fn from(err: ValueError) -> Self {
        match err {
            ValueError::UnknownGenre(genre) => CatalogError::InvalidGenre(genre),
            other => CatalogError::InvalidInput(other.to_string()),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogError>;
