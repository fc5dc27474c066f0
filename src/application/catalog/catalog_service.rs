use crate::adapters::in_memory::{
    InMemoryBookRepository, InMemoryEventLog, InMemoryMemberRepository,
};
use crate::domain::{self, CatalogEvent, commands::*, value_objects::*};
use crate::domain::{
    AddBookError, Book, BorrowBookError, DeleteBookError, DeleteMemberError, Member,
    ReturnBookError, UpdateBookError,
};
use crate::ports::*;
use chrono::Utc;

use super::errors::{CatalogError, Result};
use super::unit_of_work::{Change, commit};

/// カタログの設定
///
/// 環境変数やファイルからは読み込まない。呼び出し側が構築して渡す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogConfig {
    /// 会員1人あたりの最大貸出冊数
    pub max_borrowed_per_member: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_borrowed_per_member: domain::loan::DEFAULT_MAX_BORROWED,
        }
    }
}

/// カタログサービス
///
/// 書籍と会員の2つのコレクションを所有する。
/// 振る舞いはこのモジュールの関数として定義し、依存関係はすべて明示的に渡す。
/// 更新系の関数は`&mut Catalog`を取るため、同時に操作できる呼び出し元は1つだけ。
pub struct Catalog {
    pub config: CatalogConfig,
    pub books: Box<dyn BookRepository>,
    pub members: Box<dyn MemberRepository>,
    pub event_log: Box<dyn EventLog>,
}

impl Catalog {
    pub fn new(
        config: CatalogConfig,
        books: Box<dyn BookRepository>,
        members: Box<dyn MemberRepository>,
        event_log: Box<dyn EventLog>,
    ) -> Self {
        Self {
            config,
            books,
            members,
            event_log,
        }
    }

    /// 既定の設定とインメモリのアダプターで構築する
    pub fn in_memory() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        Self::new(
            config,
            Box::new(InMemoryBookRepository::new()),
            Box::new(InMemoryMemberRepository::new()),
            Box::new(InMemoryEventLog::new()),
        )
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::in_memory()
    }
}

// ============================================================================
// 共通ヘルパー
// ============================================================================

pub(super) fn find_book(catalog: &Catalog, isbn: &Isbn) -> Result<Option<Book>> {
    catalog.books.get(isbn).map_err(CatalogError::Repository)
}

pub(super) fn find_member(catalog: &Catalog, member_id: &MemberId) -> Result<Option<Member>> {
    catalog
        .members
        .get(member_id)
        .map_err(CatalogError::Repository)
}

pub(super) fn load_book(catalog: &Catalog, isbn: &Isbn) -> Result<Book> {
    find_book(catalog, isbn)?.ok_or_else(|| CatalogError::BookNotFound(isbn.clone()))
}

pub(super) fn load_member(catalog: &Catalog, member_id: &MemberId) -> Result<Member> {
    find_member(catalog, member_id)?.ok_or_else(|| CatalogError::MemberNotFound(member_id.clone()))
}

fn add_book_error(err: AddBookError) -> CatalogError {
    match err {
        AddBookError::InvalidValue(value) => value.into(),
        AddBookError::NonPositiveCopies => CatalogError::InvalidCopies,
    }
}

fn update_book_error(err: UpdateBookError) -> CatalogError {
    match err {
        UpdateBookError::InvalidValue(value) => value.into(),
        UpdateBookError::NonPositiveCopies => CatalogError::InvalidCopies,
        UpdateBookError::CopiesBelowBorrowed {
            borrowed,
            requested,
        } => CatalogError::CopiesBelowBorrowed {
            borrowed,
            requested,
        },
        UpdateBookError::CopiesOutOfRange { total, available } => {
            copies_out_of_range(total, available)
        }
    }
}

fn copies_out_of_range(total: u32, available: u32) -> CatalogError {
    CatalogError::Inconsistent(format!("{available} of {total} copies available"))
}

// ============================================================================
// 書籍
// ============================================================================

/// 書籍を登録する
///
/// ビジネスルール：
/// - ISBN・タイトル・著者が空でないこと
/// - ジャンルが定義済みであること
/// - 蔵書数が1以上であること
/// - ISBNが未登録であること（既存の書籍は変更しない）
pub fn add_book(catalog: &mut Catalog, cmd: AddBook) -> Result<()> {
    execute_add_book(catalog, &cmd)
        .inspect_err(|err| tracing::debug!(isbn = %cmd.isbn, error = %err, "add_book rejected"))
}

fn execute_add_book(catalog: &mut Catalog, cmd: &AddBook) -> Result<()> {
    // 1. ドメイン層で入力を検証し、書籍を構築
    let (book, event) = domain::book::add_book(cmd, Utc::now()).map_err(add_book_error)?;

    // 2. ISBNの重複確認
    if find_book(catalog, &book.isbn)?.is_some() {
        return Err(CatalogError::DuplicateIsbn(book.isbn));
    }

    // 3. 保存とイベント記録
    let isbn = book.isbn.clone();
    commit(
        catalog,
        vec![Change::save_book(book)],
        CatalogEvent::BookAdded(event),
    )?;

    tracing::info!(isbn = %isbn, "Book added");
    Ok(())
}

/// 書籍を部分更新する
///
/// `None`のフィールドは変更しない。蔵書数を変更する場合、
/// 貸出中の冊数を下回る値は拒否される。
pub fn update_book(catalog: &mut Catalog, cmd: UpdateBook) -> Result<()> {
    execute_update_book(catalog, &cmd)
        .inspect_err(|err| tracing::debug!(isbn = %cmd.isbn, error = %err, "update_book rejected"))
}

fn execute_update_book(catalog: &mut Catalog, cmd: &UpdateBook) -> Result<()> {
    let isbn = Isbn::parse(&cmd.isbn)?;
    let book = load_book(catalog, &isbn)?;

    let (updated, event) =
        domain::book::update_book(&book, cmd, Utc::now()).map_err(update_book_error)?;

    commit(
        catalog,
        vec![Change::save_book(updated)],
        CatalogEvent::BookUpdated(event),
    )?;

    tracing::info!(isbn = %isbn, "Book updated");
    Ok(())
}

/// 書籍を削除する
///
/// 貸出中の冊がある場合（利用可能数 != 蔵書数）は削除できない。
pub fn delete_book(catalog: &mut Catalog, isbn: &str) -> Result<()> {
    execute_delete_book(catalog, isbn)
        .inspect_err(|err| tracing::debug!(isbn, error = %err, "delete_book rejected"))
}

fn execute_delete_book(catalog: &mut Catalog, isbn: &str) -> Result<()> {
    let isbn = Isbn::parse(isbn)?;
    let book = load_book(catalog, &isbn)?;

    let event = domain::book::delete_book(&book, Utc::now()).map_err(|err| match err {
        DeleteBookError::OutstandingLoans { borrowed } => CatalogError::OutstandingLoans {
            isbn: isbn.clone(),
            borrowed,
        },
        DeleteBookError::CopiesOutOfRange { total, available } => {
            copies_out_of_range(total, available)
        }
    })?;

    commit(
        catalog,
        vec![Change::remove_book(isbn.clone())],
        CatalogEvent::BookDeleted(event),
    )?;

    tracing::info!(isbn = %isbn, "Book deleted");
    Ok(())
}

// ============================================================================
// 会員
// ============================================================================

/// 会員を登録する
pub fn add_member(catalog: &mut Catalog, cmd: AddMember) -> Result<()> {
    execute_add_member(catalog, &cmd).inspect_err(
        |err| tracing::debug!(member_id = %cmd.member_id, error = %err, "add_member rejected"),
    )
}

fn execute_add_member(catalog: &mut Catalog, cmd: &AddMember) -> Result<()> {
    let (member, event) = domain::member::add_member(cmd, Utc::now())?;

    if find_member(catalog, &member.member_id)?.is_some() {
        return Err(CatalogError::DuplicateMember(member.member_id));
    }

    let member_id = member.member_id.clone();
    commit(
        catalog,
        vec![Change::save_member(member)],
        CatalogEvent::MemberAdded(event),
    )?;

    tracing::info!(member_id = %member_id, "Member added");
    Ok(())
}

/// 会員情報を部分更新する
pub fn update_member(catalog: &mut Catalog, cmd: UpdateMember) -> Result<()> {
    execute_update_member(catalog, &cmd).inspect_err(
        |err| tracing::debug!(member_id = %cmd.member_id, error = %err, "update_member rejected"),
    )
}

fn execute_update_member(catalog: &mut Catalog, cmd: &UpdateMember) -> Result<()> {
    let member_id = MemberId::parse(&cmd.member_id)?;
    let member = load_member(catalog, &member_id)?;

    let (updated, event) = domain::member::update_member(&member, cmd, Utc::now())?;

    commit(
        catalog,
        vec![Change::save_member(updated)],
        CatalogEvent::MemberUpdated(event),
    )?;

    tracing::info!(member_id = %member_id, "Member updated");
    Ok(())
}

/// 会員を削除する
///
/// 貸出中の書籍がある会員は削除できない。
pub fn delete_member(catalog: &mut Catalog, member_id: &str) -> Result<()> {
    execute_delete_member(catalog, member_id)
        .inspect_err(|err| tracing::debug!(member_id, error = %err, "delete_member rejected"))
}

fn execute_delete_member(catalog: &mut Catalog, member_id: &str) -> Result<()> {
    let member_id = MemberId::parse(member_id)?;
    let member = load_member(catalog, &member_id)?;

    let event = domain::member::delete_member(&member, Utc::now()).map_err(|err| match err {
        DeleteMemberError::HasLoans { borrowed } => CatalogError::MemberHasLoans {
            member_id: member_id.clone(),
            borrowed,
        },
    })?;

    commit(
        catalog,
        vec![Change::remove_member(member_id.clone())],
        CatalogEvent::MemberDeleted(event),
    )?;

    tracing::info!(member_id = %member_id, "Member deleted");
    Ok(())
}

// ============================================================================
// 貸出・返却
// ============================================================================

/// 書籍を貸し出す
///
/// ビジネスルール（この順序で判定、失敗時は何も変更しない）：
/// 1. 書籍が存在すること
/// 2. 会員が存在すること
/// 3. 利用可能な冊があること
/// 4. 会員の貸出冊数が上限未満であること
/// 5. 会員が同じ書籍を借りていないこと
///
/// 利用可能数の減算と貸出リストへの追加は両方行われるか、どちらも行われない。
pub fn borrow_book(catalog: &mut Catalog, isbn: &str, member_id: &str) -> Result<()> {
    execute_borrow_book(catalog, isbn, member_id).inspect_err(
        |err| tracing::debug!(isbn, member_id, error = %err, "borrow_book rejected"),
    )
}

fn execute_borrow_book(catalog: &mut Catalog, isbn: &str, member_id: &str) -> Result<()> {
    let isbn = Isbn::parse(isbn)?;
    let member_id = MemberId::parse(member_id)?;

    // 1. 書籍の存在確認
    let book = load_book(catalog, &isbn)?;

    // 2. 会員の存在確認
    let member = load_member(catalog, &member_id)?;

    // 3-5. ドメイン層の純粋関数を呼び出し
    let limit = catalog.config.max_borrowed_per_member;
    let (lent, borrower, event) = domain::loan::borrow_book(&book, &member, limit, Utc::now())
        .map_err(|err| match err {
            BorrowBookError::NoCopiesAvailable => CatalogError::BookUnavailable(isbn.clone()),
            BorrowBookError::BorrowLimitReached { limit } => {
                CatalogError::BorrowLimitReached { limit }
            }
            BorrowBookError::AlreadyBorrowed => CatalogError::AlreadyBorrowed(isbn.clone()),
        })?;

    let available = lent.available_copies;
    commit(
        catalog,
        vec![Change::save_book(lent), Change::save_member(borrower)],
        CatalogEvent::BookBorrowed(event),
    )?;

    tracing::info!(isbn = %isbn, member_id = %member_id, available, "Book borrowed");
    Ok(())
}

/// 書籍を返却する
///
/// 貸出の逆操作：利用可能数を1増やし、会員の貸出リストから除く。
pub fn return_book(catalog: &mut Catalog, isbn: &str, member_id: &str) -> Result<()> {
    execute_return_book(catalog, isbn, member_id).inspect_err(
        |err| tracing::debug!(isbn, member_id, error = %err, "return_book rejected"),
    )
}

fn execute_return_book(catalog: &mut Catalog, isbn: &str, member_id: &str) -> Result<()> {
    let isbn = Isbn::parse(isbn)?;
    let member_id = MemberId::parse(member_id)?;

    let book = load_book(catalog, &isbn)?;
    let member = load_member(catalog, &member_id)?;

    let (restocked, returner, event) = domain::loan::return_book(&book, &member, Utc::now())
        .map_err(|err| match err {
            ReturnBookError::NotBorrowed => CatalogError::NotBorrowed(isbn.clone()),
            ReturnBookError::AllCopiesAlreadyIn => CatalogError::Inconsistent(format!(
                "member {member_id} holds {isbn} but all copies are available"
            )),
        })?;

    let available = restocked.available_copies;
    commit(
        catalog,
        vec![Change::save_book(restocked), Change::save_member(returner)],
        CatalogEvent::BookReturned(event),
    )?;

    tracing::info!(isbn = %isbn, member_id = %member_id, available, "Book returned");
    Ok(())
}
