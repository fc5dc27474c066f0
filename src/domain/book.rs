use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::required_text;
use super::{
    AddBook, AddBookError, BookAdded, BookDeleted, BookUpdated, DeleteBookError, Genre, Isbn,
    UpdateBook, UpdateBookError,
};

/// Book集約 - 1つのISBNに対する蔵書
///
/// 不変条件：`0 <= available_copies <= total_copies`、`total_copies >= 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub total_copies: u32,
    pub available_copies: u32,
}

impl Book {
    /// 貸出中の冊数
    ///
    /// 利用可能数が蔵書数を超えている（不変条件が崩れている）場合は`None`。
    pub fn borrowed_copies(&self) -> Option<u32> {
        self.total_copies.checked_sub(self.available_copies)
    }

    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// 貸出中の冊がないか（利用可能数が蔵書数以上）
    pub fn all_copies_in(&self) -> bool {
        self.available_copies >= self.total_copies
    }

    /// タイトルまたは著者に部分一致するか
    ///
    /// `needle`は小文字化済みであること。
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

fn positive_copies(copies: u32) -> Option<u32> {
    (copies > 0).then_some(copies)
}

/// 純粋関数：書籍を登録する
///
/// ビジネスルール：
/// - ISBN・タイトル・著者は空でない
/// - ジャンルは定義済みのもの
/// - 蔵書数は1以上
/// - 利用可能数は蔵書数と同じ
///
/// ISBNの重複はアプリケーション層で確認する。
pub fn add_book(cmd: &AddBook, added_at: DateTime<Utc>) -> Result<(Book, BookAdded), AddBookError> {
    let isbn = Isbn::parse(&cmd.isbn)?;
    let title = required_text("title", &cmd.title)?;
    let author = required_text("author", &cmd.author)?;
    let genre: Genre = cmd.genre.parse()?;
    let total_copies = positive_copies(cmd.total_copies).ok_or(AddBookError::NonPositiveCopies)?;

    let book = Book {
        isbn: isbn.clone(),
        title: title.clone(),
        author: author.clone(),
        genre,
        total_copies,
        available_copies: total_copies,
    };

    let event = BookAdded {
        isbn,
        title,
        author,
        genre,
        total_copies,
        occurred_at: added_at,
    };

    Ok((book, event))
}

/// 純粋関数：書籍を部分更新する
///
/// 蔵書数を変更する場合、貸出中の冊数は維持される：
/// `available = new_total - (old_total - old_available)`
///
/// 副作用なし。すべての項目を検証してから新しいBookを返す。
pub fn update_book(
    book: &Book,
    cmd: &UpdateBook,
    updated_at: DateTime<Utc>,
) -> Result<(Book, BookUpdated), UpdateBookError> {
    let title = match &cmd.title {
        Some(title) => required_text("title", title)?,
        None => book.title.clone(),
    };
    let author = match &cmd.author {
        Some(author) => required_text("author", author)?,
        None => book.author.clone(),
    };
    let genre = match &cmd.genre {
        Some(genre) => genre.parse::<Genre>()?,
        None => book.genre,
    };

    let (total_copies, available_copies) = match cmd.total_copies {
        Some(requested) => {
            let requested =
                positive_copies(requested).ok_or(UpdateBookError::NonPositiveCopies)?;
            let borrowed = book
                .borrowed_copies()
                .ok_or(UpdateBookError::CopiesOutOfRange {
                    total: book.total_copies,
                    available: book.available_copies,
                })?;
            if requested < borrowed {
                return Err(UpdateBookError::CopiesBelowBorrowed {
                    borrowed,
                    requested,
                });
            }
            (requested, requested - borrowed)
        }
        None => (book.total_copies, book.available_copies),
    };

    let updated = Book {
        isbn: book.isbn.clone(),
        title,
        author,
        genre,
        total_copies,
        available_copies,
    };

    let event = BookUpdated {
        isbn: book.isbn.clone(),
        total_copies,
        available_copies,
        occurred_at: updated_at,
    };

    Ok((updated, event))
}

/// 純粋関数：書籍の削除を判定する
///
/// 貸出中の冊が1冊でもあれば削除不可。
pub fn delete_book(book: &Book, deleted_at: DateTime<Utc>) -> Result<BookDeleted, DeleteBookError> {
    let borrowed = book
        .borrowed_copies()
        .ok_or(DeleteBookError::CopiesOutOfRange {
            total: book.total_copies,
            available: book.available_copies,
        })?;
    if borrowed > 0 {
        return Err(DeleteBookError::OutstandingLoans { borrowed });
    }

    Ok(BookDeleted {
        isbn: book.isbn.clone(),
        occurred_at: deleted_at,
    })
}
