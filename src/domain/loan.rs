use chrono::{DateTime, Utc};

use super::{Book, BookBorrowed, BookReturned, BorrowBookError, Member, ReturnBookError};

/// 会員1人あたりの最大貸出冊数（既定値）
pub const DEFAULT_MAX_BORROWED: usize = 3;

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール（この順序で判定）：
/// 1. 利用可能な冊があること
/// 2. 会員の貸出冊数が上限未満であること
/// 3. 会員が同じ書籍を借りていないこと
///
/// 書籍・会員の存在確認はアプリケーション層で行う。
/// 副作用なし。更新後のBookとMember、イベントを返す。
pub fn borrow_book(
    book: &Book,
    member: &Member,
    max_borrowed: usize,
    borrowed_at: DateTime<Utc>,
) -> Result<(Book, Member, BookBorrowed), BorrowBookError> {
    if !book.is_available() {
        return Err(BorrowBookError::NoCopiesAvailable);
    }

    if member.borrowed_count() >= max_borrowed {
        return Err(BorrowBookError::BorrowLimitReached {
            limit: max_borrowed,
        });
    }

    if member.holds(&book.isbn) {
        return Err(BorrowBookError::AlreadyBorrowed);
    }

    let lent = Book {
        available_copies: book.available_copies - 1,
        ..book.clone()
    };

    let mut borrower = member.clone();
    borrower.borrowed.push(book.isbn.clone());

    let event = BookBorrowed {
        isbn: book.isbn.clone(),
        member_id: member.member_id.clone(),
        available_copies: lent.available_copies,
        occurred_at: borrowed_at,
    };

    Ok((lent, borrower, event))
}

/// 純粋関数：書籍を返却する
///
/// 会員の貸出リストにISBNがあることが前提。
/// 借りたときの逆操作：利用可能数を1増やし、貸出リストから除く。
pub fn return_book(
    book: &Book,
    member: &Member,
    returned_at: DateTime<Utc>,
) -> Result<(Book, Member, BookReturned), ReturnBookError> {
    let position = member
        .borrowed
        .iter()
        .position(|isbn| *isbn == book.isbn)
        .ok_or(ReturnBookError::NotBorrowed)?;

    // 不変条件が保たれていれば発生しない
    if book.all_copies_in() {
        return Err(ReturnBookError::AllCopiesAlreadyIn);
    }

    let restocked = Book {
        available_copies: book.available_copies + 1,
        ..book.clone()
    };

    let mut borrower = member.clone();
    borrower.borrowed.remove(position);

    let event = BookReturned {
        isbn: book.isbn.clone(),
        member_id: member.member_id.clone(),
        available_copies: restocked.available_copies,
        occurred_at: returned_at,
    };

    Ok((restocked, borrower, event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AddBook, AddMember, Isbn, book, member};

    fn sample_book(isbn: &str, copies: u32) -> Book {
        let cmd = AddBook {
            isbn: isbn.to_string(),
            title: "Title".to_string(),
            author: "Author".to_string(),
            genre: "Mystery".to_string(),
            total_copies: copies,
        };
        book::add_book(&cmd, Utc::now()).unwrap().0
    }

    fn sample_member(id: &str) -> Member {
        let cmd = AddMember {
            member_id: id.to_string(),
            name: "Name".to_string(),
            email: "n@example.com".to_string(),
        };
        member::add_member(&cmd, Utc::now()).unwrap().0
    }

    fn holding(member: Member, isbns: &[&str]) -> Member {
        Member {
            borrowed: isbns.iter().map(|i| Isbn::parse(i).unwrap()).collect(),
            ..member
        }
    }

    #[test]
    fn test_borrow_book_decrements_available_and_records_isbn() {
        let book = sample_book("001", 2);
        let member = sample_member("M1");

        let (lent, borrower, event) =
            borrow_book(&book, &member, DEFAULT_MAX_BORROWED, Utc::now()).unwrap();

        assert_eq!(lent.available_copies, 1);
        assert_eq!(lent.total_copies, 2);
        assert_eq!(borrower.borrowed, vec![book.isbn.clone()]);
        assert_eq!(event.available_copies, 1);
        assert_eq!(event.member_id, member.member_id);
    }

    #[test]
    fn test_borrow_book_fails_when_no_copies_available() {
        let book = Book {
            available_copies: 0,
            ..sample_book("001", 1)
        };
        let result = borrow_book(
            &book,
            &sample_member("M1"),
            DEFAULT_MAX_BORROWED,
            Utc::now(),
        );
        assert_eq!(result.unwrap_err(), BorrowBookError::NoCopiesAvailable);
    }

    #[test]
    fn test_borrow_book_fails_at_limit() {
        let member = holding(sample_member("M1"), &["a", "b", "c"]);
        let book = sample_book("001", 1);
        let result = borrow_book(&book, &member, DEFAULT_MAX_BORROWED, Utc::now());
        assert_eq!(
            result.unwrap_err(),
            BorrowBookError::BorrowLimitReached { limit: 3 }
        );
    }

    #[test]
    fn test_borrow_book_respects_custom_limit() {
        let member = holding(sample_member("M1"), &["a"]);
        let result = borrow_book(&sample_book("001", 1), &member, 1, Utc::now());
        assert_eq!(
            result.unwrap_err(),
            BorrowBookError::BorrowLimitReached { limit: 1 }
        );
    }

    #[test]
    fn test_borrow_book_rejects_duplicate_self_loan() {
        let member = holding(sample_member("M1"), &["001"]);
        let book = sample_book("001", 3);
        let result = borrow_book(&book, &member, DEFAULT_MAX_BORROWED, Utc::now());
        assert_eq!(result.unwrap_err(), BorrowBookError::AlreadyBorrowed);
    }

    // 判定順序：在庫切れは上限超過より先に判定される
    #[test]
    fn test_borrow_book_checks_availability_before_limit() {
        let book = Book {
            available_copies: 0,
            ..sample_book("001", 1)
        };
        let member = holding(sample_member("M1"), &["a", "b", "c"]);
        let result = borrow_book(&book, &member, DEFAULT_MAX_BORROWED, Utc::now());
        assert_eq!(result.unwrap_err(), BorrowBookError::NoCopiesAvailable);
    }

    #[test]
    fn test_return_book_is_inverse_of_borrow() {
        let book = sample_book("001", 2);
        let member = holding(sample_member("M1"), &["x"]);

        let (lent, borrower, _) =
            borrow_book(&book, &member, DEFAULT_MAX_BORROWED, Utc::now()).unwrap();
        let (restocked, returner, event) = return_book(&lent, &borrower, Utc::now()).unwrap();

        assert_eq!(restocked, book);
        assert_eq!(returner, member);
        assert_eq!(event.available_copies, 2);
    }

    #[test]
    fn test_return_book_fails_when_not_borrowed() {
        let book = Book {
            available_copies: 0,
            ..sample_book("001", 1)
        };
        let result = return_book(&book, &sample_member("M1"), Utc::now());
        assert_eq!(result.unwrap_err(), ReturnBookError::NotBorrowed);
    }

    #[test]
    fn test_return_book_never_exceeds_total() {
        let book = sample_book("001", 1);
        let member = holding(sample_member("M1"), &["001"]);
        let result = return_book(&book, &member, Utc::now());
        assert_eq!(result.unwrap_err(), ReturnBookError::AllCopiesAlreadyIn);

        let overfull = Book {
            available_copies: 2,
            ..book
        };
        let result = return_book(&overfull, &member, Utc::now());
        assert_eq!(result.unwrap_err(), ReturnBookError::AllCopiesAlreadyIn);
    }
}
