//! カタログの不変条件に対するプロパティテスト
//!
//! 小さなISBN・会員IDの集合に対してランダムな操作列を実行し、
//! 各ステップの後で書籍と会員の整合性が保たれていることを確認する。

mod common;

use common::{book_cmd, member_cmd};
use library_catalog::application::catalog::*;
use library_catalog::{Catalog, CatalogError};
use library_catalog::domain::{Book, Member, UpdateBook};
use proptest::prelude::*;

const ISBNS: [&str; 4] = ["001", "002", "003", "004"];
const MEMBERS: [&str; 4] = ["M1", "M2", "M3", "M4"];
const GENRES: [&str; 4] = ["Fiction", "sci-fi", "Poetry", "History"];

#[derive(Debug, Clone)]
enum Op {
    AddBook { isbn: usize, genre: usize, copies: u32 },
    UpdateCopies { isbn: usize, copies: u32 },
    DeleteBook { isbn: usize },
    AddMember { member: usize },
    DeleteMember { member: usize },
    Borrow { isbn: usize, member: usize },
    Return { isbn: usize, member: usize },
}

/// Generates arbitrary catalog operations over a small id space.
fn arb_op() -> impl Strategy<Value = Op> {
    let isbn = 0..ISBNS.len();
    let member = 0..MEMBERS.len();
    prop_oneof![
        1 => (isbn.clone(), 0..GENRES.len(), 0u32..4)
            .prop_map(|(isbn, genre, copies)| Op::AddBook { isbn, genre, copies }),
        1 => (isbn.clone(), 0u32..5).prop_map(|(isbn, copies)| Op::UpdateCopies { isbn, copies }),
        1 => isbn.clone().prop_map(|isbn| Op::DeleteBook { isbn }),
        1 => member.clone().prop_map(|member| Op::AddMember { member }),
        1 => member.clone().prop_map(|member| Op::DeleteMember { member }),
        3 => (isbn.clone(), member.clone())
            .prop_map(|(isbn, member)| Op::Borrow { isbn, member }),
        2 => (isbn, member).prop_map(|(isbn, member)| Op::Return { isbn, member }),
    ]
}

fn apply(catalog: &mut Catalog, op: &Op) -> std::result::Result<(), CatalogError> {
    match *op {
        Op::AddBook {
            isbn,
            genre,
            copies,
        } => add_book(
            catalog,
            book_cmd(ISBNS[isbn], "Title", "Author", GENRES[genre], copies),
        ),
        Op::UpdateCopies { isbn, copies } => update_book(
            catalog,
            UpdateBook {
                total_copies: Some(copies),
                ..UpdateBook::for_isbn(ISBNS[isbn])
            },
        ),
        Op::DeleteBook { isbn } => delete_book(catalog, ISBNS[isbn]),
        Op::AddMember { member } => {
            let email = format!("{}@example.com", MEMBERS[member]);
            add_member(catalog, member_cmd(MEMBERS[member], "Member", &email))
        }
        Op::DeleteMember { member } => delete_member(catalog, MEMBERS[member]),
        Op::Borrow { isbn, member } => borrow_book(catalog, ISBNS[isbn], MEMBERS[member]),
        Op::Return { isbn, member } => return_book(catalog, ISBNS[isbn], MEMBERS[member]),
    }
}

fn snapshot(catalog: &Catalog) -> (Vec<Book>, Vec<Member>, usize) {
    (
        list_books(catalog).unwrap(),
        list_members(catalog).unwrap(),
        events(catalog).unwrap().len(),
    )
}

proptest! {
    /// どの操作列の後でも貸出数と会員の貸出リストが一致する
    #[test]
    fn prop_consistency_after_every_step(ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut catalog = Catalog::in_memory();

        for op in &ops {
            let _ = apply(&mut catalog, op);

            prop_assert!(verify_consistency(&catalog).is_ok(), "after {:?}", op);
            for book in list_books(&catalog).unwrap() {
                prop_assert!(book.total_copies >= 1);
                prop_assert!(book.available_copies <= book.total_copies);
            }
            for member in list_members(&catalog).unwrap() {
                prop_assert!(member.borrowed.len() <= 3);
            }
        }
    }

    /// 失敗した操作は書籍・会員・イベントのいずれも変更しない
    #[test]
    fn prop_failed_operation_changes_nothing(ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut catalog = Catalog::in_memory();

        for op in &ops {
            let before = snapshot(&catalog);
            let result = apply(&mut catalog, op);
            let after = snapshot(&catalog);

            match result {
                Ok(()) => {
                    prop_assert_eq!(after.2, before.2 + 1);
                }
                Err(_) => {
                    prop_assert_eq!(after, before, "after {:?}", op);
                }
            }
        }
    }

    /// 貸出の直後に返却すると貸出前の状態に戻る
    #[test]
    fn prop_borrow_then_return_restores_state(
        setup in prop::collection::vec(arb_op(), 0..40),
        isbn in 0..ISBNS.len(),
        member in 0..MEMBERS.len(),
    ) {
        let mut catalog = Catalog::in_memory();
        for op in &setup {
            let _ = apply(&mut catalog, op);
        }

        let (books_before, members_before, _) = snapshot(&catalog);
        if borrow_book(&mut catalog, ISBNS[isbn], MEMBERS[member]).is_ok() {
            prop_assert!(return_book(&mut catalog, ISBNS[isbn], MEMBERS[member]).is_ok());

            let (books_after, members_after, _) = snapshot(&catalog);
            prop_assert_eq!(books_after, books_before);
            prop_assert_eq!(members_after, members_before);
        }
    }
}
