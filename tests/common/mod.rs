#![allow(dead_code)]

use library_catalog::Catalog;
use library_catalog::application::catalog::{add_book, add_member};
use library_catalog::domain::{AddBook, AddMember};

/// テスト用にトレーシングを初期化する
///
/// RUST_LOGが未設定の場合は`library_catalog=debug`を使用する。
/// 複数のテストから呼ばれても問題ないよう`try_init`を使う。
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_catalog=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn book_cmd(isbn: &str, title: &str, author: &str, genre: &str, copies: u32) -> AddBook {
    AddBook {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.to_string(),
        total_copies: copies,
    }
}

pub fn member_cmd(member_id: &str, name: &str, email: &str) -> AddMember {
    AddMember {
        member_id: member_id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
    }
}

/// 書籍を登録したカタログを作成する（ジャンルはFiction）
pub fn catalog_with_book(isbn: &str, copies: u32) -> Catalog {
    let mut catalog = Catalog::in_memory();
    add_book(&mut catalog, book_cmd(isbn, "Title", "Author", "Fiction", copies))
        .expect("Failed to add book");
    catalog
}

/// 会員を登録する
pub fn register(catalog: &mut Catalog, member_id: &str) {
    let email = format!("{}@example.com", member_id.to_lowercase());
    add_member(catalog, member_cmd(member_id, "Member", &email)).expect("Failed to add member");
}
