use crate::domain::{Book, Isbn};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use std::collections::BTreeMap;

/// BookRepositoryのインメモリ実装
///
/// BTreeMapで保持するため、一覧は常にISBN順になる。
/// プロセス終了とともにデータは失われる。
#[derive(Debug, Default)]
pub struct BookRepository {
    books: BTreeMap<Isbn, Book>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookRepositoryTrait for BookRepository {
    fn get(&self, isbn: &Isbn) -> Result<Option<Book>> {
        Ok(self.books.get(isbn).cloned())
    }

    fn save(&mut self, book: Book) -> Result<()> {
        self.books.insert(book.isbn.clone(), book);
        Ok(())
    }

    fn remove(&mut self, isbn: &Isbn) -> Result<Option<Book>> {
        Ok(self.books.remove(isbn))
    }

    fn list(&self) -> Result<Vec<Book>> {
        Ok(self.books.values().cloned().collect())
    }
}
