use crate::domain::{Book, Isbn};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書籍リポジトリポート
///
/// ISBNをキーとするBook集約の保存先を抽象化する。
/// 返す値はすべてスナップショット（複製）であり、
/// 呼び出し側が変更しても保存内容には影響しない。
pub trait BookRepository: Send + Sync {
    /// ISBNで書籍を取得する
    fn get(&self, isbn: &Isbn) -> Result<Option<Book>>;

    /// 書籍を保存する（同じISBNがあれば置き換える）
    fn save(&mut self, book: Book) -> Result<()>;

    /// 書籍を削除し、削除したものを返す
    fn remove(&mut self, isbn: &Isbn) -> Result<Option<Book>>;

    /// すべての書籍をISBN順で返す
    fn list(&self) -> Result<Vec<Book>>;
}
