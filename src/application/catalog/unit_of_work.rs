use crate::domain::{Book, CatalogEvent, Isbn, Member, MemberId};

use super::catalog_service::Catalog;
use super::errors::{CatalogError, PortError, Result};

/// 1件のレコードの書き込み
///
/// `None`は削除を表す。適用前の状態を同じ形で記録しておけば、
/// それをそのまま適用することで元に戻せる。
#[derive(Debug, Clone)]
pub(super) enum Change {
    Book { isbn: Isbn, after: Option<Book> },
    Member { member_id: MemberId, after: Option<Member> },
}

impl Change {
    pub(super) fn save_book(book: Book) -> Self {
        Change::Book {
            isbn: book.isbn.clone(),
            after: Some(book),
        }
    }

    pub(super) fn remove_book(isbn: Isbn) -> Self {
        Change::Book { isbn, after: None }
    }

    pub(super) fn save_member(member: Member) -> Self {
        Change::Member {
            member_id: member.member_id.clone(),
            after: Some(member),
        }
    }

    pub(super) fn remove_member(member_id: MemberId) -> Self {
        Change::Member {
            member_id,
            after: None,
        }
    }
}

/// 変更を適用し、元に戻すための変更を返す
fn apply(catalog: &mut Catalog, change: &Change) -> std::result::Result<Change, PortError> {
    match change {
        Change::Book { isbn, after } => {
            let before = catalog.books.get(isbn)?;
            match after {
                Some(book) => catalog.books.save(book.clone())?,
                None => {
                    catalog.books.remove(isbn)?;
                }
            }
            Ok(Change::Book {
                isbn: isbn.clone(),
                after: before,
            })
        }
        Change::Member { member_id, after } => {
            let before = catalog.members.get(member_id)?;
            match after {
                Some(member) => catalog.members.save(member.clone())?,
                None => {
                    catalog.members.remove(member_id)?;
                }
            }
            Ok(Change::Member {
                member_id: member_id.clone(),
                after: before,
            })
        }
    }
}

fn roll_back(catalog: &mut Catalog, undo: Vec<Change>) {
    for change in undo.into_iter().rev() {
        if let Err(err) = apply(catalog, &change) {
            tracing::error!(error = %err, ?change, "Rollback failed, catalog may be inconsistent");
        }
    }
}

/// 変更をまとめて適用し、イベントを記録する
///
/// すべて成功するか、何も変わらないかのどちらか。
/// 途中でポートが失敗した場合は適用済みの変更を逆順に戻してからエラーを返す。
/// 検証はすべて呼び出し前に済ませておくこと。
pub(super) fn commit(
    catalog: &mut Catalog,
    changes: Vec<Change>,
    event: CatalogEvent,
) -> Result<()> {
    let mut undo = Vec::with_capacity(changes.len());

    for change in &changes {
        match apply(catalog, change) {
            Ok(inverse) => undo.push(inverse),
            Err(err) => {
                tracing::warn!(error = %err, "Write failed, rolling back {} change(s)", undo.len());
                roll_back(catalog, undo);
                return Err(CatalogError::Repository(err));
            }
        }
    }

    if let Err(err) = catalog.event_log.append(event) {
        tracing::warn!(error = %err, "Event append failed, rolling back {} change(s)", undo.len());
        roll_back(catalog, undo);
        return Err(CatalogError::EventLog(err));
    }

    Ok(())
}
