use crate::domain::{Book, CatalogEvent, Isbn, Member, MemberId};
use std::collections::{HashMap, HashSet};

use super::catalog_service::{Catalog, load_book, load_member};
use super::errors::{CatalogError, Result};

// ============================================================================
// Query functions (read side)
// ============================================================================
//
// Every query returns owned snapshots. None of them mutate the catalog.

/// Get a single book by ISBN.
pub fn get_book(catalog: &Catalog, isbn: &str) -> Result<Book> {
    load_book(catalog, &Isbn::parse(isbn)?)
}

/// Get a single member by id.
pub fn get_member(catalog: &Catalog, member_id: &str) -> Result<Member> {
    load_member(catalog, &MemberId::parse(member_id)?)
}

/// All books ordered by ISBN.
pub fn list_books(catalog: &Catalog) -> Result<Vec<Book>> {
    catalog.books.list().map_err(CatalogError::Repository)
}

/// All members ordered by id.
pub fn list_members(catalog: &Catalog) -> Result<Vec<Member>> {
    catalog.members.list().map_err(CatalogError::Repository)
}

/// Search books by title or author
///
/// Case-insensitive substring match; surrounding whitespace in the query is
/// ignored and an empty query matches every book. Results are ordered by ISBN.
pub fn search_books(catalog: &Catalog, query: &str) -> Result<Vec<Book>> {
    let needle = query.trim().to_lowercase();
    let books = list_books(catalog)?;
    Ok(books.into_iter().filter(|book| book.matches(&needle)).collect())
}

/// Search members by name or email, with the same matching rules as
/// [`search_books`].
pub fn search_members(catalog: &Catalog, query: &str) -> Result<Vec<Member>> {
    let needle = query.trim().to_lowercase();
    let members = list_members(catalog)?;
    Ok(members
        .into_iter()
        .filter(|member| member.matches(&needle))
        .collect())
}

/// Members currently holding a copy of the given book
///
/// The borrow relation is not stored on its own; it is rebuilt here by
/// scanning every member's borrowed list.
pub fn borrowers_of(catalog: &Catalog, isbn: &str) -> Result<Vec<MemberId>> {
    let isbn = Isbn::parse(isbn)?;
    load_book(catalog, &isbn)?;

    let members = list_members(catalog)?;
    Ok(members
        .into_iter()
        .filter(|member| member.holds(&isbn))
        .map(|member| member.member_id)
        .collect())
}

/// Every recorded catalog event in the order it happened.
pub fn events(catalog: &Catalog) -> Result<Vec<CatalogEvent>> {
    catalog.event_log.load_all().map_err(CatalogError::EventLog)
}

/// Check that books and members agree with each other
///
/// Verifies for every record:
/// - `1 <= total_copies` and `available_copies <= total_copies`
/// - every borrowed ISBN refers to an existing book
/// - no member holds the same ISBN twice or more than the borrow limit
/// - `available_copies == total_copies - (members holding the ISBN)`
///
/// Returns the first violation found as [`CatalogError::Inconsistent`].
pub fn verify_consistency(catalog: &Catalog) -> Result<()> {
    let books = list_books(catalog)?;
    let members = list_members(catalog)?;
    let limit = catalog.config.max_borrowed_per_member;

    let mut holders: HashMap<&Isbn, u32> = HashMap::new();

    for member in &members {
        if member.borrowed_count() > limit {
            return Err(CatalogError::Inconsistent(format!(
                "member {} holds {} books (limit {limit})",
                member.member_id,
                member.borrowed_count()
            )));
        }

        let mut seen = HashSet::new();
        for isbn in &member.borrowed {
            if !seen.insert(isbn) {
                return Err(CatalogError::Inconsistent(format!(
                    "member {} holds {isbn} twice",
                    member.member_id
                )));
            }
            *holders.entry(isbn).or_default() += 1;
        }
    }

    for book in &books {
        let borrowed = match book.borrowed_copies() {
            Some(borrowed) if book.total_copies > 0 => borrowed,
            _ => {
                return Err(CatalogError::Inconsistent(format!(
                    "book {} has {} of {} copies available",
                    book.isbn, book.available_copies, book.total_copies
                )));
            }
        };

        let held = holders.remove(&book.isbn).unwrap_or(0);
        if borrowed != held {
            return Err(CatalogError::Inconsistent(format!(
                "book {} has {borrowed} copies out but {held} member(s) hold it",
                book.isbn
            )));
        }
    }

    // 残っているのは存在しない書籍への貸出
    if let Some(isbn) = holders.keys().min() {
        return Err(CatalogError::Inconsistent(format!(
            "borrowed book {isbn} does not exist"
        )));
    }

    Ok(())
}
