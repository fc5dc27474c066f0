mod catalog_service;
mod errors;
mod queries;
mod unit_of_work;

pub use catalog_service::{
    Catalog, CatalogConfig, add_book, add_member, borrow_book, delete_book, delete_member,
    return_book, update_book, update_member,
};
pub use errors::{CatalogError, ErrorCategory, PortError, Result};
pub use queries::{
    borrowers_of, events, get_book, get_member, list_books, list_members, search_books,
    search_members, verify_consistency,
};
