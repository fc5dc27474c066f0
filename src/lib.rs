//! In-memory catalog of library books and members with a borrow/return
//! workflow.
//!
//! The crate is layered the usual way: `domain` holds records and pure
//! validate-then-build functions, `ports` the storage traits, `adapters`
//! the in-memory implementations, and `application` the [`Catalog`]
//! service and its operations.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use application::catalog::{Catalog, CatalogConfig, CatalogError, ErrorCategory};
