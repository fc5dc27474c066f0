pub mod book_repository;
pub mod event_log;
pub mod member_repository;

pub use book_repository::BookRepository;
pub use event_log::EventLog;
pub use member_repository::MemberRepository;
