pub mod book_repository;
pub mod event_log;
pub mod member_repository;

pub use book_repository::BookRepository as InMemoryBookRepository;
pub use event_log::EventLog as InMemoryEventLog;
pub use member_repository::MemberRepository as InMemoryMemberRepository;
