use crate::domain::{Member, MemberId};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Member repository port.
///
/// Stores Member aggregates keyed by MemberId. Like the book repository,
/// every value handed out is an owned snapshot.
pub trait MemberRepository: Send + Sync {
    fn get(&self, member_id: &MemberId) -> Result<Option<Member>>;

    /// Insert or replace the member with the same id.
    fn save(&mut self, member: Member) -> Result<()>;

    fn remove(&mut self, member_id: &MemberId) -> Result<Option<Member>>;

    /// All members ordered by id.
    fn list(&self) -> Result<Vec<Member>>;
}
