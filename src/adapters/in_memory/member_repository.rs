use crate::domain::{Member, MemberId};
use crate::ports::member_repository::{MemberRepository as MemberRepositoryTrait, Result};
use std::collections::BTreeMap;

/// In-memory implementation of MemberRepository
///
/// Members are kept in a BTreeMap, so listings come back ordered by id.
#[derive(Debug, Default)]
pub struct MemberRepository {
    members: BTreeMap<MemberId, Member>,
}

impl MemberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemberRepositoryTrait for MemberRepository {
    fn get(&self, member_id: &MemberId) -> Result<Option<Member>> {
        Ok(self.members.get(member_id).cloned())
    }

    fn save(&mut self, member: Member) -> Result<()> {
        self.members.insert(member.member_id.clone(), member);
        Ok(())
    }

    fn remove(&mut self, member_id: &MemberId) -> Result<Option<Member>> {
        Ok(self.members.remove(member_id))
    }

    fn list(&self) -> Result<Vec<Member>> {
        Ok(self.members.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Email;

    fn member(id: &str) -> Member {
        Member {
            member_id: MemberId::parse(id).unwrap(),
            name: format!("Member {id}"),
            email: Email::parse("m@example.com").unwrap(),
            borrowed: Vec::new(),
        }
    }

    #[test]
    fn test_save_get_remove() {
        let mut repo = MemberRepository::new();
        let id = MemberId::parse("M1").unwrap();

        repo.save(member("M1")).unwrap();
        assert_eq!(repo.get(&id).unwrap(), Some(member("M1")));

        assert!(repo.remove(&id).unwrap().is_some());
        assert!(repo.get(&id).unwrap().is_none());
    }

    #[test]
    fn test_list_is_ordered_by_id() {
        let mut repo = MemberRepository::new();
        repo.save(member("M2")).unwrap();
        repo.save(member("M1")).unwrap();

        let ids: Vec<MemberId> = repo.list().unwrap().into_iter().map(|m| m.member_id).collect();
        assert_eq!(
            ids,
            vec![MemberId::parse("M1").unwrap(), MemberId::parse("M2").unwrap()]
        );
    }
}
