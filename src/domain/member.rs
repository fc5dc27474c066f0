use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::required_text;
use super::{
    AddMember, DeleteMemberError, Email, Isbn, MemberAdded, MemberDeleted, MemberId,
    MemberUpdated, UpdateMember, ValueError,
};

/// Member集約 - 図書館の会員
///
/// `borrowed`は現在借りている書籍のISBN（重複なし、借りた順）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub member_id: MemberId,
    pub name: String,
    pub email: Email,
    pub borrowed: Vec<Isbn>,
}

impl Member {
    pub fn holds(&self, isbn: &Isbn) -> bool {
        self.borrowed.contains(isbn)
    }

    pub fn borrowed_count(&self) -> usize {
        self.borrowed.len()
    }

    /// 名前またはメールアドレスに部分一致するか
    ///
    /// `needle`は小文字化済みであること。
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.value().to_lowercase().contains(needle)
    }
}

/// 純粋関数：会員を登録する
///
/// 貸出リストは空で始まる。IDの重複はアプリケーション層で確認する。
pub fn add_member(
    cmd: &AddMember,
    added_at: DateTime<Utc>,
) -> Result<(Member, MemberAdded), ValueError> {
    let member_id = MemberId::parse(&cmd.member_id)?;
    let name = required_text("name", &cmd.name)?;
    let email = Email::parse(&cmd.email)?;

    let member = Member {
        member_id: member_id.clone(),
        name: name.clone(),
        email,
        borrowed: Vec::new(),
    };

    let event = MemberAdded {
        member_id,
        name,
        occurred_at: added_at,
    };

    Ok((member, event))
}

/// 純粋関数：会員情報を部分更新する
///
/// 貸出リストは変更しない。
pub fn update_member(
    member: &Member,
    cmd: &UpdateMember,
    updated_at: DateTime<Utc>,
) -> Result<(Member, MemberUpdated), ValueError> {
    let name = match &cmd.name {
        Some(name) => required_text("name", name)?,
        None => member.name.clone(),
    };
    let email = match &cmd.email {
        Some(email) => Email::parse(email)?,
        None => member.email.clone(),
    };

    let updated = Member {
        name,
        email,
        ..member.clone()
    };

    let event = MemberUpdated {
        member_id: member.member_id.clone(),
        occurred_at: updated_at,
    };

    Ok((updated, event))
}

/// 純粋関数：会員の削除を判定する
pub fn delete_member(
    member: &Member,
    deleted_at: DateTime<Utc>,
) -> Result<MemberDeleted, DeleteMemberError> {
    if !member.borrowed.is_empty() {
        return Err(DeleteMemberError::HasLoans {
            borrowed: member.borrowed_count(),
        });
    }

    Ok(MemberDeleted {
        member_id: member.member_id.clone(),
        occurred_at: deleted_at,
    })
}
