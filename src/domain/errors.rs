use super::ValueError;

/// 書籍登録のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddBookError {
    /// 入力値が不正
    InvalidValue(ValueError),
    /// 蔵書数が0
    NonPositiveCopies,
}

impl From<ValueError> for AddBookError {
    fn from(err: ValueError) -> Self {
        AddBookError::InvalidValue(err)
    }
}

/// 書籍更新のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateBookError {
    InvalidValue(ValueError),
    NonPositiveCopies,
    /// 新しい蔵書数が貸出中の冊数を下回る
    CopiesBelowBorrowed { borrowed: u32, requested: u32 },
    /// 利用可能数が蔵書数を超えている（不整合）
    CopiesOutOfRange { total: u32, available: u32 },
}

impl From<ValueError> for UpdateBookError {
    fn from(err: ValueError) -> Self {
        UpdateBookError::InvalidValue(err)
    }
}

/// 書籍削除のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteBookError {
    /// 貸出中の冊がある
    OutstandingLoans { borrowed: u32 },
    /// 利用可能数が蔵書数を超えている（不整合）
    CopiesOutOfRange { total: u32, available: u32 },
}

/// 会員削除のエラー
///
/// 会員の登録・更新は入力値の検証でのみ失敗する（`ValueError`）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteMemberError {
    /// 貸出中の書籍がある
    HasLoans { borrowed: usize },
}

/// 貸出のエラー
///
/// 判定順序は `loan::borrow_book` を参照。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowBookError {
    /// 貸出可能な冊がない
    NoCopiesAvailable,
    /// 会員の貸出上限に達している
    BorrowLimitReached { limit: usize },
    /// 同じ書籍を既に借りている
    AlreadyBorrowed,
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// 会員はこの書籍を借りていない
    NotBorrowed,
    /// 返却すると利用可能数が蔵書数を超える（不整合）
    AllCopiesAlreadyIn,
}
