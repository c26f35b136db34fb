//! Chapter access verdicts.

use chrono::{DateTime, Utc};

use crate::server::model::chapter::Chapter;

/// Why an access decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessReason {
    Free,
    Vip,
    Purchased,
    Locked,
}

impl AccessReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Vip => "vip",
            Self::Purchased => "purchased",
            Self::Locked => "locked",
        }
    }

    pub fn grants_access(self) -> bool {
        !matches!(self, Self::Locked)
    }
}

/// Store lookups feeding an access decision for one (caller, chapter) pair.
///
/// Anonymous callers always have both flags false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessFacts {
    pub is_vip: bool,
    pub has_purchased: bool,
}

/// Access verdict assembled fresh for every query.
#[derive(Debug, Clone)]
pub struct ChapterAccessInfo {
    pub chapter: Chapter,
    pub is_purchased: bool,
    pub purchased_at: Option<DateTime<Utc>>,
    pub can_access: bool,
    pub reason: AccessReason,
}

impl ChapterAccessInfo {
    pub fn into_dto(self) -> crate::model::chapter::ChapterAccessDto {
        crate::model::chapter::ChapterAccessDto {
            chapter_id: self.chapter.id,
            title: self.chapter.title,
            chapter_num: self.chapter.chapter_num,
            word_count: self.chapter.word_count,
            is_free: self.chapter.is_free,
            is_vip: self.chapter.is_vip,
            price: self.chapter.price.cents(),
            is_purchased: self.is_purchased,
            purchased_at: self.purchased_at,
            can_access: self.can_access,
            access_reason: self.reason.as_str().to_string(),
        }
    }
}
