use sea_orm::entity::prelude::*;

/// One row per (user_id, chapter_id); uniqueness is enforced by the
/// `idx_chapter_purchase_user_chapter` index.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chapter_purchase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i64,
    pub chapter_id: i32,
    pub book_id: i32,
    pub price: i64,
    /// Set when the row was written as part of a whole-book bundle.
    pub book_purchase_id: Option<i32>,
    /// Set when the row was written as part of a multi-chapter batch.
    pub batch_id: Option<i32>,
    pub purchased_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
