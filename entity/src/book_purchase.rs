use sea_orm::entity::prelude::*;

/// One row per (user_id, book_id); uniqueness is enforced by the
/// `idx_book_purchase_user_book` index.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "book_purchase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i64,
    pub book_id: i32,
    pub total_price: i64,
    pub original_price: i64,
    pub discount_percent: i32,
    pub chapter_count: i32,
    pub purchased_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
