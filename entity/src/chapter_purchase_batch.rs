use sea_orm::entity::prelude::*;

/// A selection of chapters bought together in one wallet debit. The chapter rows
/// written with it point back through `chapter_purchase.batch_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chapter_purchase_batch")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i64,
    pub book_id: i32,
    pub total_price: i64,
    pub chapter_count: i32,
    pub purchased_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
