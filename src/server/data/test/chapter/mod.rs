use crate::server::{
    data::chapter::ChapterRepository,
    error::{internal::InternalError, AppError},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DbErr};
use test_utils::{builder::TestBuilder, factory};

mod get_by_book_id;
mod get_by_ids;
mod get_by_id;
