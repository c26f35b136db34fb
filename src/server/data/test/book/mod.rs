use crate::server::{
    data::book::BookRepository,
    error::{internal::InternalError, AppError},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_by_id;
