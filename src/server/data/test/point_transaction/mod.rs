use crate::server::{
    data::point_transaction::PointTransactionRepository,
    model::{page::PageParam, points::PointReason},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_by_user_paginated;
