use crate::server::{
    data::vocabulary::VocabularyRepository,
    model::{page::PageParam, vocabulary::WordFieldsParam},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_all_by_review_order;
mod get_by_user_paginated;
mod get_due;
mod term_exists;
mod update;

fn fields(term: &str, meaning: &str) -> WordFieldsParam {
    WordFieldsParam {
        term: term.to_string(),
        meaning: meaning.to_string(),
        example: None,
    }
}
