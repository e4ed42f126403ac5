use crate::server::{
    data::coaching::CoachingRepository,
    error::AppError,
    model::coaching::ChatRole,
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod append_exchange;
mod delete_session;
mod get_sessions_by_user;
