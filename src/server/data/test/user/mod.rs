use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{points::Plan, user::UpsertUserParam},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod debit;
mod get_all_paginated;
mod reset_points_if_due;
mod set_billing;
mod update_identity;
mod update_profile;
