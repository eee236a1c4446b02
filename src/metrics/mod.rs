use {
    crate::metrics::handler::{counter, counter_vec, histogram_fast_ops, histogram_slow_ops},
    prometheus::{Histogram, IntCounter, IntCounterVec},
};

pub mod handler;

lazy_static::lazy_static!(
    pub static ref OPERATIONS_PROCESSED_TOTAL: IntCounterVec =
        counter_vec("operations_processed_total", "Total number of successful bank operations", &["operation"]);

    pub static ref OPERATIONS_FAILED_TOTAL: IntCounterVec =
        counter_vec("operations_failed_total", "Total number of failed bank operations", &["operation", "code"]);

    pub static ref ACCOUNT_NUMBER_COLLISIONS_TOTAL: IntCounter =
        counter("account_number_collisions_total", "Generated account numbers that were already taken");

    pub static ref ACCOUNT_OPENING_TIME_SECONDS: Histogram =
        histogram_slow_ops("account_opening_time_seconds", "Time spent opening accounts in seconds");

    pub static ref TRANSFER_TIME_SECONDS: Histogram =
        histogram_slow_ops("transfer_time_seconds", "Time spent transferring funds in seconds");

    pub static ref DEPOSIT_TIME_SECONDS: Histogram =
        histogram_fast_ops("deposit_time_seconds", "Time spent depositing funds in seconds");

    pub static ref WITHDRAW_TIME_SECONDS: Histogram =
        histogram_fast_ops("withdraw_time_seconds", "Time spent withdrawing funds in seconds");

    pub static ref STATEMENT_TIME_SECONDS: Histogram =
        histogram_fast_ops("statement_time_seconds", "Time spent building statements in seconds");
);
