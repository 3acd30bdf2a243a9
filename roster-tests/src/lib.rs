mod constraints;
mod enrollment;
mod expel;
mod ordering;
mod promote;
mod script;
mod search;

use crate::{
    constraints::constraints,
    enrollment::enrollment,
    expel::expel,
    ordering::ordering,
    promote::promote,
    script::script,
    search::search,
};
use log::LevelFilter;
use roster::{Connection, Entity, Executor, Student, catalog};
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Drops the `students` table and creates it again, empty.
pub(crate) async fn reset<Exec: Executor>(executor: &mut Exec) {
    let result = Student::drop_table(executor, true).await;
    assert!(
        result.is_ok(),
        "Failed to Student::drop_table: {:?}",
        result.unwrap_err()
    );
    let result = catalog::initialize(executor).await;
    assert!(
        result.is_ok(),
        "Failed to catalog::initialize: {:?}",
        result.unwrap_err()
    );
}

/// Seeds an empty `students` table.
pub(crate) async fn seed<C: Connection>(connection: &mut C) {
    reset(connection).await;
    let result = catalog::enroll(connection, &catalog::seed_students()).await;
    assert!(
        result.is_ok(),
        "Failed to enroll the seed students: {:?}",
        result.unwrap_err()
    );
    assert_eq!(result.unwrap().rows_affected, 3);
}

pub async fn execute_tests<C: Connection>(mut connection: C) {
    ordering(&mut connection).await;
    search(&mut connection).await;
    promote(&mut connection).await;
    constraints(&mut connection).await;
    expel(&mut connection).await;
    enrollment(&mut connection).await;
    script(&mut connection).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
