use crate::seed;
use roster::{ConstraintViolation, Connection, ViolationKind, catalog};
use std::sync::LazyLock;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn promote<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;
    seed(connection).await;

    let result = catalog::promote_all(connection)
        .await
        .expect("Could not promote the students");
    assert_eq!(result.rows_affected, 3);
    let grades = catalog::grades_descending(connection)
        .await
        .expect("Could not select the grades");
    assert_eq!(grades, [12, 9, 7]);

    // pkurui sang would end up in grade 13
    let result;
    crate::silent_logs! {
        result = catalog::promote_all(connection).await;
    }
    let error = result.expect_err("Promoting past grade 12 must fail");
    assert_eq!(
        ConstraintViolation::find(&error).map(|v| v.kind),
        Some(ViolationKind::Check),
        "Unexpected error: {:#}",
        error
    );
    let grades = catalog::grades_descending(connection)
        .await
        .expect("Could not select the grades");
    assert_eq!(grades, [12, 9, 7], "A failed promotion must not change any row");
}
