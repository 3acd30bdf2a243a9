use crate::seed;
use roster::{Connection, Entity, ExpressionExt, Operand, Student, catalog};
use std::sync::LazyLock;
use time::macros::datetime;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn expel<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;
    seed(connection).await;

    // Equality is case sensitive
    let result = catalog::expel(connection, "albert einstein")
        .await
        .expect("Could not expel");
    assert_eq!(result.rows_affected, 0);
    assert_eq!(catalog::count(connection).await.ok(), Some(3));

    let result = catalog::expel(connection, "Albert Einstein")
        .await
        .expect("Could not expel");
    assert_eq!(result.rows_affected, 1);
    let albert = catalog::find_by_name(connection, "Albert Einstein")
        .await
        .expect("Could not look up the student");
    assert!(albert.is_none());
    assert_eq!(catalog::count(connection).await.ok(), Some(2));

    // Expelling twice is a no op
    let result = catalog::expel(connection, "Albert Einstein")
        .await
        .expect("Could not expel");
    assert_eq!(result.rows_affected, 0);

    // Delete one entity by primary key
    let duncan = catalog::find_by_name(connection, "duncan kipkemoi")
        .await
        .expect("Could not look up the student")
        .expect("The student should exist");
    let id = duncan.primary_key().expect("A stored student has an id");
    let found = Student::find_pk(connection, id)
        .await
        .expect("Could not find the student by id");
    assert_eq!(found.as_ref(), Some(&duncan));
    let result = duncan.delete(connection).await;
    assert!(
        result.is_ok(),
        "Failed to delete the student: {:?}",
        result.unwrap_err()
    );
    assert!(
        Student::find_pk(connection, id)
            .await
            .expect("Could not find the student by id")
            .is_none()
    );
    crate::silent_logs! {
        assert!(
            duncan.delete(connection).await.is_err(),
            "Deleting a missing student must fail"
        );
        let unsaved = Student::new(
            "never stored",
            "never.stored@zurich.edu",
            3,
            datetime!(2015-02-02 00:00:00),
        );
        assert!(
            unsaved.delete(connection).await.is_err(),
            "Deleting a student without id must fail"
        );
    }
    assert_eq!(catalog::count(connection).await.ok(), Some(1));

    // Delete by condition
    let condition = Student::GRADE.greater_equal(Operand::LitInt(10));
    let result = Student::delete_many(connection, &condition)
        .await
        .expect("Could not delete the students");
    assert_eq!(result.rows_affected, 1);
    let result = Student::delete_many(connection, &condition)
        .await
        .expect("Could not delete the students");
    assert_eq!(result.rows_affected, 0);
    assert_eq!(catalog::count(connection).await.ok(), Some(0));
}
