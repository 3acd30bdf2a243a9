use crate::seed;
use roster::{
    ConstraintViolation, Connection, Entity, Passive, Result, RowsAffected, Student,
    ViolationKind, catalog,
};
use std::sync::LazyLock;
use time::macros::datetime;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

fn violation(result: Result<RowsAffected>) -> ViolationKind {
    let error = result.expect_err("The write should have been rejected");
    let Some(violation) = ConstraintViolation::find(&error) else {
        panic!("Expected a constraint violation, got: {:#}", error);
    };
    violation.kind
}

pub async fn constraints<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;
    seed(connection).await;

    // Duplicate email
    let result;
    crate::silent_logs! {
        result = catalog::enroll(
            connection,
            &[Student::new(
                "Albert Clone",
                "alberte.einstain@zurich.edu",
                7,
                datetime!(1990-01-01 00:00:00),
            )],
        )
        .await;
    }
    assert_eq!(violation(result), ViolationKind::Unique);
    assert_eq!(catalog::count(connection).await.ok(), Some(3));

    // One bad row rejects the whole batch
    let result;
    crate::silent_logs! {
        result = catalog::enroll(
            connection,
            &[
                Student::new(
                    "marie curie",
                    "marie.curie@zurich.edu",
                    9,
                    datetime!(1867-11-07 00:00:00),
                ),
                Student::new(
                    "duncan twin",
                    "duncan.kipkemoi@zurich.edu",
                    8,
                    datetime!(2000-01-03 00:00:00),
                ),
            ],
        )
        .await;
    }
    assert_eq!(violation(result), ViolationKind::Unique);
    assert_eq!(catalog::count(connection).await.ok(), Some(3));
    let marie = catalog::find_by_name(connection, "marie curie")
        .await
        .expect("Could not look up the student");
    assert!(marie.is_none(), "No row of a failed batch may be stored");

    // Grade out of range
    for grade in [0, 13, -1] {
        let result;
        crate::silent_logs! {
            result = catalog::enroll(
                connection,
                &[Student::new(
                    "out of range",
                    format!("grade{}@zurich.edu", grade),
                    grade,
                    datetime!(2010-05-05 00:00:00),
                )],
            )
            .await;
        }
        assert_eq!(violation(result), ViolationKind::Check, "grade {}", grade);
    }
    assert_eq!(catalog::count(connection).await.ok(), Some(3));

    // Both bounds are valid
    for grade in [1, 12] {
        let result = Student::insert_one(
            connection,
            &Student::new(
                "in range",
                format!("grade{}@zurich.edu", grade),
                grade,
                datetime!(2010-05-05 00:00:00),
            ),
        )
        .await;
        assert!(
            result.is_ok(),
            "Failed to insert grade {}: {:?}",
            grade,
            result.unwrap_err()
        );
    }
    assert_eq!(catalog::count(connection).await.ok(), Some(5));

    // Id taken already
    let existing = catalog::find_by_name(connection, "duncan kipkemoi")
        .await
        .expect("Could not look up the student")
        .expect("The student should exist");
    let mut copy = Student::new(
        "duncan copy",
        "duncan.copy@zurich.edu",
        8,
        datetime!(2000-01-03 00:00:00),
    );
    copy.id = existing.id.clone();
    let result;
    crate::silent_logs! {
        result = Student::insert_one(connection, &copy).await;
    }
    assert_eq!(violation(result), ViolationKind::PrimaryKey);
    copy.id = Passive::NotSet;
    let result = Student::insert_one(connection, &copy).await;
    assert!(
        result.is_ok(),
        "Failed to insert the student without id: {:?}",
        result.unwrap_err()
    );
    assert_eq!(catalog::count(connection).await.ok(), Some(6));
}
