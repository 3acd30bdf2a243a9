use crate::reset;
use roster::{Connection, Entity, Passive, Student, catalog};
use std::{sync::LazyLock, time::Duration};
use time::{OffsetDateTime, PrimitiveDateTime, macros::datetime};
use tokio::{sync::Mutex, time::sleep};

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

fn now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

pub async fn enrollment<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;
    reset(connection).await;

    // Each insert gets its own enrollment timestamp
    let before = now();
    let first = catalog::enroll(
        connection,
        &[Student::new(
            "ada lovelace",
            "ada.lovelace@zurich.edu",
            5,
            datetime!(1815-12-10 00:00:00),
        )],
    )
    .await
    .expect("Could not enroll the first student");
    sleep(Duration::from_millis(20)).await;
    let second = catalog::enroll(
        connection,
        &[Student::new(
            "alan turing",
            "alan.turing@zurich.edu",
            7,
            datetime!(1912-06-23 00:00:00),
        )],
    )
    .await
    .expect("Could not enroll the second student");
    let after = now();

    let ada = catalog::find_by_name(connection, "ada lovelace")
        .await
        .expect("Could not look up the student")
        .expect("The student should exist");
    let alan = catalog::find_by_name(connection, "alan turing")
        .await
        .expect("Could not look up the student")
        .expect("The student should exist");
    assert_eq!(ada.primary_key(), first.last_affected_id);
    assert_eq!(alan.primary_key(), second.last_affected_id);
    let (Passive::Set(ada_enrolled), Passive::Set(alan_enrolled)) =
        (ada.enrolled_date, alan.enrolled_date)
    else {
        panic!("The enrollment date must be filled on insert");
    };
    assert!(before <= ada_enrolled, "{} < {}", ada_enrolled, before);
    assert!(ada_enrolled < alan_enrolled, "{} >= {}", ada_enrolled, alan_enrolled);
    assert!(alan_enrolled <= after, "{} > {}", alan_enrolled, after);

    // An explicit enrollment date is kept
    let mut grace = Student::new(
        "grace hopper",
        "grace.hopper@zurich.edu",
        10,
        datetime!(1906-12-09 00:00:00),
    );
    grace.enrolled_date = datetime!(2020-09-01 08:30:15.25).into();
    let result = Student::insert_one(connection, &grace).await;
    assert!(
        result.is_ok(),
        "Failed to insert the student: {:?}",
        result.unwrap_err()
    );
    let stored = catalog::find_by_name(connection, "grace hopper")
        .await
        .expect("Could not look up the student")
        .expect("The student should exist");
    assert_eq!(stored.enrolled_date, grace.enrolled_date);
    assert_eq!(stored.birthday, grace.birthday);

    // Ids are never reused, not even after deleting the highest one
    let highest = stored.primary_key().expect("A stored student has an id");
    let result = stored.delete(connection).await;
    assert!(
        result.is_ok(),
        "Failed to delete the student: {:?}",
        result.unwrap_err()
    );
    let result = catalog::enroll(connection, &[grace.clone()])
        .await
        .expect("Could not enroll the student again");
    let id = result
        .last_affected_id
        .expect("The insert must report the assigned id");
    assert!(id > highest, "Id {} was reused", id);
    assert_eq!(catalog::count(connection).await.ok(), Some(3));

    // Nothing to insert
    let result = catalog::enroll(connection, &[])
        .await
        .expect("Enrolling nobody must succeed");
    assert_eq!(result.rows_affected, 0);
    assert_eq!(catalog::count(connection).await.ok(), Some(3));
}
