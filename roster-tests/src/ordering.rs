use crate::seed;
use roster::{Connection, catalog};
use std::sync::LazyLock;
use time::macros::datetime;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn ordering<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;
    seed(connection).await;

    let students = catalog::all_students(connection)
        .await
        .expect("Could not load all the students");
    assert_eq!(students.len(), 3);
    assert!(students.iter().all(|v| v.id.is_set()));
    assert!(students.iter().all(|v| v.enrolled_date.is_set()));
    let mut ids = students
        .iter()
        .filter_map(|v| v.id.as_option().copied())
        .collect::<Vec<_>>();
    ids.sort();
    assert_eq!(ids, [ids[0], ids[0] + 1, ids[0] + 2]);

    let mut names = catalog::names(connection)
        .await
        .expect("Could not select the names");
    names.sort();
    assert_eq!(names, ["Albert Einstein", "duncan kipkemoi", "pkurui sang"]);

    let mut emails = catalog::emails(connection)
        .await
        .expect("Could not select the emails");
    emails.sort();
    assert_eq!(
        emails,
        [
            "alberte.einstain@zurich.edu",
            "duncan.kipkemoi@zurich.edu",
            "pkurui.sang@zurich.edu",
        ]
    );

    // Capital letters sort first
    let names = catalog::names_ascending(connection)
        .await
        .expect("Could not select the names in order");
    assert_eq!(names, ["Albert Einstein", "duncan kipkemoi", "pkurui sang"]);

    let grades = catalog::grades_descending(connection)
        .await
        .expect("Could not select the grades in order");
    assert_eq!(grades, [11, 8, 6]);

    let names_and_grades = catalog::names_and_grades_descending(connection)
        .await
        .expect("Could not select names and grades");
    assert_eq!(
        names_and_grades,
        [
            ("pkurui sang".to_string(), 11),
            ("duncan kipkemoi".to_string(), 8),
            ("Albert Einstein".to_string(), 6),
        ]
    );

    let top = catalog::top_student(connection)
        .await
        .expect("Could not select the top student");
    assert_eq!(
        top,
        Some(("pkurui sang".to_string(), datetime!(1998-10-23 00:00:00)))
    );

    let count = catalog::count(connection)
        .await
        .expect("Could not count the students");
    assert_eq!(count, 3);

    // Empty table
    crate::reset(connection).await;
    let top = catalog::top_student(connection)
        .await
        .expect("Could not select the top student of an empty table");
    assert_eq!(top, None);
    let names = catalog::names_ascending(connection)
        .await
        .expect("Could not select the names of an empty table");
    assert!(names.is_empty());
    assert_eq!(catalog::count(connection).await.ok(), Some(0));
}
