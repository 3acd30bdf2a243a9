use crate::seed;
use roster::{Connection, catalog};
use std::sync::LazyLock;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn search<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;
    seed(connection).await;

    let found = catalog::search(connection, "%duncan%", 8)
        .await
        .expect("Could not search the students");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "duncan kipkemoi");
    assert_eq!(found[0].email, "duncan.kipkemoi@zurich.edu");
    assert_eq!(found[0].grade, 8);

    // LIKE ignores the ASCII case
    let found = catalog::search(connection, "%DUNCAN%", 8)
        .await
        .expect("Could not search the students");
    assert_eq!(
        found.iter().map(|v| v.name.as_str()).collect::<Vec<_>>(),
        ["duncan kipkemoi"]
    );

    let found = catalog::search(connection, "%duncan%", 6)
        .await
        .expect("Could not search the students");
    assert!(found.is_empty());

    let found = catalog::search(connection, "%einstein", 6)
        .await
        .expect("Could not search the students");
    assert_eq!(
        found.iter().map(|v| v.name.as_str()).collect::<Vec<_>>(),
        ["Albert Einstein"]
    );

    let found = catalog::search(connection, "%o'brien%", 8)
        .await
        .expect("Could not search with a quote in the pattern");
    assert!(found.is_empty());

    let student = catalog::find_by_name(connection, "pkurui sang")
        .await
        .expect("Could not find a student by name")
        .expect("The student should exist");
    assert_eq!(student.grade, 11);
    let missing = catalog::find_by_name(connection, "PKURUI SANG")
        .await
        .expect("Could not find a student by name");
    assert!(missing.is_none(), "Equality must be case sensitive");
}
