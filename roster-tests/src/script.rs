use crate::reset;
use indoc::indoc;
use roster::{ConstraintViolation, Connection, ViolationKind, catalog};
use std::sync::LazyLock;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn script<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;
    reset(connection).await;

    let mut out = Vec::new();
    let result = catalog::run_script(connection, &mut out).await;
    assert!(
        result.is_ok(),
        "Failed to run the script: {:?}",
        result.unwrap_err()
    );
    let out = String::from_utf8(out).expect("The output is not valid UTF-8");
    assert_eq!(
        out,
        indoc! {r#"
            Enrolled 3 students
            Students: Student 1: Albert Einstein, alberte.einstain@zurich.edu, Grade 6; Student 2: duncan kipkemoi, duncan.kipkemoi@zurich.edu, Grade 8; Student 3: pkurui sang, pkurui.sang@zurich.edu, Grade 11
            Names: ["Albert Einstein", "duncan kipkemoi", "pkurui sang"]
            Emails: ["alberte.einstain@zurich.edu", "duncan.kipkemoi@zurich.edu", "pkurui.sang@zurich.edu"]
            Names ascending: ["Albert Einstein", "duncan kipkemoi", "pkurui sang"]
            Grades descending: [11, 8, 6]
            Names and grades by grade: [("pkurui sang", 11), ("duncan kipkemoi", 8), ("Albert Einstein", 6)]
            Top student: pkurui sang (born 1998-10-23)
            Matching %duncan% in grade 8: duncan kipkemoi
            Promoted 3 students: [("pkurui sang", 12), ("duncan kipkemoi", 9), ("Albert Einstein", 7)]
            Expelled 1 named Albert Einstein
            Lookup after expel: None
            Remaining students: 2
        "#}
    );

    // Running it again on the same table stops at the enrollment
    let mut out = Vec::new();
    let result;
    crate::silent_logs! {
        result = catalog::run_script(connection, &mut out).await;
    }
    let error = result.expect_err("The seed students are enrolled already");
    let violation = ConstraintViolation::find(&error)
        .unwrap_or_else(|| panic!("Expected a constraint violation, got: {:#}", error));
    assert_eq!(violation.kind, ViolationKind::Unique);
    assert!(out.is_empty(), "Nothing is written before the enrollment");
    assert_eq!(catalog::count(connection).await.ok(), Some(2));
}
