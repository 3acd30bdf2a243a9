//! The catalog operations, each one a single round trip to the database.
//!
//! [`run_script`] runs all of them in order against a fresh table and writes
//! one line for every result.

use crate::Student;
use roster_core::{
    AsValue, Connection, Context, DataSet, Driver, Entity, Executor, Expression, ExpressionExt,
    Operand, Result, RowsAffected, SqlWriter, Transaction,
    stream::{StreamExt, TryStreamExt},
};
use std::io::Write;
use time::{PrimitiveDateTime, macros::datetime};

/// Creates the `students` table and its index, unless they exist already.
pub async fn initialize<Exec: Executor>(executor: &mut Exec) -> Result<()> {
    Student::create_table(executor, true).await
}

pub fn seed_students() -> Vec<Student> {
    vec![
        Student::new(
            "Albert Einstein",
            "alberte.einstain@zurich.edu",
            6,
            datetime!(1879-03-14 00:00:00),
        ),
        Student::new(
            "duncan kipkemoi",
            "duncan.kipkemoi@zurich.edu",
            8,
            datetime!(2000-01-03 00:00:00),
        ),
        Student::new(
            "pkurui sang",
            "pkurui.sang@zurich.edu",
            11,
            datetime!(1998-10-23 00:00:00),
        ),
    ]
}

/// Inserts all the students with one statement inside a transaction.
///
/// Either every student is stored or none is.
pub async fn enroll<C: Connection>(
    connection: &mut C,
    students: &[Student],
) -> Result<RowsAffected> {
    let mut transaction = connection.begin().await?;
    let result = Student::insert_many(&mut transaction, students).await;
    match result {
        Ok(result) => {
            transaction.commit().await?;
            log::debug!("Enrolled {} students", result.rows_affected);
            Ok(result)
        }
        Err(error) => {
            if let Err(rollback) = transaction.rollback().await {
                log::error!("Could not rollback the enrollment: {:#}", rollback);
            }
            Err(error.context(format!("While enrolling {} students", students.len())))
        }
    }
}

pub async fn all_students<Exec: Executor>(executor: &mut Exec) -> Result<Vec<Student>> {
    Student::find_many(executor, &true, None).try_collect().await
}

pub async fn names<Exec: Executor>(executor: &mut Exec) -> Result<Vec<String>> {
    Student::table_ref()
        .select([&Student::NAME as &dyn Expression], executor, &true, &[], None)
        .map(|row| row.and_then(|mut row| row.take("name")))
        .try_collect()
        .await
}

pub async fn emails<Exec: Executor>(executor: &mut Exec) -> Result<Vec<String>> {
    Student::table_ref()
        .select([&Student::EMAIL as &dyn Expression], executor, &true, &[], None)
        .map(|row| row.and_then(|mut row| row.take("email")))
        .try_collect()
        .await
}

pub async fn names_ascending<Exec: Executor>(executor: &mut Exec) -> Result<Vec<String>> {
    Student::table_ref()
        .select(
            [&Student::NAME as &dyn Expression],
            executor,
            &true,
            &[&Student::NAME.asc()],
            None,
        )
        .map(|row| row.and_then(|mut row| row.take("name")))
        .try_collect()
        .await
}

pub async fn grades_descending<Exec: Executor>(executor: &mut Exec) -> Result<Vec<i32>> {
    Student::table_ref()
        .select(
            [&Student::GRADE as &dyn Expression],
            executor,
            &true,
            &[&Student::GRADE.desc()],
            None,
        )
        .map(|row| row.and_then(|mut row| row.take::<i32>("grade")))
        .try_collect()
        .await
}

pub async fn names_and_grades_descending<Exec: Executor>(
    executor: &mut Exec,
) -> Result<Vec<(String, i32)>> {
    Student::table_ref()
        .select(
            [&Student::NAME as &dyn Expression, &Student::GRADE],
            executor,
            &true,
            &[&Student::GRADE.desc()],
            None,
        )
        .map(|row| {
            row.and_then(|mut row| Ok((row.take("name")?, row.take("grade")?)))
        })
        .try_collect()
        .await
}

/// Name and birthday of the student with the highest grade.
pub async fn top_student<Exec: Executor>(
    executor: &mut Exec,
) -> Result<Option<(String, PrimitiveDateTime)>> {
    let rows: Vec<(String, PrimitiveDateTime)> = Student::table_ref()
        .select(
            [&Student::NAME as &dyn Expression, &Student::BIRTHDAY],
            executor,
            &true,
            &[&Student::GRADE.desc()],
            Some(1),
        )
        .map(|row| {
            row.and_then(|mut row| Ok((row.take("name")?, row.take("birthday")?)))
        })
        .try_collect()
        .await?;
    Ok(rows.into_iter().next())
}

/// Students whose name matches the `LIKE` pattern and that are in `grade`.
pub async fn search<Exec: Executor>(
    executor: &mut Exec,
    pattern: &str,
    grade: i32,
) -> Result<Vec<Student>> {
    let condition = Student::NAME
        .like(pattern.to_string().as_value())
        .and(Student::GRADE.equals(grade.as_value()));
    Student::find_many(executor, &condition, None)
        .try_collect()
        .await
}

/// Moves every student to the next grade.
///
/// Fails without changing any row when a student is already in the last grade.
pub async fn promote_all<Exec: Executor>(executor: &mut Exec) -> Result<RowsAffected> {
    let increment = Student::GRADE.plus(Operand::LitInt(1));
    Student::update_many(
        executor,
        &[(Student::GRADE, &increment as &dyn Expression)],
        &true,
    )
    .await
    .context("While promoting the students")
}

/// Deletes the students named exactly `name`.
pub async fn expel<Exec: Executor>(executor: &mut Exec, name: &str) -> Result<RowsAffected> {
    let mut sql = String::with_capacity(64);
    executor.driver().sql_writer().write_delete(
        &mut sql,
        Student::table_ref(),
        &Student::NAME.equals(Operand::QuestionMark),
    );
    let mut query = executor.prepare(sql).await?;
    query.bind(name.to_string())?;
    executor.execute(query).await
}

pub async fn find_by_name<Exec: Executor>(
    executor: &mut Exec,
    name: &str,
) -> Result<Option<Student>> {
    Student::find_one(executor, &Student::NAME.equals(name.to_string().as_value())).await
}

pub async fn count<Exec: Executor>(executor: &mut Exec) -> Result<u64> {
    Student::count(executor, &true).await
}

/// Seeds the catalog and runs every operation in order, writing the results to `out`.
pub async fn run_script<C: Connection>(connection: &mut C, out: &mut impl Write) -> Result<()> {
    initialize(connection).await?;

    let result = enroll(connection, &seed_students()).await?;
    writeln!(out, "Enrolled {} students", result.rows_affected)?;

    let students = all_students(connection).await?;
    writeln!(
        out,
        "Students: {}",
        students
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    )?;

    writeln!(out, "Names: {:?}", names(connection).await?)?;
    writeln!(out, "Emails: {:?}", emails(connection).await?)?;
    writeln!(out, "Names ascending: {:?}", names_ascending(connection).await?)?;
    writeln!(out, "Grades descending: {:?}", grades_descending(connection).await?)?;
    writeln!(
        out,
        "Names and grades by grade: {:?}",
        names_and_grades_descending(connection).await?
    )?;

    match top_student(connection).await? {
        Some((name, birthday)) => {
            writeln!(out, "Top student: {} (born {})", name, birthday.date())?
        }
        None => writeln!(out, "Top student: none")?,
    }

    let found = search(connection, "%duncan%", 8).await?;
    writeln!(
        out,
        "Matching %duncan% in grade 8: {}",
        found
            .iter()
            .map(|v| v.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    )?;

    let result = promote_all(connection).await?;
    writeln!(
        out,
        "Promoted {} students: {:?}",
        result.rows_affected,
        names_and_grades_descending(connection).await?
    )?;

    let result = expel(connection, "Albert Einstein").await?;
    writeln!(out, "Expelled {} named Albert Einstein", result.rows_affected)?;
    writeln!(
        out,
        "Lookup after expel: {:?}",
        find_by_name(connection, "Albert Einstein")
            .await?
            .map(|v| v.to_string())
    )?;
    writeln!(out, "Remaining students: {}", count(connection).await?)?;
    Ok(())
}
