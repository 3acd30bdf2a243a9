#[cfg(test)]
mod tests {
    use indoc::indoc;
    use roster::{
        AsValue, Entity, Expression, ExpressionExt, GenericSqlWriter, Operand, Passive,
        RowLabeled, STUDENTS, SqlWriter, Student, TableConstraint, Value,
    };
    use std::sync::Arc;
    use time::{OffsetDateTime, PrimitiveDateTime, macros::datetime};

    const WRITER: GenericSqlWriter = GenericSqlWriter::new();

    fn einstein() -> Student {
        Student::new(
            "Albert Einstein",
            "alberte.einstain@zurich.edu",
            6,
            datetime!(1879-03-14 00:00:00),
        )
    }

    #[test]
    fn schema() {
        let table = Student::table_def();
        assert_eq!(table.table.name, "students");
        assert_eq!(table.table.schema, "");
        assert_eq!(
            Student::columns()
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>(),
            ["id", "name", "email", "grade", "birthday", "enrolled_date"]
        );
        assert_eq!(table.primary_key(), ["id"]);
        let id = table
            .primary_key_column()
            .expect("The primary key is a single column");
        assert!(id.auto_increment);
        assert!(id.passive);
        let email = table.column("email").expect("Missing email column");
        assert_eq!(email.column_type, "VARCHAR(55)");
        assert!(!email.nullable);
        assert!(table.column("missing").is_none());

        let names = table.constraints.iter().map(|c| c.name).collect::<Vec<_>>();
        assert_eq!(names, ["id_pk", "unique_email", "grade_between_1_and_12"]);
        assert!(matches!(
            table.constraints[1].kind,
            TableConstraint::Unique(["email"])
        ));
        let TableConstraint::Check(check) = table.constraints[2].kind else {
            panic!("Expected a check constraint");
        };
        let mut out = String::new();
        check.write_query(&WRITER, &mut out, false);
        assert_eq!(out, r#""grade" >= 1 AND "grade" <= 12"#);

        assert_eq!(table.indexes.len(), 1);
        assert_eq!(table.indexes[0].name, "index_name");
        assert_eq!(table.indexes[0].columns, ["name"]);
        assert!(!table.indexes[0].unique);
    }

    #[test]
    fn enrollment_default() {
        let column = STUDENTS
            .column("enrolled_date")
            .expect("Missing enrolled_date column");
        let now = || {
            let now = OffsetDateTime::now_utc();
            PrimitiveDateTime::new(now.date(), now.time())
        };
        let before = now();
        let first = column.generated().expect("The default is generated");
        let second = column.generated().expect("The default is generated");
        let after = now();
        let first = PrimitiveDateTime::try_from_value(first).expect("Not a timestamp");
        let second = PrimitiveDateTime::try_from_value(second).expect("Not a timestamp");
        assert!(before <= first && first <= second && second <= after);
        assert!(STUDENTS.column("birthday").and_then(|c| c.generated()).is_none());
    }

    #[test]
    fn create_and_drop() {
        let mut query = String::new();
        WRITER.write_create_table(&mut query, &STUDENTS, false);
        assert_eq!(
            query,
            indoc! {r#"
                CREATE TABLE "students" (
                "id" BIGINT CONSTRAINT "id_pk" PRIMARY KEY,
                "name" VARCHAR NOT NULL,
                "email" VARCHAR(55) NOT NULL,
                "grade" INTEGER NOT NULL,
                "birthday" TIMESTAMP NOT NULL,
                "enrolled_date" TIMESTAMP NOT NULL,
                CONSTRAINT "unique_email" UNIQUE ("email"),
                CONSTRAINT "grade_between_1_and_12" CHECK ("grade" >= 1 AND "grade" <= 12)
                );
                CREATE INDEX "index_name" ON "students" ("name");
            "#}
            .trim()
        );

        let mut query = String::new();
        WRITER.write_drop_table(&mut query, &Student::TABLE, true);
        assert_eq!(query, r#"DROP TABLE IF EXISTS "students";"#);
    }

    #[test]
    fn insert() {
        let mut first = einstein();
        first.enrolled_date = datetime!(2024-09-02 08:00:00).into();
        let mut second = Student::new(
            "duncan kipkemoi",
            "duncan.kipkemoi@zurich.edu",
            8,
            datetime!(2000-01-03 00:00:00),
        );
        second.id = 7.into();
        second.enrolled_date = datetime!(2024-09-02 08:00:01).into();
        let mut query = String::new();
        WRITER.write_insert(
            &mut query,
            &STUDENTS,
            &[first.row_filtered(), second.row_filtered()],
        );
        assert_eq!(
            query,
            indoc! {r#"
                INSERT INTO "students" ("id", "name", "email", "grade", "birthday", "enrolled_date") VALUES
                (DEFAULT, 'Albert Einstein', 'alberte.einstain@zurich.edu', 6, '1879-03-14 00:00:00.0', '2024-09-02 08:00:00.0'),
                (7, 'duncan kipkemoi', 'duncan.kipkemoi@zurich.edu', 8, '2000-01-03 00:00:00.0', '2024-09-02 08:00:01.0');
            "#}
            .trim()
        );

        let mut query = String::new();
        WRITER.write_insert(&mut query, &STUDENTS, &[]);
        assert_eq!(query, "");
    }

    #[test]
    fn insert_generated_default() {
        let mut query = String::new();
        WRITER.write_insert(&mut query, &STUDENTS, &[einstein().row_filtered()]);
        let prefix = indoc! {r#"
            INSERT INTO "students" ("name", "email", "grade", "birthday", "enrolled_date") VALUES
            ('Albert Einstein', 'alberte.einstain@zurich.edu', 6, '1879-03-14 00:00:00.0', '"#};
        assert!(query.starts_with(prefix), "Unexpected query:\n{}", query);
        let enrolled = query[prefix.len()..]
            .trim_end_matches("');")
            .to_string();
        assert!(
            <PrimitiveDateTime as AsValue>::parse(&enrolled).is_ok(),
            "{}",
            enrolled
        );
    }

    #[test]
    fn queries() {
        let mut query = String::new();
        WRITER.write_select(
            &mut query,
            &[&Student::NAME, &Student::GRADE],
            &Student::TABLE,
            &true,
            &[&Student::GRADE.desc()],
            Some(1),
        );
        assert_eq!(
            query,
            indoc! {r#"
                SELECT "name", "grade"
                FROM "students"
                WHERE true
                ORDER BY "grade" DESC
                LIMIT 1;
            "#}
            .trim()
        );

        let mut query = String::new();
        WRITER.write_count(&mut query, &Student::TABLE, &true);
        assert_eq!(
            query,
            indoc! {r#"
                SELECT COUNT(*)
                FROM "students"
                WHERE true;
            "#}
            .trim()
        );

        let mut query = String::new();
        let increment = Student::GRADE.plus(Operand::LitInt(1));
        WRITER.write_update(
            &mut query,
            &Student::TABLE,
            &[(Student::GRADE, &increment as &dyn Expression)],
            &true,
        );
        assert_eq!(
            query,
            indoc! {r#"
                UPDATE "students" SET "grade" = "grade" + 1
                WHERE true;
            "#}
            .trim()
        );

        let mut query = String::new();
        WRITER.write_delete(
            &mut query,
            &Student::TABLE,
            &Student::NAME.equals(Operand::QuestionMark),
        );
        assert_eq!(
            query,
            indoc! {r#"
                DELETE FROM "students"
                WHERE "name" = ?;
            "#}
            .trim()
        );
    }

    #[test]
    fn row_filtered() {
        let mut student = einstein();
        let row = student.row_filtered();
        assert_eq!(
            row.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            ["name", "email", "grade", "birthday"]
        );
        assert_eq!(row[2].1, Value::Int32(Some(6)));
        student.id = Passive::Set(3);
        let row = student.row_filtered();
        assert_eq!(row[0], ("id", Value::Int64(Some(3))));
        assert_eq!(student.primary_key(), Some(3));
        assert_eq!(einstein().primary_key(), None);
    }

    #[test]
    fn from_row() {
        let labels: Arc<[String]> = [
            "id",
            "name",
            "email",
            "grade",
            "birthday",
            "enrolled_date",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        let row = RowLabeled::new(
            labels.clone(),
            [
                Value::Int64(Some(1)),
                Value::Varchar(Some("Albert Einstein".into())),
                Value::Varchar(Some("alberte.einstain@zurich.edu".into())),
                Value::Int64(Some(6)),
                Value::Varchar(Some("1879-03-14 00:00:00.0".into())),
                Value::Varchar(Some("2024-09-02T08:00:00".into())),
            ]
            .into(),
        );
        let student = Student::from_row(row).expect("Could not decode the row");
        assert_eq!(student.id, Passive::Set(1));
        assert_eq!(student.name, "Albert Einstein");
        assert_eq!(student.grade, 6);
        assert_eq!(student.birthday, datetime!(1879-03-14 00:00:00));
        assert_eq!(
            student.enrolled_date,
            Passive::Set(datetime!(2024-09-02 08:00:00))
        );
        assert_eq!(
            student.to_string(),
            "Student 1: Albert Einstein, alberte.einstain@zurich.edu, Grade 6"
        );
        assert_eq!(
            einstein().to_string(),
            "Student: Albert Einstein, alberte.einstain@zurich.edu, Grade 6"
        );

        let row = RowLabeled::new(
            labels.clone(),
            [
                Value::Int64(Some(1)),
                Value::Varchar(Some("Albert Einstein".into())),
                Value::Varchar(Some("alberte.einstain@zurich.edu".into())),
                Value::Int64(Some(i64::MAX)),
                Value::Varchar(Some("1879-03-14 00:00:00".into())),
                Value::Null,
            ]
            .into(),
        );
        assert!(Student::from_row(row).is_err(), "Grade out of i32 range");

        let row = RowLabeled::new(labels[..2].into(), [Value::Int64(Some(1)), Value::Null].into());
        assert!(Student::from_row(row).is_err(), "Missing columns");
    }
}
