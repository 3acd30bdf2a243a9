#[cfg(test)]
mod tests {
    use indoc::indoc;
    use roster::{Entity, SqlWriter, Student};
    use roster_sqlite::SqliteSqlWriter;
    use time::macros::datetime;

    const WRITER: SqliteSqlWriter = SqliteSqlWriter {};

    #[test]
    fn create_table() {
        let mut query = String::new();
        WRITER.write_create_table(&mut query, Student::table_def(), true);
        assert_eq!(
            query,
            indoc! {r#"
                CREATE TABLE IF NOT EXISTS "students" (
                "id" INTEGER CONSTRAINT "id_pk" PRIMARY KEY AUTOINCREMENT,
                "name" TEXT NOT NULL,
                "email" VARCHAR(55) NOT NULL,
                "grade" INTEGER NOT NULL,
                "birthday" TEXT NOT NULL,
                "enrolled_date" TEXT NOT NULL,
                CONSTRAINT "unique_email" UNIQUE ("email"),
                CONSTRAINT "grade_between_1_and_12" CHECK ("grade" >= 1 AND "grade" <= 12)
                );
                CREATE INDEX IF NOT EXISTS "index_name" ON "students" ("name");
            "#}
            .trim()
        );
    }

    #[test]
    fn insert() {
        let mut student = Student::new(
            "O'Neil",
            "oneil@zurich.edu",
            4,
            datetime!(2016-04-01 00:00:00),
        );
        student.enrolled_date = datetime!(2024-09-02 08:00:00.5).into();
        let mut query = String::new();
        WRITER.write_insert(&mut query, Student::table_def(), &[student.row_filtered()]);
        assert_eq!(
            query,
            indoc! {r#"
                INSERT INTO "students" ("name", "email", "grade", "birthday", "enrolled_date") VALUES
                ('O''Neil', 'oneil@zurich.edu', 4, '2016-04-01 00:00:00.0', '2024-09-02 08:00:00.5');
            "#}
            .trim()
        );
    }
}
