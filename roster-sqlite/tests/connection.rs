#[cfg(test)]
mod tests {
    use roster::{
        AsValue, Connection, Entity, Executor, RowLabeled, Student, catalog,
        stream::TryStreamExt,
    };
    use roster_sqlite::SqliteConnection;
    use roster_tests::{init_logs, silent_logs};
    use std::{env, path::PathBuf, process};
    use tokio::fs;

    fn database_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("roster-{}-{}.sqlite", process::id(), name))
    }

    #[tokio::test]
    async fn create_database() {
        init_logs();
        let path = database_path("creation");
        if path.exists() {
            fs::remove_file(&path)
                .await
                .expect("Failed to remove the test database file");
        }
        let url = format!("sqlite://{}", path.display());
        {
            let mut connection = SqliteConnection::connect(&url)
                .await
                .expect("Could not open the database");
            assert!(path.exists(), "Database file should be created on connect");
            catalog::initialize(&mut connection)
                .await
                .expect("Could not create the table");
            catalog::enroll(&mut connection, &catalog::seed_students())
                .await
                .expect("Could not enroll the students");
        }
        {
            let mut connection = SqliteConnection::connect(&url)
                .await
                .expect("Could not open the database again");
            assert_eq!(catalog::count(&mut connection).await.ok(), Some(3));
            Student::drop_table(&mut connection, false)
                .await
                .expect("Could not drop the table");
        }
        fs::remove_file(&path)
            .await
            .expect("Failed to remove the test database file");
    }

    #[tokio::test]
    async fn locked_database() {
        init_logs();
        let path = database_path("locked");
        if path.exists() {
            fs::remove_file(&path)
                .await
                .expect("Failed to remove the test database file");
        }
        let url = format!("sqlite://{}", path.display());
        {
            let mut writer = SqliteConnection::connect(&url)
                .await
                .expect("Could not open the database");
            writer
                .execute("CREATE TABLE numbers (value INTEGER);".into())
                .await
                .expect("Could not create the table");
            let mut other = SqliteConnection::connect(&url)
                .await
                .expect("Could not open the database again");
            other
                .execute("SELECT COUNT(*) FROM numbers;".into())
                .await
                .expect("Could not read the table");
            writer
                .execute("BEGIN EXCLUSIVE;".into())
                .await
                .expect("Could not lock the database");
            silent_logs! {
                assert!(
                    other
                        .execute("INSERT INTO numbers VALUES (1);".into())
                        .await
                        .is_err(),
                    "Writing to a locked database must fail instead of waiting forever"
                );
            }
            writer
                .execute("ROLLBACK;".into())
                .await
                .expect("Could not unlock the database");
            let result = other
                .execute("INSERT INTO numbers VALUES (1);".into())
                .await
                .expect("Could not write once the lock is released");
            assert_eq!(result.rows_affected, 1);
        }
        fs::remove_file(&path)
            .await
            .expect("Failed to remove the test database file");
    }

    #[tokio::test]
    async fn wrong_url() {
        silent_logs! {
            assert!(
                SqliteConnection::connect("postgres://localhost/roster")
                    .await
                    .is_err()
            );
            assert!(
                SqliteConnection::connect("sqlite:///this/directory/does/not/exist/roster.sqlite")
                    .await
                    .is_err()
            );
        }
    }

    #[tokio::test]
    async fn multiple_statements() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        let result = connection
            .execute(
                "
                CREATE TABLE numbers (value INTEGER);
                INSERT INTO numbers VALUES (1), (2);
                -- comment between statements
                INSERT INTO numbers VALUES (3);
                "
                .into(),
            )
            .await
            .expect("Could not run the statements");
        assert_eq!(result.rows_affected, 3);
        assert_eq!(result.last_affected_id, Some(3));

        silent_logs! {
            assert!(
                connection
                    .prepare("SELECT 1; SELECT 2;".into())
                    .await
                    .is_err(),
                "Only one statement can be prepared"
            );
            assert!(
                connection
                    .execute("SELECT * FROM missing_table;".into())
                    .await
                    .is_err()
            );
        }
    }

    #[tokio::test]
    async fn bound_parameters() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        let mut query = connection
            .prepare("SELECT ? * 10 + ?, ?".into())
            .await
            .expect("Could not prepare the query");
        assert!(query.is_prepared());
        query
            .bind_index(4, 1)
            .and_then(|q| q.bind_index(3, 2))
            .and_then(|q| q.bind("last".to_string()))
            .expect("Could not bind the parameters");
        let rows: Vec<RowLabeled> = connection
            .fetch(query)
            .try_collect()
            .await
            .expect("Could not run the query");
        assert_eq!(rows.len(), 1);
        let values = rows[0].values();
        assert_eq!(i64::try_from_value(values[0].clone()).ok(), Some(43));
        assert_eq!(
            String::try_from_value(values[1].clone()).ok().as_deref(),
            Some("last")
        );
    }

    #[tokio::test]
    async fn transaction_rollback() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        catalog::initialize(&mut connection)
            .await
            .expect("Could not create the table");
        {
            let mut transaction = connection.begin().await.expect("Could not begin");
            Student::insert_many(&mut transaction, &catalog::seed_students())
                .await
                .expect("Could not insert the students");
            assert_eq!(catalog::count(&mut transaction).await.ok(), Some(3));
            roster::Transaction::rollback(transaction)
                .await
                .expect("Could not rollback");
        }
        assert_eq!(catalog::count(&mut connection).await.ok(), Some(0));
    }
}
