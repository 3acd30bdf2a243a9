#[cfg(test)]
mod tests {
    use roster::Connection;
    use roster_sqlite::SqliteConnection;
    use roster_tests::{execute_tests, init_logs};

    #[tokio::test]
    async fn sqlite() {
        init_logs();
        let connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        execute_tests(connection).await;
    }
}
