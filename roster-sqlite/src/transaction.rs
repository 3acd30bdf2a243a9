use crate::{SqliteConnection, SqliteDriver};
use roster_core::{
    Driver, Executor, Query, QueryResult, Result, SqlWriter, Transaction,
    future::TryFutureExt, stream::Stream,
};

/// Holds the connection between `BEGIN` and `COMMIT` or `ROLLBACK`.
///
/// Dropping it without calling either leaves the transaction open on the
/// connection, the next `BEGIN` will then fail.
pub struct SqliteTransaction<'c> {
    connection: &'c mut SqliteConnection,
}

impl<'c> SqliteTransaction<'c> {
    pub async fn new(connection: &'c mut SqliteConnection) -> Result<Self> {
        let mut sql = String::new();
        connection
            .driver()
            .sql_writer()
            .write_transaction_begin(&mut sql);
        connection.execute(sql.into()).await?;
        Ok(Self { connection })
    }
}

impl<'c> Executor for SqliteTransaction<'c> {
    type Driver = SqliteDriver;

    fn driver(&self) -> &SqliteDriver {
        self.connection.driver()
    }

    fn prepare(
        &mut self,
        query: String,
    ) -> impl Future<Output = Result<Query<SqliteDriver>>> + Send {
        self.connection.prepare(query)
    }

    fn run(&mut self, query: Query<SqliteDriver>) -> impl Stream<Item = Result<QueryResult>> + Send {
        self.connection.run(query)
    }
}

impl<'c> Transaction<'c> for SqliteTransaction<'c> {
    fn commit(self) -> impl Future<Output = Result<()>> + Send {
        let mut sql = String::new();
        self.driver()
            .sql_writer()
            .write_transaction_commit(&mut sql);
        self.connection.execute(sql.into()).map_ok(|_| ())
    }

    fn rollback(self) -> impl Future<Output = Result<()>> + Send {
        let mut sql = String::new();
        self.driver()
            .sql_writer()
            .write_transaction_rollback(&mut sql);
        self.connection.execute(sql.into()).map_ok(|_| ())
    }
}
