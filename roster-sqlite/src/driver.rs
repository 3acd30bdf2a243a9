use crate::{SqliteConnection, SqlitePrepared, SqliteSqlWriter, SqliteTransaction};
use roster_core::Driver;

#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteDriver {}

impl SqliteDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

pub(crate) static DRIVER: SqliteDriver = SqliteDriver::new();

impl Driver for SqliteDriver {
    type Connection = SqliteConnection;
    type SqlWriter = SqliteSqlWriter;
    type Prepared = SqlitePrepared;
    type Transaction<'c> = SqliteTransaction<'c>;

    const NAME: &'static str = "sqlite";

    fn sql_writer(&self) -> SqliteSqlWriter {
        SqliteSqlWriter {}
    }
}
