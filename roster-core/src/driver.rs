use crate::{Connection, Prepared, SqlWriter, Transaction};

/// Entry point of a backend, ties together its connection, dialect and statement types.
pub trait Driver: Send + Sync + Sized {
    type Connection: Connection<Driver = Self>;
    type SqlWriter: SqlWriter;
    type Prepared: Prepared;
    type Transaction<'c>: Transaction<'c, Driver = Self>;

    /// Scheme of the connection URL, as in `name://...`.
    const NAME: &'static str;

    fn sql_writer(&self) -> Self::SqlWriter;
}
