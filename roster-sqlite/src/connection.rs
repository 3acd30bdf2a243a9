use crate::{
    CBox, DRIVER, SqliteDriver, SqlitePrepared, SqliteTransaction,
    extract::{extract_name, extract_value},
    sqlite_error,
};
use async_stream::try_stream;
use libsqlite3_sys::{
    SQLITE_BUSY, SQLITE_DONE, SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE,
    SQLITE_OPEN_URI, SQLITE_ROW, sqlite3, sqlite3_close, sqlite3_column_count,
    sqlite3_extended_result_codes, sqlite3_finalize, sqlite3_last_insert_rowid, sqlite3_open_v2,
    sqlite3_prepare_v2, sqlite3_step, sqlite3_stmt, sqlite3_total_changes64,
};
use roster_core::{
    Connection, Context, Driver, Error, Executor, Query, QueryResult, Result, Row, RowLabeled,
    RowNames, RowsAffected,
    future::Either,
    stream::{Stream, StreamExt},
    truncate_long,
};
use std::{
    ffi::{CStr, CString, c_char},
    pin::pin,
    ptr,
    sync::atomic::{AtomicPtr, Ordering},
};
use tokio::task::{spawn_blocking, yield_now};

/// Steps a locked statement is retried before giving up with `SQLITE_BUSY`.
const MAX_BUSY_RETRIES: u32 = 1000;

fn close(connection: *mut sqlite3) {
    unsafe {
        sqlite3_close(connection);
    }
}

fn finalize(statement: *mut sqlite3_stmt) {
    unsafe {
        sqlite3_finalize(statement);
    }
}

/// A single sqlite database handle.
///
/// Statements run one at a time: every method borrows the connection
/// mutably for as long as the returned stream or future is alive.
pub struct SqliteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

impl SqliteConnection {
    /// Compiles the first statement of `sql` starting at byte `offset`.
    ///
    /// Returns the statement, null when only whitespace or comments were
    /// left, and the offset where the next statement begins.
    fn prepare_statement(
        &self,
        sql: &CStr,
        offset: usize,
    ) -> Result<(CBox<*mut sqlite3_stmt>, usize)> {
        let mut statement = CBox::new(ptr::null_mut(), finalize);
        let mut tail: *const c_char = ptr::null();
        unsafe {
            let start = sql.as_ptr().add(offset);
            let rc = sqlite3_prepare_v2(*self.connection, start, -1, &mut *statement, &mut tail);
            if rc != SQLITE_OK {
                return Err(sqlite_error(rc, *self.connection));
            }
            let next = if tail.is_null() {
                sql.to_bytes().len()
            } else {
                tail.offset_from(sql.as_ptr()) as usize
            };
            Ok((statement, next))
        }
    }

    pub(crate) fn run_prepared(
        &self,
        statement: CBox<*mut sqlite3_stmt>,
    ) -> impl Stream<Item = Result<QueryResult>> + Send {
        try_stream! {
            let (count, changes, rowid) = unsafe {
                (
                    sqlite3_column_count(*statement),
                    sqlite3_total_changes64(*self.connection),
                    sqlite3_last_insert_rowid(*self.connection),
                )
            };
            let labels = (0..count)
                .map(|i| extract_name(*statement, i))
                .collect::<Result<RowNames>>()?;
            let mut busy = 0;
            loop {
                match unsafe { sqlite3_step(*statement) } {
                    SQLITE_ROW => {
                        let values = (0..count)
                            .map(|i| extract_value(*statement, i))
                            .collect::<Result<Row>>()?;
                        yield QueryResult::Row(RowLabeled::new(labels.clone(), values));
                    }
                    SQLITE_DONE => break,
                    SQLITE_BUSY if busy < MAX_BUSY_RETRIES => {
                        busy += 1;
                        yield_now().await;
                    }
                    rc => {
                        let error = sqlite_error(rc, *self.connection);
                        log::error!("{:#}", error);
                        Err(error)?
                    }
                }
            }
            if count == 0 {
                let (total, last) = unsafe {
                    (
                        sqlite3_total_changes64(*self.connection),
                        sqlite3_last_insert_rowid(*self.connection),
                    )
                };
                yield QueryResult::Affected(RowsAffected {
                    rows_affected: (total - changes).max(0) as u64,
                    last_affected_id: (last != rowid).then_some(last),
                });
            }
        }
    }

    /// Runs every statement in `sql`, one after the other, stopping at the first error.
    pub(crate) fn run_unprepared(
        &self,
        sql: String,
    ) -> impl Stream<Item = Result<QueryResult>> + Send {
        try_stream! {
            let context = || format!("While executing the query:\n{}", truncate_long!(sql));
            let query = CString::new(sql.as_bytes())
                .map_err(Error::new)
                .with_context(context)?;
            let len = query.as_bytes().len();
            let mut offset = 0;
            while offset < len {
                let (statement, next) = self
                    .prepare_statement(&query, offset)
                    .with_context(context)?;
                if next <= offset && statement.is_null() {
                    break;
                }
                offset = next;
                if statement.is_null() {
                    continue;
                }
                let mut stream = pin!(self.run_prepared(statement));
                while let Some(value) = stream.next().await {
                    yield value.with_context(context)?;
                }
            }
        }
    }
}

impl Executor for SqliteConnection {
    type Driver = SqliteDriver;

    fn driver(&self) -> &SqliteDriver {
        &DRIVER
    }

    async fn prepare(&mut self, query: String) -> Result<Query<SqliteDriver>> {
        let connection = AtomicPtr::new(*self.connection);
        let context = format!("While preparing the query:\n{}", truncate_long!(query));
        let statement = spawn_blocking(move || -> Result<CBox<*mut sqlite3_stmt>> {
            let connection = connection.load(Ordering::Relaxed);
            let sql = CString::new(query.as_bytes())
                .context("Could not create a CString from the query String")?;
            let mut statement = CBox::new(ptr::null_mut(), finalize);
            let mut tail: *const c_char = ptr::null();
            let rc = unsafe {
                sqlite3_prepare_v2(connection, sql.as_ptr(), -1, &mut *statement, &mut tail)
            };
            if rc != SQLITE_OK {
                return Err(sqlite_error(rc, connection));
            }
            let rest = if tail.is_null() {
                ""
            } else {
                unsafe { CStr::from_ptr(tail) }.to_str().unwrap_or_default()
            };
            if !rest.trim().is_empty() {
                return Err(Error::msg("Cannot prepare more than one statement at a time"));
            }
            if statement.is_null() {
                return Err(Error::msg("The query does not contain any statement"));
            }
            Ok(statement)
        })
        .await
        .map_err(Error::new)
        .and_then(|v| v)
        .context(context)
        .inspect_err(|e| log::error!("{:#}", e))?;
        Ok(Query::Prepared(SqlitePrepared::new(statement)))
    }

    fn run(&mut self, query: Query<SqliteDriver>) -> impl Stream<Item = Result<QueryResult>> + Send {
        log::debug!("Running:\n{}", query);
        match query {
            Query::Raw(sql) => Either::Left(self.run_unprepared(sql)),
            Query::Prepared(prepared) => Either::Right(self.run_prepared(prepared.statement)),
        }
    }
}

impl Connection for SqliteConnection {
    async fn connect(url: &str) -> Result<SqliteConnection> {
        let prefix = format!("{}://", SqliteDriver::NAME);
        let Some(path) = url.strip_prefix(&prefix) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                prefix
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        let context = || format!("While opening the database `{}`", url);
        let path = urlencoding::decode(path).with_context(context)?;
        let path = CString::new(path.as_bytes()).with_context(context)?;
        let mut connection = CBox::new(ptr::null_mut(), close);
        let rc = unsafe {
            sqlite3_open_v2(
                path.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI,
                ptr::null(),
            )
        };
        if rc != SQLITE_OK {
            let error = sqlite_error(rc, *connection).context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
        unsafe {
            sqlite3_extended_result_codes(*connection, 1);
        }
        log::debug!("Connected to `{}`", url);
        Ok(Self { connection })
    }

    async fn begin(&mut self) -> Result<SqliteTransaction<'_>> {
        SqliteTransaction::new(self).await
    }
}
