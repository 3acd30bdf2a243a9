use crate::{CBox, SqliteSqlWriter, sqlite_error};
use libsqlite3_sys::*;
use roster_core::{AsValue, Error, Prepared, Result, SqlWriter, Value, truncate_long};
use std::{
    ffi::{CStr, c_char, c_int},
    fmt::{self, Display},
};

/// Statement compiled by sqlite, parameters are bound in place.
pub struct SqlitePrepared {
    pub(crate) statement: CBox<*mut sqlite3_stmt>,
    pub(crate) index: u64,
}

impl SqlitePrepared {
    pub(crate) fn new(statement: CBox<*mut sqlite3_stmt>) -> Self {
        unsafe {
            sqlite3_clear_bindings(*statement);
        }
        Self {
            statement,
            index: 1,
        }
    }

    fn bind_text(&self, index: c_int, text: &str) -> c_int {
        unsafe {
            sqlite3_bind_text(
                *self.statement,
                index,
                text.as_ptr() as *const c_char,
                text.len() as c_int,
                SQLITE_TRANSIENT(),
            )
        }
    }
}

impl Prepared for SqlitePrepared {
    fn bind<V: AsValue>(&mut self, value: V) -> Result<&mut Self> {
        self.bind_index(value, self.index)
    }

    fn bind_index<V: AsValue>(&mut self, value: V, index: u64) -> Result<&mut Self> {
        let Ok(index) = c_int::try_from(index) else {
            return Err(Error::msg(format!("Parameter index {} is out of range", index)));
        };
        let statement = *self.statement;
        let rc = match value.as_value() {
            v if v.is_null() => unsafe { sqlite3_bind_null(statement, index) },
            Value::Boolean(Some(v)) => unsafe { sqlite3_bind_int(statement, index, v as c_int) },
            Value::Int32(Some(v)) => unsafe { sqlite3_bind_int(statement, index, v) },
            Value::Int64(Some(v)) => unsafe { sqlite3_bind_int64(statement, index, v) },
            Value::Float64(Some(v)) => unsafe { sqlite3_bind_double(statement, index, v) },
            Value::Varchar(Some(v)) => self.bind_text(index, &v),
            Value::Date(Some(v)) => {
                let mut text = String::with_capacity(10);
                SqliteSqlWriter {}.write_value_date(&mut text, &v);
                self.bind_text(index, &text)
            }
            Value::Timestamp(Some(v)) => {
                let mut text = String::with_capacity(26);
                SqliteSqlWriter {}.write_value_timestamp(&mut text, &v);
                self.bind_text(index, &text)
            }
            v => {
                let error = Error::msg(format!("Cannot use a {:?} as a query parameter", v));
                log::error!("{:#}", error);
                return Err(error);
            }
        };
        if rc != SQLITE_OK {
            let error = sqlite_error(rc, unsafe { sqlite3_db_handle(statement) })
                .context(format!("Cannot bind parameter {} to query:\n{}", index, self));
            log::error!("{:#}", error);
            return Err(error);
        }
        self.index = index as u64 + 1;
        Ok(self)
    }
}

impl Display for SqlitePrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sql = unsafe { sqlite3_sql(*self.statement) };
        if sql.is_null() {
            return write!(f, "{:p}", *self.statement);
        }
        let sql = unsafe { CStr::from_ptr(sql) }.to_string_lossy();
        write!(f, "{}", truncate_long!(sql))
    }
}
