mod cbox;
mod connection;
mod driver;
mod extract;
mod prepared;
mod sql_writer;
mod transaction;

pub(crate) use cbox::*;
pub use connection::*;
pub use driver::*;
pub use prepared::*;
pub use sql_writer::*;
pub use transaction::*;

use libsqlite3_sys::{
    SQLITE_CONSTRAINT, SQLITE_CONSTRAINT_CHECK, SQLITE_CONSTRAINT_NOTNULL,
    SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_ROWID, SQLITE_CONSTRAINT_UNIQUE, sqlite3,
    sqlite3_errmsg,
};
use roster_core::{ConstraintViolation, Error, ViolationKind};
use std::ffi::{CStr, c_char, c_int};

pub(crate) fn error_message_from_ptr(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return "Unknown error (could not extract the error message)".into();
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .unwrap_or("Unknown error (the error message was not a valid C string)")
        .into()
}

/// Error of the last failed call on `connection`, constraint failures carry a [`ConstraintViolation`].
pub(crate) fn sqlite_error(rc: c_int, connection: *mut sqlite3) -> Error {
    let message = error_message_from_ptr(unsafe { sqlite3_errmsg(connection) });
    if rc & 0xff != SQLITE_CONSTRAINT {
        return Error::msg(message);
    }
    let kind = match rc {
        SQLITE_CONSTRAINT_PRIMARYKEY | SQLITE_CONSTRAINT_ROWID => ViolationKind::PrimaryKey,
        SQLITE_CONSTRAINT_UNIQUE => ViolationKind::Unique,
        SQLITE_CONSTRAINT_CHECK => ViolationKind::Check,
        SQLITE_CONSTRAINT_NOTNULL => ViolationKind::NotNull,
        _ => ViolationKind::Other,
    };
    Error::new(ConstraintViolation::new(kind, message))
}
