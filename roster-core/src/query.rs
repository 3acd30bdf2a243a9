use crate::{AsValue, Driver, Error, Prepared, Result, Value, truncate_long};
use std::{
    fmt::{self, Display},
    mem,
    sync::Arc,
};

/// Statement text or a statement the driver already compiled.
///
/// Raw text may hold several statements separated by `;`, a prepared query
/// holds exactly one and takes its parameters through [`Query::bind`].
pub enum Query<D: Driver> {
    Raw(String),
    Prepared(D::Prepared),
}

impl<D: Driver> Query<D> {
    pub fn is_prepared(&self) -> bool {
        matches!(self, Query::Prepared(..))
    }

    fn parameters(&mut self) -> Result<&mut D::Prepared> {
        match self {
            Query::Prepared(prepared) => Ok(prepared),
            Query::Raw(sql) => Err(Error::msg(format!(
                "Parameters can only be bound to a prepared query, got:\n{}",
                truncate_long!(sql)
            ))),
        }
    }

    /// Binds the next positional parameter, starting from the first one.
    pub fn bind(&mut self, value: impl AsValue) -> Result<&mut Self> {
        self.parameters()?.bind(value)?;
        Ok(self)
    }

    /// Binds the parameter at `index` (1 based), later `bind` calls continue after it.
    pub fn bind_index(&mut self, value: impl AsValue, index: u64) -> Result<&mut Self> {
        self.parameters()?.bind_index(value, index)?;
        Ok(self)
    }
}

impl<D: Driver> From<&str> for Query<D> {
    fn from(value: &str) -> Self {
        Query::Raw(value.into())
    }
}

impl<D: Driver> From<String> for Query<D> {
    fn from(value: String) -> Self {
        Query::Raw(value)
    }
}

impl<D: Driver> Display for Query<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Raw(sql) => write!(f, "{}", truncate_long!(sql)),
            Query::Prepared(prepared) => prepared.fmt(f),
        }
    }
}

/// Outcome of an `INSERT`, `UPDATE` or `DELETE`.
///
/// Collecting several of them sums the rows and keeps the most recent id.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    pub rows_affected: u64,
    /// Rowid of the last inserted row, when the statement inserted any.
    pub last_affected_id: Option<i64>,
}

impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for affected in iter {
            self.rows_affected += affected.rows_affected;
            self.last_affected_id = affected.last_affected_id.or(self.last_affected_id);
        }
    }
}

/// Column labels, shared by every row of one result set.
pub type RowNames = Arc<[String]>;
pub type Row = Box<[Value]>;

/// One result row, `values[i]` belongs to the column `labels[i]`.
#[derive(Debug, Clone)]
pub struct RowLabeled {
    pub labels: RowNames,
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Moves the column `name` out of the row and converts it.
    ///
    /// The slot is left `Value::Null`, taking the same column twice yields a
    /// conversion error for non nullable types.
    pub fn take<T: AsValue>(&mut self, name: &str) -> Result<T> {
        let Some(i) = self.labels.iter().position(|v| v == name) else {
            return Err(Error::msg(format!(
                "Column `{}` is not present in the row (available: {})",
                name,
                self.labels.join(", ")
            )));
        };
        T::try_from_value(mem::take(&mut self.values[i]))
            .map_err(|e| e.context(format!("While reading the column `{}`", name)))
    }

    /// The value of a row that has exactly one column, like `SELECT COUNT(*)`.
    pub fn into_single<T: AsValue>(self) -> Result<T> {
        match Vec::from(self.values).pop() {
            Some(value) if self.labels.len() == 1 => T::try_from_value(value),
            _ => Err(Error::msg(format!(
                "Expected a single column, the row has {} ({})",
                self.labels.len(),
                self.labels.join(", ")
            ))),
        }
    }
}

/// Item of [`crate::Executor::run`]: a row, or the effect of a statement without rows.
#[derive(Debug)]
pub enum QueryResult {
    Row(RowLabeled),
    Affected(RowsAffected),
}
