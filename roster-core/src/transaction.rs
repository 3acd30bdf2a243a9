use crate::{Executor, Result};

/// Executor running inside `BEGIN`, consumed by `commit` or `rollback`.
pub trait Transaction<'c>: Executor {
    fn commit(self) -> impl Future<Output = Result<()>> + Send;
    fn rollback(self) -> impl Future<Output = Result<()>> + Send;
}
