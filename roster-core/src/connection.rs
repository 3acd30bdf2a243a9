use crate::{Driver, Executor, Result};
use std::future::Future;

pub trait Connection: Executor {
    /// Open a connection to the given URL, like `sqlite://:memory:`.
    fn connect(url: &str) -> impl Future<Output = Result<Self>> + Send;

    /// Start a transaction borrowing this connection until it ends.
    fn begin(
        &mut self,
    ) -> impl Future<Output = Result<<Self::Driver as Driver>::Transaction<'_>>> + Send;
}
