use crate::{Driver, Executor, Expression, Result, RowLabeled, SqlWriter, stream::Stream};

/// Something rows can be selected from.
pub trait DataSet {
    /// Must qualify the column names with the table name
    fn qualified_columns(&self) -> bool;
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String);
    /// Selects `columns` from the rows matching `condition`.
    ///
    /// The query is rendered before the stream is returned, nothing is sent
    /// until the stream is polled.
    fn select<'a, C, Exec, Expr>(
        &self,
        columns: C,
        executor: &mut Exec,
        condition: &Expr,
        order_by: &[&dyn Expression],
        limit: Option<u32>,
    ) -> impl Stream<Item = Result<RowLabeled>> + Send
    where
        Self: Sized,
        C: IntoIterator<Item = &'a dyn Expression>,
        Exec: Executor,
        Expr: Expression,
    {
        let mut query = String::with_capacity(256);
        let columns = columns.into_iter().collect::<Vec<_>>();
        executor.driver().sql_writer().write_select(
            &mut query,
            &columns,
            self,
            condition,
            order_by,
            limit,
        );
        executor.fetch(query.into())
    }
}

impl<T: DataSet> DataSet for &T {
    fn qualified_columns(&self) -> bool {
        (*self).qualified_columns()
    }
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String) {
        (*self).write_query(writer, out);
    }
}
