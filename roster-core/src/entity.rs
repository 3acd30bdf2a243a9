use crate::{
    AsValue, BinaryOp, BinaryOpType, ColumnDef, ColumnRef, DataSet, Driver, Error, Executor,
    Expression, Result, RowLabeled, RowsAffected, SqlWriter, TableDef, TableRef, Value,
    future::{self, Either, FutureExt},
    stream::{Stream, StreamExt, TryStreamExt},
};
use log::Level;
use std::pin::pin;

/// A Rust type mapped to a table.
///
/// Only the schema, the row conversions and the primary key are required,
/// every query has a default implementation built on top of them.
pub trait Entity: Send + Sized {
    type PrimaryKey: AsValue + Send;

    fn table_def() -> &'static TableDef;

    fn table_ref() -> &'static TableRef {
        &Self::table_def().table
    }

    fn columns() -> &'static [ColumnDef] {
        Self::table_def().columns
    }

    fn from_row(row: RowLabeled) -> Result<Self>;

    /// Column values to insert, `Passive::NotSet` fields are left out.
    fn row_filtered(&self) -> Box<[(&'static str, Value)]>;

    /// `None` until the database assigns it.
    fn primary_key(&self) -> Option<Self::PrimaryKey>;

    fn create_table<Exec: Executor>(
        executor: &mut Exec,
        if_not_exists: bool,
    ) -> impl Future<Output = Result<()>> + Send {
        Self::table_def().create(executor, if_not_exists)
    }

    fn drop_table<Exec: Executor>(
        executor: &mut Exec,
        if_exists: bool,
    ) -> impl Future<Output = Result<()>> + Send {
        Self::table_def().drop(executor, if_exists)
    }

    fn insert_one<Exec: Executor>(
        executor: &mut Exec,
        entity: &Self,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        Self::insert_many(executor, [entity])
    }

    /// Inserts all the entities with a single statement.
    fn insert_many<'a, Exec, It>(
        executor: &mut Exec,
        items: It,
    ) -> impl Future<Output = Result<RowsAffected>> + Send
    where
        Self: 'a,
        Exec: Executor,
        It: IntoIterator<Item = &'a Self>,
    {
        let rows = items
            .into_iter()
            .map(Self::row_filtered)
            .collect::<Vec<_>>();
        if rows.is_empty() {
            return Either::Left(future::ready(Ok(RowsAffected::default())));
        }
        let mut query = String::with_capacity(128 * rows.len());
        executor
            .driver()
            .sql_writer()
            .write_insert(&mut query, Self::table_def(), &rows);
        Either::Right(executor.execute(query.into()))
    }

    fn find_pk<Exec: Executor>(
        executor: &mut Exec,
        primary_key: Self::PrimaryKey,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        async move {
            let Some(column) = Self::table_def().primary_key_column() else {
                return Err(Error::msg(format!(
                    "Table `{}` does not have a single column primary key",
                    Self::table_ref().full_name()
                )));
            };
            let condition = BinaryOp {
                op: BinaryOpType::Equal,
                lhs: column.column_ref,
                rhs: primary_key.as_value(),
            };
            Self::find_one(executor, &condition).await
        }
    }

    fn find_one<Exec: Executor, Expr: Expression>(
        executor: &mut Exec,
        condition: &Expr,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        let stream = Self::find_many(executor, condition, Some(1));
        async move { pin!(stream).into_future().map(|(v, _)| v).await.transpose() }
    }

    fn find_many<Exec: Executor, Expr: Expression>(
        executor: &mut Exec,
        condition: &Expr,
        limit: Option<u32>,
    ) -> impl Stream<Item = Result<Self>> + Send {
        Self::table_ref()
            .select(
                Self::columns().iter().map(|c| c as &dyn Expression),
                executor,
                condition,
                &[],
                limit,
            )
            .map(|row| row.and_then(Self::from_row))
    }

    fn count<Exec: Executor, Expr: Expression>(
        executor: &mut Exec,
        condition: &Expr,
    ) -> impl Future<Output = Result<u64>> + Send {
        let mut query = String::with_capacity(128);
        executor
            .driver()
            .sql_writer()
            .write_count(&mut query, Self::table_ref(), condition);
        let stream = executor.fetch(query.into());
        async move {
            let Some(row) = pin!(stream).try_next().await? else {
                return Err(Error::msg("The count query did not return any row"));
            };
            let count = row.into_single::<i64>()?;
            u64::try_from(count).map_err(|_| Error::msg(format!("Negative count {}", count)))
        }
    }

    fn update_many<Exec: Executor, Expr: Expression>(
        executor: &mut Exec,
        assignments: &[(ColumnRef, &dyn Expression)],
        condition: &Expr,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        let mut query = String::with_capacity(128);
        executor.driver().sql_writer().write_update(
            &mut query,
            Self::table_ref(),
            assignments,
            condition,
        );
        executor.execute(query.into())
    }

    fn delete_many<Exec: Executor, Expr: Expression>(
        executor: &mut Exec,
        condition: &Expr,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        let mut query = String::with_capacity(128);
        executor
            .driver()
            .sql_writer()
            .write_delete(&mut query, Self::table_ref(), condition);
        executor.execute(query.into())
    }

    /// Deletes this entity by primary key, expecting exactly one row to go.
    fn delete<Exec: Executor>(
        &self,
        executor: &mut Exec,
    ) -> impl Future<Output = Result<()>> + Send {
        let column = Self::table_def().primary_key_column();
        let (Some(column), Some(primary_key)) = (column, self.primary_key()) else {
            let error = Error::msg(format!(
                "Cannot delete from `{}` an entity without primary key",
                Self::table_ref().full_name()
            ));
            log::error!("{}", error);
            return Either::Left(future::ready(Err(error)));
        };
        let condition = BinaryOp {
            op: BinaryOpType::Equal,
            lhs: column.column_ref,
            rhs: primary_key.as_value(),
        };
        let mut query = String::with_capacity(128);
        executor
            .driver()
            .sql_writer()
            .write_delete(&mut query, Self::table_ref(), &condition);
        Either::Right(executor.execute(query.into()).map(|v| {
            v.and_then(|v| {
                if v.rows_affected == 1 {
                    Ok(())
                } else {
                    let error = Error::msg(format!(
                        "The query deleted {} rows instead of the expected 1",
                        v.rows_affected
                    ));
                    log::log!(
                        if v.rows_affected == 0 {
                            Level::Info
                        } else {
                            Level::Error
                        },
                        "{}",
                        error
                    );
                    Err(error)
                }
            })
        }))
    }
}

