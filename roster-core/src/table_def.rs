use crate::{ColumnDef, Driver, Executor, Expression, Result, SqlWriter, TableRef};
use anyhow::Context;

/// Table level rule, enforced by the database on every write.
#[derive(Debug)]
pub enum TableConstraint {
    PrimaryKey(&'static [&'static str]),
    Unique(&'static [&'static str]),
    Check(&'static dyn Expression),
}

/// Named constraint.
#[derive(Debug)]
pub struct ConstraintDef {
    pub name: &'static str,
    pub kind: TableConstraint,
}

/// Secondary index over one or more columns.
#[derive(Debug)]
pub struct IndexDef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub unique: bool,
}

/// Complete description of a table: columns, constraints and indexes.
///
/// This is a plain value, the schema of an entity is whatever its
/// [`crate::Entity::table_def`] returns. Creating the table renders the
/// `CREATE TABLE` statement followed by one `CREATE INDEX` per index.
#[derive(Debug)]
pub struct TableDef {
    pub table: TableRef,
    pub columns: &'static [ColumnDef],
    pub constraints: &'static [ConstraintDef],
    pub indexes: &'static [IndexDef],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Columns of the primary key, empty if the table has none.
    pub fn primary_key(&self) -> &'static [&'static str] {
        self.constraints
            .iter()
            .find_map(|c| match c.kind {
                TableConstraint::PrimaryKey(columns) => Some(columns),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// The primary key column, when the key is made of exactly one column.
    pub fn primary_key_column(&self) -> Option<&'static ColumnDef> {
        match self.primary_key() {
            [name] => self.column(name),
            _ => None,
        }
    }

    pub async fn create<Exec: Executor>(&self, executor: &mut Exec, if_not_exists: bool) -> Result<()> {
        let mut query = String::with_capacity(512);
        executor
            .driver()
            .sql_writer()
            .write_create_table(&mut query, self, if_not_exists);
        executor
            .execute(query.into())
            .await
            .with_context(|| format!("While creating the table `{}`", self.table.full_name()))?;
        Ok(())
    }

    pub async fn drop<Exec: Executor>(&self, executor: &mut Exec, if_exists: bool) -> Result<()> {
        let mut query = String::with_capacity(64);
        executor
            .driver()
            .sql_writer()
            .write_drop_table(&mut query, &self.table, if_exists);
        executor
            .execute(query.into())
            .await
            .with_context(|| format!("While dropping the table `{}`", self.table.full_name()))?;
        Ok(())
    }
}
