use crate::{Expression, OpPrecedence, SqlWriter, TableRef, Value};

/// Fully qualified reference to a table column.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    /// Column name.
    pub name: &'static str,
    /// Table name.
    pub table: &'static str,
    /// Schema name (may be empty).
    pub schema: &'static str,
}

impl ColumnRef {
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Self {
            name,
            table,
            schema: "",
        }
    }
    pub fn table_ref(&self) -> TableRef {
        TableRef {
            name: self.table,
            schema: self.schema,
            ..Default::default()
        }
    }
}

/// Declarative description of a table column.
#[derive(Debug)]
pub struct ColumnDef {
    /// Column identity.
    pub column_ref: ColumnRef,
    /// Explicit SQL type override (empty => infer from `value`).
    pub column_type: &'static str,
    /// `Value` describing the column type.
    pub value: Value,
    /// Nullability flag.
    pub nullable: bool,
    /// Value for rows that leave the column out, evaluated once for every inserted row.
    pub default: Option<fn() -> Value>,
    /// The database assigns increasing values that are never reused.
    pub auto_increment: bool,
    /// Backed by a `Passive` field, may be missing from `INSERT` rows.
    pub passive: bool,
}

impl ColumnDef {
    pub fn name(&self) -> &'static str {
        self.column_ref.name
    }
    pub fn table(&self) -> &'static str {
        self.column_ref.table
    }
    pub fn schema(&self) -> &'static str {
        self.column_ref.schema
    }
    /// Default computed on the client at insert time, if any.
    pub fn generated(&self) -> Option<Value> {
        self.default.map(|f| f())
    }
}

impl<'a> From<&'a ColumnDef> for &'a ColumnRef {
    fn from(value: &'a ColumnDef) -> Self {
        &value.column_ref
    }
}

impl OpPrecedence for ColumnRef {
    fn precedence(&self, _writer: &dyn SqlWriter) -> i32 {
        1_000_000
    }
}

impl Expression for ColumnRef {
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String, qualify_columns: bool) {
        writer.write_column_ref(out, self, qualify_columns);
    }
}

impl OpPrecedence for ColumnDef {
    fn precedence(&self, _writer: &dyn SqlWriter) -> i32 {
        1_000_000
    }
}

impl Expression for ColumnDef {
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String, qualify_columns: bool) {
        writer.write_column_ref(out, &self.column_ref, qualify_columns);
    }
}
