use roster_core::{ColumnDef, SqlWriter, Value};

/// Sqlite dialect.
#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteSqlWriter {}

impl SqlWriter for SqliteSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_column_type(&self, out: &mut String, value: &Value) {
        out.push_str(match value {
            Value::Boolean(..) | Value::Int32(..) | Value::Int64(..) => "INTEGER",
            Value::Float64(..) => "REAL",
            Value::Varchar(..) | Value::Date(..) | Value::Timestamp(..) => "TEXT",
            Value::Null => "NULL",
        });
    }

    fn write_auto_increment(&self, out: &mut String) {
        out.push_str(" AUTOINCREMENT");
    }

    // DEFAULT is not accepted inside VALUES
    fn write_insert_default(&self, out: &mut String, _column: &ColumnDef) {
        self.write_value_none(out);
    }
}
