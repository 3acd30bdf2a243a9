use crate::{
    BinaryOp, BinaryOpType, ColumnDef, ColumnRef, ConstraintDef, DataSet,
    Expression, IndexDef, Operand, Order, Ordered, TableConstraint, TableDef, TableRef, UnaryOp,
    UnaryOpType, Value, possibly_parenthesized, separated_by,
};
use std::fmt::Write;
use time::{Date, PrimitiveDateTime, Time};

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($out:ident, $value:expr) => {{
        let mut buffer = ryu::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}

/// Renders statements and expressions into SQL text.
///
/// Every method has a default producing standard SQL, drivers override the
/// pieces where their dialect differs.
pub trait SqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter;

    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', r#""""#);
        out.push('"');
    }

    fn write_table_ref(&self, out: &mut String, value: &TableRef) {
        if !value.schema.is_empty() {
            self.write_identifier_quoted(out, value.schema);
            out.push('.');
        }
        self.write_identifier_quoted(out, value.name);
        if !value.alias.is_empty() {
            out.push(' ');
            out.push_str(value.alias);
        }
    }

    fn write_column_ref(&self, out: &mut String, value: &ColumnRef, qualify: bool) {
        if qualify && !value.table.is_empty() {
            if !value.schema.is_empty() {
                self.write_identifier_quoted(out, value.schema);
                out.push('.');
            }
            self.write_identifier_quoted(out, value.table);
            out.push('.');
        }
        self.write_identifier_quoted(out, value.name);
    }

    fn write_column_type(&self, out: &mut String, value: &Value) {
        out.push_str(match value {
            Value::Null => "NULL",
            Value::Boolean(..) => "BOOLEAN",
            Value::Int32(..) => "INTEGER",
            Value::Int64(..) => "BIGINT",
            Value::Float64(..) => "DOUBLE",
            Value::Varchar(..) => "VARCHAR",
            Value::Date(..) => "DATE",
            Value::Timestamp(..) => "TIMESTAMP",
        });
    }

    fn write_value(&self, out: &mut String, value: &Value) {
        match value {
            Value::Null
            | Value::Boolean(None)
            | Value::Int32(None)
            | Value::Int64(None)
            | Value::Float64(None)
            | Value::Varchar(None)
            | Value::Date(None)
            | Value::Timestamp(None) => self.write_value_none(out),
            Value::Boolean(Some(v)) => self.write_value_bool(out, *v),
            Value::Int32(Some(v)) => write_integer!(out, *v),
            Value::Int64(Some(v)) => write_integer!(out, *v),
            Value::Float64(Some(v)) => write_float!(out, *v),
            Value::Varchar(Some(v)) => self.write_value_string(out, v),
            Value::Date(Some(v)) => {
                out.push('\'');
                self.write_value_date(out, v);
                out.push('\'');
            }
            Value::Timestamp(Some(v)) => {
                out.push('\'');
                self.write_value_timestamp(out, v);
                out.push('\'');
            }
        }
    }

    fn write_value_none(&self, out: &mut String) {
        out.push_str("NULL")
    }

    fn write_value_bool(&self, out: &mut String, value: bool) {
        out.push_str(["false", "true"][value as usize])
    }

    fn write_value_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(out, value, '\'', "''");
        out.push('\'');
    }

    fn write_value_date(&self, out: &mut String, value: &Date) {
        let _ = write!(
            out,
            "{:04}-{:02}-{:02}",
            value.year(),
            value.month() as u8,
            value.day()
        );
    }

    fn write_value_time(&self, out: &mut String, value: &Time) {
        let mut subsecond = value.nanosecond();
        let mut width = 9;
        while width > 1 && subsecond % 10 == 0 {
            subsecond /= 10;
            width -= 1;
        }
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}.{:0width$}",
            value.hour(),
            value.minute(),
            value.second(),
            subsecond
        );
    }

    /// Timestamp text without quotes, also used to bind parameters.
    fn write_value_timestamp(&self, out: &mut String, value: &PrimitiveDateTime) {
        self.write_value_date(out, &value.date());
        out.push(' ');
        self.write_value_time(out, &value.time());
    }

    fn expression_unary_op_precedence(&self, value: &UnaryOpType) -> i32 {
        match value {
            UnaryOpType::Negative => 1250,
            UnaryOpType::Not => 250,
        }
    }

    fn expression_binary_op_precedence(&self, value: &BinaryOpType) -> i32 {
        match value {
            BinaryOpType::Or => 100,
            BinaryOpType::And => 200,
            BinaryOpType::Equal => 300,
            BinaryOpType::NotEqual => 300,
            BinaryOpType::Less => 300,
            BinaryOpType::Greater => 300,
            BinaryOpType::LessEqual => 300,
            BinaryOpType::GreaterEqual => 300,
            BinaryOpType::Is => 400,
            BinaryOpType::IsNot => 400,
            BinaryOpType::Like => 400,
            BinaryOpType::NotLike => 400,
            BinaryOpType::Subtraction => 800,
            BinaryOpType::Addition => 800,
            BinaryOpType::Multiplication => 900,
            BinaryOpType::Division => 900,
            BinaryOpType::Remainder => 900,
        }
    }

    fn write_expression_operand(&self, out: &mut String, value: &Operand, _qualify_columns: bool) {
        match value {
            Operand::LitBool(v) => self.write_value_bool(out, *v),
            Operand::LitFloat(v) => write_float!(out, *v),
            Operand::LitInt(v) => write_integer!(out, *v),
            Operand::LitStr(v) => self.write_value_string(out, v),
            Operand::Null => self.write_value_none(out),
            Operand::Asterisk => out.push('*'),
            Operand::QuestionMark => out.push('?'),
            Operand::Variable(v) => self.write_value(out, v),
        }
    }

    fn write_expression_unary_op(
        &self,
        out: &mut String,
        value: &UnaryOp<&dyn Expression>,
        qualify_columns: bool,
    ) {
        match value.op {
            UnaryOpType::Negative => out.push('-'),
            UnaryOpType::Not => out.push_str("NOT "),
        };
        possibly_parenthesized!(
            out,
            value.v.precedence(self.as_dyn()) <= self.expression_unary_op_precedence(&value.op),
            value.v.write_query(self.as_dyn(), out, qualify_columns)
        );
    }

    fn write_expression_binary_op(
        &self,
        out: &mut String,
        value: &BinaryOp<&dyn Expression, &dyn Expression>,
        qualify_columns: bool,
    ) {
        let infix = match value.op {
            BinaryOpType::Multiplication => " * ",
            BinaryOpType::Division => " / ",
            BinaryOpType::Remainder => " % ",
            BinaryOpType::Addition => " + ",
            BinaryOpType::Subtraction => " - ",
            BinaryOpType::Is => " IS ",
            BinaryOpType::IsNot => " IS NOT ",
            BinaryOpType::Like => " LIKE ",
            BinaryOpType::NotLike => " NOT LIKE ",
            BinaryOpType::Equal => " = ",
            BinaryOpType::NotEqual => " != ",
            BinaryOpType::Less => " < ",
            BinaryOpType::LessEqual => " <= ",
            BinaryOpType::Greater => " > ",
            BinaryOpType::GreaterEqual => " >= ",
            BinaryOpType::And => " AND ",
            BinaryOpType::Or => " OR ",
        };
        let precedence = self.expression_binary_op_precedence(&value.op);
        possibly_parenthesized!(
            out,
            value.lhs.precedence(self.as_dyn()) < precedence,
            value.lhs.write_query(self.as_dyn(), out, qualify_columns)
        );
        out.push_str(infix);
        possibly_parenthesized!(
            out,
            value.rhs.precedence(self.as_dyn()) <= precedence,
            value.rhs.write_query(self.as_dyn(), out, qualify_columns)
        );
    }

    fn write_expression_ordered(
        &self,
        out: &mut String,
        value: &Ordered<&dyn Expression>,
        qualify_columns: bool,
    ) {
        value
            .expression
            .write_query(self.as_dyn(), out, qualify_columns);
        out.push_str(match value.order {
            Order::ASC => " ASC",
            Order::DESC => " DESC",
        });
    }

    fn write_create_table(&self, out: &mut String, table: &TableDef, if_not_exists: bool) {
        out.push_str("CREATE TABLE ");
        if if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        self.write_table_ref(out, &table.table);
        out.push_str(" (\n");
        // A single column primary key is declared on the column itself
        let inline_key = table.constraints.iter().find(|c| {
            matches!(c.kind, TableConstraint::PrimaryKey(columns) if columns.len() == 1)
        });
        separated_by(
            out,
            table.columns,
            |out, column| {
                let key = inline_key.filter(|c| {
                    matches!(c.kind, TableConstraint::PrimaryKey([name]) if *name == column.name())
                });
                self.write_create_table_column_fragment(out, column, key);
            },
            ",\n",
        );
        for constraint in table.constraints {
            if inline_key.is_some_and(|v| std::ptr::eq(v, constraint)) {
                continue;
            }
            out.push_str(",\n");
            self.write_table_constraint(out, constraint);
        }
        out.push_str("\n);");
        for index in table.indexes {
            out.push('\n');
            self.write_create_index(out, table, index, if_not_exists);
        }
    }

    fn write_create_table_column_fragment(
        &self,
        out: &mut String,
        column: &ColumnDef,
        primary_key: Option<&ConstraintDef>,
    ) {
        self.write_identifier_quoted(out, column.name());
        out.push(' ');
        if !column.column_type.is_empty() {
            out.push_str(column.column_type);
        } else {
            self.write_column_type(out, &column.value);
        }
        if let Some(primary_key) = primary_key {
            out.push_str(" CONSTRAINT ");
            self.write_identifier_quoted(out, primary_key.name);
            out.push_str(" PRIMARY KEY");
            if column.auto_increment {
                self.write_auto_increment(out);
            }
        } else if !column.nullable {
            out.push_str(" NOT NULL");
        }
    }

    /// Appended to an auto increment primary key column.
    fn write_auto_increment(&self, _out: &mut String) {}

    fn write_table_constraint(&self, out: &mut String, constraint: &ConstraintDef) {
        out.push_str("CONSTRAINT ");
        self.write_identifier_quoted(out, constraint.name);
        let (keyword, columns) = match constraint.kind {
            TableConstraint::PrimaryKey(columns) => (" PRIMARY KEY (", columns),
            TableConstraint::Unique(columns) => (" UNIQUE (", columns),
            TableConstraint::Check(expression) => {
                out.push_str(" CHECK (");
                expression.write_query(self.as_dyn(), out, false);
                out.push(')');
                return;
            }
        };
        out.push_str(keyword);
        separated_by(
            out,
            columns,
            |out, v| self.write_identifier_quoted(out, v),
            ", ",
        );
        out.push(')');
    }

    fn write_create_index(
        &self,
        out: &mut String,
        table: &TableDef,
        index: &IndexDef,
        if_not_exists: bool,
    ) {
        out.push_str("CREATE ");
        if index.unique {
            out.push_str("UNIQUE ");
        }
        out.push_str("INDEX ");
        if if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        self.write_identifier_quoted(out, index.name);
        out.push_str(" ON ");
        self.write_table_ref(out, &table.table);
        out.push_str(" (");
        separated_by(
            out,
            index.columns,
            |out, v| self.write_identifier_quoted(out, v),
            ", ",
        );
        out.push_str(");");
    }

    fn write_drop_table(&self, out: &mut String, table: &TableRef, if_exists: bool) {
        out.push_str("DROP TABLE ");
        if if_exists {
            out.push_str("IF EXISTS ");
        }
        self.write_table_ref(out, table);
        out.push(';');
    }

    fn write_select(
        &self,
        out: &mut String,
        columns: &[&dyn Expression],
        from: &dyn DataSet,
        condition: &dyn Expression,
        order_by: &[&dyn Expression],
        limit: Option<u32>,
    ) {
        let qualify_columns = from.qualified_columns();
        out.push_str("SELECT ");
        separated_by(
            out,
            columns,
            |out, col| col.write_query(self.as_dyn(), out, qualify_columns),
            ", ",
        );
        out.push_str("\nFROM ");
        from.write_query(self.as_dyn(), out);
        out.push_str("\nWHERE ");
        condition.write_query(self.as_dyn(), out, qualify_columns);
        if !order_by.is_empty() {
            out.push_str("\nORDER BY ");
            separated_by(
                out,
                order_by,
                |out, v| v.write_query(self.as_dyn(), out, qualify_columns),
                ", ",
            );
        }
        if let Some(limit) = limit {
            let _ = write!(out, "\nLIMIT {}", limit);
        }
        out.push(';');
    }

    fn write_count(&self, out: &mut String, from: &dyn DataSet, condition: &dyn Expression) {
        out.push_str("SELECT COUNT(*)\nFROM ");
        from.write_query(self.as_dyn(), out);
        out.push_str("\nWHERE ");
        condition.write_query(self.as_dyn(), out, from.qualified_columns());
        out.push(';');
    }

    /// Multi row insert.
    ///
    /// Lists every column that is set in at least one row, plus the columns
    /// with a generated default. A column missing from a row is filled with
    /// its generated default, or with `write_insert_default`. Writes nothing
    /// when `rows` is empty.
    fn write_insert(
        &self,
        out: &mut String,
        table: &TableDef,
        rows: &[Box<[(&'static str, Value)]>],
    ) {
        if rows.is_empty() {
            return;
        }
        let columns = table
            .columns
            .iter()
            .filter(|c| {
                c.default.is_some() || rows.iter().any(|r| r.iter().any(|(n, _)| *n == c.name()))
            })
            .collect::<Vec<_>>();
        out.push_str("INSERT INTO ");
        self.write_table_ref(out, &table.table);
        out.push_str(" (");
        separated_by(
            out,
            &columns,
            |out, v| self.write_identifier_quoted(out, v.name()),
            ", ",
        );
        out.push_str(") VALUES\n");
        separated_by(
            out,
            rows,
            |out, row| {
                out.push('(');
                separated_by(
                    out,
                    &columns,
                    |out, column| {
                        if let Some((_, value)) = row.iter().find(|(n, _)| *n == column.name()) {
                            self.write_value(out, value);
                        } else if let Some(value) = column.generated() {
                            self.write_value(out, &value);
                        } else {
                            self.write_insert_default(out, column);
                        }
                    },
                    ", ",
                );
                out.push(')');
            },
            ",\n",
        );
        out.push(';');
    }

    /// Placeholder for a column missing from one of the inserted rows.
    fn write_insert_default(&self, out: &mut String, _column: &ColumnDef) {
        out.push_str("DEFAULT");
    }

    fn write_update(
        &self,
        out: &mut String,
        table: &TableRef,
        assignments: &[(ColumnRef, &dyn Expression)],
        condition: &dyn Expression,
    ) {
        out.push_str("UPDATE ");
        self.write_table_ref(out, table);
        out.push_str(" SET ");
        separated_by(
            out,
            assignments,
            |out, (column, value)| {
                self.write_column_ref(out, column, false);
                out.push_str(" = ");
                value.write_query(self.as_dyn(), out, false);
            },
            ", ",
        );
        out.push_str("\nWHERE ");
        condition.write_query(self.as_dyn(), out, false);
        out.push(';');
    }

    fn write_delete(&self, out: &mut String, table: &TableRef, condition: &dyn Expression) {
        out.push_str("DELETE FROM ");
        self.write_table_ref(out, table);
        out.push_str("\nWHERE ");
        condition.write_query(self.as_dyn(), out, false);
        out.push(';');
    }

    fn write_transaction_begin(&self, out: &mut String) {
        out.push_str("BEGIN;");
    }

    fn write_transaction_commit(&self, out: &mut String) {
        out.push_str("COMMIT;");
    }

    fn write_transaction_rollback(&self, out: &mut String) {
        out.push_str("ROLLBACK;");
    }
}

/// Standard SQL dialect.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter {}

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}
