use crate::{OpPrecedence, SqlWriter, Value};
use std::fmt::Debug;

/// A renderable SQL expression node.
pub trait Expression: OpPrecedence + Send + Sync + Debug {
    /// Serialize the expression into the output string using the sql writer.
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String, qualify_columns: bool);
    /// Whether this expression carries ordering information.
    fn is_ordered(&self) -> bool {
        false
    }
}

impl<T: Expression> Expression for &T {
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String, qualify_columns: bool) {
        (*self).write_query(writer, out, qualify_columns);
    }
    fn is_ordered(&self) -> bool {
        (*self).is_ordered()
    }
}

impl Expression for &dyn Expression {
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String, qualify_columns: bool) {
        (*self).write_query(writer, out, qualify_columns);
    }
    fn is_ordered(&self) -> bool {
        (*self).is_ordered()
    }
}

impl Expression for bool {
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String, _qualify_columns: bool) {
        writer.write_value_bool(out, *self);
    }
}

impl Expression for Value {
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String, _qualify_columns: bool) {
        writer.write_value(out, self);
    }
}
