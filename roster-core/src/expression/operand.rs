use crate::{Expression, OpPrecedence, SqlWriter, Value};

/// Leaf of an expression tree.
#[derive(Debug, Clone)]
pub enum Operand {
    LitBool(bool),
    LitFloat(f64),
    LitInt(i128),
    LitStr(&'static str),
    Null,
    /// `*`
    Asterisk,
    /// Positional parameter of a prepared statement.
    QuestionMark,
    /// Runtime value rendered as a literal.
    Variable(Value),
}

impl OpPrecedence for Operand {
    fn precedence(&self, _writer: &dyn SqlWriter) -> i32 {
        1_000_000
    }
}

impl Expression for Operand {
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String, qualify_columns: bool) {
        writer.write_expression_operand(out, self, qualify_columns)
    }
}

impl PartialEq for Operand {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::LitBool(l), Self::LitBool(r)) => l == r,
            (Self::LitFloat(l), Self::LitFloat(r)) => l == r,
            (Self::LitInt(l), Self::LitInt(r)) => l == r,
            (Self::LitStr(l), Self::LitStr(r)) => l == r,
            (Self::Variable(l), Self::Variable(r)) => l == r,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}
