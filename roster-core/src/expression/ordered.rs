use crate::{Expression, OpPrecedence, SqlWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    ASC,
    DESC,
}

/// Expression used as an `ORDER BY` term.
#[derive(Debug)]
pub struct Ordered<E: Expression> {
    pub order: Order,
    pub expression: E,
}

impl<E: Expression> OpPrecedence for Ordered<E> {
    fn precedence(&self, writer: &dyn SqlWriter) -> i32 {
        self.expression.precedence(writer)
    }
}

impl<E: Expression> Expression for Ordered<E> {
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String, qualify_columns: bool) {
        writer.write_expression_ordered(
            out,
            &Ordered {
                order: self.order,
                expression: &self.expression as &dyn Expression,
            },
            qualify_columns,
        )
    }
    fn is_ordered(&self) -> bool {
        true
    }
}
