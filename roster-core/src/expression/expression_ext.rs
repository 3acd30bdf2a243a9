use crate::{BinaryOp, BinaryOpType, Expression, Order, Ordered, UnaryOp, UnaryOpType};

macro_rules! binary_builder {
    ($($(#[$attr:meta])* $name:ident => $op:ident),+ $(,)?) => {
        $(
            $(#[$attr])*
            fn $name<R: Expression>(self, rhs: R) -> BinaryOp<Self, R> {
                BinaryOp {
                    op: BinaryOpType::$op,
                    lhs: self,
                    rhs,
                }
            }
        )+
    };
}

/// Builder methods to compose expression trees.
///
/// ```rust
/// use roster_core::{ColumnRef, ExpressionExt, Operand};
/// const GRADE: ColumnRef = ColumnRef::new("students", "grade");
/// let in_range = GRADE
///     .greater_equal(Operand::LitInt(1))
///     .and(GRADE.less_equal(Operand::LitInt(12)));
/// ```
pub trait ExpressionExt: Expression + Sized {
    binary_builder! {
        equals => Equal,
        not_equals => NotEqual,
        less => Less,
        less_equal => LessEqual,
        greater => Greater,
        greater_equal => GreaterEqual,
        /// Pattern match, case sensitivity depends on the database.
        like => Like,
        not_like => NotLike,
        is => Is,
        is_not => IsNot,
        and => And,
        or => Or,
        plus => Addition,
        minus => Subtraction,
        times => Multiplication,
        divided_by => Division,
    }

    fn not(self) -> UnaryOp<Self> {
        UnaryOp {
            op: UnaryOpType::Not,
            v: self,
        }
    }

    fn asc(self) -> Ordered<Self> {
        Ordered {
            order: Order::ASC,
            expression: self,
        }
    }

    fn desc(self) -> Ordered<Self> {
        Ordered {
            order: Order::DESC,
            expression: self,
        }
    }
}

impl<E: Expression> ExpressionExt for E {}
