#[cfg(test)]
mod tests {
    use roster::{
        BinaryOp, BinaryOpType, Expression, ExpressionExt, GenericSqlWriter, Operand, Student,
        UnaryOp, UnaryOpType, Value,
    };
    use time::macros::datetime;

    const WRITER: GenericSqlWriter = GenericSqlWriter::new();

    fn render(expression: &dyn Expression, qualify_columns: bool) -> String {
        let mut out = String::new();
        expression.write_query(&WRITER, &mut out, qualify_columns);
        out
    }

    #[test]
    fn literals() {
        assert_eq!(render(&Operand::LitBool(false), false), "false");
        assert_eq!(render(&true, false), "true");
        assert_eq!(render(&Operand::LitInt(-42), false), "-42");
        assert_eq!(render(&Operand::LitFloat(1.5), false), "1.5");
        assert_eq!(render(&Operand::LitStr("O'Neil"), false), "'O''Neil'");
        assert_eq!(render(&Operand::Null, false), "NULL");
        assert_eq!(render(&Operand::Asterisk, false), "*");
        assert_eq!(render(&Operand::QuestionMark, false), "?");
        assert_eq!(
            render(&Value::Varchar(Some("duncan".into())), false),
            "'duncan'"
        );
        assert_eq!(render(&Value::Int32(None), false), "NULL");
        assert_eq!(
            render(&Value::Timestamp(Some(datetime!(2024-01-02 03:04:05))), false),
            "'2024-01-02 03:04:05.0'"
        );
        assert_eq!(
            render(
                &Value::Timestamp(Some(datetime!(2024-01-02 03:04:05.000120))),
                false
            ),
            "'2024-01-02 03:04:05.00012'"
        );
    }

    #[test]
    fn columns() {
        assert_eq!(render(&Student::NAME, false), r#""name""#);
        assert_eq!(render(&Student::NAME, true), r#""students"."name""#);
        assert_eq!(render(&Student::GRADE.desc(), false), r#""grade" DESC"#);
        assert_eq!(render(&Student::NAME.asc(), false), r#""name" ASC"#);
    }

    #[test]
    fn builders() {
        let expr = Student::GRADE
            .greater_equal(Operand::LitInt(1))
            .and(Student::GRADE.less_equal(Operand::LitInt(12)));
        assert!(matches!(
            expr,
            BinaryOp {
                op: BinaryOpType::And,
                lhs: BinaryOp {
                    op: BinaryOpType::GreaterEqual,
                    rhs: Operand::LitInt(1),
                    ..
                },
                rhs: BinaryOp {
                    op: BinaryOpType::LessEqual,
                    rhs: Operand::LitInt(12),
                    ..
                },
            }
        ));
        assert_eq!(render(&expr, false), r#""grade" >= 1 AND "grade" <= 12"#);

        let expr = Student::NAME
            .like(Operand::LitStr("%duncan%"))
            .and(Student::GRADE.equals(Operand::LitInt(8)));
        assert_eq!(
            render(&expr, false),
            r#""name" LIKE '%duncan%' AND "grade" = 8"#
        );

        let expr = Student::EMAIL.is(Operand::Null);
        assert_eq!(render(&expr, false), r#""email" IS NULL"#);
        let expr = Student::EMAIL.is_not(Operand::Null);
        assert_eq!(render(&expr, false), r#""email" IS NOT NULL"#);
        let expr = Student::NAME.not_equals(Operand::LitStr("x"));
        assert_eq!(render(&expr, false), r#""name" != 'x'"#);
    }

    #[test]
    fn parentheses() {
        let expr = Operand::LitInt(1)
            .plus(Operand::LitInt(2))
            .times(Operand::LitInt(3));
        assert_eq!(render(&expr, false), "(1 + 2) * 3");

        let expr = Operand::LitInt(1).plus(Operand::LitInt(2).times(Operand::LitInt(3)));
        assert_eq!(render(&expr, false), "1 + 2 * 3");

        let expr = Operand::LitInt(1)
            .minus(Operand::LitInt(2))
            .minus(Operand::LitInt(3));
        assert_eq!(render(&expr, false), "1 - 2 - 3");

        let expr = Operand::LitInt(1).minus(Operand::LitInt(2).minus(Operand::LitInt(3)));
        assert_eq!(render(&expr, false), "1 - (2 - 3)");

        let expr = Operand::LitInt(8).divided_by(Operand::LitInt(2).divided_by(Operand::LitInt(2)));
        assert_eq!(render(&expr, false), "8 / (2 / 2)");

        let expr = Student::GRADE
            .equals(Operand::LitInt(1))
            .or(Student::GRADE.equals(Operand::LitInt(2)))
            .and(Student::NAME.like(Operand::LitStr("a%")));
        assert_eq!(
            render(&expr, false),
            r#"("grade" = 1 OR "grade" = 2) AND "name" LIKE 'a%'"#
        );

        let expr = UnaryOp {
            op: UnaryOpType::Negative,
            v: Operand::LitInt(1).plus(Operand::LitInt(2)),
        };
        assert_eq!(render(&expr, false), "-(1 + 2)");

        let expr = Student::NAME.like(Operand::LitStr("%a%")).not();
        assert_eq!(render(&expr, false), r#"NOT "name" LIKE '%a%'"#);

        let expr = Student::GRADE
            .equals(Operand::LitInt(1))
            .and(Student::GRADE.equals(Operand::LitInt(2)))
            .not();
        assert_eq!(render(&expr, false), r#"NOT ("grade" = 1 AND "grade" = 2)"#);

        let expr = Student::GRADE.plus(Operand::LitInt(1));
        assert_eq!(render(&expr, true), r#""students"."grade" + 1"#);
    }
}
