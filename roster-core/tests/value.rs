#[cfg(test)]
mod tests {
    use roster_core::{
        AsValue, ConstraintViolation, Error, Passive, RowLabeled, RowsAffected, Value,
        ViolationKind,
    };
    use time::macros::{date, datetime};

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float64(Some(1.0)), Value::Null);
        assert!(Value::Int32(None).is_null());
        assert!(!Value::Int32(Some(0)).is_null());
    }

    #[test]
    fn value_bool() {
        let val = true.as_value();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(Some(false)));
        assert_ne!(val, Value::Boolean(None));
        assert_eq!(bool::try_from_value(val).unwrap(), true);
        assert_eq!(bool::try_from_value(Value::Int64(Some(1))).unwrap(), true);
        assert_eq!(bool::try_from_value(Value::Int32(Some(0))).unwrap(), false);
        assert_eq!(
            bool::try_from_value(Value::Varchar(Some("TRUE".into()))).unwrap(),
            true
        );
        assert!(bool::try_from_value(Value::Varchar(Some("maybe".into()))).is_err());
        assert!(bool::try_from_value(Value::Float64(Some(1.0))).is_err());
    }

    #[test]
    fn value_integers() {
        assert_eq!(i32::try_from_value(Value::Int32(Some(-7))).unwrap(), -7);
        // Sqlite integers always come back as i64
        assert_eq!(i32::try_from_value(Value::Int64(Some(12))).unwrap(), 12);
        let error = i32::try_from_value(Value::Int64(Some(i64::from(i32::MAX) + 1)))
            .expect_err("Out of range");
        assert!(error.to_string().contains("out of range for i32"), "{}", error);
        assert_eq!(i32::try_from_value(Value::Varchar(Some(" 42 ".into()))).unwrap(), 42);
        assert!(i32::try_from_value(Value::Null).is_err());

        assert_eq!(i64::try_from_value(Value::Int32(Some(5))).unwrap(), 5);
        assert_eq!(i64::MIN.as_value(), Value::Int64(Some(i64::MIN)));
        assert_eq!(f64::try_from_value(Value::Float64(Some(2.5))).unwrap(), 2.5);
    }

    #[test]
    fn value_string() {
        let val = "duncan kipkemoi".to_string().as_value();
        assert_eq!(val, Value::Varchar(Some("duncan kipkemoi".into())));
        assert_eq!(String::try_from_value(val).unwrap(), "duncan kipkemoi");
        assert!(String::try_from_value(Value::Int64(Some(1))).is_err());
    }

    #[test]
    fn value_date() {
        let val = date!(1879 - 03 - 14).as_value();
        assert_eq!(val, Value::Date(Some(date!(1879 - 03 - 14))));
        assert_eq!(
            time::Date::try_from_value(Value::Varchar(Some("1998-10-23".into()))).unwrap(),
            date!(1998 - 10 - 23)
        );
        assert_eq!(
            time::Date::try_from_value(Value::Timestamp(Some(datetime!(2000-01-03 10:00)))).unwrap(),
            date!(2000 - 01 - 03)
        );
        assert!(time::Date::try_from_value(Value::Varchar(Some("1998-13-01".into()))).is_err());
    }

    #[test]
    fn value_timestamp() {
        type Timestamp = time::PrimitiveDateTime;
        let parse = |v: &str| Timestamp::try_from_value(Value::Varchar(Some(v.into())));
        assert_eq!(
            parse("2024-09-02 08:00:00.5").unwrap(),
            datetime!(2024-09-02 08:00:00.5)
        );
        assert_eq!(
            parse("2024-09-02 08:00:00").unwrap(),
            datetime!(2024-09-02 08:00:00)
        );
        assert_eq!(
            parse("2024-09-02T08:00:00.000001").unwrap(),
            datetime!(2024-09-02 08:00:00.000001)
        );
        assert_eq!(
            parse("2024-09-02T08:00:00").unwrap(),
            datetime!(2024-09-02 08:00:00)
        );
        assert!(parse("2024-09-02").is_err());
        assert!(parse("yesterday").is_err());
        assert_eq!(
            Timestamp::try_from_value(datetime!(1879-03-14 00:00).as_value()).unwrap(),
            datetime!(1879-03-14 00:00)
        );
    }

    #[test]
    fn value_option_and_passive() {
        assert_eq!(None::<i32>.as_value(), Value::Int32(None));
        assert_eq!(Some(3).as_value(), Value::Int32(Some(3)));
        assert_eq!(Option::<i64>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i64>::try_from_value(Value::Int64(Some(9))).unwrap(),
            Some(9)
        );

        let passive: Passive<i64> = Passive::NotSet;
        assert!(!passive.is_set());
        assert_eq!(passive.as_option(), None);
        assert_eq!(passive.as_value(), Value::Int64(None));
        let passive: Passive<i64> = 4.into();
        assert!(passive.is_set());
        assert_eq!(passive.as_option(), Some(&4));
        assert_eq!(
            Passive::<i64>::try_from_value(Value::Int64(Some(4))).unwrap(),
            passive
        );
        let value: Value = passive.into();
        assert_eq!(value, Value::Int64(Some(4)));
    }

    #[test]
    fn constraint_violation() {
        let error = Error::new(ConstraintViolation::new(
            ViolationKind::Unique,
            "UNIQUE constraint failed: students.email",
        ))
        .context("While enrolling 1 students");
        let violation = ConstraintViolation::find(&error).expect("Lost the violation");
        assert_eq!(violation.kind, ViolationKind::Unique);
        assert_eq!(
            violation.to_string(),
            "unique violation: UNIQUE constraint failed: students.email"
        );
        assert!(ConstraintViolation::find(&Error::msg("no such table: students")).is_none());
    }

    #[test]
    fn row_labeled() {
        let mut row = RowLabeled::new(
            ["name", "birthday"].into_iter().map(String::from).collect(),
            [
                Value::Varchar(Some("pkurui sang".into())),
                Value::Varchar(Some("1998-10-23 00:00:00.0".into())),
            ]
            .into(),
        );
        assert_eq!(row.take::<String>("name").unwrap(), "pkurui sang");
        assert!(row.take::<String>("name").is_err(), "Already taken");
        assert_eq!(
            row.take::<time::PrimitiveDateTime>("birthday").unwrap(),
            datetime!(1998-10-23 00:00:00)
        );
        assert!(row.take::<i32>("grade").is_err());

        let count = RowLabeled::new(
            ["COUNT(*)"].into_iter().map(String::from).collect(),
            [Value::Int64(Some(3))].into(),
        );
        assert_eq!(count.into_single::<i64>().unwrap(), 3);
        assert!(row.into_single::<i64>().is_err());
    }

    #[test]
    fn rows_affected() {
        let mut total = RowsAffected::default();
        total.extend([
            RowsAffected {
                rows_affected: 2,
                last_affected_id: Some(2),
            },
            RowsAffected {
                rows_affected: 1,
                last_affected_id: None,
            },
        ]);
        assert_eq!(
            total,
            RowsAffected {
                rows_affected: 3,
                last_affected_id: Some(2),
            }
        );
    }
}
