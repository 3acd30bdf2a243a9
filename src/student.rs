use roster_core::{
    AsValue, BinaryOp, BinaryOpType, ColumnDef, ColumnRef, ConstraintDef, Entity,
    IndexDef, Operand, Passive, Result, RowLabeled, TableConstraint, TableDef, TableRef, Value,
};
use std::fmt::{self, Display};
use time::{OffsetDateTime, PrimitiveDateTime};

/// A student enrolled in the catalog, stored in the `students` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    /// Assigned by the database on insert.
    pub id: Passive<i64>,
    pub name: String,
    pub email: String,
    pub grade: i32,
    pub birthday: PrimitiveDateTime,
    /// Left unset, it becomes the insert time.
    pub enrolled_date: Passive<PrimitiveDateTime>,
}

impl Student {
    pub const TABLE: TableRef = TableRef::new("students");
    pub const ID: ColumnRef = ColumnRef::new("students", "id");
    pub const NAME: ColumnRef = ColumnRef::new("students", "name");
    pub const EMAIL: ColumnRef = ColumnRef::new("students", "email");
    pub const GRADE: ColumnRef = ColumnRef::new("students", "grade");
    pub const BIRTHDAY: ColumnRef = ColumnRef::new("students", "birthday");
    pub const ENROLLED_DATE: ColumnRef = ColumnRef::new("students", "enrolled_date");

    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        grade: i32,
        birthday: PrimitiveDateTime,
    ) -> Self {
        Self {
            id: Passive::NotSet,
            name: name.into(),
            email: email.into(),
            grade,
            birthday,
            enrolled_date: Passive::NotSet,
        }
    }
}

static GRADE_RANGE: BinaryOp<BinaryOp<ColumnRef, Operand>, BinaryOp<ColumnRef, Operand>> =
    BinaryOp {
        op: BinaryOpType::And,
        lhs: BinaryOp {
            op: BinaryOpType::GreaterEqual,
            lhs: Student::GRADE,
            rhs: Operand::LitInt(1),
        },
        rhs: BinaryOp {
            op: BinaryOpType::LessEqual,
            lhs: Student::GRADE,
            rhs: Operand::LitInt(12),
        },
    };

fn enrollment_timestamp() -> Value {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time()).as_value()
}

static COLUMNS: [ColumnDef; 6] = [
    ColumnDef {
        column_ref: Student::ID,
        column_type: "",
        value: Value::Int64(None),
        nullable: false,
        default: None,
        auto_increment: true,
        passive: true,
    },
    ColumnDef {
        column_ref: Student::NAME,
        column_type: "",
        value: Value::Varchar(None),
        nullable: false,
        default: None,
        auto_increment: false,
        passive: false,
    },
    ColumnDef {
        column_ref: Student::EMAIL,
        column_type: "VARCHAR(55)",
        value: Value::Varchar(None),
        nullable: false,
        default: None,
        auto_increment: false,
        passive: false,
    },
    ColumnDef {
        column_ref: Student::GRADE,
        column_type: "",
        value: Value::Int32(None),
        nullable: false,
        default: None,
        auto_increment: false,
        passive: false,
    },
    ColumnDef {
        column_ref: Student::BIRTHDAY,
        column_type: "",
        value: Value::Timestamp(None),
        nullable: false,
        default: None,
        auto_increment: false,
        passive: false,
    },
    ColumnDef {
        column_ref: Student::ENROLLED_DATE,
        column_type: "",
        value: Value::Timestamp(None),
        nullable: false,
        default: Some(enrollment_timestamp),
        auto_increment: false,
        passive: true,
    },
];

/// Schema of the `students` table.
pub static STUDENTS: TableDef = TableDef {
    table: Student::TABLE,
    columns: &COLUMNS,
    constraints: &[
        ConstraintDef {
            name: "id_pk",
            kind: TableConstraint::PrimaryKey(&["id"]),
        },
        ConstraintDef {
            name: "unique_email",
            kind: TableConstraint::Unique(&["email"]),
        },
        ConstraintDef {
            name: "grade_between_1_and_12",
            kind: TableConstraint::Check(&GRADE_RANGE),
        },
    ],
    indexes: &[IndexDef {
        name: "index_name",
        columns: &["name"],
        unique: false,
    }],
};

impl Entity for Student {
    type PrimaryKey = i64;

    fn table_def() -> &'static TableDef {
        &STUDENTS
    }

    fn from_row(mut row: RowLabeled) -> Result<Self> {
        Ok(Self {
            id: row.take("id")?,
            name: row.take("name")?,
            email: row.take("email")?,
            grade: row.take("grade")?,
            birthday: row.take("birthday")?,
            enrolled_date: row.take("enrolled_date")?,
        })
    }

    fn row_filtered(&self) -> Box<[(&'static str, Value)]> {
        let mut row = Vec::with_capacity(COLUMNS.len());
        if let Passive::Set(id) = self.id {
            row.push((Self::ID.name, id.as_value()));
        }
        row.push((Self::NAME.name, self.name.clone().as_value()));
        row.push((Self::EMAIL.name, self.email.clone().as_value()));
        row.push((Self::GRADE.name, self.grade.as_value()));
        row.push((Self::BIRTHDAY.name, self.birthday.as_value()));
        if let Passive::Set(enrolled_date) = self.enrolled_date {
            row.push((Self::ENROLLED_DATE.name, enrolled_date.as_value()));
        }
        row.into()
    }

    fn primary_key(&self) -> Option<i64> {
        self.id.as_option().copied()
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id.as_option() {
            Some(id) => write!(f, "Student {}: ", id)?,
            None => f.write_str("Student: ")?,
        }
        write!(f, "{}, {}, Grade {}", self.name, self.email, self.grade)
    }
}
