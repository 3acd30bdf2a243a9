use crate::Error;
use std::fmt::{self, Display, Formatter};

/// Which table rule rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    PrimaryKey,
    Unique,
    Check,
    NotNull,
    Other,
}

/// A write rejected by the database because of a constraint.
///
/// Drivers attach it to the returned [`Error`], callers recover it with
/// [`ConstraintViolation::find`] regardless of the context layered on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub kind: ViolationKind,
    pub message: String,
}

impl ConstraintViolation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn find(error: &Error) -> Option<&ConstraintViolation> {
        error
            .chain()
            .find_map(|e| e.downcast_ref::<ConstraintViolation>())
    }
}

impl Display for ViolationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViolationKind::PrimaryKey => "primary key",
            ViolationKind::Unique => "unique",
            ViolationKind::Check => "check",
            ViolationKind::NotNull => "not null",
            ViolationKind::Other => "constraint",
        })
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation: {}", self.kind, self.message)
    }
}

impl std::error::Error for ConstraintViolation {}
