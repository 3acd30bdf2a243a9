use crate::AsValue;

/// A field that can be left for the database to fill.
///
/// `NotSet` fields are skipped when writing an `INSERT`, the column then
/// receives its generated or declared default (or the auto increment value).
#[derive(Debug, Default)]
pub enum Passive<T: AsValue> {
    Set(T),
    #[default]
    NotSet,
}

impl<T: AsValue> Passive<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Passive::Set(..))
    }
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Passive::Set(v) => Some(v),
            Passive::NotSet => None,
        }
    }
}

impl<T: AsValue + PartialEq> PartialEq for Passive<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Set(lhs), Self::Set(rhs)) => lhs == rhs,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl<T: AsValue + Clone> Clone for Passive<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Set(v) => Self::Set(v.clone()),
            Self::NotSet => Self::NotSet,
        }
    }
}

impl<T: AsValue> From<T> for Passive<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}
