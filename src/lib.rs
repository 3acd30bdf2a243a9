pub mod catalog;
mod student;

pub use roster_core::*;
pub use student::*;
