use crate::{mapping::Code, traits::Record, value::Value};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// Deferred filter builder registered as a scope.
pub type ScopeFn = Arc<dyn Fn() -> FieldFilter + Send + Sync>;

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum CompareOp {
    Eq = 0x01,
    Contains = 0x02,
}

impl CompareOp {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

///
/// FieldFilter
///
/// Single-field predicate produced by an enum scope. Query engines consume
/// it; `matches` evaluates it against one record in memory.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
}

impl FieldFilter {
    #[must_use]
    pub fn eq(field: impl Into<String>, code: Code) -> Self {
        Self {
            field: field.into(),
            op: CompareOp::Eq,
            value: Value::Int(code),
        }
    }

    #[must_use]
    pub fn contains(field: impl Into<String>, code: Code) -> Self {
        Self {
            field: field.into(),
            op: CompareOp::Contains,
            value: Value::Int(code),
        }
    }

    #[must_use]
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        let stored = record.read_field(&self.field);

        match self.op {
            CompareOp::Eq => stored == self.value,
            CompareOp::Contains => stored
                .as_list()
                .is_some_and(|items| items.contains(&self.value)),
        }
    }
}

impl Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            CompareOp::Eq => "=",
            CompareOp::Contains => "CONTAINS",
        };

        write!(f, "{} {op} {}", self.field, self.value)
    }
}
