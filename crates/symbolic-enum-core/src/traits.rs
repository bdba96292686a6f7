use crate::{
    entity::Member,
    error::MalformedReason,
    filter::ScopeFn,
    mapping::{Code, EnumMapping},
    value::Value,
};

// ============================================================================
// COLLABORATORS
// ============================================================================
//
// The registrar never owns storage, persistence, or query execution. These
// traits are the seams it reaches through.
//

///
/// Record
///
/// One persisted entity instance, seen through its raw attribute storage.
///
/// ## Semantics
/// - `read_field` returns `Value::Null` for a field with nothing stored
/// - `write_field` replaces the raw stored value without persisting it
/// - `persist` durably updates one field; its error is surfaced unchanged
///   by generated mutators
///

pub trait Record {
    type Error;

    fn read_field(&self, field: &str) -> Value;

    fn write_field(&mut self, field: &str, value: Value);

    fn persist(&mut self, field: &str, value: Value) -> Result<(), Self::Error>;
}

///
/// TargetType
///
/// The type an enum field is registered onto: a table of instance members,
/// a table of static members, and a scope registry.
///

pub trait TargetType {
    fn type_name(&self) -> &str;

    fn has_method(&self, name: &str) -> bool;

    fn has_static_method(&self, name: &str) -> bool;

    fn define_method(&mut self, name: String, member: Member);

    fn define_static_method(&mut self, name: String, member: Member);

    fn scope(&mut self, name: &str, scope: ScopeFn);
}

// ============================================================================
// TYPED ENUMS
// ============================================================================

///
/// SymbolicEnum
///
/// A Rust enum whose variants carry a symbolic name and an integer code.
/// Implemented by `symbolic_enum!`.
///

pub trait SymbolicEnum: Copy + Sized + 'static {
    /// `(name, code)` for every variant, in declaration order.
    const VALUES: &'static [(&'static str, Code)];

    fn code(self) -> Code;

    fn name(self) -> &'static str;

    fn from_code(code: Code) -> Option<Self>;

    fn from_name(name: &str) -> Option<Self>;

    fn to_value(self) -> Value {
        Value::symbol(self.name())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_name().and_then(Self::from_name)
    }

    /// The variants as a validated mapping.
    fn mapping() -> Result<EnumMapping, MalformedReason> {
        EnumMapping::new(Self::VALUES.iter().copied())
    }
}
