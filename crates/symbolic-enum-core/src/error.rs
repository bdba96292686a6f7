use crate::{mapping::Code, value::Value};
use thiserror::Error as ThisError;

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Member(#[from] MemberError),
}

impl From<AttributeError> for Error {
    fn from(err: AttributeError) -> Self {
        match err {
            AttributeError::Member(err) => Self::Member(err),
            AttributeError::Lookup(err) => Self::Lookup(err),
            AttributeError::Validation(err) => Self::Validation(err),
        }
    }
}

///
/// ConfigurationError
///
/// Raised by registration, always before the target type is mutated.
///

#[derive(Debug, ThisError)]
pub enum ConfigurationError {
    #[error("malformed configuration: {0}")]
    Malformed(#[from] MalformedReason),

    #[error("unrecognized option: {key}")]
    UnrecognizedOption { key: String },

    #[error("invalid option value for {key}: expected a boolean, got {value}")]
    InvalidOptionValue { key: String, value: Value },

    /// `name` is the enum value (or field) that owns the clashing member.
    #[error("'{name}' clashes with existing members")]
    Clash { name: String, member: String },

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigurationError {
    /// True for every shape/content failure of the declaration itself.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::Json(_))
    }
}

///
/// MalformedReason
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum MalformedReason {
    #[error("expected a map of one field to its enum values, got {found}")]
    NotAMap { found: Value },

    #[error("top-level key {key} is not a symbol")]
    NonSymbolKey { key: Value },

    #[error("no field mapped to enum values")]
    MissingField,

    #[error("more than one field declared ('{first}' and '{second}')")]
    MultipleFields { first: String, second: String },

    #[error("'{ident}' is not a valid identifier: {reason}")]
    InvalidIdent { ident: String, reason: String },

    #[error("no enum values declared")]
    EmptyMapping,

    #[error("enum name {key} is not a symbol")]
    NonSymbolName { key: Value },

    #[error("enum value '{name}' maps to {value}, expected an integer code")]
    NonIntegerCode { name: String, value: Value },

    #[error("duplicate enum name '{name}'")]
    DuplicateName { name: String },

    #[error("duplicate code {code} for '{first}' and '{second}'")]
    DuplicateCode {
        code: Code,
        first: String,
        second: String,
    },
}

///
/// ValidationError
///
/// Raised by a generated setter when assigned a value outside the mapping.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("invalid enum value for '{field}': {value}")]
    InvalidEnumValue { field: String, value: Value },

    #[error("invalid enum array value for '{field}': {value}")]
    InvalidEnumArrayValue { field: String, value: Value },
}

///
/// LookupError
///
/// Raised by a generated getter when storage holds something the mapping
/// cannot name.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum LookupError {
    #[error("field '{field}' stores unknown enum code {code}")]
    UnknownCode { field: String, code: Code },

    #[error("field '{field}' stores {found} where {expected} was expected")]
    UnexpectedValue {
        field: String,
        expected: &'static str,
        found: Value,
    },
}

///
/// MemberError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MemberError {
    #[error("undefined method '{name}' for {entity}")]
    UndefinedMethod { entity: String, name: String },

    #[error("undefined static method '{name}' for {entity}")]
    UndefinedStaticMethod { entity: String, name: String },
}

///
/// AttributeError
///
/// Failure of a name-dispatched getter or setter call.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum AttributeError {
    #[error(transparent)]
    Member(#[from] MemberError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
