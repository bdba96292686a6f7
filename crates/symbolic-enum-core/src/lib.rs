//! Core runtime for symbolic-enum: enum mappings, declarations, the field
//! registrar, generated members, and the entity member tables they land in.
#![warn(unreachable_pub)]

extern crate self as symbolic_enum_core;

#[macro_use]
mod macros;

pub mod declaration;
pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod inflect;
pub mod mapping;
pub mod naming;
pub mod registrar;
pub mod traits;
pub mod value;

pub use error::Error;

///
/// CONSTANTS
///

/// Maximum length of a field or symbolic-name identifier.
pub const MAX_IDENT_LEN: usize = 64;

/// Tracing target used by every event this crate emits.
pub const TRACE_TARGET: &str = "symbolic_enum";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors or registrar internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        declaration::{EnumDeclaration, RegistrationOptions},
        entity::EntityType,
        mapping::{Code, EnumMapping},
        traits::{Record, SymbolicEnum, TargetType},
        value::Value,
    };
}
