//! Symbolic enum fields for persisted entities.
//!
//! Registering a field such as `state` with `{abc: 1, def: 2}` installs a
//! mapping accessor (`states`), a translating getter and setter, one
//! predicate, mutator and scope per value. Storage keeps the integer codes;
//! callers see the symbolic names.
//!
//! This is the public meta-crate. Downstream users depend on
//! **symbolic-enum** only; the runtime lives in `symbolic-enum-core`.

pub use symbolic_enum_core as core;

//
// Macros
//

pub use symbolic_enum_core::symbolic_enum;

pub use symbolic_enum_core::{
    Error,
    error::{AttributeError, ConfigurationError, LookupError, MemberError, ValidationError},
};

/// Crate version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Prelude
//

pub mod prelude {
    pub use crate::symbolic_enum;
    pub use symbolic_enum_core::prelude::*;
}
