//! Registration input: the options record and the validated declaration.

mod parse;

use crate::{
    error::{ConfigurationError, MalformedReason},
    mapping::{Code, EnumMapping},
    naming::validate_ident,
    traits::SymbolicEnum,
    value::Value,
};
use serde::Serialize;

///
/// RegistrationOptions
///
/// `array`           field stores a sequence of codes
/// `disable_scopes`  skip scope generation
/// `disable_setters` skip setter and mutator generation
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RegistrationOptions {
    pub array: bool,
    pub disable_scopes: bool,
    pub disable_setters: bool,
}

impl RegistrationOptions {
    /// Every option key accepted at the top level of a declaration.
    pub const KEYS: [&'static str; 3] = ["array", "disable_scopes", "disable_setters"];

    #[must_use]
    pub const fn new() -> Self {
        Self {
            array: false,
            disable_scopes: false,
            disable_setters: false,
        }
    }

    #[must_use]
    pub const fn array(mut self, array: bool) -> Self {
        self.array = array;
        self
    }

    #[must_use]
    pub const fn disable_scopes(mut self, disable: bool) -> Self {
        self.disable_scopes = disable;
        self
    }

    #[must_use]
    pub const fn disable_setters(mut self, disable: bool) -> Self {
        self.disable_setters = disable;
        self
    }

    #[must_use]
    pub fn is_key(key: &str) -> bool {
        Self::KEYS.contains(&key)
    }

    // set one flag by key; callers have already checked the key
    pub(crate) fn set(&mut self, key: &str, value: bool) {
        match key {
            "array" => self.array = value,
            "disable_scopes" => self.disable_scopes = value,
            "disable_setters" => self.disable_setters = value,
            _ => {}
        }
    }
}

///
/// EnumDeclaration
///
/// One enum field to register: the field identifier, its mapping, and the
/// options. Construction validates the identifier and the mapping.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EnumDeclaration {
    field: String,
    mapping: EnumMapping,
    options: RegistrationOptions,
}

impl EnumDeclaration {
    /// Declare `field` with typed `(name, code)` pairs and default options.
    pub fn new<I, S>(field: impl Into<String>, pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (S, Code)>,
        S: Into<String>,
    {
        let field = field.into();
        validate_field(&field)?;
        let mapping = EnumMapping::new(pairs)?;

        Ok(Self::from_parts(field, mapping, RegistrationOptions::new()))
    }

    /// Declare `field` from a typed enum produced by `symbolic_enum!`.
    pub fn of<E: SymbolicEnum>(field: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::new(field, E::VALUES.iter().copied())
    }

    /// Parse a loosely-typed declaration: a map of one field to its enum
    /// values, plus option keys.
    pub fn parse(args: &Value) -> Result<Self, ConfigurationError> {
        parse::parse_declaration(args)
    }

    /// Parse an already-built JSON document. Its objects hold one value per
    /// key, so repeated keys in the source text are already gone; use
    /// `from_json_str` to have them rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, ConfigurationError> {
        Self::parse(&Value::from_json(json))
    }

    /// Parse JSON text, keeping every object entry so repeated field or enum
    /// names fail validation.
    pub fn from_json_str(src: &str) -> Result<Self, ConfigurationError> {
        let args: Value = serde_json::from_str(src)?;

        Self::parse(&args)
    }

    #[must_use]
    pub const fn with_options(mut self, options: RegistrationOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub const fn mapping(&self) -> &EnumMapping {
        &self.mapping
    }

    #[must_use]
    pub const fn options(&self) -> RegistrationOptions {
        self.options
    }

    pub(crate) const fn from_parts(
        field: String,
        mapping: EnumMapping,
        options: RegistrationOptions,
    ) -> Self {
        Self {
            field,
            mapping,
            options,
        }
    }

    pub(crate) fn into_parts(self) -> (String, EnumMapping, RegistrationOptions) {
        (self.field, self.mapping, self.options)
    }
}

pub(crate) fn validate_field(field: &str) -> Result<(), MalformedReason> {
    let checked = if RegistrationOptions::is_key(field) {
        Err("reserved for an option".to_string())
    } else {
        validate_ident(field)
    };

    checked.map_err(|reason| MalformedReason::InvalidIdent {
        ident: field.to_string(),
        reason,
    })
}
