//! Identifier rules and the names of generated members.
//!
//! Every member the registrar installs is named from the field identifier or
//! a symbolic name:
//!
//! | member            | name             | table    |
//! |-------------------|------------------|----------|
//! | mapping accessor  | `<plural field>` | static   |
//! | getter            | `<field>`        | instance |
//! | setter            | `<field>=`       | instance |
//! | predicate         | `is_<name>`      | instance |
//! | mutator           | `set_<name>!`    | instance |
//! | scope             | `<name>`         | static   |

use crate::MAX_IDENT_LEN;

/// Ensure an identifier is non-empty, bounded, and snake-case shaped.
pub(crate) fn validate_ident(ident: &str) -> Result<(), String> {
    let mut chars = ident.chars();

    let Some(first) = chars.next() else {
        return Err("ident is empty".to_string());
    };
    if ident.len() > MAX_IDENT_LEN {
        return Err(format!("exceeds max length {MAX_IDENT_LEN}"));
    }
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(format!("must start with a letter or '_', found '{first}'"));
    }
    if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(format!("contains invalid character '{c}'"));
    }

    Ok(())
}

#[must_use]
pub fn getter(field: &str) -> String {
    field.to_string()
}

#[must_use]
pub fn setter(field: &str) -> String {
    format!("{field}=")
}

#[must_use]
pub fn predicate(name: &str) -> String {
    format!("is_{name}")
}

#[must_use]
pub fn mutator(name: &str) -> String {
    format!("set_{name}!")
}

#[must_use]
pub fn scope(name: &str) -> String {
    name.to_string()
}
