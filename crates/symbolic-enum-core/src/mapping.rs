use crate::{error::MalformedReason, naming::validate_ident, value::Value};
use derive_more::{Deref, IntoIterator};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Integer persisted for a symbolic name.
pub type Code = i64;

///
/// EnumEntry
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EnumEntry {
    pub name: String,
    pub code: Code,
}

///
/// EnumMapping
///
/// Ordered symbolic-name → code pairs. Names are unique and codes are
/// unique; declaration order is preserved. Immutable once built.
///

#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq, Serialize)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct EnumMapping(Vec<EnumEntry>);

impl EnumMapping {
    /// Build a mapping from typed pairs.
    pub fn new<I, S>(pairs: I) -> Result<Self, MalformedReason>
    where
        I: IntoIterator<Item = (S, Code)>,
        S: Into<String>,
    {
        let entries: Vec<EnumEntry> = pairs
            .into_iter()
            .map(|(name, code)| EnumEntry {
                name: name.into(),
                code,
            })
            .collect();

        if entries.is_empty() {
            return Err(MalformedReason::EmptyMapping);
        }
        for entry in &entries {
            validate_ident(&entry.name).map_err(|reason| MalformedReason::InvalidIdent {
                ident: entry.name.clone(),
                reason,
            })?;
        }
        check_unique(&entries)?;

        Ok(Self(entries))
    }

    /// Build a mapping from loosely-typed key/value pairs.
    pub(crate) fn from_values(pairs: &[(Value, Value)]) -> Result<Self, MalformedReason> {
        if pairs.is_empty() {
            return Err(MalformedReason::EmptyMapping);
        }

        let mut typed = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let name = key
                .as_name()
                .ok_or_else(|| MalformedReason::NonSymbolName { key: key.clone() })?;
            let code = value
                .as_int()
                .ok_or_else(|| MalformedReason::NonIntegerCode {
                    name: name.to_string(),
                    value: value.clone(),
                })?;
            typed.push((name, code));
        }

        Self::new(typed)
    }

    #[must_use]
    pub fn code(&self, name: &str) -> Option<Code> {
        self.0.iter().find(|e| e.name == name).map(|e| e.code)
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.code(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.name.as_str())
    }

    pub fn codes(&self) -> impl Iterator<Item = Code> + '_ {
        self.0.iter().map(|e| e.code)
    }

    #[must_use]
    pub fn reverse(&self) -> ReverseMapping {
        ReverseMapping(
            self.0
                .iter()
                .map(|e| (e.code, e.name.clone()))
                .collect(),
        )
    }

    /// The mapping as a `Value::Map` of symbols to ints, in order.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Map(
            self.0
                .iter()
                .map(|e| (Value::symbol(e.name.as_str()), Value::Int(e.code)))
                .collect(),
        )
    }
}

// Names and codes must each be unique; the first offending entry wins.
fn check_unique(entries: &[EnumEntry]) -> Result<(), MalformedReason> {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    let mut codes: BTreeMap<Code, &str> = BTreeMap::new();

    for entry in entries {
        if !names.insert(entry.name.as_str()) {
            return Err(MalformedReason::DuplicateName {
                name: entry.name.clone(),
            });
        }
        if let Some(first) = codes.insert(entry.code, entry.name.as_str()) {
            return Err(MalformedReason::DuplicateCode {
                code: entry.code,
                first: first.to_string(),
                second: entry.name.clone(),
            });
        }
    }

    Ok(())
}

///
/// ReverseMapping
/// Code → symbolic name; the inverse of an `EnumMapping`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReverseMapping(BTreeMap<Code, String>);

impl ReverseMapping {
    #[must_use]
    pub fn name(&self, code: Code) -> Option<&str> {
        self.0.get(&code).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
