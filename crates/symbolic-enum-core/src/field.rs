use crate::{
    TRACE_TARGET,
    declaration::RegistrationOptions,
    error::{LookupError, ValidationError},
    filter::FieldFilter,
    mapping::{Code, EnumMapping, ReverseMapping},
    traits::Record,
    value::Value,
};

///
/// EnumField
///
/// Shared state behind every member generated for one enum field: the field
/// identifier, its accessor name, the mapping and its inverse. Built once per
/// registration and never mutated.
///

#[derive(Clone, Debug)]
pub struct EnumField {
    name: String,
    accessor: String,
    mapping: EnumMapping,
    reverse: ReverseMapping,
    options: RegistrationOptions,
}

impl EnumField {
    pub(crate) fn new(
        name: String,
        accessor: String,
        mapping: EnumMapping,
        options: RegistrationOptions,
    ) -> Self {
        let reverse = mapping.reverse();

        Self {
            name,
            accessor,
            mapping,
            reverse,
            options,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the static mapping accessor (the pluralized field name).
    #[must_use]
    pub fn accessor(&self) -> &str {
        &self.accessor
    }

    #[must_use]
    pub const fn mapping(&self) -> &EnumMapping {
        &self.mapping
    }

    #[must_use]
    pub const fn reverse(&self) -> &ReverseMapping {
        &self.reverse
    }

    #[must_use]
    pub const fn options(&self) -> RegistrationOptions {
        self.options
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.options.array
    }

    // ------------------------------------------------------------------
    // getter
    // ------------------------------------------------------------------

    /// Read the field and translate stored code(s) to symbolic name(s).
    pub fn get<R: Record + ?Sized>(&self, record: &R) -> Result<Value, LookupError> {
        self.decode(&record.read_field(&self.name))
    }

    /// Translate a raw stored value to symbolic name(s).
    pub fn decode(&self, raw: &Value) -> Result<Value, LookupError> {
        if raw.is_null() {
            return Ok(Value::Null);
        }

        if self.is_array() {
            let codes = raw
                .as_list()
                .ok_or_else(|| self.unexpected("a list of codes", raw))?;

            codes
                .iter()
                .map(|item| self.decode_code(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        } else {
            self.decode_code(raw)
        }
    }

    fn decode_code(&self, raw: &Value) -> Result<Value, LookupError> {
        let code = raw
            .as_int()
            .ok_or_else(|| self.unexpected("an integer code", raw))?;

        match self.reverse.name(code) {
            Some(name) => Ok(Value::symbol(name)),
            None => {
                tracing::warn!(
                    target: TRACE_TARGET,
                    field = %self.name,
                    code,
                    "stored code has no symbolic name"
                );

                Err(LookupError::UnknownCode {
                    field: self.name.clone(),
                    code,
                })
            }
        }
    }

    fn unexpected(&self, expected: &'static str, found: &Value) -> LookupError {
        LookupError::UnexpectedValue {
            field: self.name.clone(),
            expected,
            found: found.clone(),
        }
    }

    // ------------------------------------------------------------------
    // setter
    // ------------------------------------------------------------------

    /// Validate and store symbolic name(s) as code(s).
    pub(crate) fn set<R: Record + ?Sized>(
        &self,
        record: &mut R,
        value: Value,
    ) -> Result<(), ValidationError> {
        let raw = self.encode(&value)?;
        record.write_field(&self.name, raw);

        Ok(())
    }

    /// Translate symbolic name(s) to the raw value the setter would store.
    pub fn encode(&self, value: &Value) -> Result<Value, ValidationError> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        if self.is_array() {
            let codes = value.as_list().and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_name().and_then(|name| self.mapping.code(name)))
                    .collect::<Option<Vec<_>>>()
            });

            codes
                .map(Value::ints)
                .ok_or_else(|| ValidationError::InvalidEnumArrayValue {
                    field: self.name.clone(),
                    value: value.clone(),
                })
        } else {
            value
                .as_name()
                .and_then(|name| self.mapping.code(name))
                .map(Value::Int)
                .ok_or_else(|| ValidationError::InvalidEnumValue {
                    field: self.name.clone(),
                    value: value.clone(),
                })
        }
    }

    // ------------------------------------------------------------------
    // per-value members
    // ------------------------------------------------------------------

    /// Predicate: the stored code equals `code` (array mode: contains it).
    pub fn is<R: Record + ?Sized>(&self, record: &R, code: Code) -> bool {
        self.filter(code).matches(record)
    }

    /// Mutator: durably persist `code` as the field's value.
    pub(crate) fn mark<R: Record + ?Sized>(&self, record: &mut R, code: Code) -> Result<(), R::Error> {
        let raw = if self.is_array() {
            Value::ints([code])
        } else {
            Value::Int(code)
        };

        record.persist(&self.name, raw)
    }

    /// Scope filter selecting records holding `code`.
    #[must_use]
    pub fn filter(&self, code: Code) -> FieldFilter {
        if self.is_array() {
            FieldFilter::contains(self.name.as_str(), code)
        } else {
            FieldFilter::eq(self.name.as_str(), code)
        }
    }
}
