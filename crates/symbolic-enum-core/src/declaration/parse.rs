use crate::{
    declaration::{EnumDeclaration, RegistrationOptions, validate_field},
    error::{ConfigurationError, MalformedReason},
    mapping::EnumMapping,
    value::Value,
};

// Validation runs in a fixed order and the first failure wins:
//   1. shape: one map-valued field key, everything else an option
//   2. mapping content: non-empty, symbol names, integer codes
//   3. mapping uniqueness
//   4. option keys
//   5. option values
pub(super) fn parse_declaration(args: &Value) -> Result<EnumDeclaration, ConfigurationError> {
    let entries = args.as_map().ok_or_else(|| MalformedReason::NotAMap {
        found: args.clone(),
    })?;

    let mut field: Option<(&str, &[(Value, Value)])> = None;
    let mut raw_options: Vec<(&str, &Value)> = Vec::new();

    for (key, value) in entries {
        let key_name = key
            .as_name()
            .ok_or_else(|| MalformedReason::NonSymbolKey { key: key.clone() })?;

        match value.as_map() {
            Some(pairs) if !RegistrationOptions::is_key(key_name) => {
                if let Some((first, _)) = field {
                    return Err(MalformedReason::MultipleFields {
                        first: first.to_string(),
                        second: key_name.to_string(),
                    }
                    .into());
                }
                field = Some((key_name, pairs));
            }
            _ => raw_options.push((key_name, value)),
        }
    }

    let (field, pairs) = field.ok_or(MalformedReason::MissingField)?;
    validate_field(field)?;
    let mapping = EnumMapping::from_values(pairs)?;

    if let Some((key, _)) = raw_options
        .iter()
        .find(|(key, _)| !RegistrationOptions::is_key(key))
    {
        return Err(ConfigurationError::UnrecognizedOption {
            key: (*key).to_string(),
        });
    }

    let mut options = RegistrationOptions::new();
    for (key, value) in raw_options {
        let flag = value
            .as_bool()
            .ok_or_else(|| ConfigurationError::InvalidOptionValue {
                key: key.to_string(),
                value: value.clone(),
            })?;
        options.set(key, flag);
    }

    Ok(EnumDeclaration::from_parts(
        field.to_string(),
        mapping,
        options,
    ))
}
