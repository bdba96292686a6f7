use serde::{
    Deserialize, Deserializer,
    de::{self, MapAccess, SeqAccess, Visitor},
};
use std::fmt::{self, Display};

///
/// Value
///
/// Loosely-typed value used wherever the registrar meets untyped data:
/// raw field storage, setter input, getter output, and loose registration
/// arguments.
///
/// Null   → the absence value; a field with nothing stored.
/// Symbol → a symbolic name; what getters return and setters expect.
/// Text   → a plain string; accepted anywhere a symbolic name is.
///
/// Deserializes from any self-describing format: object keys become
/// symbols and every entry is kept, repeated keys included.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Symbol(String),
    /// Ordered list; order and duplicates are significant.
    List(Vec<Self>),
    /// Ordered key/value pairs; insertion order is preserved.
    Map(Vec<(Self, Self)>),
}

impl Value {
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    #[must_use]
    pub fn symbols<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(names.into_iter().map(Self::symbol).collect())
    }

    #[must_use]
    pub fn ints(codes: impl IntoIterator<Item = i64>) -> Self {
        Self::List(codes.into_iter().map(Self::Int).collect())
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Name carried by a `Symbol` or `Text` value.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) | Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&[(Self, Self)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Short label for the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Symbol(_) => "symbol",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Convert a JSON document; object keys become symbols.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(v) => Self::Bool(*v),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            serde_json::Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .iter()
                    .map(|(k, v)| (Self::symbol(k.as_str()), Self::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Symbol(s) => write!(f, ":{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k} => {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a null, boolean, number, string, list or map")
    }

    fn visit_unit<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Int(v))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E>(self, v: u64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Text(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }

        Ok(Value::List(items))
    }

    // every pair is pushed; validation decides what a repeated key means
    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            entries.push((Value::Symbol(key), value));
        }

        Ok(Value::Map(entries))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Self::from_json(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_objects_keep_key_order_and_symbolize_keys() {
        let value = Value::from_json(&json!({ "state": { "abc": 1 } }));
        let entries = value.as_map().expect("object converts to a map");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, Value::symbol("state"));
        assert_eq!(
            entries[0].1,
            Value::Map(vec![(Value::symbol("abc"), Value::Int(1))])
        );
    }

    #[test]
    fn json_fractional_numbers_are_not_ints() {
        assert_eq!(Value::from_json(&json!(1.5)).as_int(), None);
        assert_eq!(Value::from_json(&json!(7)).as_int(), Some(7));
    }

    #[test]
    fn deserializing_json_text_keeps_repeated_keys() {
        let value: Value = serde_json::from_str(r#"{ "state": { "foo": 1, "foo": 2 } }"#).unwrap();

        assert_eq!(
            value,
            Value::Map(vec![(
                Value::symbol("state"),
                Value::Map(vec![
                    (Value::symbol("foo"), Value::Int(1)),
                    (Value::symbol("foo"), Value::Int(2)),
                ]),
            )])
        );
    }

    #[test]
    fn deserializing_json_text_matches_the_document_conversion() {
        let src = r#"{ "b": [true, null, -3, 1.5, "x"], "a": 18446744073709551615 }"#;
        let parsed: Value = serde_json::from_str(src).unwrap();
        let converted = Value::from_json(&serde_json::from_str(src).unwrap());

        assert_eq!(parsed, converted);
        assert!(matches!(parsed.as_map().unwrap()[1].1, Value::Float(_)));
    }

    #[test]
    fn names_come_from_symbols_and_text_only() {
        assert_eq!(Value::symbol("abc").as_name(), Some("abc"));
        assert_eq!(Value::from("abc").as_name(), Some("abc"));
        assert_eq!(Value::Int(1).as_name(), None);
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(Value::symbols(["abc", "def"]).to_string(), "[:abc, :def]");
        assert_eq!(Value::from(None::<i64>).to_string(), "null");
    }
}
