use crate::utils::error::IntakeError;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use std::collections::{BTreeMap, HashMap};

pub const NOT_PROVIDED: &str = "not provided";

/// 單一請求的原始輸入：查詢參數 + 可選的 body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    query: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RawInput {
    /// Repeated keys are joined with `,` in arrival order, the way the
    /// hosting runtime exposes a multi-valued query key as one string.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query: HashMap<String, String> = HashMap::new();
        for (key, value) in pairs {
            let value = value.into();
            query
                .entry(key.into())
                .and_modify(|existing| {
                    existing.push(',');
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        Self { query, body: None }
    }

    /// Parses a raw `a=1&b=2` query string (no leading `?`).
    pub fn from_query_string(query: &str) -> Self {
        Self::from_query_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    Years(i32),
    NotProvided,
}

impl Age {
    /// Strict base-10 parse; anything that isn't a whole `i32` is `NotProvided`.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|text| text.trim().parse::<i32>().ok())
            .map(Age::Years)
            .unwrap_or(Age::NotProvided)
    }
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Age::Years(years) => serializer.serialize_i32(*years),
            Age::NotProvided => serializer.serialize_str(NOT_PROVIDED),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFields {
    pub name: String,
    pub email: String,
    pub age: Age,
}

/// JSON `age` value kept in textual form: the string content, or the raw
/// token text for any other JSON value (`-0`, `30.5`, `true`, `[30]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeToken {
    Text(String),
    Raw(String),
}

impl AgeToken {
    pub fn as_text(&self) -> &str {
        match self {
            AgeToken::Text(text) | AgeToken::Raw(text) => text,
        }
    }
}

/// Top-level properties of a JSON object body. Values stay undecoded until
/// the resolver asks for one, so a property nobody needs can't fail a field.
#[derive(Debug, Clone, Default)]
pub struct BodyObject {
    properties: BTreeMap<String, Box<RawValue>>,
}

impl BodyObject {
    pub fn new(properties: BTreeMap<String, Box<RawValue>>) -> Self {
        Self { properties }
    }

    /// `Ok(None)` when the property is absent or JSON `null`.
    pub fn text_property(&self, key: &str) -> Result<Option<String>, IntakeError> {
        let Some(raw) = self.properties.get(key) else {
            return Ok(None);
        };

        serde_json::from_str::<Option<String>>(raw.get()).map_err(|_| {
            IntakeError::PropertyTypeError {
                property: key.to_string(),
                kind: json_token_kind(raw.get()),
            }
        })
    }

    /// Any JSON value is accepted; `null` counts as absent.
    pub fn age_property(&self, key: &str) -> Option<AgeToken> {
        let raw = self.properties.get(key)?;
        match serde_json::from_str::<Option<String>>(raw.get()) {
            Ok(text) => text.map(AgeToken::Text),
            Err(_) => Some(AgeToken::Raw(raw.get().to_string())),
        }
    }
}

/// JSON type name of a raw token, judged by its first character.
pub fn json_token_kind(raw: &str) -> &'static str {
    match raw.trim_start().as_bytes().first() {
        Some(b'{') => "object",
        Some(b'[') => "array",
        Some(b'"') => "string",
        Some(b't' | b'f') => "boolean",
        Some(b'n') => "null",
        _ => "number",
    }
}

#[derive(Debug)]
pub enum BodyUnavailable {
    /// No body, or only whitespace.
    Empty,
    Failed(IntakeError),
}

#[derive(Debug)]
pub enum BodyOutcome {
    Parsed(BodyObject),
    Unavailable(BodyUnavailable),
}

impl BodyOutcome {
    pub fn failed(err: impl Into<IntakeError>) -> Self {
        BodyOutcome::Unavailable(BodyUnavailable::Failed(err.into()))
    }
}
