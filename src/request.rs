//! Typed view of an inbound report request.
//!
//! Payloads come from scanners that are not strict about types, so once the required top-level
//! keys are present every field is decoded leniently: `null` becomes an empty string, scalars
//! are printed with their JSON text and missing or mistyped parts default to empty.  The order of
//! JSON objects is preserved (`serde_json` is built with `preserve_order`), which fixes the
//! order of findings rows and app-info rows.

use std::collections::HashMap;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{MalformedFindingError, RequestError};

/// Locale used when a request does not name one.
pub const DEFAULT_LANG: &str = "zh-TW";

/// A validated report request.
#[derive(Clone, Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default = "default_lang", deserialize_with = "lenient_string")]
    pub lang: String,
    #[serde(deserialize_with = "lenient_string")]
    pub system: String,
    #[serde(rename = "rule")]
    pub rules: OrderedMap<RuleDef>,
    pub result: ReportResult,
}

fn default_lang() -> String {
    DEFAULT_LANG.to_owned()
}

impl ReportRequest {
    /// Validates the required top-level keys of `value`, applies the default locale and
    /// decodes the request.
    pub fn from_value(mut value: Value) -> Result<Self, RequestError> {
        let object = value.as_object_mut().ok_or(RequestError::NotAnObject)?;

        if !object.contains_key("system") {
            return Err(RequestError::MissingSystem);
        }
        if !object.contains_key("rule") {
            return Err(RequestError::MissingRule);
        }
        if !object.contains_key("result") {
            return Err(RequestError::MissingResult);
        }
        if !object.contains_key("lang") {
            object.insert("lang".to_owned(), Value::String(default_lang()));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Parses and validates a request from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }
}

/// Static metadata of a rule in the catalog.
///
/// An entry that is not an object decodes as a rule with empty fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleDef {
    pub title: String,
    /// Pipe-delimited MSTG test references.
    pub real_mstg: String,
    /// Pipe-delimited MASVS control identifiers.
    pub mas: String,
    /// Pipe-delimited OWASP Mobile Top 10 entries.
    pub owasp_mobile: String,
    pub desc: String,
}

impl RuleDef {
    fn from_json(value: &Value) -> Self {
        let field = |name: &str| value.get(name).map(display_value).unwrap_or_default();
        Self {
            title: field("title"),
            real_mstg: field("real_mstg"),
            mas: field("mas"),
            owasp_mobile: field("owasp_mobile"),
            desc: field("desc"),
        }
    }
}

impl<'de> Deserialize<'de> for RuleDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_json(&Value::deserialize(deserializer)?))
    }
}

/// Scan outcome: reserved keys plus free-form app information.
///
/// A `result` that is not an object decodes as an empty result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportResult {
    pub url_list: Vec<String>,
    pub mast_report: HashMap<String, Finding>,
    /// Every non-reserved key of `result`, in input order.
    pub app_info: Vec<(String, String)>,
}

impl<'de> Deserialize<'de> for ReportResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Object(object) = Value::deserialize(deserializer)? else {
            return Ok(Self::default());
        };

        let mut result = Self::default();
        for (key, value) in object {
            match key.as_str() {
                "url_list" => result.url_list = lenient_list(value),
                "mast_report" => result.mast_report = lenient_findings(value),
                _ => result.app_info.push((key, display_value(&value))),
            }
        }
        Ok(result)
    }
}

/// Per-rule scan result.
///
/// A finding that is not an object decodes as passed without data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Finding {
    pub is_detected: bool,
    pub data: Vec<Value>,
}

impl Finding {
    fn from_json(value: &Value) -> Self {
        Self {
            is_detected: value.get("isDetected").map_or(false, is_truthy),
            data: match value.get("data") {
                Some(Value::Array(items)) => items.clone(),
                _ => Vec::new(),
            },
        }
    }

    /// Returns the first detail entry, if any.
    ///
    /// Only the first entry is shown in the report; long cells do not paginate well.
    pub fn first_detail(&self) -> Option<Result<DetailItem, MalformedFindingError>> {
        self.data.first().map(DetailItem::from_entry)
    }
}

impl<'de> Deserialize<'de> for Finding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_json(&Value::deserialize(deserializer)?))
    }
}

/// Supporting evidence attached to a finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailItem {
    pub details: String,
    pub description: String,
}

impl DetailItem {
    /// Reads a `{details, description}` entry.
    pub fn from_entry(entry: &Value) -> Result<Self, MalformedFindingError> {
        let field = |name: &'static str| {
            entry
                .get(name)
                .map(display_value)
                .ok_or(MalformedFindingError { field: name })
        };
        Ok(Self {
            details: field("details")?,
            description: field("description")?,
        })
    }
}

/// A JSON object decoded into a list of entries that keeps the input order.
///
/// Anything other than an object decodes as an empty map.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderedMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> OrderedMap<T> {
    /// Returns whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }
}

impl<'de, T> Deserialize<'de> for OrderedMap<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Object(object) = Value::deserialize(deserializer)? else {
            return Ok(Self::default());
        };

        let entries = object
            .into_iter()
            .map(|(key, value)| {
                serde_json::from_value(value)
                    .map(|decoded| (key, decoded))
                    .map_err(de::Error::custom)
            })
            .collect::<Result<_, D::Error>>()?;
        Ok(Self { entries })
    }
}

/// Renders a JSON value the way it appears in the report.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lenient_list(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(display_value).collect(),
        Value::Null => Vec::new(),
        other => vec![display_value(&other)],
    }
}

fn lenient_findings(value: Value) -> HashMap<String, Finding> {
    match value {
        Value::Object(object) => object
            .iter()
            .map(|(rule_id, finding)| (rule_id.clone(), Finding::from_json(finding)))
            .collect(),
        _ => HashMap::new(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(display_value(&value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(false, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
