//! Field readers shared by every schema.
//!
//! `Fields` walks a JSON object one field at a time, converting each
//! value to its typed form and recording a message for every field that
//! fails. Required readers return a placeholder on failure so a schema
//! can keep reading; `finish()` turns the collected messages into a
//! `ValidationError`.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use validator::ValidateLength;

use super::email::is_valid_email;
use super::enums::InvalidChoice;
use super::error::ValidationError;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NOT_STRING: &str = "Not a valid string.";
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";
pub const MSG_INVALID_BOOLEAN: &str = "Must be a valid boolean.";
pub const MSG_INVALID_DATETIME: &str = "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";

const TRUE_VALUES: &[&str] = &["true", "True", "TRUE", "t", "T", "yes", "Yes", "YES", "y", "Y", "on", "On", "ON", "1"];
const FALSE_VALUES: &[&str] = &["false", "False", "FALSE", "f", "F", "no", "No", "NO", "n", "N", "off", "Off", "OFF", "0"];

/// Accepted timestamp layouts once RFC 3339 has failed, most specific first.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Name of a JSON value's type, as reported in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse an ISO 8601 timestamp. Seconds and offset are optional; a
/// timestamp without an offset is taken as UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(naive) = raw.strip_suffix(['Z', 'z']) {
        return parse_naive(naive);
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
        .or_else(|| parse_naive(raw))
}

fn parse_naive(raw: &str) -> Option<DateTime<Utc>> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Text of a rejected choice, spelled the way the choice list reports it.
fn choice_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

enum Lookup<'a> {
    Missing,
    Null,
    Present(&'a Value),
}

/// Error-collecting reader over one JSON object.
pub struct Fields<'a> {
    schema: &'static str,
    data: &'a Map<String, Value>,
    errors: ValidationError,
}

impl<'a> Fields<'a> {
    /// Start reading `data` for `schema`. Fails unless `data` is an object.
    pub fn new(schema: &'static str, data: &'a Value) -> Result<Self, ValidationError> {
        match data {
            Value::Object(map) => Ok(Self {
                schema,
                data: map,
                errors: ValidationError::new(),
            }),
            other => {
                tracing::debug!(schema, got = type_name(other), "Payload is not an object");
                Err(ValidationError::non_field(format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    type_name(other)
                )))
            }
        }
    }

    fn lookup(&self, name: &str) -> Lookup<'a> {
        match self.data.get(name) {
            None => Lookup::Missing,
            Some(Value::Null) => Lookup::Null,
            Some(value) => Lookup::Present(value),
        }
    }

    /// Present-or-error: records `required`/`null` messages and returns `None`.
    fn present(&mut self, name: &str, required: bool) -> Option<&'a Value> {
        match self.lookup(name) {
            Lookup::Present(value) => Some(value),
            Lookup::Null => {
                self.errors.add(name, MSG_NULL);
                None
            }
            Lookup::Missing => {
                if required {
                    self.errors.add(name, MSG_REQUIRED);
                }
                None
            }
        }
    }

    fn read_string(&mut self, name: &str, required: bool, min_length: Option<usize>) -> Option<String> {
        let value = self.present(name, required)?;

        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => {
                self.errors.add(name, MSG_NOT_STRING);
                return None;
            }
        };

        if text.is_empty() {
            self.errors.add(name, MSG_BLANK);
            return None;
        }

        if let Some(min) = min_length {
            if !text.validate_length(Some(min as u64), None, None) {
                self.errors.add(
                    name,
                    format!("Ensure this field has at least {min} characters."),
                );
                return None;
            }
        }

        Some(text)
    }

    /// Required, non-blank string.
    pub fn string(&mut self, name: &str) -> String {
        self.read_string(name, true, None).unwrap_or_default()
    }

    /// Required string of at least `min` characters.
    pub fn string_min_length(&mut self, name: &str, min: usize) -> String {
        self.read_string(name, true, Some(min)).unwrap_or_default()
    }

    /// Optional string; absent stays `None`.
    pub fn optional_string(&mut self, name: &str) -> Option<String> {
        self.read_string(name, false, None)
    }

    /// Optional string falling back to `default` when absent.
    pub fn optional_string_or(&mut self, name: &str, default: &str) -> String {
        if matches!(self.lookup(name), Lookup::Missing) {
            return default.to_string();
        }
        self.read_string(name, false, None).unwrap_or_default()
    }

    /// Required email address.
    pub fn email(&mut self, name: &str) -> String {
        let Some(text) = self.read_string(name, true, None) else {
            return String::new();
        };
        if !is_valid_email(&text) {
            self.errors.add(name, MSG_INVALID_EMAIL);
            return String::new();
        }
        text
    }

    /// Choice with a default used when the field is absent.
    pub fn choice<T>(&mut self, name: &str, default: T) -> T
    where
        T: FromStr<Err = InvalidChoice>,
    {
        let Some(value) = self.present(name, false) else {
            return default;
        };

        match choice_text(value).parse::<T>() {
            Ok(choice) => choice,
            Err(err) => {
                self.errors.add(name, err.to_string());
                default
            }
        }
    }

    /// Boolean with a default used when the field is absent.
    pub fn boolean(&mut self, name: &str, default: bool) -> bool {
        let Some(value) = self.present(name, false) else {
            return default;
        };

        let parsed = match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_i64() {
                Some(1) => Some(true),
                Some(0) => Some(false),
                _ => None,
            },
            Value::String(s) if TRUE_VALUES.contains(&s.as_str()) => Some(true),
            Value::String(s) if FALSE_VALUES.contains(&s.as_str()) => Some(false),
            _ => None,
        };

        parsed.unwrap_or_else(|| {
            self.errors.add(name, MSG_INVALID_BOOLEAN);
            default
        })
    }

    /// Optional list of opaque values.
    pub fn optional_list(&mut self, name: &str) -> Option<Vec<Value>> {
        match self.present(name, false)? {
            Value::Array(items) => Some(items.clone()),
            other => {
                self.errors.add(
                    name,
                    format!(
                        "Expected a list of items but got type \"{}\".",
                        type_name(other)
                    ),
                );
                None
            }
        }
    }

    /// Optional opaque JSON value (anything but `null`).
    pub fn optional_json(&mut self, name: &str) -> Option<Value> {
        self.present(name, false).cloned()
    }

    /// Required ISO 8601 timestamp, normalized to UTC.
    pub fn datetime(&mut self, name: &str) -> DateTime<Utc> {
        let Some(value) = self.present(name, true) else {
            return DateTime::<Utc>::default();
        };

        match value.as_str().and_then(parse_datetime) {
            Some(parsed) => parsed,
            None => {
                self.errors.add(name, MSG_INVALID_DATETIME);
                DateTime::<Utc>::default()
            }
        }
    }

    /// Finish reading. Fails with every collected field error.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        tracing::debug!(
            schema = self.schema,
            fields = ?self.errors.field_names(),
            "Validation failed"
        );
        Err(self.errors)
    }
}
