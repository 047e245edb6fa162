//! `validate_payload` command: check a JSON payload against a schema.
//!
//! Usage: `validate_payload <schema> [file]` — reads stdin when no file
//! is given. Exit codes: 0 valid, 1 invalid payload, 2 usage or I/O error.

use std::io::Read;
use std::path::Path;

use crate::schemas::{validate_named, SCHEMA_NAMES};

pub const EXIT_VALID: u8 = 0;
pub const EXIT_INVALID: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

/// Result of one CLI run: exit code plus text for stdout or stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub code: u8,
    pub stdout: String,
    pub stderr: String,
}

impl Outcome {
    fn ok(stdout: String) -> Self {
        Self {
            code: EXIT_VALID,
            stdout,
            stderr: String::new(),
        }
    }

    fn fail(code: u8, stderr: String) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr,
        }
    }
}

pub fn usage() -> String {
    format!(
        "usage: validate_payload <schema> [file]\n  schemas: {}",
        SCHEMA_NAMES.join(", ")
    )
}

/// Run with `args` (program name excluded), reading stdin from `input`.
pub fn run<R: Read>(args: &[String], mut input: R) -> Outcome {
    let (schema, file) = match args {
        [schema] => (schema.as_str(), None),
        [schema, file] => (schema.as_str(), Some(file.as_str())),
        _ => return Outcome::fail(EXIT_USAGE, usage()),
    };

    let raw = match file {
        Some(path) => match std::fs::read_to_string(Path::new(path)) {
            Ok(text) => text,
            Err(e) => return Outcome::fail(EXIT_USAGE, format!("Cannot read {path}: {e}")),
        },
        None => {
            let mut text = String::new();
            if let Err(e) = input.read_to_string(&mut text) {
                return Outcome::fail(EXIT_USAGE, format!("Cannot read stdin: {e}"));
            }
            text
        }
    };

    let data: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => return Outcome::fail(EXIT_INVALID, format!("Malformed JSON: {e}")),
    };

    let Some(result) = validate_named(schema, &data) else {
        return Outcome::fail(
            EXIT_USAGE,
            format!("Unknown schema \"{schema}\"\n{}", usage()),
        );
    };

    match result {
        Ok(representation) => Outcome::ok(pretty(&representation)),
        Err(errors) => {
            tracing::debug!(schema, fields = ?errors.field_names(), "Payload rejected");
            Outcome::fail(EXIT_INVALID, pretty(&errors))
        }
    }
}

fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unprintable: {e}>"))
}
