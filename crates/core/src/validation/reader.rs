//! Typed field extraction from an untyped JSON object.
//!
//! Each accessor records a [`FieldError`] for a missing or wrongly typed
//! field and returns `None`; the schema then skips rule checks for that field.

use serde_json::{Map, Value};

use super::errors::FieldError;

const REQUIRED: &str = "Required";

pub(crate) struct FieldReader<'a> {
    input: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(input: &'a Map<String, Value>) -> Self {
        Self {
            input,
            errors: Vec::new(),
        }
    }

    pub(crate) fn required_string(&mut self, field: &str) -> Option<&'a str> {
        match self.input.get(field) {
            None => self.fail(field, REQUIRED),
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => self.fail(field, expected("string", other)),
        }
    }

    /// Absent and `null` both mean "not provided".
    pub(crate) fn optional_string(&mut self, field: &str) -> Option<&'a str> {
        match self.input.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => self.fail(field, expected("string", other)),
        }
    }

    /// Any whole number is an integer, however it is written (`2020.0`).
    /// Whole values outside `i64` saturate so the caller's range rules
    /// report them.
    pub(crate) fn integer(&mut self, field: &str) -> Option<i64> {
        match self.input.get(field) {
            None => self.fail(field, REQUIRED),
            Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Some(i),
                (None, Some(f)) if f.fract() == 0.0 => Some(f as i64),
                _ => self.fail(field, "Expected integer, received float"),
            },
            Some(other) => self.fail(field, expected("number", other)),
        }
    }

    pub(crate) fn number(&mut self, field: &str) -> Option<f64> {
        match self.input.get(field) {
            None => self.fail(field, REQUIRED),
            Some(Value::Number(n)) => n.as_f64(),
            Some(other) => self.fail(field, expected("number", other)),
        }
    }

    /// `default` applies only when the key is entirely absent.
    pub(crate) fn boolean(&mut self, field: &str, default: Option<bool>) -> Option<bool> {
        match (self.input.get(field), default) {
            (None, Some(d)) => Some(d),
            (None, None) => self.fail(field, REQUIRED),
            (Some(Value::Bool(b)), _) => Some(*b),
            (Some(other), _) => self.fail(field, expected("boolean", other)),
        }
    }

    /// A string that must be one of `allowed`, resolved through `parse`.
    pub(crate) fn one_of<E>(
        &mut self,
        field: &str,
        allowed: &[&str],
        parse: fn(&str) -> Option<E>,
    ) -> Option<E> {
        let raw = self.required_string(field)?;
        match parse(raw) {
            Some(v) => Some(v),
            None => {
                let options = allowed
                    .iter()
                    .map(|a| format!("'{a}'"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                self.fail(
                    field,
                    format!("Invalid enum value. Expected {options}, received '{raw}'"),
                )
            }
        }
    }

    pub(crate) fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.path == field)
    }

    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub(crate) fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    fn fail<T>(&mut self, field: &str, message: impl Into<String>) -> Option<T> {
        self.push(field, message);
        None
    }
}

fn expected(kind: &str, received: &Value) -> String {
    format!("Expected {kind}, received {}", json_type(received))
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
