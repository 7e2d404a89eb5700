//! Predicate library: atomic checks run against one field of a JSON object.
//!
//! Every check sees the same `Subject` (resolved key, value, enclosing scope)
//! and either passes or returns the messages describing why it did not.

use serde_json::Value;

use super::engine::Scope;
use super::rule::Key;
use crate::config::REFERENCE_PATH_PREFIX;

/// The field a check is applied to.
pub struct Subject<'a> {
    pub key: &'a Key,
    /// Resolved key, or the key description when nothing matched.
    pub label: &'a str,
    /// `None` when the key is absent or did not resolve.
    pub value: Option<&'a Value>,
    pub scope: &'a Scope<'a>,
}

#[derive(Debug, Clone)]
pub enum Check {
    IsString,
    IsNumber,
    IsBoolean,
    IsObject,
    IsArray,
    /// Trimmed strings, collections by count. Numbers and booleans are never empty.
    NotEmpty,
    /// Characters for strings, elements for arrays and objects.
    MaxSize(usize),
    Within { min: f64, max: f64 },
    Equals(Value),
    OneOf(&'static [&'static str]),
    /// Exactly one key of the enclosing object matches the rule's key.
    MatchesOnce,
    MinChildren(usize),
    /// Every element of an array is a string.
    StringItems,
    GreaterThan(f64),
    ReferencePath,
    NotReferencePath,
    Absent,
    Forbidden,
    /// Passes when any chain passes; each chain runs in order and stops at
    /// its first failure.
    AnyOf(Vec<Vec<Check>>),
}

impl Check {
    /// "absent, or present and satisfying `chain`".
    pub fn optional(chain: impl Into<Vec<Check>>) -> Check {
        Check::AnyOf(vec![vec![Check::Absent], chain.into()])
    }

    /// String, number or boolean.
    pub fn scalar() -> Check {
        Check::AnyOf(vec![
            vec![Check::IsString],
            vec![Check::IsNumber],
            vec![Check::IsBoolean],
        ])
    }

    pub fn apply(&self, subject: &Subject<'_>) -> Result<(), Vec<String>> {
        let label = subject.label;
        let value = subject.value;
        match self {
            Check::IsString => verdict(matches!(value, Some(Value::String(_))), || {
                format!("{label} is not a string")
            }),
            Check::IsNumber => verdict(matches!(value, Some(Value::Number(_))), || {
                format!("{label} is not a number")
            }),
            Check::IsBoolean => verdict(matches!(value, Some(Value::Bool(_))), || {
                format!("{label} is not a boolean")
            }),
            Check::IsObject => verdict(matches!(value, Some(Value::Object(_))), || {
                format!("{label} is not an object")
            }),
            Check::IsArray => verdict(matches!(value, Some(Value::Array(_))), || {
                format!("{label} is not an array")
            }),
            Check::NotEmpty => {
                let filled = match value {
                    Some(Value::String(s)) => !s.trim().is_empty(),
                    Some(Value::Array(items)) => !items.is_empty(),
                    Some(Value::Object(map)) => !map.is_empty(),
                    Some(Value::Number(_)) | Some(Value::Bool(_)) => true,
                    Some(Value::Null) | None => false,
                };
                verdict(filled, || format!("{label} is empty"))
            }
            Check::MaxSize(max) => {
                let max = *max;
                let (fits, message) = match value {
                    Some(Value::Array(items)) => (items.len() <= max, elements(label, max)),
                    Some(Value::Object(map)) => (map.len() <= max, elements(label, max)),
                    Some(Value::String(s)) => (s.chars().count() <= max, characters(label, max)),
                    _ => (false, characters(label, max)),
                };
                verdict(fits, || message)
            }
            Check::Within { min, max } => {
                let inside = value
                    .and_then(Value::as_f64)
                    .is_some_and(|n| n >= *min && n <= *max);
                verdict(inside, || {
                    format!("{label} must be within the range of {min} and {max}.")
                })
            }
            Check::Equals(expected) => verdict(value == Some(expected), || {
                format!("Invalid value. {label} must be {}", display_value(expected))
            }),
            Check::OneOf(options) => {
                let known = value
                    .and_then(Value::as_str)
                    .is_some_and(|v| options.iter().any(|o| *o == v));
                verdict(known, || {
                    format!("Unknown value. {label} must be one of {}", options.join(", "))
                })
            }
            Check::MatchesOnce => {
                let matches = match subject.key {
                    Key::Pattern(re) => subject.scope.keys().filter(|k| re.is_match(k)).count(),
                    Key::Name(name) => usize::from(subject.scope.get(name).is_some()),
                };
                match matches {
                    1 => Ok(()),
                    0 => Err(vec![format!(
                        "One of the keys must match pattern {}",
                        subject.key.describe()
                    )]),
                    _ => Err(vec![format!(
                        "Duplicate key found matching pattern {}",
                        subject.key.describe()
                    )]),
                }
            }
            Check::MinChildren(min) => {
                let count = match value {
                    Some(Value::Array(items)) => items.len(),
                    Some(Value::Object(map)) => map.len(),
                    _ => 0,
                };
                verdict(count >= *min, || {
                    format!(
                        "{label} must have at least {min} {}",
                        if *min == 1 { "child" } else { "children" }
                    )
                })
            }
            Check::StringItems => {
                let strings = value
                    .and_then(Value::as_array)
                    .is_some_and(|items| items.iter().all(Value::is_string));
                verdict(strings, || format!("{label} must only contain strings"))
            }
            Check::GreaterThan(bound) => {
                let above = value.and_then(Value::as_f64).is_some_and(|n| n > *bound);
                verdict(above, || format!("{label} must be greater than {bound}"))
            }
            Check::ReferencePath => verdict(is_reference_path(value), || {
                format!("Value of {label} must be a reference path")
            }),
            Check::NotReferencePath => verdict(!is_reference_path(value), || {
                format!("Value of {label} must be static and not a reference path")
            }),
            Check::Absent => verdict(value.is_none(), || {
                format!("Optional attribute {label} is present")
            }),
            Check::Forbidden => verdict(value.is_none(), || format!("{label} is not allowed")),
            Check::AnyOf(chains) => {
                let mut errors = Vec::new();
                for chain in chains {
                    match run_chain(chain, subject) {
                        Ok(()) => return Ok(()),
                        Err(messages) => errors.extend(messages),
                    }
                }
                Err(errors)
            }
        }
    }
}

/// Runs `checks` in order and stops at the first one that fails.
pub fn run_chain(checks: &[Check], subject: &Subject<'_>) -> Result<(), Vec<String>> {
    for check in checks {
        check.apply(subject)?;
    }
    Ok(())
}

/// Only strings can be reference paths.
pub fn is_reference_path(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| s.starts_with(REFERENCE_PATH_PREFIX))
}

/// Strings render bare, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn verdict(ok: bool, message: impl FnOnce() -> String) -> Result<(), Vec<String>> {
    if ok { Ok(()) } else { Err(vec![message()]) }
}

fn elements(label: &str, max: usize) -> String {
    let unit = if max == 1 { "element" } else { "elements" };
    format!("{label} must not have more than {max} {unit}.")
}

fn characters(label: &str, max: usize) -> String {
    let unit = if max == 1 { "character" } else { "characters" };
    format!("{label} must not be more than {max} {unit}.")
}
