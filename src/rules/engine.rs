//! Recursive rule evaluator.
//!
//! Reporting is first-violation: a field stops at its first failing check
//! and a rule list stops at its first failing rule, so an `Outcome` lists a
//! representative set of problems rather than all of them.

use serde_json::{Map, Value};

use super::check::{run_chain, Subject};
use super::rule::{Combinator, FieldRule, Key, Rule};
use crate::config::MESSAGE_SEPARATOR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub passed: bool,
    pub errors: Vec<String>,
}

impl Outcome {
    pub fn pass() -> Self {
        Outcome { passed: true, errors: Vec::new() }
    }

    pub fn fail(errors: Vec<String>) -> Self {
        Outcome { passed: false, errors }
    }

    /// Qualifies every message with `context`.
    pub fn prefixed(self, context: &str) -> Self {
        Outcome {
            passed: self.passed,
            errors: self.errors.iter().map(|e| prefix(context, e)).collect(),
        }
    }
}

pub fn prefix(context: &str, message: &str) -> String {
    format!("{context}{MESSAGE_SEPARATOR}{message}")
}

/// A JSON collection rules can be evaluated in.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
}

impl<'a> Scope<'a> {
    pub fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Scope::Object(map)),
            Value::Array(items) => Some(Scope::Array(items)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match self {
            Scope::Object(map) => map.get(key),
            Scope::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        }
    }

    /// Object keys in document order. Arrays expose no keys.
    pub fn keys(self) -> impl Iterator<Item = &'a str> + 'a {
        let map = match self {
            Scope::Object(map) => Some(map),
            Scope::Array(_) => None,
        };
        map.into_iter().flat_map(|m| m.keys().map(String::as_str))
    }

    pub fn values(self) -> Box<dyn Iterator<Item = &'a Value> + 'a> {
        match self {
            Scope::Object(map) => Box::new(map.values()),
            Scope::Array(items) => Box::new(items.iter()),
        }
    }
}

/// Evaluates `rules` against `value` as a short-circuiting conjunction.
pub fn evaluate(rules: &[Rule], value: &Value) -> Outcome {
    evaluate_in(rules, Some(value))
}

fn evaluate_in(rules: &[Rule], value: Option<&Value>) -> Outcome {
    match value.and_then(Scope::of) {
        Some(scope) => evaluate_scope(rules, &scope),
        None => Outcome::fail(vec!["Invalid JSON value".to_string()]),
    }
}

fn evaluate_scope(rules: &[Rule], scope: &Scope<'_>) -> Outcome {
    let mut errors = Vec::new();
    for rule in rules {
        if !evaluate_rule(rule, scope, &mut errors) {
            return Outcome::fail(errors);
        }
    }
    Outcome { passed: true, errors }
}

fn evaluate_rule(rule: &Rule, scope: &Scope<'_>, errors: &mut Vec<String>) -> bool {
    match rule {
        Rule::Field(field) => evaluate_field(field, scope, errors),
        Rule::Combine { kind, children } => evaluate_combinator(*kind, children, scope, errors),
        Rule::Each(children) => {
            for value in scope.values() {
                let outcome = evaluate_in(children, Some(value));
                if !outcome.passed {
                    errors.push("not all children are valid".to_string());
                    errors.extend(outcome.errors);
                    return false;
                }
            }
            true
        }
        Rule::AnyValue(children) => {
            if scope.values().any(|v| evaluate_in(children, Some(v)).passed) {
                return true;
            }
            let outcome = evaluate_scope(children, scope);
            if !outcome.passed {
                let wanted = children.first().map(Rule::summary).unwrap_or_default();
                errors.push(format!("No matching object of {wanted} found."));
                errors.extend(outcome.errors);
            }
            outcome.passed
        }
    }
}

fn evaluate_field(field: &FieldRule, scope: &Scope<'_>, errors: &mut Vec<String>) -> bool {
    let resolved = match &field.key {
        Key::Name(name) => Some(*name),
        Key::Pattern(re) => scope.keys().find(|k| re.is_match(k)),
    };
    let label = resolved.unwrap_or_else(|| field.key.describe());
    let subject = Subject {
        key: &field.key,
        label,
        value: resolved.and_then(|k| scope.get(k)),
        scope,
    };

    if let Err(messages) = run_chain(&field.checks, &subject) {
        errors.extend(messages.iter().map(|m| prefix(label, m)));
        return false;
    }

    // An optional field that is absent has nothing to descend into.
    let Some(value) = subject.value else {
        return true;
    };
    if field.children.is_empty() {
        return true;
    }

    let outcome = evaluate_in(&field.children, Some(value));
    if !outcome.passed {
        errors.extend(outcome.errors.iter().map(|m| prefix(label, m)));
    }
    outcome.passed
}

fn evaluate_combinator(
    kind: Combinator,
    children: &[Rule],
    scope: &Scope<'_>,
    errors: &mut Vec<String>,
) -> bool {
    let mut satisfied = 0;
    let mut nested = Vec::new();
    for child in children {
        let outcome = evaluate_scope(std::slice::from_ref(child), scope);
        if outcome.passed {
            satisfied += 1;
        } else {
            nested.extend(outcome.errors);
        }
    }

    match kind {
        Combinator::AllOf if satisfied == children.len() => true,
        Combinator::AllOf => {
            errors.push("not valid or missing required properties".to_string());
            errors.extend(nested);
            false
        }
        Combinator::Or if satisfied > 0 => true,
        Combinator::Or => {
            errors.push("not valid, it must have at least one of the required properties".to_string());
            errors.extend(nested);
            false
        }
        Combinator::Xor => match satisfied {
            1 => true,
            0 => {
                errors.push("does not contain any valid properties".to_string());
                errors.extend(nested);
                false
            }
            _ => {
                errors.push("must have only one of the properties".to_string());
                false
            }
        },
    }
}
