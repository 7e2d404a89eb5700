//! Declarative rule trees.

use regex::Regex;

use super::check::{display_value, Check};

/// How a field rule picks its key out of the enclosing object.
#[derive(Debug, Clone)]
pub enum Key {
    Name(&'static str),
    /// First key (in document order) the pattern matches.
    Pattern(Regex),
}

impl Key {
    pub fn describe(&self) -> &str {
        match self {
            Key::Name(name) => name,
            Key::Pattern(re) => re.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    AllOf,
    Or,
    Xor,
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    pub key: Key,
    pub checks: Vec<Check>,
    /// Evaluated against the field's value once all checks pass and the
    /// field is present.
    pub children: Vec<Rule>,
}

#[derive(Debug, Clone)]
pub enum Rule {
    Field(FieldRule),
    /// Every child is evaluated against the same value as the combinator.
    Combine { kind: Combinator, children: Vec<Rule> },
    /// The children must hold for every value of the current collection.
    Each(Vec<Rule>),
    /// Some value of the current collection must satisfy the children.
    AnyValue(Vec<Rule>),
}

impl Rule {
    pub fn field(name: &'static str, checks: impl Into<Vec<Check>>) -> Self {
        Rule::Field(FieldRule {
            key: Key::Name(name),
            checks: checks.into(),
            children: Vec::new(),
        })
    }

    pub fn pattern(pattern: Regex, checks: impl Into<Vec<Check>>) -> Self {
        Rule::Field(FieldRule {
            key: Key::Pattern(pattern),
            checks: checks.into(),
            children: Vec::new(),
        })
    }

    pub fn object(name: &'static str, checks: impl Into<Vec<Check>>, children: Vec<Rule>) -> Self {
        Rule::Field(FieldRule {
            key: Key::Name(name),
            checks: checks.into(),
            children,
        })
    }

    pub fn all_of(children: Vec<Rule>) -> Self {
        Rule::Combine { kind: Combinator::AllOf, children }
    }

    pub fn or(children: Vec<Rule>) -> Self {
        Rule::Combine { kind: Combinator::Or, children }
    }

    pub fn xor(children: Vec<Rule>) -> Self {
        Rule::Combine { kind: Combinator::Xor, children }
    }

    pub fn each(children: Vec<Rule>) -> Self {
        Rule::Each(children)
    }

    pub fn any_value(children: Vec<Rule>) -> Self {
        Rule::AnyValue(children)
    }

    /// Short description used when an `AnyValue` rule finds no match,
    /// e.g. `type => ZIS::Flow`.
    pub fn summary(&self) -> String {
        match self {
            Rule::Field(field) => {
                let expected = field.checks.iter().find_map(|c| match c {
                    Check::Equals(v) => Some(display_value(v)),
                    _ => None,
                });
                match expected {
                    Some(v) => format!("{} => {}", field.key.describe(), v),
                    None => field.key.describe().to_string(),
                }
            }
            Rule::Combine { kind, .. } => format!("{kind:?}"),
            Rule::Each(_) => "All".to_string(),
            Rule::AnyValue(_) => "Any".to_string(),
        }
    }
}
