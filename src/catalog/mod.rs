//! Static rule catalogs, built once on first use and shared read-only.

pub mod flow;
pub mod job_spec;
pub mod scaffold;
pub mod states;

use regex::Regex;
use serde_json::json;

use crate::rules::{Check, Rule};

pub use flow::FLOW;
pub use job_spec::JOB_SPEC;
pub use scaffold::SCAFFOLD;

/// Compile a catalog key pattern. Patterns are literals in this module tree.
pub(crate) fn key_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).expect("catalog key patterns are valid regexes")
}

pub(crate) fn required_string(name: &'static str) -> Rule {
    Rule::field(name, [Check::IsString, Check::NotEmpty])
}

pub(crate) fn optional_string(name: &'static str) -> Rule {
    Rule::field(name, [Check::optional([Check::IsString])])
}

pub(crate) fn type_is(state_type: &'static str) -> Rule {
    Rule::field("Type", [Check::Equals(json!(state_type))])
}

/// Exactly one of `Next` or `End: true`.
pub(crate) fn next_or_end() -> Rule {
    Rule::xor(vec![
        required_string("Next"),
        Rule::field("End", [Check::IsBoolean, Check::Equals(json!(true))]),
    ])
}

/// Optional, non-empty `Catch` list whose entries each name a `Next`.
pub(crate) fn catch() -> Rule {
    Rule::object(
        "Catch",
        [Check::optional([Check::IsArray, Check::MinChildren(1)])],
        vec![Rule::each(vec![
            Rule::field(
                "ErrorEquals",
                [Check::optional([
                    Check::IsArray,
                    Check::MinChildren(1),
                    Check::StringItems,
                ])],
            ),
            required_string("Next"),
        ])],
    )
}
