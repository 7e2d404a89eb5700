//! Choice state: a list of conditional branches plus an optional default.
//!
//! A condition is `Variable` (a reference path) and exactly one operator.
//! Static operators compare against a literal; `...Path` operators compare
//! against another reference path. Conditions may be wrapped in `And`/`Or`
//! lists or a single `Not`.

use std::sync::LazyLock;

use crate::catalog::{key_pattern, optional_string, required_string, type_is};
use crate::rules::{Check, Rule};

pub const COMPARISON_OPERATORS: &[&str] = &[
    "StringEquals",
    "StringLessThan",
    "StringGreaterThan",
    "StringLessThanEquals",
    "StringGreaterThanEquals",
    "NumericEquals",
    "NumericLessThan",
    "NumericGreaterThan",
    "NumericLessThanEquals",
    "NumericGreaterThanEquals",
    "BooleanEquals",
    "TimestampEquals",
    "TimestampLessThan",
    "TimestampGreaterThan",
    "TimestampLessThanEquals",
    "TimestampGreaterThanEquals",
    "IsPresent",
    "IsNull",
];

pub const PATH_COMPARISON_OPERATORS: &[&str] = &[
    "StringEqualsPath",
    "NumericEqualsPath",
    "NumericLessThanPath",
    "NumericGreaterThanPath",
    "NumericLessThanEqualsPath",
    "NumericGreaterThanEqualsPath",
    "BooleanEqualsPath",
];

pub static CHOICE: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        type_is("Choice"),
        optional_string("Comment"),
        Rule::field("Next", [Check::Forbidden]),
        Rule::field("End", [Check::Forbidden]),
        Rule::object(
            "Choices",
            [Check::IsArray, Check::MinChildren(1)],
            vec![Rule::each(vec![
                required_string("Next"),
                Rule::xor(vec![
                    Rule::object(
                        "And",
                        [Check::IsArray, Check::NotEmpty, Check::MinChildren(1)],
                        vec![Rule::each(comparison())],
                    ),
                    Rule::object(
                        "Or",
                        [Check::IsArray, Check::NotEmpty, Check::MinChildren(1)],
                        vec![Rule::each(comparison())],
                    ),
                    Rule::object("Not", [Check::IsObject, Check::NotEmpty], comparison()),
                    Rule::all_of(comparison()),
                ]),
            ])],
        ),
        Rule::field(
            "Default",
            [Check::optional([Check::IsString, Check::NotEmpty])],
        ),
    ]
});

/// `Variable` plus exactly one static or path operator.
fn comparison() -> Vec<Rule> {
    vec![
        Rule::field(
            "Variable",
            [Check::IsString, Check::NotEmpty, Check::ReferencePath],
        ),
        Rule::xor(vec![
            Rule::pattern(
                key_pattern(&exact_keys(COMPARISON_OPERATORS)),
                [Check::scalar(), Check::NotReferencePath],
            ),
            Rule::pattern(
                key_pattern(&exact_keys(PATH_COMPARISON_OPERATORS)),
                [Check::scalar(), Check::NotEmpty, Check::ReferencePath],
            ),
        ]),
    ]
}

fn exact_keys(keys: &[&str]) -> String {
    format!("^(?:{})$", keys.join("|"))
}
