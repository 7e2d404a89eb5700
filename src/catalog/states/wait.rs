use std::sync::LazyLock;

use crate::catalog::{next_or_end, required_string, type_is};
use crate::rules::{Check, Rule};

pub static WAIT: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        type_is("Wait"),
        Rule::xor(vec![
            Rule::field("Seconds", [Check::IsNumber, Check::GreaterThan(0.0)]),
            required_string("SecondsPath"),
        ]),
        next_or_end(),
    ]
});
