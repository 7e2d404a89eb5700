use std::sync::LazyLock;

use crate::catalog::{next_or_end, required_string, type_is};
use crate::rules::{Check, Rule};

pub static PASS: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        type_is("Pass"),
        Rule::field("Result", [Check::optional([Check::IsObject])]),
        required_string("ResultPath"),
        next_or_end(),
    ]
});
