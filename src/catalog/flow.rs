//! Flow resource shape. The states themselves are checked by
//! `validate::states` once this catalog passes.

use std::sync::LazyLock;

use serde_json::json;

use super::required_string;
use crate::parse::types::FLOW_TYPE;
use crate::rules::{Check, Rule};

pub static FLOW: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::field("type", [Check::Equals(json!(FLOW_TYPE))]),
        Rule::object(
            "properties",
            [Check::IsObject],
            vec![
                Rule::field("name", [Check::IsString, Check::NotEmpty, Check::MaxSize(50)]),
                Rule::object(
                    "definition",
                    [Check::IsObject],
                    vec![
                        required_string("StartAt"),
                        Rule::field("States", [Check::IsObject, Check::NotEmpty]),
                    ],
                ),
            ],
        ),
    ]
});
