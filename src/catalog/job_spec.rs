use std::sync::LazyLock;

use serde_json::json;

use super::required_string;
use crate::parse::types::JOB_SPEC_TYPE;
use crate::rules::{Check, Rule};

pub static JOB_SPEC: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::field("type", [Check::Equals(json!(JOB_SPEC_TYPE))]),
        Rule::object(
            "properties",
            [Check::IsObject],
            vec![
                Rule::field("name", [Check::IsString, Check::NotEmpty, Check::MaxSize(50)]),
                required_string("event_source"),
                required_string("event_type"),
                Rule::field(
                    "flow_name",
                    [Check::IsString, Check::NotEmpty, Check::MaxSize(100)],
                ),
            ],
        ),
    ]
});
