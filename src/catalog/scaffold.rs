//! Outer bundle shape: template version, name, description, resources.

use std::sync::LazyLock;

use serde_json::json;

use crate::config::SUPPORTED_TEMPLATE_VERSION;
use crate::parse::types::{FLOW_TYPE, JOB_SPEC_TYPE};
use crate::rules::{Check, Rule};

pub static SCAFFOLD: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::field(
            "zis_template_version",
            [
                Check::IsString,
                Check::NotEmpty,
                Check::OneOf(&[SUPPORTED_TEMPLATE_VERSION]),
            ],
        ),
        Rule::field("name", [Check::IsString, Check::NotEmpty, Check::MaxSize(50)]),
        Rule::field(
            "description",
            [Check::optional([Check::IsString, Check::MaxSize(100)])],
        ),
        Rule::object(
            "resources",
            [Check::IsObject, Check::MinChildren(2)],
            vec![
                Rule::each(vec![Rule::field(
                    "type",
                    [Check::IsString, Check::OneOf(&[JOB_SPEC_TYPE, FLOW_TYPE])],
                )]),
                Rule::any_value(vec![Rule::field("type", [Check::Equals(json!(JOB_SPEC_TYPE))])]),
                Rule::any_value(vec![Rule::field("type", [Check::Equals(json!(FLOW_TYPE))])]),
            ],
        ),
    ]
});
