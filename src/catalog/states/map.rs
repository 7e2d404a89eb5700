//! Map state shape. The iterator's own states are validated recursively by
//! `validate::states` after this catalog passes.

use std::sync::LazyLock;

use crate::catalog::{catch, next_or_end, required_string, type_is};
use crate::rules::{Check, Rule};

pub static MAP: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        type_is("Map"),
        Rule::field(
            "InputPath",
            [Check::optional([Check::IsString, Check::NotEmpty])],
        ),
        required_string("ItemsPath"),
        Rule::object(
            "Iterator",
            [Check::IsObject, Check::MinChildren(2)],
            vec![
                required_string("StartAt"),
                Rule::field("States", [Check::IsObject, Check::MinChildren(1)]),
            ],
        ),
        required_string("ResultPath"),
        next_or_end(),
        catch(),
    ]
});
