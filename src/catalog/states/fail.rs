use std::sync::LazyLock;

use crate::catalog::{required_string, type_is};
use crate::rules::Rule;

pub static FAIL: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        type_is("Fail"),
        required_string("Error"),
        required_string("Cause"),
    ]
});
