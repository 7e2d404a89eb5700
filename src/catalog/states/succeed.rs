use std::sync::LazyLock;

use crate::catalog::{optional_string, type_is};
use crate::rules::Rule;

pub static SUCCEED: LazyLock<Vec<Rule>> =
    LazyLock::new(|| vec![type_is("Succeed"), optional_string("Message")]);
