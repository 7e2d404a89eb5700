//! Action state and its `Parameters` sub-schemas.
//!
//! `ActionName` selects the parameters catalog: built-in actions
//! (`zis:common:action:<Name>`), the jq transform (`zis:common:transform:Jq`)
//! or a generic HTTP action (`zis:<integration>:action:<Name>`).

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{catch, key_pattern, next_or_end, optional_string, required_string, type_is};
use crate::error::UnsupportedAction;
use crate::rules::{Check, Rule};

static BUILT_IN_ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| key_pattern(r"^zis:common:action:(.+)$"));
static TRANSFORM_ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| key_pattern(r"^zis:common:transform:Jq$"));
static HTTP_ACTION_RE: LazyLock<Regex> = LazyLock::new(|| key_pattern(r"^zis:[^:]+:action:.+$"));

pub static ACTION: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        type_is("Action"),
        required_string("ActionName"),
        required_string("ResultPath"),
        optional_string("Comment"),
        next_or_end(),
        catch(),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltInAction {
    LoadConfig,
    PatchConfig,
    LoadLinks,
    CreateLink,
    DeleteLink,
    PatchLink,
}

impl BuiltInAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "LoadConfig" => Some(BuiltInAction::LoadConfig),
            "PatchConfig" => Some(BuiltInAction::PatchConfig),
            "LoadLinks" => Some(BuiltInAction::LoadLinks),
            "CreateLink" => Some(BuiltInAction::CreateLink),
            "DeleteLink" => Some(BuiltInAction::DeleteLink),
            "PatchLink" => Some(BuiltInAction::PatchLink),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    BuiltIn(BuiltInAction),
    Transform,
    Http,
}

impl ActionKind {
    /// Families are tried in order: built-in, transform, HTTP. A name in the
    /// built-in family with an unknown built-in does not fall through.
    pub fn resolve(action_name: &str) -> Result<Self, UnsupportedAction> {
        if let Some(captures) = BUILT_IN_ACTION_RE.captures(action_name) {
            return BuiltInAction::from_name(&captures[1])
                .map(ActionKind::BuiltIn)
                .ok_or_else(|| UnsupportedAction(action_name.to_string()));
        }
        if TRANSFORM_ACTION_RE.is_match(action_name) {
            return Ok(ActionKind::Transform);
        }
        if HTTP_ACTION_RE.is_match(action_name) {
            return Ok(ActionKind::Http);
        }
        Err(UnsupportedAction(action_name.to_string()))
    }

    pub fn parameters(&self) -> &'static [Rule] {
        match self {
            ActionKind::BuiltIn(BuiltInAction::LoadConfig) => LOAD_CONFIG.as_slice(),
            ActionKind::BuiltIn(BuiltInAction::PatchConfig) => PATCH_CONFIG.as_slice(),
            ActionKind::BuiltIn(BuiltInAction::LoadLinks) => LOAD_LINKS.as_slice(),
            ActionKind::BuiltIn(BuiltInAction::CreateLink) => CREATE_LINK.as_slice(),
            ActionKind::BuiltIn(BuiltInAction::DeleteLink) => DELETE_LINK.as_slice(),
            ActionKind::BuiltIn(BuiltInAction::PatchLink) => PATCH_LINK.as_slice(),
            ActionKind::Transform => TRANSFORM.as_slice(),
            ActionKind::Http => HTTP.as_slice(),
        }
    }
}

/// A parameter key that may also be given in its `<key>.$` reference form.
fn dynamic_key(key: &str) -> Regex {
    key_pattern(&format!(r"^{key}(\.\$)?$"))
}

fn required_param(key: &str) -> Rule {
    Rule::pattern(
        dynamic_key(key),
        [Check::MatchesOnce, Check::IsString, Check::NotEmpty],
    )
}

fn optional_param(key: &str) -> Rule {
    Rule::pattern(
        dynamic_key(key),
        [Check::optional([Check::MatchesOnce, Check::IsString, Check::NotEmpty])],
    )
}

fn parameters(min_children: usize, children: Vec<Rule>) -> Vec<Rule> {
    vec![Rule::object(
        "Parameters",
        [Check::IsObject, Check::MinChildren(min_children)],
        children,
    )]
}

/// `left_object` / `right_object`: a named object with optional metadata.
fn link_object(name: &'static str) -> Rule {
    Rule::object(
        name,
        [Check::IsObject, Check::NotEmpty],
        vec![
            required_param("name"),
            Rule::field("metadata", [Check::optional([Check::IsObject])]),
        ],
    )
}

static LOAD_CONFIG: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    parameters(
        1,
        vec![Rule::pattern(
            dynamic_key("scope"),
            [Check::MatchesOnce, Check::NotEmpty],
        )],
    )
});

static PATCH_CONFIG: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    parameters(
        2,
        vec![
            required_param("scope"),
            Rule::field("config", [Check::IsObject, Check::NotEmpty]),
        ],
    )
});

static LOAD_LINKS: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    parameters(
        2,
        vec![
            required_param("link_type"),
            Rule::or(vec![
                required_param("left_object_name"),
                required_param("right_object_name"),
            ]),
            Rule::pattern(
                dynamic_key("page_size"),
                [Check::optional([
                    Check::IsNumber,
                    Check::Within { min: 1.0, max: 100.0 },
                ])],
            ),
            optional_param("page_after_cursor"),
            optional_param("page_before_cursor"),
        ],
    )
});

static CREATE_LINK: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    parameters(
        3,
        vec![
            required_param("link_type"),
            link_object("left_object"),
            link_object("right_object"),
        ],
    )
});

static DELETE_LINK: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    parameters(
        3,
        vec![
            required_param("link_type"),
            required_param("left_object_name"),
            required_param("right_object_name"),
        ],
    )
});

static PATCH_LINK: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    parameters(
        3,
        vec![
            required_param("link_type"),
            required_param("left_object_name"),
            optional_param("right_object_name"),
            Rule::or(vec![link_object("left_object"), link_object("right_object")]),
        ],
    )
});

static TRANSFORM: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    parameters(2, vec![required_string("expr"), required_param("data")])
});

static HTTP: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![Rule::field(
        "Parameters",
        [Check::optional([Check::IsObject])],
    )]
});
