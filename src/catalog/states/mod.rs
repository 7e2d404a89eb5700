//! One catalog per state type.

pub mod action;
pub mod choice;
pub mod fail;
pub mod map;
pub mod pass;
pub mod succeed;
pub mod wait;

use crate::parse::types::StateType;
use crate::rules::Rule;

/// Rules shared by every state of `state_type`. Action states add a
/// parameters catalog chosen by `action::ActionKind`; Map states also
/// validate their iterator's states.
pub fn catalog(state_type: StateType) -> &'static [Rule] {
    match state_type {
        StateType::Action => action::ACTION.as_slice(),
        StateType::Choice => choice::CHOICE.as_slice(),
        StateType::Fail => fail::FAIL.as_slice(),
        StateType::Map => map::MAP.as_slice(),
        StateType::Pass => pass::PASS.as_slice(),
        StateType::Succeed => succeed::SUCCEED.as_slice(),
        StateType::Wait => wait::WAIT.as_slice(),
    }
}
