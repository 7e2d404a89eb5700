//! Rule engine: predicates, rule trees and their evaluator.

pub mod check;
pub mod engine;
pub mod rule;

pub use check::Check;
pub use engine::{evaluate, prefix, Outcome};
pub use rule::{Combinator, Key, Rule};
