//! Linear walk of a scope, recursing into branches and Map iterators.

use std::cell::Cell;

use indexmap::IndexMap;
use tracing::debug;

use super::path::{DEFAULT_BRANCH, SourceState, StatePath, TargetState};
use super::transitions::TransitionGraph;
use crate::config::GraphOptions;
use crate::error::GraphError;
use crate::parse::types::{FlowDefinition, State};

pub(crate) struct Walker<'a> {
    options: &'a GraphOptions,
    /// Edges emitted so far, nested ones included.
    emitted: Cell<usize>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(options: &'a GraphOptions) -> Self {
        Walker { options, emitted: Cell::new(0) }
    }

    /// Check a scope's transitions, then walk it from its start state.
    pub(crate) fn scope(&self, definition: &FlowDefinition, depth: usize) -> Result<Vec<StatePath>, GraphError> {
        let transitions = TransitionGraph::build(definition)?;
        transitions.check_acyclic()?;
        self.walk(&definition.states, &definition.start_at, depth)
    }

    /// Edges in discovery order, starting at `start`. A Choice ends the
    /// linear walk; its branches are walked as nested paths.
    fn walk(
        &self,
        states: &IndexMap<String, State>,
        start: &str,
        depth: usize,
    ) -> Result<Vec<StatePath>, GraphError> {
        if depth > self.options.max_depth {
            return Err(GraphError::DepthExceeded(self.options.max_depth));
        }

        let mut paths = Vec::new();
        let mut current = Some(start);
        while let Some(name) = current {
            let Some(state) = states.get(name) else {
                break;
            };
            let source = SourceState::new(name, state.state_type());

            match state {
                State::Map(map) => {
                    debug!(state = %name, "walking iterator");
                    let children = self.scope(&map.iterator, depth + 1)?;
                    let target = successor(states, name, state)?;
                    self.emit(&mut paths, StatePath(source.with_children(children), target))?;
                }
                State::Choice(choice) => {
                    if let Some(default) = &choice.default {
                        let path = self.branch(states, source.clone(), DEFAULT_BRANCH, default, depth)?;
                        self.emit(&mut paths, path)?;
                    }
                    for (index, rule) in choice.choices.iter().enumerate() {
                        let path = self.branch(states, source.clone(), index as i64, &rule.next, depth)?;
                        self.emit(&mut paths, path)?;
                    }
                    break;
                }
                _ if state.is_terminal() => {
                    self.emit(&mut paths, StatePath(source, TargetState::end()))?;
                    break;
                }
                _ => {
                    let target = successor(states, name, state)?;
                    self.emit(&mut paths, StatePath(source.clone(), target))?;
                    for (index, catcher) in state.catchers().iter().enumerate() {
                        let path = self.branch(states, source.clone(), index as i64, &catcher.next, depth)?;
                        self.emit(&mut paths, path)?;
                    }
                }
            }
            current = state.next();
        }
        Ok(paths)
    }

    fn emit(&self, paths: &mut Vec<StatePath>, path: StatePath) -> Result<(), GraphError> {
        let emitted = self.emitted.get() + 1;
        if emitted > self.options.max_paths {
            return Err(GraphError::PathLimitExceeded(self.options.max_paths));
        }
        self.emitted.set(emitted);
        paths.push(path);
        Ok(())
    }

    fn branch(
        &self,
        states: &IndexMap<String, State>,
        source: SourceState,
        branch_id: i64,
        target: &str,
        depth: usize,
    ) -> Result<StatePath, GraphError> {
        let target_state = lookup(states, &source.name, target)?;
        let children = self.walk(states, target, depth + 1)?;
        Ok(StatePath(
            source.branch(branch_id, children),
            TargetState::new(target, target_state.state_type()),
        ))
    }
}

/// `Next` of a state, or the End node when the state ends its scope.
fn successor(states: &IndexMap<String, State>, name: &str, state: &State) -> Result<TargetState, GraphError> {
    if state.is_terminal() {
        return Ok(TargetState::end());
    }
    let next = state
        .next()
        .ok_or_else(|| GraphError::MissingTransition(name.to_string()))?;
    let next_state = lookup(states, name, next)?;
    Ok(TargetState::new(next, next_state.state_type()))
}

fn lookup<'s>(states: &'s IndexMap<String, State>, from: &str, target: &str) -> Result<&'s State, GraphError> {
    states.get(target).ok_or_else(|| GraphError::UnknownState {
        from: from.to_string(),
        target: target.to_string(),
    })
}
