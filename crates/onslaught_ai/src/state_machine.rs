//! Behavioural state and change tracking
//!
//! Perception decides the target state each tick. The machine only records
//! it and reports an actual change, so callers run entry/exit side effects
//! once per transition rather than once per tick.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Behavioural state of a hostile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgentState {
    /// Player undetected; hold position
    #[default]
    Idle,
    /// Moving toward the player
    Chasing,
    /// Stationary, facing and firing at the player
    Shooting,
}

/// A change of state reported by [`StateMachine::transition_to`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange<S> {
    pub from: S,
    pub to: S,
}

/// Current state of one agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateMachine<S> {
    current: S,
}

impl<S: Copy + Eq + Debug> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> S {
        self.current
    }

    /// Move to `to`. Returns the change, or `None` when already there.
    pub fn transition_to(&mut self, to: S) -> Option<StateChange<S>> {
        if to == self.current {
            return None;
        }
        let from = std::mem::replace(&mut self.current, to);
        Some(StateChange { from, to })
    }
}

impl<S: Copy + Eq + Debug + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_reported_once() {
        let mut fsm = StateMachine::new(AgentState::Idle);

        assert_eq!(
            fsm.transition_to(AgentState::Chasing),
            Some(StateChange {
                from: AgentState::Idle,
                to: AgentState::Chasing,
            })
        );
        assert_eq!(fsm.transition_to(AgentState::Chasing), None);
        assert_eq!(fsm.current(), AgentState::Chasing);
    }

    #[test]
    fn test_any_state_reachable_directly() {
        let mut fsm = StateMachine::<AgentState>::default();

        let change = fsm.transition_to(AgentState::Shooting).unwrap();
        assert_eq!(change.from, AgentState::Idle);

        let change = fsm.transition_to(AgentState::Idle).unwrap();
        assert_eq!(change.from, AgentState::Shooting);
        assert_eq!(fsm.current(), AgentState::Idle);
    }
}
