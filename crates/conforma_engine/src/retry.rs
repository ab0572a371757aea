//! Retry controller state machine.

use conforma_core::RetryPolicy;
use std::time::Duration;

/// States of one retry session.
///
/// `Idle → Attempting → (Accepted | Retrying | Exhausted)`; `Retrying`
/// re-enters `Attempting` with adjusted sampling parameters. `Accepted` and
/// `Exhausted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum RetryState {
    /// No attempt made yet.
    Idle,
    /// A generation call is in flight or being validated.
    Attempting,
    /// Last attempt failed; another attempt is budgeted.
    Retrying,
    /// Validator accepted the last attempt's output.
    Accepted,
    /// Attempt budget spent without an accepted output.
    Exhausted,
}

impl RetryState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RetryState::Accepted | RetryState::Exhausted)
    }
}

/// Drives repeated attempts for one unit of work.
///
/// Created at the start of one `generate()` call and destroyed when it
/// returns; sessions are never shared across calls.
#[derive(Debug)]
pub struct RetrySession {
    policy: RetryPolicy,
    attempt: usize,
    state: RetryState,
}

impl RetrySession {
    /// Create an idle session for the given policy.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempt: 0,
            state: RetryState::Idle,
        }
    }

    /// Enter `Attempting` and return the 1-based attempt number.
    ///
    /// # Panics
    ///
    /// Panics if called from a terminal state or while already attempting;
    /// that is a defect in the driving loop, not a runtime condition.
    pub fn begin_attempt(&mut self) -> usize {
        assert!(
            matches!(self.state, RetryState::Idle | RetryState::Retrying),
            "begin_attempt from {}",
            self.state
        );
        self.attempt += 1;
        self.state = RetryState::Attempting;
        self.attempt
    }

    /// Record an accepted attempt. Terminal.
    pub fn record_accepted(&mut self) {
        assert_eq!(self.state, RetryState::Attempting);
        self.state = RetryState::Accepted;
    }

    /// Record a rejected or failed attempt.
    ///
    /// Transitions to `Retrying` while budget remains, `Exhausted` otherwise;
    /// returns the new state so the driving loop can branch on it.
    pub fn record_rejected(&mut self) -> RetryState {
        assert_eq!(self.state, RetryState::Attempting);
        self.state = if self.attempt < self.policy.max_attempts {
            RetryState::Retrying
        } else {
            RetryState::Exhausted
        };
        self.state
    }

    /// Attempts made so far.
    pub fn attempts(&self) -> usize {
        self.attempt
    }

    /// Current state.
    pub fn state(&self) -> RetryState {
        self.state
    }

    /// Fixed wait before the next attempt.
    pub fn wait_interval(&self) -> Duration {
        self.policy.wait_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: usize) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            wait_interval: Duration::from_millis(10),
        }
    }

    #[test]
    fn accepts_on_first_attempt() {
        let mut session = RetrySession::new(policy(3));
        assert_eq!(session.state(), RetryState::Idle);

        assert_eq!(session.begin_attempt(), 1);
        assert_eq!(session.state(), RetryState::Attempting);

        session.record_accepted();
        assert_eq!(session.state(), RetryState::Accepted);
        assert!(session.state().is_terminal());
    }

    #[test]
    fn rejection_with_budget_left_enters_retrying() {
        let mut session = RetrySession::new(policy(3));
        session.begin_attempt();
        assert_eq!(session.record_rejected(), RetryState::Retrying);
        assert!(!session.state().is_terminal());
    }

    #[test]
    fn exhausts_exactly_at_the_budget() {
        let mut session = RetrySession::new(policy(2));

        session.begin_attempt();
        assert_eq!(session.record_rejected(), RetryState::Retrying);

        session.begin_attempt();
        assert_eq!(session.record_rejected(), RetryState::Exhausted);
        assert_eq!(session.attempts(), 2);
    }

    #[test]
    #[should_panic(expected = "begin_attempt")]
    fn attempting_past_exhaustion_is_a_defect() {
        let mut session = RetrySession::new(policy(1));
        session.begin_attempt();
        session.record_rejected();
        session.begin_attempt();
    }
}
