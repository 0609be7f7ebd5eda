use std::time::Instant;

use super::transitions::{StageTransition, TransitionError};
use super::types::Stage;

/// Records the stage of a single run.
#[derive(Debug)]
pub struct StageTracker {
    current: Stage,
    entered_at: Instant,
    history: Vec<Stage>,
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            current: Stage::Idle,
            entered_at: Instant::now(),
            history: vec![Stage::Idle],
        }
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    pub fn advance(&mut self, to: Stage) -> Result<(), TransitionError> {
        StageTransition::validate(self.current, to)?;
        tracing::debug!(
            from = %self.current,
            to = %to,
            elapsed_ms = self.entered_at.elapsed().as_millis() as u64,
            "stage transition"
        );
        self.current = to;
        self.entered_at = Instant::now();
        self.history.push(to);
        Ok(())
    }

    /// Like [`advance`](Self::advance), but an invalid transition is only logged.
    pub fn enter(&mut self, to: Stage) {
        if let Err(e) = self.advance(to) {
            tracing::error!(error = %e, "unexpected stage transition");
        }
    }

    /// Move to `Aborted` unless the run already reached a terminal stage.
    pub fn abort(&mut self) {
        if !StageTransition::is_terminal(self.current) {
            let _ = self.advance(Stage::Aborted);
        }
    }

    pub fn is_terminal(&self) -> bool {
        StageTransition::is_terminal(self.current)
    }
}
