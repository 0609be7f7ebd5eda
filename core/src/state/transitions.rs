use super::types::Stage;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition from {from:?} to {to:?}")]
    InvalidTransition { from: Stage, to: Stage },
    #[error("Cannot transition from terminal state {state:?}")]
    FromTerminalState { state: Stage },
}

pub struct StageTransition;

impl StageTransition {
    pub fn validate(from: Stage, to: Stage) -> Result<(), TransitionError> {
        if Self::is_terminal(from) {
            return Err(TransitionError::FromTerminalState { state: from });
        }

        let is_valid = match (from, to) {
            (Stage::Idle, Stage::Capturing) => true,

            // Byte counter decides which branch is taken.
            (Stage::Capturing, Stage::Executing) => true,
            (Stage::Capturing, Stage::SkippedEmpty) => true,

            (Stage::Executing, Stage::Relaying) => true,
            (Stage::Relaying, Stage::Done) => true,

            // An empty payload finishes without running anything.
            (Stage::SkippedEmpty, Stage::Done) => true,

            (_, Stage::Aborted) => true,

            _ => false,
        };

        if is_valid {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition { from, to })
        }
    }

    pub fn is_terminal(stage: Stage) -> bool {
        matches!(stage, Stage::Done | Stage::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(StageTransition::validate(Stage::Idle, Stage::Capturing).is_ok());
        assert!(StageTransition::validate(Stage::Capturing, Stage::Executing).is_ok());
        assert!(StageTransition::validate(Stage::Capturing, Stage::SkippedEmpty).is_ok());
        assert!(StageTransition::validate(Stage::Executing, Stage::Relaying).is_ok());
        assert!(StageTransition::validate(Stage::Relaying, Stage::Done).is_ok());
        assert!(StageTransition::validate(Stage::SkippedEmpty, Stage::Done).is_ok());
    }

    #[test]
    fn test_any_live_stage_can_abort() {
        for from in [
            Stage::Idle,
            Stage::Capturing,
            Stage::Executing,
            Stage::SkippedEmpty,
            Stage::Relaying,
        ] {
            assert!(StageTransition::validate(from, Stage::Aborted).is_ok());
        }
    }

    #[test]
    fn test_invalid_transitions() {
        assert_eq!(
            StageTransition::validate(Stage::Idle, Stage::Relaying),
            Err(TransitionError::InvalidTransition {
                from: Stage::Idle,
                to: Stage::Relaying
            })
        );
        assert!(StageTransition::validate(Stage::SkippedEmpty, Stage::Executing).is_err());
        assert!(StageTransition::validate(Stage::Relaying, Stage::Capturing).is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(StageTransition::is_terminal(Stage::Done));
        assert!(StageTransition::is_terminal(Stage::Aborted));
        assert!(!StageTransition::is_terminal(Stage::Relaying));
        assert_eq!(
            StageTransition::validate(Stage::Done, Stage::Aborted),
            Err(TransitionError::FromTerminalState { state: Stage::Done })
        );
    }
}
