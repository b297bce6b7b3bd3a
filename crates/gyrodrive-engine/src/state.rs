//! Game lifecycle state machine
//!
//! The transition table is pure: it names the next state and leaves the
//! side effects (session reset, score commit) to [`crate::Game`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GameState {
    #[default]
    MainMenu,
    Calibrating,
    Playing,
    GameOver,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::MainMenu => write!(f, "MainMenu"),
            GameState::Calibrating => write!(f, "Calibrating"),
            GameState::Playing => write!(f, "Playing"),
            GameState::GameOver => write!(f, "GameOver"),
        }
    }
}

/// Edge-triggered user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Start,
    Retry,
    Quit,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Start => write!(f, "start"),
            Trigger::Retry => write!(f, "retry"),
            Trigger::Quit => write!(f, "quit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown trigger '{0}', expected start, retry or quit")]
pub struct ParseTriggerError(pub String);

impl FromStr for Trigger {
    type Err = ParseTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Trigger::Start),
            "retry" => Ok(Trigger::Retry),
            "quit" => Ok(Trigger::Quit),
            _ => Err(ParseTriggerError(s.trim().to_string())),
        }
    }
}

/// What caused a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransitionCause {
    Start,
    Retry,
    CalibrationComplete,
    Collision,
    Disconnected,
}

impl fmt::Display for TransitionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionCause::Start => write!(f, "start"),
            TransitionCause::Retry => write!(f, "retry"),
            TransitionCause::CalibrationComplete => write!(f, "calibration complete"),
            TransitionCause::Collision => write!(f, "collision"),
            TransitionCause::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// A state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: GameState,
    pub to: GameState,
    pub cause: TransitionCause,
}

/// Result of an accepted trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The game moves to a new state
    Transition(Transition),
    /// The process should end; the game state is left as is
    Quit,
}

/// A trigger that is not valid in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    #[error("Trigger '{trigger}' is not allowed in state {state}")]
    NotAllowed { trigger: Trigger, state: GameState },
}

impl GameState {
    /// Apply a user trigger.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::NotAllowed`] for any trigger the state does
    /// not accept. The state is unchanged in that case.
    pub fn on_trigger(self, trigger: Trigger) -> Result<TriggerOutcome, TriggerError> {
        let (to, cause) = match (self, trigger) {
            (_, Trigger::Quit) => return Ok(TriggerOutcome::Quit),
            (GameState::MainMenu, Trigger::Start) => {
                (GameState::Calibrating, TransitionCause::Start)
            }
            (GameState::GameOver, Trigger::Retry) => {
                (GameState::Calibrating, TransitionCause::Retry)
            }
            (state, trigger) => return Err(TriggerError::NotAllowed { trigger, state }),
        };
        Ok(TriggerOutcome::Transition(Transition {
            from: self,
            to,
            cause,
        }))
    }

    /// Calibration closed.
    pub fn on_calibration_complete(self) -> Option<Transition> {
        match self {
            GameState::Calibrating => Some(
                self.transition_to(GameState::Playing, TransitionCause::CalibrationComplete),
            ),
            _ => None,
        }
    }

    /// The car hit an obstacle.
    pub fn on_collision(self) -> Option<Transition> {
        match self {
            GameState::Playing => {
                Some(self.transition_to(GameState::GameOver, TransitionCause::Collision))
            }
            _ => None,
        }
    }

    /// The telemetry link closed. Only active states fall back to the menu.
    pub fn on_disconnect(self) -> Option<Transition> {
        match self {
            GameState::Calibrating | GameState::Playing => {
                Some(self.transition_to(GameState::MainMenu, TransitionCause::Disconnected))
            }
            GameState::MainMenu | GameState::GameOver => None,
        }
    }

    /// True while telemetry drives the game.
    pub fn consumes_telemetry(self) -> bool {
        matches!(self, GameState::Calibrating | GameState::Playing)
    }

    fn transition_to(self, to: GameState, cause: TransitionCause) -> Transition {
        Transition {
            from: self,
            to,
            cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [GameState; 4] = [
        GameState::MainMenu,
        GameState::Calibrating,
        GameState::Playing,
        GameState::GameOver,
    ];

    #[test]
    fn test_start_only_from_main_menu() {
        for state in ALL_STATES {
            let result = state.on_trigger(Trigger::Start);
            if state == GameState::MainMenu {
                assert!(matches!(
                    result,
                    Ok(TriggerOutcome::Transition(Transition {
                        to: GameState::Calibrating,
                        cause: TransitionCause::Start,
                        ..
                    }))
                ));
            } else {
                assert_eq!(
                    result,
                    Err(TriggerError::NotAllowed {
                        trigger: Trigger::Start,
                        state
                    })
                );
            }
        }
    }

    #[test]
    fn test_retry_only_from_game_over() {
        for state in ALL_STATES {
            let result = state.on_trigger(Trigger::Retry);
            assert_eq!(result.is_ok(), state == GameState::GameOver, "state {state}");
        }
    }

    #[test]
    fn test_quit_from_any_state() {
        for state in ALL_STATES {
            assert_eq!(state.on_trigger(Trigger::Quit), Ok(TriggerOutcome::Quit));
        }
    }

    #[test]
    fn test_automatic_transitions() {
        assert_eq!(
            GameState::Calibrating.on_calibration_complete().map(|t| t.to),
            Some(GameState::Playing)
        );
        assert_eq!(GameState::MainMenu.on_calibration_complete(), None);
        assert_eq!(
            GameState::Playing.on_collision().map(|t| t.to),
            Some(GameState::GameOver)
        );
        assert_eq!(GameState::Calibrating.on_collision(), None);
    }

    #[test]
    fn test_disconnect_only_from_active_states() {
        assert_eq!(
            GameState::Playing.on_disconnect().map(|t| t.to),
            Some(GameState::MainMenu)
        );
        assert_eq!(
            GameState::Calibrating.on_disconnect().map(|t| t.to),
            Some(GameState::MainMenu)
        );
        assert_eq!(GameState::MainMenu.on_disconnect(), None);
        assert_eq!(GameState::GameOver.on_disconnect(), None);
    }

    #[test]
    fn test_trigger_parsing() {
        assert_eq!("start".parse::<Trigger>(), Ok(Trigger::Start));
        assert_eq!("  RETRY\n".parse::<Trigger>(), Ok(Trigger::Retry));
        assert_eq!("Quit".parse::<Trigger>(), Ok(Trigger::Quit));
        assert_eq!(
            "jump".parse::<Trigger>(),
            Err(ParseTriggerError("jump".to_string()))
        );
    }

    #[test]
    fn test_not_allowed_message() {
        let err = GameState::Playing.on_trigger(Trigger::Retry);
        let Err(err) = err else {
            panic!("retry must be rejected while playing");
        };
        assert_eq!(
            err.to_string(),
            "Trigger 'retry' is not allowed in state Playing"
        );
    }
}
