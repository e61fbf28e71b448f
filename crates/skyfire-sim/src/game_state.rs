//! Top-level game mode switch.
//!
//! `Start → Playing → GameOver → Start`. Simulated time only runs while
//! playing. A trigger that does not apply to the current state is ignored.

use skyfire_core::enums::GameState;

#[derive(Debug, Clone, Default)]
pub struct GameStateMachine {
    state: GameState,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Multiplier applied to the host's frame delta.
    pub fn time_scale(&self) -> f64 {
        match self.state {
            GameState::Playing => 1.0,
            GameState::Start | GameState::GameOver => 0.0,
        }
    }

    /// `Start → Playing`. Returns whether the transition happened.
    pub fn start(&mut self) -> bool {
        self.transition(GameState::Start, GameState::Playing)
    }

    /// `Playing → GameOver`.
    pub fn hero_died(&mut self) -> bool {
        self.transition(GameState::Playing, GameState::GameOver)
    }

    /// `GameOver → Start`. The caller reinitialises the session when this
    /// returns true.
    pub fn restart(&mut self) -> bool {
        self.transition(GameState::GameOver, GameState::Start)
    }

    fn transition(&mut self, from: GameState, to: GameState) -> bool {
        if self.state != from {
            tracing::debug!(state = ?self.state, wanted = ?to, "ignored state trigger");
            return false;
        }
        self.state = to;
        tracing::info!(?from, ?to, "game state changed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_frozen() {
        let fsm = GameStateMachine::new();
        assert_eq!(fsm.state(), GameState::Start);
        assert_eq!(fsm.time_scale(), 0.0);
    }

    #[test]
    fn test_full_cycle() {
        let mut fsm = GameStateMachine::new();
        assert!(fsm.start());
        assert_eq!(fsm.state(), GameState::Playing);
        assert_eq!(fsm.time_scale(), 1.0);

        assert!(fsm.hero_died());
        assert_eq!(fsm.state(), GameState::GameOver);
        assert_eq!(fsm.time_scale(), 0.0);

        assert!(fsm.restart());
        assert_eq!(fsm.state(), GameState::Start);
        assert_eq!(fsm.time_scale(), 0.0);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut fsm = GameStateMachine::new();
        assert!(!fsm.restart());
        assert_eq!(fsm.state(), GameState::Start);

        fsm.start();
        assert!(!fsm.restart());
        assert_eq!(fsm.state(), GameState::Playing);
    }

    #[test]
    fn test_start_only_from_start() {
        let mut fsm = GameStateMachine::new();
        fsm.start();
        assert!(!fsm.start());
        assert_eq!(fsm.state(), GameState::Playing);

        fsm.hero_died();
        assert!(!fsm.start());
        assert_eq!(fsm.state(), GameState::GameOver);
    }

    #[test]
    fn test_hero_died_only_while_playing() {
        let mut fsm = GameStateMachine::new();
        assert!(!fsm.hero_died());
        assert_eq!(fsm.state(), GameState::Start);

        fsm.start();
        fsm.hero_died();
        assert!(!fsm.hero_died());
        assert_eq!(fsm.state(), GameState::GameOver);
    }
}
