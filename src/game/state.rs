/// Running -> GameOver on collision, GameOver -> Running on restart
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Running,
    GameOver,
}

/// State every entity may touch during a frame. Handed out as `&mut` by the
/// world instead of living in globals.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GameState {
    score: u32,
    phase: Phase,
}

impl GameState {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn add_point(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    pub fn end(&mut self) {
        if self.phase == Phase::Running {
            log::info!("game over with score {}", self.score);
        }
        self.phase = Phase::GameOver;
    }

    pub fn reset(&mut self) {
        *self = GameState::default();
    }
}
