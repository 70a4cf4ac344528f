use super::frame::{AssetId, Frame, RenderCommand};
use super::state::GameState;
use crate::config::{EnemyConfig, SpawnerConfig};
use crate::engine::{Point, Rect};
use crate::sprite::Animation;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Enemy {
    config: EnemyConfig,
    position: Point,
    animation: Animation,
    marked_for_deletion: bool,
}

impl Enemy {
    /// New enemy standing on its ground line at `x`
    pub fn spawn_at(config: &EnemyConfig, x: f64) -> Self {
        Enemy {
            position: Point {
                x,
                y: config.ground - config.size.height,
            },
            animation: Animation::new(config.fps, config.max_frame),
            marked_for_deletion: false,
            config: config.clone(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn frame(&self) -> u8 {
        self.animation.frame()
    }

    pub fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.position, self.config.size)
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.push(RenderCommand::DrawImage {
            asset: AssetId::Enemy,
            source: Some(self.animation.source_rect(self.config.size, 0)),
            destination: self.bounding_box(),
        });
    }

    /// Walks left; once fully past the left edge the enemy marks itself and
    /// the player earns the point for dodging it
    pub fn update(&mut self, delta: f64, state: &mut GameState) {
        self.animation.update(delta);
        self.position.x -= self.config.speed;

        if !self.marked_for_deletion && self.position.x < -self.config.size.width {
            self.marked_for_deletion = true;
            state.add_point();
        }
    }
}

/// Owns the live enemies and decides when the next one walks in
#[derive(Debug, Clone)]
pub struct EnemySpawner {
    enemy: EnemyConfig,
    config: SpawnerConfig,
    spawn_x: f64,
    timer: f64,
    jitter: f64,
    enemies: Vec<Enemy>,
}

impl EnemySpawner {
    /// Enemies enter at `spawn_x`, the right edge of the playfield
    pub fn new(
        enemy: &EnemyConfig,
        config: &SpawnerConfig,
        spawn_x: f64,
        rng: &mut impl Rng,
    ) -> Self {
        EnemySpawner {
            enemy: enemy.clone(),
            jitter: sample_jitter(config, rng),
            config: config.clone(),
            spawn_x,
            timer: 0.0,
            enemies: Vec::new(),
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Time that has to pass before the next spawn
    pub fn threshold(&self) -> f64 {
        self.config.base_interval_ms + self.jitter
    }

    /// ::update per frame
    /// - spawn timer -> maybe one new enemy at the right edge
    /// - every enemy draws, then moves
    /// - enemies that left the screen are dropped
    pub fn update(
        &mut self,
        delta: f64,
        state: &mut GameState,
        frame: &mut Frame,
        rng: &mut impl Rng,
    ) {
        if self.timer > self.threshold() {
            self.enemies
                .push(Enemy::spawn_at(&self.enemy, self.spawn_x));
            log::debug!("spawned enemy, {} active", self.enemies.len());
            self.jitter = sample_jitter(&self.config, rng);
            self.timer = 0.0;
        } else {
            self.timer += delta;
        }

        for enemy in self.enemies.iter_mut() {
            enemy.draw(frame);
            enemy.update(delta, state);
        }

        self.enemies.retain(|enemy| !enemy.is_marked_for_deletion());
    }

    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.enemies.clear();
        self.timer = 0.0;
        self.jitter = sample_jitter(&self.config, rng);
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }
}

fn sample_jitter(config: &SpawnerConfig, rng: &mut impl Rng) -> f64 {
    if config.jitter_max_ms > config.jitter_min_ms {
        rng.gen_range(config.jitter_min_ms..config.jitter_max_ms)
    } else {
        config.jitter_min_ms
    }
}
