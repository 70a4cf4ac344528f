use super::background::Background;
use super::enemy::{Enemy, EnemySpawner};
use super::frame::{Frame, RenderCommand};
use super::hud;
use super::player::Player;
use super::state::GameState;
use crate::config::GameConfig;
use crate::engine::input::{Direction, InputState, KeyPress};
use crate::engine::{Point, Rect};
use rand::rngs::StdRng;

/// Everything the outside world can tell the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Press(Direction),
    Release(Direction),
    Restart,
}

impl Command {
    /// Keys that are not movement keys produce no command
    pub fn from_key_press(key: &KeyPress) -> Option<Command> {
        match key {
            KeyPress::KeyDown(key) => Direction::from_key(key).map(Command::Press),
            KeyPress::KeyUp(key) => Direction::from_key(key).map(Command::Release),
        }
    }
}

/// TABLE
/// ┌──────────────────────── World::tick ─────────────────────────────┐
/// │  1. clear the canvas                                             │
/// │  2. background : draw -> scroll                                  │
/// │  3. player     : draw -> collide (last frame's enemies) -> move  │
/// │  4. enemies    : maybe spawn -> each draw -> move -> cull        │
/// │  5. hud        : score, game over overlay                        │
/// └──────────────────────────────────────────────────────────────────┘
/// The returned frame is a plain list of draw calls; nothing here touches
/// the browser.
pub struct World {
    config: GameConfig,
    state: GameState,
    input: InputState,
    player: Player,
    background: Background,
    spawner: EnemySpawner,
    rng: StdRng,
}

impl World {
    pub fn new(config: GameConfig, mut rng: StdRng) -> Self {
        let canvas = config.canvas;
        World {
            state: GameState::default(),
            input: InputState::default(),
            player: Player::new(&config.player, canvas.width),
            background: Background::new(&config.background, canvas),
            spawner: EnemySpawner::new(&config.enemy, &config.spawner, canvas.width, &mut rng),
            rng,
            config,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.spawner.enemies()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Press(direction) => self.input.press(direction),
            Command::Release(direction) => self.input.release(direction),
            Command::Restart => self.restart(),
        }
    }

    /// Advances one frame of `delta` milliseconds and returns what to paint.
    /// Once the game is over the world stays frozen and only repaints.
    pub fn tick(&mut self, delta: f64) -> Frame {
        if self.state.is_game_over() {
            return self.still_frame();
        }
        let delta = self.clamp_delta(delta);
        let canvas = self.config.canvas;

        let mut frame = Frame::new();
        frame.push(RenderCommand::Clear(Rect::new(Point::default(), canvas)));

        self.background.draw(&mut frame);
        self.background.update();

        self.player.draw(&mut frame);
        self.player.update(
            &self.input,
            delta,
            self.spawner.enemies(),
            &mut self.state,
        );

        self.spawner
            .update(delta, &mut self.state, &mut frame, &mut self.rng);

        hud::draw(&self.state, canvas, &mut frame);
        frame
    }

    fn clamp_delta(&self, delta: f64) -> f64 {
        if delta.is_finite() {
            delta.clamp(0.0, self.config.max_delta_ms)
        } else {
            0.0
        }
    }

    fn still_frame(&self) -> Frame {
        let canvas = self.config.canvas;
        let mut frame = Frame::new();
        frame.push(RenderCommand::Clear(Rect::new(Point::default(), canvas)));
        self.background.draw(&mut frame);
        self.player.draw(&mut frame);
        for enemy in self.spawner.enemies() {
            enemy.draw(&mut frame);
        }
        hud::draw(&self.state, canvas, &mut frame);
        frame
    }

    fn restart(&mut self) {
        log::info!("restarting, previous score {}", self.state.score());
        self.state.reset();
        self.spawner.reset(&mut self.rng);
        self.player.reset();
        self.background.reset();
    }
}
