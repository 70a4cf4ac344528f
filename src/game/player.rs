use super::enemy::Enemy;
use super::frame::{AssetId, Frame, RenderCommand};
use super::state::GameState;
use crate::config::PlayerConfig;
use crate::engine::input::{Direction, InputState};
use crate::engine::{Point, Rect, Size};
use crate::sprite::Animation;

/// The runner. Coordinates are canvas pixels with the origin top left, so
/// jumping means a negative vertical velocity.
#[derive(Debug, Clone)]
pub struct Player {
    config: PlayerConfig,
    game_width: f64,
    position: Point,
    speed: f64,
    velocity_y: f64,
    animation: Animation,
}

impl Player {
    pub fn new(config: &PlayerConfig, game_width: f64) -> Self {
        let config = config.clone();
        Player {
            position: Point {
                x: 0.0,
                y: config.ground - config.size.height,
            },
            speed: 0.0,
            velocity_y: 0.0,
            animation: Animation::new(config.fps, config.max_frame),
            game_width,
            config,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.config.size
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn velocity_y(&self) -> f64 {
        self.velocity_y
    }

    pub fn frame(&self) -> u8 {
        self.animation.frame()
    }

    /// Top of the sprite while standing
    pub fn ground_y(&self) -> f64 {
        self.config.ground - self.config.size.height
    }

    pub fn on_ground(&self) -> bool {
        self.position.y >= self.ground_y()
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.position, self.config.size)
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.push(RenderCommand::DrawImage {
            asset: AssetId::Player,
            source: Some(self.animation.source_rect(self.config.size, 0)),
            destination: self.bounding_box(),
        });
    }

    /// ::update per frame
    /// - collision against last frame's enemy positions -> game over
    /// - animation clock
    /// - input -> horizontal speed or jump impulse
    /// - velocity -> position, clamped to the playfield
    pub fn update(
        &mut self,
        input: &InputState,
        delta: f64,
        enemies: &[Enemy],
        state: &mut GameState,
    ) {
        let bounding_box = self.bounding_box();
        if enemies
            .iter()
            .any(|enemy| enemy.bounding_box().circle_overlaps(&bounding_box))
        {
            state.end();
        }

        self.animation.update(delta);

        // Right wins over Left, both win over Up. Holding Up on the ground
        // applies the impulse again on every grounded frame, and leaves the
        // horizontal speed as it was.
        if input.is_held(Direction::Right) {
            self.speed = self.config.run_speed;
        } else if input.is_held(Direction::Left) {
            self.speed = -self.config.run_speed;
        } else if input.is_held(Direction::Up) && self.on_ground() {
            self.velocity_y -= self.config.jump_impulse;
        } else {
            self.speed = 0.0;
        }

        let max_x = self.game_width - self.config.size.width;
        self.position.x = (self.position.x + self.speed).clamp(0.0, max_x);

        self.position.y += self.velocity_y;
        if self.on_ground() {
            self.velocity_y = 0.0;
        } else {
            self.velocity_y += self.config.weight;
        }

        if self.position.y > self.ground_y() {
            self.position.y = self.ground_y();
        }
    }

    pub fn reset(&mut self) {
        self.position = Point {
            x: 0.0,
            y: self.ground_y(),
        };
        self.speed = 0.0;
        self.velocity_y = 0.0;
        self.animation.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyConfig;
    use crate::game::state::Phase;
    use approx::assert_relative_eq;

    const GAME_WIDTH: f64 = 1200.0;

    fn player() -> Player {
        Player::new(&PlayerConfig::default(), GAME_WIDTH)
    }

    fn holding(directions: &[Direction]) -> InputState {
        let mut input = InputState::default();
        for direction in directions {
            input.press(*direction);
        }
        input
    }

    fn tick(player: &mut Player, input: &InputState) -> GameState {
        let mut state = GameState::default();
        player.update(input, 16.0, &[], &mut state);
        state
    }

    #[test]
    fn starts_on_the_ground_at_the_left_edge() {
        let player = player();
        assert_eq!(player.position(), Point { x: 0.0, y: 322.0 });
        assert!(player.on_ground());
    }

    #[test]
    fn right_beats_left() {
        let mut player = player();
        tick(&mut player, &holding(&[Direction::Left, Direction::Right]));
        assert_eq!(player.speed(), 5.0);
        assert_eq!(player.position().x, 5.0);
    }

    #[test]
    fn left_is_clamped_at_zero() {
        let mut player = player();
        tick(&mut player, &holding(&[Direction::Left]));
        assert_eq!(player.speed(), -5.0);
        assert_eq!(player.position().x, 0.0);
    }

    #[test]
    fn right_is_clamped_at_far_edge() {
        let mut player = player();
        let input = holding(&[Direction::Right]);
        for _ in 0..500 {
            tick(&mut player, &input);
            assert!(player.position().x <= GAME_WIDTH - 170.0);
            assert!(player.position().x >= 0.0);
        }
        assert_eq!(player.position().x, GAME_WIDTH - 170.0);
    }

    #[test]
    fn releasing_everything_stops_the_player() {
        let mut player = player();
        tick(&mut player, &holding(&[Direction::Right]));
        tick(&mut player, &InputState::default());
        assert_eq!(player.speed(), 0.0);
        assert_eq!(player.position().x, 5.0);
    }

    #[test]
    fn jump_rises_then_falls_back_to_ground() {
        let mut player = player();
        tick(&mut player, &holding(&[Direction::Up]));
        // impulse moved the player this frame, gravity already kicked in
        assert_relative_eq!(player.position().y, 322.0 - 19.0);
        assert_relative_eq!(player.velocity_y(), -19.0 + 0.4);
        assert!(!player.on_ground());

        let mut previous = player.velocity_y();
        let mut frames = 0;
        while !player.on_ground() {
            tick(&mut player, &InputState::default());
            frames += 1;
            if !player.on_ground() {
                assert_relative_eq!(player.velocity_y(), previous + 0.4, epsilon = 1e-9);
                previous = player.velocity_y();
            }
            assert!(player.position().y <= player.ground_y());
            assert!(frames < 200, "player never landed");
        }
        assert_eq!(player.position().y, player.ground_y());
        assert_eq!(player.velocity_y(), 0.0);
    }

    #[test]
    fn up_keeps_horizontal_speed() {
        let mut player = player();
        tick(&mut player, &holding(&[Direction::Right]));
        tick(&mut player, &holding(&[Direction::Up]));
        assert_eq!(player.speed(), 5.0);
        assert_eq!(player.position().x, 10.0);
    }

    #[test]
    fn up_is_ignored_in_the_air() {
        let mut player = player();
        let up = holding(&[Direction::Up]);
        tick(&mut player, &up);
        let airborne_velocity = player.velocity_y();
        tick(&mut player, &up);
        assert_relative_eq!(player.velocity_y(), airborne_velocity + 0.4);
    }

    #[test]
    fn holding_up_jumps_again_on_landing() {
        let mut player = player();
        let up = holding(&[Direction::Up]);
        tick(&mut player, &up);

        let mut frames = 0;
        while !player.on_ground() {
            // the impulse is only applied from the ground, never stacked mid air
            assert!(player.velocity_y() > -19.0);
            tick(&mut player, &up);
            frames += 1;
            assert!(frames < 200, "player never landed");
        }
        assert_eq!(player.velocity_y(), 0.0);
        assert_eq!(player.position().y, player.ground_y());

        tick(&mut player, &up);
        assert_relative_eq!(player.velocity_y(), -19.0 + 0.4);
        assert_relative_eq!(player.position().y, player.ground_y() - 19.0);
    }

    #[test]
    fn right_held_suppresses_jump() {
        let mut player = player();
        tick(&mut player, &holding(&[Direction::Right, Direction::Up]));
        assert!(player.on_ground());
        assert_eq!(player.velocity_y(), 0.0);
    }

    #[test]
    fn overlapping_enemy_ends_the_game() {
        let mut player = player();
        // enemy center (162.5, 537.5) vs player center (85, 461)
        let enemy = Enemy::spawn_at(&EnemyConfig::default(), 100.0);
        let mut state = GameState::default();
        player.update(&InputState::default(), 16.0, &[enemy], &mut state);
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn distant_enemy_is_harmless() {
        let mut player = player();
        let enemy = Enemy::spawn_at(&EnemyConfig::default(), 600.0);
        let mut state = GameState::default();
        player.update(&InputState::default(), 16.0, &[enemy], &mut state);
        assert_eq!(state.phase(), Phase::Running);
    }

    #[test]
    fn reset_restores_start() {
        let mut player = player();
        let input = holding(&[Direction::Right]);
        for _ in 0..20 {
            tick(&mut player, &input);
        }
        tick(&mut player, &holding(&[Direction::Up]));
        player.update(&InputState::default(), 500.0, &[], &mut GameState::default());
        player.update(&InputState::default(), 0.0, &[], &mut GameState::default());
        assert_ne!(player.frame(), 0);

        player.reset();
        assert_eq!(player.position(), Point { x: 0.0, y: 322.0 });
        assert_eq!(player.velocity_y(), 0.0);
        assert_eq!(player.speed(), 0.0);
        assert_eq!(player.frame(), 0);
    }

    #[test]
    fn draws_current_cell_at_position() {
        let player = player();
        let mut frame = Frame::new();
        player.draw(&mut frame);
        assert_eq!(
            frame,
            vec![RenderCommand::DrawImage {
                asset: AssetId::Player,
                source: Some(Rect::new_from_x_y(0.0, 0.0, 170.0, 278.0)),
                destination: Rect::new_from_x_y(0.0, 322.0, 170.0, 278.0),
            }]
        );
    }
}
