use super::frame::{Frame, RenderCommand};
use super::state::GameState;
use crate::engine::{Point, Rect, Size, TextAlign, TextStyle};

const FONT: &str = "20px Helvetica";
const SCORE_POSITION: Point = Point { x: 20.0, y: 50.0 };
const OVERLAY_COLOR: &str = "rgba(255, 193, 225, 0.68)";
const GAME_OVER_TEXT: &str = "GAME OVER, try again!";
const SHADOW_OFFSET: f64 = 2.0;

const SCORE_STYLE: TextStyle = TextStyle {
    font: FONT,
    color: "white",
    align: TextAlign::Left,
};

const SHADOW_STYLE: TextStyle = TextStyle {
    font: FONT,
    color: "pink",
    align: TextAlign::Center,
};

const MESSAGE_STYLE: TextStyle = TextStyle {
    font: FONT,
    color: "white",
    align: TextAlign::Center,
};

/// Score in the corner, plus the tinted overlay and a shadowed message once
/// the game is over
pub fn draw(state: &GameState, canvas: Size, frame: &mut Frame) {
    frame.push(RenderCommand::FillText {
        text: format!("Score: {}", state.score()),
        position: SCORE_POSITION,
        style: SCORE_STYLE,
    });

    if !state.is_game_over() {
        return;
    }

    frame.push(RenderCommand::FillRect {
        rect: Rect::new(Point::default(), canvas),
        color: OVERLAY_COLOR,
    });

    let center = Point {
        x: canvas.width / 2.0,
        y: canvas.height / 2.0,
    };
    frame.push(RenderCommand::FillText {
        text: GAME_OVER_TEXT.to_string(),
        position: Point {
            x: center.x + SHADOW_OFFSET,
            y: center.y + SHADOW_OFFSET,
        },
        style: SHADOW_STYLE,
    });
    frame.push(RenderCommand::FillText {
        text: GAME_OVER_TEXT.to_string(),
        position: center,
        style: MESSAGE_STYLE,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size {
        width: 1200.0,
        height: 750.0,
    };

    #[test]
    fn running_shows_only_the_score() {
        let mut state = GameState::default();
        state.add_point();
        state.add_point();
        let mut frame = Frame::new();
        draw(&state, CANVAS, &mut frame);
        assert_eq!(
            frame,
            vec![RenderCommand::FillText {
                text: "Score: 2".to_string(),
                position: Point { x: 20.0, y: 50.0 },
                style: SCORE_STYLE,
            }]
        );
    }

    #[test]
    fn game_over_adds_overlay_and_message() {
        let mut state = GameState::default();
        state.end();
        let mut frame = Frame::new();
        draw(&state, CANVAS, &mut frame);

        assert_eq!(frame.len(), 4);
        assert_eq!(
            frame[1],
            RenderCommand::FillRect {
                rect: Rect::new_from_x_y(0.0, 0.0, 1200.0, 750.0),
                color: OVERLAY_COLOR,
            }
        );
        match (&frame[2], &frame[3]) {
            (
                RenderCommand::FillText {
                    position: shadow,
                    style: shadow_style,
                    ..
                },
                RenderCommand::FillText {
                    text,
                    position,
                    style,
                },
            ) => {
                assert_eq!(*shadow, Point { x: 602.0, y: 377.0 });
                assert_eq!(shadow_style.color, "pink");
                assert_eq!(text, GAME_OVER_TEXT);
                assert_eq!(*position, Point { x: 600.0, y: 375.0 });
                assert_eq!(style.align, TextAlign::Center);
            }
            other => panic!("unexpected commands {:?}", other),
        }
    }
}
