// Sprite sheets are a single horizontal strip of equally sized cells:
//
// ┌───────┬───────┬───────┬───────┬───────┐
// │   0   │   1   │   2   │   3   │   4   │  <- frame index
// └───────┴───────┴───────┴───────┴───────┘
//  x = frame * cell width, y = row * cell height
//
// The cell shown is picked by an `Animation`, which runs on its own clock
// (frames per second of the artwork) instead of the display refresh rate.
use crate::engine::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    frame: u8,
    max_frame: u8,
    timer: f64,
    interval: f64,
}

impl Animation {
    pub fn new(fps: f64, max_frame: u8) -> Self {
        Animation {
            frame: 0,
            max_frame,
            timer: 0.0,
            interval: 1000.0 / fps,
        }
    }

    /// ::update per game frame
    /// - timer already past the interval -> next cell, timer back to 0
    /// - otherwise the delta is banked for the next call
    ///
    /// The delta of an advancing call is dropped, so at most one cell is
    /// skipped per call no matter how long the frame took.
    pub fn update(&mut self, delta: f64) {
        if self.timer > self.interval {
            self.frame = if self.frame >= self.max_frame {
                0
            } else {
                self.frame + 1
            };
            self.timer = 0.0;
        } else {
            self.timer += delta;
        }
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }

    pub fn max_frame(&self) -> u8 {
        self.max_frame
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.timer = 0.0;
    }

    /// Source rectangle of the current cell on a strip of `cell` sized frames
    pub fn source_rect(&self, cell: Size, row: u8) -> Rect {
        Rect::new(
            Point {
                x: f64::from(self.frame) * cell.width,
                y: f64::from(row) * cell.height,
            },
            cell,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn interval_comes_from_fps() {
        assert_relative_eq!(Animation::new(6.0, 4).interval(), 1000.0 / 6.0);
        assert_relative_eq!(Animation::new(8.0, 3).interval(), 125.0);
    }

    #[test]
    fn first_advance_waits_for_a_full_interval() {
        // 11 * 16 = 176 > 166.7 is only seen on the 12th call
        let mut animation = Animation::new(6.0, 4);
        for _ in 0..11 {
            animation.update(16.0);
        }
        assert_eq!(animation.frame(), 0);

        animation.update(16.0);
        assert_eq!(animation.frame(), 1);
    }

    #[test]
    fn sixty_frames_at_16ms_advance_five_times() {
        let mut animation = Animation::new(6.0, 4);
        let mut advances = 0;
        let mut last = animation.frame();
        for _ in 0..63 {
            animation.update(16.0);
            if animation.frame() != last {
                advances += 1;
                last = animation.frame();
            }
        }
        // advances on calls 12, 24, 36, 48 and 60
        assert_eq!(advances, 5);
        assert_eq!(animation.frame(), 0);
    }

    #[test]
    fn frame_wraps_after_max_frame() {
        let mut animation = Animation::new(8.0, 3);
        let mut seen = Vec::new();
        for _ in 0..10 {
            // one huge delta banks, the next call advances
            animation.update(1000.0);
            animation.update(0.0);
            assert!(animation.frame() <= animation.max_frame());
            seen.push(animation.frame());
        }
        assert_eq!(seen, vec![1, 2, 3, 0, 1, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn large_delta_skips_at_most_one_frame() {
        let mut animation = Animation::new(6.0, 4);
        animation.update(10_000.0);
        assert_eq!(animation.frame(), 0);
        animation.update(10_000.0);
        assert_eq!(animation.frame(), 1);
    }

    #[test]
    fn source_rect_walks_the_strip() {
        let mut animation = Animation::new(6.0, 4);
        let cell = Size {
            width: 170.0,
            height: 278.0,
        };
        assert_eq!(
            animation.source_rect(cell, 0),
            Rect::new_from_x_y(0.0, 0.0, 170.0, 278.0)
        );

        animation.update(200.0);
        animation.update(0.0);
        assert_eq!(
            animation.source_rect(cell, 0),
            Rect::new_from_x_y(170.0, 0.0, 170.0, 278.0)
        );
        assert_eq!(animation.source_rect(cell, 1).y(), 278.0);
    }

    #[test]
    fn reset_goes_back_to_first_cell() {
        let mut animation = Animation::new(6.0, 4);
        animation.update(200.0);
        animation.update(0.0);
        animation.update(50.0);
        animation.reset();
        assert_eq!(animation, Animation::new(6.0, 4));
    }
}
