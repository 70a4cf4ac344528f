use super::frame::{AssetId, Frame, RenderCommand};
use crate::config::BackgroundConfig;
use crate::engine::{Rect, Size};

/// Two scrolling layers: the full screen backdrop and a strip of ground tiles
/// along the bottom. They move at different speeds for a parallax effect.
///
/// Each layer is painted twice, one width apart, so the screen stays covered
/// until the offset wraps back to 0.
#[derive(Debug, Clone)]
pub struct Background {
    config: BackgroundConfig,
    canvas: Size,
    x: f64,
    tile_x: f64,
}

impl Background {
    pub fn new(config: &BackgroundConfig, canvas: Size) -> Self {
        Background {
            config: config.clone(),
            canvas,
            x: 0.0,
            tile_x: 0.0,
        }
    }

    pub fn offsets(&self) -> (f64, f64) {
        (self.x, self.tile_x)
    }

    fn tile_size(&self) -> Size {
        Size {
            width: self.config.tile_size.width * self.config.tile_scale,
            height: self.config.tile_size.height * self.config.tile_scale,
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let width = self.canvas.width;
        let height = self.canvas.height;
        // the second copy overlaps the first by one step to hide the seam
        for x in [self.x, self.x + width - self.config.speed] {
            frame.push(RenderCommand::DrawImage {
                asset: AssetId::Background,
                source: None,
                destination: Rect::new_from_x_y(x, 0.0, width, height),
            });
        }

        let tile = self.tile_size();
        let tile_y = height - tile.height;
        for x in [self.tile_x, self.tile_x + tile.width] {
            frame.push(RenderCommand::DrawImage {
                asset: AssetId::Tile,
                source: None,
                destination: Rect::new_from_x_y(x, tile_y, tile.width, tile.height),
            });
        }
    }

    pub fn update(&mut self) {
        self.x -= self.config.speed;
        if self.x < -self.canvas.width {
            self.x = 0.0;
        }

        self.tile_x -= self.config.tile_speed;
        if self.tile_x < -self.tile_size().width {
            self.tile_x = 0.0;
        }
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
        self.tile_x = 0.0;
    }
}
