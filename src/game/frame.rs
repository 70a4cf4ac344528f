use crate::engine::{Point, Rect, TextStyle};

/// Images the simulation can ask for; the browser side owns the pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Player,
    Background,
    Tile,
    Enemy,
}

/// One drawing instruction, emitted in paint order by `World::tick`
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Clear(Rect),
    /// `source: None` stretches the whole image over `destination`
    DrawImage {
        asset: AssetId,
        source: Option<Rect>,
        destination: Rect,
    },
    FillRect {
        rect: Rect,
        color: &'static str,
    },
    FillText {
        text: String,
        position: Point,
        style: TextStyle,
    },
}

pub type Frame = Vec<RenderCommand>;
