use self::frame::{AssetId, Frame, RenderCommand};
use self::world::{Command, World};
use crate::browser;
use crate::config::GameConfig;
use crate::engine::{self, input::KeyPress, Game, Renderer};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::join;
use rand::rngs::StdRng;
use rand::SeedableRng;
use web_sys::HtmlImageElement;

pub mod background;
pub mod enemy;
pub mod frame;
pub mod hud;
pub mod player;
pub mod state;
pub mod world;

/// TABLE
/// ┌──────────────────────── Frame Flow ─────────────────────────────┐
/// │                                                                 │
/// │  engine::GameLoop ──keys──► DodgeRun::update ──Command──► World │
/// │         │                         │                        │    │
/// │         │                         └───── World::tick ◄─────┘    │
/// │         │                                   │                   │
/// │         └────────► DodgeRun::draw ◄── Frame ┘                   │
/// │                          │                                      │
/// │                     Renderer (canvas)                           │
/// └─────────────────────────────────────────────────────────────────┘
pub enum DodgeRun {
    /// Waiting on images and config
    Loading,
    Loaded(Run),
}

pub struct Run {
    world: World,
    assets: Assets,
    frame: Frame,
}

struct Assets {
    player: HtmlImageElement,
    background: HtmlImageElement,
    tile: HtmlImageElement,
    enemy: HtmlImageElement,
}

impl Assets {
    fn image(&self, asset: AssetId) -> &HtmlImageElement {
        match asset {
            AssetId::Player => &self.player,
            AssetId::Background => &self.background,
            AssetId::Tile => &self.tile,
            AssetId::Enemy => &self.enemy,
        }
    }
}

impl DodgeRun {
    const CONFIG_PATH: &'static str = "config.json";
    const PLAYER_IMAGE: &'static str = "player.png";
    const BACKGROUND_IMAGE: &'static str = "background.png";
    const TILE_IMAGE: &'static str = "tile.png";
    const ENEMY_IMAGE: &'static str = "enemy.png";

    pub fn new() -> Self {
        DodgeRun::Loading
    }

    /// A missing or broken config file is not fatal, the defaults are the
    /// shipped tuning
    async fn load_config() -> GameConfig {
        match browser::fetch_json::<GameConfig>(Self::CONFIG_PATH).await {
            Ok(config) => {
                log::info!("loaded {}", Self::CONFIG_PATH);
                config
            }
            Err(err) => {
                log::warn!(
                    "{} not usable, falling back to defaults : {:#}",
                    Self::CONFIG_PATH,
                    err
                );
                GameConfig::default()
            }
        }
    }

    async fn load_image(path: &str) -> Result<HtmlImageElement> {
        engine::load_image(path)
            .await
            .with_context(|| format!("Failed to load image resource from : {}", path))
    }

    async fn load_assets() -> Result<Assets> {
        let (player, background, tile, enemy) = join!(
            Self::load_image(Self::PLAYER_IMAGE),
            Self::load_image(Self::BACKGROUND_IMAGE),
            Self::load_image(Self::TILE_IMAGE),
            Self::load_image(Self::ENEMY_IMAGE),
        );
        Ok(Assets {
            player: player?,
            background: background?,
            tile: tile?,
            enemy: enemy?,
        })
    }
}

impl Default for DodgeRun {
    fn default() -> Self {
        DodgeRun::new()
    }
}

#[async_trait(?Send)]
impl Game for DodgeRun {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            DodgeRun::Loading => {
                // config and images load side by side
                let (config, assets) = join!(Self::load_config(), Self::load_assets());
                let run = Run {
                    world: World::new(config, StdRng::from_entropy()),
                    assets: assets?,
                    frame: Frame::new(),
                };
                log::info!("assets loaded, starting run");
                Ok(Box::new(DodgeRun::Loaded(run)))
            }
            DodgeRun::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, delta: f64, keys: &[KeyPress]) {
        if let DodgeRun::Loaded(run) = self {
            for command in keys.iter().filter_map(Command::from_key_press) {
                run.world.handle(command);
            }
            run.frame = run.world.tick(delta);
        }
    }

    fn draw(&self, renderer: &Renderer) -> Result<()> {
        if let DodgeRun::Loaded(run) = self {
            for command in &run.frame {
                run.paint(command, renderer)?;
            }
        }
        Ok(())
    }

    fn is_halted(&self) -> bool {
        match self {
            DodgeRun::Loading => false,
            DodgeRun::Loaded(run) => run.world.is_game_over(),
        }
    }

    fn restart(&mut self) {
        if let DodgeRun::Loaded(run) = self {
            run.world.handle(Command::Restart);
        }
    }
}

impl Run {
    fn paint(&self, command: &RenderCommand, renderer: &Renderer) -> Result<()> {
        match command {
            RenderCommand::Clear(rect) => renderer.clear(rect),
            RenderCommand::DrawImage {
                asset,
                source: Some(source),
                destination,
            } => renderer.draw_image(self.assets.image(*asset), source, destination)?,
            RenderCommand::DrawImage {
                asset,
                source: None,
                destination,
            } => renderer.draw_entire_image(self.assets.image(*asset), destination)?,
            RenderCommand::FillRect { rect, color } => renderer.fill_rect(rect, color),
            RenderCommand::FillText {
                text,
                position,
                style,
            } => renderer.fill_text(text, position, style)?,
        }
        Ok(())
    }
}
