//! Tuning knobs for the game. Defaults are the shipped values; a `config.json`
//! next to the page may override any subset of them.
use crate::engine::Size;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    #[serde(deserialize_with = "canvas_size")]
    pub canvas: Size,
    /// Deltas above this are treated as this long, e.g. after a background tab
    pub max_delta_ms: f64,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub spawner: SpawnerConfig,
    pub background: BackgroundConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            canvas: Size {
                width: 1200.0,
                height: 750.0,
            },
            max_delta_ms: 100.0,
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            spawner: SpawnerConfig::default(),
            background: BackgroundConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    #[serde(deserialize_with = "player_size")]
    pub size: Size,
    /// The player stands on y = ground - height
    pub ground: f64,
    pub run_speed: f64,
    pub jump_impulse: f64,
    /// Added to the vertical velocity every airborne frame
    pub weight: f64,
    pub fps: f64,
    pub max_frame: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            size: Size {
                width: 170.0,
                height: 278.0,
            },
            ground: 600.0,
            run_speed: 5.0,
            jump_impulse: 19.0,
            weight: 0.4,
            fps: 6.0,
            max_frame: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    #[serde(deserialize_with = "enemy_size")]
    pub size: Size,
    pub ground: f64,
    pub speed: f64,
    pub fps: f64,
    pub max_frame: u8,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig {
            size: Size {
                width: 125.0,
                height: 145.0,
            },
            ground: 610.0,
            speed: 3.0,
            fps: 8.0,
            max_frame: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub base_interval_ms: f64,
    /// Jitter is drawn from `jitter_min_ms..jitter_max_ms` after every spawn
    pub jitter_min_ms: f64,
    pub jitter_max_ms: f64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        SpawnerConfig {
            base_interval_ms: 1000.0,
            jitter_min_ms: 500.0,
            jitter_max_ms: 1500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub speed: f64,
    #[serde(deserialize_with = "tile_size")]
    pub tile_size: Size,
    pub tile_scale: f64,
    pub tile_speed: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig {
            speed: 1.5,
            tile_size: Size {
                width: 2000.0,
                height: 230.0,
            },
            tile_scale: 0.6,
            tile_speed: 2.0,
        }
    }
}

// ==================== Size overrides ====================
/// A `Size` in `config.json` where either side may be left out
#[derive(Debug, Deserialize)]
struct SizeOverride {
    width: Option<f64>,
    height: Option<f64>,
}

impl SizeOverride {
    fn over(self, default: Size) -> Size {
        Size {
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
        }
    }
}

fn canvas_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Size, D::Error> {
    SizeOverride::deserialize(deserializer).map(|size| size.over(GameConfig::default().canvas))
}

fn player_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Size, D::Error> {
    SizeOverride::deserialize(deserializer).map(|size| size.over(PlayerConfig::default().size))
}

fn enemy_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Size, D::Error> {
    SizeOverride::deserialize(deserializer).map(|size| size.over(EnemyConfig::default().size))
}

fn tile_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Size, D::Error> {
    SizeOverride::deserialize(deserializer)
        .map(|size| size.over(BackgroundConfig::default().tile_size))
}
