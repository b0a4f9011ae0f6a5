//! Game configuration
//!
//! Every field has a default, so a JSON file only needs the values it changes:
//!
//! ```
//! use tetros_core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "seed": 7, "max_level": 15 }"#).unwrap();
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.max_level, 15);
//! assert_eq!(config.spawn_x, 5);
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{
    BOARD_WIDTH, INITIAL_LINES_NEEDED, MAX_LEVEL, MOVE_REPEAT_DELAY_SECS, MOVE_REPEAT_RESET_SECS,
    SOFT_DROP_INTERVAL_CAP_SECS, SPAWN_X, SPAWN_Y,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the piece bag; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub spawn_x: i8,
    pub spawn_y: i8,
    pub max_level: u32,
    pub initial_lines_needed: i32,
    pub soft_drop_interval_cap_secs: f32,
    pub move_repeat_delay_secs: f32,
    pub move_repeat_reset_secs: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
            max_level: MAX_LEVEL,
            initial_lines_needed: INITIAL_LINES_NEEDED,
            soft_drop_interval_cap_secs: SOFT_DROP_INTERVAL_CAP_SECS,
            move_repeat_delay_secs: MOVE_REPEAT_DELAY_SECS,
            move_repeat_reset_secs: MOVE_REPEAT_RESET_SECS,
        }
    }
}

impl GameConfig {
    /// Default configuration with a fixed bag seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("parse game config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read game config {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("load game config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.spawn_x < 0 || self.spawn_x >= BOARD_WIDTH as i8 {
            bail!("spawn_x {} outside 0..{}", self.spawn_x, BOARD_WIDTH);
        }
        // the anchor must leave the piece above or at the top row
        if !(-4..=0).contains(&self.spawn_y) {
            bail!("spawn_y {} outside -4..=0", self.spawn_y);
        }
        if self.max_level == 0 {
            bail!("max_level must be at least 1");
        }
        if self.initial_lines_needed <= 0 {
            bail!("initial_lines_needed must be positive");
        }
        if self.soft_drop_interval_cap_secs.is_nan() || self.soft_drop_interval_cap_secs <= 0.0 {
            bail!("soft_drop_interval_cap_secs must be positive");
        }
        let repeat_ok = self.move_repeat_reset_secs >= 0.0
            && self.move_repeat_reset_secs < self.move_repeat_delay_secs;
        if !repeat_ok {
            bail!("move_repeat_reset_secs must be in 0..move_repeat_delay_secs");
        }
        Ok(())
    }
}
