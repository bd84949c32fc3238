//! Gameplay tuning.
//!
//! Every constant the simulation uses lives here so a JSON file can override
//! any subset of them. Defaults reproduce the classic 800x600 layout.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::entities::Size;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Simulation ticks per second; also the frame pacing target.
    pub tick_rate: u32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the ship's bottom edge and the bottom of the screen.
    pub player_bottom_margin: f32,
    pub player_speed: f32,
    pub max_health: u32,
    pub player_fire_delay_ms: u64,
    pub player_projectile_width: f32,
    pub player_projectile_height: f32,
    /// Pixels per tick, travelling upward.
    pub player_projectile_speed: f32,

    // === Enemies ===
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_speed: f32,
    pub enemy_move_range: f32,
    pub enemy_shoot_delay_ms: u64,
    pub enemy_projectile_width: f32,
    pub enemy_projectile_height: f32,
    /// Pixels per tick, travelling downward.
    pub enemy_projectile_speed: f32,

    // === Formation ===
    pub formation_rows: usize,
    pub formation_cols: usize,
    pub formation_spacing: f32,
    pub formation_top: f32,

    // === Combat ===
    pub hit_damage: u32,

    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            tick_rate: 60,

            player_width: 40.0,
            player_height: 40.0,
            player_bottom_margin: 10.0,
            player_speed: 4.0,
            max_health: 150,
            player_fire_delay_ms: 300,
            player_projectile_width: 20.0,
            player_projectile_height: 20.0,
            player_projectile_speed: 8.0,

            enemy_width: 40.0,
            enemy_height: 40.0,
            enemy_speed: 3.0,
            enemy_move_range: 100.0,
            enemy_shoot_delay_ms: 10_000,
            enemy_projectile_width: 12.0,
            enemy_projectile_height: 12.0,
            enemy_projectile_speed: 5.0,

            formation_rows: 4,
            formation_cols: 8,
            formation_spacing: 20.0,
            formation_top: 50.0,

            hit_damage: 30,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Read a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            bail!(
                "screen must have a positive size, got {}x{}",
                self.screen_width,
                self.screen_height
            );
        }
        if self.tick_rate == 0 {
            bail!("tick_rate must be at least 1");
        }
        if self.max_health == 0 {
            bail!("max_health must be at least 1");
        }
        let sizes = [
            ("player", self.player_size()),
            ("player projectile", self.player_projectile_size()),
            ("enemy", self.enemy_size()),
            ("enemy projectile", self.enemy_projectile_size()),
        ];
        for (name, size) in sizes {
            if size.w <= 0.0 || size.h <= 0.0 {
                bail!("{name} size must be positive, got {}x{}", size.w, size.h);
            }
        }
        if self.player_width > self.screen_width {
            bail!("player is wider than the screen");
        }
        if self.player_speed < 0.0 || self.enemy_speed < 0.0 {
            bail!(
                "movement speeds must not be negative, got player {} enemy {}",
                self.player_speed,
                self.enemy_speed
            );
        }
        let shot_speeds = [
            ("player projectile", self.player_projectile_speed),
            ("enemy projectile", self.enemy_projectile_speed),
        ];
        for (name, speed) in shot_speeds {
            if speed <= 0.0 {
                bail!("{name} speed must be positive, got {speed}");
            }
        }
        if self.enemy_move_range < 0.0 {
            bail!(
                "enemy_move_range must not be negative, got {}",
                self.enemy_move_range
            );
        }
        if self.formation_rows == 0 || self.formation_cols == 0 {
            bail!("formation must have at least one row and one column");
        }
        if self.formation_width() > self.screen_width {
            bail!(
                "formation is {} px wide but the screen is only {} px",
                self.formation_width(),
                self.screen_width
            );
        }
        Ok(())
    }

    pub fn player_size(&self) -> Size {
        Size::new(self.player_width, self.player_height)
    }

    pub fn player_projectile_size(&self) -> Size {
        Size::new(self.player_projectile_width, self.player_projectile_height)
    }

    pub fn enemy_size(&self) -> Size {
        Size::new(self.enemy_width, self.enemy_height)
    }

    pub fn enemy_projectile_size(&self) -> Size {
        Size::new(self.enemy_projectile_width, self.enemy_projectile_height)
    }

    /// Total width of the enemy grid including inner spacing.
    pub fn formation_width(&self) -> f32 {
        let cols = self.formation_cols as f32;
        cols * (self.enemy_width + self.formation_spacing) - self.formation_spacing
    }

}
