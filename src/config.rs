//! Gameplay balance knobs
//!
//! Persisted separately from the high score record. Load returns defaults on
//! any failure; save is best-effort.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::storage::KeyValueStore;

/// Tunable gameplay parameters, captured by each session at start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seconds between accepted drops
    pub drop_cooldown: f32,
    /// Drop x is clamped to [margin, width - margin]
    pub drop_margin: f32,
    /// Fill line y; items resting above it end the run
    pub boundary_y: f32,
    /// Fresh drops come from tiers [0, spawnable_tiers)
    pub spawnable_tiers: usize,
    /// Bounciness of dropped items
    pub restitution: f32,
    /// Surface friction of dropped items
    pub friction: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            drop_cooldown: DROP_COOLDOWN,
            drop_margin: DROP_MARGIN,
            boundary_y: TOP_LINE_Y,
            spawnable_tiers: SPAWNABLE_TIERS,
            restitution: RESTITUTION,
            friction: FRICTION,
        }
    }
}

impl GameConfig {
    /// Storage key
    const STORAGE_KEY: &'static str = "bindrop_config";

    /// Load config from the store; defaults on missing or corrupt data
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded gameplay config");
                    return config;
                }
                Err(err) => log::warn!("Ignoring corrupt gameplay config: {}", err),
            }
        }
        Self::default()
    }

    /// Save config to the store
    pub fn save<S: KeyValueStore>(&self, store: &mut S) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(Self::STORAGE_KEY, &json);
        }
    }
}
