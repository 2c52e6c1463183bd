//! Scene configuration.
//!
//! ```toml
//! [cloth]
//! resolution_x = 40
//! resolution_y = 40
//!
//! [physics.wind]
//! amplitude = 2.0
//!
//! [features]
//! self_collision = true
//!
//! [[proxies]]
//! kind = "sphere"
//! center = [5.0, 5.0, -2.0]
//! radius = 2.0
//! ```
//!
//! Every section and field is optional. Proxies are checked one by one:
//! an entry with an unknown or missing `kind`, or bad fields, is logged
//! and dropped without failing the load.

use std::fs;
use std::path::Path;

use drape_cloth::ClothSettings;
use drape_contact::{CollisionProxy, CollisionSettings, PrimitiveType, SelfCollisionSettings};
use drape_solver::{FeatureFlags, PhysicsSettings};
use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Everything needed to set up a simulation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SceneConfig {
    pub cloth: ClothSettings,
    pub physics: PhysicsSettings,
    pub collision: CollisionSettings,
    pub self_collision: SelfCollisionSettings,
    /// Initial feature toggles.
    pub features: FeatureFlags,
    pub proxies: Vec<CollisionProxy>,
}

/// On-disk layout; proxies stay untyped until checked individually.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSceneConfig {
    cloth: ClothSettings,
    physics: PhysicsSettings,
    collision: CollisionSettings,
    self_collision: SelfCollisionSettings,
    features: FeatureFlags,
    proxies: Vec<toml::Table>,
}

impl SceneConfig {
    /// Parse a scene from TOML text.
    ///
    /// Malformed TOML is an error; bad proxy entries are skipped.
    pub fn from_toml_str(text: &str) -> DrapeResult<Self> {
        let raw: RawSceneConfig =
            toml::from_str(text).map_err(|e| DrapeError::Serialization(e.to_string()))?;

        let proxies = raw
            .proxies
            .into_iter()
            .enumerate()
            .filter_map(|(index, table)| parse_proxy(index, table))
            .collect();

        Ok(Self {
            cloth: raw.cloth,
            physics: raw.physics,
            collision: raw.collision,
            self_collision: raw.self_collision,
            features: raw.features,
            proxies,
        })
    }

    /// Read and parse a scene file.
    pub fn load(path: &Path) -> DrapeResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Like [`load`](Self::load), but a missing or unreadable file falls
    /// back to the default scene with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(scene) => {
                info!(
                    path = %path.display(),
                    proxies = scene.proxies.len(),
                    "scene loaded"
                );
                scene
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default scene");
                Self::default()
            }
        }
    }

    /// Fatal checks; see [`validate_scene`](crate::validator::validate_scene).
    pub fn validate(&self) -> DrapeResult<()> {
        crate::validator::validate_scene(self)
    }

    pub fn to_toml_string(&self) -> DrapeResult<String> {
        toml::to_string_pretty(self).map_err(|e| DrapeError::Serialization(e.to_string()))
    }
}

/// Type-check one `[[proxies]]` entry. Failures are logged and dropped.
fn parse_proxy(index: usize, mut table: toml::Table) -> Option<CollisionProxy> {
    let Some(kind) = table.get("kind").and_then(toml::Value::as_str) else {
        error!(index, "collision proxy without a kind, skipped");
        return None;
    };
    let kind = match kind.parse::<PrimitiveType>() {
        Ok(kind) => kind,
        Err(e) => {
            error!(index, error = %e, "collision proxy skipped");
            return None;
        }
    };
    table.insert("kind".into(), toml::Value::String(kind.name().into()));

    match toml::Value::Table(table).try_into::<CollisionProxy>() {
        Ok(proxy) => Some(proxy),
        Err(e) => {
            error!(index, %kind, error = %e, "malformed collision proxy skipped");
            None
        }
    }
}
