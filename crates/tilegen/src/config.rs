use crate::biome::BiomeThresholds;
use crate::error::ConfigError;
use glam::Vec3;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, OnceLock};

pub const CONFIG_FILE: &str = "tilegen_config.toml";

static CONFIG: OnceLock<Mutex<TileGenConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading it from file on first use.
///
/// A missing or invalid file is not fatal: the built-in defaults are used and a
/// warning is logged, so generation stays deterministic either way.
pub fn get_config() -> TileGenConfig {
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(load_or_default(CONFIG_FILE)));
    config_mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

pub fn reload_config() -> Result<(), ConfigError> {
    reload_config_from_file(CONFIG_FILE)
}

/// One octave of coherent 3D noise.
///
/// The permutation table is built from a fixed constant, never from a runtime
/// seed, so the same position always yields the same value.
#[derive(Debug, Clone)]
pub struct NoiseConfig {
    perlin: Perlin,
    frequency: f32,
    amplitude: f32,
}

impl NoiseConfig {
    pub fn new(table: u32, frequency: f32, amplitude: f32) -> Self {
        Self {
            perlin: Perlin::new(table),
            frequency,
            amplitude,
        }
    }

    /// Noise remapped from `[-1, 1]` to `[0, 1]`, then scaled by the amplitude.
    pub fn sample_unit(&self, position: Vec3) -> f32 {
        let p = position * self.frequency;
        let raw = self.perlin.get([p.x as f64, p.y as f64, p.z as f64]) as f32;
        (raw.clamp(-1.0, 1.0) + 1.0) * 0.5 * self.amplitude
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGenConfig {
    pub generation: GenerationConfig,
    pub elevation: ElevationConfig,
    pub biomes: BiomeThresholds,
    pub picking: PickingConfig,
    pub interaction: InteractionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub default_subdivision_level: u32,
    pub radius: f32,
    /// Midpoint refinements applied to the icosahedron before tiling.
    pub icosphere_refinements: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OctaveConfig {
    pub frequency: f32,
    pub weight: f32,
    /// Fixed permutation table index for this octave.
    pub table: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationConfig {
    pub continental: OctaveConfig,
    pub regional: OctaveConfig,
    pub local: OctaveConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickingConfig {
    /// Barycentric weights closer than this to 0 or 1 are snapped before bucketing.
    pub edge_epsilon: f32,
    /// Relative threshold under which a face's barycentric determinant counts as zero.
    pub degenerate_epsilon: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    pub highlight_color: [f32; 3],
}

impl Default for TileGenConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig {
                default_subdivision_level: 4,
                radius: 20.0,
                icosphere_refinements: 0,
            },
            elevation: ElevationConfig {
                continental: OctaveConfig {
                    frequency: 1.5,
                    weight: 0.6,
                    table: 0,
                },
                regional: OctaveConfig {
                    frequency: 4.0,
                    weight: 0.3,
                    table: 1,
                },
                local: OctaveConfig {
                    frequency: 10.0,
                    weight: 0.1,
                    table: 2,
                },
            },
            biomes: BiomeThresholds::default(),
            picking: PickingConfig {
                edge_epsilon: 1e-5,
                degenerate_epsilon: 1e-6,
            },
            interaction: InteractionConfig {
                highlight_color: [0.95, 0.2, 0.2],
            },
        }
    }
}

impl TileGenConfig {
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: TileGenConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn load_or_default(path: &str) -> TileGenConfig {
    match TileGenConfig::load_from_file(path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Using default tile generation config ({path}: {err})");
            TileGenConfig::default()
        }
    }
}

fn reload_config_from_file(path: &str) -> Result<(), ConfigError> {
    let new_config = TileGenConfig::load_from_file(path)?;

    let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
    *config_mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = new_config;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = TileGenConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: TileGenConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_then_load_returns_same_config() {
        let path = std::env::temp_dir().join("tilegen_config_roundtrip.toml");
        let path = path.to_str().unwrap();

        let mut config = TileGenConfig::default();
        config.generation.default_subdivision_level = 7;
        config.save_to_file(path).unwrap();

        let loaded = TileGenConfig::load_from_file(path).unwrap();
        assert_eq!(loaded.generation.default_subdivision_level, 7);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_or_default("definitely/not/here/tilegen_config.toml");
        assert_eq!(config, TileGenConfig::default());
    }

    #[test]
    fn test_octave_weights_sum_to_one() {
        let e = TileGenConfig::default().elevation;
        let sum = e.continental.weight + e.regional.weight + e.local.weight;
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_unit_sample_stays_in_amplitude_range() {
        let octave = NoiseConfig::new(0, 3.0, 0.6);
        for i in 0..200 {
            let t = i as f32 * 0.173;
            let p = Vec3::new(t.sin(), t.cos(), (t * 0.5).sin());
            let s = octave.sample_unit(p);
            assert!((-1e-4..=0.6 + 1e-4).contains(&s), "sample {s} out of range");
        }
    }
}
