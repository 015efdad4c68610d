use crate::config::{ElevationConfig, NoiseConfig};
use glam::Vec3;

/// Layered 3D noise: continental, regional and local octaves summed into one
/// elevation scalar in roughly `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ElevationSampler {
    /// Large features (low frequency)
    pub continental: NoiseConfig,
    /// Mid-sized features
    pub regional: NoiseConfig,
    /// Small detail
    pub local: NoiseConfig,
}

impl ElevationSampler {
    pub fn from_config(cfg: &ElevationConfig) -> Self {
        Self {
            continental: NoiseConfig::new(
                cfg.continental.table,
                cfg.continental.frequency,
                cfg.continental.weight,
            ),
            regional: NoiseConfig::new(cfg.regional.table, cfg.regional.frequency, cfg.regional.weight),
            local: NoiseConfig::new(cfg.local.table, cfg.local.frequency, cfg.local.weight),
        }
    }

    pub fn sample(&self, position: Vec3) -> f32 {
        self.continental.sample_unit(position)
            + self.regional.sample_unit(position)
            + self.local.sample_unit(position)
    }
}

impl Default for ElevationSampler {
    fn default() -> Self {
        Self::from_config(&crate::config::TileGenConfig::default().elevation)
    }
}
