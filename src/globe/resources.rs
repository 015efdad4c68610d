use crate::globe::logic::settings_from_config;
use bevy::prelude::Resource;
use tilegen::{TileGlobe, TileId};

#[derive(Resource, Clone)]
pub struct GlobeSettings {
    pub subdivision_level: u32,
    pub radius: f32,
    pub icosphere_refinements: u32,
    pub highlight_color: [f32; 3],
}

impl Default for GlobeSettings {
    fn default() -> Self {
        let config = tilegen::get_config();
        settings_from_config(&config, config.generation.default_subdivision_level)
    }
}

impl GlobeSettings {
    /// Generation parameters from the current config file, at this level.
    pub fn generation_settings(&self) -> tilegen::GlobeSettings {
        tilegen::GlobeSettings::from_config(&tilegen::get_config()).with_level(self.subdivision_level)
    }
}

#[derive(Resource, Default)]
pub struct CurrentGlobe {
    pub globe: Option<TileGlobe>,
    /// Tiles painted with the highlight color, in pick order
    pub highlighted: Vec<TileId>,
}
