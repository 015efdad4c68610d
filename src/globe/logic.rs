use crate::globe::resources::GlobeSettings;
use tilegen::config::TileGenConfig;
use tilegen::subdivision::{MAX_SUBDIVISION_LEVEL, MIN_SUBDIVISION_LEVEL};

/// Viewer settings from a freshly loaded config, keeping the level the user picked.
pub fn settings_from_config(config: &TileGenConfig, subdivision_level: u32) -> GlobeSettings {
    GlobeSettings {
        subdivision_level,
        radius: config.generation.radius,
        icosphere_refinements: config.generation.icosphere_refinements,
        highlight_color: config.interaction.highlight_color,
    }
}

/// Level after a `+`/`-` key press, kept within the supported range.
pub fn step_level(level: u32, delta: i32) -> u32 {
    let stepped = level as i64 + delta as i64;
    stepped.clamp(MIN_SUBDIVISION_LEVEL as i64, MAX_SUBDIVISION_LEVEL as i64) as u32
}

/// Camera distance range for a globe of `radius`.
pub fn zoom_range(radius: f32) -> (f32, f32) {
    (radius * 1.5, radius * 6.0)
}
