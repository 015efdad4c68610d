mod core;
mod globe;
mod helpers;

use crate::core::camera::CameraPlugin;
use crate::globe::GlobePlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;

pub struct TileGlobePlugin;

impl Plugin for TileGlobePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CameraPlugin, GlobePlugin));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
