pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
mod logic;

use crate::globe::events::*;
use crate::globe::resources::*;
use crate::globe::systems::*;
use bevy::prelude::*;

pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GenerateGlobeEvent>()
            .add_message::<TilePickedEvent>()
            .add_message::<SetCameraPositionEvent>()
            .init_resource::<GlobeSettings>()
            .init_resource::<CurrentGlobe>()
            .add_systems(Startup, request_initial_globe)
            .add_systems(
                Update,
                (
                    change_level_on_keys,
                    spawn_globe_on_event,
                    globe_control,
                    highlight_picked_tiles,
                    reset_highlights_on_key,
                    sync_atlas_colors,
                )
                    .chain(),
            );
    }
}
