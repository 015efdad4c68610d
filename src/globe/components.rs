use bevy::prelude::*;

#[derive(Component)]
pub struct GlobeEntity;

/// The child entity carrying the tile mesh, one triangle per tile.
#[derive(Component)]
pub struct TileMesh;

#[derive(Component)]
pub struct GlobeControls {
    pub rotation: Quat,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}
