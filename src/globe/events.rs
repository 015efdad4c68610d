use bevy::prelude::*;
use tilegen::TileId;

#[derive(Message)]
pub struct GenerateGlobeEvent;

#[derive(Message)]
pub struct TilePickedEvent {
    pub tile_id: TileId,
}

#[derive(Message)]
pub struct SetCameraPositionEvent {
    pub position: Vec3,
}
