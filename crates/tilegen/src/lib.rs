pub mod atlas;
pub mod biome;
pub mod config;
pub mod elevation;
pub mod error;
pub mod frame;
pub mod generator;
pub mod globe;
pub mod mesh;
pub mod mesh_data;
pub mod picker;
pub mod subdivision;

pub use config::{get_config, reload_config};
pub use error::{ConfigError, TileError};
pub use generator::{GlobeSettings, Tile, TileId, generate};
pub use globe::TileGlobe;
pub use glam;
