use thiserror::Error;

/// Failures raised by tile generation, picking and atlas access.
///
/// Every variant is local and recoverable: callers either clamp, fall back to a
/// sentinel, or report "no tile" instead of aborting the build or interaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("subdivision level {requested} is outside [{min}, {max}]")]
    InvalidSubdivisionLevel { requested: u32, min: u32, max: u32 },

    #[error("base face {face} is degenerate, barycentric weights are undefined")]
    DegenerateFace { face: usize },

    #[error("tile id {tile_id} is out of range (total tiles: {total_tiles})")]
    TileIdOutOfRange { tile_id: u32, total_tiles: u32 },

    #[error("no generated tile record for id {tile_id}")]
    MissingTileData { tile_id: u32 },

    #[error("base face {face} is out of range (face count: {face_count})")]
    FaceIndexOutOfRange { face: usize, face_count: usize },
}

/// Failures while reading or writing `tilegen_config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
