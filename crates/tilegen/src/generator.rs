use crate::atlas::ColorAtlas;
use crate::biome::{Biome, BiomeThresholds};
use crate::config::{ElevationConfig, TileGenConfig};
use crate::elevation::ElevationSampler;
use crate::globe::TileGlobe;
use crate::mesh::BaseMesh;
use crate::picker::{TilePicker, compose_tile_id};
use crate::subdivision::{SubdivisionIndexer, SubdivisionLevel};
use glam::Vec3;

/// Dense global tile identifier: `face * sub_tiles_per_face + sub_index`.
pub type TileId = u32;

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub face: usize,
    pub sub_index: u32,
    pub biome: Biome,
    pub elevation: f32,
    /// Representative point the elevation was sampled at
    pub center: Vec3,
    /// Generated color, the atlas holds the current one
    pub color: [f32; 3],
}

#[derive(Debug, Clone)]
pub struct GlobeSettings {
    /// Requested level, clamped to `[1, 10]` at build time
    pub subdivision_level: u32,
    pub elevation: ElevationConfig,
    pub thresholds: BiomeThresholds,
    pub edge_epsilon: f32,
    pub degenerate_epsilon: f32,
}

impl GlobeSettings {
    pub fn from_config(config: &TileGenConfig) -> Self {
        Self {
            subdivision_level: config.generation.default_subdivision_level,
            elevation: config.elevation.clone(),
            thresholds: config.biomes.clone(),
            edge_epsilon: config.picking.edge_epsilon,
            degenerate_epsilon: config.picking.degenerate_epsilon,
        }
    }

    pub fn with_level(mut self, subdivision_level: u32) -> Self {
        self.subdivision_level = subdivision_level;
        self
    }
}

impl Default for GlobeSettings {
    fn default() -> Self {
        Self::from_config(&TileGenConfig::default())
    }
}

/// Builds every tile of `mesh` in one deterministic pass and packs their colors.
pub fn generate(mesh: BaseMesh, settings: &GlobeSettings) -> TileGlobe {
    let level = SubdivisionLevel::clamped(settings.subdivision_level);
    let indexer = SubdivisionIndexer::new(level).with_edge_epsilon(settings.edge_epsilon);
    let sampler = ElevationSampler::from_config(&settings.elevation);
    let thresholds = settings.thresholds.clone().validated();

    let tiles = generate_tiles(&mesh, &indexer, &sampler, &thresholds);
    let total_tiles = mesh.face_count() as u32 * indexer.sub_tiles_per_face();
    let atlas = ColorAtlas::build(total_tiles, &tiles);
    let picker = TilePicker::new(&mesh, indexer, settings.degenerate_epsilon);

    let globe = TileGlobe::from_parts(mesh, indexer, tiles, atlas, picker);
    log::info!(
        "Generated {} tiles ({} faces at level {}), biomes: {:?}",
        globe.total_tiles(),
        globe.face_count(),
        level.get(),
        globe.biome_histogram()
    );
    globe
}

/// Generates tiles face by face in ascending cell order, so `tiles[id].id == id`.
pub fn generate_tiles(
    mesh: &BaseMesh,
    indexer: &SubdivisionIndexer,
    sampler: &ElevationSampler,
    thresholds: &BiomeThresholds,
) -> Vec<Tile> {
    let per_face = indexer.sub_tiles_per_face();
    let mut tiles = Vec::with_capacity(mesh.face_count() * per_face as usize);

    for face in mesh.faces() {
        // cells() walks the face in ascending sub-index order
        for (sub_index, cell) in (0..per_face).zip(indexer.cells()) {
            let center = face.point_at(indexer.cell_center(cell));
            let elevation = sampler.sample(center);
            let biome = thresholds.classify(elevation);
            let id = compose_tile_id(face.index, sub_index, per_face);
            debug_assert_eq!(id as usize, tiles.len());

            tiles.push(Tile {
                id,
                face: face.index,
                sub_index,
                biome,
                elevation,
                center,
                color: biome.color(),
            });
        }
    }
    tiles
}
