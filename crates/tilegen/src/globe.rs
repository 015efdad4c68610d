use crate::atlas::ColorAtlas;
use crate::biome::Biome;
use crate::error::TileError;
use crate::generator::{Tile, TileId};
use crate::mesh::BaseMesh;
use crate::picker::TilePicker;
use crate::subdivision::{SubdivisionIndexer, SubdivisionLevel};
use glam::Vec3;

/// A tiled sphere: base mesh, generated tiles, their color atlas and a picker.
///
/// Tiles are stored densely by id. After generation only tile colors change,
/// and only through the atlas.
#[derive(Debug, Clone)]
pub struct TileGlobe {
    mesh: BaseMesh,
    indexer: SubdivisionIndexer,
    tiles: Vec<Tile>,
    atlas: ColorAtlas,
    picker: TilePicker,
}

impl TileGlobe {
    pub(crate) fn from_parts(
        mesh: BaseMesh,
        indexer: SubdivisionIndexer,
        tiles: Vec<Tile>,
        atlas: ColorAtlas,
        picker: TilePicker,
    ) -> Self {
        Self {
            mesh,
            indexer,
            tiles,
            atlas,
            picker,
        }
    }

    pub fn mesh(&self) -> &BaseMesh {
        &self.mesh
    }

    pub fn indexer(&self) -> &SubdivisionIndexer {
        &self.indexer
    }

    pub fn level(&self) -> SubdivisionLevel {
        self.indexer.level()
    }

    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    pub fn sub_tiles_per_face(&self) -> u32 {
        self.indexer.sub_tiles_per_face()
    }

    pub fn total_tiles(&self) -> u32 {
        self.face_count() as u32 * self.sub_tiles_per_face()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, tile_id: TileId) -> Result<&Tile, TileError> {
        if tile_id >= self.total_tiles() {
            return Err(TileError::TileIdOutOfRange {
                tile_id,
                total_tiles: self.total_tiles(),
            });
        }
        self.tiles
            .get(tile_id as usize)
            .ok_or(TileError::MissingTileData { tile_id })
    }

    /// World-space corners of a tile, wound like its base face.
    pub fn tile_corners(&self, tile_id: TileId) -> Result<[Vec3; 3], TileError> {
        let tile = self.tile(tile_id)?;
        let face = &self.mesh.faces()[tile.face];
        let cell = self
            .indexer
            .index_to_cell(tile.sub_index)
            .ok_or(TileError::MissingTileData { tile_id })?;
        Ok(self.indexer.cell_corners(cell).map(|corner| face.point_at(corner)))
    }

    pub fn atlas(&self) -> &ColorAtlas {
        &self.atlas
    }

    pub fn atlas_mut(&mut self) -> &mut ColorAtlas {
        &mut self.atlas
    }

    pub fn tile_color(&self, tile_id: TileId) -> Result<[f32; 4], TileError> {
        self.atlas.get(tile_id)
    }

    pub fn set_tile_color(&mut self, tile_id: TileId, color: [f32; 3]) -> Result<(), TileError> {
        self.atlas.update(tile_id, color)
    }

    /// Restores the color generated from the tile's biome.
    pub fn reset_tile_color(&mut self, tile_id: TileId) -> Result<(), TileError> {
        let color = self.tile(tile_id)?.color;
        self.atlas.update(tile_id, color)
    }

    pub fn pick(&self, face: usize, point: Vec3) -> Option<TileId> {
        self.picker.pick(face, point)
    }

    pub fn pick_point(&self, point: Vec3) -> Option<TileId> {
        self.picker.pick_point(point)
    }

    pub fn picker(&self) -> &TilePicker {
        &self.picker
    }

    /// Tile count per biome, indexed by `Biome::index`.
    pub fn biome_histogram(&self) -> [usize; 6] {
        let mut counts = [0usize; 6];
        for tile in &self.tiles {
            counts[tile.biome.index()] += 1;
        }
        counts
    }

    pub fn count_of(&self, biome: Biome) -> usize {
        self.biome_histogram()[biome.index()]
    }
}
