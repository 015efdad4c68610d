use crate::error::TileError;
use crate::frame::{FaceFrame, build_frames};
use crate::generator::TileId;
use crate::mesh::BaseMesh;
use crate::subdivision::SubdivisionIndexer;
use glam::Vec3;

pub fn compose_tile_id(face: usize, sub_index: u32, sub_tiles_per_face: u32) -> TileId {
    face as u32 * sub_tiles_per_face + sub_index
}

/// Splits a tile id back into `(face, sub_index)`.
pub fn decompose_tile_id(tile_id: TileId, sub_tiles_per_face: u32) -> (usize, u32) {
    (
        (tile_id / sub_tiles_per_face) as usize,
        tile_id % sub_tiles_per_face,
    )
}

/// Resolves surface hit points into tile ids using the same indexer the tiles
/// were generated with.
#[derive(Debug, Clone)]
pub struct TilePicker {
    indexer: SubdivisionIndexer,
    frames: Vec<Option<FaceFrame>>,
    edge_epsilon: f32,
}

impl TilePicker {
    pub fn new(mesh: &BaseMesh, indexer: SubdivisionIndexer, degenerate_epsilon: f32) -> Self {
        Self {
            indexer,
            frames: build_frames(mesh.faces(), degenerate_epsilon),
            edge_epsilon: indexer.edge_epsilon(),
        }
    }

    pub fn indexer(&self) -> &SubdivisionIndexer {
        &self.indexer
    }

    /// Tile under `point`, a hit known to lie on base face `face`.
    pub fn locate(&self, face: usize, point: Vec3) -> Result<TileId, TileError> {
        let frame = self
            .frames
            .get(face)
            .ok_or(TileError::FaceIndexOutOfRange {
                face,
                face_count: self.frames.len(),
            })?
            .as_ref()
            .ok_or(TileError::DegenerateFace { face })?;

        let bary = frame.to_barycentric(point);
        let sub_index = self.indexer.bary_to_index(bary);
        Ok(compose_tile_id(face, sub_index, self.indexer.sub_tiles_per_face()))
    }

    /// Like `locate`, but reports failures as "no tile".
    pub fn pick(&self, face: usize, point: Vec3) -> Option<TileId> {
        match self.locate(face, point) {
            Ok(tile_id) => Some(tile_id),
            Err(err) => {
                log::debug!("No tile at {point}: {err}");
                None
            }
        }
    }

    /// Base face hit by the ray from the origin through `point`.
    ///
    /// The built-in spheres are centered on the origin. Meshes built with
    /// `BaseMesh::from_triangles` must be too, or faces resolve wrongly.
    ///
    /// Falls back to the face whose normal best matches the direction when float
    /// noise puts the intersection just outside every face.
    pub fn locate_face(&self, point: Vec3) -> Option<usize> {
        let dir = point.try_normalize()?;
        let mut best: Option<(usize, f32)> = None;

        for (face, frame) in self.frames.iter().enumerate() {
            let Some(frame) = frame else {
                continue;
            };
            let normal = frame.normal();
            let facing = normal.dot(dir);
            if facing <= 0.0 {
                continue;
            }
            let t = normal.dot(frame.origin()) / facing;
            if t > 0.0 && frame.to_barycentric(dir * t).is_inside(self.edge_epsilon) {
                return Some(face);
            }
            if best.is_none_or(|(_, score)| facing > score) {
                best = Some((face, facing));
            }
        }

        best.map(|(face, _)| face)
    }

    /// Tile under `point` when the hit face is unknown.
    pub fn pick_point(&self, point: Vec3) -> Option<TileId> {
        let face = self.locate_face(point)?;
        self.pick(face, point)
    }
}
