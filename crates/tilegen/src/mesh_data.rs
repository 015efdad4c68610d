use crate::atlas::ColorAtlas;
use crate::globe::TileGlobe;

/// Raw mesh data that can be used by any rendering engine
///
/// One flat triangle per tile with three unshared vertices, so triangle `k`
/// is tile `k` and its vertices `3k..3k+3` carry the tile's atlas color.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn from_globe(globe: &TileGlobe) -> Self {
        let vertex_count = globe.tiles().len() * 3;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);

        for tile in globe.tiles() {
            let normal = globe.mesh().faces()[tile.face].normal();
            let corners = match globe.tile_corners(tile.id) {
                Ok(corners) => corners,
                Err(err) => {
                    log::warn!("Collapsing tile {}: {err}", tile.id);
                    [tile.center; 3]
                }
            };
            for corner in corners {
                positions.push(corner.to_array());
                normals.push(normal.to_array());
            }
        }

        Self {
            indices: (0..positions.len() as u32).collect(),
            colors: vertex_colors(globe.atlas(), globe.tiles().len()),
            positions,
            normals,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Per-vertex colors for the first `tile_count` tiles of `atlas`, three per tile.
pub fn vertex_colors(atlas: &ColorAtlas, tile_count: usize) -> Vec<[f32; 4]> {
    atlas
        .data()
        .chunks_exact(crate::atlas::CHANNELS)
        .take(tile_count)
        .flat_map(|cell| {
            let color = [cell[0], cell[1], cell[2], cell[3]];
            [color; 3]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GlobeSettings, generate};
    use crate::mesh::BaseMesh;
    use glam::Vec3;

    #[test]
    fn test_one_triangle_per_tile() {
        let globe = generate(BaseMesh::icosahedron(5.0), &GlobeSettings::default().with_level(3));
        let data = MeshData::from_globe(&globe);
        assert_eq!(data.triangle_count(), 180);
        assert_eq!(data.positions.len(), 540);
        assert_eq!(data.normals.len(), 540);
        assert_eq!(data.colors.len(), 540);
    }

    #[test]
    fn test_triangle_index_is_tile_id() {
        let globe = generate(BaseMesh::icosahedron(5.0), &GlobeSettings::default().with_level(4));
        let data = MeshData::from_globe(&globe);
        for (k, triangle) in data.indices.chunks_exact(3).enumerate() {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| Vec3::from(data.positions[i as usize]));
            let centroid = (a + b + c) / 3.0;
            assert_eq!(globe.pick(globe.tiles()[k].face, centroid), Some(k as u32));
        }
    }

    #[test]
    fn test_vertex_colors_follow_atlas_updates() {
        let mut globe = generate(BaseMesh::icosahedron(5.0), &GlobeSettings::default().with_level(2));
        globe.set_tile_color(3, [0.5, 0.0, 0.5]).unwrap();
        let colors = vertex_colors(globe.atlas(), globe.tiles().len());
        assert_eq!(colors.len(), 240);
        for color in &colors[9..12] {
            assert_eq!(*color, [0.5, 0.0, 0.5, 1.0]);
        }
        assert_eq!(colors[0], globe.tile_color(0).unwrap());
    }

    #[test]
    fn test_triangles_face_outward() {
        let globe = generate(BaseMesh::icosahedron(5.0), &GlobeSettings::default().with_level(2));
        let data = MeshData::from_globe(&globe);
        for triangle in data.positions.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(Vec3::from);
            assert!((b - a).cross(c - a).dot(a + b + c) > 0.0);
        }
    }
}
