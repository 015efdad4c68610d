use crate::subdivision::Barycentric;
use glam::Vec3;
use std::collections::HashMap;

/// One triangle of the coarse sphere, wound `(v1, v2, v3)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseFace {
    pub index: usize,
    pub vertices: [Vec3; 3],
}

impl BaseFace {
    pub fn new(index: usize, vertices: [Vec3; 3]) -> Self {
        Self { index, vertices }
    }

    /// `p = w*v1 + u*v2 + v*v3`
    pub fn point_at(&self, bary: Barycentric) -> Vec3 {
        let [v1, v2, v3] = self.vertices;
        v1 * bary.w() + v2 * bary.u + v3 * bary.v
    }

    /// Unit normal following the winding order, zero for a degenerate face.
    pub fn normal(&self) -> Vec3 {
        let [v1, v2, v3] = self.vertices;
        (v2 - v1).cross(v3 - v1).normalize_or_zero()
    }

    pub fn centroid(&self) -> Vec3 {
        let [v1, v2, v3] = self.vertices;
        (v1 + v2 + v3) / 3.0
    }
}

/// The base triangulated sphere. Faces are independent: no vertex sharing is assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseMesh {
    faces: Vec<BaseFace>,
}

impl BaseMesh {
    pub fn from_triangles(triangles: impl IntoIterator<Item = [Vec3; 3]>) -> Self {
        let faces = triangles
            .into_iter()
            .enumerate()
            .map(|(index, vertices)| BaseFace::new(index, vertices))
            .collect();
        Self { faces }
    }

    /// Regular icosahedron inscribed in a sphere of `radius`, wound outwards.
    pub fn icosahedron(radius: f32) -> Self {
        Self::icosphere(radius, 0)
    }

    /// Icosahedron whose faces are split `refinements` times by edge midpoints
    /// pushed back onto the sphere.
    pub fn icosphere(radius: f32, refinements: u32) -> Self {
        let (mut verts, mut faces) = icosahedron_topology();

        for _ in 0..refinements {
            let mut new_faces = Vec::with_capacity(faces.len() * 4);
            let mut edge_midpoints: HashMap<(usize, usize), usize> = HashMap::new();

            for [v0, v1, v2] in faces {
                let m01 = midpoint(&mut verts, &mut edge_midpoints, v0, v1);
                let m12 = midpoint(&mut verts, &mut edge_midpoints, v1, v2);
                let m20 = midpoint(&mut verts, &mut edge_midpoints, v2, v0);

                new_faces.push([v0, m01, m20]);
                new_faces.push([v1, m12, m01]);
                new_faces.push([v2, m20, m12]);
                new_faces.push([m01, m12, m20]);
            }
            faces = new_faces;
        }

        Self::from_triangles(
            faces
                .into_iter()
                .map(|[a, b, c]| [verts[a] * radius, verts[b] * radius, verts[c] * radius]),
        )
    }

    pub fn faces(&self) -> &[BaseFace] {
        &self.faces
    }

    pub fn face(&self, index: usize) -> Option<&BaseFace> {
        self.faces.get(index)
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

fn icosahedron_topology() -> (Vec<Vec3>, Vec<[usize; 3]>) {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let verts = vec![
        Vec3::new(-1.0, phi, 0.0).normalize(),
        Vec3::new(1.0, phi, 0.0).normalize(),
        Vec3::new(-1.0, -phi, 0.0).normalize(),
        Vec3::new(1.0, -phi, 0.0).normalize(),
        Vec3::new(0.0, -1.0, phi).normalize(),
        Vec3::new(0.0, 1.0, phi).normalize(),
        Vec3::new(0.0, -1.0, -phi).normalize(),
        Vec3::new(0.0, 1.0, -phi).normalize(),
        Vec3::new(phi, 0.0, -1.0).normalize(),
        Vec3::new(phi, 0.0, 1.0).normalize(),
        Vec3::new(-phi, 0.0, -1.0).normalize(),
        Vec3::new(-phi, 0.0, 1.0).normalize(),
    ];

    let faces = vec![
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    (verts, faces)
}

fn midpoint(
    verts: &mut Vec<Vec3>,
    cache: &mut HashMap<(usize, usize), usize>,
    a: usize,
    b: usize,
) -> usize {
    let key = if a < b { (a, b) } else { (b, a) };
    *cache.entry(key).or_insert_with(|| {
        verts.push(((verts[a] + verts[b]) * 0.5).normalize());
        verts.len() - 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 20)]
    #[case(1, 80)]
    #[case(2, 320)]
    fn test_icosphere_face_count(#[case] refinements: u32, #[case] expected: usize) {
        let mesh = BaseMesh::icosphere(1.0, refinements);
        assert_eq!(mesh.face_count(), expected);
        for (i, face) in mesh.faces().iter().enumerate() {
            assert_eq!(face.index, i);
        }
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn test_faces_wind_outwards(#[case] refinements: u32) {
        let mesh = BaseMesh::icosphere(5.0, refinements);
        for face in mesh.faces() {
            assert!(face.normal().dot(face.centroid()) > 0.0, "face {} winds inwards", face.index);
        }
    }

    #[test]
    fn test_vertices_lie_on_sphere() {
        let mesh = BaseMesh::icosphere(12.5, 1);
        for face in mesh.faces() {
            for v in face.vertices {
                assert!((v.length() - 12.5).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_point_at_matches_vertex_weights() {
        let face = BaseFace::new(0, [Vec3::X, Vec3::Y, Vec3::Z]);
        assert_eq!(face.point_at(Barycentric::new(0.0, 0.0)), Vec3::X);
        assert_eq!(face.point_at(Barycentric::new(1.0, 0.0)), Vec3::Y);
        assert_eq!(face.point_at(Barycentric::new(0.0, 1.0)), Vec3::Z);
    }
}
