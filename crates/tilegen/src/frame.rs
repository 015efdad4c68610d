use crate::error::TileError;
use crate::mesh::BaseFace;
use crate::subdivision::Barycentric;
use glam::Vec3;

pub const DEFAULT_DEGENERATE_EPSILON: f32 = 1e-6;

/// Canonical local frame of one base face: origin `v1`, axes `v2 - v1` (u) and
/// `v3 - v1` (v), with the Gram terms precomputed for Cramer's rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    origin: Vec3,
    edge_u: Vec3,
    edge_v: Vec3,
    d00: f32,
    d01: f32,
    d11: f32,
    inv_denom: f32,
}

impl FaceFrame {
    /// Fails with `DegenerateFace` when the face's edges are (nearly) parallel or
    /// zero-length; `epsilon` is relative to the squared edge lengths.
    pub fn new(face: &BaseFace, epsilon: f32) -> Result<Self, TileError> {
        let [v1, v2, v3] = face.vertices;
        let edge_u = v2 - v1;
        let edge_v = v3 - v1;
        let d00 = edge_u.dot(edge_u);
        let d01 = edge_u.dot(edge_v);
        let d11 = edge_v.dot(edge_v);
        let denom = d00 * d11 - d01 * d01;

        if !denom.is_finite() || denom.abs() <= epsilon * d00 * d11 {
            return Err(TileError::DegenerateFace { face: face.index });
        }

        Ok(Self {
            origin: v1,
            edge_u,
            edge_v,
            d00,
            d01,
            d11,
            inv_denom: 1.0 / denom,
        })
    }

    /// Barycentric weights of `point` projected onto the face plane.
    pub fn to_barycentric(&self, point: Vec3) -> Barycentric {
        let d = point - self.origin;
        let d20 = d.dot(self.edge_u);
        let d21 = d.dot(self.edge_v);
        Barycentric::new(
            (self.d11 * d20 - self.d01 * d21) * self.inv_denom,
            (self.d00 * d21 - self.d01 * d20) * self.inv_denom,
        )
    }

    pub fn to_point(&self, bary: Barycentric) -> Vec3 {
        self.origin + self.edge_u * bary.u + self.edge_v * bary.v
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn normal(&self) -> Vec3 {
        self.edge_u.cross(self.edge_v).normalize_or_zero()
    }
}

/// Builds one frame per face; degenerate faces map to `None` and are logged.
pub fn build_frames(faces: &[BaseFace], epsilon: f32) -> Vec<Option<FaceFrame>> {
    faces
        .iter()
        .map(|face| match FaceFrame::new(face, epsilon) {
            Ok(frame) => Some(frame),
            Err(err) => {
                log::warn!("{err}");
                None
            }
        })
        .collect()
}
