//! Bijection between a linear sub-tile index and a barycentric sub-cell of one base face.
//!
//! A face is cut into an N×N grid of parallelograms by stepping the barycentric
//! weights `u` (columns) and `v` (rows) in steps of `1/N`. Every parallelogram
//! splits along its diagonal into a lower and an upper half-cell; the upper half
//! of a cell touching the hypotenuse (`row + col == N - 1`) lies outside the face.
//! Row `r` therefore holds `2(N - r) - 1` half-cells and starts at `r(2N - r)`:
//!
//! ```text
//! N = 3      v
//!            ^
//!   row 2    | 8
//!   row 1    | 5 6 7
//!   row 0    | 0 1 2 3 4
//!            +-----------> u
//! ```
//!
//! Generation and picking both go through this module, so they cannot disagree.

use crate::error::TileError;

pub const MIN_SUBDIVISION_LEVEL: u32 = 1;
pub const MAX_SUBDIVISION_LEVEL: u32 = 10;
pub const DEFAULT_EDGE_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubdivisionLevel(u32);

impl SubdivisionLevel {
    pub fn new(level: u32) -> Result<Self, TileError> {
        if (MIN_SUBDIVISION_LEVEL..=MAX_SUBDIVISION_LEVEL).contains(&level) {
            Ok(Self(level))
        } else {
            Err(TileError::InvalidSubdivisionLevel {
                requested: level,
                min: MIN_SUBDIVISION_LEVEL,
                max: MAX_SUBDIVISION_LEVEL,
            })
        }
    }

    /// Like `new`, but pulls out-of-range levels to the nearest bound.
    pub fn clamped(level: u32) -> Self {
        Self::new(level).unwrap_or_else(|err| {
            log::warn!("{err}, clamping");
            Self(level.clamp(MIN_SUBDIVISION_LEVEL, MAX_SUBDIVISION_LEVEL))
        })
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn sub_tiles_per_face(self) -> u32 {
        self.0 * self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Lower = 0,
    Upper = 1,
}

/// One triangular half-cell of the subdivision grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubCell {
    /// Position along the `v` axis
    pub row: u32,
    /// Position along the `u` axis
    pub col: u32,
    pub orientation: Orientation,
}

impl SubCell {
    pub fn new(row: u32, col: u32, orientation: Orientation) -> Self {
        Self {
            row,
            col,
            orientation,
        }
    }
}

/// Barycentric weights of a point relative to a face `(v1, v2, v3)`.
///
/// `u` weights `v2`, `v` weights `v3`, and the implicit `w = 1 - u - v` weights `v1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    pub u: f32,
    pub v: f32,
}

impl Barycentric {
    pub fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    pub fn w(self) -> f32 {
        1.0 - self.u - self.v
    }

    /// True when all three weights are `>= -epsilon`.
    pub fn is_inside(self, epsilon: f32) -> bool {
        self.u >= -epsilon && self.v >= -epsilon && self.w() >= -epsilon
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubdivisionIndexer {
    level: SubdivisionLevel,
    edge_epsilon: f32,
}

impl SubdivisionIndexer {
    pub fn new(level: SubdivisionLevel) -> Self {
        Self {
            level,
            edge_epsilon: DEFAULT_EDGE_EPSILON,
        }
    }

    pub fn with_edge_epsilon(mut self, edge_epsilon: f32) -> Self {
        self.edge_epsilon = edge_epsilon.max(0.0);
        self
    }

    pub fn level(&self) -> SubdivisionLevel {
        self.level
    }

    pub fn edge_epsilon(&self) -> f32 {
        self.edge_epsilon
    }

    pub fn sub_tiles_per_face(&self) -> u32 {
        self.level.sub_tiles_per_face()
    }

    fn n(&self) -> u32 {
        self.level.get()
    }

    /// Index of the first half-cell in `row`.
    fn row_start(&self, row: u32) -> u32 {
        row * (2 * self.n() - row)
    }

    pub fn contains(&self, cell: SubCell) -> bool {
        let n = self.n();
        let diagonal = cell.row + cell.col;
        match cell.orientation {
            Orientation::Lower => diagonal < n,
            Orientation::Upper => diagonal + 1 < n,
        }
    }

    /// Forward direction: `row * (2N - row) + col * 2 + orientation`, `None`
    /// for cells outside the face.
    pub fn cell_to_index(&self, cell: SubCell) -> Option<u32> {
        self.contains(cell).then(|| self.index_of(cell))
    }

    fn index_of(&self, cell: SubCell) -> u32 {
        self.row_start(cell.row) + cell.col * 2 + cell.orientation as u32
    }

    pub fn index_to_cell(&self, sub_index: u32) -> Option<SubCell> {
        if sub_index >= self.sub_tiles_per_face() {
            return None;
        }
        // At most ten rows, a scan is cheaper than solving the quadratic
        let row = (0..self.n())
            .take_while(|&r| self.row_start(r + 1) <= sub_index)
            .count() as u32;
        let offset = sub_index - self.row_start(row);
        let orientation = if offset % 2 == 0 {
            Orientation::Lower
        } else {
            Orientation::Upper
        };
        Some(SubCell::new(row, offset / 2, orientation))
    }

    /// Barycentric centroid of a half-cell.
    pub fn cell_center(&self, cell: SubCell) -> Barycentric {
        let n = self.n() as f32;
        let offset = match cell.orientation {
            Orientation::Lower => 1.0 / 3.0,
            Orientation::Upper => 2.0 / 3.0,
        };
        Barycentric::new(
            (cell.col as f32 + offset) / n,
            (cell.row as f32 + offset) / n,
        )
    }

    /// Corners of a half-cell, wound the same way as the base face.
    pub fn cell_corners(&self, cell: SubCell) -> [Barycentric; 3] {
        let n = self.n() as f32;
        let (c, r) = (cell.col as f32, cell.row as f32);
        let at = |du: f32, dv: f32| Barycentric::new((c + du) / n, (r + dv) / n);
        match cell.orientation {
            Orientation::Lower => [at(0.0, 0.0), at(1.0, 0.0), at(0.0, 1.0)],
            Orientation::Upper => [at(1.0, 0.0), at(1.0, 1.0), at(0.0, 1.0)],
        }
    }

    fn snap(&self, weight: f32) -> f32 {
        if weight < self.edge_epsilon {
            0.0
        } else if weight > 1.0 - self.edge_epsilon {
            1.0
        } else {
            weight
        }
    }

    /// Inverse direction: the half-cell containing a barycentric point.
    ///
    /// Points outside the face are first moved to the nearest point of the face:
    /// negative weights clamp to zero and points beyond the hypotenuse project
    /// onto `u + v = 1`. Points on shared edges resolve to the lower half-cell.
    pub fn bary_to_cell(&self, bary: Barycentric) -> SubCell {
        let n = self.n();
        let last = (n - 1) as i64;
        let (mut u, mut v) = (bary.u.clamp(0.0, 1.0), bary.v.clamp(0.0, 1.0));
        let excess = u + v - 1.0;
        if excess > 0.0 {
            u -= excess * 0.5;
            v -= excess * 0.5;
        }
        let u = self.snap(u);
        let v = self.snap(v);

        let su = u * n as f32;
        let sv = v * n as f32;
        let col = (su.floor() as i64).clamp(0, last);
        let row = (sv.floor() as i64).clamp(0, last);
        let local_u = su - col as f32;
        let local_v = sv - row as f32;

        if row + col > last {
            // A grid vertex on the hypotenuse: last cell of its row
            return SubCell::new(row as u32, (last - row) as u32, Orientation::Lower);
        }

        let orientation = if local_u + local_v > 1.0 && row + col < last {
            Orientation::Upper
        } else {
            Orientation::Lower
        };
        SubCell::new(row as u32, col as u32, orientation)
    }

    pub fn bary_to_index(&self, bary: Barycentric) -> u32 {
        // bary_to_cell only produces cells inside the face
        self.index_of(self.bary_to_cell(bary))
    }

    /// All valid half-cells in ascending index order.
    pub fn cells(&self) -> impl Iterator<Item = SubCell> + '_ {
        let n = self.n();
        (0..n).flat_map(move |row| {
            (0..n - row).flat_map(move |col| {
                let lower = SubCell::new(row, col, Orientation::Lower);
                let upper = (row + col + 1 < n).then(|| SubCell::new(row, col, Orientation::Upper));
                std::iter::once(lower).chain(upper)
            })
        })
    }
}
