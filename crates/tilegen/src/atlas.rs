use crate::error::TileError;
use crate::generator::{Tile, TileId};

pub const CHANNELS: usize = 4;
/// Cells past the last tile
pub const SENTINEL_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Tiles with no generated record
pub const MISSING_TILE_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

/// Square RGBA f32 buffer holding one cell per tile, row-major, cell index == tile id.
///
/// The atlas is the single writer of tile colors. Renderers read `data()` and
/// re-upload whenever `is_dirty()` reports a change since the last `clear_dirty()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAtlas {
    size: u32,
    total_tiles: u32,
    data: Vec<f32>,
    dirty: bool,
}

impl ColorAtlas {
    /// Smallest side whose square holds `total_tiles` cells, `ceil(sqrt(n))`.
    pub fn side_for(total_tiles: u32) -> u32 {
        let total = total_tiles as u64;
        let mut side = (total as f64).sqrt() as u64;
        while side * side < total {
            side += 1;
        }
        while side > 0 && (side - 1) * (side - 1) >= total {
            side -= 1;
        }
        side as u32
    }

    pub fn build(total_tiles: u32, tiles: &[Tile]) -> Self {
        let size = Self::side_for(total_tiles);
        let cells = size as usize * size as usize;
        let mut atlas = Self {
            size,
            total_tiles,
            data: SENTINEL_COLOR.repeat(cells),
            dirty: true,
        };

        let mut written = vec![false; total_tiles as usize];
        for tile in tiles {
            let [r, g, b] = tile.color;
            match atlas.write(tile.id, [r, g, b, 1.0]) {
                Ok(()) => written[tile.id as usize] = true,
                Err(err) => log::warn!("Skipping tile record: {err}"),
            }
        }

        let mut missing = 0usize;
        for (tile_id, _) in written.iter().enumerate().filter(|(_, w)| !**w) {
            let err = TileError::MissingTileData {
                tile_id: tile_id as u32,
            };
            log::debug!("{err}");
            // `written` has one slot per tile, so the cell exists
            let offset = tile_id * CHANNELS;
            atlas.data[offset..offset + CHANNELS].copy_from_slice(&MISSING_TILE_COLOR);
            missing += 1;
        }
        if missing > 0 {
            log::warn!("{missing} tiles had no generated record and use the missing-data color");
        }

        atlas
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_tiles(&self) -> u32 {
        self.total_tiles
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Raw bytes for a `size × size` RGBA32F texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn check(&self, tile_id: TileId) -> Result<usize, TileError> {
        if tile_id < self.total_tiles {
            Ok(tile_id as usize * CHANNELS)
        } else {
            Err(TileError::TileIdOutOfRange {
                tile_id,
                total_tiles: self.total_tiles,
            })
        }
    }

    /// `(x, y)` with `x = id mod size`, `y = id div size`.
    pub fn cell_coords(&self, tile_id: TileId) -> Result<(u32, u32), TileError> {
        self.check(tile_id)?;
        Ok((tile_id % self.size, tile_id / self.size))
    }

    pub fn get(&self, tile_id: TileId) -> Result<[f32; 4], TileError> {
        let offset = self.check(tile_id)?;
        let mut color = [0.0; CHANNELS];
        color.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        Ok(color)
    }

    /// Overwrites one tile's color with alpha 1.0; out-of-range ids leave the buffer untouched.
    pub fn update(&mut self, tile_id: TileId, color: [f32; 3]) -> Result<(), TileError> {
        let [r, g, b] = color;
        self.write(tile_id, [r, g, b, 1.0])?;
        self.dirty = true;
        Ok(())
    }

    fn write(&mut self, tile_id: TileId, color: [f32; 4]) -> Result<(), TileError> {
        let offset = self.check(tile_id)?;
        self.data[offset..offset + CHANNELS].copy_from_slice(&color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::Biome;
    use glam::Vec3;
    use rstest::rstest;

    fn tile(id: TileId, biome: Biome) -> Tile {
        Tile {
            id,
            face: 0,
            sub_index: id,
            biome,
            elevation: 0.5,
            center: Vec3::ZERO,
            color: biome.color(),
        }
    }

    fn tiles(count: u32) -> Vec<Tile> {
        (0..count).map(|id| tile(id, Biome::ALL[id as usize % 5])).collect()
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(4, 2)]
    #[case(5, 3)]
    #[case(10, 4)]
    #[case(16, 4)]
    #[case(17, 5)]
    #[case(2000, 45)]
    #[case(2025, 45)]
    fn test_side_is_ceil_sqrt(#[case] total: u32, #[case] expected: u32) {
        assert_eq!(ColorAtlas::side_for(total), expected);
    }

    #[test]
    fn test_ten_tiles_use_four_by_four_with_sentinel_tail() {
        let atlas = ColorAtlas::build(10, &tiles(10));
        assert_eq!(atlas.size(), 4);
        assert_eq!(atlas.data().len(), 4 * 4 * CHANNELS);
        for cell in 10..16 {
            assert_eq!(&atlas.data()[cell * CHANNELS..(cell + 1) * CHANNELS], &SENTINEL_COLOR);
        }
        for id in 0..10 {
            let [r, g, b] = Biome::ALL[id as usize % 5].color();
            assert_eq!(atlas.get(id).unwrap(), [r, g, b, 1.0]);
        }
    }

    #[test]
    fn test_update_changes_only_target_cell() {
        let mut atlas = ColorAtlas::build(10, &tiles(10));
        atlas.clear_dirty();
        let before = atlas.data().to_vec();

        atlas.update(7, [0.25, 0.5, 0.75]).unwrap();

        let after = atlas.get(7).unwrap();
        for (a, e) in after.iter().zip([0.25, 0.5, 0.75, 1.0]) {
            assert!((a - e).abs() < 1e-6);
        }
        for (i, (old, new)) in before.iter().zip(atlas.data()).enumerate() {
            if i / CHANNELS != 7 {
                assert_eq!(old, new, "channel {i} changed");
            }
        }
        assert!(atlas.is_dirty());
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut once = ColorAtlas::build(10, &tiles(10));
        let mut twice = once.clone();
        once.update(3, [0.1, 0.2, 0.3]).unwrap();
        twice.update(3, [0.1, 0.2, 0.3]).unwrap();
        twice.update(3, [0.1, 0.2, 0.3]).unwrap();
        assert_eq!(once.data(), twice.data());
    }

    #[rstest]
    #[case(10)]
    #[case(15)]
    #[case(u32::MAX)]
    fn test_out_of_range_update_is_rejected_without_mutation(#[case] tile_id: TileId) {
        let mut atlas = ColorAtlas::build(10, &tiles(10));
        atlas.clear_dirty();
        let before = atlas.clone();

        let result = atlas.update(tile_id, [1.0, 1.0, 1.0]);

        assert_eq!(
            result,
            Err(TileError::TileIdOutOfRange {
                tile_id,
                total_tiles: 10
            })
        );
        assert_eq!(atlas, before);
        assert!(!atlas.is_dirty());
        assert!(atlas.get(tile_id).is_err());
    }

    #[test]
    fn test_missing_records_get_missing_color() {
        let mut partial = tiles(10);
        partial.retain(|t| t.id != 4);
        let atlas = ColorAtlas::build(10, &partial);
        assert_eq!(atlas.get(4).unwrap(), MISSING_TILE_COLOR);
        assert_ne!(atlas.get(5).unwrap(), MISSING_TILE_COLOR);
    }

    #[test]
    fn test_atlas_without_records_is_all_missing_color() {
        let atlas = ColorAtlas::build(5, &[]);
        for id in 0..5 {
            assert_eq!(atlas.get(id).unwrap(), MISSING_TILE_COLOR);
        }
        for cell in 5..9 {
            assert_eq!(&atlas.data()[cell * CHANNELS..(cell + 1) * CHANNELS], &SENTINEL_COLOR);
        }
    }

    #[test]
    fn test_records_beyond_total_are_ignored() {
        let atlas = ColorAtlas::build(4, &tiles(6));
        assert_eq!(atlas.size(), 2);
        assert_eq!(atlas.data().len(), 2 * 2 * CHANNELS);
    }

    #[rstest]
    #[case(0, (0, 0))]
    #[case(3, (3, 0))]
    #[case(4, (0, 1))]
    #[case(9, (1, 2))]
    fn test_cell_coords(#[case] tile_id: TileId, #[case] expected: (u32, u32)) {
        let atlas = ColorAtlas::build(10, &tiles(10));
        assert_eq!(atlas.cell_coords(tile_id).unwrap(), expected);
    }

    #[test]
    fn test_bytes_cover_every_channel() {
        let atlas = ColorAtlas::build(10, &tiles(10));
        assert_eq!(atlas.as_bytes().len(), 16 * CHANNELS * 4);
    }

    #[test]
    fn test_new_atlas_starts_dirty() {
        let mut atlas = ColorAtlas::build(1, &tiles(1));
        assert!(atlas.is_dirty());
        atlas.clear_dirty();
        assert!(!atlas.is_dirty());
    }
}
