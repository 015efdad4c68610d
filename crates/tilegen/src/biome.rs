//! Biome categories and their elevation thresholds.
//!
//! Classification is a pure total function of elevation: every finite value maps
//! to exactly one category, ordered ocean < desert < plains < forest < mountain.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Ocean,
    Plains,
    Forest,
    Mountain,
    Desert,
    /// Reserved for manual assignment, never produced from elevation.
    City,
}

/// Base RGB color per biome, indexed by `Biome::index`.
const BIOME_COLORS: [[f32; 3]; 6] = [
    [0.10, 0.30, 0.75], // ocean: blue
    [0.60, 0.75, 0.25], // plains: green-yellow
    [0.08, 0.35, 0.12], // forest: dark green
    [0.50, 0.45, 0.38], // mountain: gray-brown
    [0.90, 0.68, 0.25], // desert: amber
    [0.55, 0.55, 0.55], // city: gray
];

impl Biome {
    pub const ALL: [Biome; 6] = [
        Biome::Ocean,
        Biome::Plains,
        Biome::Forest,
        Biome::Mountain,
        Biome::Desert,
        Biome::City,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn color(self) -> [f32; 3] {
        BIOME_COLORS[self.index()]
    }
}

/// Upper bounds (exclusive) of each elevation band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeThresholds {
    pub ocean: f32,
    pub desert: f32,
    pub plains: f32,
    pub forest: f32,
}

impl Default for BiomeThresholds {
    fn default() -> Self {
        Self {
            ocean: 0.45,
            desert: 0.50,
            plains: 0.70,
            forest: 0.80,
        }
    }
}

impl BiomeThresholds {
    /// True when the bands are strictly increasing and finite.
    pub fn is_ordered(&self) -> bool {
        let bounds = [self.ocean, self.desert, self.plains, self.forest];
        bounds.iter().all(|b| b.is_finite()) && bounds.windows(2).all(|w| w[0] < w[1])
    }

    /// Returns these thresholds if ordered, otherwise the canonical table.
    pub fn validated(self) -> Self {
        if self.is_ordered() {
            self
        } else {
            log::warn!("Biome thresholds {self:?} are not strictly increasing, using defaults");
            Self::default()
        }
    }

    pub fn classify(&self, elevation: f32) -> Biome {
        if elevation.is_nan() || elevation < self.ocean {
            Biome::Ocean
        } else if elevation < self.desert {
            Biome::Desert
        } else if elevation < self.plains {
            Biome::Plains
        } else if elevation < self.forest {
            Biome::Forest
        } else {
            Biome::Mountain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, Biome::Ocean)]
    #[case(0.449, Biome::Ocean)]
    #[case(0.45, Biome::Desert)]
    #[case(0.499, Biome::Desert)]
    #[case(0.50, Biome::Plains)]
    #[case(0.699, Biome::Plains)]
    #[case(0.70, Biome::Forest)]
    #[case(0.799, Biome::Forest)]
    #[case(0.80, Biome::Mountain)]
    #[case(1.0, Biome::Mountain)]
    #[case(1.05, Biome::Mountain)]
    #[case(-0.02, Biome::Ocean)]
    fn test_canonical_thresholds(#[case] elevation: f32, #[case] expected: Biome) {
        assert_eq!(BiomeThresholds::default().classify(elevation), expected);
    }

    fn rank(biome: Biome) -> usize {
        match biome {
            Biome::Ocean => 0,
            Biome::Desert => 1,
            Biome::Plains => 2,
            Biome::Forest => 3,
            Biome::Mountain => 4,
            Biome::City => unreachable!("city is never classified"),
        }
    }

    #[test]
    fn test_classification_is_monotonic_over_unit_range() {
        let thresholds = BiomeThresholds::default();
        let mut previous = 0;
        for i in 0..=10_000 {
            let elevation = i as f32 / 10_000.0;
            let current = rank(thresholds.classify(elevation));
            assert!(current >= previous, "category went down at {elevation}");
            previous = current;
        }
        assert_eq!(previous, 4);
    }

    #[test]
    fn test_nan_is_ocean() {
        assert_eq!(BiomeThresholds::default().classify(f32::NAN), Biome::Ocean);
    }

    #[test]
    fn test_city_is_unreachable_from_elevation() {
        let thresholds = BiomeThresholds::default();
        for i in -100..=200 {
            assert_ne!(thresholds.classify(i as f32 / 100.0), Biome::City);
        }
    }

    #[test]
    fn test_unordered_thresholds_fall_back_to_defaults() {
        let bad = BiomeThresholds {
            ocean: 0.5,
            desert: 0.4,
            plains: 0.7,
            forest: 0.8,
        };
        assert!(!bad.is_ordered());
        assert_eq!(bad.validated(), BiomeThresholds::default());
    }

    #[test]
    fn test_colors_are_distinct() {
        for a in Biome::ALL {
            for b in Biome::ALL {
                if a != b {
                    assert_ne!(a.color(), b.color(), "{a:?} and {b:?} share a color");
                }
            }
        }
    }
}
