//! Board features scored by the search
//!
//! All features are measured on a locked grid, after row clearing. Heights are
//! counted from the floor, so an empty column has height 0 and a full one has
//! the board height.

use std::fmt;

use blockfall_core::{Grid, Occupancy};
use serde::{Deserialize, Serialize};

/// A named, weightable board measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Feature {
    AggregateHeight,
    MaxHeight,
    HeightVariance,
    Bumpiness,
    /// Empty cells below the top of their column
    CoveredHoles,
    /// Empty cells whose four neighbours are all occupied; walls do not count
    EnclosedHoles,
    Wells,
    /// Rows cleared by the placement being scored
    Lines,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::AggregateHeight,
        Feature::MaxHeight,
        Feature::HeightVariance,
        Feature::Bumpiness,
        Feature::CoveredHoles,
        Feature::EnclosedHoles,
        Feature::Wells,
        Feature::Lines,
    ];

    /// Parse a feature name; accepts a few common spellings, case-insensitive.
    pub fn parse(name: &str) -> Option<Self> {
        let k = name.trim().to_ascii_lowercase();
        match k.as_str() {
            "agg_h" | "agg_height" | "aggregate_height" | "height" => Some(Self::AggregateHeight),
            "max_h" | "max_height" => Some(Self::MaxHeight),
            "var_h" | "var_height" | "height_variance" => Some(Self::HeightVariance),
            "bump" | "bumpiness" => Some(Self::Bumpiness),
            "holes" | "covered_holes" => Some(Self::CoveredHoles),
            "enclosed_holes" => Some(Self::EnclosedHoles),
            "wells" | "well_depth" => Some(Self::Wells),
            "lines" | "complete_lines" => Some(Self::Lines),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::AggregateHeight => "aggregate_height",
            Feature::MaxHeight => "max_height",
            Feature::HeightVariance => "height_variance",
            Feature::Bumpiness => "bumpiness",
            Feature::CoveredHoles => "covered_holes",
            Feature::EnclosedHoles => "enclosed_holes",
            Feature::Wells => "wells",
            Feature::Lines => "lines",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Feature {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Feature::parse(&value).ok_or_else(|| format!("unknown feature {value:?}"))
    }
}

impl From<Feature> for String {
    fn from(value: Feature) -> Self {
        value.as_str().to_string()
    }
}

/// Every feature measured on one grid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Features {
    pub aggregate_height: u32,
    pub max_height: u32,
    pub height_variance: f64,
    pub bumpiness: u32,
    pub covered_holes: u32,
    pub enclosed_holes: u32,
    pub wells: u32,
    pub lines: u32,
}

impl Features {
    /// Measure `grid`; `lines` is the number of rows the placement cleared.
    pub fn measure(grid: &Grid, lines: u32) -> Self {
        let heights = grid.column_heights();

        let aggregate_height: u32 = heights.iter().sum();
        let max_height = heights.iter().copied().max().unwrap_or(0);

        let n = heights.len().max(1) as f64;
        let mean = aggregate_height as f64 / n;
        let sumsq: f64 = heights.iter().map(|&h| (h as f64) * (h as f64)).sum();
        let height_variance = (sumsq / n - mean * mean).max(0.0);

        let bumpiness = heights
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum();

        Self {
            aggregate_height,
            max_height,
            height_variance,
            bumpiness,
            covered_holes: covered_holes(grid, &heights),
            enclosed_holes: enclosed_holes(grid),
            wells: wells(grid, &heights),
            lines,
        }
    }

    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::AggregateHeight => self.aggregate_height as f64,
            Feature::MaxHeight => self.max_height as f64,
            Feature::HeightVariance => self.height_variance,
            Feature::Bumpiness => self.bumpiness as f64,
            Feature::CoveredHoles => self.covered_holes as f64,
            Feature::EnclosedHoles => self.enclosed_holes as f64,
            Feature::Wells => self.wells as f64,
            Feature::Lines => self.lines as f64,
        }
    }
}

// ---------------- internal helpers ----------------

fn covered_holes(grid: &Grid, heights: &[u32]) -> u32 {
    let mut holes = 0;
    for (x, &h) in heights.iter().enumerate() {
        let top = grid.height() - h as i32;
        for y in top..grid.height() {
            if !grid.contains((x as i32, y)) {
                holes += 1;
            }
        }
    }
    holes
}

fn enclosed_holes(grid: &Grid) -> u32 {
    let mut holes = 0;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.contains((x, y)) {
                continue;
            }
            let boxed = [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
                .into_iter()
                .all(|cell| grid.contains(cell));
            if boxed {
                holes += 1;
            }
        }
    }
    holes
}

fn wells(grid: &Grid, heights: &[u32]) -> u32 {
    let wall = grid.height() as u32;
    (0..heights.len())
        .map(|x| {
            let left = if x == 0 { wall } else { heights[x - 1] };
            let right = heights.get(x + 1).copied().unwrap_or(wall);
            left.min(right).saturating_sub(heights[x])
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::types::Color;

    fn grid_with(width: i32, height: i32, cells: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(width, height);
        for &cell in cells {
            grid.set(cell, Some(Color::Red));
        }
        grid
    }

    #[test]
    fn empty_grid_is_flat() {
        let f = Features::measure(&Grid::new(4, 5), 0);
        assert_eq!(f.aggregate_height, 0);
        assert_eq!(f.bumpiness, 0);
        assert_eq!(f.covered_holes, 0);
        assert_eq!(f.enclosed_holes, 0);
        assert_eq!(f.height_variance, 0.0);
        assert_eq!(f.wells, 0);
    }

    #[test]
    fn heights_and_bumpiness() {
        // heights: [1, 3, 0, 2]
        let grid = grid_with(4, 5, &[(0, 4), (1, 2), (1, 3), (1, 4), (3, 3), (3, 4)]);
        let f = Features::measure(&grid, 0);
        assert_eq!(f.aggregate_height, 6);
        assert_eq!(f.max_height, 3);
        assert_eq!(f.bumpiness, 2 + 3 + 2);
        assert!((f.height_variance - 1.25).abs() < 1e-9);
        // Column 0 sits between the wall and a height-3 column.
        assert_eq!(f.wells, 2 + 2);
    }

    #[test]
    fn covered_and_enclosed_holes_differ() {
        // Column 1 has an empty cell under its top, boxed on every side.
        let grid = grid_with(
            3,
            4,
            &[(1, 1), (0, 2), (2, 2), (0, 3), (1, 3), (2, 3)],
        );
        let f = Features::measure(&grid, 0);
        assert_eq!(f.covered_holes, 1);
        assert_eq!(f.enclosed_holes, 1);

        // Against the wall the same gap is covered but not enclosed.
        let grid = grid_with(2, 3, &[(0, 0), (1, 1), (0, 2), (1, 2)]);
        let f = Features::measure(&grid, 0);
        assert_eq!(f.covered_holes, 1);
        assert_eq!(f.enclosed_holes, 0);
    }

    #[test]
    fn feature_names_parse_loosely() {
        assert_eq!(Feature::parse(" Bumpiness "), Some(Feature::Bumpiness));
        assert_eq!(Feature::parse("agg_h"), Some(Feature::AggregateHeight));
        assert_eq!(Feature::parse("nonsense"), None);
        for feature in Feature::ALL {
            assert_eq!(Feature::parse(feature.as_str()), Some(feature));
        }
    }
}
