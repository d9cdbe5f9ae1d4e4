//! Grid-size classification for NDFD forecast grids.
//!
//! NDFD CONUS grids come in exactly two resolutions, distinguished by the
//! number of columns in the decoded grid: 1073 columns for the 5 km grid and
//! 2145 columns for the 2.5 km grid.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of grid columns in the 5 km CONUS grid.
pub const COLUMNS_5KM: u32 = 1073;
/// Number of grid columns in the 2.5 km CONUS grid.
pub const COLUMNS_2_5KM: u32 = 2145;

/// Error returned when a grid dimension matches no known NDFD grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unrecognized grid dimension: {0} columns")]
pub struct UnrecognizedGridError(pub u32);

/// Spatial resolution of an NDFD grid, a closed two-value enumeration.
///
/// Serializes to the storage identifiers `"5"` and `"2.5"`, which are
/// load-bearing path components in the archive layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridSize {
    /// 5 km grid (1073 columns)
    #[serde(rename = "5")]
    Km5,
    /// 2.5 km grid (2145 columns)
    #[serde(rename = "2.5")]
    Km2_5,
}

impl GridSize {
    /// Classify a grid by its column count.
    ///
    /// Total over the two known dimensions; anything else is an error for
    /// that record. Never silently defaults.
    pub fn classify(grid_dimension: u32) -> Result<GridSize, UnrecognizedGridError> {
        match grid_dimension {
            COLUMNS_5KM => Ok(GridSize::Km5),
            COLUMNS_2_5KM => Ok(GridSize::Km2_5),
            other => Err(UnrecognizedGridError(other)),
        }
    }

    /// Storage identifier used as a path component (`"5"` or `"2.5"`).
    pub fn id(&self) -> &'static str {
        match self {
            GridSize::Km5 => "5",
            GridSize::Km2_5 => "2.5",
        }
    }

    /// Canonical column count for this grid size.
    pub fn columns(&self) -> u32 {
        match self {
            GridSize::Km5 => COLUMNS_5KM,
            GridSize::Km2_5 => COLUMNS_2_5KM,
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_5km() {
        assert_eq!(GridSize::classify(1073).unwrap(), GridSize::Km5);
        assert_eq!(GridSize::classify(1073).unwrap().id(), "5");
    }

    #[test]
    fn test_classify_2_5km() {
        assert_eq!(GridSize::classify(2145).unwrap(), GridSize::Km2_5);
        assert_eq!(GridSize::classify(2145).unwrap().id(), "2.5");
    }

    #[test]
    fn test_classify_rejects_unknown_dimensions() {
        for dim in [0, 1, 999, 1072, 1074, 2144, 2146, u32::MAX] {
            assert_eq!(GridSize::classify(dim), Err(UnrecognizedGridError(dim)));
        }
    }

    #[test]
    fn test_serializes_to_path_identifier() {
        assert_eq!(serde_json::to_string(&GridSize::Km5).unwrap(), "\"5\"");
        assert_eq!(serde_json::to_string(&GridSize::Km2_5).unwrap(), "\"2.5\"");
    }

    #[test]
    fn test_deserializes_from_path_identifier() {
        let size: GridSize = serde_json::from_str("\"2.5\"").unwrap();
        assert_eq!(size, GridSize::Km2_5);
    }
}
