//! World Positions
//!
//! Location value types used for snapshots and teleports.

use serde::{Deserialize, Serialize};

/// World dimension a location belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    /// The main world.
    #[default]
    Overworld,
    /// The nether.
    Nether,
    /// The end.
    TheEnd,
}

/// A position in the world: dimension plus coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Dimension the coordinates are relative to.
    pub dimension: Dimension,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Location {
    /// Create a location.
    pub const fn new(dimension: Dimension, x: f64, y: f64, z: f64) -> Self {
        Self { dimension, x, y, z }
    }

    /// Create an overworld location.
    pub const fn overworld(x: f64, y: f64, z: f64) -> Self {
        Self::new(Dimension::Overworld, x, y, z)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} ({:.1}, {:.1}, {:.1})",
            self.dimension, self.x, self.y, self.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overworld_constructor() {
        let loc = Location::overworld(0.0, 100.0, 0.0);
        assert_eq!(loc.dimension, Dimension::Overworld);
        assert_eq!(loc.y, 100.0);
    }

    #[test]
    fn test_display() {
        let loc = Location::new(Dimension::Nether, 1.0, 2.0, 3.0);
        assert_eq!(loc.to_string(), "Nether (1.0, 2.0, 3.0)");
    }
}
