#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean distance observed at one angle across every ingested record.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapPoint {
    pub angle_degree: f64,
    /// Arithmetic mean of the bucket, in meters.
    pub distance: f64,
    /// Size of the bucket the mean was taken over.
    pub n_samples: usize,
}

/// Consolidated polar map, ascending by angle.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AveragedMap {
    pub points: Vec<MapPoint>,
}

impl AveragedMap {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean distance at exactly `angle_degree`, if any record produced that angle.
    pub fn get(&self, angle_degree: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.angle_degree == angle_degree)
            .map(|p| p.distance)
    }

    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.angle_degree)
    }

    /// Polar pairs `(angle in degrees, mean distance in meters)`.
    pub fn polar_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.angle_degree, p.distance))
            .collect()
    }
}
