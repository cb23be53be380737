use crate::reading::Reading;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of angular samples in one full rotation.
pub const SAMPLES_PER_SCAN: usize = 360;

/// Value written into angles that no valid sub-frame covered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnfilledSlot {
    /// `0.0`, the value historical records carry.
    #[default]
    Zero,
    /// `NaN`, so that missing angles can be told apart from real zeros.
    Nan,
}

impl UnfilledSlot {
    pub fn value(self) -> f32 {
        match self {
            UnfilledSlot::Zero => 0.0,
            UnfilledSlot::Nan => f32::NAN,
        }
    }
}

/// Struct to hold one full rotation of scan data.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scan {
    /// Distance in meters, indexed by angle in degrees. Always 360 entries.
    pub distances: Vec<f32>,
    /// Return strength, indexed like `distances`.
    pub intensities: Vec<u16>,
    /// Rotation speed estimate. `0.0` when no sub-frame validated.
    pub rpm: f64,
    /// Number of sub-frames that passed header validation.
    pub valid_subframes: usize,
}

impl Scan {
    /// A scan with every angle set to `fill` and no speed estimate.
    pub fn filled(fill: UnfilledSlot) -> Scan {
        Scan {
            distances: vec![fill.value(); SAMPLES_PER_SCAN],
            intensities: vec![0; SAMPLES_PER_SCAN],
            rpm: 0.0,
            valid_subframes: 0,
        }
    }

    pub fn set(&mut self, reading: &Reading) {
        self.distances[reading.angle_index] = reading.distance;
        self.intensities[reading.angle_index] = reading.intensity;
    }

    /// Polar pairs `(angle in degrees, distance in meters)`.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .map(|(angle, d)| (angle as f64, *d as f64))
    }
}
