#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One decoded range sample.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Angle in whole degrees, 0..359.
    pub angle_index: usize,
    /// Distance in meters. Not clamped: device noise passes through as is.
    pub distance: f32,
    /// Return strength of the laser pulse.
    pub intensity: u16,
}
