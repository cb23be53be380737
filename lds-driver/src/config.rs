use crate::constants::{DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT};
use lds_data::UnfilledSlot;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for [`crate::run_driver`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverConfig {
    pub baud_rate: u32,
    /// Port read timeout. A read that times out ends the current cycle without a scan.
    pub timeout: Duration,
    /// Value of angles that no valid sub-frame covered.
    pub fill: UnfilledSlot,
    /// Every scan is appended here when set.
    pub record_path: Option<PathBuf>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
            fill: UnfilledSlot::Zero,
            record_path: None,
        }
    }
}

impl DriverConfig {
    pub fn with_record_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.record_path = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_fill(mut self, fill: UnfilledSlot) -> Self {
        self.fill = fill;
        self
    }
}
