pub mod polar_map;
pub mod reading;
pub mod scan;

pub use polar_map::{AveragedMap, MapPoint};
pub use reading::Reading;
pub use scan::{Scan, UnfilledSlot, SAMPLES_PER_SCAN};
