use std::time::Duration;

pub(crate) const SYNC_BYTE: u8 = 0xFA;
pub(crate) const INDEX_BASE: u8 = 0xA0;
pub(crate) const SUBFRAME_SIZE: usize = 42;
pub(crate) const N_SUBFRAMES: usize = 60;
pub(crate) const SUPERFRAME_SIZE: usize = SUBFRAME_SIZE * N_SUBFRAMES;
pub(crate) const READINGS_PER_SUBFRAME: usize = 6;
pub(crate) const READING_SIZE: usize = 6;
// Sync byte, index byte, then the little-endian speed field
pub(crate) const SPEED_OFFSET: usize = 2;
pub(crate) const READINGS_OFFSET: usize = 4;
pub(crate) const LIDAR_CMD_START_MOTOR: u8 = b'b';
pub(crate) const LIDAR_CMD_STOP_MOTOR: u8 = b'e';
pub(crate) const FLOAT_SIZE: usize = 4;
pub const RECORD_SIZE: usize = lds_data::SAMPLES_PER_SCAN * FLOAT_SIZE;
pub const DEFAULT_BAUD_RATE: u32 = 230_400;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);
